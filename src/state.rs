/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - comments: CommentService (内部は Arc<dyn CommentRepo>)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 起動後は読み取り専用
 */
use crate::services::CommentService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub comments: CommentService,
}

impl AppState {
    pub fn new(comments: CommentService) -> Self {
        Self { comments }
    }
}
