/*
 * Responsibility
 * - handler が受け取る入力型 (path id / JSON body)
 * - 失敗時は AppError (400 + envelope) に変換
 */
mod comment_id;
mod json_body;

pub use comment_id::CommentId;
pub use json_body::JsonBody;
