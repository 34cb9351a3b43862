pub mod comment_repo;
pub mod error;
pub mod memory;
pub mod pg;

pub use comment_repo::{CommentInput, CommentRepo, CommentRow, empty_body};
pub use error::RepoError;
pub use memory::InMemoryCommentRepo;
pub use pg::PgCommentRepo;
