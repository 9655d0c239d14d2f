/// Database access layer
///
/// Repositories are free functions over `sqlx` executors so they run the
/// same way against the pool or inside a sync transaction.
pub mod comment_repo;
pub mod post_repo;

pub use comment_repo::NewComment;
