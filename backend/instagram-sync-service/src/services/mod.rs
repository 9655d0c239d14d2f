/// Business logic layer for instagram-sync-service
///
/// - Sync service: Mirrors remote media into the local store
/// - Comment service: Publishes comments remotely, then stores them
/// - Post service: Cursor-paginated listing with nested comments
pub mod comments;
pub mod posts;
pub mod sync;

pub use comments::CommentService;
pub use posts::{PostListing, PostService};
pub use sync::SyncService;
