use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};
use crate::error::StoreError;

/// Post store - owns the authoritative, ordered post collection.
///
/// Implementations may reload their backing on every call, so callers must
/// not assume two calls observe the same snapshot.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post, in insertion order.
    ///
    /// An unreadable backing yields an empty collection, not an error.
    async fn all(&self) -> Result<Vec<Post>, StoreError>;

    /// Find a post by id.
    async fn find(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.all().await?.into_iter().find(|p| p.id == id))
    }

    /// Assign the next id to `draft` and append it.
    async fn append(&self, draft: NewPost) -> Result<Post, StoreError>;

    /// Replace the stored post carrying `post.id`.
    async fn replace(&self, post: Post) -> Result<Post, StoreError>;

    /// Remove a post, returning what was stored.
    async fn remove(&self, id: PostId) -> Result<Post, StoreError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Next id given the current posts and the highest id ever issued.
pub fn next_post_id(posts: &[Post], high_water: PostId) -> PostId {
    posts
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        .max(high_water)
        + 1
}
