//! In-memory post store - the default when no posts file is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, Post, PostId};
use postboard_core::error::StoreError;
use postboard_core::ports::{PostStore, next_post_id};

struct Inner {
    posts: Vec<Post>,
    /// Highest id ever issued, so deleted ids are not handed out again.
    last_id: PostId,
}

/// In-memory post store using a `Vec` behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    inner: RwLock<Inner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let last_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { posts, last_id }),
        }
    }

    /// Store holding the two sample posts served out of the box.
    pub fn sample() -> Self {
        Self::with_posts(vec![
            Post {
                id: 1,
                title: "First post".to_string(),
                content: "This is the first post.".to_string(),
                author: "Postboard".to_string(),
                date: "2024-01-01".to_string(),
            },
            Post {
                id: 2,
                title: "Second post".to_string(),
                content: "This is the second post.".to_string(),
                author: "Postboard".to_string(),
                date: "2024-01-02".to_string(),
            },
        ])
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn append(&self, draft: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;

        let id = next_post_id(&inner.posts, inner.last_id);
        let post = draft.into_post(id);

        inner.last_id = id;
        inner.posts.push(post.clone());

        Ok(post)
    }

    async fn replace(&self, post: Post) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;

        let slot = inner
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(StoreError::NotFound(post.id))?;
        *slot = post.clone();

        Ok(post)
    }

    async fn remove(&self, id: PostId) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;

        let index = inner
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        Ok(inner.posts.remove(index))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Body".to_string(),
            author: "Ada".to_string(),
            date: Some("2024-05-05".to_string()),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() {
        let store = InMemoryPostStore::new();
        let first = store.append(draft("a")).await.unwrap();
        let second = store.append(draft("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let store = InMemoryPostStore::sample();
        store.remove(2).await.unwrap();

        let created = store.append(draft("c")).await.unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn test_replace_and_remove_unknown() {
        let store = InMemoryPostStore::sample();
        let mut ghost = store.find(1).await.unwrap().unwrap();
        ghost.id = 99;

        assert!(matches!(
            store.replace(ghost).await,
            Err(StoreError::NotFound(99))
        ));
        assert!(matches!(store.remove(42).await, Err(StoreError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let store = InMemoryPostStore::sample();
        let mut first = store.find(1).await.unwrap().unwrap();
        first.title = "Edited".to_string();
        store.replace(first).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all[0].title, "Edited");
        assert_eq!(all[1].id, 2);
    }
}
