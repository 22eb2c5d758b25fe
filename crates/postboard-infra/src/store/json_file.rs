//! Flat JSON file post store.
//!
//! The file holds a single JSON array of posts. Every call reloads it and
//! every mutation rewrites it in full.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use postboard_core::domain::{NewPost, Post, PostId};
use postboard_core::error::StoreError;
use postboard_core::ports::{PostStore, next_post_id};

/// Post store backed by a JSON array on disk.
///
/// A missing, unreadable or corrupt file reads as an empty store. Writes go
/// through a temp file and a rename so readers never see a half-written file.
pub struct JsonFilePostStore {
    path: PathBuf,
    /// Highest id seen or issued by this process.
    last_id: AtomicU64,
    /// Serializes load-modify-save cycles.
    write_lock: Mutex<()>,
}

impl JsonFilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_id: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Vec<Post> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Posts file not found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read posts file");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Post>>(&bytes) {
            Ok(posts) => {
                let max = posts.iter().map(|p| p.id).max().unwrap_or(0);
                self.last_id.fetch_max(max, Ordering::SeqCst);
                posts
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Posts file is not a valid post array");
                Vec::new()
            }
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(posts).map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), count = posts.len(), "Saved posts file");

        Ok(())
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.load().await)
    }

    async fn append(&self, draft: NewPost) -> Result<Post, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await;

        let id = next_post_id(&posts, self.last_id.load(Ordering::SeqCst));
        let post = draft.into_post(id);
        posts.push(post.clone());

        self.save(&posts).await?;
        self.last_id.fetch_max(id, Ordering::SeqCst);

        Ok(post)
    }

    async fn replace(&self, post: Post) -> Result<Post, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await;

        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(StoreError::NotFound(post.id))?;
        *slot = post.clone();

        self.save(&posts).await?;

        Ok(post)
    }

    async fn remove(&self, id: PostId) -> Result<Post, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await;

        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = posts.remove(index);

        self.save(&posts).await?;

        Ok(removed)
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}
