//! Post application service - the operations behind the HTTP routes.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostId, PostPatch, today};
use crate::error::DomainError;
use crate::ports::PostStore;
use crate::query::{ListParams, SearchCriteria, list_posts, search_posts};

/// Runs the query engine and the mutation paths against a [`PostStore`].
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// One page of posts, sorted when requested.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Post>, DomainError> {
        let posts = self.store.all().await?;
        let total = posts.len();
        let page = list_posts(posts, params);

        tracing::debug!(
            total,
            returned = page.len(),
            sort = ?params.sort,
            direction = ?params.direction,
            page = params.page,
            limit = params.limit,
            "Listed posts"
        );

        Ok(page)
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Post>, DomainError> {
        let posts = self.store.all().await?;
        let found = search_posts(&posts, criteria);

        tracing::debug!(matched = found.len(), "Searched posts");

        Ok(found)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, mut draft: NewPost) -> Result<Post, DomainError> {
        draft.date.get_or_insert_with(today);
        let post = self.store.append(draft).await?;

        tracing::info!(post_id = post.id, "Created post");

        Ok(post)
    }

    pub async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;

        if patch.is_empty() {
            tracing::debug!(post_id = id, "Empty update, nothing to change");
            return Ok(post);
        }

        patch.apply(&mut post);
        let post = self.store.replace(post).await?;

        tracing::info!(post_id = id, "Updated post");

        Ok(post)
    }

    /// Remove a post. The store will not hand its id out again while the
    /// process runs; the JSON file store can reissue the highest deleted id
    /// after a restart.
    pub async fn delete(&self, id: PostId) -> Result<Post, DomainError> {
        let removed = self.store.remove(id).await?;

        tracing::info!(post_id = id, "Deleted post");

        Ok(removed)
    }
}
