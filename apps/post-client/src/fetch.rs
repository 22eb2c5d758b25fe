//! Walk `GET /api/posts` page by page until the server runs out of posts.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use postboard_shared::dto::PostResponse;

/// Listing query sent for each page.
#[derive(Debug, Clone, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// What one page request produced.
#[derive(Debug)]
pub enum PageOutcome {
    Posts(Vec<PostResponse>),
    /// Non-200 answer from the server.
    Failed(StatusCode),
}

/// Something that can hand out pages of posts.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> anyhow::Result<PageOutcome>;
}

/// Page source talking to a running API server.
pub struct HttpPageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPageSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, query: &PageQuery) -> anyhow::Result<PageOutcome> {
        let response = self
            .client
            .get(&self.url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("request for page {} failed", query.page))?;

        if response.status() != StatusCode::OK {
            return Ok(PageOutcome::Failed(response.status()));
        }

        let posts = response
            .json::<Vec<PostResponse>>()
            .await
            .with_context(|| format!("page {} is not a list of posts", query.page))?;

        Ok(PageOutcome::Posts(posts))
    }
}

/// Collect every post starting at `start.page`.
///
/// Stops at the first empty page or the first non-200 response.
pub async fn fetch_all<S>(source: &S, start: PageQuery) -> anyhow::Result<Vec<PostResponse>>
where
    S: PageSource + ?Sized,
{
    let mut query = start;
    let mut collected = Vec::new();

    loop {
        let posts = match source.fetch_page(&query).await? {
            PageOutcome::Posts(posts) => posts,
            PageOutcome::Failed(status) => {
                tracing::warn!(page = query.page, %status, "Failed to fetch posts");
                println!("Failed to fetch posts: {status}");
                break;
            }
        };

        if posts.is_empty() {
            println!("No more posts to fetch.");
            break;
        }

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        println!("Page {}: {:?}", query.page, titles);

        collected.extend(posts);
        query.page += 1;
    }

    println!("\nTotal posts fetched: {}", collected.len());
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves `total` posts in pages, optionally failing on one page.
    struct FakeSource {
        total: u64,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(total: u64) -> Self {
            Self {
                total,
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, query: &PageQuery) -> anyhow::Result<PageOutcome> {
            self.requested.lock().unwrap().push(query.page);
            if self.fail_on == Some(query.page) {
                return Ok(PageOutcome::Failed(StatusCode::TOO_MANY_REQUESTS));
            }

            let start = u64::from(query.page - 1) * u64::from(query.limit);
            let posts = (start..self.total.min(start + u64::from(query.limit)))
                .map(|i| PostResponse {
                    id: i + 1,
                    title: format!("Post {}", i + 1),
                    content: String::new(),
                    author: String::new(),
                    date: String::new(),
                })
                .collect();
            Ok(PageOutcome::Posts(posts))
        }
    }

    fn query(page: u32, limit: u32) -> PageQuery {
        PageQuery {
            page,
            limit,
            sort: Some("title".to_string()),
            direction: Some("asc".to_string()),
        }
    }

    #[tokio::test]
    async fn test_collects_until_empty_page() {
        let source = FakeSource::new(7);
        let posts = fetch_all(&source, query(1, 3)).await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        assert_eq!(*source.requested.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_stops_on_failed_page() {
        let source = FakeSource {
            fail_on: Some(2),
            ..FakeSource::new(10)
        };
        let posts = fetch_all(&source, query(1, 5)).await.unwrap();
        assert_eq!(posts.len(), 5);
    }

    #[tokio::test]
    async fn test_starts_from_given_page() {
        let source = FakeSource::new(6);
        let posts = fetch_all(&source, query(2, 5)).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 6);
    }
}
