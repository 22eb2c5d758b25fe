//! Free-text search stage.

use crate::domain::Post;

/// Search filters.
///
/// `title`, `content` and `author` match by case-insensitive substring,
/// `date` by exact equality. A post is kept as soon as one filter matches,
/// checked in that order; supplying several filters does not narrow the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    date: Option<String>,
}

impl SearchCriteria {
    /// Build criteria from raw values. Empty strings count as absent.
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        author: Option<&str>,
        date: Option<&str>,
    ) -> Self {
        Self {
            title: needle(title),
            content: needle(content),
            author: needle(author),
            date: date.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none() && self.date.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        contains(&self.title, &post.title)
            || contains(&self.content, &post.content)
            || contains(&self.author, &post.author)
            || self.date.as_deref().is_some_and(|d| d == post.date)
    }
}

fn needle(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn contains(needle: &Option<String>, haystack: &str) -> bool {
    needle
        .as_deref()
        .is_some_and(|n| haystack.to_lowercase().contains(n))
}

/// Posts matching `criteria`, in store order. No criteria matches nothing.
pub fn search_posts(posts: &[Post], criteria: &SearchCriteria) -> Vec<Post> {
    if criteria.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|post| criteria.matches(post))
        .cloned()
        .collect()
}
