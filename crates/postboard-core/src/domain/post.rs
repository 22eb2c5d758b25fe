use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, FieldError};

/// Store-assigned post identifier.
pub type PostId = u64;

/// Calendar date format used for `Post::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Post entity - a blog entry.
///
/// Text fields that are missing or `null` in stored records load as empty
/// strings, so one incomplete record never makes the whole collection
/// unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Today's date (UTC) in `DATE_FORMAT`.
pub fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

fn is_valid_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

fn date_error() -> FieldError {
    FieldError::new("date", "Date must be in YYYY-MM-DD format.")
}

/// A validated post that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: Option<String>,
}

impl NewPost {
    /// Validate raw create-request fields.
    ///
    /// Every failing field is reported, not just the first one.
    pub fn parse(
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
        date: Option<String>,
    ) -> Result<Self, DomainError> {
        let mut errors = Vec::new();

        let title = required("title", "Title", title, &mut errors);
        let content = required("content", "Content", content, &mut errors);
        let author = required("author", "Author", author, &mut errors);

        if let Some(date) = &date {
            if !is_valid_date(date) {
                errors.push(date_error());
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            title,
            content,
            author,
            date,
        })
    }

    /// Turn the draft into a stored post with the given id.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            date: self.date.unwrap_or_else(today),
        }
    }
}

fn required(
    field: &'static str,
    label: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> String {
    match value {
        None => {
            errors.push(FieldError::new(field, format!("{label} is required.")));
            String::new()
        }
        Some(v) if v.trim().is_empty() => {
            errors.push(FieldError::new(field, format!("{label} cannot be empty.")));
            String::new()
        }
        Some(v) => v,
    }
}

/// Partial update. `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl PostPatch {
    pub fn parse(
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
        date: Option<String>,
    ) -> Result<Self, DomainError> {
        let mut errors = Vec::new();

        for (field, label, value) in [
            ("title", "Title", &title),
            ("content", "Content", &content),
            ("author", "Author", &author),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.push(FieldError::new(field, format!("{label} cannot be empty.")));
            }
        }

        if date.as_deref().is_some_and(|d| !is_valid_date(d)) {
            errors.push(date_error());
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            title,
            content,
            author,
            date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none() && self.date.is_none()
    }

    /// Overwrite the fields present in the patch.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn sample() -> Post {
        Post {
            id: 1,
            title: "First post".into(),
            content: "This is the first post.".into(),
            author: "Ada".into(),
            date: "2024-01-01".into(),
        }
    }

    #[test]
    fn test_new_post_collects_all_errors() {
        let err = NewPost::parse(None, s("   "), None, s("01/02/2024")).unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title is required.",
                "Content cannot be empty.",
                "Author is required.",
                "Date must be in YYYY-MM-DD format.",
            ]
        );
    }

    #[test]
    fn test_new_post_defaults_date_to_today() {
        let draft = NewPost::parse(s("Hello"), s("World"), s("Ada"), None).unwrap();
        let post = draft.into_post(3);
        assert_eq!(post.id, 3);
        assert_eq!(post.date, today());
    }

    #[test]
    fn test_new_post_keeps_explicit_date() {
        let draft = NewPost::parse(s("Hello"), s("World"), s("Ada"), s("2023-12-31")).unwrap();
        assert_eq!(draft.into_post(1).date, "2023-12-31");
    }

    #[test]
    fn test_patch_only_overwrites_present_fields() {
        let mut post = sample();
        let patch = PostPatch::parse(s("X"), None, None, None).unwrap();
        patch.apply(&mut post);

        assert_eq!(post.title, "X");
        assert_eq!(post.content, "This is the first post.");
        assert_eq!(post.author, "Ada");
        assert_eq!(post.date, "2024-01-01");
    }

    #[test]
    fn test_patch_rejects_blank_and_bad_date() {
        let err = PostPatch::parse(None, s(""), None, s("2024-13-01")).unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "content");
        assert_eq!(errors[1].field, "date");
    }

    #[test]
    fn test_empty_patch() {
        assert!(PostPatch::default().is_empty());
        assert!(!PostPatch::parse(None, None, s("Bob"), None).unwrap().is_empty());
    }

    #[test]
    fn test_legacy_record_without_author_or_date() {
        let post: Post =
            serde_json::from_str(r#"{"id": 4, "title": "Old", "content": "Legacy"}"#).unwrap();
        assert_eq!(post.author, "");
        assert_eq!(post.date, "");
    }

    #[test]
    fn test_missing_or_null_text_fields_load_empty() {
        let post: Post =
            serde_json::from_str(r#"{"id": 5, "title": null, "author": "Ada"}"#).unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.content, "");
        assert_eq!(post.author, "Ada");
    }
}
