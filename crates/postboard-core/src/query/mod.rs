//! Post query engine: parameter validation, ordering, paging and search.
//!
//! Every stage works on a point-in-time snapshot handed over by the caller.

mod paginate;
mod params;
mod search;
mod sort;

pub use paginate::paginate;
pub use params::{DEFAULT_LIMIT, DEFAULT_PAGE, Direction, ListParams, SortField};
pub use search::{SearchCriteria, search_posts};
pub use sort::sort_posts;

use crate::domain::Post;

/// Sort (when requested) and then slice one page out of `posts`.
pub fn list_posts(mut posts: Vec<Post>, params: &ListParams) -> Vec<Post> {
    if let Some(field) = params.sort {
        sort_posts(&mut posts, field, params.direction);
    }
    paginate(posts, params.page, params.limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<Post> {
        vec![
            Post {
                id: 1,
                title: "First post".into(),
                content: "This is the first post.".into(),
                author: "Ada".into(),
                date: "2024-01-01".into(),
            },
            Post {
                id: 2,
                title: "Second post".into(),
                content: "This is the second post.".into(),
                author: "Grace".into(),
                date: "2024-01-02".into(),
            },
        ]
    }

    #[test]
    fn test_sorted_desc_first_page() {
        let params = ListParams::parse(Some("title"), Some("desc"), Some("1"), Some("1")).unwrap();
        let page = list_posts(store(), &params);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 2);
    }

    #[test]
    fn test_direction_without_sort_keeps_store_order() {
        let params = ListParams::parse(None, Some("desc"), None, None).unwrap();
        let ids: Vec<_> = list_posts(store(), &params).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_pagination_follows_sort_order() {
        let params = ListParams::parse(Some("author"), Some("desc"), Some("2"), Some("1")).unwrap();
        let page = list_posts(store(), &params);
        assert_eq!(page[0].author, "Ada");
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        assert!(list_posts(Vec::new(), &ListParams::default()).is_empty());
    }
}
