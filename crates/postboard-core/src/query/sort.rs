//! Ordering stage.

use crate::domain::Post;

use super::params::{Direction, SortField};

/// Stable sort of `posts` by the raw value of `field`.
///
/// Comparison is byte-wise and case-sensitive. `Desc` reverses the
/// comparator, so equal keys keep their store order in both directions.
pub fn sort_posts(posts: &mut [Post], field: SortField, direction: Direction) {
    match direction {
        Direction::Asc => posts.sort_by(|a, b| field.key(a).cmp(field.key(b))),
        Direction::Desc => posts.sort_by(|a, b| field.key(b).cmp(field.key(a))),
    }
}
