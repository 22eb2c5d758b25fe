//! Page slicing stage.

/// Half-open `[start, start + limit)` window for a 1-based `page`.
///
/// Out-of-range pages yield an empty page.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(limit);
    items.into_iter().skip(start).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(items.clone(), 1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate(items, 2, 5), vec![6, 7]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let items: Vec<u32> = (1..=3).collect();
        assert!(paginate(items.clone(), 2, 5).is_empty());
        assert!(paginate(items, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        for n in 0..12usize {
            let items: Vec<usize> = (0..n).collect();
            for limit in 1..=5 {
                let pages = n.div_ceil(limit);
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|page| paginate(items.clone(), page, limit))
                    .collect();
                assert_eq!(joined, items, "n={n} limit={limit}");
                assert!(paginate(items.clone(), pages + 1, limit).is_empty());
            }
        }
    }
}
