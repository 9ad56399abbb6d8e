//! Gap-filled identifiers for small local scopes.

use std::collections::HashSet;

/// Returns the smallest non-negative integer not present in `used`.
///
/// Retired ids are handed out again, so this must only be used for ids that are
/// scoped to a single owner (dialogue entries within one library). Global entity
/// ids come from the monotonic counter store instead.
///
/// # Examples
///
/// ```
/// use loreforge_domain::common::next_gap_id;
///
/// assert_eq!(next_gap_id([0, 1, 3]), 2);
/// assert_eq!(next_gap_id(Vec::<u32>::new()), 0);
/// ```
pub fn next_gap_id<I>(used: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let used: HashSet<u32> = used.into_iter().collect();
    let mut candidate = 0;
    while used.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_set_yields_zero() {
        assert_eq!(next_gap_id(Vec::new()), 0);
    }

    #[test]
    fn fills_first_gap() {
        assert_eq!(next_gap_id([0, 1, 3]), 2);
        assert_eq!(next_gap_id([1, 2, 3]), 0);
    }

    #[test]
    fn dense_set_yields_next() {
        assert_eq!(next_gap_id(0..10), 10);
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        assert_eq!(next_gap_id([3, 0, 0, 1, 1]), 2);
    }

    proptest! {
        #[test]
        fn result_is_minimum_unused(ids in proptest::collection::hash_set(0u32..64, 0..48)) {
            let next = next_gap_id(ids.iter().copied());
            prop_assert!(!ids.contains(&next));
            for smaller in 0..next {
                prop_assert!(ids.contains(&smaller));
            }
        }
    }
}
