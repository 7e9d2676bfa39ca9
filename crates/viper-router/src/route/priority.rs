//! Registration order for routes
//!
//! Lower scores register first, so a static route is never shadowed by a
//! dynamic one, and a dynamic route never by a catch-all.

use std::cmp::Ordering;

use super::segment::{PathSegment, SegmentKind};

/// Weight of a `[param]` segment
pub const DYNAMIC_WEIGHT: usize = 10;

/// Weight of a `[...param]` segment
pub const CATCH_ALL_WEIGHT: usize = 100;

/// Folds segment weights into a specificity score
///
/// # Examples
///
/// ```
/// use viper_router::route::{parse_segments, specificity_score};
///
/// let score = |p| specificity_score(&parse_segments(p).unwrap());
/// assert_eq!(score("users/new.vue"), 0);
/// assert_eq!(score("users/[id].vue"), 10);
/// assert_eq!(score("users/[id]/[...rest].vue"), 110);
/// ```
pub fn specificity_score(segments: &[PathSegment]) -> usize {
    segments.iter().fold(0, |score, segment| match segment.kind() {
        SegmentKind::Dynamic => score + DYNAMIC_WEIGHT,
        SegmentKind::CatchAll => score + CATCH_ALL_WEIGHT,
        SegmentKind::Static | SegmentKind::Index | SegmentKind::Group | SegmentKind::Layout => score,
    })
}

/// Total order over `(score, relative path)` pairs
///
/// Score first, then shorter relative paths, then the path text itself.
pub fn compare_specificity(a: (usize, &str), b: (usize, &str)) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| a.1.len().cmp(&b.1.len()))
        .then_with(|| a.1.cmp(b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::parse_segments;

    fn key(path: &str) -> (usize, &str) {
        (specificity_score(&parse_segments(path).unwrap()), path)
    }

    #[test]
    fn test_groups_and_index_are_free() {
        assert_eq!(key("(auth)/index.vue").0, 0);
    }

    #[test]
    fn test_static_before_dynamic_before_catch_all() {
        let mut paths = vec!["[id].vue", "static.vue", "[...slug].vue"];
        paths.sort_by(|a, b| compare_specificity(key(a), key(b)));
        assert_eq!(paths, vec!["static.vue", "[id].vue", "[...slug].vue"]);
    }

    #[test]
    fn test_ties_break_on_length_then_text() {
        let mut paths = vec!["about/team.vue", "zed.vue", "abc.vue"];
        paths.sort_by(|a, b| compare_specificity(key(a), key(b)));
        assert_eq!(paths, vec!["abc.vue", "zed.vue", "about/team.vue"]);
    }
}
