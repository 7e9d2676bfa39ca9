//! Lazy iterator over the ancestor directories of a relative directory
//!
//! For `a/b/c`, yields: `` (the pages root) → `a` → `a/b` → `a/b/c`
//!
//! Root first, so layouts collected while walking come out in chain
//! order. Only borrows from the input string.
//!
//! # Examples
//!
//! ```
//! use viper_router::path::DirectoryAncestors;
//!
//! let dirs: Vec<&str> = DirectoryAncestors::new("(auth)/admin").collect();
//! assert_eq!(dirs, vec!["", "(auth)", "(auth)/admin"]);
//! ```

#[derive(Debug, Clone)]
pub struct DirectoryAncestors<'a> {
    dir: &'a str,
    /// End offset of the next prefix to yield
    cursor: Option<usize>,
}

impl<'a> DirectoryAncestors<'a> {
    pub fn new(dir: &'a str) -> Self {
        Self {
            dir: dir.trim_matches('/'),
            cursor: Some(0),
        }
    }
}

impl<'a> Iterator for DirectoryAncestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.cursor?;
        let result = &self.dir[..end];

        self.cursor = if end == self.dir.len() {
            None
        } else {
            let search_from = if end == 0 { 0 } else { end + 1 };
            Some(
                self.dir[search_from..]
                    .find('/')
                    .map(|offset| search_from + offset)
                    .unwrap_or(self.dir.len()),
            )
        };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_only() {
        let dirs: Vec<&str> = DirectoryAncestors::new("").collect();
        assert_eq!(dirs, vec![""]);
    }

    #[test]
    fn test_nested() {
        let dirs: Vec<&str> = DirectoryAncestors::new("a/b/c").collect();
        assert_eq!(dirs, vec!["", "a", "a/b", "a/b/c"]);
    }

    #[test]
    fn test_surrounding_slashes_ignored() {
        let dirs: Vec<&str> = DirectoryAncestors::new("/blog/").collect();
        assert_eq!(dirs, vec!["", "blog"]);
    }

    #[test]
    fn test_short_circuit() {
        let mut iter = DirectoryAncestors::new("a/b/c/d");
        assert_eq!(iter.find(|d| d.ends_with('b')), Some("a/b"));
        assert_eq!(iter.next(), Some("a/b/c"));
    }
}
