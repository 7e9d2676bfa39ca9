//! Filesystem capabilities the host hands to the router
//!
//! The router never touches the disk itself. Hosts implement `PageSource`
//! over whatever they have; `MemorySource` covers tests and hosts that
//! already hold a file listing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub trait PageSource {
    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Every file below `root` whose extension is `extension`, in a stable order
    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf>;
}

/// In-memory set of file paths
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use viper_router::{MemorySource, PageSource};
///
/// let source = MemorySource::from_files(["/app/pages/index.vue", "/app/pages/about.vue"]);
/// assert!(source.exists(Path::new("/app/pages/about.vue")));
/// assert_eq!(source.list(Path::new("/app/pages"), "vue").len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeSet<PathBuf>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.files.insert(path.into())
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        self.files.remove(path)
    }
}

impl PageSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|path| path.starts_with(root))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters_root_and_extension() {
        let source = MemorySource::from_files([
            "/app/pages/index.vue",
            "/app/pages/login.php",
            "/app/other/index.vue",
            "/app/pages/blog/[slug].vue",
        ]);

        let listed = source.list(Path::new("/app/pages"), "vue");
        assert_eq!(
            listed,
            vec![
                PathBuf::from("/app/pages/blog/[slug].vue"),
                PathBuf::from("/app/pages/index.vue"),
            ]
        );
    }

    #[test]
    fn test_insert_and_remove() {
        let mut source = MemorySource::new();
        assert!(source.insert("/p/a.vue"));
        assert!(!source.insert("/p/a.vue"));
        assert!(source.remove(Path::new("/p/a.vue")));
        assert!(!source.exists(Path::new("/p/a.vue")));
    }
}
