// File: src/source.rs
// Purpose: Page listing and existence checks against the real filesystem

use std::path::{Path, PathBuf};

use viper_router::PageSource;
use walkdir::WalkDir;

/// `PageSource` over the disk
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSource;

impl PageSource for DiskSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some(extension))
            .map(|e| e.into_path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("(auth)")).unwrap();
        fs::write(root.join("index.vue"), "").unwrap();
        fs::write(root.join("(auth)/login.vue"), "").unwrap();
        fs::write(root.join("(auth)/login.php"), "").unwrap();

        let listed = DiskSource.list(root, "vue");
        assert_eq!(listed, vec![root.join("(auth)/login.vue"), root.join("index.vue")]);
        assert!(DiskSource.exists(&root.join("index.vue")));
        assert!(!DiskSource.exists(&root.join("(auth)")));
    }

    #[test]
    fn test_missing_root_lists_nothing() {
        assert!(DiskSource.list(Path::new("/definitely/not/here"), "vue").is_empty());
    }
}
