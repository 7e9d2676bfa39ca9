//! Page registry for one discovery/build session
//!
//! Owns every `PageNode`, one per distinct absolute path. Nodes are created
//! lazily on first resolution and handed out as `PageId` handles. There is
//! no global instance: each session constructs and owns its registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, RouteError};
use crate::layout::resolve_chain;
use crate::page::{PageId, PageNode};
use crate::path::to_slash_path;
use crate::route::{parse_segments, LAYOUT_STEM};
use crate::source::PageSource;

/// Arena slot; the generation is bumped every time the slot is freed
#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<PageNode>,
}

#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages_root: PathBuf,
    extension: String,
    slots: Vec<Slot>,
    /// Freed slots, reused before the arena grows
    free: Vec<usize>,
    by_path: HashMap<PathBuf, PageId>,
}

impl PageRegistry {
    /// Creates an empty registry for pages below `pages_root` with the
    /// component file `extension` (`vue`, `tsx`, ...)
    pub fn new(pages_root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            pages_root: pages_root.into(),
            extension: extension.trim_start_matches('.').to_string(),
            slots: Vec::new(),
            free: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `_layout.<extension>`
    pub fn layout_file_name(&self) -> String {
        format!("{}.{}", LAYOUT_STEM, self.extension)
    }

    /// Path of `absolute_path` below the pages root, `/`-separated
    pub fn relative_path_of(&self, absolute_path: &Path) -> Result<String> {
        absolute_path
            .strip_prefix(&self.pages_root)
            .ok()
            .and_then(to_slash_path)
            .filter(|relative| !relative.is_empty())
            .ok_or_else(|| RouteError::OutsidePagesRoot {
                path: absolute_path.to_path_buf(),
            })
    }

    /// Returns the node for `absolute_path`, building it (and its layout
    /// chain) on first use
    ///
    /// # Errors
    ///
    /// `MalformedPath` when the relative path does not parse,
    /// `OutsidePagesRoot` when the file is not below the pages root.
    pub fn resolve(&mut self, absolute_path: &Path, source: &dyn PageSource) -> Result<PageId> {
        if let Some(id) = self.by_path.get(absolute_path) {
            return Ok(*id);
        }

        let relative = self.relative_path_of(absolute_path)?;
        let segments = parse_segments(&relative)?;
        let layouts = resolve_chain(self, &relative, source)?;

        let node = PageNode::new(absolute_path.to_path_buf(), relative, segments, layouts);
        let id = self.store(node);
        self.by_path.insert(absolute_path.to_path_buf(), id);
        Ok(id)
    }

    fn store(&mut self, node: PageNode) -> PageId {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let entry = &mut self.slots[slot];
        entry.node = Some(node);
        PageId {
            slot,
            generation: entry.generation,
        }
    }

    pub fn lookup(&self, absolute_path: &Path) -> Option<PageId> {
        self.by_path.get(absolute_path).copied()
    }

    pub fn get(&self, id: PageId) -> Option<&PageNode> {
        self.slots
            .get(id.slot)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_ref())
    }

    /// Live nodes in slot order
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &PageNode)> {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.node.as_ref().map(|node| {
                let id = PageId {
                    slot,
                    generation: entry.generation,
                };
                (id, node)
            })
        })
    }

    /// Number of arena slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Layout nodes wrapping `id`, root-most first
    pub fn chain(&self, id: PageId) -> Vec<&PageNode> {
        self.get(id)
            .map(|node| node.layouts().iter().filter_map(|l| self.get(l)).collect())
            .unwrap_or_default()
    }

    /// Drops whatever depends on the file at `absolute_path`
    ///
    /// The node for the file itself goes. When the file is a layout (whether
    /// it was registered, was just created or was just deleted), every page
    /// below its directory goes too, since their chains change. Returns the
    /// dropped absolute paths, sorted.
    pub fn invalidate(&mut self, absolute_path: &Path) -> Vec<PathBuf> {
        let mut removed = Vec::new();

        if self.remove(absolute_path) {
            removed.push(absolute_path.to_path_buf());
        }

        let is_layout_file = absolute_path
            .file_name()
            .map(|name| name.to_string_lossy() == self.layout_file_name())
            .unwrap_or(false);

        if is_layout_file {
            if let Ok(relative) = self.relative_path_of(absolute_path) {
                let dir = crate::page::relative_dir(&relative).to_string();
                let affected: Vec<PathBuf> = self
                    .pages()
                    .filter(|(_, node)| !node.is_layout() && in_subtree(node.relative_path(), &dir))
                    .map(|(_, node)| node.absolute_path().to_path_buf())
                    .collect();

                for path in affected {
                    if self.remove(&path) {
                        removed.push(path);
                    }
                }
            }
        }

        removed.sort();
        removed
    }

    fn remove(&mut self, absolute_path: &Path) -> bool {
        match self.by_path.remove(absolute_path) {
            Some(id) => {
                if let Some(entry) = self.slots.get_mut(id.slot) {
                    entry.node = None;
                    entry.generation = entry.generation.wrapping_add(1);
                    self.free.push(id.slot);
                }
                true
            }
            None => false,
        }
    }
}

fn in_subtree(relative_path: &str, dir: &str) -> bool {
    dir.is_empty()
        || relative_path
            .strip_prefix(dir)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::from_files([
            "/p/_layout.vue",
            "/p/index.vue",
            "/p/(auth)/_layout.vue",
            "/p/(auth)/login.vue",
            "/p/blog/[slug].vue",
        ])
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");

        let first = registry.resolve(Path::new("/p/(auth)/login.vue"), &source).unwrap();
        let second = registry.resolve(Path::new("/p/(auth)/login.vue"), &source).unwrap();
        assert_eq!(first, second);
        // login + both layouts
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_layouts_are_shared_between_pages() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");

        let login = registry.resolve(Path::new("/p/(auth)/login.vue"), &source).unwrap();
        let index = registry.resolve(Path::new("/p/index.vue"), &source).unwrap();

        let login_root = registry.get(login).unwrap().layouts().ids()[0];
        let index_root = registry.get(index).unwrap().layouts().ids()[0];
        assert_eq!(login_root, index_root);
    }

    #[test]
    fn test_outside_root() {
        let mut registry = PageRegistry::new("/p", "vue");
        let err = registry
            .resolve(Path::new("/elsewhere/a.vue"), &MemorySource::new())
            .unwrap_err();
        assert!(matches!(err, RouteError::OutsidePagesRoot { .. }));
    }

    #[test]
    fn test_malformed_is_not_registered() {
        let mut registry = PageRegistry::new("/p", "vue");
        let result = registry.resolve(Path::new("/p/[].vue"), &MemorySource::new());
        assert!(matches!(result, Err(RouteError::MalformedPath { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalidate_page_only() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");
        let id = registry.resolve(Path::new("/p/blog/[slug].vue"), &source).unwrap();

        let removed = registry.invalidate(Path::new("/p/blog/[slug].vue"));
        assert_eq!(removed, vec![PathBuf::from("/p/blog/[slug].vue")]);
        assert!(registry.get(id).is_none());
        // the root layout is still there
        assert!(registry.lookup(Path::new("/p/_layout.vue")).is_some());
    }

    #[test]
    fn test_invalidate_layout_drops_subtree_pages() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");
        registry.resolve(Path::new("/p/(auth)/login.vue"), &source).unwrap();
        registry.resolve(Path::new("/p/index.vue"), &source).unwrap();

        let removed = registry.invalidate(Path::new("/p/(auth)/_layout.vue"));
        assert_eq!(
            removed,
            vec![
                PathBuf::from("/p/(auth)/_layout.vue"),
                PathBuf::from("/p/(auth)/login.vue"),
            ]
        );
        assert!(registry.lookup(Path::new("/p/index.vue")).is_some());
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");
        let login = Path::new("/p/(auth)/login.vue");
        registry.resolve(login, &source).unwrap();
        registry.resolve(Path::new("/p/index.vue"), &source).unwrap();
        let capacity = registry.capacity();

        for _ in 0..10 {
            registry.invalidate(Path::new("/p/_layout.vue"));
            registry.resolve(login, &source).unwrap();
            registry.resolve(Path::new("/p/index.vue"), &source).unwrap();
        }

        assert_eq!(registry.capacity(), capacity);
        assert_eq!(registry.len(), capacity);
        assert_eq!(registry.pages().count(), capacity);
    }

    #[test]
    fn test_stale_handle_misses_reused_slot() {
        let source = source();
        let mut registry = PageRegistry::new("/p", "vue");
        let stale = registry.resolve(Path::new("/p/blog/[slug].vue"), &source).unwrap();
        registry.invalidate(Path::new("/p/blog/[slug].vue"));

        let fresh = registry.resolve(Path::new("/p/index.vue"), &source).unwrap();
        assert_ne!(stale, fresh);
        assert!(registry.get(stale).is_none());
        assert_eq!(registry.get(fresh).unwrap().relative_path(), "index.vue");
    }

    #[test]
    fn test_new_layout_reresolves_chain() {
        let mut source = MemorySource::from_files(["/p/blog/post.vue"]);
        let mut registry = PageRegistry::new("/p", "vue");
        let before = registry.resolve(Path::new("/p/blog/post.vue"), &source).unwrap();
        assert!(registry.get(before).unwrap().layouts().is_empty());

        source.insert("/p/blog/_layout.vue");
        let removed = registry.invalidate(Path::new("/p/blog/_layout.vue"));
        assert_eq!(removed, vec![PathBuf::from("/p/blog/post.vue")]);

        let after = registry.resolve(Path::new("/p/blog/post.vue"), &source).unwrap();
        assert_eq!(registry.get(after).unwrap().layouts().len(), 1);
    }
}
