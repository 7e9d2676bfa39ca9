//! Merging of declarations along a layout chain
//!
//! A page sees everything its layouts declare. Declarations are visited
//! root-most layout first and the page itself last:
//!
//! - props and actions: keyed by name, the closest declaration wins
//! - middleware: concatenated, duplicates kept
//! - route name: the fragments joined, but only if the page names itself

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::metadata::{MemberDecl, MetadataProvider, PageMetadata};
use crate::page::{PageId, PageNode};
use crate::registry::PageRegistry;

/// Stable identifier of a member
///
/// Derived from where the member is declared and what it is called, never
/// from what it returns. Editing a prop's body keeps its identifier;
/// renaming it or moving it to another file changes it.
///
/// # Examples
///
/// ```
/// use viper_router::aggregate::member_identifier;
///
/// let a = member_identifier("pages/a.vue", "user");
/// assert_eq!(a, member_identifier("pages/a.vue", "user"));
/// assert_ne!(a, member_identifier("pages/b.vue", "user"));
/// assert_eq!(a.len(), 64);
/// ```
pub fn member_identifier(file: &str, name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A merged prop or action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberEntry {
    pub name: String,
    pub id: String,
    /// Binding parameter names, first occurrence order, no duplicates
    pub bindings: Vec<String>,
    pub lazy: bool,
    /// Relative path of the page or layout that declares it
    pub declared_in: String,
    #[serde(skip)]
    pub page: PageId,
}

pub type PropEntry = MemberEntry;
pub type ActionEntry = MemberEntry;

impl MemberEntry {
    fn from_decl(decl: &MemberDecl, page: PageId, node: &PageNode) -> Self {
        let mut bindings: Vec<String> = Vec::with_capacity(decl.bindings.len());
        for binding in &decl.bindings {
            if !bindings.contains(binding) {
                bindings.push(binding.clone());
            }
        }

        Self {
            name: decl.name.clone(),
            id: member_identifier(&decl.location.file, &decl.name),
            bindings,
            lazy: decl.lazy,
            declared_in: node.relative_path().to_string(),
            page,
        }
    }
}

/// Members keyed by name, in first-declared order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemberSet {
    entries: Vec<MemberEntry>,
}

pub type PropSet = MemberSet;
pub type ActionSet = MemberSet;

impl MemberSet {
    /// Inserts, or replaces the same-named entry in place
    pub fn upsert(&mut self, entry: MemberEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MemberEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// `(name, identifier)` pairs, the payload a client cache keys on
    pub fn identifiers(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.id.as_str()))
            .collect()
    }

    /// Keeps only the named members, for partial reloads
    ///
    /// An empty filter keeps everything.
    pub fn only(&self, names: &[&str]) -> MemberSet {
        if names.is_empty() {
            return self.clone();
        }
        MemberSet {
            entries: self
                .entries
                .iter()
                .filter(|e| names.contains(&e.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Members evaluated on the initial page load
    pub fn eager(&self) -> impl Iterator<Item = &MemberEntry> {
        self.entries.iter().filter(|e| !e.lazy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A page's declarations merged with its layouts'
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedPage {
    pub props: PropSet,
    pub actions: ActionSet,
    pub middleware: Vec<String>,
    /// Empty unless the page itself declares a name fragment
    pub route_name: String,
    /// The page's own title; layouts do not contribute
    pub title: String,
}

/// Merges the declarations of `page` and its layout chain
///
/// Returns `None` for a stale handle.
pub fn aggregate(
    registry: &PageRegistry,
    page: PageId,
    metadata: &dyn MetadataProvider,
) -> Option<MergedPage> {
    let node = registry.get(page)?;

    let visits: Vec<(PageId, &PageNode, PageMetadata)> = node
        .layouts()
        .iter()
        .chain(std::iter::once(page))
        .filter_map(|id| registry.get(id).map(|n| (id, n)))
        .map(|(id, n)| (id, n, metadata.metadata(n).unwrap_or_default()))
        .collect();

    let mut merged = MergedPage::default();
    let mut fragments = Vec::with_capacity(visits.len());

    for (id, visited, declared) in &visits {
        for decl in declared.props() {
            merged.props.upsert(MemberEntry::from_decl(decl, *id, visited));
        }
        for decl in declared.actions() {
            merged.actions.upsert(MemberEntry::from_decl(decl, *id, visited));
        }
        merged.middleware.extend(declared.middleware.iter().cloned());
        fragments.push(declared.name_fragment().unwrap_or(""));
    }

    // The page opts into naming only by declaring its own fragment
    if let Some((_, _, own)) = visits.last() {
        if own.name_fragment().is_some() {
            merged.route_name = fragments.concat();
        }
        merged.title = own.title.clone().unwrap_or_default();
    }

    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{SourceLocation, StaticMetadata};
    use crate::source::MemorySource;
    use std::path::Path;

    fn setup() -> (PageRegistry, PageId) {
        let source = MemorySource::from_files([
            "/p/_layout.vue",
            "/p/(auth)/_layout.vue",
            "/p/(auth)/login.vue",
        ]);
        let mut registry = PageRegistry::new("/p", "vue");
        let login = registry
            .resolve(Path::new("/p/(auth)/login.vue"), &source)
            .unwrap();
        (registry, login)
    }

    fn declares(file: &str, props: &[&str]) -> PageMetadata {
        PageMetadata {
            members: props
                .iter()
                .map(|p| MemberDecl::prop(*p, SourceLocation::new(file)))
                .collect(),
            ..PageMetadata::default()
        }
    }

    #[test]
    fn test_closest_declaration_wins_in_place() {
        let (registry, login) = setup();
        let metadata = StaticMetadata::new()
            .with("_layout.vue", declares("_layout.vue", &["x", "user"]))
            .with("(auth)/_layout.vue", declares("(auth)/_layout.vue", &["x"]));

        let merged = aggregate(&registry, login, &metadata).unwrap();
        assert_eq!(merged.props.names(), vec!["x", "user"]);
        assert_eq!(merged.props.get("x").unwrap().declared_in, "(auth)/_layout.vue");
        assert_eq!(merged.props.get("user").unwrap().declared_in, "_layout.vue");
    }

    #[test]
    fn test_bindings_deduplicated() {
        let (registry, login) = setup();
        let metadata = StaticMetadata::new().with(
            "(auth)/login.vue",
            PageMetadata {
                members: vec![MemberDecl::action("submit", SourceLocation::new("login.vue"))
                    .with_bindings(["team", "user", "team"])],
                ..PageMetadata::default()
            },
        );

        let merged = aggregate(&registry, login, &metadata).unwrap();
        assert_eq!(merged.actions.get("submit").unwrap().bindings, vec!["team", "user"]);
        assert!(merged.props.is_empty());
    }

    #[test]
    fn test_route_name_requires_leaf_fragment() {
        let (registry, login) = setup();
        let named = |name: &str| PageMetadata {
            name: Some(name.to_string()),
            ..PageMetadata::default()
        };

        let metadata = StaticMetadata::new().with("(auth)/_layout.vue", named("auth."));
        let merged = aggregate(&registry, login, &metadata).unwrap();
        assert_eq!(merged.route_name, "");

        let metadata = metadata.with("(auth)/login.vue", named("login"));
        let merged = aggregate(&registry, login, &metadata).unwrap();
        assert_eq!(merged.route_name, "auth.login");
    }

    #[test]
    fn test_only_and_eager() {
        let mut set = MemberSet::default();
        for (name, lazy) in [("a", false), ("b", true), ("c", false)] {
            set.upsert(MemberEntry {
                name: name.to_string(),
                id: member_identifier("f", name),
                bindings: Vec::new(),
                lazy,
                declared_in: "f".to_string(),
                page: PageId { slot: 0, generation: 0 },
            });
        }

        assert_eq!(set.only(&["c", "a"]).names(), vec!["a", "c"]);
        assert_eq!(set.only(&[]).len(), 3);
        let eager: Vec<&str> = set.eager().map(|e| e.name.as_str()).collect();
        assert_eq!(eager, vec!["a", "c"]);
    }

    #[test]
    fn test_stale_page() {
        let (mut registry, login) = setup();
        registry.invalidate(Path::new("/p/(auth)/login.vue"));
        assert!(aggregate(&registry, login, &StaticMetadata::new()).is_none());
    }
}
