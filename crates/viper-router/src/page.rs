//! A routable file and everything derived from its path

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::route::{
    component_name, format_route_path, route_parameters, route_shape, specificity_score,
    wildcard_name, PathSegment, RouterTarget, SegmentKind,
};

/// Handle to a node owned by a `PageRegistry`
///
/// Handles do not keep nodes alive; after invalidation a stale handle simply
/// stops resolving, even once its slot holds another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

/// Ancestor layouts of a page, root-most first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutChain(Vec<PageId>);

impl LayoutChain {
    pub(crate) fn push(&mut self, id: PageId) {
        self.0.push(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[PageId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = PageId> + '_ {
        self.0.iter().copied()
    }
}

/// Formatted paths for every router target, computed once per node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePaths {
    pub laravel: String,
    pub vue: String,
    pub react: String,
}

impl RoutePaths {
    pub fn from_segments(segments: &[PathSegment]) -> Self {
        Self {
            laravel: format_route_path(segments, RouterTarget::Laravel),
            vue: format_route_path(segments, RouterTarget::Vue),
            react: format_route_path(segments, RouterTarget::React),
        }
    }

    pub fn get(&self, target: RouterTarget) -> &str {
        match target {
            RouterTarget::Laravel => &self.laravel,
            RouterTarget::Vue => &self.vue,
            RouterTarget::React => &self.react,
        }
    }
}

/// One discovered page or layout file
///
/// Immutable once built: every derived value is computed in the constructor.
#[derive(Debug, Clone)]
pub struct PageNode {
    absolute_path: PathBuf,
    relative_path: String,
    segments: Vec<PathSegment>,
    paths: RoutePaths,
    component_name: String,
    shape: String,
    specificity: usize,
    layouts: LayoutChain,
}

impl PageNode {
    pub(crate) fn new(
        absolute_path: PathBuf,
        relative_path: String,
        segments: Vec<PathSegment>,
        layouts: LayoutChain,
    ) -> Self {
        let paths = RoutePaths::from_segments(&segments);
        let component_name = component_name(&segments);
        let shape = route_shape(&segments);
        let specificity = specificity_score(&segments);

        Self {
            absolute_path,
            relative_path,
            segments,
            paths,
            component_name,
            shape,
            specificity,
            layouts,
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Path below the pages root, `/`-separated, extension included
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Directory part of `relative_path`; empty for files at the root
    pub fn relative_dir(&self) -> &str {
        relative_dir(&self.relative_path)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn route_path(&self, target: RouterTarget) -> &str {
        self.paths.get(target)
    }

    pub fn route_paths(&self) -> &RoutePaths {
        &self.paths
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// Parameter-erased path used to detect colliding routes
    pub fn route_shape(&self) -> &str {
        &self.shape
    }

    pub fn specificity(&self) -> usize {
        self.specificity
    }

    pub fn route_parameters(&self) -> Vec<String> {
        route_parameters(&self.segments)
    }

    pub fn wildcard_name(&self) -> Option<&str> {
        wildcard_name(&self.segments)
    }

    pub fn layouts(&self) -> &LayoutChain {
        &self.layouts
    }

    pub fn is_layout(&self) -> bool {
        is_layout(&self.segments)
    }

    pub fn is_index(&self) -> bool {
        self.segments.last().map(|s| s.kind()) == Some(SegmentKind::Index)
    }
}

pub(crate) fn is_layout(segments: &[PathSegment]) -> bool {
    segments.last().map(|s| s.kind()) == Some(SegmentKind::Layout)
}

/// `(auth)/login.vue` → `(auth)`, `index.vue` → ``
pub fn relative_dir(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::parse_segments;

    fn node(relative: &str) -> PageNode {
        PageNode::new(
            PathBuf::from("/pages").join(relative),
            relative.to_string(),
            parse_segments(relative).unwrap(),
            LayoutChain::default(),
        )
    }

    #[test]
    fn test_derived_values() {
        let page = node("users/[user]/edit.vue");
        assert_eq!(page.route_path(RouterTarget::Laravel), "users/{user}/edit");
        assert_eq!(page.route_path(RouterTarget::Vue), "users/:user/edit");
        assert_eq!(page.component_name(), "UsersUserParamEdit");
        assert_eq!(page.specificity(), 10);
        assert_eq!(page.route_parameters(), vec!["user"]);
        assert_eq!(page.relative_dir(), "users/[user]");
        assert!(!page.is_layout());
        assert!(!page.is_index());
    }

    #[test]
    fn test_layout_and_index_flags() {
        assert!(node("(auth)/_layout.vue").is_layout());
        assert!(node("blog/index.vue").is_index());
        assert_eq!(node("index.vue").relative_dir(), "");
    }
}
