//! Nested route configuration for client-side routers
//!
//! Pages hang below the layouts that wrap them. Every node's path is
//! relative to its parent, the way nested router configs expect child
//! paths; joining the paths from root to leaf gives the page's full path.

use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::page::{PageId, PageNode};
use crate::path::{normalize_route_path, trim_route_path};
use crate::registry::PageRegistry;
use crate::route::{compare_specificity, RouterTarget};

/// Sorts pages into registration order
///
/// Static routes come first, then dynamic ones, then catch-alls; ties go
/// to the shorter relative path. Stale handles are dropped.
pub fn sort_by_specificity(registry: &PageRegistry, pages: &mut Vec<PageId>) {
    pages.retain(|id| registry.get(*id).is_some());
    pages.sort_by(|a, b| match (registry.get(*a), registry.get(*b)) {
        (Some(a), Some(b)) => compare_specificity(
            (a.specificity(), a.relative_path()),
            (b.specificity(), b.relative_path()),
        ),
        _ => std::cmp::Ordering::Equal,
    });
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTreeNode {
    /// Path relative to the parent node; empty for pathless layouts and
    /// default children
    pub path: String,
    pub component: String,
    /// Page file relative to the pages root, for imports
    pub relative_file: String,
    /// The default child route of its parent
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,
    #[serde(skip)]
    pub is_layout: bool,
    /// Parameter-erased `path`, compared to detect colliding siblings
    #[serde(skip)]
    shape: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteTreeNode>,
}

impl RouteTreeNode {
    fn layout(path: String, shape: String, node: &PageNode) -> Self {
        Self {
            path,
            shape,
            component: node.component_name().to_string(),
            relative_file: node.relative_path().to_string(),
            index: false,
            is_layout: true,
            children: Vec::new(),
        }
    }

    fn page(path: String, shape: String, node: &PageNode) -> Self {
        Self {
            index: node.is_index() && path.is_empty(),
            path,
            shape,
            component: node.component_name().to_string(),
            relative_file: node.relative_path().to_string(),
            is_layout: false,
            children: Vec::new(),
        }
    }
}

/// Finds the layout node among `siblings`, inserting it if missing
fn find_or_insert_layout<'a>(
    siblings: &'a mut Vec<RouteTreeNode>,
    candidate: RouteTreeNode,
) -> &'a mut RouteTreeNode {
    let position = siblings.iter().position(|n| {
        n.is_layout && n.component == candidate.component && n.path == candidate.path
    });

    let position = match position {
        Some(position) => position,
        None => {
            siblings.push(candidate);
            siblings.len() - 1
        }
    };
    &mut siblings[position]
}

/// `full` relative to `ancestor`, both already trimmed of `/`
fn relative_to(full: &str, ancestor: &str) -> String {
    if ancestor.is_empty() {
        return full.to_string();
    }
    if full == ancestor {
        return String::new();
    }
    full.strip_prefix(ancestor)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(full)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTree {
    target: RouterTarget,
    routes: Vec<RouteTreeNode>,
}

impl RouteTree {
    /// Builds the nested route config of `pages` for `target`
    ///
    /// Layout files in `pages` are skipped: layouts enter the tree only
    /// through the chains of the pages they wrap.
    ///
    /// # Errors
    ///
    /// `DuplicateRoute` when two pages land on the same path under the same
    /// parent, including paths that differ only in parameter names.
    pub fn build(registry: &PageRegistry, pages: &[PageId], target: RouterTarget) -> Result<Self> {
        let mut ordered: Vec<PageId> = pages
            .iter()
            .copied()
            .filter(|id| registry.get(*id).map(|n| !n.is_layout()).unwrap_or(false))
            .collect();
        sort_by_specificity(registry, &mut ordered);

        let mut tree = RouteTree {
            target,
            routes: Vec::new(),
        };
        for id in ordered {
            tree.insert(registry, id)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, registry: &PageRegistry, id: PageId) -> Result<()> {
        let Some(node) = registry.get(id) else {
            return Ok(());
        };
        let target = self.target;
        let full = trim_route_path(node.route_path(target));
        let full_shape = trim_route_path(node.route_shape());

        let mut siblings = &mut self.routes;
        let mut ancestor = "";
        let mut ancestor_shape = "";

        for layout in registry.chain(id) {
            let layout_full = trim_route_path(layout.route_path(target));
            let layout_shape = trim_route_path(layout.route_shape());
            let candidate = RouteTreeNode::layout(
                relative_to(layout_full, ancestor),
                relative_to(layout_shape, ancestor_shape),
                layout,
            );
            siblings = &mut find_or_insert_layout(siblings, candidate).children;
            ancestor = layout_full;
            ancestor_shape = layout_shape;
        }

        let path = relative_to(full, ancestor);
        let shape = relative_to(full_shape, ancestor_shape);
        if let Some(existing) = siblings.iter().find(|n| !n.is_layout && n.shape == shape) {
            return Err(RouteError::DuplicateRoute {
                path: node.route_path(target).to_string(),
                first: existing.component.clone(),
                second: node.component_name().to_string(),
            });
        }

        siblings.push(RouteTreeNode::page(path, shape, node));
        Ok(())
    }

    pub fn target(&self) -> RouterTarget {
        self.target
    }

    pub fn routes(&self) -> &[RouteTreeNode] {
        &self.routes
    }

    /// `(component, full path)` of every page, depth first
    ///
    /// Full paths are rebuilt by joining node paths from the root, so they
    /// match the page's own formatted path.
    pub fn full_paths(&self) -> Vec<(String, String)> {
        fn walk(nodes: &[RouteTreeNode], prefix: &str, out: &mut Vec<(String, String)>) {
            for node in nodes {
                let joined = match (prefix.is_empty(), node.path.is_empty()) {
                    (true, _) => node.path.clone(),
                    (false, true) => prefix.to_string(),
                    (false, false) => format!("{}/{}", prefix, node.path),
                };
                if node.is_layout {
                    walk(&node.children, &joined, out);
                } else {
                    out.push((
                        node.component.clone(),
                        normalize_route_path(&joined).into_owned(),
                    ));
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.routes, "", &mut out);
        out
    }

    /// Number of page (non-layout) nodes
    pub fn page_count(&self) -> usize {
        self.full_paths().len()
    }
}
