//! Server-side route table
//!
//! One registration per page (layouts are never routable), answering both
//! `GET` (page load) and `POST` (action calls) on the Laravel-style path.

use std::collections::HashMap;

use serde::Serialize;

use crate::aggregate::aggregate;
use crate::error::{Result, RouteError};
use crate::metadata::MetadataProvider;
use crate::page::PageId;
use crate::registry::PageRegistry;
use crate::route::RouterTarget;
use crate::tree::sort_by_specificity;

/// HTTP methods every page route answers
pub const PAGE_METHODS: [&str; 2] = ["GET", "POST"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRegistration {
    pub path: String,
    pub methods: Vec<String>,
    /// Merged route name; empty when the page is unnamed
    pub name: String,
    pub middleware: Vec<String>,
    /// Catch-all parameter, matched against `.*` so it may span slashes
    pub wildcard: Option<String>,
    pub component: String,
    pub relative_path: String,
}

/// Builds the server route table in registration order
///
/// # Errors
///
/// `DuplicateRoute` when two pages match the same server path, such as
/// `about.vue` and `about/index.vue`, `(a)/x.vue` and `(b)/x.vue`, or
/// `posts/[id].vue` and `posts/[slug].vue`.
pub fn route_table(
    registry: &PageRegistry,
    pages: &[PageId],
    metadata: &dyn MetadataProvider,
) -> Result<Vec<RouteRegistration>> {
    let mut ordered: Vec<PageId> = pages
        .iter()
        .copied()
        .filter(|id| registry.get(*id).map(|n| !n.is_layout()).unwrap_or(false))
        .collect();
    sort_by_specificity(registry, &mut ordered);

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut table = Vec::with_capacity(ordered.len());

    for id in ordered {
        let (Some(node), Some(merged)) = (registry.get(id), aggregate(registry, id, metadata)) else {
            continue;
        };
        let path = node.route_path(RouterTarget::Laravel).to_string();

        if let Some(first) = seen.get(node.route_shape()) {
            return Err(RouteError::DuplicateRoute {
                path,
                first: first.clone(),
                second: node.component_name().to_string(),
            });
        }
        seen.insert(
            node.route_shape().to_string(),
            node.component_name().to_string(),
        );

        table.push(RouteRegistration {
            path,
            methods: PAGE_METHODS.iter().map(|m| m.to_string()).collect(),
            name: merged.route_name,
            middleware: merged.middleware,
            wildcard: node.wildcard_name().map(str::to_string),
            component: node.component_name().to_string(),
            relative_path: node.relative_path().to_string(),
        });
    }

    Ok(table)
}
