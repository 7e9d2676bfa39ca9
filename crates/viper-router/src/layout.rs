//! Layout chain resolution
//!
//! Walks a page's directory from the pages root down to the page's own
//! directory and picks up the `_layout` file of every level that has one.
//! A missing layout at some level is normal and simply adds nothing.

use std::path::PathBuf;

use crate::error::Result;
use crate::page::{is_layout, relative_dir, LayoutChain};
use crate::path::DirectoryAncestors;
use crate::registry::PageRegistry;
use crate::route::{parse_segments, LAYOUT_STEM};
use crate::source::PageSource;

/// Relative paths of every layout file that could wrap `relative_path`,
/// root-most first
///
/// # Examples
///
/// ```
/// use viper_router::layout::layout_candidates;
///
/// assert_eq!(
///     layout_candidates("(auth)/login.vue", "vue"),
///     vec!["_layout.vue", "(auth)/_layout.vue"]
/// );
/// ```
pub fn layout_candidates(relative_path: &str, extension: &str) -> Vec<String> {
    let file_name = format!("{}.{}", LAYOUT_STEM, extension);

    DirectoryAncestors::new(relative_dir(relative_path))
        .map(|dir| {
            if dir.is_empty() {
                file_name.clone()
            } else {
                format!("{}/{}", dir, file_name)
            }
        })
        .collect()
}

/// Resolves the layout chain of the page at `relative_path`
///
/// Layout nodes are resolved through the registry, so repeated lookups
/// return the same handles. A layout file gets an empty chain: it never
/// wraps itself, and ancestor layouts only nest it inside the route tree.
pub fn resolve_chain(
    registry: &mut PageRegistry,
    relative_path: &str,
    source: &dyn PageSource,
) -> Result<LayoutChain> {
    let mut chain = LayoutChain::default();

    if is_layout(&parse_segments(relative_path)?) {
        return Ok(chain);
    }

    for candidate in layout_candidates(relative_path, registry.extension()) {
        let absolute = absolute_under(registry, &candidate);
        if source.exists(&absolute) {
            chain.push(registry.resolve(&absolute, source)?);
        }
    }

    Ok(chain)
}

fn absolute_under(registry: &PageRegistry, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(registry.pages_root().to_path_buf(), |path, part| path.join(part))
}
