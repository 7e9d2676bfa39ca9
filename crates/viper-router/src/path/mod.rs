//! Path utilities for formatted route paths and page file paths
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;
use std::path::{Component, Path};

pub mod case;
pub mod hierarchy;

pub use case::{to_camel_case, to_pascal_case};
pub use hierarchy::DirectoryAncestors;

/// Checks whether a formatted route path is already in canonical form
///
/// # Rules
///
/// - Root is exactly `/`
/// - Anything else has no leading or trailing `/`
/// - Never contains `//`
///
/// # Examples
///
/// ```
/// use viper_router::path::is_canonical_route_path;
///
/// assert!(is_canonical_route_path("/"));
/// assert!(is_canonical_route_path("posts/{id}"));
///
/// assert!(!is_canonical_route_path(""));
/// assert!(!is_canonical_route_path("/posts"));
/// assert!(!is_canonical_route_path("users/"));
/// assert!(!is_canonical_route_path("a//b"));
/// ```
pub fn is_canonical_route_path(path: &str) -> bool {
    if path == "/" {
        return true;
    }

    !path.is_empty() && !path.starts_with('/') && !path.ends_with('/') && !path.contains("//")
}

/// Canonicalizes a formatted route path
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// - Runs of `/` collapse to one
/// - Leading and trailing `/` are dropped
/// - An empty result becomes `/`
///
/// # Examples
///
/// ```
/// use viper_router::path::normalize_route_path;
///
/// assert_eq!(normalize_route_path("//login"), "login");
/// assert_eq!(normalize_route_path("users//edit/"), "users/edit");
/// assert_eq!(normalize_route_path(""), "/");
/// ```
pub fn normalize_route_path(path: &str) -> Cow<'_, str> {
    if is_canonical_route_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(normalized)
    }
}

/// Strips surrounding slashes, so root becomes the empty string
///
/// Nested router configs express child paths this way.
pub fn trim_route_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Renders a relative filesystem path with `/` separators
///
/// Returns `None` when the path climbs out (`..`) or is absolute.
pub fn to_slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_borrowed_when_canonical() {
        assert!(matches!(normalize_route_path("login"), Cow::Borrowed("login")));
        assert!(matches!(normalize_route_path("/"), Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize_route_path("a///b////c"), "a/b/c");
        assert_eq!(normalize_route_path("///"), "/");
    }

    #[test]
    fn test_trim_route_path() {
        assert_eq!(trim_route_path("/"), "");
        assert_eq!(trim_route_path("blog/:slug"), "blog/:slug");
    }

    #[test]
    fn test_to_slash_path() {
        let path: PathBuf = ["(auth)", "login.vue"].iter().collect();
        assert_eq!(to_slash_path(&path).as_deref(), Some("(auth)/login.vue"));
        assert_eq!(to_slash_path(Path::new("../x.vue")), None);
        assert_eq!(to_slash_path(Path::new("./a.vue")).as_deref(), Some("a.vue"));
    }
}
