//! Parsing of page file paths into typed segments
//!
//! Pure functional parsing of file-based route patterns into typed segments.
//! All functions are **pure**: same input → same output, no side effects.

use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::path::to_camel_case;

/// File name (without extension) that marks a layout
pub const LAYOUT_STEM: &str = "_layout";

/// File name (without extension) that marks a directory's default page
pub const INDEX_STEM: &str = "index";

/// What a single path component means to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Plain text, used verbatim: `about`
    Static,
    /// Route parameter: `[id]`
    Dynamic,
    /// Trailing wildcard: `[...slug]`
    CatchAll,
    /// Organizational folder, never part of a URL: `(auth)`
    Group,
    /// The `_layout` file of a directory
    Layout,
    /// The `index` file of a directory
    Index,
}

/// One parsed path component
///
/// # Examples
///
/// ```
/// use viper_router::route::{classify_segment, SegmentKind};
///
/// let seg = classify_segment("[...post-slug]", true).unwrap();
/// assert_eq!(seg.kind(), SegmentKind::CatchAll);
/// assert_eq!(seg.name(), "postSlug");
/// assert_eq!(seg.raw(), "[...post-slug]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathSegment {
    kind: SegmentKind,
    raw: String,
    name: String,
}

impl PathSegment {
    fn new(kind: SegmentKind, raw: &str, name: String) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
            name,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The component exactly as written in the file path
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized name: camelCase for parameters, the inner text for groups,
    /// the raw text otherwise
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, SegmentKind::Dynamic | SegmentKind::CatchAll)
    }
}

/// Classifies one path component (extension already stripped)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Group**: `(name)`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Layout**: `_layout`, final component only
/// 5. **Index**: `index`, final component only
/// 6. **Static**: any other text
///
/// Returns the reason text when the component is malformed.
pub fn classify_segment(component: &str, is_last: bool) -> std::result::Result<PathSegment, String> {
    if let Some(inner) = component
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        if inner.trim().is_empty() {
            return Err("empty group name `()`".to_string());
        }
        return Ok(PathSegment::new(SegmentKind::Group, component, inner.to_string()));
    }

    match component.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            let (kind, param) = match inner.strip_prefix("...") {
                Some(param) => (SegmentKind::CatchAll, param),
                None => (SegmentKind::Dynamic, inner),
            };
            let name = parameter_name(param)?;
            Ok(PathSegment::new(kind, component, name))
        }
        None if is_last && component == LAYOUT_STEM => Ok(PathSegment::new(
            SegmentKind::Layout,
            component,
            component.to_string(),
        )),
        None if is_last && component == INDEX_STEM => Ok(PathSegment::new(
            SegmentKind::Index,
            component,
            component.to_string(),
        )),
        None => Ok(PathSegment::new(
            SegmentKind::Static,
            component,
            component.to_string(),
        )),
    }
}

fn parameter_name(param: &str) -> std::result::Result<String, String> {
    if param.contains(&['[', ']', '/'][..]) {
        return Err(format!("invalid character in parameter name `{}`", param));
    }

    let name = to_camel_case(&param.replace("...", ""));
    if name.is_empty() {
        return Err("empty parameter name".to_string());
    }
    Ok(name)
}

/// Drops the extension of the final component: `login.vue` → `login`
///
/// Dots inside brackets are not an extension: `[...slug]` stays intact.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => file_name,
    }
}

/// Parses a path relative to the pages root into ordered segments
///
/// `\` is accepted as a separator and empty components are ignored.
///
/// # Errors
///
/// `MalformedPath` for an empty `[]`, `[...]` or `()`, and for a catch-all
/// followed by anything other than the `_layout` or `index` file.
///
/// # Examples
///
/// ```
/// use viper_router::route::{parse_segments, SegmentKind};
///
/// let segments = parse_segments("blog/[...slug].vue").unwrap();
/// let kinds: Vec<_> = segments.iter().map(|s| s.kind()).collect();
/// assert_eq!(kinds, vec![SegmentKind::Static, SegmentKind::CatchAll]);
///
/// assert!(parse_segments("docs/[...rest]/edit.vue").is_err());
/// ```
pub fn parse_segments(relative_path: &str) -> Result<Vec<PathSegment>> {
    let unified = relative_path.replace('\\', "/");
    let components: Vec<&str> = unified.split('/').filter(|s| !s.is_empty()).collect();
    let last = components.len().saturating_sub(1);

    let segments = components
        .iter()
        .enumerate()
        .map(|(i, &component)| {
            let component = if i == last {
                strip_extension(component)
            } else {
                component
            };
            classify_segment(component, i == last)
                .map_err(|reason| RouteError::malformed(relative_path, reason))
        })
        .collect::<Result<Vec<_>>>()?;

    check_catch_all_position(relative_path, &segments)?;
    Ok(segments)
}

fn check_catch_all_position(relative_path: &str, segments: &[PathSegment]) -> Result<()> {
    let Some(position) = segments
        .iter()
        .position(|s| s.kind() == SegmentKind::CatchAll)
    else {
        return Ok(());
    };

    let trailing_ok = segments[position + 1..]
        .iter()
        .all(|s| matches!(s.kind(), SegmentKind::Layout | SegmentKind::Index));

    if trailing_ok {
        Ok(())
    } else {
        Err(RouteError::malformed(
            relative_path,
            format!(
                "catch-all segment `{}` must be the last path segment",
                segments[position].raw()
            ),
        ))
    }
}
