//! Rendering of parsed segments into router-specific path syntax
//!
//! Formatting is a fold over the segments; the same segments always render
//! the same string for a given target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::segment::{PathSegment, SegmentKind};
use crate::path::{normalize_route_path, to_pascal_case};

/// The router a formatted path is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterTarget {
    /// Server side: `{id}`, trailing wildcard `{slug?}`
    Laravel,
    /// vue-router: `:id`, trailing wildcard `:slug(.*)*`
    Vue,
    /// react-router: `:id`, trailing wildcard `*`
    React,
}

impl RouterTarget {
    pub const ALL: [RouterTarget; 3] = [RouterTarget::Laravel, RouterTarget::Vue, RouterTarget::React];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouterTarget::Laravel => "laravel",
            RouterTarget::Vue => "vue",
            RouterTarget::React => "react",
        }
    }

    fn dynamic(&self, name: &str) -> String {
        match self {
            RouterTarget::Laravel => format!("{{{}}}", name),
            RouterTarget::Vue | RouterTarget::React => format!(":{}", name),
        }
    }

    fn catch_all(&self, name: &str) -> String {
        match self {
            RouterTarget::Laravel => format!("{{{}?}}", name),
            RouterTarget::Vue => format!(":{}(.*)*", name),
            RouterTarget::React => "*".to_string(),
        }
    }
}

impl fmt::Display for RouterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouterTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "laravel" => Ok(RouterTarget::Laravel),
            "vue" => Ok(RouterTarget::Vue),
            "react" => Ok(RouterTarget::React),
            other => Err(format!("unknown router target `{}`", other)),
        }
    }
}

/// Fold accumulator for path formatting
#[derive(Default)]
struct FormatState {
    pattern: String,
}

impl FormatState {
    fn with_component(mut self, component: &str) -> Self {
        self.pattern.push('/');
        self.pattern.push_str(component);
        self
    }

    fn finalize(self) -> String {
        normalize_route_path(&self.pattern).into_owned()
    }
}

fn process_segment(state: FormatState, segment: &PathSegment, target: RouterTarget) -> FormatState {
    match segment.kind() {
        SegmentKind::Static => state.with_component(segment.raw()),
        SegmentKind::Dynamic => state.with_component(&target.dynamic(segment.name())),
        SegmentKind::CatchAll => state.with_component(&target.catch_all(segment.name())),
        SegmentKind::Group | SegmentKind::Layout | SegmentKind::Index => state,
    }
}

/// Formats segments as a route path for `target`
///
/// The result never has a leading or trailing `/`, except for the root
/// which is exactly `/`.
///
/// # Examples
///
/// ```
/// use viper_router::route::{format_route_path, parse_segments, RouterTarget};
///
/// let segments = parse_segments("(auth)/users/[user-id]/edit.vue").unwrap();
/// assert_eq!(format_route_path(&segments, RouterTarget::Laravel), "users/{userId}/edit");
/// assert_eq!(format_route_path(&segments, RouterTarget::Vue), "users/:userId/edit");
/// ```
pub fn format_route_path(segments: &[PathSegment], target: RouterTarget) -> String {
    segments
        .iter()
        .fold(FormatState::default(), |state, segment| {
            process_segment(state, segment, target)
        })
        .finalize()
}

/// Parameter-erased form of the route path, the same for every target
///
/// Two pages with equal shapes match the same URLs no matter how their
/// parameters are named: `posts/[id]` and `posts/[slug]` both give
/// `posts/{}`, a catch-all gives `{*}`.
///
/// # Examples
///
/// ```
/// use viper_router::route::{parse_segments, route_shape};
///
/// let id = parse_segments("posts/[id].vue").unwrap();
/// let slug = parse_segments("(blog)/posts/[slug].vue").unwrap();
/// assert_eq!(route_shape(&id), "posts/{}");
/// assert_eq!(route_shape(&id), route_shape(&slug));
/// ```
pub fn route_shape(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .fold(FormatState::default(), |state, segment| match segment.kind() {
            SegmentKind::Static => state.with_component(segment.raw()),
            SegmentKind::Dynamic => state.with_component("{}"),
            SegmentKind::CatchAll => state.with_component("{*}"),
            SegmentKind::Group | SegmentKind::Layout | SegmentKind::Index => state,
        })
        .finalize()
}

/// Derives the component identifier used in generated router code
///
/// `(auth)/users/[user]/_layout` → `AuthGroupUsersUserParamLayout`
pub fn component_name(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment.kind() {
            SegmentKind::Group => format!("{}Group", to_pascal_case(segment.name())),
            SegmentKind::Dynamic | SegmentKind::CatchAll => {
                format!("{}Param", to_pascal_case(segment.name()))
            }
            SegmentKind::Layout => "Layout".to_string(),
            SegmentKind::Index => "Index".to_string(),
            SegmentKind::Static => to_pascal_case(segment.raw()),
        })
        .collect()
}

/// Normalized names of every parameter, in path order
pub fn route_parameters(segments: &[PathSegment]) -> Vec<String> {
    segments
        .iter()
        .filter(|s| s.is_parameter())
        .map(|s| s.name().to_string())
        .collect()
}

/// Normalized name of the catch-all parameter, if there is one
pub fn wildcard_name(segments: &[PathSegment]) -> Option<&str> {
    segments
        .iter()
        .find(|s| s.kind() == SegmentKind::CatchAll)
        .map(|s| s.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::parse_segments;

    fn format(path: &str, target: RouterTarget) -> String {
        format_route_path(&parse_segments(path).unwrap(), target)
    }

    #[test]
    fn test_static_passes_through() {
        for target in RouterTarget::ALL {
            assert_eq!(format("about/team.vue", target), "about/team");
        }
    }

    #[test]
    fn test_layout_contributes_nothing() {
        assert_eq!(format("users/_layout.vue", RouterTarget::Vue), "users");
        assert_eq!(format("_layout.vue", RouterTarget::Laravel), "/");
    }

    #[test]
    fn test_nested_index_has_no_trailing_slash() {
        assert_eq!(format("users/index.vue", RouterTarget::Laravel), "users");
        assert_eq!(format("(admin)/index.vue", RouterTarget::React), "/");
    }

    #[test]
    fn test_dynamic_per_target() {
        assert_eq!(format("posts/[id].vue", RouterTarget::Laravel), "posts/{id}");
        assert_eq!(format("posts/[id].vue", RouterTarget::Vue), "posts/:id");
        assert_eq!(format("posts/[id].vue", RouterTarget::React), "posts/:id");
    }

    #[test]
    fn test_catch_all_per_target() {
        assert_eq!(format("blog/[...slug].vue", RouterTarget::Laravel), "blog/{slug?}");
        assert_eq!(format("blog/[...slug].vue", RouterTarget::Vue), "blog/:slug(.*)*");
        assert_eq!(format("blog/[...slug].vue", RouterTarget::React), "blog/*");
    }

    #[test]
    fn test_component_name() {
        let name = |p: &str| component_name(&parse_segments(p).unwrap());
        assert_eq!(name("(auth)/login.vue"), "AuthGroupLogin");
        assert_eq!(name("index.vue"), "Index");
        assert_eq!(name("_layout.vue"), "Layout");
        assert_eq!(name("blog/[...slug].vue"), "BlogSlugParam");
        assert_eq!(name("auth/verify-token/[token].vue"), "AuthVerifyTokenTokenParam");
    }

    #[test]
    fn test_parameters_and_wildcard() {
        let segments = parse_segments("shop/[category-id]/[...rest].vue").unwrap();
        assert_eq!(route_parameters(&segments), vec!["categoryId", "rest"]);
        assert_eq!(wildcard_name(&segments), Some("rest"));

        let segments = parse_segments("posts/[id].vue").unwrap();
        assert_eq!(wildcard_name(&segments), None);
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("Vue".parse::<RouterTarget>(), Ok(RouterTarget::Vue));
        assert!("angular".parse::<RouterTarget>().is_err());
        assert_eq!(RouterTarget::React.to_string(), "react");
    }
}
