//! Route module for file-based routing
//!
//! Contains pure functional components for route parsing and formatting:
//! - `segment`: file path → typed segments
//! - `format`: typed segments → router-specific path syntax
//! - `priority`: specificity scoring for registration order

pub mod format;
pub mod priority;
pub mod segment;

// Re-export commonly used types
pub use format::{
    component_name, format_route_path, route_parameters, route_shape, wildcard_name, RouterTarget,
};
pub use priority::{compare_specificity, specificity_score};
pub use segment::{
    classify_segment, parse_segments, strip_extension, PathSegment, SegmentKind, INDEX_STEM, LAYOUT_STEM,
};
