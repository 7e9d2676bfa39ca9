//! # Viper Router
//!
//! File-based route resolution for server-driven single page apps. Every
//! page file below the pages root becomes a route, with support for:
//! - Static routes (`about.vue`)
//! - Dynamic parameters (`users/[id].vue`)
//! - Catch-all routes (`docs/[...slug].vue`)
//! - Route groups that never reach the URL (`(auth)/login.vue`)
//! - Nested layouts (`_layout.vue` at any directory level)
//!
//! One discovered page yields its path formatted for three routers:
//!
//! | file                  | Laravel        | Vue Router        | React Router |
//! |-----------------------|----------------|-------------------|--------------|
//! | `(auth)/login.vue`    | `login`        | `login`           | `login`      |
//! | `posts/[id].vue`      | `posts/{id}`   | `posts/:id`       | `posts/:id`  |
//! | `blog/[...slug].vue`  | `blog/{slug?}` | `blog/:slug(.*)*` | `blog/*`     |
//! | `index.vue`           | `/`            | `/`               | `/`          |
//!
//! ## Layouts and merged declarations
//!
//! A page is wrapped by every `_layout` file between the pages root and its
//! own directory. Props, actions, middleware and route names declared along
//! that chain merge into one view of the page (see [`aggregate()`]).
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use viper_router::{MemorySource, PageRegistry, RouterTarget};
//!
//! let source = MemorySource::from_files([
//!     "/app/pages/(auth)/_layout.vue",
//!     "/app/pages/(auth)/login.vue",
//! ]);
//! let mut registry = PageRegistry::new("/app/pages", "vue");
//!
//! let login = registry.resolve(Path::new("/app/pages/(auth)/login.vue"), &source).unwrap();
//! let node = registry.get(login).unwrap();
//! assert_eq!(node.route_path(RouterTarget::Laravel), "login");
//! assert_eq!(node.component_name(), "AuthGroupLogin");
//! assert_eq!(node.layouts().len(), 1);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod aggregate;
mod error;
pub mod layout;
pub mod metadata;
mod page;
pub mod path;
mod registry;
pub mod route;
mod routes;
mod source;
mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use aggregate::{
    aggregate, member_identifier, ActionEntry, ActionSet, MemberEntry, MemberSet, MergedPage,
    PropEntry, PropSet,
};
pub use error::{Result, RouteError};
pub use metadata::{
    MemberDecl, MemberKind, MetadataProvider, PageMetadata, SourceLocation, StaticMetadata,
};
pub use page::{relative_dir, LayoutChain, PageId, PageNode, RoutePaths};
pub use registry::PageRegistry;
pub use route::{PathSegment, RouterTarget, SegmentKind};
pub use routes::{route_table, RouteRegistration, PAGE_METHODS};
pub use source::{MemorySource, PageSource};
pub use tree::{sort_by_specificity, RouteTree, RouteTreeNode};
