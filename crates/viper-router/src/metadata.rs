//! Declarations a page makes about itself
//!
//! The router does not read page source. A separate extractor (reflection
//! over the compiled page, a sidecar file, ...) reports what every page or
//! layout declares, through `MetadataProvider`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::page::PageNode;

/// Whether a member is a prop (data loaded with the page) or an action
/// (a callable endpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Prop,
    Action,
}

/// Where a member is declared
///
/// Only `file` takes part in identifiers; `line` is informational and may
/// move freely between builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// One prop or action declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    pub kind: MemberKind,
    /// Inputs the member needs from the caller (route or query parameters)
    #[serde(default)]
    pub bindings: Vec<String>,
    pub location: SourceLocation,
    /// Lazy props are listed but not evaluated on the initial page load
    #[serde(default)]
    pub lazy: bool,
}

impl MemberDecl {
    pub fn prop(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Prop,
            bindings: Vec::new(),
            location,
            lazy: false,
        }
    }

    pub fn action(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind: MemberKind::Action,
            ..Self::prop(name, location)
        }
    }

    pub fn with_bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings = bindings.into_iter().map(Into::into).collect();
        self
    }

    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }
}

/// Everything one page or layout declares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub members: Vec<MemberDecl>,
    pub middleware: Vec<String>,
    /// Route name fragment; empty means none
    pub name: Option<String>,
    pub title: Option<String>,
}

impl PageMetadata {
    pub fn props(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members.iter().filter(|m| m.kind == MemberKind::Prop)
    }

    pub fn actions(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members.iter().filter(|m| m.kind == MemberKind::Action)
    }

    /// The name fragment, treating `Some("")` like `None`
    pub fn name_fragment(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Supplies declarations for a page; `None` means it declares nothing
pub trait MetadataProvider {
    fn metadata(&self, page: &PageNode) -> Option<PageMetadata>;
}

/// Declarations held in memory, keyed by page relative path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticMetadata {
    pages: HashMap<String, PageMetadata>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relative_path: impl Into<String>, metadata: PageMetadata) {
        self.pages.insert(relative_path.into(), metadata);
    }

    pub fn with(mut self, relative_path: impl Into<String>, metadata: PageMetadata) -> Self {
        self.insert(relative_path, metadata);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl MetadataProvider for StaticMetadata {
    fn metadata(&self, page: &PageNode) -> Option<PageMetadata> {
        self.pages.get(page.relative_path()).cloned()
    }
}
