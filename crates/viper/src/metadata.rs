// File: src/metadata.rs
// Purpose: Page declarations read from the extractor's metadata.json

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use viper_router::{MetadataProvider, PageMetadata, PageNode, StaticMetadata};

pub const METADATA_FILE: &str = "metadata.json";

/// Declarations keyed by page relative path, as written by the extractor
#[derive(Debug, Clone, Default)]
pub struct JsonMetadata {
    pages: StaticMetadata,
}

impl JsonMetadata {
    /// Load declarations from a metadata file
    ///
    /// A missing or empty file means nothing is declared.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata file: {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse metadata file: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let pages: StaticMetadata = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl MetadataProvider for JsonMetadata {
    fn metadata(&self, page: &PageNode) -> Option<PageMetadata> {
        self.pages.metadata(page)
    }
}
