//! # Viper
//!
//! Host layer around `viper-router`: everything that touches the disk.
//!
//! - `config`: `viper.toml` loading
//! - `source`: page discovery with `walkdir`
//! - `metadata`: page declarations from the extractor's `metadata.json`
//! - `session`: discovery, incremental invalidation and builds
//! - `codegen`: `routes.ts` (Vue Router) / `routes.tsx` (React Router)
//! - `manifest`: `manifest.json` for the server runtime

pub mod codegen;
pub mod config;
pub mod manifest;
pub mod metadata;
pub mod session;
pub mod source;

use anyhow::Result;

pub use config::{Framework, Mode, ViperConfig};
pub use metadata::JsonMetadata;
pub use session::{build_project, BuildOutput, Diagnostic, PageSummary, Session};
pub use source::DiskSource;
pub use viper_router;

/// Which generated files were rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Written {
    pub routes: bool,
    pub manifest: bool,
}

/// Writes the router module and the manifest for `output`
pub fn write_outputs(config: &ViperConfig, output: &BuildOutput) -> Result<Written> {
    Ok(Written {
        routes: codegen::generate(config, output)?,
        manifest: manifest::write_manifest(config, output)?,
    })
}
