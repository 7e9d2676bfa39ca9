// File: src/manifest.rs
// Purpose: JSON manifest of every page, for the server runtime and tooling

use anyhow::{Context, Result};
use serde::Serialize;
use viper_router::{RouteRegistration, RouterTarget};

use crate::codegen::write_if_changed;
use crate::config::{Framework, ViperConfig};
use crate::session::{BuildOutput, Diagnostic, PageSummary};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub framework: Framework,
    pub target: RouterTarget,
    pub pages: &'a [PageSummary],
    pub routes: &'a [RouteRegistration],
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> Manifest<'a> {
    pub fn new(config: &ViperConfig, output: &'a BuildOutput) -> Self {
        Self {
            framework: config.framework,
            target: config.router_target(),
            pages: &output.pages,
            routes: &output.routes,
            diagnostics: &output.diagnostics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        json.push('\n');
        Ok(json)
    }
}

/// Writes `<output_path>/manifest.json`; returns whether it changed
pub fn write_manifest(config: &ViperConfig, output: &BuildOutput) -> Result<bool> {
    let json = Manifest::new(config, output).to_json()?;
    write_if_changed(&config.output_path(MANIFEST_FILE), &json)
}
