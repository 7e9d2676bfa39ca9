// File: src/config.rs
// Purpose: Configuration parsing from viper.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use viper_router::RouterTarget;

/// Front-end framework the pages are written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Vue,
    React,
}

/// Where a page's server-side declarations live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Inside the page component file itself
    #[default]
    Sfc,
    /// In a sibling file with the server extension (`login.vue` + `login.php`)
    Adjacent,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViperConfig {
    /// Directory containing page files (default: "resources/js/pages")
    #[serde(default = "default_pages_path")]
    pub pages_path: PathBuf,

    /// Directory for generated artifacts (default: ".viper")
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default)]
    pub framework: Framework,

    #[serde(default)]
    pub mode: Mode,

    /// Extension of adjacent server files (default: "php")
    #[serde(default = "default_server_extension")]
    pub server_extension: String,
}

// Default values
fn default_pages_path() -> PathBuf {
    PathBuf::from("resources/js/pages")
}

fn default_output_path() -> PathBuf {
    PathBuf::from(".viper")
}

fn default_server_extension() -> String {
    "php".to_string()
}

impl Default for ViperConfig {
    fn default() -> Self {
        Self {
            pages_path: default_pages_path(),
            output_path: default_output_path(),
            framework: Framework::default(),
            mode: Mode::default(),
            server_extension: default_server_extension(),
        }
    }
}

impl ViperConfig {
    /// Load configuration from viper.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ViperConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./viper.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("viper.toml")
    }

    /// Anchors relative `pages_path` and `output_path` at `root`
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        if self.pages_path.is_relative() {
            self.pages_path = root.join(&self.pages_path);
        }
        if self.output_path.is_relative() {
            self.output_path = root.join(&self.output_path);
        }
        self
    }

    pub fn is_vue(&self) -> bool {
        self.framework == Framework::Vue
    }

    pub fn is_react(&self) -> bool {
        self.framework == Framework::React
    }

    pub fn is_sfc(&self) -> bool {
        self.mode == Mode::Sfc
    }

    pub fn is_adjacent(&self) -> bool {
        self.mode == Mode::Adjacent
    }

    /// Extension of page component files
    pub fn component_extension(&self) -> &'static str {
        match self.framework {
            Framework::Vue => "vue",
            Framework::React => "tsx",
        }
    }

    /// Client router the generated route config targets
    pub fn router_target(&self) -> RouterTarget {
        match self.framework {
            Framework::Vue => RouterTarget::Vue,
            Framework::React => RouterTarget::React,
        }
    }

    /// `path` below the pages directory; an empty path gives the directory itself
    pub fn pages_path(&self, path: impl AsRef<Path>) -> PathBuf {
        join_non_empty(&self.pages_path, path.as_ref())
    }

    /// `path` below the output directory
    pub fn output_path(&self, path: impl AsRef<Path>) -> PathBuf {
        join_non_empty(&self.output_path, path.as_ref())
    }

    /// Generated router config, written next to the pages it imports
    pub fn routes_file(&self) -> PathBuf {
        match self.framework {
            Framework::Vue => self.pages_path("routes.ts"),
            Framework::React => self.pages_path("routes.tsx"),
        }
    }

    /// File holding the server-side declarations of `page`
    pub fn server_source(&self, page: &Path) -> PathBuf {
        match self.mode {
            Mode::Sfc => page.to_path_buf(),
            Mode::Adjacent => page.with_extension(&self.server_extension),
        }
    }

    /// The page a changed file belongs to, if any
    ///
    /// Component files map to themselves; in adjacent mode a server file
    /// maps to the component beside it.
    pub fn page_for_server_source(&self, path: &Path) -> Option<PathBuf> {
        let extension = path.extension().and_then(|e| e.to_str())?;

        if extension == self.component_extension() {
            return Some(path.to_path_buf());
        }
        if self.is_adjacent() && extension == self.server_extension {
            return Some(path.with_extension(self.component_extension()));
        }
        None
    }
}

fn join_non_empty(base: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(path)
    }
}
