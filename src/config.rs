//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/glosstree/glosstree.toml`
//! 3. Local config: `<dir>/.glosstree.toml`
//! 4. Environment variables: `GLOSSTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::breadcrumb::{GlossaryRoutes, DEFAULT_ROOT_LABEL, DEFAULT_ROUTE_BASE};

pub const DEFAULT_PAGE_SIZE: usize = 1000;
pub const DEFAULT_SEARCH_INDEX: &str = "glossary_search_index";

/// Unified configuration for glosstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Records fetched per query (default: 1000)
    pub page_size: usize,
    /// Search index category queried for terms
    pub search_index: String,
    /// Path of the glossary listing view (default: /glossary)
    pub route_base: String,
    /// Label of the leading breadcrumb (default: Glossaries)
    pub root_label: String,
    /// Default term export used when no file is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_index: DEFAULT_SEARCH_INDEX.to_string(),
            route_base: DEFAULT_ROUTE_BASE.to_string(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            data_file: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub page_size: Option<usize>,
    pub search_index: Option<String>,
    pub route_base: Option<String>,
    pub root_label: Option<String>,
    pub data_file: Option<PathBuf>,
}

/// Get the XDG config directory for glosstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "glosstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("glosstree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".glosstree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Glossary routes for breadcrumb links.
    pub fn routes(&self) -> GlossaryRoutes {
        GlossaryRoutes {
            base: self.route_base.clone(),
            root_label: self.root_label.clone(),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            self.data_file = Some(expand_path(data_file));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            page_size: overlay.page_size.unwrap_or(self.page_size),
            search_index: overlay
                .search_index
                .clone()
                .unwrap_or_else(|| self.search_index.clone()),
            route_base: overlay
                .route_base
                .clone()
                .unwrap_or_else(|| self.route_base.clone()),
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.glosstree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/glosstree/glosstree.toml`
    /// 3. Local config: `<local_dir>/.glosstree.toml`
    /// 4. Environment variables: `GLOSSTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GLOSSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GLOSSTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("page_size") {
            settings.page_size = val.parse().map_err(|_| ApplicationError::Config {
                message: format!("GLOSSTREE_PAGE_SIZE is not a number: {}", val),
            })?;
        }
        if let Ok(val) = config.get_string("search_index") {
            settings.search_index = val;
        }
        if let Ok(val) = config.get_string("route_base") {
            settings.route_base = val;
        }
        if let Ok(val) = config.get_string("root_label") {
            settings.root_label = val;
        }
        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# glosstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/glosstree/glosstree.toml
#   Local:  <dir>/.glosstree.toml
#   Env:    GLOSSTREE_* environment variables

# Records fetched per query
# page_size = 1000

# Search index category queried for glossary terms
# search_index = "glossary_search_index"

# Path of the glossary listing view, used for breadcrumb links
# route_base = "/glossary"

# Label of the leading breadcrumb entry
# root_label = "Glossaries"

# Term export used when no file argument is given
# data_file = "~/glossary/terms.json"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
