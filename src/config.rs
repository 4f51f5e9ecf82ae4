//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (two sample lists)
//! 2. Global config: `$XDG_CONFIG_HOME/restlist/restlist.toml`
//! 3. Explicit config: `--config <file>`
//! 4. Environment variables: `RESTLIST_*` prefix
//!
//! Configuration only seeds the registry at startup; nothing is written back.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ListRegistry, Rating, Restaurant, RestaurantList};

/// A restaurant as written in a config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedRestaurant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A restaurant list as written in a config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedList {
    pub name: String,
    #[serde(default)]
    pub restaurants: Vec<SeedRestaurant>,
}

impl SeedList {
    fn unrated(name: &str, restaurants: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            restaurants: restaurants
                .iter()
                .map(|r| SeedRestaurant {
                    name: r.to_string(),
                    rating: None,
                })
                .collect(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub lists: Option<Vec<SeedList>>,
    pub select: Option<usize>,
}

/// Unified configuration for restlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Index of the initially selected list (default: nothing selected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<usize>,
    /// Lists the registry starts with, in display order
    pub lists: Vec<SeedList>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            select: None,
            lists: vec![
                SeedList::unrated("La1", &["McDonald's", "Starbucks"]),
                SeedList::unrated("La2", &["Green Dragon", "Cactus"]),
            ],
        }
    }
}

/// Get the XDG config directory for restlist.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "restlist").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("restlist.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values the raw settings specify. Lists are replaced as a whole.
    fn apply(&self, overlay: &RawSettings) -> Self {
        Self {
            select: overlay.select.or(self.select),
            lists: overlay.lists.clone().unwrap_or_else(|| self.lists.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.apply(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            let path = expand_path(path);
            debug!("load: explicit config {}", path.display());
            current = current.apply(&load_raw_settings(&path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RESTLIST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("RESTLIST").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("select") {
            settings.select = match val.trim() {
                "" | "none" => None,
                idx => Some(idx.parse().map_err(|_| ApplicationError::Config {
                    message: format!("RESTLIST_SELECT: '{idx}' is not an index"),
                })?),
            };
        }

        Ok(settings)
    }

    /// Build the registry these settings describe.
    ///
    /// Names and ratings are validated; a repeated restaurant within one
    /// list is skipped with a warning.
    pub fn build_registry(&self) -> ApplicationResult<ListRegistry> {
        let mut lists = Vec::with_capacity(self.lists.len());
        for seed in &self.lists {
            let mut list = RestaurantList::new(seed.name.as_str())?;
            for r in &seed.restaurants {
                let rating = r.rating.map(Rating::new).transpose()?;
                if !list.add(Restaurant::new(r.name.as_str(), rating)?) {
                    warn!("seed list {}: duplicate restaurant {} skipped", seed.name, r.name);
                }
            }
            lists.push(list);
        }

        let mut registry = ListRegistry::with_lists(lists);
        registry.select(self.select)?;
        Ok(registry)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# restlist configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/restlist/restlist.toml
#   Explicit: restlist --config <file>
#   Env:      RESTLIST_SELECT=<index|none>
#
# A file that sets `lists` replaces the inherited lists entirely.

# Index of the list selected at startup (omit for no selection)
# select = 0

# [[lists]]
# name = "La1"
# restaurants = [
#     { name = "McDonald's" },
#     { name = "Starbucks", rating = 3.5 },
# ]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
