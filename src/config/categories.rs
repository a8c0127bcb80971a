//! Built-in category configuration.
//!
//! The default list can be replaced through a `config.toml` with
//!
//! ```toml
//! [categories]
//! built_in = ["Food", "Rent"]
//! ```

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Categories seeded on first initialization when no override is configured.
pub const DEFAULT_BUILT_IN_CATEGORIES: [&str; 7] = [
    "Health",
    "Groceries",
    "Travel",
    "Shopping",
    "Food",
    "Entertainment",
    "Other",
];

/// Structure of the whole `config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// `[categories]` table
    #[serde(default)]
    pub categories: CategoriesConfig,
}

/// `[categories]` table
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesConfig {
    /// Replacement for [`DEFAULT_BUILT_IN_CATEGORIES`]
    pub built_in: Option<Vec<String>>,
}

impl FileConfig {
    /// Built-in names to seed: the configured list (trimmed, blanks dropped) or the defaults.
    #[must_use]
    pub fn built_in_categories(&self) -> Vec<String> {
        match &self.categories.built_in {
            Some(names) => names
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            None => default_built_in_categories(),
        }
    }
}

/// The default built-in names as owned strings.
#[must_use]
pub fn default_built_in_categories() -> Vec<String> {
    DEFAULT_BUILT_IN_CATEGORIES
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Loads `config.toml` from `path`. A missing file yields `Ok(None)`.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Option<FileConfig>> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No configuration file at {:?}, using defaults", path);
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    let config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path:?}: {e}"),
    })?;
    Ok(Some(config))
}
