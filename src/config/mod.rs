//! Application configuration: environment variables (optionally from `.env`)
//! layered over an optional `config.toml`.

/// Built-in category list and `config.toml` parsing
pub mod categories;
/// Database location, connection and table creation
pub mod database;

use crate::errors::Result;
use tracing::info;

/// Environment variable naming the TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "DAYBOOK_CONFIG";

/// Settings needed to open the store.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Names seeded as built-in categories
    pub built_in_categories: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: database::DEFAULT_DATABASE_URL.to_string(),
            built_in_categories: categories::default_built_in_categories(),
        }
    }
}

/// Reads `DATABASE_URL` and the file named by `DAYBOOK_CONFIG` (default `config.toml`).
///
/// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config_path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let built_in_categories = categories::load_config(&config_path)?
        .map_or_else(categories::default_built_in_categories, |file| {
            file.built_in_categories()
        });

    let app_config = AppConfig {
        database_url: database::get_database_url(),
        built_in_categories,
    };
    info!(
        "Configuration loaded: database_url={}, {} built-in categories",
        app_config.database_url,
        app_config.built_in_categories.len()
    );
    Ok(app_config)
}
