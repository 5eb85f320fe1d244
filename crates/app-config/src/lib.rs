// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `config/base.toml` file, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// Any value missing from every layer falls back to its documented default.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // e.g. `APP_RISK__SIZING_FRACTION=0.25`
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    finish(settings)
}

/// Builds settings from an in-memory TOML document, with the same defaults and
/// validation as [`load_settings`].
pub fn parse_settings(toml: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(settings)
}

fn finish(config: Config) -> Result<Settings> {
    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
