mod apps;
mod store;
mod types;

pub use apps::*;
pub use store::{ConfigStore, FileConfigStore, StaticConfigStore};
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load settings from a TOML file
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// Load settings from default locations or return defaults
pub fn load_settings_or_default(custom_path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = custom_path {
        return load_settings(path);
    }

    let default_paths = [
        "./tdarr-bridge.toml",
        "~/.config/tdarr-bridge/config.toml",
        "/etc/tdarr-bridge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_settings(path);
        }
    }

    Ok(Settings::default())
}

/// Validate settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if settings.configs.dir.as_os_str().is_empty() {
        anyhow::bail!("configs.dir cannot be empty");
    }

    if !settings.configs.dir.exists() {
        tracing::warn!("Config set directory does not exist: {:?}", settings.configs.dir);
    }

    Ok(())
}
