use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process settings for the bridge binary.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub configs: ConfigsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    7575
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where configuration sets (`<name>.json`) are read from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigsConfig {
    #[serde(default = "default_configs_dir")]
    pub dir: PathBuf,
}

fn default_configs_dir() -> PathBuf {
    PathBuf::from("./data/configs")
}

impl Default for ConfigsConfig {
    fn default() -> Self {
        Self {
            dir: default_configs_dir(),
        }
    }
}
