//! Loading configuration sets by name.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ConfigSet;
use crate::error::{Error, Result};

/// Source of configuration sets, keyed by name.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the configuration set called `name`.
    async fn load(&self, name: &str) -> Result<ConfigSet>;
}

/// Reads `<dir>/<name>.json` on every call.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        if !valid {
            return Err(Error::Validation(format!("invalid config set name: {name:?}")));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self, name: &str) -> Result<ConfigSet> {
        let path = self.path_for(name)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found("config set", name));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(config_set = name, path = %path.display(), "Loaded config set");

        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse config set {}: {e}", path.display()))
        })
    }
}

/// A fixed in-memory set, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigStore {
    sets: Vec<(String, ConfigSet)>,
}

impl StaticConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(mut self, name: impl Into<String>, set: ConfigSet) -> Self {
        self.sets.push((name.into(), set));
        self
    }
}

#[async_trait]
impl ConfigStore for StaticConfigStore {
    async fn load(&self, name: &str) -> Result<ConfigSet> {
        self.sets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, set)| set.clone())
            .ok_or_else(|| Error::not_found("config set", name))
    }
}
