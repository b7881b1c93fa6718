use std::path::PathBuf;

use serde::Deserialize;

use super::DEFAULT_EVALUATIONS_DIR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub evaluations_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            evaluations_dir: PathBuf::from(DEFAULT_EVALUATIONS_DIR),
        }
    }
}
