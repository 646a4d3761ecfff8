//! Storage backends for the Leadform dynamic form engine

mod file;
mod memory;

pub use file::FileFormStore;
pub use leadform_core::{FormError, FormStore, Result};
pub use memory::MemoryFormStore;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    #[default]
    Memory,
    File {
        path: String,
    },
}

pub fn create_store(config: &StorageConfig) -> Arc<dyn FormStore> {
    match config {
        StorageConfig::Memory => Arc::new(MemoryFormStore::new()),
        StorageConfig::File { path } => Arc::new(FileFormStore::new(path)),
    }
}
