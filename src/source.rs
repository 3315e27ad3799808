use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::constants::MEMORY_SOURCE_NAME;
use crate::error::{CatalogError, Result};

/// Where catalog bytes come from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Identifier used in logs and load errors
    fn name(&self) -> String;

    /// Read the whole source. This is the only I/O a load performs.
    async fn read_bytes(&self) -> Result<Vec<u8>>;
}

/// A catalog file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::Io {
                source_name: self.name(),
                source: e,
            })?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(bytes)
    }
}

/// Catalog bytes already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: MEMORY_SOURCE_NAME.to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn named(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
