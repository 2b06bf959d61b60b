use crate::core::Storage;
use crate::utils::error::{BikeshareError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads city files relative to the data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        tracing::debug!("Reading {}", full_path.display());

        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BikeshareError::DataFileNotFound {
                path: full_path.display().to_string(),
            },
            _ => BikeshareError::IoError(e),
        })
    }
}
