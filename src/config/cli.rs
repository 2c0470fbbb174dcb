use crate::core::Storage;
use crate::utils::error::{ExportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage rooted at the output directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }

    fn storage_error(path: &Path, source: std::io::Error) -> ExportError {
        ExportError::StorageError {
            path: path.display().to_string(),
            source,
        }
    }
}

impl Storage for LocalStorage {
    fn list_files(&self) -> Result<Vec<String>> {
        let base = Path::new(&self.base_path);
        let entries = fs::read_dir(base).map_err(|e| Self::storage_error(base, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::storage_error(base, e))?;
            // names that aren't valid UTF-8 can't be one of our exports
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        fs::read(&full_path).map_err(|e| Self::storage_error(&full_path, e))
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);
        fs::write(&full_path, data).map_err(|e| Self::storage_error(&full_path, e))
    }

    fn locate(&self, path: &str) -> String {
        self.full_path(path).display().to_string()
    }
}
