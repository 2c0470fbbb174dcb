use crate::domain::model::ModuleDescriptor;
use crate::domain::ports::{ModuleLookup, ModuleRejection};
use crate::utils::error::{ExportError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Module descriptors keyed by the name the companion snapshot uses.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, ModuleDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Keyed(HashMap<String, ModuleDescriptor>),
    Listed(Vec<ModuleDescriptor>),
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ExportError::StorageError {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Accepts either `{"<lookup name>": descriptor, ...}` or `[descriptor, ...]`;
    /// listed descriptors are looked up by their own `name`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|e| ExportError::CatalogError {
                message: e.to_string(),
            })?;

        let modules = match file {
            CatalogFile::Keyed(modules) => modules,
            CatalogFile::Listed(list) => list
                .into_iter()
                .map(|descriptor| (descriptor.name.clone(), descriptor))
                .collect(),
        };
        tracing::debug!("Loaded {} module descriptors", modules.len());

        Ok(Self { modules })
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: ModuleDescriptor) {
        self.modules.insert(key.into(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleLookup for ModuleCatalog {
    fn lookup(&self, name: &str) -> std::result::Result<Option<ModuleDescriptor>, ModuleRejection> {
        let Some(descriptor) = self.modules.get(name) else {
            return Ok(None);
        };
        if descriptor.name.trim().is_empty() {
            return Err(ModuleRejection::new(format!("descriptor for '{}' has no name", name)));
        }
        if descriptor.class.is_empty() || descriptor.rating.is_empty() {
            return Err(ModuleRejection::new(format!(
                "descriptor for '{}' is missing class or rating",
                name
            )));
        }
        Ok(Some(descriptor.clone()))
    }
}
