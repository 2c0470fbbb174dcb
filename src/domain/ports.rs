use crate::domain::model::{LoadoutRecord, ModuleDescriptor, PersistOutcome, Translation};
use crate::utils::error::Result;
use crate::utils::serialize::JsonLayout;
use std::fmt;

/// Why a lookup refused to describe a module it knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRejection {
    pub reason: String,
}

impl ModuleRejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ModuleRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Resolves a module name to its descriptor. `Ok(None)` means the module is not known.
pub trait ModuleLookup {
    fn lookup(&self, name: &str) -> std::result::Result<Option<ModuleDescriptor>, ModuleRejection>;
}

pub trait Storage {
    /// File names (not paths) directly inside the storage root.
    fn list_files(&self) -> Result<Vec<String>>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Display form of where `path` lives, for logs and outcomes.
    fn locate(&self, path: &str) -> String;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn list_files(&self) -> Result<Vec<String>> {
        (**self).list_files()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        (**self).write_file(path, data)
    }

    fn locate(&self, path: &str) -> String {
        (**self).locate(path)
    }
}

pub trait ConfigProvider {
    fn loadout_path(&self) -> &str;
    fn catalog_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Epoch seconds to stamp the export with instead of the current time.
    fn query_time(&self) -> Option<i64>;
    fn json_layout(&self) -> JsonLayout;
}

pub trait Pipeline {
    fn extract(&self) -> Result<LoadoutRecord>;
    fn transform(&self, record: LoadoutRecord) -> Result<Translation>;
    fn load(&self, translation: &Translation) -> Result<PersistOutcome>;
}
