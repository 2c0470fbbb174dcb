use crate::core::translate::translate;
use crate::core::writer::{persist, query_timestamp};
use crate::core::{ConfigProvider, LoadoutRecord, Pipeline, PersistOutcome, Storage, Translation};
use crate::domain::ports::ModuleLookup;
use crate::utils::error::{ExportError, Result};

/// Reads a loadout file, translates it and persists the result.
pub struct ExportPipeline<S: Storage, L: ModuleLookup, C: ConfigProvider> {
    storage: S,
    lookup: L,
    config: C,
}

impl<S: Storage, L: ModuleLookup, C: ConfigProvider> ExportPipeline<S, L, C> {
    pub fn new(storage: S, lookup: L, config: C) -> Self {
        Self {
            storage,
            lookup,
            config,
        }
    }
}

pub fn parse_loadout(path: &str, content: &str) -> Result<LoadoutRecord> {
    serde_json::from_str(content).map_err(|e| ExportError::LoadoutParseError {
        path: path.to_string(),
        message: e.to_string(),
    })
}

impl<S: Storage, L: ModuleLookup, C: ConfigProvider> Pipeline for ExportPipeline<S, L, C> {
    fn extract(&self) -> Result<LoadoutRecord> {
        let path = self.config.loadout_path();
        tracing::debug!("Reading loadout from: {}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ExportError::StorageError {
            path: path.to_string(),
            source: e,
        })?;
        parse_loadout(path, &content)
    }

    fn transform(&self, record: LoadoutRecord) -> Result<Translation> {
        translate(&record, &self.lookup)
    }

    fn load(&self, translation: &Translation) -> Result<PersistOutcome> {
        let timestamp = query_timestamp(self.config.query_time())?;
        tracing::debug!(
            "Persisting {} to {} as of {}",
            translation.ship,
            self.config.output_path(),
            timestamp
        );

        persist(
            &translation.document,
            &translation.ship,
            &self.storage,
            timestamp,
            self.config.json_layout(),
        )
    }
}
