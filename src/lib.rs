pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog::ModuleCatalog;
pub use config::cli::LocalStorage;
pub use crate::core::{
    engine::ExportEngine,
    pipeline::ExportPipeline,
    translate::translate,
    writer::{persist, query_timestamp},
};
pub use domain::model::{ExportSummary, LoadoutDocument, LoadoutRecord, PersistOutcome, Translation};
pub use utils::error::{ExportError, Result};
pub use utils::serialize::JsonLayout;
