pub mod engine;
pub mod pipeline;
pub mod tables;
pub mod translate;
pub mod writer;

pub use crate::domain::model::{LoadoutDocument, LoadoutRecord, PersistOutcome, Translation};
pub use crate::domain::ports::{ConfigProvider, ModuleLookup, Pipeline, Storage};
pub use crate::utils::error::Result;
