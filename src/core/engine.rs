use crate::core::Pipeline;
use crate::domain::model::{ExportSummary, PersistOutcome, SkipReason};
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ExportSummary> {
        tracing::info!("Starting loadout export");

        // Extract
        let record = self.pipeline.extract()?;
        tracing::info!(
            "Read loadout for {} with {} slots",
            record.ship.name,
            record.ship.modules.len()
        );

        // Transform
        let translation = self.pipeline.transform(record)?;
        for skipped in &translation.skipped {
            match &skipped.reason {
                SkipReason::Unrecognized => tracing::info!(
                    "Skipped unrecognized module '{}' in {}",
                    skipped.module,
                    skipped.slot
                ),
                SkipReason::Rejected(reason) => tracing::warn!(
                    "Skipped module '{}' in {}: {}",
                    skipped.module,
                    skipped.slot,
                    reason
                ),
            }
        }

        // Load
        let outcome = self.pipeline.load(&translation)?;
        match &outcome {
            PersistOutcome::Written { path } => tracing::info!("Loadout saved to: {}", path),
            PersistOutcome::SkippedDuplicate { path } => {
                tracing::info!("Loadout unchanged since: {}", path)
            }
        }

        Ok(ExportSummary {
            ship: translation.ship,
            outcome,
            skipped: translation.skipped,
            order_warnings: translation.order_warnings,
        })
    }
}
