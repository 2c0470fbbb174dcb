use clap::Parser;
use loadout_export::core::ConfigProvider;
use loadout_export::utils::error::ErrorSeverity;
use loadout_export::utils::{logger, validation::Validate};
use loadout_export::{
    CliConfig, ExportEngine, ExportPipeline, LocalStorage, ModuleCatalog, PersistOutcome,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // Logging first so validation failures are reported
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting loadout-export CLI");
    tracing::debug!("CLI config: {:?}", config);

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Load module catalog
    let catalog = match ModuleCatalog::from_file(config.catalog_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // Build pipeline and engine
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ExportPipeline::new(storage, catalog, config);
    let engine = ExportEngine::new(pipeline);

    // Run export
    match engine.run() {
        Ok(summary) => {
            if !summary.skipped.is_empty() {
                println!("⚠️  {} module(s) not exported", summary.skipped.len());
            }
            match summary.outcome {
                PersistOutcome::Written { path } => println!("📁 Loadout saved to: {}", path),
                PersistOutcome::SkippedDuplicate { path } => {
                    println!("✅ {} unchanged since {}", summary.ship, path)
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // storage
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3, // table gap
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
