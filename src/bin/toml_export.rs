use anyhow::Context;
use clap::Parser;
use loadout_export::config::toml_config::TomlConfig;
use loadout_export::core::{ConfigProvider, Pipeline};
use loadout_export::utils::serialize::to_json_string;
use loadout_export::utils::{logger, validation::Validate};
use loadout_export::{ExportEngine, ExportPipeline, LocalStorage, ModuleCatalog, PersistOutcome};

#[derive(Parser)]
#[command(name = "toml-export")]
#[command(about = "Loadout export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "loadout-export.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override query_time from config (epoch seconds)
    #[arg(long)]
    query_time: Option<i64>,

    /// Translate and print the document without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }
    tracing::info!("Loaded configuration from: {}", args.config);

    // Command line overrides
    if let Some(query_time) = args.query_time {
        config.query_time = Some(query_time);
        tracing::info!("Query time overridden to: {}", query_time);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        anyhow::bail!(e.user_friendly_message());
    }

    let catalog = ModuleCatalog::from_file(config.catalog_path())
        .with_context(|| format!("Failed to load module catalog '{}'", config.catalog_path()))?;
    tracing::info!("Module catalog has {} entries", catalog.len());

    let storage = LocalStorage::new(config.output_path().to_string());
    let layout = config.json_layout();
    let pipeline = ExportPipeline::new(storage, catalog, config);

    // Dry run: extract and transform only
    if args.dry_run {
        tracing::info!("DRY RUN MODE - nothing will be written");
        let record = pipeline.extract()?;
        let translation = pipeline.transform(record)?;
        println!("{}", to_json_string(&translation.document, layout)?);
        return Ok(());
    }

    let summary = ExportEngine::new(pipeline).run()?;
    for warning in &summary.order_warnings {
        println!("⚠️  slot {} listed after {}", warning.slot, warning.previous);
    }
    match summary.outcome {
        PersistOutcome::Written { path } => println!("📁 Loadout saved to: {}", path),
        PersistOutcome::SkippedDuplicate { path } => {
            println!("✅ {} unchanged since {}", summary.ship, path)
        }
    }

    Ok(())
}
