use loadout_export::core::Storage;
use loadout_export::{
    CliConfig, ExportEngine, ExportError, ExportPipeline, JsonLayout, LocalStorage, ModuleCatalog,
    PersistOutcome,
};
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "Int_FuelTank_Size3_Class3": {"name": "Fuel Tank", "category": "standard", "class": "3", "rating": "C"},
    "Hpt_MultiCannon_Fixed_Medium": {"name": "Multi-Cannon", "category": "hardpoint", "class": "2", "rating": "F", "mount": "Fixed"},
    "Hpt_BeamLaser_Turret_Large": {"name": "Beam Laser", "category": "hardpoint", "class": "3", "rating": "E", "mount": "Turreted"},
    "Armour_Asp_Grade1": {"name": "Lightweight Alloy", "category": "standard", "class": "1", "rating": "I"},
    "Int_PowerPlant_Size5_Class3": {"name": "Power Plant", "category": "standard", "class": "5", "rating": "C"},
    "Hpt_ChaffLauncher_Tiny": {"name": "Chaff Launcher", "category": "utility", "class": "0", "rating": "I"}
}"#;

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn config(inputs: &TempDir, output: &TempDir, loadout: &str, query_time: i64) -> CliConfig {
    CliConfig {
        loadout: write_fixture(inputs.path(), "profile.json", loadout),
        catalog: write_fixture(inputs.path(), "modules.json", CATALOG),
        output_path: output.path().to_str().unwrap().to_string(),
        query_time: Some(query_time),
        layout: JsonLayout::Pretty,
        verbose: false,
    }
}

fn run(config: CliConfig) -> loadout_export::Result<loadout_export::ExportSummary> {
    let catalog = ModuleCatalog::from_file(&config.catalog)?;
    let storage = LocalStorage::new(config.output_path.clone());
    ExportEngine::new(ExportPipeline::new(storage, catalog, config)).run()
}

fn exported_files(dir: &TempDir) -> Vec<String> {
    let mut names = LocalStorage::new(dir.path().to_str().unwrap().to_string())
        .list_files()
        .unwrap();
    names.sort();
    names
}

const ASP_PROFILE: &str = r#"{
    "commander": {"name": "Jameson"},
    "ship": {
        "name": "Asp",
        "modules": {
            "Armour": {"module": "Armour_Asp_Grade1"},
            "PowerPlant": {"module": "Int_PowerPlant_Size5_Class3"},
            "Slot01_Size3": {"module": "Int_FuelTank_Size3_Class3"},
            "MediumHardpoint1": {"module": "Hpt_MultiCannon_Fixed_Medium"},
            "LargeHardpoint1": {"module": "Hpt_BeamLaser_Turret_Large"},
            "TinyHardpoint1": {"module": "Hpt_ChaffLauncher_Tiny"},
            "TinyHardpoint2": null,
            "Slot02_Size2": {"module": "Int_GuardianModule_Size2"},
            "Slot03_Size2": []
        }
    }
}"#;

#[test]
fn test_end_to_end_export() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let summary = run(config(&inputs, &output, ASP_PROFILE, 1_436_860_800)).unwrap();

    assert_eq!(summary.ship, "Asp Explorer");
    assert!(summary.outcome.was_written());
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].module, "Int_GuardianModule_Size2");

    let files = exported_files(&output);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("Asp Explorer."));
    assert!(files[0].ends_with(".json"));

    let text = std::fs::read_to_string(output.path().join(&files[0])).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        document["$schema"],
        "http://cdn.coriolis.io/schemas/ship-loadout/1.json#"
    );
    assert_eq!(document["name"], "Asp Explorer");

    let components = &document["components"];
    assert_eq!(components["standard"]["bulkheads"], "Lightweight Alloy");
    assert_eq!(
        components["standard"]["fuelTank"],
        serde_json::json!({"class": "3", "rating": "C"})
    );
    assert_eq!(
        components["hardpoints"],
        serde_json::json!([
            {"class": "3", "rating": "E", "group": "Beam Laser", "mount": "Turret"},
            {"class": "2", "rating": "F", "group": "Multi-cannon", "mount": "Fixed"}
        ])
    );
    assert_eq!(
        components["utility"],
        serde_json::json!([
            {"class": "0", "rating": "I", "group": "Countermeasure", "name": "Chaff Launcher"},
            null
        ])
    );
    // the unrecognized module leaves no trace; the empty slot leaves a null
    assert_eq!(components["internal"], serde_json::json!([null]));
}

#[test]
fn test_unchanged_loadout_is_written_once() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let first = run(config(&inputs, &output, ASP_PROFILE, 1_436_860_800)).unwrap();
    let second = run(config(&inputs, &output, ASP_PROFILE, 1_436_864_400)).unwrap();

    assert!(first.outcome.was_written());
    assert!(matches!(second.outcome, PersistOutcome::SkippedDuplicate { .. }));
    assert_eq!(second.outcome.path(), first.outcome.path());
    assert_eq!(exported_files(&output).len(), 1);
}

#[test]
fn test_changed_loadout_gets_a_new_file() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    run(config(&inputs, &output, ASP_PROFILE, 1_436_860_800)).unwrap();
    let refitted = ASP_PROFILE.replace(r#""TinyHardpoint2": null"#, r#""TinyHardpoint2": {"module": "Hpt_ChaffLauncher_Tiny"}"#);
    let summary = run(config(&inputs, &output, &refitted, 1_436_864_400)).unwrap();

    assert!(summary.outcome.was_written());
    assert_eq!(exported_files(&output).len(), 2);
}

#[test]
fn test_other_ships_do_not_suppress_export() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let viper = r#"{"ship": {"name": "Viper", "modules": {"SmallHardpoint1": null}}}"#;

    run(config(&inputs, &output, ASP_PROFILE, 1_436_860_800)).unwrap();
    let summary = run(config(&inputs, &output, viper, 1_436_860_800)).unwrap();

    assert!(summary.outcome.was_written());
    assert_eq!(exported_files(&output).len(), 2);
}

#[test]
fn test_mapping_gap_writes_nothing() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut cfg = config(
        &inputs,
        &output,
        r#"{"ship": {"name": "Eagle", "modules": {"SmallHardpoint1": {"module": "Hpt_Odd"}}}}"#,
        1_436_860_800,
    );
    cfg.catalog = write_fixture(
        inputs.path(),
        "odd.json",
        r#"{"Hpt_Odd": {"name": "Pulse Laser", "category": "hardpoint", "class": "1", "rating": "F", "mount": "Pivoting"}}"#,
    );

    let result = run(cfg);

    assert!(matches!(result, Err(ExportError::MappingError { .. })));
    assert!(exported_files(&output).is_empty());
}

#[test]
fn test_blank_missile_guidance_writes_nothing() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut cfg = config(
        &inputs,
        &output,
        r#"{"ship": {"name": "Vulture", "modules": {"SmallHardpoint1": {"module": "Hpt_Dumbfire"}}}}"#,
        1_436_860_800,
    );
    cfg.catalog = write_fixture(
        inputs.path(),
        "missiles.json",
        r#"{"Hpt_Dumbfire": {"name": "Missile Rack", "category": "hardpoint", "class": "2", "rating": "B", "mount": "Fixed", "guidance": ""}}"#,
    );

    match run(cfg) {
        Err(ExportError::MappingError { slot, .. }) => assert_eq!(slot, "SmallHardpoint1"),
        other => panic!("expected a mapping error, got {:?}", other.map(|s| s.ship)),
    }
    assert!(exported_files(&output).is_empty());
}

#[test]
fn test_missing_output_directory_is_a_storage_error() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut cfg = config(&inputs, &output, ASP_PROFILE, 1_436_860_800);
    cfg.output_path = output.path().join("gone").to_str().unwrap().to_string();

    assert!(matches!(run(cfg), Err(ExportError::StorageError { .. })));
}
