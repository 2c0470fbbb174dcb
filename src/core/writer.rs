use crate::domain::model::{LoadoutDocument, PersistOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use crate::utils::serialize::{to_json_string, JsonLayout};
use chrono::{Local, NaiveDateTime, TimeZone};
use regex::Regex;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H.%M.%S";

/// Writes `document` as `<ship>.<timestamp>.json`, unless the most recent export
/// for `ship` already has exactly the same content.
///
/// The duplicate check and the write are not atomic: two concurrent runs for the
/// same ship can both decide to write. Only one writer per output directory is
/// supported.
pub fn persist<S: Storage + ?Sized>(
    document: &LoadoutDocument,
    ship: &str,
    storage: &S,
    timestamp: NaiveDateTime,
    layout: JsonLayout,
) -> Result<PersistOutcome> {
    let text = to_json_string(document, layout)?;

    if let Some(previous) = latest_export(storage, ship)? {
        let bytes = storage.read_file(&previous)?;
        let existing = String::from_utf8_lossy(&bytes)
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        if existing == text {
            tracing::info!("{} is unchanged since {}; not writing", ship, previous);
            return Ok(PersistOutcome::SkippedDuplicate {
                path: storage.locate(&previous),
            });
        }
        tracing::debug!("{} differs from {}", ship, previous);
    }

    let filename = export_filename(ship, timestamp);
    storage.write_file(&filename, text.as_bytes())?;
    let path = storage.locate(&filename);
    tracing::info!("Wrote {}", path);

    Ok(PersistOutcome::Written { path })
}

pub fn export_filename(ship: &str, timestamp: NaiveDateTime) -> String {
    format!("{}.{}.json", ship, timestamp.format(TIMESTAMP_FORMAT))
}

/// Name of the newest `<ship>.<timestamp>.json` in storage. Timestamps sort
/// lexicographically in time order, so the greatest name is the newest.
pub fn latest_export<S: Storage + ?Sized>(storage: &S, ship: &str) -> Result<Option<String>> {
    let pattern = export_pattern(ship)?;
    Ok(storage
        .list_files()?
        .into_iter()
        .filter(|name| pattern.is_match(name))
        .max())
}

fn export_pattern(ship: &str) -> Result<Regex> {
    let pattern = format!(
        r"^{}\.\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}\.\d{{2}}\.\d{{2}}\.json$",
        regex::escape(ship)
    );
    Regex::new(&pattern).map_err(|e| ExportError::ConfigError {
        message: format!("bad export pattern for '{}': {}", ship, e),
    })
}

/// Local wall-clock time for an epoch-seconds override, or now.
pub fn query_timestamp(query_time: Option<i64>) -> Result<NaiveDateTime> {
    match query_time {
        None => Ok(Local::now().naive_local()),
        Some(seconds) => Local
            .timestamp_opt(seconds, 0)
            .earliest()
            .map(|t| t.naive_local())
            .ok_or_else(|| ExportError::InvalidConfigValueError {
                field: "query_time".to_string(),
                value: seconds.to_string(),
                reason: "Not a representable timestamp".to_string(),
            }),
    }
}
