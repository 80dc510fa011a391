use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Outcome of one optimization trial.
///
/// `helix` and `base_count` are empty for trials that measure the scene without modifying it,
/// such as the initial baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub strategy: String,
    pub helix: Option<usize>,
    pub base_count: Option<u32>,
    pub total: f64,
    pub accepted: bool,
    pub best: f64,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Writes `records` as CSV with a header row to `path`, replacing any existing file.
pub fn write_trace(path: &Path, records: &[TrialRecord]) -> Result<(), TraceError> {
    let to_error = |source: csv::Error| TraceError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(to_error)?;
    for record in records {
        writer.serialize(record).map_err(to_error)?;
    }
    writer.flush().map_err(|e| to_error(e.into()))?;
    Ok(())
}

/// Reads a trace previously written by [`write_trace`].
pub fn read_trace(path: &Path) -> Result<Vec<TrialRecord>, TraceError> {
    let to_error = |source: csv::Error| TraceError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(to_error)?;
    reader
        .deserialize::<TrialRecord>()
        .map(|result| result.map_err(to_error))
        .collect()
}
