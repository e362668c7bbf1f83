//! Durable storage for the forecast artifact and its metrics.
//!
//! Writers publish atomically: content goes to a temporary file in the
//! destination directory and is renamed into place only once fully
//! written. Readers therefore never observe a partial artifact, and a
//! failed run leaves the previously published files untouched.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::core::ForecastRecord;
use crate::error::Result;
use crate::utils::ForecastMetrics;

/// Write the forecast artifact as `timestamp,predicted_index` CSV rows
/// with ISO-8601 timestamps, publishing atomically.
pub fn write_forecast_csv(path: &Path, records: &[ForecastRecord]) -> Result<()> {
    let tmp = temp_sibling(path);

    let written: Result<()> = (|| {
        let mut writer = csv::Writer::from_path(&tmp)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    })();
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path)?;
    info!("published forecast artifact: {} records at {}", records.len(), path.display());
    Ok(())
}

/// Read a published forecast artifact.
pub fn read_forecast_csv(path: &Path) -> Result<Vec<ForecastRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .map(|row| row.map_err(Into::into))
        .collect()
}

/// Write the metrics record as JSON, publishing atomically.
pub fn write_metrics_json(path: &Path, metrics: &ForecastMetrics) -> Result<()> {
    let tmp = temp_sibling(path);

    let written: Result<()> = (|| {
        let text = serde_json::to_string_pretty(metrics)?;
        fs::write(&tmp, text)?;
        Ok(())
    })();
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

/// Read a published metrics record.
pub fn read_metrics_json(path: &Path) -> Result<ForecastMetrics> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
