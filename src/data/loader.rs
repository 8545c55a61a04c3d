use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{booster_category, Dataset, LaunchRecord};
use crate::error::LoadError;

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)`,
///   `class` and `Booster Version`; other columns are ignored
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – the same four columns, any numeric width
///
/// This is the only place the raw file is read.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })
    };

    let rows = match ext.as_str() {
        "csv" => read_csv(open()?)?,
        "json" => read_json(open()?)?,
        "parquet" | "pq" => read_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = derive_records(rows)?;
    if dataset.is_empty() {
        log::warn!("{} contains no launches", path.display());
    }
    log::info!(
        "Loaded {} launches from {} ({} sites, booster categories {:?})",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.booster_categories()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw rows and the derivation pass
// ---------------------------------------------------------------------------

/// A row as it appears in the source file, before derivation.
#[derive(Debug, Clone, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    /// Read as a float in every format so `0.7` is rejected, not truncated.
    #[serde(rename = "class")]
    outcome_class: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
}

/// Single pass over the raw rows: validate the outcome class and derive
/// the booster category column.
fn derive_records(rows: Vec<RawLaunch>) -> Result<Dataset, LoadError> {
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let outcome_class = if raw.outcome_class == 0.0 {
                0
            } else if raw.outcome_class == 1.0 {
                1
            } else {
                return Err(LoadError::InvalidOutcome {
                    row,
                    value: raw.outcome_class,
                });
            };
            let category = booster_category(&raw.booster_version)
                .ok_or_else(|| LoadError::MalformedRecord {
                    row,
                    booster_version: raw.booster_version.clone(),
                })?
                .to_string();
            Ok(LaunchRecord {
                launch_site: raw.launch_site,
                payload_mass_kg: raw.payload_mass_kg,
                outcome_class,
                booster_version: raw.booster_version,
                booster_category: category,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(file: File) -> Result<Vec<RawLaunch>, LoadError> {
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version": "F9 v1.0  B0004"
///   },
///   ...
/// ]
/// ```
fn read_json(file: File) -> Result<Vec<RawLaunch>, LoadError> {
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch rows from a Parquet file written by Pandas or Polars.
/// Numeric columns are cast to `Float64`, text columns to `Utf8`.
fn read_parquet(file: File) -> Result<Vec<RawLaunch>, LoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = rows.len();

        let sites = string_column(&batch, COL_LAUNCH_SITE, offset)?;
        let payloads = f64_column(&batch, COL_PAYLOAD, offset)?;
        let classes = f64_column(&batch, COL_CLASS, offset)?;
        let boosters = string_column(&batch, COL_BOOSTER_VERSION, offset)?;

        for (((launch_site, payload_mass_kg), outcome_class), booster_version) in
            sites.into_iter().zip(payloads).zip(classes).zip(boosters)
        {
            rows.push(RawLaunch {
                launch_site,
                payload_mass_kg,
                outcome_class,
                booster_version,
            });
        }
    }
    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn column_as(batch: &RecordBatch, name: &str, ty: &DataType) -> Result<Arc<dyn Array>, LoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    Ok(cast(col, ty)?)
}

fn missing(offset: usize, row: usize, name: &str) -> LoadError {
    LoadError::MissingValue {
        row: offset + row,
        column: name.to_string(),
    }
}

fn string_column(batch: &RecordBatch, name: &str, offset: usize) -> Result<Vec<String>, LoadError> {
    let arr = column_as(batch, name, &DataType::Utf8)?;
    arr.as_string::<i32>()
        .iter()
        .enumerate()
        .map(|(i, v)| v.map(str::to_string).ok_or_else(|| missing(offset, i, name)))
        .collect()
}

fn f64_column(batch: &RecordBatch, name: &str, offset: usize) -> Result<Vec<f64>, LoadError> {
    let arr = column_as(batch, name, &DataType::Float64)?;
    arr.as_primitive::<Float64Type>()
        .iter()
        .enumerate()
        .map(|(i, v)| v.ok_or_else(|| missing(offset, i, name)))
        .collect()
}
