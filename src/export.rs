//! Flattening of schema-less records into CSV.
//!
//! Records returned by the API do not share a fixed key set, so the header is
//! the sorted union of every key in the batch and each record is laid out
//! against it. A field missing from a record is written as the null marker,
//! which defaults to `\N` so it never collides with an empty string (written
//! as an empty field).
//!
//! A batch whose header is empty (no records, or only records without keys)
//! is written as bare lines: one for the header and one per record. CSV
//! readers skip blank lines, so such a file reads back as zero rows and the
//! record count is not recoverable from it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{OecError, Result};
use crate::schema::{Header, Record};

pub const DEFAULT_NULL_MARKER: &str = "\\N";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Written for header fields absent from a record, and for explicit JSON nulls.
    pub null_marker: String,
    /// Write through a temporary file and rename over the destination on success.
    pub atomic: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            atomic: false,
        }
    }
}

/// Returns the union of all keys across `records`, sorted by byte order.
///
/// The result does not depend on the order of `records`.
pub fn resolve_header(records: &[Record]) -> Header {
    let fields: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();
    fields.into_iter().map(str::to_owned).collect()
}

// textual form of a single cell; only arrays and objects go through serde_json,
// which cannot fail on a `Value`, so `OecError::Conversion` is not reachable
// from `Record` input today
fn render_value(value: &Value, options: &ExportOptions) -> serde_json::Result<String> {
    match value {
        Value::Null => Ok(options.null_marker.clone()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value),
    }
}

fn to_row(
    index: usize,
    record: &Record,
    header: &[String],
    options: &ExportOptions,
) -> Result<Vec<String>> {
    header
        .iter()
        .map(|field| match record.get(field) {
            Some(value) => render_value(value, options).map_err(|source| OecError::Conversion {
                field: field.clone(),
                record: index,
                source,
            }),
            None => Ok(options.null_marker.clone()),
        })
        .collect()
}

/// Writes `header` followed by one row per record to `sink` and hands the
/// sink back once the CSV writer has been flushed.
///
/// Records keep their input order; cells follow header order. A sink that
/// fails to accept bytes gives `OecError::Io` whether the failure surfaces
/// mid-batch or at the final flush.
pub fn write_csv<W: Write>(
    records: &[Record],
    header: &[String],
    mut sink: W,
    options: &ExportOptions,
) -> Result<W> {
    tracing::debug!(
        records = records.len(),
        columns = header.len(),
        "Writing CSV"
    );

    // csv quotes a zero-field record as `""`, which would read back as one
    // empty column; an empty header is a bare line instead
    if header.is_empty() {
        for _ in 0..=records.len() {
            sink.write_all(b"\n")?;
        }
        return Ok(sink);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(header)?;
    for (index, record) in records.iter().enumerate() {
        let row = to_row(index, record, header, options)?;
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| OecError::Io(e.into_error()))
}

/// Exports `records` to the CSV file at `path`, creating or truncating it.
///
/// A failure part way through leaves whatever was already written; use
/// [`data_to_csv_atomic`] when the destination must never be partial.
pub fn data_to_csv(records: &[Record], path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
    let path = path.as_ref();
    let header = resolve_header(records);

    let file = File::create(path)?;
    let mut sink = write_csv(records, &header, BufWriter::new(file), options)?;
    sink.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(())
}

/// Same output as [`data_to_csv`], but written to a temporary file next to
/// `path` and renamed over it only once everything has been flushed.
///
/// On error the temporary file is removed and `path` is left as it was.
pub fn data_to_csv_atomic(
    records: &[Record],
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let header = resolve_header(records);

    let temp = NamedTempFile::new_in(parent)?;
    let sink = write_csv(records, &header, BufWriter::new(temp), options)?;
    let temp = sink.into_inner().map_err(|e| e.into_error())?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), rows = records.len(), "CSV written atomically");
    Ok(())
}

/// Picks [`data_to_csv_atomic`] or [`data_to_csv`] from `options.atomic`.
pub fn save_csv(records: &[Record], path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
    if options.atomic {
        data_to_csv_atomic(records, path, options)
    } else {
        data_to_csv(records, path, options)
    }
}
