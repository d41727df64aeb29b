use std::fs;
use std::path::Path;

use gemdash_core::materialize::ResultSet;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes the rendered result as CSV, header first. Returns the number of
/// data rows written.
pub fn export_csv(path: &Path, results: &ResultSet) -> Result<usize, ExportError> {
    let mut content = String::new();
    push_csv_line(&mut content, results.columns.iter().map(String::as_str));
    for row in &results.rows {
        push_csv_line(&mut content, row.iter().map(String::as_str));
    }

    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(results.rows.len())
}

/// Writes the rendered result as a pretty JSON array of objects keyed by
/// header label.
pub fn export_json(path: &Path, results: &ResultSet) -> Result<usize, ExportError> {
    let mut records = Vec::with_capacity(results.rows.len());
    for row in &results.rows {
        let mut object = Map::with_capacity(results.columns.len());
        for (column_index, header) in results.columns.iter().enumerate() {
            let value = row
                .get(column_index)
                .map_or(Value::Null, |cell| json!(cell));
            object.insert(header.clone(), value);
        }
        records.push(Value::Object(object));
    }

    let payload = serde_json::to_string_pretty(&records)?;
    fs::write(path, payload).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(results.rows.len())
}

fn push_csv_line<'a>(content: &mut String, cells: impl Iterator<Item = &'a str>) {
    let line = cells.map(csv_escape).collect::<Vec<_>>().join(",");
    content.push_str(&line);
    content.push('\n');
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
