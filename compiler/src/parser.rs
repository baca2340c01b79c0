use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{error::ScriptError, types::RawRow};

/// Source file formats the row parser understands. Dispatch is by file
/// extension only; the content is never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<SourceFormat, ScriptError> {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            other => Err(ScriptError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read a source file and produce its raw rows, in source order. No state is
/// retained on failure.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, ScriptError> {
    let format = SourceFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| ScriptError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = match format {
        SourceFormat::Csv => parse_csv(&text),
        SourceFormat::Json => parse_json(&text),
    }?;
    debug!(rows = rows.len(), ?format, "parsed source file");
    Ok(rows)
}

/// Parse delimited text, one row per non-empty line. Double-quoted fields may
/// contain commas and `""` escapes.
fn parse_csv(text: &str) -> Result<Vec<RawRow>, ScriptError> {
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_delimited_line)
        .collect())
}

fn split_delimited_line(line: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.is_empty() {
            in_quotes = true;
        } else if c == ',' {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    fields.push(field);
    fields
}

/// Parse a JSON source. The top-level value must be an array or an object;
/// each of its values is taken, in source order, as one row. Object key order
/// is preserved (`serde_json` with `preserve_order`).
fn parse_json(text: &str) -> Result<Vec<RawRow>, ScriptError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ScriptError::ParseFailure(e.to_string()))?;

    let entries: Vec<&Value> = match &value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => {
            return Err(ScriptError::ParseFailure(
                "top-level value is not an array or object".to_string(),
            ))
        }
    };

    let mut rows = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let items = entry
            .as_array()
            .ok_or_else(|| ScriptError::ParseFailure(format!("row {} is not an array", i + 1)))?;
        let mut row = Vec::with_capacity(items.len());
        for item in items {
            row.push(scalar_text(item).ok_or_else(|| {
                ScriptError::ParseFailure(format!("row {} contains a non-scalar value", i + 1))
            })?);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Coerce a JSON scalar to field text the way a spreadsheet export would:
/// strings verbatim, numbers and booleans via their display form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
