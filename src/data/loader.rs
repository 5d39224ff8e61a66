use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{
    AccidentTable, CellValue, Record, REGION_NAME_COLUMN, REGION_TYPE_COLUMN,
};

/// The dataset bundled with the application.
const DATA_FILE: &str = "accident_map_ready.csv";

/// Path of the bundled dataset, resolved against the crate root rather than
/// the process working directory.
pub fn default_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(DATA_FILE)
}

/// Load the dataset from a file on disk.
pub fn load_table(path: &Path) -> Result<AccidentTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_table(file)
}

/// Parse a CSV dataset from any reader: header row supplies column names,
/// column types are inferred, then the two region columns are normalised.
pub fn read_table<R: io::Read>(reader: R) -> Result<AccidentTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|col| infer_column_type(rows.iter().map(|row| row.get(col).unwrap_or(""))))
        .collect();

    let mut records: Vec<Record> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .zip(&column_types)
                .map(|((name, raw), ty)| (name.clone(), parse_cell(raw, *ty)))
                .collect()
        })
        .collect();

    normalize_records(&mut records);

    Ok(AccidentTable::from_records(headers, records))
}

// ---------------------------------------------------------------------------
// Column type inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnType {
    Integer,
    Float,
    Text,
}

/// Decide a column's type from all of its raw values. A column is integer
/// when every cell parses as `i64`, float when every non-empty cell parses
/// as `f64` (missing cells promote integer to float), text otherwise.
fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut ty = ColumnType::Integer;
    for raw in values {
        let v = raw.trim();
        if v.is_empty() {
            if ty == ColumnType::Integer {
                ty = ColumnType::Float;
            }
            continue;
        }
        match ty {
            ColumnType::Integer if v.parse::<i64>().is_ok() => {}
            ColumnType::Integer | ColumnType::Float => {
                if v.parse::<f64>().is_ok() {
                    ty = ColumnType::Float;
                } else {
                    return ColumnType::Text;
                }
            }
            ColumnType::Text => return ColumnType::Text,
        }
    }
    ty
}

/// Convert one raw cell according to its column type. Empty cells become
/// `Null` regardless of column type.
fn parse_cell(raw: &str, ty: ColumnType) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match ty {
        ColumnType::Integer => match trimmed.parse::<i64>() {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::String(raw.to_string()),
        },
        ColumnType::Float => match trimmed.parse::<f64>() {
            Ok(v) => CellValue::Float(v),
            Err(_) => CellValue::String(raw.to_string()),
        },
        ColumnType::Text => CellValue::String(raw.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Canonicalise the two columns the query surface depends on:
/// place names are trimmed and lowercased, region types only trimmed.
/// Null cells stay null.
fn normalize_records(records: &mut [Record]) {
    for record in records.iter_mut() {
        if let Some(cell) = record.get_mut(REGION_NAME_COLUMN) {
            if let Some(text) = cell.to_text() {
                *cell = CellValue::String(text.trim().to_lowercase());
            }
        }
        if let Some(cell) = record.get_mut(REGION_TYPE_COLUMN) {
            if let Some(text) = cell.to_text() {
                *cell = CellValue::String(text.trim().to_string());
            }
        }
    }
}
