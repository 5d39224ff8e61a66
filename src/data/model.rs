use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

/// Column holding the free-text place identifier. Lowercased on load so the
/// map UI can join it against geo data without case juggling.
pub const REGION_NAME_COLUMN: &str = "State/UT/City";

/// Column holding the category label (`State`, `UT`, `City`). The only
/// column the API filters on; case is preserved.
pub const REGION_TYPE_COLUMN: &str = "region_type";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Column types are inferred once at load time;
/// `Null` marks an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Render the cell as text for normalisation. `Null` has no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::String(s) => Some(s.clone()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Null => None,
        }
    }
}

// Serialize by hand so JSON output keeps the inferred types: integers and
// floats stay numbers, text stays a string, empty cells become null.
impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One row, as a flat column-name → value mapping.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// AccidentTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full in-memory dataset. Built once at startup and never mutated;
/// request handlers share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AccidentTable {
    /// All records, in source-file row order.
    pub records: Vec<Record>,
    /// Column names, in header order.
    pub columns: Vec<String>,
    /// Distinct `region_type` values present, sorted.
    pub region_types: BTreeSet<String>,
}

impl AccidentTable {
    /// Build the table and index the distinct region types.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut region_types = BTreeSet::new();
        for record in &records {
            if let Some(CellValue::String(t)) = record.get(REGION_TYPE_COLUMN) {
                region_types.insert(t.clone());
            }
        }
        AccidentTable {
            records,
            columns,
            region_types,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn to_text_coerces_numbers() {
        assert_eq!(CellValue::Integer(42).to_text(), Some("42".to_string()));
        assert_eq!(CellValue::Float(1.5).to_text(), Some("1.5".to_string()));
        assert_eq!(
            CellValue::String("Delhi".to_string()).to_text(),
            Some("Delhi".to_string())
        );
        assert_eq!(CellValue::Null.to_text(), None);
    }

    #[test]
    fn from_records_indexes_distinct_region_types() {
        let records = vec![
            record(&[(REGION_TYPE_COLUMN, CellValue::String("State".into()))]),
            record(&[(REGION_TYPE_COLUMN, CellValue::String("City".into()))]),
            record(&[(REGION_TYPE_COLUMN, CellValue::String("State".into()))]),
            record(&[(REGION_TYPE_COLUMN, CellValue::Null)]),
        ];
        let table = AccidentTable::from_records(vec![REGION_TYPE_COLUMN.to_string()], records);

        assert_eq!(table.len(), 4);
        let types: Vec<&str> = table.region_types.iter().map(|s| s.as_str()).collect();
        assert_eq!(types, vec!["City", "State"]);
    }

    #[test]
    fn records_serialize_with_typed_json_values() {
        let rec = record(&[
            ("name", CellValue::String("delhi".into())),
            ("cases", CellValue::Integer(5000)),
            ("risk_score", CellValue::Float(7.25)),
            ("notes", CellValue::Null),
        ]);
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["name"], serde_json::json!("delhi"));
        assert_eq!(json["cases"], serde_json::json!(5000));
        assert_eq!(json["risk_score"], serde_json::json!(7.25));
        assert!(json["notes"].is_null());
    }
}
