//! Common types used across PDE

use serde::{Deserialize, Serialize};

/// Cell text that spreadsheet exports emit for a missing value.
pub const ABSENCE_MARKER: &str = "nan";

/// Returns true when a cell carries no usable value.
///
/// Empty, whitespace-only, and [`ABSENCE_MARKER`] cells are all treated as absent.
pub fn is_absent(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == ABSENCE_MARKER
}

// ============================================================================
// Tabular Model
// ============================================================================

/// An ordered set of product rows sharing one column schema.
///
/// Row order is insertion order and is preserved through enrichment, so the
/// first rows of a table are also the first rows of any preview or output file.
///
/// # Examples
///
/// ```rust
/// use pde_common::types::Table;
///
/// let mut table = Table::new(vec!["part_number".into(), "description".into()]);
/// table.push_row(vec!["VLV-2IN".into()]);
///
/// let record = table.record(0).unwrap();
/// assert_eq!(record.value("part_number"), Some("VLV-2IN"));
/// assert_eq!(record.value("description"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given schema
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column names in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, padding short rows with empty cells and dropping cells
    /// beyond the schema width.
    pub fn push_row(&mut self, mut values: Vec<String>) {
        values.resize(self.columns.len(), String::new());
        self.rows.push(values);
    }

    /// Appends `name` to the schema with an empty cell in every row.
    ///
    /// Returns `true` if the column was added, `false` if it already existed.
    pub fn ensure_column(&mut self, name: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        true
    }

    /// Read-only view of the row at `index`
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Iterates rows in table order
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        let columns = &self.columns;
        self.rows.iter().map(move |values| Record { columns, values })
    }

    /// Iterates rows in table order with write access to their cells
    pub fn records_mut(&mut self) -> impl Iterator<Item = RecordMut<'_>> {
        let columns = &self.columns;
        self.rows
            .iter_mut()
            .map(move |values| RecordMut { columns, values })
    }

    /// Raw row cells in schema order, for writers
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Read-only view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    /// Cell text exactly as stored, or `None` if the column does not exist
    pub fn raw(&self, field: &str) -> Option<&'a str> {
        lookup(self.columns, self.values, field)
    }

    /// Cell text if the column exists and the value is not absent
    pub fn value(&self, field: &str) -> Option<&'a str> {
        self.raw(field).filter(|v| !is_absent(v))
    }

    /// `(column, value)` pairs in schema order
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Renders the row as a JSON object keyed by column name
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields()
            .map(|(c, v)| (c.to_string(), serde_json::Value::String(v.to_string())))
            .collect()
    }
}

/// Mutable view of one row.
#[derive(Debug)]
pub struct RecordMut<'a> {
    columns: &'a [String],
    values: &'a mut Vec<String>,
}

impl RecordMut<'_> {
    pub fn raw(&self, field: &str) -> Option<&str> {
        lookup(self.columns, self.values.as_slice(), field)
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.raw(field).filter(|v| !is_absent(v))
    }

    /// Writes `value` into `field` only if the existing cell is absent.
    ///
    /// Returns `true` if the cell was written. Unknown columns are never written.
    pub fn fill(&mut self, field: &str, value: &str) -> bool {
        match self.index_of(field) {
            Some(idx) if is_absent(&self.values[idx]) => {
                self.values[idx] = value.to_string();
                true
            },
            _ => false,
        }
    }

    /// Overwrites `field` unconditionally. Returns `false` if the column is unknown.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.index_of(field) {
            Some(idx) => {
                self.values[idx] = value.into();
                true
            },
            None => false,
        }
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == field)
    }
}

fn lookup<'a>(columns: &[String], values: &'a [String], field: &str) -> Option<&'a str> {
    columns
        .iter()
        .position(|c| c == field)
        .and_then(|idx| values.get(idx))
        .map(String::as_str)
}

// ============================================================================
// Run Summary
// ============================================================================

/// Aggregate counters describing one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Rows in the input table
    pub total_products: usize,

    /// Rows where at least one field was written
    pub enriched_products: usize,

    /// Enrichment columns appended to the schema during the pass
    pub new_fields_added: usize,

    /// Per-row failure messages
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["part_number".into(), "voltage".into()]);
        table.push_row(vec!["A-240V".into(), "480".into()]);
        table.push_row(vec!["nan".into(), "  ".into()]);
        table
    }

    #[test]
    fn test_is_absent() {
        assert!(is_absent(""));
        assert!(is_absent("   "));
        assert!(is_absent("nan"));
        assert!(!is_absent("0"));
        assert!(!is_absent("NaN-valve"));
    }

    #[test]
    fn test_value_hides_absent_cells() {
        let table = sample();
        let second = table.record(1).unwrap();
        assert_eq!(second.raw("part_number"), Some("nan"));
        assert_eq!(second.value("part_number"), None);
        assert_eq!(second.value("voltage"), None);
        assert_eq!(second.value("missing"), None);
    }

    #[test]
    fn test_fill_does_not_overwrite() {
        let mut table = sample();
        let mut rows = table.records_mut();

        let mut first = rows.next().unwrap();
        assert!(!first.fill("voltage", "240"));
        assert_eq!(first.raw("voltage"), Some("480"));

        let mut second = rows.next().unwrap();
        assert!(second.fill("voltage", "120"));
        assert_eq!(second.raw("voltage"), Some("120"));
        assert!(!second.fill("no_such_column", "x"));
    }

    #[test]
    fn test_ensure_column_backfills_rows() {
        let mut table = sample();
        assert!(table.ensure_column("category"));
        assert!(!table.ensure_column("category"));
        assert_eq!(table.columns().last().map(String::as_str), Some("category"));
        assert!(table.records().all(|r| r.raw("category") == Some("")));
    }

    #[test]
    fn test_to_json_preserves_columns() {
        let table = sample();
        let json = table.record(0).unwrap().to_json();
        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["part_number", "voltage"]);
        assert_eq!(json["voltage"], "480");
    }

    #[test]
    fn test_run_stats_serialization() {
        let stats = RunStats {
            total_products: 3,
            enriched_products: 2,
            new_fields_added: 7,
            errors: vec![],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_products"], 3);
        assert_eq!(json["enriched_products"], 2);
        assert_eq!(json["new_fields_added"], 7);
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_push_row_matches_schema_width(cells in prop::collection::vec(".*", 0..8)) {
            let mut table = Table::new(vec!["a".into(), "b".into(), "c".into()]);
            table.push_row(cells);
            prop_assert_eq!(table.rows().next().unwrap().len(), 3);
        }
    }
}
