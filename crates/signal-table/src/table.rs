//! Column-Oriented Table

use serde::{Deserialize, Serialize};

/// Values held by a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnData {
    /// Every cell parsed as a float
    Numeric(Vec<f64>),
    /// At least one cell did not parse; cells kept verbatim
    Text(Vec<String>),
}

impl ColumnData {
    /// Number of cells in the column
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    /// Whether the column holds no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn truncate(&mut self, rows: usize) {
        match self {
            ColumnData::Numeric(values) => values.truncate(rows),
            ColumnData::Text(values) => values.truncate(rows),
        }
    }

    fn head(&self, rows: usize) -> ColumnData {
        let mut data = self.clone();
        data.truncate(rows);
        data
    }
}

/// A named column of an uploaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Column holding float values
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Column holding raw text cells
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Whether this is the conventional time axis (never transformed)
    pub fn is_time(&self) -> bool {
        self.name.eq_ignore_ascii_case("time")
    }
}

/// Ordered collection of equally sized columns.
///
/// Tables are value-like: pipeline stages take a table by reference and
/// produce a new one, so the uploaded original stays available for the
/// before/after preview.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns; callers are responsible for keeping
    /// column lengths equal (the CSV parser enforces this for uploads)
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// All columns, in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names, in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (all columns share it)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// Drop rows beyond `rows`, in place
    pub fn truncate_rows(&mut self, rows: usize) {
        for column in &mut self.columns {
            column.data.truncate(rows);
        }
    }

    /// First `rows` rows as a new table (preview slice)
    pub fn head(&self, rows: usize) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.head(rows),
                })
                .collect(),
        }
    }

    /// New table with `column` inserted at position 0
    pub fn prepend_column(&self, column: Column) -> Table {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(column);
        columns.extend(self.columns.iter().cloned());
        Table { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("Time", vec![0.0, 1.0, 2.0]),
            Column::numeric("ch1", vec![1.0, 2.0, 3.0]),
            Column::text("label", vec!["a".into(), "b".into(), "c".into()]),
        ])
    }

    #[test]
    fn test_row_and_column_counts() {
        let table = sample_table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column_names(), vec!["Time", "ch1", "label"]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_head_shorter_than_table() {
        let head = sample_table().head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.column_names(), vec!["Time", "ch1", "label"]);
        assert_eq!(
            head.column("ch1").unwrap().data,
            ColumnData::Numeric(vec![1.0, 2.0])
        );
    }

    #[test]
    fn test_head_longer_than_table_is_identity() {
        let table = sample_table();
        assert_eq!(table.head(10), table);
    }

    #[test]
    fn test_truncate_rows() {
        let mut table = sample_table();
        table.truncate_rows(1);
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.column("label").unwrap().data,
            ColumnData::Text(vec!["a".to_string()])
        );
    }

    #[test]
    fn test_prepend_column_keeps_order() {
        let table = sample_table();
        let stamped = table.prepend_column(Column::text(
            "mark",
            vec!["x".into(), "x".into(), "x".into()],
        ));
        assert_eq!(stamped.column_names(), vec!["mark", "Time", "ch1", "label"]);
        // original untouched
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_time_column_detection_is_case_insensitive() {
        assert!(Column::numeric("Time", vec![]).is_time());
        assert!(Column::numeric("TIME", vec![]).is_time());
        assert!(Column::numeric("time", vec![]).is_time());
        assert!(!Column::numeric("timestamp", vec![]).is_time());
    }
}
