//! CSV Upload Parsing

use csv::ReaderBuilder;
use signal_table::{Column, Table};

use crate::error::ValidationError;

/// Parse uploaded bytes as a delimited table with a header row.
///
/// A column becomes numeric only when every one of its cells parses as a
/// float; otherwise the raw cells are kept as text. Ragged records and
/// invalid UTF-8 surface as [`ValidationError::MalformedInput`] with the
/// parser's diagnostic.
pub(crate) fn parse_csv(raw: &[u8]) -> Result<Table, ValidationError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ValidationError::MalformedInput(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ValidationError::MalformedInput(
            "missing header row".to_string(),
        ));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| ValidationError::MalformedInput(e.to_string()))?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }
    if cells[0].is_empty() {
        return Err(ValidationError::MalformedInput(
            "no data rows after the header".to_string(),
        ));
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw_cells)| {
            let parsed: Result<Vec<f64>, _> =
                raw_cells.iter().map(|c| c.trim().parse::<f64>()).collect();
            match parsed {
                Ok(values) => Column::numeric(name, values),
                Err(_) => Column::text(name, raw_cells),
            }
        })
        .collect();

    Ok(Table::new(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_table::ColumnData;

    #[test]
    fn test_parses_header_and_typed_columns() {
        let table = parse_csv(b"Time,ch1,note\n0,1.5,steady\n1,2.5,rising\n").unwrap();
        assert_eq!(table.column_names(), vec!["Time", "ch1", "note"]);
        assert_eq!(
            table.column("ch1").unwrap().data,
            ColumnData::Numeric(vec![1.5, 2.5])
        );
        assert_eq!(
            table.column("note").unwrap().data,
            ColumnData::Text(vec!["steady".to_string(), "rising".to_string()])
        );
    }

    #[test]
    fn test_mixed_cells_make_a_text_column() {
        let table = parse_csv(b"Time,ch1\n0,1.0\n1,n/a\n").unwrap();
        assert!(matches!(
            table.column("ch1").unwrap().data,
            ColumnData::Text(_)
        ));
    }

    #[test]
    fn test_ragged_record_is_malformed() {
        let err = parse_csv(b"Time,ch1\n0,1.0\n1\n").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(
            parse_csv(b"").unwrap_err(),
            ValidationError::MalformedInput(_)
        ));
    }

    #[test]
    fn test_header_only_input_is_malformed() {
        let err = parse_csv(b"Time,ch1\n").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedInput("no data rows after the header".to_string())
        );
    }

    #[test]
    fn test_whitespace_around_numbers_still_numeric() {
        let table = parse_csv(b"Time,ch1\n0, 1.0\n1, 2.0\n").unwrap();
        assert_eq!(
            table.column("ch1").unwrap().data,
            ColumnData::Numeric(vec![1.0, 2.0])
        );
    }
}
