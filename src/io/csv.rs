//! CSV adapter

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Kind, Table, Value};

/// Read a CSV file into a table.
///
/// The header row becomes the columns, every column is string-kind (like
/// delimited text itself), and empty fields come in as nulls. Short records
/// are padded with nulls to the full width.
pub fn read(path: &Path) -> Result<Table> {
    let file =
        File::open(path).with_context(|| format!("failed to open file: {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().context("failed to read CSV headers")?.clone();
    let names: Vec<&str> = headers.iter().collect();
    let kinds = vec![Kind::Str; names.len()];
    let mut table = Table::empty(&names, &kinds)?;

    for (i, record) in reader.records().enumerate() {
        // +2: 1-indexing plus the header line.
        let record = record.with_context(|| format!("failed to read CSV row {}", i + 2))?;
        let mut row: Vec<Value> = record.iter().map(parse_field).collect();
        // Pads short records and trims long ones to the header width.
        row.resize(table.n_cols(), Value::Null);
        table
            .append_row(row)
            .with_context(|| format!("failed to ingest CSV row {}", i + 2))?;
    }

    Ok(table)
}

fn parse_field(field: &str) -> Value {
    if field.is_empty() {
        Value::Null
    } else {
        Value::from(field)
    }
}

/// Write a table as CSV, one record per row in column order. Nulls become
/// empty fields.
pub fn write(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create file: {}", path.display()))?;
    writer.write_record(table.cols())?;
    let (_, rows) = table.shape();
    for i in 0..rows {
        let row = table.row(i)?;
        writer.write_record(row.iter().map(Value::display))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_types_every_column_as_str() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drinks.csv");
        std::fs::write(&path, "drink,price\ncoke,2.99\npepsi,\n").unwrap();

        let table = read(&path).unwrap();
        assert_eq!(table.cols(), vec!["drink", "price"]);
        assert_eq!(table.kinds(), vec![Kind::Str, Kind::Str]);
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.row(0).unwrap()[1], Value::from("2.99"));
        assert_eq!(table.row(1).unwrap()[1], Value::Null);
    }

    #[test]
    fn short_records_are_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c\n1\n").unwrap();

        let table = read(&path).unwrap();
        assert_eq!(
            table.row(0).unwrap(),
            vec![Value::from("1"), Value::Null, Value::Null]
        );
    }

    #[test]
    fn round_trip_preserves_rows_and_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "b,a\nx,1\ny,2\n").unwrap();

        let table = read(&path).unwrap();
        let back = dir.path().join("back.csv");
        write(&back, &table).unwrap();
        let again = read(&back).unwrap();

        assert_eq!(again.cols(), vec!["b", "a"]);
        assert_eq!(again, table);
    }
}
