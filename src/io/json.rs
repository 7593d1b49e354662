//! JSON adapter: an array of records, one object per row

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Map;

use crate::model::{Table, Value};

/// Read an array of JSON objects into a table.
///
/// Column names and kinds come from the first record (a JSON `null` there
/// leaves the column untyped). Later records are matched by field name;
/// missing fields come in as nulls.
pub fn read(path: &Path) -> Result<Table> {
    let file =
        File::open(path).with_context(|| format!("failed to open file: {}", path.display()))?;
    let records: Vec<Map<String, serde_json::Value>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse JSON records: {}", path.display()))?;

    let Some(first) = records.first() else {
        bail!("JSON file holds no records: {}", path.display());
    };

    let names: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut kinds = Vec::with_capacity(names.len());
    for (name, raw) in first {
        let value: Value = serde_json::from_value(raw.clone())
            .with_context(|| format!("unsupported JSON value in field {name}"))?;
        kinds.push(value.kind());
    }
    let mut table = Table::empty(&names, &kinds)?;

    for (i, record) in records.iter().enumerate() {
        let mut row = Vec::with_capacity(names.len());
        for name in &names {
            let value = match record.get(*name) {
                Some(raw) => serde_json::from_value(raw.clone())
                    .with_context(|| format!("unsupported JSON value in field {name}"))?,
                None => Value::Null,
            };
            row.push(value);
        }
        table
            .append_row(row)
            .with_context(|| format!("failed to ingest JSON record {i}"))?;
    }

    Ok(table)
}

/// Write a table as a pretty-printed array of records, one object per row
/// with fields in column order. Nulls become JSON `null`.
pub fn write(path: &Path, table: &Table) -> Result<()> {
    let (_, rows) = table.shape();
    let mut records = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut record = Map::new();
        for (name, value) in table.cols().into_iter().zip(table.row(i)?) {
            let raw = serde_json::to_value(&value)
                .with_context(|| format!("failed to encode field {name}"))?;
            record.insert(name.to_string(), raw);
        }
        records.push(record);
    }
    let file =
        File::create(path).with_context(|| format!("failed to create file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)
        .with_context(|| format!("failed to write JSON: {}", path.display()))?;
    Ok(())
}
