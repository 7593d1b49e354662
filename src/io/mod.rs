//! Adapters reading and writing tables through the core contract
//!
//! Adapters hold no table logic of their own: ingest goes through
//! `Table::empty` plus one `append_row` per source record, export through
//! `cols`, `shape`, and `row`.

pub mod csv;
pub mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Table;

/// Supported adapter formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => bail!("unsupported file format: {:?}", other),
        }
    }

    pub fn read(self, path: &Path) -> Result<Table> {
        match self {
            Format::Csv => csv::read(path),
            Format::Json => json::read(path),
        }
    }

    pub fn write(self, path: &Path, table: &Table) -> Result<()> {
        match self {
            Format::Csv => csv::write(path, table),
            Format::Json => json::write(path, table),
        }
    }
}

/// Read a table, picking the adapter from the file extension.
pub fn read_table(path: &Path) -> Result<Table> {
    Format::from_path(path)?.read(path)
}

/// Write a table, picking the adapter from the file extension.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    Format::from_path(path)?.write(path, table)
}
