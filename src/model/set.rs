//! Set-like table combination: concat, union, intersect, filtering

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

use super::table::Table;
use super::value::Value;

impl Table {
    /// Schema-level merge of two tables' column sets.
    ///
    /// Columns are joined by name; on a collision `other`'s column wins.
    /// Row counts are not validated; smoothing reconciles them by padding.
    pub fn concat(&self, other: &Table) -> Table {
        let mut merged = self.clone();
        for (name, seq) in &other.columns {
            merged.columns.insert(name.clone(), seq.clone());
        }
        merged.smooth();
        merged
    }

    /// Row-wise concatenation: every row of `self`, then every row of
    /// `other`, matched up by column name.
    ///
    /// Both tables must declare the same column-name set (order may differ;
    /// the result keeps `self`'s order and kinds).
    pub fn union_all(&self, other: &Table) -> Result<Table> {
        self.check_same_name_set(other)?;
        Ok(self.map_cols(|seq| {
            // Presence is guaranteed by the schema check above.
            match other.col(seq.name()) {
                Some(theirs) => seq.concat(theirs),
                None => seq.clone(),
            }
        }))
    }

    /// Union without duplicates.
    ///
    /// Builds the result by scanning `other`'s rows and then `self`'s rows,
    /// appending each row only if an equal row is not already present. Row
    /// identity is full-width structural equality; the seen-set is hashed,
    /// which leaves the observable result identical to a linear scan.
    pub fn union(&self, other: &Table) -> Result<Table> {
        self.check_same_name_set(other)?;
        let mut result = self.map_cols(|seq| seq.head(0));
        let mut seen: FxHashSet<Vec<Value>> = FxHashSet::default();
        let names = self.cols();
        for i in 0..other.n_rows() {
            let row = gather_by_names(other, &names, i);
            if seen.insert(row.clone()) {
                result.append_row(row)?;
            }
        }
        for row in self.rows() {
            if seen.insert(row.clone()) {
                result.append_row(row)?;
            }
        }
        Ok(result)
    }

    /// Rows of `self` that are also present in `other` by full-row
    /// equality. Schemas (names, in order) must match exactly.
    pub fn intersect(&self, other: &Table) -> Result<Table> {
        if self.cols() != other.cols() {
            return Err(Error::SchemaMismatch);
        }
        let theirs: FxHashSet<Vec<Value>> = other.rows().collect();
        let mut result = self.map_cols(|seq| seq.head(0));
        for row in self.rows() {
            if theirs.contains(&row) {
                result.append_row(row)?;
            }
        }
        Ok(result)
    }

    /// Rows for which `predicate` accepts the value in `column`.
    pub fn where_col(
        &self,
        column: &str,
        predicate: impl Fn(&Value) -> bool,
    ) -> Result<Table> {
        let keep: Vec<usize> = self
            .require_col(column)?
            .iter()
            .enumerate()
            .filter(|&(_, v)| predicate(v))
            .map(|(i, _)| i)
            .collect();
        Ok(self.map_cols(|seq| seq.take_indices(&keep)))
    }

    /// Whether an equal row exists; the probe must have one value per
    /// column.
    pub fn contains_row(&self, row: &[Value]) -> Result<bool> {
        self.check_row_width(row)?;
        Ok(self.rows().any(|r| r.as_slice() == row))
    }

    /// How many rows equal the probe.
    pub fn row_count(&self, row: &[Value]) -> Result<usize> {
        self.check_row_width(row)?;
        Ok(self.rows().filter(|r| r.as_slice() == row).count())
    }

    fn check_row_width(&self, row: &[Value]) -> Result<()> {
        if row.len() != self.n_cols() {
            return Err(Error::LengthMismatch {
                expected: self.n_cols(),
                actual: row.len(),
            });
        }
        Ok(())
    }

    fn check_same_name_set(&self, other: &Table) -> Result<()> {
        if self.n_cols() != other.n_cols()
            || !self.columns.keys().all(|k| other.columns.contains_key(k))
        {
            return Err(Error::SchemaMismatch);
        }
        Ok(())
    }
}

/// Materialize row `index` of `table` in the order given by `names`.
fn gather_by_names(table: &Table, names: &[&str], index: usize) -> Vec<Value> {
    names
        .iter()
        .filter_map(|name| table.col(name))
        .map(|seq| seq[index].clone())
        .collect()
}
