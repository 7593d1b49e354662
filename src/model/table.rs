//! Table: an ordered collection of equal-length columns

use indexmap::IndexMap;

use crate::error::{Error, Result};

use super::seq::Seq;
use super::value::{Kind, Value};

/// An ordered mapping from column name to [`Seq`], kept length-synchronized.
///
/// All columns share one length ("smoothness"); whenever a structural change
/// could leave columns ragged, shorter columns are right-padded with nulls up
/// to the longest one. Columns are uniquely named and owned by the table: the
/// constructors take their sequences by move, so no backing storage is ever
/// shared with the caller.
///
/// A row is not a stored entity. It is materialized on demand, one value per
/// column in declaration order, and never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub(crate) columns: IndexMap<String, Seq>,
}

impl Table {
    /// A table with no columns (and therefore no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero-row table declaring `names` and `kinds` paired by position.
    pub fn empty(names: &[&str], kinds: &[Kind]) -> Result<Self> {
        if names.len() != kinds.len() {
            return Err(Error::ArityMismatch {
                what: "kinds",
                expected: names.len(),
                actual: kinds.len(),
            });
        }
        let seqs = names
            .iter()
            .zip(kinds)
            .map(|(name, &kind)| Seq::empty(*name, kind))
            .collect::<Result<Vec<_>>>()?;
        Self::from_seqs(seqs)
    }

    /// Assemble a table from owned sequences, keyed by their names.
    pub fn from_seqs(seqs: Vec<Seq>) -> Result<Self> {
        let mut columns = IndexMap::with_capacity(seqs.len());
        for seq in seqs {
            if columns.contains_key(seq.name()) {
                return Err(Error::DuplicateColumn(seq.name().to_string()));
            }
            columns.insert(seq.name().to_string(), seq);
        }
        let mut table = Self { columns };
        table.smooth();
        Ok(table)
    }

    /// Build from raw per-column value sequences.
    ///
    /// Omitted names default to `unnamed_0`, `unnamed_1`, ... and omitted
    /// kinds to `Kind::Any`; when given, both must have one entry per
    /// column. Values are coerced to their column's kind.
    pub fn from_iterable(
        data: Vec<Vec<Value>>,
        names: Option<Vec<String>>,
        kinds: Option<Vec<Kind>>,
    ) -> Result<Self> {
        let n = data.len();
        let names = match names {
            Some(names) => {
                if names.len() != n {
                    return Err(Error::ArityMismatch {
                        what: "names",
                        expected: n,
                        actual: names.len(),
                    });
                }
                names
            }
            None => (0..n).map(|i| format!("unnamed_{i}")).collect(),
        };
        let kinds = check_kinds(kinds, n)?;
        let seqs = names
            .into_iter()
            .zip(kinds)
            .zip(data)
            .map(|((name, kind), values)| Seq::new(name, kind, values))
            .collect::<Result<Vec<_>>>()?;
        Self::from_seqs(seqs)
    }

    /// Build from ordered `(name, values)` pairs, with optional kinds.
    pub fn from_pairs(
        pairs: Vec<(String, Vec<Value>)>,
        kinds: Option<Vec<Kind>>,
    ) -> Result<Self> {
        let kinds = check_kinds(kinds, pairs.len())?;
        let seqs = pairs
            .into_iter()
            .zip(kinds)
            .map(|((name, values), kind)| Seq::new(name, kind, values))
            .collect::<Result<Vec<_>>>()?;
        Self::from_seqs(seqs)
    }

    /// Right-pad every column with nulls up to the longest one.
    pub(crate) fn smooth(&mut self) {
        let max = self.columns.values().map(Seq::len).max().unwrap_or(0);
        for seq in self.columns.values_mut() {
            seq.pad_to(max);
        }
    }

    /// Column names in declaration order.
    pub fn cols(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Column kinds, parallel to [`cols`](Self::cols).
    pub fn kinds(&self) -> Vec<Kind> {
        self.columns.values().map(Seq::kind).collect()
    }

    /// `(column_count, row_count)`; `(0, 0)` for a table with no columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_cols(), self.n_rows())
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.values().next().map_or(0, Seq::len)
    }

    pub fn col(&self, name: &str) -> Option<&Seq> {
        self.columns.get(name)
    }

    /// The named column, or an error naming the missing column.
    pub fn require_col(&self, name: &str) -> Result<&Seq> {
        self.col(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// A new table holding clones of the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let seqs = names
            .iter()
            .map(|name| self.require_col(name).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::from_seqs(seqs)
    }

    /// Assign a column. Replaces any existing column of that name, renames
    /// the sequence to the key, and re-smooths the table.
    pub fn set_col(&mut self, name: impl Into<String>, mut seq: Seq) -> Result<&mut Self> {
        let name = name.into();
        seq.rename(name.clone())?;
        self.columns.insert(name, seq);
        self.smooth();
        Ok(self)
    }

    /// Materialize row `index` as one value per column, in column order.
    pub fn row(&self, index: usize) -> Result<Vec<Value>> {
        if index >= self.n_rows() {
            return Err(Error::RowOutOfRange {
                index,
                rows: self.n_rows(),
            });
        }
        Ok(self.materialize(index))
    }

    pub(crate) fn materialize(&self, index: usize) -> Vec<Value> {
        self.columns
            .values()
            .map(|seq| seq[index].clone())
            .collect()
    }

    /// Iterate over materialized rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.n_rows()).map(|i| self.materialize(i))
    }

    /// First `n` rows of every column.
    pub fn head(&self, n: usize) -> Table {
        self.map_cols(|seq| seq.head(n))
    }

    /// Last `n` rows of every column.
    pub fn tail(&self, n: usize) -> Table {
        self.map_cols(|seq| seq.tail(n))
    }

    pub(crate) fn map_cols(&self, f: impl Fn(&Seq) -> Seq) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|(name, seq)| (name.clone(), f(seq)))
                .collect(),
        }
    }

    /// Append one row, one value per column.
    ///
    /// The whole row is validated first (length, then every value against
    /// its column's kind) and only then are the columns touched, so a
    /// failed append leaves the table unchanged.
    pub fn append_row(&mut self, row: Vec<Value>) -> Result<&mut Self> {
        if row.len() != self.n_cols() {
            return Err(Error::LengthMismatch {
                expected: self.n_cols(),
                actual: row.len(),
            });
        }
        for (value, (name, seq)) in row.iter().zip(&self.columns) {
            if !value.matches(seq.kind()) {
                return Err(Error::KindMismatch {
                    column: name.clone(),
                    expected: seq.kind(),
                    actual: value.kind(),
                });
            }
        }
        for (value, seq) in row.into_iter().zip(self.columns.values_mut()) {
            seq.push_unchecked(value);
        }
        Ok(self)
    }

    /// Remove and return a column.
    pub fn drop_col(&mut self, name: &str) -> Result<Seq> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// A new table without the named column.
    pub fn dropped_col(&self, name: &str) -> Result<Table> {
        let mut copy = self.clone();
        copy.drop_col(name)?;
        Ok(copy)
    }

    /// Remove row `index` from every column.
    pub fn drop_row(&mut self, index: usize) -> Result<&mut Self> {
        if index >= self.n_rows() {
            return Err(Error::RowOutOfRange {
                index,
                rows: self.n_rows(),
            });
        }
        for seq in self.columns.values_mut() {
            seq.remove(index);
        }
        Ok(self)
    }

    /// A new table without row `index`.
    pub fn dropped_row(&self, index: usize) -> Result<Table> {
        let mut copy = self.clone();
        copy.drop_row(index)?;
        Ok(copy)
    }

    /// Remove every row that contains at least one null, as a single pass.
    pub fn drop_nones(&mut self) -> &mut Self {
        let keep = self.rows_where(|row| !row.iter().any(Value::is_null));
        for seq in self.columns.values_mut() {
            *seq = seq.take_indices(&keep);
        }
        self
    }

    /// A new table without the rows that contain a null.
    pub fn dropped_nones(&self) -> Table {
        let mut copy = self.clone();
        copy.drop_nones();
        copy
    }

    /// A new table holding only the rows that contain at least one null.
    pub fn get_nones(&self) -> Table {
        let keep = self.rows_where(|row| row.iter().any(Value::is_null));
        self.map_cols(|seq| seq.take_indices(&keep))
    }

    /// Indices of the rows the predicate accepts, in order.
    fn rows_where(&self, predicate: impl Fn(&[Value]) -> bool) -> Vec<usize> {
        (0..self.n_rows())
            .filter(|&i| predicate(&self.materialize(i)))
            .collect()
    }
}

fn check_kinds(kinds: Option<Vec<Kind>>, n: usize) -> Result<Vec<Kind>> {
    match kinds {
        Some(kinds) if kinds.len() != n => Err(Error::ArityMismatch {
            what: "kinds",
            expected: n,
            actual: kinds.len(),
        }),
        Some(kinds) => Ok(kinds),
        None => Ok(vec![Kind::Any; n]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_pairs(
            vec![
                (
                    "name".to_string(),
                    vec![Value::from("ada"), Value::from("grace")],
                ),
                ("age".to_string(), vec![Value::Int(36), Value::Int(45)]),
            ],
            Some(vec![Kind::Str, Kind::Int]),
        )
        .unwrap()
    }

    fn assert_smooth(t: &Table) {
        let rows = t.n_rows();
        for seq in t.columns.values() {
            assert_eq!(seq.len(), rows);
        }
    }

    #[test]
    fn empty_declares_schema() {
        let t = Table::empty(&["a", "b"], &[Kind::Int, Kind::Str]).unwrap();
        assert_eq!(t.shape(), (2, 0));
        assert_eq!(t.cols(), vec!["a", "b"]);
        assert_eq!(t.kinds(), vec![Kind::Int, Kind::Str]);
    }

    #[test]
    fn empty_checks_arity() {
        let err = Table::empty(&["a", "b"], &[Kind::Int]).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { .. }));
    }

    #[test]
    fn from_seqs_rejects_duplicates() {
        let a = Seq::empty("x", Kind::Int).unwrap();
        let b = Seq::empty("x", Kind::Str).unwrap();
        assert_eq!(
            Table::from_seqs(vec![a, b]).unwrap_err(),
            Error::DuplicateColumn("x".to_string())
        );
    }

    #[test]
    fn ragged_input_is_smoothed_not_rejected() {
        let t = Table::from_iterable(
            vec![
                vec![Value::Int(1), Value::Int(2), Value::Int(3)],
                vec![Value::from("x")],
            ],
            None,
            None,
        )
        .unwrap();
        assert_eq!(t.shape(), (2, 3));
        assert_smooth(&t);
        assert_eq!(t.row(2).unwrap(), vec![Value::Int(3), Value::Null]);
    }

    #[test]
    fn from_iterable_defaults_names_and_kinds() {
        let t = Table::from_iterable(vec![vec![Value::Int(1)], vec![Value::Int(2)]], None, None)
            .unwrap();
        assert_eq!(t.cols(), vec!["unnamed_0", "unnamed_1"]);
        assert_eq!(t.kinds(), vec![Kind::Any, Kind::Any]);
    }

    #[test]
    fn shape_of_no_columns() {
        assert_eq!(Table::new().shape(), (0, 0));
    }

    #[test]
    fn row_materializes_in_column_order() {
        let t = sample();
        assert_eq!(t.row(0).unwrap(), vec![Value::from("ada"), Value::Int(36)]);
        assert!(matches!(
            t.row(5).unwrap_err(),
            Error::RowOutOfRange { index: 5, rows: 2 }
        ));
    }

    #[test]
    fn append_row_grows_every_column() {
        let mut t = sample();
        t.append_row(vec![Value::from("alan"), Value::Int(41)])
            .unwrap();
        assert_eq!(t.shape(), (2, 3));
        assert_smooth(&t);
        assert_eq!(t.row(2).unwrap(), vec![Value::from("alan"), Value::Int(41)]);
    }

    #[test]
    fn append_row_accepts_nulls() {
        let mut t = sample();
        t.append_row(vec![Value::Null, Value::Null]).unwrap();
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn append_row_is_atomic() {
        let mut t = sample();
        // First value is fine, second is the wrong kind: nothing may change.
        let err = t
            .append_row(vec![Value::from("alan"), Value::from("41")])
            .unwrap_err();
        assert!(matches!(err, Error::KindMismatch { ref column, .. } if column == "age"));
        assert_eq!(t.shape(), (2, 2));
        assert_smooth(&t);
    }

    #[test]
    fn append_row_checks_length_first() {
        let mut t = sample();
        assert_eq!(
            t.append_row(vec![Value::Null]).unwrap_err(),
            Error::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(t.shape(), (2, 2));
    }

    #[test]
    fn set_col_smooths() {
        let mut t = sample();
        let longer = Seq::new(
            "score",
            Kind::Int,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        )
        .unwrap();
        t.set_col("score", longer).unwrap();
        assert_eq!(t.shape(), (3, 3));
        assert_smooth(&t);
        assert_eq!(t.col("name").unwrap()[2], Value::Null);
    }

    #[test]
    fn select_clones_in_requested_order() {
        let t = sample();
        let s = t.select(&["age", "name"]).unwrap();
        assert_eq!(s.cols(), vec!["age", "name"]);
        assert_eq!(s.row(0).unwrap(), vec![Value::Int(36), Value::from("ada")]);
        assert!(matches!(
            t.select(&["missing"]).unwrap_err(),
            Error::UnknownColumn(_)
        ));
    }

    #[test]
    fn drop_col_and_dropped_col() {
        let mut t = sample();
        let kept = t.dropped_col("age").unwrap();
        assert_eq!(kept.cols(), vec!["name"]);
        assert_eq!(t.n_cols(), 2);

        let seq = t.drop_col("age").unwrap();
        assert_eq!(seq.name(), "age");
        assert_eq!(t.cols(), vec!["name"]);
    }

    #[test]
    fn drop_row_and_dropped_row() {
        let mut t = sample();
        let shorter = t.dropped_row(0).unwrap();
        assert_eq!(shorter.n_rows(), 1);
        assert_eq!(shorter.row(0).unwrap()[0], Value::from("grace"));
        assert_eq!(t.n_rows(), 2);

        t.drop_row(1).unwrap();
        assert_eq!(t.n_rows(), 1);
        assert!(t.drop_row(7).is_err());
    }

    #[test]
    fn drop_nones_single_pass() {
        let mut t = Table::from_iterable(
            vec![
                vec![Value::Int(1), Value::Null, Value::Int(3), Value::Null],
                vec![
                    Value::from("a"),
                    Value::from("b"),
                    Value::Null,
                    Value::Null,
                ],
            ],
            Some(vec!["x".to_string(), "y".to_string()]),
            Some(vec![Kind::Int, Kind::Str]),
        )
        .unwrap();
        let nones = t.get_nones();
        assert_eq!(nones.n_rows(), 3);

        let cleaned = t.dropped_nones();
        assert_eq!(cleaned.n_rows(), 1);
        assert_eq!(
            cleaned.row(0).unwrap(),
            vec![Value::Int(1), Value::from("a")]
        );
        assert_eq!(t.n_rows(), 4);

        t.drop_nones();
        assert_eq!(t.n_rows(), 1);
        assert_smooth(&t);
    }

    #[test]
    fn head_and_tail() {
        let t = sample();
        assert_eq!(t.head(1).n_rows(), 1);
        assert_eq!(t.tail(1).row(0).unwrap()[0], Value::from("grace"));
        assert_eq!(t.head(10).n_rows(), 2);
    }
}
