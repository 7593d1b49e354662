//! Table ordering: sort by column, sort by pattern, contiguity grouping

use crate::error::{Error, Result};

use super::rank::{rank, rank_pattern};
use super::table::Table;

impl Table {
    /// A new table with every column reordered by the null-aware ranking of
    /// `column` (nulls compare as the column kind's zero).
    ///
    /// The ranking is stable, so rows with equal keys keep their original
    /// relative order and sorting an already-sorted table changes nothing.
    pub fn sorted(&self, column: &str, desc: bool) -> Result<Table> {
        let key = self.require_col(column)?;
        let order = rank(key.data(), key.kind(), desc);
        Ok(self.map_cols(|seq| seq.take_indices(&order)))
    }

    /// A new table reordered by the permutation that sorts `pattern`.
    ///
    /// The pattern must have exactly one entry per row.
    pub fn sorted_by_pattern(&self, pattern: &[i64]) -> Result<Table> {
        if pattern.len() != self.n_rows() {
            return Err(Error::LengthMismatch {
                expected: self.n_rows(),
                actual: pattern.len(),
            });
        }
        let order = rank_pattern(pattern);
        Ok(self.map_cols(|seq| seq.take_indices(&order)))
    }

    /// Sort by `column` ascending, then split into maximal runs of
    /// consecutive rows with equal values in `column`.
    ///
    /// Grouping is defined purely by contiguity after the sort (sort-merge
    /// grouping), never by value equality across the whole table. Every
    /// group shares this table's schema; an empty table yields no groups.
    pub fn group_by(&self, column: &str) -> Result<Vec<Table>> {
        let sorted = self.sorted(column, false)?;
        let key = sorted.require_col(column)?;

        let mut groups = Vec::new();
        let mut start = 0;
        for i in 1..=key.len() {
            if i == key.len() || key[i] != key[start] {
                let indices: Vec<usize> = (start..i).collect();
                groups.push(sorted.map_cols(|seq| seq.take_indices(&indices)));
                start = i;
            }
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Value};

    fn table(names: &[&str], kinds: &[Kind], cols: Vec<Vec<Value>>) -> Table {
        Table::from_iterable(
            cols,
            Some(names.iter().map(|s| s.to_string()).collect()),
            Some(kinds.to_vec()),
        )
        .unwrap()
    }

    fn ints(xs: &[i64]) -> Vec<Value> {
        xs.iter().map(|&x| Value::Int(x)).collect()
    }

    fn strs(xs: &[&str]) -> Vec<Value> {
        xs.iter().map(|&x| Value::from(x)).collect()
    }

    #[test]
    fn sorted_reorders_every_column() {
        let t = table(
            &["k", "v"],
            &[Kind::Int, Kind::Str],
            vec![ints(&[3, 1, 2]), strs(&["c", "a", "b"])],
        );
        let s = t.sorted("k", false).unwrap();
        assert_eq!(s.col("k").unwrap().data(), &ints(&[1, 2, 3])[..]);
        assert_eq!(s.col("v").unwrap().data(), &strs(&["a", "b", "c"])[..]);
        // Receiver untouched.
        assert_eq!(t.col("k").unwrap().data(), &ints(&[3, 1, 2])[..]);

        let d = t.sorted("k", true).unwrap();
        assert_eq!(d.col("v").unwrap().data(), &strs(&["c", "b", "a"])[..]);
    }

    #[test]
    fn sorted_unknown_column() {
        let t = table(&["k"], &[Kind::Int], vec![ints(&[1])]);
        assert!(matches!(
            t.sorted("missing", false).unwrap_err(),
            Error::UnknownColumn(_)
        ));
    }

    #[test]
    fn sorted_is_stable_and_idempotent() {
        let t = table(
            &["k", "v"],
            &[Kind::Int, Kind::Str],
            vec![ints(&[2, 1, 2, 1]), strs(&["w", "x", "y", "z"])],
        );
        let s = t.sorted("k", false).unwrap();
        // Equal keys keep source order.
        assert_eq!(s.col("v").unwrap().data(), &strs(&["x", "z", "w", "y"])[..]);
        // Re-sorting a sorted table is a no-op.
        assert_eq!(s.sorted("k", false).unwrap(), s);
    }

    #[test]
    fn sorted_ranks_nulls_as_kind_zero() {
        let t = table(
            &["k", "v"],
            &[Kind::Int, Kind::Str],
            vec![
                vec![Value::Int(-5), Value::Null, Value::Int(4)],
                strs(&["lo", "null", "hi"]),
            ],
        );
        let s = t.sorted("k", false).unwrap();
        assert_eq!(
            s.col("v").unwrap().data(),
            &strs(&["lo", "null", "hi"])[..]
        );
        let d = t.sorted("k", true).unwrap();
        assert_eq!(
            d.col("v").unwrap().data(),
            &strs(&["hi", "null", "lo"])[..]
        );
    }

    #[test]
    fn sorted_by_pattern_applies_pattern_permutation() {
        let t = table(
            &["a", "b"],
            &[Kind::Int, Kind::Int],
            vec![ints(&[1, 2, 3]), ints(&[4, 5, 6])],
        );
        let s = t.sorted_by_pattern(&[1, 2, 0]).unwrap();
        assert_eq!(s.col("a").unwrap().data(), &ints(&[3, 1, 2])[..]);
        assert_eq!(s.col("b").unwrap().data(), &ints(&[6, 4, 5])[..]);
    }

    #[test]
    fn sorted_by_pattern_length_check() {
        let t = table(&["a"], &[Kind::Int], vec![ints(&[1, 2])]);
        assert_eq!(
            t.sorted_by_pattern(&[0]).unwrap_err(),
            Error::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn group_by_splits_on_value_change() {
        // ("a",1),("b",2),("a",3): sorting by k gives a,a,b -> two groups.
        let t = table(
            &["k", "v"],
            &[Kind::Str, Kind::Int],
            vec![strs(&["a", "b", "a"]), ints(&[1, 2, 3])],
        );
        let groups = t.group_by("k").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].col("v").unwrap().data(), &ints(&[1, 3])[..]);
        assert_eq!(groups[1].col("v").unwrap().data(), &ints(&[2])[..]);
        for g in &groups {
            assert_eq!(g.cols(), t.cols());
            assert_eq!(g.kinds(), t.kinds());
        }
    }

    #[test]
    fn group_by_single_group() {
        let t = table(&["k"], &[Kind::Int], vec![ints(&[7, 7, 7])]);
        let groups = t.group_by("k").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].n_rows(), 3);
    }

    #[test]
    fn group_by_empty_table() {
        let t = Table::empty(&["k"], &[Kind::Int]).unwrap();
        assert!(t.group_by("k").unwrap().is_empty());
    }

    #[test]
    fn group_by_groups_nulls_with_kind_zero() {
        // Null ranks as 0 but is not equal to 0: they sort adjacent yet
        // split into separate groups.
        let t = table(
            &["k"],
            &[Kind::Int],
            vec![vec![Value::Int(0), Value::Null, Value::Int(1)]],
        );
        let groups = t.group_by("k").unwrap();
        assert_eq!(groups.len(), 3);
    }
}
