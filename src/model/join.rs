//! Positional first-match joins

use crate::error::{Error, Result};

use super::table::Table;
use super::value::Value;

impl Table {
    /// Left join: one output row per row of `self`, in order.
    ///
    /// For every value of `self[left_on]`, the first row of `right` whose
    /// `right_on` value is equal (linear probe, first match only) supplies
    /// the joined-in columns; rows without a match are filled with nulls.
    /// The result therefore always has exactly `self`'s row count.
    ///
    /// The two key columns must share a kind, and apart from the key when
    /// `left_on == right_on` the tables must not share any column name.
    /// Exactly one copy of the key survives: the shared key column is
    /// dropped from the appended portion, while differently-named keys are
    /// both kept.
    pub fn left_join(&self, right: &Table, left_on: &str, right_on: &str) -> Result<Table> {
        let left_key = self.require_col(left_on)?;
        let right_key = right.require_col(right_on)?;
        if left_key.kind() != right_key.kind() {
            return Err(Error::JoinKindMismatch {
                left: left_on.to_string(),
                left_kind: left_key.kind(),
                right: right_on.to_string(),
                right_kind: right_key.kind(),
            });
        }
        for name in right.cols() {
            let shared_key = left_on == right_on && name == left_on;
            if self.col(name).is_some() && !shared_key {
                return Err(Error::ColumnCollision(name.to_string()));
            }
        }

        let names: Vec<&str> = right.cols();
        let mut staged = Table::empty(&names, &right.kinds())?;
        for probe in left_key.iter() {
            match right_key.find(probe) {
                Ok(index) => staged.append_row(right.row(index)?)?,
                Err(Error::NotFound(_)) => {
                    staged.append_row(vec![Value::Null; right.n_cols()])?
                }
                Err(e) => return Err(e),
            };
        }
        if left_on == right_on {
            staged.drop_col(right_on)?;
        }
        Ok(self.concat(&staged))
    }

    /// Right join, defined by symmetry: `left` left-joined with `self`.
    pub fn right_join(&self, left: &Table, left_on: &str, right_on: &str) -> Result<Table> {
        left.left_join(self, left_on, right_on)
    }

    /// Inner join: a left join post-filtered to the rows that carry no
    /// nulls, with the duplicated key column removed when the key names
    /// differ. No separate matching pass.
    pub fn inner_join(&self, right: &Table, left_on: &str, right_on: &str) -> Result<Table> {
        let mut joined = self.left_join(right, left_on, right_on)?;
        if left_on != right_on {
            joined.drop_col(right_on)?;
        }
        Ok(joined.dropped_nones())
    }
}
