//! Stable, null-aware index permutations

use super::value::{Kind, Value};

/// Compute the permutation of `0..values.len()` that sorts `values`
/// ascending (or descending).
///
/// Nulls are compared as if they were `kind.default_value()`, so a null in
/// an int column sorts like `0` and a null in a str column like `""`. The
/// sort is stable in both directions: equal keys keep their original
/// relative order. Every table-level ordering (sort, group) goes through
/// here, making this the single tie-break rule of the system.
pub fn rank(values: &[Value], kind: Kind, desc: bool) -> Vec<usize> {
    fn key<'a>(values: &'a [Value], default: &'a Value, i: usize) -> &'a Value {
        let v = &values[i];
        if v.is_null() {
            default
        } else {
            v
        }
    }

    let default = kind.default_value();
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        let ord = key(values, &default, a).total_cmp(key(values, &default, b));
        if desc {
            ord.reverse()
        } else {
            ord
        }
    });
    indices
}

/// Permutation that sorts an integer pattern ascending.
pub fn rank_pattern(pattern: &[i64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..pattern.len()).collect();
    indices.sort_by_key(|&i| pattern[i]);
    indices
}

/// Apply a permutation to a sequence of values, cloning in permuted order.
pub fn permute(values: &[Value], order: &[usize]) -> Vec<Value> {
    order.iter().map(|&i| values[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(xs: &[i64]) -> Vec<Value> {
        xs.iter().map(|&x| Value::Int(x)).collect()
    }

    #[test]
    fn ranks_ascending_and_descending() {
        let vals = ints(&[3, 1, 2]);
        assert_eq!(rank(&vals, Kind::Int, false), vec![1, 2, 0]);
        assert_eq!(rank(&vals, Kind::Int, true), vec![0, 2, 1]);
    }

    #[test]
    fn rank_is_stable() {
        let vals = ints(&[2, 1, 2, 1]);
        // Equal keys keep source order: both 1s before both 2s.
        assert_eq!(rank(&vals, Kind::Int, false), vec![1, 3, 0, 2]);
        assert_eq!(rank(&vals, Kind::Int, true), vec![0, 2, 1, 3]);
    }

    #[test]
    fn nulls_rank_as_kind_default() {
        let vals = vec![Value::Int(-1), Value::Null, Value::Int(1)];
        // Null behaves as 0: between -1 and 1.
        assert_eq!(rank(&vals, Kind::Int, false), vec![0, 1, 2]);

        let vals = vec![Value::from("b"), Value::Null, Value::from("a")];
        // Null behaves as "": first.
        assert_eq!(rank(&vals, Kind::Str, false), vec![1, 2, 0]);
    }

    #[test]
    fn null_ties_with_real_default_keep_order() {
        let vals = vec![Value::Null, Value::Int(0), Value::Null];
        assert_eq!(rank(&vals, Kind::Int, false), vec![0, 1, 2]);
    }

    #[test]
    fn pattern_rank() {
        assert_eq!(rank_pattern(&[1, 2, 0]), vec![2, 0, 1]);
    }

    #[test]
    fn permute_applies_order() {
        let vals = ints(&[10, 20, 30]);
        assert_eq!(permute(&vals, &[2, 0, 1]), ints(&[30, 10, 20]));
    }
}
