//! Seq: a named, typed, ordered sequence of values

use crate::error::{Error, Result};

use super::value::{Kind, Value};

/// A named, typed column of values.
///
/// Every non-null element has been coerced to `kind` when it entered the
/// sequence; `Null` is a valid element regardless of kind. Transforming
/// operations (`head`, `tail`, `reverse`, `sorted`, `filter`, `map`) return
/// new sequences and never touch the receiver; `append` and `rename` mutate
/// in place and return the receiver for chaining.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    name: String,
    kind: Kind,
    data: Vec<Value>,
}

impl Seq {
    /// Build a sequence, coercing every element to `kind`.
    ///
    /// The first element that cannot be coerced fails the whole
    /// construction. `Kind::Any` skips coercion entirely.
    pub fn new(name: impl Into<String>, kind: Kind, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let data = values
            .into_iter()
            .map(|v| kind.coerce(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, kind, data })
    }

    /// An empty sequence of the given kind.
    pub fn empty(name: impl Into<String>, kind: Kind) -> Result<Self> {
        Self::new(name, kind, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.data.iter()
    }

    /// Append a value in place.
    ///
    /// The value must be `Null` or an instance of the declared kind; this is
    /// an identity check, not a coercion (stricter than construction).
    pub fn append(&mut self, value: Value) -> Result<&mut Self> {
        if !value.matches(self.kind) {
            return Err(Error::KindMismatch {
                column: self.name.clone(),
                expected: self.kind,
                actual: value.kind(),
            });
        }
        self.data.push(value);
        Ok(self)
    }

    /// Rename in place; the name must stay non-empty.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.name = name;
        Ok(self)
    }

    /// First `n` elements; `n` past the end is clamped, never an error.
    pub fn head(&self, n: usize) -> Seq {
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data: self.data[..n.min(self.data.len())].to_vec(),
        }
    }

    /// Last `n` elements; `n` past the end is clamped, never an error.
    pub fn tail(&self, n: usize) -> Seq {
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data: self.data[self.data.len().saturating_sub(n)..].to_vec(),
        }
    }

    /// Extend with `n` trailing nulls. `n == 0` hands the receiver back
    /// untouched.
    pub fn grow(mut self, n: usize) -> Seq {
        if n > 0 {
            self.data
                .extend(std::iter::repeat(Value::Null).take(n));
        }
        self
    }

    /// New sequence with the elements reversed.
    pub fn reverse(&self) -> Seq {
        let mut data = self.data.clone();
        data.reverse();
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data,
        }
    }

    /// New sequence sorted by the values' natural order.
    ///
    /// Not null-aware: nulls sort below everything here. Null-aware ordering
    /// belongs to the ranking layer that tables sort through.
    pub fn sorted(&self, desc: bool) -> Seq {
        let mut data = self.data.clone();
        data.sort_by(|a, b| {
            let ord = a.total_cmp(b);
            if desc {
                ord.reverse()
            } else {
                ord
            }
        });
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data,
        }
    }

    /// New sequence keeping the elements the predicate accepts.
    pub fn filter(&self, mut predicate: impl FnMut(&Value) -> bool) -> Seq {
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data: self.data.iter().filter(|&v| predicate(v)).cloned().collect(),
        }
    }

    /// New sequence with `f` applied to every element.
    ///
    /// The declared kind is kept as-is even if `f` returns values of another
    /// kind; nothing is re-validated.
    pub fn map(&self, f: impl FnMut(&Value) -> Value) -> Seq {
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Relabel the kind without re-coercing the data. The caller vouches for
    /// compatibility.
    pub fn as_kind(mut self, kind: Kind) -> Seq {
        self.kind = kind;
        self
    }

    /// New sequence holding this one's elements followed by `other`'s,
    /// under this one's name and kind. The elements are taken as they are;
    /// nothing is re-coerced.
    pub fn concat(&self, other: &Seq) -> Seq {
        let mut data = self.data.clone();
        data.extend(other.data.iter().cloned());
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data,
        }
    }

    /// Index of the first element equal to `value`.
    pub fn find(&self, value: &Value) -> Result<usize> {
        self.data
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| Error::NotFound(value.display()))
    }

    /// Right-pad with nulls up to `len`; used by table smoothing.
    pub(crate) fn pad_to(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, Value::Null);
        }
    }

    /// Push without a kind check; callers have already validated.
    pub(crate) fn push_unchecked(&mut self, value: Value) {
        self.data.push(value);
    }

    /// Remove and return the element at `index`; the index must be valid.
    pub(crate) fn remove(&mut self, index: usize) -> Value {
        self.data.remove(index)
    }

    /// New sequence gathering the elements at `indices`, in that order.
    pub(crate) fn take_indices(&self, indices: &[usize]) -> Seq {
        Seq {
            name: self.name.clone(),
            kind: self.kind,
            data: super::rank::permute(&self.data, indices),
        }
    }
}

impl std::ops::Index<usize> for Seq {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
