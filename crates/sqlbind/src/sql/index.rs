//! Value → placeholder index with a dedicated slot for `NULL`.

use crate::value::Value;
use std::collections::HashMap;

/// Assigns 1-based indices to distinct parameter values in first-seen order.
///
/// `NULL` never enters the hash map; it has its own slot so that every absent
/// value maps to the same index regardless of how `Value` hashes.
#[derive(Debug, Default)]
pub(crate) struct ParameterIndex<'a> {
    null_slot: Option<usize>,
    slots: HashMap<&'a Value, usize>,
    order: Vec<&'a Value>,
}

impl<'a> ParameterIndex<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `value`, returning its index. Repeated values keep their first index.
    pub(crate) fn insert(&mut self, value: &'a Value) -> usize {
        if let Some(idx) = self.get(value) {
            return idx;
        }
        self.order.push(value);
        let idx = self.order.len();
        if value.is_null() {
            self.null_slot = Some(idx);
        } else {
            self.slots.insert(value, idx);
        }
        idx
    }

    pub(crate) fn get(&self, value: &Value) -> Option<usize> {
        if value.is_null() {
            self.null_slot
        } else {
            self.slots.get(value).copied()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Distinct values in index order (position 0 holds index 1).
    pub(crate) fn values(&self) -> &[&'a Value] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let a = Value::Int(123);
        let b = Value::Bool(true);
        let a2 = Value::Int(123);

        let mut index = ParameterIndex::new();
        assert_eq!(index.insert(&a), 1);
        assert_eq!(index.insert(&b), 2);
        assert_eq!(index.insert(&a2), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn nulls_share_one_slot() {
        let first = Value::Null;
        let second = Value::Null;
        let n = Value::Int(0);

        let mut index = ParameterIndex::new();
        assert_eq!(index.get(&first), None);
        assert_eq!(index.insert(&n), 1);
        assert_eq!(index.insert(&first), 2);
        assert_eq!(index.insert(&second), 2);
        assert_eq!(index.get(&Value::Null), Some(2));
        assert_eq!(index.values(), &[&n, &first]);
    }
}
