use crate::value::Value;
use std::mem;
use std::sync::Arc;

/// One node of a builder's entry tree.
///
/// Entries are never mutated once appended. A `Composite` holds a snapshot of
/// another builder's entries behind an `Arc`, so embedding is cheap and the
/// embedded data cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entry {
    /// Raw SQL text, copied verbatim into the output.
    Literal(String),
    /// A bound value, rendered as a placeholder.
    Parameter(Value),
    /// The entries of an embedded builder.
    Composite(Arc<[Entry]>),
}

/// Composite chains are unwound with an explicit stack so that dropping a
/// deeply nested tree does not recurse once per level.
impl Drop for Entry {
    fn drop(&mut self) {
        let Entry::Composite(children) = self else {
            return;
        };
        // A shared or empty composite only gives up a reference.
        if children.is_empty() || Arc::get_mut(children).is_none() {
            return;
        }

        let mut stack = vec![mem::replace(children, Arc::from(Vec::new()))];
        while let Some(mut node) = stack.pop() {
            if let Some(entries) = Arc::get_mut(&mut node) {
                for entry in entries.iter_mut() {
                    if let Entry::Composite(inner) = entry
                        && !inner.is_empty()
                        && Arc::get_mut(inner).is_some()
                    {
                        stack.push(mem::replace(inner, Arc::from(Vec::new())));
                    }
                }
            }
        }
    }
}

/// A flattened entry: what the renderer actually sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf<'a> {
    Literal(&'a str),
    Parameter(&'a Value),
}

/// Depth-first iterator over the leaves of an entry tree.
///
/// Uses an explicit stack, so nesting depth is bounded only by memory.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, Entry>>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(entries: &'a [Entry]) -> Self {
        Self {
            stack: vec![entries.iter()],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Leaf<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(Entry::Literal(s)) => return Some(Leaf::Literal(s)),
                Some(Entry::Parameter(v)) => return Some(Leaf::Parameter(v)),
                Some(Entry::Composite(children)) => self.stack.push(children.iter()),
            }
        }
    }
}
