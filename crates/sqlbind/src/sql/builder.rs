use super::entry::{Entry, Leaves};
use super::fragment::{Fragment, FragmentFormat};
use super::metadata::Metadata;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign};
use std::sync::Arc;

/// A parameter-safe, composable SQL builder.
///
/// `SqlQueryBuilder` stores literal SQL text and bound values as separate
/// entries. Values are only ever rendered as `@p1, @p2, ...` placeholders,
/// and equal values share one placeholder. Builders embed into other
/// builders without re-parsing text; see [`SqlQueryBuilder::append_builder`].
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct SqlQueryBuilder {
    pub(super) entries: Vec<Entry>,
    pub(super) metadata: Metadata,
}

impl SqlQueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `capacity` direct entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            metadata: Metadata::new(),
        }
    }

    /// Create a builder holding a single parameter.
    ///
    /// # Example
    /// ```ignore
    /// let id = SqlQueryBuilder::from_parameter(123);
    /// let q = sql!("SELECT * FROM Orders WHERE Id = {id}")?;
    /// assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1");
    /// ```
    pub fn from_parameter(value: impl Into<Value>) -> Self {
        let mut builder = Self::with_capacity(1);
        builder.append_value(value);
        builder
    }

    /// Direct entries of this builder, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Flattened view of the entry tree.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.entries)
    }

    /// Whether no entries were appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append raw SQL text. No escaping or validation is applied.
    pub fn append_literal(&mut self, text: impl Into<String>) -> &mut Self {
        self.entries.push(Entry::Literal(text.into()));
        self
    }

    /// Append a bound value.
    pub fn append_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.entries.push(Entry::Parameter(value.into()));
        self
    }

    /// Append a string slot with an explicit format tag.
    ///
    /// `None` (or the empty tag) binds `text` as a parameter; `Some("l")`
    /// inlines it as literal SQL. Any other tag is rejected.
    pub fn append_formatted(&mut self, text: &str, format: Option<&str>) -> SqlResult<&mut Self> {
        let format = match format {
            Some(tag) => tag.parse()?,
            None => FragmentFormat::Parameter,
        };
        Ok(match format {
            FragmentFormat::Parameter => self.append_value(text),
            FragmentFormat::Literal => self.append_literal(text),
        })
    }

    /// Embed another builder.
    ///
    /// `Some(other)` appends a snapshot of `other`'s entries and merges its
    /// metadata into this builder. `None` appends a single `NULL` parameter.
    /// The metadata merge runs first; on conflict no entry is appended.
    pub fn append_builder(&mut self, other: Option<&SqlQueryBuilder>) -> SqlResult<&mut Self> {
        let Some(other) = other else {
            return Ok(self.append_value(Value::Null));
        };
        self.add_metadata_all(other.metadata.iter().map(|(k, v)| (k.clone(), v.clone())))?;
        self.entries
            .push(Entry::Composite(Arc::from(other.entries.as_slice())));
        Ok(self)
    }

    /// Append any interpolatable item (value, builder, literal, or option of one).
    pub fn append<F>(&mut self, fragment: &F) -> SqlResult<&mut Self>
    where
        F: Fragment + ?Sized,
    {
        fragment.append_to(self)?;
        Ok(self)
    }

    /// Concatenate two builders into a new one.
    ///
    /// The result holds `[Composite(self), Composite(other)]`; metadata is
    /// merged from `self` first, then `other`.
    pub fn concat(&self, other: &SqlQueryBuilder) -> SqlResult<Self> {
        let mut out = Self::with_capacity(2);
        out.append_builder(Some(self))?;
        out.append_builder(Some(other))?;
        Ok(out)
    }

    /// Replace `self` with `self.concat(other)`.
    ///
    /// On error `self` is left unchanged.
    pub fn concat_in_place(&mut self, other: &SqlQueryBuilder) -> SqlResult<&mut Self> {
        *self = self.concat(other)?;
        Ok(self)
    }

    // ==================== Consuming convenience APIs ====================

    /// Append raw SQL text and return `self` (consuming version of [`append_literal`]).
    ///
    /// [`append_literal`]: SqlQueryBuilder::append_literal
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.append_literal(text);
        self
    }

    /// Bind a value and return `self` (consuming version of [`append_value`]).
    ///
    /// ```ignore
    /// let q = SqlQueryBuilder::from("SELECT * FROM users WHERE status = ").bind("active");
    /// ```
    ///
    /// [`append_value`]: SqlQueryBuilder::append_value
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.append_value(value);
        self
    }
}

impl From<&str> for SqlQueryBuilder {
    fn from(text: &str) -> Self {
        Self::new().literal(text)
    }
}

impl From<String> for SqlQueryBuilder {
    fn from(text: String) -> Self {
        Self::new().literal(text)
    }
}

impl TryFrom<Option<&str>> for SqlQueryBuilder {
    type Error = SqlError;

    fn try_from(text: Option<&str>) -> SqlResult<Self> {
        text.map(Self::from)
            .ok_or_else(|| SqlError::argument("cannot build a query from a missing string"))
    }
}

impl TryFrom<Option<String>> for SqlQueryBuilder {
    type Error = SqlError;

    fn try_from(text: Option<String>) -> SqlResult<Self> {
        text.map(Self::from)
            .ok_or_else(|| SqlError::argument("cannot build a query from a missing string"))
    }
}

/// Builders compare by their flattened leaves and their metadata, so
/// `[Composite([a, b])]` equals `[a, b]`.
impl PartialEq for SqlQueryBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata && self.leaves().eq(other.leaves())
    }
}

impl Eq for SqlQueryBuilder {}

impl Hash for SqlQueryBuilder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for leaf in self.leaves() {
            leaf.hash(state);
        }
        self.metadata.hash(state);
    }
}

/// Concatenation.
///
/// # Panics
///
/// Panics if the two builders carry conflicting metadata. Use
/// [`SqlQueryBuilder::concat`] to handle that case.
impl Add for SqlQueryBuilder {
    type Output = SqlQueryBuilder;

    fn add(self, rhs: SqlQueryBuilder) -> SqlQueryBuilder {
        &self + &rhs
    }
}

impl Add<&SqlQueryBuilder> for &SqlQueryBuilder {
    type Output = SqlQueryBuilder;

    fn add(self, rhs: &SqlQueryBuilder) -> SqlQueryBuilder {
        match self.concat(rhs) {
            Ok(out) => out,
            Err(e) => panic!("cannot concatenate queries: {e}"),
        }
    }
}

/// In-place concatenation; same result and panics as `+`.
impl AddAssign for SqlQueryBuilder {
    fn add_assign(&mut self, rhs: SqlQueryBuilder) {
        *self += &rhs;
    }
}

impl AddAssign<&SqlQueryBuilder> for SqlQueryBuilder {
    fn add_assign(&mut self, rhs: &SqlQueryBuilder) {
        if let Err(e) = self.concat_in_place(rhs) {
            panic!("cannot concatenate queries: {e}");
        }
    }
}
