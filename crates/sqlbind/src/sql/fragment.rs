//! Interpolation protocol between a token source (such as [`sql!`]) and the builder.
//!
//! The token source walks a template left to right and hands every
//! interpolated item to [`Fragment::append_to`]. The item decides which
//! builder entry point it maps to:
//!
//! - plain values (`i32`, `&str`, [`Value`], ...) are bound as parameters;
//! - builders are embedded as composites;
//! - `None` of anything becomes a `NULL` parameter;
//! - [`Literal`] (from [`AsLiteral::as_literal`]) is inlined as SQL text.
//!
//! [`sql!`]: crate::sql

use super::builder::SqlQueryBuilder;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;
use uuid::Uuid;

/// Format tag that inlines a string slot as literal SQL.
pub const LITERAL_FORMAT: &str = "l";

/// How a formatted string slot is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentFormat {
    /// Bind as a parameter (no tag).
    Parameter,
    /// Inline as SQL text (`l` tag).
    Literal,
}

impl FromStr for FragmentFormat {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        match s {
            "" => Ok(Self::Parameter),
            LITERAL_FORMAT => Ok(Self::Literal),
            other => Err(SqlError::format(other)),
        }
    }
}

/// Something that can be interpolated into a [`SqlQueryBuilder`].
pub trait Fragment {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()>;
}

/// A string that is inlined into the query text instead of being bound.
///
/// Use it for identifiers the caller controls (table or column names).
/// The text is not escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(pub String);

impl Literal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps a string as a [`Literal`].
pub trait AsLiteral {
    fn as_literal(&self) -> Literal;
}

impl<S: AsRef<str> + ?Sized> AsLiteral for S {
    fn as_literal(&self) -> Literal {
        Literal(self.as_ref().to_string())
    }
}

impl Fragment for Literal {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        builder.append_literal(self.0.as_str());
        Ok(())
    }
}

impl Fragment for SqlQueryBuilder {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        builder.append_builder(Some(self))?;
        Ok(())
    }
}

impl<T: Fragment> Fragment for Option<T> {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        match self {
            Some(inner) => inner.append_to(builder),
            None => {
                builder.append_value(Value::Null);
                Ok(())
            }
        }
    }
}

impl<T: Fragment + ?Sized> Fragment for &T {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        (**self).append_to(builder)
    }
}

macro_rules! impl_value_fragment {
    ($($t:ty),* $(,)?) => {
        $(
            impl Fragment for $t {
                fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
                    builder.append_value(self.clone());
                    Ok(())
                }
            }
        )*
    };
}

impl_value_fragment!(
    Value,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    Vec<u8>,
    Uuid,
    DateTime<Utc>,
    NaiveDate,
    serde_json::Value,
);

impl Fragment for str {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        builder.append_value(self);
        Ok(())
    }
}

impl Fragment for [u8] {
    fn append_to(&self, builder: &mut SqlQueryBuilder) -> SqlResult<()> {
        builder.append_value(self);
        Ok(())
    }
}
