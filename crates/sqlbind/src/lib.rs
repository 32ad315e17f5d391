//! # sqlbind
//!
//! Build SQL text and its bound parameters from interpolated templates.
//!
//! ## Features
//!
//! - **No values in SQL text**: every interpolated value becomes an `@p1`-style
//!   placeholder with an entry in a separate parameter table
//! - **Composable**: builders embed into other builders without re-parsing;
//!   placeholders are renumbered over the whole tree at render time
//! - **Deduplicated**: equal values (including `NULL`) share one placeholder
//! - **Metadata**: key/value annotations that merge on composition and refuse
//!   conflicting values
//!
//! ## Usage
//!
//! ```ignore
//! use sqlbind::sql;
//!
//! let table = "Orders";
//! let inner = sql!("SELECT * FROM {table:l} WHERE Id = {}", 123)?;
//! let outer = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?
//!     .with_metadata("DbName", "Db1")?;
//!
//! let rendered = outer.render("p")?;
//! // SELECT * FROM (SELECT * FROM Orders WHERE Id = @p1) src WHERE IsValid = @p2
//! println!("{rendered}");
//! ```
//!
//! The builder never executes anything; hand `rendered.query` and
//! `rendered.parameters` to whatever driver runs the query.

pub mod config;
pub mod error;
pub mod prelude;
pub mod sql;
pub mod value;

pub use config::{DEFAULT_PARAMETER_PREFIX, PLACEHOLDER_MARKER, RenderConfig};
pub use error::{SqlError, SqlResult};
pub use sql::{
    AsLiteral, Entry, Fragment, FragmentFormat, LITERAL_FORMAT, Leaf, Leaves, Literal, Metadata,
    Parameters, RenderedSql, SqlQueryBuilder,
};
pub use value::Value;

/// Build a [`SqlQueryBuilder`] from a template.
///
/// Literal text is appended as SQL; every `{...}` slot is interpolated
/// through [`Fragment`]:
///
/// - `{}` / `{0}` take positional arguments, `{expr}` an inline expression;
///   a bare number is always an argument index, so bind the value `123` with
///   `sql!("... {}", 123)`, not `{123}`;
/// - `{expr:l}` inlines a string as SQL text instead of binding it;
/// - `{{` and `}}` are literal braces.
///
/// Evaluates to `SqlResult<SqlQueryBuilder>`; embedding a builder whose
/// metadata conflicts with what was merged so far yields `Err`.
///
/// ```ignore
/// let q = sql!("SELECT * FROM Orders WHERE Id = {} AND Amount = {}", 123, 123)?;
/// assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1 AND Amount = @p1");
/// ```
#[cfg(feature = "macros")]
pub use sqlbind_macros::sql;
