//! Composable, parameter-safe SQL builder.
//!
//! A [`SqlQueryBuilder`] is an ordered tree of [`Entry`] nodes: literal SQL
//! text, bound parameters, and composites holding the entries of embedded
//! builders. Rendering flattens the tree and numbers the distinct parameter
//! values in first-seen order.
//!
//! # Example
//!
//! ```ignore
//! use sqlbind::sql;
//!
//! let inner = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
//! let outer = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?;
//!
//! let rendered = outer.render("p")?;
//! assert_eq!(
//!     rendered.query,
//!     "SELECT * FROM (SELECT * FROM Orders WHERE Id = @p1) src WHERE IsValid = @p2"
//! );
//! ```

mod builder;
mod entry;
mod fragment;
mod index;
mod metadata;
mod render;


pub use builder::SqlQueryBuilder;
pub use entry::{Entry, Leaf, Leaves};
pub use fragment::{AsLiteral, Fragment, FragmentFormat, LITERAL_FORMAT, Literal};
pub use metadata::Metadata;
pub use render::{Parameters, RenderedSql};
