//! Convenient imports for typical `sqlbind` usage.
//!
//! ```ignore
//! use sqlbind::prelude::*;
//! ```

pub use crate::{AsLiteral, RenderConfig, RenderedSql, SqlError, SqlQueryBuilder, SqlResult, Value};

#[cfg(feature = "macros")]
pub use crate::sql;
