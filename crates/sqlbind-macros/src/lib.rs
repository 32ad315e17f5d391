//! Procedural macros for sqlbind
//!
//! Provides the `sql!` template macro. Use it through the `sqlbind` crate,
//! which re-exports it; the expansion refers to `::sqlbind` paths.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod expand;
mod template;

/// Build a `SqlQueryBuilder` from a template string.
///
/// # Example
///
/// ```ignore
/// use sqlbind::sql;
///
/// let table = "Orders";
/// let inner = sql!("SELECT * FROM {table:l} WHERE Id = {}", 123)?;
/// let outer = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?;
/// ```
///
/// # Slots
///
/// - `{}` - next positional argument
/// - `{0}` - positional argument by index; digits never mean a value, so
///   `{123}` refers to argument 123 (write `sql!("... {}", 123)` instead)
/// - `{expr}` - inline Rust expression; braces inside string and char
///   literals are not counted, raw strings are not supported
/// - `{...:l}` - inline a string (`AsRef<str>`) as SQL text instead of binding it
/// - `{{` / `}}` - literal braces
///
/// Every other slot goes through `sqlbind::Fragment`, so values are bound,
/// builders are embedded, and `None` binds `NULL`. The expansion evaluates to
/// `sqlbind::SqlResult<sqlbind::SqlQueryBuilder>`.
#[proc_macro]
pub fn sql(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as expand::SqlInput);
    expand::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
