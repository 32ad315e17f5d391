//! Rendering: flatten, assign placeholders, emit text and the parameter table.
//!
//! Nothing is cached between calls. Every `render`/`query`/`parameters` call
//! walks the whole entry tree again, so callers that need both the text and
//! the table should call [`SqlQueryBuilder::render`] once.

use super::builder::SqlQueryBuilder;
use super::entry::Leaf;
use super::index::ParameterIndex;
use crate::config::{DEFAULT_PARAMETER_PREFIX, PLACEHOLDER_MARKER, RenderConfig};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Parameter table: placeholder name (without `@`) → bound value.
pub type Parameters = BTreeMap<String, Value>;

/// Query text together with its parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSql {
    pub query: String,
    pub parameters: Parameters,
}

impl RenderedSql {
    pub fn into_parts(self) -> (String, Parameters) {
        (self.query, self.parameters)
    }
}

impl fmt::Display for RenderedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

impl SqlQueryBuilder {
    /// Render with the given parameter name prefix.
    ///
    /// # Example
    /// ```ignore
    /// let q = SqlQueryBuilder::from("SELECT * FROM Orders WHERE Id = ").bind(123);
    /// let rendered = q.render("param")?;
    /// assert_eq!(rendered.query, "SELECT * FROM Orders WHERE Id = @param1");
    /// ```
    pub fn render(&self, parameter_prefix: &str) -> SqlResult<RenderedSql> {
        self.render_with(&RenderConfig::new().with_parameter_prefix(parameter_prefix))
    }

    /// Render with explicit options.
    pub fn render_with(&self, config: &RenderConfig) -> SqlResult<RenderedSql> {
        // Pass 1: distinct values in first-seen order, and the text size.
        let mut index = ParameterIndex::new();
        let mut literal_len = 0;
        let mut placeholder_count = 0;
        for leaf in self.leaves() {
            match leaf {
                Leaf::Literal(s) => literal_len += s.len(),
                Leaf::Parameter(v) => {
                    index.insert(v);
                    placeholder_count += 1;
                }
            }
        }

        let names: Vec<String> = (1..=index.len())
            .map(|i| config.parameter_name(i))
            .collect();
        let longest_name = names.last().map_or(0, String::len);

        // Pass 2: text.
        let mut query =
            String::with_capacity(literal_len + placeholder_count * (1 + longest_name));
        for leaf in self.leaves() {
            match leaf {
                Leaf::Literal(s) => query.push_str(s),
                Leaf::Parameter(v) => {
                    let idx = index
                        .get(v)
                        .ok_or_else(|| SqlError::ParameterLookup(v.clone()))?;
                    query.push(PLACEHOLDER_MARKER);
                    query.push_str(&names[idx - 1]);
                }
            }
        }

        let parameters: Parameters = names
            .into_iter()
            .zip(index.values().iter().map(|v| (*v).clone()))
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sql = %truncate_for_log(&query, config.max_logged_sql_length),
            params = parameters.len(),
            "rendered sql"
        );

        Ok(RenderedSql { query, parameters })
    }

    /// Query text rendered with the default `p` prefix.
    pub fn query(&self) -> SqlResult<String> {
        Ok(self.render(DEFAULT_PARAMETER_PREFIX)?.query)
    }

    /// Parameter table rendered with the default `p` prefix.
    pub fn parameters(&self) -> SqlResult<Parameters> {
        Ok(self.render(DEFAULT_PARAMETER_PREFIX)?.parameters)
    }
}

#[cfg(feature = "tracing")]
fn truncate_for_log(sql: &str, max_bytes: Option<usize>) -> std::borrow::Cow<'_, str> {
    match max_bytes {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while end > 0 && !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end]).into()
        }
        _ => sql.into(),
    }
}
