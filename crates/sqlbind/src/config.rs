use serde::{Deserialize, Serialize};

/// Default parameter name prefix (`@p1`, `@p2`, ...).
pub const DEFAULT_PARAMETER_PREFIX: &str = "p";

/// Marker written in front of every placeholder name.
pub const PLACEHOLDER_MARKER: char = '@';

/// Options for rendering a builder into query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix for generated parameter names. Placeholders are
    /// `@{prefix}{index}` with a 1-based index.
    pub parameter_prefix: String,
    /// Truncate the query text in `tracing` events (in bytes). `None` means
    /// no truncation.
    pub max_logged_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            max_logged_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults (`p` prefix).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter name prefix.
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self
    }

    /// Set the maximum query length shown in log events.
    pub fn with_max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Log full query text.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }

    /// Placeholder name (without the marker) for a 1-based index.
    pub(crate) fn parameter_name(&self, index: usize) -> String {
        format!("{}{index}", self.parameter_prefix)
    }
}
