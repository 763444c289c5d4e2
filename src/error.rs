//! Error handling for the SNMP graph plugin.

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;

/// The main error type for the SNMP graph plugin.
///
/// Only [`PluginError::Session`] ever escapes a polling round. Fetch and
/// conversion failures are logged by the collector and the affected metric is
/// left out of the reading.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Establishing the SNMP session failed
    #[error("SNMP session error: {0}")]
    Session(String),

    /// Fetching a single object identifier failed
    #[error("SNMP get failed for {oid}: {reason}")]
    Fetch { oid: String, reason: String },

    /// The fetched value could not be read as a number
    #[error("Cannot convert value {value:?} of {metric} to a number")]
    Conversion { metric: String, value: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tempfile state could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PluginError {
    /// Create a new session error
    pub fn session_error(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create a new fetch error for the given object identifier
    pub fn fetch_error(oid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            oid: oid.into(),
            reason: reason.into(),
        }
    }

    /// Create a new conversion error
    pub fn conversion_error(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conversion {
            metric: metric.into(),
            value: value.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error aborts a polling round.
    pub fn is_round_fatal(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
