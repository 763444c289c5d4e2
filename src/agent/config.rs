//! Agent helper configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable the monitoring agent sets when it wants graph
/// definitions instead of values.
pub const META_ENV_VAR: &str = "MACKEREL_AGENT_PLUGIN_META";

/// Prefix of the default state file name.
pub const TEMPFILE_PREFIX: &str = "mackerel-plugin-";

/// Configuration for the agent helper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Where previous readings are kept for differential metrics
    pub tempfile: Option<PathBuf>,
    /// Print graph definitions instead of values
    pub meta: bool,
}

impl AgentConfig {
    /// Create a configuration, treating an empty tempfile path as unset.
    pub fn new(tempfile: impl Into<String>) -> Self {
        Self::default().with_tempfile(tempfile)
    }

    /// Set the state file path. An empty path selects the default location.
    pub fn with_tempfile(mut self, tempfile: impl Into<String>) -> Self {
        let tempfile = tempfile.into();
        self.tempfile = if tempfile.is_empty() {
            None
        } else {
            Some(PathBuf::from(tempfile))
        };
        self
    }

    /// Enable or disable meta output.
    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Enable meta output when the agent asked for it through the environment.
    pub fn with_meta_from_env(self) -> Self {
        let meta = std::env::var(META_ENV_VAR)
            .map(|value| !value.is_empty())
            .unwrap_or(false);
        self.with_meta(meta)
    }

    /// The state file path for a graph.
    pub fn tempfile_path(&self, graph_name: &str) -> PathBuf {
        self.tempfile.clone().unwrap_or_else(|| {
            std::env::temp_dir().join(format!("{}{}", TEMPFILE_PREFIX, graph_name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tempfile_uses_default_location() {
        let config = AgentConfig::new("");
        assert_eq!(config.tempfile, None);
        assert_eq!(
            config.tempfile_path("snmp"),
            std::env::temp_dir().join("mackerel-plugin-snmp")
        );
    }

    #[test]
    fn test_explicit_tempfile() {
        let config = AgentConfig::new("/var/tmp/snmp-state").with_meta(true);
        assert!(config.meta);
        assert_eq!(
            config.tempfile_path("ignored"),
            PathBuf::from("/var/tmp/snmp-state")
        );
    }
}
