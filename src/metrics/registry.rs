//! The ordered set of metric definitions for one graph.

use crate::metrics::spec::{parse_declarations, MetricSpec};
use serde::{Deserialize, Serialize};

/// Graph name used when none is configured.
pub const DEFAULT_GRAPH_NAME: &str = "snmp";

/// Graph unit used when none is configured.
pub const DEFAULT_GRAPH_UNIT: &str = "float";

/// Parsed metric definitions plus graph metadata.
///
/// Built once at startup and only read afterwards. Metrics sharing a name are
/// kept as separate entries in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Graph key and display label
    pub graph_name: String,
    /// Display unit, e.g. "float", "integer", "percentage"
    pub graph_unit: String,
    metrics: Vec<MetricSpec>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            graph_unit: DEFAULT_GRAPH_UNIT.to_string(),
            metrics: Vec::new(),
        }
    }
}

impl Registry {
    /// Create a registry from already parsed metrics.
    pub fn new(
        graph_name: impl Into<String>,
        graph_unit: impl Into<String>,
        metrics: Vec<MetricSpec>,
    ) -> Self {
        Self {
            graph_name: graph_name.into(),
            graph_unit: graph_unit.into(),
            metrics,
        }
    }

    /// Parse textual declarations into a registry, skipping malformed ones.
    pub fn from_declarations<I, S>(
        graph_name: impl Into<String>,
        graph_unit: impl Into<String>,
        declarations: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(graph_name, graph_unit, parse_declarations(declarations))
    }

    /// Set the graph name.
    pub fn with_graph_name(mut self, graph_name: impl Into<String>) -> Self {
        self.graph_name = graph_name.into();
        self
    }

    /// Set the graph unit.
    pub fn with_graph_unit(mut self, graph_unit: impl Into<String>) -> Self {
        self.graph_unit = graph_unit.into();
        self
    }

    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Whether any metric needs the previous reading to be graphed.
    pub fn has_differential(&self) -> bool {
        self.metrics.iter().any(|m| m.is_differential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = Registry::default();
        assert_eq!(registry.graph_name, "snmp");
        assert_eq!(registry.graph_unit, "float");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_declarations_do_not_count() {
        let registry = Registry::from_declarations(
            "router",
            "integer",
            ["1.3.6.1.2.1.1.3.0:uptime", "justanoid", "1.3.6.1.2.1.2.2.1.10.1:in:1"],
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.metrics()[0].name, "uptime");
        assert_eq!(registry.metrics()[1].name, "in");
        assert!(registry.has_differential());
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let registry = Registry::default()
            .with_graph_name("dup")
            .with_graph_unit("integer");
        let registry = Registry::from_declarations(
            registry.graph_name,
            registry.graph_unit,
            ["1.1:a", "1.2:a"],
        );
        assert_eq!(registry.graph_name, "dup");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.metrics()[0].oid(), Some("1.1"));
        assert_eq!(registry.metrics()[1].oid(), Some("1.2"));
    }
}
