//! Data structures exchanged with the monitoring agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SNMP port used when the host does not name one.
pub const DEFAULT_SNMP_PORT: u16 = 161;

/// Connection parameters for one SNMP agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or address, optionally with a `:port` suffix
    pub host: String,
    /// SNMP v2c community string
    pub community: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            community: "public".to_string(),
        }
    }
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(host: impl Into<String>, community: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            community: community.into(),
        }
    }

    /// The `host:port` target, adding the default SNMP port when missing.
    pub fn target(&self) -> String {
        let has_port = match self.host.rsplit_once(':') {
            // bracketed IPv6 with a port, or host:port
            Some((head, port)) => {
                port.parse::<u16>().is_ok() && (!head.contains(':') || head.ends_with(']'))
            }
            None => false,
        };

        if has_port {
            self.host.clone()
        } else if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, DEFAULT_SNMP_PORT)
        } else {
            format!("{}:{}", self.host, DEFAULT_SNMP_PORT)
        }
    }
}

/// Values gathered by one polling round, keyed by metric name.
///
/// Iteration follows insertion order. Inserting a name twice keeps the first
/// position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    values: Vec<(String, f64)>,
}

impl Reading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Rendering attributes of a single metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSchema {
    pub name: String,
    pub label: String,
    /// Graph the rate of change between polls
    pub diff: bool,
    /// Render stacked with sibling metrics
    pub stacked: bool,
}

/// One graph and the metrics drawn on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub label: String,
    pub unit: String,
    pub metrics: Vec<MetricSchema>,
}

/// Graph definitions keyed by graph name, as registered with the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub graphs: BTreeMap<String, Graph>,
}

impl GraphDefinition {
    /// Iterate over graphs with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Graph)> {
        self.graphs.iter().map(|(key, graph)| (key.as_str(), graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_target() {
        assert_eq!(Endpoint::default().target(), "localhost:161");
        assert_eq!(Endpoint::new("10.0.0.1:1161", "c").target(), "10.0.0.1:1161");
        assert_eq!(Endpoint::new("::1", "c").target(), "[::1]:161");
        assert_eq!(Endpoint::new("[::1]:162", "c").target(), "[::1]:162");
        assert_eq!(Endpoint::new("[fe80::1]", "c").target(), "[fe80::1]:161");
    }

    #[test]
    fn test_reading_last_write_wins_in_place() {
        let mut reading = Reading::new();
        reading.insert("a", 1.0);
        reading.insert("b", 2.0);
        reading.insert("a", 3.0);

        assert_eq!(reading.len(), 2);
        assert_eq!(reading.get("a"), Some(3.0));
        let names: Vec<_> = reading.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_graph_definition_json_shape() {
        let mut definition = GraphDefinition::default();
        definition.graphs.insert(
            "snmp".to_string(),
            Graph {
                label: "snmp".to_string(),
                unit: "float".to_string(),
                metrics: vec![MetricSchema {
                    name: "cpu".to_string(),
                    label: "cpu".to_string(),
                    diff: false,
                    stacked: true,
                }],
            },
        );

        let json: serde_json::Value = serde_json::to_value(&definition).unwrap();
        let graph = &json["graphs"]["snmp"];
        assert_eq!(graph["unit"], "float");
        assert_eq!(graph["metrics"][0]["name"], "cpu");
        assert_eq!(graph["metrics"][0]["stacked"], true);
    }
}
