//! Metric declarations, polling and graph schema.
//!
//! Declarations are parsed into a [`Registry`], which the
//! [`SnmpCollector`] reads to know what to fetch and the schema builder reads
//! to know how to describe it.

pub mod collector;
pub mod data;
pub mod registry;
pub mod schema;
pub mod spec;
pub mod traits;

// Re-export commonly used items
pub use collector::SnmpCollector;
pub use data::{Endpoint, GraphDefinition, Reading};
pub use registry::Registry;
pub use spec::{parse_declaration, DeclarationOutcome, MetricSpec};
pub use traits::{MetricsProvider, SnmpConnector, SnmpSession};
