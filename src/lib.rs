//! # SNMP Graph Plugin
//!
//! Polls an SNMP v2c agent for numeric values and hands them to a monitoring
//! agent as graphable metrics.
//!
//! ## Features
//!
//! - **Declaration mini-language**: `oid:name[:diff[:stacked]]` per metric
//! - **Best-effort polling**: a failing OID never spoils the rest of a round
//! - **Graph schema**: units, differential and stacked rendering per metric
//! - **Agent plugin protocol**: meta output, value lines and per-minute rates
//! - **Library + Binary**: use as a crate or as a standalone plugin
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_graph_plugin::{
//!     AgentConfig, AsyncSnmpConnector, Endpoint, PluginHelper, Registry, SnmpCollector,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::from_declarations(
//!         "router",
//!         "bytes/sec",
//!         ["1.3.6.1.2.1.2.2.1.10.1:ifInOctets:1", "1.3.6.1.2.1.2.2.1.16.1:ifOutOctets:1"],
//!     );
//!     let collector = SnmpCollector::new(
//!         AsyncSnmpConnector::default(),
//!         Endpoint::new("192.0.2.1", "public"),
//!         registry,
//!     );
//!
//!     let mut helper = PluginHelper::new(AgentConfig::default(), std::io::stdout());
//!     helper.run(&collector).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
pub mod metrics;
pub mod snmp;

// Re-export public API
pub use agent::{AgentConfig, MetricSink, PluginHelper};
pub use error::{PluginError, Result};
pub use metrics::{
    collector::SnmpCollector,
    data::{Endpoint, Graph, GraphDefinition, MetricSchema, Reading},
    registry::{Registry, DEFAULT_GRAPH_NAME, DEFAULT_GRAPH_UNIT},
    spec::{parse_declaration, DeclarationOutcome, MetricSpec, SkipReason},
    traits::{MetricsProvider, SnmpConnector, SnmpSession},
};
pub use snmp::{AsyncSnmpConnector, DEFAULT_TIMEOUT_MS};

/// The default SNMP agent host
pub const DEFAULT_HOST: &str = "localhost";

/// The default SNMP v2c community
pub const DEFAULT_COMMUNITY: &str = "public";
