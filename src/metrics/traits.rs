//! Traits at the collaborator seams.

use crate::error::Result;
use crate::metrics::data::{Endpoint, GraphDefinition, Reading};
use async_trait::async_trait;

/// An open SNMP session.
///
/// A session answers single-value requests: one identifier in, one value out.
#[async_trait]
pub trait SnmpSession: Send {
    /// Fetch one value and render it as text.
    ///
    /// `identifiers` is the full declaration field list; only the first entry
    /// is an object identifier and the rest must be ignored. Callers never
    /// pass an empty slice.
    async fn get(&mut self, identifiers: &[String]) -> Result<String>;

    /// Release the session. Called exactly once per opened session.
    async fn close(&mut self) -> Result<()>;
}

/// Opens SNMP sessions.
#[async_trait]
pub trait SnmpConnector: Send + Sync {
    type Session: SnmpSession;

    /// Establish a session with the endpoint.
    async fn connect(&self, endpoint: &Endpoint) -> Result<Self::Session>;
}

/// Something the agent helper can poll and describe.
///
/// Implementations must tolerate `graph_definition` being called before any
/// polling round has run.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Run one polling round.
    async fn fetch_metrics(&self) -> Result<Reading>;

    /// Describe how the metrics should be graphed.
    fn graph_definition(&self) -> GraphDefinition;
}
