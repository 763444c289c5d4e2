//! Polling rounds against an SNMP agent.

use crate::error::{PluginError, Result};
use crate::metrics::{
    data::{Endpoint, GraphDefinition, Reading},
    registry::Registry,
    schema,
    spec::MetricSpec,
    traits::{MetricsProvider, SnmpConnector, SnmpSession},
};
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Polls every registered metric from one endpoint.
pub struct SnmpCollector<C> {
    connector: C,
    endpoint: Endpoint,
    registry: Registry,
}

impl<C: SnmpConnector> SnmpCollector<C> {
    /// Create a new collector.
    pub fn new(connector: C, endpoint: Endpoint, registry: Registry) -> Self {
        Self {
            connector,
            endpoint,
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Run one polling round.
    ///
    /// Metrics whose fetch or conversion fails are logged and left out of the
    /// reading. Only a failure to open the session is returned as an error.
    /// The session is closed before returning whenever it was opened.
    pub async fn poll(&self) -> Result<Reading> {
        let mut session = match self.connector.connect(&self.endpoint).await {
            Ok(session) => session,
            Err(err) => {
                error!("Failed to open SNMP session to {}: {}", self.endpoint.host, err);
                return Err(if err.is_round_fatal() {
                    err
                } else {
                    PluginError::session_error(err.to_string())
                });
            }
        };

        let reading = self.collect(&mut session).await;

        if let Err(err) = session.close().await {
            warn!("Failed to close SNMP session to {}: {}", self.endpoint.host, err);
        }

        debug!(
            "Polled {}/{} metrics from {}",
            reading.len(),
            self.registry.len(),
            self.endpoint.host
        );
        Ok(reading)
    }

    async fn collect<S: SnmpSession>(&self, session: &mut S) -> Reading {
        let mut reading = Reading::new();

        for spec in self.registry.metrics() {
            match fetch_metric(session, spec).await {
                Ok(value) => reading.insert(spec.name.clone(), value),
                Err(err) => warn!("Skipping metric {}: {}", spec.name, err),
            }
        }

        reading
    }
}

async fn fetch_metric<S: SnmpSession>(session: &mut S, spec: &MetricSpec) -> Result<f64> {
    let raw = session.get(&spec.identifiers).await?;
    parse_value(&spec.name, &raw)
}

/// Read a rendered SNMP value as a number.
pub fn parse_value(metric: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PluginError::conversion_error(metric, raw))
}

#[async_trait]
impl<C: SnmpConnector> MetricsProvider for SnmpCollector<C> {
    async fn fetch_metrics(&self) -> Result<Reading> {
        self.poll().await
    }

    fn graph_definition(&self) -> GraphDefinition {
        schema::graph_definition(&self.registry)
    }
}
