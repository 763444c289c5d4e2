//! SNMP v2c sessions backed by `async-snmp`.

use crate::error::{PluginError, Result};
use crate::metrics::{Endpoint, SnmpConnector, SnmpSession};
use async_snmp::{Auth, Client, Oid, Retry, UdpClient, Value};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Opens v2c sessions over UDP.
#[derive(Debug, Clone)]
pub struct AsyncSnmpConnector {
    timeout: Duration,
}

impl Default for AsyncSnmpConnector {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AsyncSnmpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SnmpConnector for AsyncSnmpConnector {
    type Session = AsyncSnmpSession;

    async fn connect(&self, endpoint: &Endpoint) -> Result<AsyncSnmpSession> {
        let target = endpoint.target();
        debug!("Opening SNMP v2c session to {}", target);

        let client = Client::builder(target.clone(), Auth::v2c(endpoint.community.as_str()))
            .timeout(self.timeout)
            .retry(Retry::none())
            .connect()
            .await
            .map_err(|e| PluginError::session_error(format!("{}: {}", target, e)))?;

        Ok(AsyncSnmpSession {
            client: Some(client),
            target,
        })
    }
}

/// One open v2c session.
pub struct AsyncSnmpSession {
    client: Option<UdpClient>,
    target: String,
}

#[async_trait]
impl SnmpSession for AsyncSnmpSession {
    async fn get(&mut self, identifiers: &[String]) -> Result<String> {
        let text = identifiers
            .first()
            .ok_or_else(|| PluginError::fetch_error("", "no object identifier given"))?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| PluginError::fetch_error(text.as_str(), "session already closed"))?;

        let oid = Oid::parse(text)
            .map_err(|e| PluginError::fetch_error(text.as_str(), format!("invalid OID: {}", e)))?;
        let varbind = client
            .get(&oid)
            .await
            .map_err(|e| PluginError::fetch_error(text.as_str(), e.to_string()))?;

        Ok(render_value(&varbind.value))
    }

    async fn close(&mut self) -> Result<()> {
        if self.client.take().is_some() {
            debug!("Closed SNMP session to {}", self.target);
        }
        Ok(())
    }
}

/// Render a value as text for numeric parsing.
///
/// Numeric types print their raw number; `TimeTicks` stays in hundredths of a
/// second. Everything else uses the value's `Display` form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Counter32(n) | Value::Gauge32(n) | Value::TimeTicks(n) => n.to_string(),
        Value::Counter64(n) => n.to_string(),
        other => other.to_string(),
    }
}
