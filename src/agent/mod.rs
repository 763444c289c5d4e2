//! Output side of the plugin: the monitoring agent's plugin protocol.
//!
//! The agent runs the plugin once per interval. With the meta environment
//! variable set it expects the graph definitions:
//!
//! ```text
//! # mackerel-agent-plugin
//! {"graphs":{"snmp":{"label":"snmp","unit":"float","metrics":[...]}}}
//! ```
//!
//! Otherwise it expects one `graph.metric<TAB>value<TAB>epoch` line per value.
//! Differential metrics are turned into per-minute rates here, using the
//! previous invocation's values kept in a state file.

pub mod config;
pub mod state;

pub use config::AgentConfig;
pub use state::{RateOutcome, StoredState};

use crate::error::Result;
use crate::metrics::{GraphDefinition, MetricsProvider, Reading};
use std::io::Write;
use tracing::{debug, info};

/// First line of the graph definition output.
pub const META_HEADER: &str = "# mackerel-agent-plugin";

/// Receives graph definitions and readings.
pub trait MetricSink {
    /// Announce the graphs this plugin produces.
    fn register(&mut self, definition: &GraphDefinition) -> Result<()>;

    /// Publish one polling round.
    fn emit(&mut self, definition: &GraphDefinition, reading: &Reading) -> Result<()>;
}

/// Writes the agent plugin protocol to `out`.
pub struct PluginHelper<W> {
    config: AgentConfig,
    out: W,
}

impl<W: Write> PluginHelper<W> {
    pub fn new(config: AgentConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run one plugin invocation against `provider`.
    ///
    /// In meta mode only the graph definition is written and no polling
    /// happens. A session error from the provider is returned untouched.
    pub async fn run<P: MetricsProvider>(&mut self, provider: &P) -> Result<()> {
        let definition = provider.graph_definition();

        if self.config.meta {
            return self.register(&definition);
        }

        let reading = provider.fetch_metrics().await?;
        self.emit(&definition, &reading)
    }

    /// Write values as of `now` (unix seconds).
    pub fn emit_at(
        &mut self,
        definition: &GraphDefinition,
        reading: &Reading,
        now: i64,
    ) -> Result<()> {
        for (graph_key, graph) in definition.iter() {
            let has_diff = graph.metrics.iter().any(|m| m.diff);
            let state_path = self.config.tempfile_path(graph_key);
            let previous = if has_diff {
                StoredState::load(&state_path)
            } else {
                StoredState::default()
            };

            let mut current = StoredState {
                last_time: now,
                ..Default::default()
            };

            for metric in &graph.metrics {
                let Some(value) = reading.get(&metric.name) else {
                    continue;
                };
                let key = format!("{}.{}", graph_key, metric.name);

                if !metric.diff {
                    self.write_value(&key, value, now)?;
                    continue;
                }

                current.values.insert(key.clone(), value);
                match previous.rate(&key, value, now) {
                    RateOutcome::Rate(rate) => self.write_value(&key, rate, now)?,
                    outcome => debug!("No rate for {}: {:?}", key, outcome),
                }
            }

            if has_diff {
                current.save(&state_path)?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn write_value(&mut self, key: &str, value: f64, now: i64) -> Result<()> {
        writeln!(self.out, "{}\t{:.6}\t{}", key, value, now)?;
        Ok(())
    }
}

impl<W: Write> MetricSink for PluginHelper<W> {
    fn register(&mut self, definition: &GraphDefinition) -> Result<()> {
        let json = serde_json::to_string(definition)?;
        writeln!(self.out, "{}", META_HEADER)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()?;
        info!("Registered {} graph(s)", definition.graphs.len());
        Ok(())
    }

    fn emit(&mut self, definition: &GraphDefinition, reading: &Reading) -> Result<()> {
        self.emit_at(definition, reading, chrono::Utc::now().timestamp())
    }
}
