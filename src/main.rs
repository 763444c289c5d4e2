//! SNMP Graph Plugin binary.
//!
//! Runs one plugin invocation: prints graph definitions when the agent asks
//! for them, otherwise polls the configured OIDs and prints their values.

use anyhow::Context;
use clap::Parser;
use snmp_graph_plugin::{
    AgentConfig, AsyncSnmpConnector, Endpoint, PluginHelper, Registry, SnmpCollector,
    DEFAULT_COMMUNITY, DEFAULT_GRAPH_NAME, DEFAULT_GRAPH_UNIT, DEFAULT_HOST, DEFAULT_TIMEOUT_MS,
};
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Long flags that may also be spelled with a single dash (`-host`, `-name=x`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "name",
    "unit",
    "host",
    "community",
    "tempfile",
    "timeout",
    "verbose",
    "debug",
];

#[derive(Parser, Debug)]
#[command(name = "snmp_graph_plugin")]
#[command(about = "SNMP metrics plugin for monitoring agents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Polls SNMP v2c OIDs and prints them in the monitoring agent plugin format.\n\
                  Each metric is declared as OID:NAME[:DIFF[:STACKED]]."
)]
struct Cli {
    /// Graph name
    #[arg(long, default_value = DEFAULT_GRAPH_NAME)]
    name: String,

    /// Graph unit
    #[arg(long, default_value = DEFAULT_GRAPH_UNIT)]
    unit: String,

    /// SNMP agent hostname, optionally with :port
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// SNMP v2c community
    #[arg(long, default_value = DEFAULT_COMMUNITY)]
    community: String,

    /// State file for differential metrics
    #[arg(long, default_value = "")]
    tempfile: String,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Metric declarations: OID:NAME[:DIFF[:STACKED]]
    #[arg(value_name = "DECLARATION")]
    declarations: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_flag_args(std::env::args()));

    init_logging(&cli)?;

    let registry = Registry::from_declarations(&cli.name, &cli.unit, &cli.declarations);
    debug!(
        "Loaded {} of {} metric declarations for graph {}",
        registry.len(),
        cli.declarations.len(),
        registry.graph_name
    );

    let connector = AsyncSnmpConnector::new(Duration::from_millis(cli.timeout));
    let endpoint = Endpoint::new(&cli.host, &cli.community);
    let collector = SnmpCollector::new(connector, endpoint, registry);

    let config = AgentConfig::new(cli.tempfile.as_str()).with_meta_from_env();
    let mut helper = PluginHelper::new(config, std::io::stdout());

    if let Err(err) = helper.run(&collector).await {
        error!("Plugin run failed: {}", err);
        return Err(err).context(format!("polling {} failed", cli.host));
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        LevelFilter::DEBUG
    } else if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout carries the plugin protocol
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Rewrite `-flag` and `-flag=value` into their `--flag` forms.
///
/// Arguments after a bare `--` are left alone.
fn normalize_flag_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }

            let is_single_dash_long = arg
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .map(|rest| rest.split_once('=').map_or(rest, |(flag, _)| flag))
                .is_some_and(|flag| SINGLE_DASH_FLAGS.contains(&flag));

            if is_single_dash_long {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
