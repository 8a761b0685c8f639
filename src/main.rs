//! Command line client for the OneFS Platform API
//!
//! Connects to a cluster, runs one call and prints the JSON result to stdout.
//!
//! # Usage
//!
//! ```bash
//! papi-lite --endpoint https://cluster:8080 --user admin --ignore-cert zones
//! papi-lite users --zone System
//! papi-lite get platform/16/cluster/config
//! ```
//!
//! Settings are read from `--config` (or the default config file), then
//! `PAPI_*` environment variables, then command line flags.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use papi_lite::{
    ApiRequest, ClusterConnection, Settings,
    config::{ConfigLoader, default_config_path},
    utils::VERSION,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "papi-lite")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cluster endpoint including scheme and port
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// User name
    #[arg(short, long)]
    user: Option<String>,

    /// Password
    #[arg(short, long)]
    password: Option<String>,

    /// Disable TLS certificate verification
    #[arg(long)]
    ignore_cert: bool,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Show version information
    #[arg(long)]
    version: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Print the latest platform API version
    Latest,
    /// List access zones
    Zones,
    /// List local users of an access zone
    Users {
        /// Access zone
        #[arg(short, long, default_value = "System")]
        zone: String,
    },
    /// GET an arbitrary path, following resume tokens
    Get {
        /// Path relative to the endpoint, e.g. platform/16/cluster/config
        path: String,
        /// Query argument as key=value, may be repeated
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle version flag early
    if cli.version {
        println!("{}", VERSION);
        return Ok(());
    }

    // Logging settings come from the config file, so load it before the subscriber exists
    let settings = build_settings(&cli);
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    let default_level = if cli.verbose || logging.verbose {
        "debug".to_string()
    } else {
        logging.level
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command.clone() else {
        anyhow::bail!("No command given; see --help");
    };

    let settings = settings?;
    debug!("Running {:?} against {}", command, settings.cluster.endpoint);

    let mut conn = ClusterConnection::new();
    conn.connect(&settings.cluster)
        .await
        .context("Unable to connect to API endpoint")?;

    let result = run_command(&mut conn, &command).await;
    if let Err(e) = conn.disconnect().await {
        tracing::warn!("Failed to close session: {}", e);
    }

    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}

/// Merge file, environment and command line settings, then validate
fn build_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_file = cli.config.clone().or_else(default_config_path);
    let mut settings = ConfigLoader::new().load(config_file.as_deref())?;

    if let Some(ref endpoint) = cli.endpoint {
        settings.cluster.endpoint = endpoint.clone();
    }
    if let Some(ref user) = cli.user {
        settings.cluster.user = user.clone();
    }
    if let Some(ref password) = cli.password {
        settings.cluster.password = password.clone();
    }
    if cli.ignore_cert {
        settings.cluster.ignore_cert = true;
    }
    if let Some(timeout) = cli.timeout {
        settings.cluster.timeout_secs = timeout;
    }

    settings.validate()?;
    Ok(settings)
}

/// Split `key=value` query arguments
fn parse_query(pairs: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("Query argument must be KEY=VALUE: {}", pair))
        })
        .collect()
}

async fn run_command(
    conn: &mut ClusterConnection,
    command: &Command,
) -> anyhow::Result<serde_json::Value> {
    let value = match command {
        Command::Latest => serde_json::json!({ "latest": conn.get_platform_latest().await? }),
        Command::Zones => serde_json::to_value(conn.get_access_zone_list().await?)?,
        Command::Users { zone } => serde_json::to_value(conn.get_user_list(zone).await?)?,
        Command::Get { path, query } => {
            let request = ApiRequest::get(path.as_str()).with_query_map(
                parse_query(query)?.into_iter().collect(),
            );
            let body = conn.session_mut().send(&request).await?;
            serde_json::to_value(body)?
        }
    };
    Ok(value)
}
