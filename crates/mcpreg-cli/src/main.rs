//! mcpreg - MCP server registry
//!
//! Usage:
//!   mcpreg serve                # Serve the registry API
//!   mcpreg list                 # Page through registered servers
//!   mcpreg show <name>          # Show one server (latest or --version)
//!   mcpreg versions <name>      # List every version of a server
//!   mcpreg health               # Report load status
//!   mcpreg check <path>         # Validate seed data

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcpreg_core::config::{self, RegistryConfig};
use mcpreg_core::entry::Entry;
use mcpreg_core::prelude::{EntryStore, Registry, RegistryServer, Router};
use mcpreg_core::registry::Page;
use mcpreg_core::source;

#[derive(Parser)]
#[command(name = "mcpreg")]
#[command(about = "MCP server registry", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to config.toml (default: <config_dir>/mcpreg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed data file or directory (overrides data.path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the registry HTTP API
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Request handling threads (overrides server.workers)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// List servers, one page at a time
    List {
        /// Page size (clamped to listing.max_limit)
        #[arg(short, long)]
        limit: Option<i64>,

        /// Cursor from a previous page
        #[arg(short, long)]
        cursor: Option<String>,

        /// Follow cursors until the last page
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one server
    Show {
        /// Server name
        name: String,

        /// Exact version (default: latest)
        #[arg(short, long)]
        version: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// List every version of a server, newest first
    Versions {
        /// Server name
        name: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Report load status and server count
    Health,

    /// Validate a seed file or directory without serving it
    Check {
        /// Seed data path
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcpreg=info,mcpreg_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::Check { path } = &cli.command {
        return run_check(path);
    }

    let config = resolve_config(&cli.global)?;

    match cli.command {
        Commands::Serve { bind, workers } => run_serve(config, bind, workers),
        Commands::List {
            limit,
            cursor,
            all,
            format,
        } => run_list(&config, limit, cursor, all, format),
        Commands::Show {
            name,
            version,
            format,
        } => run_show(&config, &name, version.as_deref(), format),
        Commands::Versions { name, format } => run_versions(&config, &name, format),
        Commands::Health => run_health(&config),
        Commands::Check { .. } => Ok(()),
    }
}

/// Config file values with CLI overrides applied
fn resolve_config(args: &GlobalArgs) -> Result<RegistryConfig> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(data) = &args.data {
        config.data.path = data.clone();
    }
    Ok(config)
}

fn run_serve(
    mut config: RegistryConfig,
    bind: Option<SocketAddr>,
    workers: Option<usize>,
) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind.to_string();
    }
    if let Some(workers) = workers {
        config.server.workers = workers;
    }
    config.validate()?;

    let registry = Registry::load(&config)?;
    let addr = config.bind_addr()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let server = RegistryServer::bind(addr, Router::new(registry), config.server.workers)?;
        let shutdown = server.shutdown_handle();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received Ctrl-C, shutting down");
            }
            shutdown.shutdown();
        });

        server.run().await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn run_list(
    config: &RegistryConfig,
    limit: Option<i64>,
    cursor: Option<String>,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let registry = Registry::load(config)?;
    let listing = registry.listing();

    let mut pages: Vec<Page> = Vec::new();
    let mut cursor = cursor;
    loop {
        let page = listing.list(limit, cursor.as_deref())?;
        cursor = page.metadata.next_cursor.clone();
        pages.push(page);
        if !all || cursor.is_none() {
            break;
        }
    }

    match format {
        OutputFormat::Json => {
            if let [page] = pages.as_slice() {
                println!("{}", serde_json::to_string_pretty(page)?);
            } else {
                let servers: Vec<&Entry> = pages.iter().flat_map(|p| &p.servers).collect();
                let output = serde_json::json!({
                    "servers": servers,
                    "metadata": { "count": servers.len() },
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        OutputFormat::Table => {
            let servers: Vec<&Entry> = pages.iter().flat_map(|p| &p.servers).collect();
            print_entry_table(&servers);
            if let Some(next) = pages.last().and_then(|p| p.metadata.next_cursor.as_deref()) {
                println!();
                println!("More results: mcpreg list --cursor {}", next);
            }
        }
    }

    Ok(())
}

fn run_show(
    config: &RegistryConfig,
    name: &str,
    version: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let registry = Registry::load(config)?;
    let entry = registry.resolver().resolve(name, version)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
        OutputFormat::Table => {
            println!("Name:        {}", entry.name);
            println!("Version:     {}", entry.version);
            println!("Description: {}", entry.description);
            for (key, value) in &entry.metadata {
                println!("{:<12} {}", format!("{}:", key), value);
            }
        }
    }

    Ok(())
}

fn run_versions(config: &RegistryConfig, name: &str, format: OutputFormat) -> Result<()> {
    let registry = Registry::load(config)?;
    let versions = registry.resolver().versions(name)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "servers": versions });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("{:<16} Description", "Version");
            println!("{}", "-".repeat(60));
            for entry in versions {
                println!("{:<16} {}", entry.version, entry.description);
            }
        }
    }

    Ok(())
}

fn run_health(config: &RegistryConfig) -> Result<()> {
    let registry = Registry::load(config)?;
    let report = registry.health().health();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_check(path: &std::path::Path) -> Result<()> {
    let entries = source::load_path(path)?;
    let total = entries.len();
    let store = EntryStore::from_entries(entries)
        .with_context(|| format!("Seed data at {} is invalid", path.display()))?;

    println!(
        "OK: {} servers, {} versions ({} entries read)",
        store.count(),
        store.version_count(),
        total
    );
    Ok(())
}

fn print_entry_table(entries: &[&Entry]) {
    if entries.is_empty() {
        println!("No servers registered.");
        return;
    }

    println!("{:<44} {:<12} Description", "Name", "Version");
    println!("{}", "-".repeat(100));

    for entry in entries {
        println!(
            "{:<44} {:<12} {}",
            entry.name,
            entry.version,
            truncate(&entry.description, 60)
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
