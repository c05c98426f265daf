//! calcboard — a small self-hosted keypad calculator.
//!
//! Serves two embedded keypad pages and a JSON arithmetic endpoint, and
//! offers an interactive keypad in the terminal via the `repl` subcommand.

mod calculator;
mod config;
mod repl;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "calcboard", version, about = "Four-function keypad calculator served over HTTP")]
struct Args {
    /// Address to bind the HTTP server to (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Port for the HTTP server (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Config file path (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive keypad in the terminal instead of the server.
    Repl {
        /// Which page variant's keys to offer.
        #[arg(long, value_enum, default_value = "full")]
        layout: LayoutArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LayoutArg {
    Full,
    Standard,
    Dashboard,
}

impl From<LayoutArg> for calculator::Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Full => Self::Full,
            LayoutArg::Standard => Self::Standard,
            LayoutArg::Dashboard => Self::Dashboard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calcboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        // An explicitly named file must load.
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load config, using defaults: {e:#}");
            Config::default()
        }),
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    match args.command {
        Some(Command::Repl { layout }) => repl::run(layout.into()),
        None => serve(config),
    }
}

fn serve(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid bind address {}:{}",
                config.server.bind, config.server.port
            )
        })?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?
        .block_on(server::run(addr, config.pages.dashboard))
}
