use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Tutor completion gateway
#[derive(Debug, Parser)]
#[command(name = "tutor", about = "Resilient LLM forwarder for the study assistant")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tutor.toml", env = "TUTOR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "TUTOR_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter in `RUST_LOG` syntax
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,
}
