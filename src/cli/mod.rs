//! CLI argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Contour HTTPProxy to Gateway API resource conversion tool
#[derive(Parser)]
#[command(name = "proxy2gateway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file to parse for HTTPProxy objects
    #[arg(long, value_name = "FILE")]
    pub http_proxies: PathBuf,

    /// YAML file to parse for the base Gateway resource
    #[arg(long, value_name = "FILE")]
    pub base_gateway: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only print generated routes, not the Gateway
    #[arg(long)]
    pub routes_only: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostics and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,
}

#[derive(ValueEnum, Clone, Copy, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}
