mod commands;

pub use commands::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tplmarket")]
#[command(about = "Browse, save and seed marketplace templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory; defaults to TPLMARKET_PATH, then the platform data dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
