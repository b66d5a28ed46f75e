use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for caop-cli
#[derive(Debug, Parser)]
#[command(
    name = "caop",
    version,
    about = "CLI for reconciling and inspecting Portugal's administrative divisions"
)]
pub struct CliArgs {
    /// Directory holding the source datasets (JSON exports, decoded
    /// geometry, projection files)
    #[arg(short = 'd', long = "data-dir", global = true, default_value = "res")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the reconciled data
    Stats,

    /// List all municipality names
    Municipalities,

    /// Show details for one municipality (accent- and case-insensitive)
    Municipality {
        /// Municipality name, e.g. "Évora" or "evora"
        name: String,
    },

    /// List parish names, optionally restricted to one municipality
    Parishes {
        /// Municipality to restrict to
        #[arg(short, long)]
        municipality: Option<String>,
    },

    /// Write the reconciled aggregate as pretty-printed JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        out: PathBuf,
    },
}
