//! caop-cli — Command-line interface for caop-core
//!
//! Reconciles the CAOP geometry datasets with the attribute exports
//! found in the data directory and lets you inspect the result from the
//! terminal: overall statistics, municipality details, parish lists, or
//! a full JSON export.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ caop-cli stats
//!
//! - List every municipality
//!   $ caop-cli municipalities
//!
//! - Details for one municipality (folded-name lookup)
//!   $ caop-cli municipality evora
//!
//! - Parishes of one municipality
//!   $ caop-cli parishes --municipality "Condeixa-a-Nova"
//!
//! - Export the whole aggregate
//!   $ caop-cli --data-dir ./res export --out administrations.json
//!
//! The first run reconciles from the sources and leaves a binary
//! snapshot next to them; later runs reuse it while it stays fresh.

mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let administrations = caop_core::load_administrations(&args.data_dir)?;

    match args.command {
        Commands::Stats => {
            let stats = administrations.stats();
            println!("Administrations:");
            println!("  Municipalities: {}", stats.municipalities);
            println!("  Parishes: {}", stats.parishes);
        }

        Commands::Municipalities => {
            for name in &administrations.list_of_municipalities_names {
                println!("{name}");
            }
        }

        Commands::Municipality { name } => match administrations.municipality_detail(&name) {
            Some(m) => {
                println!("Municipality: {}", m.name);
                println!("Code: {}", m.code);
                println!("District: {}", m.district.as_deref().unwrap_or("-"));
                println!("Email: {}", m.email.as_deref().unwrap_or("-"));
                println!("Phone: {}", m.phone.as_deref().unwrap_or("-"));
                println!("Website: {}", m.website.as_deref().unwrap_or("-"));
                println!("Mayor: {}", m.mayor.as_deref().unwrap_or("-"));
                if let Some(entry) = administrations.municipality_parishes(&name) {
                    println!("Parishes: {}", entry.parishes.len());
                    for parish in &entry.parishes {
                        println!("- {parish}");
                    }
                }
            }
            None => {
                eprintln!("No municipality found for: {name}");
            }
        },

        Commands::Parishes { municipality } => match municipality {
            Some(name) => match administrations.municipality_parishes(&name) {
                Some(entry) => {
                    for parish in &entry.parishes {
                        println!("{parish}");
                    }
                }
                None => {
                    eprintln!("No municipality found for: {name}");
                }
            },
            None => {
                for name in &administrations.list_of_parishes_names {
                    println!("{name}");
                }
            }
        },

        Commands::Export { out } => {
            let json = serde_json::to_string_pretty(&administrations)?;
            std::fs::write(&out, json)?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}
