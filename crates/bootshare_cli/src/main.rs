//! bootshare CLI
//!
//! Command-line tools for the boot shared-data area.
//!
//! # Commands
//!
//! - `write` - Record the bootloader information into a region file
//! - `dump` - Print the entries of a region file
//! - `verify` - Check that a region file holds a valid area

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Boot shared-data area tools.
#[derive(Parser)]
#[command(name = "bootshare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the region file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the bootloader information into the region
    Write {
        /// Boot configuration (JSON); defaults are used if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Slot the application is booted from
        #[arg(short, long, default_value = "0")]
        slot: u32,

        /// Region size in bytes when creating the file
        #[arg(long, default_value = "256")]
        capacity: usize,
    },

    /// Print the entries stored in the region
    Dump {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that the region holds a valid area
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Write {
            config,
            slot,
            capacity,
        } => {
            let path = cli.path.ok_or("Region path required for write")?;
            commands::write::run(&path, config.as_deref(), slot, capacity)?;
        }
        Commands::Dump { format } => {
            let path = cli.path.ok_or("Region path required for dump")?;
            commands::dump::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Region path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Version => {
            println!("bootshare CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("bootshare core v{}", bootshare_core::VERSION);
        }
    }

    Ok(())
}
