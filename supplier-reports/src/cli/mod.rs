//! Command line interface

pub mod commands;

use clap::{Parser, Subcommand};

use commands::generate::GenerateCommands;
use commands::schemas::SchemasCommands;

/// Validate order spreadsheets and generate per-supplier CSV reports
#[derive(Parser, Debug)]
#[command(name = "supplier-reports")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate supplier reports from an order workbook
    Generate(GenerateCommands),
    /// List the data and report schemas
    Schemas(SchemasCommands),
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
