//! `schemas` command

mod handler;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub use handler::handle_schemas_command;

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct SchemasCommands {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
