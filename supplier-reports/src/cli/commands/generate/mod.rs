//! `generate` command

mod handler;

use clap::Args;
use std::path::PathBuf;

pub use handler::handle_generate_command;

#[derive(Args, Debug)]
pub struct GenerateCommands {
    /// Order workbook (.xlsx) with "Export orders" and "Product list" sheets
    #[arg(short, long)]
    pub file: PathBuf,

    /// Directory to write reports to (defaults to the configured reports_dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
