use anyhow::Result;
use clap::Parser;

use supplier_reports::cli::commands::{generate, schemas};
use supplier_reports::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = cli.log_level().to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::Generate(args) => generate::handle_generate_command(args),
        Command::Schemas(args) => schemas::handle_schemas_command(args),
    }
}
