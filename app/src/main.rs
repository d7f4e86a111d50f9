mod bootstrap;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backend")]
#[command(about = "Resolve and check the backend's database configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved database options as JSON
    Config {
        /// Directory holding the .env files
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Connect to the configured database and ping it
    #[command(name = "db:check")]
    DbCheck {
        /// Directory holding the .env files
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    bootstrap::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { root, compact } => {
            commands::config::run(&root, compact);
        }
        Commands::DbCheck { root } => {
            commands::db_check::run(&root).await;
        }
    }
}
