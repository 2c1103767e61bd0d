mod headless;
mod logging;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tonkeygen::KeygenConfig;

#[derive(Parser)]
#[command(name = "tonkeygen")]
#[command(about = "Generate TON keys and verify 24-word phrases")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive key wizard (default)
    Tui,
    /// Generate a key, mixing in random text read from stdin
    Generate {
        /// Print the key as JSON
        #[arg(long)]
        json: bool,
        /// Also save the public key to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Derive the public key of a 24-word phrase read from stdin
    Verify {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List dictionary words starting with a prefix
    Suggest { prefix: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = KeygenConfig::init()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init_file(config)?;
            tui::run_tui(config).await
        }
        Commands::Generate { json, save } => {
            logging::init_stderr();
            headless::generate(config, json, save).await
        }
        Commands::Verify { json } => {
            logging::init_stderr();
            headless::verify(config, json).await
        }
        Commands::Suggest { prefix } => {
            logging::init_stderr();
            headless::suggest(config, &prefix).await
        }
    }
}
