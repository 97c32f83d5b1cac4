//! Herald CLI entry point.

use clap::Parser;

use herald::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => herald::cli::commands::run::execute(args, cli.json).await,
        Commands::Config(command) => {
            herald::cli::commands::config::execute(command, cli.json).await
        }
    };

    if let Err(err) = result {
        herald::cli::handle_error(err, cli.json);
    }
}
