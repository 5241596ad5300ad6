use clap::Parser;
use precog::{HttpResponseError, Precog};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, TokenCommands};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("precog=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<HttpResponseError>() {
            Some(http) => eprintln!("error ({}): {}", http.status_code(), http.message()),
            None => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.connection.config();
    tracing::debug!(
        host = %config.host,
        port = config.port,
        path_prefix = %config.path_prefix,
        "Connecting"
    );
    let precog = Precog::from_config(&config)?;

    match &cli.command {
        Commands::Token(TokenCommands::Create(args)) => {
            commands::token::create(&precog, args, cli.format)
        }
        Commands::Token(TokenCommands::Show) => commands::token::show(&precog, cli.format),
        Commands::Token(TokenCommands::Delete(args)) => {
            commands::token::delete(&precog, args, cli.format)
        }
        Commands::Store(args) => commands::vfs::store(&precog, args, cli.format),
        Commands::Query(args) => commands::vfs::query(&precog, args, cli.format),
        Commands::Ls(args) => commands::vfs::ls(&precog, args, cli.format),
    }
}
