//! AeroCast CLI - terminal companion for the AeroCast weather and baggage platform

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod router;
mod session;
mod validation;

use cli::args::GlobalOptions;
use cli::{CacheCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` raises the default filter; `RUST_LOG` still wins
fn init_logging(debug: bool) {
    let default_level = if debug { "aerocast=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Login(args) => cli::auth::login(&opts, args).await,
        Commands::Register(args) => cli::auth::register(&opts, args).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Status { verify } => cli::status::run(&opts, verify).await,
        Commands::Refresh => cli::auth::refresh(&opts).await,
        Commands::Profile => cli::auth::profile(&opts).await,
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::Baggage(cmd) => cli::baggage::run(&opts, cmd).await,
        Commands::Meteo(cmd) => cli::meteo::run(&opts, cmd).await,
        Commands::Airport(cmd) => cli::airport::run(&opts, cmd).await,
        Commands::Admin(cmd) => cli::admin::run(&opts, cmd).await,
        Commands::Subscription(cmd) => cli::subscription::run(&opts, cmd).await,
        Commands::B2b(cmd) => cli::b2b::run(&opts, cmd).await,
        Commands::Qr(cmd) => cli::qr::run(&opts, cmd).await,
        Commands::User(cmd) => cli::user::run(&opts, cmd).await,
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Version => {
            println!("aerocast version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
