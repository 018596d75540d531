use anyhow::Context;
use clap::Parser;
use repokit_config::RepoConfig;
use repokit_db::{LibSqlSession, RepositorySupportBuilder};

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = RepoConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &cli.db {
        config.database.path.clone_from(path);
        config.database.url.clear();
        config.database.auth_token.clear();
    }

    let session = LibSqlSession::open(&config.database)
        .await
        .context("failed to open database")?;
    let support = RepositorySupportBuilder::new().handle(session).build()?;

    commands::dispatch(&cli.command, &support).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REPOKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
