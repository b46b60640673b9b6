//! BotOrNot CLI - Ask a reasoning agent and audit where its answer came from.

use botornot_cli::commands;
use botornot_cli::repl;
use botornot_cli::{Cli, Command, Config, Formatter};
use botornot_extractor::Extractor;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> botornot_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(profile_name) = cli.profile.clone() {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let backend = cli.backend.as_deref();

    match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &config.extractor, &formatter)?;
        }
        Some(Command::Ask(args)) => {
            let client = commands::build_client(&config, backend)?;
            let extractor = Extractor::new(config.extractor.clone())?;
            commands::execute_ask(args, &client, &extractor, &formatter).await?;
        }
        Some(Command::Experts(args)) => {
            let client = commands::build_client(&config, backend)?;
            let extractor = Extractor::new(config.extractor.clone())?;
            commands::execute_experts(args, &client, &extractor, &formatter).await?;
        }
        None | Some(Command::Repl) => {
            let client = commands::build_client(&config, backend)?;
            let extractor = Extractor::new(config.extractor.clone())?;
            repl::run_repl(&config, client, extractor, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr so tracing output never mixes with rendered answers.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
