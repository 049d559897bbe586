//! Subreddit sentiment polarity CLI
//!
//! Usage:
//! ```bash
//! cargo run                                         # interactive menu
//! cargo run -- --limit 50 --log-level info
//! cargo run -- run --topic rust --keywords borrow compiler
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use subreddit_sentiment::{
    defaults, AppConfig, DisabledTranslator, LibreTranslateClient, PolarityLexicon,
    RedditConnector, SentimentScorer, Shell, ShellOptions, TerminalDisplay, Translator,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sentiment_polarity")]
#[command(version)]
#[command(about = "Sentiment polarity of subreddit comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comments fetched per run
    #[arg(short, long)]
    limit: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = defaults::LOG_LEVEL)]
    log_level: String,

    /// Do not clear the screen between menus
    #[arg(long)]
    no_clear: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one subreddit without the menu
    Run {
        /// Subreddit name
        #[arg(short, long)]
        topic: String,

        /// Heatmap keywords (two or more)
        #[arg(short, long, num_args = 1..)]
        keywords: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        _ => Level::ERROR,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenv::dotenv().ok();
    let config = load_config(&cli)?;

    let translator: Box<dyn Translator> = match &config.translation.url {
        Some(url) => {
            info!(url = %url, "translation enabled");
            Box::new(
                LibreTranslateClient::new(
                    url.as_str(),
                    config.translation.api_key.clone(),
                    config.translation.timeout_secs,
                )
                .context("Failed to create translation client")?,
            )
        }
        None => Box::new(DisabledTranslator),
    };

    let scorer = SentimentScorer::new(PolarityLexicon::new(), translator);
    let connector = RedditConnector::new(config.reddit.clone());
    let mut display = TerminalDisplay::new(io::stdout(), config.charts.clone());

    let stdin = io::stdin();
    let options = ShellOptions {
        comment_limit: config.analysis.comment_limit,
        histogram_bins: config.analysis.histogram_bins,
        clear_screen: !cli.no_clear && cli.command.is_none(),
        pause_between_charts: cli.command.is_none(),
    };
    let mut shell = Shell::new(
        &connector,
        &scorer,
        &mut display,
        stdin.lock(),
        io::stdout(),
        options,
    );

    match cli.command {
        Some(Commands::Run { topic, keywords }) => {
            shell.analyze(&topic, &keywords)?;
        }
        None => shell.run()?,
    }

    Ok(())
}

/// Defaults, then the config file, then the environment, then flags
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.apply_env()?;

    if let Some(limit) = cli.limit {
        config.analysis.comment_limit = limit;
    }

    config.validate()?;
    Ok(config)
}
