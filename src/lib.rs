//! # Subreddit Sentiment
//!
//! Fetches the newest comments of a subreddit, scores the sentiment
//! polarity of each one and draws six summary charts in the terminal.
//!
//! ## Modules
//!
//! - `api` - Reddit client and translation service
//! - `sentiment` - Polarity lexicon and translate-then-score step
//! - `pipeline` - Input validation and the fetch → score pipeline
//! - `charts` - Chart builders and the terminal display
//! - `shell` - Interactive menu loop
//! - `config` - Configuration loading
//!
//! ## Example Usage
//!
//! ```no_run
//! use subreddit_sentiment::{
//!     charts, AnalysisPipeline, AppConfig, Connector, PolarityLexicon, RedditConnector,
//!     SentimentScorer, DisabledTranslator,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let session = RedditConnector::new(config.reddit.clone()).connect()?;
//!
//!     let scorer = SentimentScorer::new(PolarityLexicon::new(), DisabledTranslator);
//!     let pipeline = AnalysisPipeline::new(&scorer);
//!     let analysis = pipeline.run(session.as_ref(), "rust", 100)?;
//!
//!     let keywords = vec!["borrow".to_string(), "compiler".to_string()];
//!     for chart in charts::build_all(&analysis, &keywords, scorer.lexicon(), 10) {
//!         println!("{}", chart.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sentiment;
pub mod shell;

// Re-exports for convenience
pub use api::{
    CommentSource, Connector, DisabledTranslator, FetchError, LibreTranslateClient,
    RedditConnector, RedditSession, TranslateError, Translator,
};
pub use charts::{Chart, ChartData, ChartDisplay, ChartKind, TerminalDisplay};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use models::{Analysis, Comment, Scored, TranslationOutcome};
pub use pipeline::{validate_inputs, AnalysisPipeline};
pub use sentiment::{PolarityLexicon, SentimentScorer};
pub use shell::{Shell, ShellOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Comments fetched per run
    pub const COMMENT_LIMIT: usize = 100;

    /// Reddit returns at most this many items per listing page
    pub const LISTING_PAGE_SIZE: usize = 100;

    /// Histogram bin count
    pub const HISTOGRAM_BINS: usize = 10;

    /// Minimum number of heatmap keywords
    pub const MIN_KEYWORDS: usize = 2;

    /// Language code every text is scored in
    pub const TARGET_LANGUAGE: &str = "en";

    /// HTTP timeout (seconds)
    pub const HTTP_TIMEOUT_SECS: u64 = 30;

    /// Chart drawing area width (columns)
    pub const CHART_WIDTH: usize = 60;

    /// Chart drawing area height (rows)
    pub const CHART_HEIGHT: usize = 15;

    /// Smallest drawable chart area
    pub const MIN_CHART_WIDTH: usize = 10;
    pub const MIN_CHART_HEIGHT: usize = 5;

    /// Log level when `--log-level` is not given
    pub const LOG_LEVEL: &str = "error";
}
