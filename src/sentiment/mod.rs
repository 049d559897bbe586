//! # Sentiment Module
//!
//! Polarity lexicon and the translate-then-score step.

mod lexicon;
mod scorer;

pub use lexicon::{LexiconResult, PolarityLexicon};
pub use scorer::SentimentScorer;
