//! Input validation and the fetch → score pipeline

use crate::api::{CommentSource, Translator};
use crate::defaults::MIN_KEYWORDS;
use crate::error::AppError;
use crate::models::Analysis;
use crate::sentiment::SentimentScorer;
use tracing::info;

/// Reject inputs that cannot produce a useful run.
///
/// Called before any network access.
pub fn validate_inputs(topic: &str, keywords: &[String]) -> Result<(), AppError> {
    if topic.trim().is_empty() {
        return Err(AppError::invalid_input("Topic name cannot be empty."));
    }
    if keywords.len() < MIN_KEYWORDS {
        return Err(AppError::invalid_input(
            "Please provide at least two keywords.",
        ));
    }
    Ok(())
}

/// Fetches a topic's comments and scores each one
pub struct AnalysisPipeline<'a, T> {
    scorer: &'a SentimentScorer<T>,
}

impl<'a, T: Translator> AnalysisPipeline<'a, T> {
    pub fn new(scorer: &'a SentimentScorer<T>) -> Self {
        Self { scorer }
    }

    /// Score up to `limit` comments of `topic` in fetch order.
    ///
    /// Fails with [`AppError::NoData`] when nothing was fetched.
    pub fn run(
        &self,
        source: &dyn CommentSource,
        topic: &str,
        limit: usize,
    ) -> Result<Analysis, AppError> {
        let comments = source.fetch_comments(topic.trim(), limit)?;
        if comments.is_empty() {
            return Err(AppError::NoData);
        }

        let analysis: Analysis = comments
            .iter()
            .map(|comment| self.scorer.score(&comment.body))
            .collect();

        info!(
            topic = topic.trim(),
            comments = analysis.len(),
            translated = analysis.translated_count(),
            fallback = analysis.fallback_count(),
            "analysis complete"
        );
        Ok(analysis)
    }
}
