//! Data types shared by the pipeline and the charts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum comment in fetch order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Position in fetch order (0-based)
    pub index: usize,
    /// Raw comment body
    pub body: String,
    /// Forum-side identifier
    pub id: Option<String>,
    /// Author username
    pub author: Option<String>,
    /// Creation time
    pub created: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a comment with only a body
    pub fn new(index: usize, body: impl Into<String>) -> Self {
        Self {
            index,
            body: body.into(),
            id: None,
            author: None,
            created: None,
        }
    }

    /// Set the forum-side identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Which path the translate step took for one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationOutcome {
    /// Detected as English, scored as-is
    AlreadyEnglish,
    /// Translated from the given language code
    Translated { from: String },
    /// Detection or translation failed, original text scored
    Fallback { reason: String },
}

impl TranslationOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TranslationOutcome::Fallback { .. })
    }
}

/// Result of scoring one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored {
    /// Polarity in [-1, 1]
    pub polarity: f64,
    /// Text that was scored (translated or original)
    pub text: String,
    /// Translate step outcome
    pub outcome: TranslationOutcome,
}

/// Scores and effective texts of one pipeline run, index-aligned with the
/// fetched comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    scores: Vec<f64>,
    texts: Vec<String>,
    outcomes: Vec<TranslationOutcome>,
}

impl Analysis {
    /// Create an empty analysis
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one scored comment
    pub fn push(&mut self, scored: Scored) {
        self.scores.push(scored.polarity);
        self.texts.push(scored.text);
        self.outcomes.push(scored.outcome);
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn outcomes(&self) -> &[TranslationOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of texts that were translated before scoring
    pub fn translated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_translated()).count()
    }

    /// Number of texts scored as-is after a failed translate step
    pub fn fallback_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fallback()).count()
    }
}

impl FromIterator<Scored> for Analysis {
    fn from_iter<I: IntoIterator<Item = Scored>>(iter: I) -> Self {
        let mut analysis = Analysis::new();
        for scored in iter {
            analysis.push(scored);
        }
        analysis
    }
}
