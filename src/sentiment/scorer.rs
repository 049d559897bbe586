//! Translate-then-score step for a single text

use crate::api::{TranslateError, Translator};
use crate::defaults::TARGET_LANGUAGE;
use crate::models::{Scored, TranslationOutcome};
use crate::sentiment::PolarityLexicon;
use tracing::debug;

/// Scores texts with a [`PolarityLexicon`], translating non-English text
/// to English first when the translator allows it.
pub struct SentimentScorer<T> {
    lexicon: PolarityLexicon,
    translator: T,
}

impl<T: Translator> SentimentScorer<T> {
    pub fn new(lexicon: PolarityLexicon, translator: T) -> Self {
        Self {
            lexicon,
            translator,
        }
    }

    /// The polarity model
    pub fn lexicon(&self) -> &PolarityLexicon {
        &self.lexicon
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Score one text.
    ///
    /// Translation failures never escape: the original text is scored and
    /// the outcome says why.
    pub fn score(&self, text: &str) -> Scored {
        let (effective, outcome) = match self.to_english(text) {
            Ok(Some((translated, from))) => (translated, TranslationOutcome::Translated { from }),
            Ok(None) => (text.to_string(), TranslationOutcome::AlreadyEnglish),
            Err(err) => {
                debug!(error = %err, "translation failed, scoring original text");
                (
                    text.to_string(),
                    TranslationOutcome::Fallback {
                        reason: err.to_string(),
                    },
                )
            }
        };

        let polarity = self.lexicon.polarity(&effective);
        debug!(polarity, outcome = ?outcome, "scored text");

        Scored {
            polarity,
            text: effective,
            outcome,
        }
    }

    /// `Some((translation, source_language))` for non-English text
    fn to_english(&self, text: &str) -> Result<Option<(String, String)>, TranslateError> {
        let language = self.translator.detect(text)?;
        if language.eq_ignore_ascii_case(TARGET_LANGUAGE) {
            return Ok(None);
        }
        let translated = self.translator.translate(text, &language, TARGET_LANGUAGE)?;
        Ok(Some((translated, language)))
    }
}
