//! # Polarity Lexicon
//!
//! General-English polarity lexicon for rule-based scoring.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Word tokens: letters, digits and inner apostrophes
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*").unwrap());

/// Tokens after a negation that it still applies to
const NEGATION_WINDOW: usize = 3;

/// Factor applied to a negated word's score
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity lexicon
///
/// Maps words to a polarity in [-1, 1], plus negation and intensifier
/// tables. Scoring is deterministic.
#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    /// Word to polarity mapping
    words: HashMap<String, f64>,
    /// Negation words
    negations: HashSet<String>,
    /// Intensifier multipliers
    intensifiers: HashMap<String, f64>,
}

impl Default for PolarityLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityLexicon {
    /// Create a lexicon with the built-in word list
    pub fn new() -> Self {
        let positive_words = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("fantastic", 0.4),
            ("wonderful", 1.0),
            ("perfect", 1.0),
            ("best", 1.0),
            ("better", 0.5),
            ("nice", 0.6),
            ("love", 0.5),
            ("loved", 0.7),
            ("like", 0.2),
            ("liked", 0.3),
            ("happy", 0.8),
            ("glad", 0.5),
            ("fun", 0.3),
            ("funny", 0.25),
            ("cool", 0.35),
            ("interesting", 0.5),
            ("beautiful", 0.85),
            ("brilliant", 0.9),
            ("helpful", 0.4),
            ("useful", 0.3),
            ("easy", 0.43),
            ("fast", 0.2),
            ("clean", 0.37),
            ("clear", 0.1),
            ("correct", 0.4),
            ("right", 0.29),
            ("fine", 0.42),
            ("safe", 0.5),
            ("strong", 0.43),
            ("smart", 0.21),
            ("impressive", 1.0),
            ("favorite", 0.5),
            ("favourite", 0.5),
            ("exciting", 0.3),
            ("excited", 0.38),
            ("enjoy", 0.4),
            ("enjoyed", 0.4),
            ("thanks", 0.2),
            ("thank", 0.2),
            ("recommend", 0.3),
            ("win", 0.8),
            ("success", 0.3),
            ("successful", 0.75),
            ("positive", 0.23),
            ("hope", 0.2),
            ("agree", 0.2),
            ("solid", 0.25),
            ("sweet", 0.35),
            ("lovely", 0.5),
            ("incredible", 0.9),
            ("super", 0.33),
            ("wow", 0.1),
            ("welcome", 0.8),
            ("kind", 0.6),
            ("elegant", 0.6),
            ("reliable", 0.5),
            ("stable", 0.3),
            ("powerful", 0.3),
        ];

        let negative_words = [
            ("bad", -0.7),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("worst", -1.0),
            ("worse", -0.4),
            ("poor", -0.4),
            ("hate", -0.8),
            ("hated", -0.9),
            ("sad", -0.5),
            ("angry", -0.5),
            ("annoying", -0.8),
            ("boring", -1.0),
            ("broken", -0.4),
            ("stupid", -0.8),
            ("dumb", -0.38),
            ("ugly", -0.7),
            ("wrong", -0.5),
            ("slow", -0.3),
            ("hard", -0.29),
            ("difficult", -0.5),
            ("painful", -0.7),
            ("useless", -0.5),
            ("disappointing", -0.6),
            ("disappointed", -0.75),
            ("fail", -0.5),
            ("failed", -0.5),
            ("failure", -0.32),
            ("problem", -0.3),
            ("problems", -0.3),
            ("bug", -0.2),
            ("buggy", -0.5),
            ("crash", -0.4),
            ("mess", -0.4),
            ("messy", -0.5),
            ("confusing", -0.4),
            ("unfortunately", -0.5),
            ("sorry", -0.5),
            ("wrongly", -0.5),
            ("negative", -0.3),
            ("scary", -0.5),
            ("dangerous", -0.6),
            ("toxic", -0.6),
            ("lame", -0.5),
            ("crap", -0.8),
            ("garbage", -0.8),
            ("trash", -0.7),
            ("sucks", -0.3),
            ("weird", -0.5),
            ("ridiculous", -0.33),
            ("pathetic", -1.0),
            ("disgusting", -1.0),
            ("lose", -0.3),
            ("lost", -0.2),
            ("unstable", -0.4),
            ("expensive", -0.5),
            ("tired", -0.4),
            ("worried", -0.5),
            ("fear", -0.6),
            ("pain", -0.6),
            ("sick", -0.71),
            ("dead", -0.2),
            ("evil", -1.0),
        ];

        let words = positive_words
            .into_iter()
            .chain(negative_words)
            .map(|(word, score)| (word.to_string(), score))
            .collect();

        let negations = [
            "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere", "none",
            "cannot", "cant", "dont", "doesnt", "didnt", "wont", "wouldnt", "shouldnt",
            "couldnt", "isnt", "arent", "wasnt", "werent", "hardly", "barely", "without",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let intensifiers = [
            ("very", 1.3),
            ("really", 1.15),
            ("extremely", 1.5),
            ("incredibly", 1.4),
            ("super", 1.3),
            ("so", 1.2),
            ("too", 1.1),
            ("totally", 1.3),
            ("absolutely", 1.5),
            ("highly", 1.3),
            ("pretty", 1.1),
            ("quite", 1.1),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("kinda", 0.7),
        ]
        .into_iter()
        .map(|(word, mult)| (word.to_string(), mult))
        .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Polarity of a single word
    pub fn get_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a negation, including `n't` contractions
    pub fn is_negation(&self, word: &str) -> bool {
        let word = word.to_lowercase().replace('’', "'");
        word.ends_with("n't") || self.negations.contains(&word)
    }

    /// Intensifier multiplier of a word
    pub fn get_intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(&word.to_lowercase()).copied()
    }

    /// Add or replace a word
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    /// Number of scored words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Split text into lower-case word tokens
    pub fn tokenize(text: &str) -> Vec<String> {
        WORD_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Polarity of a text in [-1, 1]
    pub fn polarity(&self, text: &str) -> f64 {
        self.analyze(text).score
    }

    /// Score a text.
    ///
    /// 1. Look up word polarities
    /// 2. Scale by a preceding intensifier
    /// 3. Flip and dampen words within three tokens of a negation
    /// 4. Average the matched words
    ///
    /// An intensifier that is also a scored word ("super") counts as an
    /// intensifier when it precedes another sentiment word.
    pub fn analyze(&self, text: &str) -> LexiconResult {
        let tokens = Self::tokenize(text);
        let mut matched_words: Vec<(String, f64)> = Vec::new();

        let mut intensifier: f64 = 1.0;
        let mut negation_distance: Option<usize> = None;

        for (i, token) in tokens.iter().enumerate() {
            if self.is_negation(token) && self.get_score(token).is_none() {
                negation_distance = Some(0);
                continue;
            }

            let next_scored = tokens
                .get(i + 1)
                .is_some_and(|next| self.get_score(next).is_some());
            if let Some(mult) = self.get_intensifier(token) {
                if next_scored || self.get_score(token).is_none() {
                    intensifier = mult;
                    continue;
                }
            }

            if let Some(base) = self.get_score(token) {
                let mut score = (base * intensifier).clamp(-1.0, 1.0);
                if negation_distance.is_some_and(|d| d < NEGATION_WINDOW) {
                    score *= NEGATION_FACTOR;
                    negation_distance = None;
                }
                matched_words.push((token.clone(), score));
                intensifier = 1.0;
            }

            if let Some(distance) = negation_distance.as_mut() {
                *distance += 1;
                if *distance >= NEGATION_WINDOW {
                    negation_distance = None;
                }
            }
        }

        let score = if matched_words.is_empty() {
            0.0
        } else {
            matched_words.iter().map(|(_, s)| s).sum::<f64>() / matched_words.len() as f64
        };

        LexiconResult {
            score: score.clamp(-1.0, 1.0),
            word_count: matched_words.len(),
            matched_words,
        }
    }
}

/// Result of lexicon scoring
#[derive(Debug, Clone)]
pub struct LexiconResult {
    /// Polarity (-1 to 1)
    pub score: f64,
    /// Matched words with their final scores
    pub matched_words: Vec<(String, f64)>,
    /// Number of sentiment words found
    pub word_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tokenize() {
        let tokens = PolarityLexicon::tokenize("This is Great! Don't panic, 2 cats.");
        assert_eq!(tokens, vec!["this", "is", "great", "don't", "panic", "2", "cats"]);
    }

    #[test]
    fn test_word_scores() {
        let lexicon = PolarityLexicon::new();
        assert!(lexicon.get_score("great").unwrap() > 0.0);
        assert!(lexicon.get_score("Terrible").unwrap() < 0.0);
        assert!(lexicon.get_score("table").is_none());
    }

    #[test]
    fn test_negation_words() {
        let lexicon = PolarityLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("isn't"));
        assert!(lexicon.is_negation("Doesn’t"));
        assert!(!lexicon.is_negation("great"));
    }

    #[test]
    fn test_single_word() {
        let lexicon = PolarityLexicon::new();
        assert_relative_eq!(lexicon.polarity("This is Great!"), 0.8);
    }

    #[test]
    fn test_average_of_words() {
        let lexicon = PolarityLexicon::new();
        // great 0.8, bad -0.7
        assert_relative_eq!(lexicon.polarity("great idea, bad timing"), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_neutral_text() {
        let lexicon = PolarityLexicon::new();
        let result = lexicon.analyze("The meeting is on Tuesday");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_negation_flips() {
        let lexicon = PolarityLexicon::new();
        assert!(lexicon.polarity("this is good") > 0.0);
        assert_relative_eq!(lexicon.polarity("this is not good"), -0.35, epsilon = 1e-9);
        assert!(lexicon.polarity("it isn't bad") > 0.0);
    }

    #[test]
    fn test_negation_window() {
        let lexicon = PolarityLexicon::new();
        // "good" is four tokens after "not"
        assert!(lexicon.polarity("not that it was ever good") > 0.0);
    }

    #[test]
    fn test_intensifier() {
        let lexicon = PolarityLexicon::new();
        let normal = lexicon.polarity("good");
        let intensified = lexicon.polarity("very good");
        assert!(intensified > normal);
        assert!(lexicon.polarity("extremely excellent") <= 1.0);
    }

    #[test]
    fn test_intensifier_as_word() {
        let lexicon = PolarityLexicon::new();
        assert_relative_eq!(lexicon.polarity("super"), 0.33);
        assert_relative_eq!(lexicon.polarity("super nice"), 0.78, epsilon = 1e-9);
    }

    #[test]
    fn test_add_word() {
        let mut lexicon = PolarityLexicon::new();
        lexicon.add_word("Ferris", 3.0);
        assert_eq!(lexicon.get_score("ferris"), Some(1.0));
    }
}
