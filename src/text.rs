//! Text normalisation shared by the lexical signals.
//!
//! Keywords are compared after accent folding, lowercasing, word segmentation
//! and stop-word removal, so `"Café near me"` and `"cafe near me"` land on the
//! same token set. Every knob is an explicit field on [`Normalizer`].

use std::collections::HashSet;

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Default English stop words.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Fold accents: decompose (NFKD) and drop combining marks.
///
/// Latin text ends up ASCII (`é` → `e`). Letters with no ASCII decomposition
/// (Cyrillic, Greek, CJK, ...) are kept as they are.
pub fn fold_ascii(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

lazy_static! {
    static ref ENGLISH_STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

fn english_stemmer() -> &'static Stemmer {
    &ENGLISH_STEMMER
}

/// Jaccard overlap of two token sets. Two empty sets score `0.0`.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Tokeniser configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    fold_ascii: bool,
    stem: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
            fold_ascii: true,
            stem: false,
        }
    }
}

impl Normalizer {
    /// English stop words, accent folding on, stemming off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stop-word set.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        self
    }

    /// Add stop words on top of the current set.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Toggle accent folding.
    pub fn with_fold_ascii(mut self, fold: bool) -> Self {
        self.fold_ascii = fold;
        self
    }

    /// Toggle English stemming of tokens.
    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    /// Whether `word` is filtered out as a stop word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Tokens of `text` in order, after folding, lowercasing and stop-word
    /// removal.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let folded = if self.fold_ascii {
            fold_ascii(text)
        } else {
            text.to_string()
        };
        let lowered = folded.to_lowercase();
        let words = lowered
            .unicode_words()
            .filter(|w| !self.stopwords.contains(*w));

        if self.stem {
            let stemmer = english_stemmer();
            words.map(|w| stemmer.stem(w).into_owned()).collect()
        } else {
            words.map(str::to_string).collect()
        }
    }

    /// Distinct tokens of `text`.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokens(text).into_iter().collect()
    }

    /// Canonical single-spaced form of `text`.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}
