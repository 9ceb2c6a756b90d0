use std::collections::HashSet;

use super::Similarity;
use crate::error::Result;
use crate::text::{jaccard, Normalizer};

/// Jaccard cutoff used when none is configured.
pub const DEFAULT_LEXICAL_THRESHOLD: f64 = 0.8;

/// Lexical duplicate test on normalised tokens.
///
/// Two keys match when their token sequences are identical after
/// normalisation, or when the Jaccard overlap of their token sets is strictly
/// above the threshold. Keys that normalise to nothing (all stop words,
/// punctuation) are compared by their trimmed, lowercased raw text instead.
#[derive(Debug, Clone)]
pub struct Lexical {
    normalizer: Normalizer,
    threshold: f64,
}

impl Default for Lexical {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            threshold: DEFAULT_LEXICAL_THRESHOLD,
        }
    }
}

impl Lexical {
    /// Default normaliser, threshold `0.8`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom normaliser.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set the Jaccard cutoff.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The normaliser in use.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Jaccard overlap of the normalised token sets.
    pub fn overlap(&self, a: &str, b: &str) -> f64 {
        jaccard(&self.normalizer.token_set(a), &self.normalizer.token_set(b))
    }
}

impl Similarity for Lexical {
    fn similar(&self, a: &str, b: &str) -> Result<bool> {
        let ta = self.normalizer.tokens(a);
        let tb = self.normalizer.tokens(b);

        if ta.is_empty() || tb.is_empty() {
            return Ok(a.trim().to_lowercase() == b.trim().to_lowercase());
        }
        if ta == tb {
            return Ok(true);
        }

        let sa: HashSet<String> = ta.into_iter().collect();
        let sb: HashSet<String> = tb.into_iter().collect();
        Ok(jaccard(&sa, &sb) > self.threshold)
    }
}
