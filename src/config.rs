//! Run configuration.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`SIFT_*`)
//! 2. TOML file passed to [`DedupConfig::load`]
//! 3. Compiled defaults
//!
//! ```toml
//! linkage = "anchor"
//!
//! [lexical]
//! threshold = 0.8
//! extra_stopwords = ["buy", "cheap"]
//! stem = true
//!
//! [overlap]
//! threshold = 0.4
//! top_n = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cluster::Linkage;
use crate::dedup::Deduplicator;
use crate::error::{Error, Result};
use crate::similarity::{
    AnyOf, Cosine, EmbeddingSource, Lexical, ResultOverlap, ResultSource, Score, Similarity,
    Thresholded, DEFAULT_LEXICAL_THRESHOLD, DEFAULT_TOP_N,
};
use crate::text::Normalizer;

/// Default result-overlap cutoff.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.4;

/// Default cosine cutoff.
pub const DEFAULT_COSINE_THRESHOLD: f64 = 0.85;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Grouping strategy.
    pub linkage: Linkage,
    /// Lexical signal and text normalisation.
    pub lexical: LexicalConfig,
    /// Result-overlap signal.
    pub overlap: OverlapConfig,
    /// Embedding signal.
    pub cosine: CosineConfig,
}

/// `[lexical]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Jaccard cutoff; pairs strictly above it match.
    pub threshold: f64,
    /// Replacement stop-word list. `None` keeps the built-in English list.
    pub stopwords: Option<Vec<String>>,
    /// Extra stop words added on top of the active list.
    pub extra_stopwords: Vec<String>,
    /// Fold accents (NFKD, drop combining marks) before tokenising.
    pub fold_ascii: bool,
    /// Apply English stemming to tokens.
    pub stem: bool,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_LEXICAL_THRESHOLD,
            stopwords: None,
            extra_stopwords: Vec::new(),
            fold_ascii: true,
            stem: false,
        }
    }
}

/// `[overlap]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Shared-result fraction cutoff; pairs strictly above it match.
    pub threshold: f64,
    /// How many leading results are compared.
    pub top_n: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_OVERLAP_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// `[cosine]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosineConfig {
    /// Cosine cutoff; pairs strictly above it match.
    pub threshold: f64,
}

impl Default for CosineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COSINE_THRESHOLD,
        }
    }
}

impl DedupConfig {
    /// Load from a TOML file, apply `SIFT_*` environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::parse(&content, &path.display().to_string())?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus `SIFT_*` environment overrides, validated.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML string. The environment is not consulted.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config = Self::parse(toml_str, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse(toml_str: &str, path: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Recognised: `SIFT_LINKAGE`, `SIFT_LEXICAL_THRESHOLD`,
    /// `SIFT_OVERLAP_THRESHOLD`, `SIFT_OVERLAP_TOP_N`, `SIFT_COSINE_THRESHOLD`.
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SIFT_LINKAGE") {
            match val.parse::<Linkage>() {
                Ok(v) => self.linkage = v,
                Err(_) => warn!(var = "SIFT_LINKAGE", value = %val, "ignoring invalid override"),
            }
        }
        override_f64(&lookup, "SIFT_LEXICAL_THRESHOLD", &mut self.lexical.threshold);
        override_f64(&lookup, "SIFT_OVERLAP_THRESHOLD", &mut self.overlap.threshold);
        override_f64(&lookup, "SIFT_COSINE_THRESHOLD", &mut self.cosine.threshold);
        if let Some(val) = lookup("SIFT_OVERLAP_TOP_N") {
            match val.trim().parse::<usize>() {
                Ok(v) => self.overlap.top_n = v,
                Err(_) => {
                    warn!(var = "SIFT_OVERLAP_TOP_N", value = %val, "ignoring invalid override")
                }
            }
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !unit_interval(self.lexical.threshold) {
            return Err(Error::InvalidParameter {
                name: "lexical.threshold",
                message: "must be between 0.0 and 1.0",
            });
        }
        if !unit_interval(self.overlap.threshold) {
            return Err(Error::InvalidParameter {
                name: "overlap.threshold",
                message: "must be between 0.0 and 1.0",
            });
        }
        if self.overlap.top_n == 0 {
            return Err(Error::InvalidParameter {
                name: "overlap.top_n",
                message: "must be at least 1",
            });
        }
        if !(-1.0..=1.0).contains(&self.cosine.threshold) {
            return Err(Error::InvalidParameter {
                name: "cosine.threshold",
                message: "must be between -1.0 and 1.0",
            });
        }
        Ok(())
    }

    /// Text normaliser described by `[lexical]`.
    pub fn normalizer(&self) -> Normalizer {
        let mut normalizer = Normalizer::new()
            .with_fold_ascii(self.lexical.fold_ascii)
            .with_stemming(self.lexical.stem);
        if let Some(words) = &self.lexical.stopwords {
            normalizer = normalizer.with_stopwords(words);
        }
        normalizer.with_extra_stopwords(&self.lexical.extra_stopwords)
    }

    /// Lexical signal.
    pub fn lexical(&self) -> Lexical {
        Lexical::new()
            .with_normalizer(self.normalizer())
            .with_threshold(self.lexical.threshold)
    }

    /// Result-overlap signal over `source`.
    pub fn result_overlap<R: ResultSource>(&self, source: R) -> Thresholded<ResultOverlap<R>> {
        ResultOverlap::new(source)
            .with_top_n(self.overlap.top_n)
            .above(self.overlap.threshold)
    }

    /// Embedding signal over `source`.
    pub fn cosine<E: EmbeddingSource>(&self, source: E) -> Thresholded<Cosine<E>> {
        Cosine::new(source).above(self.cosine.threshold)
    }

    /// Keyword duplicate test: lexical match OR result overlap.
    pub fn keyword_similarity<R: ResultSource>(
        &self,
        source: R,
    ) -> AnyOf<Lexical, Thresholded<ResultOverlap<R>>> {
        self.lexical().or(self.result_overlap(source))
    }

    /// Deduplicator with the configured linkage.
    pub fn deduplicator(&self) -> Deduplicator {
        Deduplicator::new().with_linkage(self.linkage)
    }
}

fn unit_interval(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn override_f64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, target: &mut f64) {
    if let Some(val) = lookup(var) {
        match val.trim().parse::<f64>() {
            Ok(v) => *target = v,
            Err(_) => warn!(var, value = %val, "ignoring invalid override"),
        }
    }
}
