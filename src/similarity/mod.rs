//! Pairwise similarity signals.
//!
//! The deduplication kernel only needs a yes/no answer per pair. Signals come
//! in two shapes:
//!
//! - [`Similarity`]: a direct decision (`Lexical`, closures, combinations).
//! - [`Score`]: a number, turned into a decision by [`Thresholded`]
//!   (`ResultOverlap`, `Cosine`).
//!
//! Signals may fail (a missing embedding, an API error surfaced by a
//! [`ResultSource`]). A failed evaluation is returned as an error; the kernel
//! treats it as "not similar" so unrelated items never collapse.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use sift::similarity::{Lexical, ResultOverlap, Score, Similarity};
//!
//! let serps: HashMap<String, Vec<String>> = HashMap::from([
//!     ("seo tools".to_string(), vec!["a.com".into(), "b.com".into()]),
//!     ("seo software".to_string(), vec!["a.com".into(), "b.com".into()]),
//! ]);
//!
//! let signal = Lexical::new().or(ResultOverlap::new(serps).with_top_n(2).above(0.5));
//! assert!(signal.similar("seo tools", "seo software").unwrap());
//! assert!(signal.similar("SEO Tools", "seo tools").unwrap());
//! ```

mod cosine;
mod lexical;
mod overlap;

use std::fmt;

use crate::error::{Error, Result};

pub use cosine::{cosine_similarity, Cosine, EmbeddingSource};
pub use lexical::{Lexical, DEFAULT_LEXICAL_THRESHOLD};
pub use overlap::{ResultOverlap, ResultSource, DEFAULT_TOP_N};

/// Decides whether two keys are duplicates of each other.
pub trait Similarity {
    /// `Ok(true)` if `a` and `b` should be merged.
    fn similar(&self, a: &str, b: &str) -> Result<bool>;

    /// Combine with another signal; either one saying "similar" is enough.
    fn or<S>(self, other: S) -> AnyOf<Self, S>
    where
        Self: Sized,
        S: Similarity,
    {
        AnyOf {
            first: self,
            second: other,
        }
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> bool,
{
    fn similar(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self(a, b))
    }
}

/// Adapter for fallible closures.
///
/// ```rust
/// use sift::similarity::{Fallible, Similarity};
///
/// let signal = Fallible(|a: &str, b: &str| -> Result<bool, String> {
///     if a.is_empty() || b.is_empty() {
///         return Err("empty key".to_string());
///     }
///     Ok(a.eq_ignore_ascii_case(b))
/// });
/// assert!(signal.similar("Shoes", "shoes").unwrap());
/// assert!(signal.similar("", "shoes").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, E> Similarity for Fallible<F>
where
    F: Fn(&str, &str) -> std::result::Result<bool, E>,
    E: fmt::Display,
{
    fn similar(&self, a: &str, b: &str) -> Result<bool> {
        (self.0)(a, b).map_err(|e| Error::Similarity(e.to_string()))
    }
}

/// Logical OR of two signals, built with [`Similarity::or`].
///
/// The second signal is only evaluated when the first does not already say
/// "similar". If neither does and one of them failed, the failure is
/// returned.
#[derive(Debug, Clone)]
pub struct AnyOf<A, B> {
    first: A,
    second: B,
}

impl<A: Similarity, B: Similarity> Similarity for AnyOf<A, B> {
    fn similar(&self, a: &str, b: &str) -> Result<bool> {
        let first = match self.first.similar(a, b) {
            Ok(true) => return Ok(true),
            other => other,
        };
        match self.second.similar(a, b) {
            Ok(true) => Ok(true),
            Ok(false) => first,
            Err(err) => Err(err),
        }
    }
}

/// A similarity score, conventionally in `[0, 1]`.
pub trait Score {
    /// Score the pair `(a, b)`.
    fn score(&self, a: &str, b: &str) -> Result<f64>;

    /// Turn the score into a decision: similar when `score > threshold`.
    fn above(self, threshold: f64) -> Thresholded<Self>
    where
        Self: Sized,
    {
        Thresholded::new(self, threshold)
    }
}

/// A [`Score`] compared against a cutoff.
#[derive(Debug, Clone)]
pub struct Thresholded<S> {
    score: S,
    threshold: f64,
}

impl<S> Thresholded<S> {
    /// Wrap `score`; pairs scoring strictly above `threshold` are similar.
    pub fn new(score: S, threshold: f64) -> Self {
        Self { score, threshold }
    }

    /// The configured cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The wrapped scorer.
    pub fn inner(&self) -> &S {
        &self.score
    }
}

impl<S: Score> Similarity for Thresholded<S> {
    fn similar(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.score.score(a, b)? > self.threshold)
    }
}
