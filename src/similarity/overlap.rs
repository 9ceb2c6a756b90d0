use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;
use std::rc::Rc;

use super::Score;
use crate::error::{Error, Result};

/// Number of top results compared when none is configured.
pub const DEFAULT_TOP_N: usize = 10;

/// Supplies the ranked results (typically SERP URLs) for a key.
///
/// This is where a search API client plugs in; the crate itself only ships
/// the in-memory implementation for precomputed results.
pub trait ResultSource {
    /// Ranked results for `key`, best first.
    fn results(&self, key: &str) -> Result<Vec<String>>;
}

impl<H: BuildHasher> ResultSource for HashMap<String, Vec<String>, H> {
    fn results(&self, key: &str) -> Result<Vec<String>> {
        self.get(key).cloned().ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }
}

/// Result-set overlap: the fraction of the top `N` results two keys share.
///
/// `score = |top_n(a) ∩ top_n(b)| / N`. URLs are compared after trimming
/// surrounding whitespace and a trailing `/`. Successful lookups are cached
/// per key, so each key hits the source once per run.
#[derive(Debug)]
pub struct ResultOverlap<R> {
    source: R,
    top_n: usize,
    cache: RefCell<HashMap<String, Rc<HashSet<String>>>>,
}

impl<R: ResultSource> ResultOverlap<R> {
    /// Compare the top [`DEFAULT_TOP_N`] results from `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            top_n: DEFAULT_TOP_N,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Set how many leading results are compared. Drops cached lookups,
    /// which were cut to the previous `top_n`.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self.cache.get_mut().clear();
        self
    }

    /// Number of keys whose results are cached.
    pub fn cached_keys(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Give back the underlying source.
    pub fn into_source(self) -> R {
        self.source
    }

    fn top_results(&self, key: &str) -> Result<Rc<HashSet<String>>> {
        if let Some(hit) = self.cache.borrow().get(key) {
            return Ok(Rc::clone(hit));
        }

        let results: HashSet<String> = self
            .source
            .results(key)?
            .iter()
            .take(self.top_n)
            .map(String::as_str)
            .map(canonical_url)
            .collect();
        let results = Rc::new(results);
        self.cache
            .borrow_mut()
            .insert(key.to_string(), Rc::clone(&results));
        Ok(results)
    }
}

impl<R: ResultSource> Score for ResultOverlap<R> {
    fn score(&self, a: &str, b: &str) -> Result<f64> {
        if self.top_n == 0 {
            return Err(Error::InvalidParameter {
                name: "top_n",
                message: "must be at least 1",
            });
        }
        let ra = self.top_results(a)?;
        let rb = self.top_results(b)?;
        let shared = ra.intersection(&rb).count();
        Ok(shared as f64 / self.top_n as f64)
    }
}

fn canonical_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::Similarity;
    use std::cell::Cell;

    fn serps() -> HashMap<String, Vec<String>> {
        let urls = |xs: &[&str]| xs.iter().map(|x| (*x).to_string()).collect::<Vec<_>>();
        HashMap::from([
            ("a".to_string(), urls(&["u1", "u2", "u3", "u4"])),
            ("b".to_string(), urls(&["u1/", "u2", "x3", "x4"])),
            ("c".to_string(), urls(&["y1", "y2", "y3", "y4"])),
        ])
    }

    #[test]
    fn test_score_is_shared_fraction() {
        let overlap = ResultOverlap::new(serps()).with_top_n(4);
        assert_eq!(overlap.score("a", "b").unwrap(), 0.5);
        assert_eq!(overlap.score("a", "c").unwrap(), 0.0);
        assert_eq!(overlap.score("a", "a").unwrap(), 1.0);
    }

    #[test]
    fn test_only_top_n_compared() {
        let overlap = ResultOverlap::new(serps()).with_top_n(1);
        assert_eq!(overlap.score("a", "b").unwrap(), 1.0);
    }

    #[test]
    fn test_missing_key_is_error() {
        let overlap = ResultOverlap::new(serps());
        let err = overlap.score("a", "zzz").unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref key } if key == "zzz"));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let overlap = ResultOverlap::new(serps()).with_top_n(0);
        assert!(overlap.score("a", "b").is_err());
    }

    #[test]
    fn test_lookups_are_cached() {
        struct Counting<'a>(&'a Cell<usize>);

        impl ResultSource for Counting<'_> {
            fn results(&self, key: &str) -> Result<Vec<String>> {
                self.0.set(self.0.get() + 1);
                Ok(vec![key.to_string()])
            }
        }

        let calls = Cell::new(0);
        let overlap = ResultOverlap::new(Counting(&calls)).with_top_n(1);
        for _ in 0..3 {
            overlap.score("a", "b").unwrap();
        }
        assert_eq!(calls.get(), 2);
        assert_eq!(overlap.cached_keys(), 2);
    }

    #[test]
    fn test_changing_top_n_drops_cached_results() {
        let overlap = ResultOverlap::new(serps()).with_top_n(1);
        assert_eq!(overlap.score("a", "b").unwrap(), 1.0);
        assert_eq!(overlap.cached_keys(), 2);

        let overlap = overlap.with_top_n(4);
        assert_eq!(overlap.cached_keys(), 0);
        assert_eq!(overlap.score("a", "b").unwrap(), 0.5);
    }

    #[test]
    fn test_thresholded_overlap() {
        let signal = ResultOverlap::new(serps()).with_top_n(4).above(0.4);
        assert!(signal.similar("a", "b").unwrap());
        assert!(!signal.similar("a", "c").unwrap());
    }
}
