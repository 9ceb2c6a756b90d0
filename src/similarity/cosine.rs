use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::rc::Rc;

use super::Score;
use crate::error::{Error, Result};

/// Supplies an embedding vector for a key.
///
/// Embedding model calls live behind this trait; the crate ships the
/// in-memory implementation for precomputed vectors.
pub trait EmbeddingSource {
    /// The embedding of `key`.
    fn embedding(&self, key: &str) -> Result<Vec<f32>>;
}

impl<H: BuildHasher> EmbeddingSource for HashMap<String, Vec<f32>, H> {
    fn embedding(&self, key: &str) -> Result<Vec<f32>> {
        self.get(key).cloned().ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }
}

/// Cosine similarity of two vectors.
///
/// A zero vector has no direction and scores `0.0` against anything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }

    if na == 0.0 || nb == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (na.sqrt() * nb.sqrt()))
}

/// Cosine similarity over embeddings from an [`EmbeddingSource`].
///
/// Vectors are fetched once per key and cached for the lifetime of the
/// scorer.
#[derive(Debug)]
pub struct Cosine<E> {
    source: E,
    cache: RefCell<HashMap<String, Rc<Vec<f32>>>>,
}

impl<E: EmbeddingSource> Cosine<E> {
    /// Score keys by the cosine of their embeddings.
    pub fn new(source: E) -> Self {
        Self {
            source,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Give back the underlying source.
    pub fn into_source(self) -> E {
        self.source
    }

    fn vector(&self, key: &str) -> Result<Rc<Vec<f32>>> {
        if let Some(hit) = self.cache.borrow().get(key) {
            return Ok(Rc::clone(hit));
        }
        let v = Rc::new(self.source.embedding(key)?);
        self.cache.borrow_mut().insert(key.to_string(), Rc::clone(&v));
        Ok(v)
    }
}

impl<E: EmbeddingSource> Score for Cosine<E> {
    fn score(&self, a: &str, b: &str) -> Result<f64> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        cosine_similarity(&va, &vb).map(f64::from)
    }
}
