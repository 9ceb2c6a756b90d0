//! Greedy similarity deduplication.
//!
//! `sift` collapses near-duplicate keys (keywords, URLs) into groups and keeps
//! the heaviest member of each group, e.g. the highest-volume keyword among a
//! set of cannibalising queries.
//!
//! - [`dedup`]: the kernel ([`deduplicate`], [`Deduplicator`]).
//! - [`cluster`]: grouping strategies (anchor-only scan, transitive union-find).
//! - [`similarity`]: pairwise signals (lexical, result overlap, cosine) and
//!   their composition.
//! - [`text`]: normalisation shared by the lexical signals.
//! - [`config`]: TOML / environment configuration.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod dedup;
pub mod error;
pub mod similarity;
pub mod text;
pub mod weight;

pub use cluster::{AnchorGrouping, Grouping, Linkage, TransitiveGrouping};
pub use config::DedupConfig;
pub use dedup::{deduplicate, Deduplicated, Deduplicator, Group, Item};
pub use error::{Error, Result};
pub use similarity::{Lexical, Score, Similarity};
pub use weight::Weight;
