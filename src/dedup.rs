//! Greedy similarity deduplication.
//!
//! Items are grouped by a [`Similarity`] signal using a [`Linkage`] strategy,
//! then each group keeps its heaviest member as the *representative*. Ties
//! go to the earliest item in input order, and coerced weights lose ties
//! against supplied ones.
//!
//! The kernel never fails. A signal error for a pair is logged, counted and
//! treated as "not similar", so a flaky lookup can split a group but can
//! never merge unrelated items.
//!
//! ```rust
//! use sift::{deduplicate, Weight};
//!
//! let items = vec![("seo tool", 10.0), ("seo tools", 20.0), ("crm", 5.0)];
//! let same_stem = |a: &str, b: &str| a.trim_end_matches('s') == b.trim_end_matches('s');
//!
//! let out = deduplicate(items, &same_stem);
//! assert_eq!(out.len(), 2);
//! assert_eq!(out["seo tools"], Weight::new(20.0));
//! assert_eq!(out["crm"], Weight::new(5.0));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::cluster::{Grouping, Linkage};
use crate::similarity::Similarity;
use crate::weight::Weight;

/// A key and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Keyword, URL or any other opaque key.
    pub key: String,
    /// Weight used to pick representatives.
    pub weight: Weight,
}

impl Item {
    /// Create an item.
    pub fn new(key: impl Into<String>, weight: impl Into<Weight>) -> Self {
        Self {
            key: key.into(),
            weight: weight.into(),
        }
    }
}

impl<K: Into<String>, W: Into<Weight>> From<(K, W)> for Item {
    fn from((key, weight): (K, W)) -> Self {
        Self::new(key, weight)
    }
}

/// One partition cell, as indices into the input.
///
/// Only produced by [`Deduplicator::run`], so a group always has at least one
/// member and its representative is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<usize>,
    representative: usize,
}

impl Group {
    /// Members in input order. The first one is the anchor.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The member chosen to stand for the group.
    pub fn representative(&self) -> usize {
        self.representative
    }

    /// The item the group was formed around.
    pub fn anchor(&self) -> usize {
        self.members[0]
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for groups produced by a run.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Outcome of a deduplication run.
#[derive(Debug, Clone)]
pub struct Deduplicated {
    items: Vec<Item>,
    groups: Vec<Group>,
    similarity_failures: usize,
}

impl Deduplicated {
    /// All input items, in input order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The groups, in the order they were formed.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups (and representatives).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the input was empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// How many similarity evaluations failed and were treated as distinct.
    pub fn similarity_failures(&self) -> usize {
        self.similarity_failures
    }

    /// One representative per group, in group order.
    pub fn representatives(&self) -> impl Iterator<Item = &Item> + '_ {
        self.groups.iter().map(|g| &self.items[g.representative])
    }

    /// Items of `group`, in input order. Indices outside this run (a group
    /// taken from another run) are skipped.
    pub fn members<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Item> + 'a {
        group.members.iter().filter_map(|&idx| self.items.get(idx))
    }

    /// Representatives sorted by weight, heaviest first. Equal weights keep
    /// group order.
    pub fn sorted_by_weight(&self) -> Vec<&Item> {
        let mut reps: Vec<&Item> = self.representatives().collect();
        reps.sort_by(|a, b| b.weight.rank(a.weight));
        reps
    }

    /// Representative key to weight.
    ///
    /// Identical keys that were never judged similar can represent two
    /// groups; the map keeps the heavier one (the earlier one on ties).
    pub fn into_map(self) -> HashMap<String, Weight> {
        let mut out: HashMap<String, Weight> = HashMap::with_capacity(self.groups.len());
        let mut items: Vec<Option<Item>> = self.items.into_iter().map(Some).collect();
        for group in &self.groups {
            let Some(item) = items[group.representative].take() else {
                continue;
            };
            match out.entry(item.key) {
                Entry::Vacant(slot) => {
                    slot.insert(item.weight);
                }
                Entry::Occupied(mut slot) => {
                    if item.weight.outranks(*slot.get()) {
                        slot.insert(item.weight);
                    }
                }
            }
        }
        out
    }
}

/// Configured deduplication run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator {
    linkage: Linkage,
}

impl Deduplicator {
    /// Anchor-only grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the grouping strategy.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// The configured strategy.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Group `items` by `similarity` and pick a representative per group.
    pub fn run<I, T, S>(&self, items: I, similarity: &S) -> Deduplicated
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
        S: Similarity + ?Sized,
    {
        let items: Vec<Item> = items.into_iter().map(Into::into).collect();
        debug!(items = items.len(), linkage = %self.linkage, "deduplicating");

        let mut similarity_failures = 0usize;
        let mut similar = |i: usize, j: usize| -> bool {
            let (a, b) = (&items[i].key, &items[j].key);
            match similarity.similar(a, b) {
                Ok(verdict) => verdict,
                Err(err) => {
                    similarity_failures += 1;
                    warn!(anchor = %a, candidate = %b, error = %err, "similarity failed, keeping items apart");
                    false
                }
            }
        };
        let groups = self.linkage.group(items.len(), &mut similar);

        let groups: Vec<Group> = groups
            .into_iter()
            .filter_map(|members| {
                let representative = select_representative(&items, &members)?;
                Some(Group {
                    members,
                    representative,
                })
            })
            .collect();

        info!(
            items = items.len(),
            groups = groups.len(),
            failures = similarity_failures,
            "deduplication finished"
        );

        Deduplicated {
            items,
            groups,
            similarity_failures,
        }
    }
}

/// Index of the heaviest member; the first one wins ties.
fn select_representative(items: &[Item], members: &[usize]) -> Option<usize> {
    members.iter().copied().reduce(|best, idx| {
        if items[idx].weight.outranks(items[best].weight) {
            idx
        } else {
            best
        }
    })
}

/// Deduplicate `items` with anchor-only grouping and return representative
/// key to weight.
pub fn deduplicate<I, T, S>(items: I, similarity: &S) -> HashMap<String, Weight>
where
    I: IntoIterator<Item = T>,
    T: Into<Item>,
    S: Similarity + ?Sized,
{
    Deduplicator::new().run(items, similarity).into_map()
}
