//! Anchor-only greedy grouping.
//!
//! # The Algorithm
//!
//! A single left-to-right scan:
//!
//! 1. Take the first unprocessed item as the *anchor* of a new group.
//! 2. Compare the anchor with every later unprocessed item; each one similar
//!    to the anchor joins the group and is marked processed.
//! 3. Close the group and continue with the next unprocessed item.
//!
//! Membership is decided against the anchor only. With `A~B`, `B~C` and
//! `A≁C`, scanning `[A, B, C]` yields `{A, B}` and `{C}`: `C` never gets
//! compared with `B`. Once assigned, an item never moves.
//!
//! ## Complexity
//!
//! - **Time**: at most n(n-1)/2 similarity calls, fewer as groups absorb items.
//! - **Space**: O(n).

use super::traits::Grouping;

/// Greedy anchor-only grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorGrouping;

impl AnchorGrouping {
    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Grouping for AnchorGrouping {
    fn group(&self, n: usize, similar: &mut dyn FnMut(usize, usize) -> bool) -> Vec<Vec<usize>> {
        let mut processed = vec![false; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for anchor in 0..n {
            if processed[anchor] {
                continue;
            }

            let mut group = vec![anchor];
            for candidate in (anchor + 1)..n {
                if processed[candidate] {
                    continue;
                }
                if similar(anchor, candidate) {
                    processed[candidate] = true;
                    group.push(candidate);
                }
            }

            processed[anchor] = true;
            groups.push(group);
        }

        groups
    }
}
