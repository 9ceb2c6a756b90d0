//! Transitive grouping (connected components of the similarity graph).
//!
//! Every pair is a potential edge; groups are the connected components, built
//! with union-find. Unlike [`super::AnchorGrouping`], a chain `A~B~C` ends up
//! in one group even when `A≁C`, and the result does not depend on input
//! order.
//!
//! Pairs already known to share a component are skipped, so dense duplicate
//! clusters cost far fewer than n(n-1)/2 calls.

use super::traits::Grouping;
use super::util::UnionFind;

/// Union-find grouping over all pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitiveGrouping;

impl TransitiveGrouping {
    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Grouping for TransitiveGrouping {
    fn group(&self, n: usize, similar: &mut dyn FnMut(usize, usize) -> bool) -> Vec<Vec<usize>> {
        let mut uf = UnionFind::new(n);

        for i in 0..n {
            for j in (i + 1)..n {
                if uf.connected(i, j) {
                    continue;
                }
                if similar(i, j) {
                    uf.union(i, j);
                }
            }
        }

        uf.components()
    }
}
