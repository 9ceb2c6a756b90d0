//! Grouping strategies for near-duplicate items.
//!
//! A strategy partitions item indices `0..n` given a pairwise predicate. It
//! never sees keys or weights; picking a representative per group is the job
//! of [`crate::dedup`].
//!
//! ## Strategies
//!
//! ### Anchor (default)
//!
//! Greedy single pass. The first unprocessed item anchors a group and pulls in
//! every later unprocessed item similar *to it*. Cheap and predictable, but
//! order-dependent: a chain `A~B~C` with `A≁C` leaves `C` outside `A`'s group.
//!
//! ### Transitive
//!
//! Connected components of the similarity graph via union-find. Chains merge
//! fully and input order does not matter, at the cost of comparing pairs the
//! anchor scan would have skipped.
//!
//! ## Usage
//!
//! ```rust
//! use sift::cluster::{Grouping, Linkage};
//!
//! // 0~1, 1~2, 0≁2
//! let mut similar = |a: usize, b: usize| matches!((a, b), (0, 1) | (1, 2));
//!
//! let groups = Linkage::Anchor.group(3, &mut similar);
//! assert_eq!(groups, vec![vec![0, 1], vec![2]]);
//!
//! let groups = Linkage::Transitive.group(3, &mut similar);
//! assert_eq!(groups, vec![vec![0, 1, 2]]);
//! ```

mod anchor;
mod linkage;
mod traits;
mod transitive;
mod util;

pub use anchor::AnchorGrouping;
pub use linkage::Linkage;
pub use traits::Grouping;
pub use transitive::TransitiveGrouping;
