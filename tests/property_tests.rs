use std::collections::BTreeSet;

use proptest::prelude::*;
use sift::{Deduplicator, Item, Linkage, Weight};

/// Items `k0..kn` with optional weights, plus a symmetric similarity relation.
fn scenario() -> impl Strategy<Value = (Vec<Option<u32>>, Vec<Vec<bool>>)> {
    (0usize..24).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::option::weighted(0.8, 0u32..50), n),
            prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
        )
    })
}

fn items(weights: &[Option<u32>]) -> Vec<Item> {
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| Item::new(format!("k{i}"), *w))
        .collect()
}

fn index(key: &str) -> usize {
    key[1..].parse().unwrap()
}

fn relation(adj: &[Vec<bool>]) -> impl Fn(&str, &str) -> bool + '_ {
    move |a: &str, b: &str| {
        let (i, j) = (index(a), index(b));
        let (lo, hi) = (i.min(j), i.max(j));
        adj[lo][hi]
    }
}

const LINKAGES: [Linkage; 2] = [Linkage::Anchor, Linkage::Transitive];

proptest! {
    #[test]
    fn prop_partition_is_complete((weights, adj) in scenario()) {
        let similar = relation(&adj);
        for linkage in LINKAGES {
            let run = Deduplicator::new().with_linkage(linkage).run(items(&weights), &similar);
            let mut seen: Vec<usize> = run.groups().iter().flat_map(|g| g.members().to_vec()).collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..weights.len()).collect::<Vec<_>>());
            for g in run.groups() {
                prop_assert!(!g.is_empty());
                prop_assert!(g.members().contains(&g.representative()));
            }
        }
    }

    #[test]
    fn prop_fewer_representatives_iff_some_pair_similar((weights, adj) in scenario()) {
        let n = weights.len();
        let any_similar = (0..n).any(|i| ((i + 1)..n).any(|j| adj[i][j]));
        let similar = relation(&adj);
        for linkage in LINKAGES {
            let run = Deduplicator::new().with_linkage(linkage).run(items(&weights), &similar);
            prop_assert!(run.len() <= n);
            prop_assert_eq!(run.len() == n, !any_similar);
        }
    }

    #[test]
    fn prop_anchor_members_match_their_anchor((weights, adj) in scenario()) {
        let similar = relation(&adj);
        let run = Deduplicator::new().run(items(&weights), &similar);
        for g in run.groups() {
            let anchor = g.anchor();
            prop_assert_eq!(anchor, g.members()[0]);
            for &m in &g.members()[1..] {
                prop_assert!(m > anchor);
                prop_assert!(adj[anchor][m]);
            }
        }
    }

    #[test]
    fn prop_transitive_groups_are_closed((weights, adj) in scenario()) {
        let n = weights.len();
        let similar = relation(&adj);
        let run = Deduplicator::new()
            .with_linkage(Linkage::Transitive)
            .run(items(&weights), &similar);
        let mut group_of = vec![usize::MAX; n];
        for (gi, g) in run.groups().iter().enumerate() {
            for &m in g.members() {
                group_of[m] = gi;
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if adj[i][j] {
                    prop_assert_eq!(group_of[i], group_of[j]);
                }
            }
        }
    }

    #[test]
    fn prop_transitive_ignores_input_order((weights, adj) in scenario()) {
        let similar = relation(&adj);
        let dedup = Deduplicator::new().with_linkage(Linkage::Transitive);

        let forward = dedup.run(items(&weights), &similar);
        let mut reversed_items = items(&weights);
        reversed_items.reverse();
        let backward = dedup.run(reversed_items, &similar);

        let key_sets = |run: &sift::Deduplicated| -> BTreeSet<BTreeSet<String>> {
            run.groups()
                .iter()
                .map(|g| run.members(g).map(|i| i.key.clone()).collect())
                .collect()
        };
        prop_assert_eq!(key_sets(&forward), key_sets(&backward));
    }

    #[test]
    fn prop_representative_is_heaviest_and_earliest((weights, adj) in scenario()) {
        let similar = relation(&adj);
        for linkage in LINKAGES {
            let run = Deduplicator::new().with_linkage(linkage).run(items(&weights), &similar);
            for g in run.groups() {
                let rep = &run.items()[g.representative()];
                for &m in g.members() {
                    let other = &run.items()[m];
                    prop_assert!(!other.weight.outranks(rep.weight));
                    if m < g.representative() {
                        prop_assert!(rep.weight.outranks(other.weight));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_always_similar_keeps_global_max(weights in prop::collection::vec(prop::option::of(0u32..50), 1..30)) {
        let always = |_: &str, _: &str| true;
        let run = Deduplicator::new().run(items(&weights), &always);
        prop_assert_eq!(run.len(), 1);

        let expected = run
            .items()
            .iter()
            .enumerate()
            .fold(0, |best, (i, item)| if item.weight.outranks(run.items()[best].weight) { i } else { best });
        prop_assert_eq!(run.groups()[0].representative(), expected);
    }

    #[test]
    fn prop_never_similar_is_identity(weights in prop::collection::vec(prop::option::of(0u32..50), 0..30)) {
        let never = |_: &str, _: &str| false;
        let out = sift::deduplicate(items(&weights), &never);
        prop_assert_eq!(out.len(), weights.len());
        for (i, w) in weights.iter().enumerate() {
            prop_assert_eq!(out[&format!("k{i}")], Weight::from(*w));
        }
    }
}

#[test]
fn chain_example_by_linkage() {
    // A~B, B~C, A≁C
    let chain = |a: &str, b: &str| {
        let pair = if a < b { (a, b) } else { (b, a) };
        matches!(pair, ("A", "B") | ("B", "C"))
    };
    let input = || vec![("A", 10.0), ("B", 20.0), ("C", 5.0)];

    let anchor = sift::deduplicate(input(), &chain);
    assert_eq!(anchor.len(), 2);
    assert_eq!(anchor["B"], Weight::new(20.0));
    assert_eq!(anchor["C"], Weight::new(5.0));

    let transitive = Deduplicator::new()
        .with_linkage(Linkage::Transitive)
        .run(input(), &chain)
        .into_map();
    assert_eq!(transitive.len(), 1);
    assert_eq!(transitive["B"], Weight::new(20.0));
}

#[test]
fn swapping_unrelated_items_keeps_representatives() {
    let same_head = |a: &str, b: &str| a.split(' ').next() == b.split(' ').next();
    let forward = vec![("shoes red", 3.0), ("hat", 1.0), ("shoes blue", 8.0), ("bag", 2.0)];
    let swapped = vec![("hat", 1.0), ("shoes red", 3.0), ("bag", 2.0), ("shoes blue", 8.0)];

    let a = sift::deduplicate(forward, &same_head);
    let b = sift::deduplicate(swapped, &same_head);
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
}
