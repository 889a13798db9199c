//! Equivalence classes over existing constraint pairs.

use crate::sketch::GeoId;
use std::collections::HashMap;

/// Disjoint-set forest indices for one build pass.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new() -> Self {
        Self { parent: Vec::new(), rank: Vec::new() }
    }

    fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    fn find(&mut self, mut i: usize) -> usize {
        // Path halving keeps the forest flat without recursion.
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// The partition of geometry identities into maximal sets already linked,
/// directly or transitively, by existing constraints of one kind.
///
/// Classes are pairwise disjoint: no identity belongs to two classes.
/// Built with union-find, which yields the same partition as the original
/// incremental scan-insert-and-compact merging with guaranteed
/// termination.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceClasses {
    class_of: HashMap<GeoId, usize>,
    classes: Vec<Vec<GeoId>>,
}

impl EquivalenceClasses {
    /// Build the partition from unordered participant pairs.
    pub fn build(pairs: &[(GeoId, GeoId)]) -> Self {
        let mut set = DisjointSet::new();
        let mut ids: HashMap<GeoId, usize> = HashMap::new();
        let mut members: Vec<GeoId> = Vec::new();

        let mut intern = |geo: GeoId, set: &mut DisjointSet| -> usize {
            *ids.entry(geo).or_insert_with(|| {
                members.push(geo);
                set.make_set()
            })
        };

        for &(a, b) in pairs {
            let ia = intern(a, &mut set);
            let ib = intern(b, &mut set);
            set.union(ia, ib);
        }

        // Compact roots into dense class ids, in first-seen member order
        // so the result is deterministic for a given pair order.
        let mut class_of = HashMap::with_capacity(members.len());
        let mut classes: Vec<Vec<GeoId>> = Vec::new();
        let mut root_to_class: HashMap<usize, usize> = HashMap::new();

        for (i, &geo) in members.iter().enumerate() {
            let root = set.find(i);
            let class = *root_to_class.entry(root).or_insert_with(|| {
                classes.push(Vec::new());
                classes.len() - 1
            });
            classes[class].push(geo);
            class_of.insert(geo, class);
        }

        Self { class_of, classes }
    }

    /// True if existing constraints already tie `a` and `b` together.
    /// Identities that appear in no constraint belong to no class.
    pub fn same_class(&self, a: GeoId, b: GeoId) -> bool {
        match (self.class_of.get(&a), self.class_of.get(&b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// The pairwise-disjoint classes, each in first-seen member order.
    pub fn classes(&self) -> &[Vec<GeoId>] {
        &self.classes
    }
}
