//! Disjoint sets with union by rank.
//!
//! `find` splits paths as it walks: every visited element is re-pointed to
//! its grandparent, so trees flatten incrementally over repeated lookups
//! instead of in one full compression pass.
//!
//! Inputs are not validated. An element that was never added is reported as
//! absent by `find`, is never `connected`, and `union` ignores it.

use std::collections::HashMap;
use std::hash::Hash;

/// A union-find forest over arbitrary hashable elements.
#[derive(Debug, Clone, Default)]
pub struct UnionFind<T> {
    parent: HashMap<T, T>,
    rank: HashMap<T, u32>,
}

impl<T> UnionFind<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }

    /// Add `elem` as its own singleton set, resetting it if already present.
    pub fn add(&mut self, elem: T) {
        self.parent.insert(elem.clone(), elem.clone());
        self.rank.insert(elem, 1);
    }

    /// Number of elements added.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `elem`.
    pub fn find(&mut self, elem: &T) -> Option<T> {
        let mut current = elem.clone();

        loop {
            let parent = self.parent.get(&current)?.clone();
            if parent == current {
                return Some(current);
            }

            let grandparent = self.parent.get(&parent)?.clone();
            self.parent.insert(current, grandparent);
            current = parent;
        }
    }

    /// Merge the sets of `a` and `b`. Returns `true` if two sets were merged.
    ///
    /// The lower-rank root hangs under the higher-rank one. On equal rank the
    /// root of `a` wins and its rank grows by one.
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let (Some(a_root), Some(b_root)) = (self.find(a), self.find(b)) else {
            return false;
        };
        if a_root == b_root {
            return false;
        }

        let a_rank = self.rank_of(&a_root);
        let b_rank = self.rank_of(&b_root);

        if a_rank < b_rank {
            self.parent.insert(a_root, b_root);
        } else {
            self.parent.insert(b_root, a_root.clone());
            if a_rank == b_rank {
                self.rank.insert(a_root, a_rank + 1);
            }
        }
        true
    }

    /// Whether `a` and `b` are in the same set.
    pub fn connected(&mut self, a: &T, b: &T) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of disjoint sets.
    pub fn set_count(&mut self) -> usize {
        let elems: Vec<T> = self.parent.keys().cloned().collect();
        elems
            .iter()
            .filter(|e| self.find(e).as_ref() == Some(*e))
            .count()
    }

    fn rank_of(&self, root: &T) -> u32 {
        self.rank.get(root).copied().unwrap_or(1)
    }
}
