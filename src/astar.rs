//! Best-first search engine shared by every solver. A variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! with an explicit closed set and a total order on the open set so that
//! equal-cost graphs always produce the same path.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    heuristic: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest estimate first, then the entry
        // closest to the goal, then the one pushed earliest
        other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                other
                    .heuristic
                    .partial_cmp(&self.heuristic)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Open and closed sets of one search. Cleared at the start of every call so a
/// context can be reused without reallocating.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    /// Every node reached so far with its parent index and best known cost.
    pub parents: FxIndexMap<N, (usize, C)>,
    closed: Vec<bool>,
    sequence: usize,
}

impl<N, C> Default for SearchContext<N, C> {
    fn default() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            closed: Vec::new(),
            sequence: 0,
        }
    }
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, (usize, C)>, start: usize) -> Vec<N>
where
    N: Clone,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, &(parent, _))| {
            i = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.to_see.clear();
        self.parents.clear();
        self.closed.clear();
        self.sequence = 0;
    }

    fn push(&mut self, index: usize, cost: C, heuristic: C) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost: cost + heuristic,
            heuristic,
            cost,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
    }

    /// Number of nodes that were expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.closed.iter().filter(|&&closed| closed).count()
    }

    /// Searches from `start` until `success` holds for a popped node. Returns
    /// the node sequence from start to that node and its accumulated cost.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.clear();
        let start_h = heuristic(start);
        self.parents.insert(start.clone(), (usize::MAX, Zero::zero()));
        self.closed.push(false);
        self.push(0, Zero::zero(), start_h);

        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            if self.closed[index] {
                continue;
            }
            let successors = {
                let Some((node, &(_, best))) = self.parents.get_index(index) else {
                    continue;
                };
                // A cheaper route to this node was found after this entry was
                // pushed; that entry carries the search forward instead.
                if cost > best {
                    continue;
                }
                if success(node) {
                    let path = reverse_path(&self.parents, index);
                    return Some((path, cost));
                }
                self.closed[index] = true;
                successors(node)
            };
            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                let h; // heuristic(&successor)
                let n; // index for successor
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                        self.closed.push(false);
                    }
                    Occupied(mut e) => {
                        if self.closed[e.index()] || !(new_cost < e.get().1) {
                            continue;
                        }
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    }
                }
                self.push(n, new_cost, h);
            }
        }
        debug!(
            "Open set exhausted after expanding {} nodes without reaching the goal",
            self.expanded()
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -> 1 -> 3 costs 2, 0 -> 2 -> 3 costs 2 as well
    fn diamond(node: &u32) -> Vec<(u32, u32)> {
        match node {
            0 => vec![(1, 1), (2, 1)],
            1 => vec![(3, 1)],
            2 => vec![(3, 1)],
            _ => vec![],
        }
    }

    #[test]
    fn start_is_goal() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        let (path, cost) = ct.astar(&7, |_| Vec::new(), |_| 0, |n| *n == 7).unwrap();
        assert_eq!(path, vec![7]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn ties_resolve_to_first_inserted() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        for _ in 0..10 {
            let (path, cost) = ct.astar(&0, diamond, |_| 0, |n| *n == 3).unwrap();
            assert_eq!(path, vec![0, 1, 3]);
            assert_eq!(cost, 2);
        }
    }

    #[test]
    fn cheaper_late_route_replaces_parent() {
        // Direct 0 -> 2 is expensive, 0 -> 1 -> 2 is cheap
        let successors = |node: &u32| match node {
            0 => vec![(2, 10.0), (1, 1.0)],
            1 => vec![(2, 1.0)],
            _ => vec![],
        };
        let mut ct: SearchContext<u32, f64> = SearchContext::new();
        let (path, cost) = ct.astar(&0, successors, |_| 0.0, |n| *n == 2).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(cost, 2.0);
    }

    #[test]
    fn unreachable_goal() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        assert!(ct.astar(&0, diamond, |_| 0, |n| *n == 9).is_none());
        assert_eq!(ct.expanded(), 4);
    }
}
