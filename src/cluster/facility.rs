//! Facility bookkeeping.
//!
//! A facility is a cluster record: the representative point, the points it
//! serves, a cost accumulator for pending open/close decisions, and a cached
//! farthest member.
//!
//! # Farthest-member cache
//!
//! Insertion updates the cache in O(1). Removal is O(1) too, unless the
//! removed point *is* the farthest member; then the remaining members'
//! cached distances are rescanned, O(|members|). That rescan is the only
//! non-incremental operation here and dominates closing large facilities.

use crate::point::PointSet;

/// A cluster centre and the points assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    /// Index of the representative point. The representative is not a member.
    representative: usize,
    /// Indices of assigned points.
    members: Vec<usize>,
    /// Accumulated cost of a pending decision about this facility.
    cost: f64,
    /// Largest non-weighted distance of any member.
    max_distance: f64,
    /// Member realizing `max_distance`.
    farthest: Option<usize>,
    /// Free flag for callers, e.g. clusters containing sample points.
    marked: bool,
}

impl Facility {
    /// Open a facility with no members.
    pub fn new(representative: usize) -> Self {
        Self {
            representative,
            members: Vec::new(),
            cost: 0.0,
            max_distance: 0.0,
            farthest: None,
            marked: false,
        }
    }

    /// Index of the representative point.
    pub fn representative(&self) -> usize {
        self.representative
    }

    /// Assigned point indices, in assignment order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the facility serves no point besides its representative.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Points in the cluster, representative included.
    pub fn cluster_size(&self) -> usize {
        self.members.len() + 1
    }

    /// Whether `index` is a member.
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Add a member at the given non-weighted distance.
    pub fn add_member(&mut self, index: usize, non_weighted_distance: f64) {
        self.members.push(index);
        if self.farthest.is_none() || non_weighted_distance > self.max_distance {
            self.max_distance = non_weighted_distance;
            self.farthest = Some(index);
        }
    }

    /// Remove a member. Returns `false` if `index` was not a member.
    ///
    /// `points` supplies the remaining members' cached distances when the
    /// farthest member is removed.
    pub fn remove_member(&mut self, index: usize, points: &PointSet) -> bool {
        let Some(pos) = self.members.iter().position(|&m| m == index) else {
            return false;
        };
        let _ = self.members.swap_remove(pos);
        if self.farthest == Some(index) {
            self.find_new_maximum(points);
        }
        true
    }

    fn find_new_maximum(&mut self, points: &PointSet) {
        self.max_distance = 0.0;
        self.farthest = None;
        for &m in &self.members {
            let d = points.state(m).non_weighted_distance();
            if self.farthest.is_none() || d > self.max_distance {
                self.max_distance = d;
                self.farthest = Some(m);
            }
        }
    }

    /// Take every member out, leaving the facility empty.
    pub fn take_members(&mut self) -> Vec<usize> {
        self.max_distance = 0.0;
        self.farthest = None;
        std::mem::take(&mut self.members)
    }

    /// Largest non-weighted member distance (0 without members).
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Member at [`max_distance`](Self::max_distance).
    pub fn farthest_member(&self) -> Option<usize> {
        self.farthest
    }

    /// Accumulated cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Add to the cost accumulator.
    pub fn add_cost(&mut self, value: f64) {
        self.cost += value;
    }

    /// Reset the cost accumulator.
    pub fn reset_cost(&mut self) {
        self.cost = 0.0;
    }

    /// Whether the facility is marked.
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Set the mark.
    pub fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Points 1.. assigned to facility 0 at the given distances.
    fn points_at(distances: &[f64]) -> PointSet {
        let rows: Vec<Vec<f64>> = (0..=distances.len()).map(|i| vec![i as f64]).collect();
        let mut set = PointSet::from_rows(&rows).unwrap();
        set.open_at(0);
        for (i, &d) in distances.iter().enumerate() {
            set.assign(i + 1, 0, d);
        }
        set
    }

    #[test]
    fn removing_farthest_rescans() {
        let set = points_at(&[1.0, 5.0, 3.0]);
        let mut f = Facility::new(0);
        f.add_member(1, 1.0);
        f.add_member(2, 5.0);
        f.add_member(3, 3.0);
        assert_eq!(f.max_distance(), 5.0);
        assert_eq!(f.farthest_member(), Some(2));

        assert!(f.remove_member(2, &set));
        assert_eq!(f.max_distance(), 3.0);
        assert_eq!(f.farthest_member(), Some(3));
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn removing_other_member_keeps_cache() {
        let set = points_at(&[1.0, 5.0, 3.0]);
        let mut f = Facility::new(0);
        for (i, d) in [(1, 1.0), (2, 5.0), (3, 3.0)] {
            f.add_member(i, d);
        }
        assert!(f.remove_member(1, &set));
        assert_eq!(f.max_distance(), 5.0);
        assert!(!f.remove_member(1, &set));
        assert!(!f.contains(1));
    }

    #[test]
    fn emptying_resets_maximum() {
        let set = points_at(&[2.0]);
        let mut f = Facility::new(0);
        f.add_member(1, 2.0);
        assert!(f.remove_member(1, &set));
        assert!(f.is_empty());
        assert_eq!(f.max_distance(), 0.0);
        assert_eq!(f.farthest_member(), None);
        assert_eq!(f.cluster_size(), 1);
    }

    #[test]
    fn cost_accumulator() {
        let mut f = Facility::new(4);
        f.add_cost(1.5);
        f.add_cost(2.0);
        assert_eq!(f.cost(), 3.5);
        f.reset_cost();
        assert_eq!(f.cost(), 0.0);
        assert_eq!(f.representative(), 4);
    }

    #[test]
    fn take_members_clears() {
        let mut f = Facility::new(0);
        f.add_member(1, 1.0);
        f.add_member(2, 2.0);
        f.set_marked(true);
        let taken = f.take_members();
        assert_eq!(taken, vec![1, 2]);
        assert!(f.is_empty());
        assert_eq!(f.max_distance(), 0.0);
        assert!(f.is_marked());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(f64),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f64..100.0).prop_map(Op::Add),
            (0usize..64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn max_distance_tracks_true_maximum(ops in proptest::collection::vec(op(), 1..60)) {
            let n = 64;
            let rows: Vec<Vec<f64>> = (0..=n).map(|i| vec![i as f64]).collect();
            let mut set = PointSet::from_rows(&rows).unwrap();
            set.open_at(0);

            let mut f = Facility::new(0);
            let mut next = 1;
            for op in ops {
                match op {
                    Op::Add(d) => {
                        if next <= n {
                            set.assign(next, 0, d);
                            f.add_member(next, d);
                            next += 1;
                        }
                    }
                    Op::Remove(k) => {
                        if !f.is_empty() {
                            let victim = f.members()[k % f.len()];
                            prop_assert!(f.remove_member(victim, &set));
                        }
                    }
                }

                let expected = f
                    .members()
                    .iter()
                    .map(|&m| set.state(m).non_weighted_distance())
                    .fold(0.0f64, f64::max);
                prop_assert_eq!(f.max_distance(), expected);
                if let Some(far) = f.farthest_member() {
                    prop_assert!(f.contains(far));
                    prop_assert_eq!(set.state(far).non_weighted_distance(), expected);
                }
            }
        }
    }
}
