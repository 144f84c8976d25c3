//! Facility-location clustering.
//!
//! Chooses a subset of points as **facilities** and assigns every other
//! point to one of them, trading the cost of opening a facility against
//! the cost of serving points from far away.
//!
//! # The Objective
//!
//! ```text
//! cost = f · |F| + Σₚ d(F(p), p)
//! ```
//!
//! where `f` is the opening cost ("cluster size"), `F(p)` is the facility
//! serving `p`, and `d` is the [`Metric`]. An unreachable pair can never be
//! an assignment, so the metric's feasibility gate is a hard constraint.
//!
//! # The Heuristic
//!
//! 1. **Greedy pass**: visit points in a fixed order. Each point joins the
//!    nearest reachable open facility, unless there is none or it is
//!    farther than `f`; then the point opens a facility of its own.
//! 2. **Refinement passes** (bounded count):
//!    - *Reassign*: a point moves to a strictly closer reachable facility
//!      (one opened after it was placed, typically).
//!    - *Close*: a facility's accumulator collects the change in assignment
//!      cost of moving its representative and members to their nearest
//!      reachable other facility. When everyone has somewhere to go and the
//!      change is below `f`, closing it lowers the total cost, so it closes.
//!
//! A pass that changes nothing ends refinement early. Neither step can raise
//! the total cost, so refinement is monotone.
//!
//! # Complexity
//!
//! Each pass is O(n · |F|) metric evaluations. The line metric rejects most
//! pairs at its azimuth gate, before any distance is computed.

use super::facility::Facility;
use super::traits::Clustering;
use crate::bbox::BoundingBox;
use crate::error::{Error, Result};
use crate::metric::{LineBufferMetric, Metric};
use crate::point::PointSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Cost of opening one facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpeningCost {
    /// A fixed cost.
    Absolute(f64),
    /// A fraction of the bounding box's weighted diagonal.
    DiagonalFraction(f64),
}

impl OpeningCost {
    /// Resolve to a concrete cost for the given extent.
    pub fn resolve(&self, bounds: &BoundingBox, weights: Option<&[f64]>) -> Result<f64> {
        let cost = match *self {
            OpeningCost::Absolute(c) => c,
            OpeningCost::DiagonalFraction(frac) => {
                if bounds.is_empty() {
                    return Err(Error::InvalidParameter {
                        name: "bounds",
                        message: "bounding box is empty",
                    });
                }
                if !frac.is_finite() || frac < 0.0 {
                    return Err(Error::InvalidParameter {
                        name: "opening_cost",
                        message: "diagonal fraction must be finite and non-negative",
                    });
                }
                frac * bounds.weighted_diagonal(weights)?
            }
        };
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidParameter {
                name: "opening_cost",
                message: "must be finite and non-negative",
            });
        }
        Ok(cost)
    }
}

impl Default for OpeningCost {
    fn default() -> Self {
        OpeningCost::DiagonalFraction(0.1)
    }
}

/// Order in which the greedy pass visits points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitOrder {
    /// Input order.
    #[default]
    Input,
    /// A seeded shuffle of the input.
    Shuffled(u64),
}

impl VisitOrder {
    fn indices(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        if let VisitOrder::Shuffled(seed) = *self {
            let mut rng = StdRng::seed_from_u64(seed);
            order.shuffle(&mut rng);
        }
        order
    }
}

/// Facility-location clusterer.
#[derive(Debug, Clone)]
pub struct FacilityLocation<M = LineBufferMetric> {
    /// Comparison between a facility representative and a point.
    metric: M,
    /// Cost of opening a facility.
    opening_cost: OpeningCost,
    /// Maximum number of refinement passes after the greedy pass.
    refinement_passes: usize,
    /// Greedy visiting order.
    order: VisitOrder,
}

impl<M: Metric> FacilityLocation<M> {
    /// Create a clusterer using `metric`.
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            opening_cost: OpeningCost::default(),
            refinement_passes: 2,
            order: VisitOrder::Input,
        }
    }

    /// Set the opening cost.
    pub fn with_opening_cost(mut self, cost: OpeningCost) -> Self {
        self.opening_cost = cost;
        self
    }

    /// Set the maximum number of refinement passes (0 = greedy only).
    pub fn with_refinement_passes(mut self, passes: usize) -> Self {
        self.refinement_passes = passes;
        self
    }

    /// Set the greedy visiting order.
    pub fn with_order(mut self, order: VisitOrder) -> Self {
        self.order = order;
        self
    }

    /// Visit points in a shuffled order seeded with `seed`.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_order(VisitOrder::Shuffled(seed))
    }

    /// The metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Cluster `points`, whose extent is `bounds`.
    ///
    /// Rewrites every point's assignment state. Configuration problems are
    /// reported before any point is touched.
    pub fn compute_clustering(
        &self,
        points: &mut PointSet,
        bounds: &BoundingBox,
    ) -> Result<Solution> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if bounds.dim() != points.dim() {
            return Err(Error::DimensionMismatch {
                expected: points.dim(),
                found: bounds.dim(),
            });
        }
        self.metric.check_dimension(points.dim())?;
        let opening_cost = self
            .opening_cost
            .resolve(bounds, self.metric.coord_weights())?;

        points.reset_assignments();
        let order = self.order.indices(points.len());

        let mut run = Run {
            metric: &self.metric,
            facilities: vec![None; points.len()],
            open: Vec::new(),
            opening_cost,
            points,
        };

        run.greedy(&order);
        tracing::debug!(
            points = order.len(),
            facilities = run.open.len(),
            opening_cost,
            "greedy pass done"
        );

        let mut passes = 0;
        for pass in 0..self.refinement_passes {
            passes = pass + 1;
            let moved = run.reassign(&order);
            let closed = run.close_facilities();
            tracing::debug!(
                pass = passes,
                moved,
                closed,
                facilities = run.open.len(),
                "refinement pass done"
            );
            if moved == 0 && closed == 0 {
                break;
            }
        }

        let solution = run.into_solution(passes);
        tracing::info!(
            points = solution.labels.len(),
            facilities = solution.facilities.len(),
            total_cost = solution.total_cost,
            passes,
            "clustering finished"
        );
        Ok(solution)
    }
}

impl Default for FacilityLocation<LineBufferMetric> {
    fn default() -> Self {
        Self::new(LineBufferMetric::new(Default::default()))
    }
}

impl<M: Metric> Clustering for FacilityLocation<M> {
    fn fit_predict(&self, points: &PointSet) -> Result<Vec<usize>> {
        let mut points = points.clone();
        let bounds = BoundingBox::from_points(&points);
        let solution = self.compute_clustering(&mut points, &bounds)?;
        Ok(solution.labels)
    }

    /// Facilities are opened on demand, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}

/// State of one clustering run.
struct Run<'a, M> {
    metric: &'a M,
    points: &'a mut PointSet,
    /// Indexed by representative point.
    facilities: Vec<Option<Facility>>,
    /// Open representatives, in opening order.
    open: Vec<usize>,
    opening_cost: f64,
}

impl<M: Metric> Run<'_, M> {
    /// Nearest reachable open facility for `p`, skipping `exclude`.
    ///
    /// Ties go to the facility opened first.
    fn nearest(&self, p: usize, exclude: Option<usize>) -> Option<(usize, f64)> {
        let candidate = self.points.get(p);
        let mut best: Option<(usize, f64)> = None;
        for &f in &self.open {
            if Some(f) == exclude {
                continue;
            }
            if let Some(d) = self.metric.reach(self.points.get(f), candidate).distance() {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((f, d));
                }
            }
        }
        best
    }

    fn open_at(&mut self, p: usize) {
        self.points.open_at(p);
        self.facilities[p] = Some(Facility::new(p));
        self.open.push(p);
    }

    fn assign(&mut self, p: usize, f: usize, weighted_distance: f64) {
        self.points.assign(p, f, weighted_distance);
        let non_weighted = self.points.state(p).non_weighted_distance();
        if let Some(fac) = self.facilities[f].as_mut() {
            fac.add_member(p, non_weighted);
        }
    }

    fn greedy(&mut self, order: &[usize]) {
        for &p in order {
            match self.nearest(p, None) {
                Some((f, d)) if d <= self.opening_cost => self.assign(p, f, d),
                _ => self.open_at(p),
            }
        }
    }

    /// Move points to strictly closer facilities. Returns the number moved.
    fn reassign(&mut self, order: &[usize]) -> usize {
        let mut moved = 0;
        for &p in order {
            let state = *self.points.state(p);
            let Some(current) = state.facility else {
                continue;
            };
            if state.is_facility {
                continue;
            }
            let Some((g, d)) = self.nearest(p, None) else {
                continue;
            };
            if g != current && d < state.weighted_distance {
                if let Some(fac) = self.facilities[current].as_mut() {
                    let removed = fac.remove_member(p, &*self.points);
                    debug_assert!(removed, "point {p} missing from facility {current}");
                }
                self.assign(p, g, d);
                moved += 1;
            }
        }
        moved
    }

    /// Close every facility whose points are cheaper to serve elsewhere.
    /// Returns the number closed.
    fn close_facilities(&mut self) -> usize {
        let mut closed = 0;
        for f in self.open.clone() {
            let Some(plan) = self.closing_plan(f) else {
                continue;
            };
            let keep = self.facilities[f]
                .as_ref()
                .map_or(true, |fac| fac.cost() >= self.opening_cost);
            if keep {
                continue;
            }
            let Some(mut fac) = self.facilities[f].take() else {
                continue;
            };

            self.open.retain(|&o| o != f);
            for q in std::iter::once(f).chain(fac.take_members()) {
                self.points.unassign(q);
            }
            for (q, g, d) in plan {
                self.assign(q, g, d);
            }
            closed += 1;
        }
        closed
    }

    /// Destinations for every point of facility `f`, with the change in
    /// assignment cost accumulated on the facility.
    ///
    /// `None` when some point has no other reachable facility.
    fn closing_plan(&mut self, f: usize) -> Option<Vec<(usize, usize, f64)>> {
        let members = self.facilities[f].as_ref()?.members().to_vec();
        let mut plan = Vec::with_capacity(members.len() + 1);
        let mut delta = 0.0;
        for q in std::iter::once(f).chain(members) {
            let (g, d) = self.nearest(q, Some(f))?;
            let current = if q == f {
                0.0
            } else {
                self.points.state(q).weighted_distance
            };
            delta += d - current;
            plan.push((q, g, d));
        }

        let fac = self.facilities[f].as_mut()?;
        fac.reset_cost();
        fac.add_cost(delta);
        Some(plan)
    }

    fn into_solution(self, passes: usize) -> Solution {
        let mut ordinal = vec![usize::MAX; self.points.len()];
        let mut facilities = Vec::with_capacity(self.open.len());
        let mut slots = self.facilities;
        for (k, &f) in self.open.iter().enumerate() {
            ordinal[f] = k;
            if let Some(fac) = slots[f].take() {
                facilities.push(fac);
            }
        }

        let mut assignment_cost = 0.0;
        let labels = self
            .points
            .states()
            .iter()
            .map(|s| {
                assignment_cost += s.weighted_distance;
                s.facility.map_or(usize::MAX, |f| ordinal[f])
            })
            .collect();

        Solution {
            total_cost: self.opening_cost * facilities.len() as f64 + assignment_cost,
            facilities,
            labels,
            opening_cost: self.opening_cost,
            passes,
        }
    }
}

/// Result of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    facilities: Vec<Facility>,
    labels: Vec<usize>,
    opening_cost: f64,
    total_cost: f64,
    passes: usize,
}

impl Solution {
    /// Open facilities, in opening order.
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Representative indices of all facilities.
    pub fn all_facilities(&self) -> Vec<usize> {
        self.facilities.iter().map(Facility::representative).collect()
    }

    /// Cluster index (position in [`facilities`](Self::facilities)) per point.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Facility serving point `index`.
    pub fn facility_of(&self, index: usize) -> Option<&Facility> {
        self.labels
            .get(index)
            .and_then(|&k| self.facilities.get(k))
    }

    /// Number of facilities.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Whether no facility was opened.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// The resolved opening cost.
    pub fn opening_cost(&self) -> f64 {
        self.opening_cost
    }

    /// Opening costs plus weighted assignment distances.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Refinement passes run.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Mutable access to a facility, e.g. to mark it.
    pub fn facility_mut(&mut self, k: usize) -> Option<&mut Facility> {
        self.facilities.get_mut(k)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metric::{BufferConfig, Reach, WeightedEuclidean};
    use crate::point::Segment;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn line_engine(along: f64, across: f64, azimuth: f64, cost: f64) -> FacilityLocation {
        FacilityLocation::new(LineBufferMetric::new(BufferConfig::new(along, across, azimuth)))
            .with_opening_cost(OpeningCost::Absolute(cost))
    }

    fn run<M: Metric>(engine: &FacilityLocation<M>, points: &mut PointSet) -> Solution {
        let bounds = BoundingBox::from_points(points);
        engine.compute_clustering(points, &bounds).unwrap()
    }

    /// Members are disjoint, cover every non-representative point, and every
    /// assignment is reachable.
    fn assert_consistent<M: Metric>(metric: &M, points: &PointSet, sol: &Solution) {
        let reps: HashSet<usize> = sol.all_facilities().into_iter().collect();
        let mut seen = HashSet::new();
        for fac in sol.facilities() {
            let rep = fac.representative();
            assert!(points.state(rep).is_facility);
            assert_eq!(points.state(rep).facility, Some(rep));
            for &m in fac.members() {
                assert!(seen.insert(m), "point {m} in two facilities");
                assert!(!reps.contains(&m));
                assert_eq!(points.state(m).facility, Some(rep));
                let r = metric.reach(points.get(rep), points.get(m));
                assert_eq!(r, Reach::Within(points.state(m).weighted_distance));
            }
        }
        assert_eq!(seen.len() + reps.len(), points.len());
        for (i, &label) in sol.labels().iter().enumerate() {
            assert_eq!(sol.facilities()[label].representative(), points.state(i).facility.unwrap());
        }
    }

    #[test]
    fn collinear_segments_share_a_facility() {
        let mut points = PointSet::from_segments(&[
            Segment::between("a", [0.0, 0.0], [10.0, 0.0]),
            Segment::between("b", [12.0, 0.0], [22.0, 0.0]),
        ])
        .unwrap();
        let engine = line_engine(15.0, 2.0, 10.0, 1e6);
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 1);
        assert_eq!(sol.facilities()[0].cluster_size(), 2);
        assert_consistent(engine.metric(), &points, &sol);
    }

    #[test]
    fn perpendicular_segments_stay_apart() {
        let mut points = PointSet::from_segments(&[
            Segment::between("a", [0.0, 0.0], [10.0, 0.0]),
            Segment::between("b", [5.0, -1.0], [5.0, 1.0]),
        ])
        .unwrap();
        let engine = line_engine(50.0, 50.0, 5.0, 1e6);
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 2);
        assert_ne!(sol.labels()[0], sol.labels()[1]);
        assert_consistent(engine.metric(), &points, &sol);
    }

    #[test]
    fn single_point_opens_one_facility() {
        let mut points =
            PointSet::from_segments(&[Segment::between("a", [0.0, 0.0], [1.0, 1.0])]).unwrap();
        let engine = line_engine(1.0, 1.0, 5.0, f64::MAX);
        let sol = run(&engine, &mut points);
        assert_eq!(sol.all_facilities(), vec![0]);
        assert!(sol.facilities()[0].is_empty());
        assert_eq!(points.state(0).weighted_distance, 0.0);
        assert_eq!(sol.total_cost(), f64::MAX);
    }

    #[test]
    fn huge_opening_cost_gives_one_cluster() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let mut points = PointSet::from_rows(&rows).unwrap();
        let engine =
            FacilityLocation::new(WeightedEuclidean::new()).with_opening_cost(OpeningCost::Absolute(1e9));
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 1);
        assert_eq!(sol.facilities()[0].len(), 19);
        assert_consistent(engine.metric(), &points, &sol);
    }

    #[test]
    fn zero_opening_cost_makes_singletons_of_distinct_points() {
        let rows: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64]).collect();
        let mut points = PointSet::from_rows(&rows).unwrap();
        let engine =
            FacilityLocation::new(WeightedEuclidean::new()).with_opening_cost(OpeningCost::Absolute(0.0));
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 5);
    }

    #[test]
    fn refinement_moves_points_to_later_facilities() {
        // Greedy in input order opens 0 and 3; point 2 first joins 0 at
        // distance 2, though 3 (opened later) is at distance 1.
        let rows = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let metric = WeightedEuclidean::new();

        let mut greedy_points = PointSet::from_rows(&rows).unwrap();
        let greedy = FacilityLocation::new(&metric)
            .with_opening_cost(OpeningCost::Absolute(2.5))
            .with_refinement_passes(0);
        let g = run(&greedy, &mut greedy_points);
        assert_eq!(g.all_facilities(), vec![0, 3]);
        assert_eq!(greedy_points.state(2).facility, Some(0));

        let mut refined_points = PointSet::from_rows(&rows).unwrap();
        let refined = FacilityLocation::new(&metric)
            .with_opening_cost(OpeningCost::Absolute(2.5))
            .with_refinement_passes(3);
        let r = run(&refined, &mut refined_points);
        assert!(r.total_cost() <= g.total_cost());
        assert_consistent(&metric, &refined_points, &r);
    }

    #[test]
    fn closing_redistributes_members() {
        // The short segment opens first and its buffer cannot hold the long
        // one, so greedy opens both. The long one's buffer holds the short
        // one, and serving it from there is cheaper than a second facility.
        let segments = [
            Segment::between("short", [45.0, 0.0], [55.0, 0.0]),
            Segment::between("long", [0.0, 0.0], [100.0, 0.0]),
        ];
        let mut points = PointSet::from_segments(&segments).unwrap();
        let greedy = line_engine(5.0, 10.0, 5.0, 1000.0).with_refinement_passes(0);
        let g = run(&greedy, &mut points);
        assert_eq!(g.all_facilities(), vec![0, 1]);

        let mut points = PointSet::from_segments(&segments).unwrap();
        let engine = line_engine(5.0, 10.0, 5.0, 1000.0);
        let refined = run(&engine, &mut points);
        assert_eq!(refined.all_facilities(), vec![1]);
        assert_eq!(refined.facilities()[0].members(), &[0]);
        assert!(!points.state(0).is_facility);
        assert!(refined.total_cost() < g.total_cost());
        assert!(refined.passes() >= 1);
        assert_consistent(engine.metric(), &points, &refined);
    }

    #[test]
    fn duplicates_share_a_facility_at_zero_tolerance() {
        let segments = [
            Segment::between("a", [0.74, 2.26], [5.26, 8.98]),
            Segment::between("b", [0.74, 2.26], [5.26, 8.98]),
        ];
        let mut points = PointSet::from_segments(&segments).unwrap();
        let engine = line_engine(0.0, 0.0, 0.0, 1e9);
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 1);
        assert_eq!(sol.facilities()[0].members(), &[1]);
        assert_eq!(points.state(1).weighted_distance, 0.0);
        assert_consistent(engine.metric(), &points, &sol);
    }

    #[test]
    fn closing_respects_feasibility() {
        // Perpendicular segments cannot serve each other, so neither
        // facility may close even with an enormous opening cost.
        let mut points = PointSet::from_segments(&[
            Segment::between("a", [0.0, 0.0], [10.0, 0.0]),
            Segment::between("b", [0.0, 0.0], [0.0, 10.0]),
        ])
        .unwrap();
        let engine = line_engine(100.0, 100.0, 5.0, 1e12).with_refinement_passes(4);
        let sol = run(&engine, &mut points);
        assert_eq!(sol.len(), 2);
        assert_consistent(engine.metric(), &points, &sol);
    }

    #[test]
    fn shuffled_order_is_deterministic() {
        let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![(i * 7 % 13) as f64, (i % 5) as f64]).collect();
        let engine = FacilityLocation::new(WeightedEuclidean::new())
            .with_opening_cost(OpeningCost::Absolute(3.0))
            .with_seed(42);
        let mut a = PointSet::from_rows(&rows).unwrap();
        let mut b = PointSet::from_rows(&rows).unwrap();
        assert_eq!(run(&engine, &mut a), run(&engine, &mut b));
    }

    #[test]
    fn diagonal_fraction_scales_with_extent() {
        let rows = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
        let mut points = PointSet::from_rows(&rows).unwrap();
        let engine = FacilityLocation::new(WeightedEuclidean::new())
            .with_opening_cost(OpeningCost::DiagonalFraction(0.5));
        let sol = run(&engine, &mut points);
        assert_eq!(sol.opening_cost(), 2.5);
        assert_eq!(sol.len(), 2);
    }

    #[test]
    fn configuration_errors_abort_before_clustering() {
        let mut points =
            PointSet::from_segments(&[Segment::between("a", [0.0, 0.0], [1.0, 0.0])]).unwrap();
        let bounds = BoundingBox::from_points(&points);

        let weighted = FacilityLocation::new(
            LineBufferMetric::new(BufferConfig::new(1.0, 1.0, 5.0)).with_coord_weights(vec![1.0; 3]),
        );
        let err = weighted.compute_clustering(&mut points, &bounds).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(points.state(0).facility, None);

        let bad_box = BoundingBox::empty(2);
        let engine = line_engine(1.0, 1.0, 5.0, 1.0);
        assert!(engine.compute_clustering(&mut points, &bad_box).is_err());

        let negative = line_engine(1.0, 1.0, 5.0, -1.0);
        assert!(negative
            .compute_clustering(&mut points, &bounds)
            .unwrap_err()
            .is_configuration());

        let mut empty = PointSet::with_dim(6);
        assert_eq!(
            engine.compute_clustering(&mut empty, &BoundingBox::empty(6)),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn fit_predict_returns_dense_labels() {
        let data = PointSet::from_rows(&[vec![0.0], vec![0.1], vec![10.0], vec![10.1]]).unwrap();
        let engine =
            FacilityLocation::new(WeightedEuclidean::new()).with_opening_cost(OpeningCost::Absolute(1.0));
        let labels = engine.fit_predict(&data).unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert!(labels.iter().all(|&l| l < 2));
        assert_eq!(engine.n_clusters(), 0);
    }

    fn segment() -> impl Strategy<Value = Segment> {
        (0.0f64..100.0, 0.0f64..100.0, 0.0f64..std::f64::consts::PI, 1.0f64..20.0).prop_map(
            |(x, y, angle, len)| {
                Segment::between("s", [x, y], [x + len * angle.cos(), y + len * angle.sin()])
            },
        )
    }

    proptest! {
        #[test]
        fn assignments_are_always_reachable(
            segments in proptest::collection::vec(segment(), 1..40),
            cost in 0.0f64..200.0,
            passes in 0usize..4,
            seed in any::<u64>(),
        ) {
            let mut points = PointSet::from_segments(&segments).unwrap();
            let engine = line_engine(10.0, 5.0, 15.0, cost)
                .with_refinement_passes(passes)
                .with_seed(seed);
            let sol = run(&engine, &mut points);
            assert_consistent(engine.metric(), &points, &sol);

            let greedy = line_engine(10.0, 5.0, 15.0, cost)
                .with_refinement_passes(0)
                .with_seed(seed);
            let mut greedy_points = PointSet::from_segments(&segments).unwrap();
            let g = run(&greedy, &mut greedy_points);
            prop_assert!(sol.total_cost() <= g.total_cost() + 1e-9);
        }
    }
}
