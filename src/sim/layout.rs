//! Target placement
//!
//! Targets are dropped uniformly at random inside the play area. Each new
//! target retries until its bounding box clears every earlier one, giving up
//! after [`PLACEMENT_ATTEMPTS`] and keeping the last candidate. Dense counts
//! therefore overlap; the layout reports which targets were forced.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Target;
use crate::consts::PLACEMENT_ATTEMPTS;

/// Rectangular play area with its target size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    /// Target diameter (bounding box edge)
    pub target_size: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32, target_size: f32) -> Self {
        Self {
            width,
            height,
            target_size,
        }
    }

    /// Largest `left` that keeps a target inside
    #[inline]
    pub fn max_left(&self) -> f32 {
        (self.width - self.target_size).max(0.0)
    }

    /// Largest `top` that keeps a target inside
    #[inline]
    pub fn max_top(&self) -> f32 {
        (self.height - self.target_size).max(0.0)
    }

    /// Whether the target's whole bounding box lies inside the area
    pub fn contains(&self, target: &Target) -> bool {
        (0.0..=self.max_left()).contains(&target.left())
            && (0.0..=self.max_top()).contains(&target.top())
    }

    /// Uniform random top-left corner within bounds
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..=self.max_left()),
            rng.random_range(0.0..=self.max_top()),
        )
    }
}

/// Result of a placement run
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Targets in click order, all `Normal`
    pub targets: Vec<Target>,
    /// Indices placed after exhausting every attempt (may overlap)
    pub forced: Vec<usize>,
}

impl Layout {
    pub fn into_targets(self) -> Vec<Target> {
        self.targets
    }
}

/// Place `count` targets inside `area` using the injected RNG
pub fn generate<R: Rng>(count: usize, area: &PlayArea, rng: &mut R) -> Layout {
    let mut targets: Vec<Target> = Vec::with_capacity(count);
    let mut forced = Vec::new();
    let mut grid = SpatialGrid::new(area);

    for index in 0..count {
        let mut pos = area.random_position(rng);
        let mut attempts = 1;
        while grid.overlaps(pos, &targets) {
            if attempts >= PLACEMENT_ATTEMPTS {
                forced.push(index);
                break;
            }
            pos = area.random_position(rng);
            attempts += 1;
        }
        grid.insert(pos, index);
        targets.push(Target::new(index, pos));
    }

    if !forced.is_empty() {
        log::warn!(
            "{} of {} targets placed with overlap ({}x{} area)",
            forced.len(),
            count,
            area.width,
            area.height
        );
    }

    Layout { targets, forced }
}

#[inline]
fn chebyshev(a: Vec2, b: Vec2) -> f32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// Largest bucket count before the grid collapses to a single bucket
const MAX_GRID_CELLS: usize = 1 << 20;

/// Uniform bucket grid with cells one target wide.
/// Two boxes can only overlap if their corners sit in neighbouring cells.
/// Degenerate sizes use one bucket, which is a plain scan.
struct SpatialGrid {
    cell: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
}

impl SpatialGrid {
    fn new(area: &PlayArea) -> Self {
        let cell = area.target_size;
        let span = |extent: f32| {
            let n = (extent / cell).ceil();
            (n.is_finite() && n >= 1.0).then_some(n as usize)
        };
        let (cols, rows) = match (cell > 0.0 && cell.is_finite())
            .then(|| span(area.width).zip(span(area.height)))
            .flatten()
        {
            Some((cols, rows)) if cols.saturating_mul(rows) <= MAX_GRID_CELLS => (cols, rows),
            _ => (1, 1),
        };
        Self {
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        }
    }

    fn cell_of(&self, pos: Vec2) -> (usize, usize) {
        let cx = ((pos.x / self.cell) as usize).min(self.cols - 1);
        let cy = ((pos.y / self.cell) as usize).min(self.rows - 1);
        (cx, cy)
    }

    fn insert(&mut self, pos: Vec2, index: usize) {
        let (cx, cy) = self.cell_of(pos);
        self.buckets[cy * self.cols + cx].push(index);
    }

    fn overlaps(&self, pos: Vec2, targets: &[Target]) -> bool {
        let (cx, cy) = self.cell_of(pos);
        for y in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
            for x in cx.saturating_sub(1)..=(cx + 1).min(self.cols - 1) {
                let hit = self.buckets[y * self.cols + x]
                    .iter()
                    .any(|&i| chebyshev(targets[i].pos, pos) < self.cell);
                if hit {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TargetState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn default_area() -> PlayArea {
        PlayArea::new(400.0, 300.0, 25.0)
    }

    #[test]
    fn test_indices_in_order_and_normal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let layout = generate(12, &default_area(), &mut rng);
        assert_eq!(layout.targets.len(), 12);
        for (i, target) in layout.targets.iter().enumerate() {
            assert_eq!(target.index, i);
            assert_eq!(target.state, TargetState::Normal);
        }
    }

    #[test]
    fn test_targets_stay_inside_area() {
        let area = default_area();
        let mut rng = Pcg32::seed_from_u64(2);
        let layout = generate(60, &area, &mut rng);
        for target in &layout.targets {
            assert!(area.contains(target), "{:?} escapes the area", target.pos);
            assert!(target.left() + area.target_size <= area.width);
            assert!(target.top() + area.target_size <= area.height);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let area = default_area();
        let a = generate(20, &area, &mut Pcg32::seed_from_u64(42));
        let b = generate(20, &area, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.targets, b.targets);

        let c = generate(20, &area, &mut Pcg32::seed_from_u64(43));
        assert_ne!(a.targets, c.targets);
    }

    #[test]
    fn test_sparse_layout_never_overlaps() {
        let area = default_area();
        let mut rng = Pcg32::seed_from_u64(7);
        let layout = generate(8, &area, &mut rng);
        assert!(layout.forced.is_empty());
        for (i, a) in layout.targets.iter().enumerate() {
            for b in &layout.targets[i + 1..] {
                assert!(a.chebyshev_distance(b) >= area.target_size);
            }
        }
    }

    #[test]
    fn test_dense_layout_reports_forced_overlaps() {
        // Barely room for one target: every later one must be forced
        let area = PlayArea::new(30.0, 30.0, 25.0);
        let mut rng = Pcg32::seed_from_u64(9);
        let layout = generate(6, &area, &mut rng);
        assert_eq!(layout.targets.len(), 6);
        assert_eq!(layout.forced, vec![1, 2, 3, 4, 5]);
        for target in &layout.targets {
            assert!(area.contains(target));
        }
    }

    #[test]
    fn test_area_exactly_one_target_wide() {
        let area = PlayArea::new(25.0, 25.0, 25.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let layout = generate(3, &area, &mut rng);
        assert!(layout.targets.iter().all(|t| t.pos == Vec2::ZERO));
        assert_eq!(layout.forced, vec![1, 2]);
    }

    #[test]
    fn test_degenerate_target_size() {
        // Zero size never overlaps; non-finite sizes pin targets to the corner
        let area = PlayArea::new(400.0, 300.0, 0.0);
        let layout = generate(3, &area, &mut Pcg32::seed_from_u64(1));
        assert_eq!(layout.targets.len(), 3);
        assert!(layout.forced.is_empty());
        assert!(layout.targets.iter().all(|t| area.contains(t)));

        for size in [f32::NAN, f32::INFINITY, -5.0] {
            let area = PlayArea::new(400.0, 300.0, size);
            let layout = generate(4, &area, &mut Pcg32::seed_from_u64(2));
            assert_eq!(layout.targets.len(), 4);
        }
    }

    #[test]
    fn test_zero_count() {
        let mut rng = Pcg32::seed_from_u64(0);
        let layout = generate(0, &default_area(), &mut rng);
        assert!(layout.targets.is_empty());
        assert!(layout.forced.is_empty());
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let area = default_area();
        let mut rng = Pcg32::seed_from_u64(11);
        let layout = generate(150, &area, &mut rng);

        let mut grid = SpatialGrid::new(&area);
        for t in &layout.targets {
            grid.insert(t.pos, t.index);
        }
        for _ in 0..500 {
            let probe = area.random_position(&mut rng);
            let brute = layout
                .targets
                .iter()
                .any(|t| chebyshev(t.pos, probe) < area.target_size);
            assert_eq!(grid.overlaps(probe, &layout.targets), brute);
        }
    }
}
