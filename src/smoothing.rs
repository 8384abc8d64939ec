//! Single-pass cleanup of abrupt category jumps in a classified grid.

use tracing::debug;

use crate::terrain::{TerrainCategory, TerrainGrid, CATEGORY_COUNT};

/// Neighbors that must agree before the general rule nudges a cell.
const MAJORITY_THRESHOLD: usize = 5;

/// Water bodies and peaks are never altered.
fn is_fixed(category: TerrainCategory) -> bool {
    category.is_water() || category == TerrainCategory::Mountain
}

/// Run one smoothing pass and return the new grid.
///
/// Border cells are left as they are. Every decision reads the input grid,
/// so no cell sees a neighbor already rewritten in the same pass.
pub fn smooth(grid: &TerrainGrid) -> TerrainGrid {
    let mut smoothed = grid.clone();
    if grid.width < 3 || grid.height < 3 {
        return smoothed;
    }

    let mut changed = 0usize;
    for y in 1..grid.height - 1 {
        for x in 1..grid.width - 1 {
            if let Some(next) = smooth_cell(grid, x, y) {
                smoothed.set(x, y, next);
                changed += 1;
            }
        }
    }

    debug!(changed, "terrain smoothing pass");
    smoothed
}

/// New category for an interior cell, or `None` to keep it.
fn smooth_cell(grid: &TerrainGrid, x: usize, y: usize) -> Option<TerrainCategory> {
    let current = *grid.get(x, y);
    if is_fixed(current) {
        return None;
    }

    let mut counts = [0usize; CATEGORY_COUNT];
    for (nx, ny) in grid.neighbors_8(x, y) {
        counts[grid.get(nx, ny).rank() as usize] += 1;
    }

    // Grass next to any mountain becomes a foothill ring.
    if current == TerrainCategory::Grass && counts[TerrainCategory::Mountain.rank() as usize] > 0 {
        return Some(TerrainCategory::Hills);
    }

    let (majority, count) = majority(&counts)?;
    if count < MAJORITY_THRESHOLD || majority == current || current.rank_distance(majority) <= 1 {
        return None;
    }

    // One rank toward the majority, never straight onto it.
    let next_rank = if current.rank() > majority.rank() {
        current.rank() - 1
    } else {
        current.rank() + 1
    };
    TerrainCategory::from_rank(next_rank)
}

/// Most frequent category; ties go to the lower rank.
fn majority(counts: &[usize; CATEGORY_COUNT]) -> Option<(TerrainCategory, usize)> {
    let mut best: Option<(TerrainCategory, usize)> = None;
    for (category, &count) in TerrainCategory::ALL.iter().zip(counts) {
        if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((*category, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use TerrainCategory::*;

    fn random_grid(rng: &mut ChaCha8Rng, width: usize, height: usize) -> TerrainGrid {
        TerrainGrid::from_fn(width, height, |_, _| {
            TerrainCategory::ALL[rng.gen_range(0..CATEGORY_COUNT)]
        })
    }

    #[test]
    fn test_mountain_range_gets_foothills() {
        let mut grid = TerrainGrid::new_with(10, 10, Grass);
        for x in 3..7 {
            grid.set(x, 5, Mountain);
        }

        let smoothed = smooth(&grid);
        for x in 3..7 {
            assert_eq!(*smoothed.get(x, 4), Hills, "above mountain at x={x}");
            assert_eq!(*smoothed.get(x, 6), Hills, "below mountain at x={x}");
            assert_eq!(*smoothed.get(x, 5), Mountain);
        }
        // Diagonal contact counts as adjacency.
        assert_eq!(*smoothed.get(2, 4), Hills);
        assert_eq!(*smoothed.get(1, 1), Grass);
    }

    #[test]
    fn test_isolated_cell_moves_one_rank() {
        let mut grid = TerrainGrid::new_with(3, 3, Sand);
        grid.set(1, 1, Rock);
        let smoothed = smooth(&grid);
        assert_eq!(*smoothed.get(1, 1), Hills);

        let mut grid = TerrainGrid::new_with(3, 3, Rock);
        grid.set(1, 1, Sand);
        let smoothed = smooth(&grid);
        assert_eq!(*smoothed.get(1, 1), Grass);
    }

    #[test]
    fn test_close_ranks_are_kept() {
        let mut grid = TerrainGrid::new_with(3, 3, Hills);
        grid.set(1, 1, Grass);
        assert_eq!(*smooth(&grid).get(1, 1), Grass);
    }

    #[test]
    fn test_weak_majority_is_ignored() {
        // Four rock neighbors are not enough to move the sand cell.
        let mut grid = TerrainGrid::new_with(3, 3, Sand);
        grid.set(1, 1, Sand);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1)] {
            grid.set(x, y, Rock);
        }
        assert_eq!(*smooth(&grid).get(1, 1), Sand);
    }

    #[test]
    fn test_fixed_categories_and_borders() {
        for fixed in [DeepWater, ShallowWater, Mountain] {
            let mut grid = TerrainGrid::new_with(3, 3, Rock);
            grid.set(1, 1, fixed);
            assert_eq!(*smooth(&grid).get(1, 1), fixed);
        }

        // A border grass cell next to a mountain stays grass.
        let mut grid = TerrainGrid::new_with(4, 4, Grass);
        grid.set(1, 1, Mountain);
        let smoothed = smooth(&grid);
        assert_eq!(*smoothed.get(0, 0), Grass);
        assert_eq!(*smoothed.get(2, 2), Hills);
    }

    #[test]
    fn test_tiny_grids_unchanged() {
        let grid = TerrainGrid::from_fn(2, 5, |x, _| if x == 0 { Grass } else { Mountain });
        assert_eq!(smooth(&grid), grid);
    }

    #[test]
    fn test_invariants_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let grid = random_grid(&mut rng, 16, 12);
            let smoothed = smooth(&grid);

            for (x, y, &before) in grid.iter() {
                let after = *smoothed.get(x, y);
                if is_fixed(before) {
                    assert_eq!(after, before);
                }
                let interior = x > 0 && y > 0 && x < grid.width - 1 && y < grid.height - 1;
                if !interior {
                    assert_eq!(after, before);
                    continue;
                }
                let near_mountain = grid
                    .neighbors_8(x, y)
                    .into_iter()
                    .any(|(nx, ny)| *grid.get(nx, ny) == Mountain);
                if before == Grass && near_mountain {
                    assert_eq!(after, Hills);
                }
                assert!(before.rank_distance(after) <= 1);
            }
        }
    }
}
