
use smallvec::SmallVec;

use crate::{
    boundary::SearchWindow,
    cost::{BlockCost, MAX_COST, SubsamplePattern},
    mv::{BlockMatch, MotionVector},
};

/// Offsets of the eight neighbours of a vector, in raster order.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The vector a search starts from: `start` if the window allows it, the zero vector otherwise.
fn seed(window: &SearchWindow, start: MotionVector) -> MotionVector {
    if window.is_valid(start) {
        start
    } else {
        MotionVector::zero()
    }
}

/// Vectors on the grid of spacing `stride` whose larger absolute component is `distance`,
/// in raster order.
fn ring(distance: i32, stride: i32) -> impl Iterator<Item = MotionVector> {
    let stride = stride as usize;
    (-distance..=distance).step_by(stride).flat_map(move |y| {
        // on the top and bottom edges every column, in between only the two sides
        let inner_step = if y.abs() == distance {
            stride
        } else {
            2 * distance as usize
        };
        (-distance..=distance)
            .step_by(inner_step)
            .map(move |x| MotionVector::new(y, x))
    })
}

/// Scores `mv` and keeps it if it beats `best`. Returns whether a perfect match has been found.
fn consider<C: BlockCost + ?Sized>(cost: &C, mv: MotionVector, best: &mut BlockMatch) -> bool {
    let diff = cost.error(mv, best.cost);
    if diff < best.cost {
        *best = BlockMatch { mv, cost: diff };
    }
    best.cost == 0
}

/// Exhaustive search of every candidate in the window.
///
/// Tries `start` first, then square rings around the zero vector from the
/// centre outwards. The result only moves away from `start` for a cost
/// strictly below `best_so_far`; if nothing gets there, `start` comes back with
/// `best_so_far` as its cost.
pub fn local_search<C: BlockCost + ?Sized>(
    cost: &C,
    window: &SearchWindow,
    start: MotionVector,
    best_so_far: i32,
) -> BlockMatch {
    let start = seed(window, start);
    let mut best = BlockMatch {
        mv: start,
        cost: best_so_far,
    };
    if consider(cost, start, &mut best) {
        return best;
    }

    let step = window.step();
    for distance in (0..=window.range()).step_by(step as usize) {
        for mv in ring(distance, step) {
            if mv == start || !window.is_candidate(mv) {
                continue;
            }
            if consider(cost, mv, &mut best) {
                return best;
            }
        }
    }

    debug_assert!(window.is_valid(best.mv));
    best
}

/// Logarithmic search, halving the pattern spacing every round.
///
/// Starts at the zero vector with a spacing of about half the search range.
/// Each round moves to the best of the eight neighbours at the current spacing,
/// until a round at the step size has run. `start` is compared last.
pub fn logarithmic_search<C: BlockCost + ?Sized>(
    cost: &C,
    window: &SearchWindow,
    start: MotionVector,
) -> BlockMatch {
    let step = window.step();
    let mut best = BlockMatch {
        mv: MotionVector::zero(),
        cost: cost.error(MotionVector::zero(), MAX_COST),
    };

    let mut spacing = align_to_step((window.range() + 1) / 2, step);
    loop {
        let center = best.mv;
        for (dy, dx) in NEIGHBORS {
            let mv = center + MotionVector::new(dy * spacing, dx * spacing);
            if window.is_candidate(mv) {
                consider(cost, mv, &mut best);
            }
        }

        if spacing <= step {
            break;
        }
        spacing = align_to_step((spacing + 1) / 2, step);
    }

    let start = seed(window, start);
    if start != best.mv {
        consider(cost, start, &mut best);
    }

    debug_assert!(window.is_valid(best.mv));
    best
}

/// Rounds `spacing` down to a whole number of steps, never below one step.
fn align_to_step(spacing: i32, step: i32) -> i32 {
    (spacing / step * step).max(step)
}

/// Subsampled search over four interleaved grids.
///
/// Each grid has spacing `2 * step` and is offset by its pattern's phase, so
/// together they cover every step-aligned vector in range. A grid is scored
/// with its own quarter of the block; the four grid winners and `start` are
/// then compared on the full block.
pub fn subsample_search<C: BlockCost + ?Sized>(
    cost: &C,
    window: &SearchWindow,
    start: MotionVector,
) -> BlockMatch {
    let step = window.step();
    let spacing = 2 * step;
    let range = window.range();

    let mut finalists: SmallVec<[MotionVector; 4]> = SmallVec::new();
    for pattern in SubsamplePattern::ALL {
        let (row_phase, col_phase) = pattern.phase();
        let first_y = -range + (row_phase as i32 * step + range).rem_euclid(spacing);
        let first_x = -range + (col_phase as i32 * step + range).rem_euclid(spacing);

        let mut grid_best: Option<MotionVector> = None;
        let mut grid_cost = MAX_COST;
        for y in (first_y..=range).step_by(spacing as usize) {
            for x in (first_x..=range).step_by(spacing as usize) {
                let mv = MotionVector::new(y, x);
                if !window.is_candidate(mv) {
                    continue;
                }
                let diff = cost.subsampled_error(mv, pattern, grid_cost);
                if diff < grid_cost {
                    grid_cost = diff;
                    grid_best = Some(mv);
                }
            }
        }
        finalists.extend(grid_best);
    }

    let mut best = BlockMatch {
        mv: MotionVector::zero(),
        cost: MAX_COST,
    };
    for mv in finalists {
        consider(cost, mv, &mut best);
    }
    consider(cost, seed(window, start), &mut best);

    debug_assert!(window.is_valid(best.mv));
    best
}

/// Two-level search: a coarse pass on a grid of twice the step size, then the
/// eight neighbours of the coarse winner.
///
/// Like [`local_search`], `start` is tried first and the result only moves for
/// a cost strictly below `best_so_far`.
pub fn two_level_search<C: BlockCost + ?Sized>(
    cost: &C,
    window: &SearchWindow,
    start: MotionVector,
    best_so_far: i32,
) -> BlockMatch {
    let start = seed(window, start);
    let mut best = BlockMatch {
        mv: start,
        cost: best_so_far,
    };
    if consider(cost, start, &mut best) {
        return best;
    }

    let step = window.step();
    let coarse = 2 * step;
    for distance in (0..=window.range()).step_by(coarse as usize) {
        for mv in ring(distance, coarse) {
            if mv == start || !window.is_candidate(mv) {
                continue;
            }
            if consider(cost, mv, &mut best) {
                return best;
            }
        }
    }

    let center = best.mv;
    for (dy, dx) in NEIGHBORS {
        let mv = center + MotionVector::new(dy * step, dx * step);
        if mv == start || !window.is_candidate(mv) {
            continue;
        }
        if consider(cost, mv, &mut best) {
            return best;
        }
    }

    debug_assert!(window.is_valid(best.mv));
    best
}
