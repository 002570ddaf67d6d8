
use crate::{
    cost::{BlockCost, InterpolatedError, MAX_COST},
    frame::{BlockPos, LumBlock, ReferenceFrame},
    motion_search::MotionSearch,
    mv::{BlockMatch, MotionVector},
    params::BMotionType,
};

/// Prediction chosen for a B-frame macroblock.
///
/// Both vectors are always filled in; `mode` says which of them the
/// prediction uses, and `cost` is the error of that prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BMotion {
    pub mode: BMotionType,
    pub forward: MotionVector,
    pub backward: MotionVector,
    pub cost: i32,
}

/// A forward and backward vector pair and the error of their average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interpolation {
    forward: MotionVector,
    backward: MotionVector,
    cost: i32,
}

impl BMotion {
    /// Interpolation wins ties against either direction, forward wins ties against backward.
    fn choose(forward: BlockMatch, backward: BlockMatch, interp: Interpolation) -> Self {
        if interp.cost <= forward.cost && interp.cost <= backward.cost {
            BMotion {
                mode: BMotionType::INTERPOLATE,
                forward: interp.forward,
                backward: interp.backward,
                cost: interp.cost,
            }
        } else if forward.cost <= backward.cost {
            BMotion {
                mode: BMotionType::FORWARD,
                forward: forward.mv,
                backward: backward.mv,
                cost: forward.cost,
            }
        } else {
            BMotion {
                mode: BMotionType::BACKWARD,
                forward: forward.mv,
                backward: backward.mv,
                cost: backward.cost,
            }
        }
    }

    pub(crate) const fn backward_only(backward: BlockMatch) -> Self {
        BMotion {
            mode: BMotionType::BACKWARD,
            forward: MotionVector::zero(),
            backward: backward.mv,
            cost: backward.cost,
        }
    }
}

/// Best single-direction match within the B-frame search range.
fn directional(
    search: &MotionSearch,
    block: &LumBlock,
    reference: &ReferenceFrame,
    pos: BlockPos,
) -> BlockMatch {
    search.directional_search(block, reference, pos, MotionVector::zero(), search.range_b())
}

fn interpolation_cost(
    block: &LumBlock,
    prev: &ReferenceFrame,
    next: &ReferenceFrame,
    pos: BlockPos,
    forward: MotionVector,
    backward: MotionVector,
) -> i32 {
    let partner = prev.motion_block(pos, forward);
    InterpolatedError::new(block, &partner, next, pos).error(backward, MAX_COST)
}

/// Forward and backward searched once each, then averaged.
pub(crate) fn simple(
    search: &MotionSearch,
    block: &LumBlock,
    prev: &ReferenceFrame,
    next: &ReferenceFrame,
    pos: BlockPos,
) -> BMotion {
    let forward = directional(search, block, prev, pos);
    let backward = directional(search, block, next, pos);
    let interp = Interpolation {
        forward: forward.mv,
        backward: backward.mv,
        cost: interpolation_cost(block, prev, next, pos, forward.mv, backward.mv),
    };
    BMotion::choose(forward, backward, interp)
}

/// Like [`simple`], then each direction is searched again with the other one's
/// prediction held fixed as the interpolation partner.
pub(crate) fn cross2(
    search: &MotionSearch,
    block: &LumBlock,
    prev: &ReferenceFrame,
    next: &ReferenceFrame,
    pos: BlockPos,
) -> BMotion {
    let forward = directional(search, block, prev, pos);
    let backward = directional(search, block, next, pos);

    // best backward half given the forward winner
    let forward_pred = prev.motion_block(pos, forward.mv);
    let cost = InterpolatedError::new(block, &forward_pred, next, pos);
    let window = search.b_window(next, pos);
    let refined_backward = search.find_best_match(&cost, &window, backward.mv, MAX_COST);

    // best forward half given the backward winner
    let backward_pred = next.motion_block(pos, backward.mv);
    let cost = InterpolatedError::new(block, &backward_pred, prev, pos);
    let window = search.b_window(prev, pos);
    let refined_forward = search.find_best_match(&cost, &window, forward.mv, MAX_COST);

    let interp = if refined_backward.cost <= refined_forward.cost {
        Interpolation {
            forward: forward.mv,
            backward: refined_backward.mv,
            cost: refined_backward.cost,
        }
    } else {
        Interpolation {
            forward: refined_forward.mv,
            backward: backward.mv,
            cost: refined_forward.cost,
        }
    };
    BMotion::choose(forward, backward, interp)
}

/// Every forward candidate is paired with its best backward partner.
///
/// Very slow: one backward search per forward candidate, each pruned by the
/// best interpolation found so far.
pub(crate) fn exhaustive(
    search: &MotionSearch,
    block: &LumBlock,
    prev: &ReferenceFrame,
    next: &ReferenceFrame,
    pos: BlockPos,
) -> BMotion {
    let forward = directional(search, block, prev, pos);
    let backward = directional(search, block, next, pos);

    let forward_window = search.b_window(prev, pos);
    let backward_window = search.b_window(next, pos);
    let step = forward_window.step();
    let range = forward_window.range();

    let mut best = Interpolation {
        forward: forward.mv,
        backward: backward.mv,
        cost: MAX_COST,
    };
    for y in (-range..=range).step_by(step as usize) {
        for x in (-range..=range).step_by(step as usize) {
            let candidate = MotionVector::new(y, x);
            if !forward_window.is_candidate(candidate) {
                continue;
            }
            let partner = prev.motion_block(pos, candidate);
            let cost = InterpolatedError::new(block, &partner, next, pos);
            let result = search.find_best_match(&cost, &backward_window, backward.mv, best.cost);
            if result.cost < best.cost {
                best = Interpolation {
                    forward: candidate,
                    backward: result.mv,
                    cost: result.cost,
                };
            }
        }
    }

    BMotion::choose(forward, backward, best)
}
