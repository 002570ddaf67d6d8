#![allow(clippy::unwrap_used, reason = "allow in test files")]

use parameterized::parameterized;

use super::*;
use crate::{
    boundary::SearchRange,
    cost::LumMotionError,
    tests::{random_frame, shifted_frame},
};

fn exhaustive() -> MotionSearch {
    MotionSearch::new(Some("EXHAUSTIVE"), None, None, None, None).unwrap()
}

#[test]
fn defaults() {
    let search = MotionSearch::default();
    assert_eq!(search.p_search_name(), "LOGARITHMIC");
    assert_eq!(search.b_search_name(), "CROSS2");
    assert_eq!(search.range_p(), 20);
    assert_eq!(search.range_b(), 20);
    assert_eq!(search.pixel_search(), PixelSearch::Half);
    assert_eq!(MotionSearch::new(None, None, None, None, None).unwrap(), search);
}

#[test]
fn new_applies_every_argument() {
    let search =
        MotionSearch::new(Some("twolevel"), Some("simple"), Some(7), Some(512), Some("full"))
            .unwrap();
    assert_eq!(search.p_search_alg(), PSearchAlgorithm::TwoLevel);
    assert_eq!(search.b_search_alg(), BSearchAlgorithm::Simple);
    assert_eq!(search.range_p(), 14);
    assert_eq!(search.range_b(), 1024);
    assert_eq!(search.pixel_search(), PixelSearch::Full);
}

#[parameterized(
    psearch = { Some("DIAMOND"), None, None, None, None },
    bsearch = { None, Some("TWOLEVEL"), None, None, None },
    range_p = { None, None, Some(0), None, None },
    range_b = { None, None, None, Some(513), None },
    pixel = { None, None, None, None, Some("QUARTER") },
)]
fn new_rejects_invalid_arguments(
    psearch: Option<&str>,
    bsearch: Option<&str>,
    range_p: Option<i64>,
    range_b: Option<i64>,
    pixel: Option<&str>,
) {
    assert!(MotionSearch::new(psearch, bsearch, range_p, range_b, pixel).is_err());
}

#[test]
fn set_p_search_alg_reports_name() {
    let mut search = MotionSearch::default();
    search.set_p_search_alg("logarithmic").unwrap();
    assert_eq!(search.p_search_name(), "LOGARITHMIC");
    search.set_p_search_alg("SubSample").unwrap();
    assert_eq!(search.p_search_name(), "SUBSAMPLE");
}

#[test]
fn unknown_names_keep_the_current_mode() {
    let mut search = MotionSearch::default();
    search.set_p_search_alg("TWOLEVEL").unwrap();
    search.set_b_search_alg("SIMPLE").unwrap();
    search.set_pixel_search("FULL").unwrap();

    let err = search.set_p_search_alg("SPIRAL").unwrap_err();
    assert!(err.to_string().contains("SPIRAL"));
    assert!(search.set_b_search_alg("SUBSAMPLE").is_err());
    assert!(search.set_pixel_search("").is_err());

    assert_eq!(search.p_search_name(), "TWOLEVEL");
    assert_eq!(search.b_search_name(), "SIMPLE");
    assert_eq!(search.pixel_search(), PixelSearch::Full);
}

#[test]
fn set_search_range_is_all_or_nothing() {
    let mut search = MotionSearch::default();
    search.set_search_range(3, 5).unwrap();
    assert_eq!((search.range_p(), search.range_b()), (6, 10));

    let err = search.set_search_range(4, 600).unwrap_err();
    assert!(err.to_string().contains("RANGE_B"));
    assert!(search.set_search_range(0, 4).is_err());
    assert_eq!((search.range_p(), search.range_b()), (6, 10));
}

#[test]
fn find_best_match_dispatches_on_the_p_algorithm() {
    let current = random_frame(64, 64, 21);
    let reference = ReferenceFrame::new(random_frame(64, 64, 22));
    let pos = BlockPos::from_macroblock(1, 2);
    let block = current.block(pos).unwrap();
    let cost = LumMotionError::new(&block, &reference, pos);
    let window = SearchWindow::for_block(reference.frame(), pos, PixelSearch::Half, 8);
    let start = MotionVector::new(1, -1);

    let mut search = MotionSearch::default();
    for alg in PSearchAlgorithm::ALL {
        search.set_p_search_alg(alg.name()).unwrap();
        let expected = match alg {
            PSearchAlgorithm::Subsample => subsample_search(&cost, &window, start),
            PSearchAlgorithm::Exhaustive => local_search(&cost, &window, start, MAX_COST),
            PSearchAlgorithm::Logarithmic => logarithmic_search(&cost, &window, start),
            PSearchAlgorithm::TwoLevel => two_level_search(&cost, &window, start, MAX_COST),
        };
        assert_eq!(search.find_best_match(&cost, &window, start, MAX_COST), expected, "{alg}");
    }
}

#[test]
fn windows_use_their_own_ranges() {
    let reference = ReferenceFrame::new(random_frame(64, 48, 3));
    let pos = BlockPos::from_macroblock(1, 1);
    let mut search = exhaustive();
    search.set_search_range(2, 9).unwrap();
    search.set_pixel_search("FULL").unwrap();

    let p = search.p_window(&reference, pos);
    let b = search.b_window(&reference, pos);
    assert_eq!((p.range(), b.range()), (4, 18));
    assert_eq!(p.step(), 2);
    assert_eq!(
        p.bounds(),
        SearchRange::for_frame(pos, PixelSearch::Full, reference.frame())
    );
}

#[test]
fn p_motion_search_recovers_a_shift() {
    let prev = random_frame(64, 48, 5);
    let current = shifted_frame(&prev, 2, -1);
    let prev = ReferenceFrame::new(prev);
    let pos = BlockPos::from_macroblock(1, 1);
    let block = current.block(pos).unwrap();

    let found = exhaustive().p_motion_search(&block, &prev, pos, MotionVector::zero());
    assert_eq!(found, BlockMatch {
        mv: MotionVector::new(-4, 2),
        cost: 0,
    });
}

#[test]
fn b_search_without_prev_is_backward_only() {
    let next = random_frame(64, 48, 6);
    let current = shifted_frame(&next, -1, 1);
    let next = ReferenceFrame::new(next);
    let pos = BlockPos::from_macroblock(1, 1);
    let block = current.block(pos).unwrap();

    for alg in BSearchAlgorithm::ALL {
        let mut search = exhaustive();
        search.set_b_search_alg(alg.name()).unwrap();
        let motion = search.b_motion_search(&block, None, &next, pos);
        assert_eq!(motion.mode, BMotionType::BACKWARD, "{alg}");
        assert_eq!(motion.forward, MotionVector::zero());
        assert_eq!(motion.backward, MotionVector::new(2, -2));
        assert_eq!(motion.cost, 0);
    }
}

#[test]
fn b_search_uses_the_b_range() {
    let next = random_frame(64, 48, 7);
    let current = shifted_frame(&next, 0, 3);
    let next = ReferenceFrame::new(next);
    let pos = BlockPos::from_macroblock(1, 1);
    let block = current.block(pos).unwrap();

    let mut search = exhaustive();
    search.set_search_range(1, 4).unwrap();
    let motion = search.b_motion_search(&block, None, &next, pos);
    assert_eq!(motion.backward, MotionVector::new(0, -6));
    assert_eq!(motion.cost, 0);

    // out of reach within the P range
    let p = search.p_motion_search(&block, &next, pos, MotionVector::zero());
    assert!(p.cost > 0);
}

#[test]
fn estimate_p_frame_is_raster_ordered() {
    let prev = random_frame(64, 48, 8);
    let current = shifted_frame(&prev, 1, 1);
    let reference = ReferenceFrame::new(prev);
    let search = exhaustive();

    let matches = search.estimate_p_frame(&current, &reference).unwrap();
    assert_eq!(matches.len(), 4 * 3);
    for (i, found) in matches.iter().enumerate() {
        let pos = BlockPos::from_macroblock(i / 4, i % 4);
        let block = current.block(pos).unwrap();
        let expected = search.p_motion_search(&block, &reference, pos, MotionVector::zero());
        assert_eq!(*found, expected, "macroblock {i}");
    }
    // an interior macroblock sees the whole shift
    assert_eq!(matches[5].mv, MotionVector::new(-2, -2));
    assert_eq!(matches[5].cost, 0);
}

#[test]
fn estimate_rejects_mismatched_frames() {
    let current = random_frame(64, 48, 9);
    let other = ReferenceFrame::new(random_frame(48, 48, 10));
    let same = ReferenceFrame::new(random_frame(64, 48, 11));
    let search = MotionSearch::default();

    let err = search.estimate_p_frame(&current, &other).unwrap_err();
    assert!(err.to_string().contains("48x48"));
    assert!(search.estimate_b_frame(&current, None, &other).is_err());
    assert!(search.estimate_b_frame(&current, Some(&other), &same).is_err());
    assert!(search.estimate_b_frame(&current, Some(&same), &same).is_ok());
}

#[test]
fn estimate_b_frame_without_prev() {
    let next = random_frame(32, 32, 12);
    let current = random_frame(32, 32, 13);
    let next = ReferenceFrame::new(next);

    let motions = MotionSearch::default()
        .estimate_b_frame(&current, None, &next)
        .unwrap();
    assert_eq!(motions.len(), 4);
    assert!(motions.iter().all(|m| m.mode == BMotionType::BACKWARD));
    assert!(motions.iter().all(|m| m.forward == MotionVector::zero()));
}
