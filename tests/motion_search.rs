mod common;

use anyhow::Result;
use common::*;
use mpeg_motion_search::{
    BMotionType,
    BSearchAlgorithm,
    BlockPos,
    MotionSearch,
    MotionVector,
    PSearchAlgorithm,
    PixelSearch,
    ReferenceFrame,
    boundary::SearchRange,
};

fn pan(speed_x: i32, speed_y: i32) -> TestClipConfig {
    TestClipConfig {
        width: 96,
        height: 80,
        length: 3,
        content_type: ClipContentType::Pan { speed_x, speed_y },
    }
}

fn search(psearch: PSearchAlgorithm, pixel: PixelSearch) -> Result<MotionSearch> {
    MotionSearch::new(
        Some(psearch.name()),
        None,
        Some(4),
        Some(4),
        Some(pixel.name()),
    )
}

#[test]
fn test_pan_is_found_by_exact_searches() -> Result<()> {
    let frames = pan(2, -1).frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let current = &frames[1];
    let expected = MotionVector::new(2, -4);

    // the coarse grid of a full-pel two-level search steps over odd pixel offsets
    for (psearch, pixel) in [
        (PSearchAlgorithm::Exhaustive, PixelSearch::Full),
        (PSearchAlgorithm::Exhaustive, PixelSearch::Half),
        (PSearchAlgorithm::Subsample, PixelSearch::Full),
        (PSearchAlgorithm::Subsample, PixelSearch::Half),
        (PSearchAlgorithm::TwoLevel, PixelSearch::Half),
    ] {
        let matches = search(psearch, pixel)?.estimate_p_frame(current, &prev)?;
        for (i, _) in interior_macroblocks(current) {
            assert_eq!(matches[i].mv, expected, "{psearch} {pixel} macroblock {i}");
            assert_eq!(matches[i].cost, 0, "{psearch} {pixel} macroblock {i}");
        }
    }
    Ok(())
}

#[test]
fn test_static_scene_gives_zero_vectors() -> Result<()> {
    let frame = TestClipConfig {
        width: 64,
        height: 48,
        length: 1,
        content_type: ClipContentType::Noise { seed: 77 },
    }
    .frame(0);
    let reference = ReferenceFrame::new(frame.clone());

    for psearch in PSearchAlgorithm::ALL {
        let matches = search(psearch, PixelSearch::Half)?.estimate_p_frame(&frame, &reference)?;
        assert_eq!(matches.len(), 12);
        for found in matches {
            assert_eq!(found.mv, MotionVector::zero(), "{psearch}");
            assert_eq!(found.cost, 0, "{psearch}");
        }
    }
    Ok(())
}

#[test]
fn test_blank_frames_cost_nothing() -> Result<()> {
    let config = TestClipConfig {
        width: 48,
        height: 48,
        length: 2,
        content_type: ClipContentType::Blank,
    };
    let frames = config.frames();
    let prev = ReferenceFrame::new(frames[0].clone());

    for psearch in PSearchAlgorithm::ALL {
        let matches = search(psearch, PixelSearch::Half)?.estimate_p_frame(&frames[1], &prev)?;
        assert!(matches.iter().all(|m| m.cost == 0), "{psearch}");
    }
    Ok(())
}

#[test]
fn test_vectors_stay_in_the_frame() -> Result<()> {
    let config = TestClipConfig {
        width: 80,
        height: 64,
        length: 2,
        content_type: ClipContentType::MovingBox {
            speed_x: 3,
            speed_y: -2,
        },
    };
    let frames = config.frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let current = &frames[1];

    for pixel in [PixelSearch::Full, PixelSearch::Half] {
        for psearch in PSearchAlgorithm::ALL {
            let mut searcher = search(psearch, pixel)?;
            searcher.set_search_range(12, 12)?;
            let matches = searcher.estimate_p_frame(current, &prev)?;
            for (i, found) in matches.iter().enumerate() {
                let pos = BlockPos::from_macroblock(i / current.mb_cols(), i % current.mb_cols());
                let bounds = SearchRange::for_frame(pos, pixel, current);
                assert!(bounds.contains(found.mv), "{psearch} {pixel} {found:?}");
                assert_eq!(found.mv.y % pixel.step_size(), 0);
                assert_eq!(found.mv.x % pixel.step_size(), 0);
                assert!(found.mv.y.abs() <= 24 && found.mv.x.abs() <= 24);
            }
        }
    }
    Ok(())
}

#[test]
fn test_exhaustive_is_never_beaten() -> Result<()> {
    let config = TestClipConfig {
        width: 64,
        height: 64,
        length: 2,
        content_type: ClipContentType::MovingBox {
            speed_x: -1,
            speed_y: 2,
        },
    };
    let frames = config.frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let current = &frames[1];

    let best = search(PSearchAlgorithm::Exhaustive, PixelSearch::Half)?
        .estimate_p_frame(current, &prev)?;
    for psearch in PSearchAlgorithm::ALL {
        let other = search(psearch, PixelSearch::Half)?.estimate_p_frame(current, &prev)?;
        for (exact, found) in best.iter().zip(&other) {
            assert!(exact.cost <= found.cost, "{psearch}: {exact:?} vs {found:?}");
        }
    }
    Ok(())
}

#[test]
fn test_logarithmic_is_no_worse_than_standing_still() -> Result<()> {
    let config = TestClipConfig {
        width: 64,
        height: 48,
        length: 2,
        content_type: ClipContentType::Gradient,
    };
    let frames = config.frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let current = &frames[1];

    let matches = search(PSearchAlgorithm::Logarithmic, PixelSearch::Half)?
        .estimate_p_frame(current, &prev)?;
    for (i, found) in matches.iter().enumerate() {
        let pos = BlockPos::from_macroblock(i / current.mb_cols(), i % current.mb_cols());
        let block = current.block(pos)?;
        let zero_cost = block
            .samples()
            .iter()
            .zip(prev.frame().block(pos)?.samples())
            .map(|(&a, &b)| i32::from(a.abs_diff(b)))
            .sum::<i32>();
        assert!(found.cost <= zero_cost, "macroblock {i}");
    }
    Ok(())
}

#[test]
fn test_b_frame_between_two_pans_interpolates() -> Result<()> {
    let frames = pan(1, 1).frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let next = ReferenceFrame::new(frames[2].clone());
    let current = &frames[1];

    for bsearch in BSearchAlgorithm::ALL {
        let mut searcher = search(PSearchAlgorithm::Exhaustive, PixelSearch::Half)?;
        searcher.set_b_search_alg(bsearch.name())?;
        searcher.set_search_range(4, 2)?;
        let motions = searcher.estimate_b_frame(current, Some(&prev), &next)?;
        for (i, _) in interior_macroblocks(current) {
            let motion = motions[i];
            assert_eq!(motion.mode, BMotionType::INTERPOLATE, "{bsearch} macroblock {i}");
            assert_eq!(motion.cost, 0);
        }
    }
    Ok(())
}

#[test]
fn test_scene_cut_predicts_backward() -> Result<()> {
    let before = TestClipConfig {
        width: 48,
        height: 48,
        length: 1,
        content_type: ClipContentType::Noise { seed: 5 },
    }
    .frame(0);
    let after = TestClipConfig {
        width: 48,
        height: 48,
        length: 1,
        content_type: ClipContentType::Checkerboard,
    }
    .frame(0);
    let prev = ReferenceFrame::new(before);
    let next = ReferenceFrame::new(after.clone());

    let motions = MotionSearch::default().estimate_b_frame(&after, Some(&prev), &next)?;
    assert_eq!(motions.len(), 9);
    for motion in motions {
        assert_eq!(motion.mode, BMotionType::BACKWARD);
        assert_eq!(motion.cost, 0);
    }
    Ok(())
}

#[test]
fn test_estimation_is_deterministic() -> Result<()> {
    let config = TestClipConfig {
        width: 96,
        height: 64,
        length: 3,
        content_type: ClipContentType::MovingBox {
            speed_x: 2,
            speed_y: 1,
        },
    };
    let frames = config.frames();
    let prev = ReferenceFrame::new(frames[0].clone());
    let next = ReferenceFrame::new(frames[2].clone());
    let search = MotionSearch::default();

    let first = search.estimate_b_frame(&frames[1], Some(&prev), &next)?;
    let second = search.estimate_b_frame(&frames[1], Some(&prev), &next)?;
    assert_eq!(first, second);
    Ok(())
}
