#![allow(clippy::unwrap_used, reason = "allow in test files")]

use parameterized::parameterized;

use super::*;

#[parameterized(
    name = { "SUBSAMPLE", "exhaustive", "Logarithmic", " TWOLEVEL\n" },
    expected = {
        PSearchAlgorithm::Subsample,
        PSearchAlgorithm::Exhaustive,
        PSearchAlgorithm::Logarithmic,
        PSearchAlgorithm::TwoLevel
    },
)]
fn psearch_parses_names(name: &str, expected: PSearchAlgorithm) {
    assert_eq!(name.parse::<PSearchAlgorithm>().unwrap(), expected);
}

#[parameterized(
    name = { "EXHAUSTIVE", "cross2", "Simple" },
    expected = { BSearchAlgorithm::Exhaustive, BSearchAlgorithm::Cross2, BSearchAlgorithm::Simple },
)]
fn bsearch_parses_names(name: &str, expected: BSearchAlgorithm) {
    assert_eq!(name.parse::<BSearchAlgorithm>().unwrap(), expected);
}

#[test]
fn psearch_rejects_unknown_name() {
    let err = "HEXAGON".parse::<PSearchAlgorithm>().unwrap_err();
    assert!(err.to_string().contains("PSEARCH_ALG"));
    assert!(err.to_string().contains("HEXAGON"));
    assert!("".parse::<PSearchAlgorithm>().is_err());
}

#[test]
fn bsearch_rejects_unknown_name() {
    // a P-only name is not a B algorithm
    assert!("LOGARITHMIC".parse::<BSearchAlgorithm>().is_err());
    assert!("CROSS".parse::<BSearchAlgorithm>().is_err());
}

#[test]
fn names_round_trip_through_display() {
    for alg in PSearchAlgorithm::ALL {
        assert_eq!(alg.to_string().parse::<PSearchAlgorithm>().unwrap(), alg);
    }
    for alg in BSearchAlgorithm::ALL {
        assert_eq!(alg.to_string().parse::<BSearchAlgorithm>().unwrap(), alg);
    }
}

#[test]
fn numeric_codes_match_enum_values() {
    for alg in PSearchAlgorithm::ALL {
        assert_eq!(PSearchAlgorithm::try_from(alg as i64).unwrap(), alg);
    }
    for alg in BSearchAlgorithm::ALL {
        assert_eq!(BSearchAlgorithm::try_from(alg as i64).unwrap(), alg);
    }
    assert!(PSearchAlgorithm::try_from(4).is_err());
    assert!(PSearchAlgorithm::try_from(-1).is_err());
    assert!(BSearchAlgorithm::try_from(3).is_err());
}

#[test]
fn pixel_search_step_sizes() {
    assert_eq!(PixelSearch::Full.step_size(), 2);
    assert_eq!(PixelSearch::Half.step_size(), 1);
    assert_eq!("full".parse::<PixelSearch>().unwrap(), PixelSearch::Full);
    assert_eq!("HALF".parse::<PixelSearch>().unwrap(), PixelSearch::Half);
    assert!("QUARTER".parse::<PixelSearch>().is_err());
}

#[test]
fn interpolate_is_both_directions() {
    assert!(BMotionType::INTERPOLATE.contains(BMotionType::FORWARD));
    assert!(BMotionType::INTERPOLATE.contains(BMotionType::BACKWARD));
    assert_eq!(
        BMotionType::FORWARD | BMotionType::BACKWARD,
        BMotionType::INTERPOLATE
    );
}

#[test]
fn search_range_is_doubled_and_bounded() {
    assert_eq!(half_pel_range(1, "RANGE").unwrap(), 2);
    assert_eq!(half_pel_range(10, "RANGE").unwrap(), 20);
    assert_eq!(half_pel_range(MAX_SEARCH_RANGE, "RANGE").unwrap(), 1024);
    assert!(half_pel_range(0, "RANGE").is_err());
    assert!(half_pel_range(-4, "RANGE").is_err());
    let err = half_pel_range(MAX_SEARCH_RANGE + 1, "RANGE").unwrap_err();
    assert!(err.to_string().contains("'RANGE'"));
}
