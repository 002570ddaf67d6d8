#[cfg(test)]
mod tests;

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow, bail};
use bitflags::bitflags;

/// Width and height of a DCT block, in samples. Block positions are counted in these units.
pub const DCT_SIZE: usize = 8;
/// Width and height of a macroblock, the unit every search operates on.
pub const MB_SIZE: usize = 2 * DCT_SIZE;

/// Largest search range in whole pixels. Vectors past this can't be coded with MPEG-1's largest `f_code`.
pub const MAX_SEARCH_RANGE: i64 = 512;
pub const DEFAULT_SEARCH_RANGE: i64 = 10;

/// Block matching algorithm used for P-frame macroblocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PSearchAlgorithm {
    Subsample = 0,
    Exhaustive = 1,
    #[default]
    Logarithmic = 2,
    TwoLevel = 3,
}

impl PSearchAlgorithm {
    pub const ALL: [Self; 4] = [
        Self::Subsample,
        Self::Exhaustive,
        Self::Logarithmic,
        Self::TwoLevel,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subsample => "SUBSAMPLE",
            Self::Exhaustive => "EXHAUSTIVE",
            Self::Logarithmic => "LOGARITHMIC",
            Self::TwoLevel => "TWOLEVEL",
        }
    }
}

impl FromStr for PSearchAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow!(
                    "Invalid value for 'PSEARCH_ALG', must be SUBSAMPLE, EXHAUSTIVE, LOGARITHMIC, \
                     or TWOLEVEL, got {s:?}."
                )
            })
    }
}

impl TryFrom<i64> for PSearchAlgorithm {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::Subsample,
            1 => Self::Exhaustive,
            2 => Self::Logarithmic,
            3 => Self::TwoLevel,
            _ => bail!("Invalid value for 'PSEARCH_ALG', must be 0-3, got {val}."),
        })
    }
}

impl fmt::Display for PSearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy used to pick forward, backward or interpolated prediction for B-frame macroblocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BSearchAlgorithm {
    /// Try every forward vector against its best backward partner. Very slow.
    Exhaustive = 0,
    /// Search each direction once, then refine each half of the interpolation against the other.
    #[default]
    Cross2 = 1,
    /// Search each direction once and interpolate the two winners.
    Simple = 2,
}

impl BSearchAlgorithm {
    pub const ALL: [Self; 3] = [Self::Exhaustive, Self::Cross2, Self::Simple];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exhaustive => "EXHAUSTIVE",
            Self::Cross2 => "CROSS2",
            Self::Simple => "SIMPLE",
        }
    }
}

impl FromStr for BSearchAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow!(
                    "Invalid value for 'BSEARCH_ALG', must be EXHAUSTIVE, CROSS2, or SIMPLE, got \
                     {s:?}."
                )
            })
    }
}

impl TryFrom<i64> for BSearchAlgorithm {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::Exhaustive,
            1 => Self::Cross2,
            2 => Self::Simple,
            _ => bail!("Invalid value for 'BSEARCH_ALG', must be 0-2, got {val}."),
        })
    }
}

impl fmt::Display for BSearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolution of the vectors a search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelSearch {
    /// Whole-pixel vectors only (even half-pel components).
    Full,
    #[default]
    Half,
}

impl PixelSearch {
    /// Distance between neighbouring candidate vectors, in half-pel units.
    #[must_use]
    pub const fn step_size(self) -> i32 {
        match self {
            Self::Full => 2,
            Self::Half => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Half => "HALF",
        }
    }
}

impl FromStr for PixelSearch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Full, Self::Half]
            .into_iter()
            .find(|pixel| pixel.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Invalid value for 'PIXEL', must be FULL or HALF, got {s:?}."))
    }
}

impl fmt::Display for PixelSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Reference frames a B-frame macroblock is predicted from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BMotionType: u8 {
        const FORWARD = 0b01;
        const BACKWARD = 0b10;
        const INTERPOLATE = Self::FORWARD.bits() | Self::BACKWARD.bits();
    }
}

/// Converts a search range in whole pixels into half-pel units, rejecting ranges MPEG-1 can't code.
pub fn half_pel_range(pixels: i64, param: &str) -> Result<i32> {
    if !(1..=MAX_SEARCH_RANGE).contains(&pixels) {
        bail!(
            "Invalid value for '{param}', must be between 1 and {MAX_SEARCH_RANGE}, got {pixels}."
        );
    }
    // bounded above, so this can't truncate
    Ok(2 * pixels as i32)
}
