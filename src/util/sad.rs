#[cfg(target_arch = "x86_64")]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

/// Width of every block compared by these kernels.
pub const SAD_WIDTH: usize = 16;

/// Sum of absolute differences between two 16 sample wide blocks of `ROWS` rows.
///
/// # Parameters
/// - `src`: First block, starting at its top-left sample
/// - `src_pitch`: Number of samples per row in `src`
/// - `ref_`: Second block, starting at its top-left sample
/// - `ref_pitch`: Number of samples per row in `ref_`
///
/// # Panics
/// Panics if either buffer is too short to hold `ROWS` rows of 16 samples at its pitch.
#[must_use]
pub fn get_sad_16xn<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
) -> u32 {
    assert!(src.len() >= block_len::<ROWS>(src_pitch));
    assert!(ref_.len() >= block_len::<ROWS>(ref_pitch));

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and both buffers were bounds checked above
                return unsafe { avx2::get_sad_16xn::<ROWS>(src, src_pitch, ref_, ref_pitch) };
            }
        }
    }

    rust::get_sad_16xn::<ROWS>(src, src_pitch, ref_, ref_pitch)
}

/// Like [`get_sad_16xn`], but only compares the columns whose index has parity `col_phase`.
///
/// Row subsampling is left to the caller, by offsetting the buffers and doubling their pitch.
///
/// # Panics
/// Panics if `col_phase` is not 0 or 1, or if either buffer is too short.
#[must_use]
pub fn get_sad_16xn_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    assert!(col_phase < 2);
    assert!(src.len() >= block_len::<ROWS>(src_pitch));
    assert!(ref_.len() >= block_len::<ROWS>(ref_pitch));

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and both buffers were bounds checked above
                return unsafe {
                    avx2::get_sad_16xn_subsampled::<ROWS>(src, src_pitch, ref_, ref_pitch, col_phase)
                };
            }
        }
    }

    rust::get_sad_16xn_subsampled::<ROWS>(src, src_pitch, ref_, ref_pitch, col_phase)
}

/// Sum of absolute differences between `src` and the rounded average of `pred_a` and `pred_b`.
///
/// This is the error of a bidirectional prediction, `(a + b + 1) >> 1`.
///
/// # Panics
/// Panics if any buffer is too short to hold `ROWS` rows of 16 samples at its pitch.
#[must_use]
pub fn get_sad_16xn_interp<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
) -> u32 {
    assert!(src.len() >= block_len::<ROWS>(src_pitch));
    assert!(pred_a.len() >= block_len::<ROWS>(pred_a_pitch));
    assert!(pred_b.len() >= block_len::<ROWS>(pred_b_pitch));

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and all buffers were bounds checked above
                return unsafe {
                    avx2::get_sad_16xn_interp::<ROWS>(
                        src,
                        src_pitch,
                        pred_a,
                        pred_a_pitch,
                        pred_b,
                        pred_b_pitch,
                    )
                };
            }
        }
    }

    rust::get_sad_16xn_interp::<ROWS>(src, src_pitch, pred_a, pred_a_pitch, pred_b, pred_b_pitch)
}

/// Like [`get_sad_16xn_interp`], but only compares the columns whose index has parity `col_phase`.
///
/// # Panics
/// Panics if `col_phase` is not 0 or 1, or if any buffer is too short.
#[must_use]
pub fn get_sad_16xn_interp_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    assert!(col_phase < 2);
    assert!(src.len() >= block_len::<ROWS>(src_pitch));
    assert!(pred_a.len() >= block_len::<ROWS>(pred_a_pitch));
    assert!(pred_b.len() >= block_len::<ROWS>(pred_b_pitch));

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and all buffers were bounds checked above
                return unsafe {
                    avx2::get_sad_16xn_interp_subsampled::<ROWS>(
                        src,
                        src_pitch,
                        pred_a,
                        pred_a_pitch,
                        pred_b,
                        pred_b_pitch,
                        col_phase,
                    )
                };
            }
        }
    }

    rust::get_sad_16xn_interp_subsampled::<ROWS>(
        src,
        src_pitch,
        pred_a,
        pred_a_pitch,
        pred_b,
        pred_b_pitch,
        col_phase,
    )
}

const fn block_len<const ROWS: usize>(pitch: NonZeroUsize) -> usize {
    if ROWS == 0 {
        return 0;
    }
    (ROWS - 1) * pitch.get() + SAD_WIDTH
}
