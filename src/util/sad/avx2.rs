#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

#[must_use]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn get_sad_16xn<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
) -> u32 {
    sad_16xn_masked::<ROWS>(
        src.as_ptr(),
        src_pitch.get(),
        ref_.as_ptr(),
        ref_pitch.get(),
        _mm256_set1_epi8(-1),
    )
}

#[must_use]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn get_sad_16xn_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    sad_16xn_masked::<ROWS>(
        src.as_ptr(),
        src_pitch.get(),
        ref_.as_ptr(),
        ref_pitch.get(),
        column_mask(col_phase),
    )
}

#[must_use]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn get_sad_16xn_interp<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
) -> u32 {
    interp_sad_16xn_masked::<ROWS>(
        src,
        src_pitch,
        pred_a,
        pred_a_pitch,
        pred_b,
        pred_b_pitch,
        _mm256_set1_epi8(-1),
    )
}

#[must_use]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn get_sad_16xn_interp_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    interp_sad_16xn_masked::<ROWS>(
        src,
        src_pitch,
        pred_a,
        pred_a_pitch,
        pred_b,
        pred_b_pitch,
        column_mask(col_phase),
    )
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn interp_sad_16xn_masked<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
    mask: __m256i,
) -> u32 {
    let src_pitch = src_pitch.get();
    let pred_a_pitch = pred_a_pitch.get();
    let pred_b_pitch = pred_b_pitch.get();
    let src = src.as_ptr();
    let pred_a = pred_a.as_ptr();
    let pred_b = pred_b.as_ptr();

    let mut acc256 = _mm256_setzero_si256();
    let mut acc128 = _mm_setzero_si128();

    let mut y = 0;
    while y + 2 <= ROWS {
        let s = _mm256_and_si256(load_two_rows(src.add(y * src_pitch), src_pitch), mask);
        let a = load_two_rows(pred_a.add(y * pred_a_pitch), pred_a_pitch);
        let b = load_two_rows(pred_b.add(y * pred_b_pitch), pred_b_pitch);
        let p = _mm256_and_si256(_mm256_avg_epu8(a, b), mask);
        acc256 = _mm256_add_epi64(acc256, _mm256_sad_epu8(s, p));
        y += 2;
    }

    if y < ROWS {
        let mask128 = _mm256_castsi256_si128(mask);
        let s = _mm_and_si128(_mm_loadu_si128(src.add(y * src_pitch).cast()), mask128);
        let a = _mm_loadu_si128(pred_a.add(y * pred_a_pitch).cast());
        let b = _mm_loadu_si128(pred_b.add(y * pred_b_pitch).cast());
        acc128 = _mm_sad_epu8(s, _mm_and_si128(_mm_avg_epu8(a, b), mask128));
    }

    reduce(acc256, acc128)
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn sad_16xn_masked<const ROWS: usize>(
    src: *const u8,
    src_pitch: usize,
    ref_: *const u8,
    ref_pitch: usize,
    mask: __m256i,
) -> u32 {
    let mut acc256 = _mm256_setzero_si256();
    let mut acc128 = _mm_setzero_si128();

    // two 16 sample rows per register
    let mut y = 0;
    while y + 2 <= ROWS {
        let s = _mm256_and_si256(load_two_rows(src.add(y * src_pitch), src_pitch), mask);
        let r = _mm256_and_si256(load_two_rows(ref_.add(y * ref_pitch), ref_pitch), mask);
        acc256 = _mm256_add_epi64(acc256, _mm256_sad_epu8(s, r));
        y += 2;
    }

    if y < ROWS {
        let mask128 = _mm256_castsi256_si128(mask);
        let s = _mm_and_si128(_mm_loadu_si128(src.add(y * src_pitch).cast()), mask128);
        let r = _mm_and_si128(_mm_loadu_si128(ref_.add(y * ref_pitch).cast()), mask128);
        acc128 = _mm_sad_epu8(s, r);
    }

    reduce(acc256, acc128)
}

/// Keeps the low byte of every 16-bit lane for even columns, the high byte for odd ones.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn column_mask(col_phase: usize) -> __m256i {
    if col_phase == 0 {
        _mm256_set1_epi16(0x00FF)
    } else {
        _mm256_set1_epi16(0xFF00u16 as i16)
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_two_rows(ptr: *const u8, pitch: usize) -> __m256i {
    let lo = _mm_loadu_si128(ptr.cast());
    let hi = _mm_loadu_si128(ptr.add(pitch).cast());
    _mm256_inserti128_si256(_mm256_castsi128_si256(lo), hi, 1)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn reduce(acc256: __m256i, acc128: __m128i) -> u32 {
    // Reduce acc256: add high and low 128-bit lanes
    let acc256_lo = _mm256_castsi256_si128(acc256);
    let acc256_hi = _mm256_extracti128_si256(acc256, 1);
    let combined = _mm_add_epi64(_mm_add_epi64(acc256_lo, acc256_hi), acc128);

    // Reduce 2x u64 lanes to scalar
    let high = _mm_unpackhi_epi64(combined, combined);
    let total = _mm_add_epi64(combined, high);
    _mm_cvtsi128_si64(total) as u32
}
