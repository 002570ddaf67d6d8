#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

#[target_feature(enable = "avx2")]
pub(super) unsafe fn interpolate_horizontal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();
    let src = src.as_ptr();
    let dest = dest.as_mut_ptr();

    for j in 0..height.get() {
        let row_offset = j * pitch;
        let mut i = 0;

        // 32 samples at a time, the shifted load must stay inside the row
        while i + 32 < width {
            let current = _mm256_loadu_si256(src.add(row_offset + i).cast());
            let next = _mm256_loadu_si256(src.add(row_offset + i + 1).cast());
            _mm256_storeu_si256(
                dest.add(row_offset + i).cast(),
                _mm256_avg_epu8(current, next),
            );
            i += 32;
        }

        while i < width - 1 {
            let a = u16::from(*src.add(row_offset + i));
            let b = u16::from(*src.add(row_offset + i + 1));
            *dest.add(row_offset + i) = (a + b).div_ceil(2) as u8;
            i += 1;
        }

        // last column
        *dest.add(row_offset + width - 1) = *src.add(row_offset + width - 1);
    }
}

#[target_feature(enable = "avx2")]
pub(super) unsafe fn interpolate_vertical(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();
    let mut src = src.as_ptr();
    let mut dest = dest.as_mut_ptr();

    let simd_width_32 = width & !31;

    for _y in 0..(height.get() - 1) {
        for x in (0..simd_width_32).step_by(32) {
            let m0 = _mm256_loadu_si256(src.add(x).cast());
            let m1 = _mm256_loadu_si256(src.add(x + pitch).cast());
            _mm256_storeu_si256(dest.add(x).cast(), _mm256_avg_epu8(m0, m1));
        }

        for x in simd_width_32..width {
            let a = u16::from(*src.add(x));
            let b = u16::from(*src.add(x + pitch));
            *dest.add(x) = (a + b).div_ceil(2) as u8;
        }

        src = src.add(pitch);
        dest = dest.add(pitch);
    }

    // last row
    std::ptr::copy_nonoverlapping(src, dest, width);
}

#[target_feature(enable = "avx2")]
pub(super) unsafe fn interpolate_diagonal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();
    let height = height.get();
    let src = src.as_ptr();
    let dest = dest.as_mut_ptr();

    let two = _mm256_set1_epi16(2);
    let mut offset = 0;

    for _j in 0..height - 1 {
        let mut i = 0;

        // 16 samples at a time, widened to 16 bits so the 4-tap sum rounds exactly once
        while i + 16 < width {
            let a = _mm256_cvtepu8_epi16(_mm_loadu_si128(src.add(offset + i).cast()));
            let b = _mm256_cvtepu8_epi16(_mm_loadu_si128(src.add(offset + i + 1).cast()));
            let c = _mm256_cvtepu8_epi16(_mm_loadu_si128(src.add(offset + pitch + i).cast()));
            let d = _mm256_cvtepu8_epi16(_mm_loadu_si128(src.add(offset + pitch + i + 1).cast()));

            let sum = _mm256_add_epi16(_mm256_add_epi16(a, b), _mm256_add_epi16(c, d));
            let avg = _mm256_srli_epi16(_mm256_add_epi16(sum, two), 2);
            let packed = _mm_packus_epi16(
                _mm256_castsi256_si128(avg),
                _mm256_extracti128_si256(avg, 1),
            );
            _mm_storeu_si128(dest.add(offset + i).cast(), packed);
            i += 16;
        }

        while i < width - 1 {
            let a = u16::from(*src.add(offset + i));
            let b = u16::from(*src.add(offset + i + 1));
            let c = u16::from(*src.add(offset + pitch + i));
            let d = u16::from(*src.add(offset + pitch + i + 1));
            *dest.add(offset + i) = ((a + b + c + d + 2) >> 2) as u8;
            i += 1;
        }

        // last column, 2-tap vertical
        let a = u16::from(*src.add(offset + width - 1));
        let b = u16::from(*src.add(offset + pitch + width - 1));
        *dest.add(offset + width - 1) = (a + b).div_ceil(2) as u8;

        offset += pitch;
    }

    // last row, 2-tap horizontal
    for i in 0..width - 1 {
        let a = u16::from(*src.add(offset + i));
        let b = u16::from(*src.add(offset + i + 1));
        *dest.add(offset + i) = (a + b).div_ceil(2) as u8;
    }
    *dest.add(offset + width - 1) = *src.add(offset + width - 1);
}
