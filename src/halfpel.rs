#[cfg(target_arch = "x86_64")]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

/// Interpolates the samples halfway between each pixel and its right neighbour.
///
/// Uses MPEG-1 rounding, `(a + b + 1) >> 1`. The last column has no right
/// neighbour and is copied from the source.
///
/// # Parameters
/// - `dest`: Destination plane, same layout as `src`
/// - `src`: Full-pel source plane
/// - `pitch`: Number of samples per row in both planes
/// - `width`: Width of the plane in samples
/// - `height`: Height of the plane in samples
pub fn interpolate_horizontal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let len = (height.get() - 1) * pitch.get() + width.get();
    assert!(src.len() >= len && dest.len() >= len);

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and both planes were bounds checked above
                unsafe {
                    avx2::interpolate_horizontal(dest, src, pitch, width, height);
                }
                return;
            }
        }
    }

    rust::interpolate_horizontal(dest, src, pitch, width, height);
}

/// Interpolates the samples halfway between each pixel and the one below it.
///
/// The last row has no lower neighbour and is copied from the source.
pub fn interpolate_vertical(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let len = (height.get() - 1) * pitch.get() + width.get();
    assert!(src.len() >= len && dest.len() >= len);

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and both planes were bounds checked above
                unsafe {
                    avx2::interpolate_vertical(dest, src, pitch, width, height);
                }
                return;
            }
        }
    }

    rust::interpolate_vertical(dest, src, pitch, width, height);
}

/// Interpolates the samples at the centre of each 2x2 group of pixels.
///
/// Uses MPEG-1 rounding, `(a + b + c + d + 2) >> 2`. The last column falls
/// back to vertical interpolation, the last row to horizontal interpolation,
/// and the bottom-right sample is copied.
pub fn interpolate_diagonal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let len = (height.get() - 1) * pitch.get() + width.get();
    assert!(src.len() >= len && dest.len() >= len);

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and both planes were bounds checked above
                unsafe {
                    avx2::interpolate_diagonal(dest, src, pitch, width, height);
                }
                return;
            }
        }
    }

    rust::interpolate_diagonal(dest, src, pitch, width, height);
}
