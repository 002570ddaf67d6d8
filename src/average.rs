mod rust;


use std::num::NonZeroUsize;

/// Averages two images pixel by pixel, blending them together.
///
/// The averaging rounds halves up, `(a + b + 1) >> 1`, which is the MPEG-1 rule
/// for half-pel interpolation and for bidirectional prediction.
///
/// # Parameters
/// - `dest`: Destination buffer to store the averaged result
/// - `src1`: First source image buffer
/// - `src2`: Second source image buffer
/// - `pitch`: Number of pixels per row in all three buffers
/// - `width`: Width of the averaged region in pixels
/// - `height`: Height of the averaged region in pixels
pub fn average2(
    dest: &mut [u8],
    src1: &[u8],
    src2: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let max_offset = (height.get() - 1) * pitch.get() + width.get();
    debug_assert!(src1.len() >= max_offset);
    debug_assert!(src2.len() >= max_offset);
    debug_assert!(dest.len() >= max_offset);

    rust::average2(dest, src1, src2, pitch, width, height);
}

/// Averages each sample with its right, lower and lower-right neighbours.
///
/// Rounds with `(a + b + c + d + 2) >> 2`. `src` must hold one extra row and
/// column beyond `width` x `height`.
pub fn average4(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    debug_assert!(src.len() > height.get() * pitch.get() + width.get());
    debug_assert!(dest.len() >= (height.get() - 1) * pitch.get() + width.get());

    rust::average4(dest, src, pitch, width, height);
}
