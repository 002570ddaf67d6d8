mod sad;


use std::num::NonZeroUsize;

pub use sad::{
    get_sad_16xn,
    get_sad_16xn_interp,
    get_sad_16xn_interp_subsampled,
    get_sad_16xn_subsampled,
};

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

#[cfg(target_arch = "x86_64")]
pub use cpuid_avx2::get as has_avx2;

/// Copies a rectangle of samples between two buffers that may have different strides.
///
/// # Parameters
/// - `dest`: Destination buffer to copy samples into
/// - `dest_stride`: Number of samples per row in the destination buffer
/// - `src`: Source buffer to copy samples from
/// - `src_stride`: Number of samples per row in the source buffer
/// - `row_size`: Number of samples to copy per row
/// - `height`: Number of rows to copy
pub fn bitblt(
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
    src: &[u8],
    src_stride: NonZeroUsize,
    row_size: NonZeroUsize,
    height: NonZeroUsize,
) {
    let height = height.get();
    let row_size = row_size.get();
    let src_stride = src_stride.get();
    let dest_stride = dest_stride.get();

    if src_stride == dest_stride && src_stride == row_size {
        dest[..row_size * height].copy_from_slice(&src[..row_size * height]);
    } else {
        for (dest_row, src_row) in dest
            .chunks_mut(dest_stride)
            .zip(src.chunks(src_stride))
            .take(height)
        {
            dest_row[..row_size].copy_from_slice(&src_row[..row_size]);
        }
    }
}
