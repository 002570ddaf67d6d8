use std::num::NonZeroUsize;

use crate::average::{average2, average4};

pub(super) fn interpolate_horizontal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    if let Some(inner_width) = NonZeroUsize::new(width.get() - 1) {
        average2(dest, src, &src[1..], pitch, inner_width, height);
    }

    // last column
    let last = width.get() - 1;
    for y in 0..height.get() {
        dest[y * pitch.get() + last] = src[y * pitch.get() + last];
    }
}

pub(super) fn interpolate_vertical(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    if let Some(inner_height) = NonZeroUsize::new(height.get() - 1) {
        average2(dest, src, &src[pitch.get()..], pitch, width, inner_height);
    }

    // last row
    let offset = (height.get() - 1) * pitch.get();
    dest[offset..][..width.get()].copy_from_slice(&src[offset..][..width.get()]);
}

pub(super) fn interpolate_diagonal(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let stride = pitch.get();
    let last_col = width.get() - 1;
    let last_row = height.get() - 1;

    if let (Some(inner_width), Some(inner_height)) =
        (NonZeroUsize::new(last_col), NonZeroUsize::new(last_row))
    {
        average4(dest, src, pitch, inner_width, inner_height);
    }

    // last column, 2-tap vertical
    for y in 0..last_row {
        let a = u16::from(src[y * stride + last_col]);
        let b = u16::from(src[(y + 1) * stride + last_col]);
        dest[y * stride + last_col] = (a + b).div_ceil(2) as u8;
    }

    // last row, 2-tap horizontal
    let offset = last_row * stride;
    for x in 0..last_col {
        let a = u16::from(src[offset + x]);
        let b = u16::from(src[offset + x + 1]);
        dest[offset + x] = (a + b).div_ceil(2) as u8;
    }
    dest[offset + last_col] = src[offset + last_col];
}
