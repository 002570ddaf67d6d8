use std::num::NonZeroUsize;

use super::SAD_WIDTH;

#[must_use]
pub(super) fn get_sad_16xn<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
) -> u32 {
    let mut sum = 0;
    for y in 0..ROWS {
        let src_row = &src[y * src_pitch.get()..][..SAD_WIDTH];
        let ref_row = &ref_[y * ref_pitch.get()..][..SAD_WIDTH];
        sum += src_row
            .iter()
            .zip(ref_row)
            .fold(0u32, |acc, (&s, &r)| acc + u32::from(s.abs_diff(r)));
    }
    sum
}

#[must_use]
pub(super) fn get_sad_16xn_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    let mut sum = 0;
    for y in 0..ROWS {
        let src_row = &src[y * src_pitch.get()..][..SAD_WIDTH];
        let ref_row = &ref_[y * ref_pitch.get()..][..SAD_WIDTH];
        sum += src_row
            .iter()
            .zip(ref_row)
            .skip(col_phase)
            .step_by(2)
            .fold(0u32, |acc, (&s, &r)| acc + u32::from(s.abs_diff(r)));
    }
    sum
}

#[must_use]
pub(super) fn get_sad_16xn_interp<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
) -> u32 {
    let mut sum = 0;
    for y in 0..ROWS {
        let src_row = &src[y * src_pitch.get()..][..SAD_WIDTH];
        let a_row = &pred_a[y * pred_a_pitch.get()..][..SAD_WIDTH];
        let b_row = &pred_b[y * pred_b_pitch.get()..][..SAD_WIDTH];
        for ((&s, &a), &b) in src_row.iter().zip(a_row).zip(b_row) {
            let pred = (u16::from(a) + u16::from(b)).div_ceil(2) as u8;
            sum += u32::from(s.abs_diff(pred));
        }
    }
    sum
}

#[must_use]
pub(super) fn get_sad_16xn_interp_subsampled<const ROWS: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    pred_a: &[u8],
    pred_a_pitch: NonZeroUsize,
    pred_b: &[u8],
    pred_b_pitch: NonZeroUsize,
    col_phase: usize,
) -> u32 {
    let mut sum = 0;
    for y in 0..ROWS {
        let src_row = &src[y * src_pitch.get()..][..SAD_WIDTH];
        let a_row = &pred_a[y * pred_a_pitch.get()..][..SAD_WIDTH];
        let b_row = &pred_b[y * pred_b_pitch.get()..][..SAD_WIDTH];
        for ((&s, &a), &b) in src_row
            .iter()
            .zip(a_row)
            .zip(b_row)
            .skip(col_phase)
            .step_by(2)
        {
            let pred = (u16::from(a) + u16::from(b)).div_ceil(2) as u8;
            sum += u32::from(s.abs_diff(pred));
        }
    }
    sum
}
