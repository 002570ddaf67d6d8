use std::num::NonZeroUsize;

pub(super) fn average2(
    dest: &mut [u8],
    src1: &[u8],
    src2: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();
    for y in 0..height.get() {
        let offset = y * pitch;
        let dest_row = &mut dest[offset..][..width];
        let src1_row = &src1[offset..][..width];
        let src2_row = &src2[offset..][..width];
        for ((d, &a), &b) in dest_row.iter_mut().zip(src1_row).zip(src2_row) {
            *d = (u16::from(a) + u16::from(b)).div_ceil(2) as u8;
        }
    }
}

pub(super) fn average4(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();
    for y in 0..height.get() {
        let offset = y * pitch;
        let top = &src[offset..][..=width];
        let bottom = &src[offset + pitch..][..=width];
        let dest_row = &mut dest[offset..][..width];
        for x in 0..width {
            let sum = u16::from(top[x])
                + u16::from(top[x + 1])
                + u16::from(bottom[x])
                + u16::from(bottom[x + 1]);
            dest_row[x] = ((sum + 2) >> 2) as u8;
        }
    }
}
