
use std::num::NonZeroUsize;

use anyhow::{Result, bail};
use log::trace;

use crate::{
    average::average2,
    halfpel::{interpolate_diagonal, interpolate_horizontal, interpolate_vertical},
    mv::MotionVector,
    params::{DCT_SIZE, MB_SIZE},
    util::bitblt,
};

/// Row pitch of a [`LumBlock`].
// SAFETY: MB_SIZE is a non-zero constant
pub const BLOCK_PITCH: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(MB_SIZE) };

/// Top-left corner of a macroblock, counted in `DCT_SIZE` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub by: usize,
    pub bx: usize,
}

impl BlockPos {
    #[must_use]
    pub const fn new(by: usize, bx: usize) -> Self {
        BlockPos { by, bx }
    }

    /// Position of the macroblock in row `mb_y`, column `mb_x` of the macroblock grid.
    #[must_use]
    pub const fn from_macroblock(mb_y: usize, mb_x: usize) -> Self {
        BlockPos {
            by: 2 * mb_y,
            bx: 2 * mb_x,
        }
    }

    /// First sample row covered by the block.
    #[must_use]
    pub const fn row(self) -> usize {
        self.by * DCT_SIZE
    }

    /// First sample column covered by the block.
    #[must_use]
    pub const fn col(self) -> usize {
        self.bx * DCT_SIZE
    }
}

/// Luma plane of a picture. Dimensions are whole macroblocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: NonZeroUsize,
    height: NonZeroUsize,
    luma: Vec<u8>,
}

impl Frame {
    /// Wraps a tightly packed luma plane of `width` x `height` samples.
    pub fn new(width: usize, height: usize, luma: Vec<u8>) -> Result<Self> {
        let (Some(nz_width), Some(nz_height)) = (NonZeroUsize::new(width), NonZeroUsize::new(height))
        else {
            bail!("Frame dimensions must be non-zero, got {width}x{height}.");
        };
        if width % MB_SIZE != 0 || height % MB_SIZE != 0 {
            bail!("Frame dimensions must be multiples of {MB_SIZE}, got {width}x{height}.");
        }
        if luma.len() != width * height {
            bail!(
                "Luma plane of a {width}x{height} frame must hold {} samples, got {}.",
                width * height,
                luma.len()
            );
        }

        Ok(Frame {
            width: nz_width,
            height: nz_height,
            luma,
        })
    }

    #[must_use]
    pub const fn width(&self) -> NonZeroUsize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> NonZeroUsize {
        self.height
    }

    /// Samples per luma row. Frames are tightly packed, so this is the width.
    #[must_use]
    pub const fn pitch(&self) -> NonZeroUsize {
        self.width
    }

    #[must_use]
    pub fn luma(&self) -> &[u8] {
        &self.luma
    }

    #[must_use]
    pub const fn mb_rows(&self) -> usize {
        self.height.get() / MB_SIZE
    }

    #[must_use]
    pub const fn mb_cols(&self) -> usize {
        self.width.get() / MB_SIZE
    }

    /// Copies the macroblock at `pos` out of the frame.
    pub fn block(&self, pos: BlockPos) -> Result<LumBlock> {
        LumBlock::from_frame(self, pos)
    }

    /// Whether a macroblock at `pos` lies entirely inside the frame.
    #[must_use]
    pub const fn contains(&self, pos: BlockPos) -> bool {
        pos.row() + MB_SIZE <= self.height.get() && pos.col() + MB_SIZE <= self.width.get()
    }
}

/// A 16x16 tile of luma samples, stored row after row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumBlock {
    samples: [u8; MB_SIZE * MB_SIZE],
}

impl LumBlock {
    pub fn from_frame(frame: &Frame, pos: BlockPos) -> Result<Self> {
        if !frame.contains(pos) {
            bail!(
                "Block at ({}, {}) does not fit in a {}x{} frame.",
                pos.by,
                pos.bx,
                frame.width(),
                frame.height()
            );
        }

        let mut samples = [0u8; MB_SIZE * MB_SIZE];
        let offset = pos.row() * frame.pitch().get() + pos.col();
        bitblt(
            &mut samples,
            BLOCK_PITCH,
            &frame.luma()[offset..],
            frame.pitch(),
            BLOCK_PITCH,
            BLOCK_PITCH,
        );
        Ok(LumBlock { samples })
    }

    #[must_use]
    pub const fn from_samples(samples: [u8; MB_SIZE * MB_SIZE]) -> Self {
        LumBlock { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Bidirectional prediction from two blocks, `(a + b + 1) >> 1`.
    #[must_use]
    pub fn average(&self, other: &LumBlock) -> LumBlock {
        let mut samples = [0u8; MB_SIZE * MB_SIZE];
        average2(
            &mut samples,
            &self.samples,
            &other.samples,
            BLOCK_PITCH,
            BLOCK_PITCH,
            BLOCK_PITCH,
        );
        LumBlock { samples }
    }
}

/// A frame that other frames are predicted from, with its half-pel planes.
///
/// Built once and then only read, so it can be shared between threads searching
/// different macroblocks.
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    frame: Frame,
    /// halfway between horizontal neighbours
    half_x: Vec<u8>,
    /// halfway between vertical neighbours
    half_y: Vec<u8>,
    /// centre of each 2x2 group
    half_xy: Vec<u8>,
}

impl ReferenceFrame {
    #[must_use]
    pub fn new(frame: Frame) -> Self {
        let len = frame.luma().len();
        let (pitch, width, height) = (frame.pitch(), frame.width(), frame.height());

        let mut half_x = vec![0u8; len];
        let mut half_y = vec![0u8; len];
        let mut half_xy = vec![0u8; len];
        interpolate_horizontal(&mut half_x, frame.luma(), pitch, width, height);
        interpolate_vertical(&mut half_y, frame.luma(), pitch, width, height);
        interpolate_diagonal(&mut half_xy, frame.luma(), pitch, width, height);
        trace!("built half-pel planes for {width}x{height} reference");

        ReferenceFrame {
            frame,
            half_x,
            half_y,
            half_xy,
        }
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Samples predicting the block at `pos` with vector `mv`, starting at the
    /// block's top-left corner, and their row pitch.
    ///
    /// `mv` must keep the block inside the frame.
    #[must_use]
    pub(crate) fn motion_origin(&self, pos: BlockPos, mv: MotionVector) -> (&[u8], NonZeroUsize) {
        let row = pos.row() as i64 + i64::from(mv.y.div_euclid(2));
        let col = pos.col() as i64 + i64::from(mv.x.div_euclid(2));
        debug_assert!(row >= 0 && col >= 0, "vector {mv:?} leaves the frame at {pos:?}");
        debug_assert!(
            row as usize + MB_SIZE <= self.frame.height().get()
                && col as usize + MB_SIZE <= self.frame.width().get(),
            "vector {mv:?} leaves the frame at {pos:?}"
        );

        let plane = match (mv.y & 1 != 0, mv.x & 1 != 0) {
            (false, false) => self.frame.luma(),
            (false, true) => &self.half_x,
            (true, false) => &self.half_y,
            (true, true) => &self.half_xy,
        };
        let pitch = self.frame.pitch();
        (&plane[row as usize * pitch.get() + col as usize..], pitch)
    }

    /// Copies the prediction for the block at `pos` with vector `mv`.
    #[must_use]
    pub fn motion_block(&self, pos: BlockPos, mv: MotionVector) -> LumBlock {
        let (origin, pitch) = self.motion_origin(pos, mv);
        let mut samples = [0u8; MB_SIZE * MB_SIZE];
        bitblt(
            &mut samples,
            BLOCK_PITCH,
            origin,
            pitch,
            BLOCK_PITCH,
            BLOCK_PITCH,
        );
        LumBlock { samples }
    }
}

impl From<Frame> for ReferenceFrame {
    fn from(frame: Frame) -> Self {
        ReferenceFrame::new(frame)
    }
}
