#![allow(dead_code)]

use mpeg_motion_search::{BlockPos, Frame};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

#[derive(Debug, Clone)]
pub struct TestClipConfig {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    pub content_type: ClipContentType,
}

#[derive(Debug, Clone)]
pub enum ClipContentType {
    Blank,
    Gradient,
    Checkerboard,
    /// Textured box moving over a static textured background, in pixels per frame.
    MovingBox { speed_x: i32, speed_y: i32 },
    /// Noise texture where the whole picture moves, in pixels per frame.
    Pan { speed_x: i32, speed_y: i32 },
    /// Fresh noise every frame.
    Noise { seed: u8 },
}

impl TestClipConfig {
    pub fn frames(&self) -> Vec<Frame> {
        (0..self.length).map(|n| self.frame(n)).collect()
    }

    pub fn frame(&self, n: usize) -> Frame {
        let (width, height) = (self.width, self.height);
        let luma = match self.content_type {
            ClipContentType::Blank => vec![16; width * height],
            ClipContentType::Gradient => (0..height)
                .flat_map(|y| (0..width).map(move |x| ((x + y + 3 * n) % 256) as u8))
                .collect(),
            ClipContentType::Checkerboard => (0..height)
                .flat_map(|y| {
                    (0..width).map(move |x| if (x / 8 + y / 8) % 2 == 0 { 235 } else { 16 })
                })
                .collect(),
            ClipContentType::MovingBox { speed_x, speed_y } => {
                let background = noise(width, height, 1);
                let box_size = width.min(height) / 4;
                let texture = noise(box_size, box_size, 2);
                let top = (height - box_size) as i64 / 2 + i64::from(speed_y) * n as i64;
                let left = (width - box_size) as i64 / 2 + i64::from(speed_x) * n as i64;

                let mut luma = background;
                for y in 0..box_size {
                    for x in 0..box_size {
                        let (fy, fx) = (top + y as i64, left + x as i64);
                        if (0..height as i64).contains(&fy) && (0..width as i64).contains(&fx) {
                            luma[fy as usize * width + fx as usize] = texture[y * box_size + x];
                        }
                    }
                }
                luma
            }
            ClipContentType::Pan { speed_x, speed_y } => {
                // crop a moving window out of a larger canvas so no edge is ever replicated
                let speed = speed_x.unsigned_abs().max(speed_y.unsigned_abs()) as usize;
                let margin = self.length * speed;
                let canvas_width = width + 2 * margin;
                let canvas = noise(canvas_width, height + 2 * margin, 3);
                let top = (margin as i64 - i64::from(speed_y) * n as i64) as usize;
                let left = (margin as i64 - i64::from(speed_x) * n as i64) as usize;
                (0..height)
                    .flat_map(|y| {
                        let row = (top + y) * canvas_width + left;
                        canvas[row..row + width].to_vec()
                    })
                    .collect()
            }
            ClipContentType::Noise { seed } => noise(width, height, seed.wrapping_add(n as u8)),
        };
        Frame::new(width, height, luma).unwrap()
    }
}

fn noise(width: usize, height: usize, seed: u8) -> Vec<u8> {
    let mut key = *b"deadbeeflolcakes";
    key[0] = seed;
    let mut rng = Xoshiro128StarStar::from_seed(key);
    (0..width * height).map(|_| rng.random()).collect()
}

/// Macroblocks that don't touch the frame edge, with their raster index.
pub fn interior_macroblocks(frame: &Frame) -> Vec<(usize, BlockPos)> {
    let mb_rows = frame.mb_rows();
    let mb_cols = frame.mb_cols();
    (1..mb_rows - 1)
        .flat_map(|mb_y| (1..mb_cols - 1).map(move |mb_x| (mb_y, mb_x)))
        .map(|(mb_y, mb_x)| (mb_y * mb_cols + mb_x, BlockPos::from_macroblock(mb_y, mb_x)))
        .collect()
}
