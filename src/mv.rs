use std::ops::Add;

/// A displacement from a block into a reference frame, in half-pel units.
///
/// Odd components address a position halfway between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MotionVector {
    pub y: i32,
    pub x: i32,
}

impl MotionVector {
    #[must_use]
    pub const fn new(y: i32, x: i32) -> Self {
        MotionVector { y, x }
    }

    #[must_use]
    pub const fn zero() -> Self {
        MotionVector { y: 0, x: 0 }
    }
}

impl Add for MotionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        MotionVector {
            y: self.y + rhs.y,
            x: self.x + rhs.x,
        }
    }
}

/// Best vector found by a block search, together with its match cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMatch {
    pub mv: MotionVector,
    pub cost: i32,
}
