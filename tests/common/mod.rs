pub mod clip;

pub use clip::{ClipContentType, TestClipConfig, interior_macroblocks};
