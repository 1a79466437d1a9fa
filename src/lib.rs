//! 2D platformer character motion: grounding, run/crawl/slide, jumps,
//! climbing, wall jumps and mantling over per-side surface capabilities.

pub mod content;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
pub mod surfaces;
