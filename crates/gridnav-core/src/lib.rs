//! Core types for the overhead routing pipeline.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about corner detection strategies, grids, or planning; it provides the
//! image buffers, the canonical corner ordering, and the perspective
//! transform the rest of the workspace builds on.

mod corners;
mod error;
mod image;
mod logger;
mod transform;

pub use corners::CornerSet;
pub use error::GeometryError;
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use logger::init_with_level;
pub use transform::{rectify, resample, Transform};
