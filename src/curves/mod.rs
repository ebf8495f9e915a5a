//! Reference curve construction and lookup
//!
//! - `builder.rs` - SD-offset rows -> P3..P97 percentile bands
//! - `interpolation.rs` - percentile bands at an arbitrary age

pub mod builder;
pub mod interpolation;

pub use builder::{build_percentile_bands, band_z_scores, SdReferencePoint, SD_OFFSETS};
pub use interpolation::interpolate_bands;
