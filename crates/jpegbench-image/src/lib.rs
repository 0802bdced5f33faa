#![deny(missing_docs)]
//! Image buffer type and pixel metrics for the jpegbench decoders

/// image representation for the decoded buffers.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Pixel difference metrics used for correctness checks.
pub mod metrics;

mod bincode;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
