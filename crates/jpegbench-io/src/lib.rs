#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, decoding failures
/// and array serialization errors.
pub mod error;

/// JPEG decoding paths and JPEG writing.
///
/// See [`jpeg::JpegDecoder`] for the zero-copy, copying and reduced accuracy decoders.
pub mod jpeg;

/// Reduced accuracy decoding with libjpeg's fast integer inverse DCT.
pub mod fastdct;

/// Reference image decoding with the image crate.
pub mod reference;

/// Serialized image arrays, used as the deserialization lower bound.
pub mod array;

pub use crate::error::IoError;
pub use crate::jpeg::{JpegDecoder, JpegInfo};
