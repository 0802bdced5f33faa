/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the JPEG image.
    #[error("Error with Jpeg decoding. {0}")]
    JpegDecodingError(#[from] zune_jpeg::errors::DecodeErrors),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// Error reported by libjpeg on the reduced accuracy path.
    #[error("Error with fast DCT decoding. {0}")]
    FastDecodingError(String),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] jpegbench_image::ImageError),

    /// Error to decode the image with the reference library.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The destination buffer does not match the JPEG resolution.
    #[error("Decoded image resolution ({0}, {1}) does not match the buffer ({2}, {3})")]
    DecodeMismatchResolution(usize, usize, usize, usize),

    /// The requested number of channels cannot be produced.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    /// Error to serialize an image array.
    #[error("Failed to encode the image array. {0}")]
    ArrayEncodeError(#[from] bincode::error::EncodeError),

    /// Error to deserialize an image array.
    #[error("Failed to decode the image array. {0}")]
    ArrayDecodeError(#[from] bincode::error::DecodeError),
}
