/// An error type for the benchmark driver.
#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    /// The image to benchmark does not exist.
    #[error("test image does not exist: {0}")]
    ImageNotFound(std::path::PathBuf),

    /// Every decoding path must run at least once.
    #[error("Invalid number of runs: {0}. Must be at least 1")]
    InvalidRunCount(usize),

    /// The image has a channel count that no decoding path produces.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    /// Error reading, decoding or writing an image.
    #[error(transparent)]
    Io(#[from] jpegbench_io::IoError),

    /// Error comparing or creating images.
    #[error(transparent)]
    Image(#[from] jpegbench_image::ImageError),

    /// Error writing the report.
    #[error("Failed to write the report. {0}")]
    Report(#[from] std::io::Error),
}
