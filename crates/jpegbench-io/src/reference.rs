use std::path::Path;

use jpegbench_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image with the reference imaging library.
///
/// The method decodes any format supported by the image crate, guessing it from the
/// file content, and converts the result to luma (`C = 1`) or RGB (`C = 3`). This is the
/// ground truth every other decode path is compared against.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the decoded pixel data.
pub fn read_image_reference<const C: usize>(
    file_path: impl AsRef<Path>,
) -> Result<Image<u8, C>, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let data = match C {
        1 => img.into_luma8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        _ => return Err(IoError::UnsupportedChannels(C)),
    };

    Ok(Image::new(size, data)?)
}
