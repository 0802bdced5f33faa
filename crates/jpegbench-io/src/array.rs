use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use jpegbench_image::Image;

use crate::error::IoError;

/// Extension of the serialized image array files.
pub const ARRAY_EXTENSION: &str = "bin";

/// Path of the serialized array file that accompanies an image file.
///
/// # Example
///
/// ```
/// use jpegbench_io::array::array_path_for;
///
/// assert_eq!(array_path_for("data/test.jpg"), std::path::PathBuf::from("data/test.bin"));
/// ```
pub fn array_path_for(image_path: impl AsRef<Path>) -> PathBuf {
    image_path.as_ref().with_extension(ARRAY_EXTENSION)
}

/// Writes the decoded samples of an image to a file.
///
/// The image is stored with bincode's standard configuration: width, height,
/// channels and the raw samples.
///
/// # Arguments
///
/// * `file_path` - The path of the array file.
/// * `image` - The image to store.
///
/// # Returns
///
/// The number of bytes written.
pub fn write_image_array<const C: usize>(
    file_path: impl AsRef<Path>,
    image: &Image<u8, C>,
) -> Result<usize, IoError> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    let num_bytes =
        bincode::encode_into_std_write(image, &mut writer, bincode::config::standard())?;
    writer.flush()?;
    Ok(num_bytes)
}

/// Reads an image previously stored with [`write_image_array`].
///
/// # Arguments
///
/// * `file_path` - The path of the array file.
pub fn read_image_array<const C: usize>(
    file_path: impl AsRef<Path>,
) -> Result<Image<u8, C>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(file_path)?);
    Ok(bincode::decode_from_std_read(
        &mut reader,
        bincode::config::standard(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_array() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = array_path_for(tmp_dir.path().join("image.jpg"));
        assert_eq!(file_path.extension().and_then(|e| e.to_str()), Some("bin"));

        let image = Image::<u8, 3>::new([4, 3].into(), (0..36).collect())?;
        let num_bytes = write_image_array(&file_path, &image)?;
        assert_eq!(std::fs::metadata(&file_path)?.len() as usize, num_bytes);

        let image_back: Image<u8, 3> = read_image_array(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn read_array_wrong_channels() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.bin");

        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 9)?;
        write_image_array(&file_path, &image)?;

        let res: Result<Image<u8, 1>, _> = read_image_array(&file_path);
        assert!(matches!(res, Err(IoError::ArrayDecodeError(_))));
        Ok(())
    }
}
