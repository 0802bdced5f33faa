use crate::error::IoError;
use jpeg_encoder::{ColorType, Encoder};
use crate::fastdct::{decode_bytes_with, FastDctOptions};
use jpegbench_image::{Image, ImageSize};
use std::{fs, path::Path};
use zune_core::{colorspace::ColorSpace, options::DecoderOptions};

/// Image information read from the JPEG header, without decoding any pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JpegInfo {
    /// The size of the image in pixels.
    pub size: ImageSize,
    /// The number of channels of the decoded image: 1 for grayscale files, 3 otherwise.
    pub channels: usize,
}

/// A JPEG decoder handle exposing the decode paths compared by the benchmark.
///
/// All paths produce row-major samples: luma for single channel images and RGB for
/// three channel images.
pub struct JpegDecoder {
    options: DecoderOptions,
}

impl Default for JpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegDecoder {
    /// Creates a new `JpegDecoder`.
    pub fn new() -> Self {
        let options = DecoderOptions::default()
            .set_strict_mode(false)
            .set_max_width(usize::MAX)
            .set_max_height(usize::MAX);
        Self { options }
    }

    /// Reads the size and channel count of a JPEG file.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the JPEG image.
    pub fn read_info(&self, file_path: impl AsRef<Path>) -> Result<JpegInfo, IoError> {
        let jpeg_data = read_jpeg_file(file_path)?;
        self.read_header(&jpeg_data)
    }

    /// Reads the size and channel count from in-memory JPEG data.
    ///
    /// # Arguments
    ///
    /// * `jpeg_data` - The JPEG data to read the header from.
    pub fn read_header(&self, jpeg_data: &[u8]) -> Result<JpegInfo, IoError> {
        let mut decoder = zune_jpeg::JpegDecoder::new_with_options(jpeg_data, self.options);
        decoder.decode_headers()?;

        let image_info = decoder.info().ok_or_else(missing_info)?;
        let channels = if image_info.components == 1 { 1 } else { 3 };

        Ok(JpegInfo {
            size: ImageSize {
                width: image_info.width as usize,
                height: image_info.height as usize,
            },
            channels,
        })
    }

    /// Decodes a JPEG file directly into a pre-allocated image.
    ///
    /// No allocation is made for the output pixels; the decoder writes into `dst`.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the JPEG image.
    /// * `dst` - The destination image. Its size must match the JPEG resolution.
    pub fn decode_into<const C: usize>(
        &self,
        file_path: impl AsRef<Path>,
        dst: &mut Image<u8, C>,
    ) -> Result<(), IoError> {
        let jpeg_data = read_jpeg_file(file_path)?;
        self.decode_bytes_into(&jpeg_data, dst)
    }

    /// Decodes in-memory JPEG data into a pre-allocated image.
    ///
    /// # Arguments
    ///
    /// * `jpeg_data` - Raw bytes of the jpeg file.
    /// * `dst` - The destination image. Its size must match the JPEG resolution.
    pub fn decode_bytes_into<const C: usize>(
        &self,
        jpeg_data: &[u8],
        dst: &mut Image<u8, C>,
    ) -> Result<(), IoError> {
        let options = self.options.jpeg_set_out_colorspace(out_colorspace::<C>()?);
        let mut decoder = zune_jpeg::JpegDecoder::new_with_options(jpeg_data, options);
        decoder.decode_headers()?;

        let image_info = decoder.info().ok_or_else(missing_info)?;

        if [image_info.height as usize, image_info.width as usize] != [dst.height(), dst.width()] {
            return Err(IoError::DecodeMismatchResolution(
                image_info.height as usize,
                image_info.width as usize,
                dst.height(),
                dst.width(),
            ));
        }

        decoder.decode_into(dst.as_slice_mut())?;
        Ok(())
    }

    /// Decodes a JPEG file into a newly allocated image.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the JPEG image.
    pub fn decode<const C: usize>(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<Image<u8, C>, IoError> {
        let jpeg_data = read_jpeg_file(file_path)?;
        self.decode_bytes(&jpeg_data)
    }

    /// Decodes in-memory JPEG data into a newly allocated image.
    ///
    /// # Arguments
    ///
    /// * `jpeg_data` - Raw bytes of the jpeg file.
    pub fn decode_bytes<const C: usize>(&self, jpeg_data: &[u8]) -> Result<Image<u8, C>, IoError> {
        let (size, data) = self.decode_raw(jpeg_data, out_colorspace::<C>()?)?;
        Ok(Image::new(size, data)?)
    }

    /// Decodes a JPEG file into a newly allocated image with the reduced accuracy path.
    ///
    /// The file is decoded by libjpeg with the fast integer inverse DCT and chroma
    /// replication instead of fancy upsampling, see [`FastDctOptions`]. Both skip work
    /// of the accurate path, so the output can differ from [`JpegDecoder::decode`] by a
    /// few intensity levels.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the JPEG image.
    pub fn decode_fast<const C: usize>(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<Image<u8, C>, IoError> {
        let jpeg_data = read_jpeg_file(file_path)?;
        self.decode_bytes_fast(&jpeg_data)
    }

    /// Decodes in-memory JPEG data with the reduced accuracy path.
    ///
    /// # Arguments
    ///
    /// * `jpeg_data` - Raw bytes of the jpeg file.
    pub fn decode_bytes_fast<const C: usize>(
        &self,
        jpeg_data: &[u8],
    ) -> Result<Image<u8, C>, IoError> {
        decode_bytes_with(jpeg_data, FastDctOptions::default())
    }

    fn decode_raw(
        &self,
        jpeg_data: &[u8],
        colorspace: ColorSpace,
    ) -> Result<(ImageSize, Vec<u8>), IoError> {
        let options = self.options.jpeg_set_out_colorspace(colorspace);
        let mut decoder = zune_jpeg::JpegDecoder::new_with_options(jpeg_data, options);
        decoder.decode_headers()?;

        let image_info = decoder.info().ok_or_else(missing_info)?;

        let image_size = ImageSize {
            width: image_info.width as usize,
            height: image_info.height as usize,
        };

        let img_data = decoder.decode()?;

        Ok((image_size, img_data))
    }
}

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image containing the pixel data.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    write_image_jpeg_imp(file_path, image, ColorType::Rgb, quality)
}

/// Writes the given JPEG _(grayscale)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image containing the pixel data.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
    quality: u8,
) -> Result<(), IoError> {
    write_image_jpeg_imp(file_path, image, ColorType::Luma, quality)
}

fn write_image_jpeg_imp<const N: usize>(
    file_path: impl AsRef<Path>,
    image: &Image<u8, N>,
    color_type: ColorType,
    quality: u8,
) -> Result<(), IoError> {
    let image_size = image.size();
    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(
        image.as_slice(),
        image_size.width as u16,
        image_size.height as u16,
        color_type,
    )?;
    Ok(())
}

/// Reads the raw bytes of a JPEG file after checking it exists.
///
/// The extension is not checked; files that are not JPEG fail when decoding.
pub(crate) fn read_jpeg_file(file_path: impl AsRef<Path>) -> Result<Vec<u8>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    Ok(fs::read(file_path)?)
}

fn out_colorspace<const C: usize>() -> Result<ColorSpace, IoError> {
    match C {
        1 => Ok(ColorSpace::Luma),
        3 => Ok(ColorSpace::RGB),
        _ => Err(IoError::UnsupportedChannels(C)),
    }
}

fn missing_info() -> IoError {
    IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
        "Failed to find image info from its metadata",
    )))
}
