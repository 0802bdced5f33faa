use std::panic::{catch_unwind, AssertUnwindSafe};

use jpegbench_image::{Image, ImageSize};
use mozjpeg::{DctMethod, Decompress};

use crate::error::IoError;

/// Decoder settings of the reduced accuracy path.
#[derive(Clone, Copy, Debug)]
pub struct FastDctOptions {
    /// Inverse DCT algorithm.
    pub dct_method: DctMethod,
    /// Whether chroma is upsampled with the triangle filter instead of replication.
    pub fancy_upsampling: bool,
}

impl Default for FastDctOptions {
    fn default() -> Self {
        Self {
            dct_method: DctMethod::IntegerFast,
            fancy_upsampling: false,
        }
    }
}

/// Decodes in-memory JPEG data with libjpeg, using the given inverse DCT and upsampling.
///
/// libjpeg reports corrupt data by unwinding, which is caught and returned as
/// [`IoError::FastDecodingError`].
///
/// # Arguments
///
/// * `jpeg_data` - Raw bytes of the jpeg file.
/// * `options` - The inverse DCT and chroma upsampling to use.
pub fn decode_bytes_with<const C: usize>(
    jpeg_data: &[u8],
    options: FastDctOptions,
) -> Result<Image<u8, C>, IoError> {
    if C != 1 && C != 3 {
        return Err(IoError::UnsupportedChannels(C));
    }

    let decoded = catch_unwind(AssertUnwindSafe(
        || -> std::io::Result<(ImageSize, Vec<u8>)> {
            let mut decompress = Decompress::new_mem(jpeg_data)?;
            decompress.dct_method(options.dct_method);
            decompress.do_fancy_upsampling(options.fancy_upsampling);

            let mut started = if C == 1 {
                decompress.grayscale()?
            } else {
                decompress.rgb()?
            };

            let size = ImageSize {
                width: started.width(),
                height: started.height(),
            };
            let data = started.read_scanlines::<u8>()?;
            started.finish()?;
            Ok((size, data))
        },
    ));

    let (size, data) = match decoded {
        Ok(res) => res.map_err(|e| IoError::FastDecodingError(e.to_string()))?,
        Err(payload) => {
            let msg = payload
                .downcast::<String>()
                .map(|msg| *msg)
                .unwrap_or_else(|_| String::from("libjpeg aborted the decode"));
            return Err(IoError::FastDecodingError(msg));
        }
    };

    log::debug!("decoded {} with {:?}", size, options);

    Ok(Image::new(size, data)?)
}
