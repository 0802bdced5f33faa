use crate::{error::ImageError, image::Image};
use num_traits::AsPrimitive;

/// Statistics of the element-wise absolute difference between two images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffStats {
    /// The largest absolute difference over all samples.
    pub max: f64,
    /// The average absolute difference over all samples.
    pub mean: f64,
}

/// Compute the absolute difference statistics between two images.
///
/// The mean absolute difference is defined as:
///
/// $ MAD(a, b) = \frac{1}{N} \sum_{i=1}^{N} |a_i - b_i| $
///
/// where `a` and `b` are the two images and `N` is the number of samples.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Returns
///
/// The maximum and mean absolute difference. Empty images yield zero for both.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the two images have different shapes.
///
/// # Example
///
/// ```
/// use jpegbench_image::{Image, ImageSize};
/// use jpegbench_image::metrics::abs_diff;
///
/// let image1 = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0, 10, 20, 30],
/// )
/// .unwrap();
///
/// let image2 = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![4, 10, 20, 26],
/// )
/// .unwrap();
///
/// let stats = abs_diff(&image1, &image2).unwrap();
/// assert_eq!(stats.max, 4.0);
/// assert_eq!(stats.mean, 2.0);
/// ```
pub fn abs_diff<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<DiffStats, ImageError>
where
    T: AsPrimitive<f64>,
{
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.height(),
            image1.width(),
            image2.height(),
            image2.width(),
        ));
    }

    let (max, sum) = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .fold((0f64, 0f64), |(max, sum), (&a, &b)| {
            let d = (a.as_() - b.as_()).abs();
            (max.max(d), sum + d)
        });

    let n = image1.numel();
    let mean = if n == 0 { 0.0 } else { sum / n as f64 };

    Ok(DiffStats { max, mean })
}

#[cfg(test)]
mod tests {
    use super::abs_diff;
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn test_abs_diff_identical() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6])?;
        let stats = abs_diff(&image, &image.clone())?;
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.mean, 0.0);
        Ok(())
    }

    #[test]
    fn test_abs_diff_is_symmetric() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::new([3, 1].into(), vec![0, 255, 100])?;
        let image2 = Image::<u8, 1>::new([3, 1].into(), vec![255, 0, 97])?;

        let a = abs_diff(&image1, &image2)?;
        let b = abs_diff(&image2, &image1)?;
        assert_eq!(a, b);
        assert_eq!(a.max, 255.0);
        assert_eq!(a.mean, (255.0 + 255.0 + 3.0) / 3.0);
        Ok(())
    }

    #[test]
    fn test_abs_diff_size_mismatch() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;
        let image2 = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        assert!(matches!(
            abs_diff(&image1, &image2),
            Err(ImageError::InvalidImageSize(3, 2, 2, 3))
        ));
        Ok(())
    }
}
