//! Decoding of the selected file into host tensors.

use crate::config::LoaderConfig;
use crate::core::error::{SelectError, SelectResult};
use crate::core::tensor::{ImageTensor, MaskTensor};
use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult};
use log::debug;
use std::path::Path;

/// Tensors produced from one decoded file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// `[1, height, width, 3]`, values in `0.0..=1.0`.
    pub image: ImageTensor,
    /// `[1, height, width]` inverted alpha, or the blank mask when the file has no alpha.
    pub mask: MaskTensor,
    /// Whether the source carried an alpha channel.
    pub has_alpha: bool,
}

/// Decode `path`, apply its EXIF orientation and convert it to tensors.
pub fn decode_image(path: &Path, config: &LoaderConfig) -> SelectResult<DecodedImage> {
    let image = open_oriented(path).map_err(|source| SelectError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image_to_tensors(image, config))
}

/// Open and decode with the format guessed from content, then rotate/flip the
/// pixel grid as the orientation tag says. The tag itself is discarded.
fn open_oriented(path: &Path) -> ImageResult<DynamicImage> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Split an already decoded image into color and mask tensors.
pub fn image_to_tensors(image: DynamicImage, config: &LoaderConfig) -> DecodedImage {
    let has_alpha = image.color().has_alpha();
    let mask = if has_alpha {
        MaskTensor::from_inverted_alpha(&image.to_rgba8())
    } else {
        MaskTensor::blank(config.blank_mask_size)
    };

    DecodedImage {
        image: ImageTensor::from_rgb8(&image.to_rgb8()),
        mask,
        has_alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_rgb_gets_blank_mask() {
        let mut rgb = RgbImage::new(5, 3);
        rgb.put_pixel(4, 2, Rgb([255, 255, 255]));

        let decoded = image_to_tensors(DynamicImage::ImageRgb8(rgb), &LoaderConfig::default());
        assert!(!decoded.has_alpha);
        assert_eq!(decoded.image.shape(), &[1, 3, 5, 3]);
        assert_eq!(decoded.mask.shape(), &[1, 64, 64]);
        assert!(decoded.mask.as_array().iter().all(|&v| v == 0.0));
        assert_eq!(decoded.image.as_array()[[0, 2, 4, 1]], 1.0);
    }

    #[test]
    fn test_blank_mask_size_follows_config() {
        let config = LoaderConfig {
            blank_mask_size: 8,
            ..LoaderConfig::default()
        };
        let decoded = image_to_tensors(DynamicImage::ImageRgb8(RgbImage::new(2, 2)), &config);
        assert_eq!(decoded.mask.shape(), &[1, 8, 8]);
    }

    #[test]
    fn test_alpha_becomes_inverted_mask() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        rgba.put_pixel(2, 0, Rgba([0, 0, 255, 255]));

        let decoded = image_to_tensors(DynamicImage::ImageRgba8(rgba), &LoaderConfig::default());
        assert!(decoded.has_alpha);
        assert_eq!(decoded.image.shape(), &[1, 1, 3, 3]);
        assert_eq!(decoded.mask.shape(), &[1, 1, 3]);

        let mask = decoded.mask.as_array();
        assert_eq!(mask[[0, 0, 0]], 1.0);
        assert!((mask[[0, 0, 1]] - (1.0 - 128.0 / 255.0)).abs() < 1e-6);
        assert_eq!(mask[[0, 0, 2]], 0.0);

        // Color is kept as-is even where alpha is zero.
        assert_eq!(decoded.image.as_array()[[0, 0, 0, 0]], 1.0);
    }

    #[test]
    fn test_grayscale_expands_to_three_channels() {
        let gray = GrayImage::from_pixel(2, 2, Luma([51]));
        let decoded = image_to_tensors(DynamicImage::ImageLuma8(gray), &LoaderConfig::default());
        assert_eq!(decoded.image.shape(), &[1, 2, 2, 3]);
        assert!(decoded
            .image
            .as_array()
            .iter()
            .all(|&v| (v - 0.2).abs() < 1e-6));
    }

    #[test]
    fn test_decode_png_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_image(&path, &LoaderConfig::default()).unwrap();
        assert_eq!(decoded.image.shape(), &[1, 2, 4, 3]);
        assert_eq!(decoded.mask.shape(), &[1, 2, 4]);
        assert!(decoded.mask.as_array().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_decode_guesses_format_from_content() {
        let dir = tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        RgbImage::new(3, 3).save(&png_path).unwrap();
        let misnamed = dir.path().join("actually_png.jpg");
        std::fs::copy(&png_path, &misnamed).unwrap();

        let decoded = decode_image(&misnamed, &LoaderConfig::default()).unwrap();
        assert_eq!(decoded.image.shape(), &[1, 3, 3, 3]);
    }

    #[test]
    fn test_decode_applies_exif_orientation() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.jpg");
        RgbImage::new(4, 2).save(&plain).unwrap();

        // Splice an APP1 segment carrying Orientation = 6 (rotate 90 CW) right after SOI.
        let jpeg = std::fs::read(&plain).unwrap();
        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(&[b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        app1.extend_from_slice(&[0x00, 0x01]);
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        let mut rotated = jpeg[..2].to_vec();
        rotated.extend_from_slice(&app1);
        rotated.extend_from_slice(&jpeg[2..]);
        let path = dir.path().join("rotated.jpg");
        std::fs::write(&path, rotated).unwrap();

        let decoded = decode_image(&path, &LoaderConfig::default()).unwrap();
        assert_eq!(decoded.image.shape(), &[1, 4, 2, 3]);
    }

    #[test]
    fn test_decode_failure_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = decode_image(&path, &LoaderConfig::default()).unwrap_err();
        match err {
            SelectError::Decode { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
