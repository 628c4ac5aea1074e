//! Float tensors handed to the host.
//!
//! Images travel as `[batch, height, width, channels]` and masks as
//! `[batch, height, width]`, both `f32` in `0.0..=1.0`. A loader only ever
//! produces single-item batches.

use image::{RgbImage, RgbaImage};
use ndarray::{Array3, Array4};
use serde::{Deserialize, Serialize};

/// Batch of RGB images, shape `[batch, height, width, 3]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTensor(Array4<f32>);

/// Batch of single-channel masks, shape `[batch, height, width]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskTensor(Array3<f32>);

impl ImageTensor {
    /// Normalize an 8-bit RGB buffer into a single-item batch.
    pub fn from_rgb8(rgb: &RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        let data = Array4::from_shape_fn(
            (1, height as usize, width as usize, 3),
            |(_, y, x, c)| rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
        );
        Self(data)
    }

    /// Wrap an existing array.
    pub fn from_array(data: Array4<f32>) -> Self {
        Self(data)
    }

    /// Tensor shape.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Number of items in the batch.
    pub fn batch_size(&self) -> usize {
        self.0.shape()[0]
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.0.shape()[1]
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.0.shape()[2]
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }

    /// Take the underlying array.
    pub fn into_array(self) -> Array4<f32> {
        self.0
    }
}

impl MaskTensor {
    /// Mask meaning "no mask": a `size`x`size` square of zeros.
    pub fn blank(size: usize) -> Self {
        Self(Array3::zeros((1, size, size)))
    }

    /// Inverted alpha channel: opaque pixels become 0.0, transparent ones 1.0.
    pub fn from_inverted_alpha(rgba: &RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let data = Array3::from_shape_fn((1, height as usize, width as usize), |(_, y, x)| {
            1.0 - rgba.get_pixel(x as u32, y as u32)[3] as f32 / 255.0
        });
        Self(data)
    }

    /// Wrap an existing array.
    pub fn from_array(data: Array3<f32>) -> Self {
        Self(data)
    }

    /// Tensor shape.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.0.shape()[1]
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.0.shape()[2]
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array3<f32> {
        &self.0
    }

    /// Take the underlying array.
    pub fn into_array(self) -> Array3<f32> {
        self.0
    }
}
