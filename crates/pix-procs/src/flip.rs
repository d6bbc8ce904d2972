/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Flip filter: reflect an image around one of its axes
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// Axis a [`Flip`] reflects around
#[derive(Copy, Clone, Debug)]
pub enum FlipDirection {
    /// Creates a mirror image by reflecting the pixels around the
    /// central y-axis
    ///```text
    ///old image     new image
    ///┌─────────┐   ┌──────────┐
    ///│a b c d e│   │e d c b a │
    ///│f g h i j│   │j i h g f │
    ///└─────────┘   └──────────┘
    ///```
    Horizontal,
    /// Reverses the row order, reflecting the pixels around the
    /// central x-axis
    ///```text
    ///old image     new image
    ///┌─────────┐   ┌──────────┐
    ///│a b c d e│   │f g h i j │
    ///│f g h i j│   │a b c d e │
    ///└─────────┘   └──────────┘
    ///```
    Vertical
}

/// Flip an image in a certain direction
pub struct Flip {
    flip_direction: FlipDirection
}

impl Flip {
    /// Create a new flip operation
    #[must_use]
    pub fn new(flip_direction: FlipDirection) -> Flip {
        Flip { flip_direction }
    }
}

impl OperationsTrait for Flip {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let (width, _) = image.dimensions();
        let components = image.colorspace().num_components();

        match self.flip_direction {
            FlipDirection::Horizontal => {
                horizontal_flip(image.data_mut(), width, components);
            }
            FlipDirection::Vertical => {
                vertical_flip(image.data_mut(), width * components);
            }
        }
        Ok(())
    }
}

/// Reverse the pixel order inside every row
pub fn horizontal_flip(pixels: &mut [u8], width: usize, components: usize) {
    for row in pixels.chunks_exact_mut(width * components) {
        let mut left = 0;
        let mut right = width - 1;

        while left < right {
            for channel in 0..components {
                row.swap(left * components + channel, right * components + channel);
            }
            left += 1;
            right -= 1;
        }
    }
}

/// Reverse the row order, `stride` is the length of one row in bytes
pub fn vertical_flip(pixels: &mut [u8], stride: usize) {
    if stride == 0 {
        return;
    }
    // swap the topmost row with the bottom one moving inwards, the
    // middle row of an odd height stays put
    let half = (pixels.len() / stride) / 2 * stride;
    let (top, bottom) = pixels.split_at_mut(pixels.len() - half);

    for (top_row, bottom_row) in top
        .chunks_exact_mut(stride)
        .zip(bottom.chunks_exact_mut(stride).rev())
    {
        top_row.swap_with_slice(bottom_row);
    }
}

#[cfg(test)]
mod tests {
    use pix_core::colorspace::ColorSpace;

    use super::*;

    #[test]
    fn horizontal_flip_reverses_pixels_in_rows() {
        let pixels = vec![
            1, 1, 1, 2, 2, 2, 3, 3, 3, //
            4, 4, 4, 5, 5, 5, 6, 6, 6,
        ];
        let mut image = Image::from_u8(&pixels, 3, 2, ColorSpace::RGB).unwrap();

        Flip::new(FlipDirection::Horizontal).execute(&mut image).unwrap();

        let expected = vec![
            3, 3, 3, 2, 2, 2, 1, 1, 1, //
            6, 6, 6, 5, 5, 5, 4, 4, 4,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn vertical_flip_reverses_row_order() {
        let pixels = vec![
            1, 2, 3, //
            4, 5, 6, //
            7, 8, 9,
        ];
        let mut image = Image::from_u8(&pixels, 3, 3, ColorSpace::Luma).unwrap();

        Flip::new(FlipDirection::Vertical).execute(&mut image).unwrap();

        let expected = vec![
            7, 8, 9, //
            4, 5, 6, //
            1, 2, 3,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }
}
