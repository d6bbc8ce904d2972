/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Channel swap filter: reorder BGR pixels into RGB and back
use pix_core::colorspace::ColorSpace;
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// Swap the first and third channel of every pixel.
///
/// Turns BGR into RGB and vice versa, alpha channels stay in
/// place. Grayscale images pass through untouched
pub struct Bgr2Rgb;

impl Bgr2Rgb {
    /// Create a new channel swap operation
    #[must_use]
    pub fn new() -> Bgr2Rgb {
        Bgr2Rgb
    }
}

impl Default for Bgr2Rgb {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationsTrait for Bgr2Rgb {
    fn name(&self) -> &'static str {
        "bgr2rgb"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let colorspace = image.colorspace();

        if colorspace.is_grayscale() {
            return Ok(());
        }
        let components = colorspace.num_components();

        for pixel in image.data_mut().chunks_exact_mut(components) {
            pixel.swap(0, 2);
        }
        let swapped = match colorspace {
            ColorSpace::RGB => ColorSpace::BGR,
            ColorSpace::BGR => ColorSpace::RGB,
            ColorSpace::RGBA => ColorSpace::BGRA,
            ColorSpace::BGRA => ColorSpace::RGBA,
            other => other
        };
        image.metadata_mut().set_colorspace(swapped);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_first_and_third_channel() {
        let pixels = vec![10, 20, 30, 40, 50, 60];
        let mut image = Image::from_u8(&pixels, 2, 1, ColorSpace::BGR).unwrap();

        Bgr2Rgb::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[30, 20, 10, 60, 50, 40]);
        assert_eq!(image.colorspace(), ColorSpace::RGB);
    }

    #[test]
    fn alpha_channel_stays_in_place() {
        let pixels = vec![10, 20, 30, 200];
        let mut image = Image::from_u8(&pixels, 1, 1, ColorSpace::BGRA).unwrap();

        Bgr2Rgb::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[30, 20, 10, 200]);
        assert_eq!(image.colorspace(), ColorSpace::RGBA);
    }

    #[test]
    fn grayscale_images_pass_through() {
        let pixels = vec![1, 2, 3, 4];
        let mut image = Image::from_u8(&pixels, 2, 2, ColorSpace::Luma).unwrap();

        Bgr2Rgb::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[1, 2, 3, 4]);
        assert_eq!(image.colorspace(), ColorSpace::Luma);
    }
}
