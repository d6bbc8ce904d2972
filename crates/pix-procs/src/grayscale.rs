/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Grayscale filter: reduce an image to its luminance
use pix_core::colorspace::ColorSpace;
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// ITU-R BT.709 luminance weights for the first, second and third
/// channel in storage order
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Convert an image to grayscale.
///
/// The luminance is computed from the first three channels in
/// storage order and replicated into a three channel image, an
/// alpha channel is dropped. Grayscale images pass through
/// untouched
pub struct Grayscale;

impl Grayscale {
    /// Create a new grayscale operation
    #[must_use]
    pub fn new() -> Grayscale {
        Grayscale
    }
}

impl Default for Grayscale {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationsTrait for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let colorspace = image.colorspace();

        if colorspace.is_grayscale() {
            return Ok(());
        }
        let (width, height) = image.dimensions();
        let components = colorspace.num_components();

        let mut out = Vec::with_capacity(width * height * 3);

        for pixel in image.data().chunks_exact(components) {
            let luma = LUMA_WEIGHTS[0] * f32::from(pixel[0])
                + LUMA_WEIGHTS[1] * f32::from(pixel[1])
                + LUMA_WEIGHTS[2] * f32::from(pixel[2]);
            let luma = luma.clamp(0.0, 255.0) as u8;

            out.extend_from_slice(&[luma, luma, luma]);
        }
        let out_colorspace = match colorspace {
            ColorSpace::BGR | ColorSpace::BGRA => ColorSpace::BGR,
            _ => ColorSpace::RGB
        };
        image.set_data(out, width, height, out_colorspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_is_replicated_across_channels() {
        // pure first, second and third channel pixels
        let pixels = vec![
            255, 0, 0, //
            0, 255, 0, //
            0, 0, 255,
        ];
        let mut image = Image::from_u8(&pixels, 3, 1, ColorSpace::RGB).unwrap();

        Grayscale::new().execute(&mut image).unwrap();

        // 255 * 0.2126 = 54.2, 255 * 0.7152 = 182.3, 255 * 0.0722 = 18.4
        let expected = vec![
            54, 54, 54, //
            182, 182, 182, //
            18, 18, 18,
        ];
        assert_eq!(image.data(), expected.as_slice());
        assert_eq!(image.colorspace(), ColorSpace::RGB);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let pixels = vec![255, 0, 0, 255];
        let mut image = Image::from_u8(&pixels, 1, 1, ColorSpace::RGBA).unwrap();

        Grayscale::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[54, 54, 54]);
        assert_eq!(image.colorspace(), ColorSpace::RGB);
    }

    #[test]
    fn grayscale_images_pass_through() {
        let pixels = vec![7, 8];
        let mut image = Image::from_u8(&pixels, 2, 1, ColorSpace::Luma).unwrap();

        Grayscale::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[7, 8]);
        assert_eq!(image.colorspace(), ColorSpace::Luma);
    }
}
