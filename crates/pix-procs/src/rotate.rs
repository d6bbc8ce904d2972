/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Rotate filter: rotate an image by a multiple of 90 degrees
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// Rotate an image clockwise by `rotations * 90` degrees.
///
/// Negative counts rotate counterclockwise, a 90 and a 270 degree
/// rotation swap the image dimensions
pub struct Rotate {
    rotations: i32
}

impl Rotate {
    /// Create a new rotate operation
    #[must_use]
    pub fn new(rotations: i32) -> Rotate {
        Rotate { rotations }
    }
}

impl OperationsTrait for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let (width, height) = image.dimensions();
        let colorspace = image.colorspace();
        let components = colorspace.num_components();

        match self.rotations.rem_euclid(4) {
            1 => {
                let out = rotate_90(image.data(), width, height, components);
                image.set_data(out, height, width, colorspace)?;
            }
            2 => {
                rotate_180(image.data_mut(), components);
            }
            3 => {
                let out = rotate_270(image.data(), width, height, components);
                image.set_data(out, height, width, colorspace)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Rotate clockwise by 90 degrees, the output is `height` pixels
/// wide and `width` pixels tall
pub fn rotate_90(pixels: &[u8], width: usize, height: usize, components: usize) -> Vec<u8> {
    let mut out = vec![0; pixels.len()];

    for y in 0..height {
        for x in 0..width {
            let src = (y * width + x) * components;
            let dst = (x * height + (height - 1 - y)) * components;

            out[dst..dst + components].copy_from_slice(&pixels[src..src + components]);
        }
    }
    out
}

/// Rotate by 180 degrees in place by reversing the pixel order
pub fn rotate_180(pixels: &mut [u8], components: usize) {
    let count = pixels.len() / components;
    let mut front = 0;
    let mut back = count - 1;

    while front < back {
        for channel in 0..components {
            pixels.swap(front * components + channel, back * components + channel);
        }
        front += 1;
        back -= 1;
    }
}

/// Rotate counterclockwise by 90 degrees, the output is `height`
/// pixels wide and `width` pixels tall
pub fn rotate_270(pixels: &[u8], width: usize, height: usize, components: usize) -> Vec<u8> {
    let mut out = vec![0; pixels.len()];

    for y in 0..height {
        for x in 0..width {
            let src = (y * width + x) * components;
            let dst = ((width - 1 - x) * height + y) * components;

            out[dst..dst + components].copy_from_slice(&pixels[src..src + components]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pix_core::colorspace::ColorSpace;

    use super::*;

    fn three_by_two() -> Image {
        let pixels = vec![
            1, 2, 3, //
            4, 5, 6,
        ];
        Image::from_u8(&pixels, 3, 2, ColorSpace::Luma).unwrap()
    }

    #[test]
    fn clockwise_quarter_turn_swaps_dimensions() {
        let mut image = three_by_two();

        Rotate::new(1).execute(&mut image).unwrap();

        assert_eq!(image.dimensions(), (2, 3));
        let expected = vec![
            4, 1, //
            5, 2, //
            6, 3,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn half_turn_reverses_pixels() {
        let mut image = three_by_two();

        Rotate::new(2).execute(&mut image).unwrap();

        assert_eq!(image.dimensions(), (3, 2));
        let expected = vec![
            6, 5, 4, //
            3, 2, 1,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn negative_count_rotates_counterclockwise() {
        let mut image = three_by_two();

        Rotate::new(-1).execute(&mut image).unwrap();

        assert_eq!(image.dimensions(), (2, 3));
        let expected = vec![
            3, 6, //
            2, 5, //
            1, 4,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn four_turns_are_identity() {
        let mut image = three_by_two();
        let original = image.data().to_vec();

        Rotate::new(4).execute(&mut image).unwrap();

        assert_eq!(image.data(), original.as_slice());
    }
}
