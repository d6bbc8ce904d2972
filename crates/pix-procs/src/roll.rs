/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Roll filter: shift an image along its axes with wrap around
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// Shift the image `vertical` rows down and `horizontal` columns
/// right, pixels pushed off one edge re-enter at the opposite one.
///
/// Negative shifts move the image up and left. Shifts larger than
/// the image wrap around
pub struct Roll {
    vertical:   i64,
    horizontal: i64
}

impl Roll {
    /// Create a new roll operation
    #[must_use]
    pub fn new(vertical: i64, horizontal: i64) -> Roll {
        Roll {
            vertical,
            horizontal
        }
    }
}

impl OperationsTrait for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let (width, height) = image.dimensions();
        let components = image.colorspace().num_components();

        let down = self.vertical.rem_euclid(height as i64) as usize;
        let right = self.horizontal.rem_euclid(width as i64) as usize;

        if down != 0 {
            let stride = width * components;
            // rotating the buffer right by n rows brings the last
            // n rows to the front
            image.data_mut().rotate_right(down * stride);
        }
        if right != 0 {
            for row in image.data_mut().chunks_exact_mut(width * components) {
                row.rotate_right(right * components);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pix_core::colorspace::ColorSpace;

    use super::*;

    fn three_by_three() -> Image {
        let pixels = vec![
            1, 2, 3, //
            4, 5, 6, //
            7, 8, 9,
        ];
        Image::from_u8(&pixels, 3, 3, ColorSpace::Luma).unwrap()
    }

    #[test]
    fn vertical_roll_wraps_rows() {
        let mut image = three_by_three();

        Roll::new(1, 0).execute(&mut image).unwrap();

        let expected = vec![
            7, 8, 9, //
            1, 2, 3, //
            4, 5, 6,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn horizontal_roll_wraps_columns() {
        let mut image = three_by_three();

        Roll::new(0, -1).execute(&mut image).unwrap();

        let expected = vec![
            2, 3, 1, //
            5, 6, 4, //
            8, 9, 7,
        ];
        assert_eq!(image.data(), expected.as_slice());
    }

    #[test]
    fn shifts_larger_than_the_image_wrap() {
        let mut image = three_by_three();
        let original = image.data().to_vec();

        Roll::new(3, -6).execute(&mut image).unwrap();

        assert_eq!(image.data(), original.as_slice());
    }
}
