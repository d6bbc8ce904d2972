/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Histogram equalization filter: spread pixel intensities over
//! the full range
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;

/// Equalize the histogram of every channel independently.
///
/// Each channel is remapped through the cumulative distribution of
/// its own intensities, `v` becomes `255 * cdf(v) / cdf(255)`
pub struct HistogramEqualize;

impl HistogramEqualize {
    /// Create a new histogram equalization operation
    #[must_use]
    pub fn new() -> HistogramEqualize {
        HistogramEqualize
    }
}

impl Default for HistogramEqualize {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationsTrait for HistogramEqualize {
    fn name(&self) -> &'static str {
        "histogram-equalize"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors> {
        let components = image.colorspace().num_components();

        for channel in 0..components {
            equalize_channel(image.data_mut(), channel, components);
        }
        Ok(())
    }
}

/// Equalize one channel of an interleaved pixel buffer
pub fn equalize_channel(pixels: &mut [u8], channel: usize, components: usize) {
    let mut histogram = [0_u64; 256];

    for pixel in pixels.chunks_exact(components) {
        histogram[usize::from(pixel[channel])] += 1;
    }
    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return;
    }

    let mut lut = [0_u8; 256];
    let mut cumulative = 0_u64;

    for (value, count) in histogram.iter().enumerate() {
        cumulative += count;
        lut[value] = (255.0 * cumulative as f64 / total as f64) as u8;
    }
    for pixel in pixels.chunks_exact_mut(components) {
        pixel[channel] = lut[usize::from(pixel[channel])];
    }
}

#[cfg(test)]
mod tests {
    use pix_core::colorspace::ColorSpace;

    use super::*;

    #[test]
    fn uniform_histogram_spreads_to_full_range() {
        // four equally common intensities, their cdf steps are
        // 1/4, 2/4, 3/4 and 4/4
        let pixels = vec![0, 1, 2, 3];
        let mut image = Image::from_u8(&pixels, 2, 2, ColorSpace::Luma).unwrap();

        HistogramEqualize::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[63, 127, 191, 255]);
    }

    #[test]
    fn constant_channel_maps_to_top_of_range() {
        let pixels = vec![42, 42, 42, 42];
        let mut image = Image::from_u8(&pixels, 2, 2, ColorSpace::Luma).unwrap();

        HistogramEqualize::new().execute(&mut image).unwrap();

        assert_eq!(image.data(), &[255, 255, 255, 255]);
    }

    #[test]
    fn channels_are_equalized_independently() {
        // two interleaved channels over four pixels
        let mut data = vec![
            0, 42, 10, 42, //
            20, 42, 30, 42,
        ];
        equalize_channel(&mut data, 1, 2);

        // the second channel is constant, the first is untouched
        assert_eq!(data, vec![0, 255, 10, 255, 20, 255, 30, 255]);
    }
}
