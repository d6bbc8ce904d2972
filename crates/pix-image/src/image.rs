/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! This module represents a single image
//!
//! An image is a contiguous, interleaved `u8` pixel buffer in
//! row major order plus the metadata describing its layout,
//! `height * width * components` bytes with no padding between rows.
use pix_core::bit_depth::BitDepth;
use pix_core::colorspace::ColorSpace;

use crate::errors::{ImgErrors, ImgOperationsErrors};
use crate::metadata::ImageMetadata;

/// Maximum supported color channels
pub const MAX_CHANNELS: usize = 4;

/// A single decoded image
#[derive(Clone)]
pub struct Image {
    pub(crate) data:     Vec<u8>,
    pub(crate) metadata: ImageMetadata
}

impl Image {
    /// Create an image from an interleaved pixel buffer.
    ///
    /// # Errors
    /// Returns an error if the buffer length does not match
    /// `width * height * colorspace.num_components()`, if either
    /// dimension is zero or if the colorspace is unknown
    pub fn from_u8(
        pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImgErrors> {
        check_layout(width, height, colorspace)?;

        let expected = width
            .checked_mul(height)
            .and_then(|size| size.checked_mul(colorspace.num_components()));

        if expected != Some(pixels.len()) {
            return Err(ImgErrors::OperationsErrors(
                ImgOperationsErrors::GenericString(format!(
                    "wrong pixel buffer length, expected {:?} bytes but found {}",
                    expected,
                    pixels.len()
                ))
            ));
        }
        let mut metadata = ImageMetadata::default();

        metadata.set_dimensions(width, height);
        metadata.set_colorspace(colorspace);
        metadata.set_depth(BitDepth::Eight);

        Ok(Image {
            data: pixels.to_vec(),
            metadata
        })
    }

    /// Image dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        self.metadata.dimensions()
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.metadata.colorspace()
    }

    /// Number of channels per pixel, derived from the colorspace
    pub const fn channels(&self) -> usize {
        self.metadata.colorspace().num_components()
    }

    pub const fn depth(&self) -> BitDepth {
        self.metadata.depth()
    }

    pub const fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ImageMetadata {
        &mut self.metadata
    }

    /// The interleaved pixel buffer
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the interleaved pixel buffer.
    ///
    /// Transforms that change dimensions or colorspace must also
    /// update the metadata to match
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Consume the image, returning the pixel buffer
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Replace the pixel buffer and layout in one step, keeping
    /// buffer and metadata consistent
    pub fn set_data(
        &mut self, data: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<(), ImgErrors> {
        check_layout(width, height, colorspace)?;

        let expected = width * height * colorspace.num_components();

        if data.len() != expected {
            return Err(ImgErrors::OperationsErrors(
                ImgOperationsErrors::GenericString(format!(
                    "wrong pixel buffer length, expected {expected} bytes but found {}",
                    data.len()
                ))
            ));
        }
        self.data = data;
        self.metadata.set_dimensions(width, height);
        self.metadata.set_colorspace(colorspace);

        Ok(())
    }
}

fn check_layout(
    width: usize, height: usize, colorspace: ColorSpace
) -> Result<(), ImgErrors> {
    if width == 0 || height == 0 {
        return Err(ImgErrors::GenericStr("width or height is zero"));
    }
    if colorspace == ColorSpace::Unknown {
        return Err(ImgErrors::GenericStr("unknown colorspace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_must_match_layout() {
        let pixels = vec![0_u8; 2 * 3 * 3];

        assert!(Image::from_u8(&pixels, 3, 2, ColorSpace::RGB).is_ok());
        assert!(Image::from_u8(&pixels, 3, 2, ColorSpace::RGBA).is_err());
        assert!(Image::from_u8(&pixels, 4, 2, ColorSpace::RGB).is_err());
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        assert!(Image::from_u8(&[], 0, 2, ColorSpace::RGB).is_err());
        assert!(Image::from_u8(&[], 2, 0, ColorSpace::RGB).is_err());
        assert!(Image::from_u8(&[], 2, 2, ColorSpace::Unknown).is_err());
    }

    #[test]
    fn set_data_updates_metadata() {
        let pixels = vec![0_u8; 4 * 4 * 3];
        let mut image = Image::from_u8(&pixels, 4, 4, ColorSpace::RGB).unwrap();

        image
            .set_data(vec![255; 2 * 2 * 4], 2, 2, ColorSpace::RGBA)
            .unwrap();

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.colorspace(), ColorSpace::RGBA);
        assert_eq!(image.data().len(), 16);
    }
}
