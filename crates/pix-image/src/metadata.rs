/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Image metadata shared by every decoded image
use pix_core::bit_depth::BitDepth;
use pix_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;

/// Information about an image that is not pixel data.
///
/// Filled in by decoders from image headers and consulted by
/// encoders and transforms.
#[derive(Clone, Debug)]
pub struct ImageMetadata {
    pub format:     Option<ImageFormat>,
    pub colorspace: ColorSpace,
    pub depth:      BitDepth,
    pub width:      usize,
    pub height:     usize
}

impl Default for ImageMetadata {
    fn default() -> Self {
        ImageMetadata {
            format:     None,
            colorspace: ColorSpace::Unknown,
            depth:      BitDepth::Eight,
            width:      0,
            height:     0
        }
    }
}

impl ImageMetadata {
    /// Return dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    /// The format the image was decoded from, if it was decoded
    pub const fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn set_colorspace(&mut self, colorspace: ColorSpace) {
        self.colorspace = colorspace;
    }

    pub fn set_depth(&mut self, depth: BitDepth) {
        self.depth = depth;
    }

    pub fn set_format(&mut self, format: ImageFormat) {
        self.format = Some(format);
    }
}
