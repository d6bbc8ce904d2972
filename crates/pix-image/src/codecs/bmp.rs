/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! BMP support
//!
//! Decoding and encoding are done by the delegate library
//! [pix-bmp](pix_bmp)
#![cfg(feature = "bmp")]

use pix_core::bit_depth::BitDepth;
use pix_core::bytestream::{ByteReaderTrait, ByteWriterTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::EncoderOptions;
pub use pix_bmp::*;

use crate::codecs::{create_options_for_encoder, ImageFormat};
use crate::errors::ImgErrors;
use crate::image::Image;
use crate::metadata::ImageMetadata;
use crate::traits::{DecoderTrait, EncoderTrait};

impl<T> DecoderTrait for BmpDecoder<T>
where
    T: ByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImgErrors> {
        let pixels = self.decode()?;
        let (width, height) = self.dimensions().unwrap();
        let colorspace = self.colorspace().unwrap();

        Image::from_u8(&pixels, width, height, colorspace)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions()
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace().unwrap_or(ColorSpace::Unknown)
    }

    fn name(&self) -> &'static str {
        "BMP Decoder"
    }

    fn read_headers(&mut self) -> Result<Option<ImageMetadata>, ImgErrors> {
        self.decode_headers()?;

        let (width, height) = self.dimensions().unwrap();

        let metadata = ImageMetadata {
            format: Some(ImageFormat::BMP),
            colorspace: self.colorspace().unwrap(),
            depth: BitDepth::Eight,
            width,
            height
        };

        Ok(Some(metadata))
    }
}

/// BMP encoding adapter.
///
/// Wraps [pix_bmp::BmpEncoder] so it can be driven through
/// [`EncoderTrait`]
#[derive(Default)]
pub struct BmpEncoder {
    options: Option<EncoderOptions>
}

impl BmpEncoder {
    pub fn new() -> BmpEncoder {
        BmpEncoder::default()
    }

    pub fn new_with_options(options: EncoderOptions) -> BmpEncoder {
        BmpEncoder {
            options: Some(options)
        }
    }
}

impl EncoderTrait for BmpEncoder {
    fn name(&self) -> &'static str {
        "BMP Encoder"
    }

    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImgErrors> {
        let options = create_options_for_encoder(self.options, image);

        let encoder = pix_bmp::BmpEncoder::new(image.data(), options);

        encoder.encode(sink).map_err(ImgErrors::from)
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::RGB, ColorSpace::BGR]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::BMP
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }

    fn set_options(&mut self, options: EncoderOptions) {
        self.options = Some(options);
    }
}
