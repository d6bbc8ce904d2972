/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits every decoder, encoder and transform implements.
//!
//! The glue layer talks to codecs through [`DecoderTrait`] and
//! [`EncoderTrait`] and to transforms through [`OperationsTrait`],
//! which lets dispatch code treat them uniformly.
use log::trace;
use pix_core::bit_depth::BitDepth;
use pix_core::bytestream::ByteWriterTrait;
use pix_core::colorspace::ColorSpace;
use pix_core::options::EncoderOptions;

use crate::codecs::ImageFormat;
use crate::errors::{ImgEncodeErrors, ImgErrors};
use crate::image::Image;
use crate::metadata::ImageMetadata;

/// A uniform interface over image decoders
pub trait DecoderTrait {
    /// Decode the whole stream into an [`Image`]
    fn decode(&mut self) -> Result<Image, ImgErrors>;

    /// Dimensions as `(width, height)`, present after
    /// headers have been read
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// The colorspace the pixels will be in after decoding
    fn out_colorspace(&self) -> ColorSpace;

    /// Decoder name, used in logs and error messages
    fn name(&self) -> &'static str;

    /// Read headers only, returning image metadata without
    /// decoding pixels
    fn read_headers(&mut self) -> Result<Option<ImageMetadata>, ImgErrors>;
}

/// A uniform interface over image encoders
pub trait EncoderTrait {
    /// Encoder name, used in logs and error messages
    fn name(&self) -> &'static str;

    /// Encode `image` into `sink` without any preliminary checks
    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImgErrors>;

    /// Colorspaces this encoder accepts
    fn supported_colorspaces(&self) -> &'static [ColorSpace];

    /// The format this encoder writes
    fn format(&self) -> ImageFormat;

    /// Bit depths this encoder accepts
    fn supported_bit_depth(&self) -> &'static [BitDepth];

    fn set_options(&mut self, options: EncoderOptions);

    /// Encode `image` into `sink`, checking that the image layout
    /// is one the encoder accepts.
    ///
    /// Returns the number of bytes written
    fn encode<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImgErrors> {
        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImgErrors::EncodeErrors(
                ImgEncodeErrors::UnsupportedColorspace(colorspace, self.supported_colorspaces())
            ));
        }
        if !self.supported_bit_depth().contains(&image.depth()) {
            return Err(ImgErrors::EncodeErrors(ImgEncodeErrors::Generic(format!(
                "{} does not support bit depth {:?}",
                self.name(),
                image.depth()
            ))));
        }
        trace!("Encoding image with {}", self.name());

        self.encode_inner(image, sink)
    }
}

/// A uniform interface over in place image transforms
pub trait OperationsTrait {
    /// Transform name, used in logs and error messages
    fn name(&self) -> &'static str;

    /// Carry out the transform on `image`
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImgErrors>;

    /// Run the transform, logging it by name
    fn execute(&self, image: &mut Image) -> Result<(), ImgErrors> {
        trace!("Running operation {}", self.name());

        self.execute_impl(image)
    }
}
