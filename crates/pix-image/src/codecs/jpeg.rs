/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! JPEG support
//!
//! The library carries no jpeg code of its own. Decoding is
//! delegated to the [zune-jpeg](zune_jpeg) crate and encoding to
//! the [jpeg-encoder](jpeg_encoder) crate, this module only adapts
//! their APIs to [`DecoderTrait`] and [`EncoderTrait`].
#![cfg(feature = "jpeg")]

use jpeg_encoder::ColorType;
use pix_core::bit_depth::BitDepth;
use pix_core::bytestream::{ByteReader, ByteReaderTrait, ByteWriter, ByteWriterTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::{DecoderOptions, EncoderOptions};

use crate::codecs::{create_options_for_encoder, ImageFormat};
use crate::errors::{ImgEncodeErrors, ImgErrors};
use crate::image::Image;
use crate::metadata::ImageMetadata;
use crate::traits::{DecoderTrait, EncoderTrait};

/// JPEG decoding adapter.
///
/// The delegate decoder borrows its input, so the adapter buffers
/// the whole stream up front and builds a fresh delegate per call
pub struct JpegDecoder {
    bytes:      Vec<u8>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>,
    colorspace: ColorSpace
}

impl JpegDecoder {
    /// Buffer `source` and prepare a decoder for it
    pub fn try_new<T: ByteReaderTrait>(
        source: T, options: DecoderOptions
    ) -> Result<JpegDecoder, ImgErrors> {
        let mut reader = ByteReader::new(source);
        let bytes = reader.remaining_bytes()?.to_vec();

        Ok(JpegDecoder {
            bytes,
            options,
            dimensions: None,
            colorspace: ColorSpace::Unknown
        })
    }

    fn check_dimensions(&self, width: usize, height: usize) -> Result<(), ImgErrors> {
        if width > self.options.max_width() || height > self.options.max_height() {
            return Err(ImgErrors::ImageDecodeErrors(format!(
                "jpeg: dimensions {width}x{height} exceed the configured limit of {}x{}",
                self.options.max_width(),
                self.options.max_height()
            )));
        }
        Ok(())
    }
}

fn map_colorspace(components: usize) -> ColorSpace {
    match components {
        1 => ColorSpace::Luma,
        2 => ColorSpace::LumaA,
        3 => ColorSpace::RGB,
        4 => ColorSpace::RGBA,
        _ => ColorSpace::Unknown
    }
}

/// The colorspace the delegate will hand pixels over in, known
/// only once headers have been parsed
fn out_colorspace(decoder: &zune_jpeg::JpegDecoder) -> ColorSpace {
    match decoder.get_output_colorspace() {
        Some(colorspace) => map_colorspace(colorspace.num_components()),
        None => ColorSpace::Unknown
    }
}

impl DecoderTrait for JpegDecoder {
    fn decode(&mut self) -> Result<Image, ImgErrors> {
        let mut decoder = zune_jpeg::JpegDecoder::new(&self.bytes);
        let pixels = decoder.decode()?;

        let (width, height) = decoder
            .dimensions()
            .ok_or_else(|| ImgErrors::ImageDecodeErrors("jpeg: no dimensions".to_string()))?;
        let (width, height) = (usize::from(width), usize::from(height));
        self.check_dimensions(width, height)?;

        let colorspace = out_colorspace(&decoder);

        self.dimensions = Some((width, height));
        self.colorspace = colorspace;

        Image::from_u8(&pixels, width, height, colorspace)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    fn name(&self) -> &'static str {
        "JPEG Decoder"
    }

    fn read_headers(&mut self) -> Result<Option<ImageMetadata>, ImgErrors> {
        let mut decoder = zune_jpeg::JpegDecoder::new(&self.bytes);
        decoder.decode_headers()?;

        let (width, height) = decoder
            .dimensions()
            .ok_or_else(|| ImgErrors::ImageDecodeErrors("jpeg: no dimensions".to_string()))?;
        let (width, height) = (usize::from(width), usize::from(height));
        self.check_dimensions(width, height)?;

        let colorspace = out_colorspace(&decoder);

        self.dimensions = Some((width, height));
        self.colorspace = colorspace;

        let metadata = ImageMetadata {
            format: Some(ImageFormat::JPEG),
            colorspace,
            depth: BitDepth::Eight,
            width,
            height
        };

        Ok(Some(metadata))
    }
}

/// JPEG encoding adapter
#[derive(Default)]
pub struct JpegEncoder {
    options: Option<EncoderOptions>
}

impl JpegEncoder {
    pub fn new() -> JpegEncoder {
        JpegEncoder::default()
    }

    pub fn new_with_options(options: EncoderOptions) -> JpegEncoder {
        JpegEncoder {
            options: Some(options)
        }
    }
}

impl EncoderTrait for JpegEncoder {
    fn name(&self) -> &'static str {
        "JPEG Encoder"
    }

    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImgErrors> {
        let options = create_options_for_encoder(self.options, image);

        let (width, height) = image.dimensions();
        if width > usize::from(u16::MAX) || height > usize::from(u16::MAX) {
            return Err(ImgErrors::EncodeErrors(ImgEncodeErrors::Generic(format!(
                "jpeg streams cannot carry dimensions above {}, found {width}x{height}",
                u16::MAX
            ))));
        }
        let color_type = match image.colorspace() {
            ColorSpace::Luma => ColorType::Luma,
            ColorSpace::RGB => ColorType::Rgb,
            ColorSpace::RGBA => ColorType::Rgba,
            ColorSpace::BGR => ColorType::Bgr,
            ColorSpace::BGRA => ColorType::Bgra,
            colorspace => {
                return Err(ImgErrors::EncodeErrors(ImgEncodeErrors::UnsupportedColorspace(
                    colorspace,
                    self.supported_colorspaces()
                )))
            }
        };

        let mut contents = Vec::new();
        let encoder = jpeg_encoder::Encoder::new(&mut contents, options.quality());

        encoder
            .encode(image.data(), width as u16, height as u16, color_type)
            .map_err(|e| {
                ImgErrors::EncodeErrors(ImgEncodeErrors::ImageEncodeErrors(format!("jpeg: {e:?}")))
            })?;

        let mut writer = ByteWriter::new(sink);
        writer.write_all(&contents)?;
        writer.flush()?;

        Ok(contents.len())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[
            ColorSpace::Luma,
            ColorSpace::RGB,
            ColorSpace::RGBA,
            ColorSpace::BGR,
            ColorSpace::BGRA
        ]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::JPEG
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }

    fn set_options(&mut self, options: EncoderOptions) {
        self.options = Some(options);
    }
}

#[cfg(test)]
mod tests {
    use pix_core::bytestream::MemCursor;

    use super::*;

    #[test]
    fn component_counts_map_to_colorspaces() {
        assert_eq!(map_colorspace(1), ColorSpace::Luma);
        assert_eq!(map_colorspace(3), ColorSpace::RGB);
        assert_eq!(map_colorspace(4), ColorSpace::RGBA);
        assert_eq!(map_colorspace(7), ColorSpace::Unknown);
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0];
        let mut decoder =
            JpegDecoder::try_new(MemCursor::new(&bytes), DecoderOptions::default()).unwrap();

        assert!(decoder.decode().is_err());
        assert!(decoder.dimensions().is_none());
    }

    #[test]
    fn encode_round_trips_through_the_delegates() {
        let pixels = vec![128_u8; 8 * 8 * 3];
        let image = Image::from_u8(&pixels, 8, 8, ColorSpace::RGB).unwrap();

        let mut sink = vec![];
        JpegEncoder::new().encode(&image, &mut sink).unwrap();
        assert_eq!(&sink[..2], &[0xFF, 0xD8]);

        let mut decoder =
            JpegDecoder::try_new(MemCursor::new(&sink), DecoderOptions::default()).unwrap();
        let decoded = decoder.decode().unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoder.dimensions(), Some((8, 8)));
    }
}
