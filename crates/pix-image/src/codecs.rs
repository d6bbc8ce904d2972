/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Entry point for codecs supported by the library
//!
//! Decoders and encoders are compiled in via cargo features and
//! dispatched through [`ImageFormat`]. The format value is handed
//! to the entry points explicitly, nothing here consults global
//! state to pick a codec.
use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::Path;

use log::trace;
use pix_core::bytestream::{ByteReader, ByteReaderTrait, ByteWriterTrait, MemCursor};
use pix_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::{ImgEncodeErrors, ImgErrors};
use crate::image::Image;
use crate::metadata::ImageMetadata;
use crate::traits::{DecoderTrait, EncoderTrait};

pub mod bmp;
pub mod jpeg;
pub mod png;

/// Magic byte prefixes checked after the BMP probe, in the order
/// they are tried.
///
/// The JPEG entries cover baseline, JFIF, exif-less Adobe and
/// JPEG 2000 streams, all of which are handed to the jpeg codec.
static MAGIC_BYTES: [(&[u8], ImageFormat); 7] = [
    (&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a], ImageFormat::PNG),
    (&[0xff, 0xd8, 0xff, 0xdb], ImageFormat::JPEG),
    (
        &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00, 0x01],
        ImageFormat::JPEG
    ),
    (&[0xff, 0xd8, 0xff, 0xee], ImageFormat::JPEG),
    (&[0xff, 0xd8, 0xff, 0xe0], ImageFormat::JPEG),
    (
        &[0x00, 0x00, 0x00, 0x0c, 0x6a, 0x50, 0x20, 0x20, 0x0d, 0x0a, 0x87, 0x0a],
        ImageFormat::JPEG
    ),
    (&[0xff, 0x4f, 0xff, 0x51], ImageFormat::JPEG)
];

/// Longest prefix any probe looks at
const PROBE_LEN: usize = 16;

/// All formats the library knows about
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Windows bitmap
    BMP,
    /// Portable Network Graphics
    PNG,
    /// Joint Photographic Experts Group
    JPEG,
    /// Any format not represented above
    Unknown
}

impl ImageFormat {
    /// Return true if the library has a decoder for this format
    /// compiled in
    pub fn has_decoder(self) -> bool {
        match self {
            Self::BMP => cfg!(feature = "bmp"),
            Self::PNG => cfg!(feature = "png"),
            Self::JPEG => cfg!(feature = "jpeg"),
            Self::Unknown => false
        }
    }

    /// Return true if the library has an encoder for this format
    /// compiled in
    pub fn has_encoder(self) -> bool {
        match self {
            Self::BMP => cfg!(feature = "bmp"),
            Self::PNG => cfg!(feature = "png"),
            Self::JPEG => cfg!(feature = "jpeg"),
            Self::Unknown => false
        }
    }

    /// Return a decoder for this format reading from `data`
    pub fn decoder<'a, T>(self, data: T) -> Result<Box<dyn DecoderTrait + 'a>, ImgErrors>
    where
        T: ByteReaderTrait + 'a
    {
        self.decoder_with_options(data, DecoderOptions::default())
    }

    /// Return a decoder for this format reading from `data`,
    /// configured with `options`
    #[allow(unused_variables)]
    pub fn decoder_with_options<'a, T>(
        self, data: T, options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImgErrors>
    where
        T: ByteReaderTrait + 'a
    {
        match self {
            Self::BMP => {
                #[cfg(feature = "bmp")]
                {
                    Ok(Box::new(pix_bmp::BmpDecoder::new_with_options(data, options)))
                }
                #[cfg(not(feature = "bmp"))]
                {
                    Err(ImgErrors::ImageDecoderNotIncluded(self))
                }
            }
            Self::PNG => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(pix_png::PngDecoder::new_with_options(data, options)))
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImgErrors::ImageDecoderNotIncluded(self))
                }
            }
            Self::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    Ok(Box::new(jpeg::JpegDecoder::try_new(data, options)?))
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    Err(ImgErrors::ImageDecoderNotIncluded(self))
                }
            }
            Self::Unknown => Err(ImgErrors::ImageDecoderNotImplemented(self))
        }
    }

    /// Encode `image` into `sink` as this format.
    ///
    /// Returns the number of bytes written
    #[allow(unused_variables)]
    pub fn encode<T: ByteWriterTrait>(
        self, image: &Image, options: EncoderOptions, sink: T
    ) -> Result<usize, ImgErrors> {
        match self {
            Self::BMP => {
                #[cfg(feature = "bmp")]
                {
                    let mut encoder = bmp::BmpEncoder::new_with_options(options);
                    encoder.encode(image, sink)
                }
                #[cfg(not(feature = "bmp"))]
                {
                    Err(ImgErrors::EncodeErrors(ImgEncodeErrors::NoEncoderForFormat(self)))
                }
            }
            Self::PNG => {
                #[cfg(feature = "png")]
                {
                    let mut encoder = png::PngEncoder::new_with_options(options);
                    encoder.encode(image, sink)
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImgErrors::EncodeErrors(ImgEncodeErrors::NoEncoderForFormat(self)))
                }
            }
            Self::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    let mut encoder = jpeg::JpegEncoder::new_with_options(options);
                    encoder.encode(image, sink)
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    Err(ImgErrors::EncodeErrors(ImgEncodeErrors::NoEncoderForFormat(self)))
                }
            }
            Self::Unknown => {
                Err(ImgErrors::EncodeErrors(ImgEncodeErrors::NoEncoderForFormat(self)))
            }
        }
    }

    /// Guess the format of a byte stream from its leading bytes.
    ///
    /// Peeks at most [`PROBE_LEN`] bytes and never consumes them,
    /// a decoder can read the same stream from the start afterwards.
    /// BMP is probed first, then PNG, then the JPEG family.
    ///
    /// Returns the format and the source handed back for reuse, or
    /// `None` if no probe matched
    pub fn guess_format<T>(data: T) -> Option<(ImageFormat, T)>
    where
        T: ByteReaderTrait
    {
        let mut reader = ByteReader::new(data);
        // peek the longest prefix the stream can give us
        let mut prefix = Vec::new();
        for len in (1..=PROBE_LEN).rev() {
            if let Ok(bytes) = reader.peek_at(0, len) {
                prefix = bytes.to_vec();
                break;
            }
        }

        #[cfg(feature = "bmp")]
        if pix_bmp::probe_bmp(&prefix) {
            return Some((ImageFormat::BMP, reader.consume()));
        }
        for (magic, format) in MAGIC_BYTES {
            if prefix.starts_with(magic) {
                return Some((format, reader.consume()));
            }
        }
        None
    }

    /// Map a file extension to the format an encoder should write
    pub fn encoder_for_extension<P: AsRef<OsStr>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref().to_str() {
            Some("bmp") => Some(ImageFormat::BMP),
            Some("png") => Some(ImageFormat::PNG),
            Some("jpg" | "jpeg") => Some(ImageFormat::JPEG),
            _ => None
        }
    }
}

/// Combine caller supplied encoder options with the image layout.
///
/// Dimensions, colorspace and depth always come from the image,
/// tunables such as quality come from the caller when present
pub(crate) fn create_options_for_encoder(
    options: Option<EncoderOptions>, image: &Image
) -> EncoderOptions {
    let (width, height) = image.dimensions();
    let start = options.unwrap_or_default();

    start
        .set_width(width)
        .set_height(height)
        .set_colorspace(image.colorspace())
        .set_depth(image.depth())
}

impl Image {
    /// Open an image from a file path, guessing its format from
    /// the file contents
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Image, ImgErrors> {
        Self::open_with_options(file, DecoderOptions::default())
    }

    /// Open an image from a file path with custom decoder options
    pub fn open_with_options<P: AsRef<Path>>(
        file: P, options: DecoderOptions
    ) -> Result<Image, ImgErrors> {
        let contents = std::fs::read(file)?;

        Self::read(MemCursor::new(contents), options)
    }

    /// Decode an image from a byte source, guessing its format from
    /// the leading bytes
    pub fn read<T: ByteReaderTrait>(data: T, options: DecoderOptions) -> Result<Image, ImgErrors> {
        let (format, data) = ImageFormat::guess_format(data)
            .ok_or(ImgErrors::ImageDecoderNotImplemented(ImageFormat::Unknown))?;

        trace!("Guessed format {:?}", format);

        let mut decoder = format.decoder_with_options(data, options)?;
        let mut image = decoder.decode()?;

        image.metadata.set_format(format);

        Ok(image)
    }

    /// Decode an image using an already constructed decoder
    pub fn from_decoder<T: DecoderTrait>(mut decoder: T) -> Result<Image, ImgErrors> {
        decoder.decode()
    }

    /// Read image headers only, returning metadata without pixels
    pub fn read_headers<T: ByteReaderTrait>(
        data: T, options: DecoderOptions
    ) -> Result<Option<ImageMetadata>, ImgErrors> {
        let (format, data) = ImageFormat::guess_format(data)
            .ok_or(ImgErrors::ImageDecoderNotImplemented(ImageFormat::Unknown))?;

        let mut decoder = format.decoder_with_options(data, options)?;

        decoder.read_headers()
    }

    /// Save the image to a path, picking the format from the file
    /// extension
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ImgErrors> {
        let extension = file.as_ref().extension().ok_or_else(|| {
            ImgErrors::GenericString(format!(
                "could not determine format from file path {:?}",
                file.as_ref()
            ))
        })?;
        let format = ImageFormat::encoder_for_extension(extension).ok_or_else(|| {
            ImgErrors::GenericString(format!("no encoder for file extension {extension:?}"))
        })?;

        self.save_to(file, format)
    }

    /// Save the image to a path in an explicit format
    pub fn save_to<P: AsRef<Path>>(&self, file: P, format: ImageFormat) -> Result<(), ImgErrors> {
        let handle = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file)?;
        let mut sink = BufWriter::new(handle);

        self.encode(format, &mut sink)?;

        Ok(())
    }

    /// Encode the image into an in memory buffer
    pub fn write_to_vec(&self, format: ImageFormat) -> Result<Vec<u8>, ImgErrors> {
        let mut sink = Vec::new();

        self.encode(format, &mut sink)?;

        Ok(sink)
    }

    /// Encode the image into `sink` as `format`.
    ///
    /// Returns the number of bytes written
    pub fn encode<T: ByteWriterTrait>(
        &self, format: ImageFormat, sink: T
    ) -> Result<usize, ImgErrors> {
        self.encode_with_options(format, EncoderOptions::default(), sink)
    }

    /// Encode the image into `sink` as `format` with custom options
    pub fn encode_with_options<T: ByteWriterTrait>(
        &self, format: ImageFormat, options: EncoderOptions, sink: T
    ) -> Result<usize, ImgErrors> {
        format.encode(self, options, sink)
    }
}

#[cfg(test)]
mod tests {
    use pix_core::colorspace::ColorSpace;

    use super::*;

    #[test]
    fn guess_format_never_consumes_bytes() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 13, b'I',
            b'H', b'D', b'R'];

        let (format, cursor) = ImageFormat::guess_format(MemCursor::new(png_magic)).unwrap();

        assert_eq!(format, ImageFormat::PNG);
        assert_eq!(cursor.inner_bytes(), &png_magic);
    }

    #[test]
    fn jpeg_magics_are_recognized() {
        let magics: [&[u8]; 6] = [
            &[0xff, 0xd8, 0xff, 0xdb],
            &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00, 0x01],
            &[0xff, 0xd8, 0xff, 0xee],
            &[0xff, 0xd8, 0xff, 0xe0],
            &[0x00, 0x00, 0x00, 0x0c, 0x6a, 0x50, 0x20, 0x20, 0x0d, 0x0a, 0x87, 0x0a],
            &[0xff, 0x4f, 0xff, 0x51]
        ];

        for magic in magics {
            let mut bytes = magic.to_vec();
            bytes.resize(PROBE_LEN, 0);

            let (format, _) = ImageFormat::guess_format(MemCursor::new(bytes)).unwrap();
            assert_eq!(format, ImageFormat::JPEG);
        }
    }

    #[test]
    fn unknown_bytes_have_no_format() {
        let bytes = *b"not an image at all, sorry";

        assert!(ImageFormat::guess_format(MemCursor::new(bytes)).is_none());
    }

    #[test]
    fn extension_maps_to_encoder_format() {
        assert_eq!(ImageFormat::encoder_for_extension("bmp"), Some(ImageFormat::BMP));
        assert_eq!(ImageFormat::encoder_for_extension("png"), Some(ImageFormat::PNG));
        assert_eq!(ImageFormat::encoder_for_extension("jpg"), Some(ImageFormat::JPEG));
        assert_eq!(ImageFormat::encoder_for_extension("jpeg"), Some(ImageFormat::JPEG));
        assert_eq!(ImageFormat::encoder_for_extension("webp"), None);
    }

    #[test]
    #[cfg(feature = "bmp")]
    fn bmp_prefix_with_broken_header_is_a_decode_error() {
        let bytes = *b"BM followed by garbage, not a real file";

        let (format, _) = ImageFormat::guess_format(MemCursor::new(bytes)).unwrap();
        assert_eq!(format, ImageFormat::BMP);

        let error = match Image::read(MemCursor::new(bytes), DecoderOptions::default()) {
            Ok(_) => panic!("a broken header should not decode"),
            Err(error) => error
        };
        assert!(matches!(error, ImgErrors::ImageDecodeErrors(_)));
    }

    #[test]
    #[cfg(feature = "bmp")]
    fn read_decodes_bmp_streams() {
        let image = Image::from_u8(&[10, 20, 30, 40, 50, 60], 2, 1, ColorSpace::RGB).unwrap();
        let encoded = image.write_to_vec(ImageFormat::BMP).unwrap();

        let decoded = Image::read(MemCursor::new(encoded), DecoderOptions::default()).unwrap();

        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.metadata().format(), Some(ImageFormat::BMP));
        assert_eq!(decoded.colorspace(), ColorSpace::BGR);
    }
}
