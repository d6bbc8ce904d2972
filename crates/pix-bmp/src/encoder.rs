/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pix_core::bytestream::{ByteWriter, ByteWriterTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::EncoderOptions;

use crate::BmpEncoderErrors;

/// Size of the file header plus the 40 byte info header, which is
/// also the pixel array offset the encoder writes.
const BMP_PIXEL_OFFSET: u32 = 54;

/// Resolution written into the info header, pixels per meter.
const BMP_DEFAULT_RESOLUTION: u32 = 200;

/// Number of zero bytes appended to each pixel row so that rows start
/// on a four byte boundary.
///
/// Three bytes per pixel, so a row of `width` pixels occupies
/// `3 * width` bytes before padding.
pub const fn row_padding(width: usize) -> usize {
    (4 - ((3 * width) % 4)) % 4
}

/// A BMP encoder
///
/// Writes a Windows v3 bitmap, a 14 byte file header followed by the
/// 40 byte info header and uncompressed 24 bit pixels.
///
/// The input must have three channels. Bytes are written in the order
/// they appear in the buffer, BMP stores blue first, so an image
/// recorded as [`BGR`](ColorSpace::BGR) round trips exactly while an
/// [`RGB`](ColorSpace::RGB) input comes back with the channels
/// swapped unless the caller reorders first.
///
/// # Example
/// ```
/// use pix_bmp::BmpEncoder;
/// use pix_core::bit_depth::BitDepth;
/// use pix_core::colorspace::ColorSpace;
/// use pix_core::options::EncoderOptions;
///
/// let pixels = [0_u8; 12];
/// let options = EncoderOptions::new(2, 2, ColorSpace::BGR, BitDepth::Eight);
///
/// let mut sink = vec![];
/// BmpEncoder::new(&pixels, options).encode(&mut sink).unwrap();
/// assert_eq!(sink.len(), 70);
/// ```
pub struct BmpEncoder<'a> {
    data:    &'a [u8],
    options: EncoderOptions
}

impl<'a> BmpEncoder<'a> {
    /// Create a new encoder that will write the pixels in `data`,
    /// whose dimensions and colorspace are described by `options`.
    pub fn new(data: &'a [u8], options: EncoderOptions) -> BmpEncoder<'a> {
        BmpEncoder { data, options }
    }

    /// Number of bytes a successful encode will produce.
    pub fn expected_size(&self) -> usize {
        let width = self.options.width();
        let height = self.options.height();

        BMP_PIXEL_OFFSET as usize + (3 * width + row_padding(width)) * height
    }

    fn encode_headers<T: ByteWriterTrait>(
        &self, stream: &mut ByteWriter<T>
    ) -> Result<(), BmpEncoderErrors> {
        let width = self.options.width();
        let height = self.options.height();

        let row_size = 3 * width + row_padding(width);
        let image_size = (row_size * height) as u32;
        let file_size = BMP_PIXEL_OFFSET + image_size;

        // file header
        stream.write_all(b"BM")?;
        stream.write_u32_le(file_size)?;
        stream.write_u32_le(0)?; // reserved
        stream.write_u32_le(BMP_PIXEL_OFFSET)?;

        // info header
        stream.write_u32_le(40)?;
        stream.write_u32_le(width as u32)?;
        stream.write_u32_le(height as u32)?;
        stream.write_u16_le(1)?; // planes
        stream.write_u16_le(24)?; // bits per pixel
        stream.write_u32_le(0)?; // BI_RGB, no compression
        stream.write_u32_le(image_size)?;
        stream.write_u32_le(BMP_DEFAULT_RESOLUTION)?;
        stream.write_u32_le(BMP_DEFAULT_RESOLUTION)?;
        stream.write_u32_le(0)?; // colors in palette
        stream.write_u32_le(0)?; // important colors

        Ok(())
    }

    /// Encode the image writing the bytes to `sink`.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, BmpEncoderErrors> {
        let width = self.options.width();
        let height = self.options.height();
        let colorspace = self.options.colorspace();

        if colorspace.num_components() != 3 {
            return Err(BmpEncoderErrors::UnsupportedColorspace(match colorspace {
                ColorSpace::Luma => "Luma",
                ColorSpace::LumaA => "LumaA",
                ColorSpace::RGBA => "RGBA",
                ColorSpace::BGRA => "BGRA",
                _ => "unknown colorspace"
            }));
        }
        if width == 0 || height == 0 {
            return Err(BmpEncoderErrors::ZeroDimensions);
        }
        if width > u32::MAX as usize || height > i32::MAX as usize {
            return Err(BmpEncoderErrors::TooLargeDimensions(width.max(height)));
        }

        let expected = width * height * 3;
        if self.data.len() != expected {
            return Err(BmpEncoderErrors::WrongInputSize(expected, self.data.len()));
        }

        let mut stream = ByteWriter::new(sink);
        stream.reserve(self.expected_size())?;

        self.encode_headers(&mut stream)?;

        let padding = [0_u8; 4];
        let pad = row_padding(width);

        // pixel rows are stored bottom to top
        for row in self.data.rchunks_exact(width * 3) {
            stream.write_all(row)?;
            stream.write_all(&padding[..pad])?;
        }
        stream.flush()?;

        Ok(stream.bytes_written())
    }
}

#[cfg(test)]
mod tests {
    use pix_core::bit_depth::BitDepth;
    use pix_core::options::EncoderOptions;

    use super::*;

    fn options(width: usize, height: usize) -> EncoderOptions {
        EncoderOptions::new(width, height, ColorSpace::BGR, BitDepth::Eight)
    }

    #[test]
    fn padding_reaches_four_byte_boundary() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(17), 1);
        assert_eq!(row_padding(20), 0);
    }

    #[test]
    fn two_by_two_layout() {
        let pixels: Vec<u8> = (1..=12).collect();
        let mut sink = vec![];
        let written = BmpEncoder::new(&pixels, options(2, 2))
            .encode(&mut sink)
            .unwrap();

        assert_eq!(written, 70);
        assert_eq!(sink.len(), 70);
        assert_eq!(&sink[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(sink[2..6].try_into().unwrap()), 70);
        assert_eq!(u32::from_le_bytes(sink[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(sink[14..18].try_into().unwrap()), 40);
        assert_eq!(u16::from_le_bytes(sink[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(sink[28..30].try_into().unwrap()), 24);
        assert_eq!(u32::from_le_bytes(sink[30..34].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(sink[34..38].try_into().unwrap()), 16);
        // bottom row written first
        assert_eq!(&sink[54..62], &[7, 8, 9, 10, 11, 12, 0, 0]);
        assert_eq!(&sink[62..70], &[1, 2, 3, 4, 5, 6, 0, 0]);
    }

    #[test]
    fn round_trip_is_exact() {
        use pix_core::bytestream::MemCursor;

        use crate::BmpDecoder;

        let pixels: Vec<u8> = (0..=251).collect(); // 7x12 pixels, 3 channels
        let mut sink = vec![];
        BmpEncoder::new(&pixels, options(7, 12))
            .encode(&mut sink)
            .unwrap();

        let mut decoder = BmpDecoder::new(MemCursor::new(&sink));
        let decoded = decoder.decode().unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn rejects_four_channel_input() {
        let pixels = [0_u8; 16];
        let opts = EncoderOptions::new(2, 2, ColorSpace::RGBA, BitDepth::Eight);
        let mut sink = vec![];
        assert!(matches!(
            BmpEncoder::new(&pixels, opts).encode(&mut sink),
            Err(BmpEncoderErrors::UnsupportedColorspace(_))
        ));
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        let pixels = [0_u8; 11];
        let mut sink = vec![];
        assert!(matches!(
            BmpEncoder::new(&pixels, options(2, 2)).encode(&mut sink),
            Err(BmpEncoderErrors::WrongInputSize(12, 11))
        ));
    }
}
