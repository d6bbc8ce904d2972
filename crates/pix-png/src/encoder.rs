/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use miniz_oxide::deflate::compress_to_vec_zlib;
use pix_core::bit_depth::BitDepth;
use pix_core::bytestream::{ByteIoError, ByteWriter, ByteWriterTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::EncoderOptions;

use crate::crc::chunk_crc;
use crate::decoder::PNG_SIGNATURE;
use crate::PngEncodeErrors;

/// Deflate effort handed to the zlib compressor, low because encode
/// speed matters more here than ratio.
const ENCODE_COMPRESSION_LEVEL: u8 = 1;

/// A PNG encoder
///
/// Writes an eight bit RGBA image, signature, IHDR, a single IDAT
/// and IEND, each chunk with its CRC. Scanlines carry filter type 0,
/// no filtering is applied before compression.
///
/// Three channel input is widened to RGBA with every alpha sample set
/// to 255, four channel input is written as is.
///
/// # Example
/// ```
/// use pix_png::PngEncoder;
/// use pix_core::bit_depth::BitDepth;
/// use pix_core::colorspace::ColorSpace;
/// use pix_core::options::EncoderOptions;
///
/// let pixels = [0_u8; 12];
/// let options = EncoderOptions::new(2, 2, ColorSpace::RGB, BitDepth::Eight);
///
/// let mut sink = vec![];
/// PngEncoder::new(&pixels, options).encode(&mut sink).unwrap();
/// ```
pub struct PngEncoder<'a> {
    data:    &'a [u8],
    options: EncoderOptions
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder that will write the pixels in `data`,
    /// whose dimensions and colorspace are described by `options`.
    pub fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder { data, options }
    }

    /// Prefix each scanline with filter type 0 and widen three
    /// channel pixels to four.
    fn filtered_stream(&self, channels: usize) -> Vec<u8> {
        let width = self.options.width();
        let height = self.options.height();

        let mut filtered = Vec::with_capacity((width * 4 + 1) * height);

        for row in self.data.chunks_exact(width * channels) {
            filtered.push(0);
            if channels == 4 {
                filtered.extend_from_slice(row);
            } else {
                for pixel in row.chunks_exact(3) {
                    filtered.extend_from_slice(pixel);
                    filtered.push(255);
                }
            }
        }
        filtered
    }

    /// Encode the image writing the bytes to `sink`.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, PngEncodeErrors> {
        let width = self.options.width();
        let height = self.options.height();
        let colorspace = self.options.colorspace();

        if self.options.depth() != BitDepth::Eight {
            return Err(PngEncodeErrors::UnsupportedDepth);
        }
        let channels = match colorspace {
            ColorSpace::RGB => 3,
            ColorSpace::RGBA => 4,
            _ => {
                return Err(PngEncodeErrors::UnsupportedColorspace(match colorspace {
                    ColorSpace::Luma => "Luma",
                    ColorSpace::LumaA => "LumaA",
                    ColorSpace::BGR => "BGR",
                    ColorSpace::BGRA => "BGRA",
                    _ => "unknown colorspace"
                }));
            }
        };
        if width == 0 || height == 0 {
            return Err(PngEncodeErrors::ZeroDimensions);
        }
        if width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(PngEncodeErrors::TooLargeDimensions(width.max(height)));
        }

        let expected = width * height * channels;
        if self.data.len() != expected {
            return Err(PngEncodeErrors::WrongInputSize(expected, self.data.len()));
        }

        let filtered = self.filtered_stream(channels);
        let compressed = compress_to_vec_zlib(&filtered, ENCODE_COMPRESSION_LEVEL);

        let mut ihdr = [0_u8; 13];
        ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
        ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
        ihdr[8] = 8; // bit depth
        ihdr[9] = 6; // color type, RGBA
        ihdr[10] = 0; // compression method
        ihdr[11] = 0; // filter method
        ihdr[12] = 0; // no interlacing

        let mut stream = ByteWriter::new(sink);
        stream.reserve(8 + (12 + 13) + (12 + compressed.len()) + 12)?;

        stream.write_all(&PNG_SIGNATURE.to_be_bytes())?;
        write_chunk(&mut stream, b"IHDR", &ihdr)?;
        write_chunk(&mut stream, b"IDAT", &compressed)?;
        write_chunk(&mut stream, b"IEND", &[])?;
        stream.flush()?;

        Ok(stream.bytes_written())
    }
}

fn write_chunk<T: ByteWriterTrait>(
    stream: &mut ByteWriter<T>, name: &[u8; 4], data: &[u8]
) -> Result<(), ByteIoError> {
    stream.write_u32_be(data.len() as u32)?;
    stream.write_all(name)?;
    stream.write_all(data)?;
    stream.write_u32_be(chunk_crc(name, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions::new(width, height, colorspace, BitDepth::Eight)
    }

    #[test]
    fn layout_has_single_idat_and_terminal_iend() {
        let pixels = [10_u8; 27];
        let mut sink = vec![];
        PngEncoder::new(&pixels, options(3, 3, ColorSpace::RGB))
            .encode(&mut sink)
            .unwrap();

        assert_eq!(&sink[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert_eq!(&sink[12..16], b"IHDR");
        // IHDR says RGBA regardless of input channels
        assert_eq!(sink[25], 6);

        let idat_count = sink.windows(4).filter(|w| w == b"IDAT").count();
        assert_eq!(idat_count, 1);
        assert_eq!(&sink[sink.len() - 8..sink.len() - 4], b"IEND");
    }

    #[test]
    fn rgba_input_passes_through() {
        let pixels: Vec<u8> = (1..=16).collect();
        let mut sink = vec![];
        PngEncoder::new(&pixels, options(2, 2, ColorSpace::RGBA))
            .encode(&mut sink)
            .unwrap();
        assert!(!sink.is_empty());
    }

    #[test]
    fn rejects_bgr_input() {
        let pixels = [0_u8; 12];
        let mut sink = vec![];
        assert!(matches!(
            PngEncoder::new(&pixels, options(2, 2, ColorSpace::BGR)).encode(&mut sink),
            Err(PngEncodeErrors::UnsupportedColorspace(_))
        ));
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        let pixels = [0_u8; 13];
        let mut sink = vec![];
        assert!(matches!(
            PngEncoder::new(&pixels, options(2, 2, ColorSpace::RGB)).encode(&mut sink),
            Err(PngEncodeErrors::WrongInputSize(12, 13))
        ));
    }
}
