/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// BMP is a format that has been extended multiple times, the info
// header grew from 12 bytes (OS/2, Windows v2) through 40 bytes
// (Windows v3, the common case) to 108 and 124 bytes (v4, v5 with
// colorspace and profile data). The leading u32 of the info header is
// its own size and is what keys the variant.
//
// The file header in front of it is always 14 bytes: a two byte
// signature, the file size, four reserved bytes and the offset from
// the start of the file to the pixel array.

use log::{trace, warn};
use pix_core::bytestream::{ByteReader, ByteReaderTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::DecoderOptions;

use crate::common::{BmpCompression, BmpPixelFormat, BMP_SIGNATURES, DIB_HEADER_SIZES};
use crate::BmpDecoderErrors;

/// Probe some bytes to see if they consist of a BMP image.
///
/// Only the two byte signature is checked, so a stream that starts
/// like a BMP but carries a broken info header still classifies as
/// BMP and surfaces its problem as a decode error.
pub fn probe_bmp(bytes: &[u8]) -> bool {
    match bytes.get(0..2) {
        Some(magic_bytes) => BMP_SIGNATURES.iter().any(|sig| sig == magic_bytes),
        None => false
    }
}

/// A single palette entry for bmp
#[derive(Clone, Copy, Default, Debug)]
struct PaletteEntry {
    red:   u8,
    green: u8,
    blue:  u8
}

/// A BMP decoder.
///
/// # Usage
/// The decoder can be used to read image information and or get the
/// pixels out of a valid bmp image.
///
/// ```no_run
/// use pix_bmp::BmpDecoder;
/// use pix_core::bytestream::MemCursor;
///
/// fn main() -> Result<(), pix_bmp::BmpDecoderErrors> {
///     let source = MemCursor::new(b"BM...");
///     let mut decoder = BmpDecoder::new(source);
///     let pixels = decoder.decode()?;
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("{w}x{h}: {} bytes", pixels.len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<T>
where
    T: ByteReaderTrait
{
    bytes:           ByteReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    flip_vertically: bool,
    decoded_headers: bool,
    pix_fmt:         BmpPixelFormat,
    data_offset:     usize,
    depth:           u16,
    palette:         Vec<PaletteEntry>
}

impl<T> BmpDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new bmp decoder that reads data from `data`
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            bytes: ByteReader::new(data),
            options,
            decoded_headers: false,
            width: 0,
            height: 0,
            pix_fmt: BmpPixelFormat::None,
            flip_vertically: false,
            data_offset: 0,
            depth: 0,
            palette: vec![]
        }
    }

    /// Image width and height, present after decoding headers.
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// The colorspace pixels will be decoded into.
    ///
    /// This matches the order the channels are stored on disk, so 24
    /// bit files report [`BGR`](ColorSpace::BGR).
    pub fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.pix_fmt.into_colorspace())
        } else {
            None
        }
    }

    /// Size of the output buffer [`decode_into`](Self::decode_into)
    /// expects, present after decoding headers.
    pub fn output_buf_size(&self) -> Option<usize> {
        if self.decoded_headers {
            Some(self.width * self.height * self.pix_fmt.num_components())
        } else {
            None
        }
    }

    /// Decode headers stored in the bmp file and store the
    /// information in the decode context.
    ///
    /// After calling this, image metadata accessors return values.
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        let signature = self.bytes.read_fixed_bytes::<2>()?;
        if !BMP_SIGNATURES.iter().any(|sig| *sig == signature) {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }

        let file_size = self.bytes.get_u32_le()? as usize;
        // smallest possible file is the file header plus a core info
        // header
        if file_size < 14 + 12 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Declared file size cannot hold the headers"
            ));
        }
        // reserved bytes
        self.bytes.skip(4)?;

        let data_offset = self.bytes.get_u32_le()? as usize;
        if data_offset > file_size {
            return Err(BmpDecoderErrors::GenericStatic(
                "Pixel array offset points beyond the file"
            ));
        }
        self.data_offset = data_offset;

        let ihsize = self.bytes.get_u32_le()?;
        if !DIB_HEADER_SIZES.contains(&ihsize) {
            return Err(BmpDecoderErrors::GenericStatic(
                "Unknown information header size"
            ));
        }
        if ihsize as usize + 14 > file_size {
            return Err(BmpDecoderErrors::GenericStatic("Invalid header size"));
        }

        let (width, height);
        if ihsize == 12 {
            // core header, 16 bit dimensions
            width = u32::from(self.bytes.get_u16_le()?);
            height = u32::from(self.bytes.get_u16_le()?);
        } else {
            width = self.bytes.get_u32_le()?;
            height = self.bytes.get_u32_le()?;
        }

        // positive height means rows are stored bottom to top
        self.flip_vertically = (height as i32) > 0;
        self.height = (height as i32).unsigned_abs() as usize;
        self.width = width as usize;

        if self.height > self.options.max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }
        if self.width > self.options.max_width() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width or height is zero, invalid image"
            ));
        }

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);

        if self.bytes.get_u16_le()? != 1 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Invalid number of color planes, expected 1"
            ));
        }

        let depth = self.bytes.get_u16_le()?;
        if !matches!(depth, 1 | 4 | 8 | 16 | 24 | 32) {
            return Err(BmpDecoderErrors::Generic(format!(
                "Depth {depth} is not a valid BMP bit count"
            )));
        }
        self.depth = depth;
        trace!("Depth: {}", depth);

        let mut colors_used = 0_u32;

        let compression = if ihsize >= 40 {
            let compression = match BmpCompression::from_u32(self.bytes.get_u32_le()?) {
                Some(c) => c,
                None => {
                    return Err(BmpDecoderErrors::GenericStatic(
                        "Unknown BMP compression scheme"
                    ));
                }
            };
            // image size, resolutions
            self.bytes.skip(12)?;
            colors_used = self.bytes.get_u32_le()?;
            // important colors
            self.bytes.skip(4)?;

            compression
        } else {
            BmpCompression::Rgb
        };

        match compression {
            BmpCompression::Rgb => {}
            BmpCompression::Rle8 | BmpCompression::Rle4 => {
                return Err(BmpDecoderErrors::UnsupportedFeature("RLE compression"));
            }
            BmpCompression::Bitfields => {
                return Err(BmpDecoderErrors::UnsupportedFeature(
                    "bitfields compression"
                ));
            }
        }

        // bytes between the headers and the pixel array hold the
        // color table, if any
        let palette_bytes = self
            .data_offset
            .saturating_sub(ihsize as usize)
            .saturating_sub(14);

        self.pix_fmt = match depth {
            32 => BmpPixelFormat::BGRA,
            24 => BmpPixelFormat::BGR,
            16 => BmpPixelFormat::RGB555,
            8 => {
                if palette_bytes > 0 {
                    BmpPixelFormat::Pal8
                } else {
                    BmpPixelFormat::Gray8
                }
            }
            1 | 4 => {
                if palette_bytes > 0 {
                    BmpPixelFormat::Pal8
                } else {
                    return Err(BmpDecoderErrors::Generic(format!(
                        "No color table for {}-color bmp",
                        1_u32 << depth
                    )));
                }
            }
            _ => unreachable!()
        };

        if self.pix_fmt == BmpPixelFormat::Pal8 {
            self.read_palette(ihsize, colors_used, palette_bytes)?;
        }

        self.decoded_headers = true;
        Ok(())
    }

    fn read_palette(
        &mut self, ihsize: u32, colors_used: u32, palette_bytes: usize
    ) -> Result<(), BmpDecoderErrors> {
        let mut colors = 1_u32 << self.depth;

        if colors_used > colors {
            let msg = format!(
                "Incorrect number of colors {} for depth {}",
                colors_used, self.depth
            );
            if self.options.strict_mode() {
                return Err(BmpDecoderErrors::Generic(msg));
            }
            warn!("{}", msg);
        } else if colors_used != 0 {
            colors = colors_used;
        }

        // OS/2 core headers pack palette entries into 3 bytes, every
        // later variant uses 4
        let entry_size = if ihsize == 12 { 3 } else { 4 };

        if (colors as usize) * entry_size > palette_bytes {
            return Err(BmpDecoderErrors::GenericStatic("Invalid palette entries"));
        }

        // palette location, right after the info header
        self.bytes.set_position((14 + ihsize) as usize)?;

        // index with a full byte without bounds concerns
        self.palette.resize(256, PaletteEntry::default());

        for entry in self.palette.iter_mut().take(colors as usize) {
            let (blue, green, red) = if entry_size == 3 {
                let [b, g, r] = self.bytes.read_fixed_bytes::<3>()?;
                (b, g, r)
            } else {
                let [b, g, r, _] = self.bytes.read_fixed_bytes::<4>()?;
                (b, g, r)
            };
            entry.red = red;
            entry.green = green;
            entry.blue = blue;
        }
        Ok(())
    }

    /// Decode the image returning the pixels in a freshly allocated
    /// buffer.
    pub fn decode(&mut self) -> Result<Vec<u8>, BmpDecoderErrors> {
        self.decode_headers()?;

        let mut output = vec![0_u8; self.output_buf_size().unwrap_or(0)];
        self.decode_into(&mut output)?;
        Ok(output)
    }

    /// Decode the image into a caller provided buffer.
    ///
    /// The buffer must be at least
    /// [`output_buf_size`](Self::output_buf_size) bytes. Rows come
    /// out top to bottom regardless of the storage order in the file.
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), BmpDecoderErrors> {
        self.decode_headers()?;

        let output_size = self.output_buf_size().unwrap();
        if buf.len() < output_size {
            return Err(BmpDecoderErrors::TooSmallBuffer(output_size, buf.len()));
        }

        self.bytes.set_position(self.data_offset)?;

        // each row is padded to a four byte boundary on disk
        let stride = ((usize::from(self.depth) * self.width + 31) / 32) * 4;
        let out_row_len = self.width * self.pix_fmt.num_components();

        let mut row = vec![0_u8; stride];

        for src_row in 0..self.height {
            self.bytes.read_exact_bytes(&mut row)?;

            let dst_row = if self.flip_vertically {
                self.height - 1 - src_row
            } else {
                src_row
            };
            let dst = &mut buf[dst_row * out_row_len..dst_row * out_row_len + out_row_len];

            match self.pix_fmt {
                BmpPixelFormat::BGR | BmpPixelFormat::BGRA | BmpPixelFormat::Gray8 => {
                    // stored bytes are already in output order
                    dst.copy_from_slice(&row[..out_row_len]);
                }
                BmpPixelFormat::RGB555 => expand_rgb555_row(&row, dst, self.width),
                BmpPixelFormat::Pal8 => {
                    expand_palette_row(&row, dst, self.width, self.depth, &self.palette);
                }
                BmpPixelFormat::None => unreachable!()
            }
        }
        Ok(())
    }
}

/// Expand 16 bit 5-5-5 pixels to 8 bit BGR.
fn expand_rgb555_row(row: &[u8], dst: &mut [u8], width: usize) {
    for (pixel, out) in row.chunks_exact(2).zip(dst.chunks_exact_mut(3)).take(width) {
        let v = u16::from_le_bytes([pixel[0], pixel[1]]);
        let r = ((v >> 10) & 31) as u8;
        let g = ((v >> 5) & 31) as u8;
        let b = (v & 31) as u8;

        out[0] = (b << 3) | (b >> 2);
        out[1] = (g << 3) | (g >> 2);
        out[2] = (r << 3) | (r >> 2);
    }
}

/// Expand palette indices, packed most significant bit first for
/// depths below 8, into BGR triples.
fn expand_palette_row(
    row: &[u8], dst: &mut [u8], width: usize, depth: u16, palette: &[PaletteEntry]
) {
    let depth = usize::from(depth);
    let mask = (1_usize << depth) - 1;

    for (x, out) in dst.chunks_exact_mut(3).take(width).enumerate() {
        let bit_pos = x * depth;
        let byte = usize::from(row[bit_pos / 8]);
        let shift = 8 - depth - (bit_pos % 8);
        let index = (byte >> shift) & mask;

        let entry = &palette[index & 255];
        out[0] = entry.blue;
        out[1] = entry.green;
        out[2] = entry.red;
    }
}

#[cfg(test)]
mod tests {
    use pix_core::bytestream::MemCursor;

    use super::*;

    // 2x2 24 bit image, rows stored bottom to top
    fn minimal_bmp() -> Vec<u8> {
        let mut file = vec![];
        file.extend_from_slice(b"BM");
        file.extend_from_slice(&70_u32.to_le_bytes());
        file.extend_from_slice(&[0; 4]);
        file.extend_from_slice(&54_u32.to_le_bytes());
        file.extend_from_slice(&40_u32.to_le_bytes());
        file.extend_from_slice(&2_u32.to_le_bytes());
        file.extend_from_slice(&2_u32.to_le_bytes());
        file.extend_from_slice(&1_u16.to_le_bytes());
        file.extend_from_slice(&24_u16.to_le_bytes());
        file.extend_from_slice(&0_u32.to_le_bytes());
        file.extend_from_slice(&16_u32.to_le_bytes());
        file.extend_from_slice(&200_u32.to_le_bytes());
        file.extend_from_slice(&200_u32.to_le_bytes());
        file.extend_from_slice(&0_u32.to_le_bytes());
        file.extend_from_slice(&0_u32.to_le_bytes());
        // bottom row then top row, two bytes padding each
        file.extend_from_slice(&[7, 8, 9, 10, 11, 12, 0, 0]);
        file.extend_from_slice(&[1, 2, 3, 4, 5, 6, 0, 0]);
        file
    }

    #[test]
    fn decode_flips_rows_to_top_down() {
        let file = minimal_bmp();
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        let pixels = decoder.decode().unwrap();

        assert_eq!(decoder.dimensions(), Some((2, 2)));
        assert_eq!(decoder.colorspace(), Some(ColorSpace::BGR));
        assert_eq!(pixels, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut file = minimal_bmp();
        file[0] = b'X';
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode_headers(),
            Err(BmpDecoderErrors::InvalidMagicBytes)
        ));
    }

    #[test]
    fn rejects_offset_beyond_file_size() {
        let mut file = minimal_bmp();
        // pixel array offset field
        file[10..14].copy_from_slice(&500_u32.to_le_bytes());
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        assert!(decoder.decode_headers().is_err());
    }

    #[test]
    fn rejects_unknown_info_header_size() {
        let mut file = minimal_bmp();
        file[14..18].copy_from_slice(&39_u32.to_le_bytes());
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        assert!(decoder.decode_headers().is_err());
    }

    #[test]
    fn rejects_wrong_plane_count() {
        let mut file = minimal_bmp();
        file[26..28].copy_from_slice(&2_u16.to_le_bytes());
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        assert!(decoder.decode_headers().is_err());
    }

    #[test]
    fn rle_compression_is_unsupported() {
        let mut file = minimal_bmp();
        file[28..30].copy_from_slice(&8_u16.to_le_bytes());
        file[30..34].copy_from_slice(&1_u32.to_le_bytes());
        let mut decoder = BmpDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode_headers(),
            Err(BmpDecoderErrors::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn probe_is_a_prefix_match() {
        assert!(probe_bmp(&minimal_bmp()));
        // a broken file still classifies as bmp, the decoder reports
        // the structural problem
        assert!(probe_bmp(b"BM\x00\x00"));
        assert!(!probe_bmp(b"PNG not bmp at all"));
        assert!(!probe_bmp(b"B"));
    }
}
