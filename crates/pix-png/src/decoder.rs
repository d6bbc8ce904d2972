/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use pix_core::bit_depth::BitDepth;
use pix_core::bytestream::{ByteReader, ByteReaderTrait};
use pix_core::colorspace::ColorSpace;
use pix_core::options::DecoderOptions;
use zune_inflate::DeflateOptions;

use crate::crc::chunk_crc;
use crate::enums::{PngChunkType, PngColor};
use crate::errors::PngDecodeErrors;

/// The eight bytes every PNG file must start with.
pub(crate) const PNG_SIGNATURE: u64 = 0x8950_4E47_0D0A_1A0A;

/// Probe some bytes to see if they consist of a PNG image.
pub fn probe_png(bytes: &[u8]) -> bool {
    if let Some(first_eight) = bytes.get(0..8) {
        return u64::from_be_bytes(first_eight.try_into().unwrap()) == PNG_SIGNATURE;
    }
    false
}

/// Information read from the IHDR chunk.
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:  usize,
    pub height: usize,
    pub depth:  u8,
    pub color:  PngColor
}

/// A PNG decoder.
///
/// Walks the chunk stream, checking every chunk's CRC before looking
/// at its contents, inflates the IDAT payload and strips the per
/// scanline filter byte. Scanlines using an actual filter are
/// reported as unsupported rather than silently mis-decoded.
///
/// Ancillary chunks the decoder does not understand are retained and
/// can be fetched with
/// [`ancillary_chunks`](PngDecoder::ancillary_chunks) after decoding.
pub struct PngDecoder<T>
where
    T: ByteReaderTrait
{
    stream:      ByteReader<T>,
    options:     DecoderOptions,
    png_info:    PngInfo,
    seen_hdr:    bool,
    seen_iend:   bool,
    idat_chunks: Vec<u8>,
    palette:     Vec<u8>,
    ancillary:   Vec<([u8; 4], Vec<u8>)>
}

impl<T> PngDecoder<T>
where
    T: ByteReaderTrait
{
    pub fn new(data: T) -> PngDecoder<T> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> PngDecoder<T> {
        PngDecoder {
            stream: ByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            seen_hdr: false,
            seen_iend: false,
            idat_chunks: vec![],
            palette: vec![],
            ancillary: vec![]
        }
    }

    /// Image width and height, present after decoding headers.
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.seen_hdr {
            Some((self.png_info.width, self.png_info.height))
        } else {
            None
        }
    }

    /// The colorspace pixels will be decoded into.
    ///
    /// Four channel streams come out as [`RGB`](ColorSpace::RGB),
    /// the alpha channel is dropped during decoding.
    pub fn colorspace(&self) -> Option<ColorSpace> {
        if !self.seen_hdr {
            return None;
        }
        match self.png_info.color {
            PngColor::Luma => Some(ColorSpace::Luma),
            PngColor::RGB | PngColor::RGBA | PngColor::Palette => Some(ColorSpace::RGB),
            PngColor::Unknown => Some(ColorSpace::Unknown)
        }
    }

    pub fn depth(&self) -> Option<BitDepth> {
        if self.seen_hdr {
            Some(BitDepth::Eight)
        } else {
            None
        }
    }

    pub const fn info(&self) -> Option<&PngInfo> {
        if self.seen_hdr {
            Some(&self.png_info)
        } else {
            None
        }
    }

    /// Size of the buffer [`decode`](Self::decode) will return,
    /// present after decoding headers.
    pub fn output_buf_size(&self) -> Option<usize> {
        if self.seen_hdr {
            Some(self.png_info.width * self.png_info.height * self.out_components())
        } else {
            None
        }
    }

    /// Channels per pixel in the decoded output, three for four
    /// channel streams since the alpha channel is dropped.
    fn out_components(&self) -> usize {
        self.png_info.color.num_components().min(3)
    }

    /// Chunks the decoder carried along without interpreting,
    /// as (type, data) pairs in stream order. Populated by
    /// [`decode`](Self::decode).
    pub fn ancillary_chunks(&self) -> &[([u8; 4], Vec<u8>)] {
        &self.ancillary
    }

    /// Read one whole chunk, validating its CRC before handing the
    /// data out.
    fn read_chunk(&mut self) -> Result<(PngChunkType, [u8; 4], Vec<u8>), PngDecodeErrors> {
        let length = self.stream.get_u32_be()? as usize;
        let name = self.stream.read_fixed_bytes::<4>()?;

        // reject before allocating, a hostile length field should not
        // reserve gigabytes
        let remaining = self.stream.remaining()?;
        if length.saturating_add(4) > remaining {
            return Err(PngDecodeErrors::Generic(format!(
                "Chunk length {length} exceeds the {remaining} bytes left in the stream"
            )));
        }

        let mut data = vec![0_u8; length];
        self.stream.read_exact_bytes(&mut data)?;

        let stored_crc = self.stream.get_u32_be()?;

        if self.options.png_get_confirm_crc() {
            let calculated = chunk_crc(&name, &data);
            if stored_crc != calculated {
                return Err(PngDecodeErrors::BadCrc(stored_crc, calculated));
            }
        }
        Ok((PngChunkType::from_bytes(&name), name, data))
    }

    fn parse_ihdr(&mut self, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if data.len() != 13 {
            return Err(PngDecodeErrors::GenericStatic("Invalid IHDR length"));
        }

        let info = &mut self.png_info;
        info.width = u32::from_be_bytes(data[0..4].try_into().unwrap()) as usize;
        info.height = u32::from_be_bytes(data[4..8].try_into().unwrap()) as usize;

        if info.width == 0 || info.height == 0 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height is zero, invalid image"
            ));
        }
        if info.width > self.options.max_width() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                info.width
            ));
        }
        if info.height > self.options.max_height() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                info.height
            ));
        }

        info.depth = data[8];
        if !matches!(info.depth, 1 | 2 | 4 | 8 | 16) {
            return Err(PngDecodeErrors::Generic(format!(
                "Invalid bit depth {}",
                info.depth
            )));
        }
        if info.depth != 8 {
            return Err(PngDecodeErrors::UnsupportedFeature(format!(
                "bit depth {}",
                info.depth
            )));
        }

        info.color = match PngColor::from_int(data[9]) {
            Some(color) => color,
            None => {
                // 4 is grayscale with alpha, valid but not decoded here
                if data[9] == 4 {
                    return Err(PngDecodeErrors::UnsupportedFeature(
                        "grayscale with alpha images".into()
                    ));
                }
                return Err(PngDecodeErrors::Generic(format!(
                    "Invalid color type {}",
                    data[9]
                )));
            }
        };

        if data[10] != 0 {
            return Err(PngDecodeErrors::GenericStatic("Invalid compression method"));
        }
        if data[11] != 0 {
            return Err(PngDecodeErrors::GenericStatic("Invalid filter method"));
        }
        match data[12] {
            0 => {}
            1 => {
                return Err(PngDecodeErrors::UnsupportedFeature(
                    "Adam7 interlaced images".into()
                ))
            }
            _ => return Err(PngDecodeErrors::GenericStatic("Invalid interlace method"))
        }

        trace!("Width: {}", info.width);
        trace!("Height: {}", info.height);
        trace!("Color type: {:?}", info.color);

        Ok(())
    }

    /// Read the signature and the IHDR chunk, which the format
    /// requires to come first.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Ok(());
        }

        if self.stream.get_u64_be()? != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }

        let (chunk_type, _, data) = self.read_chunk()?;
        if chunk_type != PngChunkType::IHDR {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk is not IHDR, invalid image"
            ));
        }
        self.parse_ihdr(&data)?;
        self.seen_hdr = true;

        Ok(())
    }

    /// Decode the image returning the pixels top to bottom with the
    /// per scanline filter byte stripped.
    ///
    /// Four channel streams lose their alpha channel, so a file
    /// written by [`PngEncoder`](crate::PngEncoder) decodes back to
    /// the exact three channel buffer it was given.
    pub fn decode(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        self.decode_headers()?;

        while !self.seen_iend {
            if self.stream.eof()? {
                return Err(PngDecodeErrors::GenericStatic(
                    "PNG stream ended without an IEND chunk"
                ));
            }
            let (chunk_type, name, data) = self.read_chunk()?;

            match chunk_type {
                PngChunkType::IHDR => {
                    return Err(PngDecodeErrors::GenericStatic("Duplicate IHDR chunk"));
                }
                PngChunkType::PLTE => {
                    if data.len() % 3 != 0 || data.len() > 256 * 3 {
                        return Err(PngDecodeErrors::GenericStatic("Invalid PLTE length"));
                    }
                    self.palette = data;
                }
                PngChunkType::IDAT => {
                    self.idat_chunks.extend_from_slice(&data);
                }
                PngChunkType::IEND => {
                    self.seen_iend = true;
                }
                PngChunkType::Unknown => {
                    trace!(
                        "Retaining chunk {} without interpreting it",
                        String::from_utf8_lossy(&name)
                    );
                    self.ancillary.push((name, data));
                }
            }
        }

        if !self.stream.eof()? {
            return Err(PngDecodeErrors::GenericStatic(
                "Trailing bytes after IEND chunk"
            ));
        }
        if self.png_info.color == PngColor::Palette {
            return Err(PngDecodeErrors::UnsupportedFeature(
                "indexed color images".into()
            ));
        }
        if self.idat_chunks.is_empty() {
            return Err(PngDecodeErrors::GenericStatic("No IDAT chunks present"));
        }

        let raw = self.inflate()?;
        let pixels = self.strip_filter_bytes(&raw)?;

        if self.png_info.color == PngColor::RGBA {
            return Ok(drop_alpha(&pixels));
        }
        Ok(pixels)
    }

    fn inflate(&self) -> Result<Vec<u8>, PngDecodeErrors> {
        let info = &self.png_info;
        // scanlines plus one filter byte each
        let size_hint = (info.width * info.color.num_components() + 1) * info.height;

        let options = DeflateOptions::default().set_size_hint(size_hint);
        let mut decoder = zune_inflate::DeflateDecoder::new_with_options(&self.idat_chunks, options);

        decoder
            .decode_zlib()
            .map_err(PngDecodeErrors::ZlibDecodeErrors)
    }

    fn strip_filter_bytes(&self, raw: &[u8]) -> Result<Vec<u8>, PngDecodeErrors> {
        let info = &self.png_info;
        let scanline = info.width * info.color.num_components();
        let expected = (scanline + 1) * info.height;

        if raw.len() != expected {
            return Err(PngDecodeErrors::Generic(format!(
                "Wrong decompressed size, expected {expected} but found {}",
                raw.len()
            )));
        }

        let mut out = vec![0_u8; scanline * info.height];
        for (src, dst) in raw
            .chunks_exact(scanline + 1)
            .zip(out.chunks_exact_mut(scanline))
        {
            if src[0] != 0 {
                return Err(PngDecodeErrors::UnsupportedFeature(format!(
                    "scanline filter {}",
                    src[0]
                )));
            }
            dst.copy_from_slice(&src[1..]);
        }
        Ok(out)
    }
}

fn drop_alpha(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() / 4 * 3);
    for pixel in pixels.chunks_exact(4) {
        out.extend_from_slice(&pixel[..3]);
    }
    out
}

#[cfg(test)]
mod tests {
    use pix_core::bit_depth::BitDepth;
    use pix_core::bytestream::MemCursor;
    use pix_core::options::EncoderOptions;

    use super::*;
    use crate::PngEncoder;

    fn encode_rgb(width: usize, height: usize, pixels: &[u8]) -> Vec<u8> {
        let options = EncoderOptions::new(width, height, ColorSpace::RGB, BitDepth::Eight);
        let mut sink = vec![];
        PngEncoder::new(pixels, options).encode(&mut sink).unwrap();
        sink
    }

    fn raw_chunk(name: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut chunk = vec![];
        chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
        chunk.extend_from_slice(name);
        chunk.extend_from_slice(data);
        chunk.extend_from_slice(&chunk_crc(name, data).to_be_bytes());
        chunk
    }

    #[test]
    fn round_trip_reproduces_the_input() {
        let pixels: Vec<u8> = (1..=12).collect();
        let file = encode_rgb(2, 2, &pixels);

        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        let decoded = decoder.decode().unwrap();

        assert_eq!(decoder.dimensions(), Some((2, 2)));
        // the synthesized alpha channel is dropped on the way back
        assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
        assert_eq!(decoder.output_buf_size(), Some(12));
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut file = encode_rgb(2, 2, &[0; 12]);
        file[0] = 0;
        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode_headers(),
            Err(PngDecodeErrors::BadSignature)
        ));
    }

    #[test]
    fn rejects_crc_mismatch() {
        let mut file = encode_rgb(2, 2, &[128; 12]);
        // flip a byte inside the IDAT payload without fixing its CRC
        let idat_pos = file
            .windows(4)
            .position(|window| window == b"IDAT")
            .unwrap();
        file[idat_pos + 6] ^= 0xFF;

        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode(),
            Err(PngDecodeErrors::BadCrc(_, _))
        ));
    }

    #[test]
    fn crc_check_can_be_disabled() {
        let mut file = encode_rgb(2, 2, &[128; 12]);
        let idat_pos = file
            .windows(4)
            .position(|window| window == b"IDAT")
            .unwrap();
        // corrupt the stored CRC itself, the data stays inflatable
        let crc_pos = file.len() - 12 - 4;
        file[crc_pos] ^= 0xFF;

        assert!(idat_pos < crc_pos);

        let options = DecoderOptions::default().png_set_confirm_crc(false);
        let mut decoder = PngDecoder::new_with_options(MemCursor::new(&file), options);
        assert!(decoder.decode().is_ok());
    }

    #[test]
    fn rejects_missing_iend() {
        let file = encode_rgb(2, 2, &[7; 12]);
        // drop the trailing IEND chunk entirely
        let truncated = &file[..file.len() - 12];
        let mut decoder = PngDecoder::new(MemCursor::new(truncated));
        assert!(decoder.decode().is_err());
    }

    #[test]
    fn rejects_trailing_bytes_after_iend() {
        let mut file = encode_rgb(2, 2, &[7; 12]);
        file.extend_from_slice(b"junk");
        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(decoder.decode().is_err());
    }

    #[test]
    fn rejects_interlaced_images() {
        let mut ihdr = [0_u8; 13];
        ihdr[0..4].copy_from_slice(&2_u32.to_be_bytes());
        ihdr[4..8].copy_from_slice(&2_u32.to_be_bytes());
        ihdr[8] = 8; // depth
        ihdr[9] = 6; // RGBA
        ihdr[12] = 1; // Adam7

        let mut file = PNG_SIGNATURE.to_be_bytes().to_vec();
        file.extend_from_slice(&raw_chunk(b"IHDR", &ihdr));

        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode_headers(),
            Err(PngDecodeErrors::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn rejects_filtered_scanlines() {
        let mut ihdr = [0_u8; 13];
        ihdr[0..4].copy_from_slice(&1_u32.to_be_bytes());
        ihdr[4..8].copy_from_slice(&1_u32.to_be_bytes());
        ihdr[8] = 8;
        ihdr[9] = 0; // Luma

        // single scanline using the Sub filter
        let raw = [1_u8, 42];
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 1);

        let mut file = PNG_SIGNATURE.to_be_bytes().to_vec();
        file.extend_from_slice(&raw_chunk(b"IHDR", &ihdr));
        file.extend_from_slice(&raw_chunk(b"IDAT", &compressed));
        file.extend_from_slice(&raw_chunk(b"IEND", &[]));

        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode(),
            Err(PngDecodeErrors::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn ancillary_chunks_are_retained() {
        let file = encode_rgb(2, 2, &[9; 12]);
        // splice a tEXt chunk in front of the IDAT chunk
        let idat_pos = file
            .windows(4)
            .position(|window| window == b"IDAT")
            .unwrap()
            - 4;
        let mut spliced = file[..idat_pos].to_vec();
        spliced.extend_from_slice(&raw_chunk(b"tEXt", b"comment\0hello"));
        spliced.extend_from_slice(&file[idat_pos..]);

        let mut decoder = PngDecoder::new(MemCursor::new(&spliced));
        decoder.decode().unwrap();

        let retained = decoder.ancillary_chunks();
        assert_eq!(retained.len(), 1);
        assert_eq!(&retained[0].0, b"tEXt");
        assert_eq!(retained[0].1, b"comment\0hello");
    }

    #[test]
    fn oversized_chunk_length_is_rejected() {
        // a length field claiming 4 GiB with almost nothing behind it
        let mut file = PNG_SIGNATURE.to_be_bytes().to_vec();
        file.extend_from_slice(&u32::MAX.to_be_bytes());
        file.extend_from_slice(b"IHDR");
        file.extend_from_slice(&[0; 13]);

        let mut decoder = PngDecoder::new(MemCursor::new(&file));
        assert!(matches!(
            decoder.decode_headers(),
            Err(PngDecodeErrors::Generic(_))
        ));
    }

    #[test]
    fn probe_checks_signature() {
        assert!(probe_png(&encode_rgb(1, 1, &[1, 2, 3])));
        assert!(!probe_png(b"BM"));
        assert!(!probe_png(&[]));
    }
}
