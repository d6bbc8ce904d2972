/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pix_core::colorspace::ColorSpace;

/// Two byte signatures a BMP file header may start with.
///
/// `BM` is the Windows bitmap everyone writes, the others are OS/2
/// relics (bitmap arrays, icons, pointers) that still carry a
/// decodable bitmap after the file header.
pub(crate) const BMP_SIGNATURES: [[u8; 2]; 6] =
    [*b"BM", *b"BA", *b"CI", *b"CP", *b"IC", *b"PT"];

/// Information header sizes the decoder recognizes.
pub(crate) const DIB_HEADER_SIZES: [u32; 7] = [12, 16, 40, 52, 56, 108, 124];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum BmpCompression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::Rgb),
            1 => Some(BmpCompression::Rle8),
            2 => Some(BmpCompression::Rle4),
            3 => Some(BmpCompression::Bitfields),
            _ => None
        }
    }
}

/// How the pixel array is laid out on disk.
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) enum BmpPixelFormat {
    None,
    /// 32 bit, four bytes per pixel as stored
    BGRA,
    /// 24 bit, three bytes per pixel as stored
    BGR,
    /// 16 bit, 5 bits per channel packed into a little endian u16
    RGB555,
    /// 1, 4 or 8 bit palette indices
    Pal8,
    /// 8 bit samples with no palette
    Gray8
}

impl BmpPixelFormat {
    pub fn num_components(&self) -> usize {
        match self {
            BmpPixelFormat::None => 0,
            BmpPixelFormat::BGRA => 4,
            BmpPixelFormat::BGR => 3,
            // expanded to full bytes during decode
            BmpPixelFormat::RGB555 => 3,
            BmpPixelFormat::Pal8 => 3,
            BmpPixelFormat::Gray8 => 1
        }
    }

    pub fn into_colorspace(self) -> ColorSpace {
        match self {
            BmpPixelFormat::None => ColorSpace::Unknown,
            BmpPixelFormat::BGRA => ColorSpace::BGRA,
            BmpPixelFormat::BGR => ColorSpace::BGR,
            BmpPixelFormat::RGB555 => ColorSpace::BGR,
            BmpPixelFormat::Pal8 => ColorSpace::BGR,
            BmpPixelFormat::Gray8 => ColorSpace::Luma
        }
    }
}
