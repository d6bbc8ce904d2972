/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Critical chunk types the decoder acts on, everything else is
/// carried along as an opaque blob.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    Unknown
}

impl PngChunkType {
    pub fn from_bytes(bytes: &[u8; 4]) -> PngChunkType {
        match bytes {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            _ => PngChunkType::Unknown
        }
    }
}

/// Color type from the IHDR chunk.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum PngColor {
    /// Color type 0, one grayscale sample per pixel
    Luma,
    /// Color type 2, three samples per pixel
    RGB,
    /// Color type 3, palette indices. Recognized in headers but the
    /// pixel decode path does not expand it
    Palette,
    /// Color type 6, four samples per pixel
    RGBA,
    #[default]
    Unknown
}

impl PngColor {
    pub(crate) fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(PngColor::Luma),
            2 => Some(PngColor::RGB),
            3 => Some(PngColor::Palette),
            6 => Some(PngColor::RGBA),
            _ => None
        }
    }

    pub(crate) const fn num_components(self) -> usize {
        match self {
            PngColor::Luma => 1,
            PngColor::RGB => 3,
            // expanded size, one index per pixel on the wire
            PngColor::Palette => 3,
            PngColor::RGBA => 4,
            PngColor::Unknown => 0
        }
    }
}
