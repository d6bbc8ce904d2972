/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A PNG decoder and encoder
//!
//! The decoder walks the chunk stream validating the CRC of every
//! chunk, concatenates the IDAT payloads and inflates them. It
//! handles 8 bit grayscale, RGB and RGBA images with unfiltered
//! scanlines, everything this library's encoder produces. Ancillary
//! chunks are kept as opaque blobs rather than interpreted.
//!
//! The encoder always writes 8 bit RGBA with no scanline filtering,
//! synthesizing an opaque alpha channel for RGB input, and compresses
//! with a fast zlib setting.
pub use crate::decoder::{probe_png, PngDecoder, PngInfo};
pub use crate::encoder::PngEncoder;
pub use crate::enums::PngColor;
pub use crate::errors::{PngDecodeErrors, PngEncodeErrors};

mod crc;
mod decoder;
mod encoder;
mod enums;
mod errors;
