/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A BMP decoder and encoder
//!
//! The decoder handles the common Windows and OS/2 header variants
//! and uncompressed pixel layouts, the encoder always writes the
//! 40 byte info header with 24 bit pixels.
//!
//! Pixels come out of the decoder in the channel order they are
//! stored on disk, so 24 bit files decode to BGR and 32 bit files to
//! BGRA. Nothing here reorders channels, that is left to explicit
//! image operations.
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::encoder::{row_padding, BmpEncoder};
pub use crate::errors::{BmpDecoderErrors, BmpEncoderErrors};

mod common;
mod decoder;
mod encoder;
mod errors;
