/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use pix_core::bytestream::ByteIoError;

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The file does not start with a known BMP signature
    InvalidMagicBytes,
    /// The output buffer is too small, expected at least
    /// a size but got another size
    TooSmallBuffer(usize, usize),
    /// Generic message
    GenericStatic(&'static str),
    /// Generic allocated message
    Generic(String),
    /// Too large dimensions for a given width or height
    TooLargeDimensions(&'static str, usize, usize),
    /// The file is valid BMP but uses a capability the decoder
    /// does not implement
    UnsupportedFeature(&'static str),
    IoErrors(ByteIoError)
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, not a known BMP signature")
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small of buffer, expected {expected} but found {found}"
                )
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{message}")
            }
            Self::Generic(message) => {
                writeln!(f, "{message}")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            Self::UnsupportedFeature(feature) => {
                writeln!(f, "Unsupported BMP feature: {feature}")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl From<ByteIoError> for BmpDecoderErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}

/// BMP errors that can occur during encoding
#[non_exhaustive]
pub enum BmpEncoderErrors {
    /// Encoding only writes 24 bit pixels, so input must have
    /// exactly three channels
    UnsupportedColorspace(&'static str),
    /// Input buffer length does not match width * height * 3
    WrongInputSize(usize, usize),
    /// Width or height does not fit the header fields
    TooLargeDimensions(usize),
    /// Image has no pixels
    ZeroDimensions,
    IoErrors(ByteIoError)
}

impl Debug for BmpEncoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Cannot encode {colorspace} as 24 bit BMP")
            }
            Self::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Wrong input size, expected {expected} bytes but found {found}"
                )
            }
            Self::TooLargeDimensions(dimension) => {
                writeln!(f, "Too large dimension {dimension} for BMP header")
            }
            Self::ZeroDimensions => {
                writeln!(f, "Zero width or height, nothing to encode")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl From<ByteIoError> for BmpEncoderErrors {
    fn from(value: ByteIoError) -> Self {
        BmpEncoderErrors::IoErrors(value)
    }
}
