/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use pix_core::bytestream::ByteIoError;
use zune_inflate::errors::InflateDecodeErrors;

/// PNG errors that can occur during decoding
#[non_exhaustive]
pub enum PngDecodeErrors {
    /// The first eight bytes are not the PNG signature
    BadSignature,
    /// A chunk's stored CRC does not match the one computed over its
    /// type and data, (stored, calculated)
    BadCrc(u32, u32),
    /// Generic message
    Generic(String),
    /// Generic static message
    GenericStatic(&'static str),
    /// Too large dimensions for a given width or height
    TooLargeDimensions(&'static str, usize, usize),
    /// The file is valid PNG but uses a capability the decoder does
    /// not implement
    UnsupportedFeature(String),
    /// The compressed IDAT stream could not be inflated
    ZlibDecodeErrors(InflateDecodeErrors),
    IoErrors(ByteIoError)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadCrc(stored, calculated) => {
                writeln!(
                    f,
                    "Bad CRC, stored {stored:08x} but calculated {calculated:08x}"
                )
            }
            Self::Generic(message) => writeln!(f, "{message}"),
            Self::GenericStatic(message) => writeln!(f, "{message}"),
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            Self::UnsupportedFeature(feature) => {
                writeln!(f, "Unsupported PNG feature: {feature}")
            }
            Self::ZlibDecodeErrors(err) => {
                writeln!(f, "Inflate error {:?}", err.error)
            }
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        PngDecodeErrors::IoErrors(value)
    }
}

impl From<InflateDecodeErrors> for PngDecodeErrors {
    fn from(value: InflateDecodeErrors) -> Self {
        PngDecodeErrors::ZlibDecodeErrors(value)
    }
}

/// PNG errors that can occur during encoding
#[non_exhaustive]
pub enum PngEncodeErrors {
    /// Encoding writes RGBA pixels, so input must be RGB or RGBA
    UnsupportedColorspace(&'static str),
    /// Only eight bit samples can be encoded
    UnsupportedDepth,
    /// Input buffer length does not match the described dimensions
    WrongInputSize(usize, usize),
    /// Width or height does not fit the IHDR fields
    TooLargeDimensions(usize),
    /// Image has no pixels
    ZeroDimensions,
    IoErrors(ByteIoError)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Cannot encode {colorspace} as RGBA PNG")
            }
            Self::UnsupportedDepth => {
                writeln!(f, "Only eight bit samples can be encoded")
            }
            Self::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Wrong input size, expected {expected} bytes but found {found}"
                )
            }
            Self::TooLargeDimensions(dimension) => {
                writeln!(f, "Too large dimension {dimension} for PNG header")
            }
            Self::ZeroDimensions => {
                writeln!(f, "Zero width or height, nothing to encode")
            }
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl From<ByteIoError> for PngEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        PngEncodeErrors::IoErrors(value)
    }
}
