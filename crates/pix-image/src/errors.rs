/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Top level error types for the whole library.
//!
//! Codec specific errors are flattened into [`ImgErrors`] so that
//! every entry point can report failures with a single type.
//! Three broad classes survive the flattening
//!
//! - the bytes do not belong to any known format
//! - the bytes claim to be a format but violate its structure
//! - the bytes are valid but use a feature we do not implement
use std::fmt::{Debug, Formatter};

use pix_core::bytestream::ByteIoError;
use pix_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;

/// Anything that can go wrong when decoding, encoding or
/// transforming an image
pub enum ImgErrors {
    /// The image stream is structurally invalid for its format
    ImageDecodeErrors(String),
    /// The image stream is valid but uses a feature the
    /// decoder does not implement
    UnsupportedFeature(String),
    /// No decoder matched the byte stream
    ImageDecoderNotImplemented(ImageFormat),
    /// A decoder exists for the format but was not compiled in
    ImageDecoderNotIncluded(ImageFormat),
    /// An encode operation failed
    EncodeErrors(ImgEncodeErrors),
    /// An image transform failed
    OperationsErrors(ImgOperationsErrors),
    GenericStr(&'static str),
    GenericString(String),
    IoErrors(std::io::Error)
}

/// Errors from the encode path
pub enum ImgEncodeErrors {
    Generic(String),
    GenericStatic(&'static str),
    /// The format has no compiled in encoder
    NoEncoderForFormat(ImageFormat),
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    ImageEncodeErrors(String)
}

/// Errors from image transforms
pub enum ImgOperationsErrors {
    Generic(&'static str),
    GenericString(String),
    WrongColorspace(ColorSpace, ColorSpace),
    WrongComponents(usize, usize)
}

impl Debug for ImgErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageDecodeErrors(error) => {
                writeln!(f, "Image decoding failed: {error}")
            }
            Self::UnsupportedFeature(feature) => {
                writeln!(f, "Unsupported image feature: {feature}")
            }
            Self::ImageDecoderNotImplemented(format) => {
                writeln!(f, "No decoder implemented for format {format:?}")
            }
            Self::ImageDecoderNotIncluded(format) => {
                writeln!(
                    f,
                    "A decoder for format {format:?} exists but was not included in this build"
                )
            }
            Self::EncodeErrors(error) => {
                writeln!(f, "Image encoding failed: {error:?}")
            }
            Self::OperationsErrors(error) => {
                writeln!(f, "Image operation failed: {error:?}")
            }
            Self::GenericStr(error) => {
                writeln!(f, "{error}")
            }
            Self::GenericString(error) => {
                writeln!(f, "{error}")
            }
            Self::IoErrors(error) => {
                writeln!(f, "I/O error: {error}")
            }
        }
    }
}

impl Debug for ImgEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(error) => writeln!(f, "{error}"),
            Self::GenericStatic(error) => writeln!(f, "{error}"),
            Self::NoEncoderForFormat(format) => {
                writeln!(f, "No encoder included for format {format:?}")
            }
            Self::UnsupportedColorspace(present, supported) => {
                writeln!(
                    f,
                    "The encoder cannot encode images in {present:?}, supported colorspaces are {supported:?}"
                )
            }
            Self::ImageEncodeErrors(error) => writeln!(f, "{error}")
        }
    }
}

impl Debug for ImgOperationsErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(error) => writeln!(f, "{error}"),
            Self::GenericString(error) => writeln!(f, "{error}"),
            Self::WrongColorspace(expected, present) => {
                writeln!(
                    f,
                    "Expected image in colorspace {expected:?} but it is in {present:?}"
                )
            }
            Self::WrongComponents(expected, present) => {
                writeln!(f, "Expected {expected} color components but found {present}")
            }
        }
    }
}

impl From<ImgEncodeErrors> for ImgErrors {
    fn from(from: ImgEncodeErrors) -> Self {
        ImgErrors::EncodeErrors(from)
    }
}

impl From<ImgOperationsErrors> for ImgErrors {
    fn from(from: ImgOperationsErrors) -> Self {
        ImgErrors::OperationsErrors(from)
    }
}

impl From<std::io::Error> for ImgErrors {
    fn from(from: std::io::Error) -> Self {
        ImgErrors::IoErrors(from)
    }
}

impl From<ByteIoError> for ImgErrors {
    fn from(from: ByteIoError) -> Self {
        ImgErrors::GenericString(format!("{from:?}"))
    }
}

#[cfg(feature = "bmp")]
impl From<pix_bmp::BmpDecoderErrors> for ImgErrors {
    fn from(from: pix_bmp::BmpDecoderErrors) -> Self {
        match from {
            pix_bmp::BmpDecoderErrors::UnsupportedFeature(feature) => {
                ImgErrors::UnsupportedFeature(format!("bmp: {feature}"))
            }
            error => ImgErrors::ImageDecodeErrors(format!("bmp: {error:?}"))
        }
    }
}

#[cfg(feature = "bmp")]
impl From<pix_bmp::BmpEncoderErrors> for ImgErrors {
    fn from(from: pix_bmp::BmpEncoderErrors) -> Self {
        ImgErrors::EncodeErrors(ImgEncodeErrors::ImageEncodeErrors(format!("bmp: {from:?}")))
    }
}

#[cfg(feature = "png")]
impl From<pix_png::PngDecodeErrors> for ImgErrors {
    fn from(from: pix_png::PngDecodeErrors) -> Self {
        match from {
            pix_png::PngDecodeErrors::UnsupportedFeature(feature) => {
                ImgErrors::UnsupportedFeature(format!("png: {feature}"))
            }
            error => ImgErrors::ImageDecodeErrors(format!("png: {error:?}"))
        }
    }
}

#[cfg(feature = "png")]
impl From<pix_png::PngEncodeErrors> for ImgErrors {
    fn from(from: pix_png::PngEncodeErrors) -> Self {
        ImgErrors::EncodeErrors(ImgEncodeErrors::ImageEncodeErrors(format!("png: {from:?}")))
    }
}

#[cfg(feature = "jpeg")]
impl From<zune_jpeg::errors::DecodeErrors> for ImgErrors {
    fn from(from: zune_jpeg::errors::DecodeErrors) -> Self {
        match from {
            zune_jpeg::errors::DecodeErrors::Unsupported(scheme) => {
                ImgErrors::UnsupportedFeature(format!("jpeg: {scheme:?}"))
            }
            error => ImgErrors::ImageDecodeErrors(format!("jpeg: {error:?}"))
        }
    }
}
