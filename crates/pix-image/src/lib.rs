/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Glue layer tying the format codecs to a common image type.
//!
//! This crate provides
//!
//! - [`Image`](crate::image::Image), an interleaved 8 bit pixel
//!   buffer with its layout metadata
//! - [`ImageFormat`](crate::codecs::ImageFormat), the format registry
//!   every decode and encode entry point dispatches through
//! - traits that decoders, encoders and transforms implement
//!
//! Format support is toggled by cargo features, `bmp`, `png` and
//! `jpeg` are all on by default.
//!
//! # Example
//! Decode an image and write it back as PNG
//! ```no_run
//! use pix_image::image::Image;
//! use pix_image::codecs::ImageFormat;
//!
//! let image = Image::open("input.bmp").unwrap();
//! image.save_to("output.png", ImageFormat::PNG).unwrap();
//! ```
pub mod codecs;
pub mod errors;
pub mod image;
pub mod metadata;
pub mod traits;

pub use pix_core;
