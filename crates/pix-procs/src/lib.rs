/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Image transforms for the pix image library.
//!
//! Every transform is a struct implementing
//! [`OperationsTrait`](pix_image::traits::OperationsTrait) and
//! mutates the image in place. Transforms know nothing about file
//! formats, they only see the pixel buffer and its layout.
pub mod bgr2rgb;
pub mod flip;
pub mod grayscale;
pub mod histogram_equalize;
pub mod roll;
pub mod rotate;
