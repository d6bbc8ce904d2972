//! Core routines shared by the pix family of crates
//!
//! This crate provides the plumbing used by every decoder and
//! encoder in the workspace
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace and bit depth information shared by images
//! - Image decoder and encoder options
pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
