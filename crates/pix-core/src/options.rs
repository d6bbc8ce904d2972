//! Decoder and encoder options
//!
//! One [`DecoderOptions`] value can be shared between all decoders,
//! each respects the knobs that apply to it and ignores the rest.
//! [`EncoderOptions`] carries the image metadata an encoder needs to
//! interpret a raw pixel buffer.
pub use self::decoder::DecoderOptions;
pub use self::encoder::EncoderOptions;

mod decoder;
mod encoder;
