//! Image bit depth information.

/// The number of bits that make up a single image channel sample.
///
/// Every buffer in this library stores eight bit samples, deeper
/// inputs are rejected at the codec boundary, but the depth still
/// travels with the image so encoders can validate what they are fed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// One byte per sample, `u8`
    #[default]
    Eight,
    /// Two bytes per sample, `u16`
    Sixteen
}

impl BitDepth {
    /// Return the number of bytes a single sample of this depth
    /// occupies.
    pub const fn size_of(self) -> usize {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2
        }
    }

    /// The maximum value a sample of this depth can hold.
    pub const fn max_value(self) -> u16 {
        match self {
            BitDepth::Eight => u8::MAX as u16,
            BitDepth::Sixteen => u16::MAX
        }
    }
}
