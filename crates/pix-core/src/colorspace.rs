//! Image colorspace information.

/// All image colorspaces understood by the library.
///
/// Codecs record what they actually decoded here and never reorder
/// channels behind the caller's back, so a BMP pixel array comes out
/// as [`BGR`](ColorSpace::BGR) and stays that way until an explicit
/// operation changes it.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Grayscale
    Luma,
    /// Grayscale with alpha
    LumaA,
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Blue, Green, Red
    BGR,
    /// Blue, Green, Red, Alpha
    BGRA,
    /// The colorspace is unknown
    Unknown
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace.
    ///
    /// E.g. RGB returns 3 since it contains R, G and B colors to make
    /// up a pixel.
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::RGB | Self::BGR => 3,
            Self::RGBA | Self::BGRA => 4,
            Self::Unknown => 0
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA | Self::BGRA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::LumaA | Self::Luma)
    }

    /// Returns the index of the alpha channel within a pixel, or
    /// `None` if the colorspace carries no alpha.
    pub const fn alpha_position(&self) -> Option<usize> {
        match self {
            Self::RGBA | Self::BGRA => Some(3),
            Self::LumaA => Some(1),
            _ => None
        }
    }
}
