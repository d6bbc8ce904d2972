use crate::bit_depth::BitDepth;
use crate::colorspace::ColorSpace;

/// Encoder options
///
/// The metadata an encoder needs to make sense of a raw pixel
/// buffer: dimensions, colorspace and depth, plus lossy quality for
/// the formats that use it.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    depth:      BitDepth,
    /// Lossy encode quality in 0..=100, only JPEG looks at it.
    quality:    u8
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGB,
            depth:      BitDepth::Eight,
            quality:    80
        }
    }
}

impl EncoderOptions {
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, depth: BitDepth
    ) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            depth,
            ..Default::default()
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    pub const fn quality(&self) -> u8 {
        self.quality
    }

    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    pub fn set_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn set_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }
}
