/// Decoder options
///
/// Not all options are respected by all decoders, each option names
/// the decoders that look at it.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width, images wider than this are rejected.
    ///
    /// Respected by all decoders.
    max_width:  usize,
    /// Maximum height, images taller than this are rejected.
    ///
    /// Respected by all decoders.
    max_height: usize,
    /// Whether recoverable oddities abort decoding or just log.
    strict_mode: bool,
    /// Whether the PNG decoder confirms the CRC of every chunk.
    png_confirm_crc: bool
}

/// Default limits a decoder will still happily decode.
const DEFAULT_MAX_DIMENSION: usize = 1 << 14;

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:       DEFAULT_MAX_DIMENSION,
            max_height:      DEFAULT_MAX_DIMENSION,
            strict_mode:     false,
            png_confirm_crc: true
        }
    }
}

impl DecoderOptions {
    /// Get the maximum width configured for which the decoder
    /// should not try to decode images greater than this width.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder
    /// should not try to decode images greater than this height.
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the maximum image width the decoder accepts.
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum image height the decoder accepts.
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// When true, recoverable oddities in a bitstream become hard
    /// errors instead of log lines.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Whether the PNG decoder should validate chunk checksums.
    ///
    /// Defaults to true. Turning it off skips CRC32 verification of
    /// every chunk, which tolerates corrupt but otherwise decodable
    /// files.
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.png_confirm_crc
    }

    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.png_confirm_crc = yes;
        self
    }
}
