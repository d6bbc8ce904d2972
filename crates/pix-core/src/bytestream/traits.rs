//! Traits for the sources codecs read from and the sinks they write to.

use crate::bytestream::reader::{ByteIoError, IoSeekFrom};

/// The input trait implemented for byte sources.
///
/// Anything implementing this can feed a decoder. The trait is
/// seek based so decoders can peek ahead and rewind without
/// consuming input.
pub trait ByteReaderTrait {
    /// Read exactly `buf.len()` bytes into `buf` or return an error.
    ///
    /// On error the internal position must not move.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read exactly `N` bytes into `buf` or return an error.
    ///
    /// Same contract as [`read_exact_bytes`](Self::read_exact_bytes) but
    /// with a compile time length so implementations can optimize it.
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError>;

    /// Read up to `buf.len()` bytes, returning how many were read.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Fill `buf` from the current position without advancing it.
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Seek to a new position, returning the resulting absolute position.
    fn seek_from(&mut self, from: IoSeekFrom) -> Result<u64, ByteIoError>;

    /// Report whether the source has no more bytes to give.
    fn is_eof(&mut self) -> Result<bool, ByteIoError>;

    /// Return the current position of the inner cursor.
    fn stream_position(&mut self) -> Result<u64, ByteIoError>;

    /// Read all bytes remaining in this source into `sink`.
    ///
    /// # Returns
    /// The number of bytes appended to the sink.
    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError>;
}

/// The output trait implemented for encoder sinks.
pub trait ByteWriterTrait {
    /// Write some bytes into the sink returning the number written.
    ///
    /// An implementation is free to write fewer bytes than are in `buf`.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError>;

    /// Write all bytes in `buf` or return an error.
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;

    /// Write a fixed number of bytes or return an error.
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;

    /// Ensure buffered bytes reach the sink, like `fsync` for files.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;

    /// A hint of how many bytes the encoder expects to write.
    ///
    /// In memory sinks can use this to reserve capacity, others may
    /// ignore it.
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}
