use core::fmt::Formatter;

use crate::bytestream::ByteReaderTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// Analogous to [`SeekFrom`](std::io::SeekFrom) in the std library.
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum IoSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of this object plus the specified
    /// number of bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified
    /// number of bytes.
    Current(i64)
}

impl IoSeekFrom {
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            IoSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            IoSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            IoSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors arising from reading or writing bytes.
pub enum ByteIoError {
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    /// requested, available
    NotEnoughBytes(usize, usize),
    /// requested, available
    NotEnoughBuffer(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {err}")
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

/// An in memory byte source.
///
/// Wraps anything that can be viewed as a slice of bytes and tracks a
/// read position within it. This is the cheapest [`ByteReaderTrait`]
/// implementation, all its operations are slice indexing.
pub struct MemCursor<T: AsRef<[u8]>> {
    inner:    T,
    position: usize
}

impl<T: AsRef<[u8]>> MemCursor<T> {
    pub fn new(inner: T) -> MemCursor<T> {
        MemCursor { inner, position: 0 }
    }

    /// Return the bytes the cursor walks over.
    pub fn inner_bytes(&self) -> &[u8] {
        self.inner.as_ref()
    }

    fn remaining(&self) -> usize {
        self.inner.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for MemCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        if buf.len() > self.remaining() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), self.remaining()));
        }
        let start = self.position;
        buf.copy_from_slice(&self.inner.as_ref()[start..start + buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        if N > self.remaining() {
            return Err(ByteIoError::NotEnoughBytes(N, self.remaining()));
        }
        let start = self.position;
        buf.copy_from_slice(&self.inner.as_ref()[start..start + N]);
        self.position += N;
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let can_read = buf.len().min(self.remaining());
        let start = self.position;
        buf[..can_read].copy_from_slice(&self.inner.as_ref()[start..start + can_read]);
        self.position += can_read;
        Ok(can_read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        if buf.len() > self.remaining() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), self.remaining()));
        }
        let start = self.position;
        buf.copy_from_slice(&self.inner.as_ref()[start..start + buf.len()]);
        Ok(())
    }

    fn seek_from(&mut self, from: IoSeekFrom) -> Result<u64, ByteIoError> {
        let len = self.inner.as_ref().len() as i64;
        let new_pos = match from {
            IoSeekFrom::Start(pos) => i64::try_from(pos)?,
            IoSeekFrom::End(pos) => len + pos,
            IoSeekFrom::Current(pos) => self.position as i64 + pos
        };
        if new_pos < 0 {
            return Err(ByteIoError::SeekError("cannot seek before start of buffer"));
        }
        // seeking beyond the end is allowed, reads there will fail
        self.position = new_pos as usize;
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position >= self.inner.as_ref().len())
    }

    #[inline(always)]
    fn stream_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        let start = self.position.min(self.inner.as_ref().len());
        let rest = &self.inner.as_ref()[start..];
        sink.extend_from_slice(rest);
        self.position += rest.len();
        Ok(rest.len())
    }
}

/// A byte reader with endian aware integer reads and peeking.
///
/// Wraps a [`ByteReaderTrait`] source and layers the convenience
/// routines decoders actually call, single byte and fixed width
/// integer reads plus [`peek_at`](ByteReader::peek_at) which never
/// moves the cursor.
pub struct ByteReader<T: ByteReaderTrait> {
    inner:       T,
    temp_buffer: Vec<u8>
}

impl<T: ByteReaderTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader {
            inner:       source,
            temp_buffer: vec![]
        }
    }

    /// Destroy this reader returning the underlying byte source.
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, ByteIoError> {
        self.inner.seek_from(IoSeekFrom::Current(num as i64))
    }

    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, ByteIoError> {
        self.inner.seek_from(IoSeekFrom::Current(-(num as i64)))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: IoSeekFrom) -> Result<u64, ByteIoError> {
        self.inner.seek_from(from)
    }

    #[inline(always)]
    pub fn get_u8(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Look `position` bytes ahead of the cursor and return a
    /// reference to `num_bytes` from that point.
    ///
    /// The cursor does not move, bytes have to be discarded at a
    /// later point.
    #[inline]
    pub fn peek_at(&mut self, position: usize, num_bytes: usize) -> Result<&[u8], ByteIoError> {
        if position != 0 {
            self.skip(position)?;
        }
        self.temp_buffer.resize(num_bytes, 0);
        match self.inner.peek_exact_bytes(&mut self.temp_buffer[..]) {
            Ok(()) => {
                if position != 0 {
                    self.rewind(position)?;
                }
                Ok(&self.temp_buffer)
            }
            Err(e) => {
                if position != 0 {
                    self.rewind(position)?;
                }
                Err(e)
            }
        }
    }

    #[inline(always)]
    pub fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        self.seek(IoSeekFrom::Start(position as u64))?;
        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, ByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.stream_position()
    }

    /// Number of bytes between the cursor and the end of the source.
    ///
    /// The cursor does not move.
    pub fn remaining(&mut self) -> Result<usize, ByteIoError> {
        let current = self.inner.stream_position()?;
        let end = self.inner.seek_from(IoSeekFrom::End(0))?;
        self.inner.seek_from(IoSeekFrom::Start(current))?;

        Ok(end.saturating_sub(current) as usize)
    }

    pub fn remaining_bytes(&mut self) -> Result<&[u8], ByteIoError> {
        self.temp_buffer.clear();
        let bytes_read = self.inner.read_remaining(&mut self.temp_buffer)?;
        Ok(&self.temp_buffer[..bytes_read])
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.inner.read_bytes(buf)
    }
}

enum Mode {
    BE,
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name_be:tt,$name_le:tt,$int_type:tt) => {
        impl<T: ByteReaderTrait> ByteReader<T> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];
                self.inner.read_const_bytes(&mut space)?;

                match mode {
                    Mode::BE => Ok($int_type::from_be_bytes(space)),
                    Mode::LE => Ok($int_type::from_le_bytes(space))
                }
            }

            #[doc = concat!("Read ", stringify!($int_type), " as a big endian integer")]
            #[doc = concat!("erroring out if the source cannot support a ", stringify!($int_type), " read.")]
            #[inline]
            pub fn $name_be(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::BE)
            }

            #[doc = concat!("Read ", stringify!($int_type), " as a little endian integer")]
            #[doc = concat!("erroring out if the source cannot support a ", stringify!($int_type), " read.")]
            #[inline]
            pub fn $name_le(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(get_u16_inner, get_u16_be, get_u16_le, u16);
get_single_type!(get_u32_inner, get_u32_be, get_u32_le, u32);
get_single_type!(get_u64_inner, get_u64_be, get_u64_le, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endian_reads() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        let mut reader = ByteReader::new(MemCursor::new(bytes));
        assert_eq!(reader.get_u16_le().unwrap(), 0x0201);
        assert_eq!(reader.get_u16_be().unwrap(), 0x0304);
        assert!(reader.get_u16_le().is_err());
    }

    #[test]
    fn remaining_counts_without_moving() {
        let bytes = [0_u8; 10];
        let mut reader = ByteReader::new(MemCursor::new(bytes));
        reader.skip(3).unwrap();

        assert_eq!(reader.remaining().unwrap(), 7);
        assert_eq!(reader.position().unwrap(), 3);
    }

    #[test]
    fn peek_does_not_advance() {
        let bytes = b"BM\x46\x00\x00\x00";
        let mut reader = ByteReader::new(MemCursor::new(bytes));
        assert_eq!(reader.peek_at(0, 2).unwrap(), b"BM");
        assert_eq!(reader.peek_at(2, 4).unwrap(), [0x46, 0, 0, 0]);
        assert_eq!(reader.position().unwrap(), 0);
        assert_eq!(reader.get_u8().unwrap(), b'B');
    }

    #[test]
    fn seek_before_start_errors() {
        let mut cursor = MemCursor::new([0_u8; 4]);
        assert!(cursor.seek_from(IoSeekFrom::Current(-1)).is_err());
        assert!(cursor.seek_from(IoSeekFrom::Start(2)).is_ok());
    }
}
