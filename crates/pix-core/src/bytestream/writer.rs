use std::fs::File;
use std::io::{BufWriter, Write};

use crate::bytestream::{ByteIoError, ByteWriterTrait};

impl ByteWriterTrait for &mut Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.reserve(size);
        Ok(())
    }
}

impl ByteWriterTrait for &mut BufWriter<File> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.write(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}

/// A byte writer with endian aware integer writes.
///
/// Wraps a [`ByteWriterTrait`] sink and tracks how many bytes the
/// encoder has pushed through it.
pub struct ByteWriter<T: ByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    pub fn new(sink: T) -> ByteWriter<T> {
        ByteWriter {
            inner:         sink,
            bytes_written: 0
        }
    }

    /// Destroy this writer returning the underlying sink.
    pub fn consume(self) -> T {
        self.inner
    }

    /// Number of bytes written through this writer so far.
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    #[inline(always)]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.inner.write_const_bytes(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.inner.flush_bytes()
    }

    /// Hint how many bytes are about to be written.
    pub fn reserve(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.inner.reserve_capacity(size)
    }
}

enum Mode {
    BE,
    LE
}

macro_rules! write_single_type {
    ($name:tt,$name_be:tt,$name_le:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, value: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                const SIZE: usize = core::mem::size_of::<$int_type>();

                let bytes = match mode {
                    Mode::BE => value.to_be_bytes(),
                    Mode::LE => value.to_le_bytes()
                };
                self.inner.write_const_bytes(&bytes)?;
                self.bytes_written += SIZE;
                Ok(())
            }

            #[doc = concat!("Write ", stringify!($int_type), " as a big endian integer")]
            #[doc = concat!("erroring out if the sink cannot support a ", stringify!($int_type), " write.")]
            #[inline]
            pub fn $name_be(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::BE)
            }

            #[doc = concat!("Write ", stringify!($int_type), " as a little endian integer")]
            #[doc = concat!("erroring out if the sink cannot support a ", stringify!($int_type), " write.")]
            #[inline]
            pub fn $name_le(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::LE)
            }
        }
    };
}

write_single_type!(write_u16_inner, write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_inner, write_u32_be, write_u32_le, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endian_writes() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        writer.write_u16_le(0x0201).unwrap();
        writer.write_u32_be(0x03040506).unwrap();
        writer.write_u8(0xFF).unwrap();
        assert_eq!(writer.bytes_written(), 7);
        assert_eq!(sink, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xFF]);
    }
}
