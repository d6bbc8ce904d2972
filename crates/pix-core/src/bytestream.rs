//! Endian aware byte reading and writing
//!
//! The reader and writer here wrap anything that implements the
//! respective I/O traits, the common case being an in memory cursor
//! for reading and a `Vec<u8>` or buffered file for writing.
pub use self::reader::{ByteIoError, ByteReader, IoSeekFrom, MemCursor};
pub use self::traits::{ByteReaderTrait, ByteWriterTrait};
pub use self::writer::ByteWriter;

mod reader;
mod traits;
mod writer;
