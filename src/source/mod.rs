mod file;
mod mmap;

pub use file::FileSource;
pub use mmap::MmapSource;

use std::io;

/// Byte-range provider backing a stream. The stream owns its source for the
/// whole stream lifetime and only ever requests ranges inside `[0, len)`.
pub trait BlobSource {
    /// Total length of the source in bytes, immutable for its lifetime.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read exactly `buf.len()` bytes starting at `offset` into `buf`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

/// In-memory byte source that owns its data.
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        MemorySource { bytes }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl BlobSource for MemorySource {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        read_from_slice(&self.bytes, offset, buf)
    }
}

pub(crate) fn read_from_slice(bytes: &[u8], offset: u64, buf: &mut [u8]) -> io::Result<()> {
    let start = usize::try_from(offset)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset overflow"))?;
    let end = start.checked_add(buf.len()).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "range end overflow")
    })?;
    if end > bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "range past end of source",
        ));
    }
    buf.copy_from_slice(&bytes[start..end]);
    Ok(())
}
