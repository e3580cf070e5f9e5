use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, StreamError};

use super::{read_from_slice, BlobSource};

/// Memory-mapped byte source for large files.
#[derive(Debug)]
pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    /// Map the file at `path`.
    ///
    /// Safety: `memmap2::Mmap::map` is safe as long as the file is not
    /// concurrently truncated in a way that invalidates the mapping.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            StreamError::InvalidSource(format!("{}: {}", path.as_ref().display(), e))
        })?;
        MmapSource::from_file(&file)
    }

    pub fn from_file(file: &File) -> Result<Self> {
        // SAFETY: see `open`; the caller must keep the file untruncated for
        // the lifetime of the mapping.
        let mmap = unsafe { Mmap::map(file) }
            .map_err(|e| StreamError::InvalidSource(format!("mmap: {}", e)))?;
        Ok(MmapSource { mmap })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.mmap[..]
    }
}

impl BlobSource for MmapSource {
    fn len(&self) -> u64 {
        self.mmap.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        read_from_slice(&self.mmap[..], offset, buf)
    }
}
