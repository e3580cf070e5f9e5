use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Result, StreamError};

use super::BlobSource;

/// Filesystem-backed byte source. Each range read seeks then reads exactly.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    length: u64,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            StreamError::InvalidSource(format!("{}: {}", path.as_ref().display(), e))
        })?;
        FileSource::from_file(file)
    }

    pub fn from_file(file: File) -> Result<Self> {
        let length = file
            .metadata()
            .map_err(|e| StreamError::InvalidSource(format!("file metadata: {}", e)))?
            .len();
        Ok(FileSource { file, length })
    }
}

impl BlobSource for FileSource {
    fn len(&self) -> u64 {
        self.length
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)
    }
}
