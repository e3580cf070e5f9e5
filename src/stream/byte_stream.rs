use std::io::{self, Read, Seek, SeekFrom};

use log::warn;

use crate::chunk::{ChunkCache, ChunkTable};
use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::source::BlobSource;

use super::cursor::Cursor;

/// Sequential and random-access byte reader over a [`BlobSource`], holding
/// exactly one chunk in memory at a time.
///
/// Reads past the end of the cached chunk load the next chunk transparently;
/// a sequential caller never needs to seek. End of source is reported as a
/// sentinel (`Ok(None)` / short counts), never as an error.
pub struct ByteStream<S> {
    source: S,
    config: StreamConfig,
    table: ChunkTable,
    cache: ChunkCache,
    cursor: Cursor,
}

impl<S: BlobSource> ByteStream<S> {
    /// Validate `config`, derive the chunk table and materialize chunk 0.
    /// A zero-length source gets an empty slot and reports EOF immediately.
    pub fn new(source: S, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let table = ChunkTable::new(source.len(), config.chunk_size);
        let mut stream = ByteStream {
            source,
            config,
            table,
            cache: ChunkCache::empty(),
            cursor: Cursor::start(),
        };
        if stream.table.chunk_count() > 0 {
            stream
                .cache
                .load(&mut stream.source, &stream.table, 0)?;
        }
        Ok(stream)
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Display name from the configuration; may be empty.
    pub fn file_name(&self) -> &str {
        &self.config.default_file_name
    }

    /// Total length of the underlying source in bytes.
    pub fn len(&self) -> u64 {
        self.table.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn chunk_count(&self) -> u64 {
        self.table.chunk_count()
    }

    /// Absolute position of the next read.
    pub fn tell(&self) -> u64 {
        self.cursor.absolute(self.table.chunk_size())
    }

    /// Whether the read position has reached or passed the end of the source.
    pub fn is_eof(&self) -> bool {
        self.tell() >= self.table.length()
    }

    /// Move the read position to absolute `offset`, loading the target chunk
    /// only when it differs from the cached one. `offset == len()` is valid
    /// and lands in the EOF state. Returns the new position.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        if offset > self.table.length() {
            return Err(StreamError::InvalidOffset(format!(
                "offset {} past length {}",
                offset,
                self.table.length()
            )));
        }
        let (chunk_index, local) = self.table.locate(offset);
        if self.table.chunk_count() > 0 && chunk_index != self.cache.index() {
            self.cache.load(&mut self.source, &self.table, chunk_index)?;
        }
        self.cursor = Cursor::at(chunk_index, local);
        Ok(self.tell())
    }

    /// Reposition inside the currently cached chunk, without any chunk load.
    /// `local == chunk_size` is allowed and denotes the consumed-chunk state.
    /// Returns the new absolute position.
    pub fn seek_local(&mut self, local: u64) -> Result<u64> {
        if local > self.table.chunk_size() {
            return Err(StreamError::InvalidOffset(format!(
                "local offset {} past chunk size {}",
                local,
                self.table.chunk_size()
            )));
        }
        self.cursor = Cursor::at(self.cache.index(), local);
        Ok(self.tell())
    }

    /// Advance up to `n` bytes, stopping at EOF. Returns the number of bytes
    /// actually advanced.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        let mut advanced = 0;
        while advanced < n {
            if self.read_byte()?.is_none() {
                break;
            }
            advanced += 1;
        }
        Ok(advanced)
    }

    // Step into the next chunk when the current one is fully consumed, then
    // make sure the cursor's chunk is the cached one. The absolute position
    // is unchanged by either step.
    fn ensure_chunk_for_read(&mut self) -> Result<()> {
        if self.cursor.local == self.table.chunk_size() {
            self.cursor = Cursor::at(self.cursor.chunk_index + 1, 0);
        }
        if self.cache.index() != self.cursor.chunk_index {
            self.cache
                .load(&mut self.source, &self.table, self.cursor.chunk_index)?;
        }
        Ok(())
    }

    /// Read one byte, or `None` at EOF.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.is_eof() {
            return Ok(None);
        }
        self.ensure_chunk_for_read()?;
        let byte = self.cache.bytes()[self.cursor.local as usize];
        self.cursor.local += 1;
        Ok(Some(byte))
    }

    /// Next byte without advancing, or `None` at EOF. May load a chunk but
    /// never moves the read position.
    pub fn peek(&mut self) -> Result<Option<u8>> {
        if self.is_eof() {
            return Ok(None);
        }
        self.ensure_chunk_for_read()?;
        Ok(Some(self.cache.bytes()[self.cursor.local as usize]))
    }

    fn fill_range(&mut self, buf: &mut [u8], offset: usize, len: usize) -> Result<usize> {
        let mut written = 0;
        while written < len {
            match self.read_byte()? {
                Some(byte) => {
                    buf[offset + written] = byte;
                    written += 1;
                }
                None => break,
            }
        }
        Ok(written)
    }

    /// Fill `buf` until it is full or EOF is reached; returns the count
    /// written, which is short only at EOF.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = buf.len();
        self.fill_range(buf, 0, len)
    }

    /// Write at most `len` bytes into `buf` starting at `offset`. The range
    /// must lie inside `buf`. Returns the count written (`< len` only at
    /// EOF); nothing outside `buf[offset..offset + len]` is touched.
    pub fn read_into_range(&mut self, buf: &mut [u8], offset: usize, len: usize) -> Result<usize> {
        let end = offset.checked_add(len).ok_or_else(|| {
            StreamError::InvalidArgument("offset + len overflows".to_string())
        })?;
        if end > buf.len() {
            return Err(StreamError::InvalidArgument(format!(
                "range {}..{} outside buffer of {} bytes",
                offset,
                end,
                buf.len()
            )));
        }
        self.fill_range(buf, offset, len)
    }

    /// Tear the stream down, releasing the cached chunk and handing the
    /// source back.
    pub fn close(self) -> S {
        if self.config.read_all && !self.is_eof() {
            warn!(
                "stream {:?} closed with {} of {} bytes unread",
                self.config.default_file_name,
                self.table.length() - self.tell(),
                self.table.length()
            );
        }
        self.source
    }
}

impl<S: BlobSource> Read for ByteStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_into(buf).map_err(io::Error::from)
    }
}

impl<S: BlobSource> Seek for ByteStream<S> {
    fn seek(&mut self, how: SeekFrom) -> io::Result<u64> {
        let target = match how {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::End(offset) => self.table.length() as i128 + offset as i128,
            SeekFrom::Current(offset) => self.tell() as i128 + offset as i128,
        };

        if target < 0 || target > self.table.length() as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek target outside the source",
            ));
        }

        ByteStream::seek(self, target as u64).map_err(io::Error::from)
    }
}
