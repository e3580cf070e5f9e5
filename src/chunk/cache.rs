use log::debug;

use crate::error::{Result, StreamError};
use crate::source::BlobSource;

use super::ChunkTable;

/// The single resident chunk. There is no eviction policy beyond size one:
/// `load` replaces the slot wholesale, and a failed load leaves the prior
/// contents resident.
#[derive(Debug)]
pub struct ChunkCache {
    index: u64,
    bytes: Vec<u8>,
}

impl ChunkCache {
    /// Slot for a zero-length source: index 0, no bytes, never reloaded.
    pub fn empty() -> Self {
        ChunkCache {
            index: 0,
            bytes: Vec::new(),
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fetch chunk `index` from `source` and install it. The new bytes are
    /// fully read before the slot is touched, so the cache is never left
    /// holding a partial chunk.
    pub fn load<S: BlobSource>(
        &mut self,
        source: &mut S,
        table: &ChunkTable,
        index: u64,
    ) -> Result<()> {
        let range = table.range(index)?;
        let len = usize::try_from(range.end - range.start)
            .map_err(|_| StreamError::SourceRead("chunk size overflow".to_string()))?;

        let mut bytes = vec![0u8; len];
        source
            .read_at(range.start, &mut bytes)
            .map_err(|e| StreamError::SourceRead(format!("chunk {}: {}", index, e)))?;

        debug!("loaded chunk {} ({} bytes)", index, len);
        self.index = index;
        self.bytes = bytes;
        Ok(())
    }
}
