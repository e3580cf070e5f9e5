//! Chunked random-access reading over large byte blobs: one fixed-size
//! chunk resident at a time, byte/buffer/line reads, absolute seeking.

pub mod chunk;
pub mod config;
pub mod error;
pub mod source;
pub mod stream;

pub use config::{StreamConfig, StreamKind, DEFAULT_CHUNK_SIZE};
pub use error::{Result, StreamError};
pub use source::{BlobSource, FileSource, MemorySource, MmapSource};
pub use stream::{BlobStream, ByteStream, Line, Lines, LinesRead, TextStream};
