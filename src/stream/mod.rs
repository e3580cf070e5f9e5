mod byte_stream;
mod cursor;
mod text_stream;

pub use byte_stream::ByteStream;
pub use cursor::Cursor;
pub use text_stream::{Line, Lines, LinesRead, TextStream, LINE_FEED};

use std::collections::HashMap;

use crate::config::{StreamConfig, StreamKind};
use crate::error::Result;
use crate::source::BlobSource;

/// A reader over a blob source in the shape picked once at construction:
/// plain byte access, or byte access plus line-oriented reads.
pub enum BlobStream<S> {
    Binary(ByteStream<S>),
    Text(TextStream<S>),
}

impl<S: BlobSource> BlobStream<S> {
    pub fn open(source: S, config: StreamConfig) -> Result<Self> {
        match config.kind {
            StreamKind::Binary => Ok(BlobStream::Binary(ByteStream::new(source, config)?)),
            StreamKind::Text => Ok(BlobStream::Text(TextStream::new(source, config)?)),
        }
    }

    /// Open from an external configuration mapping (absent mapping means
    /// all defaults).
    pub fn from_map(source: S, map: Option<&HashMap<String, String>>) -> Result<Self> {
        let config = StreamConfig::from_map(map)?;
        BlobStream::open(source, config)
    }

    pub fn kind(&self) -> StreamKind {
        match self {
            BlobStream::Binary(_) => StreamKind::Binary,
            BlobStream::Text(_) => StreamKind::Text,
        }
    }

    /// Byte-level view, available for both kinds.
    pub fn byte_stream(&self) -> &ByteStream<S> {
        match self {
            BlobStream::Binary(stream) => stream,
            BlobStream::Text(stream) => stream.byte_stream(),
        }
    }

    pub fn byte_stream_mut(&mut self) -> &mut ByteStream<S> {
        match self {
            BlobStream::Binary(stream) => stream,
            BlobStream::Text(stream) => stream.byte_stream_mut(),
        }
    }

    /// Line-oriented view; `None` for a binary stream.
    pub fn as_text_mut(&mut self) -> Option<&mut TextStream<S>> {
        match self {
            BlobStream::Binary(_) => None,
            BlobStream::Text(stream) => Some(stream),
        }
    }

    pub fn close(self) -> S {
        match self {
            BlobStream::Binary(stream) => stream.close(),
            BlobStream::Text(stream) => stream.close(),
        }
    }
}
