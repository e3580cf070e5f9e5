use std::io;

/// Error type for the crate. End-of-source is never an error: byte reads
/// return a sentinel and line reads return partial text plus a flag.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Invalid Configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid Source: {0}")]
    InvalidSource(String),
    #[error("Invalid Offset: {0}")]
    InvalidOffset(String),
    #[error("Chunk Out Of Range: {0}")]
    ChunkOutOfRange(String),
    #[error("Source Read Failure: {0}")]
    SourceRead(String),
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        StreamError::SourceRead(e.to_string())
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match &e {
            StreamError::InvalidOffset(_) | StreamError::InvalidArgument(_) => {
                io::ErrorKind::InvalidInput
            }
            StreamError::SourceRead(_) => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e)
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
