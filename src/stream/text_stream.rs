use log::warn;

use crate::config::StreamConfig;
use crate::error::Result;
use crate::source::BlobSource;

use super::byte_stream::ByteStream;

pub const LINE_FEED: u8 = 0x0A;

/// One accumulated line, terminator stripped. `terminated` is false when the
/// source ran out before a line feed was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub terminated: bool,
}

/// Result of a multi-line read. `truncated` is set when the source was
/// exhausted before the requested number of lines was produced; `text` still
/// holds everything read up to that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesRead {
    pub text: String,
    pub truncated: bool,
}

/// Line-oriented reader over a [`ByteStream`]. Bytes 0–255 map directly to
/// chars U+0000–U+00FF; no encoding-aware decoding happens here.
pub struct TextStream<S> {
    inner: ByteStream<S>,
    lines_read: u64,
}

impl<S: BlobSource> TextStream<S> {
    pub fn new(source: S, config: StreamConfig) -> Result<Self> {
        Ok(TextStream {
            inner: ByteStream::new(source, config)?,
            lines_read: 0,
        })
    }

    pub fn from_byte_stream(inner: ByteStream<S>) -> Self {
        TextStream {
            inner,
            lines_read: 0,
        }
    }

    pub fn byte_stream(&self) -> &ByteStream<S> {
        &self.inner
    }

    /// Byte-level access to the same cursor, for mixing positional and
    /// line-oriented reads.
    pub fn byte_stream_mut(&mut self) -> &mut ByteStream<S> {
        &mut self.inner
    }

    /// Number of `read_line` calls so far, including a final truncated one.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Accumulate bytes until a line feed (excluded) or EOF. An unterminated
    /// line means the source ended mid-line; the text read so far is still
    /// returned.
    pub fn read_line(&mut self) -> Result<Line> {
        let mut text = String::new();
        loop {
            match self.inner.read_byte()? {
                Some(LINE_FEED) => {
                    self.lines_read += 1;
                    return Ok(Line {
                        text,
                        terminated: true,
                    });
                }
                Some(byte) => text.push(char::from(byte)),
                None => {
                    self.lines_read += 1;
                    return Ok(Line {
                        text,
                        terminated: false,
                    });
                }
            }
        }
    }

    /// Read up to `count` lines, joined with a single `'\n'`. Stops as soon
    /// as an unterminated line shows up and flags the result as truncated;
    /// an unterminated line that is empty contributes nothing.
    pub fn read_lines(&mut self, count: usize) -> Result<LinesRead> {
        let mut text = String::new();
        let mut truncated = false;

        for produced in 0..count {
            let line = self.read_line()?;
            if !line.terminated {
                truncated = true;
                if !line.text.is_empty() {
                    if produced > 0 {
                        text.push('\n');
                    }
                    text.push_str(&line.text);
                }
                break;
            }
            if produced > 0 {
                text.push('\n');
            }
            text.push_str(&line.text);
        }

        if truncated {
            warn!(
                "line read ran out of input after {} lines (wanted {})",
                self.lines_read, count
            );
        }
        Ok(LinesRead { text, truncated })
    }

    /// Lazy iterator over the remaining lines. Yields each line's text with
    /// the terminator stripped, including a final unterminated line; read
    /// errors are propagated as items.
    pub fn lines(&mut self) -> Lines<'_, S> {
        Lines {
            stream: self,
            done: false,
        }
    }

    pub fn close(self) -> S {
        self.inner.close()
    }
}

pub struct Lines<'a, S> {
    stream: &'a mut TextStream<S>,
    done: bool,
}

impl<'a, S: BlobSource> Iterator for Lines<'a, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.stream.inner.is_eof() {
            self.done = true;
            return None;
        }
        match self.stream.read_line() {
            Ok(line) => {
                if !line.terminated {
                    self.done = true;
                }
                Some(Ok(line.text))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
