//! Line framing over arbitrarily fragmented byte chunks

use crate::NmeaError;

/// Default cap on buffered bytes awaiting a terminator. NMEA sentences
/// are well under 100 bytes; anything past this is a corrupt stream.
pub const DEFAULT_MAX_BUFFERED: usize = 4096;

/// Accumulates raw serial chunks and yields complete lines.
///
/// Lines are terminated by `\n`; a preceding `\r` is stripped. Partial
/// trailing bytes stay buffered for the next [`push`](Self::push).
pub struct LineFramer {
    buf: Vec<u8>,
    max_buffered: usize,
}

impl LineFramer {
    pub fn new(max_buffered: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_buffered,
        }
    }

    /// Append a chunk and invoke `on_line` exactly once per complete
    /// line found, in arrival order, before returning.
    ///
    /// If the residual buffer exceeds the configured bound it is
    /// discarded (resynchronizing on the next terminator) and
    /// [`NmeaError::FramingOverflow`] is returned; lines completed by
    /// this chunk have already been delivered at that point.
    pub fn push<F>(&mut self, chunk: &[u8], mut on_line: F) -> Result<(), NmeaError>
    where
        F: FnMut(&str),
    {
        self.buf.extend_from_slice(chunk);

        let mut start = 0;
        while let Some(pos) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + pos;
            let mut line = &self.buf[start..end];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            on_line(&String::from_utf8_lossy(line));
            start = end + 1;
        }
        self.buf.drain(..start);

        if self.buf.len() > self.max_buffered {
            let discarded = self.buf.len();
            self.buf.clear();
            return Err(NmeaError::FramingOverflow(discarded));
        }
        Ok(())
    }

    /// Bytes currently buffered without a terminator
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUFFERED)
    }
}
