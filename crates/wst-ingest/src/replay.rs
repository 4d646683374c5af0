//! Replay link feeding canned byte chunks, for tests and local runs

use std::collections::VecDeque;

use crate::{IngestError, IngestResult, TransducerLink};

/// Transducer link that replays a fixed sequence of chunks and then
/// signals end-of-device, so the full collector path can run without
/// hardware. Chunk boundaries are preserved exactly as given, which
/// makes it useful for exercising mid-sentence splits.
pub struct ReplayLink {
    chunks: VecDeque<Vec<u8>>,
    open: bool,
}

impl ReplayLink {
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into(),
            open: false,
        }
    }

    /// Convenience constructor: one chunk per framed line.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| l.as_bytes().to_vec()).collect())
    }
}

#[async_trait::async_trait]
impl TransducerLink for ReplayLink {
    fn name(&self) -> &str {
        "replay"
    }

    async fn open(&mut self) -> IngestResult<()> {
        if self.open {
            return Err(IngestError::Link("already open".into()));
        }
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> IngestResult<()> {
        self.open = false;
        Ok(())
    }

    async fn read_chunk(&mut self) -> IngestResult<Option<Vec<u8>>> {
        if !self.open {
            return Err(IngestError::Link("not open".into()));
        }
        Ok(self.chunks.pop_front())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_lines_delivers_one_chunk_per_line() {
        let mut link = ReplayLink::from_lines(&["$IIMWV,1,R,1,M,A\r\n", "$WIMDA,1.0,B\r\n"]);
        link.open().await.unwrap();
        assert_eq!(
            link.read_chunk().await.unwrap(),
            Some(b"$IIMWV,1,R,1,M,A\r\n".to_vec())
        );
        assert_eq!(
            link.read_chunk().await.unwrap(),
            Some(b"$WIMDA,1.0,B\r\n".to_vec())
        );
        assert_eq!(link.read_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replay_chunks_then_eof() {
        let mut link = ReplayLink::new(vec![b"abc".to_vec(), b"def".to_vec()]);
        assert!(link.read_chunk().await.is_err()); // not open yet

        link.open().await.unwrap();
        assert!(link.is_open());
        assert_eq!(link.read_chunk().await.unwrap(), Some(b"abc".to_vec()));
        assert_eq!(link.read_chunk().await.unwrap(), Some(b"def".to_vec()));
        assert_eq!(link.read_chunk().await.unwrap(), None);

        link.close().await.unwrap();
        assert!(!link.is_open());
    }
}
