//! Transducer byte-stream sources
//!
//! A [`TransducerLink`] delivers opaque byte chunks from a device; the
//! collector owns all framing and decoding. Links are deliberately
//! dumb: open, read chunks, report end-of-device, close.

pub mod replay;
pub mod serial;

pub use replay::*;
pub use serial::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Link error: {0}")]
    Link(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Byte-oriented device connection for one transducer
#[async_trait::async_trait]
pub trait TransducerLink: Send {
    /// Link name/identifier for logs
    fn name(&self) -> &str;

    /// Open the underlying device
    async fn open(&mut self) -> IngestResult<()>;

    /// Close the device and release resources
    async fn close(&mut self) -> IngestResult<()>;

    /// Await the next chunk of bytes. `Ok(None)` means the device is
    /// gone (zero-length read); the collector must stop, not retry.
    async fn read_chunk(&mut self) -> IngestResult<Option<Vec<u8>>>;

    /// Check if the link is currently open
    fn is_open(&self) -> bool;
}
