//! Reading sinks: where published readings go
//!
//! All sinks serialize the [`Reading`] envelope as JSON. Delivery is
//! best-effort; the collector logs emit failures and moves on.

use anyhow::Result;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use wst_core::{Reading, Sink};

/// Appends readings to a JSON-lines spool file.
pub struct FsSink {
    _dir: PathBuf,
    file: PathBuf,
}

impl FsSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        create_dir_all(&dir)?;
        let file = dir.join("readings.jsonl");
        Ok(Self { _dir: dir, file })
    }
}

#[async_trait::async_trait]
impl Sink for FsSink {
    async fn emit(&mut self, reading: &Reading) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)?;
        let line = serde_json::to_string(reading)?;
        f.write_all(line.as_bytes())?;
        f.write_all(b"\n")?;
        Ok(())
    }
}

/// Sends each reading as one JSON datagram, fire-and-forget.
pub struct UdpSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    pub async fn new(target: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        Ok(Self { socket, target })
    }
}

#[async_trait::async_trait]
impl Sink for UdpSink {
    async fn emit(&mut self, reading: &Reading) -> Result<()> {
        let payload = serde_json::to_vec(reading)?;
        self.socket.send_to(&payload, self.target).await?;
        Ok(())
    }
}

/// In-memory sink for tests; readings are shared through a handle so
/// they can be inspected after the collector loop ends.
pub struct MemSink {
    readings: Arc<Mutex<Vec<Reading>>>,
}

impl MemSink {
    pub fn new() -> (Self, Arc<Mutex<Vec<Reading>>>) {
        let readings = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                readings: readings.clone(),
            },
            readings,
        )
    }
}

#[async_trait::async_trait]
impl Sink for MemSink {
    async fn emit(&mut self, reading: &Reading) -> Result<()> {
        self.readings
            .lock()
            .map_err(|_| anyhow::anyhow!("sink mutex poisoned"))?
            .push(reading.clone());
        Ok(())
    }
}
