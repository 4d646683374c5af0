//! Serial transducer link (8N1 over tokio-serial)

use tokio::io::AsyncReadExt;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::info;

use crate::{IngestError, IngestResult, TransducerLink};

const READ_BUF_SIZE: usize = 4096;

/// Link to a serial-attached wind/pressure transducer.
pub struct SerialLink {
    device: String,
    baud: u32,
    port: Option<SerialStream>,
}

impl SerialLink {
    pub fn new(device: impl Into<String>, baud: u32) -> Self {
        Self {
            device: device.into(),
            baud,
            port: None,
        }
    }
}

#[async_trait::async_trait]
impl TransducerLink for SerialLink {
    fn name(&self) -> &str {
        &self.device
    }

    async fn open(&mut self) -> IngestResult<()> {
        if self.port.is_some() {
            return Err(IngestError::Link("already open".into()));
        }
        let port = tokio_serial::new(&self.device, self.baud)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .open_native_async()
            .map_err(|e| IngestError::Link(e.to_string()))?;
        info!(device = %self.device, baud = self.baud, "serial link open");
        self.port = Some(port);
        Ok(())
    }

    async fn close(&mut self) -> IngestResult<()> {
        self.port = None;
        Ok(())
    }

    async fn read_chunk(&mut self) -> IngestResult<Option<Vec<u8>>> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| IngestError::Link("not open".into()))?;

        let mut buf = vec![0u8; READ_BUF_SIZE];
        let n = port.read(&mut buf).await?;
        if n == 0 {
            // End-of-device; a removed serial adapter will not heal.
            info!(device = %self.device, "serial link closed by device");
            self.port = None;
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf))
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }
}
