//! The per-device collector loop
//!
//! One collector owns the link, framer, router (and through it all
//! decoder state), and the sinks for a single transducer. Everything
//! runs on one task, so history and decoder state never see
//! concurrent mutation.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use wst_config::DebugConfig;
use wst_core::{Reading, Sink};
use wst_ingest::TransducerLink;
use wst_nmea::{LineFramer, NmeaError, SentenceRouter};

pub struct Collector {
    link: Box<dyn TransducerLink>,
    framer: LineFramer,
    router: SentenceRouter,
    sinks: Vec<Box<dyn Sink>>,
    station_id: String,
    debug: DebugConfig,
}

impl Collector {
    pub fn new(
        link: Box<dyn TransducerLink>,
        router: SentenceRouter,
        sinks: Vec<Box<dyn Sink>>,
        station_id: String,
        debug: DebugConfig,
    ) -> Self {
        Self {
            link,
            framer: LineFramer::default(),
            router,
            sinks,
            station_id,
            debug,
        }
    }

    /// Read chunks until the device goes away. Per-sentence failures
    /// are contained and logged; only device loss ends the loop.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            link = %self.link.name(),
            station = %self.station_id,
            tags = ?self.router.tags(),
            "collector started"
        );

        loop {
            let chunk = match self.link.read_chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => {
                    info!(link = %self.link.name(), "device gone, stopping collector");
                    break;
                }
                Err(e) => {
                    error!(link = %self.link.name(), error = %e, "link read failed");
                    break;
                }
            };
            self.process_chunk(&chunk).await;
        }

        self.link.close().await.ok();
        info!(station = %self.station_id, "collector stopped");
        Ok(())
    }

    async fn process_chunk(&mut self, chunk: &[u8]) {
        if self.debug.serial_raw {
            debug!(len = chunk.len(), bytes = ?chunk, "serial raw");
        }

        let mut lines = Vec::new();
        if let Err(e) = self.framer.push(chunk, |line| lines.push(line.to_string())) {
            warn!(error = %e, "framing error, buffer resynchronized");
        }
        for line in lines {
            self.process_line(&line).await;
        }
    }

    async fn process_line(&mut self, line: &str) {
        if self.debug.serial {
            debug!(%line, "serial line");
        }

        match self.router.route(line) {
            Ok(Some(data)) => {
                let reading = Reading {
                    station_id: self.station_id.clone(),
                    timestamp: Utc::now(),
                    data,
                };
                if self.debug.data {
                    debug!(?reading, "decoded reading");
                }
                self.publish(&reading).await;
            }
            Ok(None) => {
                if self.debug.nmea {
                    debug!(%line, "line produced no reading");
                }
            }
            Err(NmeaError::ChecksumMismatch { computed, expected }) => {
                error!(computed, expected, %line, "NMEA checksum incorrect");
            }
            Err(e) => {
                warn!(error = %e, %line, "sentence dropped");
            }
        }
    }

    async fn publish(&mut self, reading: &Reading) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.emit(reading).await {
                warn!(error = %e, "publish failed");
            }
        }
    }
}
