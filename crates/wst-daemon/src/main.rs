//! wstd - wind-station telemetry daemon
//!
//! Wires one serial transducer link through the NMEA protocol layer
//! and the wind statistics aggregator, publishing readings to the
//! configured sinks.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wst_config::AppConfig;
use wst_core::{Sink, WindStatsConfig};
use wst_ingest::{SerialLink, TransducerLink};
use wst_nmea::{BaroConfig, BaroDecoder, SentenceRouter, WindHandler};
use wst_sinks::{FsSink, UdpSink};

use wst_daemon::collector::Collector;

/// Wind-velocity and environmental sentence tags consumed from the
/// transducer.
const WIND_TAG: &str = "IIMWV";
const ENV_TAG: &str = "WIMDA";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wind-station telemetry daemon");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let Some(serial) = config.serial.clone() else {
        bail!("no [serial] section in configuration, nothing to collect from");
    };

    let mut link: Box<dyn TransducerLink> =
        Box::new(SerialLink::new(&serial.device, config.serial_baud()));
    link.open().await.context("Failed to open serial device")?;

    let router = build_router(&config);
    let sinks = build_sinks(&config).await?;
    if sinks.is_empty() {
        warn!("no sinks configured, readings will be decoded but not published");
    }

    let mut collector = Collector::new(link, router, sinks, config.station_id(), config.debug());

    tokio::select! {
        result = collector.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Daemon stopped");
    Ok(())
}

fn build_router(config: &AppConfig) -> SentenceRouter {
    let mut stats = WindStatsConfig::default();
    if let Some(wind) = &config.wind {
        if let Some(v) = wind.sampling_rate_hz {
            stats.sampling_rate_hz = v;
        }
        if let Some(v) = wind.burst_secs {
            stats.burst_secs = v;
        }
        if let Some(v) = wind.short_window_secs {
            stats.short_window_secs = v;
        }
        if let Some(v) = wind.long_window_secs {
            stats.long_window_secs = v;
        }
    }

    let baro = BaroConfig {
        station_height_m: config.station_height_m(),
        cal_offset_pa: config.baro_cal_offset_pa(),
        cal_scale: config.baro_cal_scale(),
    };

    let mut router = SentenceRouter::new();
    router.register(WIND_TAG, Box::new(WindHandler::new(stats)));
    router.register(ENV_TAG, Box::new(BaroDecoder::new(baro)));
    router
}

async fn build_sinks(config: &AppConfig) -> Result<Vec<Box<dyn Sink>>> {
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if let Some(cfg) = &config.sinks {
        if let Some(target) = &cfg.udp {
            let target = target
                .parse()
                .with_context(|| format!("invalid UDP sink target {target:?}"))?;
            sinks.push(Box::new(UdpSink::new(target).await?));
        }
        if let Some(dir) = &cfg.spool_dir {
            sinks.push(Box::new(FsSink::new(dir)?));
        }
    }
    Ok(sinks)
}
