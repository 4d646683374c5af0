use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: Option<String>,
    /// Station height above sea level, meters
    pub height_m: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    pub device: String,
    pub baud: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaroCalConfig {
    /// Additive pressure calibration, Pascal
    pub offset_pa: Option<f64>,
    /// Multiplicative pressure calibration
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindConfig {
    pub sampling_rate_hz: Option<u32>,
    pub burst_secs: Option<u32>,
    pub short_window_secs: Option<u32>,
    pub long_window_secs: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SinksConfig {
    /// Target address for the UDP JSON sink, e.g. "127.0.0.1:9400"
    pub udp: Option<String>,
    /// Directory for the JSON-lines spool sink
    pub spool_dir: Option<String>,
}

/// Debug-verbosity switches; each gates one extra logging layer in
/// the collector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    #[serde(default)]
    pub data: bool,
    #[serde(default)]
    pub nmea: bool,
    #[serde(default)]
    pub serial: bool,
    #[serde(default)]
    pub serial_raw: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub station: Option<StationConfig>,
    pub serial: Option<SerialConfig>,
    pub baro_cal: Option<BaroCalConfig>,
    pub wind: Option<WindConfig>,
    pub sinks: Option<SinksConfig>,
    pub debug: Option<DebugConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from the WST_CONFIG path (TOML) if present,
    /// with reasonable defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WST_CONFIG").unwrap_or_else(|_| "wst.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let cfg = if Path::new(path).exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Station identifier, also the routing key (default "WS")
    pub fn station_id(&self) -> String {
        self.station
            .as_ref()
            .and_then(|s| s.id.clone())
            .unwrap_or_else(|| "WS".to_string())
    }

    pub fn station_height_m(&self) -> f64 {
        self.station.as_ref().and_then(|s| s.height_m).unwrap_or(0.0)
    }

    pub fn baro_cal_offset_pa(&self) -> f64 {
        self.baro_cal.as_ref().and_then(|c| c.offset_pa).unwrap_or(0.0)
    }

    pub fn baro_cal_scale(&self) -> f64 {
        self.baro_cal.as_ref().and_then(|c| c.scale).unwrap_or(1.0)
    }

    /// Serial baud rate (default 4800, the usual NMEA-0183 speed)
    pub fn serial_baud(&self) -> u32 {
        self.serial.as_ref().and_then(|s| s.baud).unwrap_or(4800)
    }

    pub fn debug(&self) -> DebugConfig {
        self.debug.clone().unwrap_or_default()
    }
}
