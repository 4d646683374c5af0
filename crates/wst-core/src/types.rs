//! Core data types for decoded samples and published readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the collector
pub type Timestamp = DateTime<Utc>;

/// One decoded wind observation from the transducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    pub timestamp: Timestamp,

    /// Wind speed in meters per second (>= 0)
    pub speed_mps: f64,

    /// Wind direction in degrees, [0, 360)
    pub direction_deg: f64,

    /// Transducer status flag ('A' on the wire)
    pub status_ok: bool,
}

impl WindSample {
    /// Cartesian wind vector, used for circular averaging.
    pub fn vector(&self) -> (f64, f64) {
        let theta = self.direction_deg.to_radians();
        (self.speed_mps * theta.cos(), self.speed_mps * theta.sin())
    }
}

/// Wind data payload published for each wind sentence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindReading {
    pub wind_ok: bool,
    pub wind_dir_deg: f64,
    pub wind_speed_mps: f64,

    pub wind_avg_speed_short: f64,
    pub wind_vector_mag_short: f64,
    pub wind_vector_dir_short: f64,
    pub wind_gust_short: f64,
    pub wind_gust_dir_short: f64,
    pub wind_gust_ts_short: Timestamp,

    pub wind_avg_speed_long: f64,
    pub wind_vector_mag_long: f64,
    pub wind_vector_dir_long: f64,
    pub wind_gust_long: f64,
    pub wind_gust_dir_long: f64,
    pub wind_gust_ts_long: Timestamp,
}

/// Barometric data payload published for each environmental sentence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaroReading {
    /// Station pressure (QFE) in Pascal
    pub pressure_pa: f64,

    /// Configured station height above sea level, meters
    pub station_height_m: f64,

    /// ISA pressure altitude derived from QFE, meters
    pub isa_altitude_m: f64,

    /// Sea-level corrected pressure (QNH) in Pascal
    pub qnh_pa: f64,

    /// Air temperature in Celsius, if the transducer has reported one
    pub temperature_c: Option<f64>,
}

/// Payload of a published reading; wind and barometric paths publish
/// independent messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReadingData {
    Wind(WindReading),
    Baro(BaroReading),
}

/// Envelope around a published payload; the station id doubles as the
/// routing key on the publish path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub station_id: String,
    pub timestamp: Timestamp,
    pub data: ReadingData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wind_vector() {
        let sample = WindSample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            speed_mps: 10.0,
            direction_deg: 90.0,
            status_ok: true,
        };
        let (x, y) = sample.vector();
        assert!(x.abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_reading_serde_roundtrip() {
        let reading = Reading {
            station_id: "WS".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            data: ReadingData::Baro(BaroReading {
                pressure_pa: 101325.0,
                station_height_m: 100.0,
                isa_altitude_m: 0.05,
                qnh_pa: 102526.0,
                temperature_c: Some(25.0),
            }),
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"pressure_pa\":101325.0"));
        assert!(json.contains("\"station_id\":\"WS\""));

        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
