//! Environmental sentence decoding (pressure/temperature)

use tracing::debug;

use crate::router::SentenceHandler;
use crate::sentence::Sentence;
use crate::DecodeError;
use wst_core::{BaroReading, ReadingData};

/// Station-specific barometric configuration
#[derive(Debug, Clone, Copy)]
pub struct BaroConfig {
    /// Station height above sea level, meters
    pub station_height_m: f64,

    /// Additive pressure calibration, Pascal (applied before scale)
    pub cal_offset_pa: f64,

    /// Multiplicative pressure calibration
    pub cal_scale: f64,
}

impl Default for BaroConfig {
    fn default() -> Self {
        Self {
            station_height_m: 0.0,
            cal_offset_pa: 0.0,
            cal_scale: 1.0,
        }
    }
}

/// Decoder for the environmental tag.
///
/// The transducer splits its fields across successive frames, so the
/// last known pressure is retained and reused when a frame carries no
/// pressure pair; the same holds for temperature. This retained state
/// is a deliberate contract, not an accident of implementation.
pub struct BaroDecoder {
    config: BaroConfig,
    last_pressure_pa: Option<f64>,
    last_temperature_c: Option<f64>,
}

impl BaroDecoder {
    pub fn new(config: BaroConfig) -> Self {
        Self {
            config,
            last_pressure_pa: None,
            last_temperature_c: None,
        }
    }

    /// Scan the interleaved `(value, type-code)` pairs and derive the
    /// sea-level corrected pressure.
    ///
    /// Returns `Ok(None)` until a pressure value has been seen at
    /// least once; unrecognized pairs and trailing odd fields are
    /// ignored for forward compatibility.
    pub fn decode(&mut self, fields: &[String]) -> Result<Option<BaroReading>, DecodeError> {
        for pair in fields.chunks_exact(2) {
            match pair[1].as_str() {
                "B" => {
                    let raw = parse_value(&pair[0], "pressure")?;
                    self.last_pressure_pa =
                        Some((raw * 100_000.0 + self.config.cal_offset_pa) * self.config.cal_scale);
                }
                "C" => {
                    self.last_temperature_c = Some(parse_value(&pair[0], "temperature")?);
                }
                _ => {}
            }
        }

        let Some(qfe) = self.last_pressure_pa else {
            return Ok(None);
        };

        // ISA pressure altitude; the formula operates on hPa.
        let isa_altitude_m = 44330.77 - 11880.32 * (qfe / 100.0).powf(0.190263);
        let qnh_pa = 101_325.0
            * (1.0 - 0.0065 * ((isa_altitude_m - self.config.station_height_m) / 288.15))
                .powf(5.25588);

        Ok(Some(BaroReading {
            pressure_pa: qfe,
            station_height_m: self.config.station_height_m,
            isa_altitude_m,
            qnh_pa,
            temperature_c: self.last_temperature_c,
        }))
    }
}

fn parse_value(raw: &str, name: &'static str) -> Result<f64, DecodeError> {
    raw.parse().map_err(|_| DecodeError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

impl SentenceHandler for BaroDecoder {
    fn handle(&mut self, sentence: &Sentence) -> Result<Option<ReadingData>, DecodeError> {
        let Some(reading) = self.decode(&sentence.fields)? else {
            return Ok(None);
        };
        debug!(
            qfe_hpa = reading.pressure_pa / 100.0,
            qnh_hpa = reading.qnh_pa / 100.0,
            temperature_c = reading.temperature_c,
            "barometric reading"
        );
        Ok(Some(ReadingData::Baro(reading)))
    }
}
