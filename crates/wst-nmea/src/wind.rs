//! Wind-velocity sentence decoding and aggregation handler

use chrono::Utc;
use tracing::debug;

use crate::router::SentenceHandler;
use crate::sentence::Sentence;
use crate::DecodeError;
use wst_core::{
    ReadingData, SpeedUnit, Timestamp, WindAggregator, WindReading, WindReport, WindSample,
    WindStatsConfig,
};

/// Decode the field list of a wind-velocity sentence:
/// `[direction_deg, relative_flag, speed, speed_unit, status]`.
///
/// The relative/true flag is carried by the transducer but not used
/// here. A status of `A` marks the sample as good; any other status is
/// still recorded with `status_ok = false`.
pub fn decode_wind(fields: &[String], timestamp: Timestamp) -> Result<WindSample, DecodeError> {
    let direction_deg = parse_f64(fields, 0, "direction")?.rem_euclid(360.0);
    let raw_speed = parse_f64(fields, 2, "speed")?;
    let unit = SpeedUnit::from_code(field(fields, 3, "speed_unit")?)?;
    let status = field(fields, 4, "status")?;

    Ok(WindSample {
        timestamp,
        speed_mps: unit.to_mps(raw_speed),
        direction_deg,
        status_ok: status == "A",
    })
}

fn field<'a>(fields: &'a [String], index: usize, name: &'static str) -> Result<&'a str, DecodeError> {
    fields
        .get(index)
        .map(String::as_str)
        .ok_or(DecodeError::MissingField(name))
}

fn parse_f64(fields: &[String], index: usize, name: &'static str) -> Result<f64, DecodeError> {
    let raw = field(fields, index, name)?;
    raw.parse().map_err(|_| DecodeError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

/// Handler for the wind-velocity tag: decodes each sentence and folds
/// it into the per-station aggregator.
pub struct WindHandler {
    stats: WindAggregator,
}

impl WindHandler {
    pub fn new(config: WindStatsConfig) -> Self {
        Self {
            stats: WindAggregator::new(config),
        }
    }

    fn reading(report: &WindReport) -> WindReading {
        WindReading {
            wind_ok: report.sample.status_ok,
            wind_dir_deg: report.sample.direction_deg,
            wind_speed_mps: report.sample.speed_mps,

            wind_avg_speed_short: report.short.avg_speed,
            wind_vector_mag_short: report.short.vector_mag,
            wind_vector_dir_short: report.short.vector_dir_deg,
            wind_gust_short: report.short.gust_speed,
            wind_gust_dir_short: report.short.gust_dir_deg,
            wind_gust_ts_short: report.short.gust_timestamp,

            wind_avg_speed_long: report.long.avg_speed,
            wind_vector_mag_long: report.long.vector_mag,
            wind_vector_dir_long: report.long.vector_dir_deg,
            wind_gust_long: report.long.gust_speed,
            wind_gust_dir_long: report.long.gust_dir_deg,
            wind_gust_ts_long: report.long.gust_timestamp,
        }
    }
}

impl SentenceHandler for WindHandler {
    fn handle(&mut self, sentence: &Sentence) -> Result<Option<ReadingData>, DecodeError> {
        let sample = decode_wind(&sentence.fields, Utc::now())?;
        let report = self.stats.add_sample(sample);
        debug!(
            speed_mps = sample.speed_mps,
            direction_deg = sample.direction_deg,
            avg_short = report.short.avg_speed,
            gust_short = report.short.gust_speed,
            "wind sample"
        );
        Ok(Some(ReadingData::Wind(Self::reading(&report))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_decode_knots() {
        let sample = decode_wind(&fields(&["045.0", "R", "10.0", "N", "A"]), ts()).unwrap();
        assert_eq!(sample.direction_deg, 45.0);
        assert!((sample.speed_mps - 5.15).abs() < 1e-6);
        assert!(sample.status_ok);
    }

    #[test]
    fn test_decode_kmh_and_mph() {
        let kmh = decode_wind(&fields(&["090.0", "R", "10", "K", "A"]), ts()).unwrap();
        assert!((kmh.speed_mps - 2.777_777_777_777_778).abs() < 1e-6);

        let mph = decode_wind(&fields(&["180.0", "R", "36", "S", "A"]), ts()).unwrap();
        assert!((mph.speed_mps - 16.09).abs() < 1e-6);
    }

    #[test]
    fn test_status_not_ok_is_still_a_sample() {
        let sample = decode_wind(&fields(&["270.0", "R", "5.0", "M", "V"]), ts()).unwrap();
        assert!(!sample.status_ok);
        assert_eq!(sample.speed_mps, 5.0);
    }

    #[test]
    fn test_unknown_unit_rejects_sample() {
        let err = decode_wind(&fields(&["120.0", "R", "8.0", "X", "A"]), ts()).unwrap_err();
        assert!(matches!(err, DecodeError::Unit(_)));
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert!(matches!(
            decode_wind(&fields(&["045.0", "R"]), ts()),
            Err(DecodeError::MissingField("speed"))
        ));
        assert!(matches!(
            decode_wind(&fields(&["north", "R", "1", "M", "A"]), ts()),
            Err(DecodeError::InvalidNumber { name: "direction", .. })
        ));
    }

    #[test]
    fn test_direction_normalized_into_range() {
        let sample = decode_wind(&fields(&["360.0", "R", "1.0", "M", "A"]), ts()).unwrap();
        assert_eq!(sample.direction_deg, 0.0);
    }

    #[test]
    fn test_handler_produces_wind_reading() {
        let mut handler = WindHandler::new(WindStatsConfig::default());
        let sentence = Sentence {
            tag: "IIMWV".to_string(),
            fields: fields(&["045.0", "R", "10.0", "N", "A"]),
            checksum_valid: true,
        };
        let data = handler.handle(&sentence).unwrap().unwrap();
        match data {
            ReadingData::Wind(reading) => {
                assert!(reading.wind_ok);
                assert_eq!(reading.wind_dir_deg, 45.0);
                assert!((reading.wind_speed_mps - 5.15).abs() < 1e-6);
                // First sample: every window collapses to it.
                assert!((reading.wind_avg_speed_long - reading.wind_speed_mps).abs() < 1e-9);
                assert!((reading.wind_gust_short - reading.wind_speed_mps).abs() < 1e-9);
            }
            other => panic!("expected wind reading, got {other:?}"),
        }
    }
}
