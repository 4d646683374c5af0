//! Wind speed unit conversions
//!
//! The conversion factors are the ones the transducer firmware
//! documents for its unit codes and are kept bit-exact.

/// Unit conversion error
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown speed unit code: {0:?}")]
    UnknownSpeedUnit(String),
}

/// Speed unit code from a wind-velocity sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Knots,
    KilometersPerHour,
    MetersPerSecond,
    MilesPerHour,
}

impl SpeedUnit {
    /// Parse the single-letter unit code field.
    pub fn from_code(code: &str) -> Result<Self, UnitError> {
        match code {
            "N" => Ok(SpeedUnit::Knots),
            "K" => Ok(SpeedUnit::KilometersPerHour),
            "M" => Ok(SpeedUnit::MetersPerSecond),
            "S" => Ok(SpeedUnit::MilesPerHour),
            other => Err(UnitError::UnknownSpeedUnit(other.to_string())),
        }
    }

    /// Convert a raw speed value to meters per second.
    pub fn to_mps(&self, value: f64) -> f64 {
        match self {
            SpeedUnit::Knots => value * 1854.0 / 3600.0,
            SpeedUnit::KilometersPerHour => value * 1000.0 / 3600.0,
            SpeedUnit::MetersPerSecond => value,
            SpeedUnit::MilesPerHour => value * 1609.0 / 3600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knots_to_mps() {
        let unit = SpeedUnit::from_code("N").unwrap();
        assert!((unit.to_mps(12.0) - 6.18).abs() < 1e-6);
        assert!((unit.to_mps(10.0) - 5.15).abs() < 1e-6);
    }

    #[test]
    fn test_kmh_to_mps() {
        let unit = SpeedUnit::from_code("K").unwrap();
        assert!((unit.to_mps(10.0) - 2.777_777_777_777_778).abs() < 1e-6);
    }

    #[test]
    fn test_mph_to_mps() {
        let unit = SpeedUnit::from_code("S").unwrap();
        assert!((unit.to_mps(36.0) - 16.09).abs() < 1e-6);
    }

    #[test]
    fn test_mps_identity() {
        let unit = SpeedUnit::from_code("M").unwrap();
        assert_eq!(unit.to_mps(7.25), 7.25);
    }

    #[test]
    fn test_unknown_unit_code() {
        assert!(matches!(
            SpeedUnit::from_code("X"),
            Err(UnitError::UnknownSpeedUnit(_))
        ));
        assert!(SpeedUnit::from_code("").is_err());
    }
}
