//! Ambient Temperature Correction
//!
//! Multiplicative factors applied to the 30 °C ampacity tables. Factors are
//! above 1.0 below the baseline and below 1.0 above it.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::ampacity::Insulation;

/// Tabulated ambient temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum AmbientTemperature {
    C20,
    C25,
    /// Table baseline
    #[default]
    C30,
    C35,
    C40,
    C45,
    C50,
}

impl AmbientTemperature {
    pub const ALL: [AmbientTemperature; 7] = [
        AmbientTemperature::C20,
        AmbientTemperature::C25,
        AmbientTemperature::C30,
        AmbientTemperature::C35,
        AmbientTemperature::C40,
        AmbientTemperature::C45,
        AmbientTemperature::C50,
    ];

    pub fn celsius(&self) -> i32 {
        20 + 5 * (*self as i32)
    }

    /// Exact tabulated row; anything else is an unknown identifier.
    pub fn from_celsius(celsius: i32) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.celsius() == celsius)
            .ok_or_else(|| CalcError::unknown_identifier("ambient temperature", format!("{} °C", celsius)))
    }

    /// Parse "40", "40C" or "40°C"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let digits = s.trim().trim_end_matches(['C', 'c']).trim_end_matches('°').trim();
        let celsius: i32 = digits
            .parse()
            .map_err(|_| CalcError::unknown_identifier("ambient temperature", s))?;
        Self::from_celsius(celsius)
    }

    pub fn correction_factor(&self, insulation: Insulation) -> f64 {
        let factors = match insulation {
            Insulation::Iv => &IV_FACTORS,
            Insulation::Hiv => &HIV_FACTORS,
        };
        factors[*self as usize]
    }
}

impl TryFrom<i32> for AmbientTemperature {
    type Error = CalcError;

    fn try_from(celsius: i32) -> Result<Self, Self::Error> {
        Self::from_celsius(celsius)
    }
}

impl From<AmbientTemperature> for i32 {
    fn from(t: AmbientTemperature) -> Self {
        t.celsius()
    }
}

impl std::fmt::Display for AmbientTemperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} °C", self.celsius())
    }
}

const IV_FACTORS: [f64; 7] = [1.15, 1.08, 1.00, 0.91, 0.82, 0.71, 0.58];
const HIV_FACTORS: [f64; 7] = [1.11, 1.05, 1.00, 0.94, 0.88, 0.82, 0.75];

/// A temperature row of the correction table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureCorrection {
    pub temperature_c: i32,
    pub factor: f64,
}

/// Correction table for one insulation class, coolest first
pub fn correction_table(insulation: Insulation) -> Vec<TemperatureCorrection> {
    AmbientTemperature::ALL
        .into_iter()
        .map(|t| TemperatureCorrection {
            temperature_c: t.celsius(),
            factor: t.correction_factor(insulation),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_mapping() {
        assert_eq!(AmbientTemperature::C20.celsius(), 20);
        assert_eq!(AmbientTemperature::C50.celsius(), 50);
        assert_eq!(AmbientTemperature::from_celsius(35).unwrap(), AmbientTemperature::C35);
        assert!(AmbientTemperature::from_celsius(33).is_err());
    }

    #[test]
    fn test_baseline_is_unity() {
        for insulation in Insulation::ALL {
            assert_eq!(AmbientTemperature::C30.correction_factor(insulation), 1.0);
        }
    }

    #[test]
    fn test_factors_non_increasing() {
        for insulation in Insulation::ALL {
            let table = correction_table(insulation);
            assert_eq!(table.len(), 7);
            for pair in table.windows(2) {
                assert!(pair[1].factor <= pair[0].factor, "{:?}", pair);
            }
            assert!(table.iter().filter(|r| r.temperature_c < 30).all(|r| r.factor > 1.0));
            assert!(table.iter().filter(|r| r.temperature_c > 30).all(|r| r.factor < 1.0));
        }
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(AmbientTemperature::from_str_flexible("40").unwrap(), AmbientTemperature::C40);
        assert_eq!(AmbientTemperature::from_str_flexible("45C").unwrap(), AmbientTemperature::C45);
        assert_eq!(AmbientTemperature::from_str_flexible("25°C").unwrap(), AmbientTemperature::C25);
        assert!(AmbientTemperature::from_str_flexible("hot").is_err());
    }

    #[test]
    fn test_serializes_as_celsius() {
        assert_eq!(serde_json::to_string(&AmbientTemperature::C40).unwrap(), "40");
        let t: AmbientTemperature = serde_json::from_str("20").unwrap();
        assert_eq!(t, AmbientTemperature::C20);
        assert!(serde_json::from_str::<AmbientTemperature>("22").is_err());
    }
}
