//! Conduit Fill Tables
//!
//! Maximum number of IV conductors that may be pulled through one conduit,
//! by conduit family and size.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::ampacity::WireGauge;

/// Conduit family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConduitType {
    /// Rigid PVC conduit
    #[default]
    Pf,
    /// Thin-wall steel conduit (E-type)
    ThinSteel,
    /// CD flexible conduit
    Cd,
}

impl ConduitType {
    pub const ALL: [ConduitType; 3] = [ConduitType::Pf, ConduitType::ThinSteel, ConduitType::Cd];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitType::Pf => "PF conduit (PVC)",
            ConduitType::ThinSteel => "Thin steel conduit (E)",
            ConduitType::Cd => "CD conduit",
        }
    }

    /// Sizes in this family, smallest first
    pub fn sizes(&self) -> &'static [ConduitSize] {
        match self {
            ConduitType::Pf => &PF_SIZES,
            ConduitType::ThinSteel => &THIN_STEEL_SIZES,
            ConduitType::Cd => &CD_SIZES,
        }
    }

    /// Find a size by its label ("22mm", "E25"). Case-insensitive.
    pub fn size(&self, label: &str) -> CalcResult<&'static ConduitSize> {
        let wanted = label.trim();
        self.sizes()
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalcError::unknown_identifier("conduit size", format!("{} {}", self, label)))
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pf" | "pvc" => Ok(ConduitType::Pf),
            "e" | "thin_steel" | "steel" | "metal" => Ok(ConduitType::ThinSteel),
            "cd" => Ok(ConduitType::Cd),
            _ => Err(CalcError::unknown_identifier("conduit type", s)),
        }
    }
}

impl std::fmt::Display for ConduitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Conductor sizes covered by the fill tables (IV stranded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConduitWire {
    #[serde(rename = "2mm²")]
    Iv2,
    #[serde(rename = "5.5mm²")]
    Iv5_5,
    #[serde(rename = "8mm²")]
    Iv8,
    #[serde(rename = "14mm²")]
    Iv14,
}

impl ConduitWire {
    pub const ALL: [ConduitWire; 4] = [ConduitWire::Iv2, ConduitWire::Iv5_5, ConduitWire::Iv8, ConduitWire::Iv14];

    pub fn gauge(&self) -> WireGauge {
        match self {
            ConduitWire::Iv2 => WireGauge::Stranded2,
            ConduitWire::Iv5_5 => WireGauge::Stranded5_5,
            ConduitWire::Iv8 => WireGauge::Stranded8,
            ConduitWire::Iv14 => WireGauge::Stranded14,
        }
    }

    /// Fill tables only list these four stranded sizes
    pub fn from_gauge(gauge: WireGauge) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.gauge() == gauge)
            .ok_or_else(|| CalcError::unknown_identifier("conduit wire size", gauge.label()))
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        Self::from_gauge(WireGauge::from_str_flexible(s)?)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ConduitWire {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IV {}", self.gauge().label())
    }
}

/// One conduit size with its fill capacities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConduitSize {
    pub label: &'static str,
    pub outer_diameter_mm: f64,
    pub inner_diameter_mm: f64,
    /// Max conductors, indexed by [`ConduitWire`]
    pub max_conductors: [u16; 4],
}

impl ConduitSize {
    const fn new(label: &'static str, outer: f64, inner: f64, max_conductors: [u16; 4]) -> Self {
        ConduitSize {
            label,
            outer_diameter_mm: outer,
            inner_diameter_mm: inner,
            max_conductors,
        }
    }

    pub fn capacity(&self, wire: ConduitWire) -> u16 {
        self.max_conductors[wire.index()]
    }
}

#[rustfmt::skip]
static PF_SIZES: [ConduitSize; 5] = [
    ConduitSize::new("16mm", 16.0, 14.0, [9, 5, 3, 2]),
    ConduitSize::new("22mm", 22.0, 19.0, [16, 9, 5, 3]),
    ConduitSize::new("28mm", 28.0, 25.0, [25, 14, 9, 5]),
    ConduitSize::new("36mm", 36.0, 32.0, [36, 20, 12, 7]),
    ConduitSize::new("42mm", 42.0, 38.0, [49, 27, 16, 9]),
];

#[rustfmt::skip]
static THIN_STEEL_SIZES: [ConduitSize; 5] = [
    ConduitSize::new("E19", 19.0, 16.5, [12, 7, 4, 2]),
    ConduitSize::new("E25", 25.0, 22.5, [21, 12, 7, 4]),
    ConduitSize::new("E31", 31.0, 28.0, [32, 18, 10, 6]),
    ConduitSize::new("E39", 39.0, 35.5, [51, 28, 17, 10]),
    ConduitSize::new("E51", 51.0, 47.0, [89, 49, 30, 17]),
];

#[rustfmt::skip]
static CD_SIZES: [ConduitSize; 5] = [
    ConduitSize::new("14mm", 14.0, 10.0, [4, 2, 1, 1]),
    ConduitSize::new("16mm", 16.0, 12.0, [6, 3, 2, 1]),
    ConduitSize::new("22mm", 22.0, 17.0, [12, 7, 4, 2]),
    ConduitSize::new("28mm", 28.0, 23.0, [21, 12, 7, 4]),
    ConduitSize::new("36mm", 36.0, 30.0, [36, 20, 12, 7]),
];

/// Maximum conductors of `wire` allowed in the named conduit size
pub fn max_conductors(conduit: ConduitType, size_label: &str, wire: ConduitWire) -> CalcResult<u16> {
    Ok(conduit.size(size_label)?.capacity(wire))
}

/// Smallest size in the family that takes `count` conductors, if any
pub fn smallest_conduit(conduit: ConduitType, wire: ConduitWire, count: u16) -> Option<&'static ConduitSize> {
    conduit.sizes().iter().find(|s| s.capacity(wire) >= count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_non_increasing_with_gauge() {
        for conduit in ConduitType::ALL {
            for size in conduit.sizes() {
                for pair in size.max_conductors.windows(2) {
                    assert!(pair[1] <= pair[0], "{} {}", conduit, size.label);
                }
            }
        }
    }

    #[test]
    fn test_capacity_increases_with_size() {
        for conduit in ConduitType::ALL {
            for pair in conduit.sizes().windows(2) {
                assert!(pair[1].inner_diameter_mm > pair[0].inner_diameter_mm);
                for wire in ConduitWire::ALL {
                    assert!(pair[1].capacity(wire) >= pair[0].capacity(wire));
                }
            }
        }
    }

    #[test]
    fn test_max_conductors() {
        assert_eq!(max_conductors(ConduitType::Pf, "22mm", ConduitWire::Iv5_5).unwrap(), 9);
        assert_eq!(max_conductors(ConduitType::ThinSteel, "e31", ConduitWire::Iv14).unwrap(), 6);
        assert_eq!(max_conductors(ConduitType::Cd, "14mm", ConduitWire::Iv2).unwrap(), 4);
        assert!(max_conductors(ConduitType::ThinSteel, "22mm", ConduitWire::Iv2).is_err());
    }

    #[test]
    fn test_smallest_conduit() {
        let size = smallest_conduit(ConduitType::Pf, ConduitWire::Iv2, 10).unwrap();
        assert_eq!(size.label, "22mm");
        let size = smallest_conduit(ConduitType::ThinSteel, ConduitWire::Iv8, 4).unwrap();
        assert_eq!(size.label, "E19");
        assert!(smallest_conduit(ConduitType::Cd, ConduitWire::Iv14, 8).is_none());
    }

    #[test]
    fn test_conduit_wire_from_gauge() {
        assert_eq!(ConduitWire::from_str_flexible("5.5").unwrap(), ConduitWire::Iv5_5);
        assert_eq!(ConduitWire::from_gauge(WireGauge::Stranded14).unwrap(), ConduitWire::Iv14);
        assert!(ConduitWire::from_gauge(WireGauge::Stranded3_5).is_err());
    }
}
