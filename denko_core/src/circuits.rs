//! # Circuit and Power Supply Types
//!
//! The voltage-drop coefficient depends only on the wiring topology:
//!
//! | Topology                                   | K    | Measured       |
//! |--------------------------------------------|------|----------------|
//! | DC / single-phase 2-wire                   | 35.6 | line-to-line   |
//! | Three-phase 3-wire                         | 30.8 | line-to-line   |
//! | DC 3-wire / single-phase 3-wire / 3φ 4-wire | 17.8 | line-to-neutral|
//!
//! 35.6 is the round trip of a copper conductor (2 × 17.8), 30.8 applies the
//! √3/2 phase geometry factor to it, and 17.8 is a single conductor measured
//! against the neutral.
//!
//! There is no way to check that the selected type matches the real
//! installation. Picking the wrong one gives a plausible but wrong answer.
//!
//! ## Example
//!
//! ```rust
//! use denko_core::circuits::{CircuitType, PowerSupplyType};
//!
//! assert_eq!(CircuitType::SinglePhaseTwoWire.coefficient(), 35.6);
//! assert_eq!(PowerSupplyType::ThreePhase3W200V.circuit_type(), CircuitType::ThreePhaseThreeWire);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Wiring topology used to select the voltage-drop coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CircuitType {
    /// DC 2-wire and single-phase 2-wire (K = 35.6)
    #[default]
    #[serde(rename = "dc_single")]
    SinglePhaseTwoWire,
    /// Three-phase 3-wire (K = 30.8)
    #[serde(rename = "three_phase")]
    ThreePhaseThreeWire,
    /// DC 3-wire, single-phase 3-wire, three-phase 4-wire (K = 17.8)
    #[serde(rename = "neutral")]
    LineToNeutral,
}

impl CircuitType {
    /// All circuit types for UI selection
    pub const ALL: [CircuitType; 3] = [
        CircuitType::SinglePhaseTwoWire,
        CircuitType::ThreePhaseThreeWire,
        CircuitType::LineToNeutral,
    ];

    /// Voltage-drop coefficient K
    pub fn coefficient(&self) -> f64 {
        match self {
            CircuitType::SinglePhaseTwoWire => 35.6,
            CircuitType::ThreePhaseThreeWire => 30.8,
            CircuitType::LineToNeutral => 17.8,
        }
    }

    /// Stable identifier used by forms and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            CircuitType::SinglePhaseTwoWire => "dc_single",
            CircuitType::ThreePhaseThreeWire => "three_phase",
            CircuitType::LineToNeutral => "neutral",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CircuitType::SinglePhaseTwoWire => "DC / single-phase 2-wire",
            CircuitType::ThreePhaseThreeWire => "Three-phase 3-wire",
            CircuitType::LineToNeutral => "DC 3-wire / single-phase 3-wire / three-phase 4-wire",
        }
    }

    /// Voltage-drop formula as shown on the calculator screen
    pub fn drop_formula(&self) -> &'static str {
        match self {
            CircuitType::SinglePhaseTwoWire => "e = 35.6 × L × I / (1000 × S)",
            CircuitType::ThreePhaseThreeWire => "e = 30.8 × L × I / (1000 × S)",
            CircuitType::LineToNeutral => "e' = 17.8 × L × I / (1000 × S)",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "dc_single" | "dc" | "single" | "single_phase" | "1p2w" | "35.6" => {
                Ok(CircuitType::SinglePhaseTwoWire)
            }
            "three_phase" | "3p3w" | "three_phase_3_wire" | "30.8" => {
                Ok(CircuitType::ThreePhaseThreeWire)
            }
            "neutral" | "1p3w" | "3p4w" | "line_to_neutral" | "17.8" => Ok(CircuitType::LineToNeutral),
            _ => Err(CalcError::unknown_identifier("circuit type", s)),
        }
    }
}

impl std::fmt::Display for CircuitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Number of phases, which decides the load-current formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// DC and single-phase AC: I = P / (cosφ × V)
    Single,
    /// Three-phase AC: I = P / (√3 × cosφ × V)
    Three,
}

/// A concrete supply: voltage, phase and wire count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PowerSupplyType {
    /// DC 2-wire, 100 V
    #[serde(rename = "dc_2w_100v")]
    Dc2W100V,
    /// Single-phase 2-wire, 100 V
    #[default]
    #[serde(rename = "1p2w_100v")]
    SinglePhase2W100V,
    /// Single-phase 2-wire, 200 V
    #[serde(rename = "1p2w_200v")]
    SinglePhase2W200V,
    /// Single-phase 3-wire, 100/200 V (drop measured line-to-neutral)
    #[serde(rename = "1p3w_100_200v")]
    SinglePhase3W100V200V,
    /// Three-phase 3-wire, 200 V
    #[serde(rename = "3p3w_200v")]
    ThreePhase3W200V,
    /// Three-phase 4-wire, 400 V (230/400 V class)
    #[serde(rename = "3p4w_400v")]
    ThreePhase4W400V,
}

impl PowerSupplyType {
    /// All supply types for UI selection
    pub const ALL: [PowerSupplyType; 6] = [
        PowerSupplyType::Dc2W100V,
        PowerSupplyType::SinglePhase2W100V,
        PowerSupplyType::SinglePhase2W200V,
        PowerSupplyType::SinglePhase3W100V200V,
        PowerSupplyType::ThreePhase3W200V,
        PowerSupplyType::ThreePhase4W400V,
    ];

    /// Nominal line voltage (V), used for the load current.
    ///
    /// A balanced single-phase 3-wire load is carried between the two outer
    /// conductors, so its line voltage is 200 V.
    pub fn nominal_voltage(&self) -> f64 {
        match self {
            PowerSupplyType::Dc2W100V => 100.0,
            PowerSupplyType::SinglePhase2W100V => 100.0,
            PowerSupplyType::SinglePhase2W200V => 200.0,
            PowerSupplyType::SinglePhase3W100V200V => 200.0,
            PowerSupplyType::ThreePhase3W200V => 200.0,
            PowerSupplyType::ThreePhase4W400V => 400.0,
        }
    }

    /// Voltage the drop is compared against for the drop rate (V).
    ///
    /// Line-to-neutral topologies measure the drop against the neutral, so
    /// the rate uses the phase voltage.
    pub fn drop_reference_voltage(&self) -> f64 {
        match self {
            PowerSupplyType::SinglePhase3W100V200V => 100.0,
            PowerSupplyType::ThreePhase4W400V => 400.0 / 3f64.sqrt(),
            _ => self.nominal_voltage(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            PowerSupplyType::ThreePhase3W200V | PowerSupplyType::ThreePhase4W400V => Phase::Three,
            _ => Phase::Single,
        }
    }

    /// Number of current-carrying wires
    pub fn wire_count(&self) -> u8 {
        match self {
            PowerSupplyType::Dc2W100V
            | PowerSupplyType::SinglePhase2W100V
            | PowerSupplyType::SinglePhase2W200V => 2,
            PowerSupplyType::SinglePhase3W100V200V | PowerSupplyType::ThreePhase3W200V => 3,
            PowerSupplyType::ThreePhase4W400V => 4,
        }
    }

    /// Topology of this supply
    pub fn circuit_type(&self) -> CircuitType {
        match self {
            PowerSupplyType::Dc2W100V
            | PowerSupplyType::SinglePhase2W100V
            | PowerSupplyType::SinglePhase2W200V => CircuitType::SinglePhaseTwoWire,
            PowerSupplyType::ThreePhase3W200V => CircuitType::ThreePhaseThreeWire,
            PowerSupplyType::SinglePhase3W100V200V | PowerSupplyType::ThreePhase4W400V => {
                CircuitType::LineToNeutral
            }
        }
    }

    /// Voltage-drop coefficient K (fixed by topology)
    pub fn coefficient(&self) -> f64 {
        self.circuit_type().coefficient()
    }

    /// Stable identifier used by forms and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            PowerSupplyType::Dc2W100V => "dc_2w_100v",
            PowerSupplyType::SinglePhase2W100V => "1p2w_100v",
            PowerSupplyType::SinglePhase2W200V => "1p2w_200v",
            PowerSupplyType::SinglePhase3W100V200V => "1p3w_100_200v",
            PowerSupplyType::ThreePhase3W200V => "3p3w_200v",
            PowerSupplyType::ThreePhase4W400V => "3p4w_400v",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PowerSupplyType::Dc2W100V => "DC 2-wire 100 V",
            PowerSupplyType::SinglePhase2W100V => "Single-phase 2-wire 100 V",
            PowerSupplyType::SinglePhase2W200V => "Single-phase 2-wire 200 V",
            PowerSupplyType::SinglePhase3W100V200V => "Single-phase 3-wire 100/200 V",
            PowerSupplyType::ThreePhase3W200V => "Three-phase 3-wire 200 V",
            PowerSupplyType::ThreePhase4W400V => "Three-phase 4-wire 400 V",
        }
    }

    /// Parse from the identifier or common shorthand
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '/'], "_");
        PowerSupplyType::ALL
            .iter()
            .copied()
            .find(|supply| supply.id() == normalized)
            .or(match normalized.as_str() {
                "dc" | "dc100" => Some(PowerSupplyType::Dc2W100V),
                "1p2w" | "100v" => Some(PowerSupplyType::SinglePhase2W100V),
                "200v" => Some(PowerSupplyType::SinglePhase2W200V),
                "1p3w" => Some(PowerSupplyType::SinglePhase3W100V200V),
                "3p3w" => Some(PowerSupplyType::ThreePhase3W200V),
                "3p4w" | "400v" => Some(PowerSupplyType::ThreePhase4W400V),
                _ => None,
            })
            .ok_or_else(|| CalcError::unknown_identifier("power supply type", s))
    }
}

impl std::fmt::Display for PowerSupplyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
