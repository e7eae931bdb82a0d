//! # Wiring Calculations
//!
//! One module per calculator. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results with the inputs echoed for display
//! - `calculate(&input) -> CalcResult<*Result>` - Pure calculation function
//! - `*Input::from_form(..)` - Build the input from raw form text
//!
//! [`CalculationRequest`] is the single entry point for a UI layer: raw
//! field text plus the identifiers picked from selectors, dispatched to the
//! right calculator.
//!
//! ## Available Calculations
//!
//! - [`voltage_drop`] - Voltage drop along a run
//! - [`wire_size`] - Minimum cross-section for an allowed drop
//! - [`voltage_drop_rate`] - Drop as a percentage, with the 3 % check
//! - [`load_current`] - Current drawn by a kW load
//! - [`protection`] - Breaker / MCB / wire / drop checks

pub mod load_current;
pub mod protection;
pub mod voltage_drop;
pub mod voltage_drop_rate;
pub mod wire_size;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuits::{CircuitType, PowerSupplyType};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{AmbientTemperature, Installation, Insulation, WireGauge};
use crate::validation::FormInput;

pub use load_current::{LoadCurrentInput, LoadCurrentResult};
pub use protection::{
    judge, CircuitSelection, JudgmentInputs, ProtectionCheck, ProtectionInput, ProtectionResult, ProtectionVerdict,
};
pub use voltage_drop::{VoltageDropInput, VoltageDropResult};
pub use voltage_drop_rate::{VoltageDropRateInput, VoltageDropRateResult};
pub use wire_size::{WireSizeInput, WireSizeResult};

/// Calculator screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    VoltageDrop,
    WireSize,
    VoltageDropRate,
    LoadCurrent,
    Protection,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 5] = [
        CalculationKind::VoltageDrop,
        CalculationKind::WireSize,
        CalculationKind::VoltageDropRate,
        CalculationKind::LoadCurrent,
        CalculationKind::Protection,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationKind::VoltageDrop => "Voltage drop",
            CalculationKind::WireSize => "Wire size",
            CalculationKind::VoltageDropRate => "Voltage drop rate",
            CalculationKind::LoadCurrent => "Load current",
            CalculationKind::Protection => "Circuit protection",
        }
    }

    /// Whether the selector offers circuit types or power supply types
    pub fn uses_supply_type(&self) -> bool {
        matches!(self, CalculationKind::LoadCurrent | CalculationKind::Protection)
    }
}

/// A raw calculation request from a form.
///
/// `circuit` holds a circuit type id for the drop calculators and a power
/// supply id for load current and protection. Selector fields fall back to
/// their defaults when omitted.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kind": "voltage_drop",
///   "circuit": "dc_single",
///   "fields": { "length": "50", "current": "20", "wireSize": "5.5" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub kind: Option<CalculationKind>,
    #[serde(default)]
    pub circuit: Option<String>,
    #[serde(default)]
    pub gauge: Option<String>,
    #[serde(default)]
    pub insulation: Option<String>,
    /// Conductors sharing the conduit; `None` means open wiring
    #[serde(default)]
    pub conductors: Option<u32>,
    #[serde(default)]
    pub temperature_c: Option<i32>,
    /// Field id → raw text
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl CalculationRequest {
    pub fn new(kind: CalculationKind) -> Self {
        CalculationRequest {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_circuit(mut self, id: impl Into<String>) -> Self {
        self.circuit = Some(id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, raw: impl Into<String>) -> Self {
        self.fields.insert(field.into(), raw.into());
        self
    }

    fn circuit_type(&self) -> CalcResult<CircuitType> {
        self.circuit
            .as_deref()
            .map(CircuitType::from_str_flexible)
            .unwrap_or(Ok(CircuitType::default()))
    }

    fn supply_type(&self) -> CalcResult<PowerSupplyType> {
        self.circuit
            .as_deref()
            .map(PowerSupplyType::from_str_flexible)
            .unwrap_or(Ok(PowerSupplyType::default()))
    }

    fn selection(&self) -> CalcResult<CircuitSelection> {
        let gauge = self
            .gauge
            .as_deref()
            .ok_or_else(|| CalcError::unknown_identifier("wire gauge", ""))
            .and_then(WireGauge::from_str_flexible)?;
        let insulation = self
            .insulation
            .as_deref()
            .map(Insulation::from_str_flexible)
            .unwrap_or(Ok(Insulation::default()))?;
        let temperature = self
            .temperature_c
            .map(AmbientTemperature::from_celsius)
            .unwrap_or(Ok(AmbientTemperature::default()))?;
        let installation = match self.conductors {
            Some(conductors) => Installation::Indoor { conductors },
            None => Installation::Outdoor,
        };
        Ok(CircuitSelection {
            supply: self.supply_type()?,
            insulation,
            gauge,
            installation,
            temperature,
        })
    }
}

/// Result of any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    VoltageDrop(VoltageDropResult),
    WireSize(WireSizeResult),
    VoltageDropRate(VoltageDropRateResult),
    LoadCurrent(LoadCurrentResult),
    Protection(ProtectionResult),
}

impl CalculationOutput {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationOutput::VoltageDrop(_) => CalculationKind::VoltageDrop,
            CalculationOutput::WireSize(_) => CalculationKind::WireSize,
            CalculationOutput::VoltageDropRate(_) => CalculationKind::VoltageDropRate,
            CalculationOutput::LoadCurrent(_) => CalculationKind::LoadCurrent,
            CalculationOutput::Protection(_) => CalculationKind::Protection,
        }
    }
}

/// Validate a raw request and run the selected calculator.
///
/// Form errors come back together as [`CalcError::Validation`]; an
/// unrecognised selector or field id is [`CalcError::UnknownIdentifier`].
pub fn evaluate(request: &CalculationRequest) -> CalcResult<CalculationOutput> {
    let kind = request
        .kind
        .ok_or_else(|| CalcError::unknown_identifier("calculation", ""))?;
    let form = FormInput::from_pairs(request.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let output = match kind {
        CalculationKind::VoltageDrop => {
            let input = VoltageDropInput::from_form(request.circuit_type()?, &form)?;
            CalculationOutput::VoltageDrop(voltage_drop::calculate(&input)?)
        }
        CalculationKind::WireSize => {
            let input = WireSizeInput::from_form(request.circuit_type()?, &form)?;
            CalculationOutput::WireSize(wire_size::calculate(&input)?)
        }
        CalculationKind::VoltageDropRate => {
            let input = VoltageDropRateInput::from_form(request.circuit_type()?, &form)?;
            CalculationOutput::VoltageDropRate(voltage_drop_rate::calculate(&input)?)
        }
        CalculationKind::LoadCurrent => {
            let input = LoadCurrentInput::from_form(request.supply_type()?, &form)?;
            CalculationOutput::LoadCurrent(load_current::calculate(&input)?)
        }
        CalculationKind::Protection => {
            let input = ProtectionInput::from_form(request.selection()?, &form)?;
            CalculationOutput::Protection(protection::calculate(&input)?)
        }
    };
    Ok(output)
}
