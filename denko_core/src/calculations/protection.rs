//! # Circuit Protection Check
//!
//! Judges whether a branch circuit's breaker, MCB and conductor suit its
//! load, and whether the voltage drop stays within the 3 % limit.
//!
//! ## Checks
//!
//! | Check | Passes when |
//! |-------|-------------|
//! | Breaker | breaker rating ≥ load current |
//! | MCB | MCB rating ≥ load current |
//! | Wire | corrected ampacity ≥ MCB rating |
//! | Voltage drop | drop rate ≤ 3.0 % |
//!
//! All four are evaluated every time and reported separately. The circuit
//! is valid only if every check passes. The checks use the unrounded load
//! current and drop rate.
//!
//! ## Example
//!
//! ```rust
//! use denko_core::calculations::protection::{judge, JudgmentInputs};
//!
//! let mut verdict = judge(&JudgmentInputs {
//!     load_current_a: 33.0,
//!     breaker_a: 30.0,
//!     mcb_a: 40.0,
//!     allowable_ampacity_a: 42.0,
//!     drop_rate_percent: 1.5,
//! });
//! assert!(!verdict.breaker_adequate);
//!
//! verdict.rejudge_breaker(35.0, 33.0);
//! assert!(verdict.breaker_adequate);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::PowerSupplyType;
use crate::equations::electrical::{
    derated_ampacity, load_current, round_half_away, voltage_drop, voltage_drop_rate, AMPACITY_DECIMALS,
    DROP_DECIMALS, LOAD_CURRENT_DECIMALS, MAX_DROP_RATE_PERCENT, RATE_DECIMALS,
};
use crate::errors::{CalcResult, ValidationErrors};
use crate::materials::{base_ampacity, AmbientTemperature, Installation, Insulation, WireGauge};
use crate::validation::{check_mcb_against_breaker, check_result, check_value, validate_form, Field, FormFields, FormInput};

/// Form fields for this calculator
pub const FIELDS: FormFields<'static> = FormFields {
    required: &[
        Field::LoadKw,
        Field::PowerFactor,
        Field::Length,
        Field::BreakerCurrent,
        Field::McbCurrent,
    ],
    optional: &[Field::ReductionFactor],
};

/// The individual checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectionCheck {
    Breaker,
    Mcb,
    Wire,
    VoltageDrop,
}

impl ProtectionCheck {
    pub const ALL: [ProtectionCheck; 4] = [
        ProtectionCheck::Breaker,
        ProtectionCheck::Mcb,
        ProtectionCheck::Wire,
        ProtectionCheck::VoltageDrop,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            ProtectionCheck::Breaker => "Breaker rating covers the load current",
            ProtectionCheck::Mcb => "MCB rating covers the load current",
            ProtectionCheck::Wire => "Wire ampacity covers the MCB rating",
            ProtectionCheck::VoltageDrop => "Voltage drop rate within 3 %",
        }
    }
}

/// Quantities the checks compare
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgmentInputs {
    pub load_current_a: f64,
    pub breaker_a: f64,
    pub mcb_a: f64,
    /// Corrected ampacity of the chosen conductor (A)
    pub allowable_ampacity_a: f64,
    pub drop_rate_percent: f64,
}

/// Four independent pass/fail results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionVerdict {
    pub breaker_adequate: bool,
    pub mcb_adequate: bool,
    pub wire_adequate: bool,
    pub drop_acceptable: bool,
}

impl ProtectionVerdict {
    /// All four checks pass
    pub fn is_valid(&self) -> bool {
        self.breaker_adequate && self.mcb_adequate && self.wire_adequate && self.drop_acceptable
    }

    pub fn passed(&self, check: ProtectionCheck) -> bool {
        match check {
            ProtectionCheck::Breaker => self.breaker_adequate,
            ProtectionCheck::Mcb => self.mcb_adequate,
            ProtectionCheck::Wire => self.wire_adequate,
            ProtectionCheck::VoltageDrop => self.drop_acceptable,
        }
    }

    /// Checks that failed, in display order
    pub fn failures(&self) -> Vec<ProtectionCheck> {
        ProtectionCheck::ALL.into_iter().filter(|c| !self.passed(*c)).collect()
    }

    /// Re-evaluate only the breaker check after its rating changes.
    pub fn rejudge_breaker(&mut self, breaker_a: f64, load_current_a: f64) {
        self.breaker_adequate = breaker_adequate(breaker_a, load_current_a);
    }
}

pub fn breaker_adequate(breaker_a: f64, load_current_a: f64) -> bool {
    breaker_a >= load_current_a
}

pub fn mcb_adequate(mcb_a: f64, load_current_a: f64) -> bool {
    mcb_a >= load_current_a
}

pub fn wire_adequate(allowable_ampacity_a: f64, mcb_a: f64) -> bool {
    allowable_ampacity_a >= mcb_a
}

pub fn drop_acceptable(drop_rate_percent: f64) -> bool {
    drop_rate_percent <= MAX_DROP_RATE_PERCENT
}

/// Evaluate every check. No check is skipped when another fails.
pub fn judge(inputs: &JudgmentInputs) -> ProtectionVerdict {
    ProtectionVerdict {
        breaker_adequate: breaker_adequate(inputs.breaker_a, inputs.load_current_a),
        mcb_adequate: mcb_adequate(inputs.mcb_a, inputs.load_current_a),
        wire_adequate: wire_adequate(inputs.allowable_ampacity_a, inputs.mcb_a),
        drop_acceptable: drop_acceptable(inputs.drop_rate_percent),
    }
}

fn default_reduction_factor() -> f64 {
    1.0
}

/// Selections made outside the numeric form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitSelection {
    pub supply: PowerSupplyType,
    pub insulation: Insulation,
    pub gauge: WireGauge,
    pub installation: Installation,
    pub temperature: AmbientTemperature,
}

/// Input parameters for a protection check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "supply": "1p2w_100v",
///   "load_kw": 3.0,
///   "power_factor": 0.9,
///   "length_m": 15.0,
///   "breaker_a": 40.0,
///   "mcb_a": 40.0,
///   "insulation": "IV",
///   "gauge": "8mm²",
///   "installation": { "type": "indoor", "conductors": 3 },
///   "temperature": 30
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectionInput {
    pub supply: PowerSupplyType,
    /// Load (kW)
    pub load_kw: f64,
    pub power_factor: f64,
    /// One-way wire length (m)
    pub length_m: f64,
    /// Upstream breaker rating (A)
    pub breaker_a: f64,
    /// Branch MCB rating (A)
    pub mcb_a: f64,
    pub insulation: Insulation,
    pub gauge: WireGauge,
    pub installation: Installation,
    pub temperature: AmbientTemperature,
    /// Extra ampacity multiplier, [0.1, 2.0]
    #[serde(default = "default_reduction_factor")]
    pub reduction_factor: f64,
}

impl ProtectionInput {
    pub fn from_form(selection: CircuitSelection, form: &FormInput) -> CalcResult<Self> {
        let values = validate_form(form, FIELDS)?;
        Ok(ProtectionInput {
            supply: selection.supply,
            load_kw: values.require(Field::LoadKw)?,
            power_factor: values.require(Field::PowerFactor)?,
            length_m: values.require(Field::Length)?,
            breaker_a: values.require(Field::BreakerCurrent)?,
            mcb_a: values.require(Field::McbCurrent)?,
            insulation: selection.insulation,
            gauge: selection.gauge,
            installation: selection.installation,
            temperature: selection.temperature,
            reduction_factor: values.get_or(Field::ReductionFactor, default_reduction_factor()),
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        let mut errors: ValidationErrors = [
            (Field::LoadKw, self.load_kw),
            (Field::PowerFactor, self.power_factor),
            (Field::Length, self.length_m),
            (Field::BreakerCurrent, self.breaker_a),
            (Field::McbCurrent, self.mcb_a),
            (Field::ReductionFactor, self.reduction_factor),
        ]
        .into_iter()
        .filter_map(|(field, value)| check_value(field, value).err())
        .collect();

        if !errors.contains(Field::BreakerCurrent) && !errors.contains(Field::McbCurrent) {
            if let Err(error) = check_mcb_against_breaker(self.mcb_a, self.breaker_a) {
                errors.insert(error);
            }
        }
        errors.into_result()
    }
}

/// Protection check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionResult {
    pub verdict: ProtectionVerdict,
    /// All four checks pass
    pub is_valid: bool,

    /// Load current (A), whole amperes
    pub load_current_a: f64,
    pub exact_current_a: f64,

    /// Tabulated ampacity at 30 °C (A)
    pub base_ampacity_a: f64,
    pub temperature_factor: f64,
    pub reduction_factor: f64,
    /// base × temperature factor × reduction factor (A), 1 decimal
    pub allowable_ampacity_a: f64,

    /// Voltage drop at the load current (V), 3 decimals
    pub voltage_drop_v: f64,
    /// Drop rate (%), 1 decimal
    pub drop_rate_percent: f64,

    pub supply: PowerSupplyType,
    pub supply_label: String,
    pub gauge_label: String,
    pub breaker_a: f64,
    pub mcb_a: f64,
}

/// Run all four protection checks for a circuit.
pub fn calculate(input: &ProtectionInput) -> CalcResult<ProtectionResult> {
    input.validate()?;

    let supply = input.supply;
    let current_inputs = [(Field::LoadKw, input.load_kw), (Field::PowerFactor, input.power_factor)];
    let exact_current_a = check_result(
        load_current(input.load_kw, input.power_factor, supply.nominal_voltage(), supply.phase()),
        &current_inputs,
    )?;

    let base = base_ampacity(input.insulation, input.gauge, input.installation) as f64;
    let temperature_factor = input.temperature.correction_factor(input.insulation);
    let allowable_ampacity_a = round_half_away(
        derated_ampacity(base, temperature_factor, input.reduction_factor),
        AMPACITY_DECIMALS,
    );

    let drop_inputs = [current_inputs[0], current_inputs[1], (Field::Length, input.length_m)];
    let drop = check_result(
        voltage_drop(supply.coefficient(), input.length_m, exact_current_a, input.gauge.area_mm2()),
        &drop_inputs,
    )?;
    let rate = check_result(voltage_drop_rate(drop, supply.drop_reference_voltage()), &drop_inputs)?;

    let verdict = judge(&JudgmentInputs {
        load_current_a: exact_current_a,
        breaker_a: input.breaker_a,
        mcb_a: input.mcb_a,
        allowable_ampacity_a,
        drop_rate_percent: rate,
    });

    debug!(
        supply = supply.id(),
        gauge = input.gauge.label(),
        exact_current_a,
        allowable_ampacity_a,
        drop_rate = rate,
        ?verdict,
        "protection checked"
    );

    Ok(ProtectionResult {
        verdict,
        is_valid: verdict.is_valid(),
        load_current_a: round_half_away(exact_current_a, LOAD_CURRENT_DECIMALS),
        exact_current_a,
        base_ampacity_a: base,
        temperature_factor,
        reduction_factor: input.reduction_factor,
        allowable_ampacity_a,
        voltage_drop_v: round_half_away(drop, DROP_DECIMALS),
        drop_rate_percent: round_half_away(rate, RATE_DECIMALS),
        supply,
        supply_label: supply.display_name().to_string(),
        gauge_label: input.gauge.to_string(),
        breaker_a: input.breaker_a,
        mcb_a: input.mcb_a,
    })
}
