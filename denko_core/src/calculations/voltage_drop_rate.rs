//! # Voltage Drop Rate Calculation
//!
//! Voltage drop expressed as a percentage of the supply voltage, judged
//! against the fixed 3 % limit.
//!
//! ## Formulas
//!
//! - e = K × L × I / (1000 × S)
//! - ε = e / V × 100
//!
//! The limit check uses the unrounded rate; the reported rate is rounded to
//! one decimal.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::{CircuitType, PowerSupplyType};
use crate::equations::electrical::{
    round_half_away, voltage_drop, voltage_drop_rate, DROP_DECIMALS, MAX_DROP_RATE_PERCENT, RATE_DECIMALS,
};
use crate::errors::CalcResult;
use crate::validation::{check_result, check_values, validate_form, Field, FormFields, FormInput};

/// Form fields for this calculator
pub const FIELDS: FormFields<'static> = FormFields {
    required: &[Field::Length, Field::Current, Field::WireSize, Field::Voltage],
    optional: &[],
};

/// Input parameters for a voltage drop rate calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropRateInput {
    pub circuit: CircuitType,
    /// One-way wire length (m)
    pub length_m: f64,
    /// Current (A)
    pub current_a: f64,
    /// Conductor cross-section (mm²)
    pub wire_size_mm2: f64,
    /// Voltage the drop is compared against (V)
    pub voltage_v: f64,
}

impl VoltageDropRateInput {
    /// Take the coefficient and reference voltage from a supply type.
    ///
    /// Line-to-neutral supplies compare against the phase-to-neutral voltage.
    pub fn for_supply(supply: PowerSupplyType, length_m: f64, current_a: f64, wire_size_mm2: f64) -> Self {
        VoltageDropRateInput {
            circuit: supply.circuit_type(),
            length_m,
            current_a,
            wire_size_mm2,
            voltage_v: supply.drop_reference_voltage(),
        }
    }

    /// Build from raw form text. Every field error is reported at once.
    pub fn from_form(circuit: CircuitType, form: &FormInput) -> CalcResult<Self> {
        let values = validate_form(form, FIELDS)?;
        Ok(VoltageDropRateInput {
            circuit,
            length_m: values.require(Field::Length)?,
            current_a: values.require(Field::Current)?,
            wire_size_mm2: values.require(Field::WireSize)?,
            voltage_v: values.require(Field::Voltage)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        check_values(&[
            (Field::Length, self.length_m),
            (Field::Current, self.current_a),
            (Field::WireSize, self.wire_size_mm2),
            (Field::Voltage, self.voltage_v),
        ])
    }
}

/// Voltage drop rate result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropRateResult {
    /// Drop rate (%), 1 decimal
    pub drop_rate_percent: f64,
    /// Intermediate voltage drop (V), 3 decimals
    pub voltage_drop_v: f64,
    /// Rate within [`MAX_DROP_RATE_PERCENT`]
    pub acceptable: bool,
    pub limit_percent: f64,
    pub circuit: CircuitType,
    pub circuit_label: String,
    pub coefficient: f64,
    pub length_m: f64,
    pub current_a: f64,
    pub wire_size_mm2: f64,
    pub voltage_v: f64,
}

/// Calculate the voltage drop rate.
pub fn calculate(input: &VoltageDropRateInput) -> CalcResult<VoltageDropRateResult> {
    input.validate()?;

    let k = input.circuit.coefficient();
    let drop_inputs = [
        (Field::Length, input.length_m),
        (Field::Current, input.current_a),
        (Field::WireSize, input.wire_size_mm2),
    ];
    let drop = check_result(
        voltage_drop(k, input.length_m, input.current_a, input.wire_size_mm2),
        &drop_inputs,
    )?;
    let rate = check_result(
        voltage_drop_rate(drop, input.voltage_v),
        &[
            drop_inputs[0],
            drop_inputs[1],
            drop_inputs[2],
            (Field::Voltage, input.voltage_v),
        ],
    )?;
    let acceptable = rate <= MAX_DROP_RATE_PERCENT;

    let drop_rate_percent = round_half_away(rate, RATE_DECIMALS);
    let voltage_drop_v = round_half_away(drop, DROP_DECIMALS);

    debug!(
        circuit = input.circuit.id(),
        voltage_v = input.voltage_v,
        voltage_drop_v,
        drop_rate_percent,
        acceptable,
        "voltage drop rate calculated"
    );

    Ok(VoltageDropRateResult {
        drop_rate_percent,
        voltage_drop_v,
        acceptable,
        limit_percent: MAX_DROP_RATE_PERCENT,
        circuit: input.circuit,
        circuit_label: input.circuit.display_name().to_string(),
        coefficient: k,
        length_m: input.length_m,
        current_a: input.current_a,
        wire_size_mm2: input.wire_size_mm2,
        voltage_v: input.voltage_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorKind;

    #[test]
    fn test_rate_and_drop() {
        let input = VoltageDropRateInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 50.0,
            current_a: 20.0,
            wire_size_mm2: 5.5,
            voltage_v: 200.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.voltage_drop_v, 6.473);
        // 6.4727 / 200 × 100 = 3.236 %
        assert_eq!(result.drop_rate_percent, 3.2);
        assert!(!result.acceptable);
    }

    #[test]
    fn test_acceptable_under_limit() {
        let input = VoltageDropRateInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 20.0,
            current_a: 10.0,
            wire_size_mm2: 5.5,
            voltage_v: 100.0,
        };
        // 35.6 × 20 × 10 / 5500 = 1.2945 V → 1.3 %
        let result = calculate(&input).unwrap();
        assert_eq!(result.drop_rate_percent, 1.3);
        assert!(result.acceptable);
        assert_eq!(result.limit_percent, 3.0);
    }

    #[test]
    fn test_limit_uses_unrounded_rate() {
        let input = VoltageDropRateInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 100.0,
            current_a: 4.65,
            wire_size_mm2: 5.5,
            voltage_v: 100.0,
        };
        // 35.6 × 100 × 4.65 / 5500 = 3.0098 V, just over the limit at 100 V
        let result = calculate(&input).unwrap();
        assert_eq!(result.drop_rate_percent, 3.0);
        assert!(!result.acceptable);
    }

    #[test]
    fn test_for_supply_line_to_neutral() {
        let input = VoltageDropRateInput::for_supply(PowerSupplyType::SinglePhase3W100V200V, 30.0, 20.0, 14.0);
        assert_eq!(input.circuit, CircuitType::LineToNeutral);
        assert_eq!(input.voltage_v, 100.0);
        // 17.8 × 30 × 20 / 14000 = 0.763 V → 0.8 %
        let result = calculate(&input).unwrap();
        assert_eq!(result.voltage_drop_v, 0.763);
        assert_eq!(result.drop_rate_percent, 0.8);
    }

    #[test]
    fn test_from_form_requires_voltage() {
        let form = FormInput::new()
            .with(Field::Length, "50")
            .with(Field::Current, "20")
            .with(Field::WireSize, "5.5");
        let err = VoltageDropRateInput::from_form(CircuitType::SinglePhaseTwoWire, &form).unwrap_err();
        assert!(err.validation_errors().unwrap().contains(Field::Voltage));
    }

    #[test]
    fn test_overflowing_rate_rejected() {
        let input = VoltageDropRateInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 1e300,
            current_a: 1e300,
            wire_size_mm2: 1e-300,
            voltage_v: 1e300,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::OutOfRange));
    }

    #[test]
    fn test_rate_overflow_with_finite_drop_rejected() {
        let input = VoltageDropRateInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 1e300,
            current_a: 1.0,
            wire_size_mm2: 1.0,
            voltage_v: 1e-10,
        };
        // e = 3.56e298 V is finite, e / V × 100 is not
        let err = calculate(&input).unwrap_err();
        assert!(err.validation_errors().unwrap().contains(Field::Length));
    }
}
