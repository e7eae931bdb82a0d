//! # Wire Size Calculation
//!
//! Minimum conductor cross-section that keeps the voltage drop within an
//! allowed value, plus the next common size up.
//!
//! ## Formula
//!
//! - S = K × L × I / (1000 × e)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::CircuitType;
use crate::equations::electrical::{required_wire_size, round_half_away, WIRE_SIZE_DECIMALS};
use crate::errors::CalcResult;
use crate::materials::next_common_size;
use crate::validation::{check_result, check_values, validate_form, Field, FormFields, FormInput};

/// Form fields for this calculator
pub const FIELDS: FormFields<'static> = FormFields {
    required: &[Field::Length, Field::Current, Field::VoltageDrop],
    optional: &[],
};

/// Input parameters for a wire size calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "circuit": "three_phase",
///   "length_m": 100.0,
///   "current_a": 15.0,
///   "voltage_drop_v": 5.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireSizeInput {
    pub circuit: CircuitType,
    /// One-way wire length (m)
    pub length_m: f64,
    /// Current (A)
    pub current_a: f64,
    /// Allowable voltage drop (V)
    pub voltage_drop_v: f64,
}

impl WireSizeInput {
    /// Build from raw form text. Every field error is reported at once.
    pub fn from_form(circuit: CircuitType, form: &FormInput) -> CalcResult<Self> {
        let values = validate_form(form, FIELDS)?;
        Ok(WireSizeInput {
            circuit,
            length_m: values.require(Field::Length)?,
            current_a: values.require(Field::Current)?,
            voltage_drop_v: values.require(Field::VoltageDrop)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        check_values(&[
            (Field::Length, self.length_m),
            (Field::Current, self.current_a),
            (Field::VoltageDrop, self.voltage_drop_v),
        ])
    }
}

/// Wire size result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSizeResult {
    /// Minimum cross-section (mm²), 3 decimals
    pub required_size_mm2: f64,
    /// Smallest common size at or above the requirement; `None` above 250 mm²
    pub recommended_size_mm2: Option<f64>,
    pub circuit: CircuitType,
    pub circuit_label: String,
    pub coefficient: f64,
    pub formula: String,
    pub length_m: f64,
    pub current_a: f64,
    pub voltage_drop_v: f64,
}

/// Calculate the required wire size.
pub fn calculate(input: &WireSizeInput) -> CalcResult<WireSizeResult> {
    input.validate()?;

    let k = input.circuit.coefficient();
    let area = check_result(
        required_wire_size(k, input.length_m, input.current_a, input.voltage_drop_v),
        &[
            (Field::Length, input.length_m),
            (Field::Current, input.current_a),
            (Field::VoltageDrop, input.voltage_drop_v),
        ],
    )?;
    let required_size_mm2 = round_half_away(area, WIRE_SIZE_DECIMALS);
    let recommended_size_mm2 = next_common_size(area);

    debug!(
        circuit = input.circuit.id(),
        length_m = input.length_m,
        current_a = input.current_a,
        voltage_drop_v = input.voltage_drop_v,
        required_size_mm2,
        ?recommended_size_mm2,
        "wire size calculated"
    );

    Ok(WireSizeResult {
        required_size_mm2,
        recommended_size_mm2,
        circuit: input.circuit,
        circuit_label: input.circuit.display_name().to_string(),
        coefficient: k,
        formula: "S = K × L × I / (1000 × e)".to_string(),
        length_m: input.length_m,
        current_a: input.current_a,
        voltage_drop_v: input.voltage_drop_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorKind;

    #[test]
    fn test_three_phase_wire_size() {
        let input = WireSizeInput {
            circuit: CircuitType::ThreePhaseThreeWire,
            length_m: 100.0,
            current_a: 15.0,
            voltage_drop_v: 5.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.required_size_mm2, 9.24);
        assert_eq!(result.recommended_size_mm2, Some(14.0));
    }

    #[test]
    fn test_no_common_size_for_huge_requirement() {
        let input = WireSizeInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 500.0,
            current_a: 200.0,
            voltage_drop_v: 2.0,
        };
        // 35.6 × 500 × 200 / 2000 = 1780 mm²
        let result = calculate(&input).unwrap();
        assert_eq!(result.required_size_mm2, 1780.0);
        assert_eq!(result.recommended_size_mm2, None);
    }

    #[test]
    fn test_rejects_zero_drop() {
        let input = WireSizeInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 10.0,
            current_a: 10.0,
            voltage_drop_v: 0.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().get(Field::VoltageDrop).unwrap().kind,
            ValidationErrorKind::NotPositive
        );
    }

    #[test]
    fn test_from_form_reports_every_field() {
        let form = FormInput::new()
            .with(Field::Length, "")
            .with(Field::Current, "abc")
            .with(Field::VoltageDrop, "-2");
        let err = WireSizeInput::from_form(CircuitType::LineToNeutral, &form).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Length).unwrap().kind, ValidationErrorKind::EmptyInput);
    }

    #[test]
    fn test_overflowing_size_rejected() {
        let input = WireSizeInput {
            circuit: CircuitType::ThreePhaseThreeWire,
            length_m: 1e200,
            current_a: 1e200,
            voltage_drop_v: 5.0,
        };
        let err = calculate(&input).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.get(Field::Length).unwrap().kind, ValidationErrorKind::OutOfRange);
    }
}
