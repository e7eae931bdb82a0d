//! # Voltage Drop Calculation
//!
//! Voltage lost along a conductor run for a given circuit topology.
//!
//! ## Formula
//!
//! - e = K × L × I / (1000 × S)
//!
//! ## Example
//!
//! ```rust
//! use denko_core::calculations::voltage_drop::{calculate, VoltageDropInput};
//! use denko_core::circuits::CircuitType;
//!
//! let input = VoltageDropInput {
//!     circuit: CircuitType::SinglePhaseTwoWire,
//!     length_m: 50.0,
//!     current_a: 20.0,
//!     wire_size_mm2: 5.5,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.voltage_drop_v, 6.473);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::CircuitType;
use crate::equations::electrical::{round_half_away, voltage_drop, DROP_DECIMALS};
use crate::errors::CalcResult;
use crate::materials::WireGauge;
use crate::validation::{check_result, check_values, validate_form, Field, FormFields, FormInput};

/// Form fields for this calculator
pub const FIELDS: FormFields<'static> = FormFields {
    required: &[Field::Length, Field::Current, Field::WireSize],
    optional: &[],
};

/// Input parameters for a voltage drop calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "circuit": "dc_single",
///   "length_m": 50.0,
///   "current_a": 20.0,
///   "wire_size_mm2": 5.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInput {
    /// Circuit topology (selects K)
    pub circuit: CircuitType,
    /// One-way wire length (m)
    pub length_m: f64,
    /// Current (A)
    pub current_a: f64,
    /// Conductor cross-section (mm²)
    pub wire_size_mm2: f64,
}

impl VoltageDropInput {
    /// Use the cross-section of a tabulated gauge
    pub fn for_gauge(circuit: CircuitType, length_m: f64, current_a: f64, gauge: WireGauge) -> Self {
        VoltageDropInput {
            circuit,
            length_m,
            current_a,
            wire_size_mm2: gauge.area_mm2(),
        }
    }

    /// Build from raw form text. Every field error is reported at once.
    pub fn from_form(circuit: CircuitType, form: &FormInput) -> CalcResult<Self> {
        let values = validate_form(form, FIELDS)?;
        Ok(VoltageDropInput {
            circuit,
            length_m: values.require(Field::Length)?,
            current_a: values.require(Field::Current)?,
            wire_size_mm2: values.require(Field::WireSize)?,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_values(&[
            (Field::Length, self.length_m),
            (Field::Current, self.current_a),
            (Field::WireSize, self.wire_size_mm2),
        ])
    }
}

/// Voltage drop result with the inputs echoed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Voltage drop (V), 3 decimals
    pub voltage_drop_v: f64,
    pub circuit: CircuitType,
    pub circuit_label: String,
    pub coefficient: f64,
    /// Formula as displayed
    pub formula: String,
    pub length_m: f64,
    pub current_a: f64,
    pub wire_size_mm2: f64,
}

/// Calculate the voltage drop.
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    input.validate()?;

    let k = input.circuit.coefficient();
    let drop = check_result(
        voltage_drop(k, input.length_m, input.current_a, input.wire_size_mm2),
        &[
            (Field::Length, input.length_m),
            (Field::Current, input.current_a),
            (Field::WireSize, input.wire_size_mm2),
        ],
    )?;
    let voltage_drop_v = round_half_away(drop, DROP_DECIMALS);

    debug!(
        circuit = input.circuit.id(),
        length_m = input.length_m,
        current_a = input.current_a,
        wire_size_mm2 = input.wire_size_mm2,
        voltage_drop_v,
        "voltage drop calculated"
    );

    Ok(VoltageDropResult {
        voltage_drop_v,
        circuit: input.circuit,
        circuit_label: input.circuit.display_name().to_string(),
        coefficient: k,
        formula: input.circuit.drop_formula().to_string(),
        length_m: input.length_m,
        current_a: input.current_a,
        wire_size_mm2: input.wire_size_mm2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CalcError, ValidationErrorKind};

    fn input(circuit: CircuitType) -> VoltageDropInput {
        VoltageDropInput {
            circuit,
            length_m: 50.0,
            current_a: 20.0,
            wire_size_mm2: 5.5,
        }
    }

    #[test]
    fn test_single_phase_drop() {
        let result = calculate(&input(CircuitType::SinglePhaseTwoWire)).unwrap();
        assert_eq!(result.voltage_drop_v, 6.473);
        assert_eq!(result.coefficient, 35.6);
        assert!(result.formula.starts_with("e = 35.6"));
    }

    #[test]
    fn test_coefficient_selects_result() {
        let three = calculate(&input(CircuitType::ThreePhaseThreeWire)).unwrap();
        let neutral = calculate(&input(CircuitType::LineToNeutral)).unwrap();
        // 30.8 × 50 × 20 / 5500 = 5.6
        assert_eq!(three.voltage_drop_v, 5.6);
        // 17.8 × 50 × 20 / 5500 = 3.23636...
        assert_eq!(neutral.voltage_drop_v, 3.236);
    }

    #[test]
    fn test_solid_gauge_uses_computed_area() {
        let input = VoltageDropInput::for_gauge(CircuitType::SinglePhaseTwoWire, 20.0, 15.0, WireGauge::Solid2_0);
        let result = calculate(&input).unwrap();
        // 35.6 × 20 × 15 / (1000 × π) = 3.3996
        assert!((result.voltage_drop_v - 3.4).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_input_collects_errors() {
        let bad = VoltageDropInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 0.0,
            current_a: -1.0,
            wire_size_mm2: 5.5,
        };
        let err = calculate(&bad).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Length).unwrap().kind, ValidationErrorKind::NotPositive);
    }

    #[test]
    fn test_from_form() {
        let form = FormInput::new()
            .with(Field::Length, "50")
            .with(Field::Current, "20")
            .with(Field::WireSize, "5.5");
        let input = VoltageDropInput::from_form(CircuitType::SinglePhaseTwoWire, &form).unwrap();
        assert_eq!(calculate(&input).unwrap().voltage_drop_v, 6.473);

        let form = FormInput::new().with(Field::Length, "50");
        match VoltageDropInput::from_form(CircuitType::SinglePhaseTwoWire, &form) {
            Err(CalcError::Validation { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors.get(Field::Current).unwrap().kind, ValidationErrorKind::EmptyInput);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_result_json() {
        let result = calculate(&input(CircuitType::LineToNeutral)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"circuit\":\"neutral\""));
        assert!(json.contains("\"voltage_drop_v\":3.236"));
    }

    #[test]
    fn test_overflowing_drop_rejected() {
        let form = FormInput::new()
            .with(Field::Length, "1e200")
            .with(Field::Current, "1e200")
            .with(Field::WireSize, "5.5");
        let input = VoltageDropInput::from_form(CircuitType::SinglePhaseTwoWire, &form).unwrap();
        let err = calculate(&input).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Length).unwrap().kind, ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn test_huge_finite_drop_survives_rounding() {
        let input = VoltageDropInput {
            circuit: CircuitType::SinglePhaseTwoWire,
            length_m: 1e305,
            current_a: 10.0,
            wire_size_mm2: 0.01,
        };
        // 35.6 × 1e306 / 10 = 3.56e306; scaling by 1000 for rounding would overflow
        let result = calculate(&input).unwrap();
        assert!(result.voltage_drop_v.is_finite());
        assert!((result.voltage_drop_v / 3.56e306 - 1.0).abs() < 1e-12);
    }
}
