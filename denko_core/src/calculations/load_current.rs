//! # Load Current Calculation
//!
//! Current drawn by a load of P kW at power factor cosφ.
//!
//! ## Formulas
//!
//! - Single-phase / DC: I = 1000 × P / (cosφ × V)
//! - Three-phase: I = 1000 × P / (cosφ × √3 × V)
//!
//! The reported current is rounded to whole amperes; the exact value is
//! kept alongside for downstream checks.
//!
//! ## Example
//!
//! ```rust
//! use denko_core::calculations::load_current::{calculate, LoadCurrentInput};
//! use denko_core::circuits::PowerSupplyType;
//!
//! let input = LoadCurrentInput {
//!     supply: PowerSupplyType::SinglePhase2W100V,
//!     load_kw: 3.0,
//!     power_factor: 0.9,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.load_current_a, 33.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::{Phase, PowerSupplyType};
use crate::equations::electrical::{load_current, round_half_away, LOAD_CURRENT_DECIMALS};
use crate::errors::CalcResult;
use crate::validation::{check_result, check_values, validate_form, Field, FormFields, FormInput};

/// Form fields for this calculator
pub const FIELDS: FormFields<'static> = FormFields {
    required: &[Field::LoadKw, Field::PowerFactor],
    optional: &[],
};

/// Input parameters for a load current calculation.
///
/// ## JSON Example
///
/// ```json
/// { "supply": "3p3w_200v", "load_kw": 10.0, "power_factor": 0.85 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadCurrentInput {
    /// Supply type (nominal voltage and phase count)
    pub supply: PowerSupplyType,
    /// Load (kW)
    pub load_kw: f64,
    /// Power factor, (0, 1]
    pub power_factor: f64,
}

impl LoadCurrentInput {
    pub fn from_form(supply: PowerSupplyType, form: &FormInput) -> CalcResult<Self> {
        let values = validate_form(form, FIELDS)?;
        Ok(LoadCurrentInput {
            supply,
            load_kw: values.require(Field::LoadKw)?,
            power_factor: values.require(Field::PowerFactor)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        check_values(&[(Field::LoadKw, self.load_kw), (Field::PowerFactor, self.power_factor)])
    }

    /// Unrounded current (A)
    pub fn exact_current_a(&self) -> f64 {
        load_current(
            self.load_kw,
            self.power_factor,
            self.supply.nominal_voltage(),
            self.supply.phase(),
        )
    }
}

/// Load current result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCurrentResult {
    /// Load current (A), whole amperes
    pub load_current_a: f64,
    /// Unrounded load current (A)
    pub exact_current_a: f64,
    pub supply: PowerSupplyType,
    pub supply_label: String,
    pub phase: Phase,
    pub voltage_v: f64,
    pub load_kw: f64,
    pub power_factor: f64,
    pub formula: String,
}

/// Calculate the load current.
pub fn calculate(input: &LoadCurrentInput) -> CalcResult<LoadCurrentResult> {
    input.validate()?;

    let exact_current_a = check_result(
        input.exact_current_a(),
        &[(Field::LoadKw, input.load_kw), (Field::PowerFactor, input.power_factor)],
    )?;
    let load_current_a = round_half_away(exact_current_a, LOAD_CURRENT_DECIMALS);
    let phase = input.supply.phase();

    debug!(
        supply = input.supply.id(),
        load_kw = input.load_kw,
        power_factor = input.power_factor,
        exact_current_a,
        load_current_a,
        "load current calculated"
    );

    let formula = match phase {
        Phase::Single => "I = 1000 × P / (cosφ × V)",
        Phase::Three => "I = 1000 × P / (cosφ × √3 × V)",
    };

    Ok(LoadCurrentResult {
        load_current_a,
        exact_current_a,
        supply: input.supply,
        supply_label: input.supply.display_name().to_string(),
        phase,
        voltage_v: input.supply.nominal_voltage(),
        load_kw: input.load_kw,
        power_factor: input.power_factor,
        formula: formula.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorKind;

    #[test]
    fn test_single_phase_rounds_to_whole_amps() {
        let input = LoadCurrentInput {
            supply: PowerSupplyType::SinglePhase2W100V,
            load_kw: 3.0,
            power_factor: 0.9,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.load_current_a, 33.0);
        assert!((result.exact_current_a - 33.333).abs() < 1e-3);
        assert_eq!(result.phase, Phase::Single);
    }

    #[test]
    fn test_three_phase() {
        let input = LoadCurrentInput {
            supply: PowerSupplyType::ThreePhase3W200V,
            load_kw: 10.0,
            power_factor: 0.85,
        };
        // 10000 / (0.85 × √3 × 200) = 33.96 → 34
        let result = calculate(&input).unwrap();
        assert_eq!(result.load_current_a, 34.0);
        assert!(result.formula.contains("√3"));
    }

    #[test]
    fn test_single_phase_three_wire_uses_line_voltage() {
        let input = LoadCurrentInput {
            supply: PowerSupplyType::SinglePhase3W100V200V,
            load_kw: 4.0,
            power_factor: 1.0,
        };
        assert_eq!(calculate(&input).unwrap().load_current_a, 20.0);
    }

    #[test]
    fn test_power_factor_out_of_range() {
        let input = LoadCurrentInput {
            supply: PowerSupplyType::SinglePhase2W200V,
            load_kw: 1.0,
            power_factor: 1.2,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().get(Field::PowerFactor).unwrap().kind,
            ValidationErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_from_form() {
        let form = FormInput::new().with(Field::LoadKw, "2.2").with(Field::PowerFactor, "0.8");
        let input = LoadCurrentInput::from_form(PowerSupplyType::SinglePhase2W200V, &form).unwrap();
        // 2200 / 160 = 13.75 → 14
        assert_eq!(calculate(&input).unwrap().load_current_a, 14.0);
    }

    #[test]
    fn test_overflowing_current_rejected() {
        let input = LoadCurrentInput {
            supply: PowerSupplyType::SinglePhase2W100V,
            load_kw: 1e306,
            power_factor: 1e-5,
        };
        let err = calculate(&input).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.get(Field::LoadKw).unwrap().kind, ValidationErrorKind::OutOfRange);
    }
}
