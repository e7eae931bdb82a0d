//! # Input Validation
//!
//! Gatekeeper between raw form text and the formula engine.
//!
//! Rules per field:
//!
//! | Rule | Applies to | Error |
//! |------|------------|-------|
//! | Blank or whitespace-only | required fields | `EmptyInput` |
//! | Not a finite number, or ≤ 0 | every numeric field | `NotPositive` |
//! | Outside [0.1, 2.0] | reduction factor | `OutOfRange` |
//! | Outside (0, 1.0] | power factor | `OutOfRange` |
//! | Greater than the breaker rating | MCB rating | `ExceedsBreaker` |
//! | Drives a result past `f64` | the most extreme input | `OutOfRange` |
//!
//! Fields are independent except MCB ↔ breaker: [`FormState`] re-checks the
//! MCB rating whenever either of the two changes.
//!
//! ## Example
//!
//! ```rust
//! use denko_core::errors::ValidationErrorKind;
//! use denko_core::validation::{validate, Field};
//!
//! assert_eq!(validate(Field::ReductionFactor, "0.1").unwrap(), 0.1);
//! let err = validate(Field::ReductionFactor, "0").unwrap_err();
//! assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, ValidationError, ValidationErrorKind, ValidationErrors};

/// Lower bound of the reduction factor (inclusive)
pub const REDUCTION_FACTOR_MIN: f64 = 0.1;
/// Upper bound of the reduction factor (inclusive)
pub const REDUCTION_FACTOR_MAX: f64 = 2.0;
/// Upper bound of the power factor (inclusive; lower bound 0 is exclusive)
pub const POWER_FACTOR_MAX: f64 = 1.0;

/// A numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// One-way wire length (m)
    Length,
    /// Load current (A)
    Current,
    /// Conductor cross-section (mm²)
    WireSize,
    /// Nominal voltage (V)
    Voltage,
    /// Allowable voltage drop (V)
    VoltageDrop,
    /// Load (kW)
    LoadKw,
    PowerFactor,
    ReductionFactor,
    /// Upstream breaker rating (A)
    BreakerCurrent,
    /// Miniature circuit breaker rating (A)
    McbCurrent,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Length,
        Field::Current,
        Field::WireSize,
        Field::Voltage,
        Field::VoltageDrop,
        Field::LoadKw,
        Field::PowerFactor,
        Field::ReductionFactor,
        Field::BreakerCurrent,
        Field::McbCurrent,
    ];

    /// Form key, as used in the raw field-name → text mapping
    pub fn id(&self) -> &'static str {
        match self {
            Field::Length => "length",
            Field::Current => "current",
            Field::WireSize => "wireSize",
            Field::Voltage => "voltage",
            Field::VoltageDrop => "voltageDrop",
            Field::LoadKw => "loadKw",
            Field::PowerFactor => "powerFactor",
            Field::ReductionFactor => "reductionFactor",
            Field::BreakerCurrent => "breakerCurrent",
            Field::McbCurrent => "mcbCurrent",
        }
    }

    /// Label shown next to the input
    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Length => "Wire length",
            Field::Current => "Current",
            Field::WireSize => "Wire size",
            Field::Voltage => "Voltage",
            Field::VoltageDrop => "Allowable voltage drop",
            Field::LoadKw => "Load",
            Field::PowerFactor => "Power factor",
            Field::ReductionFactor => "Reduction factor",
            Field::BreakerCurrent => "Breaker rating",
            Field::McbCurrent => "MCB rating",
        }
    }

    /// Noun phrase used in "Enter the ..." prompts
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Field::Length => "wire length",
            Field::Current => "current",
            Field::WireSize => "wire size",
            Field::Voltage => "voltage",
            Field::VoltageDrop => "allowable voltage drop",
            Field::LoadKw => "load",
            Field::PowerFactor => "power factor",
            Field::ReductionFactor => "reduction factor",
            Field::BreakerCurrent => "breaker rating",
            Field::McbCurrent => "MCB rating",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Length => "m",
            Field::Current | Field::BreakerCurrent | Field::McbCurrent => "A",
            Field::WireSize => "mm²",
            Field::Voltage | Field::VoltageDrop => "V",
            Field::LoadKw => "kW",
            Field::PowerFactor | Field::ReductionFactor => "",
        }
    }

    /// Allowed range, for fields that have one beyond positivity
    pub fn range_description(&self) -> Option<&'static str> {
        match self {
            Field::ReductionFactor => Some("0.1 to 2.0"),
            Field::PowerFactor => Some("0 (exclusive) to 1.0"),
            _ => None,
        }
    }

    /// Parse a form key. Accepts the camelCase id and its snake_case spelling.
    pub fn from_id(s: &str) -> CalcResult<Self> {
        let key = s.trim().replace('_', "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.id().to_lowercase() == key)
            .ok_or_else(|| CalcError::unknown_identifier("field", s))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Validate one field's raw text and return the parsed value.
///
/// Does not perform the MCB ↔ breaker cross-check; see [`check_mcb_against_breaker`].
pub fn validate(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, ValidationErrorKind::EmptyInput));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::new(field, ValidationErrorKind::NotPositive))?;
    check_value(field, value)
}

/// Apply the positivity and range rules to an already-parsed value.
pub fn check_value(field: Field, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        // Zero reduction factor is reported against its range, not positivity
        if field == Field::ReductionFactor && value.is_finite() {
            return Err(ValidationError::new(field, ValidationErrorKind::OutOfRange));
        }
        return Err(ValidationError::new(field, ValidationErrorKind::NotPositive));
    }
    let in_range = match field {
        Field::ReductionFactor => (REDUCTION_FACTOR_MIN..=REDUCTION_FACTOR_MAX).contains(&value),
        Field::PowerFactor => value <= POWER_FACTOR_MAX,
        _ => true,
    };
    if !in_range {
        return Err(ValidationError::new(field, ValidationErrorKind::OutOfRange));
    }
    Ok(value)
}

/// Check several parsed values at once, collecting every failure.
pub fn check_values(values: &[(Field, f64)]) -> CalcResult<()> {
    values
        .iter()
        .filter_map(|&(field, value)| check_value(field, value).err())
        .collect::<ValidationErrors>()
        .into_result()
}

/// MCB rating must not exceed the upstream breaker rating.
pub fn check_mcb_against_breaker(mcb_a: f64, breaker_a: f64) -> Result<(), ValidationError> {
    if mcb_a > breaker_a {
        Err(ValidationError::new(Field::McbCurrent, ValidationErrorKind::ExceedsBreaker))
    } else {
        Ok(())
    }
}

/// Reject a calculated quantity that overflowed.
///
/// Each value passes [`check_value`] on its own, but together they can still
/// push a result past `f64`. The blame goes to the input furthest from 1 on
/// a log scale (the first such input on a tie).
pub fn check_result(value: f64, inputs: &[(Field, f64)]) -> CalcResult<f64> {
    if value.is_finite() {
        return Ok(value);
    }
    let field = inputs
        .iter()
        .map(|&(field, input)| (field, input.abs().ln().abs()))
        .fold(None, |worst: Option<(Field, f64)>, (field, magnitude)| match worst {
            Some((_, largest)) if largest >= magnitude => worst,
            _ => Some((field, magnitude)),
        })
        .map(|(field, _)| field)
        .ok_or_else(|| CalcError::internal("non-finite result with no inputs"))?;
    Err(ValidationError::with_message(
        field,
        ValidationErrorKind::OutOfRange,
        "Value is too extreme to calculate with",
    )
    .into())
}

/// Raw form text keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    values: BTreeMap<Field, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, raw: impl Into<String>) -> Self {
        self.set(field, raw);
        self
    }

    pub fn set(&mut self, field: Field, raw: impl Into<String>) {
        self.values.insert(field, raw.into());
    }

    /// Raw text for `field`; missing fields read as blank
    pub fn raw(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Build from string keys (e.g., `"reductionFactor"`). Unknown keys are rejected.
    pub fn from_pairs<K, V, I>(pairs: I) -> CalcResult<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut form = FormInput::new();
        for (key, value) in pairs {
            form.set(Field::from_id(key.as_ref())?, value);
        }
        Ok(form)
    }
}

/// Parsed values from a form that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedForm {
    values: BTreeMap<Field, f64>,
}

impl ValidatedForm {
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Value of a required field
    pub fn require(&self, field: Field) -> CalcResult<f64> {
        self.get(field).ok_or_else(|| CalcError::Internal {
            message: format!("validated form has no value for {}", field.id()),
        })
    }

    /// Value of an optional field, or `default` when it was left blank
    pub fn get_or(&self, field: Field, default: f64) -> f64 {
        self.get(field).unwrap_or(default)
    }
}

/// Fields a form needs checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFields<'a> {
    /// Must be present
    pub required: &'a [Field],
    /// Checked only when non-blank
    pub optional: &'a [Field],
}

impl FormFields<'_> {
    fn contains(&self, field: Field) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }
}

fn check_field(form: &FormInput, field: Field, required: bool) -> Option<Result<f64, ValidationError>> {
    let raw = form.raw(field);
    if !required && raw.trim().is_empty() {
        return None;
    }
    let result = validate(field, raw).and_then(|value| {
        if field == Field::McbCurrent {
            // Only compare against a breaker value that is itself valid
            if let Ok(breaker) = validate(Field::BreakerCurrent, form.raw(Field::BreakerCurrent)) {
                check_mcb_against_breaker(value, breaker)?;
            }
        }
        Ok(value)
    });
    Some(result)
}

/// Full-form pass: every listed field is checked and every error returned.
pub fn validate_form(form: &FormInput, fields: FormFields<'_>) -> Result<ValidatedForm, ValidationErrors> {
    let mut values = BTreeMap::new();
    let mut errors = ValidationErrors::new();

    let listed = fields
        .required
        .iter()
        .map(|&f| (f, true))
        .chain(fields.optional.iter().map(|&f| (f, false)));
    for (field, required) in listed {
        match check_field(form, field, required) {
            Some(Ok(value)) => {
                values.insert(field, value);
            }
            Some(Err(error)) => errors.insert(error),
            None => {}
        }
    }

    if errors.is_empty() {
        Ok(ValidatedForm { values })
    } else {
        Err(errors)
    }
}

/// Live form: validates each field as it is edited.
///
/// Editing either the breaker or the MCB rating re-checks the MCB field, so
/// an `ExceedsBreaker` error appears or clears no matter which side changed.
#[derive(Debug, Clone)]
pub struct FormState<'a> {
    fields: FormFields<'a>,
    input: FormInput,
    errors: ValidationErrors,
}

impl<'a> FormState<'a> {
    pub fn new(fields: FormFields<'a>) -> Self {
        FormState {
            fields,
            input: FormInput::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Record an edit and refresh the affected errors.
    pub fn set(&mut self, field: Field, raw: impl Into<String>) -> &ValidationErrors {
        self.input.set(field, raw);
        self.refresh(field);
        // MCB is re-checked on breaker edits once the user has typed into it
        if field == Field::BreakerCurrent && !self.input.raw(Field::McbCurrent).trim().is_empty() {
            self.refresh(Field::McbCurrent);
        }
        &self.errors
    }

    fn refresh(&mut self, field: Field) {
        let required = self.fields.required.contains(&field);
        if !self.fields.contains(field) {
            return;
        }
        match check_field(&self.input, field, required) {
            Some(Err(error)) => self.errors.insert(error),
            _ => {
                self.errors.clear(field);
            }
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Run the full-form pass (including untouched required fields).
    pub fn submit(&mut self) -> Result<ValidatedForm, ValidationErrors> {
        let result = validate_form(&self.input, self.fields);
        self.errors = match &result {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors.clone(),
        };
        result
    }
}
