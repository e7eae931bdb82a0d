//! # denko_core - Electrical Wiring Calculation Engine
//!
//! `denko_core` is the calculation engine behind Denko, a pocket reference
//! for electricians. It provides the wiring formulas, the conductor and
//! conduit reference tables, and form validation behind every calculator
//! screen. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Every invalid field reported at once, not just the first
//! - **Closed Tables**: Reference data keyed by enums, so lookups cannot miss
//!
//! ## Quick Start
//!
//! ```rust
//! use denko_core::calculations::{evaluate, CalculationKind, CalculationOutput, CalculationRequest};
//!
//! let request = CalculationRequest::new(CalculationKind::VoltageDrop)
//!     .with_circuit("dc_single")
//!     .with_field("length", "50")
//!     .with_field("current", "20")
//!     .with_field("wireSize", "5.5");
//!
//! match evaluate(&request).unwrap() {
//!     CalculationOutput::VoltageDrop(result) => assert_eq!(result.voltage_drop_v, 6.473),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Voltage drop, wire size, drop rate, load current, protection checks
//! - [`circuits`] - Circuit topologies and power supply types
//! - [`equations`] - Pure formulas and the equation registry
//! - [`materials`] - Ampacity, temperature correction and conduit tables
//! - [`validation`] - Form field rules
//! - [`preferences`] - Theme and calculator defaults with atomic saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod circuits;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod preferences;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculationKind, CalculationOutput, CalculationRequest};
pub use circuits::{CircuitType, Phase, PowerSupplyType};
pub use errors::{CalcError, CalcResult, ValidationError, ValidationErrorKind, ValidationErrors};
pub use preferences::{load_preferences, save_preferences, Preferences, Theme};
pub use validation::{Field, FormInput};
