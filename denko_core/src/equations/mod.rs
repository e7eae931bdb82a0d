//! # Wiring Equations
//!
//! All formulas used by the calculators live here. Keeping them in one
//! place makes them easy to check against the wiring code tables and keeps
//! rounding consistent across calculation types.
//!
//! ## Modules
//!
//! - [`electrical`] - Voltage drop, wire size, drop rate, load current, derating
//! - [`registry`] - Equation metadata for formula display and `EQUATIONS.md`

pub mod electrical;
pub mod registry;

pub use electrical::{
    derated_ampacity,
    load_current,
    required_wire_size,
    round_half_away,
    solid_conductor_area,
    voltage_drop,
    voltage_drop_rate,
    MAX_DROP_RATE_PERCENT,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
