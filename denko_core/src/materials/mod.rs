//! # Reference Tables
//!
//! Static wiring reference data. Every table is compiled in and never
//! mutated; keys are closed enums so a well-formed lookup cannot miss.
//!
//! ## Tables
//!
//! - **Ampacity**: IV and HIV conductors, solid and stranded, open wiring
//!   and seven indoor conductor-count brackets
//! - **Temperature**: ambient correction factors per insulation class
//! - **Conduit**: maximum IV conductor counts for PF, thin steel and CD conduit
//!
//! ## Example
//!
//! ```rust
//! use denko_core::materials::{
//!     corrected_ampacity, smallest_conduit, AmbientTemperature, ConduitType, ConduitWire,
//!     Installation, Insulation, WireGauge,
//! };
//!
//! let amps = corrected_ampacity(
//!     Insulation::Iv,
//!     WireGauge::Stranded5_5,
//!     Installation::Indoor { conductors: 3 },
//!     AmbientTemperature::C30,
//! );
//! assert_eq!(amps, 34.0);
//!
//! let conduit = smallest_conduit(ConduitType::Pf, ConduitWire::Iv5_5, 6).unwrap();
//! assert_eq!(conduit.label, "22mm");
//! ```

pub mod ampacity;
pub mod conduit;
pub mod temperature;

pub use ampacity::{
    ampacity_record, ampacity_row, ampacity_table, base_ampacity, corrected_ampacity,
    AmpacityRecord, AmpacityRow, ConductorCountBracket, ConductorShape, Installation, Insulation,
    WireGauge,
};
pub use conduit::{max_conductors, smallest_conduit, ConduitSize, ConduitType, ConduitWire};
pub use temperature::{correction_table, AmbientTemperature, TemperatureCorrection};

/// Quick-pick conductor sizes offered by the calculators (mm²)
pub const COMMON_WIRE_SIZES: [f64; 12] = [
    2.0, 3.5, 5.5, 8.0, 14.0, 22.0, 38.0, 60.0, 100.0, 150.0, 200.0, 250.0,
];

/// Smallest common size that is at least `area_mm2`
pub fn next_common_size(area_mm2: f64) -> Option<f64> {
    COMMON_WIRE_SIZES.into_iter().find(|&s| s >= area_mm2)
}
