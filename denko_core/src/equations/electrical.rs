//! # Electrical Formulas
//!
//! The closed-form wiring formulas behind every calculator screen.
//! All functions are pure: identical inputs give bit-identical outputs.
//!
//! ## Notation
//!
//! - `K` = Voltage-drop coefficient of the circuit topology (35.6, 30.8, 17.8)
//! - `L` = One-way wire length (m)
//! - `I` = Load current (A)
//! - `S` = Conductor cross-section (mm²)
//! - `e` = Voltage drop (V)
//! - `V` = Nominal voltage (V)
//! - `P` = Load (kW)
//! - `cosφ` = Power factor
//!
//! ## Rounding
//!
//! Intermediate values stay in full `f64` precision. Results are rounded
//! once, half away from zero, by the calculation that reports them:
//!
//! | Quantity          | Decimals |
//! |-------------------|----------|
//! | Voltage drop      | 3        |
//! | Wire size         | 3        |
//! | Drop rate         | 1        |
//! | Corrected ampacity| 1        |
//! | Load current      | 0        |
//!
//! Inputs are expected to be validated (strictly positive) before they
//! reach these functions. See [`crate::validation`].

use std::f64::consts::PI;

use crate::circuits::Phase;

/// Decimal places reported for voltage drop (V)
pub const DROP_DECIMALS: u32 = 3;
/// Decimal places reported for required wire size (mm²)
pub const WIRE_SIZE_DECIMALS: u32 = 3;
/// Decimal places reported for voltage-drop rate (%)
pub const RATE_DECIMALS: u32 = 1;
/// Decimal places reported for corrected ampacity (A)
pub const AMPACITY_DECIMALS: u32 = 1;
/// Decimal places reported for load current (A)
pub const LOAD_CURRENT_DECIMALS: u32 = 0;

/// Maximum acceptable voltage-drop rate (%). Fixed, not user-configurable.
pub const MAX_DROP_RATE_PERCENT: f64 = 3.0;

/// Voltage drop along a conductor run.
///
/// # Formula
/// - e = K × L × I / (1000 × S)
///
/// # Arguments
/// * `coefficient` - K for the circuit topology
/// * `length_m` - One-way length in meters
/// * `current_a` - Current in amperes
/// * `area_mm2` - Conductor cross-section in mm²
///
/// # Returns
/// Voltage drop in volts (unrounded)
#[inline]
pub fn voltage_drop(coefficient: f64, length_m: f64, current_a: f64, area_mm2: f64) -> f64 {
    coefficient * length_m * current_a / (1000.0 * area_mm2)
}

/// Conductor cross-section needed to keep the drop at or below `drop_v`.
///
/// # Formula
/// - S = K × L × I / (1000 × e)
#[inline]
pub fn required_wire_size(coefficient: f64, length_m: f64, current_a: f64, drop_v: f64) -> f64 {
    coefficient * length_m * current_a / (1000.0 * drop_v)
}

/// Voltage drop as a percentage of the nominal voltage.
///
/// # Formula
/// - ε = e / V × 100
#[inline]
pub fn voltage_drop_rate(drop_v: f64, nominal_voltage: f64) -> f64 {
    drop_v / nominal_voltage * 100.0
}

/// Load current drawn by a load of `load_kw`.
///
/// # Formulas
/// - Single-phase / DC: I = 1000 × P / (cosφ × V)
/// - Three-phase: I = 1000 × P / (cosφ × √3 × V)
#[inline]
pub fn load_current(load_kw: f64, power_factor: f64, nominal_voltage: f64, phase: Phase) -> f64 {
    let watts = 1000.0 * load_kw;
    match phase {
        Phase::Single => watts / (power_factor * nominal_voltage),
        Phase::Three => watts / (power_factor * 3f64.sqrt() * nominal_voltage),
    }
}

/// Base ampacity derated by temperature and installation factors.
///
/// # Formula
/// - I' = I × k_t × k_r
#[inline]
pub fn derated_ampacity(base_a: f64, temperature_factor: f64, reduction_factor: f64) -> f64 {
    base_a * temperature_factor * reduction_factor
}

/// Cross-section of a solid round conductor.
///
/// # Formula
/// - S = π × d² / 4
#[inline]
pub fn solid_conductor_area(diameter_mm: f64) -> f64 {
    PI * diameter_mm * diameter_mm / 4.0
}

/// Round to `decimals` places, half away from zero.
///
/// ```rust
/// use denko_core::equations::electrical::round_half_away;
///
/// assert_eq!(round_half_away(6.4727, 3), 6.473);
/// assert_eq!(round_half_away(2.25, 1), 2.3);
/// assert_eq!(round_half_away(-2.25, 1), -2.3);
/// assert_eq!(round_half_away(33.333, 0), 33.0);
/// ```
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    // Past 2^53 there is no fractional part left to round
    if !scaled.is_finite() {
        return value;
    }
    // f64::round already rounds halves away from zero
    scaled.round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    const COEFFICIENTS: [f64; 3] = [35.6, 30.8, 17.8];

    #[test]
    fn test_voltage_drop_known_value() {
        // 35.6 × 50 × 20 / (1000 × 5.5) = 6.4727...
        let e = voltage_drop(35.6, 50.0, 20.0, 5.5);
        assert!((e - 6.472727).abs() < 1e-6);
        assert_eq!(round_half_away(e, DROP_DECIMALS), 6.473);
    }

    #[test]
    fn test_required_wire_size_known_value() {
        // 30.8 × 100 × 15 / (1000 × 5) = 9.24
        let s = required_wire_size(30.8, 100.0, 15.0, 5.0);
        assert!((s - 9.24).abs() < 1e-9);
    }

    #[test]
    fn test_load_current_single_phase() {
        // 1000 × 3 / (0.9 × 100) = 33.33 → 33
        let i = load_current(3.0, 0.9, 100.0, Phase::Single);
        assert!((i - 33.3333).abs() < 1e-3);
        assert_eq!(round_half_away(i, LOAD_CURRENT_DECIMALS), 33.0);
    }

    #[test]
    fn test_load_current_three_phase() {
        // 1000 × 10 / (0.85 × √3 × 200) = 33.96
        let i = load_current(10.0, 0.85, 200.0, Phase::Three);
        assert!((i - 33.962).abs() < 1e-3);
    }

    #[test]
    fn test_voltage_drop_monotonic() {
        let values = [0.5, 1.0, 2.0, 5.5, 14.0, 38.0, 100.0, 250.0];
        for k in COEFFICIENTS {
            for pair in values.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                // Increasing in length and current
                assert!(voltage_drop(k, hi, 10.0, 5.5) > voltage_drop(k, lo, 10.0, 5.5));
                assert!(voltage_drop(k, 30.0, hi, 5.5) > voltage_drop(k, 30.0, lo, 5.5));
                // Decreasing in area
                assert!(voltage_drop(k, 30.0, 10.0, hi) < voltage_drop(k, 30.0, 10.0, lo));
            }
        }
    }

    #[test]
    fn test_wire_size_inverts_voltage_drop() {
        let lengths = [1.0, 12.5, 50.0, 300.0];
        let currents = [0.5, 15.0, 60.0, 200.0];
        let areas = [0.9, 2.0, 5.5, 22.0, 150.0];
        for k in COEFFICIENTS {
            for &l in &lengths {
                for &i in &currents {
                    for &s in &areas {
                        let e = voltage_drop(k, l, i, s);
                        let back = required_wire_size(k, l, i, e);
                        assert!((back - s).abs() < 1e-3, "k={} l={} i={} s={} → {}", k, l, i, s, back);
                    }
                }
            }
        }
    }

    #[test]
    fn test_drop_rate_zero_and_increasing() {
        assert_eq!(voltage_drop_rate(0.0, 100.0), 0.0);
        let mut previous = voltage_drop_rate(0.0, 200.0);
        for step in 1..50 {
            let rate = voltage_drop_rate(step as f64 * 0.37, 200.0);
            assert!(rate > previous);
            previous = rate;
        }
    }

    #[test]
    fn test_formulas_are_deterministic() {
        let a = voltage_drop(30.8, 73.1, 17.3, 3.5);
        let b = voltage_drop(30.8, 73.1, 17.3, 3.5);
        assert_eq!(a.to_bits(), b.to_bits());

        let a = load_current(2.2, 0.8, 200.0, Phase::Three);
        let b = load_current(2.2, 0.8, 200.0, Phase::Three);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_derated_ampacity() {
        // 35 A × 0.82 (40 °C) = 28.7 A
        let i = derated_ampacity(35.0, 0.82, 1.0);
        assert_eq!(round_half_away(i, AMPACITY_DECIMALS), 28.7);
        let i = derated_ampacity(35.0, 1.0, 0.7);
        assert!((i - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_solid_conductor_area() {
        // 2.0 mm solid ≈ 3.14 mm²
        assert!((solid_conductor_area(2.0) - 3.1416).abs() < 1e-4);
        assert!((solid_conductor_area(1.6) - 2.0106).abs() < 1e-4);
    }

    #[test]
    fn test_rounding_applied_once() {
        // Rounding the intermediate drop first would shift the rate
        let e = voltage_drop(35.6, 47.0, 18.0, 3.5);
        let rate_once = round_half_away(voltage_drop_rate(e, 100.0), RATE_DECIMALS);
        assert_eq!(rate_once, 8.6);
    }

    #[test]
    fn test_rounding_near_f64_max() {
        assert_eq!(round_half_away(1.0e308, 3), 1.0e308);
        assert_eq!(round_half_away(-1.0e308, 1), -1.0e308);
        assert!(round_half_away(f64::MAX, 3).is_finite());
    }
}
