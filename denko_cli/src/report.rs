//! Plain-text output for each command.

use denko_core::calculations::{
    LoadCurrentResult, ProtectionCheck, ProtectionResult, VoltageDropRateResult, VoltageDropResult, WireSizeResult,
};
use denko_core::equations::MAX_DROP_RATE_PERCENT;
use denko_core::materials::{AmpacityRow, ConductorCountBracket, ConduitSize, ConduitType, ConduitWire, Insulation, TemperatureCorrection};

const RULE: &str = "═══════════════════════════════════════";

fn banner(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[NG]" }
}

/// Drop rate as displayed. A rate that rounds down onto the limit but fails
/// it says so, instead of printing "3.0 % (limit 3 %) [NG]" alone.
fn rate_text(rate_percent: f64, limit_percent: f64, acceptable: bool) -> String {
    if !acceptable && rate_percent <= limit_percent {
        format!("{:.1} % (over the {} % limit before rounding)", rate_percent, limit_percent)
    } else {
        format!("{:.1} % (limit {} %)", rate_percent, limit_percent)
    }
}

pub fn voltage_drop(result: &VoltageDropResult) {
    banner("VOLTAGE DROP");
    println!("Circuit:  {}", result.circuit_label);
    println!("Formula:  {}", result.formula);
    println!("  L = {} m, I = {} A, S = {} mm²", result.length_m, result.current_a, result.wire_size_mm2);
    println!();
    println!("  e = {:.3} V", result.voltage_drop_v);
}

pub fn wire_size(result: &WireSizeResult) {
    banner("WIRE SIZE");
    println!("Circuit:  {} (K = {})", result.circuit_label, result.coefficient);
    println!("Formula:  {}", result.formula);
    println!("  L = {} m, I = {} A, e = {} V", result.length_m, result.current_a, result.voltage_drop_v);
    println!();
    println!("  S = {:.3} mm²", result.required_size_mm2);
    match result.recommended_size_mm2 {
        Some(size) => println!("  Use {} mm² or larger", size),
        None => println!("  Exceeds the largest common size (250 mm²)"),
    }
}

pub fn voltage_drop_rate(result: &VoltageDropRateResult) {
    banner("VOLTAGE DROP RATE");
    println!("Circuit:  {} (K = {})", result.circuit_label, result.coefficient);
    println!(
        "  L = {} m, I = {} A, S = {} mm², V = {} V",
        result.length_m, result.current_a, result.wire_size_mm2, result.voltage_v
    );
    println!();
    println!("  e = {:.3} V", result.voltage_drop_v);
    println!(
        "  ε = {} {}",
        rate_text(result.drop_rate_percent, result.limit_percent, result.acceptable),
        status_icon(result.acceptable)
    );
}

pub fn load_current(result: &LoadCurrentResult) {
    banner("LOAD CURRENT");
    println!("Supply:   {}", result.supply_label);
    println!("Formula:  {}", result.formula);
    println!("  P = {} kW, cosφ = {}, V = {} V", result.load_kw, result.power_factor, result.voltage_v);
    println!();
    println!("  I = {:.0} A ({:.2} A)", result.load_current_a, result.exact_current_a);
}

pub fn protection(result: &ProtectionResult) {
    banner("CIRCUIT PROTECTION");
    println!("Supply:   {}", result.supply_label);
    println!("Wire:     {}", result.gauge_label);
    println!();
    println!("  Load current      {:.0} A", result.load_current_a);
    println!(
        "  Allowable current {:.1} A ({} A × {} × {})",
        result.allowable_ampacity_a, result.base_ampacity_a, result.temperature_factor, result.reduction_factor
    );
    println!(
        "  Voltage drop      {:.3} V, {}",
        result.voltage_drop_v,
        rate_text(result.drop_rate_percent, MAX_DROP_RATE_PERCENT, result.verdict.drop_acceptable)
    );
    println!();
    println!("Checks:");
    for check in ProtectionCheck::ALL {
        println!("  {:<40} {}", check.description(), status_icon(result.verdict.passed(check)));
    }
    println!();
    println!("{}", RULE);
    println!("  RESULT: {}", if result.is_valid { "PASS" } else { "FAIL" });
    println!("{}", RULE);
}

pub fn ampacity(rows: &[AmpacityRow]) {
    let Some(first) = rows.first() else {
        return;
    };
    banner(&format!(
        "AMPACITY {} at {} °C (× {})",
        first.insulation, first.temperature_c, first.correction_factor
    ));
    print!("{:<10} {:>8}", "Size", "Open");
    for bracket in ConductorCountBracket::ALL {
        print!(" {:>7}", bracket.label());
    }
    println!();
    for row in rows {
        let marker = if row.recommended { ' ' } else { '*' };
        print!("{:<9}{} {:>8.1}", row.label, marker, row.outdoor_a);
        for amps in row.indoor_a {
            print!(" {:>7.1}", amps);
        }
        match row.composition {
            Some(strands) => println!("  {}", strands),
            None => println!(),
        }
    }
    if rows.iter().any(|row| !row.recommended) {
        println!();
        println!("* not recommended for general wiring");
    }
}

pub fn temperature(insulation: Insulation, table: &[TemperatureCorrection]) {
    banner(&format!("TEMPERATURE CORRECTION {}", insulation));
    for row in table {
        println!("  {:>3} °C   {:.2}", row.temperature_c, row.factor);
    }
}

pub fn conduit_sizes(conduit: ConduitType, wire: ConduitWire, sizes: &[ConduitSize]) {
    banner(&format!("{} - {}", conduit.display_name().to_uppercase(), wire));
    println!("{:<8} {:>8} {:>8} {:>6}", "Size", "OD mm", "ID mm", "Max");
    for size in sizes {
        println!(
            "{:<8} {:>8.1} {:>8.1} {:>6}",
            size.label,
            size.outer_diameter_mm,
            size.inner_diameter_mm,
            size.capacity(wire)
        );
    }
}

pub fn smallest_conduit(conduit: ConduitType, wire: ConduitWire, count: u16, found: Option<&ConduitSize>) {
    match found {
        Some(size) => println!(
            "{} × {}: {} {} (holds up to {})",
            count,
            wire,
            conduit,
            size.label,
            size.capacity(wire)
        ),
        None => println!("{} × {}: no {} size is large enough", count, wire, conduit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_text_explains_rounded_failure() {
        assert_eq!(rate_text(1.3, 3.0, true), "1.3 % (limit 3 %)");
        assert_eq!(rate_text(3.2, 3.0, false), "3.2 % (limit 3 %)");
        assert_eq!(rate_text(3.0, 3.0, false), "3.0 % (over the 3 % limit before rounding)");
        assert_eq!(rate_text(3.0, 3.0, true), "3.0 % (limit 3 %)");
    }
}
