//! # Equation Registry
//!
//! Central registry of the wiring equations used in calculations.
//! Each equation carries its formula, variable definitions and reference,
//! which backs the "show formula" panel and the generated `EQUATIONS.md`.
//!
//! ## Usage
//!
//! ```rust
//! use denko_core::equations::registry::Equation;
//!
//! let meta = Equation::VoltageDrop.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! assert_eq!(meta.source_function, "voltage_drop");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a wiring code or textbook source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Interior Wiring Code (JEAC 8001)
    InteriorWiringCode {
        year: u16,
        section: &'static str,
    },
    /// Interpretation of the Technical Standards for Electrical Equipment
    TechnicalStandards {
        article: &'static str,
    },
    /// Basic circuit theory (no specific code reference needed)
    CircuitTheory,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::InteriorWiringCode { year, section } => {
                format!("JEAC 8001-{} {}", year, section)
            }
            CodeReference::TechnicalStandards { article } => {
                format!("Technical Standards Interpretation, Article {}", article)
            }
            CodeReference::CircuitTheory => "Circuit Theory".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::InteriorWiringCode { .. } => "JEAC 8001",
            CodeReference::TechnicalStandards { .. } => "Technical Standards",
            CodeReference::CircuitTheory => "Theory",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Voltage drop and wire sizing
    VoltageDrop,
    /// Load current
    LoadCurrent,
    /// Ampacity derating
    Ampacity,
    /// Conductor geometry
    Conductor,
    /// Pass/fail checks
    DesignChecks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::VoltageDrop => "Voltage Drop",
            EquationCategory::LoadCurrent => "Load Current",
            EquationCategory::Ampacity => "Ampacity",
            EquationCategory::Conductor => "Conductor Geometry",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order in generated documents (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Conductor => 1,
            EquationCategory::LoadCurrent => 2,
            EquationCategory::VoltageDrop => 3,
            EquationCategory::Ampacity => 4,
            EquationCategory::DesignChecks => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "e", "L", "S")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "V", "m", "mm²")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for an equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used in Denko.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// e = K × L × I / (1000 × S)
    VoltageDrop,
    /// S = K × L × I / (1000 × e)
    RequiredWireSize,
    /// ε = e / V × 100
    VoltageDropRate,
    /// I = 1000 × P / (cosφ × V)
    LoadCurrentSinglePhase,
    /// I = 1000 × P / (cosφ × √3 × V)
    LoadCurrentThreePhase,
    /// I' = I × k_t × k_r
    DeratedAmpacity,
    /// S = π d² / 4
    SolidConductorArea,
    /// I_B ≥ I_L, I_MCB ≥ I_L, I' ≥ I_MCB, ε ≤ 3 %
    ProtectionCoordination,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::VoltageDrop => EquationMetadata {
                name: "Voltage Drop",
                description: "Voltage lost along a copper conductor run",
                formula_plain: "e = K × L × I / (1000 × S)",
                reference: CodeReference::InteriorWiringCode { year: 2022, section: "Appendix 1-1" },
                variables: vec![
                    Variable::new("e", "Voltage drop", "V"),
                    Variable::new("K", "Circuit coefficient (35.6 / 30.8 / 17.8)", "-"),
                    Variable::new("L", "One-way wire length", "m"),
                    Variable::new("I", "Load current", "A"),
                    Variable::new("S", "Conductor cross-section", "mm²"),
                ],
                assumptions: vec![
                    "Annealed copper conductor",
                    "Reactance neglected",
                    "K = 17.8 results are line-to-neutral",
                ],
                category: EquationCategory::VoltageDrop,
                source_module: "equations/electrical.rs",
                source_function: "voltage_drop",
            },

            Equation::RequiredWireSize => EquationMetadata {
                name: "Required Wire Size",
                description: "Smallest cross-section that keeps the drop within the allowance",
                formula_plain: "S = K × L × I / (1000 × e)",
                reference: CodeReference::InteriorWiringCode { year: 2022, section: "Appendix 1-1" },
                variables: vec![
                    Variable::new("S", "Required cross-section", "mm²"),
                    Variable::new("K", "Circuit coefficient (35.6 / 30.8 / 17.8)", "-"),
                    Variable::new("L", "One-way wire length", "m"),
                    Variable::new("I", "Load current", "A"),
                    Variable::new("e", "Allowed voltage drop", "V"),
                ],
                assumptions: vec!["Annealed copper conductor", "Reactance neglected"],
                category: EquationCategory::VoltageDrop,
                source_module: "equations/electrical.rs",
                source_function: "required_wire_size",
            },

            Equation::VoltageDropRate => EquationMetadata {
                name: "Voltage Drop Rate",
                description: "Voltage drop as a percentage of the reference voltage",
                formula_plain: "ε = e / V × 100",
                reference: CodeReference::InteriorWiringCode { year: 2022, section: "1310-1" },
                variables: vec![
                    Variable::new("ε", "Voltage drop rate", "%"),
                    Variable::new("e", "Voltage drop", "V"),
                    Variable::new("V", "Reference voltage", "V"),
                ],
                assumptions: vec!["Line-to-neutral drops are compared against the phase voltage"],
                category: EquationCategory::VoltageDrop,
                source_module: "equations/electrical.rs",
                source_function: "voltage_drop_rate",
            },

            Equation::LoadCurrentSinglePhase => EquationMetadata {
                name: "Load Current (Single-Phase)",
                description: "Current drawn by a DC or single-phase load",
                formula_plain: "I = 1000 × P / (cosφ × V)",
                reference: CodeReference::CircuitTheory,
                variables: vec![
                    Variable::new("I", "Load current", "A"),
                    Variable::new("P", "Load", "kW"),
                    Variable::new("cosφ", "Power factor", "-"),
                    Variable::new("V", "Nominal voltage", "V"),
                ],
                assumptions: vec!["Reported to the nearest whole ampere"],
                category: EquationCategory::LoadCurrent,
                source_module: "equations/electrical.rs",
                source_function: "load_current",
            },

            Equation::LoadCurrentThreePhase => EquationMetadata {
                name: "Load Current (Three-Phase)",
                description: "Line current drawn by a balanced three-phase load",
                formula_plain: "I = 1000 × P / (cosφ × √3 × V)",
                reference: CodeReference::CircuitTheory,
                variables: vec![
                    Variable::new("I", "Line current", "A"),
                    Variable::new("P", "Load", "kW"),
                    Variable::new("cosφ", "Power factor", "-"),
                    Variable::new("V", "Line-to-line voltage", "V"),
                ],
                assumptions: vec!["Balanced load", "Reported to the nearest whole ampere"],
                category: EquationCategory::LoadCurrent,
                source_module: "equations/electrical.rs",
                source_function: "load_current",
            },

            Equation::DeratedAmpacity => EquationMetadata {
                name: "Derated Ampacity",
                description: "Tabulated ampacity corrected for ambient temperature and installation",
                formula_plain: "I' = I × k_t × k_r",
                reference: CodeReference::TechnicalStandards { article: "146" },
                variables: vec![
                    Variable::new("I'", "Corrected ampacity", "A"),
                    Variable::new("I", "Tabulated ampacity", "A"),
                    Variable::new("k_t", "Temperature correction factor", "-"),
                    Variable::new("k_r", "Reduction factor", "-"),
                ],
                assumptions: vec!["Table values at 30 °C ambient", "Rounded to 0.1 A"],
                category: EquationCategory::Ampacity,
                source_module: "equations/electrical.rs",
                source_function: "derated_ampacity",
            },

            Equation::SolidConductorArea => EquationMetadata {
                name: "Solid Conductor Area",
                description: "Cross-section of a solid round conductor from its diameter",
                formula_plain: "S = π × d² / 4",
                reference: CodeReference::CircuitTheory,
                variables: vec![
                    Variable::new("S", "Cross-section", "mm²"),
                    Variable::new("d", "Conductor diameter", "mm"),
                ],
                assumptions: vec!["Circular conductor"],
                category: EquationCategory::Conductor,
                source_module: "equations/electrical.rs",
                source_function: "solid_conductor_area",
            },

            Equation::ProtectionCoordination => EquationMetadata {
                name: "Protection Coordination",
                description: "Breaker, MCB, conductor and voltage-drop checks for one branch circuit",
                formula_plain: "I_B ≥ I_L, I_MCB ≥ I_L, I' ≥ I_MCB, ε ≤ 3 %",
                reference: CodeReference::TechnicalStandards { article: "149" },
                variables: vec![
                    Variable::new("I_B", "Breaker rated current", "A"),
                    Variable::new("I_MCB", "MCB rated current", "A"),
                    Variable::new("I_L", "Load current", "A"),
                    Variable::new("I'", "Corrected conductor ampacity", "A"),
                    Variable::new("ε", "Voltage drop rate", "%"),
                ],
                assumptions: vec!["All four checks are reported independently"],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/protection.rs",
                source_function: "judge",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![VoltageDrop, LoadCurrent, Ampacity, Conductor, DesignChecks];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::SolidConductorArea,
    Equation::LoadCurrentSinglePhase,
    Equation::LoadCurrentThreePhase,
    Equation::VoltageDrop,
    Equation::RequiredWireSize,
    Equation::VoltageDropRate,
    Equation::DeratedAmpacity,
    Equation::ProtectionCoordination,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference document as Markdown.
///
/// Used by the `gen-equations` binary to write `EQUATIONS.md`.
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Denko Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the Denko calculators.
Each equation includes its formula, reference, source location and assumptions.

## Circuit Coefficients

| Circuit | K |
|---------|---|
| DC / single-phase 2-wire | 35.6 |
| Three-phase 3-wire | 30.8 |
| DC 3-wire / single-phase 3-wire / three-phase 4-wire | 17.8 |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 8);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        assert_eq!(
            Equation::VoltageDrop.metadata().formula_plain,
            "e = K × L × I / (1000 × S)"
        );
    }

    #[test]
    fn test_code_reference_citation() {
        let code = CodeReference::InteriorWiringCode { year: 2022, section: "1310-1" };
        assert_eq!(code.citation(), "JEAC 8001-2022 1310-1");
        assert_eq!(CodeReference::CircuitTheory.short_form(), "Theory");
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Equation::all_categories() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted, "Categories should be sorted by sort_order");
    }

    #[test]
    fn test_generate_markdown() {
        let md = generate_equations_markdown();
        assert!(md.starts_with("# Denko Equations Reference"));
        assert!(md.contains("### Voltage Drop Rate"));
        assert!(md.contains("| L | One-way wire length | m |"));
        assert!(md.contains("- **Total Equations:** 8"));
    }
}
