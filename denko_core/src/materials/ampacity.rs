//! Conductor Ampacity Tables (IV / HIV)
//!
//! Allowable current for 600 V PVC insulated wire (IV, 60 °C) and
//! heat-resistant PVC wire (HIV, 75 °C) at 30 °C ambient. Each gauge has an
//! open-wiring (outdoor) value and seven indoor values keyed by how many
//! conductors share the conduit or bundle.
//!
//! Gauges and brackets are closed enums indexing fixed arrays, so a lookup
//! cannot miss at runtime.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::equations::electrical::{derated_ampacity, round_half_away, solid_conductor_area, AMPACITY_DECIMALS};
use crate::errors::{CalcError, CalcResult};
use crate::materials::temperature::AmbientTemperature;

/// Insulation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Insulation {
    /// 600 V vinyl insulated wire, 60 °C
    #[default]
    #[serde(rename = "IV")]
    Iv,
    /// 600 V heat-resistant vinyl insulated wire, 75 °C
    #[serde(rename = "HIV")]
    Hiv,
}

impl Insulation {
    /// All insulation classes for UI selection
    pub const ALL: [Insulation; 2] = [Insulation::Iv, Insulation::Hiv];

    /// Short code (e.g., "IV")
    pub fn code(&self) -> &'static str {
        match self {
            Insulation::Iv => "IV",
            Insulation::Hiv => "HIV",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Insulation::Iv => "IV (600 V PVC, 60 °C)",
            Insulation::Hiv => "HIV (600 V heat-resistant PVC, 75 °C)",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "IV" => Ok(Insulation::Iv),
            "HIV" | "HEAT-RESISTANT" => Ok(Insulation::Hiv),
            _ => Err(CalcError::unknown_identifier("insulation", s)),
        }
    }

    fn table(&self) -> &'static [AmpacityRecord; WireGauge::COUNT] {
        match self {
            Insulation::Iv => &IV_AMPACITY,
            Insulation::Hiv => &HIV_AMPACITY,
        }
    }
}

impl std::fmt::Display for Insulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Conductor construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductorShape {
    /// Single solid conductor, sized by diameter (mm)
    Solid,
    /// Stranded conductor, sized by nominal cross-section (mm²)
    Stranded,
}

/// Nominal conductor sizes covered by the ampacity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireGauge {
    #[serde(rename = "1.2mm")]
    Solid1_2,
    #[serde(rename = "1.6mm")]
    Solid1_6,
    #[serde(rename = "2.0mm")]
    Solid2_0,
    #[serde(rename = "2.6mm")]
    Solid2_6,
    #[serde(rename = "3.2mm")]
    Solid3_2,
    #[serde(rename = "0.9mm²")]
    Stranded0_9,
    #[serde(rename = "1.25mm²")]
    Stranded1_25,
    #[serde(rename = "2mm²")]
    Stranded2,
    #[serde(rename = "3.5mm²")]
    Stranded3_5,
    #[serde(rename = "5.5mm²")]
    Stranded5_5,
    #[serde(rename = "8mm²")]
    Stranded8,
    #[serde(rename = "14mm²")]
    Stranded14,
    #[serde(rename = "22mm²")]
    Stranded22,
    #[serde(rename = "38mm²")]
    Stranded38,
    #[serde(rename = "60mm²")]
    Stranded60,
    #[serde(rename = "100mm²")]
    Stranded100,
    #[serde(rename = "150mm²")]
    Stranded150,
    #[serde(rename = "200mm²")]
    Stranded200,
    #[serde(rename = "250mm²")]
    Stranded250,
    #[serde(rename = "325mm²")]
    Stranded325,
    #[serde(rename = "400mm²")]
    Stranded400,
    #[serde(rename = "500mm²")]
    Stranded500,
}

impl WireGauge {
    pub const COUNT: usize = 22;

    /// All gauges in table order (solid by diameter, then stranded by area)
    pub const ALL: [WireGauge; WireGauge::COUNT] = [
        WireGauge::Solid1_2,
        WireGauge::Solid1_6,
        WireGauge::Solid2_0,
        WireGauge::Solid2_6,
        WireGauge::Solid3_2,
        WireGauge::Stranded0_9,
        WireGauge::Stranded1_25,
        WireGauge::Stranded2,
        WireGauge::Stranded3_5,
        WireGauge::Stranded5_5,
        WireGauge::Stranded8,
        WireGauge::Stranded14,
        WireGauge::Stranded22,
        WireGauge::Stranded38,
        WireGauge::Stranded60,
        WireGauge::Stranded100,
        WireGauge::Stranded150,
        WireGauge::Stranded200,
        WireGauge::Stranded250,
        WireGauge::Stranded325,
        WireGauge::Stranded400,
        WireGauge::Stranded500,
    ];

    /// Position in the ampacity arrays
    fn index(&self) -> usize {
        *self as usize
    }

    pub fn shape(&self) -> ConductorShape {
        if self.index() < 5 {
            ConductorShape::Solid
        } else {
            ConductorShape::Stranded
        }
    }

    /// Nominal size: diameter (mm) for solid, cross-section (mm²) for stranded
    pub fn nominal_size(&self) -> f64 {
        match self {
            WireGauge::Solid1_2 => 1.2,
            WireGauge::Solid1_6 => 1.6,
            WireGauge::Solid2_0 => 2.0,
            WireGauge::Solid2_6 => 2.6,
            WireGauge::Solid3_2 => 3.2,
            WireGauge::Stranded0_9 => 0.9,
            WireGauge::Stranded1_25 => 1.25,
            WireGauge::Stranded2 => 2.0,
            WireGauge::Stranded3_5 => 3.5,
            WireGauge::Stranded5_5 => 5.5,
            WireGauge::Stranded8 => 8.0,
            WireGauge::Stranded14 => 14.0,
            WireGauge::Stranded22 => 22.0,
            WireGauge::Stranded38 => 38.0,
            WireGauge::Stranded60 => 60.0,
            WireGauge::Stranded100 => 100.0,
            WireGauge::Stranded150 => 150.0,
            WireGauge::Stranded200 => 200.0,
            WireGauge::Stranded250 => 250.0,
            WireGauge::Stranded325 => 325.0,
            WireGauge::Stranded400 => 400.0,
            WireGauge::Stranded500 => 500.0,
        }
    }

    /// Conductor cross-section in mm² (computed from diameter for solid wire)
    pub fn area_mm2(&self) -> f64 {
        match self.shape() {
            ConductorShape::Solid => solid_conductor_area(self.nominal_size()),
            ConductorShape::Stranded => self.nominal_size(),
        }
    }

    /// Strand composition (count / strand diameter), stranded only
    pub fn composition(&self) -> Option<&'static str> {
        match self {
            WireGauge::Stranded0_9 => Some("7/0.4mm"),
            WireGauge::Stranded1_25 => Some("7/0.45mm"),
            WireGauge::Stranded2 => Some("7/0.6mm"),
            WireGauge::Stranded3_5 => Some("7/0.8mm"),
            WireGauge::Stranded5_5 => Some("7/1.0mm"),
            WireGauge::Stranded8 => Some("7/1.2mm"),
            WireGauge::Stranded14 => Some("7/1.6mm"),
            WireGauge::Stranded22 => Some("7/2.0mm"),
            WireGauge::Stranded38 => Some("7/2.6mm"),
            WireGauge::Stranded60 => Some("19/2.0mm"),
            WireGauge::Stranded100 => Some("19/2.6mm"),
            WireGauge::Stranded150 => Some("37/2.3mm"),
            WireGauge::Stranded200 => Some("37/2.6mm"),
            WireGauge::Stranded250 => Some("61/2.3mm"),
            WireGauge::Stranded325 => Some("61/2.6mm"),
            WireGauge::Stranded400 => Some("61/2.9mm"),
            WireGauge::Stranded500 => Some("61/3.2mm"),
            _ => None,
        }
    }

    /// Whether the gauge is suitable for general building wiring.
    ///
    /// 1.2 mm solid and stranded 1.25 mm² and below are for control and
    /// equipment leads only.
    pub fn recommended_for_general_wiring(&self) -> bool {
        !matches!(
            self,
            WireGauge::Solid1_2 | WireGauge::Stranded0_9 | WireGauge::Stranded1_25
        )
    }

    /// Size label as printed in the tables (e.g., "2.0mm", "5.5mm²")
    pub fn label(&self) -> &'static str {
        match self {
            WireGauge::Solid1_2 => "1.2mm",
            WireGauge::Solid1_6 => "1.6mm",
            WireGauge::Solid2_0 => "2.0mm",
            WireGauge::Solid2_6 => "2.6mm",
            WireGauge::Solid3_2 => "3.2mm",
            WireGauge::Stranded0_9 => "0.9mm²",
            WireGauge::Stranded1_25 => "1.25mm²",
            WireGauge::Stranded2 => "2mm²",
            WireGauge::Stranded3_5 => "3.5mm²",
            WireGauge::Stranded5_5 => "5.5mm²",
            WireGauge::Stranded8 => "8mm²",
            WireGauge::Stranded14 => "14mm²",
            WireGauge::Stranded22 => "22mm²",
            WireGauge::Stranded38 => "38mm²",
            WireGauge::Stranded60 => "60mm²",
            WireGauge::Stranded100 => "100mm²",
            WireGauge::Stranded150 => "150mm²",
            WireGauge::Stranded200 => "200mm²",
            WireGauge::Stranded250 => "250mm²",
            WireGauge::Stranded325 => "325mm²",
            WireGauge::Stranded400 => "400mm²",
            WireGauge::Stranded500 => "500mm²",
        }
    }

    /// Gauges of one shape, smallest first
    pub fn of_shape(shape: ConductorShape) -> impl Iterator<Item = WireGauge> {
        WireGauge::ALL.into_iter().filter(move |g| g.shape() == shape)
    }

    /// Parse a size label.
    ///
    /// Accepts the table label ("2.0mm", "3.5mm²") and the common
    /// shorthands "3.5mm2", "3.5sq" and "3.5" (stranded). A bare
    /// "2" resolves to 2 mm² stranded; write "2.0mm" for the solid gauge.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        GAUGE_BY_LABEL
            .get(&normalize_label(s))
            .copied()
            .ok_or_else(|| CalcError::unknown_identifier("wire gauge", s))
    }
}

impl std::fmt::Display for WireGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.composition() {
            Some(strands) => write!(f, "{} ({})", self.label(), strands),
            None => write!(f, "{}", self.label()),
        }
    }
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(' ', "")
        .replace("mm²", "sq")
        .replace("mm2", "sq")
}

static GAUGE_BY_LABEL: Lazy<HashMap<String, WireGauge>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for gauge in WireGauge::ALL {
        map.insert(normalize_label(gauge.label()), gauge);
        if gauge.shape() == ConductorShape::Stranded {
            map.insert(format!("{}", gauge.nominal_size()), gauge);
        } else {
            map.insert(format!("{}mm", gauge.nominal_size()), gauge);
        }
    }
    map
});

/// Indoor conductor-count bracket (number of conductors in the conduit or bundle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConductorCountBracket {
    /// 3 or fewer
    UpToThree,
    Four,
    FiveToSix,
    SevenToFifteen,
    SixteenToForty,
    FortyOneToSixty,
    /// 61 or more
    SixtyOneOrMore,
}

impl ConductorCountBracket {
    pub const ALL: [ConductorCountBracket; 7] = [
        ConductorCountBracket::UpToThree,
        ConductorCountBracket::Four,
        ConductorCountBracket::FiveToSix,
        ConductorCountBracket::SevenToFifteen,
        ConductorCountBracket::SixteenToForty,
        ConductorCountBracket::FortyOneToSixty,
        ConductorCountBracket::SixtyOneOrMore,
    ];

    /// Bracket for a conductor count. Zero is treated as the ≤3 bracket.
    pub fn from_count(conductors: u32) -> Self {
        match conductors {
            0..=3 => ConductorCountBracket::UpToThree,
            4 => ConductorCountBracket::Four,
            5..=6 => ConductorCountBracket::FiveToSix,
            7..=15 => ConductorCountBracket::SevenToFifteen,
            16..=40 => ConductorCountBracket::SixteenToForty,
            41..=60 => ConductorCountBracket::FortyOneToSixty,
            _ => ConductorCountBracket::SixtyOneOrMore,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            ConductorCountBracket::UpToThree => "≤3",
            ConductorCountBracket::Four => "4",
            ConductorCountBracket::FiveToSix => "5-6",
            ConductorCountBracket::SevenToFifteen => "7-15",
            ConductorCountBracket::SixteenToForty => "16-40",
            ConductorCountBracket::FortyOneToSixty => "41-60",
            ConductorCountBracket::SixtyOneOrMore => "≥61",
        }
    }
}

/// Where the conductor runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Installation {
    /// Open wiring, no grouping derating
    Outdoor,
    /// In conduit or bundled with `conductors` current-carrying wires
    Indoor { conductors: u32 },
}

impl Default for Installation {
    fn default() -> Self {
        Installation::Indoor { conductors: 3 }
    }
}

impl std::fmt::Display for Installation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Installation::Outdoor => write!(f, "open wiring"),
            Installation::Indoor { conductors } => write!(f, "indoor, {} conductors", conductors),
        }
    }
}

/// One row of an ampacity table at 30 °C (A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmpacityRecord {
    /// Open wiring
    pub outdoor: u16,
    /// Indoor, indexed by [`ConductorCountBracket`]
    pub indoor: [u16; 7],
}

impl AmpacityRecord {
    const fn new(outdoor: u16, indoor: [u16; 7]) -> Self {
        AmpacityRecord { outdoor, indoor }
    }

    /// Value for an installation
    pub fn for_installation(&self, installation: Installation) -> u16 {
        match installation {
            Installation::Outdoor => self.outdoor,
            Installation::Indoor { conductors } => {
                self.indoor[ConductorCountBracket::from_count(conductors).index()]
            }
        }
    }
}

#[rustfmt::skip]
static IV_AMPACITY: [AmpacityRecord; WireGauge::COUNT] = [
    // Solid
    AmpacityRecord::new(19,  [13, 12, 10, 9, 8, 7, 6]),
    AmpacityRecord::new(27,  [19, 17, 15, 13, 12, 11, 9]),
    AmpacityRecord::new(35,  [24, 22, 19, 17, 15, 14, 12]),
    AmpacityRecord::new(48,  [33, 30, 27, 23, 21, 19, 17]),
    AmpacityRecord::new(62,  [43, 38, 34, 30, 27, 24, 21]),
    // Stranded
    AmpacityRecord::new(17,  [11, 10, 9, 8, 7, 6, 5]),
    AmpacityRecord::new(19,  [13, 11, 10, 9, 8, 7, 6]),
    AmpacityRecord::new(27,  [18, 17, 15, 13, 11, 10, 9]),
    AmpacityRecord::new(37,  [25, 23, 20, 18, 15, 14, 12]),
    AmpacityRecord::new(49,  [34, 31, 27, 24, 21, 19, 16]),
    AmpacityRecord::new(61,  [42, 38, 34, 30, 26, 24, 21]),
    AmpacityRecord::new(88,  [61, 55, 49, 43, 38, 34, 30]),
    AmpacityRecord::new(115, [80, 72, 64, 56, 49, 45, 39]),
    AmpacityRecord::new(162, [113, 102, 90, 79, 70, 63, 55]),
    AmpacityRecord::new(217, [152, 136, 121, 106, 93, 85, 74]),
    AmpacityRecord::new(298, [208, 187, 167, 146, 128, 116, 101]),
    AmpacityRecord::new(395, [276, 249, 221, 193, 170, 154, 134]),
    AmpacityRecord::new(469, [328, 295, 262, 230, 202, 183, 159]),
    AmpacityRecord::new(556, [389, 350, 311, 272, 239, 217, 189]),
    AmpacityRecord::new(650, [455, 409, 364, 318, 280, 254, 221]),
    AmpacityRecord::new(745, [521, 469, 417, 365, 320, 291, 253]),
    AmpacityRecord::new(842, [589, 530, 471, 412, 362, 328, 286]),
];

#[rustfmt::skip]
static HIV_AMPACITY: [AmpacityRecord; WireGauge::COUNT] = [
    // Solid
    AmpacityRecord::new(23,   [16, 14, 13, 11, 10, 9, 8]),
    AmpacityRecord::new(33,   [23, 20, 18, 16, 14, 13, 11]),
    AmpacityRecord::new(42,   [29, 26, 23, 20, 18, 16, 14]),
    AmpacityRecord::new(58,   [40, 36, 32, 28, 25, 22, 19]),
    AmpacityRecord::new(75,   [52, 47, 42, 36, 32, 29, 25]),
    // Stranded
    AmpacityRecord::new(20,   [14, 12, 11, 10, 8, 8, 7]),
    AmpacityRecord::new(23,   [16, 14, 13, 11, 10, 9, 8]),
    AmpacityRecord::new(33,   [23, 20, 18, 16, 14, 13, 11]),
    AmpacityRecord::new(45,   [31, 28, 25, 22, 19, 17, 15]),
    AmpacityRecord::new(59,   [41, 37, 33, 29, 25, 23, 20]),
    AmpacityRecord::new(74,   [52, 46, 41, 36, 32, 29, 25]),
    AmpacityRecord::new(107,  [75, 67, 60, 52, 46, 41, 36]),
    AmpacityRecord::new(140,  [98, 88, 78, 68, 60, 54, 47]),
    AmpacityRecord::new(197,  [138, 124, 110, 96, 84, 77, 67]),
    AmpacityRecord::new(264,  [185, 166, 148, 129, 113, 103, 89]),
    AmpacityRecord::new(363,  [254, 228, 203, 178, 156, 141, 123]),
    AmpacityRecord::new(482,  [337, 303, 270, 236, 207, 188, 164]),
    AmpacityRecord::new(572,  [400, 360, 320, 280, 246, 223, 194]),
    AmpacityRecord::new(678,  [474, 427, 379, 332, 291, 264, 230]),
    AmpacityRecord::new(793,  [555, 499, 444, 388, 341, 309, 269]),
    AmpacityRecord::new(909,  [636, 572, 509, 445, 391, 354, 309]),
    AmpacityRecord::new(1027, [719, 647, 575, 503, 441, 400, 349]),
];

/// Tabulated ampacity record for a gauge
pub fn ampacity_record(insulation: Insulation, gauge: WireGauge) -> &'static AmpacityRecord {
    &insulation.table()[gauge.index()]
}

/// Tabulated ampacity at 30 °C (A)
pub fn base_ampacity(insulation: Insulation, gauge: WireGauge, installation: Installation) -> u16 {
    ampacity_record(insulation, gauge).for_installation(installation)
}

/// Ampacity corrected for ambient temperature, rounded to 0.1 A.
///
/// ```rust
/// use denko_core::materials::ampacity::{corrected_ampacity, Insulation, Installation, WireGauge};
/// use denko_core::materials::temperature::AmbientTemperature;
///
/// // 2.0 mm IV, 3 conductors in conduit: 24 A × 0.82 at 40 °C
/// let amps = corrected_ampacity(
///     Insulation::Iv,
///     WireGauge::Solid2_0,
///     Installation::Indoor { conductors: 3 },
///     AmbientTemperature::C40,
/// );
/// assert_eq!(amps, 19.7);
/// ```
pub fn corrected_ampacity(
    insulation: Insulation,
    gauge: WireGauge,
    installation: Installation,
    temperature: AmbientTemperature,
) -> f64 {
    let base = base_ampacity(insulation, gauge, installation) as f64;
    let factor = temperature.correction_factor(insulation);
    round_half_away(derated_ampacity(base, factor, 1.0), AMPACITY_DECIMALS)
}

/// A table row with every column corrected for temperature, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmpacityRow {
    pub gauge: WireGauge,
    pub label: &'static str,
    pub shape: ConductorShape,
    pub composition: Option<&'static str>,
    /// Suitable for general building wiring
    pub recommended: bool,
    pub insulation: Insulation,
    pub temperature_c: i32,
    pub correction_factor: f64,
    /// Open wiring (A)
    pub outdoor_a: f64,
    /// Indoor by [`ConductorCountBracket`] (A)
    pub indoor_a: [f64; 7],
}

/// Build the display row for one gauge
pub fn ampacity_row(insulation: Insulation, gauge: WireGauge, temperature: AmbientTemperature) -> AmpacityRow {
    let record = ampacity_record(insulation, gauge);
    let factor = temperature.correction_factor(insulation);
    let correct = |amps: u16| round_half_away(derated_ampacity(amps as f64, factor, 1.0), AMPACITY_DECIMALS);

    AmpacityRow {
        gauge,
        label: gauge.label(),
        shape: gauge.shape(),
        composition: gauge.composition(),
        recommended: gauge.recommended_for_general_wiring(),
        insulation,
        temperature_c: temperature.celsius(),
        correction_factor: factor,
        outdoor_a: correct(record.outdoor),
        indoor_a: record.indoor.map(correct),
    }
}

/// Full table for one insulation class and conductor shape
pub fn ampacity_table(
    insulation: Insulation,
    shape: ConductorShape,
    temperature: AmbientTemperature,
) -> Vec<AmpacityRow> {
    WireGauge::of_shape(shape)
        .map(|gauge| ampacity_row(insulation, gauge, temperature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_gauge() {
        assert_eq!(IV_AMPACITY.len(), WireGauge::ALL.len());
        assert_eq!(HIV_AMPACITY.len(), WireGauge::ALL.len());
        for (i, gauge) in WireGauge::ALL.iter().enumerate() {
            assert_eq!(gauge.index(), i);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(base_ampacity(Insulation::Iv, WireGauge::Solid1_6, Installation::Indoor { conductors: 3 }), 19);
        assert_eq!(base_ampacity(Insulation::Iv, WireGauge::Solid2_0, Installation::Outdoor), 35);
        assert_eq!(base_ampacity(Insulation::Iv, WireGauge::Stranded5_5, Installation::Indoor { conductors: 4 }), 31);
        assert_eq!(base_ampacity(Insulation::Hiv, WireGauge::Stranded500, Installation::Indoor { conductors: 100 }), 349);
        assert_eq!(base_ampacity(Insulation::Hiv, WireGauge::Solid3_2, Installation::Indoor { conductors: 20 }), 32);
    }

    #[test]
    fn test_ampacity_increases_with_gauge() {
        for insulation in Insulation::ALL {
            for shape in [ConductorShape::Solid, ConductorShape::Stranded] {
                let gauges: Vec<WireGauge> = WireGauge::of_shape(shape).collect();
                for pair in gauges.windows(2) {
                    let small = ampacity_record(insulation, pair[0]);
                    let large = ampacity_record(insulation, pair[1]);
                    assert!(large.outdoor > small.outdoor, "{:?} {:?}", insulation, pair);
                    for bracket in 0..7 {
                        assert!(
                            large.indoor[bracket] > small.indoor[bracket],
                            "{:?} {:?} bracket {}",
                            insulation,
                            pair,
                            bracket
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_hiv_carries_more_than_iv() {
        for gauge in WireGauge::ALL {
            assert!(ampacity_record(Insulation::Hiv, gauge).outdoor > ampacity_record(Insulation::Iv, gauge).outdoor);
        }
    }

    #[test]
    fn test_bracket_from_count() {
        assert_eq!(ConductorCountBracket::from_count(0), ConductorCountBracket::UpToThree);
        assert_eq!(ConductorCountBracket::from_count(3), ConductorCountBracket::UpToThree);
        assert_eq!(ConductorCountBracket::from_count(4), ConductorCountBracket::Four);
        assert_eq!(ConductorCountBracket::from_count(6), ConductorCountBracket::FiveToSix);
        assert_eq!(ConductorCountBracket::from_count(15), ConductorCountBracket::SevenToFifteen);
        assert_eq!(ConductorCountBracket::from_count(16), ConductorCountBracket::SixteenToForty);
        assert_eq!(ConductorCountBracket::from_count(60), ConductorCountBracket::FortyOneToSixty);
        assert_eq!(ConductorCountBracket::from_count(61), ConductorCountBracket::SixtyOneOrMore);
    }

    #[test]
    fn test_corrected_ampacity_rounds_to_tenth() {
        // 3.5 mm² IV outdoor, 37 A × 0.82 = 30.34 → 30.3
        let amps = corrected_ampacity(Insulation::Iv, WireGauge::Stranded3_5, Installation::Outdoor, AmbientTemperature::C40);
        assert_eq!(amps, 30.3);
        // 22 mm² HIV in conduit, 98 A × 1.11 = 108.78 → 108.8
        let amps = corrected_ampacity(
            Insulation::Hiv,
            WireGauge::Stranded22,
            Installation::Indoor { conductors: 2 },
            AmbientTemperature::C20,
        );
        assert_eq!(amps, 108.8);
        // Baseline 30 °C leaves the table value unchanged
        let amps = corrected_ampacity(Insulation::Hiv, WireGauge::Stranded14, Installation::Outdoor, AmbientTemperature::C30);
        assert_eq!(amps, 107.0);
    }

    #[test]
    fn test_ampacity_row() {
        let row = ampacity_row(Insulation::Iv, WireGauge::Solid1_6, AmbientTemperature::C50);
        assert_eq!(row.label, "1.6mm");
        assert_eq!(row.correction_factor, 0.58);
        // 27 × 0.58 = 15.66 → 15.7
        assert_eq!(row.outdoor_a, 15.7);
        // 19 × 0.58 = 11.02 → 11.0
        assert_eq!(row.indoor_a[0], 11.0);
    }

    #[test]
    fn test_ampacity_table_by_shape() {
        let solid = ampacity_table(Insulation::Iv, ConductorShape::Solid, AmbientTemperature::C30);
        let stranded = ampacity_table(Insulation::Iv, ConductorShape::Stranded, AmbientTemperature::C30);
        assert_eq!(solid.len(), 5);
        assert_eq!(stranded.len(), 17);
        assert!(solid.iter().all(|row| row.composition.is_none()));
        assert!(stranded.iter().all(|row| row.composition.is_some()));
    }

    #[test]
    fn test_small_gauges_not_for_general_wiring() {
        let flagged: Vec<WireGauge> = WireGauge::ALL
            .into_iter()
            .filter(|g| !g.recommended_for_general_wiring())
            .collect();
        assert_eq!(
            flagged,
            vec![WireGauge::Solid1_2, WireGauge::Stranded0_9, WireGauge::Stranded1_25]
        );

        let solid = ampacity_table(Insulation::Hiv, ConductorShape::Solid, AmbientTemperature::C30);
        assert!(!solid[0].recommended);
        assert!(solid[1..].iter().all(|row| row.recommended));
        assert!(ampacity_row(Insulation::Iv, WireGauge::Stranded2, AmbientTemperature::C30).recommended);
    }

    #[test]
    fn test_gauge_area() {
        assert_eq!(WireGauge::Stranded5_5.area_mm2(), 5.5);
        assert!((WireGauge::Solid2_0.area_mm2() - 3.1416).abs() < 1e-4);
    }

    #[test]
    fn test_gauge_from_str_flexible() {
        assert_eq!(WireGauge::from_str_flexible("2.0mm").unwrap(), WireGauge::Solid2_0);
        assert_eq!(WireGauge::from_str_flexible("2mm").unwrap(), WireGauge::Solid2_0);
        assert_eq!(WireGauge::from_str_flexible("5.5mm²").unwrap(), WireGauge::Stranded5_5);
        assert_eq!(WireGauge::from_str_flexible("5.5mm2").unwrap(), WireGauge::Stranded5_5);
        assert_eq!(WireGauge::from_str_flexible("5.5sq").unwrap(), WireGauge::Stranded5_5);
        assert_eq!(WireGauge::from_str_flexible("14").unwrap(), WireGauge::Stranded14);
        assert_eq!(WireGauge::from_str_flexible("2").unwrap(), WireGauge::Stranded2);
        assert!(WireGauge::from_str_flexible("7mm").is_err());
    }

    #[test]
    fn test_gauge_serialization_uses_label() {
        let json = serde_json::to_string(&WireGauge::Stranded3_5).unwrap();
        assert_eq!(json, "\"3.5mm²\"");
        let parsed: WireGauge = serde_json::from_str("\"1.2mm\"").unwrap();
        assert_eq!(parsed, WireGauge::Solid1_2);
    }
}
