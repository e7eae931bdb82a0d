//! # Denko CLI Application
//!
//! Terminal front end for the wiring calculators and reference tables.
//! Every numeric argument is taken as raw text and goes through the same
//! form validation as the app, so all bad fields are reported together.
//!
//! ```text
//! denko drop --circuit dc_single --length 50 --current 20 --wire-size 5.5
//! denko protection --supply 1p2w_100v --load-kw 3 --power-factor 0.9 \
//!     --length 15 --breaker 40 --mcb 40 --gauge 8mm2 --conductors 3
//! denko ampacity --insulation HIV --temperature 40
//! denko --json conduit --type pf --wire 5.5 --count 6
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use denko_core::calculations::{
    load_current, protection, voltage_drop, voltage_drop_rate, wire_size, CircuitSelection, LoadCurrentInput,
    ProtectionInput, VoltageDropInput, VoltageDropRateInput, WireSizeInput,
};
use denko_core::circuits::{CircuitType, PowerSupplyType};
use denko_core::equations::generate_equations_markdown;
use denko_core::materials::{
    ampacity_row, ampacity_table, correction_table, max_conductors, smallest_conduit, AmbientTemperature,
    ConductorShape, ConduitType, ConduitWire, Installation, Insulation, WireGauge,
};
use denko_core::preferences::{load_preferences, save_preferences, Preferences, Theme};
use denko_core::validation::{Field, FormInput};
use denko_core::CalcError;

/// Denko - electrician's calculator
#[derive(Parser)]
#[command(name = "denko")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preference file
    #[arg(long, global = true, default_value = "denko-prefs.json")]
    prefs: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Voltage drop along a run
    Drop {
        /// Circuit type (dc_single, three_phase, neutral); defaults to the preference
        #[arg(short, long)]
        circuit: Option<String>,
        /// One-way length (m)
        #[arg(short, long)]
        length: Option<String>,
        /// Current (A)
        #[arg(short = 'i', long)]
        current: Option<String>,
        /// Cross-section (mm²)
        #[arg(short, long, conflicts_with = "gauge")]
        wire_size: Option<String>,
        /// Tabulated gauge instead of a cross-section (e.g., 2.0mm, 5.5mm2)
        #[arg(short, long)]
        gauge: Option<String>,
    },

    /// Minimum wire size for an allowed voltage drop
    WireSize {
        #[arg(short, long)]
        circuit: Option<String>,
        #[arg(short, long)]
        length: Option<String>,
        #[arg(short = 'i', long)]
        current: Option<String>,
        /// Allowable drop (V)
        #[arg(short, long)]
        drop: Option<String>,
    },

    /// Voltage drop rate and the 3 % check
    DropRate {
        #[arg(short, long)]
        circuit: Option<String>,
        #[arg(short, long)]
        length: Option<String>,
        #[arg(short = 'i', long)]
        current: Option<String>,
        #[arg(short, long)]
        wire_size: Option<String>,
        /// Reference voltage (V)
        #[arg(long)]
        voltage: Option<String>,
    },

    /// Current drawn by a kW load
    LoadCurrent {
        /// Supply type (e.g., 1p2w_100v, 3p3w_200v)
        #[arg(short, long, default_value = "1p2w_100v")]
        supply: String,
        #[arg(short = 'p', long)]
        load_kw: Option<String>,
        #[arg(short = 'f', long)]
        power_factor: Option<String>,
    },

    /// Breaker, MCB, wire and voltage drop checks for a branch circuit
    Protection {
        #[arg(short, long, default_value = "1p2w_100v")]
        supply: String,
        #[arg(short = 'p', long)]
        load_kw: Option<String>,
        #[arg(short = 'f', long)]
        power_factor: Option<String>,
        #[arg(short, long)]
        length: Option<String>,
        /// Breaker rating (A)
        #[arg(short, long)]
        breaker: Option<String>,
        /// MCB rating (A)
        #[arg(short, long)]
        mcb: Option<String>,
        /// Reduction factor (0.1 to 2.0)
        #[arg(short, long)]
        reduction: Option<String>,
        #[arg(short, long)]
        gauge: String,
        /// IV or HIV; defaults to the preference
        #[arg(long)]
        insulation: Option<String>,
        /// Conductors in the conduit; omit for open wiring
        #[arg(long)]
        conductors: Option<u32>,
        /// Ambient temperature (°C); defaults to the preference
        #[arg(short, long)]
        temperature: Option<String>,
    },

    /// Ampacity table, corrected for ambient temperature
    Ampacity {
        #[arg(long)]
        insulation: Option<String>,
        #[arg(long, value_enum, default_value_t = ShapeArg::Stranded)]
        shape: ShapeArg,
        #[arg(short, long)]
        temperature: Option<String>,
        /// Show one gauge only
        #[arg(short, long)]
        gauge: Option<String>,
    },

    /// Temperature correction factors
    Temperature {
        #[arg(long)]
        insulation: Option<String>,
    },

    /// Conduit fill: capacity of a size, or smallest size for a count
    Conduit {
        /// pf, e (thin steel) or cd
        #[arg(short = 't', long = "type", default_value = "pf")]
        conduit_type: String,
        /// IV wire size (2, 5.5, 8, 14)
        #[arg(short, long)]
        wire: String,
        /// Conduit size label (e.g., 22mm, E25)
        #[arg(short, long, conflicts_with = "count")]
        size: Option<String>,
        /// Number of conductors to pull
        #[arg(short, long)]
        count: Option<u16>,
    },

    /// Print the formula reference (markdown)
    Equations,

    /// Show or change the color theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Solid,
    Stranded,
}

impl From<ShapeArg> for ConductorShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Solid => ConductorShape::Solid,
            ShapeArg::Stranded => ConductorShape::Stranded,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Add a field to the form only when it was given on the command line
fn form_from_args(values: &[(Field, &Option<String>)]) -> FormInput {
    let mut form = FormInput::new();
    for (field, value) in values {
        if let Some(raw) = value {
            form.set(*field, raw.as_str());
        }
    }
    form
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

/// The preference file, read the first time a command needs a default
struct PrefsFile {
    path: PathBuf,
    loaded: OnceCell<Preferences>,
}

impl PrefsFile {
    fn new(path: PathBuf) -> Self {
        PrefsFile {
            path,
            loaded: OnceCell::new(),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn get(&self) -> Result<&Preferences> {
        self.loaded.get_or_try_init(|| -> Result<Preferences> {
            let prefs = load_preferences(&self.path)
                .with_context(|| format!("loading preferences from {}", self.path.display()))?;
            debug!(theme = %prefs.theme, "preferences ready");
            Ok(prefs)
        })
    }
}

fn circuit_or_default(circuit: Option<&str>, prefs: &PrefsFile) -> Result<CircuitType> {
    Ok(match circuit {
        Some(id) => CircuitType::from_str_flexible(id)?,
        None => prefs.get()?.default_circuit,
    })
}

fn insulation_or_default(insulation: Option<&str>, prefs: &PrefsFile) -> Result<Insulation> {
    Ok(match insulation {
        Some(code) => Insulation::from_str_flexible(code)?,
        None => prefs.get()?.default_insulation,
    })
}

fn temperature_or_default(temperature: Option<&str>, prefs: &PrefsFile) -> Result<AmbientTemperature> {
    Ok(match temperature {
        Some(t) => AmbientTemperature::from_str_flexible(t)?,
        None => prefs.get()?.default_temperature(),
    })
}

fn run(cli: Cli) -> Result<()> {
    let prefs = PrefsFile::new(cli.prefs);
    let json = cli.json;

    match cli.command {
        Commands::Drop {
            circuit,
            length,
            current,
            wire_size,
            gauge,
        } => {
            let circuit = circuit_or_default(circuit.as_deref(), &prefs)?;
            let mut form = form_from_args(&[
                (Field::Length, &length),
                (Field::Current, &current),
                (Field::WireSize, &wire_size),
            ]);
            if let Some(label) = gauge {
                form.set(Field::WireSize, WireGauge::from_str_flexible(&label)?.area_mm2().to_string());
            }
            let input = VoltageDropInput::from_form(circuit, &form)?;
            let result = voltage_drop::calculate(&input)?;
            emit(json, &result, report::voltage_drop)
        }

        Commands::WireSize {
            circuit,
            length,
            current,
            drop,
        } => {
            let circuit = circuit_or_default(circuit.as_deref(), &prefs)?;
            let input = WireSizeInput::from_form(
                circuit,
                &form_from_args(&[
                    (Field::Length, &length),
                    (Field::Current, &current),
                    (Field::VoltageDrop, &drop),
                ]),
            )?;
            let result = wire_size::calculate(&input)?;
            emit(json, &result, report::wire_size)
        }

        Commands::DropRate {
            circuit,
            length,
            current,
            wire_size,
            voltage,
        } => {
            let circuit = circuit_or_default(circuit.as_deref(), &prefs)?;
            let input = VoltageDropRateInput::from_form(
                circuit,
                &form_from_args(&[
                    (Field::Length, &length),
                    (Field::Current, &current),
                    (Field::WireSize, &wire_size),
                    (Field::Voltage, &voltage),
                ]),
            )?;
            let result = voltage_drop_rate::calculate(&input)?;
            emit(json, &result, report::voltage_drop_rate)
        }

        Commands::LoadCurrent {
            supply,
            load_kw,
            power_factor,
        } => {
            let supply = PowerSupplyType::from_str_flexible(&supply)?;
            let input = LoadCurrentInput::from_form(
                supply,
                &form_from_args(&[(Field::LoadKw, &load_kw), (Field::PowerFactor, &power_factor)]),
            )?;
            let result = load_current::calculate(&input)?;
            emit(json, &result, report::load_current)
        }

        Commands::Protection {
            supply,
            load_kw,
            power_factor,
            length,
            breaker,
            mcb,
            reduction,
            gauge,
            insulation,
            conductors,
            temperature,
        } => {
            let selection = CircuitSelection {
                supply: PowerSupplyType::from_str_flexible(&supply)?,
                insulation: insulation_or_default(insulation.as_deref(), &prefs)?,
                gauge: WireGauge::from_str_flexible(&gauge)?,
                installation: match conductors {
                    Some(conductors) => Installation::Indoor { conductors },
                    None => Installation::Outdoor,
                },
                temperature: temperature_or_default(temperature.as_deref(), &prefs)?,
            };
            let input = ProtectionInput::from_form(
                selection,
                &form_from_args(&[
                    (Field::LoadKw, &load_kw),
                    (Field::PowerFactor, &power_factor),
                    (Field::Length, &length),
                    (Field::BreakerCurrent, &breaker),
                    (Field::McbCurrent, &mcb),
                    (Field::ReductionFactor, &reduction),
                ]),
            )?;
            let result = protection::calculate(&input)?;
            emit(json, &result, report::protection)
        }

        Commands::Ampacity {
            insulation,
            shape,
            temperature,
            gauge,
        } => {
            let insulation = insulation_or_default(insulation.as_deref(), &prefs)?;
            let temperature = temperature_or_default(temperature.as_deref(), &prefs)?;
            let rows = match gauge {
                Some(label) => vec![ampacity_row(insulation, WireGauge::from_str_flexible(&label)?, temperature)],
                None => ampacity_table(insulation, shape.into(), temperature),
            };
            emit(json, &rows, |rows| report::ampacity(rows))
        }

        Commands::Temperature { insulation } => {
            let insulation = insulation_or_default(insulation.as_deref(), &prefs)?;
            let table = correction_table(insulation);
            emit(json, &table, |table| report::temperature(insulation, table))
        }

        Commands::Conduit {
            conduit_type,
            wire,
            size,
            count,
        } => {
            let conduit = ConduitType::from_str_flexible(&conduit_type)?;
            let wire = ConduitWire::from_str_flexible(&wire)?;
            match (size, count) {
                (Some(size), _) => {
                    let max = max_conductors(conduit, &size, wire)?;
                    emit(json, &max, |max| println!("{} {}: up to {} × {}", conduit, size, max, wire))
                }
                (None, Some(count)) => {
                    let found = smallest_conduit(conduit, wire, count);
                    emit(json, &found, |found| report::smallest_conduit(conduit, wire, count, *found))
                }
                (None, None) => {
                    let sizes = conduit.sizes();
                    emit(json, &sizes, |sizes| report::conduit_sizes(conduit, wire, sizes))
                }
            }
        }

        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }

        Commands::Theme { action } => {
            let path = prefs.path().to_path_buf();
            let mut prefs = prefs.get()?.clone();
            match action {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    prefs.toggle_theme();
                }
                ThemeAction::Light => prefs.set_theme(Theme::Light),
                ThemeAction::Dark => prefs.set_theme(Theme::Dark),
            }
            if !matches!(action, ThemeAction::Show) {
                save_preferences(&prefs, &path)
                    .with_context(|| format!("saving preferences to {}", path.display()))?;
            }
            emit(json, &prefs, |prefs| println!("Theme: {}", prefs.theme))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CalcError>() {
                Some(calc) if json => {
                    if let Ok(body) = serde_json::to_string_pretty(calc) {
                        println!("{}", body);
                    }
                }
                Some(CalcError::Validation { errors }) => {
                    eprintln!("Please fix the following:");
                    for error in errors.iter() {
                        eprintln!("  {}: {}", error.field.display_name(), error.message);
                    }
                }
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corrupt_prefs(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("denko_cli_{}_{}.json", name, std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        path
    }

    fn parse(prefs: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["denko", "--prefs", prefs.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_table_commands_ignore_broken_prefs() {
        let path = corrupt_prefs("tables");
        assert!(run(parse(&path, &["conduit", "--wire", "5.5", "--count", "6"])).is_ok());
        assert!(run(parse(&path, &["temperature", "--insulation", "HIV"])).is_ok());
        assert!(run(parse(
            &path,
            &["drop", "--circuit", "dc_single", "--length", "50", "--current", "20", "--wire-size", "5.5"]
        ))
        .is_ok());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_defaults_read_prefs_when_needed() {
        let path = corrupt_prefs("defaults");
        let err = run(parse(&path, &["drop", "--length", "50", "--current", "20", "--wire-size", "5.5"])).unwrap_err();
        assert!(err.to_string().contains("loading preferences"));
        let _ = fs::remove_file(&path);
    }
}
