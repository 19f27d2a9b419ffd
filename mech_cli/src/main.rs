//! # Machina CLI
//!
//! Command-line harness for the mech_core calculations. Takes literal
//! parameters or a JSON calculation file, prints a human-readable report or
//! (with `--json`) the raw result.
//!
//! ```text
//! machina gear --module 2 --stages 20:60,i18:72 --rpm 1450
//! machina planetary --sun 24 --planet 24 --ring 72 --fixed ring
//! machina linkage --ground 7 --crank 2 --coupler 9 --rocker 6
//! machina bearing --radial 3000 --axial 800 --x 0.56 --y 1.8 --capacity 25500 --rpm 1450
//! machina run calcs.json
//! machina equations --output EQUATIONS.md
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` to trace calculations.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mech_core::calculations::bearing::{self, BearingInput, BearingLoadCase, BearingResult};
use mech_core::calculations::gear_train::{
    self, FixedMember, GearStage, GearTrain, GearTrainResult, PlanetaryStage,
};
use mech_core::calculations::linkage::{self, FourBarLinkage, LinkageResult};
use mech_core::calculations::{parse_calculations, CalculationOutput};
use mech_core::equations::{generate_equations_markdown, EquationTracker};
use mech_core::validation::check_parameter;
use mech_core::{DesignSettings, MechError, MechResult};

#[derive(Parser)]
#[command(name = "machina", version, about = "Mechanical design calculations")]
struct Cli {
    /// Design settings file (TOML)
    #[arg(long, global = true, env = "MACHINA_SETTINGS")]
    settings: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a train of external/internal spur gear stages
    Gear {
        /// Module for every stage (mm)
        #[arg(long, default_value_t = 2.0)]
        module: f64,

        /// Stages as DRIVER:DRIVEN, prefix with `i` for an internal mesh
        #[arg(long, value_delimiter = ',', required = true, value_parser = parse_stage)]
        stages: Vec<StageArg>,

        /// Input speed (rpm)
        #[arg(long)]
        rpm: Option<f64>,

        /// Input torque (N·m)
        #[arg(long)]
        torque: Option<f64>,

        /// Per-mesh efficiency (defaults to the settings value)
        #[arg(long)]
        efficiency: Option<f64>,
    },

    /// Single planetary stage ratio
    Planetary {
        #[arg(long)]
        sun: u32,
        #[arg(long)]
        planet: u32,
        #[arg(long)]
        ring: u32,
        /// Member held stationary
        #[arg(long, value_enum)]
        fixed: FixedArg,
        #[arg(long, default_value_t = 1.0)]
        module: f64,
    },

    /// Four-bar linkage feasibility and transmission angle
    Linkage {
        #[arg(long)]
        ground: f64,
        #[arg(long)]
        crank: f64,
        #[arg(long)]
        coupler: f64,
        #[arg(long)]
        rocker: f64,
        /// Also report the transmission angle at this crank angle (degrees)
        #[arg(long)]
        angle: Option<f64>,
    },

    /// Rolling bearing L10 life
    Bearing {
        /// Radial force Fr (N)
        #[arg(long)]
        radial: f64,
        /// Axial force Fa (N)
        #[arg(long, default_value_t = 0.0)]
        axial: f64,
        /// Radial load factor X
        #[arg(long, default_value_t = 1.0)]
        x: f64,
        /// Axial load factor Y
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        /// Basic dynamic load rating C (N)
        #[arg(long)]
        capacity: f64,
        /// Roller bearing (p = 10/3) instead of ball (p = 3)
        #[arg(long)]
        roller: bool,
        /// Shaft speed (rpm)
        #[arg(long)]
        rpm: f64,
        /// Required L10 life (hours)
        #[arg(long)]
        required_hours: Option<f64>,
        /// Basic static load rating C0 (N)
        #[arg(long)]
        static_capacity: Option<f64>,
    },

    /// Run every calculation in a JSON file
    Run {
        /// JSON array of calculation items
        file: PathBuf,
    },

    /// Print the equations reference (markdown)
    Equations {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the effective design settings (TOML)
    Settings,
}

#[derive(Clone, Copy, Debug)]
struct StageArg {
    internal: bool,
    driver: u32,
    driven: u32,
}

fn parse_stage(s: &str) -> Result<StageArg, String> {
    let (internal, body) = match s.strip_prefix('i') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (driver, driven) = body
        .split_once(':')
        .ok_or_else(|| format!("expected DRIVER:DRIVEN, got '{}'", s))?;
    let driver = driver.trim().parse().map_err(|e| format!("driver teeth '{}': {}", driver, e))?;
    let driven = driven.trim().parse().map_err(|e| format!("driven teeth '{}': {}", driven, e))?;
    Ok(StageArg { internal, driver, driven })
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FixedArg {
    Ring,
    Sun,
    Carrier,
}

impl From<FixedArg> for FixedMember {
    fn from(arg: FixedArg) -> Self {
        match arg {
            FixedArg::Ring => FixedMember::Ring,
            FixedArg::Sun => FixedMember::Sun,
            FixedArg::Carrier => FixedMember::Carrier,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(all_ok) => {
            if all_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            report_error(&e, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&PathBuf>) -> MechResult<DesignSettings> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path).map_err(|e| {
                MechError::invalid_input("settings", path.display(), format!("cannot read file: {}", e))
            })?;
            let settings = DesignSettings::from_toml_str(&contents)?;
            info!(path = %path.display(), "loaded design settings");
            Ok(settings)
        }
        None => Ok(DesignSettings::default()),
    }
}

/// Run the selected command. Returns false when a check failed or an
/// advisory was raised.
fn execute(cli: &Cli) -> MechResult<bool> {
    check_args(&cli.command)?;
    let settings = load_settings(cli.settings.as_ref())?;
    debug!(?settings, "design settings");

    match &cli.command {
        Command::Gear { module, stages, rpm, torque, efficiency } => {
            let train = stages.iter().fold(GearTrain::new("CLI"), |train, stage| {
                let gear_stage = if stage.internal {
                    GearStage::internal(*module, stage.driver, stage.driven)
                } else {
                    GearStage::external(*module, stage.driver, stage.driven)
                };
                train.with_stage(gear_stage)
            });
            let result = gear_train::compose(&train)?;
            let efficiency = efficiency.unwrap_or(settings.default_mesh_efficiency);
            let output_rpm = rpm.map(|n| result.output_speed_rpm(n)).transpose()?;
            let output_torque = torque.map(|t| result.output_torque_nm(t, efficiency)).transpose()?;

            if cli.json {
                print_json(&GearReport {
                    result: &result,
                    input_speed_rpm: *rpm,
                    output_speed_rpm: output_rpm,
                    input_torque_nm: *torque,
                    output_torque_nm: output_torque,
                    mesh_efficiency: torque.map(|_| efficiency),
                })?;
            } else {
                print_gear_train(&result);
                if let (Some(input), Some(output)) = (rpm, output_rpm) {
                    println!("  Speed:     {:.1} rpm -> {:.2} rpm", input, output);
                }
                if let (Some(input), Some(output)) = (torque, output_torque) {
                    println!("  Torque:    {:.2} N·m -> {:.2} N·m (η = {} per mesh)", input, output, efficiency);
                }
                print_citations(&result.equations);
            }
            Ok(true)
        }

        Command::Planetary { sun, planet, ring, fixed, module } => {
            let stage = PlanetaryStage::new(*sun, *planet, *ring, (*fixed).into());
            let train = GearTrain::new("CLI planetary").with_stage(GearStage::planetary(*module, stage));
            let result = gear_train::compose(&train)?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_gear_train(&result);
                print_citations(&result.equations);
            }
            Ok(true)
        }

        Command::Linkage { ground, crank, coupler, rocker, angle } => {
            let four_bar = FourBarLinkage::new(*ground, *crank, *coupler, *rocker);
            let result = linkage::analyze_with(&four_bar, &settings)?;
            let at_angle = angle
                .map(|deg| linkage::transmission_angle_at(&four_bar, deg).map(|mu| (deg, mu)))
                .transpose()?;

            if cli.json {
                print_json(&result)?;
            } else {
                print_linkage(&result, &settings);
                if let Some((deg, mu)) = at_angle {
                    println!("  μ at θ = {:.1}°: {:.2}°", deg, mu);
                }
                print_citations(&result.equations);
            }
            Ok(!result.poor_transmission)
        }

        Command::Bearing {
            radial,
            axial,
            x,
            y,
            capacity,
            roller,
            rpm,
            required_hours,
            static_capacity,
        } => {
            let load_case = if *roller {
                BearingLoadCase::roller(*radial, *axial, *x, *y, *capacity)
            } else {
                BearingLoadCase::ball(*radial, *axial, *x, *y, *capacity)
            };
            let input = BearingInput {
                label: "CLI".to_string(),
                load_case,
                speed_rpm: *rpm,
                required_life_hours: *required_hours,
                static_capacity_n: *static_capacity,
            };
            let result = bearing::calculate(&input)?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_bearing(&result);
                print_citations(&result.equations);
            }
            Ok(result.passes())
        }

        Command::Run { file } => {
            let contents = fs::read_to_string(file).map_err(|e| {
                MechError::invalid_input("file", file.display(), format!("cannot read file: {}", e))
            })?;
            let items = parse_calculations(&contents)?;
            info!(count = items.len(), file = %file.display(), "running calculation file");

            let outcomes: Vec<MechResult<CalculationOutput>> =
                items.iter().map(|item| item.run(&settings)).collect();
            let all_ok = outcomes
                .iter()
                .all(|outcome| matches!(outcome, Ok(output) if output.is_acceptable()));

            if cli.json {
                let report: Vec<RunEntry> = items
                    .iter()
                    .zip(&outcomes)
                    .map(|(item, outcome)| RunEntry {
                        label: item.label(),
                        calc_type: item.calc_type(),
                        output: outcome.as_ref().ok(),
                        error: outcome.as_ref().err(),
                    })
                    .collect();
                print_json(&report)?;
                return Ok(all_ok);
            }

            for (item, outcome) in items.iter().zip(&outcomes) {
                println!("── {} [{}] ──", item.label(), item.calc_type());
                match outcome {
                    Ok(CalculationOutput::GearTrain(r)) => print_gear_train(r),
                    Ok(CalculationOutput::Linkage(r)) => print_linkage(r, &settings),
                    Ok(CalculationOutput::Bearing(r)) => print_bearing(r),
                    Err(e) => println!("  {} {}", status_icon(false), e),
                }
                println!();
            }
            Ok(all_ok)
        }

        Command::Equations { output } => {
            let markdown = generate_equations_markdown();
            match output {
                Some(path) => {
                    fs::write(path, &markdown).map_err(|e| {
                        MechError::invalid_input("output", path.display(), format!("cannot write file: {}", e))
                    })?;
                    println!("Wrote {} bytes to {}", markdown.len(), path.display());
                }
                None => print!("{}", markdown),
            }
            Ok(true)
        }

        Command::Settings => {
            if cli.json {
                print_json(&settings)?;
            } else {
                print!("{}", settings.to_toml_string()?);
            }
            Ok(true)
        }
    }
}

/// Gate literal arguments through the named parameter ranges before any
/// input value is assembled.
fn check_args(command: &Command) -> MechResult<()> {
    match command {
        Command::Gear { module, stages, rpm, torque, efficiency } => {
            check_parameter("module_mm", "module", *module)?;
            for stage in stages {
                check_parameter("teeth", "driver", f64::from(stage.driver))?;
                check_parameter("teeth", "driven", f64::from(stage.driven))?;
            }
            if let Some(rpm) = rpm {
                check_parameter("speed_rpm", "rpm", *rpm)?;
            }
            if let Some(torque) = torque {
                check_parameter("torque_nm", "torque", *torque)?;
            }
            if let Some(efficiency) = efficiency {
                check_parameter("efficiency", "efficiency", *efficiency)?;
            }
        }
        Command::Planetary { sun, planet, ring, module, .. } => {
            check_parameter("teeth", "sun", f64::from(*sun))?;
            check_parameter("teeth", "planet", f64::from(*planet))?;
            check_parameter("teeth", "ring", f64::from(*ring))?;
            check_parameter("module_mm", "module", *module)?;
        }
        Command::Linkage { ground, crank, coupler, rocker, .. } => {
            check_parameter("link_length", "ground", *ground)?;
            check_parameter("link_length", "crank", *crank)?;
            check_parameter("link_length", "coupler", *coupler)?;
            check_parameter("link_length", "rocker", *rocker)?;
        }
        Command::Bearing {
            radial,
            axial,
            x,
            y,
            capacity,
            rpm,
            required_hours,
            static_capacity,
            ..
        } => {
            check_parameter("force_n", "radial", *radial)?;
            check_parameter("force_n", "axial", *axial)?;
            check_parameter("load_factor", "x", *x)?;
            check_parameter("load_factor", "y", *y)?;
            check_parameter("dynamic_capacity_n", "capacity", *capacity)?;
            check_parameter("speed_rpm", "rpm", *rpm)?;
            if let Some(hours) = required_hours {
                check_parameter("life_hours", "required_hours", *hours)?;
            }
            if let Some(c0) = static_capacity {
                check_parameter("static_capacity_n", "static_capacity", *c0)?;
            }
        }
        Command::Run { .. } | Command::Equations { .. } | Command::Settings => {}
    }
    Ok(())
}

/// Gear train result plus the speed and torque the user asked about.
#[derive(Serialize)]
struct GearReport<'a> {
    #[serde(flatten)]
    result: &'a GearTrainResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_speed_rpm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_speed_rpm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_torque_nm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_torque_nm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mesh_efficiency: Option<f64>,
}

#[derive(Serialize)]
struct RunEntry<'a> {
    label: &'a str,
    calc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a MechError>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> MechResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_gear_train(result: &GearTrainResult) {
    println!("Gear train:");
    for (i, (ratio, direction)) in result.stage_ratios.iter().zip(&result.stage_directions).enumerate() {
        println!(
            "  Stage {}:   i = {:.4}  dir = {:+}  a = {:.2} mm",
            i + 1,
            ratio,
            direction.sign(),
            result.center_distances_mm[i]
        );
    }
    println!(
        "  Overall:   i = {:.4}  dir = {:+}  ({} meshes)",
        result.overall_ratio,
        result.overall_direction.sign(),
        result.mesh_count
    );
}

fn print_linkage(result: &LinkageResult, settings: &DesignSettings) {
    let (min, max) = result.transmission_angle_range_deg;
    println!("Four-bar linkage:");
    println!("  Class:        {}", result.grashof_class.display_name());
    println!("  Crank-rocker: {}", if result.is_crank_rocker { "yes" } else { "no" });
    println!(
        "  μ range:      {:.2}° .. {:.2}° (limits {:.0}°/{:.0}°) {}",
        min,
        max,
        settings.transmission_angle_min_deg,
        settings.transmission_angle_max_deg,
        status_icon(!result.poor_transmission)
    );
}

fn print_bearing(result: &BearingResult) {
    println!("Bearing:");
    println!("  P     = {:.1} N  (C/P = {:.3})", result.equivalent_load_n, result.load_ratio);
    println!("  L10   = {:.4e} rev", result.life_revolutions);
    println!("  L10h  = {:.1} h", result.life_hours);
    if let Some(ratio) = result.life_ratio {
        println!("  Life ratio: {:.2} {}", ratio, status_icon(ratio >= 1.0));
    }
    if let Some(c_req) = result.required_dynamic_capacity_n {
        println!("  C required: {:.0} N", c_req);
    }
    if let Some(s0) = result.static_safety_factor {
        println!("  s0    = {:.2}", s0);
    }
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "FAIL" });
}

fn print_citations(equations: &EquationTracker) {
    let citations = equations.citations();
    if citations.is_empty() {
        return;
    }
    println!();
    println!("References:");
    for citation in citations {
        println!("  - {}", citation);
    }
}

fn report_error(error: &MechError, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(error) {
            eprintln!("{}", text);
            return;
        }
    }
    eprintln!("Error [{}]: {}", error.error_code(), error);
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stage() {
        let external = parse_stage("20:60").unwrap();
        assert!(!external.internal);
        assert_eq!((external.driver, external.driven), (20, 60));

        let internal = parse_stage("i18:72").unwrap();
        assert!(internal.internal);
        assert_eq!((internal.driver, internal.driven), (18, 72));

        assert!(parse_stage("20-60").is_err());
        assert!(parse_stage("20:x").is_err());
    }

    #[test]
    fn test_cli_parses_gear_command() {
        let cli = Cli::try_parse_from(["machina", "--json", "gear", "--stages", "20:60,i18:72", "--rpm", "1450"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Gear { stages, rpm, .. } => {
                assert_eq!(stages.len(), 2);
                assert!(stages[1].internal);
                assert_eq!(rpm, Some(1450.0));
            }
            _ => panic!("expected gear command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_args_rejects_out_of_range_literals() {
        let cli = Cli::try_parse_from([
            "machina", "bearing", "--radial=-5", "--capacity", "25500", "--rpm", "1450",
        ])
        .unwrap();
        let err = check_args(&cli.command).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert!(err.to_string().contains("'radial'"));

        let cli = Cli::try_parse_from(["machina", "gear", "--module", "40", "--stages", "20:60"]).unwrap();
        assert_eq!(check_args(&cli.command).unwrap_err().error_code(), "INVALID_GEOMETRY");

        let cli = Cli::try_parse_from(["machina", "gear", "--stages", "20:60", "--rpm", "0"]).unwrap();
        assert_eq!(check_args(&cli.command).unwrap_err().error_code(), "INVALID_SPEED");

        let cli = Cli::try_parse_from([
            "machina", "linkage", "--ground", "7", "--crank", "0", "--coupler", "9", "--rocker", "6",
        ])
        .unwrap();
        assert_eq!(check_args(&cli.command).unwrap_err().error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_check_args_accepts_valid_literals() {
        let cli = Cli::try_parse_from([
            "machina", "bearing", "--radial", "3000", "--axial", "800", "--x", "0.56", "--y", "1.8",
            "--capacity", "25500", "--rpm", "1450", "--required-hours", "20000",
        ])
        .unwrap();
        assert!(check_args(&cli.command).is_ok());

        let cli = Cli::try_parse_from([
            "machina", "planetary", "--sun", "24", "--planet", "24", "--ring", "72", "--fixed", "ring",
        ])
        .unwrap();
        assert!(check_args(&cli.command).is_ok());
    }

    #[test]
    fn test_gear_report_keeps_speed_and_torque() {
        let train = GearTrain::new("CLI").with_stage(GearStage::external(2.0, 20, 60));
        let result = gear_train::compose(&train).unwrap();
        let report = GearReport {
            result: &result,
            input_speed_rpm: Some(1500.0),
            output_speed_rpm: Some(result.output_speed_rpm(1500.0).unwrap()),
            input_torque_nm: Some(10.0),
            output_torque_nm: Some(result.output_torque_nm(10.0, 0.98).unwrap()),
            mesh_efficiency: Some(0.98),
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!((json["overall_ratio"].as_f64().unwrap() - 3.0).abs() < 1e-12);
        assert!((json["output_speed_rpm"].as_f64().unwrap() - 500.0).abs() < 1e-9);
        assert!((json["output_torque_nm"].as_f64().unwrap() - 29.4).abs() < 1e-9);

        let bare = GearReport {
            result: &result,
            input_speed_rpm: None,
            output_speed_rpm: None,
            input_torque_nm: None,
            output_torque_nm: None,
            mesh_efficiency: None,
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("output_speed_rpm").is_none());
        assert!(json.get("stage_ratios").is_some());
    }
}
