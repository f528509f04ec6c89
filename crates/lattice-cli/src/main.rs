//! `lattice`: command-line front end for plasma lattice validation.

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use lattice_guards::GeometricTensionValidator;
use lattice_metrics::{reject_if_stress_fraction_increases, LatticeMetrics};
use plasma_core::{validate_universal_plasma_limit, LatticeConfig, Observation};
use serde::Serialize;
use telemetry_interrogator::{interrogate_file, validate_file, BatchReport};
use tracing::{error, info};

const DEFAULT_TELEMETRY: &str = "data/telemetry.csv";

fn cli() -> Command {
    Command::new("lattice")
        .about("Geometric tension validation against the Universal Plasma Limit (chi = 0.15)")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file overriding validator / interrogation settings"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("constants").about("Print the framework ratios as JSON"))
        .subcommand(
            Command::new("point")
                .about("Classify a single observation")
                .arg(
                    Arg::new("r-au")
                        .long("r-au")
                        .value_name("AU")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Radial distance; omit to use the calibration magnitude"),
                )
                .arg(
                    Arg::new("vector")
                        .long("vector")
                        .value_name("X,Y,Z")
                        .value_delimiter(',')
                        .allow_hyphen_values(true)
                        .value_parser(value_parser!(f64))
                        .help("Field vector components in nT, comma separated"),
                )
                .arg(
                    Arg::new("magnitude")
                        .long("magnitude")
                        .value_name("NT")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Field magnitude in nT"),
                )
                .group(
                    ArgGroup::new("field")
                        .args(["vector", "magnitude"])
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Classify every row of a telemetry CSV")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .required(true)
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "table"])
                        .default_value("json"),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("NAME")
                        .default_value("telemetry")
                        .help("Label attached to exported metrics"),
                )
                .arg(
                    Arg::new("compare")
                        .long("compare")
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .help("Earlier telemetry CSV; fail if the stress share grew"),
                )
                .arg(
                    Arg::new("fail-on-stress")
                        .long("fail-on-stress")
                        .action(ArgAction::SetTrue)
                        .help("Exit 1 if any row is LATTICE_STRESS"),
                )
                .arg(
                    Arg::new("metrics")
                        .long("metrics")
                        .action(ArgAction::SetTrue)
                        .help("Print the Prometheus exposition after the report"),
                ),
        )
        .subcommand(
            Command::new("interrogate")
                .about("Audit a chi_amplitude column against the plasma limit")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .default_value(DEFAULT_TELEMETRY),
                ),
        )
}

fn load_config(path: Option<&PathBuf>) -> Result<LatticeConfig> {
    let Some(path) = path else {
        return Ok(LatticeConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = LatticeConfig::from_json(&raw)
        .with_context(|| format!("loading config {}", path.display()))?;
    info!(path = %path.display(), "configuration loaded");
    Ok(cfg)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table(report: &BatchReport) {
    println!(
        "{:>5}  {:>9}  {:>10}  {:>10}  {:>9}  {}",
        "row", "r_au", "baseline", "observed", "chi", "status"
    );
    for outcome in &report.rows {
        let r = outcome
            .r_au
            .map(|r| format!("{r:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:>9}  {:>10.2}  {:>10.2}  {:>9.5}  {}",
            outcome.row,
            r,
            outcome.result.tension_baseline,
            outcome.result.observed_mag,
            outcome.result.chi,
            outcome.result.status
        );
    }
    println!(
        "stable={} stressed={} max_chi={:.5}",
        report.stable, report.stressed, report.max_chi
    );
}

fn run_point(validator: &GeometricTensionValidator, m: &ArgMatches) -> Result<bool> {
    let r_au = m.get_one::<f64>("r-au").copied();
    let observation = match m.get_many::<f64>("vector") {
        Some(values) => {
            let v: Vec<f64> = values.copied().collect();
            let components: [f64; 3] = v
                .try_into()
                .map_err(|v: Vec<f64>| anyhow!("--vector needs 3 components, got {}", v.len()))?;
            Observation::Vector(components)
        }
        None => {
            let b = m
                .get_one::<f64>("magnitude")
                .copied()
                .context("either --vector or --magnitude is required")?;
            Observation::Scalar(b)
        }
    };
    let result = validator.try_classify(&observation, r_au)?;
    print_json(&result)?;
    Ok(true)
}

fn run_validate(validator: &GeometricTensionValidator, m: &ArgMatches) -> Result<bool> {
    let input = m
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    let source = m
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or("telemetry");
    let report = validate_file(validator, input)
        .with_context(|| format!("validating {}", input.display()))?;

    match m.get_one::<String>("format").map(String::as_str) {
        Some("table") => print_table(&report),
        _ => print_json(&report)?,
    }

    let metrics = LatticeMetrics::new()?;
    let mut ok = true;
    match m.get_one::<PathBuf>("compare") {
        Some(previous) => {
            let before = validate_file(validator, previous)
                .with_context(|| format!("validating {}", previous.display()))?;
            if reject_if_stress_fraction_increases(&metrics, source, &before, &report) {
                error!(
                    before = before.stress_fraction(),
                    after = report.stress_fraction(),
                    "lattice stress share increased"
                );
                ok = false;
            }
        }
        None => metrics.observe_batch(source, &report),
    }

    if m.get_flag("fail-on-stress") && report.has_stress() {
        error!(stressed = report.stressed, "lattice stress detected");
        ok = false;
    }
    if m.get_flag("metrics") {
        print!("{}", metrics.render()?);
    }
    Ok(ok)
}

fn run_interrogate(cfg: &LatticeConfig, input: &Path) -> Result<bool> {
    let report = interrogate_file(&cfg.interrogation, input)
        .with_context(|| format!("interrogating {}", input.display()))?;
    print_json(&report)?;
    Ok(true)
}

fn run(matches: &ArgMatches) -> Result<bool> {
    let cfg = load_config(matches.get_one::<PathBuf>("config"))?;
    let validator = GeometricTensionValidator::new(cfg.validator)?;

    match matches.subcommand() {
        Some(("constants", _)) => {
            print_json(&validate_universal_plasma_limit())?;
            Ok(true)
        }
        Some(("point", m)) => run_point(&validator, m),
        Some(("validate", m)) => run_validate(&validator, m),
        Some(("interrogate", m)) => {
            let input = m
                .get_one::<PathBuf>("input")
                .context("--input is required")?;
            run_interrogate(&cfg, input)
        }
        Some((other, _)) => bail!("unknown subcommand {other}"),
        None => bail!("a subcommand is required"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::init_tracing(matches.get_flag("json-logs"));

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("lattice: {e:#}");
            ExitCode::FAILURE
        }
    }
}
