//! # kmv
//!
//! Runs Kelvin / milliVolt conversions against a calibration table.
//!
//! ```bash
//! # Demonstration set
//! kmv -f diode.txt
//!
//! # Specific values, one JSON object per line
//! kmv -f diode.txt -k 4.2 77.35 -m 1100 --json
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::Serialize;

use kmv_converter::{Config, Conversion, ConverterConfig, KmvConverter};

const DEMO_KELVIN: &[f64] = &[
    1.23, 1.34, 1.40, 2.1, 3.5, 4.0125, 40.125, 401.25, 505.13, 99.1,
];
const DEMO_MILLIVOLTS: &[f64] = &[85.023, 628.302, 892.35, 1725.0, 1600.2, 1050.13, 100.0];

/// kmv - Kelvin / milliVolt conversion from a calibration table
#[derive(Parser)]
#[command(name = "kmv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Correlation table (K, V, dV/dT per line; .csv and .json also accepted)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// TOML file with a [converter] section
    #[arg(short = 'c', long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Kelvin values to convert to milliVolts
    #[arg(short = 'k', long, value_name = "K", num_args = 1.., allow_negative_numbers = true)]
    kelvin: Vec<f64>,

    /// milliVolt values to convert to Kelvin
    #[arg(short = 'm', long, value_name = "MV", num_args = 1.., allow_negative_numbers = true)]
    millivolts: Vec<f64>,

    /// Print one JSON object per conversion
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    from: &'a str,
    to: &'a str,
    input: f64,
    output: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if File::open(&cli.file).is_err() {
        println!("{} file failed to open.", cli.file.display());
        return Ok(ExitCode::FAILURE);
    }

    let config = match &cli.config {
        Some(path) => {
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
                .converter
        }
        None => ConverterConfig::default(),
    };

    let converter = KmvConverter::with_config(&cli.file, &config)
        .with_context(|| format!("Failed to load table: {}", cli.file.display()))?;
    info!(
        "Table covers {:?} K and {:?} mV",
        converter.kelvin_range(),
        converter.millivolt_range()
    );

    let (kelvin, millivolts) = if cli.kelvin.is_empty() && cli.millivolts.is_empty() {
        (DEMO_KELVIN.to_vec(), DEMO_MILLIVOLTS.to_vec())
    } else {
        (cli.kelvin, cli.millivolts)
    };

    for k in kelvin {
        let result = converter.kelvin_to_millivolt(k);
        if cli.json {
            print_json("kelvin", "millivolt", k, result)?;
        } else {
            match result {
                Ok(Some(mv)) => println!("{k} degrees Kelvin correlates to {mv} mVolts"),
                Ok(None) => println!(
                    "{k} degree Kelvin to milliVolts is undefined for the dataset given."
                ),
                Err(e) => error!("{k} degree Kelvin could not be converted: {e}"),
            }
        }
    }

    for mv in millivolts {
        let result = converter.millivolt_to_kelvin(mv);
        if cli.json {
            print_json("millivolt", "kelvin", mv, result)?;
        } else {
            match result {
                Ok(Some(k)) => println!("{mv} milliVolts correlates to {k} degrees Kelvin"),
                Ok(None) => println!(
                    "{mv} milliVolts to degree Kelvin is undefined for the dataset given."
                ),
                Err(e) => error!("{mv} milliVolts could not be converted: {e}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json(from: &str, to: &str, input: f64, result: Conversion) -> Result<()> {
    let (output, error) = match result {
        Ok(output) => (output, None),
        Err(e) => (None, Some(e.to_string())),
    };
    let report = Report {
        from,
        to,
        input,
        output,
        error,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
