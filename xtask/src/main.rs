// Licensed under the Apache-2.0 license

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use stm8_registers_descriptors::Dialect;
use stm8_registers_generator::FilterConfig;

mod check;
mod config;
mod generate;
mod inspect;

#[derive(Parser, Debug)]
#[command(
    name = "xtask",
    author,
    version,
    about = "Register descriptor tooling for STM8 microcontrollers"
)]
struct Xtask {
    /// Log resolution details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How a device is selected: a known part number or a TOML device file.
#[derive(Args, Debug)]
pub(crate) struct DeviceArgs {
    /// Part number, e.g. STM8S105C4
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    part: Option<String>,

    /// TOML file describing the device and optional memory sizes
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    /// Only emit these peripherals (repeatable)
    #[arg(long = "include", value_name = "PERIPHERAL")]
    include: Vec<String>,

    /// Never emit these peripherals (repeatable)
    #[arg(long = "exclude", value_name = "PERIPHERAL")]
    exclude: Vec<String>,
}

impl FilterArgs {
    fn filter(&self) -> FilterConfig {
        let config = self
            .include
            .iter()
            .fold(FilterConfig::new(), |c, name| c.include_peripheral(name));
        self.exclude
            .iter()
            .fold(config, |c, name| c.exclude_peripheral(name))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the supported part numbers
    Devices,

    /// Print the resolved register table of a device
    Symbols {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Print the interrupt vector table of a device
    Vectors {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Generate a C header
    Header {
        #[command(flatten)]
        device: DeviceArgs,

        /// Compiler dialect: cosmic, raisonance, iar or sdcc
        #[arg(short, long, default_value = "sdcc")]
        dialect: String,

        /// Skip bit-field unions, per-bit masks and vector numbers
        #[arg(long)]
        minimal: bool,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file; printed to stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a Rust module using tock-registers
    Rust {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file; printed to stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate every layout and device, and optionally generated headers
    Check {
        /// Directory with previously generated headers
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Xtask::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = SimpleLogger::new().with_level(level).init();

    let result = match &cli.command {
        Commands::Devices => inspect::devices(),
        Commands::Symbols { device } => inspect::symbols(device),
        Commands::Vectors { device } => inspect::vectors(device),
        Commands::Header {
            device,
            dialect,
            minimal,
            filter,
            output,
        } => dialect
            .parse::<Dialect>()
            .map_err(anyhow::Error::from)
            .and_then(|dialect| {
                generate::header(
                    device,
                    dialect,
                    &filter.filter(),
                    *minimal,
                    output.as_deref(),
                )
            }),
        Commands::Rust {
            device,
            filter,
            output,
        } => generate::rust(device, &filter.filter(), output.as_deref()),
        Commands::Check { dir } => check::check(dir.as_deref()),
    };
    result.unwrap_or_else(|e| {
        eprintln!("{e:#}");
        std::process::exit(-1);
    });
}
