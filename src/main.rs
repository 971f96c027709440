//! # brotherprint CLI
//!
//! Command-line interface for Brother label printers.
//!
//! ## Usage
//!
//! ```bash
//! # Run a JSON label job over raw TCP
//! brotherprint run label.json --host 192.168.1.40
//!
//! # Fill template 3 on a USB printer and print it
//! brotherprint fill --template 3 --field title=Spices --field date=2026-10-18 \
//!     --device /dev/usb/lp0
//!
//! # Write the command stream to a file instead of a printer
//! brotherprint run label.json --out label.bin
//!
//! # List every option symbol, or the known printer models
//! brotherprint options
//! brotherprint models
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brotherprint::{
    DeviceTransport, NetworkTransport, PrintError, PrinterConfig, PrinterSession, SessionConfig,
    Transport, TransportError,
    job::{JobDocument, JobError},
    protocol::options::{
        Alignment, BarcodeFormat, BarcodeRatio, BarcodeWidth, CharCodeTable, CharSize, CharStyle,
        Charset, CutMode, Font, MachineOp, Rotation, RssSymbol, Switch, TriggerType,
    },
};

/// brotherprint - Brother label printer utility
#[derive(Parser, Debug)]
#[command(name = "brotherprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every command sent
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON label job
    Run {
        /// Job file
        job: PathBuf,

        #[command(flatten)]
        target: Target,
    },

    /// Fill a stored P-touch template and print it
    Fill {
        /// Template number (1-99)
        #[arg(long)]
        template: u32,

        /// Object to fill, repeatable
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        #[command(flatten)]
        target: Target,
    },

    /// List every option symbol
    Options,

    /// List known printer models
    Models,
}

/// Where commands go. With no flag, the default USB device is used.
#[derive(Args, Debug)]
struct Target {
    /// Printer hostname or IP (raw TCP)
    #[arg(long, conflicts_with_all = ["device", "out"])]
    host: Option<String>,

    /// TCP port (defaults to the model's raw port)
    #[arg(long, requires = "host")]
    port: Option<u16>,

    /// Printer device path
    #[arg(long, conflicts_with = "out")]
    device: Option<PathBuf>,

    /// Write the command stream to a file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Printer model
    #[arg(long, default_value = "QL-720NW")]
    model: String,

    /// Reject commands sent in the wrong printer mode
    #[arg(long)]
    strict_modes: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown printer model '{0}' (see `brotherprint models`)")]
    UnknownModel(String),
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("brotherprint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brotherprint=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run { job, target } => {
            let job = JobDocument::from_path(&job)?;
            let mut session = target.open()?;
            let report = job.run(&mut session)?;

            for step in &report.advisories {
                eprintln!("warning: step {}: {}", step.index, step.advisory);
            }
            session.into_inner().finish()?;
            println!("Sent {} steps", report.steps_sent);
        }

        Commands::Fill {
            template,
            fields,
            target,
        } => {
            let mut session = target.open()?;
            session.template_mode()?;
            session.choose_template(template)?;
            for (name, value) in &fields {
                session.select_and_insert(name.as_bytes(), Some(value.as_bytes()))?;
            }
            session.template_print()?;
            session.into_inner().finish()?;
            println!("Filled template {} ({} fields)", template, fields.len());
        }

        Commands::Options => print_options(),

        Commands::Models => {
            for config in PrinterConfig::all() {
                println!(
                    "{:<12} {} dpi, raw port {}",
                    config.name, config.dpi, config.raw_port
                );
            }
        }
    }

    Ok(())
}

// ============ Targets ============

/// Opened output, finished once the session is done.
enum Sink {
    Network(NetworkTransport),
    Device(DeviceTransport),
    File { path: PathBuf, bytes: Vec<u8> },
}

impl Transport for Sink {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        match self {
            Sink::Network(t) => t.send(data),
            Sink::Device(t) => t.send(data),
            Sink::File { bytes, .. } => bytes.send(data),
        }
    }
}

impl Sink {
    fn finish(self) -> Result<(), CliError> {
        match self {
            Sink::Network(t) => t.finish()?,
            Sink::Device(_) => {}
            Sink::File { path, bytes } => {
                fs::write(&path, &bytes).map_err(|source| CliError::Output {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), bytes = bytes.len(), "wrote command stream");
            }
        }
        Ok(())
    }
}

impl Target {
    fn open(self) -> Result<PrinterSession<Sink>, CliError> {
        let model =
            PrinterConfig::by_name(&self.model).ok_or(CliError::UnknownModel(self.model))?;
        let config = SessionConfig {
            enforce_modes: self.strict_modes,
        };

        let sink = if let Some(host) = self.host {
            let port = self.port.unwrap_or(model.raw_port);
            Sink::Network(NetworkTransport::connect(&host, port)?)
        } else if let Some(path) = self.out {
            Sink::File {
                path,
                bytes: Vec::new(),
            }
        } else if let Some(device) = self.device {
            Sink::Device(DeviceTransport::open(device)?)
        } else {
            Sink::Device(DeviceTransport::open_default()?)
        };

        Ok(PrinterSession::with_config(sink, config))
    }
}

// ============ Option Listing ============

fn print_table<'a>(title: &str, names: impl IntoIterator<Item = &'a str>) {
    let names: Vec<&str> = names.into_iter().collect();
    println!("{title}:");
    println!("  {}", names.join(", "));
}

fn print_options() {
    print_table("charset", Charset::ALL.iter().map(|o| o.name()));
    print_table("char code table", CharCodeTable::ALL.iter().map(|o| o.name()));
    print_table("cut", CutMode::ALL.iter().map(|o| o.name()));
    print_table("rotation", Rotation::ALL.iter().map(|o| o.name()));
    print_table("alignment", Alignment::ALL.iter().map(|o| o.name()));
    print_table("switch", Switch::ALL.iter().map(|o| o.name()));
    print_table("feed amount", ["1/8", "1/6", "n/180", "n/60"]);
    print_table("underline", ["off", "<style number>"]);
    print_table("font", Font::ALL.iter().map(|o| o.name()));
    print_table("char size", CharSize::ALL.iter().map(|o| o.name()));
    print_table("char style", CharStyle::ALL.iter().map(|o| o.name()));
    print_table("barcode format", BarcodeFormat::ALL.iter().map(|o| o.name()));
    print_table("barcode width", BarcodeWidth::ALL.iter().map(|o| o.name()));
    print_table("barcode ratio", BarcodeRatio::ALL.iter().map(|o| o.name()));
    print_table("rss symbol", RssSymbol::ALL.iter().map(|o| o.name()));
    print_table("machine op", MachineOp::ALL.iter().map(|o| o.name()));
    print_table("trigger", TriggerType::ALL.iter().map(|o| o.name()));
}
