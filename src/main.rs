//! geoqr command-line entrypoint

use clap::Parser;
use geoqr::logging::{self, CapturedDiagnostics};
use geoqr::output::render_emission;
use geoqr::{EccLevel, Error, GeoQrConfig, Result, generate};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "geoqr",
    version,
    about = "Generate a geo: QR code from coordinates or a Google Maps / OpenStreetMap URL"
)]
struct Cli {
    /// Coordinates for the geo link, as <lat>,<lon>
    #[arg(short, long, value_name = "LAT,LON", allow_hyphen_values = true)]
    coordinates: Option<String>,

    /// Google Maps or OpenStreetMap URL to extract coordinates from
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Output path: a file, a directory, or both. Derived from the URL or coordinates if omitted
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to geoqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override QR error-correction level (L, M, Q or H)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<String>,

    /// Override pixels per QR module
    #[arg(long, value_name = "PX")]
    box_size: Option<u32>,

    /// Override quiet-zone width in modules
    #[arg(long, value_name = "MODULES")]
    border: Option<u32>,

    /// Output the result as formatted JSON instead of human-readable text.
    /// Diagnostics are folded into the JSON instead of printed.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("geoqr: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Refuse conflicting input before loading anything else.
    let has_coordinates = cli.coordinates.as_deref().is_some_and(|s| !s.is_empty());
    let has_url = cli.url.as_deref().is_some_and(|s| !s.is_empty());
    if has_coordinates == has_url {
        return Err(Error::InputConflict);
    }

    let mut config = GeoQrConfig::load(cli.config.as_deref())?;

    if let Some(ref ecc) = cli.ecc {
        config.qr.ecc = ecc.parse::<EccLevel>().map_err(Error::Config)?;
    }
    if let Some(box_size) = cli.box_size {
        config.qr.box_size = box_size.max(1);
    }
    if let Some(border) = cli.border {
        config.qr.border = border;
    }

    let capture = cli.json.then(CapturedDiagnostics::default);
    let _guard = logging::init(&config.logging, capture.clone())?;
    if let Some(ref source) = config.source {
        info!("Using configuration file: {}", source.display());
    }

    let emission = generate(
        cli.coordinates.as_deref(),
        cli.url.as_deref(),
        cli.output.as_deref(),
        &config.qr,
    )?;

    let mut rendered = render_emission(&emission);
    if let Some(capture) = capture {
        if let Some(obj) = rendered.json.as_object_mut() {
            let lines = capture.lines().into_iter().map(Value::String).collect();
            obj.insert("diagnostics".to_string(), Value::Array(lines));
        }
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }

    Ok(())
}
