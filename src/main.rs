use clap::Parser;
use std::io;
use std::path::PathBuf;

use stops_to_json::stations;

/// Convert a GTFS stops.txt file into a JSON map of station coordinates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the GTFS stops file
    #[arg(default_value = "stops.txt")]
    input: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    log::debug!("Reading stops from {}", args.input.display());
    let stdout = io::stdout();
    match stations::convert_file(&args.input, stdout.lock()) {
        Ok(stations) => log::debug!("Wrote {} stations", stations.len()),
        Err(e) => {
            log::error!("failed converting {}: {}", args.input.display(), error_chain(&e));
            std::process::exit(1);
        }
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
