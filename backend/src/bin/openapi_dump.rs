//! Print a service's OpenAPI document as JSON.

use std::io::Write;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use utoipa::OpenApi;

use habit_tracker::doc::{TrackerApiDoc, UserServiceApiDoc};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Service {
    Users,
    Tracker,
}

#[derive(Debug, Parser)]
#[command(about = "Dump the OpenAPI document of one service")]
struct Args {
    /// Which service document to print.
    #[arg(value_enum, default_value = "users")]
    service: Service,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = match args.service {
        Service::Users => UserServiceApiDoc::openapi(),
        Service::Tracker => TrackerApiDoc::openapi(),
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", doc.to_pretty_json()?)?;
    Ok(())
}
