//! Command-line replay of scripted drawing sessions
//!
//! Each subcommand starts one shape tool, feeds it the events of a RON
//! script and prints the resulting geometry as JSON on stdout. Logs go to
//! stderr and are filtered through `RUST_LOG`.

mod script;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use idt_core::{ShapeKind, ToolConfig};

use crate::script::SessionScript;
use crate::session::{ReplayError, replay};

#[derive(Parser)]
#[command(name = "idt-replay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw a two-point line
    Line(RunArgs),
    /// Draw a triangle from three clicks
    Triangle(RunArgs),
    /// Draw an axis-aligned rectangle from two opposite corners
    Rectangle(RunArgs),
    /// Draw a free quadrilateral from four clicks
    Quad(RunArgs),
    /// Draw a filled plane from two opposite corners
    Plane(RunArgs),
    /// Draw a box: two base corners, then the height
    Cube(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Session script (RON)
    script: PathBuf,

    /// Tool configuration (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

impl Command {
    fn split(self) -> (ShapeKind, RunArgs) {
        match self {
            Command::Line(args) => (ShapeKind::Line, args),
            Command::Triangle(args) => (ShapeKind::Triangle, args),
            Command::Rectangle(args) => (ShapeKind::Rectangle, args),
            Command::Quad(args) => (ShapeKind::Quad, args),
            Command::Plane(args) => (ShapeKind::Plane, args),
            Command::Cube(args) => (ShapeKind::Cube, args),
        }
    }
}

fn run(kind: ShapeKind, args: RunArgs) -> Result<String, ReplayError> {
    let config = match &args.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };
    let script = SessionScript::load(&args.script)?;
    tracing::info!(
        "Replaying {} events from {}",
        script.events.len(),
        args.script.display()
    );

    let report = replay(kind, &script, config)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idt_core=debug,idt_replay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let (kind, args) = cli.command.split();

    match run(kind, args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
