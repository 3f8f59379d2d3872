//!
//! Recognize counted-loop progressions in an IR program.
//!
//! Usage: `recognize <program.yaml> [--prelude FILE] [--pretty]`

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use loopir_lower::ProgressionInfoBuilder;
use loopir_tools::{recognize_program, resolve_prelude, Program};

#[derive(Parser, Debug)]
#[command(name = "recognize")]
#[command(about = "Recognize counted-loop progressions in an IR program")]
struct Args {
    /// Path to the program YAML file
    program: PathBuf,

    /// Prelude YAML file (overrides the prelude named by the program)
    #[arg(long = "prelude")]
    prelude: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    loopir_tools::init_logging();

    let args = Args::parse();

    let program = match Program::load(&args.program) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load {}: {}", args.program.display(), e);
            process::exit(1);
        }
    };

    let prelude = match resolve_prelude(&program, &args.program, args.prelude.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to resolve prelude: {}", e);
            process::exit(1);
        }
    };

    let builder = match ProgressionInfoBuilder::new(&prelude) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to build matchers: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Recognizing {} expression(s) of '{}' against prelude '{}'",
        program.expressions.len(),
        program.metadata.name,
        prelude.name
    );
    let report = match recognize_program(&builder, &program) {
        Ok(r) => r,
        Err(e) => {
            error!("Recognition failed: {}", e);
            process::exit(1);
        }
    };

    let encoded = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match encoded {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to encode report: {}", e);
            process::exit(1);
        }
    }
}
