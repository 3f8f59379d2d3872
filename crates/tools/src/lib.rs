//! loopir Tools
//!
//! CLI tools for running progression recognition over IR programs.

pub mod program;
pub mod report;

use tracing_subscriber::{fmt, EnvFilter};

pub use program::{resolve_prelude, NamedExpr, Program, ProgramError, ProgramMetadata};
pub use report::{recognize_program, ExpressionReport, RecognitionReport};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info`, with `debug` for the lowering passes.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,loopir_lower=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
