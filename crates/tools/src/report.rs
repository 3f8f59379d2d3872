//! Recognition reports.

use serde::Serialize;
use tracing::info;

use loopir_lower::{
    scan_progressions, FoundProgression, LowerResult, ProgressionCoverage, ProgressionInfoBuilder,
};

use crate::program::Program;

/// Progressions found in one named expression.
#[derive(Debug, Clone, Serialize)]
pub struct ExpressionReport {
    pub name: String,
    pub progressions: Vec<FoundProgression>,
    pub coverage: ProgressionCoverage,
}

/// Progressions found in a whole program.
#[derive(Debug, Clone, Serialize)]
pub struct RecognitionReport {
    pub program: String,
    pub prelude: String,
    pub expressions: Vec<ExpressionReport>,
}

/// Scan every expression of `program`.
///
/// # Errors
///
/// Stops at the first expression whose scan hits an internal consistency
/// fault.
pub fn recognize_program(
    builder: &ProgressionInfoBuilder<'_>,
    program: &Program,
) -> LowerResult<RecognitionReport> {
    let mut expressions = Vec::with_capacity(program.expressions.len());
    for named in &program.expressions {
        let scan = scan_progressions(builder, &named.expr)?;
        let coverage = scan.coverage();
        info!(
            expression = %named.name,
            found = coverage.recognized,
            calls = coverage.calls_visited,
            "expression scanned"
        );
        expressions.push(ExpressionReport {
            name: named.name.clone(),
            progressions: scan.found,
            coverage,
        });
    }

    Ok(RecognitionReport {
        program: program.metadata.name.clone(),
        prelude: builder.prelude().name.clone(),
        expressions,
    })
}
