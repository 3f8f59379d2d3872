//! Whole-tree progression scanning and coverage metrics.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use loopir_foundation::Span;
use loopir_ir::{walk_expr, ExprKind, IrExpr};

use super::progression::{ProgressionInfo, ProgressionInfoBuilder, ProgressionType};
use crate::error::{LowerError, LowerResult};

/// A progression recognized at some call in a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundProgression {
    /// Span of the recognized call
    pub span: Span,
    pub info: ProgressionInfo,
}

/// Result of scanning an expression tree.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionScan {
    /// Recognized progressions in pre-order
    pub found: Vec<FoundProgression>,
    /// Number of call nodes the recognizer was run on
    pub calls_visited: usize,
}

/// Progression coverage metrics for a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionCoverage {
    pub calls_visited: usize,
    pub recognized: usize,
    /// Recognized progressions per element kind.
    pub by_type: IndexMap<ProgressionType, usize>,
}

impl ProgressionCoverage {
    /// Fraction of visited calls that were recognized, in `[0, 1]`.
    pub fn recognized_share(&self) -> f64 {
        if self.calls_visited == 0 {
            0.0
        } else {
            self.recognized as f64 / self.calls_visited as f64
        }
    }
}

impl ProgressionScan {
    pub fn coverage(&self) -> ProgressionCoverage {
        let mut coverage = ProgressionCoverage {
            calls_visited: self.calls_visited,
            recognized: self.found.len(),
            ..Default::default()
        };
        for found in &self.found {
            *coverage
                .by_type
                .entry(found.info.progression_type)
                .or_insert(0) += 1;
        }
        coverage
    }
}

/// Run the recognizer on every call in `root`.
///
/// Calls are visited in pre-order, so a step call is reported before the
/// range it modifies, and both are reported.
///
/// # Errors
///
/// The first internal consistency fault aborts the scan.
#[instrument(skip_all, name = "scan_progressions")]
pub fn scan_progressions(
    builder: &ProgressionInfoBuilder<'_>,
    root: &IrExpr,
) -> LowerResult<ProgressionScan> {
    let mut scan = ProgressionScan::default();
    let mut fault: Option<LowerError> = None;

    walk_expr(root, &mut |node| {
        if fault.is_some() || !matches!(node.kind, ExprKind::Call(_)) {
            return;
        }
        scan.calls_visited += 1;
        match builder.recognize(node) {
            Ok(Some(info)) => scan.found.push(FoundProgression {
                span: node.span,
                info,
            }),
            Ok(None) => {}
            Err(e) => fault = Some(e),
        }
    });

    if let Some(e) = fault {
        return Err(e);
    }
    debug!(
        calls = scan.calls_visited,
        found = scan.found.len(),
        "progression scan complete"
    );
    Ok(scan)
}
