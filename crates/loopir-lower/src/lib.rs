//! loopir lowering
//!
//! Recognition of counted-iteration shapes in the IR. A loop-lowering pass
//! asks the [`ProgressionInfoBuilder`] whether the subject of a `for` loop
//! is a progression (`a..b`, `a until b`, `a downTo b`, `array.indices`,
//! any of those followed by `step` calls) and receives a normalized
//! [`ProgressionInfo`] it can turn into a counted loop.
//!
//! Call shapes are described declaratively with [`FunctionMatcher`]s.

pub mod error;
pub mod loops;
pub mod matchers;

pub use error::{LowerError, LowerResult};
pub use loops::{
    check_progression_step, merge_step, scan_progressions, CallShape, CheckedStep,
    FoundProgression, ProgressionCoverage, ProgressionInfo, ProgressionInfoBuilder,
    ProgressionScan, ProgressionType,
};
pub use matchers::{FunctionMatcher, FunctionMatcherBuilder, MatcherError, ReceiverKind};
