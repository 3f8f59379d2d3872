//! Progression recognition for counted loops
//!
//! Loop lowering replaces iterator-based `for` loops over progressions with
//! counted loops. This module recognizes the progression a loop iterates
//! and describes it with a [`ProgressionInfo`]:
//!
//! 1. **Type**: the call's static type selects the element kind
//!    (`Char`, then `Int`, then `Long` progressions).
//! 2. **Shape**: the callee is tested against one [`FunctionMatcher`] per
//!    [`CallShape`], in priority order.
//! 3. **Steps**: `step` calls recurse into their receiver and fold their
//!    checked step into the inherited descriptor.
//!
//! [`FunctionMatcher`]: crate::matchers::FunctionMatcher

mod progression;
mod scan;
mod step;


pub use progression::{CallShape, ProgressionInfo, ProgressionInfoBuilder, ProgressionType};
pub use scan::{scan_progressions, FoundProgression, ProgressionCoverage, ProgressionScan};
pub use step::{check_progression_step, merge_step, CheckedStep};
