//! Lowering errors
//!
//! A call that simply is not a progression is not an error: recognition
//! returns `Ok(None)` for it. The variants here are internal consistency
//! faults; the caller aborts the current unit when it sees one.

use thiserror::Error;

use loopir_foundation::ClassId;

use crate::loops::ProgressionType;
use crate::matchers::MatcherError;

/// Errors that can occur during progression recognition.
#[derive(Debug, Error)]
pub enum LowerError {
    /// A call matcher was declared inconsistently.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// No runtime step validator is available for a progression.
    ///
    /// Non-literal steps must be wrapped in a validation call; the symbol
    /// table (or the function table) lacks the validator for this step
    /// class.
    #[error("no step check function registered for step class '{step_class}' ({progression} progression)")]
    MissingStepCheck {
        progression: ProgressionType,
        step_class: ClassId,
    },

    /// A step value does not have the class the progression steps by.
    #[error("step of a {progression} progression must be a '{step_class}', found '{found}'")]
    StepClassMismatch {
        progression: ProgressionType,
        step_class: ClassId,
        found: ClassId,
    },
}

/// Result type for lowering operations.
pub type LowerResult<T> = Result<T, LowerError>;
