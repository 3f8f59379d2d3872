//! Step validation and merging.

use tracing::trace;

use loopir_ir::{ExprKind, IrBuilder, IrExpr, Prelude};

use super::progression::ProgressionType;
use crate::error::{LowerError, LowerResult};

/// A step expression ready to be stored in a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedStep {
    /// The step itself, or a validation call wrapping it
    pub expr: IrExpr,
    pub need_last_calculation: bool,
}

/// Make sure a step is known to be positive.
///
/// Positive `Int`/`Long` literals are kept as they are; only a literal `1`
/// leaves the last element unchanged. Any other step is wrapped in a call
/// to the validator registered for the progression's step class, built at
/// the step's span.
///
/// # Errors
///
/// [`LowerError::StepClassMismatch`] if `step` is not of the progression's
/// step class. [`LowerError::MissingStepCheck`] if no validator is
/// registered for the step class or the registered one is not declared.
pub fn check_progression_step(
    prelude: &Prelude,
    progression_type: ProgressionType,
    step: &IrExpr,
) -> LowerResult<CheckedStep> {
    let symbols = &prelude.symbols;
    let step_class = progression_type.step_class(symbols);
    if step.ty.classifier != *step_class {
        return Err(LowerError::StepClassMismatch {
            progression: progression_type,
            step_class: step_class.clone(),
            found: step.ty.classifier.clone(),
        });
    }

    if let Some(value) = step.as_const().filter(|value| value.is_positive_integer()) {
        return Ok(CheckedStep {
            expr: step.clone(),
            need_last_calculation: !value.is_one(),
        });
    }

    let check = symbols
        .check_progression_step
        .get(step_class)
        .and_then(|id| prelude.functions.get(id))
        .ok_or_else(|| LowerError::MissingStepCheck {
            progression: progression_type,
            step_class: step_class.clone(),
        })?;

    trace!(check = %check.id, "wrapping step in validation call");
    let expr = IrBuilder::at(step.span).call(check, None, None, vec![step.clone()]);
    Ok(CheckedStep {
        expr,
        need_last_calculation: true,
    })
}

/// Combine an inherited step with a new one.
///
/// Chained steps accumulate left to right in a composite: a composite
/// inherited step gets the new step appended, any other inherited step is
/// paired with it in a new composite typed as the new step and positioned
/// by `builder`.
pub fn merge_step(inherited: Option<IrExpr>, step: IrExpr, builder: IrBuilder) -> IrExpr {
    match inherited {
        None => step,
        Some(IrExpr {
            kind: ExprKind::Composite(mut statements),
            ty,
            span,
        }) => {
            statements.push(step);
            IrExpr::new(ExprKind::Composite(statements), ty, span)
        }
        Some(previous) => {
            let ty = step.ty.clone();
            builder.composite(ty, vec![previous, step])
        }
    }
}
