//! Progression recognition.
//!
//! # Recognized Shapes
//!
//! | Shape | Source form | first | bound | closed | increasing |
//! |-------|-------------|-------|-------|--------|------------|
//! | indices | `array.indices` | `0` | `array.lastIndex` | yes | yes |
//! | range-to | `a..b` | `a` | `b` | yes | yes |
//! | until | `a until b` | `a` | `b` | no | yes |
//! | down-to | `a downTo b` | `a` | `b` | yes | no |
//! | step | `p step s` | from `p` | from `p` | from `p` | from `p` |
//!
//! Shapes are tried in [`CallShape::PRIORITY`] order and the first matcher
//! that accepts the callee wins.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, trace};

use loopir_foundation::{ClassId, FqName};
use loopir_ir::{
    fq, ExprKind, IrBuilder, IrCall, IrExpr, IrFunction, IrType, IrValueParameter, Prelude,
    Symbols,
};

use super::step::{check_progression_step, merge_step};
use crate::error::LowerResult;
use crate::matchers::{FunctionMatcher, MatcherError, ReceiverKind};

/// Element kind of a progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProgressionType {
    Int,
    Long,
    Char,
}

impl ProgressionType {
    /// Order in which a call's static type is tested against the
    /// progression classes.
    pub const DETECTION_ORDER: [ProgressionType; 3] = [
        ProgressionType::Char,
        ProgressionType::Int,
        ProgressionType::Long,
    ];

    /// Name of the conversion used to bring a bound to this element type.
    pub fn number_cast_function_name(self) -> &'static str {
        match self {
            ProgressionType::Int => "toInt",
            ProgressionType::Long => "toLong",
            ProgressionType::Char => "toChar",
        }
    }

    /// Class of the step values this progression takes.
    ///
    /// Character progressions step by `Int`.
    pub fn step_class(self, symbols: &Symbols) -> &ClassId {
        match self {
            ProgressionType::Int | ProgressionType::Char => &symbols.int,
            ProgressionType::Long => &symbols.long,
        }
    }

    /// Progression class whose subtypes have this element kind.
    pub fn progression_class(self, symbols: &Symbols) -> &ClassId {
        match self {
            ProgressionType::Int => &symbols.int_progression,
            ProgressionType::Long => &symbols.long_progression,
            ProgressionType::Char => &symbols.char_progression,
        }
    }
}

impl fmt::Display for ProgressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgressionType::Int => "Int",
            ProgressionType::Long => "Long",
            ProgressionType::Char => "Char",
        };
        f.write_str(name)
    }
}

/// Normalized description of a recognized progression.
///
/// Owns its expressions: receivers and arguments are cloned out of the
/// recognized call, validation calls and composites are newly built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionInfo {
    pub progression_type: ProgressionType,
    /// First element (inclusive)
    pub first: IrExpr,
    /// Limit of the progression
    pub bound: IrExpr,
    /// Step; `None` is an implicit step of 1
    pub step: Option<IrExpr>,
    pub increasing: bool,
    /// Whether the last element must be recomputed from first, bound and step
    pub need_last_calculation: bool,
    /// Whether `bound` itself belongs to the progression
    pub closed: bool,
}

impl ProgressionInfo {
    /// Closed, increasing progression with an implicit step of 1.
    fn ascending(progression_type: ProgressionType, first: IrExpr, bound: IrExpr) -> Self {
        Self {
            progression_type,
            first,
            bound,
            step: None,
            increasing: true,
            need_last_calculation: false,
            closed: true,
        }
    }
}

/// Call shapes that construct or modify progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallShape {
    /// `array.indices`
    Indices,
    /// `a..b`
    RangeTo,
    /// `a until b`
    Until,
    /// `a downTo b`
    DownTo,
    /// `progression step s`
    Step,
}

impl CallShape {
    /// Order in which shapes are tried; the first accepting matcher wins.
    pub const PRIORITY: [CallShape; 5] = [
        CallShape::Indices,
        CallShape::RangeTo,
        CallShape::Until,
        CallShape::DownTo,
        CallShape::Step,
    ];

    /// Build the matcher recognizing this shape's callees.
    pub fn matcher(self, symbols: &Symbols) -> Result<FunctionMatcher, MatcherError> {
        let elements = symbols.progression_element_classes();

        match self {
            CallShape::Indices => FunctionMatcher::builder(ReceiverKind::Extension)
                .fq_name_restriction(fq_name_is(fq::INDICES))
                .parameters_size_restriction(|count| count == 0)
                .receiver_restriction(class_in(symbols.arrays.clone()))
                .build(),

            CallShape::RangeTo => FunctionMatcher::builder(ReceiverKind::Method)
                .receiver_restriction(class_in(elements.clone()))
                .fq_name_restriction(|name| name.last() == Some(fq::RANGE_TO))
                .parameters_size_restriction(|count| count == 1)
                .parameter_restriction(0, class_in(elements))
                .build(),

            CallShape::Until => FunctionMatcher::builder(ReceiverKind::Extension)
                .parameters_size_restriction(|count| count == 1)
                .parameter_restriction(0, class_in(elements.clone()))
                .fq_name_restriction(fq_name_is(fq::UNTIL))
                .receiver_restriction(class_in(elements))
                .build(),

            CallShape::DownTo => FunctionMatcher::builder(ReceiverKind::Extension)
                .receiver_restriction(class_in(elements.clone()))
                .fq_name_restriction(fq_name_is(fq::DOWN_TO))
                .parameters_size_restriction(|count| count == 1)
                .parameter_restriction(0, class_in(elements))
                .build(),

            CallShape::Step => {
                let step_classes: IndexSet<ClassId> =
                    [symbols.int.clone(), symbols.long.clone()].into_iter().collect();
                FunctionMatcher::builder(ReceiverKind::Extension)
                    .receiver_restriction(class_in(symbols.progression_classes.clone()))
                    .fq_name_restriction(fq_name_is(fq::STEP))
                    .parameters_size_restriction(|count| count == 1)
                    .parameter_restriction(0, class_in(step_classes))
                    .build()
            }
        }
    }
}

fn fq_name_is(expected: &'static str) -> impl Fn(&FqName) -> bool + Send + Sync + 'static {
    move |name| *name == expected
}

fn class_in(
    classes: IndexSet<ClassId>,
) -> impl Fn(&IrValueParameter) -> bool + Send + Sync + 'static {
    move |param| classes.contains(&param.ty.classifier)
}

/// Recognizes progression-constructing calls and builds their
/// [`ProgressionInfo`].
///
/// Borrows the prelude for the class hierarchy, function table and
/// symbols; holds one matcher per [`CallShape`] in priority order.
#[derive(Debug)]
pub struct ProgressionInfoBuilder<'p> {
    prelude: &'p Prelude,
    pub(super) matchers: Vec<(CallShape, FunctionMatcher)>,
}

impl<'p> ProgressionInfoBuilder<'p> {
    /// Build the shape matchers for `prelude`.
    ///
    /// # Errors
    ///
    /// [`LowerError::Matcher`](crate::LowerError::Matcher) if a shape
    /// matcher is declared inconsistently.
    pub fn new(prelude: &'p Prelude) -> LowerResult<Self> {
        let matchers = CallShape::PRIORITY
            .into_iter()
            .map(|shape| Ok((shape, shape.matcher(&prelude.symbols)?)))
            .collect::<LowerResult<Vec<_>>>()?;
        Ok(Self { prelude, matchers })
    }

    pub fn prelude(&self) -> &'p Prelude {
        self.prelude
    }

    /// Try to recognize `expr` as a progression.
    ///
    /// Returns `Ok(None)` when `expr` is not a progression-typed call of a
    /// recognized shape or when a part it needs is missing.
    ///
    /// # Errors
    ///
    /// [`LowerError::MissingStepCheck`](crate::LowerError::MissingStepCheck)
    /// when a non-literal step needs a validator that is not registered.
    pub fn recognize(&self, expr: &IrExpr) -> LowerResult<Option<ProgressionInfo>> {
        let ExprKind::Call(call) = &expr.kind else {
            return Ok(None);
        };
        let Some(progression_type) = self.progression_type(&expr.ty) else {
            return Ok(None);
        };
        let Some(function) = self.prelude.functions.get(&call.callee) else {
            debug!(callee = %call.callee, "unresolved callee");
            return Ok(None);
        };
        let Some(shape) = self.select_shape(function) else {
            trace!(callee = %call.callee, "no progression shape");
            return Ok(None);
        };
        trace!(callee = %call.callee, ?shape, %progression_type, "progression shape");

        match shape {
            CallShape::Indices => Ok(self.build_indices(expr, call, function, progression_type)),
            CallShape::RangeTo => Ok(build_range_to(call, progression_type)),
            CallShape::Until => Ok(build_until(call, progression_type)),
            CallShape::DownTo => Ok(build_down_to(call, progression_type)),
            CallShape::Step => self.build_step(expr, call, progression_type),
        }
    }

    /// Element kind of a progression-typed expression.
    pub fn progression_type(&self, ty: &IrType) -> Option<ProgressionType> {
        let symbols = &self.prelude.symbols;
        ProgressionType::DETECTION_ORDER.into_iter().find(|kind| {
            let progression = IrType::of(kind.progression_class(symbols).clone());
            self.prelude.hierarchy.is_subtype_of(ty, &progression)
        })
    }

    fn select_shape(&self, function: &IrFunction) -> Option<CallShape> {
        self.matchers
            .iter()
            .find(|(_, matcher)| matcher.matches(function))
            .map(|(shape, _)| *shape)
    }

    fn build_indices(
        &self,
        expr: &IrExpr,
        call: &IrCall,
        function: &IrFunction,
        progression_type: ProgressionType,
    ) -> Option<ProgressionInfo> {
        let symbols = &self.prelude.symbols;
        let receiver = call.extension_receiver.as_deref()?;
        let array = &function.extension_receiver_parameter.as_ref()?.ty.classifier;

        let Some(last_index) = symbols
            .array_last_index
            .get(array)
            .and_then(|id| self.prelude.functions.get(id))
        else {
            debug!(%array, "no lastIndex accessor");
            return None;
        };

        let builder = IrBuilder::at(expr.span);
        let first = builder.int(0, symbols.int_type());
        let bound = builder.call(last_index, None, Some(receiver.clone()), Vec::new());
        Some(ProgressionInfo::ascending(progression_type, first, bound))
    }

    fn build_step(
        &self,
        expr: &IrExpr,
        call: &IrCall,
        progression_type: ProgressionType,
    ) -> LowerResult<Option<ProgressionInfo>> {
        let (Some(receiver), Some(step)) =
            (call.extension_receiver.as_deref(), call.value_argument(0))
        else {
            return Ok(None);
        };
        let Some(nested) = self.recognize(receiver)? else {
            trace!("step receiver is not a progression");
            return Ok(None);
        };
        let step_class = progression_type.step_class(&self.prelude.symbols);
        if step.ty.classifier != *step_class {
            debug!(%step_class, found = %step.ty.classifier, "step has the wrong class");
            return Ok(None);
        }

        let checked = check_progression_step(self.prelude, progression_type, step)?;
        let builder = IrBuilder::at(expr.span);
        Ok(Some(ProgressionInfo {
            progression_type,
            step: Some(merge_step(nested.step, checked.expr, builder)),
            need_last_calculation: checked.need_last_calculation,
            ..nested
        }))
    }
}

fn receiver_and_bound(
    receiver: Option<&IrExpr>,
    call: &IrCall,
) -> Option<(IrExpr, IrExpr)> {
    Some((receiver?.clone(), call.value_argument(0)?.clone()))
}

fn build_range_to(call: &IrCall, progression_type: ProgressionType) -> Option<ProgressionInfo> {
    let (first, bound) = receiver_and_bound(call.dispatch_receiver.as_deref(), call)?;
    Some(ProgressionInfo::ascending(progression_type, first, bound))
}

fn build_until(call: &IrCall, progression_type: ProgressionType) -> Option<ProgressionInfo> {
    let (first, bound) = receiver_and_bound(call.extension_receiver.as_deref(), call)?;
    Some(ProgressionInfo {
        closed: false,
        ..ProgressionInfo::ascending(progression_type, first, bound)
    })
}

fn build_down_to(call: &IrCall, progression_type: ProgressionType) -> Option<ProgressionInfo> {
    let (first, bound) = receiver_and_bound(call.extension_receiver.as_deref(), call)?;
    Some(ProgressionInfo {
        increasing: false,
        ..ProgressionInfo::ascending(progression_type, first, bound)
    })
}
