//! IR expressions
//!
//! Every expression carries its static type and the span of the source it
//! came from. Only the handful of node kinds loop lowering inspects or
//! synthesizes are modelled: constants, value reads, calls and ordered
//! composites.

use serde::{Deserialize, Serialize};

use loopir_foundation::{FunctionId, Span};

use crate::types::IrType;

/// A typed IR expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrExpr {
    /// Expression variant
    pub kind: ExprKind,

    /// Static result type
    #[serde(rename = "type")]
    pub ty: IrType,

    /// Source location
    #[serde(default)]
    pub span: Span,
}

impl IrExpr {
    pub fn new(kind: ExprKind, ty: IrType, span: Span) -> Self {
        Self { kind, ty, span }
    }

    /// Get the call node if this expression is a call.
    pub fn as_call(&self) -> Option<&IrCall> {
        match &self.kind {
            ExprKind::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Get the constant value if this expression is a literal.
    pub fn as_const(&self) -> Option<&ConstValue> {
        match &self.kind {
            ExprKind::Const(value) => Some(value),
            _ => None,
        }
    }
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExprKind {
    /// Literal constant
    Const(ConstValue),

    /// Read of a named value (local variable or parameter)
    GetValue(String),

    /// Function invocation
    Call(IrCall),

    /// Statements evaluated in order; the value is the last statement's value
    Composite(Vec<IrExpr>),
}

/// Literal constant values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstValue {
    Int(i32),
    Long(i64),
    Char(char),
    Boolean(bool),
}

impl ConstValue {
    /// Check if this is an integral literal strictly greater than zero.
    ///
    /// Characters and booleans are never positive numbers.
    pub fn is_positive_integer(&self) -> bool {
        match self {
            ConstValue::Int(v) => *v > 0,
            ConstValue::Long(v) => *v > 0,
            ConstValue::Char(_) | ConstValue::Boolean(_) => false,
        }
    }

    /// Check if this is the integral literal `1`.
    pub fn is_one(&self) -> bool {
        match self {
            ConstValue::Int(v) => *v == 1,
            ConstValue::Long(v) => *v == 1,
            ConstValue::Char(_) | ConstValue::Boolean(_) => false,
        }
    }
}

/// A function invocation.
///
/// Value arguments are positional; an absent entry means the argument was
/// not supplied at this call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrCall {
    /// Resolved callee
    pub callee: FunctionId,

    /// Instance the method is invoked on
    #[serde(default)]
    pub dispatch_receiver: Option<Box<IrExpr>>,

    /// Target of an extension function
    #[serde(default)]
    pub extension_receiver: Option<Box<IrExpr>>,

    /// Positional value arguments
    #[serde(default)]
    pub arguments: Vec<Option<IrExpr>>,
}

impl IrCall {
    /// Create a call with no receivers and no arguments.
    pub fn new(callee: impl Into<FunctionId>) -> Self {
        Self {
            callee: callee.into(),
            dispatch_receiver: None,
            extension_receiver: None,
            arguments: Vec::new(),
        }
    }

    /// Get the value argument at `index`, if it was supplied.
    pub fn value_argument(&self, index: usize) -> Option<&IrExpr> {
        self.arguments.get(index).and_then(Option::as_ref)
    }

    /// Set the value argument at `index`, growing the argument list as needed.
    pub fn put_value_argument(&mut self, index: usize, value: IrExpr) {
        if self.arguments.len() <= index {
            self.arguments.resize(index + 1, None);
        }
        self.arguments[index] = Some(value);
    }
}
