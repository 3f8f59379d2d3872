//! Construction of synthesized IR nodes.
//!
//! Lowering passes that replace or wrap existing nodes build the new nodes
//! through an [`IrBuilder`] positioned at the span of the node being
//! replaced, so every synthesized node carries a meaningful location and a
//! static type taken from its declaration.

use loopir_foundation::Span;

use crate::expr::{ConstValue, ExprKind, IrCall, IrExpr};
use crate::function::IrFunction;
use crate::types::IrType;

/// Builds IR nodes at a fixed source position.
#[derive(Debug, Clone, Copy)]
pub struct IrBuilder {
    span: Span,
}

impl IrBuilder {
    /// Position a builder at `span`.
    pub fn at(span: Span) -> Self {
        Self { span }
    }

    /// Literal constant of the given type.
    pub fn constant(&self, value: ConstValue, ty: IrType) -> IrExpr {
        IrExpr::new(ExprKind::Const(value), ty, self.span)
    }

    /// `Int` literal.
    pub fn int(&self, value: i32, int_type: IrType) -> IrExpr {
        self.constant(ConstValue::Int(value), int_type)
    }

    /// Call to `function` typed with its return type.
    ///
    /// Arguments are passed positionally and are all considered supplied.
    pub fn call(
        &self,
        function: &IrFunction,
        dispatch_receiver: Option<IrExpr>,
        extension_receiver: Option<IrExpr>,
        arguments: Vec<IrExpr>,
    ) -> IrExpr {
        let call = IrCall {
            callee: function.id.clone(),
            dispatch_receiver: dispatch_receiver.map(Box::new),
            extension_receiver: extension_receiver.map(Box::new),
            arguments: arguments.into_iter().map(Some).collect(),
        };
        IrExpr::new(ExprKind::Call(call), function.return_type.clone(), self.span)
    }

    /// Ordered composite of `statements`, typed as `ty`.
    pub fn composite(&self, ty: IrType, statements: Vec<IrExpr>) -> IrExpr {
        IrExpr::new(ExprKind::Composite(statements), ty, self.span)
    }
}
