//! Expression tree walking utilities.
//!
//! Shared pre-order traversal so analysis passes do not each re-implement
//! recursive descent. The visitor owns whatever state it accumulates.

use crate::expr::{ExprKind, IrExpr};

/// Recursively walk an expression tree in pre-order, calling visitor for each node.
///
/// Children are visited left to right in evaluation order: dispatch
/// receiver, extension receiver, then supplied value arguments for calls;
/// statements in order for composites.
///
/// # Examples
///
/// ```
/// # use loopir_ir::{walk_expr, ExprKind, IrExpr, IrType, Span};
/// let expr = IrExpr::new(ExprKind::GetValue("n".into()), IrType::of("core.Int"), Span::default());
/// let mut calls = 0;
/// walk_expr(&expr, &mut |node| {
///     if matches!(node.kind, ExprKind::Call(_)) {
///         calls += 1;
///     }
/// });
/// assert_eq!(calls, 0);
/// ```
pub fn walk_expr<V>(expr: &IrExpr, visitor: &mut V)
where
    V: FnMut(&IrExpr),
{
    visitor(expr);

    match &expr.kind {
        ExprKind::Call(call) => {
            if let Some(receiver) = &call.dispatch_receiver {
                walk_expr(receiver, visitor);
            }
            if let Some(receiver) = &call.extension_receiver {
                walk_expr(receiver, visitor);
            }
            for arg in call.arguments.iter().flatten() {
                walk_expr(arg, visitor);
            }
        }

        ExprKind::Composite(statements) => {
            for statement in statements {
                walk_expr(statement, visitor);
            }
        }

        ExprKind::Const(_) | ExprKind::GetValue(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ConstValue, IrCall};
    use crate::types::IrType;
    use loopir_foundation::Span;

    fn value(name: &str) -> IrExpr {
        IrExpr::new(
            ExprKind::GetValue(name.to_string()),
            IrType::of("core.Int"),
            Span::default(),
        )
    }

    #[test]
    fn test_preorder_left_to_right() {
        let mut call = IrCall::new("a.f");
        call.dispatch_receiver = Some(Box::new(value("recv")));
        call.arguments = vec![Some(value("x")), None, Some(value("y"))];
        let root = IrExpr::new(
            ExprKind::Composite(vec![
                IrExpr::new(ExprKind::Call(call), IrType::of("core.Int"), Span::default()),
                IrExpr::new(
                    ExprKind::Const(ConstValue::Int(1)),
                    IrType::of("core.Int"),
                    Span::default(),
                ),
            ]),
            IrType::of("core.Int"),
            Span::default(),
        );

        let mut order = Vec::new();
        walk_expr(&root, &mut |node| {
            order.push(match &node.kind {
                ExprKind::Composite(_) => "composite".to_string(),
                ExprKind::Call(_) => "call".to_string(),
                ExprKind::GetValue(name) => name.clone(),
                ExprKind::Const(_) => "const".to_string(),
            });
        });

        assert_eq!(order, vec!["composite", "call", "recv", "x", "y", "const"]);
    }
}
