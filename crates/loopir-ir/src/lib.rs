//! loopir IR - Intermediate Representation
//!
//! The typed IR the loop-lowering passes operate on, together with the
//! collaborators those passes query: the class hierarchy (subtype checks),
//! the function table (callee resolution), the symbol table (accessors and
//! runtime validators) and the IR builder used to synthesize new nodes.
//!
//! Pipeline: Prelude (standard or YAML) -> IrExpr trees -> loop lowering

mod builder;
mod expr;
mod function;
mod prelude;
mod symbols;
mod types;
mod walk;

pub use builder::IrBuilder;
pub use expr::{ConstValue, ExprKind, IrCall, IrExpr};
pub use function::{FunctionTable, FunctionTableError, IrFunction, IrValueParameter};
pub use prelude::*;
pub use symbols::Symbols;
pub use types::{ClassHierarchy, IrType};
pub use walk::walk_expr;

pub use loopir_foundation::{ClassId, FqName, FunctionId, Span};
