//! loopir Foundation
//!
//! Core foundational types shared by the IR model and the lowering passes:
//! fully-qualified names, typed identifiers and source spans.

pub mod ids;
pub mod path;
pub mod span;

pub use ids::{ClassId, FunctionId};
pub use path::FqName;
pub use span::Span;
