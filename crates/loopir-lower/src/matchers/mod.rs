//! Declarative call matchers
//!
//! A [`FunctionMatcher`] describes the signature of the functions a
//! lowering is interested in: which receiver they declare, what their
//! qualified name looks like, how many value parameters they take and what
//! those parameters are.
//!
//! ```
//! use loopir_lower::{FunctionMatcher, ReceiverKind};
//!
//! let until = FunctionMatcher::builder(ReceiverKind::Extension)
//!     .fq_name_restriction(|name| *name == "core.ranges.until")
//!     .parameters_size_restriction(|count| count == 1)
//!     .build()
//!     .unwrap();
//! assert_eq!(until.kind(), ReceiverKind::Extension);
//! ```

mod function;


pub use function::*;
