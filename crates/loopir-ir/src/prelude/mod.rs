//! Prelude System
//!
//! A Prelude bundles everything loop lowering queries about the host
//! language: the class hierarchy, the declared functions and the symbol
//! table of well-known classes, accessors and runtime validators.
//!
//! # Sources
//!
//! - [`Prelude::standard`] builds the standard library shapes in code.
//! - [`Prelude::load`] / [`Prelude::from_yaml`] read a prelude from YAML,
//!   for hosts whose library differs from the standard one.
//!
//! # File Format
//!
//! ```yaml
//! apiVersion: loopir/v1
//! kind: Prelude
//!
//! metadata:
//!   name: minimal
//!   description: "Int ranges only"
//!
//! classes:
//!   core.Any: []
//!   core.Int: [core.Any]
//!   core.Long: [core.Any]
//!   core.Char: [core.Any]
//!   core.ranges.CharProgression: [core.Any]
//!   core.ranges.IntProgression: [core.Any]
//!   core.ranges.LongProgression: [core.Any]
//!   core.ranges.IntRange: [core.ranges.IntProgression]
//!
//! functions:
//!   - id: core.Int.rangeTo#Int
//!     fqName: core.Int.rangeTo
//!     dispatchReceiverParameter: { name: this, type: core.Int }
//!     valueParameters: [ { name: other, type: core.Int } ]
//!     returnType: core.ranges.IntRange
//!   - id: core.internal.checkProgressionStep#Int
//!     fqName: core.internal.checkProgressionStep
//!     valueParameters: [ { name: step, type: core.Int } ]
//!     returnType: core.Int
//!
//! symbols:
//!   int: core.Int
//!   long: core.Long
//!   char: core.Char
//!   integerClasses: [core.Int, core.Long]
//!   charProgression: core.ranges.CharProgression
//!   intProgression: core.ranges.IntProgression
//!   longProgression: core.ranges.LongProgression
//!   progressionClasses: [core.ranges.IntProgression, core.ranges.IntRange]
//!   arrays: []
//!   checkProgressionStep:
//!     core.Int: core.internal.checkProgressionStep#Int
//! ```
//!
//! Every class and function a prelude mentions must be declared in it;
//! loading fails otherwise.

mod standard;
mod types;


pub use standard::{fq, STANDARD_PRELUDE_NAME};
pub use types::*;
