//! Typed identifiers for IR symbols
//!
//! Classes and functions are identified by typed wrappers around a
//! qualified name. The wrappers keep class and function keys from being
//! mixed up in the symbol tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::FqName;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub FqName);

        impl $name {
            /// Creates a new identifier from a name.
            pub fn new(name: impl Into<FqName>) -> Self {
                Self(name.into())
            }

            /// Returns the identifier as a string.
            pub fn as_str(&self) -> String {
                self.0.to_string()
            }

            /// Returns a reference to the underlying name.
            pub fn name(&self) -> &FqName {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(FqName::from_dotted(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(FqName::from_dotted(&s))
            }
        }

        impl From<FqName> for $name {
            fn from(name: FqName) -> Self {
                Self(name)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a class (e.g., "core.Int", "core.ranges.IntRange")
    ClassId
);

define_id!(
    /// Unique identifier for a function declaration.
    ///
    /// Overloads share a qualified name, so function ids carry a
    /// disambiguating suffix (e.g., "core.ranges.until#Int").
    FunctionId
);
