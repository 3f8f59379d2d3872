//! Fully-qualified names for classes and functions
//!
//! Names are dot-separated segments:
//! - `core.Int`
//! - `core.ranges.until`
//! - `core.collections.<get-indices>`
//!
//! Matchers compare callees by their qualified name, so `FqName` is used as
//! a key in every symbol table of the IR.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fully-qualified, dot-separated name.
///
/// Serialized as its dotted string form so configuration files can spell
/// names the way they appear in source.
///
/// # Examples
///
/// ```
/// # use loopir_foundation::FqName;
/// let name = FqName::from("core.ranges.until");
/// assert_eq!(name.segments(), &["core", "ranges", "until"]);
/// assert_eq!(name.last(), Some("until"));
/// assert_eq!(name.to_string(), "core.ranges.until");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FqName {
    segments: Vec<String>,
}

impl FqName {
    /// Create a name from a list of segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parse a name from its dot-separated form.
    pub fn from_dotted(s: &str) -> Self {
        Self {
            segments: s.split('.').map(String::from).collect(),
        }
    }

    /// Get the name segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the last segment (short name).
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for FqName {
    fn from(s: &str) -> Self {
        Self::from_dotted(s)
    }
}

impl From<String> for FqName {
    fn from(s: String) -> Self {
        Self::from_dotted(&s)
    }
}

impl From<FqName> for String {
    fn from(name: FqName) -> Self {
        name.to_string()
    }
}

impl PartialEq<&str> for FqName {
    fn eq(&self, other: &&str) -> bool {
        self.segments.join(".") == *other
    }
}
