//! Source location tracking.
//!
//! IR nodes carry the byte range of the source they were produced from.
//! Nodes synthesized by lowering reuse the span of the node they replace so
//! diagnostics raised at runtime point back at the original code.

use serde::{Deserialize, Serialize};

/// Compact source location reference.
///
/// Points to a byte range `[start, end)` in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of start position
    pub start: u32,
    /// Byte offset of end position (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_offsets() {
        let span = Span::new(4, 10);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"{"start":4,"end":10}"#);
        assert_eq!(serde_json::from_str::<Span>(&json).unwrap(), span);
    }
}
