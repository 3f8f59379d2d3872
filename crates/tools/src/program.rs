//! IR program fixtures.
//!
//! A program is a YAML document holding named IR expressions, the unit the
//! `recognize` tool scans:
//!
//! ```yaml
//! apiVersion: loopir/v1
//! kind: Program
//!
//! metadata:
//!   name: loops
//!
//! # optional: name of a prelude under ./preludes next to this file
//! prelude: ints-only
//!
//! expressions:
//!   - name: countdown
//!     expr:
//!       kind:
//!         call:
//!           callee: "core.ranges.downTo#Int,Int"
//!           extensionReceiver: { kind: { getValue: n }, type: core.Int }
//!           arguments: [ { kind: { const: { int: 0 } }, type: core.Int } ]
//!       type: core.ranges.IntProgression
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use loopir_ir::{load_preludes, IrExpr, Prelude, PreludeError};

const API_VERSION: &str = "loopir/v1";
const KIND: &str = "Program";

/// Errors that can occur when loading a program.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Failed to read the program file.
    #[error("failed to read program file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the program YAML.
    #[error("failed to parse program YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid API version.
    #[error("invalid apiVersion: expected 'loopir/v1', got '{0}'")]
    InvalidApiVersion(String),

    /// Invalid kind.
    #[error("invalid kind: expected 'Program', got '{0}'")]
    InvalidKind(String),

    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Two expressions share a name.
    #[error("duplicate expression name: {0}")]
    DuplicateExpression(String),

    /// The named prelude was not found next to the program.
    #[error("prelude '{0}' not found")]
    UnknownPrelude(String),

    /// The prelude failed to load.
    #[error(transparent)]
    Prelude(#[from] PreludeError),
}

/// A set of named IR expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// API version for compatibility checking.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Kind must be "Program".
    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ProgramMetadata,

    /// Name of the prelude to recognize against; the standard prelude if absent.
    #[serde(default)]
    pub prelude: Option<String>,

    #[serde(default)]
    pub expressions: Vec<NamedExpr>,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

/// Metadata for a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramMetadata {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// An expression with the name it is reported under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedExpr {
    pub name: String,
    pub expr: IrExpr,
}

impl Program {
    /// Load a program from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a program from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProgramError> {
        let program: Program = serde_yaml::from_str(yaml)?;
        program.validate()?;
        Ok(program)
    }

    fn validate(&self) -> Result<(), ProgramError> {
        if self.api_version != API_VERSION {
            return Err(ProgramError::InvalidApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(ProgramError::InvalidKind(self.kind.clone()));
        }
        if self.metadata.name.is_empty() {
            return Err(ProgramError::MissingField("metadata.name".to_string()));
        }

        let mut seen = HashSet::new();
        for named in &self.expressions {
            if !seen.insert(named.name.as_str()) {
                return Err(ProgramError::DuplicateExpression(named.name.clone()));
            }
        }
        Ok(())
    }
}

/// Pick the prelude to recognize `program` against.
///
/// An explicit prelude file wins; otherwise the prelude named by the
/// program is looked up in the `preludes/` directory next to
/// `program_path`; otherwise the standard prelude is used.
pub fn resolve_prelude(
    program: &Program,
    program_path: &Path,
    explicit: Option<&Path>,
) -> Result<Prelude, ProgramError> {
    if let Some(path) = explicit {
        let prelude = Prelude::load(path)?;
        info!(name = %prelude.name, path = %path.display(), "using prelude file");
        return Ok(prelude);
    }

    let Some(name) = &program.prelude else {
        debug!("using standard prelude");
        return Ok(Prelude::standard());
    };

    let project_dir = program_path.parent().unwrap_or_else(|| Path::new("."));
    load_preludes(project_dir)
        .remove(name)
        .ok_or_else(|| ProgramError::UnknownPrelude(name.clone()))
}
