//! Prelude type definitions and loading.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use loopir_foundation::{ClassId, FunctionId};

use crate::function::{FunctionTable, FunctionTableError, IrFunction};
use crate::symbols::Symbols;
use crate::types::{ClassHierarchy, IrType};

const API_VERSION: &str = "loopir/v1";
const KIND: &str = "Prelude";

/// Errors that can occur when loading or validating a prelude.
#[derive(Debug, Error)]
pub enum PreludeError {
    /// Failed to read the prelude file.
    #[error("failed to read prelude file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the prelude YAML.
    #[error("failed to parse prelude YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid API version.
    #[error("invalid apiVersion: expected 'loopir/v1', got '{0}'")]
    InvalidApiVersion(String),

    /// Invalid kind.
    #[error("invalid kind: expected 'Prelude', got '{0}'")]
    InvalidKind(String),

    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A class is used but never declared under `classes`.
    #[error("class '{class}' referenced by {context} is not declared")]
    UnknownClass { class: ClassId, context: String },

    /// A function is referenced by the symbol table but never declared.
    #[error("function '{function}' referenced by symbols is not declared")]
    UnknownFunction { function: FunctionId },

    /// Two function declarations share an id.
    #[error(transparent)]
    DuplicateFunction(#[from] FunctionTableError),
}

/// Result type for prelude operations.
pub type PreludeResult<T> = Result<T, PreludeError>;

/// Class hierarchy, function table and symbol table of a host library.
#[derive(Debug, Clone)]
pub struct Prelude {
    /// Prelude name (from `metadata.name`)
    pub name: String,
    pub hierarchy: ClassHierarchy,
    pub functions: FunctionTable,
    pub symbols: Symbols,
}

/// On-disk form of a prelude.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreludeConfig {
    /// API version for compatibility checking.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Kind must be "Prelude".
    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: PreludeMetadata,

    /// Declared classes with their direct supertypes.
    #[serde(default)]
    pub classes: IndexMap<ClassId, Vec<ClassId>>,

    /// Declared functions.
    #[serde(default)]
    pub functions: Vec<IrFunction>,

    /// Well-known classes and functions.
    #[serde(default)]
    pub symbols: Option<Symbols>,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

/// Metadata for a prelude.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreludeMetadata {
    /// Machine identifier for this prelude.
    pub name: String,

    /// Description of the library this prelude models.
    #[serde(default)]
    pub description: Option<String>,
}

impl PreludeConfig {
    /// Validate the envelope (API version, kind, required fields).
    fn validate_schema(&self) -> PreludeResult<()> {
        if self.api_version != API_VERSION {
            return Err(PreludeError::InvalidApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(PreludeError::InvalidKind(self.kind.clone()));
        }
        if self.metadata.name.is_empty() {
            return Err(PreludeError::MissingField("metadata.name".to_string()));
        }
        Ok(())
    }
}

impl Prelude {
    /// Load a prelude from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> PreludeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a prelude from a YAML string.
    pub fn from_yaml(yaml: &str) -> PreludeResult<Self> {
        let config: PreludeConfig = serde_yaml::from_str(yaml)?;
        Self::from_config(config)
    }

    /// Build a prelude from its on-disk form.
    ///
    /// # Errors
    ///
    /// Fails if the envelope is invalid, if a function id is declared twice,
    /// or if any class or function is referenced without being declared.
    pub fn from_config(config: PreludeConfig) -> PreludeResult<Self> {
        config.validate_schema()?;
        let PreludeConfig {
            metadata,
            classes,
            functions: declarations,
            symbols,
            ..
        } = config;
        let symbols = symbols.ok_or_else(|| PreludeError::MissingField("symbols".to_string()))?;

        let mut hierarchy = ClassHierarchy::new();
        for (class, supertypes) in &classes {
            hierarchy.declare(class.clone(), supertypes.clone());
        }
        for (class, supertypes) in &classes {
            for parent in supertypes {
                require_class(&hierarchy, parent, || format!("supertypes of '{class}'"))?;
            }
        }

        let mut functions = FunctionTable::new();
        for function in declarations {
            validate_function_types(&hierarchy, &function)?;
            functions.register(function)?;
        }

        for class in symbols.referenced_classes() {
            require_class(&hierarchy, class, || "symbols".to_string())?;
        }
        for function in symbols.referenced_functions() {
            if !functions.contains(function) {
                return Err(PreludeError::UnknownFunction {
                    function: function.clone(),
                });
            }
        }

        Ok(Self {
            name: metadata.name,
            hierarchy,
            functions,
            symbols,
        })
    }

    /// Convert back to the on-disk form.
    pub fn to_config(&self) -> PreludeConfig {
        PreludeConfig {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: PreludeMetadata {
                name: self.name.clone(),
                description: None,
            },
            classes: self
                .hierarchy
                .classes()
                .map(|class| (class.clone(), self.hierarchy.direct_supertypes(class).to_vec()))
                .collect(),
            functions: self.functions.iter().cloned().collect(),
            symbols: Some(self.symbols.clone()),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> PreludeResult<String> {
        Ok(serde_yaml::to_string(&self.to_config())?)
    }
}

fn require_class(
    hierarchy: &ClassHierarchy,
    class: &ClassId,
    context: impl FnOnce() -> String,
) -> PreludeResult<()> {
    if hierarchy.contains(class) {
        Ok(())
    } else {
        Err(PreludeError::UnknownClass {
            class: class.clone(),
            context: context(),
        })
    }
}

fn validate_function_types(hierarchy: &ClassHierarchy, function: &IrFunction) -> PreludeResult<()> {
    let receivers = function
        .dispatch_receiver_parameter
        .iter()
        .chain(function.extension_receiver_parameter.iter());
    let types: Vec<&IrType> = receivers
        .chain(function.value_parameters.iter())
        .map(|param| &param.ty)
        .chain(std::iter::once(&function.return_type))
        .collect();

    for ty in types {
        require_class(hierarchy, &ty.classifier, || {
            format!("function '{}'", function.id)
        })?;
    }
    Ok(())
}

/// Find prelude files in a project directory.
///
/// Preludes are stored in a `preludes/` subdirectory of the project root.
/// Each `.yaml` or `.yml` file in that directory is treated as a prelude.
pub fn find_preludes(project_dir: impl AsRef<Path>) -> Vec<std::path::PathBuf> {
    let preludes_dir = project_dir.as_ref().join("preludes");
    if !preludes_dir.exists() {
        return Vec::new();
    }

    let mut preludes = Vec::new();
    if let Ok(entries) = std::fs::read_dir(&preludes_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                preludes.push(path);
            }
        }
    }
    preludes.sort();
    preludes
}

/// Load all preludes from a project directory, keyed by name.
///
/// Files that fail to load are skipped with a warning.
pub fn load_preludes(project_dir: impl AsRef<Path>) -> HashMap<String, Prelude> {
    let mut preludes = HashMap::new();
    for path in find_preludes(project_dir) {
        match Prelude::load(&path) {
            Ok(prelude) => {
                tracing::debug!(name = %prelude.name, path = ?path, "prelude loaded");
                preludes.insert(prelude.name.clone(), prelude);
            }
            Err(e) => {
                tracing::warn!("Failed to load prelude from {:?}: {}", path, e);
            }
        }
    }
    preludes
}
