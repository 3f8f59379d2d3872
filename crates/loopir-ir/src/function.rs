//! Function declarations and the function table
//!
//! Calls in the IR refer to their callee by [`FunctionId`]. The
//! [`FunctionTable`] resolves those ids to declarations carrying the
//! information matchers inspect: qualified name, receivers, value
//! parameters and return type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use loopir_foundation::{FqName, FunctionId};

use crate::types::IrType;

/// A formal parameter (value parameter or receiver) of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrValueParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IrType,
}

impl IrValueParameter {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function declaration.
///
/// A function may have a dispatch receiver (it is a method of its
/// receiver's class), an extension receiver (it extends the receiver's
/// class from outside), both, or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrFunction {
    pub id: FunctionId,
    pub fq_name: FqName,
    #[serde(default)]
    pub dispatch_receiver_parameter: Option<IrValueParameter>,
    #[serde(default)]
    pub extension_receiver_parameter: Option<IrValueParameter>,
    #[serde(default)]
    pub value_parameters: Vec<IrValueParameter>,
    pub return_type: IrType,
}

impl IrFunction {
    /// Create a function without receivers or parameters.
    pub fn new(id: impl Into<FunctionId>, fq_name: impl Into<FqName>, return_type: IrType) -> Self {
        Self {
            id: id.into(),
            fq_name: fq_name.into(),
            dispatch_receiver_parameter: None,
            extension_receiver_parameter: None,
            value_parameters: Vec::new(),
            return_type,
        }
    }

    /// Builder method: make this a method of `ty`.
    pub fn with_dispatch_receiver(mut self, ty: IrType) -> Self {
        self.dispatch_receiver_parameter = Some(IrValueParameter::new("<this>", ty));
        self
    }

    /// Builder method: make this an extension of `ty`.
    pub fn with_extension_receiver(mut self, ty: IrType) -> Self {
        self.extension_receiver_parameter = Some(IrValueParameter::new("<receiver>", ty));
        self
    }

    /// Builder method: append a value parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, ty: IrType) -> Self {
        self.value_parameters.push(IrValueParameter::new(name, ty));
        self
    }
}

/// Errors raised while populating a [`FunctionTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunctionTableError {
    /// Two declarations share the same id.
    #[error("duplicate function id: {0}")]
    DuplicateFunction(FunctionId),
}

/// Resolves function ids to their declarations.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: IndexMap<FunctionId, IrFunction>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionTableError::DuplicateFunction`] if the id is taken.
    pub fn register(&mut self, function: IrFunction) -> Result<(), FunctionTableError> {
        if self.functions.contains_key(&function.id) {
            return Err(FunctionTableError::DuplicateFunction(function.id));
        }
        self.functions.insert(function.id.clone(), function);
        Ok(())
    }

    /// Insert a declaration, replacing any previous one with the same id.
    pub fn insert(&mut self, function: IrFunction) -> Option<IrFunction> {
        self.functions.insert(function.id.clone(), function)
    }

    pub fn get(&self, id: &FunctionId) -> Option<&IrFunction> {
        self.functions.get(id)
    }

    pub fn contains(&self, id: &FunctionId) -> bool {
        self.functions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate over declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &IrFunction> {
        self.functions.values()
    }
}

impl FromIterator<IrFunction> for FunctionTable {
    /// Collect declarations; a later declaration replaces an earlier one with the same id.
    fn from_iter<I: IntoIterator<Item = IrFunction>>(iter: I) -> Self {
        let mut table = FunctionTable::new();
        for function in iter {
            table.insert(function);
        }
        table
    }
}
