//! Symbol table for loop lowering
//!
//! Well-known classes and functions that loop lowering needs to recognize
//! progressions and to synthesize replacement code. The table is an
//! explicit value passed to the passes, never ambient global state.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use loopir_foundation::{ClassId, FunctionId};

use crate::types::IrType;

/// Well-known classes and functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbols {
    /// 32-bit integer class
    pub int: ClassId,
    /// 64-bit integer class
    pub long: ClassId,
    /// Character class
    pub char: ClassId,

    /// All integral classes (byte, short, int, long)
    pub integer_classes: IndexSet<ClassId>,

    pub char_progression: ClassId,
    pub int_progression: ClassId,
    pub long_progression: ClassId,

    /// Progressions and the ranges derived from them
    pub progression_classes: IndexSet<ClassId>,

    /// Array-like classes that expose `indices`
    pub arrays: IndexSet<ClassId>,

    /// Array class -> `lastIndex` accessor
    #[serde(default)]
    pub array_last_index: IndexMap<ClassId, FunctionId>,

    /// Step class -> runtime step validator
    #[serde(default)]
    pub check_progression_step: IndexMap<ClassId, FunctionId>,
}

impl Symbols {
    /// Classes whose values can be elements of a progression.
    ///
    /// Integral classes first, then `char`.
    pub fn progression_element_classes(&self) -> IndexSet<ClassId> {
        let mut classes = self.integer_classes.clone();
        classes.insert(self.char.clone());
        classes
    }

    pub fn int_type(&self) -> IrType {
        IrType::of(self.int.clone())
    }

    /// Every class the table mentions, for consistency checks.
    pub fn referenced_classes(&self) -> impl Iterator<Item = &ClassId> {
        [
            &self.int,
            &self.long,
            &self.char,
            &self.char_progression,
            &self.int_progression,
            &self.long_progression,
        ]
        .into_iter()
        .chain(self.integer_classes.iter())
        .chain(self.progression_classes.iter())
        .chain(self.arrays.iter())
        .chain(self.array_last_index.keys())
        .chain(self.check_progression_step.keys())
    }

    /// Every function the table mentions, for consistency checks.
    pub fn referenced_functions(&self) -> impl Iterator<Item = &FunctionId> {
        self.array_last_index
            .values()
            .chain(self.check_progression_step.values())
    }
}
