//! IR types and the class hierarchy
//!
//! Types in the IR are a classifier plus nullability. Subtyping is nominal:
//! a type is a subtype of another when its class reaches the other class
//! through declared supertypes and the nullability is compatible.

use std::collections::VecDeque;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use loopir_foundation::ClassId;

/// Static type of an IR expression or parameter.
///
/// Serialized as the class name with a trailing `?` for nullable types
/// (`"core.Int"`, `"core.Int?"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IrType {
    /// Class of values of this type
    pub classifier: ClassId,
    /// Whether `null` is a member of this type
    pub nullable: bool,
}

impl IrType {
    /// Non-null type of the given class.
    pub fn of(classifier: impl Into<ClassId>) -> Self {
        Self {
            classifier: classifier.into(),
            nullable: false,
        }
    }

    /// Nullable variant of this type.
    pub fn nullable(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            nullable: true,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.classifier)
        } else {
            write!(f, "{}", self.classifier)
        }
    }
}

impl From<String> for IrType {
    fn from(s: String) -> Self {
        match s.strip_suffix('?') {
            Some(class) => IrType::of(class).nullable(),
            None => IrType::of(s),
        }
    }
}

impl From<IrType> for String {
    fn from(ty: IrType) -> Self {
        ty.to_string()
    }
}

/// Nominal class hierarchy.
///
/// Maps every declared class to its direct supertypes. Classes that were
/// never declared have no supertypes and are only subclasses of themselves.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    supertypes: IndexMap<ClassId, Vec<ClassId>>,
}

impl ClassHierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class with its direct supertypes.
    ///
    /// Declaring a class twice replaces its supertypes.
    pub fn declare(&mut self, class: impl Into<ClassId>, supertypes: Vec<ClassId>) {
        self.supertypes.insert(class.into(), supertypes);
    }

    /// Check if a class has been declared.
    pub fn contains(&self, class: &ClassId) -> bool {
        self.supertypes.contains_key(class)
    }

    /// Iterate over declared classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassId> {
        self.supertypes.keys()
    }

    /// Direct supertypes of a class.
    pub fn direct_supertypes(&self, class: &ClassId) -> &[ClassId] {
        self.supertypes
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if `sub` is `sup` or reaches it through supertypes.
    ///
    /// Cyclic declarations terminate: each class is visited once.
    pub fn is_subclass_of(&self, sub: &ClassId, sup: &ClassId) -> bool {
        if sub == sup {
            return true;
        }

        let mut visited: IndexSet<&ClassId> = IndexSet::new();
        let mut queue: VecDeque<&ClassId> = VecDeque::new();
        queue.push_back(sub);

        while let Some(class) = queue.pop_front() {
            if !visited.insert(class) {
                continue;
            }
            for parent in self.direct_supertypes(class) {
                if parent == sup {
                    return true;
                }
                queue.push_back(parent);
            }
        }
        false
    }

    /// Check if `ty` is a subtype of `of`.
    ///
    /// A nullable type is never a subtype of a non-null type.
    pub fn is_subtype_of(&self, ty: &IrType, of: &IrType) -> bool {
        if ty.nullable && !of.nullable {
            return false;
        }
        self.is_subclass_of(&ty.classifier, &of.classifier)
    }
}
