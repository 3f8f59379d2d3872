//! The standard prelude.
//!
//! Declares the numeric and character classes, the progression and range
//! classes, the array classes and the functions that construct, step and
//! index progressions over them.

use indexmap::{IndexMap, IndexSet};

use loopir_foundation::{ClassId, FunctionId};

use super::types::Prelude;
use crate::function::IrFunction;
use crate::symbols::Symbols;
use crate::types::{ClassHierarchy, IrType};

/// Name of the prelude returned by [`Prelude::standard`].
pub const STANDARD_PRELUDE_NAME: &str = "standard";

/// Qualified names of the standard progression functions.
pub mod fq {
    /// `array.indices` accessor
    pub const INDICES: &str = "core.collections.<get-indices>";
    /// `array.lastIndex` accessor
    pub const LAST_INDEX: &str = "core.collections.<get-lastIndex>";
    /// Short name shared by every `rangeTo` method
    pub const RANGE_TO: &str = "rangeTo";
    pub const UNTIL: &str = "core.ranges.until";
    pub const DOWN_TO: &str = "core.ranges.downTo";
    pub const STEP: &str = "core.ranges.step";
    /// Runtime validator rejecting non-positive steps
    pub const CHECK_PROGRESSION_STEP: &str = "core.internal.checkProgressionStep";
}

const ANY: &str = "core.Any";
const NUMBER: &str = "core.Number";
const BYTE: &str = "core.Byte";
const SHORT: &str = "core.Short";
const INT: &str = "core.Int";
const LONG: &str = "core.Long";
const CHAR: &str = "core.Char";
const BOOLEAN: &str = "core.Boolean";

const CHAR_PROGRESSION: &str = "core.ranges.CharProgression";
const INT_PROGRESSION: &str = "core.ranges.IntProgression";
const LONG_PROGRESSION: &str = "core.ranges.LongProgression";
const CHAR_RANGE: &str = "core.ranges.CharRange";
const INT_RANGE: &str = "core.ranges.IntRange";
const LONG_RANGE: &str = "core.ranges.LongRange";

const ARRAYS: &[&str] = &[
    "core.Array",
    "core.ByteArray",
    "core.ShortArray",
    "core.IntArray",
    "core.LongArray",
    "core.CharArray",
    "core.BooleanArray",
];

/// Overloads of `rangeTo`, `until` and `downTo`:
/// (receiver, argument, range result, progression result).
const RANGE_OVERLOADS: &[(&str, &str, &str, &str)] = &[
    (BYTE, BYTE, INT_RANGE, INT_PROGRESSION),
    (SHORT, SHORT, INT_RANGE, INT_PROGRESSION),
    (INT, INT, INT_RANGE, INT_PROGRESSION),
    (INT, LONG, LONG_RANGE, LONG_PROGRESSION),
    (LONG, INT, LONG_RANGE, LONG_PROGRESSION),
    (LONG, LONG, LONG_RANGE, LONG_PROGRESSION),
    (CHAR, CHAR, CHAR_RANGE, CHAR_PROGRESSION),
];

/// (progression, step argument) of the `step` overloads.
const STEP_OVERLOADS: &[(&str, &str)] = &[
    (INT_PROGRESSION, INT),
    (LONG_PROGRESSION, LONG),
    (CHAR_PROGRESSION, INT),
];

fn short_name(class: &str) -> &str {
    class.rsplit('.').next().unwrap_or(class)
}

fn class_ids(names: &[&str]) -> IndexSet<ClassId> {
    names.iter().map(|name| ClassId::from(*name)).collect()
}

impl Prelude {
    /// The standard library prelude.
    pub fn standard() -> Self {
        Self {
            name: STANDARD_PRELUDE_NAME.to_string(),
            hierarchy: standard_hierarchy(),
            functions: standard_functions().collect(),
            symbols: standard_symbols(),
        }
    }
}

fn standard_hierarchy() -> ClassHierarchy {
    let any = || vec![ClassId::from(ANY)];
    let mut hierarchy = ClassHierarchy::new();

    hierarchy.declare(ANY, vec![]);
    hierarchy.declare(NUMBER, any());
    for class in [BYTE, SHORT, INT, LONG] {
        hierarchy.declare(class, vec![ClassId::from(NUMBER)]);
    }
    hierarchy.declare(CHAR, any());
    hierarchy.declare(BOOLEAN, any());

    for (progression, range) in [
        (CHAR_PROGRESSION, CHAR_RANGE),
        (INT_PROGRESSION, INT_RANGE),
        (LONG_PROGRESSION, LONG_RANGE),
    ] {
        hierarchy.declare(progression, any());
        hierarchy.declare(range, vec![ClassId::from(progression)]);
    }

    for array in ARRAYS {
        hierarchy.declare(*array, any());
    }
    hierarchy
}

fn standard_functions() -> impl Iterator<Item = IrFunction> {
    let accessors = ARRAYS.iter().flat_map(|array| {
        let receiver = IrType::of(*array);
        [
            IrFunction::new(
                format!("{}#{}", fq::INDICES, short_name(array)),
                fq::INDICES,
                IrType::of(INT_RANGE),
            )
            .with_extension_receiver(receiver.clone()),
            IrFunction::new(
                format!("{}#{}", fq::LAST_INDEX, short_name(array)),
                fq::LAST_INDEX,
                IrType::of(INT),
            )
            .with_extension_receiver(receiver),
        ]
    });

    let constructors = RANGE_OVERLOADS
        .iter()
        .flat_map(|(receiver, argument, range, progression)| {
            let suffix = format!("{},{}", short_name(receiver), short_name(argument));
            let range_to_name = format!("{}.{}", receiver, fq::RANGE_TO);
            [
                IrFunction::new(
                    format!("{}#{}", range_to_name, short_name(argument)),
                    range_to_name.as_str(),
                    IrType::of(*range),
                )
                .with_dispatch_receiver(IrType::of(*receiver))
                .with_parameter("other", IrType::of(*argument)),
                IrFunction::new(
                    format!("{}#{}", fq::UNTIL, suffix),
                    fq::UNTIL,
                    IrType::of(*range),
                )
                .with_extension_receiver(IrType::of(*receiver))
                .with_parameter("to", IrType::of(*argument)),
                IrFunction::new(
                    format!("{}#{}", fq::DOWN_TO, suffix),
                    fq::DOWN_TO,
                    IrType::of(*progression),
                )
                .with_extension_receiver(IrType::of(*receiver))
                .with_parameter("to", IrType::of(*argument)),
            ]
        });

    let steps = STEP_OVERLOADS.iter().map(|(progression, step)| {
        IrFunction::new(
            format!("{}#{}", fq::STEP, short_name(progression)),
            fq::STEP,
            IrType::of(*progression),
        )
        .with_extension_receiver(IrType::of(*progression))
        .with_parameter("step", IrType::of(*step))
    });

    let checks = [INT, LONG].into_iter().map(|class| {
        IrFunction::new(
            check_progression_step_id(class),
            fq::CHECK_PROGRESSION_STEP,
            IrType::of(class),
        )
        .with_parameter("step", IrType::of(class))
    });

    accessors.chain(constructors).chain(steps).chain(checks)
}

fn check_progression_step_id(class: &str) -> FunctionId {
    FunctionId::from(format!("{}#{}", fq::CHECK_PROGRESSION_STEP, short_name(class)))
}

fn standard_symbols() -> Symbols {
    let array_last_index: IndexMap<ClassId, FunctionId> = ARRAYS
        .iter()
        .map(|array| {
            (
                ClassId::from(*array),
                FunctionId::from(format!("{}#{}", fq::LAST_INDEX, short_name(array))),
            )
        })
        .collect();

    let check_progression_step: IndexMap<ClassId, FunctionId> = [INT, LONG]
        .into_iter()
        .map(|class| (ClassId::from(class), check_progression_step_id(class)))
        .collect();

    Symbols {
        int: ClassId::from(INT),
        long: ClassId::from(LONG),
        char: ClassId::from(CHAR),
        integer_classes: class_ids(&[BYTE, SHORT, INT, LONG]),
        char_progression: ClassId::from(CHAR_PROGRESSION),
        int_progression: ClassId::from(INT_PROGRESSION),
        long_progression: ClassId::from(LONG_PROGRESSION),
        progression_classes: class_ids(&[
            CHAR_PROGRESSION,
            INT_PROGRESSION,
            LONG_PROGRESSION,
            CHAR_RANGE,
            INT_RANGE,
            LONG_RANGE,
        ]),
        arrays: class_ids(ARRAYS),
        array_last_index,
        check_progression_step,
    }
}
