//! Recognition against a prelude loaded from YAML, on IR read from JSON.

use loopir_ir::{ExprKind, FunctionId, IrExpr, Prelude};
use loopir_lower::{scan_progressions, LowerError, ProgressionInfoBuilder, ProgressionType};

const PRELUDE: &str = r#"
apiVersion: loopir/v1
kind: Prelude

metadata:
  name: ints-only

classes:
  core.Any: []
  core.Int: [core.Any]
  core.Long: [core.Any]
  core.Char: [core.Any]
  core.ranges.CharProgression: [core.Any]
  core.ranges.IntProgression: [core.Any]
  core.ranges.LongProgression: [core.Any]
  core.ranges.IntRange: [core.ranges.IntProgression]

functions:
  - id: core.Int.rangeTo#Int
    fqName: core.Int.rangeTo
    dispatchReceiverParameter: { name: this, type: core.Int }
    valueParameters: [ { name: other, type: core.Int } ]
    returnType: core.ranges.IntRange
  - id: core.ranges.step#IntProgression
    fqName: core.ranges.step
    extensionReceiverParameter: { name: receiver, type: core.ranges.IntProgression }
    valueParameters: [ { name: step, type: core.Int } ]
    returnType: core.ranges.IntProgression
  - id: core.internal.checkProgressionStep#Int
    fqName: core.internal.checkProgressionStep
    valueParameters: [ { name: step, type: core.Int } ]
    returnType: core.Int

symbols:
  int: core.Int
  long: core.Long
  char: core.Char
  integerClasses: [core.Int]
  charProgression: core.ranges.CharProgression
  intProgression: core.ranges.IntProgression
  longProgression: core.ranges.LongProgression
  progressionClasses: [core.ranges.IntProgression, core.ranges.IntRange]
  arrays: []
  checkProgressionStep:
    core.Int: core.internal.checkProgressionStep#Int
"#;

/// `(lo..hi) step n`
const STEPPED_RANGE: &str = r#"{
    "kind": { "call": {
        "callee": "core.ranges.step#IntProgression",
        "extensionReceiver": {
            "kind": { "call": {
                "callee": "core.Int.rangeTo#Int",
                "dispatchReceiver": { "kind": { "getValue": "lo" }, "type": "core.Int", "span": { "start": 0, "end": 2 } },
                "arguments": [ { "kind": { "getValue": "hi" }, "type": "core.Int", "span": { "start": 4, "end": 6 } } ]
            } },
            "type": "core.ranges.IntRange",
            "span": { "start": 0, "end": 6 }
        },
        "arguments": [ { "kind": { "getValue": "n" }, "type": "core.Int", "span": { "start": 12, "end": 13 } } ]
    } },
    "type": "core.ranges.IntProgression",
    "span": { "start": 0, "end": 13 }
}"#;

fn stepped_range() -> IrExpr {
    serde_json::from_str(STEPPED_RANGE).unwrap()
}

#[test]
fn recognizes_with_configured_prelude() {
    let prelude = Prelude::from_yaml(PRELUDE).unwrap();
    let builder = ProgressionInfoBuilder::new(&prelude).unwrap();

    let info = builder.recognize(&stepped_range()).unwrap().unwrap();
    assert_eq!(info.progression_type, ProgressionType::Int);
    assert!(info.closed && info.increasing && info.need_last_calculation);
    assert_eq!(info.first.kind, ExprKind::GetValue("lo".into()));
    assert_eq!(info.bound.kind, ExprKind::GetValue("hi".into()));

    let step = info.step.unwrap();
    let check = step.as_call().unwrap();
    assert_eq!(
        check.callee,
        FunctionId::from("core.internal.checkProgressionStep#Int")
    );
    assert_eq!(step.span.start, 12);
}

#[test]
fn scan_over_configured_prelude() {
    let prelude = Prelude::from_yaml(PRELUDE).unwrap();
    let builder = ProgressionInfoBuilder::new(&prelude).unwrap();

    let scan = scan_progressions(&builder, &stepped_range()).unwrap();
    assert_eq!(scan.calls_visited, 2);
    assert_eq!(scan.coverage().recognized, 2);
}

#[test]
fn missing_validator_is_reported() {
    let yaml = PRELUDE.replace(
        "  checkProgressionStep:\n    core.Int: core.internal.checkProgressionStep#Int\n",
        "",
    );
    let prelude = Prelude::from_yaml(&yaml).unwrap();
    assert!(prelude.symbols.check_progression_step.is_empty());

    let builder = ProgressionInfoBuilder::new(&prelude).unwrap();
    let err = builder.recognize(&stepped_range()).unwrap_err();
    assert!(matches!(err, LowerError::MissingStepCheck { .. }));
    assert!(err.to_string().contains("core.Int"));
}
