//! Program fixture loading and end-to-end recognition.

use std::fs;
use std::path::Path;

use loopir_ir::{ExprKind, Prelude, STANDARD_PRELUDE_NAME};
use loopir_lower::{ProgressionInfoBuilder, ProgressionType};
use loopir_tools::{recognize_program, resolve_prelude, Program, ProgramError};
use tempfile::tempdir;

const PROGRAM: &str = r#"
apiVersion: loopir/v1
kind: Program

metadata:
  name: loops

expressions:
  - name: countdown
    expr:
      kind:
        call:
          callee: "core.ranges.downTo#Int,Int"
          extensionReceiver: { kind: { getValue: n }, type: core.Int }
          arguments: [ { kind: { const: { int: 0 } }, type: core.Int } ]
      type: core.ranges.IntProgression
      span: { start: 4, end: 15 }
  - name: plain
    expr:
      kind: { getValue: xs }
      type: core.IntArray
"#;

#[test]
fn test_program_from_yaml() {
    let program = Program::from_yaml(PROGRAM).unwrap();
    assert_eq!(program.metadata.name, "loops");
    assert_eq!(program.prelude, None);
    assert_eq!(program.expressions.len(), 2);

    let countdown = &program.expressions[0];
    assert_eq!(countdown.name, "countdown");
    let call = countdown.expr.as_call().unwrap();
    assert_eq!(call.callee.as_str(), "core.ranges.downTo#Int,Int");
    assert_eq!(countdown.expr.span.end, 15);
    assert!(matches!(program.expressions[1].expr.kind, ExprKind::GetValue(ref n) if n == "xs"));
}

#[test]
fn test_invalid_kind() {
    let yaml = PROGRAM.replace("kind: Program", "kind: Prelude");
    assert!(matches!(
        Program::from_yaml(&yaml),
        Err(ProgramError::InvalidKind(_))
    ));
}

#[test]
fn test_missing_name() {
    let yaml = PROGRAM.replace("name: loops", "name: \"\"");
    assert!(matches!(
        Program::from_yaml(&yaml),
        Err(ProgramError::MissingField(_))
    ));
}

#[test]
fn test_duplicate_expression() {
    let yaml = PROGRAM.replace("name: plain", "name: countdown");
    assert!(matches!(
        Program::from_yaml(&yaml),
        Err(ProgramError::DuplicateExpression(n)) if n == "countdown"
    ));
}

#[test]
fn test_recognize_program() {
    let program = Program::from_yaml(PROGRAM).unwrap();
    let prelude = Prelude::standard();
    let builder = ProgressionInfoBuilder::new(&prelude).unwrap();

    let report = recognize_program(&builder, &program).unwrap();
    assert_eq!(report.program, "loops");
    assert_eq!(report.prelude, STANDARD_PRELUDE_NAME);
    assert_eq!(report.expressions.len(), 2);

    let countdown = &report.expressions[0];
    assert_eq!(countdown.progressions.len(), 1);
    let info = &countdown.progressions[0].info;
    assert_eq!(info.progression_type, ProgressionType::Int);
    assert!(!info.increasing);
    assert!(info.closed);

    let plain = &report.expressions[1];
    assert!(plain.progressions.is_empty());
    assert_eq!(plain.coverage.calls_visited, 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["expressions"][0]["coverage"]["recognized"], 1);
}

fn write_program(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join("program.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn test_resolve_standard_prelude() {
    let dir = tempdir().unwrap();
    let path = write_program(dir.path(), PROGRAM);
    let program = Program::load(&path).unwrap();

    let prelude = resolve_prelude(&program, &path, None).unwrap();
    assert_eq!(prelude.name, STANDARD_PRELUDE_NAME);
}

#[test]
fn test_resolve_named_and_explicit_prelude() {
    let dir = tempdir().unwrap();
    let named = PROGRAM.replace("expressions:", "prelude: custom\n\nexpressions:");
    let path = write_program(dir.path(), &named);
    let program = Program::load(&path).unwrap();
    assert_eq!(program.prelude.as_deref(), Some("custom"));

    // Not there yet.
    assert!(matches!(
        resolve_prelude(&program, &path, None),
        Err(ProgramError::UnknownPrelude(n)) if n == "custom"
    ));

    let custom = Prelude {
        name: "custom".to_string(),
        ..Prelude::standard()
    };
    let preludes_dir = dir.path().join("preludes");
    fs::create_dir(&preludes_dir).unwrap();
    fs::write(preludes_dir.join("custom.yaml"), custom.to_yaml().unwrap()).unwrap();

    let prelude = resolve_prelude(&program, &path, None).unwrap();
    assert_eq!(prelude.name, "custom");

    let explicit_path = dir.path().join("explicit.yaml");
    let explicit = Prelude {
        name: "explicit".to_string(),
        ..Prelude::standard()
    };
    fs::write(&explicit_path, explicit.to_yaml().unwrap()).unwrap();
    let prelude = resolve_prelude(&program, &path, Some(&explicit_path)).unwrap();
    assert_eq!(prelude.name, "explicit");
}
