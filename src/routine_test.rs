use super::*;
use crate::ast::{Input, Instruction, Output};

const EXPORT: &str = r#"{
  "programs": [
    { "name": "MainProgram", "routines": [
      { "name": "MainRoutine", "rungs": [
        { "number": "0", "text": "  XIC(Start)OTE(Motor);  " },
        { "text": "[XIC(A),XIC(B)]OTE(C)" },
        { "number": "7", "text": "[XIC(A)OTE(B)" }
      ] },
      { "name": "Faults", "rungs": [] }
    ] },
    { "name": "Aux", "routines": [
      { "name": "MainRoutine", "rungs": [ { "text": "OTE(Lamp)" } ] }
    ] }
  ]
}"#;

fn index() -> RoutineIndex {
    RoutineIndex::from_json(EXPORT).unwrap()
}

#[test]
fn routines_use_qualified_names_in_order() {
    let idx = index();
    let names: Vec<&str> = idx.routines().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["MainProgram.MainRoutine", "MainProgram.Faults", "Aux.MainRoutine"]);
}

#[test]
fn labels_fall_back_to_position() {
    let idx = index();
    let routine = idx.routine("MainProgram.MainRoutine").unwrap();
    let labels: Vec<String> = routine.rungs.iter().enumerate().map(|(i, r)| r.label(i)).collect();
    assert_eq!(labels, vec!["0", "2", "7"]);
}

#[test]
fn parse_rung_trims_and_parses_selected_text() {
    let program = index().parse_rung("MainProgram.MainRoutine", 0).unwrap();
    assert_eq!(program.rungs.len(), 1);
    assert_eq!(program.rungs[0].inputs, Some(Input::Series(vec![Instruction::new("XIC", "Start")])));
    assert_eq!(program.rungs[0].output, Some(Output::Single(Instruction::new("OTE", "Motor"))));
}

#[test]
fn unknown_routine_is_reported() {
    let err = index().rung("Nope.Routine", 0).unwrap_err();
    assert!(matches!(err, RoutineError::UnknownRoutine(ref name) if name == "Nope.Routine"));
}

#[test]
fn rung_index_out_of_range() {
    let err = index().rung("MainProgram.Faults", 0).unwrap_err();
    assert!(matches!(err, RoutineError::RungOutOfRange { index: 0, len: 0, .. }));
}

#[test]
fn parse_errors_pass_through() {
    let err = index().parse_rung("MainProgram.MainRoutine", 2).unwrap_err();
    assert!(matches!(err, RoutineError::Parse(ParseError::UnmatchedBracket { .. })));
}

#[test]
fn duplicate_qualified_names_keep_first() {
    let json = r#"{ "programs": [
        { "name": "P", "routines": [ { "name": "R", "rungs": [ { "text": "OTE(A)" } ] } ] },
        { "name": "P", "routines": [ { "name": "R", "rungs": [] } ] }
    ] }"#;
    let idx = RoutineIndex::from_json(json).unwrap();
    assert_eq!(idx.routines().len(), 1);
    assert_eq!(idx.routines()[0].rungs.len(), 1);
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(RoutineIndex::from_json("{ not json"), Err(RoutineError::Json(_))));
    assert!(matches!(RoutineIndex::from_json(r#"{ "programs": 3 }"#), Err(RoutineError::Json(_))));
}

#[test]
fn empty_document_has_no_routines() {
    assert!(RoutineIndex::from_json("{}").unwrap().routines().is_empty());
}
