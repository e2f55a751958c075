use super::*;

#[test]
fn parses_simple_contact() {
    let instr = parse_instruction("XIC(Start)").unwrap();
    assert_eq!(instr, Instruction::new("XIC", "Start"));
}

#[test]
fn trims_name_and_args() {
    let instr = parse_instruction("  OTE ( Motor_Run )  ").unwrap();
    assert_eq!(instr.kind, "OTE");
    assert_eq!(instr.tag, "Motor_Run");
}

#[test]
fn keeps_embedded_commas_verbatim() {
    let instr = parse_instruction("GE(Tank.Level, 50)").unwrap();
    assert_eq!(instr.kind, "GE");
    assert_eq!(instr.tag, "Tank.Level, 50");
}

#[test]
fn allows_empty_argument_list() {
    let instr = parse_instruction("NOP()").unwrap();
    assert_eq!(instr, Instruction::new("NOP", ""));
}

#[test]
fn rejects_empty_token() {
    let err = parse_instruction("   ").unwrap_err();
    assert_eq!(err, ParseError::MalformedInstruction { token: "   ".into() });
}

#[test]
fn rejects_missing_parentheses() {
    assert!(matches!(parse_instruction("XIC"), Err(ParseError::MalformedInstruction { .. })));
    assert!(matches!(parse_instruction("XIC(A"), Err(ParseError::MalformedInstruction { .. })));
    assert!(matches!(parse_instruction("XIC(A)B"), Err(ParseError::MalformedInstruction { .. })));
}

#[test]
fn rejects_missing_or_odd_name() {
    assert!(matches!(parse_instruction("(A)"), Err(ParseError::MalformedInstruction { .. })));
    assert!(matches!(parse_instruction("X-C(A)"), Err(ParseError::MalformedInstruction { .. })));
}

#[test]
fn call_tokens_finds_calls_in_order() {
    let text = "XIC(A)XIO(B) OTE(C)";
    let found: Vec<&str> = call_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(found, vec!["XIC(A)", "XIO(B)", "OTE(C)"]);
}

#[test]
fn call_tokens_skips_bare_words_and_unclosed_calls() {
    let text = "junk XIC(A) words OTE(B";
    let found: Vec<&str> = call_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(found, vec!["XIC(A)"]);
}

#[test]
fn call_tokens_keeps_brackets_inside_arguments() {
    let text = "[XIC(Data[3]),XIO(B)]";
    let found: Vec<&str> = call_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(found, vec!["XIC(Data[3])", "XIO(B)"]);
}

#[test]
fn call_tokens_ignores_non_ascii_text() {
    let text = "Ünïcode XIC(Tag_1) → OTE(Out)";
    let found: Vec<&str> = call_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(found, vec!["XIC(Tag_1)", "OTE(Out)"]);
}

#[test]
fn parse_calls_returns_instructions() {
    let instrs = parse_calls("XIC(A)XIC(B)").unwrap();
    assert_eq!(instrs, vec![Instruction::new("XIC", "A"), Instruction::new("XIC", "B")]);
}
