use pretty_assertions::assert_eq;
use tis_rs::{assemble, AsmError};

#[test]
fn err_unknown_opcode() {
    assert_eq!(
        assemble("XYZ").unwrap_err(),
        AsmError::UnknownOpcode { line: 1, token: "XYZ".into() }
    );
    assert!(matches!(assemble("nop"), Err(AsmError::UnknownOpcode { .. })));
    assert!(matches!(assemble("L: MOVE 1, ACC"), Err(AsmError::UnknownOpcode { .. })));
}

#[test]
fn err_too_many_instructions() {
    let src = "NOP\n".repeat(17);
    assert_eq!(
        assemble(&src).unwrap_err(),
        AsmError::TooManyInstructions { line: 17, max: 16 }
    );
}

#[test]
fn err_label_after_full_program() {
    let src = format!("{}END:", "NOP\n".repeat(16));
    assert!(matches!(
        assemble(&src),
        Err(AsmError::TooManyInstructions { line: 17, .. })
    ));
}

#[test]
fn err_duplicate_label() {
    assert_eq!(
        assemble("A:\nB: NOP").unwrap_err(),
        AsmError::DuplicateLabel { line: 2, label: "B".into() }
    );
    assert_eq!(
        assemble("A: NOP\nA: NEG").unwrap_err(),
        AsmError::DuplicateLabel { line: 2, label: "A".into() }
    );
}

#[test]
fn err_undefined_label() {
    assert_eq!(
        assemble("NOP\nJMP NOWHERE").unwrap_err(),
        AsmError::UndefinedLabelReference { line: 2, label: "NOWHERE".into() }
    );
    // label matching is exact
    assert!(matches!(
        assemble("loop: NOP\nJMP LOOP"),
        Err(AsmError::UndefinedLabelReference { .. })
    ));
}

#[test]
fn err_missing_operand() {
    assert_eq!(
        assemble("MOV 1").unwrap_err(),
        AsmError::MissingOperand { line: 1, op: "MOV", expected: 2 }
    );
    assert!(matches!(assemble("ADD"), Err(AsmError::MissingOperand { .. })));
    assert!(matches!(assemble("JEZ # x"), Err(AsmError::MissingOperand { .. })));
}

#[test]
fn err_unparsable_operand() {
    assert_eq!(
        assemble("ADD FOO").unwrap_err(),
        AsmError::UnparsableOperand { line: 1, token: "FOO".into() }
    );
    assert_eq!(
        assemble("MOV 1, 2").unwrap_err(),
        AsmError::UnparsableOperand { line: 1, token: "2".into() }
    );
    assert!(matches!(assemble("MOV 1x, ACC"), Err(AsmError::UnparsableOperand { .. })));
    assert!(matches!(assemble("SUB acc"), Err(AsmError::UnparsableOperand { .. })));
}

#[test]
fn err_jro_needs_a_register() {
    assert_eq!(
        assemble("JRO 5").unwrap_err(),
        AsmError::UnknownRegister { line: 1, token: "5".into() }
    );
    assert_eq!(
        assemble("JRO FOO").unwrap_err(),
        AsmError::UnparsableOperand { line: 1, token: "FOO".into() }
    );
}

#[test]
fn err_line_too_long() {
    let err = assemble("NOP\nMOV 856, LEFT # xyz").unwrap_err();
    assert_eq!(err, AsmError::LineTooLong { line: 2, len: 19, max: 18 });
    assert_eq!(err.to_string(), "line 2: 19 characters exceeds the limit of 18");
}

#[test]
fn err_aborts_whole_program() {
    // a failure late in the text discards everything before it
    assert!(assemble("NOP\nNEG\nSWP\nBAD").is_err());
}
