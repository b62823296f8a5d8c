use simt16::assembler::{assemble, AsmErrorKind};
use simt16::encoder::EncodeError;

#[test]
fn immediate_out_of_range() {
    let err = assemble("CONST R0, #256").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.encode_error(),
        Some(&EncodeError::ImmediateOutOfRange("#256".into()))
    );
}

#[test]
fn unknown_opcode_names_the_line() {
    let err = assemble("CONST R1, #1\n\n   FOO R1, R2   ; nope\nRET").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.text, "   FOO R1, R2   ; nope");
    assert_eq!(
        err.kind,
        AsmErrorKind::Encode(EncodeError::UnknownOpcode("FOO".into()))
    );
    let msg = err.to_string();
    assert!(msg.starts_with("line 3: unknown opcode `FOO`"), "{msg}");
}

#[test]
fn mnemonics_are_case_sensitive() {
    let err = assemble("brn X\nX:").unwrap_err();
    assert_eq!(
        err.encode_error(),
        Some(&EncodeError::UnknownOpcode("brn".into()))
    );
}

#[test]
fn register_out_of_range() {
    let err = assemble("ADD R1, R2, R16").unwrap_err();
    assert_eq!(
        err.encode_error(),
        Some(&EncodeError::InvalidRegister("R16".into()))
    );
}

#[test]
fn operand_of_wrong_kind() {
    let err = assemble("CONST #1, R1").unwrap_err();
    assert_eq!(
        err.encode_error(),
        Some(&EncodeError::InvalidOperand("#1".into()))
    );
}

#[test]
fn malformed_label_definition() {
    for src in [":", " :", "MY LABEL:", "A,B:"] {
        let err = assemble(src).unwrap_err();
        assert!(
            matches!(err.kind, AsmErrorKind::MalformedLine(_)),
            "{src}: {err}"
        );
    }
}

#[test]
fn register_with_sign_is_out_of_range() {
    let err = assemble("LDR R1, R-1").unwrap_err();
    assert_eq!(
        err.encode_error(),
        Some(&EncodeError::InvalidRegister("R-1".into()))
    );
}

#[test]
fn separators_only_is_malformed() {
    let err = assemble("RET\n , ,\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, AsmErrorKind::MalformedLine(_)));
}

#[test]
fn empty_source_is_an_empty_program() {
    assert!(assemble("; nothing here\n\n").unwrap().is_empty());
}
