use pretty_assertions::assert_eq;
use simt16::assembler::{assemble, assemble_program};
use simt16::encoder::encode;
use simt16::LabelTable;

const DOUBLING_LOOP: &str = "
CONST R1, #0
CONST R4, #4
LOOP:
ADD R1, R1, R1
CMP R1, R4
BRn LOOP
RET
";

#[test]
fn doubling_loop_words() {
    let asm = assemble_program(DOUBLING_LOOP).unwrap();
    assert_eq!(asm.labels.get("LOOP"), Some(2));
    let expected: Vec<u16> = vec![0x9100, 0x9404, 0x3111, 0x2014, 0x1802, 0xF000];
    assert_eq!(asm.words, expected);
}

#[test]
fn assembling_twice_is_identical() {
    let a = assemble(DOUBLING_LOOP).unwrap();
    let b = assemble(DOUBLING_LOOP).unwrap();
    assert_eq!(a, b);
}

#[test]
fn one_of_each_opcode() {
    let labels = LabelTable::new();
    let cases: &[(&str, &[&str], u16)] = &[
        ("CONST", &["R15", "#255"], 0x9FFF),
        ("ADD", &["R1", "R2", "R3"], 0x3123),
        ("SUB", &["R2", "R15", "R1"], 0x42F1),
        ("MUL", &["R0", "R13", "R14"], 0x50DE),
        ("DIV", &["R0", "R15", "R14"], 0x60FE),
        ("LDR", &["R7", "R7"], 0x7770),
        ("STR", &["R7", "R6"], 0x8076),
        ("CMP", &["R7", "R4"], 0x2074),
        ("RET", &[], 0xF000),
    ];
    for (op, args, want) in cases {
        let got = encode(op, args, &labels, 0).unwrap();
        assert_eq!(got, *want, "{op} {args:?}");
    }
}

#[test]
fn pc_does_not_change_branch_encoding() {
    let mut labels = LabelTable::new();
    labels.define("TOP", 3);
    let at0 = encode("BRn", &["TOP"], &labels, 0).unwrap();
    let at9 = encode("BRn", &["TOP"], &labels, 9).unwrap();
    assert_eq!(at0, 0x1803);
    assert_eq!(at0, at9);
}

#[test]
fn dot_product_kernel() {
    // Accumulates A[i]*B[i] over four elements and stores the sum at 16.
    let src = "
CONST R1, #0
CONST R2, #8
CONST R3, #16
CONST R6, #0
CONST R7, #0
CONST R0, #1

LOOP:
ADD R4, R1, R7
LDR R4, R4
ADD R5, R2, R7
LDR R5, R5
MUL R8, R4, R5
ADD R6, R6, R8
ADD R7, R7, R0
CONST R4, #4
CMP R7, R4
BRn LOOP

STR R3, R6
RET
";
    let expected: Vec<u16> = vec![
        0x9100, 0x9208, 0x9310, 0x9600, 0x9700, 0x9001, 0x3417, 0x7440, 0x3527, 0x7550, 0x5845,
        0x3668, 0x3770, 0x9404, 0x2074, 0x1806, 0x8036, 0xF000,
    ];
    assert_eq!(assemble(src).unwrap(), expected);
}

#[test]
fn matches_hand_encoded_multiply_kernel() {
    let src = "
CONST R1, #0     ; A
CONST R2, #8     ; B
CONST R3, #16    ; C
LDR R4, R1
LDR R5, R2
MUL R6, R4, R5
STR R3, R6
RET
";
    let expected: Vec<u16> = vec![
        0b1001000100000000,
        0b1001001000001000,
        0b1001001100010000,
        0b0111010000010000,
        0b0111010100100000,
        0b0101011001000101,
        0b1000000000110110,
        0b1111000000000000,
    ];
    assert_eq!(assemble(src).unwrap(), expected);
}

#[test]
fn writes_to_identity_registers_still_encode() {
    // Non-fatal: the core ignores writes to R13..R15.
    assert_eq!(assemble("CONST R13, #1").unwrap(), [0x9D01u16]);
}

#[test]
fn labels_serialize_as_a_map() {
    let asm = assemble_program(DOUBLING_LOOP).unwrap();
    let json = serde_json::to_string(&asm.labels).unwrap();
    assert_eq!(json, r#"{"LOOP":2}"#);
}
