use std::collections::BTreeSet;
use std::fmt::Write as _;

use tracing::warn;

use crate::decoder::{Decoded, Decoder, Op};
use crate::isa::simt16::Simt16Decoder;

pub fn fmt_decoded(d: &Decoded) -> String {
    match d.op {
        Op::Const => format!("CONST R{}, #{}", d.rd, d.imm),
        Op::Add | Op::Sub | Op::Mul | Op::Div => {
            format!("{} R{}, R{}, R{}", d.op.mnemonic(), d.rd, d.rs, d.rt)
        }
        Op::Ldr => format!("LDR R{}, R{}", d.rd, d.rs),
        Op::Str => format!("STR R{}, R{}", d.rs, d.rt),
        Op::Cmp => format!("CMP R{}, R{}", d.rs, d.rt),
        Op::Brn => format!("BRn {:#05x}", d.target),
        Op::Ret => "RET".to_string(),
    }
}

pub fn label_for(addr: u16) -> String {
    format!("L_{addr:03x}")
}

/// Render `words` as a source listing. Branch targets inside the program,
/// or exactly at its end, get synthesized `L_xxx:` labels. A branch to any
/// other address has no label that could bind to it, so it is kept as a
/// comment, the same as a word that does not decode. A listing with no
/// comment lines re-assembles to the same words.
pub fn disassemble(words: &[u16]) -> String {
    let dec = Simt16Decoder::new();
    let decoded: Vec<Option<Decoded>> = words.iter().map(|&w| dec.decode(w)).collect();
    let reachable = |t: u16| usize::from(t) <= words.len();
    let targets: BTreeSet<u16> = decoded
        .iter()
        .flatten()
        .filter(|d| d.op == Op::Brn && reachable(d.target))
        .map(|d| d.target)
        .collect();
    let label_at = |pc: usize| {
        u16::try_from(pc)
            .ok()
            .filter(|pc| targets.contains(pc))
            .map(label_for)
    };

    let mut out = String::new();
    for (pc, (&raw, d)) in words.iter().zip(&decoded).enumerate() {
        if let Some(label) = label_at(pc) {
            let _ = writeln!(out, "{label}:");
        }
        let (text, note) = match d {
            Some(d) if d.op == Op::Brn && reachable(d.target) => {
                (format!("BRn {}", label_for(d.target)), "")
            }
            Some(d) if d.op == Op::Brn => {
                warn!(pc, target = d.target, "branch target past end of program");
                (String::new(), " (target past end)")
            }
            Some(d) => (fmt_decoded(d), ""),
            None => (String::new(), " (undecodable)"),
        };
        let _ = writeln!(out, "    {text:<20}; {pc:03x}: {raw:04x}{note}");
    }
    if let Some(label) = label_at(words.len()) {
        let _ = writeln!(out, "{label}:");
    }
    out
}
