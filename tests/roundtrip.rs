use pretty_assertions::assert_eq;
use tis_rs::{assemble, disassemble, Register};

fn roundtrip(text: &str) -> String {
    let words = assemble(text).unwrap();
    assert_eq!(words.len(), 1, "{text}");
    disassemble(words[0]).unwrap()
}

#[test]
fn roundtrip_canonical_forms() {
    let forms = [
        "NOP",
        "ADD 421",
        "SUB 421",
        "ADD ANY",
        "SUB NIL",
        "ADD 999",
        "SUB 1",
        "SUB 0",
        "MOV 744, ACC",
        "MOV 856, LEFT",
        "MOV -999, ACC",
        "MOV 0, NIL",
        "MOV LEFT, RIGHT",
        "MOV UP, DOWN",
        "NEG",
        "SWP",
        "SAV",
        "JRO ACC",
        "JRO LAST",
    ];
    for text in forms {
        assert_eq!(roundtrip(text), text);
    }
}

#[test]
fn roundtrip_every_register_pair() {
    for src in Register::ALL {
        for dst in Register::ALL {
            let text = format!("MOV {src}, {dst}");
            assert_eq!(roundtrip(&text), text);
        }
    }
}

#[test]
fn roundtrip_canonicalises() {
    assert_eq!(roundtrip("MOV 5000, ACC"), "MOV 999, ACC");
    assert_eq!(roundtrip("ADD -5"), "SUB 5");
    assert_eq!(roundtrip("SUB -5"), "ADD 5");
    assert_eq!(roundtrip("ADD 0"), "NOP");
    assert_eq!(roundtrip("MOV +7,ACC"), "MOV 7, ACC");
}

#[test]
fn roundtrip_jumps_keep_slot() {
    let words = assemble("A: NOP\nB: NOP\nJNZ B").unwrap();
    assert_eq!(disassemble(words[2]).unwrap(), "JNZ 1");
}
