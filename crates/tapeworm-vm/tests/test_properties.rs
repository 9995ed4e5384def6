//! Property tests for bracket resolution and comment handling

use proptest::prelude::*;
use tapeworm_vm::{compile, OperationRegistry, Program};

/// Well-nested bracket strings with other instructions sprinkled in
fn nested_source() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["+", "-", "<", ">", ".", ""]).prop_map(String::from);
    leaf.prop_recursive(6, 64, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|body| format!("[{}]", body)),
            prop::collection::vec(inner, 1..4).prop_map(|parts| parts.concat()),
        ]
    })
}

/// Partner index of each bracket, computed independently with a depth scan
fn expected_partner(source: &[u8], index: usize) -> usize {
    if source[index] == b'[' {
        let mut depth = 0usize;
        for (j, &c) in source.iter().enumerate().skip(index) {
            match c {
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return j;
                    }
                }
                _ => {}
            }
        }
    } else {
        let mut depth = 0usize;
        for j in (0..=index).rev() {
            match source[j] {
                b']' => depth += 1,
                b'[' => {
                    depth -= 1;
                    if depth == 0 {
                        return j;
                    }
                }
                _ => {}
            }
        }
    }
    unreachable!("well-nested input")
}

fn compile_str(source: &str) -> Program {
    compile(source.as_bytes(), &OperationRegistry::new()).unwrap()
}

proptest! {
    #[test]
    fn brackets_resolve_to_partners(source in nested_source()) {
        let program = compile_str(&source);
        let ops: Vec<u8> = program.iter().map(|inst| inst.operator).collect();
        prop_assert_eq!(&ops[..], source.as_bytes());

        for (index, inst) in program.iter().enumerate() {
            if inst.is_bracket() {
                let partner = inst.target();
                prop_assert_eq!(partner, expected_partner(&ops, index));
                prop_assert_eq!(program[partner].target(), index);
            } else {
                prop_assert_eq!(inst.operand, 0);
            }
        }
    }

    #[test]
    fn comments_never_change_addressing(
        source in nested_source(),
        noise in prop::collection::vec("[a-zA-Z0-9 \n#!]{0,3}", 0..16),
    ) {
        let mut noisy = String::new();
        for (i, c) in source.chars().enumerate() {
            if let Some(extra) = noise.get(i) {
                noisy.push_str(extra);
            }
            noisy.push(c);
        }
        prop_assert_eq!(compile_str(&noisy), compile_str(&source));
    }

    #[test]
    fn extra_close_is_rejected(source in nested_source()) {
        let broken = format!("{}]", source);
        let err = compile(broken.as_bytes(), &OperationRegistry::new()).unwrap_err();
        prop_assert!(err.is_structural());
    }

    #[test]
    fn extra_open_is_rejected(source in nested_source()) {
        let broken = format!("[{}", source);
        let err = compile(broken.as_bytes(), &OperationRegistry::new()).unwrap_err();
        prop_assert!(err.is_structural());
    }
}
