//! Property-based tests for the ts2go generator
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::path::Path;

use proptest::prelude::*;
use ts2go::backend::{EmitOptions, TextAccumulator, normalize_type_text};
use ts2go::frontend::module::MemorySources;
use ts2go::pipeline::compile_with;

/// Plain type names: no brackets, no quotes, not starting with a digit.
fn type_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("number".to_string()),
        Just("string".to_string()),
        Just("boolean".to_string()),
        Just("int32".to_string()),
        "[A-Z][a-zA-Z0-9]{0,8}",
    ]
}

/// Type text built from names, `[]` suffixes and generic wrappers.
fn type_text() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        type_name(),
        Just("true".to_string()),
        Just("\"lit\"".to_string()),
        Just("42".to_string()),
        Just("1.5".to_string()),
        Just("-3".to_string()),
    ];
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| format!("{}[]", t)),
            inner.clone().prop_map(|t| format!("Array<{}>", t)),
            inner.clone().prop_map(|t| format!("Pointer<{}>", t)),
            inner.prop_map(|t| format!("ptr<{}>", t)),
        ]
    })
}

fn binary_operator() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("<"),
        Just("<="),
        Just(">"),
        Just(">="),
    ]
}

// =============================================================================
// Type name properties
// =============================================================================

proptest! {
    /// Property: normalizing already-normalized text changes nothing
    #[test]
    fn normalization_is_idempotent(text in type_text()) {
        let once = normalize_type_text(&text);
        prop_assert_eq!(normalize_type_text(&once), once);
    }

    /// Property: `T[]` and `Array<T>` name the same type
    #[test]
    fn array_suffix_matches_array_generic(name in type_name()) {
        prop_assert_eq!(
            normalize_type_text(&format!("{}[]", name)),
            normalize_type_text(&format!("Array<{}>", name))
        );
    }

    /// Property: a pointer never wraps an array
    #[test]
    fn pointer_argument_loses_array_layers(name in type_name(), depth in 1usize..4) {
        let arrays = "[]".repeat(depth);
        let normalized = normalize_type_text(&format!("Pointer<{}{}>", name, arrays));
        prop_assert_eq!(normalized, format!("Pointer<{}>", normalize_type_text(&name)));
    }
}

// =============================================================================
// Text accumulator properties
// =============================================================================

proptest! {
    /// Property: each `append_line` produces exactly one rendered line
    #[test]
    fn appended_lines_render_in_order(lines in prop::collection::vec("[a-z ]{1,12}", 1..8)) {
        let mut text = TextAccumulator::new();
        for line in &lines {
            text.append_line(line);
        }
        let rendered = text.to_string();
        let expected = format!("{}\n", lines.join("\n"));
        prop_assert_eq!(rendered, expected);
    }

    /// Property: a placeholder filled last still renders where it was inserted
    #[test]
    fn placeholder_keeps_its_position(before in "[a-z]{1,8}", middle in "[a-z]{1,8}", after in "[a-z]{1,8}") {
        let mut text = TextAccumulator::new();
        text.append_line(&before);
        let slot = text.insert_placeholder();
        text.append_line(&after);
        text.placeholder_mut(slot).append_line(&middle);
        prop_assert_eq!(text.to_string(), format!("{}\n{}\n{}\n", before, middle, after));
    }
}

// =============================================================================
// Emission properties
// =============================================================================

/// Generate the single body line for `let r = <expr>;` in a function with numeric `a` and `b`.
fn numeric_body_line(expr: &str) -> String {
    let source = format!(
        "function f(a: number, b: number): void {{\n  let r = {};\n}}\n",
        expr
    );
    let sources = MemorySources::new().with_file("main.ts", source);
    let options = EmitOptions::default().with_runtime_imports(Vec::<String>::new());
    let go = compile_with(sources, Path::new("main.ts"), &options).unwrap();
    go.lines().nth(3).unwrap().to_string()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: supported binary operators render as `left OP right`
    #[test]
    fn binary_operators_render_infix(op in binary_operator()) {
        let line = numeric_body_line(&format!("a {} b", op));
        let expected = format!("a {} b", op);
        prop_assert!(line.contains(&expected), "{} does not contain {}", line, expected);
    }

    /// Property: a string left side coerces any numeric right side through the format call
    #[test]
    fn string_left_side_formats_numeric_right_side(n in 0u32..10_000) {
        let line = numeric_body_line(&format!("\"n=\" + {}", n));
        prop_assert_eq!(line, format!("\tr := \"n=\" + fmt.Sprintf(\"%v\", {})", n));
    }
}
