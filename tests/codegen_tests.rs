//! End-to-end generation tests: in-memory sources through load, check and emit.

use std::path::Path;

use ts2go::backend::{Dispatcher, EmitError, EmitOptions};
use ts2go::frontend::module::MemorySources;
use ts2go::pipeline::{CompileFailure, compile_with};

/// Compile `files` (the first one is the entry) with no runtime imports in the preamble.
fn generate_files(files: &[(&str, &str)]) -> Result<String, CompileFailure> {
    generate_with(files, &EmitOptions::default().with_runtime_imports(Vec::<String>::new()))
}

fn generate_with(files: &[(&str, &str)], options: &EmitOptions) -> Result<String, CompileFailure> {
    let mut sources = MemorySources::new();
    for (path, text) in files {
        sources.insert(path, *text);
    }
    compile_with(sources, Path::new(files[0].0), options)
}

fn generate(source: &str) -> String {
    match generate_files(&[("main.ts", source)]) {
        Ok(text) => text,
        Err(err) => panic!("generation failed: {}", err),
    }
}

fn emit_error(source: &str) -> EmitError {
    match generate_files(&[("main.ts", source)]) {
        Err(CompileFailure::Emit(failure)) => failure.error,
        Err(other) => panic!("expected an emit error, got: {}", other),
        Ok(text) => panic!("expected an emit error, got output:\n{}", text),
    }
}

/// Body lines of the single function in `source`, without the signature and closing brace.
fn body_of(source: &str) -> Vec<String> {
    let go = generate(source);
    let lines: Vec<&str> = go.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.starts_with("func "))
        .expect("no function in output");
    lines[start + 1..lines.len() - 1].iter().map(|line| line.to_string()).collect()
}

const HELLO_WORLD: &str = r#"function main(): void {
  console.info(sayHello("Bob"));
  const x = [1, 2, 3, 4];
  for (let i = 0; i < x.length; i += 1) {
    console.info(x[i]);
  }
}

function sayHello(name: string): string {
  return `Hello ${name}!`;
}
"#;

// ============================================================================
// Complete translation units
// ============================================================================

#[test]
fn test_hello_world_translation_unit() {
    let sources = MemorySources::new().with_file("main.ts", HELLO_WORLD);
    let go = compile_with(sources, Path::new("main.ts"), &EmitOptions::default()).unwrap();
    assert_eq!(
        go,
        "package main\n\
         \n\
         import (\n\
         \t\"fmt\"\n\
         \t\"ts2go/console\"\n\
         )\n\
         \n\
         func main() {\n\
         \tconsole.Info(sayHello(\"Bob\"))\n\
         \tx := []int{1, 2, 3, 4}\n\
         \tfor i := int(0); i < len(x); i += 1 {\n\
         \t\tconsole.Info(x[i])\n\
         \t}\n\
         }\n\
         \n\
         func sayHello(name string) string {\n\
         \treturn fmt.Sprintf(\"Hello %v!\", name)\n\
         }\n"
    );
}

#[test]
fn test_pruned_imports_keep_only_referenced_modules() {
    let source = "function main(): void {\n  console.log(1);\n}\n";
    let options = EmitOptions::default().with_prune_unused_imports(true);
    let go = generate_with(&[("main.ts", source)], &options).unwrap();
    assert!(go.starts_with("package main\n\nimport (\n\t\"ts2go/console\"\n)\n\nfunc main() {"), "{}", go);

    let quiet = "function main(): void {\n  let n = 1;\n}\n";
    let go = generate_with(&[("main.ts", quiet)], &options).unwrap();
    assert!(!go.contains("import"), "{}", go);
}

#[test]
fn test_package_name_and_indent_width() {
    let options = EmitOptions::default()
        .with_runtime_imports(Vec::<String>::new())
        .with_package_name("demo")
        .with_indent_width(2);
    let go = generate_with(&[("main.ts", "function main(): void {\n  let n = 1;\n}\n")], &options).unwrap();
    assert_eq!(go, "package demo\n\nfunc main() {\n  n := int(1)\n}\n");
}

// ============================================================================
// Functions and statements
// ============================================================================

#[test]
fn test_string_concatenation_function() {
    let go = generate("function sayHello(name: string): string {\n  return \"Hello \" + name + \"!\";\n}\n");
    assert_eq!(
        go,
        "package main\n\nfunc sayHello(name string) string {\n\treturn \"Hello \" + name + \"!\"\n}\n"
    );
}

#[test]
fn test_void_return_type_is_omitted_and_params_are_listed() {
    let go = generate("function add(a: number, b: number): number {\n  return a + b;\n}\nfunction noop(): void {}\n");
    assert!(go.contains("func add(a int, b int) int {\n\treturn a + b\n}\n"), "{}", go);
    assert!(go.contains("func noop() {\n}\n"), "{}", go);
}

#[test]
fn test_variable_forms() {
    let body = body_of(
        "function main(): void {\n  let n: number;\n  let d = -1;\n  let b = true;\n  let c = !b;\n  let w: int32 = 5;\n  let s = \"x\";\n}\n",
    );
    assert_eq!(
        body,
        vec![
            "\tvar n int",
            "\td := int(-1)",
            "\tb := true",
            "\tc := !b",
            "\tw := int32(5)",
            "\ts := \"x\"",
        ]
    );
}

#[test]
fn test_loop_with_unbraced_body() {
    let body = body_of("function main(): void {\n  for (let i = 0; i < 3; i++) console.log(i);\n}\n");
    assert_eq!(body, vec!["\tfor i := int(0); i < 3; i++ {", "\t\tconsole.Log(i)", "\t}"]);
}

#[test]
fn test_loop_with_empty_clauses() {
    let body = body_of("function main(): void {\n  let i = 0;\n  for (; ; ) {\n    i++;\n  }\n}\n");
    assert_eq!(body, vec!["\ti := int(0)", "\tfor ; ;  {", "\t\ti++", "\t}"]);
}

#[test]
fn test_nested_block_and_bare_return() {
    let body = body_of("function main(): void {\n  {\n    let n = 1;\n  }\n  return;\n}\n");
    assert_eq!(body, vec!["\t{", "\t\tn := int(1)", "\t}", "\treturn"]);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_string_coercion_wraps_only_non_string_right_side() {
    let body = body_of("function main(): void {\n  let s = \"x\" + 1;\n  let t = \"x\" + \"y\";\n  s += 2;\n}\n");
    assert_eq!(
        body,
        vec![
            "\ts := \"x\" + fmt.Sprintf(\"%v\", 1)",
            "\tt := \"x\" + \"y\"",
            "\ts += fmt.Sprintf(\"%v\", 2)",
        ]
    );
}

#[test]
fn test_operators_render_with_single_spaces() {
    let body = body_of(
        "function main(): void {\n  let a = 1;\n  a = a * 2 - 1;\n  a -= 1;\n  a *= 3;\n  a /= 2;\n  let b = a >= 1;\n  let c = (a + 1) / 2;\n  --a;\n}\n",
    );
    assert_eq!(
        body,
        vec![
            "\ta := int(1)",
            "\ta = a * 2 - 1",
            "\ta -= 1",
            "\ta *= 3",
            "\ta /= 2",
            "\tb := a >= 1",
            "\tc := int((a + 1) / 2)",
            "\t--a",
        ]
    );
}

#[test]
fn test_template_literal_escapes_percent() {
    let go = generate("function pct(n: number): string {\n  return `${n}% of ${n * 2}`;\n}\n");
    assert!(go.contains("\treturn fmt.Sprintf(\"%v%% of %v\", n, n * 2)\n"), "{}", go);
}

#[test]
fn test_literal_escapes_become_go_escapes() {
    let body = body_of(
        "function main(): void {\n  let s = \"a\\\nb\\u{41}\\0\";\n  let t = `line1\nline2 \\\n x`;\n}\n",
    );
    assert_eq!(
        body,
        vec![
            "\ts := \"ab\\u0041\\x00\"",
            "\tt := fmt.Sprintf(\"line1\\nline2  x\")",
        ]
    );
}

#[test]
fn test_object_literals_become_struct_literals() {
    let body = body_of("function main(): void {\n  const p = { a: 1, b: \"x\" };\n  let a = 2;\n  const q = { a };\n  let r = p.b;\n}\n");
    assert_eq!(
        body,
        vec![
            "\tp := struct{ A int; B string }{A: 1, B: \"x\"}",
            "\ta := int(2)",
            "\tq := struct{ A int }{A: a}",
            "\tr := p.B",
        ]
    );
}

#[test]
fn test_array_length_and_index_assignment() {
    let body = body_of("function main(): void {\n  let names = [\"a\", \"b\"];\n  names[0] = \"c\";\n  let n = names.length;\n}\n");
    assert_eq!(
        body,
        vec!["\tnames := []string{\"a\", \"b\"}", "\tnames[0] = \"c\"", "\tn := int(len(names))"]
    );
}

#[test]
fn test_string_length_is_a_member_access() {
    let body = body_of("function main(): void {\n  let s = \"abc\";\n  let n = s.length;\n}\n");
    assert_eq!(body, vec!["\ts := \"abc\"", "\tn := int(s.Length)"]);
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_imported_functions_are_inlined_at_the_import() {
    let go = generate_files(&[
        ("main.ts", "import { greet } from \"./lib\";\nfunction main(): void {\n  greet();\n}\n"),
        ("lib.ts", "export function greet(): void {}\n"),
    ])
    .unwrap();
    assert_eq!(go, "package main\n\nfunc greet() {\n}\n\nfunc main() {\n\tgreet()\n}\n");
}

#[test]
fn test_diamond_import_inlines_shared_module_per_importer() {
    let go = generate_files(&[
        (
            "main.ts",
            "import { fromB } from \"./b\";\nimport { fromC } from \"./c\";\nfunction main(): void {}\n",
        ),
        ("b.ts", "import { shared } from \"./d\";\nexport function fromB(): void {}\n"),
        ("c.ts", "import { shared } from \"./d\";\nexport function fromC(): void {}\n"),
        ("d.ts", "export function shared(): void {}\n"),
    ])
    .unwrap();
    assert_eq!(go.matches("func shared() {").count(), 2, "{}", go);
    let order: Vec<&str> = go.lines().filter(|line| line.starts_with("func ")).collect();
    assert_eq!(
        order,
        vec!["func shared() {", "func fromB() {", "func shared() {", "func fromC() {", "func main() {"]
    );
}

#[test]
fn test_import_cycle_emits_each_module_once() {
    let go = generate_files(&[
        ("a.ts", "import { fromB } from \"./b\";\nexport function fromA(): void {}\nfunction main(): void {}\n"),
        ("b.ts", "import { fromA } from \"./a\";\nexport function fromB(): void {}\n"),
    ])
    .unwrap();
    let order: Vec<&str> = go.lines().filter(|line| line.starts_with("func ")).collect();
    assert_eq!(order, vec!["func fromB() {", "func fromA() {", "func main() {"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_if_statement_is_a_block_level_dispatch_miss() {
    let err = emit_error("function main(): void {\n  if (true) {}\n}\n");
    assert_eq!(
        err.to_string(),
        "main.ts:2:3: Failed to emit IfStatement in emit_block_level_statement."
    );
    assert!(matches!(
        err,
        EmitError::DispatchMiss {
            dispatcher: Dispatcher::BlockLevelStatement,
            ..
        }
    ));
}

#[test]
fn test_unsupported_statements_and_expressions() {
    let err = emit_error("const x = 1;\nfunction main(): void {}\n");
    assert_eq!(err.to_string(), "main.ts:1:1: Failed to emit VariableStatement in emit_top_level_statement.");

    let err = emit_error("function main(): void {\n  while (true) {}\n}\n");
    assert_eq!(err.message(), "Failed to emit WhileStatement in emit_block_level_statement.");

    let err = emit_error("function main(): void {\n  let c = true ? 1 : 2;\n}\n");
    assert_eq!(err.message(), "Failed to emit ConditionalExpression in emit_expression.");

    let err = emit_error("interface P { a: number; }\nfunction main(): void {}\n");
    assert_eq!(err.message(), "Failed to emit InterfaceDeclaration in emit_top_level_statement.");
}

#[test]
fn test_unsupported_operators_name_the_token() {
    let err = emit_error("function main(): void {\n  let r = 5 % 2;\n}\n");
    assert_eq!(err.to_string(), "main.ts:2:13: Failed to emit PercentToken for BinaryExpression in emit_binary_expression.");

    let err = emit_error("function main(): void {\n  let b = 1 === 1;\n}\n");
    assert_eq!(err.message(), "Failed to emit EqualsEqualsEqualsToken for BinaryExpression in emit_binary_expression.");

    let err = emit_error("function main(): void {\n  let n = +1;\n}\n");
    assert_eq!(err.message(), "Failed to emit PlusToken in emit_prefix_unary_expression.");
}

#[test]
fn test_spread_property_fails_in_object_literal_emitter() {
    let err = emit_error("function main(): void {\n  const a = { x: 1 };\n  const b = { ...a };\n}\n");
    assert_eq!(err.message(), "Failed to emit SpreadAssignment in emit_object_literal_expression.");
    assert_eq!(err.location().line, 3);
}

#[test]
fn test_function_preconditions() {
    let err = emit_error("function main() {}\n");
    assert_eq!(
        err.to_string(),
        "main.ts:1:10: Cannot emit function 'main' without a declared return type."
    );

    let err = emit_error("function f(): void;\nfunction f(): void {}\n");
    assert_eq!(err.message(), "Cannot emit function 'f' without a body.");

    let err = emit_error("export default function (): void {}\n");
    assert!(matches!(err, EmitError::Precondition { .. }));
    assert_eq!(err.to_string(), "main.ts:1:1: Cannot emit a function declaration without a name.");
}

#[test]
fn test_dollar_identifiers_are_rejected() {
    let err = emit_error("function main(): void {\n  let a$b = 1;\n}\n");
    assert!(matches!(err, EmitError::Precondition { .. }));
    assert_eq!(
        err.to_string(),
        "main.ts:2:7: Cannot emit identifier 'a$b': '$' is not allowed in Go identifiers."
    );

    let err = emit_error("function main(): void {\n  const p = { $x: 1 };\n}\n");
    assert_eq!(err.message(), "Cannot emit identifier '$x': '$' is not allowed in Go identifiers.");
}

#[test]
fn test_any_is_an_inference_failure() {
    let err = emit_error("function main(): void {\n  let a: any;\n}\n");
    assert!(matches!(err, EmitError::Precondition { .. }));
    assert_eq!(
        err.message(),
        "Cannot emit the type of variable 'a': type 'any' could not be inferred."
    );
}

#[test]
fn test_errors_in_imported_files_point_at_that_file() {
    let result = generate_files(&[
        ("main.ts", "import { f } from \"./lib\";\nfunction main(): void {}\n"),
        ("lib.ts", "export function f(): void {\n  while (true) {}\n}\n"),
    ]);
    let Err(CompileFailure::Emit(failure)) = result else {
        panic!("expected an emit failure");
    };
    let location = failure.error.location();
    assert!(location.path.ends_with("lib.ts"));
    assert_eq!((location.line, location.column), (2, 3));
}
