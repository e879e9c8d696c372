#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on correctness of specific syntactic forms, on span accuracy (the emitter
/// reports positions from them), and on error recovery.
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<Program, Vec<CompileError>> {
        let tokens = lexer::lex(source).map_err(|_| vec![])?;
        parse(&tokens)
    }

    fn single_expr(source: &str) -> Spanned<Expr> {
        let program = parse_str(source).unwrap();
        match program.statements.into_iter().next().map(|s| s.node) {
            Some(Statement::Expression(expr)) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_declaration() {
        let program = parse_str("function sayHello(name: string): string { return \"Hello \" + name; }").unwrap();
        assert_eq!(program.statements.len(), 1);
        let Statement::Function(f) = &program.statements[0].node else {
            panic!("expected function");
        };
        assert_eq!(f.name.as_ref().map(|n| n.node.as_str()), Some("sayHello"));
        assert_eq!(f.params.len(), 1);
        assert_eq!(f.params[0].node.name.node, "name");
        assert_eq!(f.return_type.as_ref().map(|t| t.node.to_string()).as_deref(), Some("string"));
        let body = f.body.as_ref().unwrap();
        assert!(matches!(body.node.statements[0].node, Statement::Return(Some(_))));
    }

    #[test]
    fn test_export_default_function_may_be_anonymous() {
        let program = parse_str("export default function (): void {}").unwrap();
        let Statement::Function(f) = &program.statements[0].node else {
            panic!("expected function");
        };
        assert!(f.exported && f.is_default);
        assert!(f.name.is_none());
    }

    #[test]
    fn test_overload_signature_has_no_body() {
        let program = parse_str("function f(): void;").unwrap();
        let Statement::Function(f) = &program.statements[0].node else {
            panic!("expected function");
        };
        assert!(f.body.is_none());
    }

    #[test]
    fn test_import_forms() {
        let program = parse_str(
            "import \"./side\"\nimport d from \"./a\"\nimport { x, y as z } from './b';\nimport * as ns from \"./c\"",
        )
        .unwrap();
        let imports: Vec<_> = program.imports().collect();
        assert_eq!(imports.len(), 4);
        assert_eq!(imports[0].specifier.node, "./side");
        assert_eq!(imports[1].default.as_ref().map(|d| d.node.as_str()), Some("d"));
        assert_eq!(imports[2].named[1].node.imported, "y");
        assert_eq!(imports[2].named[1].node.local, "z");
        assert_eq!(imports[3].namespace.as_ref().map(|n| n.node.as_str()), Some("ns"));
    }

    #[test]
    fn test_for_statement_clauses() {
        let program = parse_str("function main(): void { for (let i = 0; i < x.length; i += 1) { f(x[i]) } }").unwrap();
        let Statement::Function(f) = &program.statements[0].node else {
            panic!("expected function");
        };
        let Statement::For(for_stmt) = &f.body.as_ref().unwrap().node.statements[0].node else {
            panic!("expected for");
        };
        assert!(matches!(for_stmt.initializer, Some(ForInit::Variables(_))));
        assert!(matches!(
            for_stmt.condition.as_ref().map(|c| &c.node),
            Some(Expr::Binary(_, Spanned { node: BinaryOp::Lt, .. }, _))
        ));
        assert!(matches!(
            for_stmt.incrementor.as_ref().map(|c| &c.node),
            Some(Expr::Binary(_, Spanned { node: BinaryOp::AddAssign, .. }, _))
        ));
        assert!(matches!(for_stmt.body.node, Statement::Block(_)));
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let program = parse_str("function main(): void { for (;;) {} }").unwrap();
        let Statement::Function(f) = &program.statements[0].node else {
            panic!("expected function");
        };
        let Statement::For(for_stmt) = &f.body.as_ref().unwrap().node.statements[0].node else {
            panic!("expected for");
        };
        assert!(for_stmt.initializer.is_none());
        assert!(for_stmt.condition.is_none());
        assert!(for_stmt.incrementor.is_none());
    }

    #[test]
    fn test_precedence_multiplication_binds_tighter() {
        let expr = single_expr("a + b * c");
        let Expr::Binary(_, op, right) = expr.node else {
            panic!("expected binary");
        };
        assert_eq!(op.node, BinaryOp::Add);
        assert!(matches!(right.node, Expr::Binary(_, Spanned { node: BinaryOp::Mul, .. }, _)));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = single_expr("a = b = 1");
        let Expr::Binary(left, op, right) = expr.node else {
            panic!("expected binary");
        };
        assert_eq!(op.node, BinaryOp::Assign);
        assert_eq!(left.node, Expr::Ident("a".to_string()));
        assert!(matches!(right.node, Expr::Binary(_, Spanned { node: BinaryOp::Assign, .. }, _)));
    }

    #[test]
    fn test_prefix_and_postfix() {
        assert!(matches!(
            single_expr("!done").node,
            Expr::Prefix(Spanned { node: UnaryOp::Not, .. }, _)
        ));
        assert!(matches!(
            single_expr("i++").node,
            Expr::Postfix(_, Spanned { node: UnaryOp::Increment, .. })
        ));
    }

    #[test]
    fn test_call_member_index_chain_spans() {
        let expr = single_expr("console.info(x[0])");
        assert_eq!(expr.span, Span::new(0, 18));
        let Expr::Call(callee, args) = expr.node else {
            panic!("expected call");
        };
        assert!(matches!(callee.node, Expr::Member(_, ref name) if name.node == "info"));
        assert_eq!(args[0].span, Span::new(13, 17));
    }

    #[test]
    fn test_template_interpolation_spans_are_file_relative() {
        let expr = single_expr("`Hello ${name}!`");
        let Expr::Template(template) = expr.node else {
            panic!("expected template");
        };
        assert_eq!(template.head, "Hello ");
        assert_eq!(template.spans.len(), 1);
        assert_eq!(template.spans[0].expr.span, Span::new(9, 13));
        assert_eq!(template.spans[0].literal, "!");
    }

    #[test]
    fn test_object_literal_properties() {
        let expr = single_expr("({ a: 1, b, ...rest })");
        let Expr::Paren(inner) = expr.node else {
            panic!("expected paren");
        };
        let Expr::Object(props) = inner.node else {
            panic!("expected object");
        };
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].node.kind_name(), "PropertyAssignment");
        assert_eq!(props[1].node.kind_name(), "ShorthandPropertyAssignment");
        assert_eq!(props[2].node.kind_name(), "SpreadAssignment");
    }

    #[test]
    fn test_unsupported_statements_still_parse() {
        let program = parse_str(
            "interface P { x: number; y?: string }\ntype N = number[]\nfunction f(): void { if (a) { } else { } while (b) {} do {} while (c) }",
        )
        .unwrap();
        assert_eq!(program.statements[0].node.kind_name(), "InterfaceDeclaration");
        assert_eq!(program.statements[1].node.kind_name(), "TypeAliasDeclaration");
        let Statement::Function(f) = &program.statements[2].node else {
            panic!("expected function");
        };
        let kinds: Vec<_> = f
            .body
            .as_ref()
            .unwrap()
            .node
            .statements
            .iter()
            .map(|s| s.node.kind_name())
            .collect();
        assert_eq!(kinds, vec!["IfStatement", "WhileStatement", "DoStatement"]);
    }

    #[test]
    fn test_type_annotations() {
        let program = parse_str("let a: Pointer<number[]>; let b: Array<Array<string>>; let c: \"x\"; let d: -1").unwrap();
        let rendered: Vec<String> = program
            .statements
            .iter()
            .map(|s| match &s.node {
                Statement::Variable(list) => list.declarations[0].node.ty.as_ref().unwrap().node.to_string(),
                other => panic!("expected variable statement, got {:?}", other),
            })
            .collect();
        insta::assert_snapshot!(rendered.join("\n"), @r#"
        Pointer<number[]>
        Array<Array<string>>
        "x"
        -1
        "#);
    }

    #[test]
    fn test_as_expression() {
        assert!(matches!(single_expr("x as number").node, Expr::As(..)));
    }

    #[test]
    fn test_errors_recover_at_statement_boundaries() {
        let errors = parse_str("let = 1;\nfunction f(: void {}\nlet ok = 2").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.starts_with("Expected variable name"));
    }
}
