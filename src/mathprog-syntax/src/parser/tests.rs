// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::ast::{IndexingExpression, Statement};
use crate::common::{ErrorCode, ParseError};
use crate::config::ParseConfig;
use crate::domain::{Domain, DomainSet};
use crate::syntax::{NodeKind, SyntaxNode, SyntaxTree};
use crate::{parse, parse_with_config};

fn parse_ok(text: &str) -> SyntaxTree {
    match parse(text) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {text:?}: {err}"),
    }
}

fn parse_err(text: &str) -> ParseError {
    match parse(text) {
        Ok(tree) => panic!("expected {text:?} to fail, got {}", tree.to_sexp()),
        Err(err) => err,
    }
}

fn kinds(tree: &SyntaxTree) -> Vec<NodeKind> {
    tree.statements().map(|s| s.kind).collect()
}

/// The `expr` children of a node, in order.
fn exprs(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    node.child_nodes()
        .filter(|n| n.kind == NodeKind::Expr)
        .collect()
}

/// The expression carried by the last attribute of the last statement.
fn attribute_expr(tree: &SyntaxTree) -> &SyntaxNode {
    let stmt = tree.statements().last().unwrap();
    let attr = Statement::cast(stmt).unwrap().attributes().last().unwrap();
    exprs(attr)[0]
}

fn inner_kind(expr: &SyntaxNode) -> Option<NodeKind> {
    expr.inner().and_then(|e| e.as_node()).map(|n| n.kind)
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_minimal_declarations() {
    for keyword in ["set", "param", "var"] {
        let tree = parse_ok(&format!("{keyword} name;"));
        let stmt = Statement::cast(tree.statements().next().unwrap()).unwrap();
        assert_eq!(keyword, stmt.kind().as_str());
        assert_eq!(Some("name"), stmt.name());
        assert_eq!(None, stmt.alias());
        assert!(stmt.indexing().is_none());
        assert_eq!(0, stmt.attributes().count());
    }
}

#[test]
fn test_declaration_parts() {
    let tree = parse_ok("param cost 'unit cost' {i in I, j in J} >= 0, integer default 1;");
    let stmt = Statement::cast(tree.statements().next().unwrap()).unwrap();
    assert_eq!(Some("cost"), stmt.name());
    assert_eq!(Some("unit cost".to_owned()), stmt.alias());
    assert_eq!(vec!["i", "j"], stmt.indexing().unwrap().dummies());
    assert_eq!(3, stmt.attributes().count());
}

#[test]
fn test_set_attribute_spellings() {
    // `in` and `logical` are kept exactly as written
    let tree = parse_ok("set A dimen 2 in B; param p logical;");
    let set = Statement::cast(tree.statements().next().unwrap()).unwrap();
    let texts: Vec<String> = set.attributes().map(|a| a.token_text()).collect();
    assert_eq!(vec!["dimen 2", "in B"], texts);

    let module = parse_ok("set T within A cross B;");
    let within = attribute_expr(&module);
    assert_eq!(DomainSet::SET, within.domains);
    assert_eq!("(cross A B)", within.to_sexp());
}

#[test]
fn test_set_missing_attribute_cites_colon() {
    let err = parse_err("set s : ;");
    assert_eq!(ErrorCode::MalformedAttribute, err.code);
    assert_eq!((6, 7), (err.start, err.end));
    assert_eq!("expected set attribute or ';', found ':'", err.message);
}

#[test]
fn test_missing_terminator() {
    let err = parse_err("param p := 1 solve;");
    assert_eq!(ErrorCode::MalformedAttribute, err.code);

    let err = parse_err("s.t. c: x <= 1 solve;");
    assert_eq!(ErrorCode::MissingTerminator, err.code);
    assert_eq!("expected ';', found 'solve'", err.message);

    let err = parse_err("set s");
    assert_eq!(ErrorCode::UnexpectedEof, err.code);
}

#[test]
fn test_end_is_a_statement() {
    let tree = parse_ok("set A; end; set B;");
    assert_eq!(vec![NodeKind::Set, NodeKind::End, NodeKind::Set], kinds(&tree));
    assert_eq!("(model (set A) (end) (set B))", tree.to_sexp());
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence() {
    let module = parse_ok("param p := 2 + 3 * 4 ^ 2;");
    let e = attribute_expr(&module);
    assert_eq!("(+ 2 (* 3 (^ 4 2)))", e.to_sexp());
    assert_eq!(DomainSet::NUMERIC, e.domains);

    let module = parse_ok("param p := 2 ^ 3 ^ 2 - 1 - 1;");
    let e = attribute_expr(&module);
    assert_eq!("(- (- (^ 2 (^ 3 2)) 1) 1)", e.to_sexp());

    let module = parse_ok("param p := -2 ^ 2 less 1 div 2;");
    let e = attribute_expr(&module);
    assert_eq!("(less (- (^ 2 2)) (div 1 2))", e.to_sexp());
}

#[test]
fn test_operator_wrappers() {
    let module = parse_ok("param p := a + b;");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::NumExpr), inner_kind(e));
    let inner = e.inner().and_then(|i| i.as_node()).unwrap();
    let kinds: Vec<NodeKind> = inner.child_nodes().map(|n| n.kind).collect();
    assert_eq!(
        vec![NodeKind::Expr, NodeKind::Operator, NodeKind::Expr],
        kinds
    );
}

#[test]
fn test_logical_precedence() {
    let tree = parse_ok("check not 1 in S and 2 > 1;");
    let check = tree.statements().next().unwrap();
    assert_eq!("(and (not (in 1 S)) (> 2 1))", exprs(check)[0].to_sexp());

    let tree = parse_ok("check 1 not in S or A within B && x != 1;");
    let check = tree.statements().next().unwrap();
    assert_eq!(
        "(or (not in 1 S) (&& (within A B) (!= x 1)))",
        exprs(check)[0].to_sexp()
    );
}

#[test]
fn test_set_expressions() {
    let module = parse_ok("set S := 1 .. 10 by 2;");
    let e = attribute_expr(&module);
    assert_eq!("(.. 1 10 by 2)", e.to_sexp());

    let module = parse_ok("set S := A union B inter C diff D;");
    let e = attribute_expr(&module);
    assert_eq!("(diff (union A (inter B C)) D)", e.to_sexp());

    let module = parse_ok("set S := setof {i in A} (i, i + 1);");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::IteratedExpression), inner_kind(e));
    assert_eq!(DomainSet::SET, e.domains);
}

#[test]
fn test_literal_set_and_indexing_in_expressions() {
    let module = parse_ok("set A := {1, 2, 3};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::LiteralSet), inner_kind(e));

    let module = parse_ok("set B := {(1, 'a'), (2, 'b')};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::LiteralSet), inner_kind(e));

    let module = parse_ok("set C := {i in A: i > 1};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::IndexingExpression), inner_kind(e));
    let indexing = IndexingExpression::cast(e).unwrap();
    assert_eq!(vec!["i"], indexing.dummies());
    assert!(indexing.filter().is_some());

    let module = parse_ok("set D := {1 .. 3};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::IndexingExpression), inner_kind(e));
}

#[test]
fn test_conditionals() {
    let module = parse_ok("param p := if 1 > 0 then 2 else 3;");
    let e = attribute_expr(&module);
    assert_eq!(
        "(conditional_expression if (> 1 0) then 2 else 3)",
        e.to_sexp()
    );
    assert_eq!(DomainSet::NUMERIC, e.domains);

    // the branches decide the domain, and narrow ambiguous names
    let module = parse_ok("set S := if n > 0 then A else {1};");
    let e = attribute_expr(&module);
    assert_eq!(DomainSet::SET, e.domains);
    let cond = e.inner().and_then(|i| i.as_node()).unwrap();
    assert_eq!(DomainSet::SET, exprs(cond)[1].domains);

    let err = parse_err("param p := if 1 then 'a' else {1};");
    assert_eq!(ErrorCode::DomainMismatch, err.code);
}

#[test]
fn test_functions_and_iterated_operators() {
    let module = parse_ok("param p := max(1, 2) + min {i in I} c[i];");
    let e = attribute_expr(&module);
    assert_eq!(
        Some(NodeKind::FunctionCall),
        exprs(e.inner().and_then(|i| i.as_node()).unwrap())[0]
            .inner()
            .and_then(|i| i.as_node())
            .map(|n| n.kind)
    );

    let module = parse_ok("param s symbolic := substr('abc', 1) & 'd';");
    let e = attribute_expr(&module);
    assert_eq!(DomainSet::SYMBOLIC, e.domains);

    let module = parse_ok("param n := card(A) + length('xyz') + Uniform01();");
    let e = attribute_expr(&module);
    assert_eq!(DomainSet::NUMERIC, e.domains);
}

#[test]
fn test_domain_mismatch() {
    let err = parse_err("set T := {1} union 2;");
    assert_eq!(ErrorCode::DomainMismatch, err.code);
    assert_eq!((19, 20), (err.start, err.end));
    assert_eq!(
        "expected set expression, found numeric expression",
        err.message
    );
}

// ============================================================================
// Ambiguity
// ============================================================================

#[test]
fn test_ambiguous_display_items() {
    let tree = parse_ok("param p; set S; display p, S;");
    let display = tree.statements().last().unwrap();
    assert_eq!(NodeKind::Display, display.kind);

    let items = exprs(display);
    assert_eq!(2, items.len());
    for item in items {
        assert!(item.is_ambiguous());
        assert_eq!(Some(NodeKind::Reference), inner_kind(item));
    }
    let (p, s) = (exprs(display)[0], exprs(display)[1]);
    assert!(p.domains.accepts(DomainSet::NUMERIC));
    assert!(p.domains.accepts(DomainSet::SYMBOLIC));
    assert!(s.domains.contains(Domain::Set));
}

#[test]
fn test_context_narrows_references() {
    let module = parse_ok("param q := p + 1;");
    let e = attribute_expr(&module);
    let sum = e.inner().and_then(|i| i.as_node()).unwrap();
    assert_eq!(DomainSet::NUMERIC, exprs(sum)[0].domains);

    let module = parse_ok("set T within (S);");
    let e = attribute_expr(&module);
    assert_eq!(DomainSet::SET, e.domains);
    let paren = e.inner().and_then(|i| i.as_node()).unwrap();
    assert_eq!(NodeKind::Parenthesized, paren.kind);
    assert_eq!(DomainSet::SET, exprs(paren)[0].domains);

    // a name used as a logical condition can only be numeric
    let tree = parse_ok("check flag;");
    let check = tree.statements().next().unwrap();
    assert_eq!(DomainSet::NUMERIC, exprs(check)[0].domains);
}

#[test]
fn test_braces_around_names_keep_both_readings() {
    // `{S}` is the one-element set holding S, or the set S itself
    let module = parse_ok("set S; set T := {S};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::AmbiguousSet), inner_kind(e));
    assert_eq!(DomainSet::SET, e.domains);
    assert!(e.is_ambiguous());
    assert_eq!("(ambiguous_set S)", e.to_sexp());
    let braces = e.inner().and_then(|i| i.as_node()).unwrap();
    let entries = exprs(braces);
    assert_eq!(1, entries.len());
    assert_eq!(DomainSet::REFERENCE, entries[0].domains);

    let module = parse_ok("set U := {S, T};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::AmbiguousSet), inner_kind(e));
    let braces = e.inner().and_then(|i| i.as_node()).unwrap();
    assert!(exprs(braces).iter().all(|n| n.domains == DomainSet::REFERENCE));

    // a number can only be an element
    let module = parse_ok("set U := {1, S};");
    let e = attribute_expr(&module);
    assert_eq!(Some(NodeKind::LiteralSet), inner_kind(e));
    assert!(!e.is_ambiguous());
    let braces = e.inner().and_then(|i| i.as_node()).unwrap();
    assert_eq!(DomainSet::SCALAR, exprs(braces)[1].domains);

    let tree = parse_ok("display {S};");
    let display = tree.statements().next().unwrap();
    assert!(display.find_node(NodeKind::IndexingExpression).is_none());
    let item = exprs(display)[0];
    assert_eq!(Some(NodeKind::AmbiguousSet), inner_kind(item));
    assert!(item.is_ambiguous());
}

#[test]
fn test_suffix_is_numeric() {
    let tree = parse_ok("var x{I}; display x.lb, x['a'].dual;");
    let display = tree.statements().last().unwrap();
    let items = exprs(display);
    assert_eq!("(.lb x)", items[0].to_sexp());
    assert_eq!("(.dual (x 'a'))", items[1].to_sexp());
    assert!(items.iter().all(|e| e.domains == DomainSet::NUMERIC));
}

// ============================================================================
// Dummy indices
// ============================================================================

#[test]
fn test_dummy_scope() {
    let tree = parse_ok("s.t. c: sum {i in S: i > 0} x[i] >= 0; display i;");
    let constraint = tree.statements().next().unwrap();

    let iterated = constraint
        .descendants()
        .find(|n| n.kind == NodeKind::IteratedExpression)
        .unwrap();
    let indexing = IndexingExpression::cast(
        iterated.find_node(NodeKind::IndexingExpression).unwrap(),
    )
    .unwrap();
    assert_eq!(vec!["i"], indexing.dummies());

    // bound in the filter and the body
    let filter = indexing.filter().unwrap();
    assert!(
        filter
            .descendants()
            .any(|n| n.kind == NodeKind::DummyIndex)
    );
    let body = exprs(iterated)[0];
    assert_eq!("(x i)", body.to_sexp());
    assert_eq!(
        1,
        body.descendants()
            .filter(|n| n.kind == NodeKind::DummyIndex)
            .count()
    );

    // but not afterwards
    let display = tree.statements().last().unwrap();
    assert!(
        !display
            .descendants()
            .any(|n| n.kind == NodeKind::DummyIndex)
    );
    assert_eq!(Some(NodeKind::Reference), inner_kind(exprs(display)[0]));
}

#[test]
fn test_tuple_dummies() {
    let tree = parse_ok("param p{(i, j) in LINKS, k in NODES: i <> k};");
    let stmt = Statement::cast(tree.statements().next().unwrap()).unwrap();
    assert_eq!(vec!["i", "j", "k"], stmt.indexing().unwrap().dummies());
}

#[test]
fn test_duplicate_dummy() {
    let err = parse_err("param p{i in I, i in I};");
    assert_eq!(ErrorCode::DuplicateDummyIndex, err.code);
    assert_eq!((16, 17), (err.start, err.end));

    // shadowing an outer dummy is fine
    parse_ok("param p{i in I} := sum {i in J} 1;");
}

#[test]
fn test_malformed_indexing() {
    let err = parse_err("param p{};");
    assert_eq!(ErrorCode::MalformedIndexing, err.code);

    let err = parse_err("param p{i in 3};");
    assert_eq!(ErrorCode::MalformedIndexing, err.code);
}

// ============================================================================
// Constraints and objectives
// ============================================================================

#[test]
fn test_double_bound_constraint() {
    let tree = parse_ok("var x; var y; c: 0 <= x + y <= 10;");
    let stmt = Statement::cast(tree.statements().last().unwrap()).unwrap();
    assert_eq!(NodeKind::Constraint, stmt.kind());
    let constraint = stmt.as_constraint().unwrap();
    assert!(constraint.is_ranged());

    let relations = constraint.relations();
    assert_eq!(2, relations.len());
    assert_eq!("<=", relations[0].op);
    assert_eq!("<=", relations[1].op);
    assert!(std::ptr::eq(relations[0].rhs, relations[1].lhs));
    assert_eq!("(+ x y)", relations[0].rhs.to_sexp());
    assert_eq!(DomainSet::LINEAR, relations[0].rhs.domains);

    for body in constraint.bodies() {
        assert_eq!(Some(NodeKind::LinearExpression), inner_kind(body));
    }
}

#[test]
fn test_constraint_forms() {
    let tree = parse_ok(
        "subject to a: x = 1;\n\
         subj to b{i in I}: x[i], >= 0;\n\
         s.t. c 'cap': 1 <= x, <= 2;\n\
         d: if n > 0 then x else y <= 3;",
    );
    assert_eq!(vec![NodeKind::Constraint; 4], kinds(&tree));

    let last = Statement::cast(tree.statements().last().unwrap()).unwrap();
    let relations = last.as_constraint().unwrap().relations();
    assert_eq!(1, relations.len());
    assert_eq!(DomainSet::LINEAR, relations[0].lhs.domains);
}

#[test]
fn test_objective() {
    let tree = parse_ok("maximize profit: sum {j in J} c[j] * x[j] - fixed;");
    let stmt = Statement::cast(tree.statements().next().unwrap()).unwrap();
    assert_eq!(NodeKind::Objective, stmt.kind());
    assert_eq!(Some("profit"), stmt.name());
    let body = exprs(stmt.syntax())[0];
    assert_eq!(
        "(- (iterated_expression sum (indexing_expression (indexing_entry j in J)) (* (c j) (x j))) fixed)",
        body.to_sexp()
    );
}

// ============================================================================
// check, display, printf, for, table
// ============================================================================

#[test]
fn test_statement_indexing_or_literal_set() {
    let tree = parse_ok("display {i in I} : x[i]; display {1, 2};");
    let stmts: Vec<&SyntaxNode> = tree.statements().collect();
    assert!(stmts[0].find_node(NodeKind::IndexingExpression).is_some());
    assert!(stmts[1].find_node(NodeKind::IndexingExpression).is_none());
    assert_eq!(Some(NodeKind::LiteralSet), inner_kind(exprs(stmts[1])[0]));
}

#[test]
fn test_printf_redirect() {
    // a top-level `>` ends the argument list
    let tree = parse_ok("printf 'total %g\\n', sum {i in I} p[i] > 'out.txt';");
    let printf = tree.statements().next().unwrap();
    let args = exprs(printf);
    assert_eq!(3, args.len());
    assert_eq!(Some(NodeKind::IteratedExpression), inner_kind(args[1]));
    assert_eq!(
        ">",
        printf.find_node(NodeKind::Operator).unwrap().token_text()
    );
    assert_eq!(DomainSet::SYMBOLIC, args[2].domains);

    // comparisons have to be parenthesized
    let tree = parse_ok("printf {i in I} '%d %d', i, (x[i] > 0) >> out;");
    let printf = tree.statements().next().unwrap();
    assert!(printf.find_node(NodeKind::IndexingExpression).is_some());
    let args = exprs(printf);
    assert_eq!(4, args.len());
    assert_eq!(DomainSet::LOGICAL, args[2].domains);
    assert_eq!(DomainSet::SYMBOLIC, args[3].domains);
    assert_eq!(
        ">>",
        printf.find_node(NodeKind::Operator).unwrap().token_text()
    );

    let err = parse_err("printf '%d', x > 0;");
    assert_eq!(ErrorCode::DomainMismatch, err.code);
}

#[test]
fn test_for_statement() {
    let tree = parse_ok(
        "for {i in I} {\n\
           printf 'p[%s] = %g\\n', i, p[i];\n\
           for {j in J: j <> i} display j;\n\
         }\n\
         for {k in K}: check k > 0;",
    );
    assert_eq!(vec![NodeKind::For, NodeKind::For], kinds(&tree));

    let outer = tree.statements().next().unwrap();
    let children: Vec<NodeKind> = outer
        .child_nodes()
        .map(|n| n.kind)
        .filter(|k| k.is_statement())
        .collect();
    assert_eq!(vec![NodeKind::Printf, NodeKind::For], children);

    let printf = outer.find_node(NodeKind::Printf).unwrap();
    assert_eq!(Some(NodeKind::DummyIndex), inner_kind(exprs(printf)[1]));

    let err = parse_err("for {i in I} solve;");
    assert_eq!(ErrorCode::UnexpectedToken, err.code);
}

#[test]
fn test_tables() {
    let tree = parse_ok(
        "table tin IN 'CSV' 'data.csv': S <- [k], v ~ value, w;\n\
         table tout {i in S} OUT 'CSV' 'out.csv': i ~ key, v[i];",
    );
    assert_eq!(vec![NodeKind::Table, NodeKind::Table], kinds(&tree));

    let input = Statement::cast(tree.statements().next().unwrap()).unwrap();
    assert_eq!(Some("tin"), input.name());
    let output = Statement::cast(tree.statements().last().unwrap()).unwrap();
    assert_eq!(vec!["i"], output.indexing().unwrap().dummies());
}

// ============================================================================
// Data section
// ============================================================================

#[test]
fn test_data_section() {
    let tree = parse_ok(
        "set I;\n\
         param a{I};\n\
         data;\n\
         set I := 1 2 3;\n\
         param a := 1 10, 2 20, 3 30;\n\
         end;\n",
    );
    assert_eq!(
        vec![
            NodeKind::Set,
            NodeKind::Param,
            NodeKind::Data,
            NodeKind::SetData,
            NodeKind::ParamData,
            NodeKind::End,
        ],
        kinds(&tree)
    );

    // commas between values do not split the record
    let param = tree.statements().nth(4).unwrap();
    assert_eq!(
        1,
        param
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Record)
            .count()
    );
    assert_eq!(
        6,
        param
            .descendants()
            .filter(|n| n.kind == NodeKind::Value)
            .count()
    );
}

#[test]
fn test_data_records() {
    let tree = parse_ok(
        "data;\n\
         set E[a] := (1, *) x y (2, *) z;\n\
         set M : p q := r + - s - +;\n\
         param d default 0 : c1 c2 :=\n\
           r1 1.5 .\n\
           r2 -2 1e3;\n\
         param t (tr) : r1 r2 := c1 1 2;\n\
         param s := [a, *] b 1 c 2;\n\
         param : K : u v := k1 1 2 k2 3 4;\n",
    );
    let stmts: Vec<&SyntaxNode> = tree.statements().collect();
    assert_eq!(NodeKind::Data, stmts[0].kind);
    assert!(stmts[1].find_node(NodeKind::Subscript).is_some());
    assert!(
        stmts[1]
            .descendants()
            .any(|n| n.kind == NodeKind::Slice)
    );
    assert_eq!(
        1,
        stmts[2].child_nodes().filter(|n| n.kind == NodeKind::Record).count()
    );
    assert!(stmts[3].descendants().any(|n| n.kind == NodeKind::TabularData));
    assert!(stmts[3].find_node(NodeKind::Attribute).is_some());
    assert!(stmts[4].descendants().any(|n| n.kind == NodeKind::TabularData));
    assert!(stmts[5].descendants().any(|n| n.kind == NodeKind::Slice));

    let tabbing = stmts[6].find_node(NodeKind::TabbingData).unwrap();
    let names: Vec<String> = tabbing
        .child_nodes()
        .filter(|n| n.kind == NodeKind::ModelObject)
        .map(|n| n.token_text())
        .collect();
    assert_eq!(vec!["K", "u", "v"], names);
}

#[test]
fn test_model_statement_in_data() {
    let err = parse_err("data; var x;");
    assert_eq!(ErrorCode::ModelStatementInData, err.code);
    assert_eq!((6, 9), (err.start, err.end));

    let err = parse_err("data; set S := ; param p := 1");
    assert_eq!(ErrorCode::UnexpectedEof, err.code);
}

// ============================================================================
// Recovery and limits
// ============================================================================

#[test]
fn test_recovery() {
    let text = "set A; param := 3; var x; s.t. c: x >= ; solve;";
    let err = parse_err(text);
    assert_eq!(ErrorCode::UnexpectedToken, err.code);

    let parse = parse_with_config(text, &ParseConfig::recovering()).unwrap();
    assert!(!parse.is_ok());
    assert_eq!(
        vec![
            NodeKind::Set,
            NodeKind::Error,
            NodeKind::Var,
            NodeKind::Error,
            NodeKind::Solve,
        ],
        kinds(&parse.tree)
    );
    let codes: Vec<ErrorCode> = parse.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        vec![ErrorCode::UnexpectedToken, ErrorCode::UnexpectedToken],
        codes
    );
    assert_eq!(text, parse.tree.text());
}

#[test]
fn test_recovery_after_lexical_error() {
    let text = "set A; param p := 1e; var x;";
    assert_eq!(ErrorCode::MalformedNumber, parse_err(text).code);

    let parse = parse_with_config(text, &ParseConfig::recovering()).unwrap();
    assert_eq!(1, parse.diagnostics.len());
    assert_eq!(ErrorCode::MalformedNumber, parse.diagnostics[0].code);
    assert_eq!((18, 20), (parse.diagnostics[0].start, parse.diagnostics[0].end));
    assert_eq!(
        vec![NodeKind::Set, NodeKind::Error, NodeKind::Var],
        kinds(&parse.tree)
    );
    assert_eq!(text, parse.tree.text());
}

#[test]
fn test_nesting_too_deep() {
    let config = ParseConfig {
        max_depth: 8,
        ..ParseConfig::default()
    };
    let text = "display ((((((((((1))))))))));";
    let err = parse_with_config(text, &config).unwrap_err();
    assert_eq!(ErrorCode::NestingTooDeep, err.code);

    // the default limit is plenty for ordinary models
    parse_ok(text);

    let nested_for = format!("{} display 1;", "for {i in I}".repeat(10));
    let err = parse_with_config(&nested_for, &config).unwrap_err();
    assert_eq!(ErrorCode::NestingTooDeep, err.code);

    // `^` is right-associative, so a flat chain nests
    let powers = format!("display 2{};", "^2".repeat(10));
    let err = parse_with_config(&powers, &config).unwrap_err();
    assert_eq!(ErrorCode::NestingTooDeep, err.code);

    let sums = format!("display 1{};", "+1".repeat(50));
    assert!(parse_with_config(&sums, &config).unwrap().is_ok());
}

#[test]
fn test_trivia_and_json() {
    let text = "# header\nset S; /* between */ param p{S} := 1; # trailing";
    let tree = parse_ok(text);
    assert_eq!(text, tree.text());
    assert_eq!(
        "(model (set S) (param p (indexing_expression (indexing_entry S)) (attribute 1)))",
        tree.to_sexp()
    );

    let json = tree.to_json().unwrap();
    assert!(json.contains("\"kind\": \"model\""));
    assert!(json.contains("\"indexing_expression\""));

    let bare = parse_with_config(
        text,
        &ParseConfig {
            keep_trivia: false,
            ..ParseConfig::default()
        },
    )
    .unwrap();
    assert!(bare.tree.trivia.is_empty());
    assert_eq!("set S ; param p { S } := 1 ;", bare.tree.root.token_text());
}
