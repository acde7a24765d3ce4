// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Whole-document tests: a realistic model parses cleanly and every
//! generated document reproduces its input byte for byte.

use proptest::prelude::*;

use mathprog_syntax::ast::Statement;
use mathprog_syntax::{DomainSet, NodeKind, ParseConfig, parse, parse_with_config};

const TRANSPORT: &str = r#"# A transportation problem
set I;   /* canning plants */
set J;   /* markets */

param a{i in I};
param b{j in J};
param d{i in I, j in J};
param f;
param c{i in I, j in J} := f * d[i,j] / 1000;

var x{i in I, j in J} >= 0;

minimize cost: sum{i in I, j in J} c[i,j] * x[i,j];
s.t. supply{i in I}: sum{j in J} x[i,j] <= a[i];
s.t. demand{j in J}: sum{i in I} x[i,j] >= b[j];

solve;

printf {i in I, j in J: x[i,j].val > 0} "%s -> %s: %g\n", i, j, x[i,j].val;
display x.val;

data;

set I := Seattle San-Diego;
set J := New-York Chicago Topeka;

param a := Seattle 350 San-Diego 600;
param b := New-York 325 Chicago 300 Topeka 275;

param d :  New-York  Chicago  Topeka :=
  Seattle    2.5       1.7      1.8
  San-Diego  2.5       1.8      1.4 ;

param f := 90;

end;
"#;

#[test]
fn test_transportation_model() {
    let tree = parse(TRANSPORT).unwrap();
    assert_eq!(TRANSPORT, tree.text());

    use NodeKind::*;
    let kinds: Vec<NodeKind> = tree.statements().map(|s| s.kind).collect();
    assert_eq!(
        vec![
            Set, Set, Param, Param, Param, Param, Param, Var, Objective, Constraint, Constraint,
            Solve, Printf, Display, Data, SetData, SetData, ParamData, ParamData, ParamData,
            ParamData, End,
        ],
        kinds
    );

    let names: Vec<&str> = tree
        .statements()
        .filter_map(Statement::cast)
        .filter(|s| s.kind() == Constraint)
        .filter_map(|s| s.name())
        .collect();
    assert_eq!(vec!["supply", "demand"], names);

    let display = tree.statements().find(|s| s.kind == Display).unwrap();
    let item = display.find_node(Expr).unwrap();
    assert_eq!(DomainSet::NUMERIC, item.domains);
    assert_eq!("(.val x)", item.to_sexp());

    let barewords = tree
        .root
        .tokens()
        .into_iter()
        .filter(|t| t.text == "San-Diego" || t.text == "New-York")
        .count();
    assert_eq!(6, barewords);
}

#[test]
fn test_recovery_keeps_every_byte() {
    let text = "set A;\nparam p{A} := ;\nvar x >= 0;\ns.t. c: x <= 'oops' ;\nend;";
    let parse = parse_with_config(text, &ParseConfig::recovering()).unwrap();
    assert_eq!(2, parse.diagnostics.len());
    assert_eq!(text, parse.tree.text());
}

// ============================================================================
// Generated documents
// ============================================================================

type Tokens = Vec<String>;

const NAMES: &[&str] = &["a", "b", "x", "y", "cost", "demand"];
const BINARY: &[&str] = &["+", "-", "*", "/", "^", "less", "div", "mod"];
const RELATIONS: &[&str] = &["<=", ">=", "="];
const SEPARATORS: &[&str] = &[" ", "\n", "\t", "  ", " # note\n", " /* block */ "];

fn tokens(words: &[&str]) -> Tokens {
    words.iter().map(|w| (*w).to_owned()).collect()
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(str::to_owned)
}

fn number() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 1u32..100).prop_map(|(int, frac)| format!("{int}.{frac}")),
        (1u32..10, 0u32..5).prop_map(|(mantissa, exp)| format!("{mantissa}e{exp}")),
    ]
}

fn numeric_expr() -> impl Strategy<Value = Tokens> {
    let leaf = prop_oneof![name().prop_map(|n| vec![n]), number().prop_map(|n| vec![n])];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(BINARY), inner.clone()).prop_map(
                |(mut lhs, op, rhs)| {
                    lhs.push(op.to_owned());
                    lhs.extend(rhs);
                    lhs
                }
            ),
            inner.clone().prop_map(|e| {
                let mut t = tokens(&["("]);
                t.extend(e);
                t.push(")".to_owned());
                t
            }),
            inner.clone().prop_map(|e| {
                let mut t = tokens(&["-"]);
                t.extend(e);
                t
            }),
            (inner.clone(), inner.clone(), inner).prop_map(|(cond, then, otherwise)| {
                let mut t = tokens(&["(", "if"]);
                t.extend(cond);
                t.extend(tokens(&[">", "0", "then"]));
                t.extend(then);
                t.push("else".to_owned());
                t.extend(otherwise);
                t.push(")".to_owned());
                t
            }),
        ]
    })
}

fn statement() -> impl Strategy<Value = Tokens> {
    prop_oneof![
        (name(), numeric_expr()).prop_map(|(n, e)| {
            let mut t = tokens(&["param", n.as_str(), ":="]);
            t.extend(e);
            t.push(";".to_owned());
            t
        }),
        (name(), numeric_expr()).prop_map(|(n, e)| {
            let mut t = tokens(&["var", n.as_str(), ">="]);
            t.extend(e);
            t.push(";".to_owned());
            t
        }),
        (
            any::<bool>(),
            name(),
            numeric_expr(),
            prop::sample::select(RELATIONS),
            numeric_expr(),
        )
            .prop_map(|(long, n, lhs, op, rhs)| {
                let mut t = if long {
                    tokens(&["subject", "to"])
                } else {
                    tokens(&["s.t."])
                };
                t.extend(tokens(&[n.as_str(), ":"]));
                t.extend(lhs);
                t.push(op.to_owned());
                t.extend(rhs);
                t.push(";".to_owned());
                t
            }),
        (name(), numeric_expr()).prop_map(|(n, e)| {
            let mut t = tokens(&["minimize", n.as_str(), ":"]);
            t.extend(e);
            t.push(";".to_owned());
            t
        }),
        (name(), numeric_expr()).prop_map(|(n, e)| {
            let mut t = tokens(&["set", n.as_str(), ":=", "1", ".."]);
            t.extend(e);
            t.push(";".to_owned());
            t
        }),
        numeric_expr().prop_map(|e| {
            let mut t = tokens(&["display"]);
            t.extend(e);
            t.push(";".to_owned());
            t
        }),
        name().prop_map(|n| {
            tokens(&[
                "check", "{", "i", "in", n.as_str(), "}", ":", "i", ">", "0", ";",
            ])
        }),
    ]
}

fn data_value() -> impl Strategy<Value = String> {
    prop_oneof![
        number(),
        name(),
        (1u32..100).prop_map(|n| format!("-{n}")),
        Just("San-Diego".to_owned()),
    ]
}

fn data_section() -> impl Strategy<Value = Tokens> {
    (
        name(),
        prop::collection::vec(data_value(), 1..6),
        name(),
        prop::collection::vec((data_value(), data_value()), 1..4),
    )
        .prop_map(|(set, members, param, pairs)| {
            let mut t = tokens(&["data", ";", "set", set.as_str(), ":="]);
            t.extend(members);
            t.extend(tokens(&[";", "param", param.as_str(), ":="]));
            for (key, value) in pairs {
                t.push(key);
                t.push(value);
            }
            t.extend(tokens(&[";", "end", ";"]));
            t
        })
}

fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(statement(), 1..8),
        prop::option::of(data_section()),
    )
        .prop_map(|(statements, data)| {
            let mut t: Tokens = statements.concat();
            t.extend(data.unwrap_or_default());
            t
        })
        .prop_flat_map(|t| {
            let n = t.len();
            (
                Just(t),
                prop::collection::vec(prop::sample::select(SEPARATORS), n),
            )
        })
        .prop_map(|(t, separators)| {
            let mut out = String::new();
            for (token, sep) in t.iter().zip(separators) {
                out.push_str(token);
                out.push_str(sep);
            }
            out
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn text_roundtrips(src in document()) {
        let tree = parse(&src).unwrap();
        prop_assert_eq!(&src, &tree.text());
    }

    #[test]
    fn trivia_does_not_change_the_tree(src in document()) {
        let tree = parse(&src).unwrap();
        let config = ParseConfig {
            keep_trivia: false,
            ..ParseConfig::default()
        };
        let bare = parse_with_config(&src, &config).unwrap();
        prop_assert!(bare.is_ok());
        prop_assert!(bare.tree.trivia.is_empty());
        prop_assert_eq!(&tree.root, &bare.tree.root);
    }

    #[test]
    fn normalized_text_parses_the_same(src in document()) {
        let tree = parse(&src).unwrap();
        let normalized = parse(&tree.root.token_text()).unwrap();
        prop_assert_eq!(tree.to_sexp(), normalized.to_sexp());
    }
}
