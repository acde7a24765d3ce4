// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! S-expression rendering.  `expr` and `operator` wrappers are looked
//! through so that `2 + 3 * 4` prints as `(+ 2 (* 3 4))`; punctuation
//! is dropped.

use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken};
use crate::token::TokenKind;

struct SexpPrinter {}

impl SexpPrinter {
    fn walk_element(&mut self, element: &SyntaxElement) -> Option<String> {
        match element {
            SyntaxElement::Node(n) => Some(self.walk(n)),
            SyntaxElement::Token(t) => self.walk_token(t),
        }
    }

    fn walk_token(&mut self, token: &SyntaxToken) -> Option<String> {
        if token.kind.is_punctuation() {
            None
        } else {
            Some(token.text.clone())
        }
    }

    fn walk(&mut self, node: &SyntaxNode) -> String {
        match node.kind {
            NodeKind::Expr => match node.children.first() {
                Some(inner) => self.walk_element(inner).unwrap_or_default(),
                None => String::new(),
            },
            NodeKind::Operator => operator_text(node),
            NodeKind::DummyIndex | NodeKind::Value | NodeKind::ModelObject | NodeKind::Alias => {
                node.token_text()
            }
            NodeKind::NumExpr
            | NodeKind::SymExpr
            | NodeKind::SetExpr
            | NodeKind::LogExpr
            | NodeKind::LinearExpression
                if node.find_node(NodeKind::Operator).is_some() =>
            {
                self.walk_operation(node)
            }
            NodeKind::Reference => self.walk_reference(node),
            NodeKind::Error => format!("(error {:?})", node.token_text()),
            _ => {
                let mut parts = vec![node.kind.as_str().to_owned()];
                let children = match node.children.first() {
                    Some(SyntaxElement::Token(t)) if repeats_kind(node.kind, t) => {
                        &node.children[1..]
                    }
                    _ => &node.children[..],
                };
                parts.extend(children.iter().filter_map(|c| self.walk_element(c)));
                format!("({})", parts.join(" "))
            }
        }
    }

    // the first operator heads the list; later ones (`by`) stay inline
    fn walk_operation(&mut self, node: &SyntaxNode) -> String {
        let mut head = None;
        let mut args = Vec::new();
        for child in node.children.iter() {
            match child {
                SyntaxElement::Node(n) if n.kind == NodeKind::Operator && head.is_none() => {
                    head = Some(operator_text(n));
                }
                _ => args.extend(self.walk_element(child)),
            }
        }
        let mut parts = Vec::with_capacity(args.len() + 1);
        parts.extend(head);
        parts.extend(args);
        format!("({})", parts.join(" "))
    }

    // `x` / `(x i j)` / `(.lb (x i))`
    fn walk_reference(&mut self, node: &SyntaxNode) -> String {
        let name = node
            .find_token(TokenKind::Ident)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let base = match node.find_node(NodeKind::Subscript) {
            Some(subscript) => {
                let mut parts = vec![name];
                parts.extend(subscript.child_nodes().map(|n| self.walk(n)));
                format!("({})", parts.join(" "))
            }
            None => name,
        };
        match node.find_token(TokenKind::Suffix) {
            Some(suffix) => format!("({} {})", suffix.text, base),
            None => base,
        }
    }
}

// `(set S ...)` rather than `(set set S ...)`
fn repeats_kind(kind: NodeKind, token: &SyntaxToken) -> bool {
    matches!(token.kind, TokenKind::Keyword(_))
        && (token.text == kind.as_str() || matches!(kind, NodeKind::SetData | NodeKind::ParamData))
}

fn operator_text(node: &SyntaxNode) -> String {
    node.child_tokens()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl SyntaxNode {
    /// Render this node as an S-expression, e.g. `(+ 2 (* 3 (^ 4 2)))`.
    pub fn to_sexp(&self) -> String {
        let mut printer = SexpPrinter {};
        printer.walk(self)
    }
}
