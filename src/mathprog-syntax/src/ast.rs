// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Typed views over the untyped syntax tree.  Each view borrows a
//! [`SyntaxNode`] of the matching kind and only offers accessors; the
//! tree itself stays the single source of truth.

use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode};
use crate::token::TokenKind;

/// A model or data statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statement<'a>(&'a SyntaxNode);

impl<'a> Statement<'a> {
    pub fn cast(node: &'a SyntaxNode) -> Option<Self> {
        if node.kind.is_statement() {
            Some(Statement(node))
        } else {
            None
        }
    }

    pub fn syntax(&self) -> &'a SyntaxNode {
        self.0
    }

    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    /// The declared model object, if the statement names one.
    pub fn name(&self) -> Option<&'a str> {
        self.0
            .find_node(NodeKind::ModelObject)
            .and_then(|n| n.child_tokens().next())
            .map(|t| t.text.as_str())
    }

    /// The alias string with its quotes removed and doubled quotes
    /// collapsed.
    pub fn alias(&self) -> Option<String> {
        let token = self
            .0
            .find_node(NodeKind::Alias)
            .and_then(|n| n.child_tokens().next())?;
        Some(unquote(&token.text))
    }

    pub fn indexing(&self) -> Option<IndexingExpression<'a>> {
        self.0
            .find_node(NodeKind::IndexingExpression)
            .map(IndexingExpression)
    }

    pub fn attributes(self) -> impl Iterator<Item = &'a SyntaxNode> {
        self.0
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Attribute)
    }

    pub fn as_constraint(&self) -> Option<Constraint<'a>> {
        Constraint::cast(self.0)
    }
}

/// Strip the surrounding quotes of a string literal and collapse the
/// doubled quote character inside it.
pub fn unquote(text: &str) -> String {
    let Some(quote) = text.chars().next() else {
        return String::new();
    };
    let inner = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraint<'a>(&'a SyntaxNode);

/// One relational clause of a constraint.  In `lo <= body <= hi` the
/// two relations share `body`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation<'a> {
    pub lhs: &'a SyntaxNode,
    pub op: &'a str,
    pub rhs: &'a SyntaxNode,
}

impl<'a> Constraint<'a> {
    pub fn cast(node: &'a SyntaxNode) -> Option<Self> {
        if node.kind == NodeKind::Constraint {
            Some(Constraint(node))
        } else {
            None
        }
    }

    /// The linear bodies, left to right.
    pub fn bodies(&self) -> Vec<&'a SyntaxNode> {
        self.0
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Expr)
            .collect()
    }

    pub fn relations(&self) -> Vec<Relation<'a>> {
        let bodies = self.bodies();
        let ops = self
            .0
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Operator)
            .filter_map(|n| n.child_tokens().next());

        ops.zip(bodies.windows(2))
            .map(|(op, pair)| Relation {
                lhs: pair[0],
                op: op.text.as_str(),
                rhs: pair[1],
            })
            .collect()
    }

    pub fn is_ranged(&self) -> bool {
        self.relations().len() == 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexingExpression<'a>(&'a SyntaxNode);

impl<'a> IndexingExpression<'a> {
    pub fn cast(node: &'a SyntaxNode) -> Option<Self> {
        match node.kind {
            NodeKind::IndexingExpression => Some(IndexingExpression(node)),
            // an indexing expression used as a set
            NodeKind::Expr => node
                .inner()
                .and_then(SyntaxElement::as_node)
                .and_then(IndexingExpression::cast),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &'a SyntaxNode {
        self.0
    }

    pub fn entries(self) -> impl Iterator<Item = &'a SyntaxNode> {
        self.0
            .child_nodes()
            .filter(|n| n.kind == NodeKind::IndexingEntry)
    }

    /// Names bound by this indexing expression, in order.
    pub fn dummies(&self) -> Vec<&'a str> {
        let mut names = Vec::new();
        for entry in self.entries() {
            let Some(first) = entry.child_nodes().next() else {
                continue;
            };
            if first.kind == NodeKind::DummyIndex {
                names.extend(first.child_tokens().map(|t| t.text.as_str()));
                continue;
            }
            // `(i, j) in S`
            let Some(tuple) = first.inner().and_then(SyntaxElement::as_node) else {
                continue;
            };
            if tuple.kind != NodeKind::Tupel {
                continue;
            }
            let bound = tuple
                .child_nodes()
                .filter_map(|e| e.inner().and_then(SyntaxElement::as_node))
                .filter(|n| n.kind == NodeKind::DummyIndex);
            for dummy in bound {
                names.extend(dummy.child_tokens().map(|t| t.text.as_str()));
            }
        }
        names
    }

    /// The logical expression after `:`, if any.
    pub fn filter(&self) -> Option<&'a SyntaxNode> {
        let mut after_colon = false;
        for child in self.0.children.iter() {
            match child {
                SyntaxElement::Token(t) if t.kind == TokenKind::Colon => after_colon = true,
                SyntaxElement::Node(n) if after_colon && n.kind == NodeKind::Expr => {
                    return Some(n);
                }
                _ => {}
            }
        }
        None
    }
}
