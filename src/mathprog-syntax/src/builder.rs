// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Helpers for assembling [`SyntaxNode`]s.  Locations are never stored
//! by hand: a node spans from its first child to its last.

use crate::common::Loc;
use crate::domain::DomainSet;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken};

pub(crate) struct NodeBuilder {
    kind: NodeKind,
    children: Vec<SyntaxElement>,
}

impl NodeBuilder {
    pub(crate) fn new(kind: NodeKind) -> Self {
        NodeBuilder {
            kind,
            children: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, child: impl Into<SyntaxElement>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    pub(crate) fn push_opt<T: Into<SyntaxElement>>(&mut self, child: Option<T>) -> &mut Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }
        self
    }

    pub(crate) fn finish(self) -> SyntaxNode {
        node(self.kind, self.children)
    }

    /// Finish the node and wrap it in an `expr` node tagged `domains`.
    pub(crate) fn finish_expr(self, domains: DomainSet) -> SyntaxNode {
        expr(self.finish().into(), domains)
    }
}

fn span(children: &[SyntaxElement]) -> Loc {
    match (children.first(), children.last()) {
        (Some(first), Some(last)) => Loc::merge(first.loc(), last.loc()),
        _ => Loc::default(),
    }
}

pub(crate) fn node(kind: NodeKind, children: Vec<SyntaxElement>) -> SyntaxNode {
    SyntaxNode {
        kind,
        loc: span(&children),
        domains: DomainSet::EMPTY,
        children,
    }
}

/// The uniform expression wrapper.  `inner` is either a
/// domain-specific node or a literal token.
pub(crate) fn expr(inner: SyntaxElement, domains: DomainSet) -> SyntaxNode {
    SyntaxNode {
        kind: NodeKind::Expr,
        loc: inner.loc(),
        domains,
        children: vec![inner],
    }
}

/// The uniform operator wrapper; multi-word operators like `not in`
/// keep each word as its own token.
pub(crate) fn operator(tokens: Vec<SyntaxToken>) -> SyntaxNode {
    node(
        NodeKind::Operator,
        tokens.into_iter().map(SyntaxElement::Token).collect(),
    )
}

/// `lhs op rhs` under a `kind` node, wrapped as an expression.
pub(crate) fn binary(
    kind: NodeKind,
    lhs: SyntaxNode,
    op: SyntaxNode,
    rhs: SyntaxNode,
    domains: DomainSet,
) -> SyntaxNode {
    let mut b = NodeBuilder::new(kind);
    b.push(lhs).push(op).push(rhs);
    b.finish_expr(domains)
}

pub(crate) fn unary(
    kind: NodeKind,
    op: SyntaxNode,
    operand: SyntaxNode,
    domains: DomainSet,
) -> SyntaxNode {
    let mut b = NodeBuilder::new(kind);
    b.push(op).push(operand);
    b.finish_expr(domains)
}

/// Wrap a single token in a node of `kind`.
pub(crate) fn leaf(kind: NodeKind, token: SyntaxToken) -> SyntaxNode {
    node(kind, vec![SyntaxElement::Token(token)])
}
