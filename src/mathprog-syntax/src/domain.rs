// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Expression domains and the rules for narrowing ambiguous
//! expressions once the surrounding construct says what it needs.
//!
//! A bare name like `S` or `p[i]` could denote a set, a parameter or a
//! variable, and nothing in the grammar says which.  The parser tags
//! every expression with the set of domains it could still belong to
//! and prunes that set whenever an operator or statement constrains
//! it.  Names that survive to the end with more than one domain stay
//! ambiguous in the tree.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::common::{ErrorCode, ParseError, Result};
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Numeric,
    Symbolic,
    Set,
    Logical,
    Linear,
}

impl Domain {
    const ALL: [Domain; 5] = [
        Domain::Numeric,
        Domain::Symbolic,
        Domain::Set,
        Domain::Logical,
        Domain::Linear,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Numeric => "numeric",
            Domain::Symbolic => "symbolic",
            Domain::Set => "set",
            Domain::Logical => "logical",
            Domain::Linear => "linear",
        }
    }
}

/// A small bitset over [`Domain`].  The empty set is reserved for
/// tuples, which belong to no expression domain on their own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DomainSet(u8);

impl DomainSet {
    pub const EMPTY: DomainSet = DomainSet(0);
    pub const NUMERIC: DomainSet = DomainSet(1 << Domain::Numeric as u8);
    pub const SYMBOLIC: DomainSet = DomainSet(1 << Domain::Symbolic as u8);
    pub const SET: DomainSet = DomainSet(1 << Domain::Set as u8);
    pub const LOGICAL: DomainSet = DomainSet(1 << Domain::Logical as u8);
    pub const LINEAR: DomainSet = DomainSet(1 << Domain::Linear as u8);
    /// What a bare reference can mean before anything constrains it.
    pub const REFERENCE: DomainSet = DomainSet(Self::NUMERIC.0 | Self::SYMBOLIC.0 | Self::SET.0);
    pub const SCALAR: DomainSet = DomainSet(Self::NUMERIC.0 | Self::SYMBOLIC.0);
    pub const ANY: DomainSet = DomainSet(0x1f);

    pub const fn union(self, other: DomainSet) -> DomainSet {
        DomainSet(self.0 | other.0)
    }

    pub const fn intersection(self, other: DomainSet) -> DomainSet {
        DomainSet(self.0 & other.0)
    }

    pub fn contains(self, domain: Domain) -> bool {
        self.0 & domain.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// More than one interpretation is still open.
    pub fn is_ambiguous(self) -> bool {
        self.len() > 1
    }

    pub fn iter(self) -> impl Iterator<Item = Domain> {
        Domain::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Whether an expression tagged `self` may stand where `expected`
    /// is required.  Numeric expressions are accepted as logical ones
    /// (non-zero is true).
    pub fn accepts(self, expected: DomainSet) -> bool {
        !self.coerced().intersection(expected).is_empty()
    }

    /// The domains left after placing an expression tagged `self` where
    /// `expected` is required, or `None` if it cannot go there.
    pub fn narrow(self, expected: DomainSet) -> Option<DomainSet> {
        let direct = self.intersection(expected);
        if !direct.is_empty() {
            Some(direct)
        } else if self.contains(Domain::Numeric) && expected.contains(Domain::Logical) {
            Some(DomainSet::NUMERIC)
        } else {
            None
        }
    }

    fn coerced(self) -> DomainSet {
        if self.contains(Domain::Numeric) {
            self.union(DomainSet::LOGICAL)
        } else {
            self
        }
    }

    /// Human readable description used in error messages.
    pub fn describe(self) -> String {
        if self.is_empty() {
            return "tuple".to_owned();
        }
        let names: Vec<&str> = self.iter().map(Domain::as_str).collect();
        format!("{} expression", names.join(" or "))
    }
}

impl From<Domain> for DomainSet {
    fn from(domain: Domain) -> Self {
        DomainSet(domain.bit())
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Domain::as_str).collect();
        write!(f, "{}", names.join("|"))
    }
}

impl Serialize for DomainSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for domain in self.iter() {
            seq.serialize_element(&domain)?;
        }
        seq.end()
    }
}

/// Result domain of a built-in function call.
pub fn function_domain(name: &str) -> DomainSet {
    match name {
        "substr" | "time2str" => DomainSet::SYMBOLIC,
        _ => DomainSet::NUMERIC,
    }
}

/// Restrict an expression node to `expected`, pruning interpretations
/// that the context rules out.  The restriction is pushed through
/// parentheses and conditional branches so the ambiguous leaves
/// underneath end up with the same answer as the wrapper.
pub(crate) fn restrict(mut expr: SyntaxNode, expected: DomainSet) -> Result<SyntaxNode> {
    let found = expr.domains;
    match found.narrow(expected) {
        Some(narrowed) => {
            if narrowed != found {
                push_down(&mut expr, narrowed);
            }
            Ok(expr)
        }
        None => Err(ParseError::new(
            ErrorCode::DomainMismatch,
            expr.loc.start as usize,
            expr.loc.end as usize,
            format!("expected {}, found {}", expected.describe(), found.describe()),
        )),
    }
}

fn push_down(expr: &mut SyntaxNode, narrowed: DomainSet) {
    expr.domains = narrowed;
    if expr.kind != NodeKind::Expr {
        return;
    }
    let Some(SyntaxElement::Node(inner)) = expr.children.first_mut() else {
        return;
    };
    match inner.kind {
        NodeKind::Parenthesized => {
            for e in inner.child_nodes_mut().filter(|n| n.kind == NodeKind::Expr) {
                if let Some(n) = e.domains.narrow(narrowed) {
                    push_down(e, n);
                }
            }
        }
        NodeKind::ConditionalExpression => {
            // skip the condition, narrow both branches
            for e in inner.child_nodes_mut().filter(|n| n.kind == NodeKind::Expr).skip(1) {
                if let Some(n) = e.domains.narrow(narrowed) {
                    push_down(e, n);
                }
            }
        }
        _ => {}
    }
}
