// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;

use serde::Serialize;

use crate::common::Loc;
use crate::domain::DomainSet;
use crate::token::{TokenKind, Trivia};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Model,

    // model statements
    Set,
    Param,
    Var,
    Constraint,
    Objective,
    Solve,
    Check,
    Display,
    Printf,
    For,
    Table,
    End,
    /// The `data;` line that separates the model and data sections.
    Data,

    // data statements
    SetData,
    ParamData,

    // statement parts
    ModelObject,
    Alias,
    Attribute,
    IndexingExpression,
    IndexingEntry,
    Subscript,

    // expressions
    Expr,
    Operator,
    NumExpr,
    SymExpr,
    SetExpr,
    LogExpr,
    LinearExpression,
    Reference,
    DummyIndex,
    FunctionCall,
    IteratedExpression,
    ConditionalExpression,
    LiteralSet,
    /// `{S}` where `S` may be a set to index over or a single value.
    AmbiguousSet,
    Tupel,
    Parenthesized,

    // data records
    Record,
    Slice,
    TabularData,
    TabbingData,
    Value,

    Error,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        use NodeKind::*;
        match self {
            Model => "model",
            Set => "set",
            Param => "param",
            Var => "var",
            Constraint => "constraint",
            Objective => "objective",
            Solve => "solve",
            Check => "check",
            Display => "display",
            Printf => "printf",
            For => "for",
            Table => "table",
            End => "end",
            Data => "data",
            SetData => "set_data",
            ParamData => "param_data",
            ModelObject => "model_object",
            Alias => "alias",
            Attribute => "attribute",
            IndexingExpression => "indexing_expression",
            IndexingEntry => "indexing_entry",
            Subscript => "subscript",
            Expr => "expr",
            Operator => "operator",
            NumExpr => "num_expr",
            SymExpr => "sym_expr",
            SetExpr => "set_expr",
            LogExpr => "log_expr",
            LinearExpression => "linear_expression",
            Reference => "reference",
            DummyIndex => "dummy_index",
            FunctionCall => "function_call",
            IteratedExpression => "iterated_expression",
            ConditionalExpression => "conditional_expression",
            LiteralSet => "literal_set",
            AmbiguousSet => "ambiguous_set",
            Tupel => "tupel",
            Parenthesized => "parenthesized",
            Record => "record",
            Slice => "slice",
            TabularData => "tabular_data",
            TabbingData => "tabbing_data",
            Value => "value",
            Error => "error",
        }
    }

    pub fn is_statement(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Set | Param
                | Var
                | Constraint
                | Objective
                | Solve
                | Check
                | Display
                | Printf
                | For
                | Table
                | End
                | Data
                | SetData
                | ParamData
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A leaf: one token with its exact source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub text: String,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn loc(&self) -> Loc {
        match self {
            SyntaxElement::Node(n) => n.loc,
            SyntaxElement::Token(t) => t.loc,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(n) => Some(n),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(t) => Some(t),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        SyntaxElement::Token(token)
    }
}

/// An interior node.  `domains` is only meaningful on `expr` wrappers;
/// every other kind leaves it empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub loc: Loc,
    #[serde(skip_serializing_if = "no_domains")]
    pub domains: DomainSet,
    pub children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn loc(&self) -> Loc {
        self.loc
    }

    pub fn domains(&self) -> DomainSet {
        self.domains
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    pub(crate) fn child_nodes_mut(&mut self) -> impl Iterator<Item = &mut SyntaxNode> {
        self.children.iter_mut().filter_map(|c| match c {
            SyntaxElement::Node(n) => Some(n),
            SyntaxElement::Token(_) => None,
        })
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    pub fn find_node(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    pub fn find_token(&self, kind: TokenKind) -> Option<&SyntaxToken> {
        self.child_tokens().find(|t| t.kind == kind)
    }

    /// For an `expr` wrapper, the domain-specific node (or literal
    /// token) it wraps.
    pub fn inner(&self) -> Option<&SyntaxElement> {
        if self.kind == NodeKind::Expr {
            self.children.first()
        } else {
            None
        }
    }

    /// Preorder walk over this node and every node below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Every token below this node, in source order.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    /// Token text joined with single spaces; trivia is not included.
    pub fn token_text(&self) -> String {
        self.tokens()
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the node still has more than one reading: it is tagged
    /// with several domains, or it wraps braces that may be either a
    /// literal set or an indexing expression.
    pub fn is_ambiguous(&self) -> bool {
        self.domains.is_ambiguous()
            || matches!(
                self.inner(),
                Some(SyntaxElement::Node(n)) if n.kind == NodeKind::AmbiguousSet
            )
    }
}

fn no_domains(domains: &DomainSet) -> bool {
    domains.is_empty()
}

fn collect_tokens<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxToken>) {
    for child in node.children.iter() {
        match child {
            SyntaxElement::Node(n) => collect_tokens(n, out),
            SyntaxElement::Token(t) => out.push(t),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().collect::<Vec<_>>().into_iter().rev());
        Some(node)
    }
}

/// A parsed document: the `model` root plus the whitespace and comments
/// that sit between its tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trivia: Vec<Trivia>,
    #[serde(skip)]
    source: String,
}

impl SyntaxTree {
    pub(crate) fn new(root: SyntaxNode, trivia: Vec<Trivia>, source: &str) -> Self {
        SyntaxTree {
            root,
            trivia,
            source: source.to_owned(),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn statements(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.root.child_nodes()
    }

    /// Source text covered by `loc`.
    pub fn slice(&self, loc: Loc) -> &str {
        &self.source[loc.range()]
    }

    /// Reassemble the document from its tokens and trivia.  With trivia
    /// kept this reproduces the input exactly.
    pub fn text(&self) -> String {
        let tokens = self.root.tokens();
        let mut out = String::with_capacity(self.source.len());
        let mut trivia = self.trivia.iter().peekable();
        for tok in tokens {
            while let Some(t) = trivia.next_if(|t| t.loc.start < tok.loc.start) {
                out.push_str(&self.source[t.loc.range()]);
            }
            out.push_str(&tok.text);
        }
        for t in trivia {
            out.push_str(&self.source[t.loc.range()]);
        }
        out
    }

    /// S-expression rendering of the whole tree; see
    /// [`SyntaxNode::to_sexp`].
    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str, start: usize) -> SyntaxElement {
        SyntaxElement::Token(SyntaxToken {
            kind,
            text: text.to_owned(),
            loc: Loc::new(start, start + text.len()),
        })
    }

    #[test]
    fn text_interleaves_trivia() {
        let source = "solve ; # done";
        let root = SyntaxNode {
            kind: NodeKind::Model,
            loc: Loc::new(0, source.len()),
            domains: DomainSet::EMPTY,
            children: vec![SyntaxElement::Node(SyntaxNode {
                kind: NodeKind::Solve,
                loc: Loc::new(0, 7),
                domains: DomainSet::EMPTY,
                children: vec![
                    tok(TokenKind::Keyword(crate::token::Keyword::Solve), "solve", 0),
                    tok(TokenKind::Semi, ";", 6),
                ],
            })],
        };
        let trivia = vec![
            Trivia {
                kind: crate::token::TriviaKind::Whitespace,
                loc: Loc::new(5, 6),
            },
            Trivia {
                kind: crate::token::TriviaKind::Whitespace,
                loc: Loc::new(7, 8),
            },
            Trivia {
                kind: crate::token::TriviaKind::Comment,
                loc: Loc::new(8, 14),
            },
        ];
        let tree = SyntaxTree::new(root, trivia, source);
        assert_eq!(source, tree.text());
        assert_eq!("solve ;", tree.root.token_text());
        assert_eq!(2, tree.root.descendants().count());
    }
}
