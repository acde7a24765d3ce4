// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Expressions.  All five domains share one precedence-climbing loop;
//! each operator knows which domains its operands must accept and
//! which domain it produces, and operands are narrowed as they are
//! combined.

use tracing::trace;

use super::Parser;
use crate::builder::{self, NodeBuilder};
use crate::common::{ErrorCode, ParseError, Result};
use crate::domain::{self, Domain, DomainSet};
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken};
use crate::token::{Keyword, TokenKind};

/// Binding powers, loosest first.
pub(super) mod bp {
    pub const COND: u8 = 2;
    pub const OR: u8 = 3;
    /// Body of `exists` and `forall`.
    pub const QUANT: u8 = 4;
    pub const AND: u8 = 5;
    pub const REL: u8 = 6;
    pub const MEMB: u8 = 7;
    pub const UNION: u8 = 9;
    pub const INTER: u8 = 10;
    pub const CROSS: u8 = 11;
    pub const SET: u8 = 12;
    pub const CONCAT: u8 = 13;
    pub const ADD: u8 = 15;
    /// Body of `sum`, `prod`, `min` and `max`.
    pub const ITER: u8 = 16;
    pub const MUL: u8 = 17;
    pub const UNARY: u8 = 18;
    pub const EXP: u8 = 19;
}

/// Whether arithmetic builds `linear_expression` nodes (constraint and
/// objective bodies) or plain numeric ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Ctx {
    pub linear: bool,
}

impl Ctx {
    pub const PLAIN: Ctx = Ctx { linear: false };
    pub const LINEAR: Ctx = Ctx { linear: true };

    /// Node kind, operand domains and result domain for arithmetic.
    fn arithmetic(self) -> (NodeKind, DomainSet, DomainSet) {
        if self.linear {
            (
                NodeKind::LinearExpression,
                DomainSet::NUMERIC.union(DomainSet::LINEAR),
                DomainSet::LINEAR,
            )
        } else {
            (NodeKind::NumExpr, DomainSet::NUMERIC, DomainSet::NUMERIC)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Infix {
    Or,
    And,
    Rel,
    In,
    NotIn,
    Within,
    NotWithin,
    Union,
    Inter,
    Cross,
    Range,
    Concat,
    Add,
    Mul,
    Pow,
}

impl Infix {
    fn binding_power(self) -> u8 {
        use Infix::*;
        match self {
            Or => bp::OR,
            And => bp::AND,
            Rel => bp::REL,
            In | NotIn | Within | NotWithin => bp::MEMB,
            Union => bp::UNION,
            Inter => bp::INTER,
            Cross => bp::CROSS,
            Range => bp::SET,
            Concat => bp::CONCAT,
            Add => bp::ADD,
            Mul => bp::MUL,
            Pow => bp::EXP,
        }
    }
}

/// An `expr` wrapping a `tupel`.
pub(super) fn is_tuple(node: &SyntaxNode) -> bool {
    matches!(node.inner(), Some(SyntaxElement::Node(n)) if n.kind == NodeKind::Tupel)
}

/// The name token of an `expr` that is nothing but a bare name.
fn bare_name(node: &SyntaxNode) -> Option<&SyntaxToken> {
    let Some(SyntaxElement::Node(inner)) = node.inner() else {
        return None;
    };
    match (inner.kind, inner.children.as_slice()) {
        (NodeKind::Reference | NodeKind::DummyIndex, [SyntaxElement::Token(name)])
            if name.kind == TokenKind::Ident =>
        {
            Some(name)
        }
        _ => None,
    }
}

enum Entry {
    /// `i in S` or `(i, j) in S`
    Binding(SyntaxNode),
    /// a bare expression: a set to iterate over, or a literal element
    Plain(SyntaxNode),
}

struct Braces {
    open: SyntaxToken,
    entries: Vec<(Entry, Option<SyntaxToken>)>,
    filter: Option<(SyntaxToken, SyntaxNode)>,
    close: SyntaxToken,
}

impl Braces {
    /// `{...}` in expression position is an indexing expression if it
    /// binds something, has a filter, or lists something that can only
    /// be a set; otherwise it is a literal set.
    fn is_indexing(&self) -> bool {
        self.filter.is_some()
            || self.entries.iter().any(|(e, _)| match e {
                Entry::Binding(_) => true,
                Entry::Plain(n) => n.domains == DomainSet::SET,
            })
    }

    /// `{S}` or `{S, T}` where every entry is a reference that may
    /// still name a set reads either as a literal set of those values
    /// or as an indexing expression over those sets.
    fn is_either(&self) -> bool {
        self.filter.is_none()
            && !self.entries.is_empty()
            && self.entries.iter().all(|(e, _)| match e {
                Entry::Plain(n) => n.domains.is_ambiguous() && n.domains.contains(Domain::Set),
                Entry::Binding(_) => false,
            })
    }
}

impl<'input, 'tokens> Parser<'input, 'tokens> {
    /// Parse an expression whose binary operators all bind at least as
    /// tightly as `min_bp`.
    pub(super) fn parse_expr_bp(&mut self, min_bp: u8, ctx: Ctx) -> Result<SyntaxNode> {
        self.nested(|p| p.parse_expr_loop(min_bp, ctx))
    }

    /// Parse an expression that must land in `expected`, stopping at
    /// the loosest operator that can still produce that domain.
    pub(super) fn parse_domain_expr(&mut self, expected: DomainSet) -> Result<SyntaxNode> {
        let min_bp = if expected.contains(Domain::Logical) {
            0
        } else if expected.contains(Domain::Set) {
            bp::UNION
        } else if expected.contains(Domain::Symbolic) {
            bp::CONCAT
        } else {
            bp::ADD
        };
        let e = self.parse_expr_bp(min_bp, Ctx::PLAIN)?;
        domain::restrict(e, expected)
    }

    /// A constraint or objective body, always returned as an `expr`
    /// wrapping a `linear_expression`.
    pub(super) fn parse_linear_expression(&mut self) -> Result<SyntaxNode> {
        let e = self.parse_expr_bp(bp::ADD, Ctx::LINEAR)?;
        let e = domain::restrict(e, DomainSet::NUMERIC.union(DomainSet::LINEAR))?;
        let already_linear = matches!(
            e.inner(),
            Some(SyntaxElement::Node(n)) if n.kind == NodeKind::LinearExpression
        );
        if already_linear {
            Ok(e)
        } else {
            let wrapped = builder::node(NodeKind::LinearExpression, vec![e.into()]);
            Ok(builder::expr(wrapped.into(), DomainSet::LINEAR))
        }
    }

    fn parse_expr_loop(&mut self, min_bp: u8, ctx: Ctx) -> Result<SyntaxNode> {
        let mut lhs = self.parse_prefix(ctx)?;

        while let Some((op, width)) = self.peek_infix() {
            let power = op.binding_power();
            if power < min_bp {
                break;
            }
            let mut tokens = Vec::with_capacity(width);
            for _ in 0..width {
                tokens.push(self.bump()?);
            }
            let op_node = builder::operator(tokens);
            // exponentiation is the only right-associative operator
            let next = if op == Infix::Pow { power } else { power + 1 };
            let rhs = self.parse_expr_bp(next, ctx)?;
            lhs = self.combine(op, lhs, op_node, rhs, ctx)?;
            if op == Infix::Range && self.at_keyword(Keyword::By) {
                lhs = self.parse_range_step(lhs)?;
            }
        }

        Ok(lhs)
    }

    fn peek_infix(&self) -> Option<(Infix, usize)> {
        use TokenKind as T;
        let op = match self.peek_kind()? {
            T::Keyword(Keyword::Or) | T::PipePipe => Infix::Or,
            T::Keyword(Keyword::And) | T::AmpAmp => Infix::And,
            T::Lt | T::Lte | T::Eq | T::EqEq | T::Gte | T::Gt | T::Neq | T::BangEq => Infix::Rel,
            T::Keyword(Keyword::In) => Infix::In,
            T::Keyword(Keyword::Within) => Infix::Within,
            T::Keyword(Keyword::Not) | T::Bang => {
                return match self.peek_nth_kind(1) {
                    Some(T::Keyword(Keyword::In)) => Some((Infix::NotIn, 2)),
                    Some(T::Keyword(Keyword::Within)) => Some((Infix::NotWithin, 2)),
                    _ => None,
                };
            }
            T::Keyword(Keyword::Union | Keyword::Diff | Keyword::Symdiff) => Infix::Union,
            T::Keyword(Keyword::Inter) => Infix::Inter,
            T::Keyword(Keyword::Cross) => Infix::Cross,
            T::DotDot => Infix::Range,
            T::Amp => Infix::Concat,
            T::Plus | T::Minus | T::Keyword(Keyword::Less) => Infix::Add,
            T::Star | T::Slash | T::Keyword(Keyword::Div | Keyword::Mod) => Infix::Mul,
            T::StarStar | T::Caret => Infix::Pow,
            _ => return None,
        };
        Some((op, 1))
    }

    fn combine(
        &self,
        op: Infix,
        lhs: SyntaxNode,
        op_node: SyntaxNode,
        rhs: SyntaxNode,
        ctx: Ctx,
    ) -> Result<SyntaxNode> {
        use DomainSet as D;
        use Infix::*;
        let (kind, lhs_expected, rhs_expected, result) = match op {
            Or | And => (NodeKind::LogExpr, D::LOGICAL, D::LOGICAL, D::LOGICAL),
            Rel => (NodeKind::LogExpr, D::SCALAR, D::SCALAR, D::LOGICAL),
            In | NotIn => (NodeKind::LogExpr, D::SCALAR, D::SET, D::LOGICAL),
            Within | NotWithin => (NodeKind::LogExpr, D::SET, D::SET, D::LOGICAL),
            Union | Inter | Cross => (NodeKind::SetExpr, D::SET, D::SET, D::SET),
            Range => (NodeKind::SetExpr, D::NUMERIC, D::NUMERIC, D::SET),
            Concat => (NodeKind::SymExpr, D::SCALAR, D::SCALAR, D::SYMBOLIC),
            Add | Mul | Pow => {
                let (kind, operands, result) = ctx.arithmetic();
                (kind, operands, operands, result)
            }
        };

        // a tuple may only stand on the left of `in`
        let lhs = if matches!(op, In | NotIn) && is_tuple(&lhs) {
            lhs
        } else {
            domain::restrict(lhs, lhs_expected)?
        };
        let rhs = domain::restrict(rhs, rhs_expected)?;

        Ok(builder::binary(kind, lhs, op_node, rhs, result))
    }

    // `a .. b` has already been built; append `by c`
    fn parse_range_step(&mut self, range: SyntaxNode) -> Result<SyntaxNode> {
        let by = builder::operator(vec![self.bump()?]);
        let step = self.parse_expr_bp(bp::SET + 1, Ctx::PLAIN)?;
        let step = domain::restrict(step, DomainSet::NUMERIC)?;

        let mut children = match range.children.into_iter().next() {
            Some(SyntaxElement::Node(inner)) => inner.children,
            _ => Vec::new(),
        };
        children.push(by.into());
        children.push(step.into());
        let node = builder::node(NodeKind::SetExpr, children);
        Ok(builder::expr(node.into(), DomainSet::SET))
    }

    // ========================================================================
    // Primaries and prefix forms
    // ========================================================================

    fn parse_prefix(&mut self, ctx: Ctx) -> Result<SyntaxNode> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.eof_error("expression"));
        };
        match kind {
            TokenKind::Plus | TokenKind::Minus => self.parse_unary_arithmetic(ctx),
            TokenKind::Keyword(Keyword::Not) | TokenKind::Bang => self.parse_not(),
            TokenKind::Keyword(Keyword::If) => self.parse_conditional(ctx),
            TokenKind::Keyword(Keyword::Min | Keyword::Max)
                if self.peek_nth_kind(1) == Some(TokenKind::LParen) =>
            {
                self.parse_function_call()
            }
            TokenKind::Keyword(Keyword::Sum | Keyword::Prod | Keyword::Min | Keyword::Max) => {
                self.parse_iterated_numeric(ctx)
            }
            TokenKind::Keyword(Keyword::Setof) => self.parse_setof(),
            TokenKind::Keyword(Keyword::Exists | Keyword::Forall) => self.parse_quantifier(),
            TokenKind::Function => self.parse_function_call(),
            TokenKind::Num => Ok(builder::expr(self.bump()?.into(), DomainSet::NUMERIC)),
            TokenKind::Str => Ok(builder::expr(self.bump()?.into(), DomainSet::SYMBOLIC)),
            TokenKind::Ident => self.parse_reference(),
            TokenKind::LParen => self.parse_parenthesized(ctx),
            TokenKind::LBrace => self.parse_set_braces(),
            _ => Err(self.unexpected_error("expression")),
        }
    }

    fn parse_unary_arithmetic(&mut self, ctx: Ctx) -> Result<SyntaxNode> {
        let op = builder::operator(vec![self.bump()?]);
        let operand = self.parse_expr_bp(bp::UNARY, ctx)?;
        let (kind, operands, result) = ctx.arithmetic();
        let operand = domain::restrict(operand, operands)?;
        Ok(builder::unary(kind, op, operand, result))
    }

    // `not` takes a whole relational or membership test as its operand
    // but stops at `and`/`or`, so `not x in S and y` is
    // `(not (x in S)) and y`.
    fn parse_not(&mut self) -> Result<SyntaxNode> {
        let op = builder::operator(vec![self.bump()?]);
        let operand = self.parse_expr_bp(bp::REL, Ctx::PLAIN)?;
        let operand = domain::restrict(operand, DomainSet::LOGICAL)?;
        Ok(builder::unary(
            NodeKind::LogExpr,
            op,
            operand,
            DomainSet::LOGICAL,
        ))
    }

    fn parse_conditional(&mut self, ctx: Ctx) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::ConditionalExpression);
        b.push(self.bump()?);
        let condition = self.parse_expr_bp(0, Ctx::PLAIN)?;
        b.push(domain::restrict(condition, DomainSet::LOGICAL)?);
        b.push(self.expect_keyword(Keyword::Then)?);

        // a linear branch must not swallow the constraint's relation
        let branch_bp = if ctx.linear { bp::ADD } else { bp::COND };
        let then_branch = self.parse_expr_bp(branch_bp, ctx)?;
        let Some(else_kw) = self.eat_keyword(Keyword::Else) else {
            let (then_branch, domains) = if ctx.linear {
                let (_, operands, result) = ctx.arithmetic();
                (domain::restrict(then_branch, operands)?, result)
            } else {
                let domains = then_branch.domains;
                (then_branch, domains)
            };
            b.push(then_branch);
            return Ok(b.finish_expr(domains));
        };
        let else_branch = self.parse_expr_bp(branch_bp, ctx)?;

        let (then_branch, else_branch, domains) = if ctx.linear {
            let (_, operands, result) = ctx.arithmetic();
            (
                domain::restrict(then_branch, operands)?,
                domain::restrict(else_branch, operands)?,
                result,
            )
        } else {
            let common = then_branch.domains.intersection(else_branch.domains);
            if common.is_empty() {
                return Err(ParseError::new(
                    ErrorCode::DomainMismatch,
                    else_branch.loc.start as usize,
                    else_branch.loc.end as usize,
                    format!(
                        "expected {} in else branch, found {}",
                        then_branch.domains.describe(),
                        else_branch.domains.describe()
                    ),
                ));
            }
            (
                domain::restrict(then_branch, common)?,
                domain::restrict(else_branch, common)?,
                common,
            )
        };

        b.push(then_branch).push(else_kw).push(else_branch);
        Ok(b.finish_expr(domains))
    }

    fn parse_iterated_numeric(&mut self, ctx: Ctx) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::IteratedExpression);
        let keyword = self.bump()?;
        // only a sum of linear terms stays linear
        let inner = Ctx {
            linear: ctx.linear && keyword.kind == TokenKind::Keyword(Keyword::Sum),
        };
        b.push(keyword);
        b.push(self.parse_indexing_expression()?);
        let body = self.parse_expr_bp(bp::ITER, inner);
        self.pop_scope();

        let (_, operands, result) = inner.arithmetic();
        b.push(domain::restrict(body?, operands)?);
        Ok(b.finish_expr(result))
    }

    fn parse_setof(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::IteratedExpression);
        b.push(self.bump()?);
        b.push(self.parse_indexing_expression()?);
        let body = self.parse_expr_bp(bp::SET + 1, Ctx::PLAIN);
        self.pop_scope();

        let body = body?;
        let body = if is_tuple(&body) {
            body
        } else {
            domain::restrict(body, DomainSet::SCALAR)?
        };
        b.push(body);
        Ok(b.finish_expr(DomainSet::SET))
    }

    fn parse_quantifier(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::IteratedExpression);
        b.push(self.bump()?);
        b.push(self.parse_indexing_expression()?);
        let body = self.parse_expr_bp(bp::QUANT, Ctx::PLAIN);
        self.pop_scope();

        b.push(domain::restrict(body?, DomainSet::LOGICAL)?);
        Ok(b.finish_expr(DomainSet::LOGICAL))
    }

    fn parse_function_call(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::FunctionCall);
        let name = self.bump()?;
        let domains = domain::function_domain(&name.text);
        b.push(name);
        b.push(self.expect(TokenKind::LParen, "'('")?);
        if !self.at(TokenKind::RParen) {
            loop {
                let arg = self.parse_expr_bp(0, Ctx::PLAIN)?;
                b.push(domain::restrict(arg, DomainSet::REFERENCE)?);
                match self.eat(TokenKind::Comma) {
                    Some(comma) => b.push(comma),
                    None => break,
                };
            }
        }
        b.push(self.expect(TokenKind::RParen, "')'")?);
        Ok(b.finish_expr(domains))
    }

    fn parse_reference(&mut self) -> Result<SyntaxNode> {
        let name = self.bump()?;
        let qualified = self.at(TokenKind::LBracket) || self.at(TokenKind::Suffix);
        if !qualified && self.is_dummy(&name.text) {
            let dummy = builder::leaf(NodeKind::DummyIndex, name);
            return Ok(builder::expr(dummy.into(), DomainSet::SCALAR));
        }

        let mut b = NodeBuilder::new(NodeKind::Reference);
        b.push(name);
        if self.at(TokenKind::LBracket) {
            b.push(self.parse_subscript()?);
        }
        let suffix = self.eat(TokenKind::Suffix);
        // only variables and constraints carry suffixes
        let domains = if suffix.is_some() {
            DomainSet::NUMERIC
        } else {
            DomainSet::REFERENCE
        };
        b.push_opt(suffix);

        let node = b.finish_expr(domains);
        if node.is_ambiguous() {
            trace!(
                start = node.loc.start,
                end = node.loc.end,
                domains = %node.domains,
                "ambiguous reference"
            );
        }
        Ok(node)
    }

    fn parse_subscript(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Subscript);
        b.push(self.expect(TokenKind::LBracket, "'['")?);
        loop {
            let item = self.parse_expr_bp(bp::CONCAT, Ctx::PLAIN)?;
            b.push(domain::restrict(item, DomainSet::SCALAR)?);
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        b.push(self.expect(TokenKind::RBracket, "']'")?);
        Ok(b.finish())
    }

    fn parse_parenthesized(&mut self, ctx: Ctx) -> Result<SyntaxNode> {
        let lparen = self.bump()?;
        let min_bp = if ctx.linear { bp::ADD } else { 0 };
        let first = self.parse_expr_bp(min_bp, ctx)?;

        if !ctx.linear && self.at(TokenKind::Comma) {
            let mut b = NodeBuilder::new(NodeKind::Tupel);
            b.push(lparen);
            b.push(domain::restrict(first, DomainSet::SCALAR)?);
            while let Some(comma) = self.eat(TokenKind::Comma) {
                b.push(comma);
                let element = self.parse_expr_bp(0, Ctx::PLAIN)?;
                b.push(domain::restrict(element, DomainSet::SCALAR)?);
            }
            b.push(self.expect(TokenKind::RParen, "')'")?);
            return Ok(b.finish_expr(DomainSet::EMPTY));
        }

        let domains = first.domains;
        let mut b = NodeBuilder::new(NodeKind::Parenthesized);
        b.push(lparen);
        b.push(first);
        b.push(self.expect(TokenKind::RParen, "')'")?);
        Ok(b.finish_expr(domains))
    }

    // ========================================================================
    // Indexing expressions and literal sets
    // ========================================================================

    /// Parse `{ ... }` where only an indexing expression makes sense.
    /// The scope holding its dummy indices stays open for whatever the
    /// indexing expression governs; callers close it with `pop_scope`.
    pub(super) fn parse_indexing_expression(&mut self) -> Result<SyntaxNode> {
        let braces = self.parse_braces()?;
        self.finish_indexing(braces)
    }

    /// `{ ... }` in expression position: either an indexing expression
    /// used as a set, or a literal set.
    fn parse_set_braces(&mut self) -> Result<SyntaxNode> {
        let braces = self.parse_braces();
        self.pop_scope();
        let braces = braces?;

        if braces.is_indexing() {
            let indexing = self.finish_indexing(braces)?;
            return Ok(builder::expr(indexing.into(), DomainSet::SET));
        }

        // both readings stay open; the entries keep every domain they had
        let either = braces.is_either();
        let kind = if either {
            NodeKind::AmbiguousSet
        } else {
            NodeKind::LiteralSet
        };
        let mut b = NodeBuilder::new(kind);
        b.push(braces.open);
        for (entry, comma) in braces.entries {
            match entry {
                Entry::Plain(e) if either || is_tuple(&e) => b.push(e),
                Entry::Plain(e) => b.push(domain::restrict(e, DomainSet::SCALAR)?),
                Entry::Binding(n) => b.push(n),
            };
            b.push_opt(comma);
        }
        b.push(braces.close);

        let node = b.finish_expr(DomainSet::SET);
        if either {
            trace!(
                start = node.loc.start,
                end = node.loc.end,
                "literal set or indexing expression"
            );
        }
        Ok(node)
    }

    // pushes a scope that the caller must pop
    fn parse_braces(&mut self) -> Result<Braces> {
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        self.push_scope();

        let mut entries = Vec::new();
        let mut filter = None;
        if !self.at(TokenKind::RBrace) {
            loop {
                let entry = self.parse_indexing_entry()?;
                let comma = self.eat(TokenKind::Comma);
                let more = comma.is_some();
                entries.push((entry, comma));
                if !more {
                    break;
                }
            }
            if let Some(colon) = self.eat(TokenKind::Colon) {
                let condition = self.parse_expr_bp(0, Ctx::PLAIN)?;
                filter = Some((colon, domain::restrict(condition, DomainSet::LOGICAL)?));
            }
        }
        let close = self.expect(TokenKind::RBrace, "'}'")?;

        Ok(Braces {
            open,
            entries,
            filter,
            close,
        })
    }

    fn parse_indexing_entry(&mut self) -> Result<Entry> {
        if self.at(TokenKind::Ident) && self.peek_nth_kind(1) == Some(TokenKind::Keyword(Keyword::In)) {
            let dummy = self.bump()?;
            let in_kw = self.bump()?;
            let set = self.parse_expr_bp(bp::UNION, Ctx::PLAIN)?;
            let set = self.indexing_set(set)?;
            self.bind(&dummy)?;

            let mut b = NodeBuilder::new(NodeKind::IndexingEntry);
            b.push(builder::leaf(NodeKind::DummyIndex, dummy));
            b.push(in_kw).push(set);
            return Ok(Entry::Binding(b.finish()));
        }

        let e = self.parse_expr_bp(bp::UNION, Ctx::PLAIN)?;
        if is_tuple(&e) && self.at_keyword(Keyword::In) {
            let in_kw = self.bump()?;
            let set = self.parse_expr_bp(bp::UNION, Ctx::PLAIN)?;
            let set = self.indexing_set(set)?;
            let tuple = self.bind_tuple(e)?;

            let mut b = NodeBuilder::new(NodeKind::IndexingEntry);
            b.push(tuple).push(in_kw).push(set);
            return Ok(Entry::Binding(b.finish()));
        }

        Ok(Entry::Plain(e))
    }

    /// Every bare name inside a bound tuple becomes a dummy index.
    fn bind_tuple(&mut self, mut tuple: SyntaxNode) -> Result<SyntaxNode> {
        let mut names = Vec::new();
        if let Some(SyntaxElement::Node(inner)) = tuple.children.first_mut() {
            for element in inner.child_nodes_mut() {
                if let Some(name) = bare_name(element).cloned() {
                    let dummy = builder::leaf(NodeKind::DummyIndex, name.clone());
                    *element = builder::expr(dummy.into(), DomainSet::SCALAR);
                    names.push(name);
                }
            }
        }
        for name in names.iter() {
            self.bind(name)?;
        }
        Ok(tuple)
    }

    fn indexing_set(&self, set: SyntaxNode) -> Result<SyntaxNode> {
        domain::restrict(set, DomainSet::SET).map_err(|err| {
            ParseError::new(
                ErrorCode::MalformedIndexing,
                err.start,
                err.end,
                format!("indexing expression {}", err.message),
            )
        })
    }

    fn finish_indexing(&self, braces: Braces) -> Result<SyntaxNode> {
        if braces.entries.is_empty() {
            return Err(ParseError::new(
                ErrorCode::MalformedIndexing,
                braces.open.loc.start as usize,
                braces.close.loc.end as usize,
                "expected at least one indexing entry, found '}'",
            ));
        }

        let mut b = NodeBuilder::new(NodeKind::IndexingExpression);
        b.push(braces.open);
        for (entry, comma) in braces.entries {
            match entry {
                Entry::Binding(node) => b.push(node),
                Entry::Plain(set) => {
                    let set = self.indexing_set(set)?;
                    b.push(builder::node(NodeKind::IndexingEntry, vec![set.into()]))
                }
            };
            b.push_opt(comma);
        }
        if let Some((colon, condition)) = braces.filter {
            b.push(colon).push(condition);
        }
        b.push(braces.close);
        Ok(b.finish())
    }
}
