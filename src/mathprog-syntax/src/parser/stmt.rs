// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use super::Parser;
use super::expr::{Ctx, bp};
use crate::builder::{self, NodeBuilder};
use crate::common::{ErrorCode, Result};
use crate::domain::{self, DomainSet};
use crate::syntax::{NodeKind, SyntaxNode};
use crate::token::{Keyword, TokenKind};

impl<'input, 'tokens> Parser<'input, 'tokens> {
    pub(super) fn parse_model_statement(&mut self) -> Result<SyntaxNode> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.eof_error("model statement"));
        };
        match kind {
            TokenKind::Keyword(Keyword::Set) => self.parse_declaration(NodeKind::Set),
            TokenKind::Keyword(Keyword::Param) => self.parse_declaration(NodeKind::Param),
            TokenKind::Keyword(Keyword::Var) => self.parse_declaration(NodeKind::Var),
            TokenKind::Keyword(Keyword::Subject | Keyword::Subj | Keyword::StDot)
            | TokenKind::Ident => self.parse_constraint(),
            TokenKind::Keyword(Keyword::Maximize | Keyword::Minimize) => self.parse_objective(),
            TokenKind::Keyword(Keyword::Solve) => self.parse_keyword_statement(NodeKind::Solve),
            TokenKind::Keyword(Keyword::End) => self.parse_keyword_statement(NodeKind::End),
            TokenKind::Keyword(Keyword::Check) => self.parse_check(),
            TokenKind::Keyword(Keyword::Display) => self.parse_display(),
            TokenKind::Keyword(Keyword::Printf) => self.parse_printf(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Table) => self.parse_table(),
            _ => Err(self.unexpected_error("model statement")),
        }
    }

    /// `solve ;`, `end ;`
    pub(super) fn parse_keyword_statement(&mut self, kind: NodeKind) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(kind);
        b.push(self.bump()?);
        b.push(self.expect_terminator()?);
        Ok(b.finish())
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Name, optional alias and optional indexing expression.  Returns
    /// whether an indexing expression opened a dummy scope.
    fn parse_header(&mut self, b: &mut NodeBuilder) -> Result<bool> {
        let name = self.expect(TokenKind::Ident, "name")?;
        b.push(builder::leaf(NodeKind::ModelObject, name));
        if let Some(alias) = self.eat(TokenKind::Str) {
            b.push(builder::leaf(NodeKind::Alias, alias));
        }
        if self.at(TokenKind::LBrace) {
            b.push(self.parse_indexing_expression()?);
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_declaration(&mut self, kind: NodeKind) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(kind);
        b.push(self.bump()?);
        let scoped = self.parse_header(&mut b)?;

        let (what, attribute): (&str, fn(&mut Self) -> Result<Option<SyntaxNode>>) = match kind {
            NodeKind::Set => ("set", Self::parse_set_attribute),
            NodeKind::Param => ("param", Self::parse_param_attribute),
            _ => ("var", Self::parse_var_attribute),
        };
        loop {
            let comma = self.eat(TokenKind::Comma);
            if comma.is_none() && self.at(TokenKind::Semi) {
                break;
            }
            match attribute(self)? {
                Some(attr) => {
                    b.push_opt(comma).push(attr);
                }
                None => {
                    let expected = if comma.is_some() {
                        format!("{what} attribute")
                    } else {
                        format!("{what} attribute or ';'")
                    };
                    return Err(self.error_here(ErrorCode::MalformedAttribute, &expected));
                }
            }
        }
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    fn parse_set_attribute(&mut self) -> Result<Option<SyntaxNode>> {
        let mut b = NodeBuilder::new(NodeKind::Attribute);
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Dimen)) => {
                b.push(self.bump()?);
                b.push(self.expect(TokenKind::Num, "dimension")?);
            }
            // `in` is accepted as a spelling of `within`
            Some(
                TokenKind::Keyword(Keyword::Within | Keyword::In | Keyword::Default)
                | TokenKind::Assign,
            ) => {
                b.push(self.bump()?);
                b.push(self.parse_domain_expr(DomainSet::SET)?);
            }
            _ => return Ok(None),
        }
        Ok(Some(b.finish()))
    }

    fn parse_param_attribute(&mut self) -> Result<Option<SyntaxNode>> {
        use TokenKind as T;
        let mut b = NodeBuilder::new(NodeKind::Attribute);
        match self.peek_kind() {
            // `logical` is kept as written; it means the same as `binary`
            Some(T::Keyword(
                Keyword::Integer | Keyword::Binary | Keyword::Logical | Keyword::Symbolic,
            )) => {
                b.push(self.bump()?);
            }
            Some(T::Lt | T::Lte | T::Eq | T::EqEq | T::Gte | T::Gt | T::Neq | T::BangEq) => {
                b.push(builder::operator(vec![self.bump()?]));
                b.push(self.parse_domain_expr(DomainSet::SCALAR)?);
            }
            Some(T::Keyword(Keyword::In)) => {
                b.push(self.bump()?);
                b.push(self.parse_domain_expr(DomainSet::SET)?);
            }
            Some(T::Assign | T::Keyword(Keyword::Default)) => {
                b.push(self.bump()?);
                b.push(self.parse_domain_expr(DomainSet::SCALAR)?);
            }
            _ => return Ok(None),
        }
        Ok(Some(b.finish()))
    }

    fn parse_var_attribute(&mut self) -> Result<Option<SyntaxNode>> {
        let mut b = NodeBuilder::new(NodeKind::Attribute);
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Integer | Keyword::Binary)) => {
                b.push(self.bump()?);
            }
            Some(TokenKind::Gte | TokenKind::Lte | TokenKind::Eq) => {
                b.push(builder::operator(vec![self.bump()?]));
                b.push(self.parse_domain_expr(DomainSet::NUMERIC)?);
            }
            _ => return Ok(None),
        }
        Ok(Some(b.finish()))
    }

    // ========================================================================
    // Constraints and objectives
    // ========================================================================

    fn parse_constraint(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Constraint);
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Subject | Keyword::Subj)) => {
                b.push(self.bump()?);
                b.push(self.expect_keyword(Keyword::To)?);
            }
            Some(TokenKind::Keyword(Keyword::StDot)) => {
                b.push(self.bump()?);
            }
            _ => {}
        }
        let scoped = self.parse_header(&mut b)?;
        b.push(self.expect(TokenKind::Colon, "':'")?);
        b.push(self.parse_linear_expression()?);

        b.push_opt(self.eat(TokenKind::Comma));
        match self.peek_kind() {
            Some(TokenKind::Eq | TokenKind::Lte | TokenKind::Gte) => {
                b.push(builder::operator(vec![self.bump()?]));
            }
            _ => return Err(self.unexpected_error("'=', '<=' or '>='")),
        }
        b.push(self.parse_linear_expression()?);

        // a second bound makes a ranged constraint `lo <= body <= hi`
        let second = match (self.peek_kind(), self.peek_nth_kind(1)) {
            (Some(TokenKind::Lte | TokenKind::Gte), _) => true,
            (Some(TokenKind::Comma), Some(TokenKind::Lte | TokenKind::Gte)) => true,
            _ => false,
        };
        if second {
            b.push_opt(self.eat(TokenKind::Comma));
            b.push(builder::operator(vec![self.bump()?]));
            b.push(self.parse_linear_expression()?);
        }
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    fn parse_objective(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Objective);
        b.push(self.bump()?);
        let scoped = self.parse_header(&mut b)?;
        b.push(self.expect(TokenKind::Colon, "':'")?);
        b.push(self.parse_linear_expression()?);
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    // ========================================================================
    // check, display, printf, for
    // ========================================================================

    /// The optional `{...} [:]` that opens `check`, `display` and
    /// `printf`.  `display {1, 2};` shows a literal set, so the braces
    /// only count as an indexing expression when they parse as one and
    /// are not immediately followed by the end of an item.  Returns
    /// whether a dummy scope was opened.
    fn parse_statement_indexing(&mut self, b: &mut NodeBuilder) -> bool {
        let mut scoped = false;
        if self.at(TokenKind::LBrace) {
            let saved_pos = self.pos;
            let saved_scopes = self.scopes.len();
            match self.parse_indexing_expression() {
                Ok(indexing)
                    if !self.at(TokenKind::Semi) && !self.at(TokenKind::Comma) =>
                {
                    b.push(indexing);
                    scoped = true;
                }
                _ => {
                    self.pos = saved_pos;
                    self.scopes.truncate(saved_scopes);
                }
            }
        }
        b.push_opt(self.eat(TokenKind::Colon));
        scoped
    }

    fn parse_check(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Check);
        b.push(self.bump()?);
        let scoped = self.parse_statement_indexing(&mut b);
        b.push(self.parse_domain_expr(DomainSet::LOGICAL)?);
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    fn parse_display(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Display);
        b.push(self.bump()?);
        let scoped = self.parse_statement_indexing(&mut b);
        // items of any domain; ambiguous names stay ambiguous
        loop {
            b.push(self.parse_expr_bp(0, Ctx::PLAIN)?);
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    fn parse_printf(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Printf);
        b.push(self.bump()?);
        let scoped = self.parse_statement_indexing(&mut b);
        // arguments stop short of the relational operators so that a
        // top-level `>` is the output redirect
        let argument = DomainSet::SCALAR.union(DomainSet::LOGICAL);
        loop {
            let arg = self.parse_expr_bp(bp::MEMB, Ctx::PLAIN)?;
            b.push(domain::restrict(arg, argument)?);
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        if self.at(TokenKind::Gt) || self.at(TokenKind::GtGt) {
            b.push(builder::operator(vec![self.bump()?]));
            b.push(self.parse_domain_expr(DomainSet::SYMBOLIC)?);
        }
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    fn parse_for(&mut self) -> Result<SyntaxNode> {
        self.nested(|p| {
            let mut b = NodeBuilder::new(NodeKind::For);
            b.push(p.bump()?);
            b.push(p.parse_indexing_expression()?);
            b.push_opt(p.eat(TokenKind::Colon));

            if let Some(open) = p.eat(TokenKind::LBrace) {
                b.push(open);
                loop {
                    b.push(p.parse_controlled_statement()?);
                    if let Some(close) = p.eat(TokenKind::RBrace) {
                        b.push(close);
                        break;
                    }
                }
            } else {
                b.push(p.parse_controlled_statement()?);
            }

            p.pop_scope();
            Ok(b.finish())
        })
    }

    fn parse_controlled_statement(&mut self) -> Result<SyntaxNode> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Check)) => self.parse_check(),
            Some(TokenKind::Keyword(Keyword::Display)) => self.parse_display(),
            Some(TokenKind::Keyword(Keyword::Printf)) => self.parse_printf(),
            Some(TokenKind::Keyword(Keyword::For)) => self.parse_for(),
            _ => Err(self.unexpected_error("'check', 'display', 'printf' or 'for'")),
        }
    }

    // ========================================================================
    // table
    // ========================================================================

    fn parse_table(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Table);
        b.push(self.bump()?);
        let name = self.expect(TokenKind::Ident, "table name")?;
        b.push(builder::leaf(NodeKind::ModelObject, name));
        if let Some(alias) = self.eat(TokenKind::Str) {
            b.push(builder::leaf(NodeKind::Alias, alias));
        }

        let mut scoped = false;
        if let Some(input) = self.eat_keyword(Keyword::TableIn) {
            b.push(input);
            self.parse_driver_args(&mut b)?;
            self.parse_input_fields(&mut b)?;
        } else {
            if self.at(TokenKind::LBrace) {
                b.push(self.parse_indexing_expression()?);
                scoped = true;
            }
            b.push(self.expect_keyword(Keyword::TableOut)?);
            self.parse_driver_args(&mut b)?;
            self.parse_output_fields(&mut b)?;
        }
        b.push(self.expect_terminator()?);

        if scoped {
            self.pop_scope();
        }
        Ok(b.finish())
    }

    /// Driver name and arguments up to and including the `:`.
    fn parse_driver_args(&mut self, b: &mut NodeBuilder) -> Result<()> {
        loop {
            b.push(self.parse_domain_expr(DomainSet::SCALAR)?);
            if let Some(colon) = self.eat(TokenKind::Colon) {
                b.push(colon);
                return Ok(());
            }
        }
    }

    // `[set <-] [field, ...] (, param [~ field])*`
    fn parse_input_fields(&mut self, b: &mut NodeBuilder) -> Result<()> {
        if self.at(TokenKind::Ident) && self.peek_nth_kind(1) == Some(TokenKind::LArrow) {
            b.push(self.bump()?);
            b.push(self.bump()?);
        }
        b.push(self.expect(TokenKind::LBracket, "'['")?);
        loop {
            b.push(self.expect(TokenKind::Ident, "field name")?);
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        b.push(self.expect(TokenKind::RBracket, "']'")?);

        while let Some(comma) = self.eat(TokenKind::Comma) {
            b.push(comma);
            b.push(self.expect(TokenKind::Ident, "parameter name")?);
            if let Some(tilde) = self.eat(TokenKind::Tilde) {
                b.push(tilde);
                b.push(self.expect(TokenKind::Ident, "field name")?);
            }
        }
        Ok(())
    }

    // `expr [~ field] (, expr [~ field])*`
    fn parse_output_fields(&mut self, b: &mut NodeBuilder) -> Result<()> {
        loop {
            b.push(self.parse_domain_expr(DomainSet::SCALAR)?);
            if let Some(tilde) = self.eat(TokenKind::Tilde) {
                b.push(tilde);
                b.push(self.expect(TokenKind::Ident, "field name")?);
            }
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        Ok(())
    }
}
