// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The data section.  Record shapes are chosen by the marker token in
//! front of them (`:=`, `(`, `[`, `:`, `(tr)`); everything else is a
//! plain value list.

use super::Parser;
use crate::builder::{self, NodeBuilder};
use crate::common::Result;
use crate::syntax::{NodeKind, SyntaxNode};
use crate::token::{Keyword, TokenKind};

fn is_value(kind: Option<TokenKind>) -> bool {
    matches!(
        kind,
        Some(TokenKind::Num | TokenKind::Str | TokenKind::Bareword | TokenKind::Ident)
    )
}

impl<'input, 'tokens> Parser<'input, 'tokens> {
    /// `data ;`
    pub(super) fn parse_data_marker(&mut self) -> Result<SyntaxNode> {
        self.parse_keyword_statement(NodeKind::Data)
    }

    pub(super) fn parse_data_statement(&mut self) -> Result<SyntaxNode> {
        let Some((l, tok, r)) = self.peek() else {
            return Err(self.eof_error("data statement"));
        };
        match tok.kind() {
            TokenKind::Keyword(Keyword::Set) => self.parse_set_data(),
            TokenKind::Keyword(Keyword::Param) => self.parse_param_data(),
            TokenKind::Keyword(Keyword::End) => self.parse_keyword_statement(NodeKind::End),
            _ => {
                let word = &self.text[*l..*r];
                if Keyword::starts_model_statement(word) {
                    crate::syntax_err!(
                        ModelStatementInData,
                        *l,
                        *r,
                        "`{word}` statement is not allowed in the data section"
                    )
                } else {
                    Err(self.unexpected_error("'set', 'param' or 'end'"))
                }
            }
        }
    }

    fn parse_value(&mut self) -> Result<SyntaxNode> {
        if is_value(self.peek_kind()) {
            Ok(builder::leaf(NodeKind::Value, self.bump()?))
        } else {
            Err(self.unexpected_error("data value"))
        }
    }

    // ========================================================================
    // set data
    // ========================================================================

    fn parse_set_data(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::SetData);
        b.push(self.bump()?);
        let name = self.expect(TokenKind::Ident, "set name")?;
        b.push(builder::leaf(NodeKind::ModelObject, name));
        if self.at(TokenKind::LBracket) {
            b.push(self.parse_data_subscript()?);
        }
        self.parse_records(&mut b, "set data record", Self::parse_set_record)?;
        b.push(self.expect_terminator()?);
        Ok(b.finish())
    }

    fn parse_data_subscript(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Subscript);
        b.push(self.bump()?);
        loop {
            b.push(self.parse_value()?);
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        b.push(self.expect(TokenKind::RBracket, "']'")?);
        Ok(b.finish())
    }

    /// One or more records, each optionally preceded by a comma, up to
    /// (not including) the `;`.
    fn parse_records(
        &mut self,
        b: &mut NodeBuilder,
        what: &str,
        record: fn(&mut Self) -> Result<Option<SyntaxNode>>,
    ) -> Result<()> {
        let mut first = true;
        loop {
            let comma = self.eat(TokenKind::Comma);
            if !first && comma.is_none() && self.at(TokenKind::Semi) {
                return Ok(());
            }
            match record(self)? {
                Some(node) => {
                    b.push_opt(comma).push(node);
                }
                None => return Err(self.unexpected_error(what)),
            }
            first = false;
        }
    }

    fn parse_set_record(&mut self) -> Result<Option<SyntaxNode>> {
        let mut b = NodeBuilder::new(NodeKind::Record);
        match self.peek_kind() {
            Some(TokenKind::Assign) => {
                b.push(self.bump()?);
            }
            Some(TokenKind::LParen) => {
                b.push(self.bump()?);
                b.push(self.parse_slice()?);
                b.push(self.expect(TokenKind::RParen, "')'")?);
            }
            Some(TokenKind::Colon | TokenKind::Tr) => {
                self.parse_matrix_header(&mut b)?;
                let mut cells = 0;
                while let Some(
                    TokenKind::Assign
                    | TokenKind::Plus
                    | TokenKind::Minus
                    | TokenKind::Num
                    | TokenKind::Str
                    | TokenKind::Bareword
                    | TokenKind::Ident,
                ) = self.peek_kind()
                {
                    let tok = self.bump()?;
                    if is_value(Some(tok.kind)) {
                        b.push(builder::leaf(NodeKind::Value, tok));
                    } else {
                        b.push(tok);
                    }
                    cells += 1;
                }
                if cells == 0 {
                    return Err(self.unexpected_error("matrix data"));
                }
            }
            kind if is_value(kind) => self.parse_value_list(&mut b)?,
            _ => return Ok(None),
        }
        Ok(Some(b.finish()))
    }

    // `:` or `(tr)` with an optional `:`
    fn parse_matrix_header(&mut self, b: &mut NodeBuilder) -> Result<()> {
        let marker = self.bump()?;
        let transposed = marker.kind == TokenKind::Tr;
        b.push(marker);
        if transposed {
            b.push_opt(self.eat(TokenKind::Colon));
        }
        Ok(())
    }

    /// `v1 [,] v2 [,] ...`; a comma not followed by a value is left for
    /// the record separator.
    fn parse_value_list(&mut self, b: &mut NodeBuilder) -> Result<()> {
        b.push(self.parse_value()?);
        loop {
            if is_value(self.peek_kind()) {
                b.push(self.parse_value()?);
            } else if self.at(TokenKind::Comma) && is_value(self.peek_nth_kind(1)) {
                b.push(self.bump()?);
                b.push(self.parse_value()?);
            } else {
                return Ok(());
            }
        }
    }

    fn parse_slice(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::Slice);
        loop {
            match self.eat(TokenKind::Star) {
                Some(star) => b.push(star),
                None => b.push(self.parse_value()?),
            };
            match self.eat(TokenKind::Comma) {
                Some(comma) => b.push(comma),
                None => break,
            };
        }
        Ok(b.finish())
    }

    // ========================================================================
    // param data
    // ========================================================================

    fn parse_param_data(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::ParamData);
        b.push(self.bump()?);

        if let Some(name) = self.eat(TokenKind::Ident) {
            b.push(builder::leaf(NodeKind::ModelObject, name));
            self.parse_data_default(&mut b)?;
            self.parse_records(&mut b, "param data record", Self::parse_param_record)?;
        } else {
            self.parse_data_default(&mut b)?;
            if !self.at(TokenKind::Colon) {
                return Err(self.unexpected_error("parameter name or ':'"));
            }
            b.push(self.parse_tabbing_data()?);
        }

        b.push(self.expect_terminator()?);
        Ok(b.finish())
    }

    fn parse_data_default(&mut self, b: &mut NodeBuilder) -> Result<()> {
        if let Some(default) = self.eat_keyword(Keyword::Default) {
            let mut attr = NodeBuilder::new(NodeKind::Attribute);
            attr.push(default);
            attr.push(self.parse_value()?);
            b.push(attr.finish());
        }
        Ok(())
    }

    fn parse_param_record(&mut self) -> Result<Option<SyntaxNode>> {
        let mut b = NodeBuilder::new(NodeKind::Record);
        match self.peek_kind() {
            Some(TokenKind::Assign) => {
                b.push(self.bump()?);
            }
            Some(TokenKind::LBracket) => {
                b.push(self.bump()?);
                b.push(self.parse_slice()?);
                b.push(self.expect(TokenKind::RBracket, "']'")?);
            }
            Some(TokenKind::Colon | TokenKind::Tr) => {
                b.push(self.parse_tabular_data()?);
            }
            kind if is_value(kind) => self.parse_value_list(&mut b)?,
            _ => return Ok(None),
        }
        Ok(Some(b.finish()))
    }

    /// `: c1 c2 ... := r1 v11 v12 ... r2 ...` where `.` marks a missing
    /// value.
    fn parse_tabular_data(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::TabularData);
        self.parse_matrix_header(&mut b)?;

        b.push(self.parse_value()?);
        while is_value(self.peek_kind()) {
            b.push(self.parse_value()?);
        }
        b.push(self.expect(TokenKind::Assign, "':='")?);

        let mut cells = 0;
        loop {
            if let Some(dot) = self.eat(TokenKind::Dot) {
                b.push(dot);
            } else if is_value(self.peek_kind()) {
                b.push(self.parse_value()?);
            } else {
                break;
            }
            cells += 1;
        }
        if cells == 0 {
            return Err(self.unexpected_error("tabular data"));
        }
        Ok(b.finish())
    }

    /// `: [set :] p1 [,] p2 ... := v ...` assigning several parameters
    /// (and optionally a set) column by column.
    fn parse_tabbing_data(&mut self) -> Result<SyntaxNode> {
        let mut b = NodeBuilder::new(NodeKind::TabbingData);
        b.push(self.bump()?);
        if self.at(TokenKind::Ident) && self.peek_nth_kind(1) == Some(TokenKind::Colon) {
            b.push(builder::leaf(NodeKind::ModelObject, self.bump()?));
            b.push(self.bump()?);
        }

        let first = self.expect(TokenKind::Ident, "parameter name")?;
        b.push(builder::leaf(NodeKind::ModelObject, first));
        loop {
            if let Some(comma) = self.eat(TokenKind::Comma) {
                b.push(comma);
            }
            if self.at(TokenKind::Ident) {
                b.push(builder::leaf(NodeKind::ModelObject, self.bump()?));
            } else {
                break;
            }
        }
        b.push(self.expect(TokenKind::Assign, "':='")?);

        let mut values = NodeBuilder::new(NodeKind::Record);
        self.parse_value_list(&mut values)?;
        b.push(values.finish());
        Ok(b.finish())
    }
}
