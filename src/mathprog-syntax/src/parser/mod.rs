// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Hand-written recursive descent parser for MathProg models and data
//! sections.
//!
//! Statements are parsed by plain recursive descent; expressions go
//! through a single precedence-climbing loop (see `expr.rs`) that tags
//! every node with the domains it may belong to.  The lexer runs to
//! completion first so the parser can backtrack cheaply by resetting
//! `pos`.

mod data;
mod expr;
mod stmt;
#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::Parse;
use crate::builder;
use crate::common::{ErrorCode, ParseError, Result};
use crate::config::ParseConfig;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
use crate::token::{Keyword, Lexer, Spanned, Token, TokenKind};

// ============================================================================
// Parser struct
// ============================================================================

pub(crate) struct Parser<'input, 'tokens> {
    text: &'input str,
    tokens: &'tokens [Spanned<Token<'input>>],
    pos: usize,
    recover: bool,
    max_depth: usize,
    depth: usize,
    /// Dummy indices bound by enclosing indexing expressions, innermost
    /// last.
    scopes: Vec<Vec<String>>,
    diagnostics: Vec<ParseError>,
}

impl<'input, 'tokens> Parser<'input, 'tokens> {
    fn new(
        text: &'input str,
        tokens: &'tokens [Spanned<Token<'input>>],
        config: &ParseConfig,
    ) -> Self {
        Parser {
            text,
            tokens,
            pos: 0,
            recover: config.recover,
            max_depth: config.max_depth,
            depth: 0,
            scopes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&'tokens Spanned<Token<'input>>> {
        self.tokens.get(self.pos)
    }

    /// Peek at the kind of the current token.
    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|(_, tok, _)| tok.kind())
    }

    /// Peek `n` tokens past the current one.
    fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|(_, tok, _)| tok.kind())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.at(TokenKind::Keyword(kw))
    }

    /// Check if we're at end of token stream.
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the end position of the last consumed token, or 0 if none consumed.
    fn end_pos(&self) -> usize {
        if self.pos > 0 {
            self.tokens[self.pos - 1].2
        } else {
            0
        }
    }

    fn syntax_token(&self, spanned: &Spanned<Token<'input>>) -> SyntaxToken {
        let (l, tok, r) = spanned;
        SyntaxToken {
            kind: tok.kind(),
            text: self.text[*l..*r].to_owned(),
            loc: crate::common::Loc::new(*l, *r),
        }
    }

    /// Consume the current token, whatever it is.
    fn bump(&mut self) -> Result<SyntaxToken> {
        match self.tokens.get(self.pos) {
            Some(spanned) => {
                self.pos += 1;
                Ok(self.syntax_token(spanned))
            }
            None => Err(self.eof_error("a token")),
        }
    }

    /// Consume the current token if it matches the expected kind.
    fn eat(&mut self, kind: TokenKind) -> Option<SyntaxToken> {
        if self.at(kind) { self.bump().ok() } else { None }
    }

    fn eat_keyword(&mut self, kw: Keyword) -> Option<SyntaxToken> {
        self.eat(TokenKind::Keyword(kw))
    }

    /// Expect and consume a specific token kind.
    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<SyntaxToken> {
        if let Some(tok) = self.eat(kind) {
            return Ok(tok);
        }
        let code = match kind {
            TokenKind::Semi => ErrorCode::MissingTerminator,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                ErrorCode::UnbalancedDelimiter
            }
            _ => ErrorCode::UnexpectedToken,
        };
        Err(self.error_here(code, what))
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<SyntaxToken> {
        self.expect(TokenKind::Keyword(kw), &format!("'{kw}'"))
    }

    fn expect_terminator(&mut self) -> Result<SyntaxToken> {
        self.expect(TokenKind::Semi, "';'")
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            Some((l, tok, r)) => match tok {
                Token::Ident(_)
                | Token::Function(_)
                | Token::Num(_)
                | Token::Str(_)
                | Token::Bareword(_)
                | Token::Unknown(_) => format!("{} `{}`", tok.kind(), &self.text[*l..*r]),
                _ => tok.kind().to_string(),
            },
            None => "end of input".to_owned(),
        }
    }

    /// Create an unexpected-EOF error.
    fn eof_error(&self, what: &str) -> ParseError {
        let pos = self.end_pos();
        ParseError::new(
            ErrorCode::UnexpectedEof,
            pos,
            pos,
            format!("expected {what}, found end of input"),
        )
    }

    /// An `expected X, found Y` error at the current token with the
    /// given code; at end of input the code is always `unexpected_eof`.
    fn error_here(&self, code: ErrorCode, what: &str) -> ParseError {
        match self.peek() {
            Some((l, _, r)) => ParseError::new(
                code,
                *l,
                *r,
                format!("expected {what}, found {}", self.describe_current()),
            ),
            None => self.eof_error(what),
        }
    }

    /// Create an unexpected-token error.
    fn unexpected_error(&self, what: &str) -> ParseError {
        self.error_here(ErrorCode::UnexpectedToken, what)
    }

    /// Run `f` one level deeper, failing once `max_depth` is exceeded.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            let (start, end) = match self.peek() {
                Some((l, _, r)) => (*l, *r),
                None => (self.end_pos(), self.end_pos()),
            };
            return Err(ParseError::new(
                ErrorCode::NestingTooDeep,
                start,
                end,
                format!("nesting exceeds the limit of {}", self.max_depth),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Dummy index scopes
    // ========================================================================

    fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn bind(&mut self, dummy: &SyntaxToken) -> Result<()> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if scope.iter().any(|name| *name == dummy.text) {
            return Err(ParseError::new(
                ErrorCode::DuplicateDummyIndex,
                dummy.loc.start as usize,
                dummy.loc.end as usize,
                format!(
                    "dummy index `{}` is bound twice in one indexing expression",
                    dummy.text
                ),
            ));
        }
        scope.push(dummy.text.clone());
        Ok(())
    }

    fn is_dummy(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|s| s.iter().any(|n| n == name))
    }

    // ========================================================================
    // Document
    // ========================================================================

    fn parse_document(&mut self) -> Result<SyntaxNode> {
        let mut children: Vec<SyntaxElement> = Vec::new();
        let mut in_data = false;

        while !self.at_end() {
            let start = self.pos;
            self.scopes.clear();
            self.depth = 0;

            let result = if in_data {
                self.parse_data_statement()
            } else if self.at_keyword(Keyword::Data) {
                self.parse_data_marker()
            } else {
                self.parse_model_statement()
            };

            match result {
                Ok(node) => {
                    in_data |= node.kind == NodeKind::Data;
                    debug!(
                        kind = %node.kind,
                        start = node.loc.start,
                        end = node.loc.end,
                        "parsed statement"
                    );
                    children.push(node.into());
                }
                Err(err) => children.push(self.recover_statement(start, err)?.into()),
            }
        }

        Ok(SyntaxNode {
            kind: NodeKind::Model,
            loc: crate::common::Loc::new(0, self.text.len()),
            domains: Default::default(),
            children,
        })
    }

    /// In recovery mode, record `err` and skip to just past the next
    /// `;`, wrapping everything skipped in an `error` node.  Outside
    /// recovery mode the error is returned unchanged.
    fn recover_statement(&mut self, start: usize, err: ParseError) -> Result<SyntaxNode> {
        if !self.recover {
            return Err(err);
        }
        warn!(
            code = %err.code,
            start = err.start,
            end = err.end,
            "skipping malformed statement"
        );

        let mut end = self.pos.max(start);
        while end < self.tokens.len() {
            let is_semi = matches!(self.tokens[end].1, Token::Semi);
            end += 1;
            if is_semi {
                break;
            }
        }
        if end == start {
            end = (start + 1).min(self.tokens.len());
        }

        // the lexer already reported text it could not tokenize
        let at_unknown = self.tokens[start..end]
            .iter()
            .any(|(l, tok, _)| matches!(tok, Token::Unknown(_)) && *l == err.start);
        if !at_unknown {
            self.diagnostics.push(err);
        }

        let skipped = self.tokens[start..end]
            .iter()
            .map(|t| SyntaxElement::Token(self.syntax_token(t)))
            .collect();
        self.pos = end;
        Ok(builder::node(NodeKind::Error, skipped))
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Lex and parse a whole document.  Outside recovery mode the first
/// error is returned; in recovery mode the result is always `Ok` and
/// carries every diagnostic in source order.
pub(crate) fn parse_document(text: &str, config: &ParseConfig) -> Result<Parse> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    let mut diagnostics: Vec<ParseError> = Vec::new();

    for item in lexer.by_ref() {
        match item {
            Ok(tok) => tokens.push(tok),
            Err(err) => {
                if !config.recover {
                    return Err(err.into());
                }
                warn!(code = %err.code, start = err.start, "lexical error");
                tokens.push((err.start, Token::Unknown(&text[err.start..err.end]), err.end));
                diagnostics.push(err.into());
            }
        }
    }
    let trivia = if config.keep_trivia {
        lexer.take_trivia()
    } else {
        Vec::new()
    };

    let mut parser = Parser::new(text, &tokens, config);
    let root = parser.parse_document()?;
    diagnostics.extend(parser.diagnostics);
    diagnostics.sort_by_key(|d| (d.start, d.end));

    Ok(Parse {
        tree: SyntaxTree::new(root, trivia, text),
        diagnostics,
    })
}
