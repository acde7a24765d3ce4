// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

// A CharIndices cursor with one char of lookahead; take_while,
// take_until and consume advance it.

use std::collections::HashMap;
use std::fmt;
use std::str::CharIndices;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::debug;

use self::Token::*;
use crate::common::ErrorCode::*;
use crate::common::{ErrorCode, LexError, Loc};

#[cfg(test)]
mod test;

pub type Spanned<T> = (usize, T, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Set,
    Param,
    Var,
    Maximize,
    Minimize,
    Subject,
    Subj,
    To,
    StDot,
    Check,
    Display,
    Printf,
    For,
    Table,
    Data,
    End,
    Solve,
    Integer,
    Binary,
    Logical,
    Symbolic,
    Default,
    Dimen,
    Within,
    In,
    Union,
    Inter,
    Cross,
    Diff,
    Symdiff,
    Setof,
    By,
    Sum,
    Prod,
    Min,
    Max,
    If,
    Then,
    Else,
    Exists,
    Forall,
    Or,
    And,
    Not,
    Less,
    Div,
    Mod,
    TableIn,
    TableOut,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        use self::Keyword::*;
        match self {
            Set => "set",
            Param => "param",
            Var => "var",
            Maximize => "maximize",
            Minimize => "minimize",
            Subject => "subject",
            Subj => "subj",
            To => "to",
            StDot => "s.t.",
            Check => "check",
            Display => "display",
            Printf => "printf",
            For => "for",
            Table => "table",
            Data => "data",
            End => "end",
            Solve => "solve",
            Integer => "integer",
            Binary => "binary",
            Logical => "logical",
            Symbolic => "symbolic",
            Default => "default",
            Dimen => "dimen",
            Within => "within",
            In => "in",
            Union => "union",
            Inter => "inter",
            Cross => "cross",
            Diff => "diff",
            Symdiff => "symdiff",
            Setof => "setof",
            By => "by",
            Sum => "sum",
            Prod => "prod",
            Min => "min",
            Max => "max",
            If => "if",
            Then => "then",
            Else => "else",
            Exists => "exists",
            Forall => "forall",
            Or => "or",
            And => "and",
            Not => "not",
            Less => "less",
            Div => "div",
            Mod => "mod",
            TableIn => "IN",
            TableOut => "OUT",
        }
    }

    /// Keywords that open a model statement; seeing one of these as a
    /// plain word inside the data section means the section was never
    /// closed off properly.
    pub fn starts_model_statement(word: &str) -> bool {
        matches!(
            word,
            "var"
                | "maximize"
                | "minimize"
                | "subject"
                | "subj"
                | "s.t."
                | "check"
                | "display"
                | "printf"
                | "for"
                | "table"
                | "solve"
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Keyword> = {
        use self::Keyword::*;
        let all = [
            Set, Param, Var, Maximize, Minimize, Subject, Subj, To, Check, Display, Printf, For,
            Table, Data, End, Solve, Integer, Binary, Logical, Symbolic, Default, Dimen, Within,
            In, Union, Inter, Cross, Diff, Symdiff, Setof, By, Sum, Prod, Min, Max, If, Then,
            Else, Exists, Forall, Or, And, Not, Less, Div, Mod, TableIn, TableOut,
        ];
        all.into_iter().map(|kw| (kw.as_str(), kw)).collect()
    };
    static ref NUMBER_RE: Regex =
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?").unwrap();
}

/// Built-in functions that are not also reserved words (`min` and
/// `max` lex as keywords and double as functions when followed by `(`).
pub const FUNCTIONS: &[&str] = &[
    "Irand224",
    "Normal",
    "Normal01",
    "Uniform",
    "Uniform01",
    "abs",
    "atan",
    "card",
    "ceil",
    "cos",
    "exp",
    "floor",
    "gmtime",
    "length",
    "log",
    "log10",
    "round",
    "sin",
    "sqrt",
    "str2time",
    "substr",
    "tan",
    "time2str",
    "trunc",
];

const SUFFIXES: &[&str] = &["lb", "ub", "status", "val", "dual"];

const DATA_KEYWORDS: &[Keyword] = &[Keyword::Set, Keyword::Param, Keyword::End, Keyword::Default];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'input> {
    Plus,
    Minus,
    Star,
    Slash,
    StarStar,
    Caret,
    Amp,
    AmpAmp,
    PipePipe,
    Bang,
    Eq,
    EqEq,
    Neq,
    BangEq,
    Lt,
    Lte,
    Gt,
    Gte,
    GtGt,
    Colon,
    Assign,
    Semi,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    DotDot,
    LArrow,
    Tilde,
    Dot,
    Tr,
    Keyword(Keyword),
    Ident(&'input str),
    Function(&'input str),
    Num(&'input str),
    Str(&'input str),
    Bareword(&'input str),
    Suffix(&'input str),
    /// Text the lexer rejected, kept so a recovering parse still
    /// covers every byte of the input.
    Unknown(&'input str),
}

/// Discriminant-only view of a [`Token`], stored in the syntax tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    StarStar,
    Caret,
    Amp,
    AmpAmp,
    PipePipe,
    Bang,
    Eq,
    EqEq,
    Neq,
    BangEq,
    Lt,
    Lte,
    Gt,
    Gte,
    GtGt,
    Colon,
    Assign,
    Semi,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    DotDot,
    LArrow,
    Tilde,
    Dot,
    Tr,
    Keyword(Keyword),
    Ident,
    Function,
    Num,
    Str,
    Bareword,
    Suffix,
    Unknown,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Plus => TokenKind::Plus,
            Minus => TokenKind::Minus,
            Star => TokenKind::Star,
            Slash => TokenKind::Slash,
            StarStar => TokenKind::StarStar,
            Caret => TokenKind::Caret,
            Amp => TokenKind::Amp,
            AmpAmp => TokenKind::AmpAmp,
            PipePipe => TokenKind::PipePipe,
            Bang => TokenKind::Bang,
            Eq => TokenKind::Eq,
            EqEq => TokenKind::EqEq,
            Neq => TokenKind::Neq,
            BangEq => TokenKind::BangEq,
            Lt => TokenKind::Lt,
            Lte => TokenKind::Lte,
            Gt => TokenKind::Gt,
            Gte => TokenKind::Gte,
            GtGt => TokenKind::GtGt,
            Colon => TokenKind::Colon,
            Assign => TokenKind::Assign,
            Semi => TokenKind::Semi,
            Comma => TokenKind::Comma,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            DotDot => TokenKind::DotDot,
            LArrow => TokenKind::LArrow,
            Tilde => TokenKind::Tilde,
            Dot => TokenKind::Dot,
            Tr => TokenKind::Tr,
            Keyword(kw) => TokenKind::Keyword(*kw),
            Ident(_) => TokenKind::Ident,
            Function(_) => TokenKind::Function,
            Num(_) => TokenKind::Num,
            Str(_) => TokenKind::Str,
            Bareword(_) => TokenKind::Bareword,
            Suffix(_) => TokenKind::Suffix,
            Unknown(_) => TokenKind::Unknown,
        }
    }
}

impl TokenKind {
    /// Stable lowercase name used in serialized trees and in error
    /// messages for token classes.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            StarStar => "**",
            Caret => "^",
            Amp => "&",
            AmpAmp => "&&",
            PipePipe => "||",
            Bang => "!",
            Eq => "=",
            EqEq => "==",
            Neq => "<>",
            BangEq => "!=",
            Lt => "<",
            Lte => "<=",
            Gt => ">",
            Gte => ">=",
            GtGt => ">>",
            Colon => ":",
            Assign => ":=",
            Semi => ";",
            Comma => ",",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace => "}",
            DotDot => "..",
            LArrow => "<-",
            Tilde => "~",
            Dot => ".",
            Tr => "(tr)",
            Keyword(kw) => kw.as_str(),
            Ident => "identifier",
            Function => "function",
            Num => "number",
            Str => "string",
            Bareword => "bareword",
            Suffix => "suffix",
            Unknown => "unknown",
        }
    }

    pub fn is_punctuation(&self) -> bool {
        !matches!(
            self,
            TokenKind::Keyword(_)
                | TokenKind::Ident
                | TokenKind::Function
                | TokenKind::Num
                | TokenKind::Str
                | TokenKind::Bareword
                | TokenKind::Suffix
                | TokenKind::Unknown
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_punctuation() || matches!(self, TokenKind::Keyword(_)) {
            write!(f, "'{}'", self.name())
        } else {
            write!(f, "{}", self.name())
        }
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriviaKind {
    Whitespace,
    Comment,
}

/// Whitespace or a comment, kept aside from the token stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub loc: Loc,
}

/// The model section and the data section are lexed differently; the
/// switch happens right after the `;` that ends a `data` statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexerMode {
    Model,
    Data,
}

fn error<T>(code: ErrorCode, start: usize, end: usize) -> Result<T, LexError> {
    Err(LexError { start, end, code })
}

pub struct Lexer<'input> {
    text: &'input str,
    chars: CharIndices<'input>,
    lookahead: Option<(usize, char)>,
    mode: LexerMode,
    prev: Option<(TokenKind, usize)>,
    trivia: Vec<Trivia>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut t = Lexer {
            text: input,
            chars: input.char_indices(),
            lookahead: None,
            mode: LexerMode::Model,
            prev: None,
            trivia: Vec::new(),
        };
        t.bump();
        t
    }

    pub fn mode(&self) -> LexerMode {
        self.mode
    }

    /// Whitespace and comments seen so far, in source order.
    pub fn take_trivia(&mut self) -> Vec<Trivia> {
        std::mem::take(&mut self.trivia)
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.bump_n(1)
    }

    fn bump_n(&mut self, n: usize) -> Option<(usize, char)> {
        debug_assert!(n > 0);
        self.lookahead = self.chars.nth(n - 1);
        self.lookahead
    }

    fn skip_to(&mut self, end: usize) {
        while let Some((i, _)) = self.lookahead {
            if i >= end {
                break;
            }
            self.bump();
        }
    }

    fn take_while<F>(&mut self, mut keep_going: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        self.take_until(|c| !keep_going(c))
    }

    fn take_until<F>(&mut self, mut terminate: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        loop {
            match self.lookahead {
                None => {
                    return None;
                }
                Some((idx1, c)) => {
                    if terminate(c) {
                        return Some(idx1);
                    } else {
                        self.bump();
                    }
                }
            }
        }
    }

    fn push_trivia(&mut self, kind: TriviaKind, start: usize, end: usize) {
        self.trivia.push(Trivia {
            kind,
            loc: Loc::new(start, end),
        });
    }

    fn whitespace(&mut self, idx0: usize) {
        let end = self
            .take_while(char::is_whitespace)
            .unwrap_or(self.text.len());
        self.push_trivia(TriviaKind::Whitespace, idx0, end);
    }

    fn line_comment(&mut self, idx0: usize) {
        let end = self.take_until(|c| c == '\n').unwrap_or(self.text.len());
        self.push_trivia(TriviaKind::Comment, idx0, end);
    }

    // called with the lookahead on the `*` of `/*`
    fn block_comment(&mut self, idx0: usize) -> Result<(), LexError> {
        match self.text[idx0 + 2..].find("*/") {
            Some(off) => {
                let end = idx0 + 2 + off + 2;
                self.skip_to(end);
                self.push_trivia(TriviaKind::Comment, idx0, end);
                Ok(())
            }
            None => {
                self.skip_to(self.text.len());
                error(UnclosedComment, idx0, self.text.len())
            }
        }
    }

    fn string(&mut self, idx0: usize, quote: char) -> Result<Spanned<Token<'input>>, LexError> {
        // eat the opening quote
        self.bump();

        loop {
            match self.lookahead {
                None => return error(UnclosedString, idx0, self.text.len()),
                Some((idx1, c)) if c == quote => match self.bump() {
                    // a doubled quote stands for one literal quote
                    Some((_, c)) if c == quote => {
                        self.bump();
                    }
                    _ => return Ok((idx0, Str(&self.text[idx0..idx1 + 1]), idx1 + 1)),
                },
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn identifierish(&mut self, idx0: usize) -> Spanned<Token<'input>> {
        if self.text[idx0..].starts_with("s.t.") {
            self.bump_n(4);
            return (idx0, Keyword(Keyword::StDot), idx0 + 4);
        }

        let end = self
            .take_while(is_identifier_continue)
            .unwrap_or(self.text.len());
        let word = &self.text[idx0..end];

        let tok = if let Some(kw) = KEYWORDS.get(word) {
            Keyword(*kw)
        } else if FUNCTIONS.contains(&word) {
            Function(word)
        } else {
            Ident(word)
        };

        (idx0, tok, end)
    }

    fn number(&mut self, idx0: usize) -> Result<Spanned<Token<'input>>, LexError> {
        let rest = &self.text[idx0..];
        let mut len = NUMBER_RE.find(rest).map(|m| m.end()).unwrap_or(0);
        // `1..10` is a range, not `1.` followed by `.10`
        if rest[..len].ends_with('.') && rest[len..].starts_with('.') {
            len -= 1;
        }

        let tail = rest[len..]
            .bytes()
            .take_while(|&b| is_identifier_continue(b as char))
            .count();
        if len == 0 || tail > 0 {
            self.bump_n(len + tail);
            return error(MalformedNumber, idx0, idx0 + len + tail);
        }

        self.bump_n(len);
        Ok((idx0, Num(&rest[..len]), idx0 + len))
    }

    // `.lb`, `.ub` and friends only count when glued to the name or
    // closing bracket they qualify.
    fn suffix(&mut self, idx0: usize) -> Option<Spanned<Token<'input>>> {
        let adjacent = matches!(
            self.prev,
            Some((TokenKind::Ident | TokenKind::RBracket, end)) if end == idx0
        );
        if !adjacent {
            return None;
        }
        let rest = &self.text[idx0 + 1..];
        let len = rest
            .bytes()
            .take_while(|&b| is_identifier_continue(b as char))
            .count();
        if !SUFFIXES.contains(&&rest[..len]) {
            return None;
        }
        self.bump_n(len + 1);
        let end = idx0 + 1 + len;
        Some((idx0, Suffix(&self.text[idx0..end]), end))
    }

    fn dot(&mut self, idx0: usize) -> Option<Result<Spanned<Token<'input>>, LexError>> {
        let next = self.text[idx0 + 1..].chars().next();
        match next {
            Some('.') => {
                self.bump();
                self.consume(idx0, DotDot, 2)
            }
            Some(c) if c.is_ascii_digit() => Some(self.number(idx0)),
            _ => match self.suffix(idx0) {
                Some(tok) => Some(Ok(tok)),
                None => {
                    self.bump();
                    Some(error(UnrecognizedToken, idx0, idx0 + 1))
                }
            },
        }
    }

    fn data_word(&mut self, idx0: usize) -> Spanned<Token<'input>> {
        let end = self.take_while(is_data_word).unwrap_or(self.text.len());
        let word = &self.text[idx0..end];

        let tok = match word {
            "+" => Plus,
            "-" => Minus,
            "." => Dot,
            _ => match KEYWORDS.get(word) {
                Some(kw) if DATA_KEYWORDS.contains(kw) => Keyword(*kw),
                _ if is_data_number(word) => Num(word),
                _ if is_identifier(word) => Ident(word),
                _ => Bareword(word),
            },
        };

        (idx0, tok, end)
    }

    fn unrecognized(&mut self, idx0: usize) -> Option<Result<Spanned<Token<'input>>, LexError>> {
        self.bump(); // eat whatever is killing us
        let end = match self.lookahead {
            Some((end, _)) => end,
            None => self.text.len(),
        };
        Some(error(UnrecognizedToken, idx0, end))
    }

    #[allow(clippy::unnecessary_wraps)]
    fn consume(
        &mut self,
        i: usize,
        tok: Token<'input>,
        len: usize,
    ) -> Option<Result<Spanned<Token<'input>>, LexError>> {
        self.bump();
        Some(Ok((i, tok, i + len)))
    }

    fn next_model(&mut self) -> Option<Result<Spanned<Token<'input>>, LexError>> {
        loop {
            return match self.lookahead {
                None => None,
                Some((i, c)) if c.is_whitespace() => {
                    self.whitespace(i);
                    continue;
                }
                Some((i, '#')) => {
                    self.line_comment(i);
                    continue;
                }
                Some((i, '/')) => match self.bump() {
                    Some((_, '*')) => match self.block_comment(i) {
                        Ok(()) => continue,
                        Err(err) => Some(Err(err)),
                    },
                    // we've already bumped, don't consume
                    _ => Some(Ok((i, Slash, i + 1))),
                },
                Some((i, c @ ('\'' | '"'))) => Some(self.string(i, c)),
                Some((i, '+')) => self.consume(i, Plus, 1),
                Some((i, '-')) => self.consume(i, Minus, 1),
                Some((i, '*')) => match self.bump() {
                    Some((_, '*')) => self.consume(i, StarStar, 2),
                    _ => Some(Ok((i, Star, i + 1))),
                },
                Some((i, '^')) => self.consume(i, Caret, 1),
                Some((i, '&')) => match self.bump() {
                    Some((_, '&')) => self.consume(i, AmpAmp, 2),
                    _ => Some(Ok((i, Amp, i + 1))),
                },
                Some((i, '|')) => match self.bump() {
                    Some((_, '|')) => self.consume(i, PipePipe, 2),
                    _ => Some(error(UnrecognizedToken, i, i + 1)),
                },
                Some((i, '!')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, BangEq, 2),
                    _ => Some(Ok((i, Bang, i + 1))),
                },
                Some((i, '=')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, EqEq, 2),
                    _ => Some(Ok((i, Eq, i + 1))),
                },
                Some((i, '<')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, Lte, 2),
                    Some((_, '>')) => self.consume(i, Neq, 2),
                    Some((_, '-')) => self.consume(i, LArrow, 2),
                    _ => Some(Ok((i, Lt, i + 1))),
                },
                Some((i, '>')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, Gte, 2),
                    Some((_, '>')) => self.consume(i, GtGt, 2),
                    _ => Some(Ok((i, Gt, i + 1))),
                },
                Some((i, ':')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, Assign, 2),
                    _ => Some(Ok((i, Colon, i + 1))),
                },
                Some((i, ';')) => self.consume(i, Semi, 1),
                Some((i, ',')) => self.consume(i, Comma, 1),
                Some((i, '(')) => self.consume(i, LParen, 1),
                Some((i, ')')) => self.consume(i, RParen, 1),
                Some((i, '[')) => self.consume(i, LBracket, 1),
                Some((i, ']')) => self.consume(i, RBracket, 1),
                Some((i, '{')) => self.consume(i, LBrace, 1),
                Some((i, '}')) => self.consume(i, RBrace, 1),
                Some((i, '~')) => self.consume(i, Tilde, 1),
                Some((i, '.')) => self.dot(i),
                Some((i, c)) if c.is_ascii_digit() => Some(self.number(i)),
                Some((i, c)) if is_identifier_start(c) => Some(Ok(self.identifierish(i))),
                Some((i, _)) => self.unrecognized(i),
            };
        }
    }

    fn next_data(&mut self) -> Option<Result<Spanned<Token<'input>>, LexError>> {
        loop {
            return match self.lookahead {
                None => None,
                Some((i, c)) if c.is_whitespace() => {
                    self.whitespace(i);
                    continue;
                }
                Some((i, '#')) => {
                    self.line_comment(i);
                    continue;
                }
                Some((i, '/')) => match self.bump() {
                    Some((_, '*')) => match self.block_comment(i) {
                        Ok(()) => continue,
                        Err(err) => Some(Err(err)),
                    },
                    _ => Some(error(UnrecognizedToken, i, i + 1)),
                },
                Some((i, c @ ('\'' | '"'))) => Some(self.string(i, c)),
                Some((i, ':')) => match self.bump() {
                    Some((_, '=')) => self.consume(i, Assign, 2),
                    _ => Some(Ok((i, Colon, i + 1))),
                },
                Some((i, '(')) if self.text[i..].starts_with("(tr)") => {
                    self.bump_n(3);
                    self.consume(i, Tr, 4)
                }
                Some((i, '(')) => self.consume(i, LParen, 1),
                Some((i, ')')) => self.consume(i, RParen, 1),
                Some((i, '[')) => self.consume(i, LBracket, 1),
                Some((i, ']')) => self.consume(i, RBracket, 1),
                Some((i, ';')) => self.consume(i, Semi, 1),
                Some((i, ',')) => self.consume(i, Comma, 1),
                Some((i, '*')) => self.consume(i, Star, 1),
                Some((i, c)) if is_data_word(c) => Some(Ok(self.data_word(i))),
                Some((i, _)) => self.unrecognized(i),
            };
        }
    }

    fn note(&mut self, kind: TokenKind, end: usize) {
        if self.mode == LexerMode::Model
            && kind == TokenKind::Semi
            && matches!(self.prev, Some((TokenKind::Keyword(Keyword::Data), _)))
        {
            debug!(offset = end, "switching lexer to data mode");
            self.mode = LexerMode::Data;
        }
        self.prev = Some((kind, end));
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<Spanned<Token<'input>>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.mode {
            LexerMode::Model => self.next_model(),
            LexerMode::Data => self.next_data(),
        };
        if let Some(Ok((_, tok, end))) = &item {
            self.note(tok.kind(), *end);
        }
        item
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_continue)
}

fn is_data_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-')
}

fn is_data_number(word: &str) -> bool {
    let unsigned = word.strip_prefix(['+', '-']).unwrap_or(word);
    NUMBER_RE
        .find(unsigned)
        .is_some_and(|m| !unsigned.is_empty() && m.end() == unsigned.len())
}
