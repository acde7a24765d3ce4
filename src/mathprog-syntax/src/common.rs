// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::{error, fmt, result};

use serde::Serialize;

/// A half-open byte range `[start, end)` into the source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Loc {
    pub start: u32,
    pub end: u32,
}

impl Loc {
    pub fn new(start: usize, end: usize) -> Self {
        Loc {
            start: start as u32,
            end: end as u32,
        }
    }

    pub fn merge(a: Loc, b: Loc) -> Self {
        Loc {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, other: Loc) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
        };
        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnclosedString,
    UnclosedComment,
    MalformedNumber,
    UnrecognizedToken,
    UnexpectedToken,
    UnexpectedEof,
    MissingTerminator,
    UnbalancedDelimiter,
    MalformedIndexing,
    MalformedAttribute,
    DomainMismatch,
    DuplicateDummyIndex,
    NestingTooDeep,
    ModelStatementInData,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            UnclosedString | UnclosedComment | MalformedNumber | UnrecognizedToken => {
                ErrorKind::Lexical
            }
            _ => ErrorKind::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            UnclosedString => "unclosed_string",
            UnclosedComment => "unclosed_comment",
            MalformedNumber => "malformed_number",
            UnrecognizedToken => "unrecognized_token",
            UnexpectedToken => "unexpected_token",
            UnexpectedEof => "unexpected_eof",
            MissingTerminator => "missing_terminator",
            UnbalancedDelimiter => "unbalanced_delimiter",
            MalformedIndexing => "malformed_indexing",
            MalformedAttribute => "malformed_attribute",
            DomainMismatch => "domain_mismatch",
            DuplicateDummyIndex => "duplicate_dummy_index",
            NestingTooDeep => "nesting_too_deep",
            ModelStatementInData => "model_statement_in_data",
        };

        write!(f, "{name}")
    }
}

/// Produced by the lexer; carries no message because the code and
/// span say everything there is to say about a bad character run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexError {
    pub start: usize,
    pub end: usize,
    pub code: ErrorCode,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}: {}", self.start, self.end, self.code)
    }
}

impl error::Error for LexError {}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub start: usize,
    pub end: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(code: ErrorCode, start: usize, end: usize, message: impl Into<String>) -> Self {
        ParseError {
            kind: code.kind(),
            code,
            start,
            end,
            message: message.into(),
        }
    }

    pub fn loc(&self) -> Loc {
        Loc::new(self.start, self.end)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}..{}: {}: {}",
            self.start, self.end, self.code, self.message
        )
    }
}

impl error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let message = match err.code {
            ErrorCode::UnclosedString => "string literal is never closed",
            ErrorCode::UnclosedComment => "block comment is never closed",
            ErrorCode::MalformedNumber => "malformed numeric literal",
            _ => "unrecognized character",
        };
        ParseError::new(err.code, err.start, err.end, message)
    }
}

pub type Result<T> = result::Result<T, ParseError>;

#[macro_export]
macro_rules! syntax_err(
    ($code:tt, $start:expr, $end:expr, $($arg:tt)*) => {{
        use $crate::common::{ErrorCode, ParseError};
        Err(ParseError::new(ErrorCode::$code, $start, $end, format!($($arg)*)))
    }}
);

#[test]
fn test_loc_basics() {
    let a = Loc { start: 3, end: 7 };
    assert_eq!(a, Loc::new(3, 7));
    assert_eq!(4, a.len());

    let b = Loc { start: 4, end: 11 };
    assert_eq!(Loc::new(3, 11), Loc::merge(a, b));
    assert!(Loc::new(3, 11).contains(b));
    assert!(!a.contains(b));
    assert_eq!("3:7", format!("{a}"));
}

#[test]
fn test_error_display() {
    let err = ParseError::new(ErrorCode::MalformedAttribute, 6, 7, "expected ';'");
    assert_eq!(ErrorKind::Syntax, err.kind);
    assert_eq!("6..7: malformed_attribute: expected ';'", err.to_string());

    let lex: ParseError = LexError {
        start: 0,
        end: 4,
        code: ErrorCode::UnclosedString,
    }
    .into();
    assert_eq!(ErrorKind::Lexical, lex.kind);
    assert_eq!(ErrorCode::UnclosedString, lex.code);
}
