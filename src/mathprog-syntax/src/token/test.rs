// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use super::Token::*;
use super::{ErrorCode, Keyword, LexError, Lexer, LexerMode, Token, TriviaKind};
use crate::common::ErrorCode::*;

fn test(input: &str, expected: Vec<(&str, Token)>) {
    let tokenizer = Lexer::new(input);
    let len = expected.len();
    for (token, (expected_span, expected_tok)) in tokenizer.zip(expected.into_iter()) {
        let expected_start = expected_span.find('~').unwrap();
        let expected_end = expected_span.rfind('~').unwrap() + 1;
        assert_eq!(Ok((expected_start, expected_tok, expected_end)), token);
    }

    let tokenizer = Lexer::new(input);
    assert_eq!(None, tokenizer.skip(len).next());
}

fn test_err(input: &str, expected: (&str, ErrorCode)) {
    let tokenizer = Lexer::new(input);
    let token = tokenizer.into_iter().find(|t| t.is_err()).unwrap();
    let (expected_span, expected_code) = expected;
    let expected_start = expected_span.find('~').unwrap();
    let expected_end = expected_span.rfind('~').unwrap() + 1;
    let expected_err = LexError {
        start: expected_start,
        end: expected_end,
        code: expected_code,
    };
    assert_eq!(Err(expected_err), token);
}

fn kinds(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).map(|t| t.unwrap().1).collect()
}

#[test]
fn set_declaration() {
    test(
        "set S within T;",
        vec![
            ("~~~            ", Keyword(Keyword::Set)),
            ("    ~          ", Ident("S")),
            ("      ~~~~~~   ", Keyword(Keyword::Within)),
            ("             ~ ", Ident("T")),
            ("              ~", Semi),
        ],
    );
}

#[test]
fn compound_operators() {
    test(
        "<= >= <> != == := .. ** <- >> && ||",
        vec![
            ("~~                                 ", Lte),
            ("   ~~                              ", Gte),
            ("      ~~                           ", Neq),
            ("         ~~                        ", BangEq),
            ("            ~~                     ", EqEq),
            ("               ~~                  ", Assign),
            ("                  ~~               ", DotDot),
            ("                     ~~            ", StarStar),
            ("                        ~~         ", LArrow),
            ("                           ~~      ", GtGt),
            ("                              ~~   ", AmpAmp),
            ("                                 ~~", PipePipe),
        ],
    );
}

#[test]
fn range_is_not_a_decimal() {
    test(
        "1..10",
        vec![("~    ", Num("1")), (" ~~  ", DotDot), ("   ~~", Num("10"))],
    );
}

#[test]
fn numbers() {
    test("1.", vec![("~~", Num("1."))]);
    test(".5", vec![("~~", Num(".5"))]);
    test("2.5e-3", vec![("~~~~~~", Num("2.5e-3"))]);
    test("1E10", vec![("~~~~", Num("1E10"))]);
    test("-3", vec![("~ ", Minus), (" ~", Num("3"))]);
}

#[test]
fn malformed_numbers() {
    test_err("x := 12abc;", ("     ~~~~~ ", MalformedNumber));
    test_err("2e", ("~~", MalformedNumber));
}

#[test]
fn strings() {
    test("'abc'", vec![("~~~~~", Str("'abc'"))]);
    test("\"a\"\"b\"", vec![("~~~~~~", Str("\"a\"\"b\""))]);
    test("'it''s'", vec![("~~~~~~~", Str("'it''s'"))]);
}

#[test]
fn unclosed_string() {
    test_err("p := 'abc", ("     ~~~~", UnclosedString));
}

#[test]
fn comments_are_trivia() {
    let mut lexer = Lexer::new("set # line\n/* block */ S;");
    let toks: Vec<_> = lexer.by_ref().map(|t| t.unwrap().1).collect();
    assert_eq!(vec![Keyword(Keyword::Set), Ident("S"), Semi], toks);

    let trivia = lexer.take_trivia();
    let comments: Vec<_> = trivia
        .iter()
        .filter(|t| t.kind == TriviaKind::Comment)
        .map(|t| t.loc.range())
        .collect();
    assert_eq!(vec![4..10, 11..22], comments);
    // " ", "\n", " "
    assert_eq!(3, trivia.len() - comments.len());
}

#[test]
fn unclosed_comment() {
    test_err("set S; /* never ends", ("       ~~~~~~~~~~~~~", UnclosedComment));
}

#[test]
fn keywords_and_functions() {
    assert_eq!(
        vec![
            Keyword(Keyword::Sum),
            Function("abs"),
            Keyword(Keyword::Min),
            Ident("minimum"),
            Keyword(Keyword::TableIn),
            Ident("in_"),
            Keyword(Keyword::In),
        ],
        kinds("sum abs min minimum IN in_ in")
    );
}

#[test]
fn subject_to_forms() {
    assert_eq!(
        vec![Keyword(Keyword::StDot), Ident("c"), Colon],
        kinds("s.t. c:")
    );
    assert_eq!(
        vec![Keyword(Keyword::Subject), Keyword(Keyword::To), Ident("c")],
        kinds("subject to c")
    );
}

#[test]
fn suffixes() {
    test(
        "x.lb",
        vec![("~   ", Ident("x")), (" ~~~", Suffix(".lb"))],
    );
    test(
        "y[i].dual",
        vec![
            ("~        ", Ident("y")),
            (" ~       ", LBracket),
            ("  ~      ", Ident("i")),
            ("   ~     ", RBracket),
            ("    ~~~~~", Suffix(".dual")),
        ],
    );
    // not glued to a name
    test_err("x .lb", ("  ~  ", UnrecognizedToken));
    // not one of the known suffixes
    test_err("x.foo", (" ~   ", UnrecognizedToken));
}

#[test]
fn unrecognized() {
    test_err("x $ y", ("  ~  ", UnrecognizedToken));
    test_err("a | b", ("  ~  ", UnrecognizedToken));
}

#[test]
fn data_mode_switch() {
    let mut lexer = Lexer::new("data; param p := a-1 2.5 -3 + . x.y;");
    let toks: Vec<_> = lexer.by_ref().map(|t| t.unwrap().1).collect();
    assert_eq!(
        vec![
            Keyword(Keyword::Data),
            Semi,
            Keyword(Keyword::Param),
            Ident("p"),
            Assign,
            Bareword("a-1"),
            Num("2.5"),
            Num("-3"),
            Plus,
            Dot,
            Bareword("x.y"),
            Semi,
        ],
        toks
    );
    assert_eq!(LexerMode::Data, lexer.mode());
}

#[test]
fn data_mode_markers() {
    assert_eq!(
        vec![
            Keyword(Keyword::Data),
            Semi,
            Keyword(Keyword::Param),
            Ident("a"),
            Tr,
            Colon,
            Ident("x"),
            Assign,
            LParen,
            Num("1"),
            Comma,
            Star,
            RParen,
            Semi,
            Keyword(Keyword::End),
            Semi,
        ],
        kinds("data;\nparam a (tr) : x := (1,*);\nend;")
    );
}

#[test]
fn data_keyword_alone_does_not_switch() {
    let mut lexer = Lexer::new("data param;");
    let _: Vec<_> = lexer.by_ref().collect();
    assert_eq!(LexerMode::Model, lexer.mode());
}
