// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Syntactic front end for GNU MathProg.
//!
//! [`parse`] turns a model (optionally followed by a `data;` section)
//! into a lossless [`SyntaxTree`].  Every expression sits under an
//! `expr` wrapper tagged with the [`DomainSet`] it may still belong to;
//! names whose domain cannot be decided without a symbol table keep
//! all of their candidates.

#![forbid(unsafe_code)]

pub mod ast;
mod builder;
pub mod common;
pub mod config;
pub mod domain;
mod parser;
mod pretty;
pub mod syntax;
pub mod token;

pub use self::common::{ErrorCode, ErrorKind, Loc, ParseError, Result};
pub use self::config::ParseConfig;
pub use self::domain::{Domain, DomainSet};
pub use self::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};

/// The outcome of a parse: the tree plus every diagnostic collected
/// along the way.  Outside recovery mode `diagnostics` is always empty,
/// since the first error aborts the parse instead.
#[derive(Clone, Debug)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<ParseError>,
}

impl Parse {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The tree if nothing went wrong, otherwise the first diagnostic.
    pub fn into_result(self) -> Result<SyntaxTree> {
        match self.diagnostics.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.tree),
        }
    }
}

/// Parse a document with the default configuration, failing on the
/// first lexical or syntax error.
pub fn parse(text: &str) -> Result<SyntaxTree> {
    parse_with_config(text, &ParseConfig::default())?.into_result()
}

pub fn parse_with_config(text: &str, config: &ParseConfig) -> Result<Parse> {
    parser::parse_document(text, config)
}
