// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

/// Knobs for a single parse.
#[derive(Clone, Debug)]
pub struct ParseConfig {
    /// Collect diagnostics and keep going instead of stopping at the
    /// first error. Failed statements become `error` nodes that span
    /// up to and including the next `;`.
    pub recover: bool,
    /// Maximum nesting of expressions and `for` bodies before the
    /// parser gives up with `nesting_too_deep`. Every operand to the
    /// right of `^` or `**` is one level deeper than its left side, so
    /// a chain of n exponentiations counts as n levels; left-associative
    /// chains such as `a + b + c` do not.
    pub max_depth: usize,
    /// Record whitespace and comments so the tree can reproduce the
    /// input byte for byte.
    pub keep_trivia: bool,
}

impl ParseConfig {
    pub fn recovering() -> Self {
        ParseConfig {
            recover: true,
            ..ParseConfig::default()
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            recover: false,
            max_depth: 256,
            keep_trivia: true,
        }
    }
}
