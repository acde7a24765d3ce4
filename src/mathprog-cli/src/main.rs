// Copyright 2026 The MathProg Syntax Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mathprog_syntax::token::Lexer;
use mathprog_syntax::{ParseConfig, ParseError, parse_with_config};

const EXIT_FAILURE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "mathprog")]
#[command(about = "Parse GNU MathProg models and data sections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the syntax tree of a model
    Parse {
        /// Model file; reads stdin when omitted or `-`
        path: Option<PathBuf>,

        /// Print the tree as JSON instead of an S-expression
        #[arg(long)]
        json: bool,

        /// Keep going after errors, replacing bad statements with error nodes
        #[arg(long)]
        recover: bool,

        /// Maximum expression and `for` nesting
        #[arg(long, default_value_t = ParseConfig::default().max_depth)]
        max_depth: usize,

        /// Drop whitespace and comments from the JSON output
        #[arg(long)]
        no_trivia: bool,
    },
    /// Report every lexical and syntax error in a model
    Check {
        /// Model file; reads stdin when omitted or `-`
        path: Option<PathBuf>,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Model file; reads stdin when omitted or `-`
        path: Option<PathBuf>,
    },
}

fn read_source(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_owned(), text))
        }
    }
}

/// `file:line:col: code: message`, followed by the offending line with
/// the error span underlined.
fn render_diagnostic(name: &str, text: &str, err: &ParseError) -> String {
    let start = err.start.min(text.len());
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    let line_no = text[..line_start].matches('\n').count() + 1;
    let col = text[line_start..start].chars().count();
    let end = err.end.clamp(start, line_end);
    let width = text[start..end].chars().count().max(1);

    format!(
        "{}:{}:{}: {} error[{}]: {}\n    {}\n    {}{}",
        name,
        line_no,
        col + 1,
        err.kind,
        err.code,
        err.message,
        &text[line_start..line_end],
        " ".repeat(col),
        "~".repeat(width),
    )
}

fn report(name: &str, text: &str, diagnostics: &[ParseError]) {
    for err in diagnostics {
        eprintln!("{}", render_diagnostic(name, text, err));
    }
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Parse {
            path,
            json,
            recover,
            max_depth,
            no_trivia,
        } => {
            let (name, text) = read_source(path.as_deref())?;
            let config = ParseConfig {
                recover,
                max_depth,
                keep_trivia: !no_trivia,
            };
            debug!(?config, file = %name, "parsing");
            let parse = match parse_with_config(&text, &config) {
                Ok(parse) => parse,
                Err(err) => {
                    report(&name, &text, &[err]);
                    return Ok(false);
                }
            };
            if json {
                println!("{}", parse.tree.to_json()?);
            } else {
                println!("{}", parse.tree.to_sexp());
            }
            report(&name, &text, &parse.diagnostics);
            Ok(parse.is_ok())
        }
        Command::Check { path } => {
            let (name, text) = read_source(path.as_deref())?;
            let parse = parse_with_config(&text, &ParseConfig::recovering())?;
            report(&name, &text, &parse.diagnostics);
            info!(
                file = %name,
                statements = parse.tree.statements().count(),
                errors = parse.diagnostics.len(),
                "checked"
            );
            Ok(parse.is_ok())
        }
        Command::Tokens { path } => {
            let (name, text) = read_source(path.as_deref())?;
            let mut ok = true;
            for item in Lexer::new(&text) {
                match item {
                    Ok((start, tok, end)) => {
                        println!("{start}..{end}\t{}\t{}", tok.kind(), &text[start..end]);
                    }
                    Err(err) => {
                        let err: ParseError = err.into();
                        report(&name, &text, &[err]);
                        ok = false;
                    }
                }
            }
            Ok(ok)
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mathprog_syntax=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_FAILURE),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_FAILURE);
        }
    }
}
