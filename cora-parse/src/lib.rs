//! Parser for the cora query language.
//!
//! A file consists of declarations of constants, variables and
//! meta-variables, followed by queries about terms built from them:
//!
//! ~~~
//! use cora_parse::{CmdIter, Command, Error};
//!
//! let cmds = "f : o -> o. var X : o. match f(X) with f(f(X)).";
//! let cmds: Result<Vec<_>, _> = CmdIter::new(cmds).collect();
//! let cmds = cmds?;
//! assert_eq!(cmds.len(), 3);
//! assert!(matches!(cmds[2], Command::Match(..)));
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

mod cmditer;
pub mod lex;
pub mod parse;
pub mod syntax;

pub use cmditer::CmdIter;
pub use lex::Token;
pub use parse::{Error, ErrorKind, Parser, Span};
pub use syntax::{Command, Term, Type};

use logos::Logos;

/// Lex a string, omitting whitespace and comments.
pub fn lex(s: &str) -> impl Iterator<Item = (Token<'_>, Span)> {
    Token::lexer(s)
        .spanned()
        .filter(|(token, _)| *token != Token::Space)
}
