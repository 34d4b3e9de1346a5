use core::fmt::{self, Display};
use logos::{Lexer, Logos};

#[derive(Logos, Clone, Debug, PartialEq)]
pub enum Token<'s> {
    #[token("var")]
    Var,

    #[token("meta")]
    Meta,

    #[token("match")]
    Match,

    #[token("with")]
    With,

    #[token("unify")]
    Unify,

    #[token("alpha")]
    Alpha,

    #[token("subst")]
    Subst,

    #[token("positions")]
    Positions,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("[")]
    LBrk,

    #[token("]")]
    RBrk,

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token(":")]
    Colon,

    #[token(":=")]
    ColonEq,

    #[token("->")]
    Arrow,

    #[token("=>")]
    FatArrow,

    #[token("\\")]
    Lambda,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[regex("[a-zA-Z_][a-zA-Z0-9_']*")]
    Ident(&'s str),

    #[regex("-?[0-9]+", |lex| lex.slice().parse().ok())]
    Int(i64),

    #[regex(r#""[^"]*""#, string)]
    Str(&'s str),

    #[regex(r"[ \t\n\f\r]+")]
    #[token("(;", comment)]
    Space,

    #[error]
    Error,
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Var => "var",
            Self::Meta => "meta",
            Self::Match => "match",
            Self::With => "with",
            Self::Unify => "unify",
            Self::Alpha => "alpha",
            Self::Subst => "subst",
            Self::Positions => "positions",
            Self::True => "true",
            Self::False => "false",
            Self::LBrk => "[",
            Self::RBrk => "]",
            Self::LPar => "(",
            Self::RPar => ")",
            Self::Colon => ":",
            Self::ColonEq => ":=",
            Self::Arrow => "->",
            Self::FatArrow => "=>",
            Self::Lambda => "\\",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Ident(s) => s,
            Self::Int(i) => return i.fmt(f),
            Self::Str(s) => return write!(f, "\"{}\"", s),
            Self::Space => " ",
            Self::Error => "<error>",
        };
        s.fmt(f)
    }
}

fn string<'s>(lex: &mut Lexer<'s, Token<'s>>) -> Option<&'s str> {
    let s = lex.slice();
    s.get(1..s.len() - 1)
}

fn comment<'s>(lex: &mut Lexer<'s, Token<'s>>) -> Option<()> {
    // number of open comments
    let mut open = 1;
    let prefix: &[_] = &['(', ';'];
    while open > 0 {
        // go to first occurrence of either ';' or '('
        lex.bump(lex.remainder().find(prefix)?);
        if lex.remainder().starts_with("(;") {
            open += 1;
            lex.bump(2);
        } else if lex.remainder().starts_with(";)") {
            open -= 1;
            lex.bump(2);
        } else {
            lex.bump(1);
        }
    }
    Some(())
}

#[cfg(test)]
use alloc::vec::Vec;

#[test]
fn tokens() {
    let toks: Vec<_> = crate::lex("var X : o. (; a (; nested ;) comment ;) Z[x] := -12 \"s t\"")
        .map(|(tok, _)| tok)
        .collect();
    use Token::*;
    let expected = [
        Var,
        Ident("X"),
        Colon,
        Ident("o"),
        Dot,
        Ident("Z"),
        LBrk,
        Ident("x"),
        RBrk,
        ColonEq,
        Int(-12),
        Str("s t"),
    ];
    assert_eq!(toks, expected);
}

#[test]
fn unclosed_comment() {
    let toks: Vec<_> = crate::lex("a (; b").map(|(tok, _)| tok).collect();
    assert_eq!(toks[0], Token::Ident("a"));
    assert!(toks.contains(&Token::Error));
}
