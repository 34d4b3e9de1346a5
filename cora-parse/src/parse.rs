//! Recursive-descent parsing of queries.

use crate::{Command, Term, Token, Type};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};
use core::iter::Peekable;
use core::ops::Range;
use core::str::FromStr;
use logos::{Logos, SpannedIter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownToken,
    ExpectedCmd,
    ExpectedIdent,
    ExpectedColon,
    ExpectedColonEq,
    ExpectedDot,
    ExpectedWith,
    ExpectedArrow,
    ExpectedFatArrow,
    ExpectedType,
    ExpectedTerm,
    ExpectedLBrk,
    ExpectedRPar,
    ExpectedCommaOrRPar,
    ExpectedCommaOrRBrk,
    ExpectedEnd,
}

/// Parse error at a byte offset of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::UnknownToken => "unknown token",
            Self::ExpectedCmd => "expected command",
            Self::ExpectedIdent => "expected identifier",
            Self::ExpectedColon => "expected ':'",
            Self::ExpectedColonEq => "expected ':='",
            Self::ExpectedDot => "expected '.'",
            Self::ExpectedWith => "expected 'with'",
            Self::ExpectedArrow => "expected '->'",
            Self::ExpectedFatArrow => "expected '=>'",
            Self::ExpectedType => "expected type",
            Self::ExpectedTerm => "expected term",
            Self::ExpectedLBrk => "expected '['",
            Self::ExpectedRPar => "expected ')'",
            Self::ExpectedCommaOrRPar => "expected ',' or ')'",
            Self::ExpectedCommaOrRBrk => "expected ',' or ']'",
            Self::ExpectedEnd => "expected end of input",
        };
        s.fmt(f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.offset)
    }
}

pub type Span = Range<usize>;

/// Parser over the tokens of a string.
pub struct Parser<'s> {
    tokens: Peekable<SpannedIter<'s, Token<'s>>>,
    end: usize,
}

impl<'s> Parser<'s> {
    pub fn new(s: &'s str) -> Self {
        let tokens = Token::lexer(s).spanned().peekable();
        let end = s.len();
        Self { tokens, end }
    }

    fn skip_space(&mut self) {
        while let Some((Token::Space, _)) = self.tokens.peek() {
            self.tokens.next();
        }
    }

    fn peek(&mut self) -> Option<&(Token<'s>, Span)> {
        self.skip_space();
        self.tokens.peek()
    }

    fn next(&mut self) -> Option<(Token<'s>, Span)> {
        self.skip_space();
        self.tokens.next()
    }

    /// Return true if the input is exhausted.
    pub fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Return the byte offset of the next token, or the input length at the end.
    pub fn offset(&mut self) -> usize {
        let end = self.end;
        self.peek().map_or(end, |(_, span)| span.start)
    }

    /// Fail with `kind` at the next token, which is not consumed.
    fn fail<T>(&mut self, kind: ErrorKind) -> Result<T, Error> {
        let end = self.end;
        let (kind, offset) = match self.peek() {
            Some((Token::Error, span)) => (ErrorKind::UnknownToken, span.start),
            Some((_, span)) => (kind, span.start),
            None => (kind, end),
        };
        Err(Error { kind, offset })
    }

    /// Consume the next token if it equals `tok`.
    fn eat(&mut self, tok: &Token<'s>) -> bool {
        match self.peek() {
            Some((next, _)) if next == tok => {
                self.tokens.next();
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, tok: Token<'s>, kind: ErrorKind) -> Result<(), Error> {
        if self.eat(&tok) {
            Ok(())
        } else {
            self.fail(kind)
        }
    }

    fn ident(&mut self) -> Result<String, Error> {
        match self.peek() {
            Some((Token::Ident(id), _)) => {
                let id = String::from(*id);
                self.tokens.next();
                Ok(id)
            }
            _ => self.fail(ErrorKind::ExpectedIdent),
        }
    }

    /// Parse items separated by commas up to a closing token.
    fn list<T, F>(&mut self, close: Token<'s>, kind: ErrorKind, mut item: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        let mut items = Vec::new();
        if self.eat(&close) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.eat(&close) {
                return Ok(items);
            } else if !self.eat(&Token::Comma) {
                return self.fail(kind);
            }
        }
    }

    /// Skip all tokens up to and including the next period.
    pub fn skip_command(&mut self) {
        while let Some((tok, _)) = self.next() {
            if tok == Token::Dot {
                break;
            }
        }
    }

    /// Parse a command, returning `None` at the end of input.
    pub fn command(&mut self) -> Result<Option<Command>, Error> {
        let cmd = match self.peek() {
            None => return Ok(None),
            Some((Token::Var, _)) => {
                self.tokens.next();
                let x = self.ident()?;
                self.expect(Token::Colon, ErrorKind::ExpectedColon)?;
                Command::Var(x, self.ty()?)
            }
            Some((Token::Meta, _)) => {
                self.tokens.next();
                let z = self.ident()?;
                self.expect(Token::Colon, ErrorKind::ExpectedColon)?;
                if self.eat(&Token::LBrk) {
                    let inputs = self.list(Token::RBrk, ErrorKind::ExpectedCommaOrRBrk, Self::ty)?;
                    self.expect(Token::Arrow, ErrorKind::ExpectedArrow)?;
                    Command::Meta(z, inputs, self.ty()?)
                } else {
                    Command::Meta(z, Vec::new(), self.ty()?)
                }
            }
            Some((Token::Ident(_), _)) => {
                let c = self.ident()?;
                self.expect(Token::Colon, ErrorKind::ExpectedColon)?;
                Command::Const(c, self.ty()?)
            }
            Some((Token::Match, _)) => {
                self.tokens.next();
                let (p, o) = self.pair()?;
                Command::Match(p, o)
            }
            Some((Token::Unify, _)) => {
                self.tokens.next();
                let (s, t) = self.pair()?;
                Command::Unify(s, t)
            }
            Some((Token::Alpha, _)) => {
                self.tokens.next();
                let (s, t) = self.pair()?;
                Command::Alpha(s, t)
            }
            Some((Token::Subst, _)) => {
                self.tokens.next();
                let tm = self.term()?;
                self.expect(Token::LBrk, ErrorKind::ExpectedLBrk)?;
                let subst = self.list(Token::RBrk, ErrorKind::ExpectedCommaOrRBrk, |p| {
                    let x = p.ident()?;
                    p.expect(Token::ColonEq, ErrorKind::ExpectedColonEq)?;
                    Ok((x, p.term()?))
                })?;
                Command::Subst(tm, subst)
            }
            Some((Token::Positions, _)) => {
                self.tokens.next();
                Command::Positions(self.term()?)
            }
            Some(_) => return self.fail(ErrorKind::ExpectedCmd),
        };
        self.expect(Token::Dot, ErrorKind::ExpectedDot)?;
        Ok(Some(cmd))
    }

    /// `s with t`
    fn pair(&mut self) -> Result<(Term, Term), Error> {
        let s = self.term()?;
        self.expect(Token::With, ErrorKind::ExpectedWith)?;
        Ok((s, self.term()?))
    }

    /// Parse a type, where arrows associate to the right.
    pub fn ty(&mut self) -> Result<Type, Error> {
        let input = match self.peek() {
            Some((Token::Ident(_), _)) => Type::Base(self.ident()?),
            Some((Token::LPar, _)) => {
                self.tokens.next();
                let ty = self.ty()?;
                self.expect(Token::RPar, ErrorKind::ExpectedRPar)?;
                ty
            }
            _ => return self.fail(ErrorKind::ExpectedType),
        };
        if self.eat(&Token::Arrow) {
            Ok(Type::arrow(input, self.ty()?))
        } else {
            Ok(input)
        }
    }

    /// Parse a term.
    ///
    /// The body of an abstraction extends as far as possible.
    pub fn term(&mut self) -> Result<Term, Error> {
        if self.eat(&Token::Lambda) {
            let x = self.ident()?;
            self.expect(Token::Colon, ErrorKind::ExpectedColon)?;
            let ty = self.ty()?;
            self.expect(Token::FatArrow, ErrorKind::ExpectedFatArrow)?;
            let body = self.term()?;
            return Ok(Term::Abst(x, ty, body.into()));
        }
        let mut tm = self.atom()?;
        while self.eat(&Token::LPar) {
            let args = self.list(Token::RPar, ErrorKind::ExpectedCommaOrRPar, Self::term)?;
            tm = tm.apply(args);
        }
        Ok(tm)
    }

    fn atom(&mut self) -> Result<Term, Error> {
        let (tok, span) = match self.peek() {
            Some((tok, span)) => (tok.clone(), span.clone()),
            None => return self.fail(ErrorKind::ExpectedTerm),
        };
        let tm = match tok {
            Token::Ident(id) => Term::Ident(id.into()),
            Token::Int(i) => Term::Int(i),
            Token::True => Term::Bool(true),
            Token::False => Term::Bool(false),
            Token::Str(s) => Term::Str(s.into()),
            Token::LPar => {
                self.tokens.next();
                let tm = self.term()?;
                self.expect(Token::RPar, ErrorKind::ExpectedRPar)?;
                return Ok(tm);
            }
            _ => return self.fail(ErrorKind::ExpectedTerm),
        };
        self.tokens.next();
        // `Z[` without intervening space starts a meta-application
        let adjacent = matches!(self.tokens.peek(), Some((Token::LBrk, lbrk)) if lbrk.start == span.end);
        match tm {
            Term::Ident(z) if adjacent => {
                self.tokens.next();
                let args = self.list(Token::RBrk, ErrorKind::ExpectedCommaOrRBrk, Self::term)?;
                Ok(Term::Meta(z, args))
            }
            tm => Ok(tm),
        }
    }
}

fn parse_all<'s, T>(s: &'s str, f: impl FnOnce(&mut Parser<'s>) -> Result<T, Error>) -> Result<T, Error> {
    let mut parser = Parser::new(s);
    let x = f(&mut parser)?;
    if parser.at_end() {
        Ok(x)
    } else {
        parser.fail(ErrorKind::ExpectedEnd)
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(s, Parser::term)
    }
}

impl FromStr for Type {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(s, Parser::ty)
    }
}

#[cfg(test)]
use alloc::boxed::Box;
#[cfg(test)]
use alloc::string::ToString;

#[test]
fn terms() -> Result<(), Error> {
    let ident = |x: &str| Term::Ident(x.into());
    let o = || Type::Base("o".into());

    let tm: Term = "f(a)(b, Z[x, 1])".parse()?;
    let z = Term::Meta("Z".into(), [ident("x"), Term::Int(1)].into());
    let expected = Term::Appl(Box::new(ident("f")), [ident("a"), ident("b"), z].into());
    assert_eq!(tm, expected);

    let tm: Term = r#"(\x : o -> o => x(true))("s")"#.parse()?;
    let xtrue = ident("x").apply([Term::Bool(true)].into());
    let abst = Term::Abst("x".into(), Type::arrow(o(), o()), xtrue.into());
    assert_eq!(tm, abst.apply([Term::Str("s".into())].into()));
    assert_eq!(tm.to_string(), r#"(\x : o -> o => x(true))("s")"#);

    let ty: Type = "(o -> o) -> o -> o".parse()?;
    assert_eq!(ty.to_string(), "(o -> o) -> o -> o");
    Ok(())
}

#[test]
fn errors() {
    let err = |s: &str| s.parse::<Term>().unwrap_err();
    assert_eq!(err("f(a b)").kind, ErrorKind::ExpectedCommaOrRPar);
    assert_eq!(err("f(a b)").offset, 4);
    assert_eq!(err("\\x => x").kind, ErrorKind::ExpectedColon);
    assert_eq!(err("f(a").offset, 3);
    assert_eq!(err("a b").kind, ErrorKind::ExpectedEnd);
    assert_eq!(err("a # b").kind, ErrorKind::UnknownToken);
}

#[test]
fn offsets() -> Result<(), Error> {
    let src = "a : o.  (; c ;) var X : o.";
    let mut parser = Parser::new(src);
    assert_eq!(parser.offset(), 0);
    parser.command()?;
    assert_eq!(parser.offset(), src.find("var").unwrap_or_default());
    parser.command()?;
    assert_eq!(parser.offset(), src.len());
    Ok(())
}
