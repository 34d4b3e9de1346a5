//! Untyped syntax trees of queries.
//!
//! Names are not resolved at this stage:
//! an identifier may refer to a constant, a declared variable or a binder.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Base(String),
    /// `a -> b`
    Arrow(Box<Type>, Box<Type>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Ident(String),
    Int(i64),
    Bool(bool),
    Str(String),
    /// `h(t1, ..., tn)`
    Appl(Box<Term>, Vec<Term>),
    /// `Z[t1, ..., tn]`
    Meta(String, Vec<Term>),
    /// `\x : ty => t`
    Abst(String, Type, Box<Term>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `f : ty.`
    Const(String, Type),
    /// `var x : ty.`
    Var(String, Type),
    /// `meta Z : [ty1, ..., tyn] -> ty.`
    Meta(String, Vec<Type>, Type),
    /// `match pattern with object.`
    Match(Term, Term),
    /// `unify s with t.`
    Unify(Term, Term),
    /// `alpha s with t.`
    Alpha(Term, Term),
    /// `subst t [x := s, ...].`
    Subst(Term, Vec<(String, Term)>),
    /// `positions t.`
    Positions(Term),
}

impl Type {
    pub fn arrow(input: Self, output: Self) -> Self {
        Self::Arrow(Box::new(input), Box::new(output))
    }
}

impl Term {
    /// Apply a term to arguments, extending the arguments of an application.
    pub fn apply(self, mut args: Vec<Self>) -> Self {
        if args.is_empty() {
            return self;
        }
        match self {
            Self::Appl(head, mut init) => {
                init.append(&mut args);
                Self::Appl(head, init)
            }
            head => Self::Appl(Box::new(head), args),
        }
    }
}

impl Command {
    /// Return true if the command introduces a name.
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Const(..) | Self::Var(..) | Self::Meta(..))
    }
}

fn comma_sep<T: Display>(items: &[T], f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = items.iter();
    if let Some(first) = iter.next() {
        first.fmt(f)?;
    }
    iter.try_for_each(|item| write!(f, ", {}", item))
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Base(b) => b.fmt(f),
            Self::Arrow(a, b) if matches!(**a, Self::Arrow(..)) => write!(f, "({}) -> {}", a, b),
            Self::Arrow(a, b) => write!(f, "{} -> {}", a, b),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ident(x) => x.fmt(f),
            Self::Int(i) => i.fmt(f),
            Self::Bool(b) => b.fmt(f),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Appl(head, args) => {
                match **head {
                    Self::Abst(..) => write!(f, "({})", head)?,
                    _ => head.fmt(f)?,
                }
                write!(f, "(")?;
                comma_sep(args, f)?;
                write!(f, ")")
            }
            Self::Meta(z, args) => {
                write!(f, "{}[", z)?;
                comma_sep(args, f)?;
                write!(f, "]")
            }
            Self::Abst(x, ty, body) => write!(f, "\\{} : {} => {}", x, ty, body),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Const(c, ty) => write!(f, "{} : {}", c, ty)?,
            Self::Var(x, ty) => write!(f, "var {} : {}", x, ty)?,
            Self::Meta(z, inputs, output) => {
                write!(f, "meta {} : [", z)?;
                comma_sep(inputs, f)?;
                write!(f, "] -> {}", output)?
            }
            Self::Match(p, o) => write!(f, "match {} with {}", p, o)?,
            Self::Unify(s, t) => write!(f, "unify {} with {}", s, t)?,
            Self::Alpha(s, t) => write!(f, "alpha {} with {}", s, t)?,
            Self::Subst(tm, subst) => {
                write!(f, "subst {} [", tm)?;
                let mut iter = subst.iter();
                if let Some((x, s)) = iter.next() {
                    write!(f, "{} := {}", x, s)?;
                }
                iter.try_for_each(|(x, s)| write!(f, ", {} := {}", x, s))?;
                write!(f, "]")?
            }
            Self::Positions(tm) => write!(f, "positions {}", tm)?,
        }
        write!(f, ".")
    }
}
