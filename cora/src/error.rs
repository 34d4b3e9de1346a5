//! Error types.
//!
//! All errors in this module signal a misuse of the term algebra by the caller.
//! Failing to match or to unify two terms is *not* an error;
//! see [`MatchOutcome`](crate::MatchOutcome) and [`Term::unify`](crate::Term::unify).

use crate::{MetaVar, Term, Type, Var};
use alloc::string::String;
use core::fmt::{self, Display};

/// Violation of a typing or arity constraint during term construction.
#[derive(Clone, Debug)]
pub enum TypeError {
    /// abstraction over a variable that is not a binder variable
    NotBinder(Var),
    /// more arguments than the head's type admits
    TooManyArguments { head: Term, args: usize },
    /// argument type differs from the head's input type
    ArgumentType { expected: Type, arg: Term },
    /// number of arguments differs from the meta-variable's arity
    MetaArity { meta: MetaVar, args: usize },
    /// replacement or image whose type differs from the expected one
    Mismatch { expected: Type, found: Type },
}

impl Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotBinder(x) => write!(f, "cannot abstract over non-binder variable {}", x),
            Self::TooManyArguments { head, args } => write!(
                f,
                "{} of type {} cannot be applied to {} arguments",
                head,
                head.ty(),
                args
            ),
            Self::ArgumentType { expected, arg } => write!(
                f,
                "argument {} has type {}, but {} was expected",
                arg,
                arg.ty(),
                expected
            ),
            Self::MetaArity { meta, args } => write!(
                f,
                "meta-variable {} of arity {} applied to {} arguments",
                meta,
                meta.arity(),
                args
            ),
            Self::Mismatch { expected, found } => {
                write!(f, "expected type {}, found type {}", expected, found)
            }
        }
    }
}

/// Access to a position that does not exist in a term.
#[derive(Clone, Debug)]
pub struct IndexError {
    /// printed position
    pub position: String,
    pub term: Term,
}

impl Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "position {} does not exist in {}", self.position, self.term)
    }
}

/// Matching was asked to solve a problem outside the higher-order pattern fragment.
#[derive(Clone, Debug)]
pub struct PatternRequired {
    /// meta-application that violates the pattern restriction
    pub term: Term,
    pub reason: String,
}

impl Display for PatternRequired {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pattern required at {}: {}", self.term, self.reason)
    }
}

/// Common error type.
#[derive(Clone, Debug)]
pub enum Error {
    Type(TypeError),
    Index(IndexError),
    Pattern(PatternRequired),
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}

impl From<IndexError> for Error {
    fn from(err: IndexError) -> Self {
        Self::Index(err)
    }
}

impl From<PatternRequired> for Error {
    fn from(err: PatternRequired) -> Self {
        Self::Pattern(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Type(e) => e.fmt(f),
            Self::Index(e) => e.fmt(f),
            Self::Pattern(e) => e.fmt(f),
        }
    }
}
