//! Theory literals.

use crate::theory;
use crate::Type;
use alloc::string::String;
use core::fmt::{self, Display};

/// Literal of a theory sort, treated as an opaque leaf.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn sort(&self) -> Type {
        match self {
            Self::Int(_) => theory::int_sort(),
            Self::Bool(_) => theory::bool_sort(),
            Self::Str(_) => theory::string_sort(),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => i.fmt(f),
            Self::Bool(b) => b.fmt(f),
            Self::Str(s) => write!(f, "{:?}", s),
        }
    }
}
