use crate::ScopeError;
use core::fmt::{self, Display};
use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(cora_parse::Error),
    Scope(ScopeError),
    Cora(cora::Error),
    /// a worker thread panicked or could not be set up
    Thread,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<cora_parse::Error> for Error {
    fn from(err: cora_parse::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ScopeError> for Error {
    fn from(err: ScopeError) -> Self {
        Self::Scope(err)
    }
}

impl From<cora::Error> for Error {
    fn from(err: cora::Error) -> Self {
        Self::Cora(err)
    }
}

impl From<cora::TypeError> for Error {
    fn from(err: cora::TypeError) -> Self {
        Self::Cora(err.into())
    }
}

impl From<cora::PatternRequired> for Error {
    fn from(err: cora::PatternRequired) -> Self {
        Self::Cora(err.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Parse(e) => write!(f, "parse error: {}", e),
            Self::Scope(e) => write!(f, "scope error: {}", e),
            Self::Cora(e) => e.fmt(f),
            Self::Thread => write!(f, "thread failure"),
        }
    }
}
