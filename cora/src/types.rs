//! Simple types: base sorts and right-associative arrows.

use alloc::sync::Arc;
use core::fmt::{self, Display};

/// Simple type.
///
/// Types are immutable and compared structurally:
///
/// ~~~
/// # use cora::Type;
/// let o = Type::base("o");
/// let ty = Type::arrows([o.clone(), o.clone()], o.clone());
/// assert_eq!(ty, Type::arrow(o.clone(), Type::arrow(o.clone(), o.clone())));
/// assert_eq!(ty.arity(), 2);
/// assert_eq!(ty.order(), 1);
/// assert_eq!(ty.to_string(), "o → o → o");
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    /// base sort
    Base(Arc<str>),
    /// `σ → τ`
    Arrow(Arc<Type>, Arc<Type>),
}

impl Type {
    pub fn base(name: &str) -> Self {
        Self::Base(name.into())
    }

    pub fn arrow(input: Self, output: Self) -> Self {
        Self::Arrow(Arc::new(input), Arc::new(output))
    }

    /// Construct `σ1 → … → σk → τ`.
    pub fn arrows<I>(inputs: I, output: Self) -> Self
    where
        I: IntoIterator<Item = Self>,
        I::IntoIter: DoubleEndedIterator,
    {
        inputs
            .into_iter()
            .rev()
            .fold(output, |out, inp| Self::arrow(inp, out))
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base(_))
    }

    /// Number of arguments that a term of this type takes.
    pub fn arity(&self) -> usize {
        self.inputs().count()
    }

    /// 0 for base types, else `1 + max(order(σi))` over all inputs `σi`.
    pub fn order(&self) -> usize {
        match self {
            Self::Base(_) => 0,
            Self::Arrow(..) => 1 + self.inputs().map(Self::order).max().unwrap_or(0),
        }
    }

    /// Iterate over the input types `σ1, …, σk` of `σ1 → … → σk → τ`.
    pub fn inputs(&self) -> impl Iterator<Item = &Type> {
        let mut ty = self;
        core::iter::from_fn(move || match ty {
            Self::Base(_) => None,
            Self::Arrow(i, o) => {
                ty = o;
                Some(&**i)
            }
        })
    }

    /// Return the `i`-th input type (starting from 0).
    pub fn input(&self, i: usize) -> Option<&Type> {
        self.inputs().nth(i)
    }

    /// Return the base type `τ` of `σ1 → … → σk → τ`.
    pub fn output(&self) -> &Type {
        let mut ty = self;
        while let Self::Arrow(_, o) = ty {
            ty = o
        }
        ty
    }

    /// Return the type obtained after supplying `n` arguments.
    pub fn drop_inputs(&self, n: usize) -> Option<&Type> {
        let mut ty = self;
        for _ in 0..n {
            match ty {
                Self::Base(_) => return None,
                Self::Arrow(_, o) => ty = o,
            }
        }
        Some(ty)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Base(s) => s.fmt(f),
            Self::Arrow(i, o) if i.is_base() => write!(f, "{} → {}", i, o),
            Self::Arrow(i, o) => write!(f, "({}) → {}", i, o),
        }
    }
}

#[test]
fn queries() {
    let o = Type::base("o");
    let a = Type::base("a");
    let oo = Type::arrow(o.clone(), o.clone());
    let ty = Type::arrows([oo.clone(), a.clone()], o.clone());

    assert_eq!(ty.arity(), 2);
    assert_eq!(ty.order(), 2);
    assert_eq!(ty.input(0), Some(&oo));
    assert_eq!(ty.input(1), Some(&a));
    assert_eq!(ty.input(2), None);
    assert_eq!(ty.output(), &o);
    assert_eq!(ty.drop_inputs(1), Some(&Type::arrow(a.clone(), o.clone())));
    assert_eq!(ty.drop_inputs(2), Some(&o));
    assert_eq!(ty.drop_inputs(3), None);
    assert_eq!(o.order(), 0);
    assert_eq!(alloc::string::ToString::to_string(&ty), "(o → o) → a → o");
}
