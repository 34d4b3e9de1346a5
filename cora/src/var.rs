//! Variables and meta-variables with globally unique identities.

use crate::Type;
use alloc::{string::String, sync::Arc, vec::Vec};
use core::cmp::Ordering;
use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use core::sync::atomic::{self, AtomicU64};

/// Source of all variable identifiers.
static COUNTER: AtomicU64 = AtomicU64::new(0);

fn fresh_id() -> u64 {
    COUNTER.fetch_add(1, atomic::Ordering::Relaxed)
}

#[derive(Debug)]
struct VarData {
    id: u64,
    name: String,
    ty: Type,
    binder: bool,
}

/// Free or binder variable.
///
/// Every variable receives a fresh identifier on creation.
/// Equality, ordering and hashing rely on this identifier (and kind and type),
/// never on the display name:
///
/// ~~~
/// # use cora::{Type, Var};
/// let o = Type::base("o");
/// let x1 = Var::new("x", o.clone());
/// let x2 = Var::new("x", o.clone());
/// assert_eq!(x1, x1.clone());
/// assert_ne!(x1, x2);
/// assert_ne!(x1, x1.fresh_copy());
/// ~~~
#[derive(Clone, Debug)]
pub struct Var(Arc<VarData>);

impl Var {
    fn make(name: &str, ty: Type, binder: bool) -> Self {
        let id = fresh_id();
        let name = name.into();
        Self(Arc::new(VarData {
            id,
            name,
            ty,
            binder,
        }))
    }

    /// Create a free variable, which may occur anywhere.
    pub fn new(name: &str, ty: Type) -> Self {
        Self::make(name, ty, false)
    }

    /// Create a binder variable, to be bound by an abstraction.
    pub fn binder(name: &str, ty: Type) -> Self {
        Self::make(name, ty, true)
    }

    /// Create a variable of the same name, type, and kind, but with a new identity.
    pub fn fresh_copy(&self) -> Self {
        Self::make(&self.0.name, self.0.ty.clone(), self.0.binder)
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    pub fn is_binder(&self) -> bool {
        self.0.binder
    }

    fn key(&self) -> (u64, bool, &Type) {
        (self.0.id, self.0.binder, &self.0.ty)
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for Var {}

impl PartialOrd for Var {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Var {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name().fmt(f)
    }
}

#[derive(Debug)]
struct MetaData {
    id: u64,
    name: String,
    inputs: Vec<Type>,
    output: Type,
    ty: Type,
}

/// Meta-variable of fixed arity.
///
/// A meta-variable `Z` with inputs `σ1, …, σk` and output `τ`
/// stands for a term with `k` holes, and
/// it is instantiated by a term of type `σ1 → … → σk → τ`.
#[derive(Clone, Debug)]
pub struct MetaVar(Arc<MetaData>);

impl MetaVar {
    pub fn new(name: &str, inputs: Vec<Type>, output: Type) -> Self {
        let ty = Type::arrows(inputs.iter().cloned(), output.clone());
        Self(Arc::new(MetaData {
            id: fresh_id(),
            name: name.into(),
            inputs,
            output,
            ty,
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.inputs.len()
    }

    pub fn inputs(&self) -> &[Type] {
        &self.0.inputs
    }

    pub fn output(&self) -> &Type {
        &self.0.output
    }

    /// Return `σ1 → … → σk → τ`, the type of terms instantiating the meta-variable.
    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    fn key(&self) -> (u64, &[Type], &Type) {
        (self.0.id, &self.0.inputs, &self.0.output)
    }
}

impl PartialEq for MetaVar {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for MetaVar {}

impl PartialOrd for MetaVar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetaVar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for MetaVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state)
    }
}

impl Display for MetaVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Anything that a substitution can affect.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Replaceable {
    Var(Var),
    Meta(MetaVar),
}

impl Replaceable {
    pub fn id(&self) -> u64 {
        match self {
            Self::Var(x) => x.id(),
            Self::Meta(z) => z.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Var(x) => x.name(),
            Self::Meta(z) => z.name(),
        }
    }

    /// Type of the terms that may replace this replaceable.
    pub fn ty(&self) -> &Type {
        match self {
            Self::Var(x) => x.ty(),
            Self::Meta(z) => z.ty(),
        }
    }

    /// Return the number of arguments that the replaceable is applied to.
    ///
    /// This is 0 for variables.
    pub fn arity(&self) -> usize {
        match self {
            Self::Var(_) => 0,
            Self::Meta(z) => z.arity(),
        }
    }

    /// Return the variable if it is a binder variable.
    pub fn binder(&self) -> Option<&Var> {
        match self {
            Self::Var(x) if x.is_binder() => Some(x),
            _ => None,
        }
    }
}

impl From<Var> for Replaceable {
    fn from(x: Var) -> Self {
        Self::Var(x)
    }
}

impl From<MetaVar> for Replaceable {
    fn from(z: MetaVar) -> Self {
        Self::Meta(z)
    }
}

impl Display for Replaceable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(x) => x.fmt(f),
            Self::Meta(z) => z.fmt(f),
        }
    }
}

#[test]
fn identity() {
    let o = Type::base("o");
    let x = Var::binder("x", o.clone());
    let y = x.fresh_copy();
    assert!(y.is_binder());
    assert_eq!(x.name(), y.name());
    assert_eq!(x.ty(), y.ty());
    assert!(x.id() < y.id());
    assert!(x < y);

    let z = MetaVar::new("Z", Vec::from([o.clone(), o.clone()]), o.clone());
    assert_eq!(z.arity(), 2);
    assert_eq!(z.ty().arity(), 2);
    assert_eq!(Replaceable::from(z.clone()).arity(), 2);
    assert_eq!(Replaceable::from(x.clone()).arity(), 0);
    assert_eq!(Replaceable::from(x.clone()).binder(), Some(&x));
    assert_ne!(Replaceable::from(z), Replaceable::from(x));
}
