//! Terms of the simply-typed lambda calculus with meta-variables.

use crate::set::SharedSet;
use crate::{Constant, MetaVar, Replaceable, Type, Value, Var};
use alloc::{sync::Arc, vec::Vec};
use core::fmt;

/// Set of free variables and meta-variables.
pub type ReplSet = SharedSet<Replaceable>;

/// Set of binder variables.
pub type VarSet = SharedSet<Var>;

/// Shape of a term.
///
/// This can be inspected, but terms can only be constructed via
/// the functions in the [factory](Term#construction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermKind {
    Value(Value),
    Const(Constant),
    /// unapplied free or binder variable
    Var(Var),
    /// `λx.s`
    Abst(Var, Term),
    /// `h(s1, …, sn)` with `n > 0`, where `h` is not an application
    Appl(Term, Vec<Term>),
    /// `Z⟨t1, …, tk⟩` with `k` the arity of `Z`
    Meta(MetaVar, Vec<Term>),
}

pub(crate) struct Node {
    pub(crate) kind: TermKind,
    pub(crate) ty: Type,
    pub(crate) free: ReplSet,
    pub(crate) bound: VarSet,
}

/// Pointer to an immutable, typed term.
///
/// Cloning a term is constant-time and shares the whole term.
#[derive(Clone)]
pub struct Term(pub(crate) Arc<Node>);

impl Term {
    pub fn kind(&self) -> &TermKind {
        &self.0.kind
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    /// Free variables and meta-variables occurring in the term.
    pub fn free_replaceables(&self) -> &ReplSet {
        &self.0.free
    }

    /// Binder variables that are bound somewhere in the term.
    pub fn bound_vars(&self) -> &VarSet {
        &self.0.bound
    }

    /// Iterate over the free variables (binder or not) of the term.
    pub fn free_vars(&self) -> impl Iterator<Item = &Var> {
        self.0.free.iter().filter_map(|r| match r {
            Replaceable::Var(x) => Some(x),
            Replaceable::Meta(_) => None,
        })
    }

    /// Compare the memory addresses of two terms.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Return `h` for `h(s1, …, sn)`, and the term itself otherwise.
    pub fn head(&self) -> &Term {
        match self.kind() {
            TermKind::Appl(head, _) => head,
            _ => self,
        }
    }

    /// Return `[s1, …, sn]` for `h(s1, …, sn)`, and `[]` otherwise.
    pub fn arguments(&self) -> &[Term] {
        match self.kind() {
            TermKind::Appl(_, args) => args,
            _ => &[],
        }
    }

    /// Return the constant `f` if the term is `f` or `f(s1, …, sn)`.
    pub fn root(&self) -> Option<&Constant> {
        match self.head().kind() {
            TermKind::Const(c) => Some(c),
            _ => None,
        }
    }

    /// Return the variable `x` if the term is `x` or `x(s1, …, sn)`.
    pub fn head_var(&self) -> Option<&Var> {
        match self.head().kind() {
            TermKind::Var(x) => Some(x),
            _ => None,
        }
    }

    /// Return the meta-variable `Z` if the term is `Z⟨…⟩` or `Z⟨…⟩(s1, …, sn)`.
    pub fn head_meta(&self) -> Option<&MetaVar> {
        match self.head().kind() {
            TermKind::Meta(z, _) => Some(z),
            _ => None,
        }
    }

    /// Return `[t1, …, tk]` if the (head of the) term is `Z⟨t1, …, tk⟩`.
    pub fn meta_arguments(&self) -> &[Term] {
        match self.head().kind() {
            TermKind::Meta(_, args) => args,
            _ => &[],
        }
    }

    /// Return the binder and body if the term is an abstraction.
    pub fn abstraction(&self) -> Option<(&Var, &Term)> {
        match self.kind() {
            TermKind::Abst(x, body) => Some((x, body)),
            _ => None,
        }
    }
}

impl PartialEq for Term {
    /// Structural equality, comparing variables by identity.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.ty == other.0.ty && self.0.kind == other.0.kind)
    }
}

impl Eq for Term {}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Term({} : {})", self, self.ty())
    }
}
