//! Construction of terms.
//!
//! The factory functions check types and arities and
//! keep the free and bound variable sets of every term disjoint,
//! renaming binders of subterms where they would clash.

use crate::error::{IndexError, TypeError};
use crate::term::{Node, ReplSet, Term, TermKind, VarSet};
use crate::{Constant, MetaVar, Replaceable, Type, Value, Var};
use alloc::{string::ToString, sync::Arc, vec::Vec};
use fnv::FnvHashMap;

/// # Construction
impl Term {
    fn node(kind: TermKind, ty: Type, free: ReplSet, bound: VarSet) -> Self {
        Self(Arc::new(Node {
            kind,
            ty,
            free,
            bound,
        }))
    }

    pub fn value(v: Value) -> Self {
        let ty = v.sort();
        Self::node(TermKind::Value(v), ty, ReplSet::new(), VarSet::new())
    }

    pub fn constant(c: Constant) -> Self {
        let ty = c.ty().clone();
        Self::node(TermKind::Const(c), ty, ReplSet::new(), VarSet::new())
    }

    /// Create a term consisting of a (free or binder) variable.
    pub fn var(x: Var) -> Self {
        let ty = x.ty().clone();
        let free = ReplSet::singleton(Replaceable::Var(x.clone()));
        Self::node(TermKind::Var(x), ty, free, VarSet::new())
    }

    /// Create the abstraction `λx.body`.
    ///
    /// ~~~
    /// # use cora::{Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let x = Var::binder("x", o.clone());
    /// let id = Term::abst(x.clone(), Term::var(x.clone()))?;
    /// assert_eq!(id.ty(), &Type::arrow(o.clone(), o.clone()));
    /// assert!(id.free_replaceables().is_empty());
    ///
    /// // only binder variables can be abstracted over
    /// let y = Var::new("y", o.clone());
    /// assert!(Term::abst(y.clone(), Term::var(y)).is_err());
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn abst(x: Var, body: Term) -> Result<Self, TypeError> {
        if !x.is_binder() {
            return Err(TypeError::NotBinder(x));
        }
        Ok(Self::mk_abst(x, body))
    }

    /// Create `λx1 … λxk.body`.
    pub fn absts(xs: Vec<Var>, body: Term) -> Result<Self, TypeError> {
        xs.into_iter().rev().try_fold(body, |body, x| Self::abst(x, body))
    }

    /// Apply a term to arguments.
    ///
    /// If the term is already an application, the arguments are appended
    /// to the existing ones, so the head of an application is never an application.
    /// Applying a term to no arguments yields the term itself.
    ///
    /// ~~~
    /// # use cora::{Constant, Term, Type, TypeError};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let a = Term::constant(Constant::new("a", o.clone()));
    /// let fa = f.clone().apply([a.clone()].into())?;
    /// let faa = fa.apply([a.clone()].into())?;
    /// assert_eq!(faa.head(), &f);
    /// assert_eq!(faa.arguments().len(), 2);
    /// assert!(faa.clone().apply([a].into()).is_err());
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn apply(self, args: Vec<Term>) -> Result<Self, TypeError> {
        let head = self.head();
        let ty = self.ty();
        if ty.arity() < args.len() {
            return Err(TypeError::TooManyArguments {
                head: head.clone(),
                args: self.arguments().len() + args.len(),
            });
        }
        for (arg, expected) in args.iter().zip(ty.inputs()) {
            if arg.ty() != expected {
                let expected = expected.clone();
                let arg = arg.clone();
                return Err(TypeError::ArgumentType { expected, arg });
            }
        }
        Ok(self.mk_appl(args))
    }

    /// Create the meta-application `Z⟨t1, …, tk⟩`.
    pub fn meta(z: MetaVar, args: Vec<Term>) -> Result<Self, TypeError> {
        if z.arity() != args.len() {
            let args = args.len();
            return Err(TypeError::MetaArity { meta: z, args });
        }
        for (arg, expected) in args.iter().zip(z.inputs()) {
            if arg.ty() != expected {
                let expected = expected.clone();
                let arg = arg.clone();
                return Err(TypeError::ArgumentType { expected, arg });
            }
        }
        Ok(Self::mk_meta(z, args))
    }

    /// Build an abstraction without checking that `x` is a binder.
    pub(crate) fn mk_abst(x: Var, body: Term) -> Self {
        // a binder may not be bound again inside its own scope
        let body = if body.bound_vars().contains(&x) {
            body.refresh_binders()
        } else {
            body
        };
        let ty = Type::arrow(x.ty().clone(), body.ty().clone());
        let free = body.free_replaceables().without(&Replaceable::Var(x.clone()));
        let bound = body.bound_vars().with(x.clone());
        Self::node(TermKind::Abst(x, body), ty, free, bound)
    }

    /// Apply a term to arguments without checking types.
    pub(crate) fn mk_appl(self, mut args: Vec<Term>) -> Self {
        if args.is_empty() {
            return self;
        }
        let (head, mut all) = match self.kind() {
            TermKind::Appl(head, args1) => (Some(head.clone()), args1.clone()),
            _ => (None, Vec::new()),
        };
        let head = head.unwrap_or(self);
        all.append(&mut args);
        let ty = match head.ty().drop_inputs(all.len()) {
            Some(ty) => ty.clone(),
            None => {
                debug_assert!(false, "ill-typed application of {}", head);
                head.ty().output().clone()
            }
        };

        let mut parts = Vec::with_capacity(all.len() + 1);
        parts.push(head);
        parts.append(&mut all);
        let (free, bound) = Self::separate(&mut parts);
        let head = parts.remove(0);
        Self::node(TermKind::Appl(head, parts), ty, free, bound)
    }

    /// Build a meta-application without checking types.
    pub(crate) fn mk_meta(z: MetaVar, mut args: Vec<Term>) -> Self {
        let ty = z.output().clone();
        let (free, bound) = Self::separate(&mut args);
        let free = free.with(Replaceable::Meta(z.clone()));
        Self::node(TermKind::Meta(z, args), ty, free, bound)
    }

    /// Refresh the binders of those parts whose bound variables occur free in some part,
    /// then return the united free and bound variables of all parts.
    ///
    /// The free set starts from the first part's set and
    /// is only reallocated when a later part contributes new elements.
    fn separate(parts: &mut [Term]) -> (ReplSet, VarSet) {
        let free = parts
            .iter()
            .fold(ReplSet::new(), |acc, p| acc.union(p.free_replaceables()));
        let free_binders: VarSet = free.iter().filter_map(|r| r.binder().cloned()).collect();
        for part in parts.iter_mut() {
            if part.bound_vars().intersects(&free_binders) {
                trace!("refresh binders of {}", part);
                *part = part.refresh_binders();
            }
        }
        let bound = parts
            .iter()
            .fold(VarSet::new(), |acc, p| acc.union(p.bound_vars()));
        (free, bound)
    }

    /// Return an alpha-equivalent term where all binders are replaced by fresh ones.
    ///
    /// ~~~
    /// # use cora::{Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let x = Var::binder("x", o.clone());
    /// let id = Term::abst(x.clone(), Term::var(x.clone()))?;
    /// let id2 = id.refresh_binders();
    /// assert_ne!(id, id2);
    /// assert!(id.alpha_equals(&id2));
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn refresh_binders(&self) -> Self {
        if self.bound_vars().is_empty() {
            return self.clone();
        }
        self.rename(&mut FnvHashMap::default())
    }

    /// Replace every free occurrence of `from` by `to`, refreshing all binders.
    pub(crate) fn rename_var(&self, from: &Var, to: &Var) -> Self {
        let mut map = FnvHashMap::default();
        map.insert(from.clone(), to.clone());
        self.rename(&mut map)
    }

    fn rename(&self, map: &mut FnvHashMap<Var, Var>) -> Self {
        if self.bound_vars().is_empty() && !self.free_vars().any(|x| map.contains_key(x)) {
            return self.clone();
        }
        match self.kind() {
            TermKind::Value(_) | TermKind::Const(_) => self.clone(),
            TermKind::Var(x) => match map.get(x) {
                Some(y) => Self::var(y.clone()),
                None => self.clone(),
            },
            TermKind::Abst(x, body) => {
                let y = x.fresh_copy();
                let prev = map.insert(x.clone(), y.clone());
                let body = body.rename(map);
                match prev {
                    Some(prev) => map.insert(x.clone(), prev),
                    None => map.remove(x),
                };
                Self::mk_abst(y, body)
            }
            TermKind::Appl(head, args) => {
                let args = args.iter().map(|a| a.rename(map)).collect();
                head.rename(map).mk_appl(args)
            }
            TermKind::Meta(z, args) => {
                let args = args.iter().map(|a| a.rename(map)).collect();
                Self::mk_meta(z.clone(), args)
            }
        }
    }

    /// Return `h(s1, …, si)` for `h(s1, …, sn)` and `i ≤ n`.
    ///
    /// For `i = 0`, this is `h`, and for `i = n`, this is the term itself.
    pub fn immediate_head_subterm(&self, i: usize) -> Result<Self, IndexError> {
        let n = self.arguments().len();
        if i > n {
            let position = i.to_string();
            let term = self.clone();
            return Err(IndexError { position, term });
        }
        Ok(self.head_prefix(i))
    }

    /// Return `h(s1, …, si)`, assuming that `i` does not exceed the number of arguments.
    pub(crate) fn head_prefix(&self, i: usize) -> Self {
        let args = self.arguments();
        if i >= args.len() {
            return self.clone();
        }
        let head = self.head().clone();
        head.mk_appl(args[..i].to_vec())
    }
}

impl From<Value> for Term {
    fn from(v: Value) -> Self {
        Self::value(v)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Self::constant(c)
    }
}

impl From<Var> for Term {
    fn from(x: Var) -> Self {
        Self::var(x)
    }
}

#[test]
fn immediate_head_subterms() -> Result<(), TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let b = Term::constant(Constant::new("b", o));
    let fab = f.clone().apply([a.clone(), b].into())?;

    assert_eq!(fab.immediate_head_subterm(0).unwrap(), f);
    assert_eq!(fab.immediate_head_subterm(1).unwrap(), f.apply([a].into())?);
    assert_eq!(fab.immediate_head_subterm(2).unwrap(), fab);
    assert!(fab.immediate_head_subterm(3).is_err());
    Ok(())
}
