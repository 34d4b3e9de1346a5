//! Capture-avoiding substitution of variables and meta-variables.

use crate::error::TypeError;
use crate::printer::Names;
use crate::term::{Term, TermKind};
use crate::{MetaVar, Replaceable, Var};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use fnv::FnvBuildHasher;
use im::hashmap::HashMap;

/// Finite mapping from variables and meta-variables to terms.
///
/// Every image has the type of its key;
/// for a meta-variable `Z` with inputs `σ1, …, σk` and output `τ`,
/// the image has type `σ1 → … → σk → τ`.
/// Cloning a substitution is constant-time.
#[derive(Clone, Default)]
pub struct Subst(HashMap<Replaceable, Term, FnvBuildHasher>);

impl Subst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a replaceable to a term, returning the previous image.
    ///
    /// ~~~
    /// # use cora::{Constant, Subst, Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let x = Var::new("x", o.clone());
    /// let a = Term::constant(Constant::new("a", o.clone()));
    /// let f = Term::constant(Constant::new("f", Type::arrow(o.clone(), o)));
    ///
    /// let mut subst = Subst::new();
    /// assert!(subst.insert(x.clone().into(), f).is_err());
    /// assert_eq!(subst.insert(x.clone().into(), a.clone())?, None);
    /// assert_eq!(subst.get_var(&x), Some(&a));
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn insert(&mut self, key: Replaceable, tm: Term) -> Result<Option<Term>, TypeError> {
        if key.ty() != tm.ty() {
            let expected = key.ty().clone();
            let found = tm.ty().clone();
            return Err(TypeError::Mismatch { expected, found });
        }
        Ok(self.insert_unchecked(key, tm))
    }

    /// Map a replaceable to a term that is known to have the right type.
    pub(crate) fn insert_unchecked(&mut self, key: Replaceable, tm: Term) -> Option<Term> {
        debug_assert!(key.ty() == tm.ty());
        self.0.insert(key, tm)
    }

    pub fn get(&self, key: &Replaceable) -> Option<&Term> {
        self.0.get(key)
    }

    pub fn get_var(&self, x: &Var) -> Option<&Term> {
        self.get(&Replaceable::Var(x.clone()))
    }

    pub fn get_meta(&self, z: &MetaVar) -> Option<&Term> {
        self.get(&Replaceable::Meta(z.clone()))
    }

    pub fn remove(&mut self, key: &Replaceable) -> Option<Term> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &Replaceable) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all mappings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Replaceable, &Term)> {
        self.0.iter()
    }

    /// Return true if the substitution affects some free replaceable of the term.
    fn affects(&self, tm: &Term) -> bool {
        !self.is_empty() && tm.free_replaceables().iter().any(|r| self.contains(r))
    }
}

impl Display for Subst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut maps: Vec<_> = self.iter().collect();
        maps.sort_by_key(|(r, _)| r.id());
        let keys = maps.iter().map(|&(r, _)| (r.id(), r.name()));
        let names = Names::with(keys, maps.iter().map(|&(_, tm)| tm));
        write!(f, "[")?;
        for (i, (r, tm)) in maps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} := ", names.get(r.id(), r.name()))?;
            tm.fmt_names(&names, f)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Subst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Subst({})", self)
    }
}

impl Term {
    /// Apply a substitution to the term.
    ///
    /// Every free occurrence of a variable in the domain is replaced by its image.
    /// A meta-application `Z⟨t1, …, tk⟩` with image `λx1 … λxk.s` is replaced by
    /// `s` where every `xi` is replaced by `ti` (after substituting in `ti`).
    /// Binders are renamed where they would capture free variables of images.
    ///
    /// ~~~
    /// # use cora::{Constant, MetaVar, Error, Subst, Term, Type, Value, Var};
    /// let int = cora::theory::int_sort();
    /// let fun = |name, arity| {
    ///     let ty = Type::arrows(core::iter::repeat(int.clone()).take(arity).collect::<Vec<_>>(), int.clone());
    ///     Term::constant(Constant::new(name, ty))
    /// };
    /// let (f, g, c) = (fun("f", 2), fun("g", 1), fun("c", 0));
    ///
    /// let x = Var::new("x", int.clone());
    /// let z = MetaVar::new("Z", [int.clone(), int.clone()].into(), int.clone());
    /// let gx = g.clone().apply([Term::var(x.clone())].into())?;
    /// let tm = Term::meta(z.clone(), [gx, c.clone()].into())?;
    ///
    /// let (y, w) = (Var::binder("y", int.clone()), Var::binder("w", int.clone()));
    /// let fwy = f.clone().apply([Term::var(w.clone()), Term::var(y.clone())].into())?;
    /// let mut subst = Subst::new();
    /// subst.insert(x.into(), Term::value(Value::Int(0)))?;
    /// subst.insert(z.into(), Term::absts([y, w].into(), fwy)?)?;
    /// assert_eq!(subst.to_string(), "[x := 0, Z := λy.λw.f(w, y)]");
    ///
    /// let g0 = g.apply([Term::value(Value::Int(0))].into())?;
    /// assert_eq!(tm.substitute(&subst), f.apply([c, g0].into())?);
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn substitute(&self, subst: &Subst) -> Term {
        if !subst.affects(self) {
            return self.clone();
        }
        debug!("substitute {} in {}", subst, self);
        let result = self.subst(subst);
        debug_assert!(result.ty() == self.ty());
        result
    }

    fn subst(&self, subst: &Subst) -> Term {
        if !subst.affects(self) {
            return self.clone();
        }
        match self.kind() {
            TermKind::Value(_) | TermKind::Const(_) => self.clone(),
            TermKind::Var(x) => subst.get_var(x).cloned().unwrap_or_else(|| self.clone()),
            TermKind::Appl(head, args) => {
                let args = args.iter().map(|a| a.subst(subst)).collect();
                head.subst(subst).mk_appl(args)
            }
            TermKind::Abst(x, body) => {
                let xr = Replaceable::Var(x.clone());
                let restricted;
                let subst = if subst.contains(&xr) {
                    let mut s = subst.clone();
                    s.remove(&xr);
                    restricted = s;
                    &restricted
                } else {
                    subst
                };
                let captures = body
                    .free_replaceables()
                    .iter()
                    .filter_map(|r| subst.get(r))
                    .any(|tm| tm.free_replaceables().contains(&xr));
                if captures {
                    let y = x.fresh_copy();
                    trace!("rename {} to avoid capture", x);
                    let body = body.rename_var(x, &y);
                    Self::mk_abst(y, body.subst(subst))
                } else {
                    Self::mk_abst(x.clone(), body.subst(subst))
                }
            }
            TermKind::Meta(z, args) => {
                let args = args.iter().map(|a| a.subst(subst)).collect();
                match subst.get_meta(z) {
                    Some(image) => image.instantiate(args),
                    None => Self::mk_meta(z.clone(), args),
                }
            }
        }
    }

    /// Replace the leading binders of the term by the arguments,
    /// then apply the body to the arguments left over.
    fn instantiate(&self, args: Vec<Term>) -> Term {
        let mut inner = Subst::new();
        let mut body = self;
        let mut rest = Vec::new();
        for arg in args {
            match body.kind() {
                TermKind::Abst(x, b) => {
                    inner.insert_unchecked(Replaceable::Var(x.clone()), arg);
                    body = b;
                }
                _ => rest.push(arg),
            }
        }
        body.subst(&inner).mk_appl(rest)
    }
}

#[cfg(test)]
use crate::{Constant, Type};

#[test]
fn capture() -> Result<(), TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let x = Var::binder("x", o.clone());
    let v = Var::new("v", o.clone());

    // (λx.f(x, v))[v := x] must not capture the free x
    let fxv = f.clone().apply([Term::var(x.clone()), Term::var(v.clone())].into())?;
    let tm = Term::abst(x.clone(), fxv)?;
    let mut subst = Subst::new();
    subst.insert(v.into(), Term::var(x.clone()))?;
    let result = tm.substitute(&subst);

    let (y, body) = result.abstraction().expect("abstraction");
    assert_ne!(y, &x);
    assert!(result.free_replaceables().contains(&x.clone().into()));
    assert_eq!(body.arguments()[0], Term::var(y.clone()));
    assert_eq!(body.arguments()[1], Term::var(x));
    Ok(())
}

#[test]
fn partial_instantiation() -> Result<(), TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let b = Term::constant(Constant::new("b", o.clone()));
    let z = MetaVar::new("Z", [o.clone(), o.clone()].into(), o.clone());
    let zab = Term::meta(z.clone(), [a.clone(), b.clone()].into())?;

    // Z := f has no leading abstractions
    let mut subst = Subst::new();
    subst.insert(z.clone().into(), f.clone())?;
    assert_eq!(zab.substitute(&subst), f.clone().apply([a.clone(), b.clone()].into())?);

    // Z := λx.f(x)
    let x = Var::binder("x", o.clone());
    let fx = f.clone().apply([Term::var(x.clone())].into())?;
    subst.insert(z.into(), Term::abst(x, fx)?)?;
    assert_eq!(zab.substitute(&subst), f.apply([a, b].into())?);
    Ok(())
}

#[test]
fn sharing() -> Result<(), TypeError> {
    let o = Type::base("o");
    let x = Var::new("x", o.clone());
    let y = Var::new("y", o.clone());
    let f = Term::constant(Constant::new("f", Type::arrow(o.clone(), o.clone())));
    let fx = f.apply([Term::var(x)].into())?;

    let mut subst = Subst::new();
    subst.insert(y.into(), Term::constant(Constant::new("a", o)))?;
    assert!(fx.substitute(&subst).ptr_eq(&fx));
    Ok(())
}

#[test]
fn display_names() -> Result<(), TypeError> {
    use alloc::string::ToString;
    let o = Type::base("o");
    let (x1, x2) = (Var::new("x", o.clone()), Var::new("x", o.clone()));
    let mut subst = Subst::new();
    subst.insert(x1.clone().into(), Term::var(x2.clone()))?;
    assert_eq!(subst.to_string(), "[x := x__1]");
    subst.insert(x2.into(), Term::var(x1))?;
    assert_eq!(subst.to_string(), "[x := x__1, x__1 := x]");
    Ok(())
}
