//! Syntactic unification.
//!
//! Free variables and meta-variables without arguments are solved;
//! meta-variables applied to arguments are treated as rigid,
//! so unification is incomplete for terms containing them.
//! Heads of applications are compared as curried prefixes,
//! meaning that `X(a)` and `f(b, a)` unify with `X := f(b)`.

use crate::subst::Subst;
use crate::term::{Term, TermKind};
use crate::{Replaceable, Var};
use alloc::{vec, vec::Vec};
use fnv::FnvHashSet;

struct Unifier {
    subst: Subst,
    /// binders introduced to compare bodies of abstractions
    locals: FnvHashSet<Var>,
    /// equations to solve, the last one first
    eqs: Vec<(Term, Term)>,
}

impl Term {
    /// Return a most general substitution that makes both terms alpha-equivalent.
    ///
    /// The substitution is idempotent:
    /// no variable that it maps occurs free in any of its images.
    ///
    /// ~~~
    /// # use cora::{Constant, Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let [a, b] = ["a", "b"].map(|c| Term::constant(Constant::new(c, o.clone())));
    /// let [x, y] = ["X", "Y"].map(|v| Var::new(v, o.clone()));
    ///
    /// let fxa = f.clone().apply([Term::var(x.clone()), a.clone()].into())?;
    /// let fbx = f.clone().apply([b.clone(), Term::var(x.clone())].into())?;
    /// assert!(fxa.unify(&fbx).is_none());
    ///
    /// let fby = f.clone().apply([b.clone(), Term::var(y.clone())].into())?;
    /// let subst = fxa.unify(&fby).unwrap();
    /// assert_eq!(subst.get_var(&x), Some(&b));
    /// assert_eq!(subst.get_var(&y), Some(&a));
    /// assert_eq!(fxa.substitute(&subst), fby.substitute(&subst));
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn unify(&self, other: &Term) -> Option<Subst> {
        debug!("unify {} with {}", self, other);
        let mut unifier = Unifier {
            subst: Subst::new(),
            locals: FnvHashSet::default(),
            eqs: vec![(self.clone(), other.clone())],
        };
        match unifier.solve() {
            Some(()) => {
                debug!("unifier: {}", unifier.subst);
                Some(unifier.subst)
            }
            None => {
                debug!("no unifier");
                None
            }
        }
    }

    /// Return the replaceable if the term consists only of it.
    fn flexible(&self) -> Option<Replaceable> {
        match self.kind() {
            TermKind::Var(x) if !x.is_binder() => Some(x.clone().into()),
            TermKind::Meta(z, args) if args.is_empty() => Some(z.clone().into()),
            _ => None,
        }
    }
}

impl Unifier {
    fn solve(&mut self) -> Option<()> {
        while let Some((s, t)) = self.eqs.pop() {
            let s = s.substitute(&self.subst);
            let t = t.substitute(&self.subst);
            trace!("unify {} =?= {}", s, t);
            if s.ty() != t.ty() {
                trace!("type clash: {} and {}", s.ty(), t.ty());
                return None;
            }
            if s.alpha_equals(&t) {
                continue;
            }
            match (s.flexible(), t.flexible()) {
                (Some(r), _) => self.bind(r, t)?,
                (None, Some(r)) => self.bind(r, s)?,
                (None, None) => self.decompose(&s, &t)?,
            }
        }
        Some(())
    }

    /// Map `r` to `tm` and update existing images containing `r`.
    fn bind(&mut self, r: Replaceable, tm: Term) -> Option<()> {
        if tm.free_replaceables().contains(&r) {
            trace!("occurs check: {} in {}", r, tm);
            return None;
        }
        if let Some(x) = tm.free_vars().find(|x| self.locals.contains(*x)) {
            trace!("bound variable {} would escape via {}", x, r);
            return None;
        }
        trace!("bind {} := {}", r, tm);

        let mut single = Subst::new();
        single.insert_unchecked(r.clone(), tm.clone());
        let updated: Vec<_> = self
            .subst
            .iter()
            .filter(|(_, image)| image.free_replaceables().contains(&r))
            .map(|(k, image)| (k.clone(), image.substitute(&single)))
            .collect();
        for (k, image) in updated {
            self.subst.insert_unchecked(k, image);
        }
        self.subst.insert_unchecked(r, tm);
        Some(())
    }

    /// Replace an equation between two rigid terms by equations between their parts.
    fn decompose(&mut self, s: &Term, t: &Term) -> Option<()> {
        match (s.kind(), t.kind()) {
            (TermKind::Abst(x, bs), TermKind::Abst(y, bt)) => {
                let z = x.fresh_copy();
                let (bs, bt) = (bs.rename_var(x, &z), bt.rename_var(y, &z));
                self.locals.insert(z);
                self.eqs.push((bs, bt));
            }
            (TermKind::Meta(z1, a1), TermKind::Meta(z2, a2)) => {
                if z1 != z2 {
                    trace!("clash: {} and {}", z1, z2);
                    return None;
                }
                self.eqs.extend(a1.iter().cloned().zip(a2.iter().cloned()))
            }
            _ => {
                let (sargs, targs) = (s.arguments(), t.arguments());
                let (n, m) = (sargs.len(), targs.len());
                let k = n.min(m);
                if k == 0 {
                    trace!("clash: {} and {}", s, t);
                    return None;
                }
                self.eqs.push((s.head_prefix(n - k), t.head_prefix(m - k)));
                let pairs = sargs[n - k..].iter().cloned().zip(targs[m - k..].iter().cloned());
                self.eqs.extend(pairs)
            }
        }
        Some(())
    }
}

#[cfg(test)]
use crate::{Constant, MetaVar, Type};

#[test]
fn composition() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let g = Term::constant(Constant::new("g", Type::arrow(o.clone(), o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let x = Var::new("X", o.clone());
    let y = Var::new("Y", o.clone());

    // f(X, Y) =?= f(g(Y), a) yields X := g(a) and Y := a
    let fxy = f.clone().apply([Term::var(x.clone()), Term::var(y.clone())].into())?;
    let gy = g.clone().apply([Term::var(y.clone())].into())?;
    let fgya = f.apply([gy, a.clone()].into())?;
    let subst = fxy.unify(&fgya).expect("unifiable");
    assert_eq!(subst.get_var(&y), Some(&a));
    assert_eq!(subst.get_var(&x), Some(&g.clone().apply([a.clone()].into())?));
    assert_eq!(fxy.substitute(&subst), fgya.substitute(&subst));

    // X =?= g(X) fails the occurs check
    let gx = g.apply([Term::var(x.clone())].into())?;
    assert!(Term::var(x).unify(&gx).is_none());
    Ok(())
}

#[test]
fn binders() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let x = Var::new("X", o.clone());
    let (u, w) = (Var::binder("u", o.clone()), Var::binder("w", o.clone()));

    // λu.f(u, X) =?= λw.f(w, a)
    let l = Term::abst(u.clone(), f.clone().apply([Term::var(u.clone()), Term::var(x.clone())].into())?)?;
    let r = Term::abst(w.clone(), f.clone().apply([Term::var(w.clone()), a.clone()].into())?)?;
    let subst = l.unify(&r).expect("unifiable");
    assert_eq!(subst.get_var(&x), Some(&a));
    assert!(l.substitute(&subst).alpha_equals(&r.substitute(&subst)));

    // λu.X =?= λw.w fails, because w would escape
    let l = Term::abst(u, Term::var(x))?;
    let r = Term::abst(w.clone(), Term::var(w))?;
    assert!(l.unify(&r).is_none());
    Ok(())
}

#[test]
fn curried_heads() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let oo = Type::arrow(o.clone(), o.clone());
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let [a, b] = ["a", "b"].map(|c| Term::constant(Constant::new(c, o.clone())));
    let h = Var::new("H", oo.clone());
    let z = MetaVar::new("Z", Vec::new(), oo);

    // H(a) =?= f(b, a) yields H := f(b)
    let ha = Term::var(h.clone()).apply([a.clone()].into())?;
    let fba = f.clone().apply([b.clone(), a.clone()].into())?;
    let subst = ha.unify(&fba).expect("unifiable");
    assert_eq!(subst.get_var(&h), Some(&f.clone().apply([b.clone()].into())?));

    // Z(a) =?= f(b, a) yields Z := f(b)
    let za = Term::meta(z.clone(), Vec::new())?.apply([a].into())?;
    let subst = za.unify(&fba).expect("unifiable");
    assert_eq!(subst.get_meta(&z), Some(&f.apply([b].into())?));
    Ok(())
}
