//! Equality of terms modulo renaming of bound variables.

use crate::term::{Term, TermKind};
use crate::Var;
use fnv::FnvHashMap;

/// Depth at which each binder in scope was bound.
type Depths = FnvHashMap<Var, usize>;

impl Term {
    /// Return true if the terms are equal up to consistent renaming of bound variables.
    ///
    /// Free variables are compared by identity.
    ///
    /// ~~~
    /// # use cora::{Constant, Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let (x, y) = (Var::binder("x", o.clone()), Var::binder("y", o.clone()));
    /// let v = Var::new("v", o.clone());
    /// let fxv = f.clone().apply([Term::var(x.clone()), Term::var(v.clone())].into())?;
    /// let fyv = f.clone().apply([Term::var(y.clone()), Term::var(v.clone())].into())?;
    /// let fvy = f.apply([Term::var(v), Term::var(y.clone())].into())?;
    /// assert!(Term::abst(x.clone(), fxv)?.alpha_equals(&Term::abst(y.clone(), fyv)?));
    /// assert!(!Term::abst(x.clone(), fvy.clone())?.alpha_equals(&Term::abst(y, fvy)?));
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn alpha_equals(&self, other: &Self) -> bool {
        self.alpha_eq(other, &mut Depths::default(), &mut Depths::default(), 0)
    }

    fn alpha_eq(&self, other: &Self, mu: &mut Depths, xi: &mut Depths, depth: usize) -> bool {
        // without binders in scope, shared terms are trivially equal
        if mu.is_empty() && xi.is_empty() && self.ptr_eq(other) {
            return true;
        }
        if self.ty() != other.ty() {
            return false;
        }
        match (self.kind(), other.kind()) {
            (TermKind::Value(v1), TermKind::Value(v2)) => v1 == v2,
            (TermKind::Const(c1), TermKind::Const(c2)) => c1 == c2,
            (TermKind::Var(x), TermKind::Var(y)) => match (mu.get(x), xi.get(y)) {
                (Some(dx), Some(dy)) => dx == dy,
                (None, None) => x == y,
                _ => false,
            },
            (TermKind::Abst(x, s), TermKind::Abst(y, t)) => {
                trace!("alpha: enter λ{} / λ{} at depth {}", x, y, depth);
                let px = mu.insert(x.clone(), depth);
                let py = xi.insert(y.clone(), depth);
                let eq = s.alpha_eq(t, mu, xi, depth + 1);
                restore(mu, x, px);
                restore(xi, y, py);
                eq
            }
            (TermKind::Appl(h1, a1), TermKind::Appl(h2, a2)) => {
                a1.len() == a2.len()
                    && h1.alpha_eq(h2, mu, xi, depth)
                    && a1.iter().zip(a2).all(|(s, t)| s.alpha_eq(t, mu, xi, depth))
            }
            (TermKind::Meta(z1, a1), TermKind::Meta(z2, a2)) => {
                z1 == z2 && a1.iter().zip(a2).all(|(s, t)| s.alpha_eq(t, mu, xi, depth))
            }
            _ => false,
        }
    }
}

fn restore(map: &mut Depths, x: &Var, prev: Option<usize>) {
    match prev {
        Some(d) => map.insert(x.clone(), d),
        None => map.remove(x),
    };
}

#[cfg(test)]
use crate::{Constant, Type};

#[test]
fn shadowing() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let oo = Type::arrow(o.clone(), o.clone());
    let k = |x: &Var, y: &Var, body: &Var| {
        let inner = Term::abst(y.clone(), Term::var(body.clone()))?;
        Term::abst(x.clone(), inner)
    };
    let (x, y) = (Var::binder("x", o.clone()), Var::binder("y", o.clone()));
    let (u, w) = (Var::binder("u", o.clone()), Var::binder("w", o.clone()));

    // λx.λy.x and λu.λw.u are equal, λu.λw.w is not
    let kx = k(&x, &y, &x)?;
    assert_eq!(kx.ty(), &Type::arrow(o.clone(), oo));
    assert!(kx.alpha_equals(&k(&u, &w, &u)?));
    assert!(!kx.alpha_equals(&k(&u, &w, &w)?));

    // a bound variable is never equal to a free one
    let xx = Term::abst(x.clone(), Term::var(x.clone()))?;
    let xu = Term::abst(x.clone(), Term::var(u.clone()))?;
    assert!(!xx.alpha_equals(&xu));
    assert!(xu.alpha_equals(&xu.clone()));

    // types of binders matter
    let a = Type::base("a");
    let c = Term::constant(Constant::new("c", o.clone()));
    let xa = Var::binder("x", a);
    assert!(!Term::abst(x, c.clone())?.alpha_equals(&Term::abst(xa, c)?));
    Ok(())
}
