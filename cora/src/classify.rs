//! Structural classification of terms.

use crate::term::{Term, TermKind};
use alloc::vec::Vec;

impl Term {
    pub fn is_value(&self) -> bool {
        matches!(self.kind(), TermKind::Value(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind(), TermKind::Const(_))
    }

    /// Return true if the term is an unapplied (free or binder) variable.
    pub fn is_variable(&self) -> bool {
        matches!(self.kind(), TermKind::Var(_))
    }

    pub fn is_abstraction(&self) -> bool {
        matches!(self.kind(), TermKind::Abst(..))
    }

    pub fn is_application(&self) -> bool {
        matches!(self.kind(), TermKind::Appl(..))
    }

    /// Return true if the term is `Z⟨t1, …, tk⟩` (not applied to further arguments).
    pub fn is_meta_application(&self) -> bool {
        matches!(self.kind(), TermKind::Meta(..))
    }

    /// Return true if the term is a variable or a variable applied to arguments.
    pub fn is_var_term(&self) -> bool {
        self.head_var().is_some()
    }

    /// Return true if the term is a constant or a constant applied to arguments.
    pub fn is_functional_term(&self) -> bool {
        self.root().is_some()
    }

    /// Return true if the term is `(λx.s)(t1, …, tn)`.
    pub fn is_beta_redex(&self) -> bool {
        self.is_application() && self.head().is_abstraction()
    }

    /// Return true if the term contains no variables or meta-variables, bound or free.
    pub fn is_ground(&self) -> bool {
        self.free_replaceables().is_empty() && self.bound_vars().is_empty()
    }

    /// Return true if the term contains no free variables or meta-variables.
    pub fn is_closed(&self) -> bool {
        self.free_replaceables().is_empty()
    }

    /// Return true if the term has a base type and
    /// consists only of values, variables and meta-variables of base type, and
    /// constants whose arguments all have base type.
    ///
    /// In particular, a first-order term contains
    /// no abstractions and no applied variables.
    pub fn is_first_order(&self) -> bool {
        self.ty().is_base() && self.is_first_order_rec()
    }

    fn is_first_order_rec(&self) -> bool {
        match self.kind() {
            TermKind::Value(_) | TermKind::Var(_) => true,
            TermKind::Const(c) => c.ty().order() <= 1,
            TermKind::Abst(..) => false,
            TermKind::Meta(z, _) => z.arity() == 0,
            TermKind::Appl(head, args) => {
                head.is_constant()
                    && head.is_first_order_rec()
                    && args.iter().all(|a| a.is_first_order())
            }
        }
    }

    /// Return true if every meta-variable in the term is applied to
    /// pairwise distinct binder variables.
    ///
    /// This is the higher-order pattern restriction that
    /// [matching](Term::match_term) relies on.
    /// Free variables may be applied to arbitrary arguments.
    pub fn is_pattern(&self) -> bool {
        self.non_pattern().is_none()
    }

    /// Return the first meta-application that violates the pattern restriction.
    pub(crate) fn non_pattern(&self) -> Option<&Term> {
        match self.kind() {
            TermKind::Value(_) | TermKind::Const(_) | TermKind::Var(_) => None,
            TermKind::Abst(_, body) => body.non_pattern(),
            TermKind::Appl(head, args) => head
                .non_pattern()
                .or_else(|| args.iter().find_map(Self::non_pattern)),
            TermKind::Meta(_, args) => {
                let mut seen = Vec::with_capacity(args.len());
                let distinct = args.iter().all(|arg| match arg.kind() {
                    TermKind::Var(x) if x.is_binder() && !seen.contains(&x) => {
                        seen.push(x);
                        true
                    }
                    _ => false,
                });
                if distinct {
                    None
                } else {
                    Some(self)
                }
            }
        }
    }

    /// Return true if the term contains
    /// no abstractions and no meta-variables applied to arguments.
    ///
    /// Such terms can be read as terms of an applicative (curried) system.
    pub fn is_applicative(&self) -> bool {
        match self.kind() {
            TermKind::Value(_) | TermKind::Const(_) | TermKind::Var(_) => true,
            TermKind::Abst(..) => false,
            TermKind::Meta(z, _) => z.arity() == 0,
            TermKind::Appl(head, args) => {
                head.is_applicative() && args.iter().all(Self::is_applicative)
            }
        }
    }
}

#[cfg(test)]
use crate::{Constant, MetaVar, Type, TypeError, Var};

#[test]
fn first_order_and_applicative() -> Result<(), TypeError> {
    let o = Type::base("o");
    let oo = Type::arrow(o.clone(), o.clone());
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let xv = Term::var(Var::new("X", o.clone()));
    let h = Term::var(Var::new("H", oo));

    let fxa = f.apply([xv.clone(), a.clone()].into())?;
    assert!(fxa.is_first_order() && fxa.is_applicative() && fxa.is_pattern());

    let ha = h.apply([a.clone()].into())?;
    assert!(ha.is_applicative() && !ha.is_first_order());

    let lam = Term::abst(Var::binder("x", o.clone()), a.clone())?;
    assert!(!lam.is_first_order() && !lam.is_applicative());

    let z0 = Term::meta(MetaVar::new("Z", Vec::new(), o.clone()), Vec::new())?;
    assert!(z0.is_first_order() && z0.is_applicative());
    let z1 = Term::meta(MetaVar::new("Z", [o.clone()].into(), o.clone()), [a].into())?;
    assert!(!z1.is_pattern() && !z1.is_applicative() && !z1.is_first_order());
    Ok(())
}

#[test]
fn patterns() -> Result<(), TypeError> {
    let o = Type::base("o");
    let z = MetaVar::new("Z", [o.clone(), o.clone()].into(), o.clone());
    let x = Term::var(Var::binder("x", o.clone()));
    let y = Term::var(Var::binder("y", o.clone()));
    let free = Term::var(Var::new("v", o));

    assert!(Term::meta(z.clone(), [x.clone(), y].into())?.is_pattern());
    assert!(!Term::meta(z.clone(), [x.clone(), x.clone()].into())?.is_pattern());
    assert!(!Term::meta(z, [x, free].into())?.is_pattern());
    Ok(())
}

#[test]
fn heads_and_closedness() -> Result<(), TypeError> {
    let o = Type::base("o");
    let g = Term::constant(Constant::new("g", Type::arrow(o.clone(), o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let x = Var::binder("x", o.clone());
    let id = Term::abst(x.clone(), Term::var(x))?;
    let h = Term::var(Var::new("H", Type::arrow(o.clone(), o.clone())));
    let xv = Term::var(Var::new("X", o));

    let redex = id.clone().apply([a.clone()].into())?;
    assert!(redex.is_beta_redex() && !redex.is_functional_term());
    assert!(!g.clone().apply([a.clone()].into())?.is_beta_redex());

    assert!(xv.is_var_term() && h.clone().apply([a.clone()].into())?.is_var_term());
    assert!(!g.clone().apply([xv.clone()].into())?.is_var_term());

    let ga = g.clone().apply([a].into())?;
    assert!(ga.is_ground() && ga.is_closed() && ga.is_functional_term());
    let gx = g.apply([xv].into())?;
    assert!(!gx.is_ground() && !gx.is_closed());
    assert!(id.is_closed() && !id.is_ground());
    Ok(())
}
