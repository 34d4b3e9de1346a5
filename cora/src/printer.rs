//! Printing of terms.
//!
//! Variables are printed by their names.
//! Because names are not unique, distinct variables of the same name
//! occurring in one printed term are told apart by suffixes `__1`, `__2`, ….

use crate::term::{Term, TermKind};
use alloc::{format, string::String, vec::Vec};
use core::fmt::{self, Display};
use fnv::{FnvHashMap, FnvHashSet};

/// Printed names of variables and meta-variables, indexed by identifier.
///
/// Names of constants are never given to variables.
pub(crate) struct Names(FnvHashMap<u64, String>);

impl Names {
    fn new(tm: &Term) -> Self {
        Self::with(core::iter::empty(), [tm])
    }

    /// Assign names to the given replaceables first, then to those in the terms.
    pub(crate) fn with<'a, K, T>(keys: K, terms: T) -> Self
    where
        K: IntoIterator<Item = (u64, &'a str)>,
        T: IntoIterator<Item = &'a Term>,
    {
        let mut order = Vec::new();
        let mut seen = FnvHashSet::default();
        let mut consts = FnvHashSet::default();
        keys.into_iter()
            .for_each(|(id, name)| visit(&mut seen, &mut order, id, name));
        for tm in terms {
            tm.collect_names(&mut seen, &mut order, &mut consts);
        }

        let mut taken: FnvHashSet<String> = consts.into_iter().map(String::from).collect();
        let mut names = FnvHashMap::default();
        for (id, name) in order {
            let mut candidate = String::from(name);
            let mut i = 0;
            while taken.contains(&candidate) {
                i += 1;
                candidate = format!("{}__{}", name, i);
            }
            taken.insert(candidate.clone());
            names.insert(id, candidate);
        }
        Self(names)
    }

    pub(crate) fn get<'a>(&'a self, id: u64, default: &'a str) -> &'a str {
        self.0.get(&id).map_or(default, |s| s.as_str())
    }
}

impl Term {
    /// Record variables and meta-variables in order of first occurrence,
    /// as well as the names of constants.
    fn collect_names<'a>(
        &'a self,
        seen: &mut FnvHashSet<u64>,
        order: &mut Vec<(u64, &'a str)>,
        consts: &mut FnvHashSet<&'a str>,
    ) {
        match self.kind() {
            TermKind::Value(_) => (),
            TermKind::Const(c) => {
                consts.insert(c.name());
            }
            TermKind::Var(x) => visit(seen, order, x.id(), x.name()),
            TermKind::Abst(x, body) => {
                visit(seen, order, x.id(), x.name());
                body.collect_names(seen, order, consts)
            }
            TermKind::Appl(head, args) => {
                head.collect_names(seen, order, consts);
                args.iter().for_each(|a| a.collect_names(seen, order, consts))
            }
            TermKind::Meta(z, args) => {
                visit(seen, order, z.id(), z.name());
                args.iter().for_each(|a| a.collect_names(seen, order, consts))
            }
        }
    }

    /// Print the term with names given by a table that covers it.
    pub(crate) fn fmt_names(&self, names: &Names, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_prec(names, 0, f)
    }

    /// Return the precedence of the infix operator if the term is printed as `l op r`.
    fn infix(&self) -> Option<u8> {
        match self.kind() {
            TermKind::Appl(_, args) if args.len() == 2 => self.root()?.infix(),
            _ => None,
        }
    }

    /// Print the term in a context of the given precedence.
    ///
    /// Abstractions and infix terms binding weaker than the context are parenthesised.
    fn fmt_prec(&self, names: &Names, prec: u8, f: &mut fmt::Formatter) -> fmt::Result {
        let parens = match (self.kind(), self.infix()) {
            (TermKind::Abst(..), _) => prec > 0,
            (_, Some(p)) => p < prec,
            _ => false,
        };
        if parens {
            write!(f, "(")?;
        }
        match self.kind() {
            TermKind::Value(v) => v.fmt(f)?,
            TermKind::Const(c) => c.fmt(f)?,
            TermKind::Var(x) => names.get(x.id(), x.name()).fmt(f)?,
            TermKind::Abst(x, body) => {
                write!(f, "λ{}.", names.get(x.id(), x.name()))?;
                body.fmt_prec(names, 0, f)?
            }
            TermKind::Appl(head, args) => match (self.infix(), args.as_slice()) {
                (Some(p), [l, r]) => {
                    l.fmt_prec(names, p, f)?;
                    write!(f, " {} ", head)?;
                    r.fmt_prec(names, p + 1, f)?
                }
                _ => {
                    // the head of a beta-redex needs parentheses
                    head.fmt_prec(names, 1, f)?;
                    format_args(names, "(", args, ")", f)?
                }
            },
            TermKind::Meta(z, args) => {
                names.get(z.id(), z.name()).fmt(f)?;
                if !args.is_empty() {
                    format_args(names, "[", args, "]", f)?
                }
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn visit<'a>(seen: &mut FnvHashSet<u64>, order: &mut Vec<(u64, &'a str)>, id: u64, name: &'a str) {
    if seen.insert(id) {
        order.push((id, name))
    }
}

fn format_args(
    names: &Names,
    open: &str,
    args: &[Term],
    close: &str,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    write!(f, "{}", open)?;
    let mut iter = args.iter();
    if let Some(first) = iter.next() {
        first.fmt_prec(names, 0, f)?;
    }
    for arg in iter {
        write!(f, ", ")?;
        arg.fmt_prec(names, 0, f)?;
    }
    write!(f, "{}", close)
}

/// Print a term.
///
/// ~~~
/// # use cora::{Constant, Term, Type, TypeError, Var};
/// let o = Type::base("o");
/// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
/// let x1 = Var::binder("x", o.clone());
/// let x2 = Var::new("x", o.clone());
/// let fx = f.apply([Term::var(x1.clone()), Term::var(x2)].into())?;
/// assert_eq!(Term::abst(x1, fx)?.to_string(), "λx.f(x, x__1)");
/// # Ok::<_, TypeError>(())
/// ~~~
impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_prec(&Names::new(self), 0, f)
    }
}

#[cfg(test)]
use crate::{theory, Constant, MetaVar, Type, Value, Var};
#[cfg(test)]
use alloc::string::ToString;

#[test]
fn shapes() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let oo = Type::arrow(o.clone(), o.clone());
    let a = Term::constant(Constant::new("a", o.clone()));
    let x = Var::binder("x", o.clone());
    let id = Term::abst(x.clone(), Term::var(x))?;
    let z = MetaVar::new("Z", [o.clone(), o.clone()].into(), o.clone());
    let y = MetaVar::new("Y", Vec::new(), oo);

    assert_eq!(id.to_string(), "λx.x");
    assert_eq!(id.clone().apply([a.clone()].into())?.to_string(), "(λx.x)(a)");
    let za = Term::meta(z, [a.clone(), a.clone()].into())?;
    assert_eq!(za.to_string(), "Z[a, a]");
    let ya = Term::meta(y, Vec::new())?.apply([a].into())?;
    assert_eq!(ya.to_string(), "Y(a)");
    assert_eq!(Term::value(Value::Str("s".into())).to_string(), "\"s\"");
    Ok(())
}

#[test]
fn infix() -> Result<(), crate::TypeError> {
    let int = |i| Term::value(Value::Int(i));
    let op = |c: Constant, l: Term, r: Term| Term::constant(c).apply([l, r].into());
    let sum = op(theory::plus(), int(1), int(2))?;
    let prod = op(theory::times(), sum.clone(), int(3))?;
    assert_eq!(prod.to_string(), "(1 + 2) * 3");
    let prod = op(theory::times(), int(3), int(4))?;
    assert_eq!(op(theory::plus(), int(1), prod)?.to_string(), "1 + 3 * 4");
    let diff = op(theory::minus(), int(1), sum)?;
    assert_eq!(diff.to_string(), "1 - (1 + 2)");
    Ok(())
}

#[test]
fn constant_names() -> Result<(), crate::TypeError> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let va = Term::var(Var::new("a", o.clone()));
    let fava = f.clone().apply([a, va.clone()].into())?;
    assert_eq!(fava.to_string(), "f(a, a__1)");
    // the variable keeps its name when no constant takes it
    assert_eq!(f.apply([va.clone(), va].into())?.to_string(), "f(a, a)");
    Ok(())
}
