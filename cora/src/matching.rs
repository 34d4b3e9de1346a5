//! One-directional matching of higher-order patterns.

use crate::error::PatternRequired;
use crate::stack::Stack;
use crate::subst::Subst;
use crate::term::{Term, TermKind};
use crate::{MetaVar, Replaceable, Var};
use alloc::{format, string::String, vec::Vec};
use core::fmt::{self, Display};

/// Result of matching a pattern against an object.
#[derive(Clone, Debug)]
pub enum MatchOutcome<T = Subst> {
    Success(T),
    /// the pattern does not match, for the given reason
    Failure(String),
}

impl<T> MatchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Return the result of a successful match.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(x) => Some(x),
            Self::Failure(_) => None,
        }
    }
}

impl<T: Display> Display for MatchOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Success(x) => x.fmt(f),
            Self::Failure(reason) => write!(f, "no match: {}", reason),
        }
    }
}

enum MatchError {
    Mismatch(String),
    Pattern(PatternRequired),
}

impl From<PatternRequired> for MatchError {
    fn from(err: PatternRequired) -> Self {
        Self::Pattern(err)
    }
}

fn mismatch<T>(reason: String) -> Result<T, MatchError> {
    Err(MatchError::Mismatch(reason))
}

fn required(tm: &Term, reason: String) -> MatchError {
    let term = tm.clone();
    MatchError::Pattern(PatternRequired { term, reason })
}

struct Matcher<'a> {
    subst: &'a mut Subst,
    /// binders of the object that enclose the current subterm
    scope: Stack<Var>,
}

impl Term {
    /// Extend `subst` such that the pattern instantiated by `subst` equals `object`.
    ///
    /// Variables of the pattern that are already mapped by `subst`
    /// must be mapped to terms alpha-equivalent to
    /// the corresponding subterms of `object`.
    /// On failure, `subst` may contain mappings made before the failure was detected.
    ///
    /// A meta-application in the pattern must be applied to
    /// distinct binder variables; otherwise, a [`PatternRequired`] error is returned.
    pub fn match_with(
        &self,
        object: &Term,
        subst: &mut Subst,
    ) -> Result<MatchOutcome<()>, PatternRequired> {
        debug!("match {} with {}", self, object);
        if let Some(tm) = self.non_pattern() {
            let reason = "meta-variable must be applied to distinct binder variables".into();
            let term = tm.clone();
            return Err(PatternRequired { term, reason });
        }
        let mut matcher = Matcher {
            subst,
            scope: Stack::new(),
        };
        match matcher.matches(self, object) {
            Ok(()) => Ok(MatchOutcome::Success(())),
            Err(MatchError::Mismatch(reason)) => {
                debug!("no match: {}", reason);
                Ok(MatchOutcome::Failure(reason))
            }
            Err(MatchError::Pattern(e)) => Err(e),
        }
    }

    /// Return a substitution that instantiates the pattern to `object`.
    ///
    /// ~~~
    /// # use cora::{Constant, MatchOutcome, PatternRequired, Term, Type, Var};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let [a, b] = ["a", "b"].map(|c| Term::constant(Constant::new(c, o.clone())));
    /// let x = Var::new("X", o.clone());
    /// let pat = f.clone().apply([Term::var(x.clone()), a.clone()].into()).unwrap();
    ///
    /// let obj = f.clone().apply([b.clone(), a.clone()].into()).unwrap();
    /// let subst = pat.match_term(&obj)?.ok().unwrap();
    /// assert_eq!(subst.get_var(&x), Some(&b));
    ///
    /// let obj = f.apply([a, b].into()).unwrap();
    /// assert!(matches!(pat.match_term(&obj)?, MatchOutcome::Failure(_)));
    /// # Ok::<_, PatternRequired>(())
    /// ~~~
    pub fn match_term(&self, object: &Term) -> Result<MatchOutcome, PatternRequired> {
        let mut subst = Subst::new();
        Ok(match self.match_with(object, &mut subst)? {
            MatchOutcome::Success(()) => MatchOutcome::Success(subst),
            MatchOutcome::Failure(reason) => MatchOutcome::Failure(reason),
        })
    }
}

impl<'a> Matcher<'a> {
    fn matches(&mut self, pat: &Term, obj: &Term) -> Result<(), MatchError> {
        trace!("match {} with {}", pat, obj);
        if pat.ty() != obj.ty() {
            let (pty, oty) = (pat.ty(), obj.ty());
            return mismatch(format!("{} : {} and {} : {} differ in type", pat, pty, obj, oty));
        }
        match pat.kind() {
            TermKind::Value(_) | TermKind::Const(_) => {
                if pat == obj {
                    Ok(())
                } else {
                    mismatch(format!("{} differs from {}", pat, obj))
                }
            }
            TermKind::Var(x) => self.matches_var(x, obj),
            TermKind::Abst(x, body) => match obj.kind() {
                TermKind::Abst(y, obody) => {
                    let key = Replaceable::Var(x.clone());
                    let prev = self.subst.insert_unchecked(key.clone(), Term::var(y.clone()));
                    self.scope.push(y.clone());
                    let result = self.matches(body, obody);
                    self.scope.pop();
                    match prev {
                        Some(prev) => self.subst.insert_unchecked(key, prev),
                        None => self.subst.remove(&key),
                    };
                    result
                }
                _ => mismatch(format!("{} is not an abstraction", obj)),
            },
            TermKind::Appl(head, args) => {
                let oargs = obj.arguments();
                let (n, m) = (args.len(), oargs.len());
                if m < n {
                    return mismatch(format!("{} has fewer than {} arguments", obj, n));
                }
                // later arguments are matched first
                for (p, o) in args.iter().zip(&oargs[m - n..]).rev() {
                    self.matches(p, o)?
                }
                self.matches(head, &obj.head_prefix(m - n))
            }
            TermKind::Meta(z, args) => self.matches_meta(pat, z, args, obj),
        }
    }

    fn matches_var(&mut self, x: &Var, obj: &Term) -> Result<(), MatchError> {
        if let Some(image) = self.subst.get_var(x) {
            return if image.alpha_equals(obj) {
                Ok(())
            } else {
                mismatch(format!("{} is mapped to {}, which differs from {}", x, image, obj))
            };
        }
        if x.is_binder() {
            return match obj.kind() {
                TermKind::Var(y) if x == y => Ok(()),
                _ => mismatch(format!("unbound binder {} differs from {}", x, obj)),
            };
        }
        if let Some(y) = obj.free_vars().find(|y| self.scope.contains(y)) {
            return mismatch(format!("{} cannot be mapped to {}, where {} is bound", x, obj, y));
        }
        self.subst.insert_unchecked(x.clone().into(), obj.clone());
        Ok(())
    }

    fn matches_meta(
        &mut self,
        pat: &Term,
        z: &MetaVar,
        args: &[Term],
        obj: &Term,
    ) -> Result<(), MatchError> {
        // binders of the object that the arguments stand for
        let mut images: Vec<Var> = Vec::with_capacity(args.len());
        for arg in args {
            let x = match arg.kind() {
                TermKind::Var(x) if x.is_binder() => x,
                _ => return Err(required(pat, format!("{} is not a binder variable", arg))),
            };
            let y = match self.subst.get_var(x) {
                None => x.clone(),
                Some(image) => match image.kind() {
                    TermKind::Var(y) if y.is_binder() => y.clone(),
                    _ => {
                        let reason = format!("{} is mapped to non-binder {}", x, image);
                        return Err(required(pat, reason));
                    }
                },
            };
            if images.contains(&y) {
                return Err(required(pat, format!("{} occurs twice as argument", y)));
            }
            images.push(y);
        }

        let dangling = obj.free_vars().find(|y| y.is_binder() && !images.contains(y));
        if let Some(y) = dangling {
            let reason = format!("{} occurs in {}, but is not an argument of {}", y, obj, z);
            if self.scope.contains(y) {
                return mismatch(reason);
            } else if !args.is_empty() {
                return Err(required(pat, reason));
            }
        }

        let body = images
            .into_iter()
            .rev()
            .fold(obj.clone(), |body, y| Term::mk_abst(y, body));
        let key = Replaceable::Meta(z.clone());
        if let Some(prev) = self.subst.get(&key) {
            return if prev.alpha_equals(&body) {
                Ok(())
            } else {
                mismatch(format!("{} is mapped to {}, which differs from {}", z, prev, body))
            };
        }
        self.subst.insert_unchecked(key, body);
        Ok(())
    }
}

#[cfg(test)]
use crate::{Constant, Type};

#[cfg(test)]
fn signature() -> (Type, Term, Term, Term) {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let b = Term::constant(Constant::new("b", o.clone()));
    (o, f, a, b)
}

#[test]
fn nonlinear() -> Result<(), crate::Error> {
    let (o, f, a, b) = signature();
    let x = Var::new("X", o);
    let fxx = f.clone().apply([Term::var(x.clone()), Term::var(x.clone())].into())?;

    let faa = f.clone().apply([a.clone(), a.clone()].into())?;
    let subst = fxx.match_term(&faa)?.ok();
    assert_eq!(subst.map(|s| s.len()), Some(1));

    let fab = f.apply([a, b].into())?;
    assert!(!fxx.match_term(&fab)?.is_success());
    Ok(())
}

#[test]
fn escape() -> Result<(), crate::Error> {
    let (o, f, a, _) = signature();
    let x = Var::new("X", o.clone());
    let y = Var::binder("y", o.clone());
    let w = Var::binder("w", o.clone());

    // λw.X does not match λy.y, because y would escape its scope
    let pat = Term::abst(w.clone(), Term::var(x.clone()))?;
    let obj = Term::abst(y.clone(), Term::var(y.clone()))?;
    assert!(!pat.match_term(&obj)?.is_success());

    // λw.f(w, X) matches λy.f(y, a)
    let pat = Term::abst(w.clone(), f.clone().apply([Term::var(w), Term::var(x.clone())].into())?)?;
    let obj = Term::abst(y.clone(), f.apply([Term::var(y), a.clone()].into())?)?;
    let mut subst = Subst::new();
    assert!(pat.match_with(&obj, &mut subst)?.is_success());
    assert_eq!(subst.len(), 1);
    assert_eq!(subst.get_var(&x), Some(&a));
    Ok(())
}

#[test]
fn meta_consistency() -> Result<(), crate::Error> {
    let (o, f, a, b) = signature();
    let z = MetaVar::new("Z", Vec::new(), o.clone());
    let zt = Term::meta(z.clone(), Vec::new())?;
    let fzz = f.clone().apply([zt.clone(), zt].into())?;

    let faa = f.clone().apply([a.clone(), a.clone()].into())?;
    let subst = fzz.match_term(&faa)?.ok();
    assert_eq!(subst.and_then(|s| s.get_meta(&z).cloned()), Some(a.clone()));

    let fab = f.apply([a, b].into())?;
    match fzz.match_term(&fab)? {
        MatchOutcome::Failure(reason) => assert!(reason.contains('Z')),
        MatchOutcome::Success(s) => panic!("unexpected match {}", s),
    }
    Ok(())
}

#[test]
fn non_pattern() -> Result<(), crate::Error> {
    let (o, _, a, _) = signature();
    let z = MetaVar::new("Z", [o.clone()].into(), o.clone());
    let za = Term::meta(z, [a.clone()].into())?;
    assert!(!za.is_pattern());
    assert!(za.match_term(&a).is_err());
    Ok(())
}
