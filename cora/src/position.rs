//! Positions of subterms and head subterms.
//!
//! A position is a sequence of steps, printed as `1.2.ε`:
//!
//! * `i` (starting from 1) selects the `i`-th argument of an application,
//! * `0` selects the body of an abstraction, and
//! * `!i` selects the `i`-th argument of a meta-application.
//!
//! If the head of an application is an abstraction or a meta-application,
//! the steps `0` and `!i` select inside the head.
//!
//! A [`HeadPosition`] additionally addresses a prefix `h(s1, …, si)` of
//! an application by the number of arguments chopped off the end.

use crate::error::{Error, IndexError, TypeError};
use crate::term::{Term, TermKind};
use crate::Type;
use alloc::{string::String, string::ToString, vec::Vec};
use core::fmt::{self, Display};
use core::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// argument of an application (starting from 1)
    Arg(usize),
    /// body of an abstraction
    Lambda,
    /// argument of a meta-application (starting from 1)
    Meta(usize),
}

/// Path from the root of a term to one of its subterms.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(Vec<Step>);

/// Position of a subterm together with the number of its arguments to disregard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeadPosition {
    pub pos: Position,
    pub chop: usize,
}

impl Position {
    /// Return the position of the whole term.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Step>> for Position {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Arg(i) => write!(f, "{}.", i),
            Self::Lambda => write!(f, "0."),
            Self::Meta(i) => write!(f, "!{}.", i),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iter().try_for_each(|step| step.fmt(f))?;
        write!(f, "ε")
    }
}

impl Display for HeadPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.chop == 0 {
            return self.pos.fmt(f);
        }
        self.pos.0.iter().try_for_each(|step| step.fmt(f))?;
        write!(f, "☆{}", self.chop)
    }
}

/// Malformed textual position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid position: {}", self.0)
    }
}

fn parse_steps(s: &str) -> Result<Vec<Step>, ParsePositionError> {
    let err = || ParsePositionError(s.into());
    let index = |i: &str| match i.parse::<usize>() {
        Ok(i) if i > 0 => Ok(i),
        _ => Err(err()),
    };
    s.split('.')
        .filter(|part| !part.is_empty())
        .map(|part| match part {
            "0" => Ok(Step::Lambda),
            _ => match part.strip_prefix('!') {
                Some(i) => index(i).map(Step::Meta),
                None => index(part).map(Step::Arg),
            },
        })
        .collect()
}

/// Parse a position such as `1.0.!2.ε`.
///
/// ~~~
/// # use cora::{Position, Step};
/// let pos: Position = "1.0.!2.ε".parse().unwrap();
/// assert_eq!(pos.steps(), [Step::Arg(1), Step::Lambda, Step::Meta(2)]);
/// assert_eq!(pos.to_string(), "1.0.!2.ε");
/// assert!("ε".parse::<Position>().unwrap().is_root());
/// assert!("1.x.ε".parse::<Position>().is_err());
/// ~~~
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix('ε') {
            Some(steps) => parse_steps(steps).map(Self),
            None => Err(ParsePositionError(s.into())),
        }
    }
}

impl FromStr for HeadPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('☆') {
            Some((steps, chop)) => {
                let chop = chop.parse().map_err(|_| ParsePositionError(s.into()))?;
                let pos = Position(parse_steps(steps)?);
                Ok(Self { pos, chop })
            }
            None => Ok(Self {
                pos: s.parse()?,
                chop: 0,
            }),
        }
    }
}

impl Term {
    fn step(&self, step: Step) -> Option<&Term> {
        match step {
            Step::Arg(i) => self.arguments().get(i.checked_sub(1)?),
            Step::Lambda => self.head().abstraction().map(|(_, body)| body),
            Step::Meta(i) => self.meta_arguments().get(i.checked_sub(1)?),
        }
    }

    /// Return all positions of the term.
    ///
    /// Positions are listed from left to right,
    /// every position after the positions inside it.
    /// The last position is therefore the root.
    ///
    /// ~~~
    /// # use cora::{Constant, Term, Type, TypeError, Var};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let a = Term::constant(Constant::new("a", o.clone()));
    /// let x = Var::binder("x", o.clone());
    /// let fxa = f.apply([Term::var(x.clone()), a].into())?;
    /// let tm = Term::abst(x, fxa)?;
    /// let pos: Vec<_> = tm.positions().iter().map(|p| p.to_string()).collect();
    /// assert_eq!(pos, ["0.1.ε", "0.2.ε", "0.ε", "ε"]);
    /// # Ok::<_, TypeError>(())
    /// ~~~
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::new();
        self.collect_positions(&mut Vec::new(), &mut out);
        out
    }

    fn collect_positions(&self, prefix: &mut Vec<Step>, out: &mut Vec<Position>) {
        self.inner_head_steps(prefix, &mut |tm, prefix| tm.collect_positions(prefix, out));
        for (i, arg) in self.arguments().iter().enumerate() {
            prefix.push(Step::Arg(i + 1));
            arg.collect_positions(prefix, out);
            prefix.pop();
        }
        out.push(Position(prefix.clone()));
    }

    /// Run a function on every subterm directly inside the head,
    /// that is, the body of an abstraction or the arguments of a meta-application.
    fn inner_head_steps<F>(&self, prefix: &mut Vec<Step>, f: &mut F)
    where
        F: FnMut(&Term, &mut Vec<Step>),
    {
        match self.head().kind() {
            TermKind::Abst(_, body) => {
                prefix.push(Step::Lambda);
                f(body, prefix);
                prefix.pop();
            }
            TermKind::Meta(_, args) => {
                for (i, arg) in args.iter().enumerate() {
                    prefix.push(Step::Meta(i + 1));
                    f(arg, prefix);
                    prefix.pop();
                }
            }
            _ => (),
        }
    }

    /// Return all head positions of the term.
    ///
    /// For a subterm `h(s1, …, sn)` at position `p`,
    /// the head positions inside `h` come first, followed by `(p, n)`, and then
    /// for every argument `si`, the head positions of `si` followed by `(p, n - i)`.
    pub fn head_positions(&self) -> Vec<HeadPosition> {
        let mut out = Vec::new();
        self.collect_head_positions(&mut Vec::new(), &mut out);
        out
    }

    fn collect_head_positions(&self, prefix: &mut Vec<Step>, out: &mut Vec<HeadPosition>) {
        self.inner_head_steps(prefix, &mut |tm, prefix| {
            tm.collect_head_positions(prefix, out)
        });
        let n = self.arguments().len();
        if n > 0 {
            let pos = Position(prefix.clone());
            out.push(HeadPosition { pos, chop: n });
        }
        for (i, arg) in self.arguments().iter().enumerate() {
            prefix.push(Step::Arg(i + 1));
            arg.collect_head_positions(prefix, out);
            prefix.pop();
            let pos = Position(prefix.clone());
            out.push(HeadPosition { pos, chop: n - i - 1 });
        }
        if n == 0 {
            let pos = Position(prefix.clone());
            out.push(HeadPosition { pos, chop: 0 });
        }
    }

    /// Return the subterm at the given position.
    pub fn subterm_at(&self, pos: &Position) -> Result<&Term, IndexError> {
        pos.0.iter().try_fold(self, |tm, step| {
            tm.step(*step).ok_or_else(|| IndexError {
                position: pos.to_string(),
                term: self.clone(),
            })
        })
    }

    /// Replace the subterm at the given position by a term of the same type.
    ///
    /// ~~~
    /// # use cora::{Constant, Error, Term, Type};
    /// let o = Type::base("o");
    /// let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    /// let [a, b] = ["a", "b"].map(|c| Term::constant(Constant::new(c, o.clone())));
    /// let faa = f.clone().apply([a.clone(), a.clone()].into())?;
    /// let fab = faa.replace_subterm(&"2.ε".parse().unwrap(), b.clone())?;
    /// assert_eq!(fab, f.apply([a, b].into())?);
    /// assert!(fab.replace_subterm(&"3.ε".parse().unwrap(), fab.clone()).is_err());
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn replace_subterm(&self, pos: &Position, repl: Term) -> Result<Term, Error> {
        let old = self.subterm_at(pos)?;
        if old.ty() != repl.ty() {
            let expected = old.ty().clone();
            let found = repl.ty().clone();
            return Err(TypeError::Mismatch { expected, found }.into());
        }
        Ok(self.replace_steps(&pos.0, repl))
    }

    /// Replace the subterm at an existing path.
    fn replace_steps(&self, steps: &[Step], repl: Term) -> Term {
        let (step, rest) = match steps.split_first() {
            Some(split) => split,
            None => return repl,
        };
        let args = self.arguments();
        match (step, self.head().kind()) {
            (Step::Arg(i), _) => {
                let args = replace_nth(args, *i, rest, repl);
                self.head().clone().mk_appl(args)
            }
            (Step::Lambda, TermKind::Abst(x, body)) => {
                let head = Self::mk_abst(x.clone(), body.replace_steps(rest, repl));
                head.mk_appl(args.to_vec())
            }
            (Step::Meta(i), TermKind::Meta(z, margs)) => {
                let head = Self::mk_meta(z.clone(), replace_nth(margs, *i, rest, repl));
                head.mk_appl(args.to_vec())
            }
            _ => {
                debug_assert!(false, "position does not exist");
                self.clone()
            }
        }
    }

    /// Return `h(s1, …, s(n - chop))` for the subterm `h(s1, …, sn)` at the position.
    pub fn head_subterm_at(&self, hpos: &HeadPosition) -> Result<Term, IndexError> {
        let (sub, keep) = self.head_split(hpos)?;
        Ok(sub.head_prefix(keep))
    }

    /// Replace the head subterm at the given head position.
    ///
    /// The replacement has to have the type of the head subterm, and
    /// it is applied to the arguments that the head position chops off.
    pub fn replace_head_at(&self, hpos: &HeadPosition, repl: Term) -> Result<Term, Error> {
        let (sub, keep) = self.head_split(hpos)?;
        let chopped = &sub.arguments()[keep..];
        let inputs: Vec<_> = chopped.iter().map(|a| a.ty().clone()).collect();
        let expected = Type::arrows(inputs, sub.ty().clone());
        if &expected != repl.ty() {
            let found = repl.ty().clone();
            return Err(TypeError::Mismatch { expected, found }.into());
        }
        let repl = repl.mk_appl(chopped.to_vec());
        Ok(self.replace_steps(&hpos.pos.0, repl))
    }

    /// Return the subterm at the position and the number of its arguments to keep.
    fn head_split(&self, hpos: &HeadPosition) -> Result<(&Term, usize), IndexError> {
        let sub = self.subterm_at(&hpos.pos)?;
        match sub.arguments().len().checked_sub(hpos.chop) {
            Some(keep) => Ok((sub, keep)),
            None => Err(IndexError {
                position: hpos.to_string(),
                term: self.clone(),
            }),
        }
    }
}

/// Replace the subterm at `rest` inside the `i`-th term (starting from 1).
fn replace_nth(terms: &[Term], i: usize, rest: &[Step], repl: Term) -> Vec<Term> {
    let mut terms = terms.to_vec();
    if let Some(tm) = i.checked_sub(1).and_then(|i| terms.get_mut(i)) {
        *tm = tm.replace_steps(rest, repl);
    }
    terms
}

#[cfg(test)]
use crate::{Constant, MetaVar, Var};

#[test]
fn head_positions() -> Result<(), Error> {
    let o = Type::base("o");
    let f = Term::constant(Constant::new("f", Type::arrows([o.clone(), o.clone()], o.clone())));
    let g = Term::constant(Constant::new("g", Type::arrow(o.clone(), o.clone())));
    let a = Term::constant(Constant::new("a", o.clone()));
    let ga = g.clone().apply([a.clone()].into())?;
    let tm = f.clone().apply([ga, a.clone()].into())?;

    let hpos: Vec<_> = tm.head_positions().iter().map(|p| p.to_string()).collect();
    assert_eq!(hpos, ["☆2", "1.☆1", "1.1.ε", "1.ε", "☆1", "2.ε", "ε"]);

    let hp: HeadPosition = "☆1".parse().unwrap();
    let fga = tm.head_subterm_at(&hp)?;
    assert_eq!(fga.ty(), &Type::arrow(o.clone(), o.clone()));

    // replace f(g(a)) by g in f(g(a), a) to obtain g(a)
    let replaced = tm.replace_head_at(&hp, g.clone())?;
    assert_eq!(replaced, g.clone().apply([a.clone()].into())?);
    assert!(tm.replace_head_at(&hp, a).is_err());
    assert!(tm.head_subterm_at(&"☆3".parse().unwrap()).is_err());
    Ok(())
}

#[test]
fn inside_heads() -> Result<(), Error> {
    let o = Type::base("o");
    let a = Term::constant(Constant::new("a", o.clone()));
    let b = Term::constant(Constant::new("b", o.clone()));
    let x = Var::binder("x", o.clone());
    let z = MetaVar::new("Z", [o.clone()].into(), Type::arrow(o.clone(), o.clone()));

    // (λx.x)(a) and Z[a](b)
    let redex = Term::abst(x.clone(), Term::var(x))?.apply([a.clone()].into())?;
    let zab = Term::meta(z, [a.clone()].into())?.apply([b.clone()].into())?;
    let pos = |tm: &Term| tm.positions().iter().map(|p| p.to_string()).collect::<Vec<_>>();
    assert_eq!(pos(&redex), ["0.ε", "1.ε", "ε"]);
    assert_eq!(pos(&zab), ["!1.ε", "1.ε", "ε"]);

    let meta_arg: Position = "!1.ε".parse().unwrap();
    assert_eq!(zab.subterm_at(&meta_arg)?, &a);
    let zbb = zab.replace_subterm(&meta_arg, b.clone())?;
    assert_eq!(zbb.meta_arguments(), [b.clone()]);
    assert_eq!(zbb.arguments(), [b]);
    Ok(())
}
