#![no_std]
#![forbid(unsafe_code)]

//! Typed higher-order term algebra with named binders and meta-variables.
//!
//! Terms are built bottom-up by a factory that checks types and arities.
//! Once built, a term is immutable and shared by pointer.
//! Every term caches the set of its free variables and meta-variables
//! as well as the set of binder variables bound somewhere inside it.
//! These sets are shared between a term and its subterms whenever possible.
//!
//! On top of this representation, the library provides
//! capture-avoiding [substitution](Term::substitute),
//! [alpha-equivalence](Term::alpha_equals),
//! one-directional [matching](Term::match_term) of higher-order patterns,
//! [unification](Term::unify), and [positions](Position) to address subterms.
//!
//! The following example matches the pattern `f(X, λx.Z⟨x⟩)` against
//! the object `f(a, λy.g(y, a))` and checks that
//! the resulting substitution maps the pattern to the object:
//!
//! ~~~
//! # use cora::{Constant, Error, MetaVar, Term, Type, Var};
//! let o = Type::base("o");
//! let oo = Type::arrow(o.clone(), o.clone());
//! let cst = |name, ty| Term::constant(Constant::new(name, ty));
//! let f = cst("f", Type::arrows([o.clone(), oo.clone()], o.clone()));
//! let g = cst("g", Type::arrows([o.clone(), o.clone()], o.clone()));
//! let a = cst("a", o.clone());
//!
//! // pattern
//! let x_free = Var::new("X", o.clone());
//! let z = MetaVar::new("Z", [o.clone()].into(), o.clone());
//! let x = Var::binder("x", o.clone());
//! let zx = Term::meta(z, [Term::var(x.clone())].into())?;
//! let pat = f.clone().apply([Term::var(x_free), Term::abst(x, zx)?].into())?;
//!
//! // object
//! let y = Var::binder("y", o.clone());
//! let gya = g.apply([Term::var(y.clone()), a.clone()].into())?;
//! let obj = f.apply([a, Term::abst(y, gya)?].into())?;
//!
//! let subst = pat.match_term(&obj)?.ok().expect("terms should match");
//! assert_eq!(subst.len(), 2);
//! assert!(pat.substitute(&subst).alpha_equals(&obj));
//! # Ok::<_, Error>(())
//! ~~~
//!
//! # Organisation
//!
//! * Types, variables, constants and values are the leaves of terms.
//! * The [`Term`] type and its factory live in the `term` and `build` modules.
//! * Every term algorithm is implemented as a set of methods on [`Term`],
//!   in a module named after the algorithm.
//!
//! All errors indicate a misuse of the algebra (see [`error`]);
//! failure to match or to unify is an ordinary outcome.

extern crate alloc;
#[macro_use]
extern crate log;

mod alpha;
mod build;
mod classify;
mod constant;
pub mod error;
mod matching;
mod position;
mod printer;
mod set;
mod stack;
mod subst;
mod term;
pub mod theory;
mod types;
mod unify;
mod value;
mod var;

pub use constant::{Constant, Flags};
pub use error::{Error, IndexError, PatternRequired, TypeError};
pub use matching::MatchOutcome;
pub use position::{HeadPosition, ParsePositionError, Position, Step};
pub use set::SharedSet;
pub use stack::Stack;
pub use subst::Subst;
pub use term::{ReplSet, Term, TermKind, VarSet};
pub use types::Type;
pub use value::Value;
pub use var::{MetaVar, Replaceable, Var};
