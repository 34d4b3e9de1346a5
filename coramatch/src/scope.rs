//! Resolution of names in parsed commands.

use crate::{Error, Query};
use core::fmt::{self, Display};
use cora::{Constant, MetaVar, Stack, Subst, Term, Type, Value, Var};
use cora_parse::{syntax, Command};
use fnv::FnvHashMap;

#[derive(Debug)]
pub enum ScopeError {
    Undeclared(String),
    Redeclared(String),
    /// `Z[...]` where `Z` is not a meta-variable
    NotMeta(String),
    /// substitution for a name that is not a variable or meta-variable
    NotReplaceable(String),
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Undeclared(name) => write!(f, "undeclared name {}", name),
            Self::Redeclared(name) => write!(f, "redeclaration of {}", name),
            Self::NotMeta(name) => write!(f, "{} is not a meta-variable", name),
            Self::NotReplaceable(name) => write!(f, "cannot substitute constant {}", name),
        }
    }
}

/// Declared object.
#[derive(Clone, Debug)]
pub enum Symbol {
    Const(Constant),
    Var(Var),
    Meta(MetaVar),
}

/// Map from names to declared objects.
#[derive(Debug, Default)]
pub struct Symbols(FnvHashMap<String, Symbol>);

pub fn scope_type(ty: &syntax::Type) -> Type {
    match ty {
        syntax::Type::Base(b) => Type::base(b),
        syntax::Type::Arrow(a, b) => Type::arrow(scope_type(a), scope_type(b)),
    }
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: String, sym: Symbol) -> Result<(), ScopeError> {
        if self.0.contains_key(&name) {
            return Err(ScopeError::Redeclared(name));
        }
        self.0.insert(name, sym);
        Ok(())
    }

    /// Resolve the names of a command.
    ///
    /// Declarations are added to the symbols and yield no query.
    pub fn scope(&mut self, cmd: Command) -> Result<Option<Query>, Error> {
        let query = match cmd {
            Command::Const(c, ty) => {
                log::info!("Declare constant {}", c);
                let sym = Symbol::Const(Constant::new(&c, scope_type(&ty)));
                self.insert(c, sym)?;
                return Ok(None);
            }
            Command::Var(x, ty) => {
                log::info!("Declare variable {}", x);
                let sym = Symbol::Var(Var::new(&x, scope_type(&ty)));
                self.insert(x, sym)?;
                return Ok(None);
            }
            Command::Meta(z, inputs, output) => {
                log::info!("Declare meta-variable {}", z);
                let inputs = inputs.iter().map(scope_type).collect();
                let sym = Symbol::Meta(MetaVar::new(&z, inputs, scope_type(&output)));
                self.insert(z, sym)?;
                return Ok(None);
            }
            Command::Match(p, o) => Query::Match(self.term(&p)?, self.term(&o)?),
            Command::Unify(s, t) => Query::Unify(self.term(&s)?, self.term(&t)?),
            Command::Alpha(s, t) => Query::Alpha(self.term(&s)?, self.term(&t)?),
            Command::Subst(tm, pairs) => Query::Subst(self.term(&tm)?, self.subst(&pairs)?),
            Command::Positions(tm) => Query::Positions(self.term(&tm)?),
        };
        log::info!("Query {}", query);
        Ok(Some(query))
    }

    fn subst(&self, pairs: &[(String, syntax::Term)]) -> Result<Subst, Error> {
        let mut subst = Subst::new();
        for (name, tm) in pairs {
            let key = match self.get(name) {
                Some(Symbol::Var(x)) => x.clone().into(),
                Some(Symbol::Meta(z)) => z.clone().into(),
                Some(Symbol::Const(_)) => return Err(ScopeError::NotReplaceable(name.clone()).into()),
                None => return Err(ScopeError::Undeclared(name.clone()).into()),
            };
            if subst.insert(key, self.term(tm)?)?.is_some() {
                log::warn!("Multiple images for {}, keeping the last one", name);
            }
        }
        Ok(subst)
    }

    /// Resolve the names of a closed term.
    pub fn term(&self, tm: &syntax::Term) -> Result<Term, Error> {
        self.term_in(tm, &mut Stack::new())
    }

    fn term_in(&self, tm: &syntax::Term, bound: &mut Stack<Var>) -> Result<Term, Error> {
        use syntax::Term as STerm;
        match tm {
            STerm::Ident(name) => {
                if let Some(x) = bound.iter().find(|x| x.name() == name.as_str()) {
                    return Ok(Term::var(x.clone()));
                }
                match self.get(name) {
                    Some(Symbol::Const(c)) => Ok(Term::constant(c.clone())),
                    Some(Symbol::Var(x)) => Ok(Term::var(x.clone())),
                    Some(Symbol::Meta(z)) => Ok(Term::meta(z.clone(), Vec::new())?),
                    None => Err(ScopeError::Undeclared(name.clone()).into()),
                }
            }
            STerm::Int(i) => Ok(Term::value(Value::Int(*i))),
            STerm::Bool(b) => Ok(Term::value(Value::Bool(*b))),
            STerm::Str(s) => Ok(Term::value(Value::Str(s.clone()))),
            STerm::Appl(head, args) => {
                let head = self.term_in(head, bound)?;
                let args = args.iter().map(|a| self.term_in(a, bound));
                Ok(head.apply(args.collect::<Result<_, _>>()?)?)
            }
            STerm::Meta(name, args) => {
                let z = match self.get(name) {
                    Some(Symbol::Meta(z)) => z.clone(),
                    Some(_) => return Err(ScopeError::NotMeta(name.clone()).into()),
                    None => return Err(ScopeError::Undeclared(name.clone()).into()),
                };
                let args = args.iter().map(|a| self.term_in(a, bound));
                Ok(Term::meta(z, args.collect::<Result<_, _>>()?)?)
            }
            STerm::Abst(x, ty, body) => {
                let x = Var::binder(x, scope_type(ty));
                let body = bound.with_pushed(x.clone(), |bound| self.term_in(body, bound))?;
                Ok(Term::abst(x, body)?)
            }
        }
    }
}

#[cfg(test)]
fn symbols(decls: &str) -> Symbols {
    let mut syms = Symbols::new();
    for cmd in cora_parse::CmdIter::new(decls) {
        assert!(syms.scope(cmd.unwrap()).unwrap().is_none());
    }
    syms
}

#[test]
fn binders() {
    let syms = symbols("f : o -> o -> o. a : o. var x : o.");
    let tm = syms.term(&"\\x : o => \\x : o => f(x, a)".parse().unwrap()).unwrap();
    let (outer, body) = tm.abstraction().unwrap();
    let (inner, body) = body.abstraction().unwrap();
    assert_ne!(outer, inner);
    assert_eq!(body.arguments()[0], Term::var(inner.clone()));

    // the declared variable is visible outside of the abstraction
    let tm = syms.term(&"f(x, x)".parse().unwrap()).unwrap();
    assert!(!tm.is_closed());
    assert!(tm.free_vars().all(|y| !y.is_binder()));
}

#[test]
fn errors() {
    let mut syms = symbols("f : o -> o. meta Z : [o] -> o.");
    let scope = |syms: &Symbols, s: &str| syms.term(&s.parse().unwrap());
    assert!(matches!(scope(&syms, "g(a)"), Err(Error::Scope(ScopeError::Undeclared(_)))));
    assert!(matches!(scope(&syms, "f[a]"), Err(Error::Scope(ScopeError::NotMeta(_)))));
    assert!(matches!(scope(&syms, "f(f)"), Err(Error::Cora(_))));
    assert!(matches!(scope(&syms, "Z"), Err(Error::Cora(_))));
    assert!(scope(&syms, "\\x : o => Z[f(x)]").is_ok());

    let redecl = syms.scope(Command::Var("f".into(), syntax::Type::Base("o".into())));
    assert!(matches!(redecl, Err(Error::Scope(ScopeError::Redeclared(_)))));
}
