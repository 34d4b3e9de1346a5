use core::fmt::{self, Display};
use cora::{MatchOutcome, Subst, Term};

/// Scoped query.
#[derive(Clone, Debug)]
pub enum Query {
    Match(Term, Term),
    Unify(Term, Term),
    Alpha(Term, Term),
    Subst(Term, Subst),
    Positions(Term),
}

impl Query {
    /// Answer the query, yielding the lines to output.
    ///
    /// A match query whose pattern violates the pattern restriction
    /// yields an error.
    pub fn answer(&self) -> Result<Vec<String>, cora::Error> {
        let line = match self {
            Self::Match(pat, obj) => match pat.match_term(obj)? {
                MatchOutcome::Success(subst) => subst.to_string(),
                failure => failure.to_string(),
            },
            Self::Unify(s, t) => match s.unify(t) {
                Some(subst) => subst.to_string(),
                None => "no unifier".to_string(),
            },
            Self::Alpha(s, t) => s.alpha_equals(t).to_string(),
            Self::Subst(tm, subst) => tm.substitute(subst).to_string(),
            Self::Positions(tm) => {
                let line = |pos: cora::Position| -> Result<_, cora::Error> {
                    Ok(format!("{}: {}", pos, tm.subterm_at(&pos)?))
                };
                return tm.positions().into_iter().map(line).collect();
            }
        };
        Ok(vec![line])
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Match(p, o) => write!(f, "match {} with {}", p, o),
            Self::Unify(s, t) => write!(f, "unify {} with {}", s, t),
            Self::Alpha(s, t) => write!(f, "alpha {} with {}", s, t),
            Self::Subst(tm, subst) => write!(f, "subst {} {}", tm, subst),
            Self::Positions(tm) => write!(f, "positions {}", tm),
        }
    }
}
