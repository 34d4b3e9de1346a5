use cora::{Constant, MetaVar, Subst, Term, Type, Var};
use rayon::prelude::*;

fn o() -> Type {
    Type::base("o")
}

fn cst(name: &str, arity: usize) -> Term {
    let ty = Type::arrows(vec![o(); arity], o());
    Term::constant(Constant::new(name, ty))
}

fn app(head: &Term, args: &[Term]) -> Term {
    head.clone().apply(args.to_vec()).unwrap()
}

fn abst(x: &Var, body: Term) -> Term {
    Term::abst(x.clone(), body).unwrap()
}

/// A few terms with binders, free variables and meta-variables.
fn samples() -> Vec<Term> {
    let (f, g, a) = (cst("f", 2), cst("g", 1), cst("a", 0));
    let v = Term::var(Var::new("v", o()));
    let x = Var::binder("x", o());
    let y = Var::binder("y", o());
    let (xt, yt) = (Term::var(x.clone()), Term::var(y.clone()));
    let z = MetaVar::new("Z", vec![o(), o()], o());
    let zxy = Term::meta(z, vec![xt.clone(), yt.clone()]).unwrap();
    let id = abst(&x, xt.clone());

    vec![
        app(&f, &[v.clone(), a.clone()]),
        abst(&x, app(&f, &[xt.clone(), v.clone()])),
        abst(&x, abst(&y, app(&f, &[yt.clone(), app(&g, &[xt.clone()])]))),
        app(&f, &[abst(&x, xt.clone()).apply(vec![a.clone()]).unwrap(), v.clone()]),
        abst(&x, abst(&y, zxy)),
        app(&f, &[app(&id, &[v.clone()]), app(&id, &[a])]),
    ]
}

#[test]
fn typing_soundness() {
    let (b, g) = (cst("b", 0), cst("g", 1));
    for tm in samples() {
        let mut subst = Subst::new();
        for r in tm.free_replaceables().iter() {
            let image = match r.arity() {
                0 => app(&g, &[b.clone()]),
                _ => {
                    let x = Var::binder("w", o());
                    let y = Var::binder("u", o());
                    Term::absts(vec![x.clone(), y], app(&g, &[Term::var(x)])).unwrap()
                }
            };
            subst.insert(r.clone(), image).unwrap();
        }
        let result = tm.substitute(&subst);
        assert_eq!(result.ty(), tm.ty());
        assert!(result.is_closed(), "{} is not closed", result);
    }
}

#[test]
fn alpha_invariance() {
    for tm in samples() {
        let renamed = tm.refresh_binders();
        assert!(tm.alpha_equals(&renamed));
        assert!(renamed.alpha_equals(&tm));
        if !tm.bound_vars().is_empty() {
            assert_ne!(tm, renamed);
            assert!(!tm.bound_vars().intersects(renamed.bound_vars()));
        }
        assert_eq!(tm.free_replaceables(), renamed.free_replaceables());
    }
}

#[test]
fn match_substitute_duality() {
    let (f, g, a) = (cst("f", 2), cst("g", 1), cst("a", 0));
    let oo = Type::arrow(o(), o());
    let h = Term::constant(Constant::new("h", Type::arrows([o(), oo], o())));
    let x = Term::var(Var::new("X", o()));
    let w = Var::binder("w", o());
    let z = MetaVar::new("Z", vec![o()], o());
    let zw = Term::meta(z, vec![Term::var(w.clone())]).unwrap();

    let patterns = vec![
        x.clone(),
        app(&f, &[x.clone(), x.clone()]),
        app(&h, &[x.clone(), abst(&w, zw.clone())]),
        abst(&w, app(&g, &[zw])),
    ];

    let y = Var::binder("y", o());
    let yt = Term::var(y.clone());
    let v = Term::var(Var::new("v", o()));
    let mut objects = samples();
    objects.extend(patterns.iter().cloned());
    objects.extend([
        app(&f, &[app(&g, &[a.clone()]), app(&g, &[a.clone()])]),
        app(&h, &[a.clone(), abst(&y, app(&f, &[yt.clone(), a.clone()]))]),
        app(&h, &[v.clone(), abst(&y, yt.clone())]),
        abst(&y, app(&g, &[app(&f, &[yt.clone(), v])])),
    ]);

    let mut matched = 0;
    for pat in patterns.iter() {
        for obj in objects.iter() {
            let subst = match pat.match_term(obj).unwrap().ok() {
                Some(subst) => subst,
                None => continue,
            };
            matched += 1;
            let inst = pat.substitute(&subst);
            assert!(inst.alpha_equals(obj), "{} ≠ {}", inst, obj);
        }
    }
    assert!(matched >= 12, "only {} matches", matched);
}

#[test]
fn position_round_trip() {
    for tm in samples() {
        let positions = tm.positions();
        assert_eq!(positions.last(), Some(&cora::Position::root()));
        for pos in positions {
            let sub = tm.subterm_at(&pos).unwrap().clone();
            let replaced = tm.replace_subterm(&pos, sub).unwrap();
            assert_eq!(replaced, tm, "at {}", pos);
            assert_eq!(pos.to_string().parse::<cora::Position>().unwrap(), pos);
        }
        for hpos in tm.head_positions() {
            let sub = tm.head_subterm_at(&hpos).unwrap();
            let replaced = tm.replace_head_at(&hpos, sub).unwrap();
            assert_eq!(replaced, tm, "at {}", hpos);
        }
    }
}

#[test]
fn shared_free_sets() {
    let (f, g, a) = (cst("f", 2), cst("g", 1), cst("a", 0));
    let x = Term::var(Var::new("x", o()));
    let gx = app(&g, &[x.clone()]);
    let fgxa = app(&f, &[gx.clone(), a]);
    assert!(gx.free_replaceables().ptr_eq(x.free_replaceables()));
    assert!(fgxa.free_replaceables().ptr_eq(x.free_replaceables()));

    let fxgx = app(&f, &[x.clone(), gx]);
    assert!(fxgx.free_replaceables().ptr_eq(x.free_replaceables()));
}

#[test]
fn construction_separates_free_and_bound() {
    let f = cst("f", 2);
    let x = Var::binder("x", o());
    let id = abst(&x, Term::var(x.clone()));
    let idx = app(&id, &[Term::var(x.clone())]);
    assert!(!idx.bound_vars().contains(&x));
    assert!(idx.free_vars().any(|y| y == &x));

    let tm = app(&f, &[idx.clone(), app(&id, &[cst("a", 0)])]);
    for y in tm.free_vars() {
        assert!(!tm.bound_vars().contains(y));
    }
}

/// All terms of depth at most 1 over `a, b, g, f` and variables `X, Y`.
fn small_terms(leaves: &[Term]) -> Vec<Term> {
    let (g, f) = (cst("g", 1), cst("f", 2));
    let mut terms = leaves.to_vec();
    terms.extend(leaves.iter().map(|l| app(&g, &[l.clone()])));
    for l in leaves {
        terms.extend(leaves.iter().map(|r| app(&f, &[l.clone(), r.clone()])));
    }
    terms
}

#[test]
fn unify_exhaustive() {
    let (a, b) = (cst("a", 0), cst("b", 0));
    let vars = [Var::new("X", o()), Var::new("Y", o())];
    let mut leaves = vec![a.clone(), b.clone()];
    let ground = small_terms(&leaves);
    leaves.extend(vars.iter().cloned().map(Term::var));
    let terms = small_terms(&leaves);

    let mut substs = Vec::new();
    for gx in ground.iter() {
        for gy in ground.iter() {
            let mut subst = Subst::new();
            subst.insert(vars[0].clone().into(), gx.clone()).unwrap();
            subst.insert(vars[1].clone().into(), gy.clone()).unwrap();
            substs.push(subst);
        }
    }

    for s in terms.iter() {
        for t in terms.iter() {
            let unifiers = substs
                .iter()
                .filter(|th| s.substitute(th) == t.substitute(th));
            match s.unify(t) {
                Some(sigma) => {
                    assert_eq!(s.substitute(&sigma), t.substitute(&sigma));
                    // every ground unifier is an instance of sigma
                    for th in unifiers {
                        for x in vars.iter() {
                            let x = Term::var(x.clone());
                            assert_eq!(x.substitute(&sigma).substitute(th), x.substitute(th));
                        }
                    }
                }
                None => assert_eq!(unifiers.count(), 0, "{} and {} are unifiable", s, t),
            }
        }
    }
}

#[test]
fn concurrent_identifiers() {
    let ids: Vec<u64> = (0..10_000)
        .into_par_iter()
        .map(|i| Var::new(&i.to_string(), o()).id())
        .collect();
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}
