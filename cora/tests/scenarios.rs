use cora::{Constant, Error, MatchOutcome, MetaVar, Subst, Term, Type, Value, Var};

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

#[test]
fn scenario_a() -> Result<(), Error> {
    let f = cst("f", 2);
    let (a, b) = (cst("a", 0), cst("b", 0));
    let x = Var::new("X", o());

    // f(X, b) matches f(a, b)
    let pat = app(&f, &[Term::var(x.clone()), b.clone()]);
    let subst = pat.match_term(&app(&f, &[a.clone(), b.clone()]))?.ok().unwrap();
    assert_eq!(subst.len(), 1);
    assert_eq!(subst.get_var(&x), Some(&a));

    // f(X, y) with y ≠ b does not match f(a, b)
    let y = cst("y", 0);
    let pat = app(&f, &[Term::var(x), y]);
    match pat.match_term(&app(&f, &[a, b]))? {
        MatchOutcome::Failure(reason) => assert!(reason.contains("differs")),
        MatchOutcome::Success(s) => panic!("unexpected match {}", s),
    }
    Ok(())
}

#[test]
fn scenario_b() -> Result<(), Error> {
    let h = cst("h", 2);
    let a = cst("a", 0);
    let x = Var::binder("x", o());
    let y = Var::binder("y", o());
    let z = MetaVar::new("Z", vec![o()], o());
    let zx = Term::meta(z.clone(), vec![Term::var(x.clone())])?;

    // y is neither an argument of Z nor bound in the object
    let hxy = app(&h, &[Term::var(x.clone()), Term::var(y.clone())]);
    let err = zx.match_term(&hxy).unwrap_err();
    assert!(err.reason.contains('y'));

    // h(x, a) can be expressed in terms of x
    let hxa = app(&h, &[Term::var(x.clone()), a]);
    let subst = zx.match_term(&hxa)?.ok().unwrap();
    assert!(subst.get_meta(&z).unwrap().alpha_equals(&Term::abst(x.clone(), hxa.clone())?));
    assert_eq!(zx.substitute(&subst), hxa);

    // λx.λy.Z⟨x⟩ does not match λx.λy.h(x, y), because Z cannot use y
    let pat = Term::absts(vec![x.clone(), y.clone()], zx)?;
    let obj = Term::absts(vec![x, y], hxy)?;
    assert!(!pat.match_term(&obj)?.is_success());
    Ok(())
}

#[test]
fn scenario_b_non_pattern() -> Result<(), Error> {
    let h = cst("h", 2);
    let x = Var::binder("x", o());
    let y = Var::binder("y", o());
    let z = MetaVar::new("Z", vec![o(), o()], o());
    let hxy = app(&h, &[Term::var(x.clone()), Term::var(y)]);

    // meta-variables applied to repeated or non-variable arguments
    let zxx = Term::meta(z.clone(), vec![Term::var(x.clone()), Term::var(x.clone())])?;
    let zxa = Term::meta(z, vec![Term::var(x), cst("a", 0)])?;
    for pat in [zxx, zxa] {
        assert!(pat.match_term(&hxy).is_err());
        assert!(pat.match_term(&cst("b", 0)).is_err());
    }
    Ok(())
}

#[test]
fn scenario_c() {
    let f = cst("f", 2);
    let (a, b) = (cst("a", 0), cst("b", 0));
    let x = Term::var(Var::new("X", o()));

    let fxa = app(&f, &[x.clone(), a]);
    let fbx = app(&f, &[b, x]);
    assert!(fxa.unify(&fbx).is_none());
    assert!(fbx.unify(&fxa).is_none());
}

#[test]
fn scenario_d() -> Result<(), Error> {
    let int = cora::theory::int_sort();
    let fun = |name, inputs: usize| {
        let ty = Type::arrows(vec![int.clone(); inputs], int.clone());
        Term::constant(Constant::new(name, ty))
    };
    let (f, g, c) = (fun("f", 2), fun("g", 1), fun("c", 0));
    let x = Var::new("x", int.clone());
    let z = MetaVar::new("Z", vec![int.clone(), int.clone()], int.clone());
    let (y, w) = (Var::binder("y", int.clone()), Var::binder("w", int.clone()));

    let gx = g.clone().apply(vec![Term::var(x.clone())])?;
    let tm = Term::meta(z.clone(), vec![gx, c.clone()])?;

    let fwy = f.clone().apply(vec![Term::var(w.clone()), Term::var(y.clone())])?;
    let mut subst = Subst::new();
    subst.insert(x.into(), Term::value(Value::Int(0)))?;
    subst.insert(z.into(), Term::absts(vec![y, w], fwy)?)?;

    let g0 = g.apply(vec![Term::value(Value::Int(0))])?;
    let expected = f.apply(vec![c, g0])?;
    assert_eq!(tm.substitute(&subst), expected);
    assert_eq!(tm.substitute(&subst).to_string(), "f(c, g(0))");
    Ok(())
}
