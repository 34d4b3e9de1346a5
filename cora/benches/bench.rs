use cora::{Constant, MetaVar, Subst, Term, Type, Var};
use criterion::{criterion_group, criterion_main, Criterion};

fn o() -> Type {
    Type::base("o")
}

/// Build `f(f(… f(x, x) …))` of the given depth, sharing both arguments.
fn shared(depth: usize, leaf: Term) -> Term {
    let f = Term::constant(Constant::new("f", Type::arrows([o(), o()], o())));
    (0..depth).fold(leaf, |tm, _| f.clone().apply(vec![tm.clone(), tm]).unwrap())
}

/// Build `λx1 … λxn.g(…g(x1)…)`.
fn nested_abst(n: usize) -> Term {
    let g = Term::constant(Constant::new("g", Type::arrow(o(), o())));
    let xs: Vec<Var> = (0..n).map(|i| Var::binder(&format!("x{}", i), o())).collect();
    let body = xs.iter().fold(Term::var(xs[0].clone()), |tm, _| {
        g.clone().apply(vec![tm]).unwrap()
    });
    Term::absts(xs, body).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let x = Var::new("x", o());
    let a = Term::constant(Constant::new("a", o()));

    c.bench_function("construct shared", |b| {
        b.iter(|| shared(1000, Term::var(x.clone())))
    });

    let big = shared(14, Term::var(x.clone()));
    let mut subst = Subst::new();
    subst.insert(x.clone().into(), a.clone()).unwrap();
    c.bench_function("substitute", |b| b.iter(|| big.substitute(&subst)));

    let pat = shared(12, Term::var(x.clone()));
    let obj = shared(12, a.clone());
    c.bench_function("match", |b| b.iter(|| pat.match_term(&obj).unwrap()));
    c.bench_function("unify", |b| b.iter(|| pat.unify(&obj)));

    let l = nested_abst(200);
    let r = l.refresh_binders();
    c.bench_function("alpha equals", |b| b.iter(|| l.alpha_equals(&r)));
    c.bench_function("refresh binders", |b| b.iter(|| l.refresh_binders()));

    let z = MetaVar::new("Z", vec![o()], o());
    let y = Var::binder("y", o());
    let image = Term::abst(y.clone(), shared(8, Term::var(y))).unwrap();
    let mut msubst = Subst::new();
    msubst.insert(z.clone().into(), image).unwrap();
    let w = Var::binder("w", o());
    let zw = Term::meta(z, vec![Term::var(w.clone())]).unwrap();
    let inst = Term::abst(w, shared(8, zw)).unwrap();
    c.bench_function("instantiate meta", |b| b.iter(|| inst.substitute(&msubst)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
