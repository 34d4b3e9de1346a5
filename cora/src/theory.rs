//! Theory sorts and the standard theory symbols.
//!
//! Theory symbols are ordinary constants whose flags mark them as
//! interpreted, and, for binary operators, as infix.
//! The algebra does not evaluate them.
//!
//! ~~~
//! # use cora::{theory, Term, Value};
//! let one = Term::value(Value::Int(1));
//! let two = Term::value(Value::Int(2));
//! let sum = Term::constant(theory::plus()).apply([one, two].into())?;
//! assert_eq!(sum.ty(), &theory::int_sort());
//! assert_eq!(sum.to_string(), "1 + 2");
//! # Ok::<_, cora::TypeError>(())
//! ~~~

use crate::constant::{Constant, Flags};
use crate::Type;

pub fn int_sort() -> Type {
    Type::base("Int")
}

pub fn bool_sort() -> Type {
    Type::base("Bool")
}

pub fn string_sort() -> Type {
    Type::base("String")
}

fn binary(name: &str, input: Type, output: Type, precedence: u8) -> Constant {
    let ty = Type::arrows([input.clone(), input], output);
    let flags = Flags {
        theory: true,
        infix: Some(precedence),
    };
    Constant::with_flags(name, ty, flags)
}

fn arith(name: &str, precedence: u8) -> Constant {
    binary(name, int_sort(), int_sort(), precedence)
}

fn compare(name: &str) -> Constant {
    binary(name, int_sort(), bool_sort(), 30)
}

pub fn or() -> Constant {
    binary("∨", bool_sort(), bool_sort(), 10)
}

pub fn and() -> Constant {
    binary("∧", bool_sort(), bool_sort(), 20)
}

pub fn not() -> Constant {
    let flags = Flags {
        theory: true,
        infix: None,
    };
    Constant::with_flags("¬", Type::arrow(bool_sort(), bool_sort()), flags)
}

pub fn equal() -> Constant {
    compare("=")
}

pub fn distinct() -> Constant {
    compare("≠")
}

pub fn less() -> Constant {
    compare("<")
}

pub fn less_eq() -> Constant {
    compare("≤")
}

pub fn greater() -> Constant {
    compare(">")
}

pub fn greater_eq() -> Constant {
    compare("≥")
}

pub fn plus() -> Constant {
    arith("+", 40)
}

pub fn minus() -> Constant {
    arith("-", 40)
}

pub fn times() -> Constant {
    arith("*", 50)
}

pub fn div() -> Constant {
    arith("/", 50)
}

pub fn modulo() -> Constant {
    arith("%", 50)
}

#[test]
fn symbols() {
    assert_eq!(plus(), plus());
    assert_ne!(plus(), minus());
    assert!(plus().is_theory());
    assert_eq!(times().infix(), Some(50));
    assert_eq!(not().infix(), None);
    assert_eq!(less().ty().output(), &bool_sort());
    assert_eq!(and().ty().arity(), 2);
}
