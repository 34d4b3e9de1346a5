//! Function symbols.

use crate::Type;
use alloc::{string::String, sync::Arc};
use core::fmt;
use core::hash::{Hash, Hasher};

/// Printing and constraint data attached to a constant.
///
/// These flags do not influence equality of constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// the symbol is interpreted by a theory
    pub theory: bool,
    /// the symbol is printed infix, binding at the given precedence
    pub infix: Option<u8>,
}

#[derive(Debug)]
struct ConstData {
    name: String,
    ty: Type,
    flags: Flags,
}

/// Function symbol with a name and a type.
///
/// Cloning is constant-time.
/// Two constants are equal if they have equal names and types:
///
/// ~~~
/// # use cora::{Constant, Type};
/// let o = Type::base("o");
/// let a = Type::base("a");
/// assert_eq!(Constant::new("f", o.clone()), Constant::new("f", o.clone()));
/// assert_ne!(Constant::new("f", o.clone()), Constant::new("f", a));
/// assert_ne!(Constant::new("f", o.clone()), Constant::new("g", o));
/// ~~~
#[derive(Clone, Debug)]
pub struct Constant(Arc<ConstData>);

impl Constant {
    pub fn new(name: &str, ty: Type) -> Self {
        Self::with_flags(name, ty, Flags::default())
    }

    pub fn with_flags(name: &str, ty: Type, flags: Flags) -> Self {
        let name = name.into();
        Self(Arc::new(ConstData { name, ty, flags }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    pub fn flags(&self) -> Flags {
        self.0.flags
    }

    pub fn is_theory(&self) -> bool {
        self.0.flags.theory
    }

    /// Return the precedence if the constant is printed infix.
    pub fn infix(&self) -> Option<u8> {
        self.0.flags.infix
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (self.0.name == other.0.name && self.0.ty == other.0.ty)
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.ty.hash(state)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name().fmt(f)
    }
}
