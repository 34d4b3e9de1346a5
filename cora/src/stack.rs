//! Scopes of binder variables.

use alloc::vec::Vec;

/// A `Vec` that is iterated from the most recently pushed element.
///
/// This models the scope of binders while descending into a term:
/// the innermost binder comes first, so that
/// searching the stack finds the innermost binder of a given name.
///
/// ~~~
/// # use cora::Stack;
/// let mut scope = Stack::new();
/// scope.push("x");
/// let inner = scope.with_pushed("y", |scope| {
///     assert_eq!(scope.iter().copied().collect::<Vec<_>>(), ["y", "x"]);
///     Ok::<_, ()>(scope.len())
/// });
/// assert_eq!(inner, Ok(2));
/// assert_eq!(scope.len(), 1);
/// ~~~
#[derive(Clone, Debug)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: A) {
        self.0.push(x)
    }

    pub fn pop(&mut self) -> Option<A> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Push an element, run a function on the stack, then pop the element.
    ///
    /// The element is popped even if the function fails,
    /// so the stack afterwards holds the same elements as before.
    pub fn with_pushed<F, Y, E>(&mut self, x: A, f: F) -> Result<Y, E>
    where
        F: FnOnce(&mut Self) -> Result<Y, E>,
    {
        self.0.push(x);
        let y = f(self);
        self.0.pop();
        y
    }

    /// Iterate through the elements, starting from the most recently pushed one.
    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.0.iter().rev()
    }
}

impl<A: PartialEq> Stack<A> {
    pub fn contains(&self, x: &A) -> bool {
        self.0.contains(x)
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

#[test]
fn scoping() {
    let mut stack = Stack::new();
    stack.push(1);
    let failed: Result<(), &str> = stack.with_pushed(2, |s| {
        assert!(s.contains(&2));
        Err("fail")
    });
    assert!(failed.is_err());
    assert!(!stack.contains(&2));
    assert_eq!(stack.pop(), Some(1));
    assert!(stack.is_empty());
}
