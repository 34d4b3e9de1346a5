//! Immutable sets that are shared between terms.

use alloc::{collections::BTreeSet, sync::Arc};
use core::fmt;

/// Immutable set whose allocation is shared between all terms having the same set.
///
/// Set operations return one of their inputs whenever it is already the result,
/// so that the free variables of a term usually point to
/// the same allocation as the free variables of one of its subterms.
/// The empty set does not allocate.
#[derive(Clone)]
pub struct SharedSet<T>(Option<Arc<BTreeSet<T>>>);

impl<T> Default for SharedSet<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: Ord + Clone> SharedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(x: T) -> Self {
        Self::from_set(BTreeSet::from([x]))
    }

    fn from_set(set: BTreeSet<T>) -> Self {
        if set.is_empty() {
            Self(None)
        } else {
            Self(Some(Arc::new(set)))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |s| s.len())
    }

    pub fn contains(&self, x: &T) -> bool {
        self.0.as_ref().map_or(false, |s| s.contains(x))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter().flat_map(|s| s.iter())
    }

    /// Return true if both sets point to the same allocation (or are both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(l), Some(r)) => Arc::ptr_eq(l, r),
            _ => false,
        }
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().all(|x| other.contains(x))
    }

    /// Return true if the sets have a common element.
    pub fn intersects(&self, other: &Self) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        !small.is_empty() && small.iter().any(|x| large.contains(x))
    }

    /// Union of two sets, reusing either of them if possible.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_subset(self) {
            self.clone()
        } else if self.is_subset(other) {
            other.clone()
        } else {
            let mut set = BTreeSet::new();
            set.extend(self.iter().cloned());
            set.extend(other.iter().cloned());
            Self::from_set(set)
        }
    }

    /// Return the set without the given element, reusing the set if it does not contain it.
    pub fn without(&self, x: &T) -> Self {
        if !self.contains(x) {
            return self.clone();
        }
        let set = self.iter().filter(|y| *y != x).cloned().collect();
        Self::from_set(set)
    }

    /// Return the set with the given element, reusing the set if it contains it already.
    pub fn with(&self, x: T) -> Self {
        if self.contains(&x) {
            return self.clone();
        }
        let mut set: BTreeSet<T> = self.iter().cloned().collect();
        set.insert(x);
        Self::from_set(set)
    }
}

impl<T: Ord + Clone> FromIterator<T> for SharedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<T: Ord + Clone> PartialEq for SharedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.len() == other.len() && self.is_subset(other))
    }
}

impl<T: Ord + Clone> Eq for SharedSet<T> {}

impl<T: fmt::Debug> fmt::Debug for SharedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.0.iter().flat_map(|s| s.iter())).finish()
    }
}

#[test]
fn reuse() {
    let a: SharedSet<u8> = [1, 2].into_iter().collect();
    let b = SharedSet::singleton(2);
    let c = SharedSet::singleton(3);

    assert!(a.union(&b).ptr_eq(&a));
    assert!(b.union(&a).ptr_eq(&a));
    assert!(a.union(&SharedSet::new()).ptr_eq(&a));
    assert!(a.without(&3).ptr_eq(&a));
    assert!(a.with(1).ptr_eq(&a));

    let abc = a.union(&c);
    assert!(!abc.ptr_eq(&a) && !abc.ptr_eq(&c));
    assert_eq!(abc, [1, 2, 3].into_iter().collect());
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert!(b.without(&2).is_empty());
}
