//! Ordering predicates used by the ordered containers.

/// A strict weak ordering over `T`.
///
/// `less(a, b)` returns `true` if `a` is considered to go before `b`. Two values are equivalent
/// when neither goes before the other; ordered containers treat equivalent values as the same
/// key.
///
/// Any closure `Fn(&T, &T) -> bool` is a comparator.
///
/// # Examples
///
/// ```
/// use dsl_collections::compare::{Comparator, Natural, Reverse};
///
/// assert!(Natural.less(&1, &2));
/// assert!(Reverse.less(&2, &1));
///
/// let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
/// assert!(by_abs.equivalent(&-4, &4));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `a` goes before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither `a` nor `b` goes before the other.
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders values by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

/// Orders values by the reverse of their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reverse;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T> Comparator<T> for Reverse
where
    T: Ord + ?Sized,
{
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
