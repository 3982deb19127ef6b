//! Closed intervals with optionally unbounded ends.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::{Domain, NullPolicy};

/// A closed interval `[low, high]`.
///
/// `None` on either side means the interval is unbounded on that side.
/// A single value `v` is represented as `[v, v]`.
///
/// # Invariants
///
/// - `low <= high` under the domain order, where an unbounded low sorts first
///   and an unbounded high sorts last.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Interval<T> {
    low: Option<T>,
    high: Option<T>,
}

impl<T> Interval<T> {
    /// The interval covering the whole domain.
    pub const fn full() -> Self {
        Self { low: None, high: None }
    }

    pub fn at_least(low: T) -> Self {
        Self { low: Some(low), high: None }
    }

    pub fn at_most(high: T) -> Self {
        Self { low: None, high: Some(high) }
    }

    pub fn low(&self) -> Option<&T> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&T> {
        self.high.as_ref()
    }

    pub fn is_full(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    pub fn into_bounds(self) -> (Option<T>, Option<T>) {
        (self.low, self.high)
    }

    /// Builds an interval from bounds assumed to be ordered.
    pub(crate) fn from_ordered(low: Option<T>, high: Option<T>) -> Self {
        Self { low, high }
    }

    pub(crate) fn set_high(&mut self, high: Option<T>) {
        self.high = high;
    }
}

impl<T: Clone> Interval<T> {
    pub fn single(value: T) -> Self {
        Self {
            low: Some(value.clone()),
            high: Some(value),
        }
    }
}

impl<T: Eq> Interval<T> {
    /// Returns true if the interval holds exactly one concrete value.
    pub fn is_single(&self) -> bool {
        matches!((&self.low, &self.high), (Some(a), Some(b)) if a == b)
    }
}

impl<T> Interval<T> {
    /// Builds an interval from two bounds, swapping them if they are given in reverse order.
    ///
    /// A `None` bound is taken as unbounded on the side it was given.
    pub fn new<D>(low: Option<T>, high: Option<T>) -> Self
    where
        D: Domain<Value = T>,
    {
        match (&low, &high) {
            (Some(a), Some(b)) if D::cmp_values(a, b) == Ordering::Greater => Self { low: high, high: low },
            _ => Self { low, high },
        }
    }
}

/// Compares two low bounds (unbounded sorts first).
pub(crate) fn cmp_low<D: Domain>(a: Option<&D::Value>, b: Option<&D::Value>) -> Ordering {
    D::compare(a, b, NullPolicy::NullIsLow)
}

/// Compares two high bounds (unbounded sorts last).
pub(crate) fn cmp_high<D: Domain>(a: Option<&D::Value>, b: Option<&D::Value>) -> Ordering {
    D::compare(a, b, NullPolicy::NullIsHigh)
}

/// Compares a high bound against a low bound.
///
/// An unbounded high is above everything and an unbounded low is below everything.
pub(crate) fn cmp_high_low<D: Domain>(high: Option<&D::Value>, low: Option<&D::Value>) -> Ordering {
    match (high, low) {
        (Some(h), Some(l)) => D::cmp_values(h, l),
        _ => Ordering::Greater,
    }
}

impl<T: fmt::Display + Eq> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            if let Some(v) = &self.low {
                return write!(f, "[{}]", v);
            }
        }
        match &self.low {
            Some(v) => write!(f, "[{}", v)?,
            None => write!(f, "(-inf")?,
        }
        write!(f, ", ")?;
        match &self.high {
            Some(v) => write!(f, "{}]", v),
            None => write!(f, "+inf)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::domain::Integer;

    #[test]
    fn test_new_orders_bounds() {
        let i = Interval::new::<Integer>(Some(9), Some(1));
        assert_eq!(i.low(), Some(&1));
        assert_eq!(i.high(), Some(&9));

        let i = Interval::new::<Integer>(None, Some(1));
        assert_eq!(i, Interval::at_most(1));
    }

    #[test]
    fn test_single() {
        assert!(Interval::single(5).is_single());
        assert!(!Interval::at_least(5).is_single());
        assert!(!Interval::<i64>::full().is_single());
        assert!(Interval::<i64>::full().is_full());
    }

    #[test]
    fn test_bound_comparisons() {
        assert_eq!(cmp_low::<Integer>(None, Some(&0)), Ordering::Less);
        assert_eq!(cmp_high::<Integer>(None, Some(&0)), Ordering::Greater);
        assert_eq!(cmp_high_low::<Integer>(Some(&3), Some(&4)), Ordering::Less);
        assert_eq!(cmp_high_low::<Integer>(Some(&4), Some(&4)), Ordering::Equal);
        assert_eq!(cmp_high_low::<Integer>(None, Some(&4)), Ordering::Greater);
        assert_eq!(cmp_high_low::<Integer>(Some(&3), None), Ordering::Greater);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::single(5).to_string(), "[5]");
        assert_eq!(Interval::new::<Integer>(Some(1), Some(3)).to_string(), "[1, 3]");
        assert_eq!(Interval::at_least(5).to_string(), "[5, +inf)");
        assert_eq!(Interval::<i64>::full().to_string(), "(-inf, +inf)");
    }
}
