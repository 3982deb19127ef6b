//! Sets of scalar values stored as sorted, disjoint intervals.
//!
//! A [`Set`] describes which values of `Option<T>` are members: the concrete values `Some(v)` are
//! covered by a list of closed [`Interval`]s, and the absent value `None` by a separate flag.
//!
//! # Invariants
//!
//! After every operation, the interval list is:
//!
//! - **sorted** ascending by low bound,
//! - **disjoint**: no two intervals share a value,
//! - **maximal**: no two intervals touch. In a discrete domain, `[1, 3]` and `[4, 6]` touch
//!   (the successor of 3 is 4) and are stored as `[1, 6]`.
//!
//! - **open at the domain edges**: a bound with no predecessor (low side) or no successor
//!   (high side) is stored as unbounded, so `[i64::MIN, 5]` is `(-inf, 5]`.
//!
//! These invariants make the representation canonical: two sets hold the same values
//! if and only if their interval lists and absent flags are equal.
//!
//! # Example
//!
//! ```
//! use rangeset_rs::domain::Integer;
//! use rangeset_rs::set::Set;
//!
//! let mut set = Set::<Integer>::parse("1-3,4-6,10-")?;
//! assert_eq!(set.to_string(), "1-6,10-");
//!
//! set.remove(["5-12"])?;
//! assert_eq!(set.to_string(), "1-4,13-");
//!
//! set.invert()?;
//! assert_eq!(set.to_string(), "\\0,-0,5-12");
//! # Ok::<(), rangeset_rs::error::Error>(())
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

use log::{debug, trace};
use num_bigint::BigUint;

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::interval::{cmp_high, cmp_high_low, cmp_low, Interval};

#[derive(Debug, Clone)]
pub struct Set<D: Domain> {
    intervals: Vec<Interval<D::Value>>,
    contains_absent: bool,
    identifier: Option<String>,
    _domain: PhantomData<D>,
}

impl<D: Domain> Set<D> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            contains_absent: false,
            identifier: None,
            _domain: PhantomData,
        }
    }

    /// Creates an empty set. Same as [`Set::new`].
    pub fn empty() -> Self {
        Self::new()
    }

    /// Creates the set of every value, absent included.
    pub fn full() -> Self {
        let mut set = Self::new();
        set.all();
        set
    }

    /// Creates a set holding the union of all `inputs`.
    pub fn from_inputs<I>(inputs: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Input<D>>,
    {
        let mut set = Self::new();
        set.add(inputs)?;
        Ok(set)
    }

    /// Creates a set from discrete values. `None` stands for the absent marker.
    ///
    /// Fails with [`UsageError::UnwritableValue`][crate::error::UsageError::UnwritableValue]
    /// if a value is rejected by [`Domain::validate`].
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<D::Value>>,
    {
        let mut contains_absent = false;
        let mut raw = Vec::new();
        for value in values {
            match value {
                Some(v) => {
                    D::validate(&v)?;
                    raw.push(Interval::single(v));
                }
                None => contains_absent = true,
            }
        }
        Ok(Self::from_raw(raw, contains_absent))
    }

    /// Builds a set from arbitrary (possibly overlapping, unsorted) intervals.
    pub fn from_intervals<I>(intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = Interval<D::Value>>,
    {
        let raw: Vec<_> = intervals.into_iter().collect();
        for interval in &raw {
            for bound in [interval.low(), interval.high()].into_iter().flatten() {
                D::validate(bound)?;
            }
        }
        Ok(Self::from_raw(raw, false))
    }

    pub(crate) fn from_raw(raw: Vec<Interval<D::Value>>, contains_absent: bool) -> Self {
        Self {
            intervals: normalize::<D>(raw),
            contains_absent,
            identifier: None,
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> Default for Set<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> PartialEq for Set<D> {
    fn eq(&self, other: &Self) -> bool {
        self.contains_absent == other.contains_absent && self.intervals == other.intervals
    }
}

impl<D: Domain> Eq for Set<D> {}

impl<D: Domain> Set<D> {
    pub fn intervals(&self) -> &[Interval<D::Value>] {
        &self.intervals
    }

    /// Returns true if the absent marker is a member.
    pub fn contains_absent(&self) -> bool {
        self.contains_absent
    }

    pub fn set_absent(&mut self, contains_absent: bool) {
        self.contains_absent = contains_absent;
    }

    /// Returns true if no concrete value is a member. The absent flag is not considered.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns true if the set covers the whole domain and the absent marker.
    pub fn is_all(&self) -> bool {
        self.contains_absent && self.covers_domain()
    }

    pub(crate) fn covers_domain(&self) -> bool {
        matches!(self.intervals.as_slice(), [only] if only.is_full())
    }

    /// Counts the absent marker: 1 if it is a member, 0 otherwise.
    ///
    /// Concrete values are not counted; see [`Set::cardinality`] for that.
    pub fn absent_count(&self) -> usize {
        self.contains_absent as usize
    }

    /// Number of concrete values in the set.
    ///
    /// Returns `None` if an interval is unbounded (this includes intervals reaching a domain edge)
    /// or the domain cannot count its values.
    pub fn cardinality(&self) -> Option<BigUint> {
        let mut total = BigUint::default();
        for interval in &self.intervals {
            let (Some(low), Some(high)) = (interval.low(), interval.high()) else {
                return None;
            };
            total += D::span(low, high)?;
        }
        Some(total)
    }

    /// Returns true if `value` is a member. `None` tests the absent marker.
    pub fn contains_value(&self, value: Option<&D::Value>) -> bool {
        let Some(value) = value else {
            return self.contains_absent;
        };
        let index = self
            .intervals
            .partition_point(|interval| cmp_high_low::<D>(interval.high(), Some(value)) == Ordering::Less);
        match self.intervals.get(index) {
            Some(interval) => cmp_low::<D>(interval.low(), Some(value)) != Ordering::Greater,
            None => false,
        }
    }
}

impl<D: Domain> Set<D> {
    /// Adds every value of `inputs` to the set.
    pub fn add<I>(&mut self, inputs: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Input<D>>,
    {
        let mut raw = Vec::new();
        let mut contains_absent = self.contains_absent;
        for input in inputs {
            let input: Input<D> = input.into();
            let set = input.into_set()?;
            contains_absent |= set.contains_absent;
            raw.extend(set.intervals);
        }
        debug!("add(self = {}, {} new intervals)", self, raw.len());

        raw.extend(self.intervals.drain(..));
        self.intervals = normalize::<D>(raw);
        self.contains_absent = contains_absent;
        Ok(self)
    }

    /// Removes every value of `inputs` from the set.
    ///
    /// Trimming an interval at a finite bound requires a discrete domain.
    /// On error the set is left unchanged.
    pub fn remove<I>(&mut self, inputs: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Input<D>>,
    {
        let removal = Self::from_inputs(inputs)?;
        debug!("remove(self = {}, removal = {})", self, removal);

        self.intervals = subtract::<D>(&self.intervals, &removal.intervals)?;
        if removal.contains_absent {
            self.contains_absent = false;
        }
        Ok(self)
    }

    /// Returns true if every value of `inputs` is a member of the set.
    pub fn contains<I>(&self, inputs: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<Input<D>>,
    {
        let other = Self::from_inputs(inputs)?;
        Ok(self.contains_set(&other))
    }

    /// Returns true if `other` is a subset of this set.
    pub fn contains_set(&self, other: &Self) -> bool {
        debug!("contains(self = {}, other = {})", self, other);

        if !self.contains_absent && other.contains_absent {
            return false;
        }

        let mut i = 0;
        for interval in &other.intervals {
            while i < self.intervals.len()
                && cmp_high_low::<D>(self.intervals[i].high(), interval.low()) == Ordering::Less
            {
                i += 1;
            }
            let Some(outer) = self.intervals.get(i) else {
                return false;
            };
            if cmp_low::<D>(outer.low(), interval.low()) == Ordering::Greater
                || cmp_high::<D>(interval.high(), outer.high()) == Ordering::Greater
            {
                return false;
            }
        }
        true
    }

    /// Replaces the set with its complement, absent marker included.
    ///
    /// Beyond the trivial cases (empty set, whole domain), this needs a discrete domain:
    /// every finite bound is stepped over with [`Domain::successor`] or [`Domain::predecessor`].
    /// On error the set is left unchanged.
    pub fn invert(&mut self) -> Result<&mut Self> {
        debug!("invert(self = {})", self);

        let gaps = if self.covers_domain() {
            Vec::new()
        } else {
            complement::<D>(&self.intervals)?
        };
        self.intervals = gaps;
        self.contains_absent = !self.contains_absent;
        Ok(self)
    }

    /// Makes the set hold every value, absent included.
    pub fn all(&mut self) -> &mut Self {
        self.intervals = vec![Interval::full()];
        self.contains_absent = true;
        self
    }

    /// Makes the set empty, absent excluded.
    pub fn none(&mut self) -> &mut Self {
        self.intervals.clear();
        self.contains_absent = false;
        self
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut raw = self.intervals.clone();
        raw.extend_from_slice(&other.intervals);
        let mut set = Self::from_raw(raw, self.contains_absent || other.contains_absent);
        set.identifier = self.identifier.clone();
        set
    }

    pub fn difference(&self, other: &Self) -> Result<Self> {
        let mut set = self.clone();
        set.intervals = subtract::<D>(&self.intervals, &other.intervals)?;
        if other.contains_absent {
            set.contains_absent = false;
        }
        Ok(set)
    }

    /// Values present in both sets. Works for continuous domains as well.
    pub fn intersection(&self, other: &Self) -> Self {
        debug!("intersection(self = {}, other = {})", self, other);

        let (a, b) = (&self.intervals, &other.intervals);
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let low = match cmp_low::<D>(a[i].low(), b[j].low()) {
                Ordering::Less => b[j].low(),
                _ => a[i].low(),
            };
            let high = match cmp_high::<D>(a[i].high(), b[j].high()) {
                Ordering::Greater => b[j].high(),
                _ => a[i].high(),
            };
            if cmp_high_low::<D>(high, low) != Ordering::Less {
                result.push(Interval::from_ordered(low.cloned(), high.cloned()));
            }
            if cmp_high::<D>(a[i].high(), b[j].high()) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }

        let mut set = Self::from_raw(Vec::new(), self.contains_absent && other.contains_absent);
        set.intervals = result;
        set.identifier = self.identifier.clone();
        set
    }
}

impl<D: Domain> Set<D> {
    /// The SQL expression this set is compared against when lowered.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = Some(identifier.into());
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.set_identifier(identifier);
        self
    }
}

/// Sorts `raw` and merges overlapping or touching intervals.
///
/// Sorting by low bound ascending, then high bound descending, lets a single sweep
/// fold each interval into the last emitted one.
fn normalize<D: Domain>(raw: Vec<Interval<D::Value>>) -> Vec<Interval<D::Value>> {
    let mut raw: Vec<_> = raw.into_iter().map(open_edges::<D>).collect();
    raw.sort_by(|a, b| cmp_low::<D>(a.low(), b.low()).then_with(|| cmp_high::<D>(b.high(), a.high())));

    let mut merged: Vec<Interval<D::Value>> = Vec::with_capacity(raw.len());
    for next in raw {
        if let Some(last) = merged.last_mut() {
            if touches::<D>(last, &next) {
                if cmp_high::<D>(next.high(), last.high()) == Ordering::Greater {
                    let (_, high) = next.into_bounds();
                    last.set_high(high);
                }
                continue;
            }
        }
        merged.push(next);
    }
    merged
}

/// Drops bounds sitting on the edge of a bounded domain.
///
/// A low bound without predecessor holds the same values as no low bound at all (same for a high
/// bound without successor), so `[i64::MIN, 5]` is stored as `(-inf, 5]`.
fn open_edges<D: Domain>(interval: Interval<D::Value>) -> Interval<D::Value> {
    if !D::is_discrete() {
        return interval;
    }
    let (low, high) = interval.into_bounds();
    let low = low.filter(|v| !matches!(D::predecessor(v), Ok(None)));
    let high = high.filter(|v| !matches!(D::successor(v), Ok(None)));
    Interval::from_ordered(low, high)
}

/// Returns true if `next` (whose low bound is not below `prev`'s) overlaps or directly follows `prev`.
fn touches<D: Domain>(prev: &Interval<D::Value>, next: &Interval<D::Value>) -> bool {
    if cmp_high_low::<D>(prev.high(), next.low()) != Ordering::Less {
        return true;
    }
    if !D::is_discrete() {
        return false;
    }
    match (prev.high(), next.low()) {
        (Some(high), Some(low)) => match D::successor(high) {
            Ok(Some(succ)) => D::cmp_values(&succ, low) == Ordering::Equal,
            _ => false,
        },
        _ => false,
    }
}

/// Interval `[low, pred(bound)]`, or `None` if it is empty.
fn below<D: Domain>(low: Option<&D::Value>, bound: Option<&D::Value>) -> Result<Option<Interval<D::Value>>> {
    let Some(bound) = bound else {
        return Err(Error::Invariant("unbounded low edge inside an interval".to_string()));
    };
    Ok(D::predecessor(bound)?.map(|high| Interval::from_ordered(low.cloned(), Some(high))))
}

/// Interval `[succ(bound), high]`, or `None` if it is empty.
fn above<D: Domain>(bound: Option<&D::Value>, high: Option<&D::Value>) -> Result<Option<Interval<D::Value>>> {
    let Some(bound) = bound else {
        return Err(Error::Invariant("unbounded high edge inside an interval".to_string()));
    };
    Ok(D::successor(bound)?.map(|low| Interval::from_ordered(Some(low), high.cloned())))
}

/// Difference of two normalized interval lists.
fn subtract<D: Domain>(
    current: &[Interval<D::Value>],
    removal: &[Interval<D::Value>],
) -> Result<Vec<Interval<D::Value>>> {
    let mut result = Vec::with_capacity(current.len());
    let mut i = 0;
    let mut j = 0;
    let mut pending = current.first().cloned();

    while let Some(c) = pending.take() {
        let Some(r) = removal.get(j) else {
            result.push(c);
            result.extend_from_slice(&current[i + 1..]);
            break;
        };

        // Current entirely below removal.
        if cmp_high_low::<D>(c.high(), r.low()) == Ordering::Less {
            trace!("remove: keep {:?}", c);
            result.push(c);
            i += 1;
            pending = current.get(i).cloned();
            continue;
        }

        // Removal entirely below current.
        if cmp_high_low::<D>(r.high(), c.low()) == Ordering::Less {
            j += 1;
            pending = Some(c);
            continue;
        }

        let low_covered = cmp_low::<D>(r.low(), c.low()) != Ordering::Greater;
        let high_covered = cmp_high::<D>(c.high(), r.high()) != Ordering::Greater;

        match (low_covered, high_covered) {
            (true, true) => {
                trace!("remove: drop {:?}", c);
                i += 1;
                pending = current.get(i).cloned();
            }
            (false, false) => {
                trace!("remove: split {:?} around {:?}", c, r);
                result.extend(below::<D>(c.low(), r.low())?);
                pending = above::<D>(r.high(), c.high())?;
                j += 1;
                if pending.is_none() {
                    i += 1;
                    pending = current.get(i).cloned();
                }
            }
            (false, true) => {
                trace!("remove: trim upper edge of {:?}", c);
                result.extend(below::<D>(c.low(), r.low())?);
                i += 1;
                pending = current.get(i).cloned();
            }
            (true, false) => {
                trace!("remove: trim lower edge of {:?}", c);
                pending = above::<D>(r.high(), c.high())?;
                j += 1;
                if pending.is_none() {
                    i += 1;
                    pending = current.get(i).cloned();
                }
            }
        }
    }

    Ok(result)
}

/// Gaps between the intervals of a normalized list, from -inf to +inf.
fn complement<D: Domain>(intervals: &[Interval<D::Value>]) -> Result<Vec<Interval<D::Value>>> {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return Ok(vec![Interval::full()]);
    };

    let mut gaps = Vec::with_capacity(intervals.len() + 1);

    if let Some(low) = first.low() {
        if let Some(pred) = D::predecessor(low)? {
            gaps.push(Interval::at_most(pred));
        }
    }

    for pair in intervals.windows(2) {
        let (Some(high), Some(low)) = (pair[0].high(), pair[1].low()) else {
            return Err(Error::Invariant("unbounded edge between two intervals".to_string()));
        };
        match (D::successor(high)?, D::predecessor(low)?) {
            (Some(from), Some(to)) if D::cmp_values(&from, &to) != Ordering::Greater => {
                gaps.push(Interval::from_ordered(Some(from), Some(to)));
            }
            _ => {
                return Err(Error::Invariant("adjacent intervals left unmerged".to_string()));
            }
        }
    }

    if let Some(high) = last.high() {
        if let Some(succ) = D::successor(high)? {
            gaps.push(Interval::at_least(succ));
        }
    }

    Ok(gaps)
}
