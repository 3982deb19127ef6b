//! Value domains.
//!
//! A [`Domain`] is a policy type describing the scalar values a [`Set`][crate::set::Set] holds:
//! how they are ordered, whether they are discrete (have successors and predecessors),
//! and how they are written in the text format.
//!
//! Two domains are provided:
//!
//! - [`Integer`]: signed 64-bit integers. Discrete, so `1-3,4-6` collapses into `1-6`.
//! - [`Text`]: free text ordered bytewise. Continuous, so distinct values never merge.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use num_bigint::BigUint;

use crate::codec::escape_token;
use crate::error::{ParseError, UsageError};

/// Where an unbounded (`None`) bound sorts relative to concrete values.
///
/// Low bounds are compared with [`NullPolicy::NullIsLow`], high bounds with [`NullPolicy::NullIsHigh`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NullPolicy {
    NullIsLow,
    NullIsHigh,
}

pub trait Domain: Debug + Copy + Default + Eq + 'static {
    type Value: Debug + Clone + Eq + Hash;

    /// Human-readable name, used in error messages.
    const NAME: &'static str;

    /// Total order over concrete values.
    fn cmp_values(a: &Self::Value, b: &Self::Value) -> Ordering;

    /// Total order over bounds, where `None` stands for an unbounded side.
    fn compare(a: Option<&Self::Value>, b: Option<&Self::Value>, policy: NullPolicy) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match policy {
                NullPolicy::NullIsLow => Ordering::Less,
                NullPolicy::NullIsHigh => Ordering::Greater,
            },
            (Some(_), None) => match policy {
                NullPolicy::NullIsLow => Ordering::Greater,
                NullPolicy::NullIsHigh => Ordering::Less,
            },
            (Some(a), Some(b)) => Self::cmp_values(a, b),
        }
    }

    fn is_discrete() -> bool {
        false
    }

    /// The next value after `value`.
    ///
    /// Returns `Ok(None)` when `value` is the largest value of the domain,
    /// and an error when the domain is not discrete.
    fn successor(value: &Self::Value) -> Result<Option<Self::Value>, UsageError> {
        let _ = value;
        Err(UsageError::NotDiscrete {
            domain: Self::NAME,
            operation: "successor",
        })
    }

    /// The value right before `value`. See [`Domain::successor`].
    fn predecessor(value: &Self::Value) -> Result<Option<Self::Value>, UsageError> {
        let _ = value;
        Err(UsageError::NotDiscrete {
            domain: Self::NAME,
            operation: "predecessor",
        })
    }

    /// Parses one unescaped, non-empty token.
    fn parse_token(token: &str) -> Result<Self::Value, ParseError>;

    /// Checks that `value` can be written as a token, so that it survives a trip through the text format.
    fn validate(value: &Self::Value) -> Result<(), UsageError> {
        let _ = value;
        Ok(())
    }

    /// Formats a value as an unescaped token.
    fn format_token(value: &Self::Value) -> String;

    /// Formats a value as a token with the reserved characters escaped.
    fn escape(value: &Self::Value) -> String {
        escape_token(&Self::format_token(value))
    }

    /// Number of values in the closed range `[low, high]`, if the domain can count them.
    fn span(low: &Self::Value, high: &Self::Value) -> Option<BigUint> {
        let _ = (low, high);
        None
    }
}

/// Signed 64-bit integers.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Integer;

impl Domain for Integer {
    type Value = i64;

    const NAME: &'static str = "integer";

    fn cmp_values(a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }

    fn is_discrete() -> bool {
        true
    }

    fn successor(value: &i64) -> Result<Option<i64>, UsageError> {
        Ok(value.checked_add(1))
    }

    fn predecessor(value: &i64) -> Result<Option<i64>, UsageError> {
        Ok(value.checked_sub(1))
    }

    fn parse_token(token: &str) -> Result<i64, ParseError> {
        token.parse::<i64>().map_err(|e| ParseError::InvalidToken {
            token: token.to_string(),
            domain: Self::NAME,
            reason: e.to_string(),
        })
    }

    fn format_token(value: &i64) -> String {
        value.to_string()
    }

    fn span(low: &i64, high: &i64) -> Option<BigUint> {
        if low > high {
            return None;
        }
        // Fits in u64 for any pair of i64, but the +1 may not.
        let width = (*high as i128 - *low as i128) as u128 + 1;
        Some(BigUint::from(width))
    }
}

/// Free text, ordered bytewise.
///
/// The empty string is not a value of this domain: in the text format an empty bound means "unbounded".
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Text;

impl Domain for Text {
    type Value = String;

    const NAME: &'static str = "text";

    fn cmp_values(a: &String, b: &String) -> Ordering {
        a.as_bytes().cmp(b.as_bytes())
    }

    fn parse_token(token: &str) -> Result<String, ParseError> {
        Ok(token.to_string())
    }

    fn validate(value: &String) -> Result<(), UsageError> {
        if value.is_empty() {
            return Err(UsageError::UnwritableValue {
                domain: Self::NAME,
                value: value.clone(),
            });
        }
        Ok(())
    }

    fn format_token(value: &String) -> String {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_compare_null_policy() {
        use NullPolicy::*;

        assert_eq!(Integer::compare(None, Some(&5), NullIsLow), Ordering::Less);
        assert_eq!(Integer::compare(None, Some(&5), NullIsHigh), Ordering::Greater);
        assert_eq!(Integer::compare(Some(&5), None, NullIsLow), Ordering::Greater);
        assert_eq!(Integer::compare(Some(&5), None, NullIsHigh), Ordering::Less);
        assert_eq!(Integer::compare(None, None, NullIsHigh), Ordering::Equal);
        assert_eq!(Integer::compare(Some(&3), Some(&5), NullIsHigh), Ordering::Less);
    }

    #[test]
    fn test_integer_neighbours() {
        assert!(Integer::is_discrete());
        assert_eq!(Integer::successor(&3), Ok(Some(4)));
        assert_eq!(Integer::predecessor(&3), Ok(Some(2)));
        assert_eq!(Integer::successor(&i64::MAX), Ok(None));
        assert_eq!(Integer::predecessor(&i64::MIN), Ok(None));
    }

    #[test]
    fn test_text_is_continuous() {
        assert!(!Text::is_discrete());
        assert_eq!(
            Text::successor(&"a".to_string()),
            Err(UsageError::NotDiscrete {
                domain: "text",
                operation: "successor",
            })
        );
    }

    #[test]
    fn test_integer_tokens() {
        assert_eq!(Integer::parse_token("42"), Ok(42));
        assert_eq!(Integer::parse_token("-7"), Ok(-7));
        assert!(matches!(
            Integer::parse_token("abc"),
            Err(ParseError::InvalidToken { domain: "integer", .. })
        ));
        assert!(Integer::parse_token(" 1").is_err());
        assert!(Integer::parse_token("3 ").is_err());
        assert_eq!(Integer::escape(&-7), "\\-7");
        assert_eq!(Integer::escape(&12), "12");
    }

    #[test]
    fn test_text_rejects_empty_string() {
        assert_eq!(
            Text::validate(&String::new()),
            Err(UsageError::UnwritableValue {
                domain: "text",
                value: String::new(),
            })
        );
        assert_eq!(Text::validate(&" ".to_string()), Ok(()));
        assert_eq!(Integer::validate(&0), Ok(()));
    }

    #[test]
    fn test_text_escape() {
        assert_eq!(Text::escape(&"a-b,c\\d".to_string()), "a\\-b\\,c\\\\d");
        assert_eq!(Text::escape(&"plain".to_string()), "plain");
    }

    #[test]
    fn test_integer_span() {
        assert_eq!(Integer::span(&1, &3), Some(BigUint::from(3u32)));
        assert_eq!(Integer::span(&5, &5), Some(BigUint::from(1u32)));
        assert_eq!(
            Integer::span(&i64::MIN, &i64::MAX),
            Some(BigUint::from(u64::MAX) + 1u32)
        );
        assert_eq!(Text::span(&"a".to_string(), &"b".to_string()), None);
    }
}
