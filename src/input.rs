//! Inputs accepted by the set operations.
//!
//! [`Set::add`][crate::set::Set::add], [`Set::remove`][crate::set::Set::remove] and
//! [`Set::contains`][crate::set::Set::contains] all take a list of [`Input`]s, which are
//! first folded into a single set.

use crate::codec::escape_token;
use crate::domain::Domain;
use crate::error::{Result, UsageError};
use crate::set::Set;

#[derive(Debug)]
pub enum Input<D: Domain> {
    /// Another set, merged as is.
    Set(Set<D>),
    /// Discrete values. Each `Some` becomes a single-value interval, each `None` the absent marker.
    /// Values rejected by [`Domain::validate`] make the input fail.
    Values(Vec<Option<D::Value>>),
    /// The absent marker on its own.
    Absent,
    /// An integer literal, read through the text format.
    Integer(i64),
    /// A string in the text format.
    Text(String),
    /// A floating-point scalar. Not supported by any domain.
    Float(f64),
    /// A boolean scalar. Not supported by any domain.
    Boolean(bool),
}

impl<D: Domain> Input<D> {
    /// Folds this input into a set.
    pub fn into_set(self) -> Result<Set<D>> {
        match self {
            Input::Set(set) => Ok(set),
            Input::Values(values) => Set::from_values(values),
            Input::Absent => {
                let mut set = Set::new();
                set.set_absent(true);
                Ok(set)
            }
            Input::Integer(value) => Set::parse(&escape_token(&value.to_string())),
            Input::Text(text) => Set::parse(&text),
            Input::Float(_) => Err(UsageError::UnsupportedLiteral {
                domain: D::NAME,
                kind: "float",
            }
            .into()),
            Input::Boolean(_) => Err(UsageError::UnsupportedLiteral {
                domain: D::NAME,
                kind: "boolean",
            }
            .into()),
        }
    }
}

impl<D: Domain> From<Set<D>> for Input<D> {
    fn from(set: Set<D>) -> Self {
        Input::Set(set)
    }
}

impl<D: Domain> From<&Set<D>> for Input<D> {
    fn from(set: &Set<D>) -> Self {
        Input::Set(set.clone())
    }
}

impl<D: Domain> From<Vec<Option<D::Value>>> for Input<D> {
    fn from(values: Vec<Option<D::Value>>) -> Self {
        Input::Values(values)
    }
}

impl<D: Domain> From<i64> for Input<D> {
    fn from(value: i64) -> Self {
        Input::Integer(value)
    }
}

impl<D: Domain> From<&str> for Input<D> {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl<D: Domain> From<String> for Input<D> {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl<D: Domain> From<f64> for Input<D> {
    fn from(value: f64) -> Self {
        Input::Float(value)
    }
}

impl<D: Domain> From<bool> for Input<D> {
    fn from(value: bool) -> Self {
        Input::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::domain::{Integer, Text};
    use crate::error::Error;

    #[test]
    fn test_integer_literal() {
        let set = Input::<Integer>::Integer(-4).into_set().unwrap();
        assert_eq!(set.to_string(), "\\-4");
        assert!(set.contains_value(Some(&-4)));
    }

    #[test]
    fn test_text_literal() {
        let set = Input::<Integer>::from("1-3,7").into_set().unwrap();
        assert_eq!(set.to_string(), "1-3,7");
    }

    #[test]
    fn test_values() {
        let set = Input::<Text>::from(vec![Some("b".to_string()), None, Some("a".to_string())])
            .into_set()
            .unwrap();
        assert!(set.contains_absent());
        assert_eq!(set.to_string(), "\\0,a,b");
    }

    #[test]
    fn test_values_reject_empty_text() {
        let err = Input::<Text>::from(vec![Some("a".to_string()), Some(String::new())])
            .into_set()
            .unwrap_err();
        assert_eq!(
            err,
            Error::Usage(UsageError::UnwritableValue {
                domain: "text",
                value: String::new(),
            })
        );
    }

    #[test]
    fn test_absent() {
        let set = Input::<Integer>::Absent.into_set().unwrap();
        assert!(set.contains_absent());
        assert!(set.is_empty());
    }

    #[test]
    fn test_unsupported_scalars() {
        let err = Input::<Integer>::from(1.5).into_set().unwrap_err();
        assert_eq!(
            err,
            Error::Usage(UsageError::UnsupportedLiteral {
                domain: "integer",
                kind: "float",
            })
        );
        assert!(Input::<Text>::from(true).into_set().is_err());
    }
}
