//! Lowering sets to SQL predicates.
//!
//! A set with an identifier attached (see [`Set::with_identifier`]) can be turned into a boolean
//! SQL expression that holds exactly when the identifier's value is a member of the set,
//! SQL `NULL` standing for the absent marker.
//!
//! The expression is an `OR` of the following fragments, in this order:
//!
//! - `x <= high` for an interval unbounded below,
//! - `x >= low` for an interval unbounded above,
//! - `x IN (v1, v2, ...)` for all single values,
//! - `x BETWEEN low AND high` for each bounded range,
//! - `x IS NULL` if the absent marker is a member.
//!
//! Bind parameters are numbered in the same order.
//!
//! Special cases: the empty set gives `FALSE`, the whole domain gives `x IS NOT NULL`,
//! and the whole domain with the absent marker gives `TRUE`.
//!
//! Values are either quoted inline through a [`Quote`] implementation ([`Set::to_sql`])
//! or passed as bind parameters ([`Set::to_sql_with_params`]).
//!
//! # Example
//!
//! ```
//! use rangeset_rs::domain::Integer;
//! use rangeset_rs::set::Set;
//! use rangeset_rs::sql::{SqlConfig, StandardQuoter};
//!
//! let set = Set::<Integer>::parse("\\0,1,3,10-20")?.with_identifier("x");
//! assert_eq!(set.to_sql(&StandardQuoter)?, "( x IN (1, 3) OR x BETWEEN 10 AND 20 OR x IS NULL )");
//!
//! let predicate = set.to_sql_with_params(&SqlConfig::default())?;
//! assert_eq!(predicate.sql, "( x IN ($1, $2) OR x BETWEEN $3 AND $4 OR x IS NULL )");
//! assert_eq!(predicate.params, vec![1, 3, 10, 20]);
//! # Ok::<(), rangeset_rs::error::Error>(())
//! ```

use log::debug;

use crate::domain::Domain;
use crate::error::{Error, Result, UsageError};
use crate::set::Set;

/// Turns a value into an SQL literal.
pub trait Quote<T> {
    fn quote(&self, value: &T) -> String;
}

impl<T, F> Quote<T> for F
where
    F: Fn(&T) -> String,
{
    fn quote(&self, value: &T) -> String {
        self(value)
    }
}

/// Quotes integers as decimal literals and text as standard single-quoted SQL strings.
#[derive(Debug, Copy, Clone, Default)]
pub struct StandardQuoter;

impl Quote<i64> for StandardQuoter {
    fn quote(&self, value: &i64) -> String {
        value.to_string()
    }
}

impl Quote<String> for StandardQuoter {
    fn quote(&self, value: &String) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Bind parameter syntax.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Placeholder {
    /// Numbered parameters, `$1`, `$2`, ... (PostgreSQL).
    #[default]
    Dollar,
    /// Positional parameters, `?`.
    Question,
}

/// Configuration for [`Set::to_sql_with_params`].
///
/// # Examples
///
/// ```
/// use rangeset_rs::sql::{Placeholder, SqlConfig};
///
/// // Parameters $3, $4, ... when $1 and $2 are taken by the rest of the query.
/// let config = SqlConfig::default().with_first_index(3);
/// assert_eq!(config.placeholder, Placeholder::Dollar);
/// ```
#[derive(Debug, Clone)]
pub struct SqlConfig {
    /// Placeholder syntax (default: `$n`)
    pub placeholder: Placeholder,
    /// Number of the first `$n` placeholder (default: 1)
    pub first_index: usize,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::Dollar,
            first_index: 1,
        }
    }
}

impl SqlConfig {
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_first_index(mut self, first_index: usize) -> Self {
        self.first_index = first_index;
        self
    }
}

/// An SQL expression together with the values bound to its placeholders, in order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SqlPredicate<T> {
    pub sql: String,
    pub params: Vec<T>,
}

/// Receives the values of the predicate as it is written.
trait Emitter<T> {
    fn literal(&mut self, value: &T) -> String;
}

struct Inline<'q, Q> {
    quoter: &'q Q,
}

impl<T, Q: Quote<T>> Emitter<T> for Inline<'_, Q> {
    fn literal(&mut self, value: &T) -> String {
        self.quoter.quote(value)
    }
}

struct Params<'c, T> {
    config: &'c SqlConfig,
    params: Vec<T>,
}

impl<T: Clone> Emitter<T> for Params<'_, T> {
    fn literal(&mut self, value: &T) -> String {
        let index = self.config.first_index + self.params.len();
        self.params.push(value.clone());
        match self.config.placeholder {
            Placeholder::Dollar => format!("${}", index),
            Placeholder::Question => "?".to_string(),
        }
    }
}

impl<D: Domain> Set<D> {
    /// Lowers the set to an SQL predicate with values quoted inline.
    pub fn to_sql<Q>(&self, quoter: &Q) -> Result<String>
    where
        Q: Quote<D::Value>,
    {
        self.lower(&mut Inline { quoter })
    }

    /// Lowers the set to an SQL predicate with values passed as bind parameters.
    pub fn to_sql_with_params(&self, config: &SqlConfig) -> Result<SqlPredicate<D::Value>> {
        let mut emitter = Params {
            config,
            params: Vec::new(),
        };
        let sql = self.lower(&mut emitter)?;
        Ok(SqlPredicate {
            sql,
            params: emitter.params,
        })
    }

    fn lower<E>(&self, emitter: &mut E) -> Result<String>
    where
        E: Emitter<D::Value>,
    {
        let identifier = self.identifier().ok_or(UsageError::MissingIdentifier)?;
        debug!("to_sql(set = {}, identifier = {})", self, identifier);

        if self.covers_domain() {
            return Ok(if self.contains_absent() {
                "TRUE".to_string()
            } else {
                format!("{} IS NOT NULL", identifier)
            });
        }

        let mut below = None;
        let mut above = None;
        let mut singles = Vec::new();
        let mut ranges = Vec::new();
        for interval in self.intervals() {
            match (interval.low(), interval.high()) {
                (None, Some(high)) => below = Some(high),
                (Some(low), None) => above = Some(low),
                (Some(low), Some(_)) if interval.is_single() => singles.push(low),
                (Some(low), Some(high)) => ranges.push((low, high)),
                (None, None) => {
                    return Err(Error::Invariant("full interval next to other intervals".to_string()));
                }
            }
        }

        let mut fragments = Vec::new();
        if let Some(high) = below {
            fragments.push(format!("{} <= {}", identifier, emitter.literal(high)));
        }
        if let Some(low) = above {
            fragments.push(format!("{} >= {}", identifier, emitter.literal(low)));
        }
        if !singles.is_empty() {
            let values: Vec<String> = singles.into_iter().map(|v| emitter.literal(v)).collect();
            fragments.push(format!("{} IN ({})", identifier, values.join(", ")));
        }
        for (low, high) in ranges {
            let low = emitter.literal(low);
            let high = emitter.literal(high);
            fragments.push(format!("{} BETWEEN {} AND {}", identifier, low, high));
        }
        if self.contains_absent() {
            fragments.push(format!("{} IS NULL", identifier));
        }

        if fragments.is_empty() {
            return Ok("FALSE".to_string());
        }
        Ok(format!("( {} )", fragments.join(" OR ")))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::domain::{Integer, Text};

    fn int(text: &str) -> Set<Integer> {
        Set::parse(text).unwrap().with_identifier("x")
    }

    #[test]
    fn test_lower_bound_only() {
        assert_eq!(int("5-").to_sql(&StandardQuoter).unwrap(), "( x >= 5 )");
        assert_eq!(int("-5").to_sql(&StandardQuoter).unwrap(), "( x <= 5 )");
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(int("").to_sql(&StandardQuoter).unwrap(), "FALSE");
        assert_eq!(int("-").to_sql(&StandardQuoter).unwrap(), "x IS NOT NULL");
        assert_eq!(int("\\0,-").to_sql(&StandardQuoter).unwrap(), "TRUE");
        assert_eq!(int("\\0").to_sql(&StandardQuoter).unwrap(), "( x IS NULL )");
    }

    #[test]
    fn test_all_fragments() {
        let set = int("\\0,-\\-10,1,3,5-7,9,20-30,100-");
        assert_eq!(
            set.to_sql(&StandardQuoter).unwrap(),
            "( x <= -10 OR x >= 100 OR x IN (1, 3, 9) OR x BETWEEN 5 AND 7 OR x BETWEEN 20 AND 30 OR x IS NULL )"
        );
    }

    #[test]
    fn test_domain_edges() {
        assert_eq!(
            int("\\-9223372036854775808-9223372036854775807")
                .to_sql(&StandardQuoter)
                .unwrap(),
            "x IS NOT NULL"
        );
        assert_eq!(
            int("\\-9223372036854775808-3").to_sql(&StandardQuoter).unwrap(),
            "( x <= 3 )"
        );
    }

    #[test]
    fn test_missing_identifier() {
        let set = Set::<Integer>::parse("1-3").unwrap();
        assert_eq!(
            set.to_sql(&StandardQuoter),
            Err(Error::Usage(UsageError::MissingIdentifier))
        );
        assert!(set.to_sql_with_params(&SqlConfig::default()).is_err());
    }

    #[test]
    fn test_text_quoting() {
        let set = Set::<Text>::parse("it's,plain").unwrap().with_identifier("name");
        assert_eq!(
            set.to_sql(&StandardQuoter).unwrap(),
            "( name IN ('it''s', 'plain') )"
        );
    }

    #[test]
    fn test_closure_quoter() {
        let set = int("1-2,4");
        let sql = set.to_sql(&|v: &i64| format!("{}::int8", v)).unwrap();
        assert_eq!(sql, "( x IN (4::int8) OR x BETWEEN 1::int8 AND 2::int8 )");
    }

    #[test]
    fn test_params_dollar() {
        let set = int("-0,2,4-6");
        let predicate = set
            .to_sql_with_params(&SqlConfig::default().with_first_index(3))
            .unwrap();
        assert_eq!(predicate.sql, "( x <= $3 OR x IN ($4) OR x BETWEEN $5 AND $6 )");
        assert_eq!(predicate.params, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_params_follow_fragment_order() {
        let predicate = int("-0,5,10-").to_sql_with_params(&SqlConfig::default()).unwrap();
        assert_eq!(predicate.sql, "( x <= $1 OR x >= $2 OR x IN ($3) )");
        assert_eq!(predicate.params, vec![0, 10, 5]);
    }

    #[test]
    fn test_params_question() {
        let set = int("\\0,7-");
        let config = SqlConfig::default().with_placeholder(Placeholder::Question);
        let predicate = set.to_sql_with_params(&config).unwrap();
        assert_eq!(predicate.sql, "( x >= ? OR x IS NULL )");
        assert_eq!(predicate.params, vec![7]);
    }
}
