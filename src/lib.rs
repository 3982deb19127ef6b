//! # rangeset-rs: sets of scalar values as interval lists
//!
//! **`rangeset-rs`** represents sets of scalar values (integers, text) as a minimal, sorted list of
//! disjoint closed intervals, plus a flag telling whether the absent value (SQL `NULL`) is a member.
//! It is designed to carry filter conditions between an application and a PostgreSQL query layer.
//!
//! ## Key Features
//!
//! - **Canonical Form**: Every operation restores the sorted, disjoint, maximal invariant,
//!   so equal sets have equal representations. In discrete domains, adjacent intervals merge (`1-3,4-6` is `1-6`).
//! - **Set Algebra**: union ([`add`][crate::set::Set::add]), difference ([`remove`][crate::set::Set::remove]),
//!   subset test ([`contains`][crate::set::Set::contains]), complement ([`invert`][crate::set::Set::invert])
//!   and intersection, all as linear sweeps over the interval lists.
//! - **Compact Text Format**: `\0,1-3,5,10-` round-trips through [`Display`][std::fmt::Display] and
//!   [`Set::parse`][crate::set::Set::parse].
//! - **SQL Lowering**: a set becomes an `OR` of `IN`, `BETWEEN`, `<=`, `>=` and `IS NULL` fragments,
//!   with values quoted inline or passed as bind parameters.
//!
//! ## Basic Usage
//!
//! ```rust
//! use rangeset_rs::domain::Integer;
//! use rangeset_rs::set::Set;
//! use rangeset_rs::sql::StandardQuoter;
//!
//! // 1. Parse a set: 1 to 3, 5, and everything from 10 on
//! let mut set = Set::<Integer>::parse("1-3,5,10-")?;
//!
//! // 2. Add values; 4 fills the gap between 3 and 5
//! set.add(["4"])?;
//! assert_eq!(set.to_string(), "1-5,10-");
//!
//! // 3. Query membership
//! assert!(set.contains(["2-4,100"])?);
//! assert!(!set.contains_value(Some(&7)));
//!
//! // 4. Lower to SQL
//! let sql = set.with_identifier("age").to_sql(&StandardQuoter)?;
//! assert_eq!(sql, "( age >= 10 OR age BETWEEN 1 AND 5 )");
//! # Ok::<(), rangeset_rs::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`set`]**: The [`Set`][crate::set::Set] type and the interval algebra.
//! - **[`domain`]**: The [`Domain`][crate::domain::Domain] trait and the provided domains.
//! - **[`codec`]**: The text format.
//! - **[`sql`]**: SQL lowering.

pub mod codec;
pub mod domain;
pub mod error;
pub mod input;
pub mod interval;
pub mod set;
pub mod sql;

pub use domain::{Domain, Integer, Text};
pub use error::{Error, ParseError, Result, UsageError};
pub use input::Input;
pub use interval::Interval;
pub use set::Set;
