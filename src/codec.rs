//! Text format for sets.
//!
//! ```text
//! set      := interval (',' interval)*
//! interval := bound | bound '-' bound
//! bound    := '' | escaped-text        (empty bound = unbounded)
//! ```
//!
//! The characters `\`, `-` and `,` are reserved and written with a leading backslash inside values.
//! The sequence `\0` stands for the absent marker and must form an interval on its own.
//!
//! Examples (integer domain):
//!
//! | Text        | Set                              |
//! |-------------|----------------------------------|
//! | `1-3,5`     | `[1, 3]`, `[5]`                  |
//! | `\0,5`      | absent, `[5]`                    |
//! | `5-`        | `[5, +inf)`                      |
//! | `-\-1`      | `(-inf, -1]`                     |
//! | `-`         | `(-inf, +inf)`                   |
//! | (empty)     | empty set                        |
//!
//! Parsing always yields a normalized set, so `1,2,3` reads back as `1-3`.
//! For any set `s`, `Set::parse(&s.to_string()) == s`.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::domain::Domain;
use crate::error::{Error, ParseError, Result};
use crate::interval::Interval;
use crate::set::Set;

pub const ESCAPE: char = '\\';
pub const RANGE_SEPARATOR: char = '-';
pub const INTERVAL_SEPARATOR: char = ',';
pub const ABSENT_MARKER: &str = "\\0";

/// Escapes the reserved characters of `token`.
pub fn escape_token(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        if matches!(c, ESCAPE | RANGE_SEPARATOR | INTERVAL_SEPARATOR) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// One bound of an interval, as read from the input.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Fragment {
    Text(String),
    Absent,
}

/// Scanner state for one interval.
struct IntervalParser<D: Domain> {
    first: Option<Fragment>,
    current: Fragment,
    intervals: Vec<Interval<D::Value>>,
    contains_absent: bool,
}

impl<D: Domain> IntervalParser<D> {
    fn new() -> Self {
        Self {
            first: None,
            current: Fragment::Text(String::new()),
            intervals: Vec::new(),
            contains_absent: false,
        }
    }

    fn push_char(&mut self, c: char, position: usize) -> Result<(), ParseError> {
        match &mut self.current {
            Fragment::Text(buffer) => {
                buffer.push(c);
                Ok(())
            }
            Fragment::Absent => Err(ParseError::MisplacedAbsent { position }),
        }
    }

    fn push_absent(&mut self, position: usize) -> Result<(), ParseError> {
        match &self.current {
            Fragment::Text(buffer) if buffer.is_empty() => {
                self.current = Fragment::Absent;
                Ok(())
            }
            _ => Err(ParseError::MisplacedAbsent { position }),
        }
    }

    fn start_high(&mut self, position: usize) -> Result<(), ParseError> {
        if self.first.is_some() {
            return Err(ParseError::TooManyFragments { position });
        }
        let low = std::mem::replace(&mut self.current, Fragment::Text(String::new()));
        self.first = Some(low);
        Ok(())
    }

    fn finish_interval(&mut self, position: usize) -> Result<(), ParseError> {
        let current = std::mem::replace(&mut self.current, Fragment::Text(String::new()));
        match self.first.take() {
            None => match current {
                Fragment::Absent => self.contains_absent = true,
                Fragment::Text(token) if token.is_empty() => {
                    return Err(ParseError::EmptyInterval { position });
                }
                Fragment::Text(token) => {
                    self.intervals.push(Interval::single(D::parse_token(&token)?));
                }
            },
            Some(first) => {
                let (Fragment::Text(low), Fragment::Text(high)) = (first, current) else {
                    return Err(ParseError::MisplacedAbsent { position });
                };
                let low = Self::bound(&low)?;
                let high = Self::bound(&high)?;
                self.intervals.push(Interval::new::<D>(low, high));
            }
        }
        Ok(())
    }

    fn bound(token: &str) -> Result<Option<D::Value>, ParseError> {
        if token.is_empty() {
            Ok(None)
        } else {
            D::parse_token(token).map(Some)
        }
    }
}

impl<D: Domain> Set<D> {
    /// Parses a set from its text form.
    pub fn parse(text: &str) -> Result<Self> {
        debug!("parse({:?})", text);

        if text.is_empty() {
            return Ok(Self::new());
        }

        let mut parser = IntervalParser::<D>::new();
        let mut escaped = false;
        let mut trailing_separator = None;

        for (position, c) in text.char_indices() {
            trailing_separator = None;
            if escaped {
                escaped = false;
                if c == '0' {
                    parser.push_absent(position)?;
                } else {
                    parser.push_char(c, position)?;
                }
                continue;
            }
            match c {
                ESCAPE => escaped = true,
                RANGE_SEPARATOR => parser.start_high(position)?,
                INTERVAL_SEPARATOR => {
                    parser.finish_interval(position)?;
                    trailing_separator = Some(position);
                }
                _ => parser.push_char(c, position)?,
            }
        }

        if escaped {
            return Err(ParseError::UnterminatedEscape.into());
        }
        if let Some(position) = trailing_separator {
            return Err(ParseError::TrailingSeparator { position }.into());
        }
        parser.finish_interval(text.len())?;

        Ok(Self::from_raw(parser.intervals, parser.contains_absent))
    }
}

impl<D: Domain> FromStr for Set<D> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<D: Domain> fmt::Display for Set<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.contains_absent() {
            f.write_str(ABSENT_MARKER)?;
            first = false;
        }
        for interval in self.intervals() {
            if !first {
                write!(f, "{}", INTERVAL_SEPARATOR)?;
            }
            first = false;

            if interval.is_single() {
                if let Some(value) = interval.low() {
                    f.write_str(&D::escape(value))?;
                    continue;
                }
            }
            if let Some(low) = interval.low() {
                f.write_str(&D::escape(low))?;
            }
            write!(f, "{}", RANGE_SEPARATOR)?;
            if let Some(high) = interval.high() {
                f.write_str(&D::escape(high))?;
            }
        }
        Ok(())
    }
}
