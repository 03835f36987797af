//! Segment constraints
//!
//! A constraint decides whether a stringified segment value may be substituted
//! into a URL. Constraints come from two places:
//!
//! - the route-level constraint map (`constraints: { id: '\d+' }`), which is a
//!   regular expression matched against the whole value, ignoring ASCII case
//! - inline constraints in the pattern (`{id:int}`, `{slug:minlength(3)}`)
//!
//! Template generation never consults constraints; they only gate URL mode.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::RouteConfigError;

static GUID_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^(?:\{[0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12}\}|[0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12})$",
    )
    .ok()
});

/// Validation rule attached to a path segment
#[derive(Debug, Clone)]
pub enum Constraint {
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// `true` or `false`, any case
    Bool,
    /// One or more ASCII letters
    Alpha,
    /// Any finite decimal number
    Decimal,
    /// Any finite floating point number
    Double,
    /// Any finite single precision number
    Float,
    /// A GUID, with or without dashes and braces
    Guid,
    /// Integer greater than or equal to the bound
    Min(i64),
    /// Integer less than or equal to the bound
    Max(i64),
    /// Integer within the inclusive range
    Range(i64, i64),
    /// At least this many characters
    MinLength(usize),
    /// At most this many characters
    MaxLength(usize),
    /// Exactly this many characters
    Length(usize),
    /// Between the bounds (inclusive) in characters
    LengthRange(usize, usize),
    /// Regular expression
    Pattern(Regex),
}

impl Constraint {
    /// Build a route-level constraint from a regular expression
    ///
    /// The expression is anchored to the whole value and matched ignoring
    /// case, so `\d+` accepts `"123"` but rejects `"12a"`.
    pub fn pattern(segment: &str, expr: &str) -> Result<Self, RouteConfigError> {
        RegexBuilder::new(&format!("^(?:{})$", expr))
            .case_insensitive(true)
            .build()
            .map(Constraint::Pattern)
            .map_err(|e| RouteConfigError::InvalidConstraint {
                segment: segment.to_string(),
                constraint: expr.to_string(),
                reason: e.to_string(),
            })
    }

    /// Parse one inline constraint such as `int`, `min(3)` or `regex(^a+$)`
    ///
    /// Inline `regex(...)` expressions are used as written (not anchored).
    pub fn parse_inline(segment: &str, text: &str) -> Result<Self, RouteConfigError> {
        let invalid = |reason: &str| RouteConfigError::InvalidConstraint {
            segment: segment.to_string(),
            constraint: text.to_string(),
            reason: reason.to_string(),
        };

        let (kind, args) = match text.find('(') {
            Some(open) => {
                let args = text[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("missing closing ')'"))?;
                (&text[..open], Some(args))
            }
            None => (text, None),
        };

        let int_arg = |raw: &str| -> Result<i64, RouteConfigError> {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| invalid("expected an integer argument"))
        };
        let len_arg = |raw: &str| -> Result<usize, RouteConfigError> {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| invalid("expected a non-negative length"))
        };
        let constraint = match (kind.to_ascii_lowercase().as_str(), args) {
            ("int", None) => Constraint::Int,
            ("long", None) => Constraint::Long,
            ("bool", None) => Constraint::Bool,
            ("alpha", None) => Constraint::Alpha,
            ("decimal", None) => Constraint::Decimal,
            ("double", None) => Constraint::Double,
            ("float", None) => Constraint::Float,
            ("guid", None) => Constraint::Guid,
            ("min", Some(a)) => Constraint::Min(int_arg(a)?),
            ("max", Some(a)) => Constraint::Max(int_arg(a)?),
            ("range", Some(a)) => {
                let (lo, hi) = a
                    .split_once(',')
                    .ok_or_else(|| invalid("expected two comma separated arguments"))?;
                Constraint::Range(int_arg(lo)?, int_arg(hi)?)
            }
            ("minlength", Some(a)) => Constraint::MinLength(len_arg(a)?),
            ("maxlength", Some(a)) => Constraint::MaxLength(len_arg(a)?),
            ("length", Some(a)) => match a.split_once(',') {
                Some((lo, hi)) => Constraint::LengthRange(len_arg(lo)?, len_arg(hi)?),
                None => Constraint::Length(len_arg(a)?),
            },
            ("regex", Some(a)) => RegexBuilder::new(a)
                .case_insensitive(true)
                .build()
                .map(Constraint::Pattern)
                .map_err(|e| invalid(&e.to_string()))?,
            _ => return Err(invalid("unknown inline constraint")),
        };
        Ok(constraint)
    }

    /// Check a stringified segment value
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let finite = |v: &str| v.parse::<f64>().map(f64::is_finite).unwrap_or(false);
        match self {
            Constraint::Int => value.parse::<i32>().is_ok(),
            Constraint::Long => value.parse::<i64>().is_ok(),
            Constraint::Bool => {
                value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
            }
            Constraint::Alpha => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
            Constraint::Decimal | Constraint::Double => finite(value),
            Constraint::Float => value
                .parse::<f32>()
                .map(f32::is_finite)
                .unwrap_or(false),
            Constraint::Guid => GUID_RE
                .as_ref()
                .map(|re| re.is_match(value))
                .unwrap_or(false),
            Constraint::Min(min) => value.parse::<i64>().map(|v| v >= *min).unwrap_or(false),
            Constraint::Max(max) => value.parse::<i64>().map(|v| v <= *max).unwrap_or(false),
            Constraint::Range(lo, hi) => value
                .parse::<i64>()
                .map(|v| v >= *lo && v <= *hi)
                .unwrap_or(false),
            Constraint::MinLength(n) => value.chars().count() >= *n,
            Constraint::MaxLength(n) => value.chars().count() <= *n,
            Constraint::Length(n) => value.chars().count() == *n,
            Constraint::LengthRange(lo, hi) => {
                let len = value.chars().count();
                len >= *lo && len <= *hi
            }
            Constraint::Pattern(re) => re.is_match(value),
        }
    }
}
