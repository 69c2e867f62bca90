use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the lower and upper half of a difference string
const SEPARATOR: &str = "..";

/// Errors produced while parsing a difference string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("malformed range expression: {0:?}")]
    Malformed(String),

    #[error("range expression {0:?} is unbounded in both directions")]
    Unbounded(String),

    #[error("lower bound is greater than upper bound in {0:?}")]
    Inverted(String),

    #[error("invalid value {value:?}: {reason}")]
    InvalidValue { value: String, reason: String },
}

/// Inclusive range over any ordered value
///
/// Parsed from a difference string:
/// - `"4"` matches exactly 4
/// - `"4.."` matches anything >= 4
/// - `"..4"` matches anything <= 4
/// - `"4..6"` matches 4, 5 and 6
///
/// A predicate with neither bound matches everything. It can only be built
/// with [`RangePredicate::unbounded`]; the parser rejects `".."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePredicate<T> {
    lower: Option<T>,
    upper: Option<T>,
}

impl<T: PartialOrd + Clone> RangePredicate<T> {
    pub fn exact(value: T) -> Self {
        Self {
            lower: Some(value.clone()),
            upper: Some(value),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Build a range from optional bounds, rejecting `lower > upper`
    pub fn new(lower: Option<T>, upper: Option<T>) -> Option<Self> {
        match (&lower, &upper) {
            (Some(l), Some(u)) if l > u => None,
            _ => Some(Self { lower, upper }),
        }
    }

    pub fn lower(&self) -> Option<&T> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&T> {
        self.upper.as_ref()
    }

    /// Check whether `value` lies within the range (both ends inclusive)
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        if let Some(lower) = &self.lower {
            if value < lower {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if value > upper {
                return false;
            }
        }
        true
    }

    /// Parse a difference string, converting each endpoint with `convert`
    ///
    /// Conversion failures surface as [`RangeError::InvalidValue`], distinct
    /// from grammar errors.
    pub fn parse_with<F, E>(spec: &str, convert: F) -> Result<Self, RangeError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let convert = |part: &str| {
            convert(part).map_err(|e| RangeError::InvalidValue {
                value: part.to_string(),
                reason: e.to_string(),
            })
        };

        let parts: Vec<&str> = spec.split(SEPARATOR).collect();

        match parts.as_slice() {
            [exact] if !exact.is_empty() => Ok(Self::exact(convert(*exact)?)),
            ["", ""] => Err(RangeError::Unbounded(spec.to_string())),
            ["", upper] => Ok(Self {
                lower: None,
                upper: Some(convert(*upper)?),
            }),
            [lower, ""] => Ok(Self {
                lower: Some(convert(*lower)?),
                upper: None,
            }),
            [lower, upper] => {
                let lower = convert(*lower)?;
                let upper = convert(*upper)?;
                Self::new(Some(lower), Some(upper))
                    .ok_or_else(|| RangeError::Inverted(spec.to_string()))
            }
            _ => Err(RangeError::Malformed(spec.to_string())),
        }
    }
}

impl<T> FromStr for RangePredicate<T>
where
    T: FromStr + PartialOrd + Clone,
    T::Err: fmt::Display,
{
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, str::parse)
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for RangePredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(l), Some(u)) if l == u => write!(f, "{}", l),
            (Some(l), Some(u)) => write!(f, "{}{}{}", l, SEPARATOR, u),
            (Some(l), None) => write!(f, "{}{}", l, SEPARATOR),
            (None, Some(u)) => write!(f, "{}{}", SEPARATOR, u),
            (None, None) => f.write_str(SEPARATOR),
        }
    }
}

/// Parse a difference string over integers
pub fn parse_difference_string(spec: &str) -> Result<RangePredicate<i64>, RangeError> {
    spec.parse()
}
