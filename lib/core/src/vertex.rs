use crate::{Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A graph vertex identified by its 2-D coordinates.
///
/// Coordinates are always finite. Equality, hashing and ordering are exact
/// on the stored values, so a `Vertex` doubles as the adjacency key. The
/// ordering is lexicographic on `(x, y)` and serves as the tie-break for
/// every query that has to pick between equally distant candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    x: OrderedFloat<f64>,
    y: OrderedFloat<f64>,
}

impl Vertex {
    /// Create a vertex, rejecting NaN and infinities.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        Ok(Self {
            x: OrderedFloat(finite(x)?),
            y: OrderedFloat(finite(y)?),
        })
    }

    #[inline]
    pub fn from_pair(pair: [f64; 2]) -> Result<Self> {
        Self::new(pair[0], pair[1])
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x.into_inner()
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y.into_inner()
    }

    #[inline]
    #[must_use]
    pub fn coords(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }

    /// Canonical `"(x, y)"` key used at the description and API boundary.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

/// Euclidean distance between two vertices.
#[inline]
#[must_use]
pub fn distance(a: &Vertex, b: &Vertex) -> f64 {
    (b.x() - a.x()).hypot(b.y() - a.y())
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        // -0.0 + 0.0 == +0.0, keeps Display consistent with Eq
        Ok(value + 0.0)
    } else {
        Err(Error::InvalidCoordinate(value))
    }
}

/// Shortest round-trip decimal, always with a fractional part, switching to
/// exponent notation outside `1e-4 <= |v| < 1e16`.
fn format_coord(value: f64) -> String {
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_coord(self.x()), format_coord(self.y()))
    }
}

impl FromStr for Vertex {
    type Err = Error;

    /// Accepts the canonical `"(x, y)"` form as well as looser user input
    /// such as `"1,2"` or `"( 1 , 2 )"`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedKey(s.to_string());

        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(trimmed);

        let mut parts = inner.split(',');
        let (x, y) = match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (x.trim(), y.trim()),
            _ => return Err(malformed()),
        };

        let x: f64 = x.parse().map_err(|_| malformed())?;
        let y: f64 = y.parse().map_err(|_| malformed())?;
        Vertex::new(x, y)
    }
}

impl TryFrom<[f64; 2]> for Vertex {
    type Error = Error;

    fn try_from(pair: [f64; 2]) -> Result<Self> {
        Vertex::from_pair(pair)
    }
}

impl Serialize for Vertex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Vertex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
