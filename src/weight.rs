//! Item weights with lenient coercion.
//!
//! Weights usually come straight out of spreadsheet exports (search volume,
//! clicks, impressions), so they arrive as numbers, numeric strings with
//! thousands separators, blanks, or junk like `"n/a"`. Anything that is not
//! a usable number becomes `0`, and the weight remembers that it was coerced:
//! a coerced zero never wins a tie against a supplied weight.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric weight attached to an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    value: f64,
    supplied: bool,
}

impl Weight {
    /// The weight every malformed or missing value is coerced to.
    pub const ZERO: Weight = Weight {
        value: 0.0,
        supplied: false,
    };

    /// Create a weight from a raw value. `NaN` is coerced to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self {
            // -0.0 ranks below 0.0 under total ordering
            value: if value == 0.0 { 0.0 } else { value },
            supplied: true,
        }
    }

    /// Parse a weight leniently.
    ///
    /// Surrounding whitespace and `,` / `_` digit separators are ignored.
    /// Anything else that fails to parse yields [`Weight::ZERO`].
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        match cleaned.parse::<f64>() {
            Ok(v) => Self::new(v),
            Err(_) => Self::ZERO,
        }
    }

    /// The numeric value used for comparison.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Whether the value was supplied, as opposed to coerced from a missing
    /// or malformed input.
    pub fn is_supplied(self) -> bool {
        self.supplied
    }

    /// Ranking order used for representative selection: by value, then
    /// supplied weights above coerced ones.
    pub fn rank(self, other: Weight) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.supplied.cmp(&other.supplied))
    }

    /// True if `self` strictly beats `other`. Equal ranks do not, so the
    /// earlier item keeps its place.
    pub fn outranks(self, other: Weight) -> bool {
        self.rank(other) == Ordering::Greater
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<f32> for Weight {
    fn from(value: f32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<u32> for Weight {
    fn from(value: u32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<i32> for Weight {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<u64> for Weight {
    fn from(value: u64) -> Self {
        Self::new(value as f64)
    }
}

impl From<i64> for Weight {
    fn from(value: i64) -> Self {
        Self::new(value as f64)
    }
}

impl From<&str> for Weight {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Weight {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl<T: Into<Weight>> From<Option<T>> for Weight {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::ZERO, Into::into)
    }
}

/// A supplied weight serialises as its number, a coerced one as `null`
/// (an absent field in formats without null), so reading it back yields
/// [`Weight::ZERO`] again rather than a supplied `0`.
impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.supplied {
            serializer.serialize_f64(self.value)
        } else {
            serializer.serialize_none()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<RawWeight>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawWeight::Number(v)) => Weight::new(v),
            Some(RawWeight::Text(s)) => Weight::parse(&s),
            Some(RawWeight::Other(_)) | None => Weight::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Weight::parse("1,200").value(), 1200.0);
        assert_eq!(Weight::parse("  40 ").value(), 40.0);
        assert_eq!(Weight::parse("2.5").value(), 2.5);
        assert!(Weight::parse("7").is_supplied());
    }

    #[test]
    fn test_malformed_is_coerced() {
        for raw in ["", "n/a", "-", "twelve"] {
            let w = Weight::parse(raw);
            assert_eq!(w.value(), 0.0, "{raw:?}");
            assert!(!w.is_supplied(), "{raw:?}");
        }
        assert_eq!(Weight::new(f64::NAN), Weight::ZERO);
        assert_eq!(Weight::from(None::<f64>), Weight::ZERO);
    }

    #[test]
    fn test_coerced_never_outranks_supplied_zero() {
        let supplied = Weight::new(0.0);
        assert!(supplied.outranks(Weight::ZERO));
        assert!(!Weight::ZERO.outranks(supplied));
        assert!(!supplied.outranks(Weight::new(0.0)));
    }

    #[test]
    fn test_negative_loses_to_coerced() {
        assert!(Weight::ZERO.outranks(Weight::new(-3.0)));
    }

    #[test]
    fn test_deserialize_lenient() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            volume: Weight,
        }

        let row: Row = toml::from_str("volume = \"1,900\"").unwrap();
        assert_eq!(row.volume, Weight::new(1900.0));
        let row: Row = toml::from_str("volume = 320").unwrap();
        assert_eq!(row.volume, Weight::new(320.0));
        let row: Row = toml::from_str("volume = true").unwrap();
        assert_eq!(row.volume, Weight::ZERO);
        let row: Row = toml::from_str("").unwrap();
        assert_eq!(row.volume, Weight::ZERO);
    }

    #[test]
    fn test_serialize_keeps_coercion() {
        #[derive(Serialize, Deserialize)]
        struct Row {
            #[serde(default)]
            volume: Weight,
        }

        let text = toml::to_string(&Row { volume: Weight::ZERO }).unwrap();
        let back: Row = toml::from_str(&text).unwrap();
        assert_eq!(back.volume, Weight::ZERO);
        assert!(!back.volume.is_supplied());

        let text = toml::to_string(&Row { volume: Weight::new(0.0) }).unwrap();
        let back: Row = toml::from_str(&text).unwrap();
        assert!(back.volume.is_supplied());
        assert!(back.volume.outranks(Weight::ZERO));

        let text = toml::to_string(&Row { volume: Weight::new(1900.0) }).unwrap();
        let back: Row = toml::from_str(&text).unwrap();
        assert_eq!(back.volume, Weight::new(1900.0));
    }

    #[test]
    fn test_from_option_str() {
        assert_eq!(Weight::from(Some("15")).value(), 15.0);
        assert_eq!(Weight::from(None::<&str>), Weight::ZERO);
    }
}
