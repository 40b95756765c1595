//! Sort direction for paged list endpoints.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Order in which a result sequence is paged.
///
/// Serialized as the integer `0` (insertion order) or `1` (reversed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Insertion order.
    #[default]
    Ascending,
    /// Reverse insertion order.
    Reverse,
}

impl SortDirection {
    /// Interpret a raw request value: anything non-empty other than `"0"` reverses.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("0") => Self::Ascending,
            Some(_) => Self::Reverse,
        }
    }

    /// The wire value, `0` or `1`.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Ascending => 0,
            Self::Reverse => 1,
        }
    }

    /// Whether the sequence must be reversed before slicing.
    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Ok(if value == 0 {
            Self::Ascending
        } else {
            Self::Reverse
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(SortDirection::from_raw(None), SortDirection::Ascending);
        assert_eq!(SortDirection::from_raw(Some("")), SortDirection::Ascending);
        assert_eq!(SortDirection::from_raw(Some("0")), SortDirection::Ascending);
        assert_eq!(SortDirection::from_raw(Some("1")), SortDirection::Reverse);
        assert_eq!(SortDirection::from_raw(Some("desc")), SortDirection::Reverse);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&SortDirection::Reverse).unwrap(), "1");
        assert_eq!(serde_json::to_string(&SortDirection::Ascending).unwrap(), "0");
    }
}
