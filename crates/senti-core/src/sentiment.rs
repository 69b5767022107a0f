//! The three-way sentiment taxonomy every response is normalized onto.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical sentiment class.
///
/// Serialized as the upper-case names `NEGATIVE`, `NEUTRAL` and `POSITIVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Positive => "POSITIVE",
        }
    }

    /// Match one of the canonical names exactly. No case folding happens here;
    /// callers upper-case raw labels first.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEGATIVE" => Some(Self::Negative),
            "NEUTRAL" => Some(Self::Neutral),
            "POSITIVE" => Some(Self::Positive),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_names_only() {
        for s in Sentiment::ALL {
            assert_eq!(Sentiment::parse(s.as_str()), Some(s));
        }
        assert_eq!(Sentiment::parse("positive"), None);
        assert_eq!(Sentiment::parse("POS"), None);
        assert_eq!(Sentiment::parse(""), None);
    }

    #[test]
    fn serializes_as_upper_case() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
        let parsed: Sentiment = serde_json::from_str("\"NEUTRAL\"").unwrap();
        assert_eq!(parsed, Sentiment::Neutral);
    }
}
