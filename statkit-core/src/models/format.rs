//! Response formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Output format requested from the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON, decoded into a value.
    #[default]
    Json,
    /// XML text.
    Xml,
    /// Comma separated values.
    Csv,
    /// Tab separated values.
    Tsv,
    /// HTML table.
    Html,
    /// RSS feed.
    Rss,
    /// Passthrough: the raw HTTP response is handed back untouched.
    Original,
}

impl ResponseFormat {
    /// Wire spelling of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Html => "html",
            Self::Rss => "rss",
            Self::Original => "original",
        }
    }

    /// Returns all formats.
    pub fn all() -> &'static [ResponseFormat] {
        &[
            Self::Json,
            Self::Xml,
            Self::Csv,
            Self::Tsv,
            Self::Html,
            Self::Rss,
            Self::Original,
        ]
    }

    /// Returns true if responses in this format are decoded as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns true if responses are returned without decoding.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Original)
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .find(|f| f.as_str() == lower)
            .copied()
            .ok_or_else(|| CoreError::InvalidFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("JSON".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!(" tsv ".parse::<ResponseFormat>().unwrap(), ResponseFormat::Tsv);
        assert!("yaml".parse::<ResponseFormat>().is_err());
    }

    #[test]
    fn test_display_matches_wire_spelling() {
        for format in ResponseFormat::all() {
            assert_eq!(format.to_string().parse::<ResponseFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_passthrough() {
        assert!(ResponseFormat::Original.is_passthrough());
        assert!(!ResponseFormat::Json.is_passthrough());
        assert!(ResponseFormat::default().is_json());
    }
}
