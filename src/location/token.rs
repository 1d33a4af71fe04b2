//! Location token grammar
//!
//! ```text
//! token      := "" | "item/" identifier
//! identifier := one or more non-whitespace characters
//! ```
//!
//! The empty token is the base location (no item shown). Everything that does
//! not match the grammar is a [`TokenError`], which callers treat as "no item".
//!
//! Identifiers are percent-encoded segment by segment, so `/` stays readable
//! and an item url with spaces or non-ASCII characters still forms a valid
//! token.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix that marks an item token
pub const ITEM_PREFIX: &str = "item/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Unknown location prefix: {0:?}")]
    UnknownPrefix(String),
    #[error("Missing item identifier")]
    EmptyIdentifier,
    #[error("Invalid item identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// A parsed location token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LocationToken {
    /// No item is shown
    #[default]
    Base,
    /// The item with this identifier is shown
    Item(String),
}

impl LocationToken {
    /// Token naming an item
    #[must_use]
    pub fn item(identifier: impl Into<String>) -> Self {
        Self::Item(identifier.into())
    }

    /// Parse a raw token
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` if `input` is neither empty nor `item/<identifier>`.
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        if input.is_empty() {
            return Ok(Self::Base);
        }

        let identifier = input
            .strip_prefix(ITEM_PREFIX)
            .ok_or_else(|| TokenError::UnknownPrefix(input.to_string()))?;

        if identifier.is_empty() {
            return Err(TokenError::EmptyIdentifier);
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(TokenError::InvalidIdentifier(identifier.to_string()));
        }

        let decoded = urlencoding::decode(identifier)
            .map_err(|_| TokenError::InvalidIdentifier(identifier.to_string()))?;
        Ok(Self::Item(decoded.into_owned()))
    }

    /// Identifier of the item, if any
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Base => None,
            Self::Item(id) => Some(id),
        }
    }

    /// Raw string form of this token
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LocationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => Ok(()),
            Self::Item(id) => {
                f.write_str(ITEM_PREFIX)?;
                for (i, segment) in id.split('/').enumerate() {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    f.write_str(&urlencoding::encode(segment))?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for LocationToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Decoded identifier named by a raw token, or `None` for base and malformed tokens
#[must_use]
pub fn parse_identifier(input: &str) -> Option<String> {
    match LocationToken::parse(input) {
        Ok(LocationToken::Item(id)) => Some(id),
        Ok(LocationToken::Base) => None,
        Err(e) => {
            log::debug!("Treating unparseable location {input:?} as no item: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base() {
        assert_eq!(LocationToken::parse("").unwrap(), LocationToken::Base);
    }

    #[test]
    fn test_parse_item() {
        let token: LocationToken = "item/photos/12.jpg".parse().unwrap();
        assert_eq!(token.identifier(), Some("photos/12.jpg"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            LocationToken::parse("photo/1.jpg"),
            Err(TokenError::UnknownPrefix("photo/1.jpg".into()))
        );
        assert_eq!(LocationToken::parse("item/"), Err(TokenError::EmptyIdentifier));
        assert_eq!(
            LocationToken::parse("item/a b"),
            Err(TokenError::InvalidIdentifier("a b".into()))
        );
        assert!(LocationToken::parse("item").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(LocationToken::Base.encode(), "");
        assert_eq!(LocationToken::item("photos/3.jpg").encode(), "item/photos/3.jpg");
    }

    #[test]
    fn test_encode_parse_identity() {
        for raw in ["", "item/x", "item/photos/1.jpg", "item/%20"] {
            let token = LocationToken::parse(raw).unwrap();
            assert_eq!(token.encode(), raw);
        }
    }

    #[test]
    fn test_whitespace_identifier_round_trip() {
        let token = LocationToken::item("my photo.jpg");
        assert_eq!(token.encode(), "item/my%20photo.jpg");
        assert_eq!(LocationToken::parse(&token.encode()), Ok(token));
    }

    #[test]
    fn test_encoding_keeps_path_separators() {
        let token = LocationToken::item("albums/summer 2016/ä.jpg");
        assert_eq!(token.encode(), "item/albums/summer%202016/%C3%A4.jpg");
        assert_eq!(token.encode().parse::<LocationToken>(), Ok(token));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8_escape() {
        assert!(matches!(
            LocationToken::parse("item/%FF"),
            Err(TokenError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_identifier("item/foo").as_deref(), Some("foo"));
        assert_eq!(parse_identifier("item/my%20photo.jpg").as_deref(), Some("my photo.jpg"));
        assert_eq!(parse_identifier(""), None);
        assert_eq!(parse_identifier("item/"), None);
        assert_eq!(parse_identifier("#item/foo"), None);
        assert_eq!(parse_identifier("item/\tfoo"), None);
    }
}
