use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Page number accepted in place of a token for the first page.
///
/// Some consumers of 1-indexed paginators always ask for page `1` first.
pub const FIRST_PAGE_NUMBER: u64 = 1;

/// An opaque position in the ordering.
///
/// On the wire a token is a nullable string: `Absent` is `null`, `Boundary`
/// is the empty string and `Value` is any other string. Token values are
/// opaque even when they look numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PageToken {
    /// No token: the first page.
    #[default]
    Absent,
    /// The empty-string sentinel: there is no previous page, but the caller
    /// arrived from a later one.
    Boundary,
    /// Colon-separated field values of one record.
    Value(String),
}

impl PageToken {
    /// Creates a token from its string form, mapping `""` to [`Boundary`].
    ///
    /// [`Boundary`]: PageToken::Boundary
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Boundary
        } else {
            Self::Value(value)
        }
    }

    /// Returns whether no token is present.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns whether this is the empty-string sentinel.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary)
    }

    /// Returns whether a token is present, including the boundary sentinel.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Returns the string form, `Some("")` for the boundary sentinel.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Boundary => Some(""),
            Self::Value(value) => Some(value),
        }
    }

    /// Returns the encoded field values, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Option<String>> for PageToken {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::new)
    }
}

impl From<PageToken> for Option<String> {
    fn from(token: PageToken) -> Self {
        match token {
            PageToken::Absent => None,
            PageToken::Boundary => Some(String::new()),
            PageToken::Value(value) => Some(value),
        }
    }
}

impl From<String> for PageToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for PageToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(value) => write!(f, "{value:?}"),
            None => write!(f, "null"),
        }
    }
}

/// What a caller asks the paginator for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// A 1-indexed page number; only [`FIRST_PAGE_NUMBER`] is supported.
    Number(u64),
    /// A token previously returned by the paginator.
    Token(PageToken),
}

impl PageRequest {
    /// Requests the first page.
    pub fn first() -> Self {
        Self::Token(PageToken::Absent)
    }

    /// Resolves the request to the token it stands for.
    ///
    /// Keyset pagination cannot jump to an arbitrary page, so any page number
    /// other than the first is an [`InvalidToken`] error.
    ///
    /// [`InvalidToken`]: crate::ErrorKind::InvalidToken
    pub fn into_token(self) -> Result<PageToken> {
        match self {
            Self::Token(token) => Ok(token),
            Self::Number(FIRST_PAGE_NUMBER) => Ok(PageToken::Absent),
            Self::Number(number) => Err(Error::invalid_token().with_message(format!(
                "page number {number} is not supported, use tokens past the first page"
            ))),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl From<PageToken> for PageRequest {
    fn from(token: PageToken) -> Self {
        Self::Token(token)
    }
}

impl From<&PageToken> for PageRequest {
    fn from(token: &PageToken) -> Self {
        Self::Token(token.clone())
    }
}

impl From<u64> for PageRequest {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for PageRequest {
    fn from(value: &str) -> Self {
        Self::Token(PageToken::new(value))
    }
}

impl From<String> for PageRequest {
    fn from(value: String) -> Self {
        Self::Token(PageToken::new(value))
    }
}

impl From<Option<String>> for PageRequest {
    fn from(value: Option<String>) -> Self {
        Self::Token(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn empty_string_is_boundary() {
        assert_eq!(PageToken::new(""), PageToken::Boundary);
        assert_eq!(PageToken::from(Some(String::new())), PageToken::Boundary);
        assert_eq!(PageToken::from(None), PageToken::Absent);
        assert_eq!(PageToken::from("25"), PageToken::Value("25".into()));
    }

    #[test]
    fn string_forms() {
        assert_eq!(PageToken::Absent.as_str(), None);
        assert_eq!(PageToken::Boundary.as_str(), Some(""));
        assert_eq!(PageToken::new("3:b").as_str(), Some("3:b"));
        assert_eq!(PageToken::Boundary.value(), None);

        assert_eq!(PageToken::Absent.to_string(), "null");
        assert_eq!(PageToken::Boundary.to_string(), "\"\"");
        assert_eq!(PageToken::new("7").to_string(), "\"7\"");
    }

    #[test]
    fn serde_distinguishes_all_three_states() {
        let json = serde_json::to_string(&[
            PageToken::Absent,
            PageToken::Boundary,
            PageToken::new("11"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,"","11"]"#);

        let tokens: Vec<PageToken> = serde_json::from_str(&json).unwrap();
        assert_eq!(tokens[0], PageToken::Absent);
        assert_eq!(tokens[1], PageToken::Boundary);
        assert_eq!(tokens[2], PageToken::Value("11".into()));
    }

    #[test]
    fn first_page_number_is_absent() {
        let token = PageRequest::Number(FIRST_PAGE_NUMBER).into_token().unwrap();
        assert_eq!(token, PageToken::Absent);

        let err = PageRequest::Number(2).into_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn numeric_looking_tokens_stay_opaque() {
        let request = PageRequest::from("1");
        assert_eq!(request.into_token().unwrap(), PageToken::Value("1".into()));
    }
}
