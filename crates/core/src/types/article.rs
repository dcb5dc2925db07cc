//! Merchant-facing article codes.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors that can occur when parsing an [`Article`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ArticleError {
    /// The input string is empty.
    #[error("article cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("article cannot contain whitespace")]
    Whitespace,
}

/// A merchant-facing product code.
///
/// Articles identify products in the order payload sent to the host
/// application, and are distinct from the internal [`ProductId`]. Catalog
/// data may carry explicit articles; products without one get a code
/// derived from their id.
///
/// ## Constraints
///
/// - Must not be empty
/// - Must not contain whitespace (articles are joined with quantities into
///   a space-separated order line)
///
/// ## Examples
///
/// ```
/// use minimart_core::{Article, ProductId};
///
/// assert_eq!(Article::from_id(ProductId::new(42)).as_str(), "000042");
/// assert_eq!(Article::from_id(ProductId::new(1_234_567)).as_str(), "1234567");
///
/// assert!(Article::parse("SKU-9").is_ok());
/// assert!(Article::parse("").is_err());
/// assert!(Article::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Article(String);

impl Article {
    /// Width articles derived from an id are zero-padded to.
    pub const PAD_WIDTH: usize = 6;

    /// Parse an `Article` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, ArticleError> {
        if s.is_empty() {
            return Err(ArticleError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ArticleError::Whitespace);
        }
        Ok(Self(s.to_string()))
    }

    /// Derive an article from a product id, zero-padded to six digits.
    ///
    /// Ids wider than six digits keep their natural width.
    #[must_use]
    pub fn from_id(id: ProductId) -> Self {
        Self(format!("{:06}", id.as_i64()))
    }

    /// Get the article as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Article {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
