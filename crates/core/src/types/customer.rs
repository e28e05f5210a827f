//! Customer contact details captured on the checkout form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating customer details.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// The name is empty after trimming.
    #[error("name is required")]
    EmptyName,
    /// The email is empty after trimming.
    #[error("email is required")]
    EmptyEmail,
    /// The email is longer than allowed.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The email has no `@`, or nothing on one side of it.
    #[error("email address is not valid")]
    MalformedEmail,
}

/// An email address.
///
/// Validation is structural only: a non-empty local part and domain
/// separated by a single `@`, at most 254 characters (RFC 5321).
///
/// ```
/// use vibe_commerce_core::Email;
///
/// assert!(Email::parse("jane@example.com").is_ok());
/// assert!(Email::parse("  jane@example.com  ").is_ok());
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("jane").is_err());
/// assert!(Email::parse("@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace first.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, too long, or not
    /// shaped like `local@domain`.
    pub fn parse(input: &str) -> Result<Self, CustomerError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(CustomerError::EmptyEmail);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(CustomerError::EmailTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(CustomerError::MalformedEmail),
        }
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A customer's full name, trimmed and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
    /// Parse a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::EmptyName`] if nothing remains after trimming.
    pub fn parse(input: &str) -> Result<Self, CustomerError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(CustomerError::EmptyName);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated contact details for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: CustomerName,
    pub email: Email,
}

impl CustomerDetails {
    /// Validate raw form input.
    ///
    /// The name is checked before the email so the first missing field is
    /// the one reported.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn parse(name: &str, email: &str) -> Result<Self, CustomerError> {
        Ok(Self {
            name: CustomerName::parse(name)?,
            email: Email::parse(email)?,
        })
    }
}
