//! Generated database object names.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;

/// Prefix used for ephemeral test schemas.
pub const TEST_SCHEMA_PREFIX: &str = "test_";

/// Lowercase hex characters in a generated suffix (128 bits, 122 of them random).
pub const SUFFIX_LEN: usize = 32;

/// A generated, lowercase database object name.
///
/// Every character is in `[a-z0-9_]`, so an `Identifier` can be interpolated
/// into DDL without quoting. There is deliberately no `From<String>`: the only
/// way to obtain one is [`Identifier::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generate a fresh identifier: `prefix` followed by a random hex suffix.
    ///
    /// Never fails. The prefix is lowercased and any character outside
    /// `[a-z0-9_]` becomes `_`. A prefix starting with a digit gets a leading
    /// `_`; with an empty prefix the first suffix digit is shifted into
    /// `g..=p`, so the name never starts with a digit. Configured prefixes
    /// should still go through [`validate_prefix`](Self::validate_prefix) so
    /// typos are reported instead of rewritten.
    pub fn generate(prefix: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        let mut name = String::with_capacity(prefix.len() + SUFFIX_LEN + 1);
        name.extend(prefix.chars().map(safe_char));
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }

        let mut chars = suffix.chars();
        if name.is_empty() {
            name.extend(chars.next().map(leading_letter));
        }
        name.extend(chars);
        debug_assert!(is_safe(&name));
        Self(name)
    }

    /// Generate an identifier with the [`TEST_SCHEMA_PREFIX`].
    pub fn test_schema() -> Self {
        Self::generate(TEST_SCHEMA_PREFIX)
    }

    /// Check that a prefix only uses the DDL-safe alphabet.
    ///
    /// Empty prefixes are allowed. A non-empty prefix must start with a
    /// letter or underscore.
    pub fn validate_prefix(prefix: &str) -> CoreResult<()> {
        if prefix.is_empty() {
            return Ok(());
        }
        if let Some(c) = prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(CoreError::InvalidPrefix {
                prefix: prefix.to_string(),
                reason: format!("character '{}' is not allowed", c),
            });
        }
        if prefix.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(CoreError::InvalidPrefix {
                prefix: prefix.to_string(),
                reason: "must not start with a digit".to_string(),
            });
        }
        Ok(())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn safe_char(c: char) -> char {
    if c.is_ascii_alphanumeric() || c == '_' {
        c.to_ascii_lowercase()
    } else {
        '_'
    }
}

/// `0..=9` -> `g..=p`; hex letters are kept. Stays injective over hex digits.
fn leading_letter(c: char) -> char {
    match c {
        '0'..='9' => char::from(b'g' + (c as u8 - b'0')),
        _ => c,
    }
}

/// Unquoted-DDL safe: `[a-z0-9_]`, not starting with a digit
fn is_safe(name: &str) -> bool {
    !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Identifier {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
