use std::{borrow::Borrow, str::FromStr};

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

/// A validated GraphQL name.
///
/// Names must match `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(ArcStr);

impl Name {
    /// Checks whether the provided `input` is a valid GraphQL name.
    pub fn is_valid(input: &str) -> bool {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Returns this [`Name`] as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error of parsing an invalid GraphQL [`Name`].
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("Names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"{_0}\" does not")]
pub struct NameParseError(#[error(not(source))] ArcStr);

impl FromStr for Name {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.into()))
        } else {
            Err(NameParseError(s.into()))
        }
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Name> for ArcStr {
    fn from(name: Name) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::Name;

    #[test]
    fn name_is_valid() {
        assert!(Name::is_valid("Foo"));
        assert!(Name::is_valid("foo42"));
        assert!(Name::is_valid("_Foo"));
        assert!(Name::is_valid("_Foo42"));
        assert!(Name::is_valid("_foo42"));
        assert!(Name::is_valid("_42Foo"));
        assert!(Name::is_valid("__Schema"));

        assert!(!Name::is_valid(""));
        assert!(!Name::is_valid("42_Foo"));
        assert!(!Name::is_valid("Foo-42"));
        assert!(!Name::is_valid("Foo???"));
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "Foo-42".parse::<Name>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"Foo-42\" does not",
        );
    }
}
