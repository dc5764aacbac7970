//! Type reference tokens.

use std::fmt;
use std::str::FromStr;

/// A `$ref` token, either local (`Cookie`) or qualified (`Page.FrameId`).
///
/// This is a lookup key, not a pointer: it is resolved against the protocol
/// on demand, so recursive and mutually-referential types need no special
/// ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    domain: Option<String>,
    id: String,
}

impl TypeReference {
    /// A reference to a type in the referencing domain.
    pub fn local(id: impl Into<String>) -> Self {
        Self {
            domain: None,
            id: id.into(),
        }
    }

    /// A reference qualified with a domain name.
    pub fn qualified(domain: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            id: id.into(),
        }
    }

    /// The domain qualifier, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The type id without its qualifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl FromStr for TypeReference {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split('.').collect();
        match parts.as_slice() {
            [id] if !id.is_empty() => Ok(Self::local(*id)),
            [domain, id] if !domain.is_empty() && !id.is_empty() => Ok(Self::qualified(*domain, *id)),
            _ => Err(format!("malformed type reference '{}'", raw)),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "{}.{}", domain, self.id),
            None => f.write_str(&self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let local: TypeReference = "Cookie".parse().unwrap();
        assert_eq!(local.domain(), None);
        assert_eq!(local.id(), "Cookie");

        let qualified: TypeReference = "Page.FrameId".parse().unwrap();
        assert_eq!(qualified.domain(), Some("Page"));
        assert_eq!(qualified.id(), "FrameId");
        assert_eq!(qualified.to_string(), "Page.FrameId");
    }

    #[test]
    fn test_malformed() {
        assert!("".parse::<TypeReference>().is_err());
        assert!("Page.".parse::<TypeReference>().is_err());
        assert!("A.B.C".parse::<TypeReference>().is_err());
    }
}
