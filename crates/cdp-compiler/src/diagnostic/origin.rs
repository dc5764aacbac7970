//! Schema entity identity for error reporting.

use std::fmt;

/// The kind of schema member an [`EntityPath`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Type,
    Command,
    Event,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Type => "type",
            EntityKind::Command => "command",
            EntityKind::Event => "event",
        };
        f.write_str(name)
    }
}

/// Location of an entity in the protocol schema, e.g. `command Network.getCookies`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityPath {
    pub kind: EntityKind,
    pub domain: String,
    pub name: String,
}

impl EntityPath {
    /// Path of a type, command or event inside a domain.
    pub fn member(kind: EntityKind, domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// The dotted schema name, without the kind prefix.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain, self.name)
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}
