//! Generated artifacts and their case-insensitive collection.

use indexmap::IndexMap;

use crate::diagnostic::{EntityPath, GeneratorError};

/// What an artifact declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Record for an object type.
    Record,
    /// Symbolic constants for an enum type.
    Enum,
    /// Command parameters.
    Parameters,
    /// Command result.
    Result,
    /// Event payload.
    Event,
}

/// One unit of generated source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// `Domain.Ident`, unique across the run ignoring case.
    pub name: String,
    /// Identifier declared by the text.
    pub ident: String,
    pub domain: String,
    pub kind: ArtifactKind,
    /// The schema entity that produced the artifact.
    pub origin: EntityPath,
    pub text: String,
}

impl Artifact {
    pub fn new(domain: &str, ident: String, kind: ArtifactKind, origin: EntityPath, text: String) -> Self {
        Self {
            name: format!("{}.{}", domain, ident),
            ident,
            domain: domain.to_string(),
            kind,
            origin,
            text,
        }
    }
}

/// Artifacts in insertion order, keyed by lower-cased name.
///
/// Inserting a name that is already present (in any casing) is an error and
/// leaves the map unchanged.
#[derive(Debug, Clone, Default)]
pub struct ArtifactMap {
    entries: IndexMap<String, Artifact>,
}

impl ArtifactMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact, failing on a case-insensitive name collision.
    pub fn insert(&mut self, artifact: Artifact) -> Result<(), GeneratorError> {
        let key = artifact.name.to_lowercase();
        if let Some(existing) = self.entries.get(&key) {
            return Err(GeneratorError::DuplicateArtifact {
                name: artifact.name,
                existing: existing.name.clone(),
                first: existing.origin.clone(),
                second: artifact.origin,
            });
        }
        self.entries.insert(key, artifact);
        Ok(())
    }

    /// Moves every artifact of `other` into this map, in order. Stops at the
    /// first collision.
    pub fn merge(&mut self, other: ArtifactMap) -> Result<(), GeneratorError> {
        for artifact in other.entries.into_values() {
            self.insert(artifact)?;
        }
        Ok(())
    }

    /// Looks up an artifact by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.entries.values()
    }

    /// Artifact names with their original casing.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|a| a.name.as_str()).collect()
    }
}

impl IntoIterator for ArtifactMap {
    type Item = Artifact;
    type IntoIter = indexmap::map::IntoValues<String, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::EntityKind;

    fn artifact(domain: &str, ident: &str, origin: &str) -> Artifact {
        Artifact::new(
            domain,
            ident.to_string(),
            ArtifactKind::Record,
            EntityPath::member(EntityKind::Type, domain, origin),
            format!("// {}", ident),
        )
    }

    #[test]
    fn test_insert_and_lookup_ignore_case() {
        let mut map = ArtifactMap::new();
        map.insert(artifact("Network", "Cookie", "Cookie")).unwrap();

        assert!(map.contains("network.cookie"));
        assert_eq!(map.get("NETWORK.COOKIE").unwrap().name, "Network.Cookie");
    }

    #[test]
    fn test_collision_is_rejected() {
        let mut map = ArtifactMap::new();
        map.insert(artifact("Network", "ClearParams", "ClearParams")).unwrap();

        let err = map.insert(artifact("Network", "clearParams", "clear")).unwrap_err();
        match err {
            GeneratorError::DuplicateArtifact { name, existing, first, second } => {
                assert_eq!(name, "Network.clearParams");
                assert_eq!(existing, "Network.ClearParams");
                assert_eq!(first.name, "ClearParams");
                assert_eq!(second.name, "clear");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("network.clearparams").unwrap().text, "// ClearParams");
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut left = ArtifactMap::new();
        left.insert(artifact("Page", "Frame", "Frame")).unwrap();

        let mut right = ArtifactMap::new();
        right.insert(artifact("Network", "Cookie", "Cookie")).unwrap();
        right.insert(artifact("Network", "Request", "Request")).unwrap();

        left.merge(right).unwrap();
        assert_eq!(left.names(), vec!["Page.Frame", "Network.Cookie", "Network.Request"]);
    }
}
