//! The protocol schema model.
//!
//! A [`ProtocolDefinition`] owns its domains in declaration order; each
//! [`DomainDefinition`] owns its types, commands and events. Types refer to
//! each other through [`TypeReference`] lookup keys, never through pointers,
//! so recursive and cross-domain type graphs need no shared ownership.
//!
//! The model deserializes directly from the JSON protocol document:
//!
//! ```json
//! { "version": { "major": "1", "minor": "3" },
//!   "domains": [{ "domain": "Network", "dependencies": ["Page"],
//!                 "types": [...], "commands": [...], "events": [...] }] }
//! ```

mod command;
mod domain;
mod event;
mod reference;
mod types;

pub use command::{CommandDefinition, Redirect};
pub use domain::DomainDefinition;
pub use event::EventDefinition;
pub use reference::TypeReference;
pub use types::{Primitive, PropertyDefinition, TypeDefinition, TypeShape};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::diagnostic::GeneratorError;

/// Protocol version as declared by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: String,
    pub minor: String,
}

/// A single protocol JSON document.
#[derive(Debug, Deserialize)]
struct ProtocolDocument {
    #[serde(default)]
    version: Option<ProtocolVersion>,
    domains: Vec<DomainDefinition>,
}

/// The whole protocol: every domain, in declaration order.
#[derive(Debug, Clone)]
pub struct ProtocolDefinition {
    version: Option<ProtocolVersion>,
    domains: Vec<DomainDefinition>,
    /// Domain name to position in `domains`.
    index: HashMap<String, usize>,
}

impl ProtocolDefinition {
    /// Builds a protocol from domains, rejecting names that collide
    /// case-insensitively.
    pub fn new(domains: Vec<DomainDefinition>) -> Result<Self, GeneratorError> {
        let mut index = HashMap::with_capacity(domains.len());
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(domains.len());

        for (position, domain) in domains.iter().enumerate() {
            if let Some(&existing) = seen.get(&domain.name.to_lowercase()) {
                return Err(GeneratorError::DuplicateDomain {
                    name: domain.name.clone(),
                    existing: domains[existing].name.clone(),
                });
            }
            seen.insert(domain.name.to_lowercase(), position);
            index.insert(domain.name.clone(), position);
        }

        Ok(Self {
            version: None,
            domains,
            index,
        })
    }

    /// Parses a single protocol document.
    pub fn from_json(text: &str) -> Result<Self, GeneratorError> {
        Self::from_documents([text])
    }

    /// Parses and merges several protocol documents (for example the browser
    /// and JavaScript halves of the DevTools protocol). Domains keep the order
    /// of the documents; the first declared version wins.
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a str>) -> Result<Self, GeneratorError> {
        let mut version = None;
        let mut domains = Vec::new();

        for text in documents {
            let document: ProtocolDocument =
                serde_json::from_str(text).map_err(|e| GeneratorError::InvalidSchema {
                    message: e.to_string(),
                })?;
            if version.is_none() {
                version = document.version;
            }
            domains.extend(document.domains);
        }

        let mut protocol = Self::new(domains)?;
        protocol.version = version;
        Ok(protocol)
    }

    /// Loads and merges protocol documents from files.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, GeneratorError> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .map_err(|e| GeneratorError::io(path, e.to_string()))?;
            debug!(path = %path.display(), "loaded protocol document");
            documents.push(content);
        }
        Self::from_documents(documents.iter().map(String::as_str))
    }

    /// Loads every `*.json` document below `dir`, in file name order.
    pub fn load_dir(dir: &Path) -> Result<Self, GeneratorError> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| GeneratorError::io(dir, e.to_string()))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path.to_path_buf());
            }
        }

        if paths.is_empty() {
            return Err(GeneratorError::io(dir, "no protocol documents (*.json) found"));
        }

        Self::load(&paths)
    }

    pub fn version(&self) -> Option<&ProtocolVersion> {
        self.version.as_ref()
    }

    /// All domains in declaration order.
    pub fn domains(&self) -> &[DomainDefinition] {
        &self.domains
    }

    /// Looks up a domain by name.
    pub fn domain(&self, name: &str) -> Option<&DomainDefinition> {
        self.position(name).map(|i| &self.domains[i])
    }

    /// Declaration position of a domain.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_document() {
        let text = json!({
            "version": { "major": "1", "minor": "3" },
            "domains": [
                { "domain": "Page", "types": [{ "id": "FrameId", "type": "string" }] },
                { "domain": "Network", "dependencies": ["Page"] }
            ]
        })
        .to_string();

        let protocol = ProtocolDefinition::from_json(&text).unwrap();
        assert_eq!(protocol.version().map(|v| v.minor.as_str()), Some("3"));
        assert_eq!(protocol.domains().len(), 2);
        assert_eq!(protocol.position("Network"), Some(1));
        assert!(protocol.domain("Page").unwrap().find_type("FrameId").is_some());
        assert!(protocol.domain("page").is_none());
    }

    #[test]
    fn test_duplicate_domain_case_insensitive() {
        let err = ProtocolDefinition::new(vec![
            DomainDefinition::new("DOM"),
            DomainDefinition::new("Dom"),
        ])
        .unwrap_err();

        assert!(matches!(err, GeneratorError::DuplicateDomain { ref name, ref existing } if name == "Dom" && existing == "DOM"));
    }

    #[test]
    fn test_merge_documents() {
        let browser = json!({ "domains": [{ "domain": "Page" }] }).to_string();
        let js = json!({ "version": { "major": "1", "minor": "3" }, "domains": [{ "domain": "Runtime" }] }).to_string();

        let protocol = ProtocolDefinition::from_documents([browser.as_str(), js.as_str()]).unwrap();
        let names: Vec<&str> = protocol.domains().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Page", "Runtime"]);
        assert!(protocol.version().is_some());
    }

    #[test]
    fn test_invalid_schema() {
        let err = ProtocolDefinition::from_json(r#"{ "domains": [{ "types": [] }] }"#).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidSchema { .. }));
    }

    #[test]
    fn test_load_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b_js.json"), r#"{ "domains": [{ "domain": "Runtime" }] }"#).unwrap();
        std::fs::write(dir.path().join("a_browser.json"), r#"{ "domains": [{ "domain": "Page" }] }"#).unwrap();
        std::fs::write(dir.path().join("README.md"), "not a schema").unwrap();

        let protocol = ProtocolDefinition::load_dir(dir.path()).unwrap();
        let names: Vec<&str> = protocol.domains().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Page", "Runtime"]);
    }

    #[test]
    fn test_load_dir_empty() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ProtocolDefinition::load_dir(dir.path()),
            Err(GeneratorError::IoError { .. })
        ));
    }
}
