//! Code generation settings.

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;

/// How generated type identifiers are cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingConvention {
    /// Keep schema names as written.
    Preserve,
    /// `GetCookiesResult`
    #[default]
    UpperCamel,
    /// `getCookiesResult`
    LowerCamel,
}

/// How artifacts are grouped into output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputGranularity {
    /// One file per artifact.
    #[default]
    PerType,
    /// One file per domain.
    PerDomain,
}

/// Settings for a generation run.
///
/// Deserialized from JSON with every field optional. Keys the compiler does
/// not know are ignored so that newer front-ends can pass extra options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeGenerationSettings {
    /// Namespace (or module path prefix) the generated code lives under.
    pub root_namespace: String,

    /// Casing of generated type identifiers.
    pub naming_convention: NamingConvention,

    /// Generate members marked `deprecated`.
    pub include_deprecated: bool,

    /// Generate members marked `experimental`.
    pub include_experimental: bool,

    /// Output file grouping.
    pub granularity: OutputGranularity,

    /// Target language (default: "typescript").
    pub language: String,
}

impl Default for CodeGenerationSettings {
    fn default() -> Self {
        Self {
            root_namespace: "CDP".to_string(),
            naming_convention: NamingConvention::UpperCamel,
            include_deprecated: true,
            include_experimental: true,
            granularity: OutputGranularity::PerType,
            language: "typescript".to_string(),
        }
    }
}

impl CodeGenerationSettings {
    /// Parses settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, GeneratorError> {
        serde_json::from_str(text).map_err(|e| GeneratorError::InvalidSettings {
            message: e.to_string(),
        })
    }

    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::io(path, e.to_string()))?;
        Self::from_json(&content)
    }

    /// Whether a member with the given flags is generated.
    pub fn includes(&self, experimental: bool, deprecated: bool) -> bool {
        (self.include_experimental || !experimental) && (self.include_deprecated || !deprecated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let settings = CodeGenerationSettings::from_json("{}").unwrap();
        assert_eq!(settings, CodeGenerationSettings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings = CodeGenerationSettings::from_json(
            r#"{ "namingConvention": "lowerCamel", "templatesPath": "./templates", "futureFlag": 3 }"#,
        )
        .unwrap();
        assert_eq!(settings.naming_convention, NamingConvention::LowerCamel);
        assert_eq!(settings.language, "typescript");
    }

    #[test]
    fn test_includes() {
        let settings = CodeGenerationSettings {
            include_experimental: false,
            ..Default::default()
        };
        assert!(settings.includes(false, true));
        assert!(!settings.includes(true, false));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CodeGenerationSettings::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::IoError { .. }));
    }
}
