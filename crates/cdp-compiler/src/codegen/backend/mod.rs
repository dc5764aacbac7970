//! Target-language emitters.
//!
//! A backend knows how to spell types and declarations in one language. It
//! never resolves anything: the renderer hands it finished type expressions
//! and the backend only formats them.

mod rust;
mod typescript;

pub use rust::RustBackend;
pub use typescript::TypeScriptBackend;

use std::path::PathBuf;

use crate::config::CodeGenerationSettings;
use crate::diagnostic::GeneratorError;
use crate::protocol::Primitive;

/// A field of a record, with its type already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire name as written in the schema.
    pub name: String,
    pub ty: String,
    pub optional: bool,
    pub description: Option<String>,
    pub deprecated: bool,
}

/// A record declaration (object type, parameters, result or event payload).
#[derive(Debug, Clone)]
pub struct RecordDecl<'a> {
    pub ident: &'a str,
    pub description: Option<&'a str>,
    pub deprecated: bool,
    pub fields: &'a [Field],
}

/// An enumeration of string literals.
#[derive(Debug, Clone)]
pub struct EnumDecl<'a> {
    pub ident: &'a str,
    pub description: Option<&'a str>,
    pub deprecated: bool,
    /// `(identifier, literal)` pairs in declaration order.
    pub variants: &'a [(String, String)],
}

/// One generated module as seen by [`Backend::index_files`].
#[derive(Debug, Clone)]
pub struct ModuleEntry<'a> {
    pub domain: &'a str,
    /// File stems of the per-type files, in order. Empty for per-domain output.
    pub files: Vec<String>,
}

/// Language-specific formatting of generated code.
pub trait Backend {
    /// Returns the language name.
    fn language(&self) -> &'static str;

    /// Returns the file extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Spells a primitive.
    fn primitive(&self, primitive: Primitive) -> String;

    /// Spells a sequence of `item`.
    fn sequence(&self, item: &str) -> String;

    /// Spells an anonymous string enum used directly by a property.
    fn inline_enum(&self, values: &[String]) -> String;

    /// Spells an anonymous object used directly by a property.
    fn inline_object(&self, fields: &[Field]) -> String;

    /// Spells a reference to a generated declaration.
    fn type_ref(&self, target_domain: &str, current_domain: &str, ident: &str) -> String;

    /// Wraps a type that must be stored out of line to break recursion.
    fn boxed(&self, ty: String) -> String {
        ty
    }

    /// Escapes an enum variant name the language reserves.
    fn variant_ident(&self, ident: String) -> String {
        ident
    }

    /// Declares a record.
    fn record(&self, decl: &RecordDecl<'_>) -> String;

    /// Declares an enumeration.
    fn enumeration(&self, decl: &EnumDecl<'_>) -> String;

    /// Declares a named alias of `ty`.
    fn alias(&self, ident: &str, description: Option<&str>, ty: &str) -> String;

    /// Path of the file holding a single declaration.
    fn type_path(&self, domain: &str, ident: &str) -> PathBuf;

    /// Path of the file holding a whole domain.
    fn domain_path(&self, domain: &str) -> PathBuf;

    /// Wraps declarations into a complete source file.
    fn source_file(&self, domain: &str, bodies: &[&str], standalone: bool) -> String;

    /// Extra files tying the generated modules together.
    fn index_files(&self, _modules: &[ModuleEntry<'_>], _per_type: bool) -> Vec<(PathBuf, String)> {
        Vec::new()
    }
}

/// Creates the backend for the configured language.
pub fn create_backend(settings: &CodeGenerationSettings) -> Result<Box<dyn Backend>, GeneratorError> {
    match settings.language.to_lowercase().as_str() {
        "typescript" | "ts" => Ok(Box::new(TypeScriptBackend::new(&settings.root_namespace))),
        "rust" | "rs" => Ok(Box::new(RustBackend::new(&settings.root_namespace))),
        _ => Err(GeneratorError::UnsupportedLanguage {
            language: settings.language.clone(),
        }),
    }
}

/// Splits a description into comment lines.
pub(crate) fn doc_lines(description: Option<&str>) -> Vec<&str> {
    description
        .map(|d| d.lines().map(str::trim_end).collect())
        .unwrap_or_default()
}

/// Indents every non-empty line of `text` by `width` spaces.
pub(crate) fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut output = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.is_empty() {
            output.push_str(&pad);
            output.push_str(line);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend() {
        let mut settings = CodeGenerationSettings::default();
        assert_eq!(create_backend(&settings).unwrap().language(), "typescript");

        settings.language = "Rust".into();
        assert_eq!(create_backend(&settings).unwrap().extension(), "rs");

        settings.language = "cobol".into();
        let err = create_backend(&settings).err().unwrap();
        assert!(matches!(err, GeneratorError::UnsupportedLanguage { ref language } if language == "cobol"));
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n\n  b\n");
    }
}
