//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use super::origin::{EntityKind, EntityPath};

/// Errors (and warnings) that can occur while loading, validating or
/// generating a protocol.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO / Schema Errors
    // =========================================================================
    #[error("Failed to read '{}': {message}", path.display())]
    #[diagnostic(code(cdp::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid protocol schema: {message}")]
    #[diagnostic(
        code(cdp::schema::invalid),
        help("The schema must look like {{ \"domains\": [{{ \"domain\": ..., \"types\": [...], \"commands\": [...], \"events\": [...] }}] }}")
    )]
    InvalidSchema {
        message: String,
    },

    #[error("Invalid generation settings: {message}")]
    #[diagnostic(code(cdp::config::invalid))]
    InvalidSettings {
        message: String,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("Domain #{index} has an empty name")]
    #[diagnostic(code(cdp::structure::empty_domain_name))]
    EmptyDomainName {
        index: usize,
    },

    #[error("Duplicate domain '{name}' (already declared as '{existing}')")]
    #[diagnostic(
        code(cdp::structure::duplicate_domain),
        help("Domain names are compared case-insensitively")
    )]
    DuplicateDomain {
        name: String,
        existing: String,
    },

    #[error("Duplicate {kind} '{name}' in domain '{domain}' (already declared as '{existing}')")]
    #[diagnostic(code(cdp::structure::duplicate_member))]
    DuplicateMember {
        domain: String,
        kind: EntityKind,
        name: String,
        existing: String,
    },

    #[error("Duplicate property '{property}' in {entity}")]
    #[diagnostic(code(cdp::structure::duplicate_property))]
    DuplicateProperty {
        entity: EntityPath,
        property: String,
    },

    #[error("Invalid enum in {entity}: {reason}")]
    #[diagnostic(code(cdp::structure::invalid_enum))]
    InvalidEnum {
        entity: EntityPath,
        reason: String,
    },

    #[error("Domain '{domain}' depends on unknown domain '{dependency}'")]
    #[diagnostic(code(cdp::structure::unknown_dependency))]
    UnknownDependency {
        domain: String,
        dependency: String,
    },

    #[error("Cyclic domain dependency: {}", cycle.join(" -> "))]
    #[diagnostic(
        code(cdp::structure::cyclic_dependency),
        help("Break the cycle by removing one of the declared dependencies")
    )]
    CyclicDependency {
        cycle: Vec<String>,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Unknown domain '{domain}' in reference '{reference}'")]
    #[diagnostic(code(cdp::resolve::unknown_domain))]
    UnknownDomain {
        domain: String,
        reference: String,
    },

    #[error("Unknown type '{type_id}' in domain '{domain}'")]
    #[diagnostic(code(cdp::resolve::unknown_type))]
    UnknownType {
        domain: String,
        type_id: String,
    },

    #[error("Type alias cycle: {}", chain.join(" -> "))]
    #[diagnostic(code(cdp::resolve::alias_cycle))]
    AliasCycle {
        chain: Vec<String>,
    },

    #[error("{entity} references '{reference}' but domain '{domain}' does not declare a dependency on '{dependency}'")]
    #[diagnostic(
        code(cdp::resolve::undeclared_dependency),
        severity(Warning),
        help("Add \"{dependency}\" to the dependencies of {domain}")
    )]
    UndeclaredDependency {
        entity: EntityPath,
        reference: String,
        domain: String,
        dependency: String,
    },

    #[error("Unresolved reference '{reference}' in {entity}: {reason}")]
    #[diagnostic(code(cdp::resolve::unresolved_reference))]
    UnresolvedReference {
        entity: EntityPath,
        reference: String,
        reason: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Duplicate artifact '{name}': {second} collides with '{existing}' from {first}")]
    #[diagnostic(
        code(cdp::codegen::duplicate_artifact),
        help("Artifact names are compared case-insensitively; rename the schema entity or change the naming convention")
    )]
    DuplicateArtifact {
        name: String,
        existing: String,
        first: EntityPath,
        second: EntityPath,
    },

    #[error("Unsupported target language: {language}")]
    #[diagnostic(
        code(cdp::codegen::unsupported_language),
        help("Supported languages are \"typescript\" and \"rust\"")
    )]
    UnsupportedLanguage {
        language: String,
    },

    #[error("Code generation failed with {} error(s)", errors.len())]
    #[diagnostic(code(cdp::codegen::failed))]
    GenerationFailed {
        #[related]
        errors: Vec<GeneratorError>,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this diagnostic is reported without failing the run.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::UndeclaredDependency { .. })
    }

    /// Wraps a resolution failure as an unresolved reference of `entity`.
    pub fn unresolved(entity: &EntityPath, reference: impl Into<String>, cause: &GeneratorError) -> Self {
        Self::UnresolvedReference {
            entity: entity.clone(),
            reference: reference.into(),
            reason: cause.to_string(),
        }
    }

    /// The errors of a failed run; a single error for anything else.
    pub fn errors(&self) -> Vec<&GeneratorError> {
        match self {
            Self::GenerationFailed { errors } => errors.iter().collect(),
            other => vec![other],
        }
    }
}
