//! Code generation from the protocol model.
//!
//! Generation runs in phases:
//! - Validation (structural errors are fatal, dependency warnings are kept)
//! - Ordering (domains sorted so dependencies come first)
//! - Per-domain generation (types, commands, events)
//! - Merge (artifact names must be unique across the run, ignoring case)
//!
//! Errors from individual members are accumulated; the run either returns
//! every artifact or fails with all of them.

mod artifacts;
pub mod backend;
mod commands;
mod domain;
mod events;
mod layout;
pub mod naming;
mod render;
mod types;

pub use artifacts::{Artifact, ArtifactKind, ArtifactMap};
pub use backend::{create_backend, Backend};
pub use domain::{generate_domain, DomainOutput, Member};
pub use layout::OutputFile;

use tracing::debug;

use crate::config::CodeGenerationSettings;
use crate::diagnostic::GeneratorError;
use crate::protocol::{DomainDefinition, ProtocolDefinition};
use crate::resolve::{dependency_order, Resolver, TypeHandle};
use crate::validate::validate_protocol;

/// Everything a member needs to generate itself.
pub struct GenerationContext<'p> {
    pub settings: &'p CodeGenerationSettings,
    pub protocol: &'p ProtocolDefinition,
    /// The domain being generated.
    pub domain: &'p DomainDefinition,
    pub resolver: Resolver<'p>,
    pub backend: &'p dyn Backend,
}

impl<'p> GenerationContext<'p> {
    pub fn new(
        settings: &'p CodeGenerationSettings,
        protocol: &'p ProtocolDefinition,
        domain: &'p DomainDefinition,
        backend: &'p dyn Backend,
    ) -> Self {
        Self {
            settings,
            protocol,
            domain,
            resolver: Resolver::new(protocol),
            backend,
        }
    }

    /// Applies the naming convention to a raw identifier.
    pub fn ident(&self, raw: &str) -> String {
        naming::apply_convention(self.settings.naming_convention, raw)
    }

    /// Whether a referenced type is generated under the current settings.
    pub fn includes_type(&self, handle: TypeHandle<'_>) -> bool {
        let domain = handle.domain;
        let definition = handle.definition;
        self.settings.includes(domain.experimental, domain.deprecated)
            && self.settings.includes(definition.experimental, definition.deprecated)
    }
}

/// Implemented by every schema entity that produces code.
pub trait CodeGenerator {
    fn generate_code(&self, cx: &GenerationContext<'_>) -> Result<Emission, GeneratorError>;
}

/// What one member produced.
#[derive(Debug, Default)]
pub struct Emission {
    pub artifacts: Vec<Artifact>,
    pub alias: Option<CommandAlias>,
}

impl Emission {
    pub fn artifact(artifact: Artifact) -> Self {
        Self {
            artifacts: vec![artifact],
            alias: None,
        }
    }

    pub fn alias(alias: CommandAlias) -> Self {
        Self {
            artifacts: Vec::new(),
            alias: Some(alias),
        }
    }

    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }
}

/// A redirected command: calls to `domain.command` go to
/// `target_domain.target_command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAlias {
    pub domain: String,
    pub command: String,
    pub target_domain: String,
    pub target_command: String,
}

/// The result of a successful run.
#[derive(Debug)]
pub struct GeneratedCode {
    pub artifacts: ArtifactMap,
    pub aliases: Vec<CommandAlias>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<GeneratorError>,
    /// Generated domains, dependencies first.
    pub domain_order: Vec<String>,
}

impl GeneratedCode {
    /// Lays the artifacts out as files according to the settings.
    pub fn files(&self, settings: &CodeGenerationSettings) -> Result<Vec<OutputFile>, GeneratorError> {
        let backend = create_backend(settings)?;
        Ok(layout::layout_files(self, settings, backend.as_ref()))
    }
}

/// Generates code for every domain of the protocol.
pub fn generate_all(
    protocol: &ProtocolDefinition,
    settings: &CodeGenerationSettings,
) -> Result<GeneratedCode, GeneratorError> {
    let report = validate_protocol(protocol);
    if !report.is_ok() {
        return Err(GeneratorError::GenerationFailed { errors: report.errors });
    }
    for warning in &report.warnings {
        debug!("{}", warning);
    }

    let order = dependency_order(protocol)?;
    let backend = create_backend(settings)?;

    let mut artifacts = ArtifactMap::new();
    let mut aliases = Vec::new();
    let mut errors = Vec::new();
    let mut domain_order = Vec::new();

    for index in order {
        let domain = &protocol.domains()[index];
        if !settings.includes(domain.experimental, domain.deprecated) {
            debug!(domain = %domain.name, "domain skipped by settings");
            continue;
        }

        let cx = GenerationContext::new(settings, protocol, domain, backend.as_ref());
        let output = generate_domain(&cx);
        errors.extend(output.errors);

        // Collisions are fatal; report them with whatever failed before.
        let merged = match output.collision {
            Some(collision) => Err(collision),
            None => artifacts.merge(output.artifacts),
        };
        if let Err(err) = merged {
            errors.push(err);
            return Err(GeneratorError::GenerationFailed { errors });
        }
        aliases.extend(output.aliases);
        domain_order.push(domain.name.clone());
    }

    if !errors.is_empty() {
        return Err(GeneratorError::GenerationFailed { errors });
    }

    debug!(artifacts = artifacts.len(), domains = domain_order.len(), "generation complete");
    Ok(GeneratedCode {
        artifacts,
        aliases,
        warnings: report.warnings,
        domain_order,
    })
}
