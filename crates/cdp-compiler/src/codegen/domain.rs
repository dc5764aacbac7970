//! Generation of one domain.

use tracing::{debug, instrument};

use crate::config::CodeGenerationSettings;
use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::{CommandDefinition, DomainDefinition, EventDefinition, TypeDefinition};
use super::artifacts::ArtifactMap;
use super::{CodeGenerator, CommandAlias, Emission, GenerationContext};

/// A generatable member of a domain.
#[derive(Debug, Clone, Copy)]
pub enum Member<'p> {
    Type(&'p TypeDefinition),
    Command(&'p CommandDefinition),
    Event(&'p EventDefinition),
}

impl<'p> Member<'p> {
    /// Members of `domain`: types, then commands, then events, each in
    /// declaration order.
    pub fn all(domain: &'p DomainDefinition) -> impl Iterator<Item = Member<'p>> {
        domain
            .types
            .iter()
            .map(Member::Type)
            .chain(domain.commands.iter().map(Member::Command))
            .chain(domain.events.iter().map(Member::Event))
    }

    pub fn path(&self, domain: &str) -> EntityPath {
        match self {
            Member::Type(t) => EntityPath::member(EntityKind::Type, domain, &t.id),
            Member::Command(c) => EntityPath::member(EntityKind::Command, domain, &c.name),
            Member::Event(e) => EntityPath::member(EntityKind::Event, domain, &e.name),
        }
    }

    /// Whether the settings let this member through.
    pub fn included(&self, settings: &CodeGenerationSettings) -> bool {
        let (experimental, deprecated) = match self {
            Member::Type(t) => (t.experimental, t.deprecated),
            Member::Command(c) => (c.experimental, c.deprecated),
            Member::Event(e) => (e.experimental, e.deprecated),
        };
        settings.includes(experimental, deprecated)
    }

    fn generate(&self, cx: &GenerationContext<'_>) -> Result<Emission, GeneratorError> {
        match self {
            Member::Type(t) => t.generate_code(cx),
            Member::Command(c) => c.generate_code(cx),
            Member::Event(e) => e.generate_code(cx),
        }
    }
}

/// Everything one domain produced.
#[derive(Debug, Default)]
pub struct DomainOutput {
    pub artifacts: ArtifactMap,
    pub aliases: Vec<CommandAlias>,
    /// Per-member failures. A member that failed contributed nothing.
    pub errors: Vec<GeneratorError>,
    /// A name collision that stopped the domain early.
    pub collision: Option<GeneratorError>,
}

/// Generates every included member of the context's domain.
///
/// A member that fails to resolve is recorded and skipped so that its
/// siblings still run. A name collision stops the domain immediately; the
/// member errors gathered before it are kept.
#[instrument(skip_all, fields(domain = %cx.domain.name))]
pub fn generate_domain(cx: &GenerationContext<'_>) -> DomainOutput {
    let mut output = DomainOutput::default();

    'members: for member in Member::all(cx.domain) {
        if !member.included(cx.settings) {
            debug!(member = %member.path(&cx.domain.name), "skipped by settings");
            continue;
        }

        match member.generate(cx) {
            Ok(emission) => {
                for artifact in emission.artifacts {
                    if let Err(err) = output.artifacts.insert(artifact) {
                        output.collision = Some(err);
                        break 'members;
                    }
                }
                output.aliases.extend(emission.alias);
            }
            Err(err) => output.errors.push(err),
        }
    }

    debug!(
        artifacts = output.artifacts.len(),
        errors = output.errors.len(),
        collided = output.collision.is_some(),
        "domain generated"
    );
    output
}
