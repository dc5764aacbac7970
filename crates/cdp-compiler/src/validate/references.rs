//! Dependency checks for cross-domain references.
//!
//! A reference into another domain resolves even when the referencing domain
//! forgot to declare the dependency, since real schemas often rely on
//! transitively satisfied dependencies. Such references are reported as
//! warnings; references that do not resolve at all are left to code
//! generation, which reports them per entity.

use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::{DomainDefinition, PropertyDefinition, ProtocolDefinition, TypeShape};
use crate::resolve::Resolver;

/// Collects an `UndeclaredDependency` warning for every reference (and
/// redirect) that crosses into an undeclared domain.
pub fn check_references(protocol: &ProtocolDefinition) -> Vec<GeneratorError> {
    let resolver = Resolver::new(protocol);
    let mut warnings = Vec::new();

    for domain in protocol.domains() {
        for definition in &domain.types {
            let entity = EntityPath::member(EntityKind::Type, &domain.name, &definition.id);
            check_shape(&resolver, domain, &definition.shape, &entity, &mut warnings);
        }

        for command in &domain.commands {
            let entity = EntityPath::member(EntityKind::Command, &domain.name, &command.name);
            check_properties(&resolver, domain, &command.parameters, &entity, &mut warnings);
            check_properties(&resolver, domain, &command.returns, &entity, &mut warnings);

            if let Some(redirect) = &command.redirect {
                let known = protocol.domain(&redirect.domain).is_some();
                if known && redirect.domain != domain.name && !domain.depends_on(&redirect.domain) {
                    warnings.push(GeneratorError::UndeclaredDependency {
                        entity: entity.clone(),
                        reference: format!("{}.{}", redirect.domain, redirect.target_command(&command.name)),
                        domain: domain.name.clone(),
                        dependency: redirect.domain.clone(),
                    });
                }
            }
        }

        for event in &domain.events {
            let entity = EntityPath::member(EntityKind::Event, &domain.name, &event.name);
            check_properties(&resolver, domain, &event.parameters, &entity, &mut warnings);
        }
    }

    warnings
}

fn check_properties<'p>(
    resolver: &Resolver<'p>,
    domain: &'p DomainDefinition,
    properties: &[PropertyDefinition],
    entity: &EntityPath,
    warnings: &mut Vec<GeneratorError>,
) {
    for property in properties {
        check_shape(resolver, domain, &property.shape, entity, warnings);
    }
}

fn check_shape<'p>(
    resolver: &Resolver<'p>,
    domain: &'p DomainDefinition,
    shape: &TypeShape,
    entity: &EntityPath,
    warnings: &mut Vec<GeneratorError>,
) {
    for reference in shape.references() {
        let Ok(resolved) = resolver.resolve(reference, domain) else {
            continue;
        };
        if resolved.undeclared_dependency {
            warnings.push(GeneratorError::UndeclaredDependency {
                entity: entity.clone(),
                reference: reference.to_string(),
                domain: domain.name.clone(),
                dependency: reference.domain().unwrap_or_default().to_string(),
            });
        }
    }
}
