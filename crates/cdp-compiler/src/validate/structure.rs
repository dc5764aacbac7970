//! Structure validation for the protocol schema.
//!
//! Checks the invariants the model cannot express in its types: non-empty
//! domain names, known dependencies, unique member and property names, and
//! well-formed enums. Every violation is collected.

use std::collections::{HashMap, HashSet};

use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::{DomainDefinition, PropertyDefinition, ProtocolDefinition, TypeShape};

/// Validates the structure of the whole protocol.
pub fn validate_structure(protocol: &ProtocolDefinition) -> Vec<GeneratorError> {
    let mut errors = Vec::new();

    for (index, domain) in protocol.domains().iter().enumerate() {
        if domain.name.trim().is_empty() {
            errors.push(GeneratorError::EmptyDomainName { index });
        }

        for dependency in &domain.dependencies {
            if protocol.domain(dependency).is_none() {
                errors.push(GeneratorError::UnknownDependency {
                    domain: domain.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        validate_domain(domain, &mut errors);
    }

    errors
}

fn validate_domain(domain: &DomainDefinition, errors: &mut Vec<GeneratorError>) {
    check_unique(domain, EntityKind::Type, domain.types.iter().map(|t| t.id.as_str()), errors);
    check_unique(domain, EntityKind::Command, domain.commands.iter().map(|c| c.name.as_str()), errors);
    check_unique(domain, EntityKind::Event, domain.events.iter().map(|e| e.name.as_str()), errors);

    for definition in &domain.types {
        let entity = EntityPath::member(EntityKind::Type, &domain.name, &definition.id);
        validate_shape(&definition.shape, &entity, errors);
    }

    for command in &domain.commands {
        let entity = EntityPath::member(EntityKind::Command, &domain.name, &command.name);
        validate_properties(&command.parameters, &entity, errors);
        validate_properties(&command.returns, &entity, errors);
    }

    for event in &domain.events {
        let entity = EntityPath::member(EntityKind::Event, &domain.name, &event.name);
        validate_properties(&event.parameters, &entity, errors);
    }
}

/// Member names must be unique per category, ignoring case.
fn check_unique<'a>(
    domain: &DomainDefinition,
    kind: EntityKind,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<GeneratorError>,
) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        if let Some(existing) = seen.get(&name.to_lowercase()) {
            errors.push(GeneratorError::DuplicateMember {
                domain: domain.name.clone(),
                kind,
                name: name.to_string(),
                existing: existing.to_string(),
            });
        } else {
            seen.insert(name.to_lowercase(), name);
        }
    }
}

fn validate_shape(shape: &TypeShape, entity: &EntityPath, errors: &mut Vec<GeneratorError>) {
    match shape {
        TypeShape::Enum(values) => validate_enum(values, entity, errors),
        TypeShape::Array(item) => validate_shape(item, entity, errors),
        TypeShape::Object(properties) => validate_properties(properties, entity, errors),
        TypeShape::Primitive(_) | TypeShape::Reference(_) => {}
    }
}

fn validate_properties(properties: &[PropertyDefinition], entity: &EntityPath, errors: &mut Vec<GeneratorError>) {
    let mut seen: HashSet<&str> = HashSet::new();
    for property in properties {
        if !seen.insert(property.name.as_str()) {
            errors.push(GeneratorError::DuplicateProperty {
                entity: entity.clone(),
                property: property.name.clone(),
            });
        }
        validate_shape(&property.shape, entity, errors);
    }
}

fn validate_enum(values: &[String], entity: &EntityPath, errors: &mut Vec<GeneratorError>) {
    if values.is_empty() {
        errors.push(GeneratorError::InvalidEnum {
            entity: entity.clone(),
            reason: "enum has no values".to_string(),
        });
        return;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            errors.push(GeneratorError::InvalidEnum {
                entity: entity.clone(),
                reason: format!("duplicate value '{}'", value),
            });
        }
    }
}
