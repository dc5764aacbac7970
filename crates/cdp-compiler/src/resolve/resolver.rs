//! Type reference resolution.
//!
//! Resolution turns a [`TypeReference`] into a handle borrowed from the
//! protocol. Nothing is expanded or copied, which is what lets recursive
//! types resolve in a single step.

use std::collections::HashSet;

use crate::diagnostic::GeneratorError;
use crate::protocol::{DomainDefinition, Primitive, ProtocolDefinition, TypeDefinition, TypeReference, TypeShape};

/// A named type together with the domain that declares it.
#[derive(Debug, Clone, Copy)]
pub struct TypeHandle<'p> {
    pub domain: &'p DomainDefinition,
    pub definition: &'p TypeDefinition,
}

impl<'p> TypeHandle<'p> {
    /// Identity of the type, independent of the borrow.
    pub fn key(&self) -> TypeKey<'p> {
        TypeKey {
            domain: &self.domain.name,
            id: &self.definition.id,
        }
    }

    /// `Domain.Id`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain.name, self.definition.id)
    }
}

/// `(domain, id)` pair identifying a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey<'a> {
    pub domain: &'a str,
    pub id: &'a str,
}

/// What a reference resolves to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'p> {
    Primitive(Primitive),
    Type(TypeHandle<'p>),
}

/// The outcome of resolving one reference.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'p> {
    pub target: Target<'p>,
    /// The target lives in a domain the referencing domain does not list as
    /// a dependency.
    pub undeclared_dependency: bool,
}

/// Resolves references against one protocol.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'p> {
    protocol: &'p ProtocolDefinition,
}

impl<'p> Resolver<'p> {
    pub fn new(protocol: &'p ProtocolDefinition) -> Self {
        Self { protocol }
    }

    /// Resolves `reference` as written inside `current`.
    ///
    /// Unqualified ids are looked up in `current` first and then among the
    /// primitives. Qualified ids must name an existing domain and type.
    pub fn resolve(
        &self,
        reference: &TypeReference,
        current: &'p DomainDefinition,
    ) -> Result<Resolved<'p>, GeneratorError> {
        let id = reference.id();

        let Some(domain_name) = reference.domain().filter(|d| *d != current.name) else {
            if let Some(definition) = current.find_type(id) {
                return Ok(Resolved {
                    target: Target::Type(TypeHandle { domain: current, definition }),
                    undeclared_dependency: false,
                });
            }
            if reference.domain().is_none() {
                if let Some(primitive) = Primitive::from_name(id) {
                    return Ok(Resolved {
                        target: Target::Primitive(primitive),
                        undeclared_dependency: false,
                    });
                }
            }
            return Err(GeneratorError::UnknownType {
                domain: current.name.clone(),
                type_id: id.to_string(),
            });
        };

        let domain = self
            .protocol
            .domain(domain_name)
            .ok_or_else(|| GeneratorError::UnknownDomain {
                domain: domain_name.to_string(),
                reference: reference.to_string(),
            })?;

        let definition = domain.find_type(id).ok_or_else(|| GeneratorError::UnknownType {
            domain: domain.name.clone(),
            type_id: id.to_string(),
        })?;

        Ok(Resolved {
            target: Target::Type(TypeHandle { domain, definition }),
            undeclared_dependency: !current.depends_on(domain_name),
        })
    }

    /// Follows a chain of alias types (`Reference` shapes) to the first
    /// type that is not itself an alias.
    pub fn resolve_alias(&self, handle: TypeHandle<'p>) -> Result<Target<'p>, GeneratorError> {
        let mut current = handle;
        let mut visited: HashSet<TypeKey<'p>> = HashSet::new();
        let mut chain = vec![current.qualified_name()];

        loop {
            let TypeShape::Reference(reference) = &current.definition.shape else {
                return Ok(Target::Type(current));
            };

            visited.insert(current.key());
            match self.resolve(reference, current.domain)?.target {
                Target::Primitive(primitive) => return Ok(Target::Primitive(primitive)),
                Target::Type(next) => {
                    chain.push(next.qualified_name());
                    if visited.contains(&next.key()) {
                        return Err(GeneratorError::AliasCycle { chain });
                    }
                    current = next;
                }
            }
        }
    }
}
