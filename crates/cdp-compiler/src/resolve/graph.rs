//! Direct containment between object types.
//!
//! An object type *directly contains* another when one of its properties
//! resolves to that type without passing through an array. Backends that lay
//! records out inline (Rust) must box a field whose type can reach the
//! containing record this way, or the record would have infinite size.

use std::collections::HashSet;

use crate::protocol::TypeShape;
use super::resolver::{Resolver, Target, TypeHandle, TypeKey};

/// Whether `from` directly contains `to`, itself included.
pub fn reaches<'p>(resolver: &Resolver<'p>, from: TypeHandle<'p>, to: TypeKey<'_>) -> bool {
    let mut visited: HashSet<TypeKey<'p>> = HashSet::new();
    let mut stack = vec![from];

    while let Some(handle) = stack.pop() {
        let key = handle.key();
        if key.domain == to.domain && key.id == to.id {
            return true;
        }
        if !visited.insert(key) {
            continue;
        }
        stack.extend(contained(resolver, handle));
    }

    false
}

/// Object types held inline by the properties of `handle`.
fn contained<'p>(resolver: &Resolver<'p>, handle: TypeHandle<'p>) -> Vec<TypeHandle<'p>> {
    let TypeShape::Object(properties) = &handle.definition.shape else {
        return Vec::new();
    };

    properties
        .iter()
        .filter_map(|property| match &property.shape {
            TypeShape::Reference(reference) => resolver.resolve(reference, handle.domain).ok(),
            _ => None,
        })
        .filter_map(|resolved| match resolved.target {
            Target::Type(target) => resolver.resolve_alias(target).ok(),
            Target::Primitive(_) => None,
        })
        .filter_map(|target| match target {
            Target::Type(target) if matches!(target.definition.shape, TypeShape::Object(_)) => Some(target),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DomainDefinition, Primitive, PropertyDefinition, ProtocolDefinition, TypeDefinition};

    fn object(id: &str, properties: Vec<PropertyDefinition>) -> TypeDefinition {
        TypeDefinition::new(id, TypeShape::Object(properties))
    }

    fn field(name: &str, target: &str) -> PropertyDefinition {
        PropertyDefinition::new(name, TypeShape::reference(target).unwrap()).optional()
    }

    fn protocol() -> ProtocolDefinition {
        ProtocolDefinition::new(vec![DomainDefinition::new("DOM")
            .with_type(object(
                "Node",
                vec![
                    PropertyDefinition::new("children", TypeShape::array(TypeShape::reference("Node").unwrap())),
                    field("contentDocument", "Node"),
                    field("box", "BoxModel"),
                ],
            ))
            .with_type(object("BoxModel", vec![PropertyDefinition::new("width", TypeShape::Primitive(Primitive::Integer))]))
            .with_type(object("Left", vec![field("right", "RightAlias")]))
            .with_type(TypeDefinition::new("RightAlias", TypeShape::reference("Right").unwrap()))
            .with_type(object("Right", vec![field("left", "Left")]))])
        .unwrap()
    }

    fn handle<'p>(protocol: &'p ProtocolDefinition, id: &str) -> TypeHandle<'p> {
        let domain = protocol.domain("DOM").unwrap();
        TypeHandle {
            domain,
            definition: domain.find_type(id).unwrap(),
        }
    }

    #[test]
    fn test_self_recursion() {
        let protocol = protocol();
        let resolver = Resolver::new(&protocol);
        let node = handle(&protocol, "Node");
        assert!(reaches(&resolver, node, node.key()));
    }

    #[test]
    fn test_non_recursive_field() {
        let protocol = protocol();
        let resolver = Resolver::new(&protocol);
        let node = handle(&protocol, "Node");
        assert!(!reaches(&resolver, handle(&protocol, "BoxModel"), node.key()));
    }

    #[test]
    fn test_mutual_recursion_through_alias() {
        let protocol = protocol();
        let resolver = Resolver::new(&protocol);
        let left = handle(&protocol, "Left");
        assert!(reaches(&resolver, handle(&protocol, "Right"), left.key()));
    }
}
