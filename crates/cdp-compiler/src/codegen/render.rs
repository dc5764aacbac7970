//! Rendering of shapes into backend type expressions.

use crate::diagnostic::{EntityPath, GeneratorError};
use crate::protocol::{DomainDefinition, Primitive, PropertyDefinition, TypeReference, TypeShape};
use crate::resolve::graph::reaches;
use crate::resolve::{Target, TypeHandle, TypeKey};
use super::backend::Field;
use super::GenerationContext;

/// Renders the included properties of an entity as record fields.
///
/// `container` is the type being declared, if any; fields that can reach it
/// inline are boxed by backends that need it.
pub(crate) fn render_fields(
    cx: &GenerationContext<'_>,
    properties: &[PropertyDefinition],
    container: Option<TypeKey<'_>>,
    entity: &EntityPath,
) -> Result<Vec<Field>, GeneratorError> {
    properties
        .iter()
        .filter(|p| cx.settings.includes(p.experimental, p.deprecated))
        .map(|p| {
            Ok(Field {
                name: p.name.clone(),
                ty: render_shape(cx, cx.domain, &p.shape, container, entity)?,
                optional: p.optional,
                description: p.description.clone(),
                deprecated: p.deprecated,
            })
        })
        .collect()
}

/// Renders a shape written inside `scope`.
pub(crate) fn render_shape<'p>(
    cx: &GenerationContext<'p>,
    scope: &'p DomainDefinition,
    shape: &TypeShape,
    container: Option<TypeKey<'_>>,
    entity: &EntityPath,
) -> Result<String, GeneratorError> {
    let backend = cx.backend;
    match shape {
        TypeShape::Primitive(primitive) => Ok(backend.primitive(*primitive)),
        TypeShape::Enum(values) => Ok(backend.inline_enum(values)),
        // Sequences are stored out of line, so the item never needs boxing.
        TypeShape::Array(item) => Ok(backend.sequence(&render_shape(cx, scope, item, None, entity)?)),
        TypeShape::Object(properties) if properties.is_empty() => Ok(backend.primitive(Primitive::Object)),
        TypeShape::Object(properties) => {
            let fields = properties
                .iter()
                .filter(|p| cx.settings.includes(p.experimental, p.deprecated))
                .map(|p| {
                    Ok(Field {
                        name: p.name.clone(),
                        ty: render_shape(cx, scope, &p.shape, None, entity)?,
                        optional: p.optional,
                        description: None,
                        deprecated: false,
                    })
                })
                .collect::<Result<Vec<_>, GeneratorError>>()?;
            Ok(backend.inline_object(&fields))
        }
        TypeShape::Reference(reference) => render_reference(cx, scope, reference, container, entity),
    }
}

fn render_reference<'p>(
    cx: &GenerationContext<'p>,
    scope: &'p DomainDefinition,
    reference: &TypeReference,
    container: Option<TypeKey<'_>>,
    entity: &EntityPath,
) -> Result<String, GeneratorError> {
    let unresolved = |cause: GeneratorError| GeneratorError::unresolved(entity, reference.to_string(), &cause);

    let handle = match cx.resolver.resolve(reference, scope).map_err(unresolved)?.target {
        Target::Primitive(primitive) => return Ok(cx.backend.primitive(primitive)),
        Target::Type(handle) => handle,
    };

    let handle = match &handle.definition.shape {
        TypeShape::Reference(_) => match cx.resolver.resolve_alias(handle).map_err(unresolved)? {
            Target::Primitive(primitive) => return Ok(cx.backend.primitive(primitive)),
            Target::Type(target) => target,
        },
        _ => handle,
    };

    render_named(cx, handle, container, entity)
}

/// Renders a resolved type that is not itself an alias.
fn render_named<'p>(
    cx: &GenerationContext<'p>,
    handle: TypeHandle<'p>,
    container: Option<TypeKey<'_>>,
    entity: &EntityPath,
) -> Result<String, GeneratorError> {
    if !cx.includes_type(handle) {
        return Ok(cx.backend.primitive(Primitive::Any));
    }

    match &handle.definition.shape {
        TypeShape::Primitive(primitive) => Ok(cx.backend.primitive(*primitive)),
        TypeShape::Array(item) => {
            let item = render_shape(cx, handle.domain, item, None, entity)?;
            Ok(cx.backend.sequence(&item))
        }
        TypeShape::Enum(_) | TypeShape::Object(_) => {
            let ident = cx.ident(&handle.definition.id);
            let ty = cx.backend.type_ref(&handle.domain.name, &cx.domain.name, &ident);
            match container {
                Some(container) if reaches(&cx.resolver, handle, container) => Ok(cx.backend.boxed(ty)),
                _ => Ok(ty),
            }
        }
        TypeShape::Reference(reference) => render_reference(cx, handle.domain, reference, container, entity),
    }
}
