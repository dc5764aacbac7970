//! Declarations for named types.

use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::{Primitive, TypeDefinition, TypeShape};
use crate::resolve::TypeKey;
use super::artifacts::{Artifact, ArtifactKind};
use super::backend::{EnumDecl, RecordDecl};
use super::naming::enum_identifiers;
use super::render::{render_fields, render_shape};
use super::{CodeGenerator, Emission, GenerationContext};

impl CodeGenerator for TypeDefinition {
    /// Objects become records and enums become enumerations. Primitive,
    /// array and alias types are inlined where they are used.
    fn generate_code(&self, cx: &GenerationContext<'_>) -> Result<Emission, GeneratorError> {
        let origin = EntityPath::member(EntityKind::Type, &cx.domain.name, &self.id);
        let ident = cx.ident(&self.id);
        let description = self.description.as_deref();

        let (kind, text) = match &self.shape {
            TypeShape::Object(properties) if properties.is_empty() => {
                let open = cx.backend.primitive(Primitive::Object);
                (ArtifactKind::Record, cx.backend.alias(&ident, description, &open))
            }
            TypeShape::Object(properties) => {
                let container = TypeKey {
                    domain: &cx.domain.name,
                    id: &self.id,
                };
                let fields = render_fields(cx, properties, Some(container), &origin)?;
                let text = cx.backend.record(&RecordDecl {
                    ident: &ident,
                    description,
                    deprecated: self.deprecated,
                    fields: &fields,
                });
                (ArtifactKind::Record, text)
            }
            TypeShape::Enum(values) => {
                let variants: Vec<(String, String)> = enum_identifiers(values, |ident| cx.backend.variant_ident(ident))
                    .into_iter()
                    .zip(values.iter().cloned())
                    .collect();
                let text = cx.backend.enumeration(&EnumDecl {
                    ident: &ident,
                    description,
                    deprecated: self.deprecated,
                    variants: &variants,
                });
                (ArtifactKind::Enum, text)
            }
            TypeShape::Primitive(_) | TypeShape::Array(_) | TypeShape::Reference(_) => {
                // Nothing to declare, but a dangling alias is still an error.
                render_shape(cx, cx.domain, &self.shape, None, &origin)?;
                return Ok(Emission::default());
            }
        };

        Ok(Emission::artifact(Artifact::new(&cx.domain.name, ident, kind, origin, text)))
    }
}
