//! Payload records for events.

use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::EventDefinition;
use super::artifacts::{Artifact, ArtifactKind};
use super::backend::RecordDecl;
use super::render::render_fields;
use super::{CodeGenerator, Emission, GenerationContext};

impl CodeGenerator for EventDefinition {
    /// An event without (included) parameters carries no payload and
    /// declares nothing.
    fn generate_code(&self, cx: &GenerationContext<'_>) -> Result<Emission, GeneratorError> {
        let origin = EntityPath::member(EntityKind::Event, &cx.domain.name, &self.name);
        let fields = render_fields(cx, &self.parameters, None, &origin)?;
        if fields.is_empty() {
            return Ok(Emission::default());
        }

        let ident = cx.ident(&format!("{}Event", self.name));
        let description = self.description.clone().unwrap_or_else(|| {
            format!("Payload of the `{}.{}` event.", cx.domain.name, self.name)
        });
        let text = cx.backend.record(&RecordDecl {
            ident: &ident,
            description: Some(&description),
            deprecated: self.deprecated,
            fields: &fields,
        });

        Ok(Emission::artifact(Artifact::new(&cx.domain.name, ident, ArtifactKind::Event, origin, text)))
    }
}
