//! Parameter and result records for commands.

use crate::diagnostic::{EntityKind, EntityPath, GeneratorError};
use crate::protocol::{CommandDefinition, Redirect};
use super::artifacts::{Artifact, ArtifactKind};
use super::backend::RecordDecl;
use super::render::render_fields;
use super::{CodeGenerator, CommandAlias, Emission, GenerationContext};

impl CodeGenerator for CommandDefinition {
    fn generate_code(&self, cx: &GenerationContext<'_>) -> Result<Emission, GeneratorError> {
        let origin = EntityPath::member(EntityKind::Command, &cx.domain.name, &self.name);

        if let Some(redirect) = &self.redirect {
            return redirect_alias(cx, self, redirect, &origin).map(Emission::alias);
        }

        let method = format!("{}.{}", cx.domain.name, self.name);
        let mut emission = Emission::default();

        let parameters = render_fields(cx, &self.parameters, None, &origin)?;
        let returns = render_fields(cx, &self.returns, None, &origin)?;

        if !parameters.is_empty() {
            let ident = cx.ident(&format!("{}Params", self.name));
            let description = format!("Parameters of the `{}` command.", method);
            let text = cx.backend.record(&RecordDecl {
                ident: &ident,
                description: Some(&description),
                deprecated: self.deprecated,
                fields: &parameters,
            });
            emission.push(Artifact::new(&cx.domain.name, ident, ArtifactKind::Parameters, origin.clone(), text));
        }

        if !returns.is_empty() {
            let ident = cx.ident(&format!("{}Result", self.name));
            let description = format!("Result of the `{}` command.", method);
            let text = cx.backend.record(&RecordDecl {
                ident: &ident,
                description: Some(&description),
                deprecated: self.deprecated,
                fields: &returns,
            });
            emission.push(Artifact::new(&cx.domain.name, ident, ArtifactKind::Result, origin, text));
        }

        Ok(emission)
    }
}

/// A redirected command declares nothing; it only records where calls go.
fn redirect_alias(
    cx: &GenerationContext<'_>,
    command: &CommandDefinition,
    redirect: &Redirect,
    origin: &EntityPath,
) -> Result<CommandAlias, GeneratorError> {
    let target_command = redirect.target_command(&command.name);
    let reference = format!("{}.{}", redirect.domain, target_command);

    let target = cx.protocol.domain(&redirect.domain).ok_or_else(|| GeneratorError::UnresolvedReference {
        entity: origin.clone(),
        reference: reference.clone(),
        reason: format!("unknown domain '{}'", redirect.domain),
    })?;

    if target.find_command(target_command).is_none() {
        return Err(GeneratorError::UnresolvedReference {
            entity: origin.clone(),
            reference,
            reason: format!("domain '{}' has no command '{}'", target.name, target_command),
        });
    }

    Ok(CommandAlias {
        domain: cx.domain.name.clone(),
        command: command.name.clone(),
        target_domain: target.name.clone(),
        target_command: target_command.to_string(),
    })
}
