//! Domain definitions.

use serde::Deserialize;

use super::{CommandDefinition, EventDefinition, TypeDefinition};

/// A named group of types, commands and events (e.g. `Network`, `Page`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDefinition {
    #[serde(rename = "domain")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    /// Domains whose types this domain may reference.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub types: Vec<TypeDefinition>,

    #[serde(default)]
    pub commands: Vec<CommandDefinition>,

    #[serde(default)]
    pub events: Vec<EventDefinition>,
}

impl DomainDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            experimental: false,
            deprecated: false,
            dependencies: Vec::new(),
            types: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, domain: impl Into<String>) -> Self {
        self.dependencies.push(domain.into());
        self
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.types.push(definition);
        self
    }

    pub fn with_command(mut self, command: CommandDefinition) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_event(mut self, event: EventDefinition) -> Self {
        self.events.push(event);
        self
    }

    /// Finds a type by its id.
    pub fn find_type(&self, id: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Finds a command by name.
    pub fn find_command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Whether `domain` is listed as a dependency.
    pub fn depends_on(&self, domain: &str) -> bool {
        self.dependencies.iter().any(|d| d == domain)
    }
}
