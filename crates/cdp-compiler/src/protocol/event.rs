//! Event (notification) definitions.

use serde::Deserialize;

use super::PropertyDefinition;

/// An asynchronous notification sent by the remote end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub parameters: Vec<PropertyDefinition>,
}

impl EventDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            experimental: false,
            deprecated: false,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: PropertyDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }
}
