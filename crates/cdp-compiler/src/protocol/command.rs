//! Command (request) definitions.

use serde::Deserialize;

use super::PropertyDefinition;

/// A request a client can send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDefinition {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub parameters: Vec<PropertyDefinition>,

    #[serde(default)]
    pub returns: Vec<PropertyDefinition>,

    /// The command is an alias of a command in another domain.
    #[serde(default)]
    pub redirect: Option<Redirect>,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            experimental: false,
            deprecated: false,
            parameters: Vec::new(),
            returns: Vec::new(),
            redirect: None,
        }
    }

    pub fn with_parameter(mut self, parameter: PropertyDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return(mut self, field: PropertyDefinition) -> Self {
        self.returns.push(field);
        self
    }

    pub fn redirected_to(mut self, redirect: Redirect) -> Self {
        self.redirect = Some(redirect);
        self
    }
}

/// Target of a redirected command: `"Domain"` keeps the command name,
/// `"Domain.command"` names it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Redirect {
    pub domain: String,
    pub command: Option<String>,
}

impl Redirect {
    /// The command invoked on the target domain.
    pub fn target_command<'a>(&'a self, own_name: &'a str) -> &'a str {
        self.command.as_deref().unwrap_or(own_name)
    }
}

impl TryFrom<String> for Redirect {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let (domain, command) = match raw.split_once('.') {
            None => (raw.as_str(), None),
            Some((domain, command)) => (domain, Some(command)),
        };

        let valid = !domain.is_empty()
            && command.map_or(true, |c| !c.is_empty() && !c.contains('.'));
        if !valid {
            return Err(format!("malformed redirect '{}'", raw));
        }

        Ok(Self {
            domain: domain.to_string(),
            command: command.map(str::to_string),
        })
    }
}
