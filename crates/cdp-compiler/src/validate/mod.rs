//! Validation of the protocol schema.

mod references;
mod structure;

pub use references::check_references;
pub use structure::validate_structure;

use crate::diagnostic::GeneratorError;
use crate::protocol::ProtocolDefinition;

/// Outcome of validating a protocol.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Structural defects; any of these fails the run.
    pub errors: Vec<GeneratorError>,
    /// Reported but not fatal.
    pub warnings: Vec<GeneratorError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates the entire protocol.
pub fn validate_protocol(protocol: &ProtocolDefinition) -> ValidationReport {
    ValidationReport {
        errors: validate_structure(protocol),
        warnings: check_references(protocol),
    }
}
