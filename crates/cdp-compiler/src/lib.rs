//! # CDP Compiler
//!
//! This crate turns a remote-debugging protocol schema (domains of types,
//! commands and events, in the style of the Chrome DevTools Protocol) into
//! strongly-typed source code for a client library.
//!
//! ## Supported Languages
//!
//! - TypeScript (default)
//! - Rust
//!
//! ## Architecture
//!
//! ```text
//! protocol.json
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Protocol   │  Schema model (serde)
//! │ (JSON → Def) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Structure checks, dependency warnings
//! │    (Def)     │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Resolve    │  Domain order, type references
//! │    (Def)     │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Artifacts per domain, merged by name
//! │ (Def → Code) │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cdp_compiler::{CodeGenerationSettings, Compiler, ProtocolDefinition};
//!
//! let protocol = ProtocolDefinition::load(&["browser_protocol.json", "js_protocol.json"])?;
//! let compiler = Compiler::new(CodeGenerationSettings::default());
//! let result = compiler.compile(&protocol, "generated".as_ref())?;
//! ```

pub mod config;
pub mod diagnostic;
pub mod protocol;
pub mod resolve;
pub mod validate;
pub mod codegen;

use std::path::Path;
use tracing::{debug, info};

pub use codegen::{generate_all, ArtifactMap, GeneratedCode};
pub use config::CodeGenerationSettings;
pub use diagnostic::GeneratorError;
pub use protocol::ProtocolDefinition;

/// The main compiler struct that orchestrates the generation pipeline.
pub struct Compiler {
    settings: CodeGenerationSettings,
}

impl Compiler {
    /// Creates a new compiler with the given settings.
    pub fn new(settings: CodeGenerationSettings) -> Self {
        Self { settings }
    }

    /// Generates code for the protocol without touching the filesystem.
    pub fn generate(&self, protocol: &ProtocolDefinition) -> Result<GeneratedCode, GeneratorError> {
        generate_all(protocol, &self.settings)
    }

    /// Generates code and writes it below `out_dir`.
    ///
    /// Nothing is written unless generation succeeds as a whole.
    pub fn compile(&self, protocol: &ProtocolDefinition, out_dir: &Path) -> Result<CompileResult, GeneratorError> {
        let generated = self.generate(protocol)?;
        let files = generated.files(&self.settings)?;
        write_output(out_dir, &files)?;

        info!(files = files.len(), out_dir = %out_dir.display(), "generated code written");
        let per_domain = generated
            .domain_order
            .iter()
            .map(|domain| {
                let count = generated.artifacts.iter().filter(|a| &a.domain == domain).count();
                (domain.clone(), count)
            })
            .collect();
        Ok(CompileResult {
            per_domain,
            artifacts: generated.artifacts.len(),
            aliases: generated.aliases.len(),
            files: files.len(),
            warnings: generated.warnings,
        })
    }

    /// Loads schema files, then compiles them.
    pub fn compile_files<P: AsRef<Path>>(&self, schemas: &[P], out_dir: &Path) -> Result<CompileResult, GeneratorError> {
        let protocol = ProtocolDefinition::load(schemas)?;
        self.compile(&protocol, out_dir)
    }

    /// Checks that the protocol would generate, without writing anything.
    ///
    /// Every reference is resolved, so this fails exactly when
    /// [`Compiler::compile`] would. Returns the warnings on success.
    pub fn check(&self, protocol: &ProtocolDefinition) -> Result<Vec<GeneratorError>, GeneratorError> {
        let generated = self.generate(protocol)?;
        debug!(
            domains = generated.domain_order.len(),
            artifacts = generated.artifacts.len(),
            "protocol is well-formed"
        );
        Ok(generated.warnings)
    }
}

/// Writes generated files below `out_dir`.
fn write_output(out_dir: &Path, files: &[codegen::OutputFile]) -> Result<(), GeneratorError> {
    std::fs::create_dir_all(out_dir).map_err(|e| GeneratorError::io(out_dir, e.to_string()))?;

    for file in files {
        let path = out_dir.join(&file.path);
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }
        std::fs::write(&path, &file.contents).map_err(|e| GeneratorError::io(&path, e.to_string()))?;
    }

    Ok(())
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileResult {
    /// Artifacts generated per domain, in generation order.
    pub per_domain: Vec<(String, usize)>,
    /// Number of artifacts generated.
    pub artifacts: usize,
    /// Number of redirected commands.
    pub aliases: usize,
    /// Number of files written.
    pub files: usize,
    /// Non-fatal diagnostics.
    pub warnings: Vec<GeneratorError>,
}
