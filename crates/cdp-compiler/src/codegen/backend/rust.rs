//! Rust emitter.
//!
//! Each domain becomes a module under the root module (`cdp::network`).
//! Records derive serde with the wire names kept through `rename`, and
//! cross-domain references are spelled as absolute paths so the same text
//! works for per-type and per-domain layouts.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::codegen::naming::to_snake_case;
use crate::protocol::Primitive;
use super::{doc_lines, Backend, EnumDecl, Field, ModuleEntry, RecordDecl};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop",
    "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "static",
    "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
    "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "super", "Self"];

pub struct RustBackend {
    root_module: String,
}

impl RustBackend {
    pub fn new(namespace: &str) -> Self {
        Self {
            root_module: to_snake_case(namespace),
        }
    }
}

fn rust_doc(output: &mut String, indent: &str, description: Option<&str>, deprecated: bool) {
    for line in doc_lines(description) {
        if line.is_empty() {
            output.push_str(&format!("{}///\n", indent));
        } else {
            output.push_str(&format!("{}/// {}\n", indent, line));
        }
    }
    if deprecated {
        output.push_str(&format!("{}///\n{}/// Deprecated.\n", indent, indent));
    }
}

/// Snake-cased field name, escaped when it collides with a keyword.
fn field_ident(name: &str) -> String {
    let ident = to_snake_case(name);
    let ident = if ident.starts_with(|c: char| c.is_ascii_digit()) || ident.is_empty() {
        format!("_{}", ident)
    } else {
        ident
    };
    if RESERVED.contains(&ident.as_str()) {
        format!("{}_", ident)
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

/// [`field_ident`], numbered when an earlier field of the same struct
/// already took the identifier.
fn unique_field_ident(name: &str, taken: &mut HashSet<String>) -> String {
    let base = field_ident(name);
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{}{}", base.trim_start_matches("r#"), suffix);
        suffix += 1;
    }
    candidate
}

/// Module name for a generated file stem.
fn module_ident(stem: &str) -> String {
    if KEYWORDS.contains(&stem) {
        format!("r#{}", stem)
    } else {
        stem.to_string()
    }
}

fn file_header(domain: &str) -> String {
    format!(
        "//! Generated from the {} domain. Do not edit.\n\
         #![allow(unused_imports, non_camel_case_types, clippy::all)]\n\n\
         use serde::{{Deserialize, Serialize}};\n",
        domain
    )
}

impl Backend for RustBackend {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::String | Primitive::Binary => "String",
            Primitive::Integer => "i64",
            Primitive::Number => "f64",
            Primitive::Boolean => "bool",
            Primitive::Object => "serde_json::Map<String, serde_json::Value>",
            Primitive::Any => "serde_json::Value",
        }
        .to_string()
    }

    fn sequence(&self, item: &str) -> String {
        format!("Vec<{}>", item)
    }

    fn inline_enum(&self, _values: &[String]) -> String {
        self.primitive(Primitive::String)
    }

    fn inline_object(&self, _fields: &[Field]) -> String {
        self.primitive(Primitive::Object)
    }

    fn type_ref(&self, target_domain: &str, current_domain: &str, ident: &str) -> String {
        if target_domain == current_domain {
            ident.to_string()
        } else {
            format!("crate::{}::{}::{}", self.root_module, to_snake_case(target_domain), ident)
        }
    }

    fn boxed(&self, ty: String) -> String {
        format!("Box<{}>", ty)
    }

    fn variant_ident(&self, ident: String) -> String {
        if KEYWORDS.contains(&ident.as_str()) || RESERVED.contains(&ident.as_str()) {
            format!("{}_", ident)
        } else {
            ident
        }
    }

    fn record(&self, decl: &RecordDecl<'_>) -> String {
        let mut output = String::new();
        rust_doc(&mut output, "", decl.description, decl.deprecated);
        output.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
        output.push_str(&format!("pub struct {} {{\n", decl.ident));

        let mut taken = HashSet::new();
        for field in decl.fields {
            rust_doc(&mut output, "    ", field.description.as_deref(), field.deprecated);
            let ident = unique_field_ident(&field.name, &mut taken);
            let mut attributes = Vec::new();
            if ident.trim_start_matches("r#") != field.name {
                attributes.push(format!("rename = {:?}", field.name));
            }
            let ty = if field.optional {
                attributes.push("default".to_string());
                attributes.push("skip_serializing_if = \"Option::is_none\"".to_string());
                format!("Option<{}>", field.ty)
            } else {
                field.ty.clone()
            };
            if !attributes.is_empty() {
                output.push_str(&format!("    #[serde({})]\n", attributes.join(", ")));
            }
            output.push_str(&format!("    pub {}: {},\n", ident, ty));
        }

        output.push_str("}\n");
        output
    }

    fn enumeration(&self, decl: &EnumDecl<'_>) -> String {
        let mut output = String::new();
        rust_doc(&mut output, "", decl.description, decl.deprecated);
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]\n");
        output.push_str(&format!("pub enum {} {{\n", decl.ident));
        for (ident, literal) in decl.variants {
            output.push_str(&format!("    #[serde(rename = {:?})]\n", literal));
            output.push_str(&format!("    {},\n", ident));
        }
        output.push_str("}\n");
        output
    }

    fn alias(&self, ident: &str, description: Option<&str>, ty: &str) -> String {
        let mut output = String::new();
        rust_doc(&mut output, "", description, false);
        output.push_str(&format!("pub type {} = {};\n", ident, ty));
        output
    }

    fn type_path(&self, domain: &str, ident: &str) -> PathBuf {
        let mut stem = to_snake_case(ident);
        if RESERVED.contains(&stem.as_str()) {
            stem.push('_');
        }
        PathBuf::from(&self.root_module)
            .join(to_snake_case(domain))
            .join(format!("{}.rs", stem))
    }

    fn domain_path(&self, domain: &str) -> PathBuf {
        PathBuf::from(&self.root_module).join(format!("{}.rs", to_snake_case(domain)))
    }

    fn source_file(&self, domain: &str, bodies: &[&str], standalone: bool) -> String {
        let mut output = file_header(domain);
        if standalone {
            output.push_str("use super::*;\n");
        }
        for body in bodies {
            output.push('\n');
            output.push_str(body);
        }
        output
    }

    fn index_files(&self, modules: &[ModuleEntry<'_>], per_type: bool) -> Vec<(PathBuf, String)> {
        let mut files = Vec::new();
        let mut root = String::from("//! Generated protocol modules. Do not edit.\n\n");

        for module in modules {
            let name = to_snake_case(module.domain);
            root.push_str(&format!("pub mod {};\n", name));

            if per_type {
                let mut index = format!("//! Generated from the {} domain. Do not edit.\n\n", module.domain);
                let names: Vec<String> = module.files.iter().map(|stem| module_ident(stem)).collect();
                for name in &names {
                    index.push_str(&format!("mod {};\n", name));
                }
                index.push('\n');
                for name in &names {
                    index.push_str(&format!("pub use {}::*;\n", name));
                }
                files.push((PathBuf::from(&self.root_module).join(&name).join("mod.rs"), index));
            }
        }

        files.insert(0, (PathBuf::from(&self.root_module).join("mod.rs"), root));
        files
    }
}
