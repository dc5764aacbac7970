//! TypeScript emitter.
//!
//! Declarations live in `namespace CDP.<Domain>` blocks. Namespaces merge
//! across files, so per-type and per-domain output reference each other the
//! same way: `Page.FrameId` from inside `CDP.Network` resolves through the
//! enclosing `CDP` namespace.

use std::path::PathBuf;

use crate::protocol::Primitive;
use super::{doc_lines, indent, Backend, EnumDecl, Field, RecordDecl};

pub struct TypeScriptBackend {
    namespace: String,
}

impl TypeScriptBackend {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }
}

/// Writes a JSDoc block, or nothing when there is nothing to say.
fn js_doc(output: &mut String, description: Option<&str>, deprecated: bool) {
    let mut lines = doc_lines(description);
    if deprecated {
        lines.push("@deprecated");
    }
    match lines.as_slice() {
        [] => {}
        [line] => output.push_str(&format!("/** {} */\n", line)),
        lines => {
            output.push_str("/**\n");
            for line in lines {
                if line.is_empty() {
                    output.push_str(" *\n");
                } else {
                    output.push_str(&format!(" * {}\n", line));
                }
            }
            output.push_str(" */\n");
        }
    }
}

/// Quotes a property name that is not a valid identifier.
fn property_name(name: &str) -> String {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// A JSON string literal, which is also a valid TypeScript one.
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn field_line(field: &Field) -> String {
    let marker = if field.optional { "?" } else { "" };
    format!("{}{}: {};", property_name(&field.name), marker, field.ty)
}

impl Backend for TypeScriptBackend {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::String | Primitive::Binary => "string",
            Primitive::Integer | Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Object => "Record<string, unknown>",
            Primitive::Any => "unknown",
        }
        .to_string()
    }

    fn sequence(&self, item: &str) -> String {
        if item.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_') {
            format!("{}[]", item)
        } else {
            format!("Array<{}>", item)
        }
    }

    fn inline_enum(&self, values: &[String]) -> String {
        values
            .iter()
            .map(|v| string_literal(v))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn inline_object(&self, fields: &[Field]) -> String {
        let fields: Vec<String> = fields.iter().map(field_line).collect();
        format!("{{ {} }}", fields.join(" "))
    }

    fn type_ref(&self, target_domain: &str, current_domain: &str, ident: &str) -> String {
        if target_domain == current_domain {
            ident.to_string()
        } else {
            format!("{}.{}", target_domain, ident)
        }
    }

    fn record(&self, decl: &RecordDecl<'_>) -> String {
        let mut output = String::new();
        js_doc(&mut output, decl.description, decl.deprecated);
        output.push_str(&format!("export interface {} {{\n", decl.ident));
        for field in decl.fields {
            let mut member = String::new();
            js_doc(&mut member, field.description.as_deref(), field.deprecated);
            member.push_str(&field_line(field));
            output.push_str(&indent(&member, 2));
        }
        output.push_str("}\n");
        output
    }

    fn enumeration(&self, decl: &EnumDecl<'_>) -> String {
        let mut output = String::new();
        js_doc(&mut output, decl.description, decl.deprecated);
        output.push_str(&format!("export enum {} {{\n", decl.ident));
        for (ident, literal) in decl.variants {
            output.push_str(&format!("  {} = {},\n", ident, string_literal(literal)));
        }
        output.push_str("}\n");
        output
    }

    fn alias(&self, ident: &str, description: Option<&str>, ty: &str) -> String {
        let mut output = String::new();
        js_doc(&mut output, description, false);
        output.push_str(&format!("export type {} = {};\n", ident, ty));
        output
    }

    fn type_path(&self, domain: &str, ident: &str) -> PathBuf {
        PathBuf::from(&self.namespace)
            .join(domain)
            .join(format!("{}.{}", ident, self.extension()))
    }

    fn domain_path(&self, domain: &str) -> PathBuf {
        PathBuf::from(&self.namespace).join(format!("{}.{}", domain, self.extension()))
    }

    fn source_file(&self, domain: &str, bodies: &[&str], _standalone: bool) -> String {
        let mut output = format!("// Generated from the {} domain. Do not edit.\n\n", domain);
        output.push_str(&format!("namespace {}.{} {{\n", self.namespace, domain));
        for (i, body) in bodies.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&indent(body, 2));
        }
        output.push_str("}\n");
        output
    }
}
