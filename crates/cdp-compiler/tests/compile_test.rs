use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;

use cdp_compiler::config::{CodeGenerationSettings, OutputGranularity};
use cdp_compiler::{Compiler, GeneratorError, ProtocolDefinition};

fn browser_protocol() -> String {
    json!({
        "version": { "major": "1", "minor": "3" },
        "domains": [
            { "domain": "Page", "types": [{ "id": "FrameId", "type": "string" }] },
            {
                "domain": "Network",
                "dependencies": ["Page"],
                "types": [
                    { "id": "Cookie", "type": "object", "properties": [
                        { "name": "name", "type": "string" },
                        { "name": "frameId", "$ref": "Page.FrameId", "optional": true }
                    ] },
                    { "id": "Headers", "type": "object" }
                ],
                "commands": [
                    { "name": "getCookies", "returns": [{ "name": "cookies", "type": "array", "items": { "$ref": "Cookie" } }] }
                ]
            }
        ]
    })
    .to_string()
}

fn js_protocol() -> String {
    json!({
        "domains": [{
            "domain": "Runtime",
            "events": [{ "name": "executionContextDestroyed", "parameters": [{ "name": "executionContextId", "type": "integer" }] }]
        }]
    })
    .to_string()
}

fn write_schemas(dir: &std::path::Path) -> Vec<PathBuf> {
    let browser = dir.join("browser_protocol.json");
    let js = dir.join("js_protocol.json");
    std::fs::write(&browser, browser_protocol()).unwrap();
    std::fs::write(&js, js_protocol()).unwrap();
    vec![browser, js]
}

fn relative_files(root: &std::path::Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[test]
fn compile_typescript_per_type() {
    let dir = tempfile::TempDir::new().unwrap();
    let schemas = write_schemas(dir.path());
    let out = dir.path().join("generated");

    let compiler = Compiler::new(CodeGenerationSettings::default());
    let result = compiler.compile_files(&schemas, &out).unwrap();

    assert_eq!(result.artifacts, 4);
    assert_eq!(result.files, 4);
    assert_eq!(
        result.per_domain,
        vec![("Page".to_string(), 0), ("Network".to_string(), 3), ("Runtime".to_string(), 1)]
    );
    assert_eq!(
        relative_files(&out),
        vec![
            "CDP/Network/Cookie.ts",
            "CDP/Network/GetCookiesResult.ts",
            "CDP/Network/Headers.ts",
            "CDP/Runtime/ExecutionContextDestroyedEvent.ts",
        ]
    );

    let cookie = std::fs::read_to_string(out.join("CDP/Network/Cookie.ts")).unwrap();
    assert_eq!(
        cookie,
        "// Generated from the Network domain. Do not edit.\n\
         \n\
         namespace CDP.Network {\n  \
           export interface Cookie {\n    \
             name: string;\n    \
             frameId?: string;\n  \
           }\n\
         }\n"
    );

    let headers = std::fs::read_to_string(out.join("CDP/Network/Headers.ts")).unwrap();
    assert!(headers.contains("export type Headers = Record<string, unknown>;"));
}

#[test]
fn compile_rust_per_domain() {
    let dir = tempfile::TempDir::new().unwrap();
    let schemas = write_schemas(dir.path());
    let out = dir.path().join("src");

    let settings = CodeGenerationSettings {
        language: "rust".into(),
        granularity: OutputGranularity::PerDomain,
        ..Default::default()
    };
    let result = Compiler::new(settings).compile_files(&schemas, &out).unwrap();

    assert_eq!(result.files, 3);
    assert_eq!(relative_files(&out), vec!["cdp/mod.rs", "cdp/network.rs", "cdp/runtime.rs"]);

    let root = std::fs::read_to_string(out.join("cdp/mod.rs")).unwrap();
    assert!(root.contains("pub mod network;\npub mod runtime;\n"), "{root}");

    let network = std::fs::read_to_string(out.join("cdp/network.rs")).unwrap();
    assert!(network.starts_with("//! Generated from the Network domain. Do not edit.\n"));
    assert!(network.contains("pub struct Cookie {"));
    assert!(network.contains("pub frame_id: Option<String>,"), "{network}");
    assert!(network.contains("pub cookies: Vec<Cookie>,"), "{network}");
    assert!(network.contains("pub type Headers = serde_json::Map<String, serde_json::Value>;"));
}

#[test]
fn rust_per_type_has_module_indexes() {
    let protocol = ProtocolDefinition::from_documents([browser_protocol().as_str(), js_protocol().as_str()]).unwrap();
    let settings = CodeGenerationSettings {
        language: "rust".into(),
        ..Default::default()
    };

    let generated = Compiler::new(settings.clone()).generate(&protocol).unwrap();
    let files = generated.files(&settings).unwrap();
    let paths: Vec<String> = files.iter().map(|f| f.path.to_string_lossy().replace('\\', "/")).collect();

    assert_eq!(
        paths,
        vec![
            "cdp/network/cookie.rs",
            "cdp/network/headers.rs",
            "cdp/network/get_cookies_result.rs",
            "cdp/runtime/execution_context_destroyed_event.rs",
            "cdp/mod.rs",
            "cdp/network/mod.rs",
            "cdp/runtime/mod.rs",
        ]
    );
    assert!(files[0].contents.contains("use super::*;\n"));
}

#[test]
fn failed_generation_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let schema = dir.path().join("broken.json");
    std::fs::write(
        &schema,
        json!({ "domains": [{ "domain": "Network", "types": [
            { "id": "Cookie", "type": "object", "properties": [{ "name": "frame", "$ref": "Page.FrameId" }] }
        ] }] })
        .to_string(),
    )
    .unwrap();
    let out = dir.path().join("generated");

    let err = Compiler::new(CodeGenerationSettings::default())
        .compile_files(&[schema], &out)
        .unwrap_err();

    assert!(matches!(err, GeneratorError::GenerationFailed { .. }));
    assert!(!out.exists());
}

#[test]
fn check_reports_warnings() {
    let protocol = ProtocolDefinition::from_json(
        &json!({ "domains": [
            { "domain": "Page", "types": [{ "id": "FrameId", "type": "string" }] },
            { "domain": "Network", "types": [{ "id": "Frame", "$ref": "Page.FrameId" }] }
        ] })
        .to_string(),
    )
    .unwrap();

    let warnings = Compiler::new(CodeGenerationSettings::default()).check(&protocol).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].is_warning());
}

#[test]
fn check_resolves_every_reference() {
    let protocol = ProtocolDefinition::from_json(
        &json!({ "domains": [{ "domain": "Network", "types": [
            { "id": "Bad", "type": "object", "properties": [{ "name": "x", "$ref": "Missing" }] }
        ] }] })
        .to_string(),
    )
    .unwrap();

    let err = Compiler::new(CodeGenerationSettings::default()).check(&protocol).unwrap_err();
    assert!(matches!(
        err.errors().as_slice(),
        [GeneratorError::UnresolvedReference { reference, .. }] if reference == "Missing"
    ));
}

#[test]
fn settings_file_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "rootNamespace": "Protocol", "namingConvention": "preserve", "granularity": "perDomain", "language": "rust" }"#,
    )
    .unwrap();

    let settings = CodeGenerationSettings::load(&path).unwrap();
    assert_eq!(settings.root_namespace, "Protocol");
    assert_eq!(settings.granularity, OutputGranularity::PerDomain);
    assert!(settings.include_experimental);
}
