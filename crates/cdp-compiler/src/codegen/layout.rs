//! Projection of generated artifacts onto output files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{CodeGenerationSettings, OutputGranularity};
use super::artifacts::Artifact;
use super::backend::{Backend, ModuleEntry};
use super::GeneratedCode;

/// A file to write, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

pub(crate) fn layout_files(
    code: &GeneratedCode,
    settings: &CodeGenerationSettings,
    backend: &dyn Backend,
) -> Vec<OutputFile> {
    let per_type = settings.granularity == OutputGranularity::PerType;
    let mut files = Vec::new();
    let mut modules = Vec::new();

    for domain in &code.domain_order {
        let artifacts: Vec<&Artifact> = code.artifacts.iter().filter(|a| &a.domain == domain).collect();
        if artifacts.is_empty() {
            continue;
        }

        let mut stems = Vec::new();
        if per_type {
            let mut taken = HashSet::new();
            for artifact in &artifacts {
                let path = unique_path(backend.type_path(domain, &artifact.ident), &mut taken);
                if let Some(stem) = path.file_stem() {
                    stems.push(stem.to_string_lossy().into_owned());
                }
                files.push(OutputFile {
                    path,
                    contents: backend.source_file(domain, &[artifact.text.as_str()], true),
                });
            }
        } else {
            let bodies: Vec<&str> = artifacts.iter().map(|a| a.text.as_str()).collect();
            files.push(OutputFile {
                path: backend.domain_path(domain),
                contents: backend.source_file(domain, &bodies, false),
            });
        }

        modules.push(ModuleEntry {
            domain: domain.as_str(),
            files: stems,
        });
    }

    files.extend(
        backend
            .index_files(&modules, per_type)
            .into_iter()
            .map(|(path, contents)| OutputFile { path, contents }),
    );
    files
}

/// Suffixes the file stem with a number until the path is free, ignoring
/// case. Backends may map distinct identifiers to the same file name.
fn unique_path(path: PathBuf, taken: &mut HashSet<String>) -> PathBuf {
    let mut candidate = path.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.to_string_lossy().to_lowercase()) {
        candidate = numbered(&path, suffix);
        suffix += 1;
    }
    candidate
}

fn numbered(path: &Path, suffix: usize) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_path_suffixes_clashing_stems() {
        let mut taken = HashSet::new();
        let first = unique_path(PathBuf::from("cdp/network/url_list.rs"), &mut taken);
        let second = unique_path(PathBuf::from("cdp/network/url_list.rs"), &mut taken);
        let third = unique_path(PathBuf::from("cdp/network/URL_LIST.rs"), &mut taken);

        assert_eq!(first, PathBuf::from("cdp/network/url_list.rs"));
        assert_eq!(second, PathBuf::from("cdp/network/url_list2.rs"));
        assert_eq!(third, PathBuf::from("cdp/network/URL_LIST3.rs"));
    }
}
