//! TOML-described transform cases.
//!
//! ```toml
//! [[case]]
//! name = "strips dns prefetch control"
//! transformers = ["metatag"]
//! document_url = "https://www.example.com/"   # optional
//! input = "<meta http-equiv=x-dns-prefetch-control content=on>"
//! expected = "<!doctype html><html><head></head><body></body></html>"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCUMENT_URL: &str = "https://www.example.com/";

#[derive(Clone, Debug, Deserialize)]
pub struct TransformCase {
    pub name: String,
    pub transformers: Vec<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub rtv: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
    pub input: String,
    pub expected: String,
}

impl TransformCase {
    pub fn document_url(&self) -> &str {
        self.document_url.as_deref().unwrap_or(DEFAULT_DOCUMENT_URL)
    }
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(rename = "case", default)]
    cases: Vec<TransformCase>,
}

/// Loads every case from `path`. Panics with the offending path on malformed files.
pub fn load_cases(path: &Path) -> Vec<TransformCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case file {path:?}: {err}"));
    let file: CaseFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse case file {path:?}: {err}"));
    file.cases
}

/// All `*.toml` files directly under `dir`, sorted by name.
pub fn case_files(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"));
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}
