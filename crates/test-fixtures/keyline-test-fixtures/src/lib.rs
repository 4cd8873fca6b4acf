//! Timeline documents shared by the keyline tests, benches and CLI smoke tests.
//!
//! `fixtures/manifest.json` at the workspace root names every document and records
//! whether the loader is expected to accept it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Manifest {
    documents: BTreeMap<String, DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    /// Relative to the fixtures directory.
    file: String,
    /// `false` for documents the loader must reject.
    loads: bool,
}

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json is valid")
});

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn entry(name: &str) -> Result<&'static DocumentEntry> {
    match MANIFEST.documents.get(name) {
        Some(e) => Ok(e),
        None => bail!(
            "no timeline fixture named '{name}' (known: {})",
            documents::keys().join(", ")
        ),
    }
}

pub mod documents {
    use super::*;

    /// Fixture names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.documents.keys().cloned().collect()
    }

    /// Names of fixtures the loader should accept.
    pub fn loadable() -> Vec<String> {
        MANIFEST
            .documents
            .iter()
            .filter(|(_, e)| e.loads)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn expect_loads(name: &str) -> Result<bool> {
        Ok(entry(name)?.loads)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixtures_dir().join(&entry(name)?.file))
    }

    /// Raw file text, as a host would read it from disk.
    pub fn json(name: &str) -> Result<String> {
        let path = path(name)?;
        std::fs::read_to_string(&path)
            .with_context(|| format!("read timeline fixture {}", path.display()))
    }

    /// The file parsed as untyped JSON, for tests that tweak a field before loading.
    pub fn value(name: &str) -> Result<serde_json::Value> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("timeline fixture '{name}' is not JSON"))
    }
}
