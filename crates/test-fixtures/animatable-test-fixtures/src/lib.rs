//! JSON fixtures shared by the engine's integration tests.
//!
//! `fixtures/manifest.json` maps a fixture name to a file under `fixtures/`,
//! grouped by kind: single property objects or whole documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

static MANIFEST: Lazy<std::result::Result<Manifest, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .map_err(|err| err.to_string())
});

#[derive(Debug, Deserialize)]
struct Manifest {
    properties: BTreeMap<String, String>,
    documents: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Property,
    Document,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Property => "property",
            Kind::Document => "document",
        }
    }

    fn entries(self, manifest: &Manifest) -> &BTreeMap<String, String> {
        match self {
            Kind::Property => &manifest.properties,
            Kind::Document => &manifest.documents,
        }
    }
}

fn manifest() -> Result<&'static Manifest> {
    MANIFEST
        .as_ref()
        .map_err(|err| anyhow!("fixtures manifest is invalid: {err}"))
}

fn names(kind: Kind) -> Vec<String> {
    manifest()
        .map(|m| kind.entries(m).keys().cloned().collect())
        .unwrap_or_default()
}

fn locate(kind: Kind, name: &str) -> Result<PathBuf> {
    let rel = kind
        .entries(manifest()?)
        .get(name)
        .ok_or_else(|| anyhow!("no {} fixture named '{name}'", kind.label()))?;
    Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel))
}

fn text(kind: Kind, name: &str) -> Result<String> {
    let path = locate(kind, name)?;
    fs::read_to_string(&path)
        .with_context(|| format!("reading {} fixture {}", kind.label(), path.display()))
}

fn parsed(kind: Kind, name: &str) -> Result<Value> {
    let raw = text(kind, name)?;
    serde_json::from_str(&raw).with_context(|| format!("{} fixture '{name}' is not JSON", kind.label()))
}

/// Single property objects (`{ "a": .., "k": .. }`).
pub mod properties {
    use super::{names, parsed, text, Kind, Result, Value};

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        names(Kind::Property)
    }

    pub fn json(name: &str) -> Result<String> {
        text(Kind::Property, name)
    }

    pub fn value(name: &str) -> Result<Value> {
        parsed(Kind::Property, name)
    }
}

/// Whole animation documents (header plus layers).
pub mod documents {
    use super::{names, parsed, text, Kind, Result, Value};

    pub fn keys() -> Vec<String> {
        names(Kind::Document)
    }

    pub fn json(name: &str) -> Result<String> {
        text(Kind::Document, name)
    }

    pub fn value(name: &str) -> Result<Value> {
        parsed(Kind::Document, name)
    }
}
