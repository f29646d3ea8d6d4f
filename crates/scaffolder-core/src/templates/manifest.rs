//! Project manifest merging and template metadata

use crate::error::{Result, ScaffoldError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Name of the project manifest that gets merged instead of overwritten
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the metadata file inside each template directory
pub const TEMPLATE_METADATA_FILE: &str = "template.yaml";

/// Top-level manifest fields whose keys are kept in lexical order
const DEPENDENCY_FIELDS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Merge an incoming manifest into an existing one.
///
/// Objects merge key-wise, arrays concatenate existing-first, and when both
/// sides hold a scalar the existing value is kept. Dependency maps are sorted
/// afterwards.
pub fn merge(existing: Option<Value>, incoming: Value) -> Value {
    let merged = match existing {
        Some(existing) => deep_merge(existing, incoming),
        None => incoming,
    };
    sort_dependencies(merged)
}

fn deep_merge(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => {
                        let current = std::mem::take(slot);
                        *slot = deep_merge(current, value);
                    }
                    None => {
                        target.insert(key, value);
                    }
                }
            }
            Value::Object(target)
        }
        (Value::Array(mut target), Value::Array(source)) => {
            target.extend(source);
            Value::Array(target)
        }
        (Value::Null, incoming) => incoming,
        (existing, incoming) if is_scalar(&existing) && is_scalar(&incoming) => existing,
        (_, incoming) => incoming,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Reorder the keys of each top-level dependency map lexically
pub fn sort_dependencies(mut manifest: Value) -> Value {
    if let Value::Object(fields) = &mut manifest {
        for field in DEPENDENCY_FIELDS {
            if let Some(Value::Object(deps)) = fields.get_mut(*field) {
                let mut entries: Vec<(String, Value)> = std::mem::take(deps).into_iter().collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                *deps = entries.into_iter().collect::<Map<String, Value>>();
            }
        }
    }
    manifest
}

/// Serialize a manifest with two-space indentation and a trailing newline
pub fn to_manifest_string(manifest: &Value) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(manifest)?;
    out.push('\n');
    Ok(out)
}

/// Parse a manifest file, reporting the path on malformed content
pub async fn read_manifest(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ScaffoldError::MalformedManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a manifest in the fixed output format
pub async fn write_manifest(path: &Path, manifest: &Value) -> Result<()> {
    let content = to_manifest_string(manifest).map_err(|e| ScaffoldError::io(path, e.into()))?;
    fs::write(path, content)
        .await
        .map_err(|e| ScaffoldError::io(path, e))
}

/// Merge the manifest at `incoming` into the one already at `dest`
pub async fn merge_manifest_files(dest: &Path, incoming: &Path) -> Result<()> {
    let existing = read_manifest(dest).await?;
    let incoming = read_manifest(incoming).await?;
    write_manifest(dest, &merge(Some(existing), incoming)).await
}

/// Per-template metadata (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,
}

impl TemplateManifest {
    /// Load the metadata file from a template directory
    pub async fn load(template_dir: &Path) -> anyhow::Result<Self> {
        let path = template_dir.join(TEMPLATE_METADATA_FILE);
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}
