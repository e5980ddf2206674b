//! Package manifest discovery.
//!
//! Walks up from a path to the nearest `Cargo.toml` or `package.json` that
//! describes a package and reads the metadata a CLI shows about itself.

use crate::error::{ClirkError, Result};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Cargo,
    Npm,
}

impl ManifestKind {
    /// Lookup order within a directory.
    pub const ALL: [ManifestKind; 2] = [ManifestKind::Cargo, ManifestKind::Npm];

    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Cargo => "Cargo.toml",
            ManifestKind::Npm => "package.json",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Directory holding the manifest
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub kind: Option<ManifestKind>,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
}

/// Turn a path or `file://` URL into the directory the search starts in.
fn start_dir(identifier: &str) -> Result<PathBuf> {
    let raw = identifier.strip_prefix("file://").unwrap_or(identifier);
    let path = std::path::absolute(Path::new(raw))?;
    if path.is_dir() {
        return Ok(path);
    }
    Ok(path.parent().map(Path::to_path_buf).unwrap_or(path))
}

/// Find the package `identifier` belongs to. `Ok(None)` if no manifest exists
/// up to the filesystem root.
pub fn find_up_package(identifier: &str) -> Result<Option<PackageInfo>> {
    let start = start_dir(identifier)?;

    for dir in start.ancestors() {
        for kind in ManifestKind::ALL {
            let manifest = dir.join(kind.file_name());
            if !manifest.is_file() {
                continue;
            }
            match read_manifest(&manifest, kind) {
                Ok(Some(info)) => {
                    tracing::debug!(manifest = %manifest.display(), "resolved package manifest");
                    return Ok(Some(info));
                }
                Ok(None) => {
                    tracing::debug!(manifest = %manifest.display(), "manifest has no package, skipping");
                }
                Err(e) => {
                    tracing::debug!(manifest = %manifest.display(), error = %e, "skipping manifest");
                }
            }
        }
    }

    Ok(None)
}

/// Read a single manifest. `Ok(None)` if it parses but describes no package
/// (a virtual Cargo workspace).
pub fn read_manifest(path: &Path, kind: ManifestKind) -> Result<Option<PackageInfo>> {
    let content = fs::read_to_string(path).map_err(|source| ClirkError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let fields = match kind {
        ManifestKind::Cargo => cargo_fields(path, &root, &content)?,
        ManifestKind::Npm => Some(npm_fields(path, &content)?),
    };

    Ok(fields.map(|fields| PackageInfo {
        root,
        manifest: path.to_path_buf(),
        kind: Some(kind),
        name: fields.name.unwrap_or_default(),
        version: fields.version.unwrap_or_default(),
        description: fields.description,
        homepage: fields.homepage,
    }))
}

#[derive(Default)]
struct Fields {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    homepage: Option<String>,
}

fn npm_fields(path: &Path, content: &str) -> Result<Fields> {
    let json: JsonValue =
        serde_json::from_str(content).map_err(|e| ClirkError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !json.is_object() {
        return Err(ClirkError::ManifestParse {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    }

    let text = |key: &str| json.get(key).and_then(JsonValue::as_str).map(str::to_string);
    Ok(Fields {
        name: text("name"),
        version: text("version"),
        description: text("description"),
        homepage: text("homepage"),
    })
}

fn cargo_fields(path: &Path, root: &Path, content: &str) -> Result<Option<Fields>> {
    let manifest: toml::Table = content.parse().map_err(|e: toml::de::Error| {
        ClirkError::ManifestParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        }
    })?;
    let Some(package) = manifest.get("package").and_then(toml::Value::as_table) else {
        return Ok(None);
    };

    let field = |key: &str| match package.get(key) {
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(toml::Value::Table(t)) if inherits_workspace(t) => workspace_field(root, key),
        _ => None,
    };

    Ok(Some(Fields {
        name: field("name"),
        version: field("version"),
        description: field("description"),
        homepage: field("homepage"),
    }))
}

fn inherits_workspace(table: &toml::Table) -> bool {
    matches!(table.get("workspace"), Some(toml::Value::Boolean(true)))
}

/// Resolve `key.workspace = true` from the nearest `[workspace.package]`,
/// which may live in the package's own manifest or any ancestor.
fn workspace_field(root: &Path, key: &str) -> Option<String> {
    root.ancestors().find_map(|dir| {
        let content = fs::read_to_string(dir.join("Cargo.toml")).ok()?;
        let manifest: toml::Table = content.parse().ok()?;
        let workspace_package = manifest.get("workspace")?.get("package")?;
        workspace_package.get(key)?.as_str().map(str::to_string)
    })
}

#[cfg(test)]
mod tests;
