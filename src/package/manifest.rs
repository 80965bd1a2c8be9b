//! package.json / bower.json reading

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::package::PackageError;

/// Asset manifest, keys kept in file order
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// `"MIT"` in npm, `["MIT"]` in some bower manifests
    pub license: Option<Value>,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    /// Remaining keys, source of `extra` mappings
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

pub fn parse_manifest(content: &str) -> Result<AssetManifest, PackageError> {
    Ok(serde_json::from_str(content)?)
}

pub fn read_manifest(path: &Path) -> Result<AssetManifest, PackageError> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content)
}
