//! Package conversion
//!
//! Converts a whole npm/bower manifest into a Composer package. Each
//! dependency goes through [`detect`]; VCS repositories found along the way
//! are collected in dependency order, duplicates included.

pub mod manifest;

pub use manifest::{AssetManifest, parse_manifest, read_manifest};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::asset::AssetType;
use crate::semver::error::ConvertError;
use crate::semver::location::{RepositoryDescriptor, detect};

/// Top-level package keys a mapping may not write to
const RESERVED_KEYS: [&str; 5] = ["name", "version", "require", "require-dev", "repositories"];

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest has no package name")]
    MissingName,

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Converted dependency section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedDependencies {
    pub require: IndexMap<String, String>,
    pub repositories: Vec<RepositoryDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub include_dev_dependencies: bool,
    /// Extra manifest keys to copy: asset key -> composer `extra` key
    pub extra_keys: IndexMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_dev_dependencies: true,
            extra_keys: IndexMap::new(),
        }
    }
}

/// Composer package built from an asset manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposerPackage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub require: IndexMap<String, String>,
    #[serde(rename = "require-dev", skip_serializing_if = "IndexMap::is_empty")]
    pub require_dev: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<RepositoryDescriptor>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

/// Convert a dependency map, keeping declaration order
pub fn convert_dependencies(
    asset: &dyn AssetType,
    dependencies: &IndexMap<String, String>,
) -> Result<ConvertedDependencies, ConvertError> {
    let vendor = asset.composer_vendor();
    let mut converted = ConvertedDependencies::default();

    for (name, version) in dependencies {
        let detection = detect(asset, name, version).inspect_err(|e| {
            warn!("Failed to convert dependency '{}@{}': {}", name, version, e);
        })?;

        converted.require.insert(
            format!("{}/{}", vendor, detection.rewrite.name),
            detection.rewrite.constraint,
        );
        converted.repositories.extend(detection.repository);
    }

    Ok(converted)
}

/// Convert a whole manifest into a Composer package
pub fn convert_manifest(
    asset: &dyn AssetType,
    manifest: &AssetManifest,
    options: &ConvertOptions,
) -> Result<ComposerPackage, PackageError> {
    let name = manifest.name.as_deref().ok_or(PackageError::MissingName)?;
    let converter = asset.version_converter();

    let version = manifest
        .version
        .as_deref()
        .map(|version| converter.convert_version(version))
        .transpose()?;

    let dependencies = convert_dependencies(asset, &manifest.dependencies)?;
    let mut repositories = dependencies.repositories;

    let require_dev = if options.include_dev_dependencies {
        let dev = convert_dependencies(asset, &manifest.dev_dependencies)?;
        repositories.extend(dev.repositories);
        dev.require
    } else {
        IndexMap::new()
    };

    Ok(ComposerPackage {
        name: format!("{}/{}", asset.composer_vendor(), name),
        version,
        description: manifest.description.clone(),
        keywords: manifest.keywords.clone(),
        license: manifest.license.clone(),
        require: dependencies.require,
        require_dev,
        repositories,
        extra: extra_section(asset, manifest, options)?,
    })
}

/// Copy mapped manifest keys; asset defaults first, then user mappings
fn extra_section(
    asset: &dyn AssetType,
    manifest: &AssetManifest,
    options: &ConvertOptions,
) -> Result<IndexMap<String, Value>, ConvertError> {
    for (asset_key, composer_key) in &options.extra_keys {
        validate_key_mapping(asset_key, composer_key)?;
    }

    let defaults = asset
        .extra_key_mappings()
        .iter()
        .map(|(asset_key, composer_key)| (*asset_key, *composer_key));
    let custom = options
        .extra_keys
        .iter()
        .map(|(asset_key, composer_key)| (asset_key.as_str(), composer_key.as_str()));

    let mut extra = IndexMap::new();
    for (asset_key, composer_key) in defaults.chain(custom) {
        if let Some(value) = manifest.other.get(asset_key) {
            extra.insert(composer_key.to_string(), value.clone());
        }
    }

    Ok(extra)
}

fn validate_key_mapping(asset_key: &str, composer_key: &str) -> Result<(), ConvertError> {
    let reason = if asset_key.trim().is_empty() {
        "asset key is empty"
    } else if composer_key.trim().is_empty() {
        "composer key is empty"
    } else if RESERVED_KEYS.contains(&composer_key) {
        "composer key is reserved"
    } else {
        return Ok(());
    };

    Err(ConvertError::InvalidKeyMapping {
        key: asset_key.to_string(),
        reason: reason.to_string(),
    })
}
