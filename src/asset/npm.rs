//! npm asset type

use crate::asset::traits::AssetType;
use crate::asset::types::AssetKind;
use crate::semver::{SemverConverter, VersionConverter};

const EXTRA_KEYS: [(&str, &str); 6] = [
    ("bugs", "npm-asset-bugs"),
    ("files", "npm-asset-files"),
    ("main", "npm-asset-main"),
    ("bin", "npm-asset-bin"),
    ("scripts", "npm-asset-scripts"),
    ("repository", "npm-asset-repository"),
];

pub struct NpmAssetType {
    converter: SemverConverter,
}

impl NpmAssetType {
    pub fn new() -> Self {
        Self {
            converter: SemverConverter::new(),
        }
    }
}

impl Default for NpmAssetType {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetType for NpmAssetType {
    fn kind(&self) -> AssetKind {
        AssetKind::Npm
    }

    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    fn extra_key_mappings(&self) -> &'static [(&'static str, &'static str)] {
        &EXTRA_KEYS
    }

    fn version_converter(&self) -> &dyn VersionConverter {
        &self.converter
    }
}
