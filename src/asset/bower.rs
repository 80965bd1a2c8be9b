//! Bower asset type

use crate::asset::traits::AssetType;
use crate::asset::types::AssetKind;
use crate::semver::{SemverConverter, VersionConverter};

const EXTRA_KEYS: [(&str, &str); 3] = [
    ("main", "bower-asset-main"),
    ("ignore", "bower-asset-ignore"),
    ("private", "bower-asset-private"),
];

pub struct BowerAssetType {
    converter: SemverConverter,
}

impl BowerAssetType {
    pub fn new() -> Self {
        Self {
            converter: SemverConverter::new(),
        }
    }
}

impl Default for BowerAssetType {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetType for BowerAssetType {
    fn kind(&self) -> AssetKind {
        AssetKind::Bower
    }

    fn manifest_file(&self) -> &'static str {
        "bower.json"
    }

    fn extra_key_mappings(&self) -> &'static [(&'static str, &'static str)] {
        &EXTRA_KEYS
    }

    fn version_converter(&self) -> &dyn VersionConverter {
        &self.converter
    }
}
