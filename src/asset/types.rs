//! Common types for asset types

use std::path::Path;

/// Kind of asset package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// npm (package.json)
    Npm,
    /// Bower (bower.json)
    Bower,
}

impl AssetKind {
    /// Returns the string representation of the asset kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Npm => "npm",
            AssetKind::Bower => "bower",
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(AssetKind::Npm),
            "bower" => Ok(AssetKind::Bower),
            _ => Err(()),
        }
    }
}

/// Detect the asset kind from a manifest path
pub fn detect_asset_kind(path: &Path) -> Option<AssetKind> {
    match path.file_name()?.to_str()? {
        "package.json" => Some(AssetKind::Npm),
        "bower.json" | ".bower.json" => Some(AssetKind::Bower),
        _ => None,
    }
}
