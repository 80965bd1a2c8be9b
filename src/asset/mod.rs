//! Asset type layer
//! - traits.rs: AssetType trait definition
//! - types.rs: Common types (AssetKind)
//! - npm.rs: npm asset type
//! - bower.rs: Bower asset type

pub mod bower;
pub mod npm;
pub mod traits;
pub mod types;

pub use bower::BowerAssetType;
pub use npm::NpmAssetType;
pub use traits::AssetType;
pub use types::{AssetKind, detect_asset_kind};

/// Create the asset type for `kind`
pub fn asset_type(kind: AssetKind) -> Box<dyn AssetType> {
    match kind {
        AssetKind::Npm => Box::new(NpmAssetType::new()),
        AssetKind::Bower => Box::new(BowerAssetType::new()),
    }
}
