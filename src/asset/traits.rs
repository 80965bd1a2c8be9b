//! Asset type trait definition

use crate::asset::types::AssetKind;
use crate::semver::VersionConverter;

/// Trait for asset package managers whose packages are converted
///
/// The asset type names the generated Composer vendor and VCS repository
/// type, and supplies the converter used for its versions.
pub trait AssetType: Send + Sync {
    /// Returns the kind of this asset type
    fn kind(&self) -> AssetKind;

    /// Short name, e.g. `npm`
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Composer vendor for converted packages, e.g. `npm-asset`
    fn composer_vendor(&self) -> String {
        format!("{}-asset", self.name())
    }

    /// Repository type registered for VCS dependencies, e.g. `npm-vcs`
    fn repository_type(&self) -> String {
        format!("{}-vcs", self.name())
    }

    /// Manifest file name, e.g. `package.json`
    fn manifest_file(&self) -> &'static str;

    /// Manifest keys copied into the converted package's `extra` section
    fn extra_key_mappings(&self) -> &'static [(&'static str, &'static str)];

    fn version_converter(&self) -> &dyn VersionConverter;
}
