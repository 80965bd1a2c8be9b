//! Tag and branch validation
//!
//! Used to decide whether a VCS ref names a release or a branch. Both checks
//! return a plain bool; rejected names are logged at debug level.

use tracing::debug;

use crate::asset::AssetType;
use crate::semver::grammar::{DEV_BRANCH_SENTINEL, HostGrammar};

/// Branch names that can never be release tags
const RESERVED_BRANCHES: [&str; 3] = ["master", "trunk", "default"];

/// Convert `tag` into a host version if it is a release tag
pub fn tag_version(tag: &str, asset: &dyn AssetType) -> Option<String> {
    if RESERVED_BRANCHES.contains(&tag) {
        return None;
    }

    let converter = asset.version_converter();
    let version = converter
        .convert_version(tag)
        .inspect_err(|e| debug!("Invalid tag name '{}': {}", tag, e))
        .ok()?;

    converter
        .grammar()
        .normalize(&version)
        .inspect_err(|e| debug!("Invalid tag name '{}': {}", tag, e))
        .ok()
        .map(|_| version)
}

/// Check whether `tag` is a release tag for `asset`
pub fn is_valid_tag(tag: &str, asset: &dyn AssetType) -> bool {
    tag_version(tag, asset).is_some()
}

/// Check whether `name` is a usable branch name
///
/// Names that normalize to the unbounded dev branch (`master`, `trunk`,
/// `default`) are rejected.
pub fn is_valid_branch(name: &str, grammar: &dyn HostGrammar) -> bool {
    match grammar.normalize_branch(name) {
        Ok(normalized) => normalized != DEV_BRANCH_SENTINEL,
        Err(e) => {
            debug!("Invalid branch name '{}': {}", name, e);
            false
        }
    }
}
