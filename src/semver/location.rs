//! VCS location dependencies
//!
//! A dependency version may point at a repository instead of a release:
//! - `git://host/repo.git#1.2.3` (tag)
//! - `git://host/repo.git#<40 hex chars>` (commit)
//! - `git@host:repo.git#develop` (branch)
//! - `https://host/repo.git` (default branch)
//!
//! Detection turns such a pointer into a host constraint plus the VCS
//! repository the host has to register to resolve it.

use serde::Serialize;
use tracing::debug;

use crate::asset::AssetType;
use crate::semver::error::ConvertError;
use crate::semver::validator::{is_valid_branch, tag_version};

/// Ref used when the location names no ref
const DEFAULT_REF: &str = "default";

/// Length of a full commit hash, hex digits in either case
const COMMIT_HASH_LEN: usize = 40;

/// Repository URL and ref extracted from a dependency version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSpecifier {
    pub url: String,
    pub reference: String,
}

impl LocationSpecifier {
    /// Split `url#ref`; None when `declared` is not a location
    pub fn parse(declared: &str) -> Option<Self> {
        if !declared.contains("://") && !declared.contains('@') {
            return None;
        }

        let (url, reference) = match declared.split_once('#') {
            Some((url, reference)) if !reference.is_empty() => (url, reference),
            Some((url, _)) => (url, DEFAULT_REF),
            None => (declared, DEFAULT_REF),
        };

        Some(Self {
            url: url.to_string(),
            reference: reference.to_string(),
        })
    }
}

/// VCS repository the host must register
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    #[serde(rename = "type")]
    pub repository_type: String,
    pub url: String,
}

/// Dependency entry replacing the declared one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRewrite {
    pub name: String,
    pub constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    #[serde(flatten)]
    pub rewrite: DependencyRewrite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryDescriptor>,
}

/// Convert one declared dependency
///
/// Plain ranges go through the range translator. Locations are turned into
/// a commit, tag, range or branch constraint and yield one repository.
pub fn detect(
    asset: &dyn AssetType,
    name: &str,
    declared: &str,
) -> Result<Detection, ConvertError> {
    let Some(location) = LocationSpecifier::parse(declared) else {
        let constraint = asset.version_converter().convert_range(declared)?;
        return Ok(Detection {
            rewrite: DependencyRewrite {
                name: name.to_string(),
                constraint,
            },
            repository: None,
        });
    };

    debug!(
        "Dependency '{}' points at {} (ref '{}')",
        name, location.url, location.reference
    );

    let is_commit = is_commit_hash(&location.reference);
    let constraint = if is_commit {
        format!("dev-default#{}", location.reference)
    } else {
        ref_constraint(asset, &location.reference)?
    };

    let rewrite = match constraint.split_once('#') {
        Some((alias, aliased)) if !is_commit => DependencyRewrite {
            name: format!("{}-{}", name, alias),
            constraint: aliased.to_string(),
        },
        _ => DependencyRewrite {
            name: name.to_string(),
            constraint,
        },
    };

    Ok(Detection {
        rewrite,
        repository: Some(RepositoryDescriptor {
            repository_type: asset.repository_type(),
            url: location.url,
        }),
    })
}

fn is_commit_hash(reference: &str) -> bool {
    reference.len() == COMMIT_HASH_LEN
        && reference.chars().all(|c| c.is_ascii_hexdigit())
}

/// `~1.2`, `>=1.0 <2.0`, `*`
fn is_range(reference: &str) -> bool {
    reference == "*" || reference.contains(['<', '>', '=', '^', '~', ' '])
}

/// Constraint for a non-commit ref: range, then tag, then branch
///
/// Range characters are not allowed in git tag names, so ranges are checked
/// first to keep `1.0 || 2.0` from parsing as a patch release.
fn ref_constraint(asset: &dyn AssetType, reference: &str) -> Result<String, ConvertError> {
    if is_range(reference) {
        return asset.version_converter().convert_range(reference);
    }

    if let Some(version) = tag_version(reference, asset) {
        return Ok(version);
    }

    let mut constraint = format!("dev-{}", reference);
    if !is_valid_branch(reference, asset.version_converter().grammar()) {
        constraint.push_str(" || ");
        constraint.push_str(reference);
    }

    Ok(constraint)
}
