//! Host version grammar
//!
//! The translation layer produces strings in the host package manager's
//! syntax. The host decides what is a valid version; [`HostGrammar`] is the
//! seam through which it is asked. [`ComposerGrammar`] implements Composer's
//! rules:
//! - `1.2.3-rc.2` -> `1.2.3.0-RC2`
//! - `dev-feature` -> `dev-feature`
//! - `master`, `trunk`, `default` -> `9999999-dev`

#[cfg(test)]
use mockall::automock;
use regex::Regex;

use crate::semver::error::GrammarError;

/// Normalized form of the unbounded development branch
pub const DEV_BRANCH_SENTINEL: &str = "9999999-dev";

/// Number substituted for wildcard parts of numeric branch names
const BRANCH_WILDCARD: &str = "9999999";

/// Trait for the host package manager's version grammar
#[cfg_attr(test, automock)]
pub trait HostGrammar: Send + Sync {
    /// Normalize a version string, failing when the host cannot parse it
    fn normalize(&self, version: &str) -> Result<String, GrammarError>;

    /// Normalize a branch name into a dev version
    fn normalize_branch(&self, name: &str) -> Result<String, GrammarError>;
}

/// Composer's version grammar
pub struct ComposerGrammar {
    /// `master`, `trunk`, `default`, optionally `dev-` prefixed
    sentinel_re: Regex,
    /// `v1.2.3.4-beta.2-dev` and shorter forms
    classical_re: Regex,
    /// Numeric branch names such as `1.x` or `v2.3.*`
    numeric_branch_re: Regex,
}

impl ComposerGrammar {
    pub fn new() -> Self {
        Self {
            sentinel_re: Regex::new(r"(?i)^(?:dev-)?(?:master|trunk|default)$").unwrap(),
            classical_re: Regex::new(
                r"(?i)^v?(\d+)(\.\d+)?(\.\d+)?(\.\d+)?[._-]?(?:(stable|beta|b|rc|alpha|a|patch|pl|p)((?:[.-]?\d+)*))?([.-]?dev)?$",
            )
            .unwrap(),
            numeric_branch_re: Regex::new(
                r"(?i)^v?(\d+)(\.(?:\d+|[x*]))?(\.(?:\d+|[x*]))?(\.(?:\d+|[x*]))?$",
            )
            .unwrap(),
        }
    }

    fn expand_stability(stability: &str) -> String {
        match stability.to_ascii_lowercase().as_str() {
            "a" => "alpha".to_string(),
            "b" => "beta".to_string(),
            "p" | "pl" => "patch".to_string(),
            "rc" => "RC".to_string(),
            other => other.to_string(),
        }
    }
}

impl Default for ComposerGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl HostGrammar for ComposerGrammar {
    fn normalize(&self, version: &str) -> Result<String, GrammarError> {
        let version = version.trim();

        if self.sentinel_re.is_match(version) {
            return Ok(DEV_BRANCH_SENTINEL.to_string());
        }

        if let Some(branch) = version
            .get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("dev-"))
            .map(|_| &version[4..])
            && !branch.is_empty()
        {
            return Ok(format!("dev-{}", branch));
        }

        let Some(caps) = self.classical_re.captures(version) else {
            return Err(GrammarError::InvalidVersion(version.to_string()));
        };

        let mut normalized = caps[1].to_string();
        for index in 2..=4 {
            normalized.push_str(caps.get(index).map_or(".0", |m| m.as_str()));
        }

        if let Some(stability) = caps.get(5) {
            let stability = stability.as_str();
            if stability.eq_ignore_ascii_case("stable") && caps.get(7).is_none() {
                return Ok(normalized);
            }
            if !stability.eq_ignore_ascii_case("stable") {
                let number = caps
                    .get(6)
                    .map_or("", |m| m.as_str().trim_start_matches(['.', '-']));
                normalized.push('-');
                normalized.push_str(&Self::expand_stability(stability));
                normalized.push_str(number);
            }
        }

        if caps.get(7).is_some() {
            normalized.push_str("-dev");
        }

        Ok(normalized)
    }

    fn normalize_branch(&self, name: &str) -> Result<String, GrammarError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GrammarError::InvalidBranch(name.to_string()));
        }

        if matches!(name, "master" | "trunk" | "default") {
            return self.normalize(name);
        }

        if let Some(caps) = self.numeric_branch_re.captures(name) {
            let mut version = caps[1].to_string();
            for index in 2..=4 {
                let part = caps.get(index).map_or(".x", |m| m.as_str());
                version.push_str(&part.replace(['*', 'X'], "x"));
            }
            return Ok(format!("{}-dev", version.replace('x', BRANCH_WILDCARD)));
        }

        Ok(format!("dev-{}", name))
    }
}
