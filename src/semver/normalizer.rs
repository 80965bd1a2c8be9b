//! Single version normalization
//!
//! Rewrites one npm/bower version into the host's version syntax:
//! - `1.2.3alpha` -> `1.2.3-alpha1`
//! - `1.2.3rc.2` -> `1.2.3-RC.2`
//! - `1.2.3+build2012` -> `1.2.3-patch2012`
//! - `latest`, `` -> `*`

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::semver::error::ConvertError;
use crate::semver::grammar::HostGrammar;
use crate::semver::wildcard::{Bound, NumericCore};

/// Number appended to a stability tag that carries none
const DEFAULT_STABILITY_NUMBER: &str = "1";

static STABILITY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?[0-9]+").expect("stability number pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Alpha,
    Beta,
    Rc,
    Patch,
    Dev,
}

impl Stability {
    /// Map a raw tag (`a`, `pre`, `rc`, `build`, ...) to its stability
    ///
    /// Unknown tags, including the empty one, are patch releases.
    pub fn from_tag(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Stability::Alpha,
            "b" | "pre" | "beta" => Stability::Beta,
            "rc" => Stability::Rc,
            "dev" => Stability::Dev,
            _ => Stability::Patch,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::Rc => "RC",
            Stability::Patch => "patch",
            Stability::Dev => "dev",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityTag {
    pub stability: Stability,
    /// `2` or `.2`; always None for dev
    pub number: Option<String>,
}

impl fmt::Display for StabilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stability.as_str())?;
        if let Some(number) = &self.number {
            f.write_str(number)?;
        }
        Ok(())
    }
}

/// A version in host syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedVersion {
    /// Matches every version (`*`)
    Any,
    Version {
        /// Input started with `v` or `V`
        v_prefix: bool,
        core: NumericCore,
        tag: Option<StabilityTag>,
    },
}

impl NormalizedVersion {
    pub fn is_any(&self) -> bool {
        matches!(self, NormalizedVersion::Any)
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedVersion::Any => f.write_str("*"),
            NormalizedVersion::Version {
                v_prefix,
                core,
                tag,
            } => {
                if *v_prefix {
                    f.write_str("v")?;
                }
                write!(f, "{}", core)?;
                if let Some(tag) = tag {
                    write!(f, "-{}", tag)?;
                }
                Ok(())
            }
        }
    }
}

/// Normalize one version token, validating the result with `grammar`
pub fn normalize(raw: &str, grammar: &dyn HostGrammar) -> Result<NormalizedVersion, ConvertError> {
    let raw = raw.trim();

    let (v_prefix, body) = match raw.strip_prefix(['v', 'V']) {
        Some(rest) if !rest.starts_with(['v', 'V']) && !raw.chars().all(|c| c.is_alphabetic()) => {
            (true, rest)
        }
        _ => (false, raw),
    };

    let Some((core, rest)) = NumericCore::split_prefix(body) else {
        return Ok(NormalizedVersion::Any);
    };
    if core.is_full_wildcard() {
        return Ok(NormalizedVersion::Any);
    }

    let rest = rest
        .strip_prefix('-')
        .or_else(|| rest.strip_prefix('+'))
        .unwrap_or(rest);
    let tag = (!rest.is_empty()).then(|| stability_tag(rest));

    let normalized = NormalizedVersion::Version {
        v_prefix,
        core,
        tag,
    };
    validate(raw, &normalized, grammar)?;

    Ok(normalized)
}

/// Build the stability tag from the text following the numeric core
fn stability_tag(rest: &str) -> StabilityTag {
    let rest = rest.to_ascii_lowercase();
    let tag_end = rest
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(rest.len());
    let (raw_tag, tail) = rest.split_at(tag_end);

    let stability = Stability::from_tag(raw_tag);
    let number = match stability {
        Stability::Dev => None,
        _ => Some(
            STABILITY_NUMBER_RE
                .find(tail)
                .map_or(DEFAULT_STABILITY_NUMBER, |m| m.as_str())
                .to_string(),
        ),
    };

    StabilityTag { stability, number }
}

/// Check the composed version against the host grammar
///
/// Wildcard components are checked as `0`.
fn validate(
    raw: &str,
    normalized: &NormalizedVersion,
    grammar: &dyn HostGrammar,
) -> Result<(), ConvertError> {
    let candidate = match normalized {
        NormalizedVersion::Version {
            v_prefix,
            core,
            tag,
        } if core.has_wildcard() => NormalizedVersion::Version {
            v_prefix: *v_prefix,
            core: core.resolve(Bound::Lower),
            tag: tag.clone(),
        }
        .to_string(),
        other => other.to_string(),
    };

    grammar
        .normalize(&candidate)
        .map(|_| ())
        .map_err(|source| ConvertError::MalformedVersion {
            version: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semver::error::GrammarError;
    use crate::semver::grammar::{ComposerGrammar, MockHostGrammar};
    use rstest::rstest;

    fn normalize_str(raw: &str) -> String {
        normalize(raw, &ComposerGrammar::new()).unwrap().to_string()
    }

    #[rstest]
    #[case("1.2.3", "1.2.3")]
    #[case("1.2", "1.2")]
    #[case("1", "1")]
    #[case("1.2.3alpha", "1.2.3-alpha1")]
    #[case("1.2.3a1", "1.2.3-alpha1")]
    #[case("1.2.3-alpha.3", "1.2.3-alpha.3")]
    #[case("1.2.3beta1", "1.2.3-beta1")]
    #[case("1.2.3b2", "1.2.3-beta2")]
    #[case("1.2.3-pre", "1.2.3-beta1")]
    #[case("1.2.3rc2", "1.2.3-RC2")]
    #[case("1.2.3rc.2", "1.2.3-RC.2")]
    #[case("1.2.3-RC3", "1.2.3-RC3")]
    #[case("1.2.3+build2012", "1.2.3-patch2012")]
    #[case("1.2.3+build.2012", "1.2.3-patch.2012")]
    #[case("1.2.3-1", "1.2.3-patch1")]
    #[case("1.2.3dev", "1.2.3-dev")]
    #[case("1.2.3-dev.5", "1.2.3-dev")]
    #[case("1.2.x", "1.2.x")]
    fn normalize_converts_versions(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_str(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("latest")]
    #[case("*")]
    #[case("x.x")]
    #[case("v")]
    #[case("version")]
    fn normalize_falls_back_to_wildcard(#[case] raw: &str) {
        assert_eq!(
            normalize(raw, &ComposerGrammar::new()).unwrap(),
            NormalizedVersion::Any
        );
    }

    #[rstest]
    #[case("v1.2.3", "v1.2.3")]
    #[case("v1.2.3beta", "v1.2.3-beta1")]
    #[case("V1.2.3", "v1.2.3")]
    #[case("V1.2.3RC1", "v1.2.3-RC1")]
    #[case("vv1.2.3", "*")]
    #[case("Vv1.2.3", "*")]
    fn normalize_keeps_single_v_prefix_in_either_case(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_str(raw), expected);
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("1.2.3alpha")]
    #[case("1.2.3rc.2")]
    #[case("1.2.3+build2012")]
    #[case("1.2.3dev")]
    #[case("v2.0.0-b3")]
    #[case("latest")]
    fn normalize_is_idempotent(#[case] raw: &str) {
        let once = normalize_str(raw);
        assert_eq!(normalize_str(&once), once);
    }

    #[test]
    fn normalize_reports_grammar_rejection() {
        let mut grammar = MockHostGrammar::new();
        grammar
            .expect_normalize()
            .returning(|version| Err(GrammarError::InvalidVersion(version.to_string())));

        let result = normalize("1.2.3beta", &grammar);

        assert_eq!(
            result,
            Err(ConvertError::MalformedVersion {
                version: "1.2.3beta".to_string(),
                source: GrammarError::InvalidVersion("1.2.3-beta1".to_string()),
            })
        );
    }

    #[test]
    fn normalize_validates_wildcards_as_zero() {
        let mut grammar = MockHostGrammar::new();
        grammar
            .expect_normalize()
            .withf(|version| version == "1.2.0")
            .times(1)
            .returning(|version| Ok(version.to_string()));

        assert_eq!(normalize("1.2.x", &grammar).unwrap().to_string(), "1.2.x");
    }

    #[test]
    fn normalize_skips_grammar_for_wildcard_result() {
        let mut grammar = MockHostGrammar::new();
        grammar.expect_normalize().never();

        assert!(normalize("latest", &grammar).unwrap().is_any());
    }

    #[rstest]
    #[case("a", Stability::Alpha)]
    #[case("ALPHA", Stability::Alpha)]
    #[case("pre", Stability::Beta)]
    #[case("Rc", Stability::Rc)]
    #[case("dev", Stability::Dev)]
    #[case("build", Stability::Patch)]
    #[case("", Stability::Patch)]
    fn stability_from_tag_maps_aliases(#[case] raw: &str, #[case] expected: Stability) {
        assert_eq!(Stability::from_tag(raw), expected);
    }
}
