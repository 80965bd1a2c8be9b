//! Version converter abstraction

use crate::semver::error::ConvertError;
use crate::semver::grammar::{ComposerGrammar, HostGrammar};
use crate::semver::normalizer::normalize;
use crate::semver::range::translate_range;

/// Trait for converting asset versions and ranges into host syntax
///
/// Each asset type owns a converter; the default methods run the npm
/// normalizer and range translator against the converter's grammar.
pub trait VersionConverter: Send + Sync {
    /// Grammar used to validate converted versions
    fn grammar(&self) -> &dyn HostGrammar;

    /// Convert one version: `1.2.3rc2` -> `1.2.3-RC2`
    fn convert_version(&self, version: &str) -> Result<String, ConvertError> {
        normalize(version, self.grammar()).map(|normalized| normalized.to_string())
    }

    /// Convert a range: `^1.2.3` -> `>=1.2.3,<2.0`
    fn convert_range(&self, range: &str) -> Result<String, ConvertError> {
        translate_range(range, self.grammar()).map(|expr| expr.to_string())
    }
}

/// npm semver converter
pub struct SemverConverter<G = ComposerGrammar> {
    grammar: G,
}

impl SemverConverter {
    pub fn new() -> Self {
        Self::with_grammar(ComposerGrammar::new())
    }
}

impl Default for SemverConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: HostGrammar> SemverConverter<G> {
    pub fn with_grammar(grammar: G) -> Self {
        Self { grammar }
    }
}

impl<G: HostGrammar> VersionConverter for SemverConverter<G> {
    fn grammar(&self) -> &dyn HostGrammar {
        &self.grammar
    }
}
