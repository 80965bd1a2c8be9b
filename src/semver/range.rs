//! npm range translation
//!
//! Rewrites an npm range into the host's range syntax, where `,` joins
//! constraints that must all hold and `|` joins alternatives:
//! - `~1.2.3` -> `>=1.2.3,<1.3`
//! - `^1.2.3` -> `>=1.2.3,<2.0`
//! - `1.2.3 - 2.3.4` -> `>=1.2.3,<=2.3.4`
//! - `>=1.0 <1.1 || >=1.2` -> `>=1.0,<1.1|>=1.2`
//! - `<=0.10.x` -> `<=0.10.9999999`
//!
//! Caret ranges always bump the major version, `^0.2.3` included.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::semver::error::ConvertError;
use crate::semver::grammar::HostGrammar;
use crate::semver::normalizer::{NormalizedVersion, normalize};
use crate::semver::wildcard::{Bound, NumericCore, increment_digits};

const OPERATOR_CHARS: [char; 5] = ['<', '>', '=', '~', '^'];

/// Whitespace between an operator and its version
static OPERATOR_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([<>=~^])\s+").expect("operator pattern is valid"));

/// `v` directly in front of a version number
static VERSION_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\s<>=~^,|])[vV]([0-9])").expect("version prefix pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Eq => "=",
        }
    }
}

/// Side of the range bounded by a value with the given comparator
pub fn bound_for(comparator: Option<Comparator>) -> Bound {
    match comparator {
        Some(Comparator::Lt | Comparator::Le) => Bound::Upper,
        _ => Bound::Lower,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTerm {
    pub comparator: Option<Comparator>,
    pub version: NormalizedVersion,
}

impl RangeTerm {
    fn any() -> Self {
        Self {
            comparator: None,
            version: NormalizedVersion::Any,
        }
    }
}

impl fmt::Display for RangeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comparator) = self.comparator {
            f.write_str(comparator.as_str())?;
        }
        write!(f, "{}", self.version)
    }
}

/// Terms that must all hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeGroup {
    pub terms: Vec<RangeTerm>,
}

impl fmt::Display for RangeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// Alternative groups, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpression {
    pub groups: Vec<RangeGroup>,
}

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Compare(Comparator),
    Tilde,
    Caret,
}

/// Translate an npm range expression into the host's range syntax
pub fn translate_range(
    raw: &str,
    grammar: &dyn HostGrammar,
) -> Result<RangeExpression, ConvertError> {
    let cleaned = clean_range(raw);
    let translator = RangeTranslator { raw, grammar };

    let groups = cleaned
        .split("||")
        .map(|group| translator.translate_group(group))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RangeExpression { groups })
}

/// Collapse operator spacing, `&&` and `v` prefixes before tokenizing
fn clean_range(raw: &str) -> String {
    let cleaned = raw.trim().replace("&&", ",");
    let cleaned = OPERATOR_SPACE_RE.replace_all(&cleaned, "$1");
    VERSION_PREFIX_RE
        .replace_all(&cleaned, "${1}${2}")
        .into_owned()
}

/// Split `>=1.0<2.0` into `>=1.0` and `<2.0`
fn split_adjacent(token: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut previous_is_operator = true;

    for (index, c) in token.char_indices() {
        let is_operator = OPERATOR_CHARS.contains(&c);
        if is_operator && !previous_is_operator {
            pieces.push(&token[start..index]);
            start = index;
        }
        previous_is_operator = is_operator;
    }
    pieces.push(&token[start..]);

    pieces
}

fn split_operator(piece: &str) -> (Option<Operator>, &str) {
    const OPERATORS: [(&str, Operator); 7] = [
        (">=", Operator::Compare(Comparator::Ge)),
        ("<=", Operator::Compare(Comparator::Le)),
        (">", Operator::Compare(Comparator::Gt)),
        ("<", Operator::Compare(Comparator::Lt)),
        ("=", Operator::Compare(Comparator::Eq)),
        ("~", Operator::Tilde),
        ("^", Operator::Caret),
    ];

    OPERATORS
        .iter()
        .find_map(|(symbol, operator)| {
            piece
                .strip_prefix(symbol)
                .map(|value| (Some(*operator), value))
        })
        .unwrap_or((None, piece))
}

/// Replace wildcards of the leading core according to `bound`
fn resolve_wildcards(value: &str, bound: Bound) -> String {
    match NumericCore::split_prefix(value) {
        Some((core, rest)) if core.has_wildcard() && !core.is_full_wildcard() => {
            format!("{}{}", core.resolve(bound), rest)
        }
        _ => value.to_string(),
    }
}

struct RangeTranslator<'a> {
    raw: &'a str,
    grammar: &'a dyn HostGrammar,
}

impl RangeTranslator<'_> {
    fn malformed(&self, reason: impl Into<String>) -> ConvertError {
        ConvertError::malformed_range(self.raw, reason)
    }

    fn translate_group(&self, group: &str) -> Result<RangeGroup, ConvertError> {
        let group = group.replace(',', " ");
        let tokens: Vec<&str> = group.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(RangeGroup {
                terms: vec![RangeTerm::any()],
            });
        }

        let mut terms = Vec::new();
        let mut index = 0;
        while index < tokens.len() {
            let token = tokens[index];
            if token == "-" {
                return Err(self.malformed("hyphen range without lower bound"));
            }

            if tokens.get(index + 1) == Some(&"-") {
                let upper = tokens
                    .get(index + 2)
                    .ok_or_else(|| self.malformed("hyphen range without upper bound"))?;
                terms.extend(self.hyphen(token, upper)?);
                index += 3;
                continue;
            }

            for piece in split_adjacent(token) {
                terms.extend(self.term(piece)?);
            }
            index += 1;
        }

        Ok(RangeGroup { terms })
    }

    fn term(&self, piece: &str) -> Result<Vec<RangeTerm>, ConvertError> {
        let (operator, value) = split_operator(piece);
        if value.is_empty() {
            return Err(self.malformed(format!("operator '{}' has no version", piece)));
        }
        if value.starts_with(OPERATOR_CHARS) {
            return Err(self.malformed(format!("unexpected operator in '{}'", piece)));
        }

        match operator {
            None => Ok(vec![self.compare(None, value)?]),
            Some(Operator::Compare(comparator)) => Ok(vec![self.compare(Some(comparator), value)?]),
            Some(Operator::Tilde) => self.bump(value, |prefix| match prefix {
                [major] => Some(format!("{}.1", major)),
                [major, minor, ..] => Some(format!("{}.{}", major, increment_digits(minor))),
                [] => None,
            }),
            Some(Operator::Caret) => self.bump(value, |prefix| {
                prefix
                    .first()
                    .map(|major| format!("{}.0", increment_digits(major)))
            }),
        }
    }

    fn compare(
        &self,
        comparator: Option<Comparator>,
        value: &str,
    ) -> Result<RangeTerm, ConvertError> {
        let resolved = resolve_wildcards(value, bound_for(comparator));
        let version = normalize(&resolved, self.grammar)?;
        let comparator = if version.is_any() { None } else { comparator };

        Ok(RangeTerm {
            comparator,
            version,
        })
    }

    /// Expand `~`/`^` into `>=value,<upper`, `upper` computed from the
    /// concrete leading numbers of `value`
    fn bump(
        &self,
        value: &str,
        upper: impl Fn(&[&str]) -> Option<String>,
    ) -> Result<Vec<RangeTerm>, ConvertError> {
        let lower = self.compare(Some(Comparator::Ge), value)?;
        if lower.version.is_any() {
            return Ok(vec![lower]);
        }

        let core = NumericCore::split_prefix(value).map(|(core, _)| core);
        let prefix = core
            .as_ref()
            .map(|core| core.concrete_prefix())
            .unwrap_or_default();
        let Some(upper) = upper(&prefix) else {
            return Ok(vec![lower]);
        };

        Ok(vec![lower, self.compare(Some(Comparator::Lt), &upper)?])
    }

    /// `A - B`, inclusive on both ends
    ///
    /// A wildcard upper end becomes exclusive at the next value of its last
    /// concrete number: `1.0 - 2.x` -> `>=1.0,<3.0`.
    fn hyphen(&self, lower: &str, upper: &str) -> Result<Vec<RangeTerm>, ConvertError> {
        for side in [lower, upper] {
            if side.starts_with(OPERATOR_CHARS) {
                return Err(self.malformed(format!("unexpected operator in '{}'", side)));
            }
        }

        let mut terms = Vec::new();

        let lower = self.compare(Some(Comparator::Ge), lower)?;
        if !lower.version.is_any() {
            terms.push(lower);
        }

        match NumericCore::split_prefix(upper) {
            Some((core, _)) if core.has_wildcard() => {
                let prefix = core.concrete_prefix();
                if let Some((last, leading)) = prefix.split_last() {
                    let mut parts: Vec<String> =
                        leading.iter().map(|part| part.to_string()).collect();
                    parts.push(increment_digits(last));
                    parts.resize(core.components().len(), "0".to_string());
                    terms.push(self.compare(Some(Comparator::Lt), &parts.join("."))?);
                }
            }
            _ => {
                let upper = self.compare(Some(Comparator::Le), upper)?;
                if !upper.version.is_any() {
                    terms.push(upper);
                }
            }
        }

        if terms.is_empty() {
            terms.push(RangeTerm::any());
        }

        Ok(terms)
    }
}
