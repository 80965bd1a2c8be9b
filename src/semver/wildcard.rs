//! Numeric version cores and wildcard resolution
//!
//! A core is one to three dot separated components, each either digits or a
//! wildcard (`x`, `X`, `*`). Wildcards are resolved against the side of the
//! range they bound:
//! - lower bound: `1.2.x` -> `1.2.0`
//! - upper bound: `1.2.x` -> `1.2.9999999`

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Number substituted for wildcards on the upper side of a range
pub const UPPER_WILDCARD: &str = "9999999";

static CORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+|[xX*])(?:\.(?:[0-9]+|[xX*])){0,2}").expect("core pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Digits, kept as written (`010` stays `010`)
    Number(String),
    /// `x`, `X` or `*`
    Wildcard(char),
}

impl Component {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Component::Wildcard(_))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Number(digits) => f.write_str(digits),
            Component::Wildcard(c) => write!(f, "{}", c),
        }
    }
}

/// Which end of a range a value bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Ordered major/minor/patch components; trailing ones may be absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericCore {
    components: Vec<Component>,
}

impl NumericCore {
    /// Split the longest numeric core prefix off `input`
    ///
    /// Returns the core and the unparsed remainder, or None when `input`
    /// does not start with a core.
    pub fn split_prefix(input: &str) -> Option<(NumericCore, &str)> {
        let matched = CORE_RE.find(input)?;
        let rest = &input[matched.end()..];
        let ends_in_wildcard = matched.as_str().ends_with(['x', 'X', '*']);
        if ends_in_wildcard && rest.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            // `xml`, `1.xyz` are words, not wildcards
            return None;
        }

        let components = matched
            .as_str()
            .split('.')
            .map(|part| match part {
                "x" | "X" | "*" => Component::Wildcard(part.chars().next().unwrap_or('x')),
                digits => Component::Number(digits.to_string()),
            })
            .collect();

        Some((NumericCore { components }, rest))
    }

    /// Parse `input` as a core with nothing after it
    pub fn parse(input: &str) -> Option<NumericCore> {
        match Self::split_prefix(input)? {
            (core, "") => Some(core),
            _ => None,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn has_wildcard(&self) -> bool {
        self.components.iter().any(Component::is_wildcard)
    }

    /// True when every component is a wildcard (`*`, `x.x`)
    pub fn is_full_wildcard(&self) -> bool {
        self.components.iter().all(Component::is_wildcard)
    }

    /// Leading concrete numbers as written, up to the first wildcard
    pub fn concrete_prefix(&self) -> Vec<&str> {
        self.components
            .iter()
            .map_while(|component| match component {
                Component::Number(digits) => Some(digits.as_str()),
                Component::Wildcard(_) => None,
            })
            .collect()
    }

    /// Replace every wildcard with `0` (lower) or `9999999` (upper)
    pub fn resolve(&self, bound: Bound) -> NumericCore {
        let replacement = match bound {
            Bound::Lower => "0",
            Bound::Upper => UPPER_WILDCARD,
        };

        let components = self
            .components
            .iter()
            .map(|component| match component {
                Component::Wildcard(_) => Component::Number(replacement.to_string()),
                number => number.clone(),
            })
            .collect();

        NumericCore { components }
    }
}

/// Add one to a decimal digit string of any length: `199` -> `200`
pub fn increment_digits(digits: &str) -> String {
    let mut incremented: Vec<char> = digits.chars().collect();
    for digit in incremented.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return incremented.into_iter().collect();
        }
    }
    std::iter::once('1').chain(incremented).collect()
}

impl fmt::Display for NumericCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, component) in self.components.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}
