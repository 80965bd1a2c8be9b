//! npm semver to host constraint translation
//!
//! This module rewrites versions, ranges and VCS dependency pointers from
//! npm/bower manifests into the version syntax of the host package manager.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Location   │────▶│    Range    │────▶│ Normalizer  │
//! │ (detect)    │     │ (translate) │     │ (version)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Validator  │     │  Wildcard   │     │   Grammar   │
//! │(tag/branch) │     │  (bounds)   │     │   (host)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`location`]: VCS location detection and repository descriptors
//! - [`range`]: Range tokenizing and rewriting
//! - [`normalizer`]: Single version normalization
//! - [`wildcard`]: Numeric cores and wildcard resolution
//! - [`validator`]: Tag and branch predicates
//! - [`grammar`]: Host grammar trait and the Composer grammar
//! - [`converter`]: Version converter trait bundling the above
//! - [`error`]: Error types

pub mod converter;
pub mod error;
pub mod grammar;
pub mod location;
pub mod normalizer;
pub mod range;
pub mod validator;
pub mod wildcard;

pub use converter::{SemverConverter, VersionConverter};
pub use error::{ConvertError, GrammarError};
pub use grammar::{ComposerGrammar, HostGrammar};
pub use location::{DependencyRewrite, Detection, RepositoryDescriptor, detect};
pub use normalizer::{NormalizedVersion, normalize};
pub use range::{RangeExpression, translate_range};
pub use validator::{is_valid_branch, is_valid_tag};
