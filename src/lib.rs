//! Translate npm and Bower package metadata into Composer's version syntax
//!
//! - [`semver`]: version, range and VCS dependency translation
//! - [`asset`]: npm and Bower asset types
//! - [`package`]: manifest reading and whole-package conversion
//! - [`config`]: configuration file and directories

pub mod asset;
pub mod config;
pub mod package;
pub mod semver;
