//! cartfile - Cartfile dependency declaration library
//!
//! This library provides the dependency identity model behind Carthage's
//! Cartfile:
//! - Parsing `github`, `git` and `binary` declaration lines
//! - Classifying Git URLs that point at GitHub
//! - Equality, ordering and rendering rules per dependency kind
//! - Stable `<name>-<sha256>` identifiers

pub mod cli;
pub mod domain;
pub mod error;
pub mod identity;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
