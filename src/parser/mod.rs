//! Cartfile declaration parsing
//!
//! This module provides:
//! - A whitespace-skipping cursor with line tracking
//! - The `<keyword> "<payload>"` declaration grammar for `github`, `git` and `binary`

mod cursor;
mod declaration;

pub use cursor::Cursor;

use crate::domain::Dependency;
use crate::error::ParseError;
use std::path::Path;

/// Parses a single declaration string
pub fn parse_declaration(input: &str, base: Option<&Path>) -> Result<Dependency, ParseError> {
    Dependency::parse_with_base(&mut Cursor::new(input), base)
}
