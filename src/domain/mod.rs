//! Core domain models for cartfile
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency declarations (GitHub, Git, binary)
//! - GitHub servers and repositories
//! - Git remote URLs with normalized comparison
//! - Binary specification URLs

mod binary_url;
mod classifier;
mod dependency;
mod git_url;
mod repository;
mod server;

pub use binary_url::BinaryUrl;
pub use classifier::GITHUB_HOST_IDENTIFIER;
pub use dependency::{dedupe, sort_by_name, Dependency, CHECKOUTS_PATH};
pub use git_url::GitUrl;
pub use repository::Repository;
pub use server::Server;
