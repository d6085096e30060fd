//! Rentline command-line tools
//!
//! Thin front end over `rentline-engine`:
//! - `rentline resolve <path>`: full SEO resolution for a listing path
//! - `rentline canonical <path>`: canonical path, redirect decision and breadcrumbs
//! - `rentline filters <query>`: decode a filter query string

pub mod cli;
pub mod error;

pub use error::{CliError, Result};
