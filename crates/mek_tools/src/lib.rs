//! # MekForge Development Tools
//!
//! Command-line tools for unit data:
//! - Validate directories of RON unit documents
//! - Export units to the JSON interchange format

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod export;
pub mod validate;
