// src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod common_includes;
pub mod platform;
pub mod config;
pub mod error;

pub mod catalog;
pub mod scanner;
pub mod resolver;

pub mod packages;
pub mod report;

pub mod commands;

pub use catalog::{build_catalog, build_catalog_for, HeaderCatalog};
pub use config::{LocalDirectorySet, SearchConfig};
pub use error::{IndexError, ScanError};
pub use packages::PackageSystem;
pub use resolver::{resolve, Resolution, ResolvedInclude, Strategy};
pub use scanner::{detects_threading_headers, scan_project, ProjectSources, ShortIncludeSet};
