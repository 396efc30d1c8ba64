pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::{catalog_file::FileCatalogSource, ServerConfig};
pub use crate::core::{catalog::Catalog, pipeline::RequestPipeline, signature::SignatureVerifier};
pub use utils::error::{ResponderError, Result};
