//! Read-only object mapping over Ant Movie Catalog XML documents.
//!
//! Load a catalog with [`Catalog::open_file`] (or construct an empty
//! [`Catalog`] and call [`Catalog::load`]), then query full movie records,
//! lite listings, or catalog metadata.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod document;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod metadata;
pub mod source;
pub mod types;

pub use catalog::{Catalog, CatalogState};
pub use error::{CatalogError, Result};
pub use source::{CatalogSource, FileSource, MemorySource};
pub use types::{AttributeMap, CatalogInfo, CatalogObject, Movie, MovieLite, Owner};
