//! Tapedeck Core
//!
//! Platform-agnostic catalog types and error handling for Tapedeck.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `SourceRef`
//! - **Catalog**: the immutable, ordered track list a player is built around
//! - **Error Handling**: `CoreError` and the crate `Result` alias
//!
//! # Example
//!
//! ```rust
//! use tapedeck_core::{Catalog, Track, TrackId};
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(TrackId::new(1), "basement", "Kai Angel", "Music/basement.mp3"),
//!     Track::new(TrackId::new(2), "mirrors", "Kai Angel", "Music/mirrors.mp3"),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get(1).unwrap().title, "mirrors");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{CoreError, Result};
pub use types::{SourceRef, Track, TrackId};
