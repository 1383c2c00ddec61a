//! Aria Player Core
//!
//! Data contract shared by the Aria player crates.
//!
//! The player never produces catalog data itself: tracks and groups are
//! generated offline and handed to the player as an immutable list. This
//! crate defines the Rust shape of that list and the lookups the UI needs
//! on top of it.
//!
//! # Example
//!
//! ```rust
//! use aria_core::Catalog;
//!
//! let json = r#"{
//!     "groups": [{ "id": "g1", "name": "Favourites" }],
//!     "songs": [
//!         { "id": "0", "title": "Intro", "artist": "A", "album": "X",
//!           "url": "/audio/intro.flac", "duration": 93, "groupId": "g1" },
//!         { "id": "1", "title": "Loose", "artist": "B", "album": "Y",
//!           "url": "/audio/loose.flac", "duration": 201 }
//!     ]
//! }"#;
//!
//! let catalog = Catalog::from_json_str(json).unwrap();
//! assert_eq!(catalog.group_songs("g1").len(), 1);
//! assert_eq!(catalog.ungrouped_songs().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{AriaError, Result};
pub use types::{Catalog, CatalogSection, Group, Track, TrackId};
