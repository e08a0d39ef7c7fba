//! Shared podcast catalog model, remote client and client-side stores.
//!
//! Everything here is front-end agnostic: the terminal UI in `podcast-tui`
//! owns one instance of each store and feeds them user input.

pub mod api;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod favourites;
pub mod fetch;
pub mod genres;
pub mod layout;
pub mod model;
pub mod navigation;
pub mod platform;
pub mod playback;
pub mod storage;
pub mod theme;

pub use error::{CatalogError, Result, StorageError};
