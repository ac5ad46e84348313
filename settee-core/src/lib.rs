//! Core library for settee.
//!
//! Provides the favorites store and the playback session used by the TV
//! client screens, along with the key-value persistence adapters they write
//! through and the layered configuration loader.
//!
//! Everything here is UI-agnostic: the playback surface and the storage
//! backend are ports ([`ports::PlaybackSurface`], [`ports::KeyValueStore`])
//! implemented by the embedding application.

#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod favorites;
pub mod persistence;
pub mod playback;
pub mod ports;

pub use error::{Result, SetteeError};
pub use favorites::{FavoritesStore, ToggleOutcome};
pub use persistence::{DiskStore, MemoryStore};
pub use playback::{
    EndReason, PlaybackOrigin, PlaybackSession, SessionState, SessionView,
};
pub use ports::{KeyValueStore, PlaybackSurface};

pub use settee_model as model;
