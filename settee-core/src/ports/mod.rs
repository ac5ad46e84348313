//! Narrow interfaces the core calls out through.

pub mod key_value;
pub mod playback_surface;

pub use key_value::KeyValueStore;
pub use playback_surface::PlaybackSurface;
#[cfg(test)]
pub use playback_surface::MockPlaybackSurface;
