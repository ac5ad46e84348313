//! Key-value persistence adapters.
//!
//! [`MemoryStore`] keeps everything in process and backs tests and
//! ephemeral sessions; [`DiskStore`] is a typed facade around `cacache`
//! for values that must survive restarts.

pub mod disk;
pub mod memory;

pub use disk::{DiskStore, StoreRoot};
pub use memory::MemoryStore;
