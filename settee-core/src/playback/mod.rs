//! Playback session lifecycle and resume checkpoints.
//!
//! A [`PlaybackSession`] owns one playback attempt. Source signals and user
//! intents move it through [`SessionState`]; while it is `Playing` a
//! checkpoint timer periodically persists the latest reported position
//! under `videoProgress_<videoUrl>`.

mod checkpoint_timer;
pub mod session;
pub mod state;

pub use session::PlaybackSession;
pub use state::{EndReason, PlaybackOrigin, SessionState, SessionView};
