/// How the current run of playback was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOrigin {
    /// No resumable checkpoint; playback started straight away.
    Fresh,
    /// The user chose to continue from the checkpoint.
    Resumed,
    /// The user chose to start over despite a checkpoint.
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The source reached the end of the media.
    Completed,
    /// The fullscreen player was dismissed by the user.
    FullscreenDismissed,
    /// The owning screen went away.
    NavigatedAway,
}

/// Authoritative lifecycle state of a playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    /// Held paused and hidden until the user picks resume or restart.
    AwaitingResumeChoice { resume_at: f64 },
    Playing { origin: PlaybackOrigin },
    Paused { origin: PlaybackOrigin },
    Error { message: String },
    Ended { reason: EndReason },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Loading => "loading",
            SessionState::AwaitingResumeChoice { .. } => "awaiting resume choice",
            SessionState::Playing { .. } => "playing",
            SessionState::Paused { .. } => "paused",
            SessionState::Error { .. } => "in error",
            SessionState::Ended { .. } => "ended",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Ended { .. })
    }
}

/// Presentation flags derived from a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionView {
    pub show_spinner: bool,
    pub show_player: bool,
    pub show_resume_prompt: bool,
    pub show_error: bool,
    pub paused: bool,
    pub resume_at: Option<f64>,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Loading => SessionView {
                show_spinner: true,
                paused: true,
                ..Default::default()
            },
            SessionState::AwaitingResumeChoice { resume_at } => SessionView {
                show_resume_prompt: true,
                paused: true,
                resume_at: Some(*resume_at),
                ..Default::default()
            },
            SessionState::Playing { .. } => SessionView {
                show_player: true,
                ..Default::default()
            },
            SessionState::Paused { .. } => SessionView {
                show_player: true,
                paused: true,
                ..Default::default()
            },
            SessionState::Error { .. } => SessionView {
                show_error: true,
                paused: true,
                ..Default::default()
            },
            SessionState::Ended { .. } => SessionView {
                paused: true,
                ..Default::default()
            },
        }
    }
}
