use std::{fmt, sync::Arc};

use settee_model::{PlaybackCheckpoint, PlaybackTarget};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{
    checkpoint_timer::{CheckpointTimer, write_checkpoint},
    state::{EndReason, PlaybackOrigin, SessionState, SessionView},
};
use crate::{
    config::PlaybackConfig,
    error::{Result, SetteeError},
    ports::{KeyValueStore, PlaybackSurface},
};

/// One playback attempt for one video.
///
/// The session is driven from a single event loop: source signals
/// (`on_*`) and user intents arrive as `&mut self` calls, and every
/// persistence read completes before the dependent transition is taken.
pub struct PlaybackSession<P: PlaybackSurface> {
    target: PlaybackTarget,
    store: Arc<dyn KeyValueStore>,
    surface: P,
    config: PlaybackConfig,
    state: SessionState,
    /// Checkpoint read when the session was opened (or retried).
    resume_candidate: Option<f64>,
    position: watch::Sender<f64>,
    /// Set once playback ran in the current run; gates the final flush.
    has_played: bool,
    timer: Option<CheckpointTimer>,
}

impl<P: PlaybackSurface> PlaybackSession<P> {
    /// Read the stored checkpoint and return a session in `Loading`.
    pub async fn open(
        target: PlaybackTarget,
        store: Arc<dyn KeyValueStore>,
        surface: P,
        config: PlaybackConfig,
    ) -> Self {
        let resume_candidate = read_checkpoint(store.as_ref(), &target.video_url).await;
        debug!(
            video_id = %target.video_id,
            ?resume_candidate,
            "playback session opened"
        );

        let (position, _) = watch::channel(0.0);
        Self {
            target,
            store,
            surface,
            config,
            state: SessionState::Loading,
            resume_candidate,
            position,
            has_played: false,
            timer: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> SessionView {
        SessionView::from(&self.state)
    }

    pub fn target(&self) -> &PlaybackTarget {
        &self.target
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Latest position reported by the source while playing.
    pub fn position(&self) -> f64 {
        *self.position.borrow()
    }

    pub fn resume_candidate(&self) -> Option<f64> {
        self.resume_candidate
    }

    pub fn is_checkpointing(&self) -> bool {
        self.timer.is_some()
    }

    /// The playback source failure that put the session in `Error`.
    pub fn failure(&self) -> Option<SetteeError> {
        match &self.state {
            SessionState::Error { message } => {
                Some(SetteeError::PlaybackSource(message.clone()))
            }
            _ => None,
        }
    }

    /// The source buffered enough to show the first frame.
    pub async fn on_ready(&mut self, duration_seconds: Option<f64>) {
        if self.state != SessionState::Loading {
            debug!(state = self.state.name(), "ignoring ready signal");
            return;
        }
        if let Some(duration) = duration_seconds {
            self.target = self.target.clone().with_duration(duration);
        }

        match self.resumable_position() {
            Some(resume_at) => {
                self.surface.set_paused(true);
                self.transition(SessionState::AwaitingResumeChoice { resume_at });
            }
            None => {
                self.surface.present_fullscreen();
                self.surface.set_paused(false);
                self.enter_playing(PlaybackOrigin::Fresh, 0.0);
            }
        }
    }

    /// Continue from the stored checkpoint.
    pub async fn resume(&mut self) -> Result<()> {
        let SessionState::AwaitingResumeChoice { resume_at } = self.state else {
            return Err(self.invalid("resume"));
        };
        self.surface.seek(resume_at);
        self.surface.present_fullscreen();
        self.surface.set_paused(false);
        self.enter_playing(PlaybackOrigin::Resumed, resume_at);
        Ok(())
    }

    /// Ignore the stored checkpoint and play from the start.
    pub async fn restart(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::AwaitingResumeChoice { .. }) {
            return Err(self.invalid("restart"));
        }
        self.surface.seek(0.0);
        self.surface.present_fullscreen();
        self.surface.set_paused(false);
        self.enter_playing(PlaybackOrigin::Restarted, 0.0);
        Ok(())
    }

    pub async fn play_pause(&mut self) -> Result<()> {
        match self.state {
            SessionState::Playing { origin } => {
                self.disarm_timer().await;
                self.surface.set_paused(true);
                self.transition(SessionState::Paused { origin });
                Ok(())
            }
            SessionState::Paused { origin } => {
                self.surface.set_paused(false);
                let position = self.position();
                self.enter_playing(origin, position);
                Ok(())
            }
            _ => Err(self.invalid("play/pause")),
        }
    }

    /// Cache a position update. Only honoured while playing.
    pub fn on_progress(&mut self, seconds: f64) {
        if !self.state.is_playing() {
            debug!(state = self.state.name(), "ignoring progress report");
            return;
        }
        if !seconds.is_finite() || seconds < 0.0 {
            warn!(seconds, "ignoring invalid progress report");
            return;
        }
        self.position.send_replace(seconds);
    }

    /// The source failed to decode or fetch the media.
    pub async fn on_error(&mut self, message: impl Into<String>) {
        if self.state.is_terminal() {
            debug!("ignoring source error after the session ended");
            return;
        }
        let message = message.into();
        error!(
            video_id = %self.target.video_id,
            error = %message,
            "playback source error"
        );
        self.disarm_timer().await;
        self.surface.set_paused(true);
        self.transition(SessionState::Error { message });
    }

    /// Reload the same source after an error.
    ///
    /// The checkpoint is read again so progress flushed before the failure
    /// can still be offered for resume.
    pub async fn retry(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Error { .. }) {
            return Err(self.invalid("retry"));
        }
        self.resume_candidate =
            read_checkpoint(self.store.as_ref(), &self.target.video_url).await;
        // A new run: the failed run's position must not reach the final flush.
        self.has_played = false;
        self.position.send_replace(0.0);
        self.transition(SessionState::Loading);
        Ok(())
    }

    /// The media played to the end.
    pub async fn on_end(&mut self) {
        self.finish(EndReason::Completed).await;
    }

    /// The fullscreen player is about to be dismissed.
    pub async fn on_fullscreen_will_dismiss(&mut self) {
        self.finish(EndReason::FullscreenDismissed).await;
    }

    /// The owning screen is going away.
    pub async fn close(&mut self) {
        self.finish(EndReason::NavigatedAway).await;
    }

    async fn finish(&mut self, reason: EndReason) {
        if self.state.is_terminal() {
            debug!(?reason, "session already ended");
            return;
        }
        self.disarm_timer().await;
        if self.has_played {
            let checkpoint = PlaybackCheckpoint::new(
                self.target.video_url.as_str(),
                self.position(),
            );
            write_checkpoint(self.store.as_ref(), &checkpoint).await;
        }
        info!(
            video_id = %self.target.video_id,
            ?reason,
            position = self.position(),
            "playback session ended"
        );
        self.transition(SessionState::Ended { reason });
    }

    fn resumable_position(&self) -> Option<f64> {
        let position = self.resume_candidate?;
        let checkpoint =
            PlaybackCheckpoint::new(self.target.video_url.as_str(), position);
        checkpoint
            .is_resumable(
                self.target.duration_seconds,
                self.config.resume_completion_ratio,
            )
            .then_some(position)
    }

    fn enter_playing(&mut self, origin: PlaybackOrigin, position: f64) {
        self.position.send_replace(position);
        self.has_played = true;
        if self.timer.is_none() {
            self.timer = Some(CheckpointTimer::arm(
                Arc::clone(&self.store),
                self.target.video_url.clone(),
                self.position.subscribe(),
                self.config.checkpoint_interval,
            ));
        }
        self.transition(SessionState::Playing { origin });
    }

    async fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.disarm().await;
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            video_id = %self.target.video_id,
            from = self.state.name(),
            to = next.name(),
            "session transition"
        );
        self.state = next;
    }

    fn invalid(&self, intent: &'static str) -> SetteeError {
        SetteeError::InvalidTransition {
            state: self.state.name(),
            intent,
        }
    }
}

impl<P: PlaybackSurface> fmt::Debug for PlaybackSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("target", &self.target)
            .field("state", &self.state)
            .field("position", &self.position())
            .field("resume_candidate", &self.resume_candidate)
            .field("timer", &self.timer)
            .finish()
    }
}

/// Read the stored position for `video_url`. Any fault reads as "none".
async fn read_checkpoint(store: &dyn KeyValueStore, video_url: &str) -> Option<f64> {
    let key = PlaybackCheckpoint::storage_key_for(video_url);
    match store.get(&key).await {
        Ok(Some(raw)) => match PlaybackCheckpoint::parse_position(&raw) {
            Ok(position) => Some(position),
            Err(err) => {
                warn!(key = %key, error = %err, "ignoring unreadable checkpoint");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(key = %key, error = %err, "failed to read checkpoint");
            None
        }
    }
}
