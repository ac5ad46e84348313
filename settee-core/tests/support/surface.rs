use std::sync::{Arc, Mutex};

use settee_core::PlaybackSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    Seek(f64),
    PresentFullscreen,
    SetPaused(bool),
}

/// Surface that records the commands a session issues.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Arc<Mutex<Vec<SurfaceCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                SurfaceCommand::Seek(seconds) => Some(seconds),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn record(&self, command: SurfaceCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

impl PlaybackSurface for RecordingSurface {
    fn seek(&mut self, seconds: f64) {
        self.record(SurfaceCommand::Seek(seconds));
    }

    fn present_fullscreen(&mut self) {
        self.record(SurfaceCommand::PresentFullscreen);
    }

    fn set_paused(&mut self, paused: bool) {
        self.record(SurfaceCommand::SetPaused(paused));
    }
}
