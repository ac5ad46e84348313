/// Imperative handle on the media element driven by a playback session.
///
/// Events flow the other way: the presentation layer forwards the element's
/// ready/progress/error/dismiss callbacks to the session.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackSurface: Send {
    fn seek(&mut self, seconds: f64);
    fn present_fullscreen(&mut self);
    fn set_paused(&mut self, paused: bool);
}
