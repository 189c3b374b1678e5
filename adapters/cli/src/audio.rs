use last_stand_core::AudioCue;
use last_stand_simulation::AudioSink;
use log::trace;

/// Audio sink that reports cues to the log instead of playing them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        trace!("audio cue {cue:?}");
    }
}
