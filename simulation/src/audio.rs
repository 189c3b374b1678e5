//! Seam between the simulation and whatever plays sounds.

use last_stand_core::AudioCue;

/// Receives sound cues raised by the simulation.
pub trait AudioSink {
    /// Plays the cue. Implementations must not block.
    fn play(&mut self, cue: AudioCue);
}

/// Sink that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Sink that remembers every cue, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    cues: Vec<AudioCue>,
}

impl RecordingAudio {
    /// Cues received so far.
    #[must_use]
    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    fn play(&mut self, cue: AudioCue) {
        (**self).play(cue);
    }
}
