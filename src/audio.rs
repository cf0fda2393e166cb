//! Sound cue seam
//!
//! The simulation never plays audio itself. It reports [`SimEvent`]s and the
//! host forwards them to whatever implements [`AudioCues`].

use crate::sim::SimEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A gem reached the player
    GemCollect,
    /// Player hit the arena edge
    GameOver,
}

impl SimEvent {
    /// Cue to play for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            SimEvent::GemCollected { .. } => Some(SoundEffect::GemCollect),
            SimEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            SimEvent::Restarted => None,
        }
    }
}

/// Fire-and-forget audio sink
pub trait AudioCues {
    fn play_collect_sound(&mut self);
    fn play_game_over_sound(&mut self);

    fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::GemCollect => self.play_collect_sound(),
            SoundEffect::GameOver => self.play_game_over_sound(),
        }
    }
}

/// Play one cue per event that has a sound
pub fn play_cues(events: &[SimEvent], audio: &mut impl AudioCues) {
    for effect in events.iter().filter_map(SimEvent::sound) {
        audio.play(effect);
    }
}

/// Audio sink for headless runs: logs every cue
#[derive(Debug, Default)]
pub struct LoggingAudio {
    pub muted: bool,
    played: u32,
}

impl LoggingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played since creation (muted cues excluded)
    pub fn played(&self) -> u32 {
        self.played
    }

    fn cue(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::info!("sound: {:?}", effect);
    }
}

impl AudioCues for LoggingAudio {
    fn play_collect_sound(&mut self) {
        self.cue(SoundEffect::GemCollect);
    }

    fn play_game_over_sound(&mut self) {
        self.cue(SoundEffect::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundEffect>,
    }

    impl AudioCues for Recorder {
        fn play_collect_sound(&mut self) {
            self.cues.push(SoundEffect::GemCollect);
        }

        fn play_game_over_sound(&mut self) {
            self.cues.push(SoundEffect::GameOver);
        }
    }

    #[test]
    fn test_one_cue_per_event() {
        let events = [
            SimEvent::GemCollected { id: 3, total: 1 },
            SimEvent::Restarted,
            SimEvent::GemCollected { id: 9, total: 2 },
            SimEvent::GameOver { collected_gems: 2 },
        ];
        let mut rec = Recorder::default();
        play_cues(&events, &mut rec);
        assert_eq!(
            rec.cues,
            vec![SoundEffect::GemCollect, SoundEffect::GemCollect, SoundEffect::GameOver]
        );
    }

    #[test]
    fn test_logging_audio_mute() {
        let mut audio = LoggingAudio::new();
        audio.play(SoundEffect::GameOver);
        audio.muted = true;
        audio.play(SoundEffect::GemCollect);
        assert_eq!(audio.played(), 1);
    }
}
