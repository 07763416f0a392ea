//! Audio boundary
//!
//! The game only decides *which* effect plays and how loud. Actual output
//! goes through an [`AudioSink`], so headless runs and tests need no device.

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Swoop,
    /// Player died
    Die,
}

impl SoundEffect {
    /// Effect triggered by a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Swoop),
            GameEvent::Died { .. } => Some(SoundEffect::Die),
            GameEvent::ObstacleSpawned { .. } | GameEvent::Restarted { .. } => None,
        }
    }

    /// Asset name a device-backed sink would load
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Swoop => "swoop.wav",
            SoundEffect::Die => "die.wav",
        }
    }
}

/// Something that can output a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Logs each effect at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink {
    count: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects played so far
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.count += 1;
        log::debug!("sfx {} at volume {:.2}", effect.asset_name(), volume);
    }
}

/// Keeps every effect it is asked to play, for inspecting a run
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    played: Vec<(SoundEffect, f32)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects played so far, with their volumes
    pub fn played(&self) -> &[(SoundEffect, f32)] {
        &self.played
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from the audio settings
    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_sfx_volume(settings.sound_volume);
        self.set_muted(!settings.audio_enabled);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever sounds a batch of game events calls for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Swoop));
        let died = GameEvent::Died {
            score: 1.0,
            seed: 3,
            new_high_score: true,
        };
        assert_eq!(SoundEffect::for_event(&died), Some(SoundEffect::Die));
        assert_eq!(SoundEffect::for_event(&GameEvent::ObstacleSpawned { mid_y: 300.0 }), None);
    }

    #[test]
    fn test_volume_from_settings() {
        let settings = Settings {
            sound_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::from_settings(RecordingSink::new(), &settings);
        audio.play(SoundEffect::Swoop);
        assert_eq!(audio.sink().played(), &[(SoundEffect::Swoop, 0.5)]);
    }

    #[test]
    fn test_disabled_audio_is_silent() {
        let settings = Settings {
            audio_enabled: false,
            ..Settings::default()
        };
        let mut audio = AudioManager::from_settings(RecordingSink::new(), &settings);
        audio.handle_events(&[GameEvent::Jumped, GameEvent::Jumped]);
        assert!(audio.sink().played().is_empty());
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new(RecordingSink::new());
        audio.set_sfx_volume(-2.0);
        audio.play(SoundEffect::Die);
        assert!(audio.sink().played().is_empty());
    }

    #[test]
    fn test_handle_events_in_order() {
        let mut audio = AudioManager::new(RecordingSink::new());
        audio.handle_events(&[
            GameEvent::ObstacleSpawned { mid_y: 200.0 },
            GameEvent::Jumped,
            GameEvent::Died {
                score: 0.5,
                seed: 1,
                new_high_score: false,
            },
        ]);
        let played: Vec<SoundEffect> = audio.sink().played().iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::Swoop, SoundEffect::Die]);
    }

    #[test]
    fn test_log_sink_only_counts() {
        let mut audio = AudioManager::new(LogSink::new());
        for _ in 0..1000 {
            audio.handle_events(&[GameEvent::Jumped]);
        }
        assert_eq!(audio.sink().count(), 1000);
        assert_eq!(std::mem::size_of::<LogSink>(), std::mem::size_of::<u64>());
    }
}
