//! # Signals
//!
//! Animation triggers, sound clips and the sound manager that picks clips and
//! pitches for the host to play.

use crate::{AudioSettings, GameEvent};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Named animation triggers fired on units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationTrigger {
    PlayerChop,
    PlayerHit,
    EnemyAttack,
}

/// Every sound effect the game can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioClip {
    Move1,
    Move2,
    Eat1,
    Eat2,
    Drink1,
    Drink2,
    Chop1,
    Chop2,
    EnemyAttack1,
    EnemyAttack2,
    GameOver,
}

impl AudioClip {
    pub const MOVE: [AudioClip; 2] = [AudioClip::Move1, AudioClip::Move2];
    pub const EAT: [AudioClip; 2] = [AudioClip::Eat1, AudioClip::Eat2];
    pub const DRINK: [AudioClip; 2] = [AudioClip::Drink1, AudioClip::Drink2];
    pub const CHOP: [AudioClip; 2] = [AudioClip::Chop1, AudioClip::Chop2];
    pub const ENEMY_ATTACK: [AudioClip; 2] = [AudioClip::EnemyAttack1, AudioClip::EnemyAttack2];
}

/// Picks clips and pitches for sound effects.
///
/// Mirrors a single effects channel: `random_sfx` retunes the channel, and
/// `play_single` reuses whatever pitch the channel was last set to.
#[derive(Debug, Clone)]
pub struct SoundManager {
    low_pitch: f32,
    high_pitch: f32,
    effects_pitch: f32,
}

impl SoundManager {
    pub fn new(settings: &AudioSettings) -> Self {
        Self {
            low_pitch: settings.low_pitch_range,
            high_pitch: settings.high_pitch_range,
            effects_pitch: 1.0,
        }
    }

    /// Chooses one of `clips` uniformly and a pitch within the configured range.
    ///
    /// Returns `None` when no clips are given.
    pub fn random_sfx(&mut self, clips: &[AudioClip], rng: &mut StdRng) -> Option<GameEvent> {
        if clips.is_empty() {
            return None;
        }
        let clip = clips[rng.gen_range(0..clips.len())];
        self.effects_pitch = if self.low_pitch < self.high_pitch {
            rng.gen_range(self.low_pitch..self.high_pitch)
        } else {
            self.low_pitch
        };
        Some(GameEvent::Sound {
            clip,
            pitch: self.effects_pitch,
        })
    }

    /// Plays a clip at the current effects pitch.
    pub fn play_single(&self, clip: AudioClip) -> GameEvent {
        GameEvent::Sound {
            clip,
            pitch: self.effects_pitch,
        }
    }

    pub fn effects_pitch(&self) -> f32 {
        self.effects_pitch
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}
