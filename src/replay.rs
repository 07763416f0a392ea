//! Replay tapes
//!
//! A run is fully determined by its seed, the viewport and the steps on
//! which the action button was consumed. A tape stores exactly that plus the
//! score the run ended with, so anyone can re-simulate it and check the
//! score line.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Viewport;
use crate::app::App;
use crate::audio::AudioSink;
use crate::consts::SIM_DT;
use crate::sim::{PlayState, Session, TickInput, tick};

/// Steps simulated past the last action before giving up on a death
const MAX_TRAILING_STEPS: u64 = 100_000;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run {0} has not finished")]
    RunNotFinished(u32),

    #[error("Score mismatch: tape says {expected:.2}, replay gave {actual:.2}")]
    ScoreMismatch { expected: f32, actual: f32 },

    #[error("Replay never died within {0} steps")]
    NeverDied(u64),
}

/// One recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u32,
    pub viewport: Viewport,
    /// Step indices (from the start of the run) that consumed an action
    pub actions: Vec<u64>,
    /// Survival time the run ended with
    pub score: f32,
}

impl Replay {
    /// Tape of a finished run of `app`
    pub fn record<S: AudioSink>(app: &App<S>, attempt: u32) -> Result<Self, ReplayError> {
        let result = app
            .results()
            .iter()
            .find(|result| result.attempt == attempt)
            .ok_or(ReplayError::RunNotFinished(attempt))?;

        Ok(Self {
            seed: result.seed,
            viewport: app.session.viewport,
            actions: app.actions_for(attempt),
            score: result.score,
        })
    }

    /// Re-simulate the tape. Returns the score the replay died with.
    pub fn simulate(&self) -> Result<f32, ReplayError> {
        let actions: BTreeSet<u64> = self.actions.iter().copied().collect();
        let last_action = actions.last().copied().unwrap_or(0);
        let limit = last_action + MAX_TRAILING_STEPS;

        let mut session = Session::with_seed(self.viewport, self.seed);
        while session.steps <= limit {
            let input = TickInput {
                action: actions.contains(&session.steps),
            };
            tick(&mut session, &input, SIM_DT);
            if session.phase == PlayState::Died {
                return Ok(session.elapsed);
            }
        }
        Err(ReplayError::NeverDied(limit))
    }

    /// Re-simulate and require the recorded score, bit for bit
    pub fn verify(&self) -> Result<f32, ReplayError> {
        let actual = self.simulate()?;
        if actual.to_bits() != self.score.to_bits() {
            return Err(ReplayError::ScoreMismatch {
                expected: self.score,
                actual,
            });
        }
        log::info!("Replay verified: seed={} time={:.2}", self.seed, actual);
        Ok(actual)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Replay saved to {}", path.display());
        Ok(())
    }
}
