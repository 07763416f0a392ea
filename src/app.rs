//! Application context and the fixed-timestep game loop
//!
//! [`App`] owns everything a running game needs (settings, session, audio,
//! the step accumulator). [`GameLoop`] wires it to a clock, an input source
//! and a renderer, and runs one frame at a time:
//!
//! 1. Measure the frame and poll host events
//! 2. Bank the frame time and run every whole step it pays for
//! 3. Forward the steps' events to audio and the run log
//! 4. Render a frame blended between the last two physics states

use crate::audio::{AudioManager, AudioSink};
use crate::consts::SIM_HZ;
use crate::platform::{Clock, Platform, PlatformEvent};
use crate::renderer::{RenderFrame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, Session, TickInput, tick};
use crate::timestep::FixedTimestep;

/// An action the simulation consumed, by run and step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRecord {
    pub attempt: u32,
    pub step: u64,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    pub attempt: u32,
    pub seed: u32,
    /// Survival time in seconds
    pub score: f32,
    pub new_high_score: bool,
}

/// Game context: one per process
pub struct App<S: AudioSink> {
    pub settings: Settings,
    pub session: Session,
    pub audio: AudioManager<S>,
    pub timestep: FixedTimestep,
    /// Action waiting for the next step
    pending_action: bool,
    actions: Vec<ActionRecord>,
    results: Vec<RunResult>,
    run_seeds: Vec<(u32, u32)>,
}

impl<S: AudioSink> App<S> {
    /// Build the context from settings. `seed` pins every run.
    pub fn new(settings: Settings, sink: S, seed: Option<u32>) -> Self {
        let session = Session::new(settings.viewport(), seed);
        let audio = AudioManager::from_settings(sink, &settings);
        let run_seeds = vec![(session.attempt, session.seed())];
        Self {
            settings,
            session,
            audio,
            timestep: FixedTimestep::default(),
            pending_action: false,
            actions: Vec::new(),
            results: Vec::new(),
            run_seeds,
        }
    }

    /// Queue the one-shot action for the next step
    pub fn press_action(&mut self) {
        self.pending_action = true;
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending_action
    }

    /// Bank `frame_time` and run every whole step it pays for.
    /// Returns the number of steps run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.timestep.accumulate(frame_time);

        let mut steps = 0;
        while self.timestep.consume() {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Run exactly one simulation step, consuming any pending action
    pub fn step(&mut self) {
        let input = TickInput {
            action: std::mem::take(&mut self.pending_action),
        };
        if input.action {
            self.actions.push(ActionRecord {
                attempt: self.session.attempt,
                step: self.session.steps,
            });
        }

        tick(&mut self.session, &input, self.timestep.step());

        let events = self.session.drain_events();
        self.audio.handle_events(&events);
        for event in &events {
            self.record_event(event);
        }
    }

    fn record_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Died {
                score,
                seed,
                new_high_score,
            } => {
                self.results.push(RunResult {
                    attempt: self.session.attempt,
                    seed,
                    score,
                    new_high_score,
                });
            }
            GameEvent::Restarted { seed, attempt } => {
                self.run_seeds.push((attempt, seed));
            }
            GameEvent::Jumped | GameEvent::ObstacleSpawned { .. } => {}
        }
    }

    /// Render snapshot at the current blend
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::build(&self.session, self.timestep.blend())
    }

    /// Finished runs, oldest first
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Every consumed action, oldest first
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Step indices of the actions consumed during run `attempt`
    pub fn actions_for(&self, attempt: u32) -> Vec<u64> {
        self.actions
            .iter()
            .filter(|record| record.attempt == attempt)
            .map(|record| record.step)
            .collect()
    }

    /// Seed each run started with
    pub fn seed_of(&self, attempt: u32) -> Option<u32> {
        self.run_seeds
            .iter()
            .find(|(a, _)| *a == attempt)
            .map(|(_, seed)| *seed)
    }
}

/// Drives an [`App`] from a clock, an input source and a renderer
pub struct GameLoop<S: AudioSink, P: Platform, C: Clock, R: Renderer> {
    pub app: App<S>,
    platform: P,
    clock: C,
    renderer: R,
    frames: u64,
    /// Sleep off the rest of each frame when nothing else paces it
    pace_frames: bool,
}

impl<S: AudioSink, P: Platform, C: Clock, R: Renderer> GameLoop<S, P, C, R> {
    pub fn new(app: App<S>, platform: P, clock: C, renderer: R) -> Self {
        Self {
            app,
            platform,
            clock,
            renderer,
            frames: 0,
            pace_frames: false,
        }
    }

    /// Enable frame pacing for realtime runs
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace_frames = pace;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Stop driving and hand back the context
    pub fn into_app(self) -> App<S> {
        self.app
    }

    /// Run one frame. Returns false once the platform asked to quit.
    pub fn frame(&mut self) -> bool {
        let frame_time = self.clock.frame_time();

        let mut quit = false;
        for event in self.platform.poll_events(&self.app.session) {
            match event {
                PlatformEvent::Quit => quit = true,
                PlatformEvent::Action => self.app.press_action(),
            }
        }

        let steps = self.app.advance(frame_time);
        if steps > 1 {
            log::trace!("frame {} ran {} steps", self.frames, steps);
        }

        let frame = self.app.render_frame();
        self.renderer.render(&frame);
        self.frames += 1;

        if self.should_idle() {
            let extra = 1.0 / SIM_HZ - frame_time;
            if extra > 0.0 {
                self.clock.idle(extra);
            }
        }

        !quit
    }

    /// Sleep off the rest of a frame unless the display is already pacing
    /// us: vsync must be on and the renderer must actually wait for it
    fn should_idle(&self) -> bool {
        self.pace_frames && !(self.app.settings.vsync && self.renderer.blocks_on_vsync())
    }

    /// Run until the platform quits or `max_frames` frames have run.
    /// Returns the frame count.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        while max_frames.is_none_or(|max| self.frames < max) {
            if !self.frame() {
                log::info!("Quit after {} frames", self.frames);
                break;
            }
        }
        self.frames
    }
}
