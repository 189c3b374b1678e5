#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that schedules enemy spawns and escalates waves.
//!
//! Each wave moves through three phases: spawning its allotment at a fixed
//! cadence, draining while the last enemies are alive, and an intermission
//! that must outlast the configured pause before the next wave begins.

use std::time::Duration;

use glam::Vec2;
use last_stand_core::{Command, WaveNumber, WaveTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tuning: WaveTuning,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided wave tuning and seed.
    #[must_use]
    pub const fn new(tuning: WaveTuning, rng_seed: u64) -> Self {
        Self { tuning, rng_seed }
    }
}

/// Phase of the active wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Enemies remain to be spawned.
    Spawning,
    /// Every enemy has spawned but some are still alive.
    Draining,
    /// The arena is clear and the next wave is pending.
    Intermission,
}

/// Pure system that emits wave and spawn commands.
#[derive(Debug)]
pub struct WaveDirector {
    tuning: WaveTuning,
    rng: ChaCha8Rng,
    wave: WaveNumber,
    started: bool,
    remaining: u32,
    spawn_timer: f32,
    intermission: f32,
    banner: f32,
    live_enemies: usize,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tuning: config.tuning,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            wave: WaveNumber::first(),
            started: false,
            remaining: 0,
            spawn_timer: 0.0,
            intermission: 0.0,
            banner: 0.0,
            live_enemies: 0,
        }
    }

    /// Advances the director by `dt` and emits the commands it schedules.
    ///
    /// The first call begins wave one. At most one enemy spawns per call, and
    /// only while fewer than the live cap are alive.
    pub fn handle(
        &mut self,
        dt: Duration,
        live_enemies: usize,
        spawn_points: &[Vec2],
        out: &mut Vec<Command>,
    ) {
        if !self.started {
            self.started = true;
            self.begin_wave(out);
        }

        let dt = dt.as_secs_f32();
        self.live_enemies = live_enemies;
        self.banner = (self.banner - dt).max(0.0);

        if self.remaining == 0 && live_enemies == 0 {
            self.intermission += dt;
            if self.intermission > self.tuning.intermission {
                self.wave = self.wave.next();
                self.begin_wave(out);
            }
            return;
        }

        if self.remaining == 0 {
            return;
        }

        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 || live_enemies >= self.tuning.live_cap || spawn_points.is_empty()
        {
            return;
        }

        let position = spawn_points[self.rng.gen_range(0..spawn_points.len())];
        out.push(Command::SpawnEnemy {
            position,
            wave: self.wave,
        });
        self.remaining -= 1;
        self.live_enemies += 1;
        self.spawn_timer = self.tuning.spawn_interval_for(self.wave.get());
    }

    /// Wave currently being played.
    #[must_use]
    pub const fn wave(&self) -> WaveNumber {
        self.wave
    }

    /// Enemies of the current wave that have not spawned yet.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Phase of the current wave as of the last call to [`WaveDirector::handle`].
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        if self.remaining > 0 {
            WavePhase::Spawning
        } else if self.live_enemies > 0 {
            WavePhase::Draining
        } else {
            WavePhase::Intermission
        }
    }

    /// Banner announcing the wave while its timer runs.
    #[must_use]
    pub fn banner_text(&self) -> Option<String> {
        (self.banner > 0.0).then(|| format!("Wave {}", self.wave.get()))
    }

    fn begin_wave(&mut self, out: &mut Vec<Command>) {
        self.remaining = wave_size(&self.tuning, self.wave);
        self.spawn_timer = 0.0;
        self.intermission = 0.0;
        self.banner = self.tuning.banner;
        out.push(Command::BeginWave { wave: self.wave });
    }
}

/// Number of enemies a wave spawns.
#[must_use]
pub fn wave_size(tuning: &WaveTuning, wave: WaveNumber) -> u32 {
    tuning.size_of(wave.get())
}
