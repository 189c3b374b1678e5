#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step orchestration of the Last Stand world and its systems.
//!
//! A [`Simulation`] owns the authoritative world together with the wave
//! director, combat resolver and economy resolver. Callers submit input as it
//! arrives and report elapsed real time; the simulation converts that time
//! into fixed ticks and runs the systems in a fixed order on each one.

mod audio;
mod clock;
mod input;

use std::time::Duration;

use last_stand_core::{
    AudioCue, Command, ConfigError, DamageCause, Event, GameConfig, HudSnapshot, PlayerInput,
};
use last_stand_system_combat::{self as combat, Combat};
use last_stand_system_economy::{self as economy, Economy};
use last_stand_system_wave_director::{self as wave_director, WaveDirector};
use last_stand_world::{self as world, query, World};
use log::debug;

pub use audio::{AudioSink, NullAudio, RecordingAudio};
pub use clock::FixedStepClock;
pub use input::InputLatch;

/// Owns the world and drives it forward in fixed ticks.
#[derive(Debug)]
pub struct Simulation<A: AudioSink> {
    world: World,
    director: WaveDirector,
    combat: Combat,
    economy: Economy,
    clock: FixedStepClock,
    latch: InputLatch,
    audio: A,
    paused: bool,
    ambient_interval: f32,
    ambient_timer: f32,
    events: Vec<Event>,
}

impl<A: AudioSink> Simulation<A> {
    /// Validates the configuration and builds a simulation on the standard arena.
    pub fn new(config: GameConfig, audio: A) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.simulation.rng_seed;
        Ok(Self {
            director: WaveDirector::new(wave_director::Config::new(config.waves, seed)),
            combat: Combat::new(combat::Config::new(
                config.combat,
                config.grenades,
                seed.wrapping_add(1),
            )),
            economy: Economy::new(economy::Config::new(config.economy)),
            clock: FixedStepClock::new(
                config.simulation.fixed_step(),
                config.simulation.max_frame(),
            ),
            latch: InputLatch::default(),
            audio,
            paused: false,
            ambient_interval: config.feedback.ambient_interval,
            ambient_timer: 0.0,
            events: Vec::new(),
            world: World::new(config),
        })
    }

    /// Queues an input sample for the next tick.
    pub fn submit_input(&mut self, input: PlayerInput) {
        self.latch.submit(input);
    }

    /// Banks `frame` of real time and runs every tick that became due.
    ///
    /// While paused no tick runs, the banked time is thrown away and action
    /// presses are dropped. Returns the number of ticks executed.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        if self.latch.take_pause_toggle() {
            self.paused = !self.paused;
            debug!("simulation {}", if self.paused { "paused" } else { "resumed" });
        }

        if self.paused {
            self.clock.discard();
            self.latch.discard_one_shots();
            return 0;
        }

        let ticks = self.clock.advance(frame);
        for _ in 0..ticks {
            let _ = self.step();
        }
        ticks
    }

    /// Runs exactly one tick and returns the events it produced.
    pub fn step(&mut self) -> &[Event] {
        let input = self.latch.take_tick();
        let dt = self.clock.step();
        let mut commands = Vec::new();
        self.events.clear();

        self.director.handle(
            dt,
            query::enemy_count(&self.world),
            query::map(&self.world).spawn_points(),
            &mut commands,
        );
        self.flush(&mut commands);

        commands.push(Command::Tick {
            dt,
            intent: input.intent,
        });
        if input.fire_held {
            commands.push(Command::FireWeapon);
        }
        if input.reload {
            commands.push(Command::ReloadWeapon);
        }
        if input.grenade {
            commands.push(Command::ThrowGrenade);
        }
        self.flush(&mut commands);

        if !query::is_defeated(&self.world) {
            let position = query::player(&self.world).position;
            self.economy.handle(
                input.interact,
                position,
                query::map(&self.world),
                &mut commands,
            );
            self.flush(&mut commands);
        }

        let enemies = query::enemy_view(&self.world);
        self.combat.handle(
            &self.events,
            &enemies,
            query::map(&self.world),
            &mut commands,
        );
        self.flush(&mut commands);

        commands.push(Command::RemoveExpired);
        self.flush(&mut commands);

        self.emit_cues(dt);
        &self.events
    }

    /// Builds the presentation snapshot for the current state.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        let player = query::player(&self.world);
        let tuning = &query::config(&self.world).player;
        let defeated = query::is_defeated(&self.world);
        let prompt = if defeated {
            None
        } else {
            self.economy
                .prompt(player.position, query::map(&self.world))
                .map(|prompt| prompt.to_string())
        };

        HudSnapshot {
            health_fraction: (player.health / tuning.health_max).clamp(0.0, 1.0),
            stamina_fraction: (player.stamina / tuning.stamina_max).clamp(0.0, 1.0),
            weapon: player.weapon.kind.name(),
            magazine: player.weapon.magazine,
            reserve: player.weapon.reserve,
            grenades: player.grenades,
            wave: query::wave(&self.world).get(),
            currency: player.currency,
            prompt,
            banner: self.director.banner_text(),
            hitmarker: query::hitmarker_active(&self.world),
            aiming: player.aiming,
            paused: self.paused,
            defeated,
        }
    }

    /// Read-only access to the committed world state.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Audio sink receiving the simulation's cues.
    #[must_use]
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    /// Reports whether the simulation is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    fn flush(&mut self, commands: &mut Vec<Command>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn emit_cues(&mut self, dt: Duration) {
        let mut hit_confirmed = false;
        for event in &self.events {
            let cue = match event {
                Event::WeaponFired { .. } => AudioCue::Shoot,
                Event::ReloadStarted { .. } => AudioCue::Reload,
                Event::ProjectileDetonated { .. } => AudioCue::Explosion,
                Event::EnemyDamaged {
                    cause: DamageCause::Hitscan,
                    ..
                } if !hit_confirmed => {
                    hit_confirmed = true;
                    AudioCue::HitConfirmed
                }
                _ => continue,
            };
            self.audio.play(cue);
        }

        self.ambient_timer += dt.as_secs_f32();
        if query::enemy_count(&self.world) > 0 && self.ambient_timer >= self.ambient_interval {
            self.ambient_timer = 0.0;
            self.audio.play(AudioCue::EnemyAmbient);
        }
    }
}
