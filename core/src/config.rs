//! Immutable tuning values handed to the world and systems at construction.
//!
//! Every knob that the simulation reads lives here so that adapters can load
//! overrides from a file without touching gameplay code. Defaults reproduce
//! the shipped balance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregated configuration consumed by the simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed-step scheduling parameters.
    pub simulation: SimulationTuning,
    /// Player movement, stamina, health and view-bob parameters.
    pub player: PlayerTuning,
    /// Enemy scaling and melee parameters.
    pub enemy: EnemyTuning,
    /// Wave sizing and spawn cadence.
    pub waves: WaveTuning,
    /// Grenade throw, fuse and blast parameters.
    pub grenades: GrenadeTuning,
    /// Hit-scan tracing and reward parameters.
    pub combat: CombatTuning,
    /// Shop interaction parameters.
    pub economy: EconomyTuning,
    /// Cosmetic feedback timers surfaced to presentation.
    pub feedback: FeedbackTuning,
}

impl GameConfig {
    /// Checks that every value the simulation divides by or iterates over is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        duration("simulation.fixed_step_seconds", self.simulation.fixed_step_seconds)?;
        duration("simulation.max_frame_seconds", self.simulation.max_frame_seconds)?;
        positive("player.move_speed", self.player.move_speed)?;
        positive("player.health_max", self.player.health_max)?;
        positive("player.stamina_max", self.player.stamina_max)?;
        positive("enemy.base_health", self.enemy.base_health)?;
        positive("enemy.attack_range", self.enemy.attack_range)?;
        positive("waves.spawn_rate", self.waves.spawn_rate)?;
        positive("waves.growth", self.waves.growth)?;
        non_negative("waves.spawn_rate_per_wave", self.waves.spawn_rate_per_wave)?;
        positive("grenades.blast_radius", self.grenades.blast_radius)?;
        positive("combat.ray_step", self.combat.ray_step)?;
        positive("combat.max_range", self.combat.max_range)?;
        positive("combat.hit_radius", self.combat.hit_radius)?;
        positive("economy.interact_range", self.economy.interact_range)?;

        if self.waves.base_size == 0 {
            return Err(ConfigError::EmptyWave);
        }

        if self.waves.live_cap == 0 {
            return Err(ConfigError::ZeroLiveCap);
        }

        if self.grenades.min_damage > self.grenades.max_damage {
            return Err(ConfigError::InvertedDamageRange {
                min: self.grenades.min_damage,
                max: self.grenades.max_damage,
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn duration(field: &'static str, value: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    Duration::try_from_secs_f32(value)
        .map(|_| ())
        .map_err(|_| ConfigError::DurationOutOfRange { field, value })
}

/// Reasons a [`GameConfig`] is rejected by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive and finite was not.
    #[error("`{field}` must be positive (received {value})")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// A value that must be zero or more and finite was not.
    #[error("`{field}` must not be negative (received {value})")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// A number of seconds too large to represent as a [`Duration`].
    #[error("`{field}` is out of range (received {value})")]
    DurationOutOfRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// Waves would never contain an enemy.
    #[error("`waves.base_size` must be at least one")]
    EmptyWave,
    /// The live-enemy cap would block every spawn.
    #[error("`waves.live_cap` must be at least one")]
    ZeroLiveCap,
    /// Explosion falloff would increase with distance.
    #[error("grenade damage range is inverted (min {min} > max {max})")]
    InvertedDamageRange {
        /// Configured minimum damage at the blast edge.
        min: f32,
        /// Configured maximum damage at the blast centre.
        max: f32,
    },
}

/// Fixed-step scheduling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTuning {
    /// Length of one simulation tick in seconds.
    pub fixed_step_seconds: f32,
    /// Upper bound on real time banked per rendered frame.
    pub max_frame_seconds: f32,
    /// Seed for every random stream used by the systems.
    pub rng_seed: u64,
}

impl SimulationTuning {
    /// Tick length as a [`Duration`], zero when the value is unrepresentable.
    #[must_use]
    pub fn fixed_step(&self) -> Duration {
        Duration::try_from_secs_f32(self.fixed_step_seconds).unwrap_or_default()
    }

    /// Per-frame accumulation ceiling as a [`Duration`], zero when the value is unrepresentable.
    #[must_use]
    pub fn max_frame(&self) -> Duration {
        Duration::try_from_secs_f32(self.max_frame_seconds).unwrap_or_default()
    }
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            fixed_step_seconds: 1.0 / 60.0,
            max_frame_seconds: 0.1,
            rng_seed: 0x5eed_0f_d3ad,
        }
    }
}

/// Player movement, stamina, health and view-bob parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Walking speed in world units per second.
    pub move_speed: f32,
    /// Speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Speed multiplier while aiming down sights.
    pub ads_speed_multiplier: f32,
    /// Radians of yaw per unit of pointer motion.
    pub look_sensitivity: f32,
    /// Maximum health.
    pub health_max: f32,
    /// Seconds after the last hit before health regenerates.
    pub health_regen_delay: f32,
    /// Health regenerated per second once regeneration starts.
    pub health_regen_rate: f32,
    /// Maximum stamina.
    pub stamina_max: f32,
    /// Stamina regenerated per second when not sprinting.
    pub stamina_regen: f32,
    /// Stamina drained per second while sprinting and moving.
    pub stamina_drain: f32,
    /// Radians of bob phase advanced per second of movement.
    pub bob_speed: f32,
    /// Peak vertical view offset expressed as a fraction of half the screen height.
    pub bob_amplitude: f32,
    /// Currency granted at the start of a session.
    pub starting_currency: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.2,
            sprint_multiplier: 1.6,
            ads_speed_multiplier: 0.7,
            look_sensitivity: 0.002,
            health_max: 100.0,
            health_regen_delay: 3.0,
            health_regen_rate: 6.0,
            stamina_max: 5.0,
            stamina_regen: 1.4,
            stamina_drain: 2.4,
            bob_speed: 9.0,
            bob_amplitude: 0.04,
            starting_currency: 500,
        }
    }
}

/// Enemy scaling and melee parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Movement speed of a wave-zero enemy.
    pub base_speed: f32,
    /// Speed added per wave number.
    pub speed_per_wave: f32,
    /// Health of a wave-zero enemy.
    pub base_health: f32,
    /// Health added per wave number.
    pub health_per_wave: f32,
    /// Distance within which an enemy can strike the player.
    pub attack_range: f32,
    /// Seconds between strikes.
    pub attack_cooldown: f32,
    /// Seconds an enemy stays tinted after being hit.
    pub hit_flash: f32,
    /// Contact damage before wave scaling.
    pub base_contact_damage: f32,
    /// Contact damage added per wave number.
    pub contact_damage_per_wave: f32,
}

impl EnemyTuning {
    /// Speed of an enemy created during `wave`.
    #[must_use]
    pub fn speed_for(&self, wave: u32) -> f32 {
        self.base_speed + wave as f32 * self.speed_per_wave
    }

    /// Health of an enemy created during `wave`.
    #[must_use]
    pub fn health_for(&self, wave: u32) -> f32 {
        self.base_health + wave as f32 * self.health_per_wave
    }

    /// Damage of a single strike while `wave` is active.
    #[must_use]
    pub fn contact_damage_for(&self, wave: u32) -> f32 {
        self.base_contact_damage + wave as f32 * self.contact_damage_per_wave
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_speed: 0.8,
            speed_per_wave: 0.05,
            base_health: 40.0,
            health_per_wave: 8.0,
            attack_range: 0.9,
            attack_cooldown: 1.2,
            hit_flash: 0.1,
            base_contact_damage: 10.0,
            contact_damage_per_wave: 0.5,
        }
    }
}

/// Wave sizing and spawn cadence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Enemies in the first wave.
    pub base_size: u32,
    /// Multiplicative growth applied per subsequent wave.
    pub growth: f32,
    /// Hard cap on simultaneously alive enemies.
    pub live_cap: usize,
    /// Base spawns per second.
    pub spawn_rate: f32,
    /// Spawns per second added per wave number.
    pub spawn_rate_per_wave: f32,
    /// Seconds of empty arena required before the next wave.
    pub intermission: f32,
    /// Seconds the "new wave" banner stays visible.
    pub banner: f32,
}

impl WaveTuning {
    /// Number of enemies spawned during `wave`, i.e. `floor(base * growth^(wave - 1))`.
    #[must_use]
    pub fn size_of(&self, wave: u32) -> u32 {
        let exponent = wave.saturating_sub(1) as i32;
        let size = f64::from(self.base_size) * f64::from(self.growth).powi(exponent);
        size.floor() as u32
    }

    /// Seconds between two spawns during `wave`.
    #[must_use]
    pub fn spawn_interval_for(&self, wave: u32) -> f32 {
        1.0 / (self.spawn_rate + wave as f32 * self.spawn_rate_per_wave)
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_size: 6,
            growth: 1.3,
            live_cap: 30,
            spawn_rate: 0.7,
            spawn_rate_per_wave: 0.1,
            intermission: 3.0,
            banner: 2.0,
        }
    }
}

/// Grenade throw, fuse and blast parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeTuning {
    /// Grenades held at the start of every wave.
    pub starting_count: u32,
    /// Seconds between throws.
    pub throw_cooldown: f32,
    /// Launch speed in world units per second.
    pub throw_speed: f32,
    /// Seconds from throw to detonation.
    pub fuse: f32,
    /// Fraction of velocity kept (and reversed) on a wall bounce.
    pub bounce_damping: f32,
    /// Radius of the blast.
    pub blast_radius: f32,
    /// Damage at the centre of the blast.
    pub max_damage: f32,
    /// Damage at the edge of the blast.
    pub min_damage: f32,
    /// Currency granted per kill.
    pub kill_reward: u32,
}

impl Default for GrenadeTuning {
    fn default() -> Self {
        Self {
            starting_count: 3,
            throw_cooldown: 0.8,
            throw_speed: 4.0,
            fuse: 2.2,
            bounce_damping: 0.4,
            blast_radius: 2.5,
            max_damage: 60.0,
            min_damage: 20.0,
            kill_reward: 80,
        }
    }
}

/// Hit-scan tracing and reward parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Distance advanced per trace step.
    pub ray_step: f32,
    /// Maximum distance a trace travels.
    pub max_range: f32,
    /// Proximity at which a trace step registers an enemy hit.
    pub hit_radius: f32,
    /// Currency granted for a non-lethal hit.
    pub hit_reward: u32,
    /// Currency granted for a kill.
    pub kill_reward: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            ray_step: 0.05,
            max_range: 20.0,
            hit_radius: 0.4,
            hit_reward: 10,
            kill_reward: 60,
        }
    }
}

/// Shop interaction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Distance within which the door or a station can be used.
    pub interact_range: f32,
    /// Price of opening the door.
    pub door_cost: u32,
    /// Price of a reserve refill at the ammo station.
    pub ammo_cost: u32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            interact_range: 1.2,
            door_cost: 750,
            ammo_cost: 250,
        }
    }
}

/// Cosmetic feedback timers surfaced to presentation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTuning {
    /// Seconds the hitmarker stays visible.
    pub hitmarker: f32,
    /// Red wash intensity applied when the player is struck.
    pub damage_flash: f32,
    /// Intensity removed from the wash per second.
    pub damage_flash_decay: f32,
    /// Minimum seconds between ambient enemy cues.
    pub ambient_interval: f32,
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            hitmarker: 0.1,
            damage_flash: 0.35,
            damage_flash_decay: 2.0,
            ambient_interval: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn wave_sizes_follow_geometric_growth() {
        let waves = WaveTuning::default();
        assert_eq!(waves.size_of(1), 6);
        assert_eq!(waves.size_of(2), 7);
        assert_eq!(waves.size_of(3), 10);
    }

    #[test]
    fn spawn_interval_shortens_with_wave() {
        let waves = WaveTuning::default();
        assert!(waves.spawn_interval_for(5) < waves.spawn_interval_for(1));
        assert!((waves.spawn_interval_for(1) - 1.25).abs() < 1e-5);
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut config = GameConfig::default();
        config.simulation.fixed_step_seconds = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "simulation.fixed_step_seconds",
                ..
            })
        ));
    }

    #[test]
    fn huge_frame_ceiling_is_rejected_instead_of_overflowing() {
        let mut config = GameConfig::default();
        config.simulation.max_frame_seconds = 1e20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DurationOutOfRange {
                field: "simulation.max_frame_seconds",
                value: 1e20,
            })
        );
        assert_eq!(config.simulation.max_frame(), Duration::ZERO);
    }

    #[test]
    fn negative_spawn_rate_growth_is_rejected() {
        let mut config = GameConfig::default();
        config.waves.spawn_rate_per_wave = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "waves.spawn_rate_per_wave",
                ..
            })
        ));

        config.waves.spawn_rate_per_wave = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn inverted_grenade_damage_is_rejected() {
        let mut config = GameConfig::default();
        config.grenades.min_damage = 90.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedDamageRange { .. })
        ));
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let config: GameConfig = toml::from_str(
            "[waves]\nbase_size = 9\n\n[player]\nmove_speed = 4.0\n",
        )
        .expect("partial config parses");

        assert_eq!(config.waves.base_size, 9);
        assert!((config.player.move_speed - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.enemy, EnemyTuning::default());
        assert_eq!(config.waves.live_cap, WaveTuning::default().live_cap);
    }
}
