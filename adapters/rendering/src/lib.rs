#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Last Stand adapters.
//!
//! Adapters fill a [`Scene`] from the committed simulation state each frame.
//! The [`Projector`] turns that scene into a backend-neutral [`Frame`] which a
//! backend may draw directly or hand to [`FrameBuffer::rasterize`].

mod projection;
mod raster;

use anyhow::Result as AnyResult;
use glam::Vec2;
use last_stand_core::{GridMap, HudSnapshot, PlayerInput};
use std::time::Duration;
use thiserror::Error;

pub use projection::{
    Band, Frame, ProjectionConfig, Projector, Rect, SpriteQuad, Viewport, WallColumn,
};
pub use raster::FrameBuffer;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Opaque grey whose channels all equal `level` on a 0–255 scale.
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::from_rgb_u8(level, level, level)
    }

    /// Returns the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Converts the color to clamped RGBA bytes.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
            channel_to_u8(self.alpha),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Player controls sampled during the frame.
    pub player: PlayerInput,
}

/// Camera pose the world is projected from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPose {
    /// Eye position in world units.
    pub position: Vec2,
    /// Facing direction in radians.
    pub yaw: f32,
    /// Whether the narrower aim-down-sights field of view applies.
    pub aiming: bool,
    /// Vertical bob as a fraction of half the viewport height.
    pub bob_offset: f32,
}

impl ViewPose {
    /// Creates a level, hip-fire pose.
    #[must_use]
    pub const fn new(position: Vec2, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            aiming: false,
            bob_offset: 0.0,
        }
    }
}

/// Enemy drawn as a billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySprite {
    /// World-space location.
    pub position: Vec2,
    /// Whether the enemy was struck recently.
    pub flashing: bool,
}

/// Immutable snapshot of everything drawn in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Camera pose.
    pub view: ViewPose,
    /// Map walls, door and fixtures.
    pub grid: GridMap,
    /// Living enemies.
    pub enemies: Vec<EnemySprite>,
    /// Grenades in flight.
    pub projectiles: Vec<Vec2>,
    /// Intensity of the red wash, 0 when absent.
    pub damage_flash: f32,
    /// Heads-up display contents.
    pub hud: HudSnapshot,
}

impl Scene {
    /// Creates an empty scene over the provided map.
    #[must_use]
    pub fn new(grid: GridMap, view: ViewPose) -> Self {
        Self {
            view,
            grid,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            damage_flash: 0.0,
            hud: HudSnapshot::default(),
        }
    }
}

/// Describes how a scene should be presented.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Raycaster parameters.
    pub projection: ProjectionConfig,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        scene: Scene,
        projection: ProjectionConfig,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
            projection,
        }
    }
}

/// Rendering backend capable of presenting Last Stand scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the input captured by the adapter, and refreshes the scene from the
    /// simulation before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Viewports must cover at least one pixel.
    #[error("viewport must be positive and finite (received {width}x{height})")]
    InvalidViewport {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// At least one ray column is required.
    #[error("column count must be positive")]
    InvalidColumnCount,
    /// Ray marching would never terminate or never advance.
    #[error("ray step must be positive and below the max depth (step {step}, depth {max_depth})")]
    InvalidRayStep {
        /// Requested step.
        step: f32,
        /// Requested depth.
        max_depth: f32,
    },
    /// Fields of view must lie strictly between zero and a half turn.
    #[error("field of view must be within (0, pi) radians (received {0})")]
    InvalidFieldOfView(f32),
}
