//! Column raycaster and billboard projection.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use last_stand_core::GridMap;

use crate::{Color, RenderingError, Scene};

/// Tunable parameters of the projection engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// Number of rays cast across the field of view.
    pub columns: u32,
    /// Hip-fire field of view in radians.
    pub fov: f32,
    /// Aim-down-sights field of view in radians.
    pub ads_fov: f32,
    /// March increment of each ray in world units.
    pub ray_step: f32,
    /// Distance at which rays give up.
    pub max_depth: f32,
    /// Height multiplier applied to walls and sprites.
    pub wall_scale: f32,
    /// Darkest grey a wall may be shaded to.
    pub shade_floor: u8,
    /// Largest on-screen sprite height in pixels.
    pub sprite_max_size: f32,
    /// Upper half background.
    pub ceiling: Color,
    /// Lower half background.
    pub floor: Color,
    /// Enemy billboard color.
    pub enemy: Color,
    /// Enemy billboard color while its hit flash is active.
    pub enemy_hit: Color,
    /// Grenade billboard color.
    pub projectile: Color,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            columns: 320,
            fov: PI / 3.0,
            ads_fov: PI / 4.0,
            ray_step: 0.02,
            max_depth: 20.0,
            wall_scale: 1.2,
            shade_floor: 0,
            sprite_max_size: 200.0,
            ceiling: Color::from_rgb_u8(0x1b, 0x1b, 0x1b),
            floor: Color::from_rgb_u8(0x0f, 0x0f, 0x0f),
            enemy: Color::from_rgb_u8(0x77, 0xff, 0x77),
            enemy_hit: Color::from_rgb_u8(0xff, 0x55, 0x55),
            projectile: Color::from_rgb_u8(0xff, 0xaa, 0x33),
        }
    }
}

impl ProjectionConfig {
    /// Checks that every ray terminates and every field of view is usable.
    pub fn validate(&self) -> Result<(), RenderingError> {
        if self.columns == 0 {
            return Err(RenderingError::InvalidColumnCount);
        }
        if !(self.ray_step > 0.0 && self.ray_step < self.max_depth && self.max_depth.is_finite()) {
            return Err(RenderingError::InvalidRayStep {
                step: self.ray_step,
                max_depth: self.max_depth,
            });
        }
        for fov in [self.fov, self.ads_fov] {
            if !(fov > 0.0 && fov < PI) {
                return Err(RenderingError::InvalidFieldOfView(fov));
            }
        }
        Ok(())
    }
}

/// Pixel dimensions of the target surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, rejecting empty or non-finite sizes.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        if width >= 1.0 && height >= 1.0 && width.is_finite() && height.is_finite() {
            Ok(Self { width, height })
        } else {
            Err(RenderingError::InvalidViewport { width, height })
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Solid background band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Covered area.
    pub rect: Rect,
    /// Fill color.
    pub color: Color,
}

/// One vertical wall strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallColumn {
    /// Covered area, already shifted by the view bob.
    pub rect: Rect,
    /// Perpendicular distance to the wall.
    pub depth: f32,
    /// Grey level the strip is drawn with.
    pub color: Color,
}

/// Billboard rectangle for an enemy or grenade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteQuad {
    /// Covered area.
    pub rect: Rect,
    /// Straight-line distance from the eye.
    pub distance: f32,
    /// Fill color.
    pub color: Color,
}

/// Backend-neutral draw list for one frame, in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Viewport the frame was projected for.
    pub viewport: Viewport,
    /// Upper background half.
    pub ceiling: Band,
    /// Lower background half.
    pub floor: Band,
    /// Wall strips from left to right.
    pub walls: Vec<WallColumn>,
    /// Billboards sorted farthest first.
    pub sprites: Vec<SpriteQuad>,
    /// Full-screen wash drawn last, if any.
    pub overlay: Option<Color>,
}

impl Frame {
    /// Perpendicular wall distance for every column.
    #[must_use]
    pub fn depth_buffer(&self) -> Vec<f32> {
        self.walls.iter().map(|wall| wall.depth).collect()
    }
}

/// Projects scenes into frames.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    config: ProjectionConfig,
}

impl Projector {
    /// Creates a projector after validating its configuration.
    pub fn new(config: ProjectionConfig) -> Result<Self, RenderingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Builds the draw list for `scene` as seen through `viewport`.
    #[must_use]
    pub fn project(&self, scene: &Scene, viewport: Viewport) -> Frame {
        let width = viewport.width();
        let height = viewport.height();
        let half_height = height / 2.0;
        let fov = if scene.view.aiming {
            self.config.ads_fov
        } else {
            self.config.fov
        };
        let bob = scene.view.bob_offset * half_height;

        Frame {
            viewport,
            ceiling: Band {
                rect: Rect::new(0.0, 0.0, width, half_height),
                color: self.config.ceiling,
            },
            floor: Band {
                rect: Rect::new(0.0, half_height, width, half_height),
                color: self.config.floor,
            },
            walls: self.walls(scene, viewport, fov, bob),
            sprites: self.sprites(scene, viewport, fov, bob),
            overlay: (scene.damage_flash > 0.0)
                .then(|| Color::new(1.0, 0.0, 0.0, scene.damage_flash.min(1.0))),
        }
    }

    fn walls(&self, scene: &Scene, viewport: Viewport, fov: f32, bob: f32) -> Vec<WallColumn> {
        let config = &self.config;
        let width = viewport.width();
        let height = viewport.height();
        let columns = config.columns as f32;
        let strip_width = (width / columns).ceil();
        let origin = scene.view.position;
        let yaw = scene.view.yaw;

        (0..config.columns)
            .map(|column| {
                let t = column as f32 / columns;
                let angle = yaw - fov / 2.0 + t * fov;
                let distance = march(&scene.grid, origin, angle, config.ray_step, config.max_depth);
                let depth = distance * (angle - yaw).cos();
                let wall_height = height.min(height / depth * config.wall_scale);
                let shade = (200.0 - depth * 25.0).clamp(f32::from(config.shade_floor), 255.0);

                WallColumn {
                    rect: Rect::new(
                        (t * width).floor(),
                        height / 2.0 - wall_height / 2.0 + bob,
                        strip_width,
                        wall_height,
                    ),
                    depth,
                    color: Color::grey(shade as u8),
                }
            })
            .collect()
    }

    fn sprites(&self, scene: &Scene, viewport: Viewport, fov: f32, bob: f32) -> Vec<SpriteQuad> {
        let config = &self.config;
        let origin = scene.view.position;
        let enemies = scene.enemies.iter().map(|enemy| {
            let color = if enemy.flashing {
                config.enemy_hit
            } else {
                config.enemy
            };
            (enemy.position, color)
        });
        let projectiles = scene
            .projectiles
            .iter()
            .map(|position| (*position, config.projectile));

        let mut billboards: Vec<(Vec2, f32, Color)> = enemies
            .chain(projectiles)
            .map(|(position, color)| (position, origin.distance(position), color))
            .collect();
        billboards.sort_by(|a, b| b.1.total_cmp(&a.1));

        billboards
            .into_iter()
            .filter_map(|(position, distance, color)| {
                let offset = position - origin;
                let angle = wrap_angle(offset.y.atan2(offset.x) - scene.view.yaw);
                if angle.abs() > fov / 1.5 {
                    return None;
                }

                let size = config
                    .sprite_max_size
                    .min(viewport.height() / distance * config.wall_scale);
                let centre_x = (0.5 + angle / fov) * viewport.width();
                Some(SpriteQuad {
                    rect: Rect::new(
                        centre_x - size / 4.0,
                        viewport.height() / 2.0 - size / 2.0 + bob,
                        size / 2.0,
                        size,
                    ),
                    distance,
                    color,
                })
            })
            .collect()
    }
}

/// Marches from `origin` along `angle` and returns the distance travelled.
///
/// The result is the first sampled distance that lands in a blocked cell, or
/// the first sample at or beyond `max_depth` when nothing is hit.
fn march(map: &GridMap, origin: Vec2, angle: f32, step: f32, max_depth: f32) -> f32 {
    let direction = Vec2::from_angle(angle);
    let mut distance = 0.0;
    while distance < max_depth {
        distance += step;
        if map.is_blocked(origin + direction * distance) {
            break;
        }
    }
    distance
}

/// Normalises an angle to `[-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnemySprite, ViewPose};

    fn corridor() -> GridMap {
        GridMap::from_rows(&["1111111", "1000001", "1111111"])
    }

    fn scene(yaw: f32) -> Scene {
        Scene::new(corridor(), ViewPose::new(Vec2::new(1.5, 1.5), yaw))
    }

    fn projector() -> Projector {
        Projector::new(ProjectionConfig {
            columns: 9,
            ..ProjectionConfig::default()
        })
        .expect("valid projection")
    }

    fn viewport() -> Viewport {
        Viewport::new(640.0, 480.0).expect("valid viewport")
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let zero_columns = ProjectionConfig {
            columns: 0,
            ..ProjectionConfig::default()
        };
        assert_eq!(
            Projector::new(zero_columns).err(),
            Some(RenderingError::InvalidColumnCount)
        );

        let stalled = ProjectionConfig {
            ray_step: 0.0,
            ..ProjectionConfig::default()
        };
        assert!(matches!(
            Projector::new(stalled),
            Err(RenderingError::InvalidRayStep { .. })
        ));
        assert!(Viewport::new(0.0, 480.0).is_err());
    }

    #[test]
    fn centre_column_sees_the_far_wall_at_its_true_depth() {
        let frame = projector().project(&scene(0.0), viewport());
        assert_eq!(frame.walls.len(), 9);

        let centre = frame.walls[4];
        assert!((centre.depth - 4.5).abs() < 0.05, "depth {}", centre.depth);

        let expected_height = 480.0 / centre.depth * 1.2;
        assert!((centre.rect.height - expected_height).abs() < 1e-3);
        assert!((centre.rect.y - (240.0 - expected_height / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn adjacent_walls_are_clamped_to_the_viewport_height_and_brightest() {
        let frame = projector().project(&scene(PI / 2.0), viewport());
        for wall in &frame.walls {
            assert!(wall.rect.height <= 480.0);
        }
        let centre = frame.walls[4];
        assert_eq!(centre.rect.height, 480.0);
        assert!(centre.color.red > 180.0 / 255.0);
    }

    #[test]
    fn distant_walls_never_fall_below_the_shade_floor() {
        let open = GridMap::from_rows(&vec!["0".repeat(31); 31]);
        let floored = Projector::new(ProjectionConfig {
            columns: 3,
            shade_floor: 40,
            ..ProjectionConfig::default()
        })
        .expect("valid projection");
        let scene = Scene::new(open, ViewPose::new(Vec2::new(15.5, 15.5), 0.0));
        let frame = floored.project(&scene, viewport());
        for wall in &frame.walls {
            assert_eq!(wall.color, Color::grey(40));
        }
    }

    #[test]
    fn sprites_are_sorted_far_to_near_and_culled_behind() {
        let mut scene = scene(0.0);
        scene.enemies = vec![
            EnemySprite {
                position: Vec2::new(2.5, 1.5),
                flashing: true,
            },
            EnemySprite {
                position: Vec2::new(5.5, 1.5),
                flashing: false,
            },
            EnemySprite {
                position: Vec2::new(0.5, 1.5),
                flashing: false,
            },
        ];
        scene.projectiles = vec![Vec2::new(4.0, 1.5)];

        let frame = projector().project(&scene, viewport());
        let distances: Vec<f32> = frame.sprites.iter().map(|sprite| sprite.distance).collect();
        assert_eq!(distances, vec![4.0, 2.5, 1.0]);

        let config = ProjectionConfig::default();
        assert_eq!(frame.sprites[0].color, config.enemy);
        assert_eq!(frame.sprites[1].color, config.projectile);
        assert_eq!(frame.sprites[2].color, config.enemy_hit);

        let near = frame.sprites[2];
        assert_eq!(near.rect.height, 200.0);
        assert_eq!(near.rect.width, 100.0);
        assert!((near.rect.x - (320.0 - 50.0)).abs() < 1e-3);
    }

    #[test]
    fn sprite_angles_wrap_across_the_seam() {
        let mut scene = scene(PI - 0.05);
        scene.grid = GridMap::from_rows(&["0000000", "0000000", "0000000"]);
        scene.view.position = Vec2::new(4.5, 1.5);
        scene.enemies = vec![EnemySprite {
            position: Vec2::new(2.5, 1.4),
            flashing: false,
        }];

        let frame = projector().project(&scene, viewport());
        assert_eq!(frame.sprites.len(), 1, "sprite just past the seam is visible");
    }

    #[test]
    fn bob_and_damage_flash_shift_and_tint_the_frame() {
        let mut scene = scene(0.0);
        let level = projector().project(&scene, viewport());
        assert_eq!(level.overlay, None);

        scene.view.bob_offset = 0.1;
        scene.damage_flash = 0.35;
        let shifted = projector().project(&scene, viewport());
        assert!((shifted.walls[4].rect.y - level.walls[4].rect.y - 24.0).abs() < 1e-3);
        assert_eq!(shifted.overlay, Some(Color::new(1.0, 0.0, 0.0, 0.35)));
    }

    #[test]
    fn aiming_narrows_the_field_of_view() {
        let mut scene = scene(0.0);
        let hip = projector().project(&scene, viewport());
        scene.view.aiming = true;
        let aimed = projector().project(&scene, viewport());
        assert!(aimed.walls[0].depth > hip.walls[0].depth);
        assert_eq!(aimed.depth_buffer().len(), 9);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for raw in [-10.0_f32, -PI, 0.0, 3.0, PI, 7.5] {
            let wrapped = wrap_angle(raw);
            assert!((-PI..=PI).contains(&wrapped), "{raw} -> {wrapped}");
            assert!(((wrapped - raw) / TAU - ((wrapped - raw) / TAU).round()).abs() < 1e-4);
        }
    }
}
