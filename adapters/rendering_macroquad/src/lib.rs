#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Last Stand.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Sound cues are therefore routed through the
//! simulation's audio seam rather than played here.

mod hud;
mod input;

use anyhow::{Context, Result};
use glam::Vec2;
use last_stand_rendering::{
    FrameInput, Presentation, Projector, RenderingBackend, Scene, Viewport,
};
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, mouse_position, set_cursor_grab,
    show_mouse, KeyCode, MouseButton,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

#[doc(hidden)]
pub use input::{InputCapture, InputObservations};

use input::CursorGrab;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` quits the game loop.
    quit_requested: bool,
    /// `Escape` toggles the pause.
    pause: bool,
    /// `R` requests a reload.
    reload: bool,
    /// `G` throws a grenade.
    grenade: bool,
    /// `E` interacts with the nearest fixture.
    interact: bool,
    /// `F` toggles aiming down sights.
    aim_toggle: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Q),
            pause: is_key_pressed(KeyCode::Escape),
            reload: is_key_pressed(KeyCode::R),
            grenade: is_key_pressed(KeyCode::G),
            interact: is_key_pressed(KeyCode::E),
            aim_toggle: is_key_pressed(KeyCode::F),
        }
    }
}

fn observe(keyboard: KeyboardShortcuts, frame_seconds: f32) -> InputObservations {
    let (cursor_x, cursor_y) = mouse_position();
    InputObservations {
        forward: is_key_down(KeyCode::W),
        back: is_key_down(KeyCode::S),
        left: is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::D),
        sprint: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        turn_left: is_key_down(KeyCode::Left),
        turn_right: is_key_down(KeyCode::Right),
        cursor: Vec2::new(cursor_x, cursor_y),
        fire_down: is_mouse_button_down(MouseButton::Left),
        aim_down: is_mouse_button_down(MouseButton::Right),
        aim_toggle_pressed: keyboard.aim_toggle,
        reload_pressed: keyboard.reload,
        grenade_pressed: keyboard.grenade,
        interact_pressed: keyboard.interact,
        pause_pressed: keyboard.pause,
        frame_seconds,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Time spent in each phase of a rendered frame.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: self.update_accum / frames.max(1),
            avg_render: self.render_accum / frames.max(1),
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
            projection,
        } = presentation;

        let projector = Projector::new(projection).context("invalid projection configuration")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 600,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = macroquad::color::Color::new(
                clear_color.red,
                clear_color.green,
                clear_color.blue,
                clear_color.alpha,
            );
            let mut fps_counter = FpsCounter::default();
            let mut capture = InputCapture::default();
            let mut cursor = CursorGrab::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    log::info!("quit requested");
                    break;
                }

                if let Some(grabbed) = cursor.update(!scene.hud.paused && !scene.hud.defeated) {
                    set_cursor_grab(grabbed);
                    show_mouse(!grabbed);
                    capture.reset_look();
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let player = capture.sample(observe(keyboard, dt_seconds));

                let update_start = Instant::now();
                update_scene(frame_dt, FrameInput { player }, &mut scene);
                let update_duration = update_start.elapsed();

                let render_start = Instant::now();
                if let Ok(viewport) = Viewport::new(screen_width, screen_height) {
                    hud::draw_frame(&projector.project(&scene, viewport));
                }
                hud::draw_minimap(&scene, screen_width);
                hud::draw_hud(&scene.hud, screen_width, screen_height);
                if scene.hud.defeated {
                    hud::draw_defeat_overlay(screen_width, screen_height);
                }
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}
