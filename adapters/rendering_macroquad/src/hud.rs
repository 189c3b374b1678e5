//! Immediate-mode drawing of projected frames and the overlays above them.
//!
//! All macroquad drawing calls live here so the backend loop stays free of
//! layout arithmetic.

use last_stand_core::{CellCoord, CellKind, GridMap, HudSnapshot};
use last_stand_rendering::{Color, Frame, Rect, Scene};
use macroquad::{
    shapes::{draw_circle, draw_line, draw_rectangle},
    text::{draw_text, measure_text},
};

const HUD_FONT_SIZE: f32 = 22.0;
const BANNER_FONT_SIZE: f32 = 48.0;
const MINIMAP_WIDTH: f32 = 180.0;
const MINIMAP_MARGIN: f32 = 12.0;

const TEXT: Color = Color::from_rgb_u8(0xee, 0xee, 0xee);
const HITMARKER: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
const MINIMAP_WALL: Color = Color::from_rgb_u8(0x44, 0x44, 0x44);
const MINIMAP_DOOR: Color = Color::from_rgb_u8(0x88, 0x88, 0x88);
const MINIMAP_PLAYER: Color = Color::from_rgb_u8(0x00, 0xaa, 0xff);
const MINIMAP_ENEMY: Color = Color::from_rgb_u8(0x77, 0xff, 0x77);
const MINIMAP_GRENADE: Color = Color::from_rgb_u8(0xff, 0xaa, 0x33);
const DEFEAT_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.7);
const DEFEAT_TEXT: Color = Color::from_rgb_u8(0xff, 0x44, 0x44);

/// Paints a projected frame in painter's order.
pub(crate) fn draw_frame(frame: &Frame) {
    fill(frame.ceiling.rect, frame.ceiling.color);
    fill(frame.floor.rect, frame.floor.color);
    for wall in &frame.walls {
        fill(wall.rect, wall.color);
    }
    for sprite in &frame.sprites {
        fill(sprite.rect, sprite.color);
    }
    if let Some(overlay) = frame.overlay {
        let viewport = frame.viewport;
        fill(
            Rect::new(0.0, 0.0, viewport.width(), viewport.height()),
            overlay,
        );
    }
}

/// Draws the crosshair, status line, banner and interaction prompt.
pub(crate) fn draw_hud(hud: &HudSnapshot, screen_width: f32, screen_height: f32) {
    let centre_x = screen_width / 2.0;
    let centre_y = screen_height / 2.0;

    let arm = if hud.aiming { 5.0 } else { 8.0 };
    let crosshair = to_macroquad_color(TEXT);
    draw_line(centre_x - arm, centre_y, centre_x + arm, centre_y, 1.5, crosshair);
    draw_line(centre_x, centre_y - arm, centre_x, centre_y + arm, 1.5, crosshair);

    if hud.hitmarker {
        let marker = to_macroquad_color(HITMARKER);
        for (dx, dy) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            draw_line(
                centre_x + dx * 6.0,
                centre_y + dy * 6.0,
                centre_x + dx * 12.0,
                centre_y + dy * 12.0,
                2.0,
                marker,
            );
        }
    }

    draw_text(
        &status_line(hud),
        16.0,
        screen_height - 20.0,
        HUD_FONT_SIZE,
        to_macroquad_color(TEXT),
    );

    if let Some(banner) = &hud.banner {
        draw_centred(banner, centre_x, screen_height * 0.25, BANNER_FONT_SIZE, TEXT);
    }
    if let Some(prompt) = &hud.prompt {
        draw_centred(prompt, centre_x, screen_height * 0.7, HUD_FONT_SIZE, TEXT);
    }
    if hud.paused {
        draw_centred("Paused", centre_x, centre_y - 40.0, BANNER_FONT_SIZE, TEXT);
    }
}

/// Draws the top-down map in the top-right corner.
pub(crate) fn draw_minimap(scene: &Scene, screen_width: f32) {
    let grid = &scene.grid;
    let Some(scale) = minimap_scale(grid) else {
        return;
    };
    let origin_x = screen_width - MINIMAP_WIDTH - MINIMAP_MARGIN;
    let origin_y = MINIMAP_MARGIN;

    let wall = to_macroquad_color(MINIMAP_WALL);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            if grid.cell_kind(cell) == Some(CellKind::Wall) {
                draw_rectangle(
                    origin_x + column as f32 * scale,
                    origin_y + row as f32 * scale,
                    scale,
                    scale,
                    wall,
                );
            }
        }
    }

    if let Some(door) = grid.door().filter(|door| !door.is_open()) {
        draw_rectangle(
            origin_x + door.cell().column() as f32 * scale,
            origin_y + door.cell().row() as f32 * scale,
            scale,
            scale,
            to_macroquad_color(MINIMAP_DOOR),
        );
    }

    let player = scene.view.position;
    draw_circle(
        origin_x + player.x * scale,
        origin_y + player.y * scale,
        3.0,
        to_macroquad_color(MINIMAP_PLAYER),
    );

    let enemy = to_macroquad_color(MINIMAP_ENEMY);
    for sprite in &scene.enemies {
        draw_rectangle(
            origin_x + sprite.position.x * scale - 2.0,
            origin_y + sprite.position.y * scale - 2.0,
            4.0,
            4.0,
            enemy,
        );
    }
    let grenade = to_macroquad_color(MINIMAP_GRENADE);
    for position in &scene.projectiles {
        draw_rectangle(
            origin_x + position.x * scale - 2.0,
            origin_y + position.y * scale - 2.0,
            4.0,
            4.0,
            grenade,
        );
    }
}

/// Darkens the screen and announces the player's defeat.
pub(crate) fn draw_defeat_overlay(screen_width: f32, screen_height: f32) {
    fill(
        Rect::new(0.0, 0.0, screen_width, screen_height),
        DEFEAT_SHADE,
    );
    draw_centred(
        "You Died",
        screen_width / 2.0,
        screen_height / 2.0,
        BANNER_FONT_SIZE,
        DEFEAT_TEXT,
    );
}

/// One-line summary of the player's vitals and inventory.
pub(crate) fn status_line(hud: &HudSnapshot) -> String {
    format!(
        "HP {:>3.0}%  STA {:>3.0}%  {} {}/{}  Grenades {}  Wave {}  ${}",
        hud.health_fraction * 100.0,
        hud.stamina_fraction * 100.0,
        hud.weapon,
        hud.magazine,
        hud.reserve,
        hud.grenades,
        hud.wave,
        hud.currency,
    )
}

fn minimap_scale(grid: &GridMap) -> Option<f32> {
    (grid.columns() > 0).then(|| MINIMAP_WIDTH / grid.columns() as f32)
}

fn draw_centred(text: &str, centre_x: f32, baseline: f32, font_size: f32, color: Color) {
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        centre_x - dimensions.width / 2.0,
        baseline,
        font_size,
        to_macroquad_color(color),
    );
}

fn fill(rect: Rect, color: Color) {
    draw_rectangle(
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        to_macroquad_color(color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
