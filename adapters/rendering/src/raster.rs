//! Software rasteriser turning frames into RGBA pixels.

use crate::{Color, Frame, Rect, RenderingError};

/// Row-major RGBA pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl FrameBuffer {
    /// Allocates an opaque black buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderingError> {
        if width == 0 || height == 0 {
            return Err(RenderingError::InvalidViewport {
                width: width as f32,
                height: height as f32,
            });
        }

        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; len],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, if inside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Draws `frame` over the whole buffer in painter's order.
    pub fn rasterize(&mut self, frame: &Frame) {
        self.fill_rect(frame.ceiling.rect, frame.ceiling.color);
        self.fill_rect(frame.floor.rect, frame.floor.color);
        for wall in &frame.walls {
            self.fill_rect(wall.rect, wall.color);
        }
        for sprite in &frame.sprites {
            self.fill_rect(sprite.rect, sprite.color);
        }
        if let Some(overlay) = frame.overlay {
            let everything = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
            self.fill_rect(everything, overlay);
        }
    }

    /// Blends `color` over every pixel whose centre lies inside `rect`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((left, right)) = span(rect.x, rect.width, self.width) else {
            return;
        };
        let Some((top, bottom)) = span(rect.y, rect.height, self.height) else {
            return;
        };

        let source = color.to_rgba8();
        let width = self.width as usize;
        for y in top..bottom {
            let row = y as usize * width;
            for x in left..right {
                let pixel = &mut self.pixels[row + x as usize];
                *pixel = blend(*pixel, source);
            }
        }
    }
}

/// Pixel range `[start, end)` covered along one axis, clipped to `limit`.
fn span(origin: f32, extent: f32, limit: u32) -> Option<(u32, u32)> {
    if !(origin.is_finite() && extent.is_finite()) || extent <= 0.0 {
        return None;
    }

    let start = (origin - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    let end = (origin + extent - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    (start < end).then_some((start, end))
}

fn blend(destination: [u8; 4], source: [u8; 4]) -> [u8; 4] {
    let alpha = u32::from(source[3]);
    if alpha == 255 {
        return source;
    }

    let mix = |dst: u8, src: u8| -> u8 {
        ((u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255) as u8
    };
    [
        mix(destination[0], source[0]),
        mix(destination[1], source[1]),
        mix(destination[2], source[2]),
        destination[3].max(source[3]),
    ]
}
