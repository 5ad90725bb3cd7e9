//! Pixel buffer with the backing resolution of the stage.

use glam::Vec2;
use line_drawing::{Bresenham, BresenhamCircle};
use rgb::RGBA8;
use smallvec::SmallVec;

use super::{argb_to_rgba, Image, Letterbox, Rect};

/// Simple owned pixel buffer that's passed around to rendering calls.
///
/// All colors are `0xAARRGGBB`, every drawing call also takes an extra alpha factor which is multiplied with the alpha of the color.
pub struct Canvas {
    /// Horizontal amount of pixels.
    width: u32,
    /// Vertical amount of pixels.
    height: u32,
    /// All pixels, row by row.
    buffer: Vec<RGBA8>,
}

impl Canvas {
    /// Create a new transparent canvas.
    #[inline]
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let buffer = vec![RGBA8::default(); width as usize * height as usize];

        Self {
            width,
            height,
            buffer,
        }
    }

    /// Fill the canvas with a single color, ignoring blending.
    #[inline]
    pub fn fill(&mut self, color: u32) {
        self.buffer.fill(argb_to_rgba(color));
    }

    /// Blend a single pixel on the buffer at the coordinate passed.
    ///
    /// If the coordinate is out of bounds nothing will be done.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: RGBA8, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let index = x as usize + y as usize * self.width as usize;
        if let Some(pixel) = self.buffer.get_mut(index) {
            *pixel = blend(*pixel, color, alpha);
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: u32, alpha: f32) {
        let color = argb_to_rgba(color);

        let (start_x, end_x) = self.clamp_span(rect.x, rect.x + rect.width, self.width);
        let (start_y, end_y) = self.clamp_span(rect.y, rect.y + rect.height, self.height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                self.blend_pixel(x as i32, y as i32, color, alpha);
            }
        }
    }

    /// Draw the outline of a rectangle, the thickness grows inwards.
    pub fn draw_rect_outline(&mut self, rect: Rect, thickness: f32, color: u32, alpha: f32) {
        let thickness = thickness.max(1.0).min(rect.width / 2.0).min(rect.height / 2.0);

        // Top & bottom
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, thickness), color, alpha);
        self.fill_rect(
            Rect::new(rect.x, rect.y + rect.height - thickness, rect.width, thickness),
            color,
            alpha,
        );

        // Left & right, without the corners
        let inner_height = rect.height - thickness * 2.0;
        self.fill_rect(
            Rect::new(rect.x, rect.y + thickness, thickness, inner_height),
            color,
            alpha,
        );
        self.fill_rect(
            Rect::new(
                rect.x + rect.width - thickness,
                rect.y + thickness,
                thickness,
                inner_height,
            ),
            color,
            alpha,
        );
    }

    /// Draw a line using Bresenham's line algorithm.
    ///
    /// Thicker lines stamp a square at every step.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: u32, alpha: f32) {
        let rgba = argb_to_rgba(color);

        // PERF: stamping overlaps a lot for thick lines
        for (x, y) in Bresenham::new(
            (start.x as i32, start.y as i32),
            (end.x as i32, end.y as i32),
        ) {
            if thickness <= 1.0 {
                self.blend_pixel(x, y, rgba, alpha);
            } else {
                let half = (thickness / 2.0).floor() as i32;
                let size = thickness.round() as i32;
                for offset_y in 0..size {
                    for offset_x in 0..size {
                        self.blend_pixel(x - half + offset_x, y - half + offset_y, rgba, alpha);
                    }
                }
            }
        }
    }

    /// Fill a circle, a pixel is filled when its center lies inside.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        self.fill_ring(center, radius, 0.0, color, alpha);
    }

    /// Draw the outline of a circle, the thickness grows inwards.
    pub fn draw_circle_outline(
        &mut self,
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: u32,
        alpha: f32,
    ) {
        if thickness <= 1.0 {
            let rgba = argb_to_rgba(color);
            for (x, y) in BresenhamCircle::new(center.x as i32, center.y as i32, radius as i32) {
                self.blend_pixel(x, y, rgba, alpha);
            }
        } else {
            self.fill_ring(center, radius, (radius - thickness).max(0.0), color, alpha);
        }
    }

    /// Fill a polygon with the even-odd rule.
    ///
    /// Polygons with less than 3 points draw nothing.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: u32, alpha: f32) {
        if points.len() < 3 {
            return;
        }

        let rgba = argb_to_rgba(color);

        // Only walk the rows the polygon covers
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), point| {
                (min.min(point.y), max.max(point.y))
            });
        let (start_y, end_y) = self.clamp_span(min_y, max_y, self.height);

        for y in start_y..end_y {
            // Sample in the center of the pixel row
            let sample_y = y as f32 + 0.5;

            // Find where every edge crosses the row
            let mut crossings: SmallVec<[f32; 16]> = SmallVec::new();
            for (index, start) in points.iter().enumerate() {
                let end = points[(index + 1) % points.len()];
                if (start.y <= sample_y && end.y > sample_y)
                    || (end.y <= sample_y && start.y > sample_y)
                {
                    let factor = (sample_y - start.y) / (end.y - start.y);
                    crossings.push((end.x - start.x).mul_add(factor, start.x));
                }
            }
            crossings.sort_unstable_by(f32::total_cmp);

            // Fill between every pair of crossings
            for pair in crossings.chunks_exact(2) {
                let start_x = (pair[0] - 0.5).ceil().max(0.0) as i32;
                let end_x = ((pair[1] - 0.5).ceil().max(0.0) as i32).min(self.width as i32);
                for x in start_x..end_x {
                    self.blend_pixel(x, y as i32, rgba, alpha);
                }
            }
        }
    }

    /// Draw the closed outline of a polygon.
    pub fn draw_polygon_outline(&mut self, points: &[Vec2], thickness: f32, color: u32, alpha: f32) {
        for (index, start) in points.iter().enumerate() {
            let end = points[(index + 1) % points.len()];
            self.draw_line(*start, end, thickness, color, alpha);
        }
    }

    /// Draw part of an image scaled into a target rectangle with nearest-neighbor sampling.
    ///
    /// # Arguments
    ///
    /// * `image` - Pixels to copy.
    /// * `source` - Rectangle on the image to copy, in image pixels.
    /// * `target` - Rectangle on the canvas to copy into.
    /// * `alpha` - Transparency multiplied with the pixels of the image.
    pub fn blit(&mut self, image: &Image, source: Rect, target: Rect, alpha: f32) {
        if target.width <= 0.0 || target.height <= 0.0 {
            return;
        }

        let scale_x = source.width / target.width;
        let scale_y = source.height / target.height;

        let (start_x, end_x) = self.clamp_span(target.x, target.x + target.width, self.width);
        let (start_y, end_y) = self.clamp_span(target.y, target.y + target.height, self.height);

        // Rounded spans can reach half a pixel outside of the target, never sample outside of the source
        let last_x = (source.x + source.width - 1.0).max(source.x);
        let last_y = (source.y + source.height - 1.0).max(source.y);

        for y in start_y..end_y {
            let source_y = (source.y + (y as f32 + 0.5 - target.y) * scale_y).clamp(source.y, last_y);
            for x in start_x..end_x {
                let source_x = (source.x + (x as f32 + 0.5 - target.x) * scale_x).clamp(source.x, last_x);

                if let Some(pixel) = image.pixel(source_x as u32, source_y as u32) {
                    self.blend_pixel(x as i32, y as i32, pixel, alpha);
                }
            }
        }
    }

    /// Copy the canvas into a window sized RGBA frame, scaled to fit inside the letterbox.
    ///
    /// Everything outside of the letterbox gets the viewport color.
    pub fn present(
        &self,
        frame: &mut [u8],
        frame_width: u32,
        frame_height: u32,
        letterbox: &Letterbox,
        viewport_color: u32,
    ) {
        let viewport = argb_to_rgba(viewport_color);
        let scale = letterbox.scale();

        // Precompute which canvas column every frame column samples
        let columns = (0..frame_width)
            .map(|x| {
                let local = (x as f32 + 0.5 - letterbox.x) / scale;
                (local >= 0.0 && local < self.width as f32).then_some(local as usize)
            })
            .collect::<Vec<_>>();

        for (y, row) in frame
            .chunks_exact_mut(frame_width as usize * 4)
            .take(frame_height as usize)
            .enumerate()
        {
            let local_y = (y as f32 + 0.5 - letterbox.y) / scale;
            let source_row = (!letterbox.is_empty() && local_y >= 0.0 && local_y < self.height as f32)
                .then(|| local_y as usize * self.width as usize);

            for (target, column) in row.chunks_exact_mut(4).zip(columns.iter()) {
                let pixel = match (source_row, column) {
                    (Some(row_index), Some(column)) => self.buffer[row_index + column],
                    _ => viewport,
                };

                target[0] = pixel.r;
                target[1] = pixel.g;
                target[2] = pixel.b;
                target[3] = 0xFF;
            }
        }
    }

    /// Pixel at a coordinate, `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.buffer
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Drawing helpers.
impl Canvas {
    /// Fill every pixel whose center lies between two radii.
    fn fill_ring(&mut self, center: Vec2, outer: f32, inner: f32, color: u32, alpha: f32) {
        let rgba = argb_to_rgba(color);

        let (start_x, end_x) = self.clamp_span(center.x - outer, center.x + outer, self.width);
        let (start_y, end_y) = self.clamp_span(center.y - outer, center.y + outer, self.height);

        let outer_squared = outer * outer;
        let inner_squared = inner * inner;

        for y in start_y..end_y {
            for x in start_x..end_x {
                let distance_squared =
                    Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance_squared(center);
                if distance_squared <= outer_squared
                    && (inner <= 0.0 || distance_squared >= inner_squared)
                {
                    self.blend_pixel(x as i32, y as i32, rgba, alpha);
                }
            }
        }
    }

    /// Round a floating range to pixel indices clamped to the size.
    #[allow(clippy::unused_self)]
    fn clamp_span(&self, start: f32, end: f32, size: u32) -> (u32, u32) {
        let start = (start.round().max(0.0) as u32).min(size);
        let end = (end.round().max(0.0) as u32).min(size);

        (start, end)
    }
}

/// Blend a color with straight alpha on top of another one.
fn blend(target: RGBA8, source: RGBA8, alpha: f32) -> RGBA8 {
    let factor = (f32::from(source.a) / 255.0 * alpha).clamp(0.0, 1.0);
    if factor <= 0.0 {
        return target;
    }
    if factor >= 1.0 {
        return RGBA8::new(source.r, source.g, source.b, 0xFF);
    }

    let mix = |source: u8, target: u8| {
        (f32::from(source) - f32::from(target))
            .mul_add(factor, f32::from(target))
            .round() as u8
    };
    let coverage = f32::from(target.a).mul_add(1.0 - factor, factor * 255.0);

    RGBA8::new(
        mix(source.r, target.r),
        mix(source.g, target.g),
        mix(source.b, target.b),
        coverage.round().clamp(0.0, 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rgb::RGBA8;

    use super::Canvas;
    use crate::graphics::{Image, Letterbox, Rect};

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(-2.0, -2.0, 4.0, 4.0), 0xFFFF0000, 1.0);

        assert_eq!(canvas.pixel(0, 0), Some(RGBA8::new(0xFF, 0, 0, 0xFF)));
        assert_eq!(canvas.pixel(1, 1), Some(RGBA8::new(0xFF, 0, 0, 0xFF)));
        assert_eq!(canvas.pixel(2, 2), Some(RGBA8::default()));
    }

    #[test]
    fn translucent_fill_blends() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(0xFFFFFFFF);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0xFF000000, 0.4);

        let pixel = canvas.pixel(0, 0).unwrap();
        assert_eq!(pixel.r, 153);
        assert_eq!(pixel.a, 0xFF);
    }

    #[test]
    fn polygon_fill_covers_inside_only() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 10.0),
            ],
            0xFFFFFFFF,
            1.0,
        );

        assert_eq!(canvas.pixel(1, 1).unwrap().a, 0xFF);
        assert_eq!(canvas.pixel(9, 9).unwrap().a, 0);
    }

    #[test]
    fn blit_scales_with_nearest_neighbor() {
        let mut pixels = vec![RGBA8::new(0, 0, 0, 0xFF); 4];
        pixels[1] = RGBA8::new(0xFF, 0xFF, 0xFF, 0xFF);
        let image = Image::new(2, 2, pixels).unwrap();

        let mut canvas = Canvas::new(4, 4);
        canvas.blit(
            &image,
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            1.0,
        );

        // Top-right quadrant comes from the white pixel
        assert_eq!(canvas.pixel(3, 0).unwrap().r, 0xFF);
        assert_eq!(canvas.pixel(2, 1).unwrap().r, 0xFF);
        assert_eq!(canvas.pixel(1, 0).unwrap().r, 0);
        assert_eq!(canvas.pixel(3, 3).unwrap().r, 0);
    }

    #[test]
    fn blit_at_half_pixel_stays_inside_frame() {
        // Two frames of 2x1 pixels, black and white
        let black = RGBA8::new(0, 0, 0, 0xFF);
        let white = RGBA8::new(0xFF, 0xFF, 0xFF, 0xFF);
        let image = Image::new(4, 1, vec![black, black, white, white]).unwrap();

        let mut canvas = Canvas::new(4, 1);
        canvas.blit(
            &image,
            Rect::new(0.0, 0.0, 2.0, 1.0),
            Rect::new(0.5, 0.0, 2.0, 1.0),
            1.0,
        );

        assert_eq!(canvas.pixel(1, 0), Some(black));
        assert_eq!(canvas.pixel(2, 0), Some(black));
        assert_eq!(canvas.pixel(3, 0), Some(RGBA8::default()));
    }

    #[test]
    fn present_draws_bars() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(0xFFFFFFFF);

        // Window twice as wide as the stage
        let letterbox = Letterbox::fit(2.0, 2.0, 4.0, 2.0);
        let mut frame = vec![0; 4 * 2 * 4];
        canvas.present(&mut frame, 4, 2, &letterbox, 0xFF000000);

        // Left bar, stage, stage, right bar
        assert_eq!(&frame[0..4], &[0, 0, 0, 0xFF]);
        assert_eq!(&frame[4..8], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&frame[8..12], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&frame[12..16], &[0, 0, 0, 0xFF]);
    }
}
