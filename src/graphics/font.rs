//! Split a horizontal image of equal size glyph cells into a font.

use glam::Vec2;
use serde::Deserialize;

use super::{Canvas, Image, Rect};
use crate::{
    assets::loader::{png::PngLoader, toml::TomlLoader, Loader},
    error::{Error, Result},
};

/// Glyph sheet of the font every label uses.
const BUILTIN_IMAGE: &[u8] = include_bytes!("../../assets/font.png");
/// Metadata of the font every label uses.
const BUILTIN_METADATA: &[u8] = include_bytes!("../../assets/font.toml");

/// Monospaced bitmap font.
///
/// Glyphs are drawn by stamping a scaled square for every opaque pixel of the glyph cell.
#[derive(Debug)]
pub struct Font {
    /// Horizontal strip with all glyphs.
    sheet: Image,
    /// Size of a single glyph cell.
    glyph_size: Vec2,
    /// Start char ASCII value.
    first_char: usize,
    /// End char ASCII value.
    last_char: usize,
}

impl Font {
    /// Load the font embedded in the binary.
    ///
    /// # Errors
    ///
    /// - When the embedded glyph sheet or metadata can't be decoded.
    pub fn builtin() -> Result<Self> {
        let sheet = PngLoader::load(BUILTIN_IMAGE, "font.png")?;
        let metadata: FontMetadata = TomlLoader::load(BUILTIN_METADATA, "font.toml")?;

        Self::from_parts(sheet, metadata)
    }

    /// Construct the font from an already decoded glyph sheet.
    ///
    /// # Errors
    ///
    /// - When the amount of glyph cells in the image doesn't match the character range.
    pub fn from_parts(sheet: Image, metadata: FontMetadata) -> Result<Self> {
        let FontMetadata {
            glyph_width,
            glyph_height,
            first_char,
            last_char,
        } = metadata;

        // Convert types used in calculations
        let first_char = first_char as usize;
        let last_char = last_char as usize;

        let glyphs = sheet.width() / u32::from(glyph_width.max(1));
        if last_char < first_char || glyphs as usize != last_char - first_char + 1 {
            return Err(Error::load(
                "font.png",
                format!(
                    "font not properly defined, {glyphs} glyphs in image for {} characters",
                    (last_char + 1).saturating_sub(first_char)
                ),
            ));
        }

        Ok(Self {
            sheet,
            glyph_size: Vec2::new(f32::from(glyph_width), f32::from(glyph_height)),
            first_char,
            last_char,
        })
    }

    /// Draw text on the canvas.
    ///
    /// # Arguments
    ///
    /// * `canvas` - Target to draw on.
    /// * `position` - Top-left corner of the first glyph.
    /// * `text` - Text to draw, `'\n'` starts a new line.
    /// * `size` - Height of a glyph cell in pixels.
    /// * `color` - Color of the glyphs in `0xAARRGGBB`.
    /// * `alpha` - Extra transparency.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        position: Vec2,
        text: &str,
        size: f32,
        color: u32,
        alpha: f32,
    ) {
        let scale = self.scale(size);
        let advance = self.glyph_size * scale;

        let mut cursor = position;
        for ch in text.chars() {
            if ch == '\n' {
                cursor.x = position.x;
                cursor.y += advance.y;
                continue;
            }

            // Characters that are not in the image are drawn as spaces
            if let Some(glyph) = self.glyph_index(ch) {
                self.draw_glyph(canvas, glyph, cursor, scale, color, alpha);
            }

            cursor.x += advance.x;
        }
    }

    /// Size of the text when drawn with a glyph cell height.
    #[must_use]
    pub fn measure(&self, text: &str, size: f32) -> Vec2 {
        let scale = self.scale(size);

        let lines = text.lines().count().max(1);
        let columns = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        Vec2::new(columns as f32, lines as f32) * self.glyph_size * scale
    }

    /// Multiplier for a glyph cell to be `size` pixels high.
    #[inline]
    fn scale(&self, size: f32) -> f32 {
        size / self.glyph_size.y
    }

    /// Offset of the glyph cell in the image.
    #[inline]
    fn glyph_index(&self, ch: char) -> Option<usize> {
        let index = ch as usize;

        (self.first_char..=self.last_char)
            .contains(&index)
            .then(|| index - self.first_char)
    }

    /// Stamp all opaque pixels of a single glyph.
    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        glyph: usize,
        position: Vec2,
        scale: f32,
        color: u32,
        alpha: f32,
    ) {
        let cell_x = glyph as u32 * self.glyph_size.x as u32;

        for y in 0..self.glyph_size.y as u32 {
            for x in 0..self.glyph_size.x as u32 {
                let Some(pixel) = self.sheet.pixel(cell_x + x, y) else {
                    continue;
                };
                if pixel.a == 0 {
                    continue;
                }

                canvas.fill_rect(
                    Rect::new(
                        (x as f32).mul_add(scale, position.x),
                        (y as f32).mul_add(scale, position.y),
                        scale,
                        scale,
                    ),
                    color,
                    alpha * f32::from(pixel.a) / 255.0,
                );
            }
        }
    }
}

/// Font metadata to load from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontMetadata {
    /// Width of a single glyph cell.
    pub glyph_width: u16,
    /// Height of a single glyph cell.
    pub glyph_height: u16,
    /// First character in the image.
    #[serde(default = "FontMetadata::default_first_char")]
    pub first_char: char,
    /// Last character in the image.
    #[serde(default = "FontMetadata::default_last_char")]
    pub last_char: char,
}

impl FontMetadata {
    /// Default for the `first_char` field.
    #[inline]
    fn default_first_char() -> char {
        ' '
    }

    /// Default for the `last_char` field.
    #[inline]
    fn default_last_char() -> char {
        '~'
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rgb::RGBA8;

    use super::{Font, FontMetadata};
    use crate::graphics::{Canvas, Image};

    /// Two 2x2 glyphs, 'A' is fully opaque and 'B' only has the top-left pixel set.
    fn tiny_font() -> Font {
        let on = RGBA8::new(0xFF, 0xFF, 0xFF, 0xFF);
        let off = RGBA8::default();
        let sheet = Image::new(4, 2, vec![on, on, on, off, on, on, off, off]).unwrap();

        Font::from_parts(
            sheet,
            FontMetadata {
                glyph_width: 2,
                glyph_height: 2,
                first_char: 'A',
                last_char: 'B',
            },
        )
        .unwrap()
    }

    #[test]
    fn builtin_font_loads() {
        let font = Font::builtin().unwrap();

        assert!(font.measure("PAUSE", 64.0).x > 0.0);
    }

    #[test]
    fn mismatched_metadata_is_rejected() {
        let sheet = Image::filled(4, 2, RGBA8::default());

        assert!(Font::from_parts(
            sheet,
            FontMetadata {
                glyph_width: 2,
                glyph_height: 2,
                first_char: 'A',
                last_char: 'Z',
            },
        )
        .is_err());
    }

    #[test]
    fn measure_scales_with_size() {
        let font = tiny_font();

        assert_eq!(font.measure("AB", 2.0), Vec2::new(4.0, 2.0));
        assert_eq!(font.measure("AB\nA", 4.0), Vec2::new(8.0, 8.0));
    }

    #[test]
    fn draws_scaled_glyphs() {
        let font = tiny_font();
        let mut canvas = Canvas::new(8, 4);
        font.draw(&mut canvas, Vec2::ZERO, "AB", 4.0, 0xFFFF0000, 1.0);

        // 'A' covers its full cell
        assert_eq!(canvas.pixel(3, 3).unwrap().r, 0xFF);
        // Only the top-left quarter of 'B'
        assert_eq!(canvas.pixel(4, 0).unwrap().r, 0xFF);
        assert_eq!(canvas.pixel(6, 2).unwrap().a, 0);
    }

    #[test]
    fn unknown_characters_advance() {
        let font = tiny_font();
        let mut canvas = Canvas::new(6, 2);
        font.draw(&mut canvas, Vec2::ZERO, "?A", 2.0, 0xFFFFFFFF, 1.0);

        assert_eq!(canvas.pixel(0, 0).unwrap().a, 0);
        assert_eq!(canvas.pixel(2, 0).unwrap().a, 0xFF);
    }
}
