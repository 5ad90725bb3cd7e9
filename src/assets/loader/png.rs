//! PNG asset loading.

use std::io::Cursor;

use png::{BitDepth, ColorType, Decoder, Transformations};
use rgb::{FromSlice, RGBA8};

use super::Loader;
use crate::{
    error::{Error, Result},
    graphics::Image,
};

/// PNG asset loader.
///
/// Every supported PNG is converted to 8 bit RGBA pixels.
#[non_exhaustive]
pub struct PngLoader;

impl Loader<Image> for PngLoader {
    const EXTENSIONS: &'static [&'static str] = &["png"];

    fn load(bytes: &[u8], path: &str) -> Result<Image> {
        // Decode the PNG
        let mut decoder = Decoder::new(Cursor::new(bytes));

        // Discard text chunks
        decoder.set_ignore_text_chunk(true);

        // Convert indexed and RGB images to RGBA
        decoder
            .set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

        // Start parsing the PNG
        let mut reader = decoder.read_info().map_err(|err| Error::load(path, err))?;

        // Read the PNG
        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .map_err(|err| Error::load(path, err))?;
        buffer.truncate(info.buffer_size());

        // Must be 8 bit after the transformations
        if info.bit_depth != BitDepth::Eight {
            return Err(Error::load(path, "PNG is not 8 bit after normalization"));
        }

        let pixels = match info.color_type {
            ColorType::Rgba => buffer.as_rgba().to_vec(),
            // Grayscale images only get an alpha channel added
            ColorType::GrayscaleAlpha => buffer
                .chunks_exact(2)
                .map(|gray_alpha| {
                    RGBA8::new(gray_alpha[0], gray_alpha[0], gray_alpha[0], gray_alpha[1])
                })
                .collect(),
            other => {
                return Err(Error::load(
                    path,
                    format!("unsupported PNG color type {other:?}"),
                ))
            }
        };

        Image::new(info.width, info.height, pixels)
            .ok_or_else(|| Error::load(path, "PNG pixel data doesn't match its size"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use png::{BitDepth, ColorType, Encoder};
    use rgb::RGBA8;

    use super::PngLoader;
    use crate::assets::loader::Loader;

    /// Encode raw pixel data as a PNG in memory.
    pub(crate) fn encode(width: u32, height: u32, color_type: ColorType, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }

        bytes
    }

    #[test]
    fn rgba() {
        let bytes = encode(2, 1, ColorType::Rgba, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let image = PngLoader::load(&bytes, "test.png").unwrap();

        assert_eq!(image.width(), 2);
        assert_eq!(image.pixel(1, 0), Some(RGBA8::new(5, 6, 7, 8)));
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let bytes = encode(1, 1, ColorType::Rgb, &[10, 20, 30]);
        let image = PngLoader::load(&bytes, "test.png").unwrap();

        assert_eq!(image.pixel(0, 0), Some(RGBA8::new(10, 20, 30, 0xFF)));
    }

    #[test]
    fn grayscale() {
        let bytes = encode(1, 1, ColorType::Grayscale, &[42]);
        let image = PngLoader::load(&bytes, "test.png").unwrap();

        assert_eq!(image.pixel(0, 0), Some(RGBA8::new(42, 42, 42, 0xFF)));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(PngLoader::load(b"not a png", "broken.png").is_err());
    }
}
