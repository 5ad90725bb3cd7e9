//! Audio asset loading.

use std::io::Cursor;

use kira::sound::static_sound::StaticSoundData;

use super::Loader;
use crate::error::{Error, Result};

/// Audio asset loader, decoding happens completely up front.
#[non_exhaustive]
pub struct SoundLoader;

impl Loader<StaticSoundData> for SoundLoader {
    const EXTENSIONS: &'static [&'static str] = &["ogg", "mp3", "wav"];

    #[inline]
    fn load(bytes: &[u8], path: &str) -> Result<StaticSoundData> {
        // Allocate the bytes into a cursor
        let bytes = Cursor::new(bytes.to_vec());

        // Parse the sound file
        StaticSoundData::from_cursor(bytes).map_err(|err| Error::load(path, err))
    }
}
