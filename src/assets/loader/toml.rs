//! TOML asset loading.

use serde::de::DeserializeOwned;

use super::Loader;
use crate::error::{Error, Result};

/// TOML asset loader for any deserializable type.
#[non_exhaustive]
pub struct TomlLoader;

impl<T> Loader<T> for TomlLoader
where
    T: DeserializeOwned,
{
    const EXTENSIONS: &'static [&'static str] = &["toml"];

    fn load(bytes: &[u8], path: &str) -> Result<T> {
        // Convert raw bytes to a valid UTF-8 string
        let string = std::str::from_utf8(bytes).map_err(|err| Error::load(path, err))?;

        toml::from_str::<T>(string).map_err(|err| Error::load(path, err))
    }
}
