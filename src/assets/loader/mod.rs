//! Decode raw asset bytes into usable types.

pub mod png;
pub mod sound;
pub mod toml;

use crate::error::Result;

/// How an asset should be loaded.
pub trait Loader<T> {
    /// Extensions for the files that this loader loads, without the leading `'.'`.
    const EXTENSIONS: &'static [&'static str];

    /// Load an asset from raw bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw contents of the file.
    /// * `path` - Path of the asset, only used for reporting.
    ///
    /// # Errors
    ///
    /// - When the bytes can't be decoded into the type.
    fn load(bytes: &[u8], path: &str) -> Result<T>;

    /// Whether this loader can load a file with the extension.
    #[inline]
    #[must_use]
    fn supports(extension: &str) -> bool {
        Self::EXTENSIONS
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(extension))
    }
}
