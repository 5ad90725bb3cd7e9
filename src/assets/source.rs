//! Where assets are retrieved from.

use std::{borrow::Cow, path::PathBuf};

use super::loader::Loader;
use crate::error::{Error, Result};

/// Directory assets are read from when they're not embedded.
pub const DEFAULT_RUNTIME_DIR: &str = "assets";

/// Source of all assets.
///
/// Embedded assets are always tried first, the runtime directory is only read when nothing is embedded for a path.
#[derive(Debug, Clone, Default)]
pub struct AssetSource {
    /// Path to the directory of all assets.
    ///
    /// Not set on the web, because there's no filesystem to read from.
    runtime_asset_dir: Option<PathBuf>,
    /// Assets directly embedded into the binary.
    embedded_assets: &'static [EmbeddedRawAsset],
}

impl AssetSource {
    /// Create an empty source that can't load anything.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runtime_asset_dir: None,
            embedded_assets: &[],
        }
    }

    /// Source matching the platform and enabled features.
    ///
    /// On the web and with the `embed-assets` feature all game assets are embedded, otherwise they are read from [`DEFAULT_RUNTIME_DIR`].
    #[inline]
    #[must_use]
    pub fn platform() -> Self {
        #[cfg(any(target_arch = "wasm32", feature = "embed-assets"))]
        let source = Self::new().with_embedded_assets(super::EMBEDDED_ASSETS);
        #[cfg(not(any(target_arch = "wasm32", feature = "embed-assets")))]
        let source = Self::new().with_runtime_dir(DEFAULT_RUNTIME_DIR);

        source
    }

    /// Set a runtime asset directory where assets can be loaded from.
    #[inline]
    #[must_use]
    pub fn with_runtime_dir(mut self, runtime_asset_dir: impl Into<PathBuf>) -> Self {
        self.runtime_asset_dir = Some(runtime_asset_dir.into());

        self
    }

    /// Embed raw assets into the source.
    #[inline]
    #[must_use]
    pub const fn with_embedded_assets(
        mut self,
        embedded_assets: &'static [EmbeddedRawAsset],
    ) -> Self {
        self.embedded_assets = embedded_assets;

        self
    }

    /// Load an asset with a loader.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the asset directory, always using `'/'` as the separator.
    ///
    /// # Errors
    ///
    /// - When the asset can't be found.
    /// - When the extension doesn't belong to the loader.
    /// - When the loader fails decoding the bytes.
    pub fn load<L, T>(&self, path: &str) -> Result<T>
    where
        L: Loader<T>,
    {
        let extension = path.rsplit_once('.').map_or("", |(_, extension)| extension);
        if !L::supports(extension) {
            return Err(Error::load(
                path,
                format!("extension '{extension}' can't be loaded as this type"),
            ));
        }

        let bytes = self.read(path)?;

        L::load(&bytes, path)
    }

    /// Get the raw bytes of an asset.
    ///
    /// # Errors
    ///
    /// - When the asset is not embedded and can't be read from the runtime directory.
    pub fn read(&self, path: &str) -> Result<Cow<'static, [u8]>> {
        // First try to read from memory
        if let Some(raw_asset) = self
            .embedded_assets
            .iter()
            .find(|raw_asset| raw_asset.path == path)
        {
            return Ok(Cow::Borrowed(raw_asset.bytes));
        }

        // If not found load from disk if dir set
        let Some(runtime_asset_dir) = &self.runtime_asset_dir else {
            return Err(Error::load(path, "asset is not embedded"));
        };

        log::debug!("Reading asset '{path}' from disk");

        let file_path = path
            .split('/')
            .fold(runtime_asset_dir.clone(), |file_path, part| {
                file_path.join(part)
            });

        std::fs::read(file_path)
            .map(Cow::Owned)
            .map_err(|err| Error::load(path, err))
    }
}

/// Single embedded asset in the binary.
#[derive(Debug)]
pub struct EmbeddedRawAsset {
    /// Path relative to the asset directory, including the extension.
    pub path: &'static str,
    /// Raw bytes of the asset.
    pub bytes: &'static [u8],
}
