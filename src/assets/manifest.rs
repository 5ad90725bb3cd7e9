//! Flat list of every asset the game needs before it can start.

use smol_str::SmolStr;

use super::loader::{png::PngLoader, sound::SoundLoader, Loader};
use crate::error::{Error, Result};

/// What an asset decodes into, determined by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssetKind {
    /// PNG image.
    Image,
    /// Audio file.
    Sound,
}

impl AssetKind {
    /// Find the kind for a path.
    ///
    /// # Errors
    ///
    /// - When no loader supports the extension of the path.
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = path.rsplit_once('.').map_or("", |(_, extension)| extension);

        if PngLoader::supports(extension) {
            Ok(Self::Image)
        } else if SoundLoader::supports(extension) {
            Ok(Self::Sound)
        } else {
            Err(Error::load(path, format!("unsupported extension '{extension}'")))
        }
    }
}

/// Single asset to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Logical name the loaded asset is addressed by.
    pub name: SmolStr,
    /// Path relative to the asset directory.
    pub path: SmolStr,
    /// What it decodes into.
    pub kind: AssetKind,
}

/// Ordered list of assets, loaded in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// All entries.
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Assets of the game.
    ///
    /// # Panics
    ///
    /// - When one of the hardcoded paths has an unsupported extension.
    #[must_use]
    pub fn game() -> Self {
        Self::default()
            .with("player", "image/player.png")
            .and_then(|manifest| manifest.with("pause_button", "image/pausebutton.png"))
            .and_then(|manifest| manifest.with("bgm", "audio/bgm.wav"))
            .and_then(|manifest| manifest.with("pause", "audio/pause.wav"))
            .expect("Built-in manifest has unsupported extensions")
    }

    /// Add an asset.
    ///
    /// Adding a name twice replaces the path of the earlier entry.
    ///
    /// # Errors
    ///
    /// - When no loader supports the extension of the path.
    pub fn with(mut self, name: &str, path: &str) -> Result<Self> {
        let kind = AssetKind::from_path(path)?;
        let entry = ManifestEntry {
            name: name.into(),
            path: path.into(),
            kind,
        };

        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.name == name) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }

        Ok(self)
    }

    /// All entries in load order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Amount of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there's nothing to load.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
