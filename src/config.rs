//! Game configuration.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Initial game configuration passed to [`crate::run`].
///
/// There's three ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use meo::Config;
/// Config {
///   title: "My Game".to_owned(),
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use meo::Config;
/// Config::default().with_title("My Game").with_music_volume(0.4);
/// ```
///
/// # Example
///
/// ```rust
/// # use meo::Config;
/// let config = Config::from_toml("width = 320\nheight = 480").unwrap();
/// assert_eq!(config.width, 320);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Horizontal amount of pixels of the stage.
    ///
    /// This is the backing resolution, the presentation on screen is scaled to fit the window.
    ///
    /// Defaults to `640`.
    pub width: u32,
    /// Vertical amount of pixels of the stage.
    ///
    /// Defaults to `960`.
    pub height: u32,
    /// Factor applied to the stage size for the requested window size on desktop.
    ///
    /// Defaults to `0.75`.
    pub scaling: f32,
    /// Name in the title bar.
    ///
    /// Defaults to `"Meo"`.
    pub title: String,
    /// Color of the background of the stage in `0xAARRGGBB`.
    ///
    /// Defaults to `0xFF555555` (gray).
    pub background_color: u32,
    /// Color of the area outside of the letterboxed stage in `0xAARRGGBB`.
    ///
    /// Defaults to `0xFF000000` (black).
    pub viewport_color: u32,
    /// Volume of the background music in the range `0.0..=1.0`.
    ///
    /// Defaults to `0.2`.
    pub music_volume: f32,
    /// Volume of the sound effects in the range `0.0..=1.0`.
    ///
    /// Defaults to `0.5`.
    pub effect_volume: f32,
    /// How many times a failing asset is retried before it's skipped.
    ///
    /// Defaults to `1`.
    pub load_retries: u32,
}

impl Config {
    /// Parse a configuration from a TOML string.
    ///
    /// Missing keys use the default value, volumes are clamped to `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// - When the string is not valid TOML or a value has the wrong type.
    #[inline]
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|err| Error::Config(err.to_string()))?;

        Ok(config.clamped())
    }

    /// Set the backing resolution of the stage.
    #[inline]
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;

        self
    }

    /// Set the factor applied to the stage size for the requested window size.
    #[inline]
    #[must_use]
    pub const fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;

        self
    }

    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the color of the background of the stage.
    #[inline]
    #[must_use]
    pub const fn with_background_color(mut self, background_color: u32) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the color of the area outside of the letterboxed stage.
    #[inline]
    #[must_use]
    pub const fn with_viewport_color(mut self, viewport_color: u32) -> Self {
        self.viewport_color = viewport_color;

        self
    }

    /// Set the music volume, clamped to `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn with_music_volume(mut self, music_volume: f32) -> Self {
        self.music_volume = music_volume.clamp(0.0, 1.0);

        self
    }

    /// Set the sound effect volume, clamped to `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn with_effect_volume(mut self, effect_volume: f32) -> Self {
        self.effect_volume = effect_volume.clamp(0.0, 1.0);

        self
    }

    /// Set how many times a failing asset is retried.
    #[inline]
    #[must_use]
    pub const fn with_load_retries(mut self, load_retries: u32) -> Self {
        self.load_retries = load_retries;

        self
    }

    /// Ensure all values are within their valid ranges.
    fn clamped(self) -> Self {
        let music_volume = self.music_volume;
        let effect_volume = self.effect_volume;

        self.with_music_volume(music_volume)
            .with_effect_volume(effect_volume)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 960,
            scaling: 0.75,
            title: "Meo".to_owned(),
            background_color: 0xFF555555,
            viewport_color: 0xFF000000,
            music_volume: 0.2,
            effect_volume: 0.5,
            load_retries: 1,
        }
    }
}
