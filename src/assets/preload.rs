//! Cooperative loading of a manifest, one asset per frame.

use std::{cell::Cell, rc::Rc};

use kira::sound::static_sound::StaticSoundData;
use smol_str::SmolStr;

use super::{
    loader::{png::PngLoader, sound::SoundLoader},
    manifest::{AssetKind, Manifest, ManifestEntry},
    AssetSource,
};
use crate::{error::Error, graphics::Image};

/// Decoded asset.
#[non_exhaustive]
pub enum Asset {
    /// Decoded pixels.
    Image(Image),
    /// Decoded audio samples.
    Sound(StaticSoundData),
}

/// Shared percentage of loaded assets in the range `0..=100`.
///
/// Cloning shares the same counter, the loader writes it and the loading screen reads it.
#[derive(Debug, Clone, Default)]
pub struct LoadProgress(Rc<Cell<u8>>);

impl LoadProgress {
    /// Current percentage.
    #[inline]
    #[must_use]
    pub fn get(&self) -> u8 {
        self.0.get()
    }

    /// Move the percentage forward, it never goes down and never exceeds 100.
    #[inline]
    pub(crate) fn advance(&self, percentage: u8) {
        self.0.set(self.0.get().max(percentage.min(100)));
    }
}

/// Everything that happened during loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of all assets that loaded.
    pub loaded: Vec<SmolStr>,
    /// Assets that were skipped after all retries failed.
    pub failures: Vec<Error>,
}

impl LoadReport {
    /// Whether every asset loaded.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a finished load.
pub struct Loaded {
    /// Decoded assets by logical name, in manifest order.
    pub assets: Vec<(SmolStr, Asset)>,
    /// What loaded and what failed.
    pub report: LoadReport,
}

/// Loads a manifest spread over multiple frames.
pub struct Preloader {
    /// What to load.
    manifest: Manifest,
    /// Where to load it from.
    source: AssetSource,
    /// Index of the next manifest entry.
    next: usize,
    /// Failed attempts for the next manifest entry.
    attempts: u32,
    /// How many times a failing entry is tried again.
    retries: u32,
    /// Shared percentage.
    progress: LoadProgress,
    /// Assets loaded so far.
    assets: Vec<(SmolStr, Asset)>,
    /// Collected results.
    report: LoadReport,
    /// Whether the loaded assets have been handed out.
    finished: bool,
}

impl Preloader {
    /// Start loading a manifest.
    ///
    /// # Arguments
    ///
    /// * `manifest` - Assets to load in order.
    /// * `source` - Where the bytes come from.
    /// * `retries` - How many extra attempts a failing asset gets before it's skipped.
    #[must_use]
    pub fn new(manifest: Manifest, source: AssetSource, retries: u32) -> Self {
        Self {
            manifest,
            source,
            next: 0,
            attempts: 0,
            retries,
            progress: LoadProgress::default(),
            assets: Vec::new(),
            report: LoadReport::default(),
            finished: false,
        }
    }

    /// Shared progress counter.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> LoadProgress {
        self.progress.clone()
    }

    /// Whether the completion has already been handed out.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Try to load the next asset.
    ///
    /// # Returns
    ///
    /// - `Some` exactly once, on the step that finishes the last asset.
    /// - `None` while still loading and on every call after completion.
    #[profiling::function]
    pub fn step(&mut self) -> Option<Loaded> {
        if self.finished {
            return None;
        }

        if let Some(entry) = self.manifest.entries().get(self.next).cloned() {
            self.load_entry(&entry);
        }

        let total = self.manifest.len();
        if self.next < total {
            // Floor so 100 is only reached on completion
            self.progress.advance((self.next * 100 / total) as u8);

            return None;
        }

        self.progress.advance(100);
        self.finished = true;

        log::debug!(
            "Loading finished, {} assets loaded and {} failed",
            self.report.loaded.len(),
            self.report.failures.len()
        );

        Some(Loaded {
            assets: std::mem::take(&mut self.assets),
            report: std::mem::take(&mut self.report),
        })
    }

    /// Load a single entry, moving to the next one when it's done or out of retries.
    fn load_entry(&mut self, entry: &ManifestEntry) {
        let result = match entry.kind {
            AssetKind::Image => self
                .source
                .load::<PngLoader, _>(&entry.path)
                .map(Asset::Image),
            AssetKind::Sound => self
                .source
                .load::<SoundLoader, _>(&entry.path)
                .map(Asset::Sound),
        };

        match result {
            Ok(asset) => {
                log::debug!("Loaded asset '{}' from '{}'", entry.name, entry.path);

                self.report.loaded.push(entry.name.clone());
                self.assets.push((entry.name.clone(), asset));
            }
            Err(err) if self.attempts < self.retries => {
                self.attempts += 1;
                log::warn!(
                    "Attempt {} loading asset '{}' failed, retrying: {err}",
                    self.attempts,
                    entry.name
                );

                // Try the same entry again next step
                return;
            }
            Err(err) => {
                log::error!("Skipping asset '{}': {err}", entry.name);

                self.report.failures.push(err);
            }
        }

        self.next += 1;
        self.attempts = 0;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use png::ColorType;

    use super::{Asset, Preloader};
    use crate::assets::{
        loader::png::tests::encode, manifest::Manifest, source::EmbeddedRawAsset, AssetSource,
    };

    /// Source with a single embedded 1x1 image at every path.
    pub(crate) fn source(paths: &'static [&'static str]) -> AssetSource {
        let bytes: &'static [u8] = encode(1, 1, ColorType::Rgba, &[1, 2, 3, 4]).leak();
        let assets = paths
            .iter()
            .map(|path| EmbeddedRawAsset { path, bytes })
            .collect::<Vec<_>>()
            .leak();

        AssetSource::new().with_embedded_assets(assets)
    }

    pub(crate) fn manifest(entries: &[(&str, &str)]) -> Manifest {
        entries
            .iter()
            .try_fold(Manifest::default(), |manifest, (name, path)| {
                manifest.with(name, path)
            })
            .unwrap()
    }

    #[test]
    fn progress_is_monotonic_and_completes_once() {
        let mut preloader = Preloader::new(
            manifest(&[("a", "a.png"), ("b", "b.png"), ("c", "c.png")]),
            source(&["a.png", "b.png", "c.png"]),
            0,
        );
        let progress = preloader.progress();

        let mut seen = vec![progress.get()];
        let mut completions = 0;
        for _ in 0..10 {
            let loaded = preloader.step();
            seen.push(progress.get());

            if let Some(loaded) = loaded {
                completions += 1;
                // 100 is reached exactly when completion is handed out
                assert_eq!(progress.get(), 100);
                assert_eq!(loaded.assets.len(), 3);
                assert!(loaded.report.is_complete());
            } else if completions == 0 {
                assert!(progress.get() < 100);
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(seen, [0, 33, 66, 100, 100, 100, 100, 100, 100, 100, 100]);
        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn failed_assets_are_retried_then_skipped() {
        let mut preloader = Preloader::new(
            manifest(&[("missing", "missing.png"), ("a", "a.png")]),
            source(&["a.png"]),
            2,
        );

        // Initial attempt plus two retries
        for _ in 0..2 {
            assert!(preloader.step().is_none());
            assert_eq!(preloader.progress().get(), 0);
        }
        assert!(preloader.step().is_none());
        assert_eq!(preloader.progress().get(), 50);

        let loaded = preloader.step().unwrap();
        assert_eq!(loaded.report.failures.len(), 1);
        assert_eq!(loaded.report.loaded, ["a"]);
        assert!(matches!(loaded.assets[0].1, Asset::Image(_)));
    }

    #[test]
    fn empty_manifest_completes_immediately() {
        let mut preloader = Preloader::new(Manifest::default(), AssetSource::new(), 1);

        assert!(preloader.step().is_some());
        assert_eq!(preloader.progress().get(), 100);
        assert!(preloader.is_finished());
        assert!(preloader.step().is_none());
    }
}
