//! Loading images and sounds from the binary or from disk.

pub mod loader;
pub mod manifest;
pub mod preload;
pub mod source;

pub use manifest::{AssetKind, Manifest};
pub use preload::{Asset, LoadProgress, LoadReport, Loaded, Preloader};
pub use source::AssetSource;

/// Game assets compiled into the binary.
#[cfg(any(target_arch = "wasm32", feature = "embed-assets"))]
pub static EMBEDDED_ASSETS: &[source::EmbeddedRawAsset] = &[
    source::EmbeddedRawAsset {
        path: "image/player.png",
        bytes: include_bytes!("../../assets/image/player.png"),
    },
    source::EmbeddedRawAsset {
        path: "image/pausebutton.png",
        bytes: include_bytes!("../../assets/image/pausebutton.png"),
    },
    source::EmbeddedRawAsset {
        path: "audio/bgm.wav",
        bytes: include_bytes!("../../assets/audio/bgm.wav"),
    },
    source::EmbeddedRawAsset {
        path: "audio/pause.wav",
        bytes: include_bytes!("../../assets/audio/pause.wav"),
    },
];
