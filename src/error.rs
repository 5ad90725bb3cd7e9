//! Errors that can occur while the game is running.
//!
//! None of these are fatal for the frame loop, they are reported and the game degrades.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Any recoverable failure.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// A single asset could not be read or decoded.
    #[error("Error loading asset '{path}': {reason}")]
    #[diagnostic(
        code(meo::load_failure),
        help("check that the file exists in the asset directory and has a supported format")
    )]
    LoadFailure {
        /// Path of the asset as written in the manifest.
        path: SmolStr,
        /// Why it failed.
        reason: String,
    },
    /// Something the game would like to use is not available on this platform.
    #[error("Unsupported environment: {0}")]
    #[diagnostic(code(meo::unsupported_environment))]
    UnsupportedEnvironment(String),
    /// A scene transition that can't be applied to the current stack.
    #[error("Invalid scene transition: no scene is waiting underneath the current one")]
    #[diagnostic(code(meo::invalid_scene_transition))]
    InvalidSceneTransition,
    /// The configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(meo::config))]
    Config(String),
}

impl Error {
    /// Create a load failure for an asset path.
    #[inline]
    pub(crate) fn load(path: &str, reason: impl ToString) -> Self {
        Self::LoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Shorthand for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
