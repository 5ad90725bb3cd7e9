use meo::Config;
use miette::{IntoDiagnostic, Result, WrapErr};

/// Configuration file that's read when it exists next to the binary.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

/// Read the optional configuration file.
#[cfg(not(target_arch = "wasm32"))]
fn config() -> Result<Config> {
    if !std::path::Path::new(CONFIG_PATH).exists() {
        return Ok(Config::default());
    }

    let source = std::fs::read_to_string(CONFIG_PATH)
        .into_diagnostic()
        .wrap_err_with(|| format!("Error reading '{CONFIG_PATH}'"))?;

    Ok(Config::from_toml(&source)?)
}

/// The web has no files to read.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::unnecessary_wraps)]
fn config() -> Result<Config> {
    Ok(Config::default())
}

fn main() -> Result<()> {
    meo::run(config()?)
}
