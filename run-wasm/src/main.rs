//! Build the game for the web and serve it locally.
//!
//! Run with `cargo run-wasm --package meo`.

fn main() {
    // Remove the page margins so the letterboxed canvas can use the whole window
    cargo_run_wasm::run_wasm_cli_with_css("body { margin: 0px; overflow: hidden; background: #000; }");
}
