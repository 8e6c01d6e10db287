#[path = "../common/mod.rs"]
mod common;

/// ```sh
/// cargo run --example render-dragon-curve
/// ```
pub fn main() {
    common::render_example_from_string("render-dragon-curve")
}
