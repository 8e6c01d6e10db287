#[path = "../common/mod.rs"]
mod common;

/// ```sh
/// cargo run --example render-fractal-plant
/// ```
pub fn main() {
    common::render_example_from_string("render-fractal-plant")
}
