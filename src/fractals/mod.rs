pub mod common;
pub mod l_system;
pub mod lindenmayer;
pub mod presets;
pub mod turtle;
