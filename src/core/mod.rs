pub mod file_io;
pub mod image_utils;
pub mod line_drawing;
pub mod stopwatch;
