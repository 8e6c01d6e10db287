use std::path::PathBuf;

use lsystem_renderer::{
    cli::render::{read_fractal_params, render_fractal},
    core::file_io::FilePrefix,
};

pub fn build_output_path(project: &str) -> std::path::PathBuf {
    let directory_path: PathBuf = ["out", project].iter().collect();
    std::fs::create_dir_all(&directory_path).unwrap();
    directory_path
}

pub fn render_example_from_string(example_name: &str) {
    let params_name = String::from("demos/") + example_name + &String::from("/params.json");

    let fractal_params = read_fractal_params(&params_name).unwrap();

    render_fractal(
        &fractal_params,
        &FilePrefix {
            directory_path: build_output_path(example_name),
            file_base: String::from("result"),
        },
    )
    .unwrap();
}
