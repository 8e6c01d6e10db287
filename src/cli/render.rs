use crate::core::file_io::FilePrefix;
use crate::fractals::{
    common::FractalParams,
    l_system::{render_l_system, render_l_system_animation},
};

pub fn read_fractal_params(params_path: &str) -> Result<FractalParams, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(params_path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn render_fractal(
    params: &FractalParams,
    file_prefix: &FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    match params {
        FractalParams::LSystem(inner_params) => render_l_system(inner_params, file_prefix),
        FractalParams::LSystemAnimation(inner_params) => {
            render_l_system_animation(inner_params, file_prefix)
        }
    }
}

/**
 * Renders each fractal in turn. A failure is reported and then skipped, so
 * that one bad preset never aborts the rest of the batch.
 *
 * @return: the number of fractals that failed to render.
 */
pub fn render_all<I, F>(fractals: I, build_file_prefix: F) -> usize
where
    I: IntoIterator<Item = FractalParams>,
    F: Fn(&FractalParams) -> std::io::Result<FilePrefix>,
{
    let mut failure_count = 0;
    for params in fractals {
        let result = build_file_prefix(&params)
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|file_prefix| render_fractal(&params, &file_prefix));
        if let Err(err) = result {
            println!("ERROR:  Failed to render `{}`: {}", params.name(), err);
            failure_count += 1;
        }
    }
    failure_count
}
