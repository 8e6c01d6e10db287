use clap::Parser;
use lsystem_renderer::{
    cli::{
        args::{CommandsEnum, LSystemRendererArgs},
        render::{read_fractal_params, render_all},
    },
    core::file_io::{
        build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
    },
    fractals::{common::FractalParams, presets::builtin_presets},
};

fn main() {
    let args: LSystemRendererArgs = LSystemRendererArgs::parse();

    let failure_count = match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let date_time = maybe_date_time_string(params.date_time_out);
            let mut failure_count = 0;
            for params_path in params.params_paths.iter() {
                let fractal_params = match read_fractal_params(params_path) {
                    Ok(fractal_params) => fractal_params,
                    Err(err) => {
                        println!("ERROR:  Unable to read param file {}: {}", params_path, err);
                        failure_count += 1;
                        continue;
                    }
                };
                let build_file_prefix = |fractal: &FractalParams| -> std::io::Result<FilePrefix> {
                    Ok(FilePrefix {
                        directory_path: build_output_path_with_date_time(
                            "render",
                            extract_base_name(params_path),
                            &date_time,
                        )?,
                        file_base: fractal.name().to_owned(),
                    })
                };
                failure_count += render_all(std::iter::once(fractal_params), build_file_prefix);
            }
            failure_count
        }

        Some(CommandsEnum::Presets(options)) => {
            let date_time = maybe_date_time_string(options.date_time_out);
            let sub_directory = if options.animate { "animation" } else { "image" };
            let presets = builtin_presets().into_iter().map(|preset| {
                if options.animate {
                    preset.into_animation()
                } else {
                    preset
                }
            });
            render_all(presets, |fractal| {
                Ok(FilePrefix {
                    directory_path: build_output_path_with_date_time(
                        "presets",
                        sub_directory,
                        &date_time,
                    )?,
                    file_base: fractal.name().to_owned(),
                })
            })
        }
        None => {
            println!("Default command (nothing specified!)");
            0
        }
    };

    if failure_count > 0 {
        println!("ERROR:  {} fractal(s) failed to render.", failure_count);
        std::process::exit(1);
    }
}
