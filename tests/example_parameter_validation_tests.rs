#[cfg(test)]
mod tests {
    use glob::glob;
    use lsystem_renderer::fractals::common::FractalParams;
    use serde::de::DeserializeOwned;
    use std::any::type_name;
    use std::fs;

    fn parse_all_parameter_files_or_panic<T: DeserializeOwned>(directory: &str) -> usize {
        let pattern = format!("{}/**/*.json", directory);
        let mut parsed_count = 0;

        // Use glob to find all matching .json files
        // For each match, ensure that we can (1) open the file and (2) parse it into the
        // specified parameter type.
        for entry in glob(&pattern).expect("Failed to read glob pattern") {
            match entry {
                Ok(path) => {
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

                    let result: Result<T, _> = serde_json::from_str(&content);

                    match result {
                        Ok(_) => parsed_count += 1,
                        Err(err) => {
                            panic!(
                                "Failed to parse JSON file: {:?} as parameter type: `{}`.\n\n{:?}\n",
                                path,
                                type_name::<T>(),
                                err
                            );
                        }
                    }
                }
                Err(e) => panic!("Failed to read path: {:?}. Check permissions.", e),
            }
        }
        parsed_count
    }

    #[test]
    fn test_ensure_all_demo_files_can_be_parsed() {
        let parsed_count = parse_all_parameter_files_or_panic::<FractalParams>("demos");
        assert_eq!(parsed_count, 5);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let content = fs::read_to_string("demos/render-koch-curve/params.json").unwrap();
        let params: FractalParams = serde_json::from_str(&content).unwrap();
        let l_system = params.l_system();
        assert_eq!(l_system.image.resolution, nalgebra::Vector2::new(800, 600));
        assert_eq!(l_system.image.background_color_rgb, [255, 255, 255]);
        assert_eq!(l_system.image.stroke_color_rgb, [0, 0, 255]);
        assert_eq!(l_system.turtle.step_length, 10.0);
    }
}
