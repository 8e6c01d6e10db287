use super::{
    common::FractalParams,
    l_system::LSystemParams,
    lindenmayer::ProductionRules,
    turtle::TurtleOptions,
};
use crate::core::image_utils::ImageOptions;

fn rules(pairs: &[(char, &str)]) -> ProductionRules {
    pairs
        .iter()
        .map(|(symbol, replacement)| (*symbol, replacement.to_string()))
        .collect()
}

fn still(
    name: &str,
    axiom: &str,
    rule_pairs: &[(char, &str)],
    iterations: u32,
    angle_degrees: f64,
    start_position: (f64, f64),
) -> LSystemParams {
    LSystemParams {
        name: name.to_owned(),
        axiom: axiom.to_owned(),
        rules: rules(rule_pairs),
        iterations,
        angle_degrees,
        start_position: nalgebra::Vector2::new(start_position.0, start_position.1),
        start_heading_degrees: 0.0,
        turtle: TurtleOptions::default(),
        image: ImageOptions::default(),
    }
}

/**
 * The built-in L-systems rendered by the `presets` command, all on an
 * 800x800 canvas with a 10 pixel step.
 */
pub fn builtin_presets() -> Vec<FractalParams> {
    let mut fractal_plant = still(
        "Fractal plant",
        "X",
        &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
        5,
        25.0,
        (400.0, 790.0),
    );
    fractal_plant.start_heading_degrees = -90.0;
    fractal_plant.turtle.step_length = 4.0;
    fractal_plant.turtle.draw_symbols = "F".to_owned();

    vec![
        still("Koch curve", "F", &[('F', "F+F-F-F+F")], 3, 90.0, (200.0, 400.0)),
        still("Dragon curve", "F", &[('F', "F+G"), ('G', "F-G")], 10, 90.0, (300.0, 500.0)),
        still(
            "Sierpinski triangle",
            "F-G-G",
            &[('F', "F-G+F+G-F"), ('G', "GG")],
            4,
            120.0,
            (200.0, 400.0),
        ),
        still(
            "Snowflake",
            "F++F++F++F++F",
            &[('F', "F++F++F+++++F-F++F")],
            4,
            36.0,
            (150.0, 750.0),
        ),
        still("Kdo ví co", "F", &[('F', "F++F+F--")], 5, 20.0, (200.0, 200.0)),
        fractal_plant,
    ]
    .into_iter()
    .map(|params| FractalParams::LSystem(Box::new(params)))
    .collect()
}

#[cfg(test)]
mod tests {
    use more_asserts::assert_gt;
    use std::collections::BTreeSet;

    use super::*;
    use crate::fractals::{l_system::render_frame, lindenmayer::expand};

    #[test]
    fn test_preset_names_are_unique() {
        let presets = builtin_presets();
        let names: BTreeSet<&str> = presets.iter().map(|preset| preset.name()).collect();
        assert_eq!(names.len(), presets.len());
    }

    #[test]
    fn test_presets_draw_something() {
        for preset in builtin_presets() {
            let params = preset.l_system();
            // Keep the test fast: two generations are enough to exercise every rule.
            let sequence = expand(&params.axiom, &params.rules, params.iterations.min(2));
            let frame = render_frame(params, 2, &sequence);
            assert_gt!(frame.statistics.stroke_pixel_count, 0, "{}", params.name);
        }
    }

    #[test]
    fn test_fractal_plant_branches() {
        let presets = builtin_presets();
        let plant = presets
            .iter()
            .find(|preset| preset.name() == "Fractal plant")
            .unwrap()
            .l_system();
        let sequence = expand(&plant.axiom, &plant.rules, 2);
        let frame = render_frame(plant, 2, &sequence);
        assert_gt!(frame.statistics.turtle.max_stack_depth, 1);
        assert_eq!(frame.statistics.turtle.ignored_pops, 0);
    }
}
