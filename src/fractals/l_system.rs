use std::io::Write;

use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{
    file_io::{serialize_to_json, FilePrefix},
    image_utils::{
        animation_frame_delay, encode_gif, encode_png, write_image_to_file, Canvas, ImageOptions,
    },
    stopwatch::Stopwatch,
};

use super::{
    lindenmayer::{expand, Generations, ProductionRules},
    turtle::{Turtle, TurtleOptions, TurtleState, TurtleStatistics},
};

/**
 * Complete set of parameters that are fed in from the JSON for an L-system fractal:
 * the grammar (axiom + production rules + iteration count), and how to draw the
 * resulting symbol sequence.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LSystemParams {
    pub name: String,
    pub axiom: String,
    pub rules: ProductionRules,
    pub iterations: u32,
    pub angle_degrees: f64,
    pub start_position: nalgebra::Vector2<f64>, // pixels
    #[serde(default)]
    pub start_heading_degrees: f64,
    #[serde(default)]
    pub turtle: TurtleOptions,
    #[serde(default)]
    pub image: ImageOptions,
}

impl LSystemParams {
    pub fn turtle(&self) -> Turtle {
        Turtle::new(&self.turtle, self.angle_degrees.to_radians())
    }

    pub fn start_state(&self) -> TurtleState {
        TurtleState {
            position: self.start_position,
            heading: self.start_heading_degrees.to_radians(),
        }
    }

    pub fn stroke_color(&self) -> image::Rgb<u8> {
        image::Rgb(self.image.stroke_color_rgb)
    }
}

/// Diagnostics for a single rendered generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerationStatistics {
    pub generation: u32,
    pub sequence_len: usize,
    pub turtle: TurtleStatistics,
    pub stroke_pixel_count: usize,
}

impl GenerationStatistics {
    pub fn display<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "  generation {:>2}:  symbols: {},  segments: {},  stroke pixels: {},  \
             max stack depth: {},  ignored pops: {}",
            self.generation,
            self.sequence_len,
            self.turtle.segments_drawn,
            self.stroke_pixel_count,
            self.turtle.max_stack_depth,
            self.turtle.ignored_pops,
        )
    }
}

pub struct RenderedFrame {
    pub canvas: Canvas,
    pub statistics: GenerationStatistics,
}

/**
 * Interprets one symbol sequence onto a fresh canvas. This is a pure function
 * of its inputs: every call allocates its own canvas.
 */
pub fn render_frame(params: &LSystemParams, generation: u32, sequence: &str) -> RenderedFrame {
    let mut canvas = Canvas::from_options(&params.image);
    let (_, turtle_statistics) = params.turtle().draw(
        sequence,
        params.start_state(),
        &mut canvas,
        params.stroke_color(),
    );
    let stroke_pixel_count = canvas.count_non_background_pixels();
    RenderedFrame {
        canvas,
        statistics: GenerationStatistics {
            generation,
            sequence_len: sequence.chars().count(),
            turtle: turtle_statistics,
            stroke_pixel_count,
        },
    }
}

/// Expands the L-system to `params.iterations` and draws the result.
pub fn render(params: &LSystemParams) -> Canvas {
    let sequence = expand(&params.axiom, &params.rules, params.iterations);
    render_frame(params, params.iterations, &sequence).canvas
}

/**
 * Renders every generation from `0` through `params.iterations` (inclusive).
 * The sequences are produced in order, then each one is drawn onto its own
 * canvas in parallel. Frames are returned in generation order.
 */
pub fn render_animation_frames(params: &LSystemParams) -> Vec<RenderedFrame> {
    let frame_count = params.iterations as usize + 1;
    let sequences: Vec<String> = Generations::new(&params.axiom, &params.rules)
        .take(frame_count)
        .collect();

    sequences
        .into_par_iter()
        .enumerate()
        .map(|(generation, sequence)| render_frame(params, generation as u32, &sequence))
        .collect()
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn write_diagnostics(
    file_prefix: &FilePrefix,
    stopwatch: &Stopwatch,
    statistics: &[GenerationStatistics],
    encoded_digest: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt")?;
    stopwatch.display(&mut diagnostics_file)?;
    writeln!(diagnostics_file, "Generations:")?;
    for generation in statistics.iter() {
        generation.display(&mut diagnostics_file)?;
    }
    writeln!(diagnostics_file, "SHA-256 of encoded image: {}", encoded_digest)?;
    diagnostics_file.flush()?;
    Ok(())
}

/**
 * Called by the CLI: renders the final generation of the L-system and writes
 * `<name>.png`, along with the params and a diagnostics file.
 */
pub fn render_l_system(
    params: &LSystemParams,
    file_prefix: &FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new(format!("L-system image: {}", params.name));

    serialize_to_json(file_prefix.with_suffix(".json"), params)?;

    let sequence = expand(&params.axiom, &params.rules, params.iterations);
    stopwatch.record_split("rewrite");

    let frame = render_frame(params, params.iterations, &sequence);
    stopwatch.record_split("rasterize");

    let bytes = encode_png(&frame.canvas)?;
    stopwatch.record_split("encode_png");

    write_image_to_file(file_prefix.with_suffix(".png"), "L-system image", |path| {
        std::fs::write(path, &bytes)
    })?;
    stopwatch.record_split("write_png");

    write_diagnostics(
        file_prefix,
        &stopwatch,
        std::slice::from_ref(&frame.statistics),
        &sha256_hex(&bytes),
    )
}

/**
 * Called by the CLI: renders generations `0..=iterations` as the frames of
 * `<name>.gif`, along with the params and a diagnostics file.
 */
pub fn render_l_system_animation(
    params: &LSystemParams,
    file_prefix: &FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new(format!("L-system animation: {}", params.name));

    serialize_to_json(file_prefix.with_suffix(".json"), params)?;

    let frames = render_animation_frames(params);
    stopwatch.record_split("rewrite_and_rasterize");

    let (canvases, statistics): (Vec<Canvas>, Vec<GenerationStatistics>) = frames
        .into_iter()
        .map(|frame| (frame.canvas, frame.statistics))
        .unzip();
    let bytes = encode_gif(&canvases, animation_frame_delay())?;
    stopwatch.record_split("encode_gif");

    write_image_to_file(
        file_prefix.with_suffix(".gif"),
        "L-system animation",
        |path| std::fs::write(path, &bytes),
    )?;
    stopwatch.record_split("write_gif");

    write_diagnostics(file_prefix, &stopwatch, &statistics, &sha256_hex(&bytes))
}
