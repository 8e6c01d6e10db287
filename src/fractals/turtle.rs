use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    image_utils::Canvas,
    line_drawing::{draw_line, nearest_pixel},
};

pub const DEFAULT_DRAW_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/**
 * How the `|` symbol changes the heading.
 *
 * `HalfTurn` reverses the heading by adding pi radians. `LegacyDegreeOffset`
 * adds the raw value `180.0` to the heading, which is stored in radians. That
 * second mode reproduces older renders of these presets exactly; which of the
 * two was originally intended is unknown, so both are kept selectable.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseTurn {
    HalfTurn,
    LegacyDegreeOffset,
}

impl ReverseTurn {
    pub fn heading_offset(&self) -> f64 {
        match self {
            ReverseTurn::HalfTurn => std::f64::consts::PI,
            ReverseTurn::LegacyDegreeOffset => 180.0,
        }
    }
}

impl Default for ReverseTurn {
    fn default() -> ReverseTurn {
        ReverseTurn::HalfTurn
    }
}

/**
 * Parameters of the turtle "program" that are independent of the L-system
 * rules themselves.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TurtleOptions {
    /// Distance (in pixels) covered by each draw symbol.
    pub step_length: f64,
    /// Every symbol in this string moves forward and draws a segment.
    pub draw_symbols: String,
    /// When set, a draw symbol in the very first position only seeds the
    /// sequence: it is consumed without moving or drawing.
    pub skip_leading_draw: bool,
    pub reverse_turn: ReverseTurn,
}

impl Default for TurtleOptions {
    fn default() -> TurtleOptions {
        TurtleOptions {
            step_length: 10.0,
            draw_symbols: DEFAULT_DRAW_SYMBOLS.to_owned(),
            skip_leading_draw: false,
            reverse_turn: ReverseTurn::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurtleCommand {
    DrawForward,
    DecreaseHeading,
    IncreaseHeading,
    Reverse,
    Push,
    Pop,
    Ignore,
}

/**
 * Position and heading of the turtle. Positions are in image coordinates
 * (x to the right, y down); a heading of zero points along +x.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub position: nalgebra::Vector2<f64>,
    pub heading: f64, // radians
}

impl TurtleState {
    pub fn new(position: nalgebra::Vector2<f64>) -> TurtleState {
        TurtleState {
            position,
            heading: 0.0,
        }
    }

    pub fn forward(&self, step_length: f64) -> TurtleState {
        let direction = nalgebra::Vector2::new(self.heading.cos(), self.heading.sin());
        TurtleState {
            position: self.position + step_length * direction,
            heading: self.heading,
        }
    }

    pub fn pixel(&self) -> (i64, i64) {
        (nearest_pixel(self.position[0]), nearest_pixel(self.position[1]))
    }
}

/**
 * Saved turtle states for the branching symbols. Snapshots are plain values,
 * so a restored state can never alias the active one.
 */
#[derive(Debug, Clone, Default)]
pub struct TurtleStack {
    saved: Vec<TurtleState>,
}

impl TurtleStack {
    pub fn push(&mut self, state: TurtleState) {
        self.saved.push(state);
    }

    /// Returns `None` on an empty stack; callers treat that as a no-op.
    pub fn pop(&mut self) -> Option<TurtleState> {
        self.saved.pop()
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Bookkeeping from one pass over a symbol sequence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TurtleStatistics {
    pub segments_drawn: usize,
    pub ignored_pops: usize,
    pub max_stack_depth: usize,
}

/**
 * Interprets L-system symbol sequences as turtle-graphics programs.
 */
#[derive(Debug, Clone)]
pub struct Turtle {
    draw_symbols: HashSet<char>,
    step_length: f64,
    turn_angle: f64,
    reverse_offset: f64,
    skip_leading_draw: bool,
}

impl Turtle {
    /// `turn_angle` is in radians.
    pub fn new(options: &TurtleOptions, turn_angle: f64) -> Turtle {
        Turtle {
            draw_symbols: options.draw_symbols.chars().collect(),
            step_length: options.step_length,
            turn_angle,
            reverse_offset: options.reverse_turn.heading_offset(),
            skip_leading_draw: options.skip_leading_draw,
        }
    }

    pub fn command(&self, symbol: char) -> TurtleCommand {
        match symbol {
            '+' => TurtleCommand::DecreaseHeading,
            '-' => TurtleCommand::IncreaseHeading,
            '|' => TurtleCommand::Reverse,
            '[' => TurtleCommand::Push,
            ']' => TurtleCommand::Pop,
            _ if self.draw_symbols.contains(&symbol) => TurtleCommand::DrawForward,
            _ => TurtleCommand::Ignore,
        }
    }

    /**
     * Walks the sequence left to right, calling `on_segment(from, to)` for
     * every forward move.
     *
     * @return: the final turtle state and statistics for the pass.
     */
    pub fn walk<F>(
        &self,
        sequence: &str,
        start: TurtleState,
        mut on_segment: F,
    ) -> (TurtleState, TurtleStatistics)
    where
        F: FnMut(&TurtleState, &TurtleState),
    {
        let mut state = start;
        let mut stack = TurtleStack::default();
        let mut statistics = TurtleStatistics::default();

        let mut symbols = sequence.chars().peekable();
        if self.skip_leading_draw {
            if let Some(&first) = symbols.peek() {
                if self.command(first) == TurtleCommand::DrawForward {
                    symbols.next();
                }
            }
        }

        for symbol in symbols {
            match self.command(symbol) {
                TurtleCommand::DrawForward => {
                    let next = state.forward(self.step_length);
                    on_segment(&state, &next);
                    statistics.segments_drawn += 1;
                    state = next;
                }
                TurtleCommand::DecreaseHeading => state.heading -= self.turn_angle,
                TurtleCommand::IncreaseHeading => state.heading += self.turn_angle,
                TurtleCommand::Reverse => state.heading += self.reverse_offset,
                TurtleCommand::Push => {
                    stack.push(state);
                    statistics.max_stack_depth = statistics.max_stack_depth.max(stack.depth());
                }
                TurtleCommand::Pop => match stack.pop() {
                    Some(saved) => state = saved,
                    None => statistics.ignored_pops += 1,
                },
                TurtleCommand::Ignore => {}
            }
        }

        (state, statistics)
    }

    /// Walks the sequence, rasterizing every segment onto the canvas.
    pub fn draw(
        &self,
        sequence: &str,
        start: TurtleState,
        canvas: &mut Canvas,
        color: image::Rgb<u8>,
    ) -> (TurtleState, TurtleStatistics) {
        self.walk(sequence, start, |from, to| {
            draw_line(canvas, from.pixel(), to.pixel(), color);
        })
    }
}
