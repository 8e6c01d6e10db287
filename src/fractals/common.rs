use serde::{Deserialize, Serialize};

use super::l_system::LSystemParams;

/**
 * Top-level contents of a params file. The variant selects the artifact:
 * a still image of the final generation, or an animation of every generation.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FractalParams {
    LSystem(Box<LSystemParams>),
    LSystemAnimation(Box<LSystemParams>),
}

impl FractalParams {
    pub fn l_system(&self) -> &LSystemParams {
        match self {
            FractalParams::LSystem(inner_params) => inner_params,
            FractalParams::LSystemAnimation(inner_params) => inner_params,
        }
    }

    pub fn name(&self) -> &str {
        &self.l_system().name
    }

    /// Same L-system, rendered as an animation instead of a still image.
    pub fn into_animation(self) -> FractalParams {
        match self {
            FractalParams::LSystem(inner_params) => FractalParams::LSystemAnimation(inner_params),
            animation => animation,
        }
    }
}
