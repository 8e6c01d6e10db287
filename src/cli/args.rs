use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct LSystemRendererArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render one or more L-system params files.
    Render(ParameterFilePaths),
    /// Render every built-in L-system preset.
    Presets(PresetOptions),
}

#[derive(Debug, Args)]
pub struct ParameterFilePaths {
    #[clap(required = true)]
    pub params_paths: Vec<String>,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct PresetOptions {
    #[clap(long, short)]
    pub date_time_out: bool,

    /// Write a GIF of every generation instead of a PNG of the last one.
    #[clap(long, short)]
    pub animate: bool,
}
