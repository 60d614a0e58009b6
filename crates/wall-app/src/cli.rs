use std::path::PathBuf;

use clap::Parser;
use wall_display::LayoutMode;

/// Wall: a multi-camera monitoring wall mirrored onto a second window.
#[derive(Parser, Debug)]
#[command(name = "wall", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Sites to toggle onto the wall, in order (e.g. a1,a5,a9).
    #[arg(short, long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Layout mode: single, triple, quad, grid (or 1, 3, 4, 9).
    #[arg(short, long)]
    pub mode: Option<LayoutMode>,

    /// Enlarge one selected site.
    #[arg(short, long)]
    pub focus: Option<String>,

    /// Start from an empty selection.
    #[arg(long)]
    pub clear: bool,

    /// Neither restore nor save wall state.
    #[arg(long)]
    pub no_persist: bool,

    /// Print the site catalog and exit.
    #[arg(long)]
    pub list: bool,

    /// Mirror viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Mirror viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,
}

pub fn parse() -> Args {
    Args::parse()
}
