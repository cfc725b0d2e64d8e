//! Terrain Walk CLI
//!
//! Surveys an elevation file and prints its extremes and the costs of the
//! paths of least and most resistance.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use terrain_walk::logging::init_logging;
use terrain_walk::report::Console;
use terrain_walk::{Scene, Survey, TieBreak, WalkConfig};

#[derive(Parser)]
#[command(name = "terrain-walk")]
#[command(about = "Find the paths of least and most resistance across an elevation map", long_about = None)]
struct Args {
    /// Elevation file named like `<name>_<cols>x<rows>.<ext>`
    file: Option<PathBuf>,

    /// `--disable-middle-priority` to break forward/sideways ties at random;
    /// anything else keeps forward first
    #[arg(allow_hyphen_values = true)]
    flag: Option<String>,

    /// Ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,

    /// Seed for tie-break draws (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let file = match args.file {
        Some(file) => file,
        None => {
            println!("Please specify a source file.");
            println!("Usage: terrain-walk <FILE> [--disable-middle-priority] [--seed <SEED>]");
            return;
        }
    };

    if !args.rest.is_empty() {
        tracing::debug!(ignored = ?args.rest, "Extra arguments");
    }

    let tie_break = TieBreak::from_flag(args.flag.as_deref());
    let mut config = WalkConfig::new(file).with_tie_break(tie_break);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut console = Console;
    let (report, survey) = match Survey::from_config(&config, &mut console) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    tracing::debug!(
        best = %survey.paths.best(),
        worst = %survey.paths.worst(),
        "Selected paths"
    );

    let scene = Scene::build(&report.grid, &survey);
    tracing::info!(
        title = scene.title,
        width = scene.width,
        height = scene.height,
        overlays = scene.overlays.len(),
        "Scene ready for display"
    );
}
