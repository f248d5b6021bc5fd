//! `pathdecim`: decimate curve control points from the command line.
//!
//! Reads a scene (JSON) or point list (XYZ/CSV), removes control points by
//! index stride or minimum spacing while keeping every spline's endpoints,
//! prints a summary and optionally writes the result.

use anyhow::{Context, Result};
use clap::Parser;
use pathdecim_core::Scene;
use pathdecim_simplification::{DecimateConfig, DecimateMode, Outcome, PathDecimator, Policy};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pathdecim", version, about = "Decimate curve control points while keeping endpoints")]
struct Cli {
    /// Input scene (.json) or point list (.xyz, .txt, .csv)
    input: PathBuf,

    /// Where to write the decimated result; format follows the extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Selection mode: `step` (keep every Nth) or `dist` (minimum spacing)
    #[arg(short, long)]
    mode: Option<DecimateMode>,

    /// Keep every Nth point (2..=1000)
    #[arg(short, long)]
    step: Option<u32>,

    /// Minimum world-space distance between kept points
    #[arg(short, long)]
    distance: Option<f32>,

    /// TOML file with `mode`, `step` and `distance` defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report what would be removed without modifying anything
    #[arg(long)]
    dry_run: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags
    fn decimate_config(&self) -> Result<DecimateConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DecimateConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if let Some(distance) = self.distance {
            config.distance = distance;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<DecimateConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Per-spline dry-run listing, `None` when there is nothing to decimate
fn format_plan(scene: &Scene, decimator: &PathDecimator) -> Result<Option<String>> {
    if PathDecimator::<Policy>::resolve_targets(scene).is_empty() {
        return Ok(None);
    }

    let mut out = String::new();
    let mut removed = 0;
    for plan in decimator.plan(scene)? {
        let name = &scene.object(plan.object)?.name;
        out.push_str(&format!(
            "{} spline {} ({}): {} -> {} point(s)\n",
            name,
            plan.spline,
            plan.kind,
            plan.point_count,
            plan.point_count - plan.delete.len()
        ));
        removed += plan.delete.len();
    }
    out.push_str(&format!("Would remove ~{} point(s).\n", removed));
    Ok(Some(out))
}

fn print_plan(scene: &Scene, decimator: &PathDecimator) -> Result<()> {
    match format_plan(scene, decimator)? {
        Some(text) => print!("{}", text),
        None => log::warn!("{}", pathdecim_simplification::NO_TARGET_MESSAGE),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.decimate_config()?;
    log::debug!("settings: {:?} -> {:?}", config, config.policy());

    let mut scene = pathdecim_io::read_scene(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let decimator = PathDecimator::new(&config);

    if cli.dry_run {
        return print_plan(&scene, &decimator);
    }

    match decimator.run(&mut scene)? {
        // the decimator has already logged the warning
        Outcome::Cancelled(_) => return Ok(()),
        Outcome::Finished(report) => println!("{}", report),
    }

    if let Some(output) = &cli.output {
        pathdecim_io::write_scene(&scene, output)
            .with_context(|| format!("writing {}", output.display()))?;
        log::info!("wrote {}", output.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}
