use crate::config::load_config;
use crate::layout::{StackMode, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::scene::Scene;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tlstack", version, about = "Timeline item stacking layout")]
pub struct Args {
    /// Scene file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (lineHeight, itemHeightRatio, keys, ...)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Stacking mode, overriding the config file
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Include grid cells for the chosen calendar unit
    #[arg(long = "axis")]
    pub axis: bool,

    /// Compact JSON output
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Stack,
    Nostack,
}

impl From<ModeArg> for StackMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Stack => StackMode::Stack,
            ModeArg::Nostack => StackMode::NoStack,
        }
    }
}

/// Sends log events to stderr, filtered by `RUST_LOG` (default `warn`).
/// Stdout stays reserved for the layout dump.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.layout.stack_mode = mode.into();
    }
    if args.axis {
        config.render.axis = true;
    }
    if args.compact {
        config.render.pretty = false;
    }

    let input = read_input(args.input.as_deref())?;
    let scene = Scene::from_json(&input).context("failed to read scene")?;
    let view = scene.view(&config.layout)?;

    let layout = compute_layout(&scene.items, &scene.groups, &view, &config.layout);

    let mut dump = LayoutDump::from_layout(&layout, &view);
    if config.render.axis {
        dump = dump.with_axis(&view, &config.layout.time_steps);
    }
    write_layout_dump(&dump, args.output.as_deref(), config.render.pretty)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
