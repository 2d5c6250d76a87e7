#![warn(clippy::all)]

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use torus_life::{Config, DefaultEngine, Engine, Grid, Pattern, SequentialEngine};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternArg {
    Glider,
    Blinker,
    Block,
    RPentomino,
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    Parallel,
    Sequential,
}

/// Conway's Game of Life on a torus, printed to the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = Config::DEFAULT_SIDE)]
    width: usize,
    #[arg(long, default_value_t = Config::DEFAULT_SIDE)]
    height: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = Config::DEFAULT_GENERATIONS)]
    generations: u64,
    /// Pause before each generation, in milliseconds
    #[arg(long, default_value_t = Config::DEFAULT_DELAY.as_millis() as u64)]
    delay_ms: u64,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long, value_enum, default_value_t = PatternArg::Glider)]
    pattern: PatternArg,
    /// Load the initial pattern from an RLE file instead
    #[arg(long, conflicts_with = "pattern")]
    rle: Option<PathBuf>,
    /// Seed for `--pattern random`
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 0.3)]
    fill_rate: f64,
    #[arg(long, value_enum, default_value_t = EngineArg::Parallel)]
    engine: EngineArg,
    #[arg(long, default_value_t = '*')]
    alive: char,
    #[arg(long, default_value_t = ' ')]
    dead: char,
}

fn initial_grid(args: &Args, config: &Config) -> Result<Grid> {
    let (w, h) = (config.width, config.height);
    if let Some(path) = &args.rle {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let pattern = Pattern::from_rle(&data).with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(name = %pattern.name, cells = pattern.cells().len(), "loaded RLE pattern");
        return Ok(pattern.centered(w, h)?);
    }
    let pattern = match args.pattern {
        PatternArg::Glider => Pattern::glider(),
        PatternArg::Blinker => Pattern::blinker(),
        PatternArg::Block => Pattern::block(),
        PatternArg::RPentomino => Pattern::r_pentomino(),
        PatternArg::Random => return Ok(Grid::random(w, h, args.seed, args.fill_rate)?),
    };
    Ok(pattern.centered(w, h)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::default()
        .size(args.width, args.height)
        .generations(args.generations)
        .delay(Duration::from_millis(args.delay_ms))
        .threads(args.threads)
        .glyphs(args.alive, args.dead);
    config.validate()?;

    let engine: Box<dyn Engine> = match args.engine {
        EngineArg::Parallel => Box::new(DefaultEngine::new(config.threads)?),
        EngineArg::Sequential => Box::new(SequentialEngine),
    };
    let mut grid = initial_grid(&args, &config)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        engine = engine.name(),
        pattern = ?args.pattern,
        generations = config.generations,
        "starting simulation"
    );

    let mut out = std::io::stdout().lock();
    write!(out, "\x0c{}", config.renderer.frame(&grid))?;
    out.flush()?;
    for generation in 1..=config.generations {
        writeln!(
            out,
            "Generating next generation in {:.1} seconds",
            config.delay.as_secs_f64()
        )?;
        out.flush()?;
        std::thread::sleep(config.delay);

        let timer = Instant::now();
        grid = engine.advance(&grid).map_err(|e| {
            tracing::error!(generation, error = %e, "simulation stopped");
            e
        })?;
        tracing::debug!(
            generation,
            population = grid.population(),
            elapsed = ?timer.elapsed(),
            "advanced"
        );

        write!(out, "\x0c{}", config.renderer.frame(&grid))?;
        out.flush()?;
    }
    Ok(())
}
