//! gridpath: shortest paths through character-map mazes.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser;
use gridpath_core::{CharMap, MapLimits, Maze};
use gridpath_paths::{Movement, SearchConfig, SearchTask, find_path};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod input;
mod report;

use report::Style;

#[derive(Parser, Debug)]
#[command(name = "gridpath")]
#[command(version, about = "Find the shortest path through a character-map maze")]
struct Cli {
    /// Maze file; the map is read from the console when omitted
    map: Option<PathBuf>,

    /// Allow diagonal steps
    #[arg(short, long)]
    diagonal: bool,

    /// Give up after expanding this many cells
    #[arg(long, env = "GRIDPATH_MAX_EXPANSIONS")]
    max_expansions: Option<usize>,

    /// Cancel a search that runs longer than this many milliseconds
    #[arg(long, env = "GRIDPATH_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Offer to read the maze file again after each solve
    #[arg(long, requires = "map")]
    reload: bool,

    /// Do not colour the path
    #[arg(long)]
    no_color: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::new(Movement::from_diagonal(self.diagonal));
        match self.max_expansions {
            Some(max) => config.with_max_expansions(max),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let style = Style {
        diagonal: cli.diagonal,
        color: !cli.no_color && stdout.is_terminal(),
    };
    run(&cli, &mut io::stdin().lock(), &mut stdout.lock(), &style)
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Also captures `log` records from the library crates.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .try_init();
}

fn run(
    cli: &Cli,
    input: &mut impl BufRead,
    out: &mut impl Write,
    style: &Style,
) -> anyhow::Result<()> {
    let Some(file) = &cli.map else {
        out.write_all(input::INSTRUCTIONS.as_bytes())?;
        out.flush()?;
        let rows = input::read_console_map(input).context("reading the map from the console")?;
        writeln!(out, "Calculating path...")?;
        return solve(cli, rows, out, style);
    };

    loop {
        log::info!("loading {}", file.display());
        let text = fs::read_to_string(file)
            .with_context(|| format!("reading maze file {}", file.display()))?;
        writeln!(out, "Calculating path...")?;
        solve(cli, text.lines(), out, style)?;

        if !cli.reload || !input::prompt_yes_no(input, out, "Reload the maze file ? y/n: ")? {
            return Ok(());
        }
    }
}

fn solve<I, S>(cli: &Cli, rows: I, out: &mut impl Write, style: &Style) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let map = match CharMap::from_lines(rows, &MapLimits::default()) {
        Ok(map) => map,
        Err(err) => {
            log::debug!("map rejected: {err}");
            report::write_map_error(out, &err)?;
            return Ok(());
        }
    };

    let maze = Maze::from_char_map(&map);
    let config = cli.search_config();
    let started = Instant::now();
    let outcome = match cli.timeout_ms {
        Some(ms) => SearchTask::spawn(maze, map.start(), map.goal(), config)
            .wait_timeout(Duration::from_millis(ms))?,
        None => find_path(&maze, map.start(), map.goal(), &config)?,
    };
    report::write_outcome(out, &map, &outcome, started.elapsed(), style)?;
    Ok(())
}
