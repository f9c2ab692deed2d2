//! mirrorwalk - mirrored drunkard's-walk room generator
//!
//! Animates generation in the terminal, or prints a finished map with `--headless`.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event;
use log::error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use mw_tui::{App, ConfigOverrides, GraphicsMode, OutputFormat, Theme, headless, terminal};

/// Mirrored drunkard's-walk room generator
#[derive(Parser, Debug)]
#[command(name = "mirrorwalk")]
#[command(author, version, about = "Carve a mirrored room with random walkers", long_about = None)]
struct Args {
    /// Grid width
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Maximum number of concurrent walkers
    #[arg(short = 'n', long)]
    walkers: Option<usize>,

    /// Fraction of the grid to carve, in (0, 1)
    #[arg(short = 'f', long)]
    fill: Option<f32>,

    /// Per-tick chance of a walker changing course, in [0, 1]
    #[arg(short = 'c', long)]
    change: Option<f32>,

    /// RNG seed for a reproducible map
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON config file; command-line values override it
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Milliseconds between animated ticks
    #[arg(long = "delay-ms", default_value_t = 20)]
    delay_ms: u64,

    /// Glyph set for the map (classic, fancy)
    #[arg(short = 'g', long, default_value_t = GraphicsMode::Classic)]
    graphics: GraphicsMode,

    /// Colors for a light terminal background
    #[arg(long)]
    light: bool,

    /// Print the finished map to stdout instead of opening the viewer
    #[arg(long)]
    headless: bool,

    /// With --headless, print JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// Debug-level logging (headless only)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            width: self.width,
            height: self.height,
            max_walkers: self.walkers,
            fill_percentage: self.fill,
            change_probability: self.change,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Log lines would scribble over the alternate screen
    if args.headless {
        let level = if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    let result = if args.headless {
        run_headless(&args)
    } else {
        run_viewer(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("mirrorwalk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_headless(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.overrides().resolve(args.config.as_deref())?;
    let generated = mw_core::generate(config)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Ascii
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(headless::render(&generated, format)?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run_viewer(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.overrides().resolve(args.config.as_deref())?;
    let theme = if args.light {
        Theme::light()
    } else {
        Theme::dark()
    };
    let mut app = App::new(config, args.graphics, Duration::from_millis(args.delay_ms))?
        .with_theme(theme);

    let _terminal_guard = terminal::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, &mut app)?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let frame_time = Duration::from_millis(16);

    while !app.should_quit() {
        app.update(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(frame_time)? {
            if let Some(command) = app.handle_event(event::read()?) {
                app.execute(command);
            }
        }
    }
    Ok(())
}
