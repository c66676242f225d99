#![forbid(unsafe_code)]

//! sortviz binary entry point.

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use sortviz::app::App;
use sortviz::cli::Opts;
use sortviz::logging::LogConfig;
use sortviz::terminal_session::TerminalSession;
use sortviz_render::{CellGrid, Presenter};
use sortviz_runtime::RunController;

/// Input poll timeout; also the redraw cadence while a run is stepping.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() {
    let opts = Opts::parse();

    if let Some(log) = LogConfig::from_env()
        && let Err(e) = log.install()
    {
        eprintln!("Failed to start logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&opts) {
        tracing::error!(error = %e, "sortviz failed");
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> io::Result<()> {
    let config = opts.config();
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let (tx, rx) = mpsc::channel();
    let mut controller = RunController::new(config, tx);
    if let Some(algorithm) = opts.algorithm {
        controller.select(algorithm);
    }
    let mut app = App::new(controller, rx);

    let session = TerminalSession::new()?;
    let (width, height) = session.size()?;
    let mut grid = CellGrid::new(width, height);
    let mut presenter = Presenter::new(io::stdout());
    tracing::info!(width, height, "ui started");

    if opts.autostart {
        app.start();
    }

    let deadline = opts.exit_after().map(|after| Instant::now() + after);
    loop {
        if app.is_dirty() {
            app.view(&mut grid);
            presenter.present(&grid)?;
        }

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(width, height) => {
                    tracing::debug!(width, height, "resize");
                    grid = CellGrid::new(width, height);
                    presenter.invalidate();
                    app.mark_dirty();
                }
                _ => {}
            }
        }
        app.pump();

        if app.should_quit() || deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
    }

    // Stop the run before the terminal is restored.
    drop(app);
    drop(session);
    tracing::info!("ui stopped");
    Ok(())
}
