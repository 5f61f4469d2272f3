//! Muhtasib: terminal dashboard for trading sessions.
//!
//! Sidebar lists the sessions known to the backend; opening one shows its
//! statistics, a live equity curve, the daily return distribution and the
//! order tape.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use muhtasib_core::config::BASE_URL_ENV;
use muhtasib_core::{DashboardConfig, HttpSessionApi, SessionApi};
use muhtasib_tui::app::AppState;
use muhtasib_tui::route::Route;
use muhtasib_tui::worker::{self, WorkerCommand};
use muhtasib_tui::{input, logging, ui};

#[derive(Parser, Debug)]
#[command(name = "muhtasib", version, about = "Terminal dashboard for trading sessions")]
struct Cli {
    /// Backend base address, e.g. http://127.0.0.1:8888
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Config file. Defaults to <config dir>/muhtasib/dashboard.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Route to open on start: `/` or `/session/<id>`
    #[arg(long, default_value = "/", value_parser = Route::parse)]
    route: Route,
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("muhtasib")
        .join("dashboard.toml")
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_or_default(&default_config_path())?,
    };
    let config = config.override_base_url([cli.base_url.clone()]);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.log)?;
    info!(base_url = %config.api.base_url, route = %cli.route, "muhtasib starting");

    let api: Arc<dyn SessionApi> =
        Arc::new(HttpSessionApi::new(&config.api).context("building HTTP client")?);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(api, cmd_rx, resp_tx)?;

    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        config.poll.interval(),
        config.api.base_url.clone(),
    );
    app.start(cli.route.clone(), Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("muhtasib stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key, Instant::now());
            }
        }

        // 4. Fire the poll timer
        app.tick(Instant::now());

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
