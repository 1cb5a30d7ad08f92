mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::App;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logic::WeatherService;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::DashboardScreen;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    let config_path = cli.config.as_deref();
    let config = match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive(config_path)
                .context("Interactive setup failed")?
                .0
        }
        None if !Config::exists(config_path) => {
            println!("No configuration found - starting setup.");
            Config::setup_interactive(config_path)
                .context("Interactive setup failed")?
                .0
        }
        _ => match Config::load(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                eprintln!("Run `skyglance init` or copy config/config.yaml.example to config/config.yaml");
                std::process::exit(1);
            }
        },
    };

    let service = WeatherService::new(config).context("Failed to create HTTP client")?;

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => check(&service).await,
        Some(Commands::Print) => print_once(&service, &cli).await,
        None => run_tui(&service, &cli).await,
    }
}

/// `RUST_LOG` overrides `-v`. The TUI owns the terminal, so it logs to a file.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let log_file = dirs::cache_dir()
        .map(|dir| dir.join("skyglance"))
        .and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("skyglance.log"))
                .ok()
        });

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

async fn check(service: &WeatherService) -> anyhow::Result<()> {
    let endpoint = &service.config().openweathermap.base_url;
    match service.check_connection().await {
        Ok(true) => {
            println!("OpenWeatherMap ({}): OK", endpoint);
            Ok(())
        }
        Ok(false) => {
            println!("OpenWeatherMap ({}): FAILED", endpoint);
            std::process::exit(1);
        }
        Err(e) => {
            println!("OpenWeatherMap ({}): FAILED - {}", endpoint, e);
            std::process::exit(1);
        }
    }
}

async fn print_once(service: &WeatherService, cli: &Cli) -> anyhow::Result<()> {
    let request = cli.initial_request();
    let report = service
        .load(&request)
        .await
        .with_context(|| format!("Failed to load weather for {:?}", request))?;
    print!("{}", ui::plain::render_report(&report, Utc::now()));
    Ok(())
}

async fn run_tui(service: &WeatherService, cli: &Cli) -> anyhow::Result<()> {
    let mut app = App::new(cli.initial_request());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn draw(terminal: &mut Tui, app: &App) -> io::Result<()> {
    terminal.draw(|f| {
        let screen = DashboardScreen::new(app.report.as_ref(), Utc::now())
            .with_status(app.status.as_ref())
            .with_search(&app.search_state.buffer, app.search_state.editing);
        f.render_widget(screen, f.area());
    })?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    service: &WeatherService,
) -> anyhow::Result<()> {
    loop {
        // Pending loads draw their status first, then block until settled
        if let Some(request) = app.take_pending() {
            draw(terminal, app)?;
            let result = service.load(&request).await;
            app.apply_result(request, result);
        }

        draw(terminal, app)?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
