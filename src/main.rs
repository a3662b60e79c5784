use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pagenav::app::AppState;
use pagenav::async_tasks::{AsyncTaskRunner, TaskMessage};
use pagenav::cli::Cli;
use pagenav::constants::{
    FRAME_DURATION_MS, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, RESIZE_DEBOUNCE_MS,
};
use pagenav::error::{AppError, Result};
use pagenav::intent::Intent;
use pagenav::persistence::PersistenceManager;
use pagenav::types::{Config, LoadingState, UiMode};
use pagenav::ui;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate().map_err(AppError::Other)?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = match &cli.log_file {
        Some(log_file) => {
            let guard = init_logging(log_file)?;
            tracing::info!("=== pagenav starting ===");
            tracing::info!("Log file: {}", log_file);
            tracing::info!("Loading file: {}", cli.file);
            Some(guard)
        }
        None => None,
    };

    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        tracing::error!(
            "Terminal too small: {}x{} (minimum: {}x{})",
            width,
            height,
            MIN_TERMINAL_WIDTH,
            MIN_TERMINAL_HEIGHT
        );
        return Err(AppError::TerminalTooSmall);
    }
    tracing::debug!("Terminal size: {}x{}", width, height);

    setup_terminal()?;
    tracing::debug!("Terminal setup completed");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Ctrl-C received, shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    let result = run_app(cli, running).await;

    cleanup_terminal()?;
    tracing::debug!("Terminal cleanup completed");

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    // Set panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

fn cleanup_terminal() -> Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    use std::fs::OpenOptions;

    // Open/create log file, truncating if it exists
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .map_err(|e| AppError::Other(format!("Failed to open log file: {}", e)))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Only log from our crate unless RUST_LOG says otherwise
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off,pagenav=debug"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    Ok(guard)
}

async fn run_app(cli: Cli, running: Arc<AtomicBool>) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let (task_tx, mut task_rx) = mpsc::unbounded_channel();
    let (intent_tx, mut intent_rx) = mpsc::unbounded_channel();

    let mut app = initialize_app_state(&cli, intent_tx)?;

    let task_runner = AsyncTaskRunner::new(task_tx);
    let resize_tx = task_runner.spawn_resize_debouncer(RESIZE_DEBOUNCE_MS);

    tracing::info!("Starting document load: {}", cli.file);
    let _load_handle = task_runner.spawn_load_document(cli.file.clone());
    app.loading_state = LoadingState::Loading {
        file_path: cli.file.clone(),
    };

    run_event_loop(
        &mut terminal,
        &mut app,
        &mut task_rx,
        &mut intent_rx,
        running,
        &resize_tx,
    )
    .await?;

    // Listener must be gone before the page element is
    app.unmount();

    tracing::info!("pagenav shutting down");
    Ok(())
}

fn initialize_app_state(cli: &Cli, intent_tx: mpsc::UnboundedSender<Intent>) -> Result<AppState> {
    tracing::debug!("Initializing application state");

    let persistence = PersistenceManager::new().map_err(|e| {
        tracing::error!("Failed to initialize persistence: {}", e);
        AppError::ConfigDirError(e.to_string())
    })?;

    let config = persistence.load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Config::default()
    });
    tracing::debug!(
        "Config loaded: max_width={:?}, page_lines={:?}",
        config.max_width,
        config.page_lines
    );

    let mut app = AppState::new(config, intent_tx);
    app.cli_max_width_override = cli.max_width;
    app.cli_page_lines_override = cli.page_lines;
    app.start_page = cli.page;

    let (width, height) = crossterm::terminal::size()?;
    app.update_viewport_size(width, height);
    tracing::debug!(
        "Viewport initialized: {}x{}",
        app.viewport.width,
        app.viewport.height
    );

    Ok(app)
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    task_rx: &mut mpsc::UnboundedReceiver<TaskMessage>,
    intent_rx: &mut mpsc::UnboundedReceiver<Intent>,
    running: Arc<AtomicBool>,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_DURATION_MS);
    let started = Instant::now();

    while running.load(Ordering::SeqCst) && !app.should_quit {
        let frame_start = Instant::now();

        // Process all pending task messages (non-blocking)
        while let Ok(msg) = task_rx.try_recv() {
            handle_task_message(app, msg);
        }

        // Intents emitted by the pagination binding
        while let Ok(intent) = intent_rx.try_recv() {
            app.apply_intent(intent);
        }

        terminal.draw(|f| {
            ui::layout::render(f, app, started);
        })?;

        if event::poll(Duration::from_millis(0))? {
            let ev = event::read()?;
            handle_event(app, ev, resize_tx)?;
        }

        // Sleep to maintain frame rate
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }

    Ok(())
}

fn handle_task_message(app: &mut AppState, msg: TaskMessage) {
    match msg {
        TaskMessage::DocumentLoaded { text, file_path } => {
            app.load_document(text, &file_path);
        }

        TaskMessage::DocumentLoadError { error } => {
            tracing::error!("Document load error: {}", error);
            app.ui_mode = UiMode::ErrorPopup(format!("Failed to load document: {}", error));
            app.loading_state = LoadingState::Idle;
        }

        TaskMessage::ResizeComplete { width, height } => {
            tracing::info!("Resize complete: {}x{}", width, height);
            app.handle_resize_complete(width, height);
        }
    }
}

fn handle_event(
    app: &mut AppState,
    ev: Event,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    match ev {
        // Repeats count as presses, like a held-down arrow key
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            ui::handle_key_event(app, key)?;
        }
        Event::Resize(width, height) => {
            app.update_viewport_size(width, height);
            let _ = resize_tx.send((width, height));
        }
        _ => {}
    }
    Ok(())
}
