mod app;
mod braille;
mod config;
mod error;
mod life;
mod patterns;
mod settings;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use settings::Theme;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "life-simulator")]
#[command(about = "Conway's Game of Life in the terminal")]
struct Args {
    /// Number of grid rows (1-200)
    #[arg(short = 'r', long)]
    rows: Option<usize>,

    /// Number of grid columns (1-200)
    #[arg(short = 'c', long)]
    cols: Option<usize>,

    /// Milliseconds between generations (10-10000)
    #[arg(short = 'i', long)]
    interval: Option<u64>,

    /// Color theme (light, dark)
    #[arg(long)]
    theme: Option<String>,

    /// Start with a randomly filled grid
    #[arg(long)]
    random: bool,

    /// Shape selected for placing with P (block, blinker, toad, beacon, glider, lwss, r-pentomino, pulsar)
    #[arg(long, default_value = "glider")]
    shape: String,

    /// Settings file to load (defaults to the user config dir if it exists)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resulting settings back to the config file before starting
    #[arg(long = "save-config")]
    save_config: bool,

    /// Write logs to this file (RUST_LOG sets the level, default info)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn parse_theme(s: &str) -> Theme {
    match s.to_lowercase().as_str() {
        "dark" | "night" => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Index of the shape named on the command line; unknown names fall back to the glider
fn initial_pattern(name: &str) -> usize {
    patterns::pattern_index(name).unwrap_or_else(|| {
        log::warn!("unknown shape {name:?}, using glider");
        patterns::pattern_index("glider").unwrap_or(0)
    })
}

/// Route log output to a file; stderr would draw over the alternate screen
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Resolve the config file location: explicit flag, else the default path
fn config_path(args: &Args) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| AppConfig::default_path().ok())
}

fn build_config(args: &Args) -> Result<AppConfig, error::ConfigError> {
    let mut config = match (&args.config, config_path(args)) {
        (Some(path), _) => AppConfig::load_from_file(path)?,
        (None, Some(path)) if path.exists() => AppConfig::load_from_file(&path)?,
        _ => AppConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.settings.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.settings.cols = cols;
    }
    if let Some(interval) = args.interval {
        config.settings.interval_ms = interval;
    }
    if let Some(theme) = &args.theme {
        config.theme = parse_theme(theme);
    }
    if args.random {
        config.randomize_on_start = true;
    }

    config.settings.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = build_config(&args)?;
    let save_path = config_path(&args);
    if args.save_config {
        let path = save_path.clone().ok_or(error::ConfigError::NoConfigDir)?;
        config.save_to_file(&path)?;
    }
    log::info!("starting with {:?}", config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    app.pattern_idx = initial_pattern(&args.shape);
    sync_canvas_size(&terminal, &mut app)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app, save_path, config.randomize_on_start);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("event loop failed: {err}");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn frame_rect<B: ratatui::backend::Backend>(terminal: &Terminal<B>) -> io::Result<Rect> {
    let size = terminal.size()?;
    Ok(Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    })
}

fn sync_canvas_size<B: ratatui::backend::Backend>(
    terminal: &Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let (width, height) = ui::get_canvas_size(frame_rect(terminal)?, app.fullscreen_mode);
    app.resize(width, height);
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    save_path: Option<PathBuf>,
    randomize_on_start: bool,
) -> io::Result<()> {
    // Input poll timeout; generations are paced by App::tick
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_running(),
                        KeyCode::Char('n') | KeyCode::Char('N') => app.step_once(),
                        KeyCode::Char('s') | KeyCode::Char('S') => app.shuffle(),
                        KeyCode::Char('c') | KeyCode::Char('C') => app.clear(),
                        KeyCode::Char('p') | KeyCode::Char('P') => app.stamp_pattern(),
                        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.cycle_view_mode(),
                        KeyCode::Char('f') | KeyCode::Char('F') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }
                        KeyCode::Char('w') | KeyCode::Char('W') => {
                            save_settings(app, save_path.as_ref(), randomize_on_start)
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        KeyCode::Enter => app.confirm_focused(),

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => app.adjust_focused_up(),
                        KeyCode::Down => {
                            let term_size = terminal.size().unwrap_or_default();
                            let visible = ui::get_controls_visible_lines(term_size.height);
                            app.adjust_focused_down(
                                ui::CONTROLS_CONTENT_LINES.saturating_sub(visible),
                            );
                        }
                        KeyCode::Left if app.focus == Focus::Grid => app.move_cursor(0, -1),
                        KeyCode::Right if app.focus == Focus::Grid => app.move_cursor(0, 1),
                        KeyCode::Left if app.focus.is_form_field() => app.adjust_focused_down(0),
                        KeyCode::Right if app.focus.is_form_field() => app.adjust_focused_up(),
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else {
                                app.form = app.settings;
                                app.focus = Focus::Grid;
                            }
                        }
                        _ => {}
                    }

                    // Fullscreen and view changes alter the canvas geometry
                    sync_canvas_size(terminal, app)?;
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let canvas = ui::canvas_inner_rect(frame_rect(terminal)?, app.fullscreen_mode);
                        let inside = mouse.column >= canvas.x
                            && mouse.column < canvas.x + canvas.width
                            && mouse.row >= canvas.y
                            && mouse.row < canvas.y + canvas.height;
                        if inside {
                            app.click(mouse.column - canvas.x, mouse.row - canvas.y);
                        }
                    }
                }
                Event::Resize(width, height) => {
                    let (canvas_width, canvas_height) = ui::get_canvas_size(
                        Rect {
                            x: 0,
                            y: 0,
                            width,
                            height,
                        },
                        app.fullscreen_mode,
                    );
                    app.resize(canvas_width, canvas_height);
                }
                _ => {}
            }
        }

        // Run simulation tick
        app.tick(Instant::now());
    }
}

fn save_settings(app: &mut App, path: Option<&PathBuf>, randomize_on_start: bool) {
    let Some(path) = path else {
        app.status = String::from("No config directory");
        return;
    };
    match app.to_config(randomize_on_start).save_to_file(path) {
        Ok(()) => app.status = String::from("Settings saved"),
        Err(err) => {
            log::warn!("{err}");
            app.status = String::from("Save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("DARK"), Theme::Dark);
        assert_eq!(parse_theme("light"), Theme::Light);
        assert_eq!(parse_theme("unknown"), Theme::Light);
    }

    #[test]
    fn test_initial_pattern_falls_back_to_glider() {
        let glider = patterns::pattern_index("glider").unwrap();
        assert_eq!(patterns::PATTERNS[initial_pattern("PULSAR")].name, "Pulsar");
        assert_eq!(initial_pattern("gosper-gun"), glider);
        let args = Args::parse_from(["life-simulator"]);
        assert_eq!(initial_pattern(&args.shape), glider);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let mut saved = AppConfig::default();
        saved.settings.rows = 50;
        saved.settings.interval_ms = 300;
        saved.save_to_file(temp.path()).unwrap();

        let path = temp.path().to_str().unwrap();
        let args = Args::parse_from(["life-simulator", "--config", path, "--rows", "30", "--theme", "dark"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.settings.rows, 30);
        assert_eq!(config.settings.interval_ms, 300);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_invalid_cli_dimensions_rejected() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        AppConfig::default().save_to_file(temp.path()).unwrap();

        let path = temp.path().to_str().unwrap();
        let args = Args::parse_from(["life-simulator", "--config", path, "--cols", "0"]);
        assert!(matches!(
            build_config(&args),
            Err(error::ConfigError::Validation(_))
        ));
    }
}
