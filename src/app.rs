use crate::config::AppConfig;
use crate::life::Grid;
use crate::patterns::{self, Pattern, PATTERNS};
use crate::settings::{GameSettings, Theme, ViewMode};
use std::time::{Duration, Instant};

/// Interval change per Up/Down press on the speed field
const INTERVAL_STEP_MS: i64 = 50;

/// Focus state for the sidebar form and the grid cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Rows,
    Cols,
    Interval,
    Pattern,
    #[default]
    Grid,
    // Controls box (scrolls with the arrow keys)
    Controls,
}

impl Focus {
    /// Tab cycles through the form fields and the grid
    pub fn next(&self) -> Focus {
        match self {
            Focus::Controls => Focus::Rows,
            Focus::Rows => Focus::Cols,
            Focus::Cols => Focus::Interval,
            Focus::Interval => Focus::Pattern,
            Focus::Pattern => Focus::Grid,
            Focus::Grid => Focus::Controls,
        }
    }

    /// Shift+Tab cycles backwards
    pub fn prev(&self) -> Focus {
        match self {
            Focus::Rows => Focus::Controls,
            Focus::Cols => Focus::Rows,
            Focus::Interval => Focus::Cols,
            Focus::Pattern => Focus::Interval,
            Focus::Grid => Focus::Pattern,
            Focus::Controls => Focus::Grid,
        }
    }

    /// Fields that belong to the "Set Game" form
    pub fn is_form_field(&self) -> bool {
        matches!(self, Focus::Rows | Focus::Cols | Focus::Interval)
    }
}

/// Main application state
pub struct App {
    pub grid: Grid,
    /// Settings the current grid was built with
    pub settings: GameSettings,
    /// Pending form values, applied by "Set Game"
    pub form: GameSettings,
    pub running: bool,
    pub generation: u64,
    last_step: Option<Instant>,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub controls_scroll: u16,
    pub focus: Focus,
    /// Cursor cell as (row, col)
    pub cursor: (usize, usize),
    /// Top-left visible cell as (row, col)
    pub viewport: (usize, usize),
    /// Inner canvas size in terminal cells as (width, height)
    pub canvas: (u16, u16),
    pub pattern_idx: usize,
    pub status: String,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let settings = config.settings.clamped();
        Self {
            grid: Grid::construct(settings.rows, settings.cols, config.randomize_on_start),
            settings,
            form: settings,
            running: false,
            generation: 0,
            last_step: None,
            theme: config.theme,
            view_mode: config.view_mode,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            controls_scroll: 0,
            focus: Focus::Grid,
            cursor: (0, 0),
            viewport: (0, 0),
            canvas: (0, 0),
            pattern_idx: 0,
            status: String::from("Ready"),
        }
    }

    /// Snapshot of the current settings for saving
    pub fn to_config(&self, randomize_on_start: bool) -> AppConfig {
        AppConfig {
            settings: self.settings,
            theme: self.theme,
            view_mode: self.view_mode,
            randomize_on_start,
            ..AppConfig::default()
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.settings.interval_ms)
    }

    /// Advance one generation if running and the interval has elapsed.
    /// Returns true when a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let due = self
            .last_step
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval());
        if !due {
            return false;
        }

        let had_life = !self.grid.is_extinct();
        self.advance();
        self.last_step = Some(now);

        // Keeps running on an empty grid so cells can be drawn in
        if had_life && self.grid.is_extinct() {
            self.status = format!("Extinct at generation {}", self.generation);
            log::info!("population died out at generation {}", self.generation);
        }
        true
    }

    fn advance(&mut self) {
        self.grid = self.grid.advance();
        self.generation += 1;
        log::debug!(
            "generation {} population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Start the timer; the first generation is computed on the next tick
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_step = None;
            self.status = String::from("Running");
            log::info!("started at generation {}", self.generation);
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.status = String::from("Stopped");
            log::info!("stopped at generation {}", self.generation);
        }
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Single manual step, only while stopped
    pub fn step_once(&mut self) {
        if !self.running {
            self.advance();
            self.status = format!("Stepped to generation {}", self.generation);
        }
    }

    /// Replace the grid with a random one of the same size
    pub fn shuffle(&mut self) {
        self.replace_grid(Grid::construct(self.settings.rows, self.settings.cols, true));
        self.status = format!("Shuffled, {} alive", self.grid.population());
    }

    /// Replace the grid with an empty one of the same size
    pub fn clear(&mut self) {
        self.replace_grid(Grid::new(self.settings.rows, self.settings.cols));
        self.status = String::from("Cleared");
    }

    /// Apply the pending form ("Set Game"): new settings and a fresh empty grid
    pub fn apply_form(&mut self) {
        self.settings = self.form.clamped();
        self.form = self.settings;
        self.replace_grid(Grid::new(self.settings.rows, self.settings.cols));
        self.status = format!(
            "Set {}x{} @ {} ms",
            self.settings.rows, self.settings.cols, self.settings.interval_ms
        );
        log::info!("applied settings {:?}", self.settings);
    }

    /// Whether the form holds edits that have not been applied
    pub fn form_dirty(&self) -> bool {
        self.form != self.settings
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
        self.cursor = (
            self.cursor.0.min(self.grid.rows().saturating_sub(1)),
            self.cursor.1.min(self.grid.cols().saturating_sub(1)),
        );
        self.viewport = (0, 0);
        self.ensure_cursor_visible();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
        self.viewport = (0, 0);
        self.ensure_cursor_visible();
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    pub fn scroll_controls_up(&mut self) {
        self.controls_scroll = self.controls_scroll.saturating_sub(1);
    }

    pub fn scroll_controls_down(&mut self, max_scroll: u16) {
        self.controls_scroll = (self.controls_scroll + 1).min(max_scroll);
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Up arrow on the focused field
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::Rows => self.form.adjust_rows(1),
            Focus::Cols => self.form.adjust_cols(1),
            Focus::Interval => self.form.adjust_interval(INTERVAL_STEP_MS),
            Focus::Pattern => self.pattern_idx = patterns::next_index(self.pattern_idx),
            Focus::Grid => self.move_cursor(-1, 0),
            Focus::Controls => self.scroll_controls_up(),
        }
    }

    /// Down arrow on the focused field
    pub fn adjust_focused_down(&mut self, max_controls_scroll: u16) {
        match self.focus {
            Focus::Rows => self.form.adjust_rows(-1),
            Focus::Cols => self.form.adjust_cols(-1),
            Focus::Interval => self.form.adjust_interval(-INTERVAL_STEP_MS),
            Focus::Pattern => self.pattern_idx = patterns::prev_index(self.pattern_idx),
            Focus::Grid => self.move_cursor(1, 0),
            Focus::Controls => self.scroll_controls_down(max_controls_scroll),
        }
    }

    /// Enter on the focused field
    pub fn confirm_focused(&mut self) {
        match self.focus {
            Focus::Rows | Focus::Cols | Focus::Interval => self.apply_form(),
            Focus::Pattern => self.stamp_pattern(),
            Focus::Grid => self.toggle_cursor_cell(),
            Focus::Controls => {}
        }
    }

    pub fn selected_pattern(&self) -> &'static Pattern {
        &PATTERNS[self.pattern_idx]
    }

    /// Stamp the selected pattern with its top-left at the cursor
    pub fn stamp_pattern(&mut self) {
        let pattern = self.selected_pattern();
        let (row, col) = self.cursor;
        let written = self.grid.stamp(pattern, row, col);
        self.status = if written < pattern.cells.len() {
            format!("{} clipped at edge", pattern.name)
        } else {
            format!("Placed {}", pattern.name)
        };
    }

    /// Move the cursor, clamped to the grid
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max_row = self.grid.rows().saturating_sub(1);
        let max_col = self.grid.cols().saturating_sub(1);
        self.cursor = (
            self.cursor.0.saturating_add_signed(d_row).min(max_row),
            self.cursor.1.saturating_add_signed(d_col).min(max_col),
        );
        self.ensure_cursor_visible();
    }

    pub fn toggle_cursor_cell(&mut self) {
        let (row, col) = self.cursor;
        if let Err(err) = self.grid.toggle(row, col) {
            log::warn!("{err}");
        }
    }

    /// Handle a click at (x, y) relative to the inner canvas.
    /// Only block view maps clicks to single cells, and the help overlay
    /// swallows them; returns true if a cell was toggled.
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        if self.show_help || self.view_mode != ViewMode::Blocks {
            return false;
        }
        let row = self.viewport.0 + y as usize;
        let col = self.viewport.1 + x as usize / self.view_mode.chars_per_cell();
        if row >= self.grid.rows() || col >= self.grid.cols() {
            return false;
        }
        self.cursor = (row, col);
        self.focus = Focus::Grid;
        self.grid.toggle(row, col).is_ok()
    }

    /// Record the new canvas size and keep the cursor on screen
    pub fn resize(&mut self, canvas_width: u16, canvas_height: u16) {
        self.canvas = (canvas_width, canvas_height);
        self.ensure_cursor_visible();
    }

    /// Number of grid cells that fit on the canvas as (rows, cols)
    pub fn visible_cells(&self) -> (usize, usize) {
        let (width, height) = self.canvas;
        match self.view_mode {
            ViewMode::Blocks => (height as usize, width as usize / self.view_mode.chars_per_cell()),
            ViewMode::Braille => {
                let (per_row, per_col) = self.view_mode.cells_per_char();
                (height as usize * per_row, width as usize * per_col)
            }
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let (visible_rows, visible_cols) = self.visible_cells();
        self.viewport = (
            scroll_to(self.viewport.0, self.cursor.0, visible_rows),
            scroll_to(self.viewport.1, self.cursor.1, visible_cols),
        );
    }
}

fn scroll_to(offset: usize, target: usize, visible: usize) -> usize {
    if visible == 0 {
        offset
    } else if target < offset {
        target
    } else if target >= offset + visible {
        target + 1 - visible
    } else {
        offset
    }
}
