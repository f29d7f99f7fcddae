use crate::error::ConfigError;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: usize = 1;
pub const MAX_DIMENSION: usize = 200;
pub const MIN_INTERVAL_MS: u64 = 10;
pub const MAX_INTERVAL_MS: u64 = 10_000;

/// Actions accepted by the theme reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    LightMode,
    DarkMode,
}

/// Light/dark presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn name(&self) -> &str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Apply an action; the result depends only on the action
    pub fn reduce(self, action: ThemeAction) -> Theme {
        match action {
            ThemeAction::LightMode => Theme::Light,
            ThemeAction::DarkMode => Theme::Dark,
        }
    }

    /// Dispatch the action that switches to the other mode
    pub fn toggle(self) -> Theme {
        let action = match self {
            Theme::Light => ThemeAction::DarkMode,
            Theme::Dark => ThemeAction::LightMode,
        };
        self.reduce(action)
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                live: Color::Rgb(148, 0, 211),
                dead: Color::Rgb(169, 169, 169),
                background: Color::Rgb(245, 240, 211),
                text: Color::Rgb(74, 74, 74),
                dim_text: Color::Rgb(120, 120, 120),
                border: Color::Rgb(128, 0, 128),
                highlight: Color::Rgb(200, 80, 0),
                cursor: Color::Rgb(0, 120, 215),
            },
            Theme::Dark => Palette {
                live: Color::Rgb(186, 85, 211),
                dead: Color::Rgb(60, 60, 60),
                background: Color::Rgb(24, 24, 28),
                text: Color::White,
                dim_text: Color::Gray,
                border: Color::Cyan,
                highlight: Color::Yellow,
                cursor: Color::Rgb(0, 200, 255),
            },
        }
    }
}

/// Colors used to draw the UI for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub live: Color,
    pub dead: Color,
    pub background: Color,
    pub text: Color,
    pub dim_text: Color,
    pub border: Color,
    pub highlight: Color,
    pub cursor: Color,
}

/// How the grid is drawn on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One cell per two terminal columns
    #[default]
    Blocks,
    /// 2x4 cells per braille glyph, for grids larger than the terminal
    Braille,
}

impl ViewMode {
    pub fn name(&self) -> &str {
        match self {
            ViewMode::Blocks => "Blocks",
            ViewMode::Braille => "Braille",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ViewMode::Blocks => ViewMode::Braille,
            ViewMode::Braille => ViewMode::Blocks,
        }
    }

    /// Grid cells covered by one terminal character as (rows, cols)
    pub fn cells_per_char(&self) -> (usize, usize) {
        match self {
            ViewMode::Blocks => (1, 1),
            ViewMode::Braille => (4, 2),
        }
    }

    /// Terminal columns used per cell horizontally (blocks are drawn double width)
    pub fn chars_per_cell(&self) -> usize {
        match self {
            ViewMode::Blocks => 2,
            ViewMode::Braille => 1,
        }
    }
}

/// Grid dimensions and tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Number of grid rows (1-200)
    pub rows: usize,
    /// Number of grid columns (1-200)
    pub cols: usize,
    /// Milliseconds between generations (10-10000)
    pub interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            interval_ms: 1000,
        }
    }
}

impl GameSettings {
    /// Adjust row count within bounds
    pub fn adjust_rows(&mut self, delta: i32) {
        self.rows = adjust_dimension(self.rows, delta);
    }

    /// Adjust column count within bounds
    pub fn adjust_cols(&mut self, delta: i32) {
        self.cols = adjust_dimension(self.cols, delta);
    }

    /// Adjust the tick interval within bounds
    pub fn adjust_interval(&mut self, delta: i64) {
        self.interval_ms = (self.interval_ms as i64 + delta)
            .clamp(MIN_INTERVAL_MS as i64, MAX_INTERVAL_MS as i64) as u64;
    }

    /// Clamp every field into its valid range
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.clamp(MIN_DIMENSION, MAX_DIMENSION),
            cols: self.cols.clamp(MIN_DIMENSION, MAX_DIMENSION),
            interval_ms: self.interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS),
        }
    }

    /// Reject values outside the supported ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.rows) {
            return Err(ConfigError::Validation(format!(
                "rows must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {}",
                self.rows
            )));
        }
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.cols) {
            return Err(ConfigError::Validation(format!(
                "cols must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {}",
                self.cols
            )));
        }
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            return Err(ConfigError::Validation(format!(
                "interval must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS} ms, got {}",
                self.interval_ms
            )));
        }
        Ok(())
    }
}

fn adjust_dimension(value: usize, delta: i32) -> usize {
    (value as i64 + delta as i64).clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as usize
}
