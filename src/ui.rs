use crate::app::{App, Focus};
use crate::braille;
use crate::settings::{Palette, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Number of lines in controls content
pub const CONTROLS_CONTENT_LINES: u16 = 15;

const STATUS_HEIGHT: u16 = 7;
const FORM_HEIGHT: u16 = 6;

const LIVE_CELL: &str = "██";
const CURSOR_CELL: &str = "[]";

/// Creates a standard styled block with rounded borders
fn styled_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.background))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = app.theme.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    if app.fullscreen_mode {
        render_canvas(frame, area, app, &palette);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app, &palette);
        render_canvas(frame, layout[1], app, &palette);
    }

    if app.show_help {
        render_help_overlay(frame, area, app, &palette);
    }
}

/// Calculate the canvas size (excluding borders)
pub fn get_canvas_size(frame_area: Rect, fullscreen: bool) -> (u16, u16) {
    let canvas = canvas_inner_rect(frame_area, fullscreen);
    (canvas.width, canvas.height)
}

/// Screen rectangle of the canvas interior, used to map mouse clicks
pub fn canvas_inner_rect(frame_area: Rect, fullscreen: bool) -> Rect {
    let left = if fullscreen { 0 } else { SIDEBAR_WIDTH.min(frame_area.width) };
    Rect {
        x: frame_area.x + left + 1,
        y: frame_area.y + 1,
        width: frame_area.width.saturating_sub(left + 2),
        height: frame_area.height.saturating_sub(2),
    }
}

/// Lines of the controls box that fit for a given terminal height
pub fn get_controls_visible_lines(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(STATUS_HEIGHT + FORM_HEIGHT)
        .saturating_sub(2)
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(3),
        ])
        .split(area);

    render_status_box(frame, sections[0], app, palette);
    render_form_box(frame, sections[1], app, palette);
    render_controls_box(frame, sections[2], app, palette);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = styled_block(" Game of Life ", palette);

    let (status_text, status_color) = if app.running {
        ("RUNNING", palette.live)
    } else {
        ("STOPPED", palette.highlight)
    };
    let text = Style::default().fg(palette.text);

    let content = vec![
        Line::from(Span::styled(
            status_text,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("Gen:   {}", app.generation), text)),
        Line::from(Span::styled(format!("Alive: {}", app.grid.population()), text)),
        Line::from(Span::styled(
            format!("Grid:  {}x{}", app.grid.rows(), app.grid.cols()),
            text,
        )),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(palette.dim_text),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_form_box(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let title = if app.form_dirty() {
        " Set Game (Enter) "
    } else {
        " Set Game "
    };
    let block = styled_block(title, palette);

    let make_line = |label: &str, value: String, changed: bool, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let marker = if changed { "*" } else { "" };
        let style = if focused {
            Style::default().fg(palette.highlight)
        } else {
            Style::default().fg(palette.text)
        };
        Line::from(Span::styled(format!("{prefix}{label}: {value}{marker}"), style))
    };

    let form = &app.form;
    let applied = &app.settings;

    let content = vec![
        make_line("Rows", form.rows.to_string(), form.rows != applied.rows, app.focus == Focus::Rows),
        make_line("Cols", form.cols.to_string(), form.cols != applied.cols, app.focus == Focus::Cols),
        make_line(
            "Speed",
            format!("{}ms", form.interval_ms),
            form.interval_ms != applied.interval_ms,
            app.focus == Focus::Interval,
        ),
        make_line(
            "Shape",
            app.selected_pattern().name.to_string(),
            false,
            app.focus == Focus::Pattern,
        ),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let key_style = Style::default().fg(palette.highlight);
    let desc_style = Style::default().fg(palette.dim_text);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", if app.running { "stop" } else { "start" }.to_string()),
        make_control("N", "step once".to_string()),
        make_control("S", "shuffle".to_string()),
        make_control("C", "clear".to_string()),
        make_control("Enter", "toggle / apply".to_string()),
        make_control("Click", "toggle cell".to_string()),
        make_control("P", "place shape".to_string()),
        make_control("Tab", "next field".to_string()),
        make_control("Arrow", "move / adjust".to_string()),
        make_control("T", format!("theme: {}", app.theme.name())),
        make_control("V", format!("view: {}", app.view_mode.name())),
        make_control("F", "fullscreen".to_string()),
        make_control("W", "save settings".to_string()),
        make_control("H/?", "help".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let content_height = content.len() as u16;
    let visible_height = area.height.saturating_sub(2); // minus borders
    let is_scrollable = content_height > visible_height;

    let title = if app.focus == Focus::Controls {
        " > Controls (↑↓) "
    } else if is_scrollable {
        " Controls (↑↓) "
    } else {
        " Controls "
    };

    let block = styled_block(title, palette);

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((app.controls_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = styled_block("", palette);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor = (app.focus == Focus::Grid).then_some(app.cursor);

    let lines = match app.view_mode {
        ViewMode::Blocks => block_lines(app, cursor, inner, palette),
        ViewMode::Braille => braille_lines(app, cursor, inner, palette),
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Two terminal columns per cell, one row per cell
fn block_lines<'a>(
    app: &App,
    cursor: Option<(usize, usize)>,
    inner: Rect,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let (visible_rows, visible_cols) = app.visible_cells();
    let (top, left) = app.viewport;
    let rows = visible_rows.min(inner.height as usize).min(app.grid.rows().saturating_sub(top));
    let cols = visible_cols.min(app.grid.cols().saturating_sub(left));

    (top..top + rows)
        .map(|row| {
            let spans: Vec<Span> = (left..left + cols)
                .map(|col| {
                    let color = if app.grid.is_alive(row, col) {
                        palette.live
                    } else {
                        palette.dead
                    };
                    if cursor == Some((row, col)) {
                        Span::styled(CURSOR_CELL, Style::default().fg(palette.cursor).bg(color))
                    } else {
                        Span::styled(LIVE_CELL, Style::default().fg(color))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Braille glyphs, 2x4 cells per character
fn braille_lines<'a>(
    app: &App,
    cursor: Option<(usize, usize)>,
    inner: Rect,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let cells = braille::render_to_braille(&app.grid, app.viewport, cursor, inner.width, inner.height);

    let mut rows: Vec<Vec<Span>> = vec![Vec::new(); inner.height as usize];
    let mut next_x = vec![0u16; inner.height as usize];

    // Cells arrive in row-major order, so padding only ever moves forward
    for cell in cells {
        let y = cell.y as usize;
        if cell.x > next_x[y] {
            rows[y].push(Span::raw(" ".repeat((cell.x - next_x[y]) as usize)));
        }
        let style = if cell.has_cursor {
            Style::default().fg(palette.live).bg(palette.cursor)
        } else {
            Style::default().fg(palette.live)
        };
        rows[y].push(Span::styled(cell.char.to_string(), style));
        next_x[y] = cell.x + 1;
    }

    rows.into_iter().map(Line::from).collect()
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let heading = Style::default().fg(palette.highlight);
    let text = Style::default().fg(palette.text);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("CONWAY'S GAME OF LIFE", Style::default().fg(palette.border))),
        Line::from(""),
        Line::from(Span::styled("Each generation, every cell looks at its eight neighbors. Cells beyond the edge count as dead.", text)),
        Line::from(""),
        Line::from(Span::styled("RULES:", heading)),
        Line::from(Span::styled("A live cell with 2 or 3 live neighbors survives, otherwise it dies.", text)),
        Line::from(Span::styled("A dead cell with exactly 3 live neighbors is born.", text)),
        Line::from(""),
        Line::from(Span::styled("SET GAME:", heading)),
        Line::from(Span::styled("Tab to Rows/Cols/Speed, adjust with arrows, Enter to apply. Applying builds a new empty grid.", text)),
        Line::from(""),
        Line::from(Span::styled("EDITING:", heading)),
        Line::from(Span::styled("Click a cell or move the cursor with the arrows and press Enter to toggle it. Pick a shape in the form and press P to place it at the cursor.", text)),
        Line::from(""),
        Line::from(Span::styled("VIEW:", heading)),
        Line::from(Span::styled("T switches light/dark, V switches between blocks and braille (4x2 cells per character), F hides the sidebar.", text)),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", heading)),
        Line::from(Span::styled("Space=Start/Stop, N=Step, S=Shuffle, C=Clear, W=Save settings, Q=Quit", text)),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.highlight))
        .style(Style::default().bg(palette.background))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
