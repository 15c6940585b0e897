use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::{debug, info};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::{
    config::HostConfig,
    entities::{Side, Table},
    frame::{FrameDriver, Intent, SoundEffect},
    game_theme::GameTheme,
    helpers::{
        centered_in, centered_rect_with_percentage, px_span_to_cells, row_to_px,
        surface_height_px,
    },
    session::ButtonLabel,
    sound::SoundBoard,
};

const CONTROLS_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 12;
const PLAYER_NAMES: [&str; 2] = ["You", "Computer"];

/// Where everything sits on screen for the current terminal size.
#[derive(Debug, Clone, Copy)]
struct HostLayout {
    terminal: Rect,
    game_area: Rect,
    table_block: Rect,
    /// Inner area of `table_block`; one cell is `cell_width_px` x
    /// `cell_height_px` surface pixels.
    table: Rect,
    button: Rect,
    help: Rect,
    /// False when the terminal is smaller than the table.
    fits: bool,
}

/// Terminal host: turns crossterm events into driver calls and driver
/// intents into ratatui widgets.
#[derive(Debug)]
pub struct Game {
    driver: FrameDriver,
    config: HostConfig,
    theme: GameTheme,
    sounds: SoundBoard,
    /// Table size in cells, fixed at startup like the table itself.
    table_cols: u16,
    table_rows: u16,
    layout: HostLayout,
    // What the screen shows, as last set by intents
    ball: (f64, f64),
    paddles: [f64; 2],
    scores: [u32; 2],
    button: ButtonLabel,
    last_update: Instant,
    should_exit: bool,
}

impl Game {
    pub fn new(config: HostConfig, terminal: Rect) -> Self {
        let [game_area, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(CONTROLS_HEIGHT)])
                .areas(terminal);
        let table_cols = game_area.width.min(config.max_columns).saturating_sub(2);
        let table_rows = game_area.height.min(config.max_rows).saturating_sub(2);
        let table = Table::new(
            f64::from(table_cols) * config.cell_width_px,
            f64::from(table_rows) * config.cell_height_px,
        );
        let layout = Self::compute_layout(terminal, table_cols, table_rows);
        let surface_height = surface_height_px(layout.game_area, layout.table, config.cell_height_px);
        let driver = FrameDriver::new(table, config.element_sizes(), surface_height);
        info!(
            table_cols,
            table_rows,
            width = driver.table().width(),
            height = driver.table().height(),
            "table created"
        );

        let ball = (driver.ball().x, driver.ball().y);
        let paddles = [driver.paddle(Side::Left).y, driver.paddle(Side::Right).y];
        let button = driver.session().button_label();
        let scores = driver.session().scores();

        Self {
            driver,
            theme: config.theme,
            sounds: SoundBoard::new(config.bell),
            config,
            table_cols,
            table_rows,
            layout,
            ball,
            paddles,
            scores,
            button,
            last_update: Instant::now(),
            should_exit: false,
        }
    }

    fn compute_layout(terminal: Rect, table_cols: u16, table_rows: u16) -> HostLayout {
        let [game_area, controls] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(CONTROLS_HEIGHT)])
                .areas(terminal);
        let [button, help] =
            Layout::horizontal([Constraint::Length(BUTTON_WIDTH), Constraint::Fill(1)])
                .areas(controls);
        let block_width = table_cols + 2;
        let block_height = table_rows + 2;
        let fits = game_area.width >= block_width && game_area.height >= block_height;
        let table_block = centered_in(game_area, block_width, block_height);
        let table = Rect::new(
            table_block.x + 1,
            table_block.y + 1,
            table_block.width.saturating_sub(2),
            table_block.height.saturating_sub(2),
        );
        HostLayout {
            terminal,
            game_area,
            table_block,
            table,
            button,
            help,
            fits,
        }
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn set_area(&mut self, terminal: Rect) {
        if terminal == self.layout.terminal {
            return;
        }
        self.layout = Self::compute_layout(terminal, self.table_cols, self.table_rows);
        if self.layout.fits {
            let surface_height = surface_height_px(
                self.layout.game_area,
                self.layout.table,
                self.config.cell_height_px,
            );
            self.driver.resize(surface_height);
        } else {
            debug!(?terminal, "terminal too small for the table");
        }
    }

    fn apply(&mut self, intents: Vec<Intent>) -> io::Result<()> {
        for intent in intents {
            match intent {
                Intent::MoveBall { x, y } => self.ball = (x, y),
                Intent::MovePaddle { side, y } => self.paddles[side.index()] = y,
                Intent::PlaySound(effect) => self.sounds.play(effect)?,
                Intent::UpdateScore { side, score } => self.scores[side.index()] = score,
                Intent::UpdateButton(label) => self.button = label,
            }
        }
        Ok(())
    }

    fn toggle(&mut self) -> io::Result<()> {
        let intents = self.driver.toggle();
        self.apply(intents)
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> io::Result<()> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle()?,
            KeyCode::Char('t') => {
                self.theme = self.theme.next();
                debug!(theme = self.theme.label(), "theme changed");
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> io::Result<()> {
        match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let y = row_to_px(
                    mouse_event.row,
                    self.layout.game_area.y,
                    self.config.cell_height_px,
                );
                self.driver.pointer_moved(y);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let at = Position::new(mouse_event.column, mouse_event.row);
                if self.layout.button.contains(at) {
                    self.toggle()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event)?,
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)?
            }
            Event::Resize(width, height) => self.set_area(Rect::new(0, 0, width, height)),
            _ => {}
        }
        Ok(())
    }

    /// Wait for input until the next frame is due, then run it. Returns
    /// false once the player quits.
    pub fn game_loop(&mut self) -> io::Result<bool> {
        let frame_time = Duration::from_secs_f64(1.0 / self.config.tick_rate_hz);
        let timeout = frame_time.saturating_sub(self.last_update.elapsed());

        if event::poll(timeout)? {
            self.handle_event(event::read()?)?;
            // drain whatever else arrived
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?)?;
            }
        }
        if self.should_exit {
            info!(scores = ?self.scores, "player quit");
            return Ok(false);
        }

        if self.last_update.elapsed() >= frame_time {
            // a terminal too small to show the table pauses the game
            if self.layout.fits {
                let intents = self.driver.tick(&mut rand::rng());
                self.apply(intents)?;
            }
            self.last_update = Instant::now();
        }

        Ok(true)
    }

    fn draw_core_elements(&self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let table = self.layout.table;
        let now = Instant::now();
        let cell_w = self.config.cell_width_px;
        let cell_h = self.config.cell_height_px;

        // Ratatui never resets its buffers between draws; stale cells
        // would leave ghost balls behind.
        frame.render_widget(Clear, table);

        if self.button == ButtonLabel::Play {
            self.draw_big_score(frame);
        }

        let paddle_height = self.config.paddle_height_px;
        let paddle_width = self.config.paddle_width_px;
        let table_width_px = f64::from(table.width) * cell_w;
        for side in [Side::Left, Side::Right] {
            let left_px = match side {
                Side::Left => 0.0,
                Side::Right => table_width_px - paddle_width,
            };
            let (col, cols) = px_span_to_cells(left_px, paddle_width, cell_w, table.width);
            let top_px = self.paddles[side.index()] - paddle_height / 2.0;
            let (row, rows) = px_span_to_cells(top_px, paddle_height, cell_h, table.height);
            let paddle_area = Rect::new(table.x + col, table.y + row, cols, rows);
            let paddle = Block::default().style(Style::default().bg(colors.paddle));
            frame.render_widget(paddle, paddle_area);
        }

        let radius = self.config.ball_radius_px;
        let (x, y) = self.ball;
        let (col, cols) = px_span_to_cells(x - radius, radius * 2.0, cell_w, table.width);
        let (row, rows) = px_span_to_cells(y - radius, radius * 2.0, cell_h, table.height);
        let ball_color = if self.sounds.is_playing(SoundEffect::Bounce, now) {
            colors.ball_flash
        } else {
            colors.ball
        };
        let ball_area = Rect::new(table.x + col, table.y + row, cols, rows);
        frame.render_widget(
            Block::default().style(Style::default().bg(ball_color)),
            ball_area,
        );
    }

    fn draw_big_score(&self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let text = format!("{} : {}", self.scores[0], self.scores[1]);
        // sextant glyphs are 4 cells wide and 3 tall
        let width = (text.chars().count() as u16).saturating_mul(4);
        let area = centered_in(self.layout.table, width, 3);
        let big_text = BigText::builder()
            .pixel_size(PixelSize::Sextant)
            .style(Style::default().fg(colors.accent))
            .lines(vec![text.into()])
            .alignment(Alignment::Center)
            .build();
        frame.render_widget(big_text, area);
    }

    fn draw_controls(&self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let button = Paragraph::new(self.button.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(colors.accent)),
            )
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        frame.render_widget(button, self.layout.button);

        let help = Paragraph::new(format!(
            " Mouse = paddle  |  Space/Click = {}  |  T = theme ({})  |  Esc = quit ",
            self.button.as_str().to_lowercase(),
            self.theme.label()
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(colors.border)),
        )
        .style(Style::default().fg(colors.text))
        .alignment(Alignment::Center);
        frame.render_widget(help, self.layout.help);
    }

    fn draw_resize_warning(&self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let area = frame.area();
        let popup_area = centered_rect_with_percentage(60, 20, area.width, area.height);
        let popup = Paragraph::new(format!(
            "Terminal too small!\nPlease resize to at least {}x{}.",
            self.table_cols + 2,
            self.table_rows + 2 + CONTROLS_HEIGHT
        ))
        .block(
            Block::default()
                .title("Warning")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick),
        )
        .style(Style::default().fg(colors.ball))
        .alignment(Alignment::Center);
        frame.render_widget(popup, popup_area);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.set_area(frame.area());
        if !self.layout.fits {
            self.draw_resize_warning(frame);
            return;
        }

        let colors = self.theme.colors();
        let border_color = if self.sounds.is_playing(SoundEffect::Fall, Instant::now()) {
            colors.border_flash
        } else {
            colors.border
        };
        let title = self.get_block_title("table.pong");
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .style(Style::default().fg(border_color).bg(colors.background))
            .title_alignment(Alignment::Center);
        frame.render_widget(block, self.layout.table_block);

        self.draw_core_elements(frame);
        self.draw_controls(frame);
    }

    fn get_block_title(&self, app_name: &'static str) -> String {
        let p1_text = format!("{} ({})", PLAYER_NAMES[0], self.scores[0]);
        let p2_text = format!("({}) {}", self.scores[1], PLAYER_NAMES[1]);

        let used = p1_text.len() + app_name.len() + p2_text.len() + 6; // spaces + separators
        let total_width = self.layout.table_block.width as usize;
        let dashes = total_width.saturating_sub(used) / 2;

        format!(
            " {} {} {} {} {} ",
            p1_text,
            "─".repeat(dashes),
            app_name,
            "─".repeat(dashes),
            p2_text,
        )
    }
}
