use std::{
    fs::File,
    io::{self},
    sync::Mutex,
};

use anyhow::{Context, Result};
use crossterm::{event, ExecutableCommand};
use ratatui::{layout::Rect, DefaultTerminal};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

mod config;
mod entities;
mod frame;
mod game;
mod game_theme;
mod geometry;
mod helpers;
mod opponent;
mod physics;
mod session;
mod sound;
use crate::{
    config::{HostConfig, LOG_ENV},
    game::Game,
};

/// The terminal is the game surface, so logs never go to stdout or stderr.
fn init_logging(config: &HostConfig) -> Result<()> {
    let writer = match config.log_path(std::env::var_os(LOG_ENV)) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(mut terminal: DefaultTerminal, config: HostConfig) -> io::Result<[u32; 2]> {
    io::stdout().execute(event::EnableMouseCapture)?;
    let size = terminal.size()?;
    let mut game = Game::new(config, Rect::new(0, 0, size.width, size.height));

    while game.game_loop()? {
        terminal.draw(|frame| game.draw(frame))?;
    }

    Ok(game.scores())
}

fn main() -> Result<()> {
    // config warnings come before the subscriber and are dropped
    let config = HostConfig::load();
    init_logging(&config)?;
    tracing::info!(?config, "starting table.pong");

    let terminal = ratatui::init();
    let app_result = run(terminal, config);

    // restore the terminal before reporting anything
    let _ = io::stdout().execute(event::DisableMouseCapture);
    ratatui::restore();

    let [player, computer] = app_result.context("game ended with a terminal error")?;
    println!("Thanks for playing table.pong!");
    println!("Final Score: {} - {}", player, computer);
    Ok(())
}
