//! Terminal stand-in for the sound effects.
//!
//! A terminal cannot play audio clips, so each effect is a short "playing"
//! window that the renderer turns into a color flash, optionally paired with
//! the terminal bell.

use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use tracing::trace;

use crate::frame::SoundEffect;

const EFFECT_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub struct SoundBoard {
    started_at: [Option<Instant>; 2],
    bell: bool,
}

impl SoundBoard {
    pub fn new(bell: bool) -> Self {
        Self {
            started_at: [None, None],
            bell,
        }
    }

    fn slot(effect: SoundEffect) -> usize {
        match effect {
            SoundEffect::Bounce => 0,
            SoundEffect::Fall => 1,
        }
    }

    /// Start the effect, rewinding it if it is already playing.
    pub fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
        self.play_at(effect, Instant::now());
        if self.bell {
            let mut stdout = io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }
        Ok(())
    }

    pub fn play_at(&mut self, effect: SoundEffect, now: Instant) {
        trace!(effect = effect.name(), "play");
        self.started_at[Self::slot(effect)] = Some(now);
    }

    pub fn is_playing(&self, effect: SoundEffect, now: Instant) -> bool {
        match self.started_at[Self::slot(effect)] {
            Some(start) => now.saturating_duration_since(start) < EFFECT_DURATION,
            None => false,
        }
    }
}
