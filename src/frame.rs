//! Per-frame orchestration.
//!
//! [`FrameDriver`] owns every piece of mutable game state. The host feeds it
//! pointer moves, resizes and start/stop presses between frames, calls
//! [`FrameDriver::tick`] once per frame, and carries out the returned
//! [`Intent`]s. The driver never draws or plays anything itself.

use rand::Rng;
use tracing::{debug, trace};

use crate::{
    entities::{Ball, Paddle, Side, Table},
    opponent::track_ball,
    physics::{self, ContactOutcome},
    session::{ButtonLabel, Session},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Bounce,
    Fall,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce",
            SoundEffect::Fall => "fall",
        }
    }
}

/// Something the host should do on the driver's behalf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    MoveBall { x: f64, y: f64 },
    MovePaddle { side: Side, y: f64 },
    /// Restart the effect from the beginning if it is already playing.
    PlaySound(SoundEffect),
    UpdateScore { side: Side, score: u32 },
    UpdateButton(ButtonLabel),
}

/// Element dimensions reported by the host, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSizes {
    pub paddle_height: f64,
    pub paddle_width: f64,
    pub ball_radius: f64,
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    table: Table,
    paddles: [Paddle; 2],
    ball: Ball,
    session: Session,
    /// Last pointer height in surface coordinates.
    pointer_y: f64,
    /// Distance from the surface top to the table top.
    pointer_offset: f64,
}

impl FrameDriver {
    pub fn new(table: Table, sizes: ElementSizes, surface_height: f64) -> Self {
        let paddles = [
            Paddle::new(&table, sizes.paddle_height, sizes.paddle_width),
            Paddle::new(&table, sizes.paddle_height, sizes.paddle_width),
        ];
        let ball = Ball::new(&table, paddles[0].width(), sizes.ball_radius);
        let mut driver = Self {
            table,
            paddles,
            ball,
            session: Session::new(),
            pointer_y: 0.0,
            pointer_offset: 0.0,
        };
        driver.resize(surface_height);
        // keep the player paddle centered until the pointer first moves
        driver.pointer_y = driver.pointer_offset + table.height() / 2.0;
        driver
    }

    /// Recompute everything that depends on the surface size. The table
    /// itself keeps the size it was created with.
    pub fn resize(&mut self, surface_height: f64) {
        self.pointer_offset = (surface_height - self.table.height()) / 2.0;
        for paddle in &mut self.paddles {
            paddle.update_bounds(&self.table);
        }
        debug!(
            surface_height,
            pointer_offset = self.pointer_offset,
            paddle_min_y = self.paddles[0].min_y(),
            paddle_max_y = self.paddles[0].max_y(),
            "surface resized"
        );
    }

    /// Record the pointer height; consumed on the next frame.
    pub fn pointer_moved(&mut self, surface_y: f64) {
        self.pointer_y = surface_y;
    }

    /// Press of the start/stop control.
    pub fn toggle(&mut self) -> Vec<Intent> {
        self.session.toggle(&mut self.ball, &self.table);
        let mut intents = vec![Intent::UpdateButton(self.session.button_label())];
        if self.session.is_running() {
            intents.push(Intent::MoveBall {
                x: self.ball.x,
                y: self.ball.y,
            });
        }
        intents
    }

    /// Run one frame. Nothing happens while the session is stopped.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Intent> {
        let mut intents = Vec::new();
        if !self.session.is_running() {
            return intents;
        }

        if physics::ensure_launch(&mut self.ball, &self.table, rng) {
            debug!(angle = ?self.ball.angle(), "ball launched");
        }
        physics::integrate(&mut self.ball, self.session.ball_speed());
        intents.push(Intent::MoveBall {
            x: self.ball.x,
            y: self.ball.y,
        });

        if physics::bounce_at_table_edge(&mut self.ball) {
            debug!(y = self.ball.y, "edge bounce");
            intents.push(Intent::PlaySound(SoundEffect::Bounce));
        }

        let player = &mut self.paddles[Side::Left.index()];
        player.move_to(self.pointer_y - self.pointer_offset);
        let opponent = &mut self.paddles[Side::Right.index()];
        track_ball(opponent, &self.ball, self.session.max_opponent_speed());
        for side in [Side::Left, Side::Right] {
            intents.push(Intent::MovePaddle {
                side,
                y: self.paddles[side.index()].y,
            });
        }

        if let Some(contact) = physics::paddle_contact(&self.ball, &self.paddles) {
            match physics::resolve_contact(&mut self.ball, contact) {
                ContactOutcome::Bounce => {
                    debug!(side = ?contact.side, offset = contact.offset, "paddle bounce");
                    intents.push(Intent::PlaySound(SoundEffect::Bounce));
                }
                ContactOutcome::Miss { scorer } => {
                    self.session.stop();
                    intents.push(Intent::UpdateButton(self.session.button_label()));
                    let score = self.session.award_point(scorer);
                    intents.push(Intent::UpdateScore {
                        side: scorer,
                        score,
                    });
                    intents.push(Intent::PlaySound(SoundEffect::Fall));
                }
            }
        }

        trace!(x = self.ball.x, y = self.ball.y, angle = ?self.ball.angle(), "frame");
        intents
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::PI;

    const SIZES: ElementSizes = ElementSizes {
        paddle_height: 80.0,
        paddle_width: 16.0,
        ball_radius: 8.0,
    };

    fn driver() -> FrameDriver {
        FrameDriver::new(Table::new(400.0, 300.0), SIZES, 300.0)
    }

    fn count_sound(intents: &[Intent], effect: SoundEffect) -> usize {
        intents
            .iter()
            .filter(|i| **i == Intent::PlaySound(effect))
            .count()
    }

    #[test]
    fn stopped_driver_emits_nothing() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(d.tick(&mut rng).is_empty());
        assert_eq!((d.ball().x, d.ball().y), (200.0, 150.0));
    }

    #[test]
    fn start_resets_ball_and_relabels_button() {
        let mut d = driver();
        d.ball.place(50.0, 60.0);
        d.ball.set_angle(1.0);
        let intents = d.toggle();
        assert_eq!(
            intents,
            vec![
                Intent::UpdateButton(ButtonLabel::Stop),
                Intent::MoveBall { x: 200.0, y: 150.0 },
            ]
        );
        assert!(d.ball().angle().is_none());
    }

    #[test]
    fn first_frame_launches_and_stays_in_bounds() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(11);
        d.toggle();
        let intents = d.tick(&mut rng);
        assert!(d.ball().angle().is_some());
        let ball = d.ball();
        assert!(ball.x >= ball.min_x() && ball.x <= ball.max_x());
        assert!(ball.y >= ball.min_y() && ball.y <= ball.max_y());
        assert!(matches!(intents[0], Intent::MoveBall { .. }));
    }

    #[test]
    fn ball_at_min_y_bounces_once() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(0);
        d.toggle();
        let min_y = d.ball.min_y();
        d.ball.place(200.0, min_y);
        // heading up and to the right
        let angle = 1.75 * PI;
        d.ball.set_angle(angle);
        let intents = d.tick(&mut rng);
        assert_eq!(count_sound(&intents, SoundEffect::Bounce), 1);
        let expected = crate::geometry::reflect_vertical(angle);
        assert!((d.ball().angle().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn centered_right_paddle_hit_reflects() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(0);
        d.toggle();
        let max_x = d.ball.max_x();
        d.ball.place(max_x, 150.0);
        d.ball.set_angle(0.0);
        let intents = d.tick(&mut rng);
        assert!(d.session().is_running());
        assert_eq!(count_sound(&intents, SoundEffect::Bounce), 1);
        assert!((d.ball().angle().unwrap() - PI).abs() < 1e-12);
        assert_eq!(d.session().scores(), [0, 0]);
    }

    #[test]
    fn left_miss_scores_for_opponent_and_stops() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(0);
        d.toggle();
        d.pointer_moved(150.0);
        let min_x = d.ball.min_x();
        // 1.5 × (40 + 8) below the paddle center
        d.ball.place(min_x, 150.0 + 72.0);
        d.ball.set_angle(PI);
        let intents = d.tick(&mut rng);

        assert!(!d.session().is_running());
        assert_eq!(d.session().scores(), [0, 1]);
        assert_eq!(d.ball().angle(), Some(PI));
        assert_eq!(count_sound(&intents, SoundEffect::Fall), 1);
        assert_eq!(count_sound(&intents, SoundEffect::Bounce), 0);
        assert!(intents.contains(&Intent::UpdateScore {
            side: Side::Right,
            score: 1
        }));
        assert!(intents.contains(&Intent::UpdateButton(ButtonLabel::Play)));

        // ball stays where it fell until the next start
        assert!(d.tick(&mut rng).is_empty());
        assert_eq!(d.ball().x, min_x);
        d.toggle();
        assert_eq!((d.ball().x, d.ball().y), (200.0, 150.0));
    }

    #[test]
    fn player_paddle_follows_pointer_minus_offset() {
        // table sits 50px below the surface top
        let mut d = FrameDriver::new(Table::new(400.0, 300.0), SIZES, 400.0);
        let mut rng = StdRng::seed_from_u64(5);
        d.toggle();
        d.pointer_moved(150.0);
        d.tick(&mut rng);
        assert_eq!(d.paddle(Side::Left).y, 100.0);

        d.resize(300.0);
        d.pointer_moved(150.0);
        d.tick(&mut rng);
        assert_eq!(d.paddle(Side::Left).y, 150.0);
    }

    #[test]
    fn player_paddle_is_clamped_to_table() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(5);
        d.toggle();
        d.pointer_moved(-1000.0);
        d.tick(&mut rng);
        assert_eq!(d.paddle(Side::Left).y, d.paddle(Side::Left).min_y());
    }

    #[test]
    fn paddle_starts_centered_before_pointer_moves() {
        let mut d = FrameDriver::new(Table::new(400.0, 300.0), SIZES, 500.0);
        let mut rng = StdRng::seed_from_u64(9);
        d.toggle();
        d.tick(&mut rng);
        assert_eq!(d.paddle(Side::Left).y, 150.0);
    }

    #[test]
    fn long_rally_keeps_invariants() {
        let mut d = driver();
        let mut rng = StdRng::seed_from_u64(1234);
        let mut rallies = 0;
        for _ in 0..5_000 {
            if !d.session().is_running() {
                d.toggle();
                rallies += 1;
            }
            // pointer tracks the ball so the player rarely misses
            let y = d.ball().y;
            d.pointer_moved(y);
            d.tick(&mut rng);

            let ball = d.ball();
            assert!(ball.x >= ball.min_x() && ball.x <= ball.max_x());
            assert!(ball.y >= ball.min_y() && ball.y <= ball.max_y());
            if let Some(a) = ball.angle() {
                assert!((0.0..std::f64::consts::TAU).contains(&a));
            }
            for side in [Side::Left, Side::Right] {
                let p = d.paddle(side);
                assert!(p.y >= p.min_y() && p.y <= p.max_y());
            }
        }
        let finished = if d.session().is_running() {
            rallies - 1
        } else {
            rallies
        };
        let [left, right] = d.session().scores();
        assert_eq!(left + right, finished);
    }
}
