//! Discrete-step ball physics.
//!
//! Every frame the ball advances by a fixed distance and is clamped into its
//! bounds. A ball resting on a bound is what the contact checks detect, so a
//! fast ball can pass through anything thinner than one step.

use rand::Rng;

use crate::{
    entities::{Ball, Paddle, Side, Table},
    geometry::{random_launch_angle, reflect_horizontal, reflect_vertical},
};

/// Ball travel per frame, in surface pixels.
pub const BALL_SPEED: f64 = 10.0;

/// Ball reached a horizontal bound in front of a paddle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub side: Side,
    /// Ball center relative to paddle center, scaled so that `±1` is the
    /// furthest the ball can be and still touch the paddle.
    pub offset: f64,
}

impl Contact {
    pub fn is_miss(&self) -> bool {
        self.offset.abs() > 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Ball came back off the paddle.
    Bounce,
    /// Ball passed the paddle; `scorer` gets the point.
    Miss { scorer: Side },
}

/// Give an unlaunched ball a serve direction. Returns true if it launched.
pub fn ensure_launch<R: Rng + ?Sized>(ball: &mut Ball, table: &Table, rng: &mut R) -> bool {
    if ball.angle().is_some() {
        return false;
    }
    let max_deviation = (table.height() / table.width()).atan();
    ball.set_angle(random_launch_angle(rng, max_deviation));
    true
}

/// Advance the ball one step along its angle. An unlaunched ball stays put.
pub fn integrate(ball: &mut Ball, speed: f64) {
    let Some(angle) = ball.angle() else {
        return;
    };
    let x = ball.x + speed * angle.cos();
    let y = ball.y + speed * angle.sin();
    ball.place(x, y);
}

/// Reflect off the top or bottom edge. Returns true if the ball bounced.
pub fn bounce_at_table_edge(ball: &mut Ball) -> bool {
    let Some(angle) = ball.angle() else {
        return false;
    };
    if ball.y <= ball.min_y() || ball.y >= ball.max_y() {
        ball.set_angle(reflect_vertical(angle));
        return true;
    }
    false
}

/// Check whether the ball sits at either paddle line.
pub fn paddle_contact(ball: &Ball, paddles: &[Paddle; 2]) -> Option<Contact> {
    let side = if ball.x <= ball.min_x() {
        Side::Left
    } else if ball.x >= ball.max_x() {
        Side::Right
    } else {
        return None;
    };
    let paddle = &paddles[side.index()];
    let offset = (ball.y - paddle.y) / (paddle.height() / 2.0 + ball.radius());
    Some(Contact { side, offset })
}

/// Apply the result of a contact: reflect on a hit, leave the ball alone on
/// a miss.
pub fn resolve_contact(ball: &mut Ball, contact: Contact) -> ContactOutcome {
    if contact.is_miss() {
        return ContactOutcome::Miss {
            scorer: contact.side.opposite(),
        };
    }
    if let Some(angle) = ball.angle() {
        ball.set_angle(reflect_horizontal(angle, contact.offset));
    }
    ContactOutcome::Bounce
}
