use crate::entities::{Ball, Paddle};

/// Opponent paddle speed cap, in surface pixels per frame.
///
/// At `BALL_SPEED` a serve from the table center to a corner can still be
/// reached from the center of the right edge.
pub const MAX_OPPONENT_SPEED: f64 = 4.723;

/// Move the paddle toward the ball's height, never faster than `max_speed`.
/// Not predictive: a ball moving vertically faster than the cap outruns it.
pub fn track_ball(paddle: &mut Paddle, ball: &Ball, max_speed: f64) {
    let distance = (ball.y - paddle.y).abs().min(max_speed);
    let step = if ball.y < paddle.y { -distance } else { distance };
    paddle.move_to(paddle.y + step);
}
