use tracing::info;

use crate::{
    entities::{Ball, Side, Table},
    opponent::MAX_OPPONENT_SPEED,
    physics::BALL_SPEED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Stopped,
    Running,
}

/// Text of the start/stop control; it names the action a press performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Play,
    Stop,
}

impl ButtonLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonLabel::Play => "Play",
            ButtonLabel::Stop => "Stop",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    ball_speed: f64,
    max_opponent_speed: f64,
    scores: [u32; 2],
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Stopped,
            ball_speed: BALL_SPEED,
            max_opponent_speed: MAX_OPPONENT_SPEED,
            scores: [0, 0],
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn ball_speed(&self) -> f64 {
        self.ball_speed
    }

    pub fn max_opponent_speed(&self) -> f64 {
        self.max_opponent_speed
    }

    /// Put the ball at the exact table center and clear its angle so the
    /// next frame serves. The center is not clamped into the ball's bounds.
    pub fn start(&mut self, ball: &mut Ball, table: &Table) {
        let (x, y) = table.center();
        ball.x = x;
        ball.y = y;
        ball.clear_angle();
        self.state = SessionState::Running;
        info!(scores = ?self.scores, "session started");
    }

    /// Freeze play. The ball keeps its position until the next `start`.
    pub fn stop(&mut self) {
        self.state = SessionState::Stopped;
        info!(scores = ?self.scores, "session stopped");
    }

    /// Start when stopped, stop when running.
    pub fn toggle(&mut self, ball: &mut Ball, table: &Table) {
        match self.state {
            SessionState::Stopped => self.start(ball, table),
            SessionState::Running => self.stop(),
        }
    }

    /// Credit one point and return the scorer's new total.
    pub fn award_point(&mut self, scorer: Side) -> u32 {
        let score = &mut self.scores[scorer.index()];
        *score = score.saturating_add(1);
        info!(?scorer, score = *score, "point scored");
        *score
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn button_label(&self) -> ButtonLabel {
        match self.state {
            SessionState::Stopped => ButtonLabel::Play,
            SessionState::Running => ButtonLabel::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Table, Ball) {
        let table = Table::new(400.0, 300.0);
        let ball = Ball::new(&table, 16.0, 8.0);
        (table, ball)
    }

    #[test]
    fn starts_stopped_with_zero_scores() {
        let session = Session::new();
        assert!(!session.is_running());
        assert_eq!(session.scores(), [0, 0]);
        assert_eq!(session.button_label(), ButtonLabel::Play);
    }

    #[test]
    fn start_centers_ball_and_clears_angle() {
        let (table, mut ball) = setup();
        ball.place(30.0, 20.0);
        ball.set_angle(1.0);
        let mut session = Session::new();
        session.start(&mut ball, &table);
        assert!(session.is_running());
        assert_eq!((ball.x, ball.y), (200.0, 150.0));
        assert!(ball.angle().is_none());
        assert_eq!(session.button_label(), ButtonLabel::Stop);
    }

    #[test]
    fn start_centers_ball_on_table_narrower_than_its_bounds() {
        // 24px is less than 2 * (16 + 8), so min_x > max_x
        let table = Table::new(24.0, 80.0);
        let mut ball = Ball::new(&table, 16.0, 8.0);
        assert!(ball.min_x() > ball.max_x());
        let mut session = Session::new();
        session.start(&mut ball, &table);
        assert_eq!((ball.x, ball.y), (12.0, 40.0));
        assert!(ball.angle().is_none());
    }

    #[test]
    fn stop_keeps_ball_where_it_is() {
        let (table, mut ball) = setup();
        let mut session = Session::new();
        session.start(&mut ball, &table);
        ball.place(100.0, 100.0);
        ball.set_angle(2.0);
        session.stop();
        assert!(!session.is_running());
        assert_eq!((ball.x, ball.y), (100.0, 100.0));
        assert_eq!(ball.angle(), Some(2.0));
    }

    #[test]
    fn toggle_alternates() {
        let (table, mut ball) = setup();
        let mut session = Session::new();
        session.toggle(&mut ball, &table);
        assert!(session.is_running());
        session.toggle(&mut ball, &table);
        assert!(!session.is_running());
    }

    #[test]
    fn award_point_increments_by_one() {
        let mut session = Session::new();
        assert_eq!(session.award_point(Side::Right), 1);
        assert_eq!(session.award_point(Side::Right), 2);
        assert_eq!(session.award_point(Side::Left), 1);
        assert_eq!(session.scores(), [1, 2]);
    }

    #[test]
    fn rules_are_fixed() {
        let session = Session::new();
        assert_eq!(session.ball_speed(), 10.0);
        assert_eq!(session.max_opponent_speed(), 4.723);
    }
}
