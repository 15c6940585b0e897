use crate::geometry::{clamp, normalize_angle};

/// Which end of the table a paddle guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Pointer-controlled paddle at `min_x`.
    Left,
    /// Computer paddle at `max_x`.
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Playing surface in surface pixels. Fixed once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    width: f64,
    height: f64,
}

impl Table {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    /// Vertical center, relative to the table top.
    pub y: f64,
    height: f64,
    width: f64,
    min_y: f64,
    max_y: f64,
}

impl Paddle {
    pub fn new(table: &Table, height: f64, width: f64) -> Self {
        let mut paddle = Self {
            y: table.height() / 2.0,
            height,
            width,
            min_y: 0.0,
            max_y: 0.0,
        };
        paddle.update_bounds(table);
        paddle
    }

    /// Recompute the movement range; called at startup and on every resize.
    pub fn update_bounds(&mut self, table: &Table) {
        self.min_y = self.height / 2.0;
        self.max_y = table.height() - self.height / 2.0;
        self.y = clamp(self.y, self.min_y, self.max_y);
    }

    pub fn move_to(&mut self, y: f64) {
        self.y = clamp(y, self.min_y, self.max_y);
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    /// `None` until the next launch.
    angle: Option<f64>,
    radius: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Ball {
    /// The ball may not overlap a paddle face or the top/bottom edges.
    pub fn new(table: &Table, paddle_width: f64, radius: f64) -> Self {
        let (x, y) = table.center();
        Self {
            x,
            y,
            angle: None,
            radius,
            min_x: paddle_width + radius,
            max_x: table.width() - paddle_width - radius,
            min_y: radius,
            max_y: table.height() - radius,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    /// Stores the angle normalized to `[0, 2π)`.
    pub fn set_angle(&mut self, radian: f64) {
        self.angle = Some(normalize_angle(radian));
    }

    pub fn clear_angle(&mut self) {
        self.angle = None;
    }

    pub fn place(&mut self, x: f64, y: f64) {
        self.x = clamp(x, self.min_x, self.max_x);
        self.y = clamp(y, self.min_y, self.max_y);
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn paddle_bounds_follow_table_height() {
        let table = Table::new(400.0, 300.0);
        let paddle = Paddle::new(&table, 80.0, 16.0);
        assert_eq!(paddle.min_y(), 40.0);
        assert_eq!(paddle.max_y(), 260.0);
        assert_eq!(paddle.y, 150.0);
    }

    #[test]
    fn paddle_move_is_clamped() {
        let table = Table::new(400.0, 300.0);
        let mut paddle = Paddle::new(&table, 80.0, 16.0);
        paddle.move_to(-50.0);
        assert_eq!(paddle.y, 40.0);
        paddle.move_to(1000.0);
        assert_eq!(paddle.y, 260.0);
    }

    #[test]
    fn ball_bounds_exclude_paddles_and_edges() {
        let table = Table::new(400.0, 300.0);
        let ball = Ball::new(&table, 16.0, 8.0);
        assert_eq!(ball.min_x(), 24.0);
        assert_eq!(ball.max_x(), 376.0);
        assert_eq!(ball.min_y(), 8.0);
        assert_eq!(ball.max_y(), 292.0);
        assert_eq!((ball.x, ball.y), (200.0, 150.0));
        assert!(ball.angle().is_none());
    }

    #[test]
    fn ball_angle_is_stored_normalized() {
        let table = Table::new(400.0, 300.0);
        let mut ball = Ball::new(&table, 16.0, 8.0);
        ball.set_angle(-0.5);
        let a = ball.angle().unwrap();
        assert!((a - (TAU - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn degenerate_table_does_not_panic() {
        let table = Table::new(0.0, 0.0);
        let mut paddle = Paddle::new(&table, 80.0, 16.0);
        paddle.move_to(10.0);
        let mut ball = Ball::new(&table, 16.0, 8.0);
        ball.place(5.0, 5.0);
        assert!(paddle.y.is_finite());
        assert!(ball.x.is_finite() && ball.y.is_finite());
    }

    #[test]
    fn side_opposite_and_index() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.index(), 0);
        assert_eq!(Side::Right.index(), 1);
    }
}
