use rand::Rng;

use super::{
    Side, FIELD_HEIGHT, FIELD_WIDTH, OPPONENT_SPEED, PADDLE_SPEED, SERVE_SPEED, SERVE_SPREAD,
};

/// The simulation record. Only the tick mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchState {
    pub player_y: f32,
    pub opponent_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub paddle_speed: f32,
    pub opponent_speed: f32,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            player_y: FIELD_HEIGHT / 2.0,
            opponent_y: FIELD_HEIGHT / 2.0,
            ball_x: FIELD_WIDTH / 2.0,
            ball_y: FIELD_HEIGHT / 2.0,
            ball_vx: SERVE_SPEED,
            ball_vy: 3.0,
            paddle_speed: PADDLE_SPEED,
            opponent_speed: OPPONENT_SPEED,
        }
    }

    /// Put the ball back on the center spot, heading at `toward`.
    pub fn serve<R: Rng>(&mut self, toward: Side, rng: &mut R) {
        self.ball_x = FIELD_WIDTH / 2.0;
        self.ball_y = FIELD_HEIGHT / 2.0;
        self.ball_vx = match toward {
            Side::Player => -SERVE_SPEED,
            Side::Opponent => SERVE_SPEED,
        };
        self.ball_vy = rng.gen_range(-SERVE_SPREAD..SERVE_SPREAD);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
