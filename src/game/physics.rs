//! Per-tick movement and collision response.

use super::input::Controls;
use super::state::MatchState;
use super::{
    Side, ANGLE_FACTOR, BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, MAX_BALL_SPEED, PADDLE_HALF_HEIGHT,
    PADDLE_INSET, PADDLE_MAX_Y, PADDLE_MIN_Y, PADDLE_WIDTH, SPEEDUP,
};

/// Player paddle, ball translation, walls, then both paddles.
pub fn step(state: &mut MatchState, controls: Controls) {
    move_player(state, controls);
    advance_ball(state);
    bounce_off_walls(state);
    deflect(state, Side::Player);
    deflect(state, Side::Opponent);
}

pub fn clamp_paddle(y: f32) -> f32 {
    y.clamp(PADDLE_MIN_Y, PADDLE_MAX_Y)
}

/// Horizontal extent `[left, right]` of a side's paddle.
pub fn paddle_band(side: Side) -> (f32, f32) {
    match side {
        Side::Player => (PADDLE_INSET, PADDLE_INSET + PADDLE_WIDTH),
        Side::Opponent => (
            FIELD_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
            FIELD_WIDTH - PADDLE_INSET,
        ),
    }
}

fn move_player(state: &mut MatchState, controls: Controls) {
    if controls.up && state.player_y > PADDLE_MIN_Y {
        state.player_y -= state.paddle_speed;
    }
    if controls.down && state.player_y < PADDLE_MAX_Y {
        state.player_y += state.paddle_speed;
    }
    state.player_y = clamp_paddle(state.player_y);
}

fn advance_ball(state: &mut MatchState) {
    state.ball_x += state.ball_vx;
    state.ball_y += state.ball_vy;
}

fn bounce_off_walls(state: &mut MatchState) {
    let at_top = state.ball_y <= BALL_RADIUS && state.ball_vy < 0.0;
    let at_bottom = state.ball_y >= FIELD_HEIGHT - BALL_RADIUS && state.ball_vy > 0.0;
    if at_top || at_bottom {
        state.ball_vy = -state.ball_vy;
    }
}

/// Bounce the ball off `side`'s paddle if it is overlapping it and still
/// heading into it. A ball already moving away is left alone, so it cannot
/// flip back and forth while it travels out of the paddle.
fn deflect(state: &mut MatchState, side: Side) {
    let (left, right) = paddle_band(side);
    let (paddle_y, incoming) = match side {
        Side::Player => (state.player_y, state.ball_vx < 0.0),
        Side::Opponent => (state.opponent_y, state.ball_vx > 0.0),
    };

    let overlaps = state.ball_x - BALL_RADIUS <= right
        && state.ball_x + BALL_RADIUS >= left
        && state.ball_y >= paddle_y - PADDLE_HALF_HEIGHT
        && state.ball_y <= paddle_y + PADDLE_HALF_HEIGHT;
    if !overlaps || !incoming {
        return;
    }

    // -1 at the bottom edge, 1 at the top edge.
    let offset = (paddle_y - state.ball_y) / PADDLE_HALF_HEIGHT;
    state.ball_vy = -offset * ANGLE_FACTOR;

    let speed = (state.ball_vx.abs() * SPEEDUP).min(MAX_BALL_SPEED);
    state.ball_vx = -state.ball_vx.signum() * speed;
}
