use super::physics::clamp_paddle;
use super::state::MatchState;

/// Chase the ball's current height at a fixed speed. Snaps onto the target
/// once it is within one step so the paddle does not jitter around it.
pub fn track(state: &mut MatchState) {
    let diff = state.ball_y - state.opponent_y;
    if diff.abs() > state.opponent_speed {
        state.opponent_y += state.opponent_speed.copysign(diff);
    } else {
        state.opponent_y = state.ball_y;
    }
    state.opponent_y = clamp_paddle(state.opponent_y);
}
