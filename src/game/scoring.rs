use super::state::MatchState;
use super::{Side, FIELD_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start.
    Idle,
    Playing,
    Finished { winner: Side },
}

impl Phase {
    pub fn is_playing(self) -> bool {
        matches!(self, Phase::Playing)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    player: u32,
    opponent: u32,
}

impl Scoreboard {
    pub fn player(&self) -> u32 {
        self.player
    }

    pub fn opponent(&self) -> u32 {
        self.opponent
    }

    /// Add one point to `side` and return its new total.
    pub fn award(&mut self, side: Side) -> u32 {
        let total = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *total += 1;
        *total
    }
}

/// The side that just won the point, if the ball has left the court.
pub fn goal_scored(state: &MatchState) -> Option<Side> {
    if state.ball_x < 0.0 {
        Some(Side::Opponent)
    } else if state.ball_x > FIELD_WIDTH {
        Some(Side::Player)
    } else {
        None
    }
}
