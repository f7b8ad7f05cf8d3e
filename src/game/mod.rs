pub mod input;
pub mod opponent;
pub mod physics;
pub mod scoring;
pub mod state;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use input::Controls;
use scoring::{Phase, Scoreboard};
use state::MatchState;

// Court geometry, in logical units. Y grows downward.
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const PADDLE_HALF_HEIGHT: f32 = PADDLE_HEIGHT / 2.0;
/// Gap between a wall and the outer face of the paddle guarding it.
pub const PADDLE_INSET: f32 = 50.0;
pub const BALL_SIZE: f32 = 10.0;
pub const BALL_RADIUS: f32 = BALL_SIZE / 2.0;

// Tuning
pub const PADDLE_SPEED: f32 = 8.0;
pub const OPPONENT_SPEED: f32 = 4.0;
pub const SERVE_SPEED: f32 = 5.0;
pub const SERVE_SPREAD: f32 = 3.0;
pub const ANGLE_FACTOR: f32 = 5.0;
pub const SPEEDUP: f32 = 1.1;
pub const MAX_BALL_SPEED: f32 = 12.0;
pub const WINNING_SCORE: u32 = 10;
pub const TICKS_PER_SECOND: u64 = 60;

/// Lowest and highest legal paddle center.
pub const PADDLE_MIN_Y: f32 = PADDLE_HALF_HEIGHT;
pub const PADDLE_MAX_Y: f32 = FIELD_HEIGHT - PADDLE_HALF_HEIGHT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Opponent => "CPU",
        }
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball still in play.
    Rally,
    /// A side scored and the ball was served again.
    Point(Side),
    /// A side scored its winning point; the match is over.
    Won(Side),
    /// Nothing ran because the match is not in play.
    Halted,
}

/// One match: the simulation record, the scores, and the phase.
pub struct Match {
    state: MatchState,
    score: Scoreboard,
    phase: Phase,
    rng: StdRng,
}

impl Match {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: MatchState::new(),
            score: Scoreboard::default(),
            phase: Phase::Idle,
            rng,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Fresh state, zero scores, random serve direction, straight into play.
    pub fn reset(&mut self) {
        let toward = if self.rng.gen_bool(0.5) {
            Side::Player
        } else {
            Side::Opponent
        };
        let mut state = MatchState::new();
        state.serve(toward, &mut self.rng);
        self.state = state;
        self.score = Scoreboard::default();
        self.phase = Phase::Playing;
    }

    /// Advance one tick: opponent AI, physics, then scoring.
    pub fn tick(&mut self, controls: Controls) -> TickOutcome {
        if !self.phase.is_playing() {
            return TickOutcome::Halted;
        }

        opponent::track(&mut self.state);
        physics::step(&mut self.state, controls);

        let Some(scorer) = scoring::goal_scored(&self.state) else {
            return TickOutcome::Rally;
        };
        self.state.serve(scorer.other(), &mut self.rng);
        let total = self.score.award(scorer);
        if total >= WINNING_SCORE {
            self.phase = Phase::Finished { winner: scorer };
            TickOutcome::Won(scorer)
        } else {
            TickOutcome::Point(scorer)
        }
    }
}
