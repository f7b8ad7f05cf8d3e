//! Court drawing. Everything here works in court units (800x600, y down)
//! against the [`Surface`] trait; [`CanvasSurface`] maps that onto a
//! ratatui canvas.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Line, Points};

use crate::game::physics::paddle_band;
use crate::game::state::MatchState;
use crate::game::{
    Side, BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HALF_HEIGHT, PADDLE_HEIGHT, PADDLE_WIDTH,
};

pub const COURT_BG: Color = Color::Rgb(10, 10, 10);
pub const LINE_COLOR: Color = Color::Rgb(255, 255, 255);
pub const PLAYER_COLOR: Color = Color::Rgb(74, 222, 128);
pub const OPPONENT_COLOR: Color = Color::Rgb(248, 113, 113);
pub const BALL_COLOR: Color = Color::Rgb(251, 191, 36);

const DASH: f64 = 5.0;
const GAP: f64 = 15.0;

/// The drawing primitives the court needs.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), dash: f64, gap: f64, color: Color);
}

/// Full redraw of the court from the current state.
pub fn draw<S: Surface>(state: &MatchState, surface: &mut S) {
    surface.clear();

    let mid = f64::from(FIELD_WIDTH) / 2.0;
    surface.dashed_line(
        (mid, 0.0),
        (mid, f64::from(FIELD_HEIGHT)),
        DASH,
        GAP,
        LINE_COLOR,
    );

    for (side, center, color) in [
        (Side::Player, state.player_y, PLAYER_COLOR),
        (Side::Opponent, state.opponent_y, OPPONENT_COLOR),
    ] {
        let (left, _) = paddle_band(side);
        surface.fill_rect(
            f64::from(left),
            f64::from(center - PADDLE_HALF_HEIGHT),
            f64::from(PADDLE_WIDTH),
            f64::from(PADDLE_HEIGHT),
            color,
        );
    }

    surface.fill_circle(
        f64::from(state.ball_x),
        f64::from(state.ball_y),
        f64::from(BALL_RADIUS),
        BALL_COLOR,
    );
}

/// Canvas adapter. The canvas has y growing upward, so every y is flipped.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>) -> Self {
        Self { ctx }
    }

    fn flip(y: f64) -> f64 {
        f64::from(FIELD_HEIGHT) - y
    }

    fn line(&mut self, (x1, y1): (f64, f64), (x2, y2): (f64, f64), color: Color) {
        self.ctx
            .draw(&Line::new(x1, Self::flip(y1), x2, Self::flip(y2), color));
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn clear(&mut self) {
        // The canvas grid starts empty every frame; the background colour
        // is set on the widget.
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let mut column = x;
        while column < x + width {
            self.line((column, y), (column, y + height), color);
            column += 1.0;
        }
        self.line((x + width, y), (x + width, y + height), color);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        let cy = Self::flip(y);
        let mut r = radius;
        while r > 0.0 {
            self.ctx.draw(&Circle {
                x,
                y: cy,
                radius: r,
                color,
            });
            r -= 1.0;
        }
        // Keeps the ball visible when it is smaller than one canvas dot.
        self.ctx.draw(&Points {
            coords: &[(x, cy)],
            color,
        });
    }

    fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), dash: f64, gap: f64, color: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = dx.hypot(dy);
        if length == 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);
        let mut t = 0.0;
        while t < length {
            let end = (t + dash).min(length);
            self.line(
                (from.0 + ux * t, from.1 + uy * t),
                (from.0 + ux * end, from.1 + uy * end),
                color,
            );
            t += dash + gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Rect(f64, f64, f64, f64, Color),
        Circle(f64, f64, f64, Color),
        Dashed((f64, f64), (f64, f64), f64, f64),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.0.push(Op::Clear);
        }
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
            self.0.push(Op::Rect(x, y, width, height, color));
        }
        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
            self.0.push(Op::Circle(x, y, radius, color));
        }
        fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), dash: f64, gap: f64, _: Color) {
            self.0.push(Op::Dashed(from, to, dash, gap));
        }
    }

    #[test]
    fn draws_a_full_frame_in_order() {
        let mut state = MatchState::new();
        state.player_y = 120.0;
        state.opponent_y = 480.0;
        state.ball_x = 333.0;
        state.ball_y = 44.0;

        let mut surface = Recorder::default();
        draw(&state, &mut surface);

        assert_eq!(
            surface.0,
            vec![
                Op::Clear,
                Op::Dashed((400.0, 0.0), (400.0, 600.0), 5.0, 15.0),
                Op::Rect(50.0, 70.0, 15.0, 100.0, PLAYER_COLOR),
                Op::Rect(735.0, 430.0, 15.0, 100.0, OPPONENT_COLOR),
                Op::Circle(333.0, 44.0, 5.0, BALL_COLOR),
            ]
        );
    }

    #[test]
    fn redraw_holds_no_state_between_frames() {
        let state = MatchState::new();
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        draw(&state, &mut first);
        draw(&state, &mut second);
        assert_eq!(first.0, second.0);
    }
}
