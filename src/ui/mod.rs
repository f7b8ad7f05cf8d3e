pub mod court;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::*;

use crate::app::{App, MIN_COURT_COLS, MIN_COURT_ROWS};
use crate::game::scoring::Phase;
use crate::game::{Side, FIELD_HEIGHT, FIELD_WIDTH, WINNING_SCORE};
use court::{CanvasSurface, COURT_BG, OPPONENT_COLOR, PLAYER_COLOR};

const PANEL_BG: Color = Color::Rgb(15, 15, 25);
const KEY_COLOR: Color = Color::Rgb(80, 200, 255);
const DIM: Color = Color::Rgb(100, 100, 130);

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scoreboard
            Constraint::Min(0),    // Court
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_scoreboard(frame, app, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(90, 90, 110)))
        .title(" 🎾 Tennis ")
        .title_style(Style::default().fg(Color::Rgb(251, 191, 36)).add_modifier(Modifier::BOLD));
    let inner = block.inner(chunks[1]);
    app.set_court_area(inner);

    if app.surface_ready() {
        let state = app.game().state();
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(COURT_BG)
            .x_bounds([0.0, f64::from(FIELD_WIDTH)])
            .y_bounds([0.0, f64::from(FIELD_HEIGHT)])
            .paint(|ctx| court::draw(state, &mut CanvasSurface::new(ctx)));
        frame.render_widget(canvas, chunks[1]);

        match app.game().phase() {
            Phase::Idle => render_instructions(frame, inner),
            Phase::Finished { winner } => render_result(frame, inner, winner),
            Phase::Playing => {}
        }
    } else {
        frame.render_widget(block, chunks[1]);
        let msg = Paragraph::new(vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Court needs at least {}x{} cells", MIN_COURT_COLS, MIN_COURT_ROWS),
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(msg, inner);
    }

    render_help(frame, app, chunks[2]);
}

fn render_scoreboard(frame: &mut Frame, app: &App, area: Rect) {
    let score = app.game().score();
    let line = Line::from(vec![
        Span::styled(
            format!("Player: {}", score.player()),
            Style::default().fg(PLAYER_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   vs   ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("CPU: {}", score.opponent()),
            Style::default().fg(OPPONENT_COLOR).add_modifier(Modifier::BOLD),
        ),
    ]);
    let board = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200))),
    );
    frame.render_widget(board, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn panel(frame: &mut Frame, area: Rect, title: &str, accent: Color, lines: Vec<Line>) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(accent))
        .title(title.to_string())
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(p, area);
}

fn render_instructions(frame: &mut Frame, court: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("↑ / ↓", Style::default().fg(KEY_COLOR).add_modifier(Modifier::BOLD)),
            Span::styled("  move your paddle", Style::default().fg(Color::Rgb(180, 180, 200))),
        ]),
        Line::from(Span::styled(
            format!("First to {} wins!", WINNING_SCORE),
            Style::default().fg(Color::Rgb(255, 215, 0)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(DIM)),
            Span::styled("ENTER", Style::default().fg(KEY_COLOR).add_modifier(Modifier::BOLD)),
            Span::styled(" to start", Style::default().fg(DIM)),
        ]),
    ];
    panel(frame, centered(court, 36, 8), " Tennis ", KEY_COLOR, lines);
}

fn render_result(frame: &mut Frame, court: Rect, winner: Side) {
    let (headline, accent) = match winner {
        Side::Player => ("YOU WIN!", PLAYER_COLOR),
        Side::Opponent => ("YOU LOSE...", OPPONENT_COLOR),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} takes the match", winner.label()),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(DIM)),
            Span::styled("ENTER", Style::default().fg(KEY_COLOR).add_modifier(Modifier::BOLD)),
            Span::styled(" to play again", Style::default().fg(DIM)),
        ]),
    ];
    panel(frame, centered(court, 36, 8), " Game Over ", accent, lines);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!(" ⚠ {}", status),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(msg, area);
        return;
    }

    let sep = || Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60)));
    let hint = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let spans = match app.game().phase() {
        Phase::Playing => vec![
            hint(" ↑↓ Move Paddle "),
            sep(),
            hint("R Restart "),
            sep(),
            hint("Q Quit"),
        ],
        Phase::Idle | Phase::Finished { .. } => vec![
            Span::styled(
                " ENTER Play ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            sep(),
            hint("↑↓ Move Paddle "),
            sep(),
            hint("Q Quit"),
        ],
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
