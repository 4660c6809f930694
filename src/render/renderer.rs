use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{GameConfig, GameState, Position, SheetRegion};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        config: &GameConfig,
        state: &GameState,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the play field horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(config, state);
        frame.render_widget(grid, game_area);

        if !state.is_playing() {
            let banner_area = centered_rect(game_area, 44, 7);
            frame.render_widget(Clear, banner_area);
            let banner = self.render_game_over(state);
            frame.render_widget(banner, banner_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// The play field, top row first. The world is y-up, so terminal rows
    /// run from the highest cell row down to zero. Per-cell priority head
    /// over body over apple mirrors the back-to-front draw order of the
    /// original sprite pass; a segment sharing the head's cell (freshly
    /// grown this tick) is hidden behind the head.
    fn render_grid(&self, config: &GameConfig, state: &GameState) -> Paragraph<'_> {
        let cell = config.cell_size;
        let mut lines = Vec::with_capacity(config.grid_height as usize);

        for row in 0..config.grid_height {
            let y = (config.grid_height - 1 - row) as i32 * cell;
            let mut spans = Vec::with_capacity(config.grid_width as usize);

            for col in 0..config.grid_width {
                let pos = Position::new(col as i32 * cell, y);

                let span = if pos == state.snake.head {
                    Span::styled(
                        glyph(state.snake.head_region),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(segment) =
                    state.snake.body.iter().find(|segment| segment.pos == pos)
                {
                    Span::styled(glyph(segment.region), Style::default().fg(Color::Green))
                } else if state.apple == Some(pos) {
                    Span::styled(
                        glyph(crate::game::sprite::APPLE),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Glyph for a sprite-sheet region. Corners pick the box-drawing piece
/// joining the two path neighbors once the y-flip to terminal rows is
/// accounted for.
fn glyph(region: SheetRegion) -> &'static str {
    match (region.sx, region.sy) {
        // Heads
        (4, 0) => "▶ ",
        (3, 1) => "◀ ",
        (3, 0) => "▲ ",
        (4, 1) => "▼ ",
        // Straight body
        (1, 0) => "──",
        (2, 1) => "│ ",
        // Corners
        (0, 0) => "┌─",
        (2, 0) => "┐ ",
        (0, 1) => "└─",
        (2, 2) => "┘ ",
        // Tails
        (4, 2) => "╶─",
        (3, 3) => "╴ ",
        (3, 2) => "╵ ",
        (4, 3) => "╷ ",
        // Apple
        (0, 3) => "● ",
        _ => "? ",
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
