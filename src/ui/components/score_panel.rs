use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::controller::SessionView;
use crate::session::timer::TimerPhase;
use crate::ui::components::progress_bar::CountdownBar;
use crate::ui::theme::Theme;

pub struct ScorePanel<'a> {
    view: &'a SessionView,
    theme: &'a Theme,
    celebrate: bool,
}

impl<'a> ScorePanel<'a> {
    pub fn new(view: &'a SessionView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            celebrate: false,
        }
    }

    /// Show the "time is up" banner instead of the plain final score.
    pub fn celebrate(mut self, on: bool) -> Self {
        self.celebrate = on;
        self
    }
}

impl Widget for ScorePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let view = self.view;

        let block = Block::bordered()
            .title(" Your Score ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let score_lines = vec![
            Line::from(Span::styled(
                "Correct Answers",
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Out of {} Attempts", view.attempts_made),
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(score_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        if !view.is_timed_session {
            return;
        }

        match (view.timer_phase, view.remaining_secs) {
            (TimerPhase::Running, Some(remaining)) => {
                CountdownBar::new(remaining, view.duration_secs, self.theme)
                    .render(layout[1], buf);
                Paragraph::new(Line::from(Span::styled(
                    "Hurry!",
                    Style::default().fg(colors.warning()),
                )))
                .alignment(Alignment::Center)
                .render(layout[2], buf);
            }
            (TimerPhase::Expired, _) => {
                let text = if self.celebrate {
                    format!(
                        "Time is up! You scored {} in {} seconds.",
                        view.score, view.duration_secs
                    )
                } else {
                    format!("Quiz ended. Final Score: {}", view.score)
                };
                let style = Style::default()
                    .fg(colors.warning())
                    .add_modifier(if self.celebrate {
                        Modifier::BOLD | Modifier::REVERSED
                    } else {
                        Modifier::BOLD
                    });
                Paragraph::new(Line::from(Span::styled(text, style)))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(layout[1].union(layout[2]), buf);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::DrillMode;
    use crate::session::state::Feedback;

    fn view(phase: TimerPhase, remaining: Option<u64>) -> SessionView {
        SessionView {
            mode: DrillMode::Mixed,
            mode_label: DrillMode::Mixed.display_name(),
            question_number: 6,
            prompt: "What is the square of 12?".to_string(),
            question_mode: DrillMode::Square,
            feedback: Feedback::default(),
            score: 4,
            attempts_made: 5,
            pending_input: String::new(),
            is_timed_session: true,
            remaining_secs: remaining,
            duration_secs: 60,
            timer_phase: phase,
            input_enabled: phase != TimerPhase::Expired,
        }
    }

    fn render_text(panel: ScorePanel) -> String {
        let area = Rect::new(0, 0, 30, 14);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_running_shows_countdown() {
        let theme = Theme::default();
        let v = view(TimerPhase::Running, Some(17));
        let text = render_text(ScorePanel::new(&v, &theme));
        assert!(text.contains("Out of 5 Attempts"));
        assert!(text.contains("17s"));
    }

    #[test]
    fn test_expired_shows_final_score() {
        let theme = Theme::default();
        let v = view(TimerPhase::Expired, Some(0));
        let text = render_text(ScorePanel::new(&v, &theme));
        assert!(text.contains("Final Score: 4"));
        let text = render_text(ScorePanel::new(&v, &theme).celebrate(true));
        assert!(text.contains("Time is up!"));
    }
}
