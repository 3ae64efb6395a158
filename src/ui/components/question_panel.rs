use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::controller::SessionView;
use crate::session::question::DrillMode;
use crate::ui::theme::Theme;

const CURSOR: &str = "\u{2588}";

/// Current question plus the answer line.
pub struct QuestionPanel<'a> {
    view: &'a SessionView,
    theme: &'a Theme,
}

impl<'a> QuestionPanel<'a> {
    pub fn new(view: &'a SessionView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for QuestionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let view = self.view;

        let block = Block::bordered()
            .title(format!(" Mode: {} ", view.mode_label))
            .border_style(Style::default().fg(if view.input_enabled {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(2),
                Constraint::Length(3),
            ])
            .split(inner);

        let mut heading = vec![Span::styled(
            format!(" Question #{}", view.question_number),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )];
        // Under the mixed drill, name the drawn sub-type
        if view.mode == DrillMode::Mixed {
            heading.push(Span::styled(
                format!("  ({})", view.question_mode.display_name()),
                Style::default().fg(colors.muted()),
            ));
        }
        Paragraph::new(Line::from(heading)).render(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            format!(" {}", view.prompt),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: false })
        .render(layout[1], buf);

        let input_block = Block::bordered()
            .title(" Your Answer ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.input_bg()));
        let input_inner = input_block.inner(layout[2]);
        input_block.render(layout[2], buf);

        let input_line = if view.input_enabled {
            if view.pending_input.is_empty() {
                Line::from(vec![
                    Span::styled(CURSOR, Style::default().fg(colors.input_fg())),
                    Span::styled(
                        " Type your number here...",
                        Style::default().fg(colors.muted()),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{}{CURSOR}", view.pending_input),
                    Style::default().fg(colors.input_fg()),
                ))
            }
        } else {
            Line::from(Span::styled(
                "Locked: the timed challenge is over",
                Style::default().fg(colors.muted()),
            ))
        };
        Paragraph::new(input_line).render(input_inner, buf);
    }
}
