use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::session::timer::remaining_ratio;
use crate::ui::theme::Theme;

/// Seconds left at which the bar switches to the warning colour.
const HURRY_SECS: u64 = 10;

/// Draining bar for the timed challenge countdown.
pub struct CountdownBar<'a> {
    pub remaining_secs: u64,
    pub duration_secs: u64,
    pub theme: &'a Theme,
}

impl<'a> CountdownBar<'a> {
    pub fn new(remaining_secs: u64, duration_secs: u64, theme: &'a Theme) -> Self {
        Self {
            remaining_secs,
            duration_secs,
            theme,
        }
    }
}

impl Widget for CountdownBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Time Remaining ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let ratio = remaining_ratio(self.remaining_secs, self.duration_secs);
        let filled_width = (ratio * inner.width as f64).round() as u16;
        let fill = if self.remaining_secs <= HURRY_SECS {
            colors.warning()
        } else {
            colors.bar_filled()
        };
        let label = format!("{}s", self.remaining_secs);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
