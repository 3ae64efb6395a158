use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::question::DrillMode;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Drill(DrillMode),
    TimedChallenge,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    pub fn new(timed_duration_secs: u64) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    label: "Square Drills".to_string(),
                    description: "Squares of 1 to 50".to_string(),
                    action: MenuAction::Drill(DrillMode::Square),
                },
                MenuItem {
                    key: '2',
                    label: "Cube Drills".to_string(),
                    description: "Cubes of 1 to 20".to_string(),
                    action: MenuAction::Drill(DrillMode::Cube),
                },
                MenuItem {
                    key: '3',
                    label: "Percentage Drills".to_string(),
                    description: "Common exam percentages of round numbers".to_string(),
                    action: MenuAction::Drill(DrillMode::Percentage),
                },
                MenuItem {
                    key: 't',
                    label: format!("Start {timed_duration_secs} Second Mixed Drill"),
                    description: "Timed challenge drawing from every drill".to_string(),
                    action: MenuAction::TimedChallenge,
                },
                MenuItem {
                    key: 'q',
                    label: "Quit".to_string(),
                    description: String::new(),
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.action)
    }
}

pub struct MenuView<'a> {
    menu: &'a Menu,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Daily Drill Master",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Squares, cubes and percentages for exam speed",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.menu
                    .items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.menu.items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.muted()))),
            ];

            if let Some(slot) = menu_layout.get(i) {
                Paragraph::new(lines).render(*slot, buf);
            }
        }
    }
}
