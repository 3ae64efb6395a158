use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{LevelFilter, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use simplelog::{ConfigBuilder, WriteLogger};

use drillmaster::app::{App, AppScreen};
use drillmaster::config::Config;
use drillmaster::event::{AppEvent, EventHandler};
use drillmaster::session::question::DrillMode;
use drillmaster::ui;
use drillmaster::ui::components::menu::MenuView;
use drillmaster::ui::components::question_panel::QuestionPanel;
use drillmaster::ui::components::score_panel::ScorePanel;
use drillmaster::ui::layout::{DrillLayout, pack_hint_lines};
use drillmaster::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "drillmaster",
    version,
    about = "Mental-math drills for squares, cubes and percentages"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, value_parser = parse_mode, help = "Drill to open (square, cube, percentage)")]
    mode: Option<DrillMode>,

    #[arg(short, long, help = "Timed challenge length in seconds")]
    duration: Option<u64>,

    #[arg(long, help = "Start the timed challenge right away")]
    timed: bool,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

fn parse_mode(s: &str) -> Result<DrillMode, String> {
    DrillMode::from_name(s)
        .filter(|mode| *mode != DrillMode::Mixed)
        .ok_or_else(|| format!("unknown drill '{s}' (expected square, cube or percentage)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(duration) = cli.duration {
        config.timed_duration_secs = duration;
    }
    config.normalize();

    if cli.write_config {
        config.save()?;
        println!("Wrote {}", Config::config_path().display());
        return Ok(());
    }

    let log_path = cli.log_file.clone().unwrap_or_else(Config::default_log_path);
    init_logging(&log_path, config.level_filter());
    if let Some(err) = config_error {
        warn!("could not load {}: {err:#}; using defaults", Config::config_path().display());
    }
    info!(
        "drillmaster starting: mode {}, timed challenge {}s",
        config.default_mode, config.timed_duration_secs
    );

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!("theme '{}' not found, using default", config.theme);
        Theme::default()
    });
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    let mut app = App::new(config, theme);
    if cli.timed {
        app.start_timed_challenge();
    } else if let Some(mode) = cli.mode {
        app.start_drill(mode);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("exiting on error: {err:?}");
        eprintln!("Error: {err:?}");
    }
    info!("drillmaster exiting");

    Ok(())
}

fn init_logging(path: &Path, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Release and Repeat would double-type on terminals that report them
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Drill => handle_drill_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Char('c') => app.resume_drill(),
        KeyCode::Enter => {
            if let Some(action) = app.menu.selected_action() {
                app.perform(action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                app.perform(action);
            }
        }
        _ => {}
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab => app.skip(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::F(1) => app.start_drill(DrillMode::Square),
        KeyCode::F(2) => app.start_drill(DrillMode::Cube),
        KeyCode::F(3) => app.start_drill(DrillMode::Percentage),
        KeyCode::F(5) => app.start_timed_challenge(),
        KeyCode::Char('r') if app.is_locked() => app.start_timed_challenge(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let bg = Block::default().style(Style::default().bg(app.theme.colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Drill => render_drill(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let state = app.session.state();
    let header_info = format!(
        " {} | Score {} / {} attempts",
        state.mode.display_name(),
        state.score,
        state.attempts_made()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " drillmaster ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(MenuView::new(&app.menu, &app.theme), menu_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [1-3] Drill  [t] Timed challenge  [c] Continue  [q] Quit ",
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_drill(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let view = app.view();
    let colors = &app.theme.colors;

    let hints: &[&str] = if view.input_enabled {
        &[
            "[Enter] Check Answer",
            "[Tab] Skip Question",
            "[F1-F3] Drills",
            "[F5] Timed",
            "[Esc] Menu",
        ]
    } else {
        &["[r] Restart challenge", "[Esc] Menu"]
    };
    let hint_lines = pack_hint_lines(hints, area.width as usize);
    let layout = DrillLayout::new(area, hint_lines.len());

    // Narrow terminals lose the score column, so the header carries the numbers
    let header_text = if layout.tier.show_score_panel() {
        format!(" Mode: {} ", view.mode_label)
    } else {
        let timer = view
            .remaining_secs
            .map(|secs| format!(" | {secs}s"))
            .unwrap_or_default();
        format!(
            " {} | {} / {}{timer} ",
            view.mode_label, view.score, view.attempts_made
        )
    };
    let header = Paragraph::new(Line::from(Span::styled(
        header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    frame.render_widget(QuestionPanel::new(&view, &app.theme), layout.main);

    if let Some(score_area) = layout.score {
        let panel = ScorePanel::new(&view, &app.theme).celebrate(app.celebrating());
        frame.render_widget(panel, score_area);
    }

    let feedback_line = if view.feedback.is_empty() {
        Line::from(Span::styled(
            "Start with your first question or try the Timed Challenge!",
            Style::default().fg(colors.muted()),
        ))
    } else {
        Line::from(Span::styled(
            view.feedback.message.clone(),
            Style::default()
                .fg(colors.feedback(view.feedback.kind))
                .add_modifier(Modifier::BOLD),
        ))
    };
    let feedback = Paragraph::new(feedback_line)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg())),
        );
    frame.render_widget(feedback, layout.feedback);

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}
