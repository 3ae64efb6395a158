use std::time::{Duration, Instant};

use log::info;

use crate::config::Config;
use crate::session::controller::{DrillSession, SessionView};
use crate::session::question::DrillMode;
use crate::session::timer::{Clock, SystemClock};
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;

/// How long the end-of-challenge banner stays up.
const CELEBRATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Drill,
}

/// Front-end state around the single drill session.
pub struct App<C: Clock = SystemClock> {
    pub screen: AppScreen,
    pub session: DrillSession<C>,
    pub menu: Menu,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    celebrate_until: Option<Instant>,
}

impl App<SystemClock> {
    pub fn new(config: Config, theme: Theme) -> Self {
        let session = DrillSession::new(config.timed_duration_secs);
        Self::with_session(config, theme, session)
    }
}

impl<C: Clock> App<C> {
    pub fn with_session(config: Config, theme: Theme, mut session: DrillSession<C>) -> Self {
        session.switch_mode(config.default_mode, false);
        Self {
            screen: AppScreen::Menu,
            session,
            menu: Menu::new(config.timed_duration_secs),
            theme,
            config,
            should_quit: false,
            celebrate_until: None,
        }
    }

    pub fn start_drill(&mut self, mode: DrillMode) {
        self.celebrate_until = None;
        self.session.switch_mode(mode, false);
        self.screen = AppScreen::Drill;
    }

    pub fn start_timed_challenge(&mut self) {
        self.celebrate_until = None;
        self.session.start_timed_session();
        self.screen = AppScreen::Drill;
    }

    /// Resume the session as it was; a mode switch is what resets progress.
    pub fn resume_drill(&mut self) {
        self.session.initialize();
        self.screen = AppScreen::Drill;
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn perform(&mut self, action: MenuAction) {
        match action {
            MenuAction::Drill(mode) => self.start_drill(mode),
            MenuAction::TimedChallenge => self.start_timed_challenge(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn type_char(&mut self, ch: char) {
        self.session.push_input(ch);
    }

    pub fn backspace(&mut self) {
        self.session.pop_input();
    }

    pub fn submit(&mut self) {
        // Rejections are reported through the session feedback
        let _ = self.session.submit();
        self.claim_expiry();
    }

    pub fn skip(&mut self) {
        let _ = self.session.skip();
        self.claim_expiry();
    }

    /// Snapshot for drawing. Drawing can be the first thing to notice the deadline.
    pub fn view(&mut self) -> SessionView {
        let view = self.session.view();
        self.claim_expiry();
        view
    }

    pub fn is_locked(&self) -> bool {
        self.session.state().is_locked()
    }

    pub fn on_tick(&mut self) {
        self.session.tick();
        self.claim_expiry();
    }

    fn claim_expiry(&mut self) {
        if self.session.take_expiry() {
            info!("final score {}", self.session.state().score);
            self.celebrate_until = Some(Instant::now() + CELEBRATION);
        }
    }

    pub fn celebrating(&self) -> bool {
        self.celebrate_until
            .is_some_and(|until| Instant::now() < until)
    }
}
