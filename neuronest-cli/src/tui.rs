//! Interactive terminal chat: state, key handling and the event loop

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use neuronest_agent::ChatController;
use neuronest_core::Section;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, warn};

use crate::ui;

const FRAME_POLL: Duration = Duration::from_millis(60);

pub struct TuiApp {
    controller: ChatController,
    user_name: String,
    /// Lines scrolled up from the bottom of the conversation
    scroll_back: u16,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(controller: ChatController, user_name: String) -> Self {
        Self {
            controller,
            user_name,
            scroll_back: 0,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply any responses that arrived since the last frame
    pub fn tick(&mut self) {
        if self.controller.poll() > 0 {
            self.scroll_back = 0;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.select(Section::NewChat),
            KeyCode::F(2) => self.select(Section::History),
            KeyCode::F(3) => self.select(Section::Settings),
            KeyCode::F(4) => self.select(Section::Profile),
            KeyCode::F(5) => self.select(Section::Info),
            KeyCode::Home => self.select(Section::Home),
            KeyCode::PageUp | KeyCode::Up => {
                self.scroll_back = self.scroll_back.saturating_add(1);
            }
            KeyCode::PageDown | KeyCode::Down => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
            }
            _ if self.controller.session().section().shows_chat() => self.handle_chat_key(key),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.controller.next_tab(),
            KeyCode::BackTab => self.controller.previous_tab(),
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.controller.push_char('\n');
            }
            KeyCode::Enter => {
                if self.controller.submit_input() {
                    self.scroll_back = 0;
                }
            }
            KeyCode::Backspace => self.controller.pop_char(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_char(ch);
            }
            _ => {}
        }
    }

    fn select(&mut self, section: Section) {
        debug!("Switching to section {}", section);
        self.controller.select_section(section);
        self.scroll_back = 0;
    }
}

/// Restores the terminal when dropped, whichever way `run_tui` exits
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    /// Switch to raw mode and the alternate screen
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        }
    }
}

/// Take over the terminal and run the chat until the user quits
pub fn run_tui(controller: ChatController, user_name: String) -> Result<()> {
    let _guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = TuiApp::new(controller, user_name);
    event_loop(&mut terminal, &mut app)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(FRAME_POLL)? {
            if let CEvent::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use neuronest_core::{Role, Tab};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for ch in text.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn app() -> TuiApp {
        TuiApp::new(test_support::controller("Hi back"), "Sam".to_string())
    }

    #[tokio::test]
    async fn test_enter_submits_typed_text() {
        let mut app = app();
        type_text(&mut app, "Hi");
        app.handle_key(press(KeyCode::Enter));

        let session = app.controller().session();
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].text(), "Hi");
        assert_eq!(session.input(), "");
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn test_tick_applies_reply() {
        let mut app = app();
        type_text(&mut app, "Hi");
        app.handle_key(press(KeyCode::Enter));

        tokio::time::timeout(Duration::from_secs(1), async {
            while app.controller().is_loading() {
                tokio::task::yield_now().await;
                app.tick();
            }
        })
        .await
        .unwrap();

        let turns = app.controller().session().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role(), Role::Model);
        assert_eq!(turns[1].text(), "Hi back");
    }

    #[tokio::test]
    async fn test_shift_enter_inserts_newline() {
        let mut app = app();
        type_text(&mut app, "line one");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut app, "line two");

        assert_eq!(app.controller().input(), "line one\nline two");
        assert!(app.controller().session().is_empty());
    }

    #[tokio::test]
    async fn test_enter_on_blank_input_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        app.handle_key(press(KeyCode::Enter));

        assert!(app.controller().session().is_empty());
        assert_eq!(app.controller().input(), "   ");
    }

    #[tokio::test]
    async fn test_backspace_edits_input() {
        let mut app = app();
        type_text(&mut app, "Hey");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.controller().input(), "He");
    }

    #[tokio::test]
    async fn test_function_keys_switch_sections() {
        let mut app = app();
        app.handle_key(press(KeyCode::F(3)));
        assert_eq!(app.controller().session().section(), Section::Settings);

        // typing is ignored off the chat screen
        type_text(&mut app, "abc");
        assert_eq!(app.controller().input(), "");

        app.handle_key(press(KeyCode::Home));
        assert_eq!(app.controller().session().section(), Section::Home);
    }

    #[tokio::test]
    async fn test_f1_starts_new_chat() {
        let mut app = app();
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.controller().session().tab(), Tab::Ultrasound);

        app.handle_key(press(KeyCode::F(1)));

        assert_eq!(app.controller().session().section(), Section::NewChat);
        assert_eq!(app.controller().session().tab(), Tab::Checkup);
    }

    #[tokio::test]
    async fn test_back_tab_cycles_backwards() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.controller().session().tab(), Tab::Injection);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert_eq!(app.controller().input(), "");

        let mut app = self::app();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_terminal_guard_restores_screen_on_drop() {
        let mut out = Vec::new();
        {
            let _guard = TerminalGuard { out: &mut out };
        }
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\u{1b}[?1049l"));
        assert!(written.contains("\u{1b}[?25h"));
    }

    #[tokio::test]
    async fn test_scroll_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Up));
        app.handle_key(press(KeyCode::PageUp));
        assert_eq!(app.scroll_back(), 2);
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.scroll_back(), 0);
    }
}
